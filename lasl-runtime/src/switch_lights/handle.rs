//! # Handle 模块
//!
//! 宿主对象模型的边界。
//!
//! 零件、模块、载具都由宿主持有，核心从不创建或销毁它们，
//! 只通过这里的 trait 读取、分类和修改。模块的字段与事件按名字访问，
//! 与宿主引擎的反射式字段/事件表一一对应。
//!
//! ## 线程模型
//!
//! 句柄以 `Rc` 共享，宿主对象内部使用内部可变性。
//! 所有操作都在宿主的单一更新线程上执行。

use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// 宿主对象实例 ID
pub type InstanceId = i64;

/// 模块字段值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// 布尔
    Bool(bool),
    /// 整数
    Int(i64),
    /// 浮点数
    Float(f64),
    /// 文本
    Text(String),
}

impl FieldValue {
    /// 读取为布尔
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// 读取为整数
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// 读取为浮点数（整数会被提升）
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// 读取为文本
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// 零件模块句柄
///
/// 字段缺失或类型不符时，`*_field` 辅助方法返回 `false` / `0` / 空串，
/// 适配器因此永远不会因为宿主数据异常而 panic。
pub trait PartModule {
    /// 模块类型名（注册表按它查找适配器）
    fn module_name(&self) -> &str;

    /// 所属零件名
    fn part_name(&self) -> &str;

    /// 读取字段
    fn field(&self, name: &str) -> Option<FieldValue>;

    /// 写入字段，返回字段是否被接受
    fn set_field(&self, name: &str, value: FieldValue) -> bool;

    /// 触发模块事件，返回事件是否存在
    fn fire(&self, event: &str) -> bool;

    /// 读取布尔字段
    fn bool_field(&self, name: &str) -> bool {
        self.field(name).and_then(|v| v.as_bool()).unwrap_or(false)
    }

    /// 读取整数字段
    fn int_field(&self, name: &str) -> i64 {
        self.field(name).and_then(|v| v.as_int()).unwrap_or(0)
    }

    /// 读取浮点字段
    fn float_field(&self, name: &str) -> f64 {
        self.field(name).and_then(|v| v.as_float()).unwrap_or(0.0)
    }

    /// 读取文本字段
    fn text_field(&self, name: &str) -> String {
        self.field(name)
            .and_then(|v| v.as_text().map(str::to_string))
            .unwrap_or_default()
    }
}

/// 零件句柄
pub trait Part {
    /// 实例 ID
    fn instance_id(&self) -> InstanceId;

    /// 零件名
    fn name(&self) -> &str;

    /// 乘员容量
    fn crew_capacity(&self) -> u32;

    /// 模块列表（按声明顺序）
    fn modules(&self) -> Vec<Rc<dyn PartModule>>;

    /// 所属载具（游离零件为 `None`）
    fn vessel(&self) -> Option<Rc<dyn Vessel>>;

    /// 是否含有指定类型的模块
    fn has_module(&self, module_name: &str) -> bool {
        self.modules()
            .iter()
            .any(|m| m.module_name() == module_name)
    }
}

/// 载具句柄
pub trait Vessel {
    /// 实例 ID
    fn instance_id(&self) -> InstanceId;

    /// 载具名
    fn name(&self) -> &str;

    /// 零件列表
    fn parts(&self) -> Vec<Rc<dyn Part>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_value_accessors() {
        assert_eq!(FieldValue::from(true).as_bool(), Some(true));
        assert_eq!(FieldValue::from(3_i64).as_float(), Some(3.0));
        assert_eq!(FieldValue::from(0.5).as_int(), None);
        assert_eq!(FieldValue::from("beacon").as_text(), Some("beacon"));
    }

    #[test]
    fn test_field_value_untagged_json() {
        let values: Vec<FieldValue> = serde_json::from_str(r#"[true, 2, 0.25, "nav"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                FieldValue::Bool(true),
                FieldValue::Int(2),
                FieldValue::Float(0.25),
                FieldValue::Text("nav".to_string()),
            ]
        );
    }
}
