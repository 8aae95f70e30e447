//! # Adapter 模块
//!
//! 灯光适配器的统一能力契约，以及零件解析得到的绑定结果。
//!
//! ## 设计说明
//!
//! - 每种灯光模块（普通灯、动画模块、变色模块、状态灯、航空灯……）
//!   各有一个适配器，把通用模块句柄翻译成该类模块的语义
//! - 适配器无状态，所有副作用都落在宿主模块上
//! - 没有匹配适配器的零件解析为 [`Binding::Absent`]，
//!   调用方无需区分"找不到适配器"的情况

use std::fmt;
use std::rc::Rc;

use super::handle::PartModule;

/// 灯光适配器
///
/// `turn_on` / `turn_off` 必须幂等：已经处于目标状态时不能再触发切换事件。
pub trait SwitchLights {
    /// 适配器声明支持的模块类型名
    fn module_names(&self) -> &'static [&'static str];

    /// 适配器名称（用于日志）
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// 该模块实例是否真的在充当灯光
    fn is_active(&self, module: &dyn PartModule) -> bool;

    /// 是否为慢速灯（亮/灭过程慢于阈值）
    fn is_slow_light(&self, module: &dyn PartModule, threshold_in_secs: f32) -> bool;

    /// 是否为信标灯
    fn is_beacon_light(&self, module: &dyn PartModule) -> bool;

    /// 是否为航行灯
    fn is_navigation_light(&self, module: &dyn PartModule) -> bool;

    /// 是否为频闪灯
    fn is_strobe_light(&self, module: &dyn PartModule) -> bool;

    /// 是否为照明灯
    fn is_utility_light(&self, module: &dyn PartModule) -> bool;

    /// 当前是否点亮
    fn is_on(&self, module: &dyn PartModule) -> bool;

    /// 点亮
    fn turn_on(&self, module: &dyn PartModule);

    /// 熄灭
    fn turn_off(&self, module: &dyn PartModule);
}

/// 零件的适配器绑定
///
/// `Absent` 遵循固定的惰性契约：`is_active` 为 false，`is_slow_light` 为 true，
/// 其余查询为 false，开关操作为空操作。
#[derive(Clone)]
pub enum Binding {
    /// 已绑定到某个模块及其适配器
    Bound {
        module: Rc<dyn PartModule>,
        adapter: Rc<dyn SwitchLights>,
    },
    /// 没有可用的适配器
    Absent,
}

impl Binding {
    /// 是否绑定到了适配器
    pub fn is_bound(&self) -> bool {
        matches!(self, Self::Bound { .. })
    }

    /// 绑定的模块类型名
    pub fn module_name(&self) -> Option<&str> {
        match self {
            Self::Bound { module, .. } => Some(module.module_name()),
            Self::Absent => None,
        }
    }

    pub fn is_active(&self) -> bool {
        match self {
            Self::Bound { module, adapter } => adapter.is_active(&**module),
            Self::Absent => false,
        }
    }

    pub fn is_slow_light(&self, threshold_in_secs: f32) -> bool {
        match self {
            Self::Bound { module, adapter } => {
                adapter.is_slow_light(&**module, threshold_in_secs)
            }
            Self::Absent => true,
        }
    }

    pub fn is_beacon_light(&self) -> bool {
        match self {
            Self::Bound { module, adapter } => adapter.is_beacon_light(&**module),
            Self::Absent => false,
        }
    }

    pub fn is_navigation_light(&self) -> bool {
        match self {
            Self::Bound { module, adapter } => adapter.is_navigation_light(&**module),
            Self::Absent => false,
        }
    }

    pub fn is_strobe_light(&self) -> bool {
        match self {
            Self::Bound { module, adapter } => adapter.is_strobe_light(&**module),
            Self::Absent => false,
        }
    }

    pub fn is_utility_light(&self) -> bool {
        match self {
            Self::Bound { module, adapter } => adapter.is_utility_light(&**module),
            Self::Absent => false,
        }
    }

    pub fn is_on(&self) -> bool {
        match self {
            Self::Bound { module, adapter } => adapter.is_on(&**module),
            Self::Absent => false,
        }
    }

    pub fn turn_on(&self) {
        if let Self::Bound { module, adapter } = self {
            adapter.turn_on(&**module);
        }
    }

    pub fn turn_off(&self) {
        if let Self::Bound { module, adapter } = self {
            adapter.turn_off(&**module);
        }
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bound { module, adapter } => f
                .debug_struct("Bound")
                .field("module", &module.module_name())
                .field("adapter", &adapter.name())
                .finish(),
            Self::Absent => f.write_str("Absent"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_binding_is_inert() {
        let binding = Binding::Absent;
        assert!(!binding.is_bound());
        assert!(!binding.is_active());
        assert!(binding.is_slow_light(0.0));
        assert!(!binding.is_beacon_light());
        assert!(!binding.is_navigation_light());
        assert!(!binding.is_strobe_light());
        assert!(!binding.is_utility_light());
        assert!(!binding.is_on());
        binding.turn_on();
        assert!(!binding.is_on());
        binding.turn_off();
        assert_eq!(binding.module_name(), None);
        assert_eq!(format!("{binding:?}"), "Absent");
    }
}
