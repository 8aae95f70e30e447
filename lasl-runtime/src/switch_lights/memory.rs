//! # Memory 模块
//!
//! 宿主对象模型的内存实现。
//!
//! 用于无头模拟（CLI）和测试：模块是一个字段表加一张事件表，
//! 触发事件时按 [`EventAction`] 修改字段，并记录事件日志，
//! 方便检查适配器是否触发了多余的切换。
//!
//! 载具描述可以从 JSON 反序列化：
//!
//! ```text
//! {
//!   "id": 1, "name": "Kerbal X",
//!   "parts": [
//!     { "id": 10, "name": "spotLight1", "modules": [
//!       { "name": "ModuleLight",
//!         "fields": { "isOn": false, "lightBrightenSpeed": 0.3, "lightDimSpeed": 0.3 },
//!         "events": {
//!           "LightsOn":  [{ "action": "set", "field": "isOn", "value": true }],
//!           "LightsOff": [{ "action": "set", "field": "isOn", "value": false }]
//!         } }
//!     ] }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::rc::{Rc, Weak};
use tracing::debug;

use super::handle::{FieldValue, InstanceId, Part, PartModule, Vessel};
use crate::error::{LaslError, LaslResult};

/// 事件触发时对字段的修改
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum EventAction {
    /// 写入固定值
    Set { field: String, value: FieldValue },
    /// 翻转布尔字段（缺失时视为 false）
    Toggle { field: String },
    /// 把一个字段的值复制到另一个字段
    Copy { from: String, to: String },
}

/// 模块描述
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleSpec {
    /// 模块类型名
    pub name: String,
    /// 初始字段
    #[serde(default)]
    pub fields: BTreeMap<String, FieldValue>,
    /// 事件表
    #[serde(default)]
    pub events: BTreeMap<String, Vec<EventAction>>,
}

impl ModuleSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// 设置初始字段
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// 为事件追加一个动作
    pub fn on_event(mut self, event: impl Into<String>, action: EventAction) -> Self {
        self.events.entry(event.into()).or_default().push(action);
        self
    }
}

/// 零件描述
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartSpec {
    pub id: InstanceId,
    pub name: String,
    #[serde(default)]
    pub crew_capacity: u32,
    #[serde(default)]
    pub modules: Vec<ModuleSpec>,
}

impl PartSpec {
    pub fn new(id: InstanceId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            crew_capacity: 0,
            modules: Vec::new(),
        }
    }

    pub fn with_crew_capacity(mut self, capacity: u32) -> Self {
        self.crew_capacity = capacity;
        self
    }

    pub fn with_module(mut self, module: ModuleSpec) -> Self {
        self.modules.push(module);
        self
    }
}

/// 载具描述
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VesselSpec {
    pub id: InstanceId,
    pub name: String,
    #[serde(default)]
    pub parts: Vec<PartSpec>,
}

impl VesselSpec {
    pub fn new(id: InstanceId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            parts: Vec::new(),
        }
    }

    pub fn with_part(mut self, part: PartSpec) -> Self {
        self.parts.push(part);
        self
    }
}

/// 内存模块
#[derive(Debug)]
pub struct MemoryModule {
    name: String,
    part_name: String,
    fields: RefCell<BTreeMap<String, FieldValue>>,
    events: BTreeMap<String, Vec<EventAction>>,
    fired: RefCell<Vec<String>>,
}

impl MemoryModule {
    fn new(spec: ModuleSpec, part_name: &str) -> Self {
        Self {
            name: spec.name,
            part_name: part_name.to_string(),
            fields: RefCell::new(spec.fields),
            events: spec.events,
            fired: RefCell::new(Vec::new()),
        }
    }

    /// 已触发的事件（按顺序）
    pub fn fired(&self) -> Vec<String> {
        self.fired.borrow().clone()
    }

    /// 清空事件日志
    pub fn clear_fired(&self) {
        self.fired.borrow_mut().clear();
    }

    fn to_spec(&self) -> ModuleSpec {
        ModuleSpec {
            name: self.name.clone(),
            fields: self.fields.borrow().clone(),
            events: self.events.clone(),
        }
    }

    fn apply(&self, action: &EventAction) {
        let mut fields = self.fields.borrow_mut();
        match action {
            EventAction::Set { field, value } => {
                fields.insert(field.clone(), value.clone());
            }
            EventAction::Toggle { field } => {
                let current = fields.get(field).and_then(FieldValue::as_bool).unwrap_or(false);
                fields.insert(field.clone(), FieldValue::Bool(!current));
            }
            EventAction::Copy { from, to } => {
                if let Some(value) = fields.get(from).cloned() {
                    fields.insert(to.clone(), value);
                }
            }
        }
    }
}

impl PartModule for MemoryModule {
    fn module_name(&self) -> &str {
        &self.name
    }

    fn part_name(&self) -> &str {
        &self.part_name
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        self.fields.borrow().get(name).cloned()
    }

    fn set_field(&self, name: &str, value: FieldValue) -> bool {
        self.fields.borrow_mut().insert(name.to_string(), value);
        true
    }

    fn fire(&self, event: &str) -> bool {
        let Some(actions) = self.events.get(event) else {
            return false;
        };
        for action in actions {
            self.apply(action);
        }
        self.fired.borrow_mut().push(event.to_string());
        true
    }
}

/// 内存零件
#[derive(Debug)]
pub struct MemoryPart {
    id: InstanceId,
    name: String,
    crew_capacity: u32,
    modules: Vec<Rc<MemoryModule>>,
    vessel: Weak<MemoryVessel>,
}

impl MemoryPart {
    fn new(spec: PartSpec, vessel: Weak<MemoryVessel>) -> Self {
        let modules = spec
            .modules
            .into_iter()
            .map(|m| Rc::new(MemoryModule::new(m, &spec.name)))
            .collect();
        Self {
            id: spec.id,
            name: spec.name,
            crew_capacity: spec.crew_capacity,
            modules,
            vessel,
        }
    }

    /// 创建不属于任何载具的零件
    pub fn loose(spec: PartSpec) -> Rc<Self> {
        Rc::new(Self::new(spec, Weak::new()))
    }

    /// 按类型名查找模块
    pub fn module(&self, module_name: &str) -> Option<&Rc<MemoryModule>> {
        self.modules.iter().find(|m| m.name == module_name)
    }

    pub fn memory_modules(&self) -> &[Rc<MemoryModule>] {
        &self.modules
    }

    fn to_spec(&self) -> PartSpec {
        PartSpec {
            id: self.id,
            name: self.name.clone(),
            crew_capacity: self.crew_capacity,
            modules: self.modules.iter().map(|m| m.to_spec()).collect(),
        }
    }
}

impl Part for MemoryPart {
    fn instance_id(&self) -> InstanceId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn crew_capacity(&self) -> u32 {
        self.crew_capacity
    }

    fn modules(&self) -> Vec<Rc<dyn PartModule>> {
        self.modules
            .iter()
            .map(|m| Rc::clone(m) as Rc<dyn PartModule>)
            .collect()
    }

    fn vessel(&self) -> Option<Rc<dyn Vessel>> {
        self.vessel.upgrade().map(|v| v as Rc<dyn Vessel>)
    }
}

/// 内存载具
#[derive(Debug)]
pub struct MemoryVessel {
    id: InstanceId,
    name: String,
    parts: Vec<Rc<MemoryPart>>,
}

impl MemoryVessel {
    /// 从描述构建载具，零件持有指回载具的弱引用
    pub fn build(spec: VesselSpec) -> Rc<Self> {
        Rc::new_cyclic(|weak| Self {
            id: spec.id,
            name: spec.name,
            parts: spec
                .parts
                .into_iter()
                .map(|p| Rc::new(MemoryPart::new(p, weak.clone())))
                .collect(),
        })
    }

    /// 从 JSON 构建载具
    pub fn from_json(json: &str) -> Result<Rc<Self>, serde_json::Error> {
        let spec: VesselSpec = serde_json::from_str(json)?;
        Ok(Self::build(spec))
    }

    /// 从 JSON 文件构建载具
    pub fn load(path: impl AsRef<Path>) -> LaslResult<Rc<Self>> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| LaslError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let vessel = Self::from_json(&content).map_err(LaslError::VesselDescription)?;
        debug!(path = %path.display(), vessel = %vessel.name, parts = vessel.parts.len(), "载具描述已加载");
        Ok(vessel)
    }

    /// 导出为描述（字段取当前值）
    pub fn to_spec(&self) -> VesselSpec {
        VesselSpec {
            id: self.id,
            name: self.name.clone(),
            parts: self.parts.iter().map(|p| p.to_spec()).collect(),
        }
    }

    /// 按实例 ID 查找零件
    pub fn part(&self, id: InstanceId) -> Option<&Rc<MemoryPart>> {
        self.parts.iter().find(|p| p.id == id)
    }

    pub fn memory_parts(&self) -> &[Rc<MemoryPart>] {
        &self.parts
    }
}

impl Vessel for MemoryVessel {
    fn instance_id(&self) -> InstanceId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn parts(&self) -> Vec<Rc<dyn Part>> {
        self.parts
            .iter()
            .map(|p| Rc::clone(p) as Rc<dyn Part>)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lamp() -> ModuleSpec {
        ModuleSpec::new("ModuleLight")
            .with_field("isOn", false)
            .on_event(
                "LightsOn",
                EventAction::Set {
                    field: "isOn".to_string(),
                    value: FieldValue::Bool(true),
                },
            )
            .on_event(
                "Flip",
                EventAction::Toggle {
                    field: "isOn".to_string(),
                },
            )
    }

    #[test]
    fn test_events_mutate_fields() {
        let vessel = MemoryVessel::build(
            VesselSpec::new(1, "Test").with_part(PartSpec::new(10, "lamp").with_module(lamp())),
        );
        let part = vessel.part(10).unwrap();
        let module = part.module("ModuleLight").unwrap();

        assert!(!module.bool_field("isOn"));
        assert!(module.fire("LightsOn"));
        assert!(module.bool_field("isOn"));
        assert!(module.fire("Flip"));
        assert!(!module.bool_field("isOn"));
        assert!(!module.fire("Unknown"));
        assert_eq!(module.fired(), vec!["LightsOn", "Flip"]);
        assert_eq!(module.part_name(), "lamp");
    }

    #[test]
    fn test_copy_action() {
        let part = MemoryPart::loose(
            PartSpec::new(1, "nav").with_module(
                ModuleSpec::new("ModuleNavLight")
                    .with_field("navLightSwitch", 0_i64)
                    .with_field("toggleModeSelector", 3_i64)
                    .on_event(
                        "On",
                        EventAction::Copy {
                            from: "toggleModeSelector".to_string(),
                            to: "navLightSwitch".to_string(),
                        },
                    ),
            ),
        );
        let module = part.module("ModuleNavLight").unwrap();
        module.fire("On");
        assert_eq!(module.int_field("navLightSwitch"), 3);
    }

    #[test]
    fn test_parts_link_back_to_vessel() {
        let vessel = MemoryVessel::build(
            VesselSpec::new(7, "Link")
                .with_part(PartSpec::new(1, "a"))
                .with_part(PartSpec::new(2, "b")),
        );
        let parts = vessel.parts();
        assert_eq!(parts.len(), 2);
        let owner = parts[1].vessel().unwrap();
        assert_eq!(owner.instance_id(), 7);

        let loose = MemoryPart::loose(PartSpec::new(3, "c"));
        assert!(loose.vessel().is_none());
    }

    #[test]
    fn test_load_and_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vessel.json");
        let spec = VesselSpec::new(3, "Saved").with_part(PartSpec::new(1, "lamp").with_module(lamp()));
        std::fs::write(&path, serde_json::to_string(&spec).unwrap()).unwrap();

        let vessel = MemoryVessel::load(&path).unwrap();
        vessel.part(1).unwrap().module("ModuleLight").unwrap().fire("LightsOn");

        let exported = vessel.to_spec();
        assert_eq!(exported.parts[0].modules[0].fields["isOn"], FieldValue::Bool(true));
        assert_eq!(exported.parts[0].modules[0].events, spec.parts[0].modules[0].events);

        assert!(matches!(
            MemoryVessel::load(dir.path().join("missing.json")),
            Err(LaslError::Io { .. })
        ));
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            MemoryVessel::load(&path),
            Err(LaslError::VesselDescription(_))
        ));
    }

    #[test]
    fn test_vessel_from_json() {
        let json = r#"{
            "id": 1, "name": "Kerbal X",
            "parts": [
                { "id": 10, "name": "spotLight1", "crew_capacity": 0, "modules": [
                    { "name": "ModuleLight",
                      "fields": { "isOn": false },
                      "events": { "LightsOn": [{ "action": "set", "field": "isOn", "value": true }] } }
                ] },
                { "id": 11, "name": "mk1pod", "crew_capacity": 1 }
            ]
        }"#;
        let vessel = MemoryVessel::from_json(json).unwrap();
        assert_eq!(vessel.name(), "Kerbal X");
        assert_eq!(vessel.memory_parts().len(), 2);
        assert_eq!(vessel.part(11).unwrap().crew_capacity(), 1);
        assert!(vessel.part(10).unwrap().has_module("ModuleLight"));
    }
}
