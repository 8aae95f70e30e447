//! 单元测试共用的适配器与载具构造函数。

use std::rc::Rc;

use super::adapter::SwitchLights;
use super::cache::ModuleCache;
use super::handle::{FieldValue, PartModule};
use super::memory::{EventAction, MemoryVessel, ModuleSpec, PartSpec, VesselSpec};

/// 测试灯：`isOn` 字段 + `On` / `Off` 事件，`speed` 字段决定是否慢速
pub struct TestLamp;

impl SwitchLights for TestLamp {
    fn module_names(&self) -> &'static [&'static str] {
        &["TestLamp"]
    }

    fn is_active(&self, module: &dyn PartModule) -> bool {
        !module.bool_field("inactive")
    }

    fn is_slow_light(&self, module: &dyn PartModule, threshold_in_secs: f32) -> bool {
        f64::from(threshold_in_secs) > module.float_field("speed")
    }

    fn is_beacon_light(&self, _: &dyn PartModule) -> bool {
        false
    }

    fn is_navigation_light(&self, _: &dyn PartModule) -> bool {
        false
    }

    fn is_strobe_light(&self, _: &dyn PartModule) -> bool {
        false
    }

    fn is_utility_light(&self, _: &dyn PartModule) -> bool {
        true
    }

    fn is_on(&self, module: &dyn PartModule) -> bool {
        module.bool_field("isOn")
    }

    fn turn_on(&self, module: &dyn PartModule) {
        if !self.is_on(module) {
            module.fire("On");
        }
    }

    fn turn_off(&self, module: &dyn PartModule) {
        if self.is_on(module) {
            module.fire("Off");
        }
    }
}

pub fn lamp(on: bool, speed: f64) -> ModuleSpec {
    ModuleSpec::new("TestLamp")
        .with_field("isOn", on)
        .with_field("speed", speed)
        .on_event(
            "On",
            EventAction::Set {
                field: "isOn".to_string(),
                value: FieldValue::Bool(true),
            },
        )
        .on_event(
            "Off",
            EventAction::Set {
                field: "isOn".to_string(),
                value: FieldValue::Bool(false),
            },
        )
}

pub fn lamp_part(id: i64, on: bool) -> PartSpec {
    PartSpec::new(id, format!("lamp{id}")).with_module(lamp(on, 5.0))
}

pub fn cache() -> ModuleCache {
    ModuleCache::builder().register(TestLamp).build()
}

pub fn vessel_with(parts: Vec<PartSpec>) -> Rc<MemoryVessel> {
    let mut spec = VesselSpec::new(1, "Test");
    spec.parts = parts;
    MemoryVessel::build(spec)
}
