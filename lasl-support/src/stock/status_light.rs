//! 状态灯（`ModuleStatusLight`）

use lasl_runtime::{FieldValue, PartModule, SwitchLights};
use tracing::debug;

/// 起落架等零件上的状态指示灯，不属于任何灯光类别
#[derive(Debug, Default, Clone, Copy)]
pub struct StatusLight;

impl SwitchLights for StatusLight {
    fn module_names(&self) -> &'static [&'static str] {
        &["ModuleStatusLight"]
    }

    fn name(&self) -> &'static str {
        "Stock.StatusLight"
    }

    fn is_active(&self, _: &dyn PartModule) -> bool {
        true
    }

    fn is_slow_light(&self, _: &dyn PartModule, _: f32) -> bool {
        false
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
        false
    }

    fn is_on(&self, module: &dyn PartModule) -> bool {
        module.bool_field("IsOn")
    }

    fn turn_on(&self, module: &dyn PartModule) {
        module.set_field("IsOn", FieldValue::Bool(true));
        debug!(part = module.part_name(), module = module.module_name(), "状态灯已点亮");
    }

    fn turn_off(&self, module: &dyn PartModule) {
        module.set_field("IsOn", FieldValue::Bool(false));
        debug!(part = module.part_name(), module = module.module_name(), "状态灯已熄灭");
    }
}
