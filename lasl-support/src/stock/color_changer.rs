//! 变色模块（`ModuleColorChanger`）

use lasl_runtime::{PartModule, SwitchLights};
use tracing::debug;

use super::mentions_light;

/// 用自发光变色实现的灯
#[derive(Debug, Default, Clone, Copy)]
pub struct ColorChanger;

impl SwitchLights for ColorChanger {
    fn module_names(&self) -> &'static [&'static str] {
        &["ModuleColorChanger", "ModuleColorChangerConsumer"]
    }

    fn name(&self) -> &'static str {
        "Stock.ColorChanger"
    }

    fn is_active(&self, module: &dyn PartModule) -> bool {
        mentions_light(&module.text_field("toggleName"))
    }

    fn is_slow_light(&self, module: &dyn PartModule, threshold_in_secs: f32) -> bool {
        f64::from(threshold_in_secs) > module.float_field("animRate")
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
        module.bool_field("animState")
    }

    fn turn_on(&self, module: &dyn PartModule) {
        if !self.is_on(module) {
            module.fire("ToggleEvent");
        }
        debug!(part = module.part_name(), module = module.module_name(), "灯光已点亮");
    }

    fn turn_off(&self, module: &dyn PartModule) {
        if self.is_on(module) {
            module.fire("ToggleEvent");
        }
        debug!(part = module.part_name(), module = module.module_name(), "灯光已熄灭");
    }
}
