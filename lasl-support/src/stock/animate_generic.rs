//! 通用动画模块（`ModuleAnimateGeneric`）

use lasl_runtime::{PartModule, SwitchLights};
use tracing::debug;

use super::mentions_light;

/// 用动画开关的灯
///
/// `animSwitch` 为 false 表示动画处于"展开"一侧，即灯亮。
#[derive(Debug, Default, Clone, Copy)]
pub struct AnimateGeneric;

impl SwitchLights for AnimateGeneric {
    fn module_names(&self) -> &'static [&'static str] {
        &["ModuleAnimateGeneric", "ModuleAnimateGenericConsumer"]
    }

    fn name(&self) -> &'static str {
        "Stock.AnimateGeneric"
    }

    fn is_active(&self, module: &dyn PartModule) -> bool {
        mentions_light(&module.text_field("actionGUIName"))
            || mentions_light(&module.text_field("startEventGUIName"))
    }

    fn is_slow_light(&self, module: &dyn PartModule, threshold_in_secs: f32) -> bool {
        f64::from(threshold_in_secs) > module.float_field("animSpeed")
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
        !module.bool_field("animSwitch")
    }

    fn turn_on(&self, module: &dyn PartModule) {
        if !self.is_on(module) {
            module.fire("Toggle");
        }
        debug!(part = module.part_name(), module = module.module_name(), "灯光已点亮");
    }

    fn turn_off(&self, module: &dyn PartModule) {
        if self.is_on(module) {
            module.fire("Toggle");
        }
        debug!(part = module.part_name(), module = module.module_name(), "灯光已熄灭");
    }
}
