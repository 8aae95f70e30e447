//! 普通灯（`ModuleLight`）

use lasl_runtime::{PartModule, SwitchLights};
use tracing::debug;

/// `ModuleLight` 以及间接继承它的表面灯模块
#[derive(Debug, Default, Clone, Copy)]
pub struct Light;

impl SwitchLights for Light {
    fn module_names(&self) -> &'static [&'static str] {
        &[
            "ModuleLight",
            // 表面灯 mod 的模块，行为与 ModuleLight 相同
            "ModuleStockLightColoredLens",
            "ModuleMultiPointSurfaceLight",
            "ModuleColoredLensLight",
        ]
    }

    fn name(&self) -> &'static str {
        "Stock.Light"
    }

    fn is_active(&self, _: &dyn PartModule) -> bool {
        true
    }

    /// 亮起与熄灭的总时长低于阈值即为慢速灯
    fn is_slow_light(&self, module: &dyn PartModule, threshold_in_secs: f32) -> bool {
        let cycle = module.float_field("lightBrightenSpeed") + module.float_field("lightDimSpeed");
        f64::from(threshold_in_secs) > cycle
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

    // LightsOn / LightsOff 本身幂等，无需先判断状态
    fn turn_on(&self, module: &dyn PartModule) {
        module.fire("LightsOn");
        debug!(part = module.part_name(), module = module.module_name(), "灯光已点亮");
    }

    fn turn_off(&self, module: &dyn PartModule) {
        module.fire("LightsOff");
        debug!(part = module.part_name(), module = module.module_name(), "灯光已熄灭");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets;
    use lasl_runtime::switch_lights::{MemoryPart, PartSpec};

    #[test]
    fn test_light_switching() {
        let part = MemoryPart::loose(PartSpec::new(1, "spotLight1").with_module(presets::light(false, 0.3, 0.3)));
        let module = part.module("ModuleLight").unwrap();

        assert!(Light.is_active(&**module));
        assert!(!Light.is_on(&**module));
        Light.turn_on(&**module);
        assert!(Light.is_on(&**module));
        Light.turn_on(&**module);
        assert!(Light.is_on(&**module));
        Light.turn_off(&**module);
        assert!(!Light.is_on(&**module));
    }

    #[test]
    fn test_slow_light_threshold() {
        let part = MemoryPart::loose(PartSpec::new(1, "lamp").with_module(presets::light(false, 0.3, 0.3)));
        let module = part.module("ModuleLight").unwrap();

        assert!(Light.is_slow_light(&**module, 1.0));
        assert!(!Light.is_slow_light(&**module, 0.5));
        assert!(Light.is_utility_light(&**module));
        assert!(!Light.is_beacon_light(&**module));
    }
}
