//! # Aviation Lights 适配器
//!
//! 第三方 Aviation Lights mod 的 `ModuleNavLight`。
//!
//! `navLightSwitch` 为 0 表示熄灭，非 0 为当前闪烁模式；
//! 点亮时恢复为 `toggleModeSelector` 中选定的模式。
//! 类别由零件名前缀或模块的 `typePreset` 决定。

use lasl_runtime::{FieldValue, PartModule, SwitchLights};
use tracing::debug;

/// `ModuleNavLight` 适配器
#[derive(Debug, Default, Clone, Copy)]
pub struct AviationLights;

impl AviationLights {
    fn is_kind(module: &dyn PartModule, part_prefix: &str, preset: &str) -> bool {
        module.part_name().starts_with(part_prefix) || module.text_field("typePreset") == preset
    }
}

impl SwitchLights for AviationLights {
    fn module_names(&self) -> &'static [&'static str] {
        &["ModuleNavLight"]
    }

    fn name(&self) -> &'static str {
        "AviationLights"
    }

    fn is_active(&self, _: &dyn PartModule) -> bool {
        true
    }

    fn is_slow_light(&self, _: &dyn PartModule, _: f32) -> bool {
        false
    }

    fn is_beacon_light(&self, module: &dyn PartModule) -> bool {
        Self::is_kind(module, "lightbeacon_", "beacon")
    }

    fn is_navigation_light(&self, module: &dyn PartModule) -> bool {
        Self::is_kind(module, "lightnav_", "nav")
    }

    fn is_strobe_light(&self, module: &dyn PartModule) -> bool {
        Self::is_kind(module, "lightstrobe_", "strobe")
    }

    fn is_utility_light(&self, _: &dyn PartModule) -> bool {
        false
    }

    fn is_on(&self, module: &dyn PartModule) -> bool {
        module.int_field("navLightSwitch") != 0
    }

    fn turn_on(&self, module: &dyn PartModule) {
        let mode = module.int_field("toggleModeSelector");
        module.set_field("navLightSwitch", FieldValue::Int(mode));
        debug!(part = module.part_name(), mode = mode, "航空灯已点亮");
    }

    fn turn_off(&self, module: &dyn PartModule) {
        module.set_field("navLightSwitch", FieldValue::Int(0));
        debug!(part = module.part_name(), "航空灯已熄灭");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets;
    use lasl_runtime::switch_lights::{MemoryPart, PartSpec};

    fn nav_part(part_name: &str, preset: &str) -> std::rc::Rc<MemoryPart> {
        MemoryPart::loose(PartSpec::new(1, part_name).with_module(presets::nav_light(preset, 2, false)))
    }

    #[test]
    fn test_classification_by_part_name() {
        let beacon = nav_part("lightbeacon_amber", "");
        let module = beacon.module("ModuleNavLight").unwrap();
        assert!(AviationLights.is_beacon_light(&**module));
        assert!(!AviationLights.is_navigation_light(&**module));
        assert!(!AviationLights.is_strobe_light(&**module));

        let strobe = nav_part("lightstrobe_white", "");
        let module = strobe.module("ModuleNavLight").unwrap();
        assert!(AviationLights.is_strobe_light(&**module));
    }

    #[test]
    fn test_classification_by_preset() {
        let part = nav_part("customLight", "nav");
        let module = part.module("ModuleNavLight").unwrap();
        assert!(AviationLights.is_navigation_light(&**module));
        assert!(!AviationLights.is_beacon_light(&**module));
        assert!(!AviationLights.is_utility_light(&**module));
    }

    #[test]
    fn test_on_restores_selected_mode() {
        let part = nav_part("lightnav_red", "");
        let module = part.module("ModuleNavLight").unwrap();

        assert!(!AviationLights.is_on(&**module));
        AviationLights.turn_on(&**module);
        assert!(AviationLights.is_on(&**module));
        assert_eq!(module.int_field("navLightSwitch"), 2);

        AviationLights.turn_off(&**module);
        assert!(!AviationLights.is_on(&**module));
        assert_eq!(module.int_field("navLightSwitch"), 0);
    }
}
