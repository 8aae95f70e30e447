//! # Presets 模块
//!
//! 各类灯光模块的内存描述，字段与事件与真实模块一致。
//! 用于无头模拟和测试。

use lasl_runtime::FieldValue;
use lasl_runtime::switch_lights::{EventAction, ModuleSpec, PartSpec, VesselSpec};

fn set(field: &str, value: impl Into<FieldValue>) -> EventAction {
    EventAction::Set {
        field: field.to_string(),
        value: value.into(),
    }
}

fn toggle(field: &str) -> EventAction {
    EventAction::Toggle {
        field: field.to_string(),
    }
}

/// `ModuleLight`
pub fn light(on: bool, brighten_speed: f64, dim_speed: f64) -> ModuleSpec {
    ModuleSpec::new("ModuleLight")
        .with_field("isOn", on)
        .with_field("lightBrightenSpeed", brighten_speed)
        .with_field("lightDimSpeed", dim_speed)
        .on_event("LightsOn", set("isOn", true))
        .on_event("LightsOff", set("isOn", false))
}

/// `ModuleAnimateGeneric`，`gui_name` 同时用作动作名与事件名
pub fn animate_generic(gui_name: &str, on: bool, anim_speed: f64) -> ModuleSpec {
    ModuleSpec::new("ModuleAnimateGeneric")
        .with_field("actionGUIName", gui_name)
        .with_field("startEventGUIName", gui_name)
        .with_field("animSwitch", !on)
        .with_field("animSpeed", anim_speed)
        .on_event("Toggle", toggle("animSwitch"))
}

/// `ModuleColorChanger`
pub fn color_changer(toggle_name: &str, on: bool, anim_rate: f64) -> ModuleSpec {
    ModuleSpec::new("ModuleColorChanger")
        .with_field("toggleName", toggle_name)
        .with_field("animState", on)
        .with_field("animRate", anim_rate)
        .on_event("ToggleEvent", toggle("animState"))
}

/// `ModuleStatusLight`
pub fn status_light(on: bool) -> ModuleSpec {
    ModuleSpec::new("ModuleStatusLight").with_field("IsOn", on)
}

/// `ModuleNavLight`，`mode` 为点亮时使用的闪烁模式
pub fn nav_light(type_preset: &str, mode: i64, on: bool) -> ModuleSpec {
    ModuleSpec::new("ModuleNavLight")
        .with_field("typePreset", type_preset)
        .with_field("toggleModeSelector", mode)
        .with_field("navLightSwitch", if on { mode } else { 0 })
}

/// 演示用载具：指令舱、照明灯、舱内灯、起落架、航空灯和一个 EVA 中的 Kerbal
pub fn demo_vessel() -> VesselSpec {
    VesselSpec::new(1, "Demo")
        .with_part(
            PartSpec::new(100, "mk1-3pod")
                .with_crew_capacity(3)
                .with_module(ModuleSpec::new("ModuleCommand"))
                .with_module(color_changer("Toggle Cabin Light", false, 1.0)),
        )
        .with_part(PartSpec::new(101, "spotLight1").with_module(light(false, 0.3, 0.3)))
        .with_part(PartSpec::new(102, "spotLight2").with_module(light(false, 2.0, 2.0)))
        .with_part(
            PartSpec::new(103, "crewCabin")
                .with_crew_capacity(4)
                .with_module(animate_generic("Toggle Lights", false, 1.5)),
        )
        .with_part(
            PartSpec::new(104, "SmallGearBay")
                .with_module(ModuleSpec::new("ModuleWheelDeployment"))
                .with_module(status_light(false)),
        )
        .with_part(PartSpec::new(105, "lightbeacon_amber").with_module(nav_light("", 1, false)))
        .with_part(PartSpec::new(106, "lightnav_red").with_module(nav_light("", 1, false)))
        .with_part(PartSpec::new(107, "lightstrobe_white").with_module(nav_light("", 3, false)))
        .with_part(
            PartSpec::new(108, "kerbalEVA")
                .with_crew_capacity(1)
                .with_module(ModuleSpec::new("KerbalEVA"))
                .with_module(light(false, 0.3, 0.3)),
        )
        .with_part(PartSpec::new(109, "fuelTank").with_module(ModuleSpec::new("ModuleFuelTank")))
}
