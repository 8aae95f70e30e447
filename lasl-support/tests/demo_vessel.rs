//! 内置适配器 + 演示载具的端到端测试

#![cfg(feature = "aviation-lights")]

use std::rc::Rc;

use lasl_runtime::switch_lights::{MemoryVessel, PartModule};
use lasl_runtime::{
    Controller, GameEvents, ModuleCache, Part, Regime, SwitchLightsConfig, Vessel,
};
use lasl_support::presets;

struct Fixture {
    vessel: Rc<MemoryVessel>,
    handle: Rc<dyn Vessel>,
    controller: Controller,
    _events: GameEvents,
}

fn fixture() -> Fixture {
    let vessel = MemoryVessel::build(presets::demo_vessel());
    let handle: Rc<dyn Vessel> = vessel.clone();
    let events = GameEvents::new();
    let cache = Rc::new(lasl_support::register_all(ModuleCache::builder()).build());
    let settings = Rc::new(SwitchLightsConfig {
        max_parts_to_use: 64,
        threshold_in_secs: 1.0,
    });
    Fixture {
        vessel,
        handle,
        controller: Controller::new(settings, cache, &events),
        _events: events,
    }
}

/// 按零件 ID 读取当前是否点亮
fn is_lit(f: &mut Fixture, id: i64) -> bool {
    let part = f
        .handle
        .parts()
        .into_iter()
        .find(|p| p.instance_id() == id)
        .unwrap();
    f.controller.part(&part).is_on()
}

#[test]
fn test_registry_contains_every_builtin_module() {
    let cache = lasl_support::register_all(ModuleCache::builder()).build();
    for name in [
        "ModuleLight",
        "ModuleStockLightColoredLens",
        "ModuleMultiPointSurfaceLight",
        "ModuleColoredLensLight",
        "ModuleAnimateGeneric",
        "ModuleAnimateGenericConsumer",
        "ModuleColorChanger",
        "ModuleColorChangerConsumer",
        "ModuleStatusLight",
        "ModuleNavLight",
    ] {
        assert!(cache.supports_name(name), "{name}");
    }
    assert_eq!(cache.len(), 10);
    assert!(!cache.supports_name("KerbalEVA"));
}

#[test]
fn test_all_parts_turns_every_active_light_on() {
    let mut f = fixture();
    f.controller.vessel(&f.handle).turn_on(None);

    for id in 100..=108 {
        assert!(is_lit(&mut f, id), "part {id}");
    }
    assert!(!is_lit(&mut f, 109));
    assert_eq!(f.controller.vessel(&f.handle).parts_with_light().len(), 10);
}

#[test]
fn test_regimes_filter_bulk_operations() {
    let mut f = fixture();
    let regime = Regime::new("Exterior")
        .with_ignore_crewable_parts(true)
        .with_ignore_landing_gears(true)
        .with_ignore_slow_lights(true);
    f.controller.vessel(&f.handle).turn_on(Some(&regime));

    // 载人零件（指令舱、乘员舱、Kerbal）与起落架不变
    assert!(!is_lit(&mut f, 100));
    assert!(!is_lit(&mut f, 103));
    assert!(!is_lit(&mut f, 104));
    assert!(!is_lit(&mut f, 108));
    // spotLight1 亮灭共 0.6 秒，低于阈值，属于慢速灯
    assert!(!is_lit(&mut f, 101));
    assert!(is_lit(&mut f, 102));
    // 航空灯
    assert!(is_lit(&mut f, 105));
    assert!(is_lit(&mut f, 106));
    assert!(is_lit(&mut f, 107));
}

#[test]
fn test_toggle_adapters_never_fire_redundant_events() {
    let mut f = fixture();
    for _ in 0..3 {
        f.controller.vessel(&f.handle).turn_on(None);
    }
    for _ in 0..3 {
        f.controller.vessel(&f.handle).turn_off(None);
    }

    let pod = f.vessel.part(100).unwrap();
    assert_eq!(
        pod.module("ModuleColorChanger").unwrap().fired(),
        vec!["ToggleEvent", "ToggleEvent"]
    );
    let cabin = f.vessel.part(103).unwrap();
    assert_eq!(
        cabin.module("ModuleAnimateGeneric").unwrap().fired(),
        vec!["Toggle", "Toggle"]
    );
    assert!(!is_lit(&mut f, 100));
    assert!(!is_lit(&mut f, 103));
}

#[test]
fn test_push_pop_restores_mixed_states() {
    let mut f = fixture();
    let parts = f.handle.parts();
    f.controller
        .vessel(&f.handle)
        .turn_on_parts(&[parts[1].clone(), parts[5].clone()]);

    let before: Vec<bool> = (100..=109).map(|id| is_lit(&mut f, id)).collect();
    f.controller.vessel(&f.handle).push_state();
    f.controller.vessel(&f.handle).turn_on(None);
    f.controller.vessel(&f.handle).pop_state();
    let after: Vec<bool> = (100..=109).map(|id| is_lit(&mut f, id)).collect();
    assert_eq!(before, after);

    let beacon = f.vessel.part(105).unwrap().module("ModuleNavLight").unwrap();
    assert_eq!(beacon.int_field("navLightSwitch"), 1);
}

#[test]
fn test_aviation_lights_are_classified() {
    let mut f = fixture();
    let parts = f.handle.parts();
    let beacon = f.controller.part(&parts[5]);
    assert!(beacon.is_beacon_light());
    assert!(!beacon.is_utility_light());
    let nav = f.controller.part(&parts[6]);
    assert!(nav.is_navigation_light());
    let strobe = f.controller.part(&parts[7]);
    assert!(strobe.is_strobe_light());
    let spot = f.controller.part(&parts[1]);
    assert!(spot.is_utility_light());
}

#[test]
fn test_sample_vessel_file_follows_regime() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../vessels/kerbal-x.json");
    let vessel = MemoryVessel::load(&path).unwrap();
    let handle: Rc<dyn Vessel> = vessel.clone();
    let events = GameEvents::new();
    let cache = Rc::new(lasl_support::register_all(ModuleCache::builder()).build());
    let mut controller = Controller::new(Rc::new(SwitchLightsConfig::default()), cache, &events);

    let regime = Regime::new("Docking")
        .with_ignore_crewable_parts(true)
        .with_ignore_slow_lights(true);
    controller.vessel(&handle).turn_on(Some(&regime));

    let lit: Vec<i64> = handle
        .parts()
        .into_iter()
        .filter(|p| controller.part(p).is_on())
        .map(|p| p.instance_id())
        .collect();
    assert_eq!(lit, vec![72, 73]);
    let strobe = vessel.part(73).unwrap().module("ModuleNavLight").unwrap();
    assert_eq!(strobe.int_field("navLightSwitch"), 3);
}
