//! 灯光调度的端到端测试：JSON 载具 + 自定义适配器

use std::rc::Rc;

use lasl_runtime::switch_lights::{KERBAL_MODULE, MemoryVessel};
use lasl_runtime::{
    Controller, GameEvents, ModuleCache, PartModule, Regime, SwitchLights, SwitchLightsConfig,
    Vessel,
};

/// 以 `lit` 字段表示开关、`Lit` / `Unlit` 事件切换的灯
struct Lantern;

impl SwitchLights for Lantern {
    fn module_names(&self) -> &'static [&'static str] {
        &["ModuleLantern"]
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
        true
    }
    fn is_on(&self, module: &dyn PartModule) -> bool {
        module.bool_field("lit")
    }
    fn turn_on(&self, module: &dyn PartModule) {
        if !self.is_on(module) {
            module.fire("Lit");
        }
    }
    fn turn_off(&self, module: &dyn PartModule) {
        if self.is_on(module) {
            module.fire("Unlit");
        }
    }
}

fn lantern_part(id: i64, lit: bool, extra: &str) -> String {
    format!(
        r#"{{ "id": {id}, "name": "lantern{id}", "modules": [
            {extra}
            {{ "name": "ModuleLantern", "fields": {{ "lit": {lit} }},
               "events": {{
                 "Lit":   [{{ "action": "set", "field": "lit", "value": true }}],
                 "Unlit": [{{ "action": "set", "field": "lit", "value": false }}]
               }} }}
        ] }}"#
    )
}

fn vessel_json(id: i64, parts: &[String]) -> String {
    format!(r#"{{ "id": {id}, "name": "Vessel{id}", "parts": [{}] }}"#, parts.join(","))
}

fn lit(vessel: &MemoryVessel) -> Vec<bool> {
    vessel
        .memory_parts()
        .iter()
        .map(|p| {
            p.module("ModuleLantern")
                .map(|m| m.bool_field("lit"))
                .unwrap_or(false)
        })
        .collect()
}

fn controller(max_parts_to_use: usize, events: &GameEvents) -> Controller {
    let settings = Rc::new(SwitchLightsConfig {
        max_parts_to_use,
        threshold_in_secs: 1.0,
    });
    let cache = Rc::new(ModuleCache::builder().register(Lantern).build());
    Controller::new(settings, cache, events)
}

#[test]
fn test_population_is_bounded() {
    let max = 5;
    let parts: Vec<String> = (1..=max as i64 + 3)
        .map(|id| lantern_part(id, false, ""))
        .collect();
    let vessel = MemoryVessel::from_json(&vessel_json(1, &parts)).unwrap();
    let handle: Rc<dyn Vessel> = vessel.clone();

    let events = GameEvents::new();
    let mut controller = controller(max, &events);

    let feature = controller.vessel(&handle);
    feature.turn_on(None);
    assert_eq!(feature.len(), max);
    assert_eq!(feature.parts_with_light().len(), max);
    assert_eq!(
        lit(&vessel),
        vec![true, true, true, true, true, false, false, false]
    );
}

#[test]
fn test_push_pop_round_trip() {
    let parts = vec![
        lantern_part(1, true, ""),
        lantern_part(2, false, ""),
        lantern_part(3, true, ""),
        lantern_part(4, false, ""),
    ];
    let vessel = MemoryVessel::from_json(&vessel_json(1, &parts)).unwrap();
    let handle: Rc<dyn Vessel> = vessel.clone();
    let events = GameEvents::new();
    let mut controller = controller(16, &events);

    let before = lit(&vessel);
    controller.vessel(&handle).push_state();
    controller.vessel(&handle).pop_state();
    assert_eq!(lit(&vessel), before);

    controller.vessel(&handle).push_state();
    controller.vessel(&handle).turn_on(None);
    assert_eq!(lit(&vessel), vec![true; 4]);
    controller.vessel(&handle).pop_state();
    assert_eq!(lit(&vessel), before);
}

#[test]
fn test_kerbal_regime() {
    let kerbal = format!(r#"{{ "name": "{KERBAL_MODULE}" }},"#);
    let parts = vec![lantern_part(1, true, &kerbal), lantern_part(2, true, "")];
    let vessel = MemoryVessel::from_json(&vessel_json(1, &parts)).unwrap();
    let handle: Rc<dyn Vessel> = vessel.clone();
    let events = GameEvents::new();
    let mut controller = controller(16, &events);

    let eva = Regime::new("EVA").with_ignore_kerbals(true);
    controller.vessel(&handle).turn_off(Some(&eva));
    assert_eq!(lit(&vessel), vec![true, false]);

    controller.vessel(&handle).turn_off(Some(Controller::all_parts()));
    assert_eq!(lit(&vessel), vec![false, false]);
}

#[test]
fn test_vessel_destroy_gives_fresh_wrapper() {
    let vessel = MemoryVessel::from_json(&vessel_json(9, &[lantern_part(1, false, "")])).unwrap();
    let handle: Rc<dyn Vessel> = vessel.clone();
    let events = GameEvents::new();
    let mut controller = controller(16, &events);

    controller.vessel(&handle).turn_on(None);
    assert!(!controller.vessel(&handle).needs_initialization());

    events.on_vessel_destroy(9);
    assert!(!controller.is_cached(9));
    assert!(controller.vessel(&handle).needs_initialization());

    drop(controller);
    assert_eq!(events.subscriber_count(), 0);
}

#[test]
fn test_regime_round_trips_through_json() {
    let regime: Regime =
        serde_json::from_str(r#"{ "name": "Night", "ignore_slow_lights": true }"#).unwrap();
    assert_eq!(regime.name(), "Night");
    assert!(regime.ignore_slow_lights());
    assert!(!regime.ignore_kerbals());
}
