//! `lasl lights` 子命令
//!
//! 载具从 JSON 描述加载（`--vessel`），未指定时使用内置的演示载具。
//! 操作完成后可以用 `--save` 把零件的当前字段写回 JSON。

use anyhow::Context;
use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::info;

use lasl_runtime::switch_lights::MemoryVessel;
use lasl_runtime::{
    Controller, GameEvents, InstanceId, ModuleCache, Part, PartFeature, Regime,
    SwitchLightsConfig, Vessel,
};

#[derive(Subcommand)]
pub enum LightsCommand {
    /// 列出零件及其灯光分类
    List {
        #[command(flatten)]
        vessel: VesselArgs,
    },

    /// 点亮灯光
    On {
        #[command(flatten)]
        vessel: VesselArgs,
        #[command(flatten)]
        target: TargetArgs,
    },

    /// 熄灭灯光
    Off {
        #[command(flatten)]
        vessel: VesselArgs,
        #[command(flatten)]
        target: TargetArgs,
    },

    /// 保存状态、全部点亮、再恢复，并显示每一步的状态
    PushPop {
        #[command(flatten)]
        vessel: VesselArgs,
    },
}

#[derive(Args)]
pub struct VesselArgs {
    /// 载具描述 JSON（默认：内置演示载具）
    #[arg(long)]
    vessel: Option<PathBuf>,

    /// 操作后把载具写回此文件
    #[arg(long)]
    save: Option<PathBuf>,
}

#[derive(Args)]
pub struct TargetArgs {
    /// 只操作这些零件（实例 ID），忽略所有排除规则
    #[arg(long, value_delimiter = ',')]
    parts: Vec<InstanceId>,

    /// 跳过 EVA 中的 Kerbal
    #[arg(long)]
    ignore_kerbals: bool,

    /// 跳过起落架
    #[arg(long)]
    ignore_landing_gears: bool,

    /// 跳过载人零件
    #[arg(long)]
    ignore_crewable: bool,

    /// 跳过慢速灯
    #[arg(long)]
    ignore_slow: bool,
}

impl TargetArgs {
    fn regime(&self) -> Regime {
        Regime::new("Command Line")
            .with_ignore_kerbals(self.ignore_kerbals)
            .with_ignore_landing_gears(self.ignore_landing_gears)
            .with_ignore_crewable_parts(self.ignore_crewable)
            .with_ignore_slow_lights(self.ignore_slow)
    }
}

/// 一次命令所需的宿主环境
struct Session {
    vessel: Rc<MemoryVessel>,
    handle: Rc<dyn Vessel>,
    controller: Controller,
    _events: GameEvents,
}

impl Session {
    fn open(args: &VesselArgs, settings: &SwitchLightsConfig) -> anyhow::Result<Self> {
        let vessel = match &args.vessel {
            Some(path) => MemoryVessel::load(path)
                .with_context(|| format!("无法加载载具: {}", path.display()))?,
            None => MemoryVessel::build(lasl_support::presets::demo_vessel()),
        };
        let handle: Rc<dyn Vessel> = vessel.clone();
        let cache = Rc::new(lasl_support::register_all(ModuleCache::builder()).build());
        let events = GameEvents::new();
        let controller = Controller::new(Rc::new(settings.clone()), cache, &events);
        info!(vessel = %handle.name(), parts = handle.parts().len(), "载具已就绪");
        Ok(Self {
            vessel,
            handle,
            controller,
            _events: events,
        })
    }

    fn parts(&self, ids: &[InstanceId]) -> anyhow::Result<Vec<Rc<dyn Part>>> {
        let parts = self.handle.parts();
        ids.iter()
            .map(|id| {
                parts
                    .iter()
                    .find(|p| p.instance_id() == *id)
                    .cloned()
                    .with_context(|| format!("载具上没有零件 {id}"))
            })
            .collect()
    }

    fn print_states(&mut self, title: &str) {
        println!("{title}");
        for part in self.handle.parts() {
            let feature = self.controller.part(&part);
            println!("  {:<6} {:<20} {}", part.instance_id(), part.name(), lamp(feature));
        }
    }

    fn save(&self, path: Option<&Path>) -> anyhow::Result<()> {
        let Some(path) = path else {
            return Ok(());
        };
        let json = serde_json::to_string_pretty(&self.vessel.to_spec())?;
        std::fs::write(path, json).with_context(|| format!("无法写入: {}", path.display()))?;
        info!(path = %path.display(), "载具已保存");
        Ok(())
    }
}

fn lamp(feature: &PartFeature) -> &'static str {
    if !feature.binding().is_bound() {
        "-"
    } else if feature.is_on() {
        "on"
    } else {
        "off"
    }
}

fn classes(feature: &PartFeature) -> String {
    if !feature.binding().is_bound() {
        return String::new();
    }
    let flags = [
        (feature.is_beacon_light(), "beacon"),
        (feature.is_navigation_light(), "nav"),
        (feature.is_strobe_light(), "strobe"),
        (feature.is_utility_light(), "utility"),
        (feature.is_slow_light(), "slow"),
        (feature.is_kerbal(), "kerbal"),
        (feature.is_landing_gear(), "gear"),
        (feature.is_crewable(), "crew"),
    ];
    flags
        .iter()
        .filter(|(set, _)| *set)
        .map(|(_, name)| *name)
        .collect::<Vec<_>>()
        .join(",")
}

pub fn run(command: LightsCommand, settings: &SwitchLightsConfig) -> anyhow::Result<()> {
    match command {
        LightsCommand::List { vessel } => {
            let mut session = Session::open(&vessel, settings)?;
            println!(
                "{:<6} {:<20} {:<28} {:<6} {:<6} {}",
                "id", "part", "module", "active", "state", "classes"
            );
            for part in session.handle.parts() {
                let feature = session.controller.part(&part);
                println!(
                    "{:<6} {:<20} {:<28} {:<6} {:<6} {}",
                    part.instance_id(),
                    part.name(),
                    feature.binding().module_name().unwrap_or("-"),
                    feature.is_active(),
                    lamp(feature),
                    classes(feature)
                );
            }
            session.save(vessel.save.as_deref())
        }
        LightsCommand::On { vessel, target } => switch(&vessel, &target, settings, true),
        LightsCommand::Off { vessel, target } => switch(&vessel, &target, settings, false),
        LightsCommand::PushPop { vessel } => {
            let mut session = Session::open(&vessel, settings)?;
            session.print_states("before:");

            session.controller.vessel(&session.handle).push_state();
            session.controller.vessel(&session.handle).turn_on(None);
            session.print_states("all on:");

            session.controller.vessel(&session.handle).pop_state();
            session.print_states("restored:");
            session.save(vessel.save.as_deref())
        }
    }
}

fn switch(
    args: &VesselArgs,
    target: &TargetArgs,
    settings: &SwitchLightsConfig,
    on: bool,
) -> anyhow::Result<()> {
    let mut session = Session::open(args, settings)?;

    if target.parts.is_empty() {
        let regime = target.regime();
        let feature = session.controller.vessel(&session.handle);
        if on {
            feature.turn_on(Some(&regime));
        } else {
            feature.turn_off(Some(&regime));
        }
    } else {
        let parts = session.parts(&target.parts)?;
        let feature = session.controller.vessel(&session.handle);
        if on {
            feature.turn_on_parts(&parts);
        } else {
            feature.turn_off_parts(&parts);
        }
    }

    session.print_states(if on { "turned on:" } else { "turned off:" });
    session.save(args.save.as_deref())
}
