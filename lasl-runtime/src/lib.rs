//! # LASL Runtime
//!
//! 载具灯光批量控制与 Morse 码信号的核心库。
//!
//! ## 架构概述
//!
//! `lasl-runtime` 是纯逻辑核心，不依赖任何游戏引擎。
//! 宿主通过 [`switch_lights::handle`] 中的 trait 暴露零件、模块与载具，
//! 并把具体灯光模块的适配器注册进 [`ModuleCache`]：
//!
//! ```text
//! Host                                   Runtime
//!   │                                       │
//!   │── register(adapter) ───────────────►│ ModuleCache
//!   │── controller.vessel(v).turn_on(..) ─►│ VesselFeature → PartFeature → Binding
//!   │◄── fire("LightsOn") / set_field(..) ──│
//!   │── events.on_vessel_destroy(id) ────►│ 丢弃缓存
//!   │                                       │
//!   │── morse.encode_from_text(..) ───────►│ Program
//!   │── player.drive(now, keyer) ─────────►│
//!   │◄── rising_edge / falling_edge ────────│
//! ```
//!
//! ## 使用示例
//!
//! ```ignore
//! use lasl_runtime::{Controller, GameEvents, ModuleCache, Regime};
//!
//! let cache = Rc::new(ModuleCache::builder().register(MyLight).build());
//! let events = GameEvents::new();
//! let mut controller = Controller::new(settings, cache, &events);
//!
//! let crew = Regime::new("Crew").with_ignore_crewable_parts(true);
//! controller.vessel(&vessel).turn_off(Some(&crew));
//! ```
//!
//! ## 模块结构
//!
//! - [`config`]：配置与 [`Settings`]
//! - [`error`]：错误类型定义
//! - [`switch_lights`]：灯光调度
//! - [`morse`]：Morse 编码与播放

pub mod config;
pub mod error;
pub mod morse;
pub mod switch_lights;

// 重导出核心类型
pub use config::{LaslConfig, MorseConfig, Settings, SwitchLightsConfig};
pub use error::{ConfigError, LaslError, LaslResult};
pub use morse::{Edge, Keyer, Morse, Player, Program, Signal, Step, Symbols};
pub use switch_lights::{
    Binding, Controller, FieldValue, GameEvents, InstanceId, ModuleCache, ModuleCacheBuilder,
    Part, PartFeature, PartModule, Regime, Subscription, SwitchLights, Vessel, VesselEvent,
    VesselFeature,
};
