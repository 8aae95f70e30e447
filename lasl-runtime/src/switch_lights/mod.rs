//! # SwitchLights 模块
//!
//! 按载具批量开关灯光。
//!
//! ## 结构
//!
//! ```text
//! Controller ── VesselFeature ── PartFeature ── Binding ── SwitchLights 适配器
//!     │                                             │
//!  GameEvents                                  ModuleCache（模块类型名 → 适配器）
//! ```
//!
//! - [`ModuleCache`]：显式注册的适配器表，注册顺序即优先级
//! - [`Controller`]：按载具缓存包装，响应载具变化/销毁通知
//! - [`VesselFeature`]：载具级批量操作、状态保存与恢复
//! - [`PartFeature`]：零件级绑定、分类与规则过滤
//!
//! 宿主对象通过 [`handle`] 中的 trait 接入；[`memory`] 提供内存实现。

mod adapter;
mod cache;
mod controller;
mod events;
pub mod handle;
pub mod memory;
mod part;
mod regime;
mod vessel;

#[cfg(test)]
mod testing;

pub use adapter::{Binding, SwitchLights};
pub use cache::{ModuleCache, ModuleCacheBuilder};
pub use controller::Controller;
pub use events::{GameEvents, Subscription, VesselEvent};
pub use handle::{FieldValue, InstanceId, Part, PartModule, Vessel};
pub use memory::{EventAction, MemoryModule, MemoryPart, MemoryVessel, ModuleSpec, PartSpec, VesselSpec};
pub use part::{KERBAL_MODULE, LANDING_GEAR_MODULE, PartFeature};
pub use regime::Regime;
pub use vessel::VesselFeature;
