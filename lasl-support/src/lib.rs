//! # LASL Support
//!
//! SwitchLights 的内置适配器。
//!
//! ## 注册顺序
//!
//! [`register_all`] 先注册原版模块，最后注册 Aviation Lights。
//! 注册表中后注册的适配器优先，因此第三方模块的适配器
//! 可以覆盖同名的原版声明。
//!
//! ```ignore
//! let cache = lasl_support::register_all(ModuleCache::builder()).build();
//! ```
//!
//! ## Feature
//!
//! - `aviation-lights`（默认开启）：`ModuleNavLight` 适配器

#[cfg(feature = "aviation-lights")]
pub mod aviation;
pub mod presets;
pub mod stock;

use lasl_runtime::ModuleCacheBuilder;

#[cfg(feature = "aviation-lights")]
pub use aviation::AviationLights;
pub use stock::{AnimateGeneric, ColorChanger, Light, StatusLight};

/// 注册原版灯光适配器
pub fn register_stock(builder: ModuleCacheBuilder) -> ModuleCacheBuilder {
    builder
        .register(Light)
        .register(AnimateGeneric)
        .register(ColorChanger)
        .register(StatusLight)
}

/// 注册全部内置适配器
pub fn register_all(builder: ModuleCacheBuilder) -> ModuleCacheBuilder {
    let builder = register_stock(builder);

    #[cfg(feature = "aviation-lights")]
    let builder = {
        tracing::info!("启用 Aviation Lights 支持");
        builder.register(AviationLights)
    };

    builder
}
