//! # Stock 适配器
//!
//! 原版游戏自带的灯光模块：
//!
//! | 适配器 | 模块 | 开关方式 |
//! |---|---|---|
//! | [`Light`] | `ModuleLight` 及表面灯变体 | `LightsOn` / `LightsOff` 事件 |
//! | [`AnimateGeneric`] | `ModuleAnimateGeneric(Consumer)` | `Toggle` 事件 |
//! | [`ColorChanger`] | `ModuleColorChanger(Consumer)` | `ToggleEvent` 事件 |
//! | [`StatusLight`] | `ModuleStatusLight` | 直接写 `IsOn` 字段 |
//!
//! 动画模块与变色模块只有在界面名称里带 "light"（不区分大小写）时才算灯光。

mod animate_generic;
mod color_changer;
mod light;
mod status_light;

pub use animate_generic::AnimateGeneric;
pub use color_changer::ColorChanger;
pub use light::Light;
pub use status_light::StatusLight;

use regex::Regex;
use std::sync::LazyLock;

static LIGHT: LazyLock<Regex> = LazyLock::new(|| Regex::new("(?i)light").expect("valid regex"));

/// 界面名称是否提到 light
pub(crate) fn mentions_light(text: &str) -> bool {
    LIGHT.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mentions_light() {
        assert!(mentions_light("Toggle Lights"));
        assert!(mentions_light("SPOTLIGHT"));
        assert!(!mentions_light("Deploy"));
        assert!(!mentions_light(""));
    }
}
