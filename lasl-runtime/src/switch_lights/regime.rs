//! # Regime 模块
//!
//! 批量开关灯时使用的排除规则。

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// 排除规则
///
/// 不可变值。任意一条排除条件命中，零件就会被批量操作跳过。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Regime {
    name: Cow<'static, str>,
    #[serde(default)]
    ignore_kerbals: bool,
    #[serde(default)]
    ignore_landing_gears: bool,
    #[serde(default)]
    ignore_crewable_parts: bool,
    #[serde(default)]
    ignore_slow_lights: bool,
}

impl Regime {
    /// 不排除任何零件，未指定规则时使用
    pub const ALL_PARTS: Regime = Regime {
        name: Cow::Borrowed("All Parts"),
        ignore_kerbals: false,
        ignore_landing_gears: false,
        ignore_crewable_parts: false,
        ignore_slow_lights: false,
    };

    /// 创建不排除任何零件的规则
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            ..Self::ALL_PARTS
        }
    }

    /// 设置是否排除 Kerbal
    pub fn with_ignore_kerbals(mut self, ignore: bool) -> Self {
        self.ignore_kerbals = ignore;
        self
    }

    /// 设置是否排除起落架
    pub fn with_ignore_landing_gears(mut self, ignore: bool) -> Self {
        self.ignore_landing_gears = ignore;
        self
    }

    /// 设置是否排除可载人零件
    pub fn with_ignore_crewable_parts(mut self, ignore: bool) -> Self {
        self.ignore_crewable_parts = ignore;
        self
    }

    /// 设置是否排除慢速灯
    pub fn with_ignore_slow_lights(mut self, ignore: bool) -> Self {
        self.ignore_slow_lights = ignore;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ignore_kerbals(&self) -> bool {
        self.ignore_kerbals
    }

    pub fn ignore_landing_gears(&self) -> bool {
        self.ignore_landing_gears
    }

    pub fn ignore_crewable_parts(&self) -> bool {
        self.ignore_crewable_parts
    }

    pub fn ignore_slow_lights(&self) -> bool {
        self.ignore_slow_lights
    }
}

impl Default for Regime {
    fn default() -> Self {
        Self::ALL_PARTS
    }
}
