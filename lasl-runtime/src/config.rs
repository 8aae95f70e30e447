//! # Config 模块
//!
//! 运行时配置，集中管理 SwitchLights 与 Morse 的可调参数。
//!
//! ## 配置来源
//!
//! 1. 配置文件（JSON，缺省字段使用默认值）
//! 2. 默认值
//!
//! 宿主也可以直接实现 [`Settings`]，让灯光调度读取游戏内的实时设置。

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

use crate::error::ConfigError;
use crate::morse::table;

/// SwitchLights 设置
///
/// 由持有它的 `Controller` / `VesselFeature` 共享，随最后一个持有者释放。
pub trait Settings {
    /// 每艘载具最多纳入管理的零件数
    fn max_parts_to_use(&self) -> usize;

    /// 慢速灯判定阈值（秒）
    fn threshold_in_secs(&self) -> f32;
}

/// 完整配置文件
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LaslConfig {
    /// 灯光调度配置
    #[serde(default)]
    pub switch_lights: SwitchLightsConfig,

    /// Morse 配置
    #[serde(default)]
    pub morse: MorseConfig,
}

/// 灯光调度配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchLightsConfig {
    /// 每艘载具最多纳入管理的零件数
    #[serde(default = "default_max_parts_to_use")]
    pub max_parts_to_use: usize,

    /// 慢速灯判定阈值（秒）
    #[serde(default = "default_threshold_in_secs")]
    pub threshold_in_secs: f32,
}

/// Morse 配置
///
/// 时长单位均为秒。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MorseConfig {
    /// 点（dit）时长
    #[serde(default = "default_dit_duration")]
    pub dit_duration: f32,

    /// 划（dah）时长
    #[serde(default = "default_dah_duration")]
    pub dah_duration: f32,

    /// 字母间隔在信号串中的字符
    #[serde(default = "default_letter_space_char")]
    pub letter_space_char: char,

    /// 字母间隔时长
    #[serde(default = "default_letter_space_duration")]
    pub letter_space_duration: f32,

    /// 单词间隔在信号串中的字符
    #[serde(default = "default_word_space_char")]
    pub word_space_char: char,

    /// 单词间隔时长
    #[serde(default = "default_word_space_duration")]
    pub word_space_duration: f32,

    /// 结束符（symbol-space）时长
    #[serde(default = "default_symbol_space_duration")]
    pub symbol_space_duration: f32,
}

impl Default for SwitchLightsConfig {
    fn default() -> Self {
        Self {
            max_parts_to_use: default_max_parts_to_use(),
            threshold_in_secs: default_threshold_in_secs(),
        }
    }
}

impl Default for MorseConfig {
    fn default() -> Self {
        Self {
            dit_duration: default_dit_duration(),
            dah_duration: default_dah_duration(),
            letter_space_char: default_letter_space_char(),
            letter_space_duration: default_letter_space_duration(),
            word_space_char: default_word_space_char(),
            word_space_duration: default_word_space_duration(),
            symbol_space_duration: default_symbol_space_duration(),
        }
    }
}

// 默认值函数
fn default_max_parts_to_use() -> usize {
    128
}

fn default_threshold_in_secs() -> f32 {
    1.0
}

fn default_dit_duration() -> f32 {
    0.2
}

fn default_dah_duration() -> f32 {
    0.6
}

fn default_letter_space_char() -> char {
    ' '
}

fn default_letter_space_duration() -> f32 {
    0.6
}

fn default_word_space_char() -> char {
    '|'
}

fn default_word_space_duration() -> f32 {
    1.4
}

fn default_symbol_space_duration() -> f32 {
    2.0
}

impl Settings for SwitchLightsConfig {
    fn max_parts_to_use(&self) -> usize {
        self.max_parts_to_use
    }

    fn threshold_in_secs(&self) -> f32 {
        self.threshold_in_secs
    }
}

impl SwitchLightsConfig {
    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_parts_to_use == 0 {
            return Err(ConfigError::ValidationFailed(
                "max_parts_to_use 必须大于 0".to_string(),
            ));
        }
        if !self.threshold_in_secs.is_finite() || self.threshold_in_secs < 0.0 {
            return Err(ConfigError::ValidationFailed(format!(
                "threshold_in_secs 必须是非负数: {}",
                self.threshold_in_secs
            )));
        }
        Ok(())
    }
}

/// 单个 Morse 时长的上限（秒）
pub const MAX_DURATION_SECS: f32 = 3600.0;

impl MorseConfig {
    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        let durations = [
            ("dit_duration", self.dit_duration),
            ("dah_duration", self.dah_duration),
            ("letter_space_duration", self.letter_space_duration),
            ("word_space_duration", self.word_space_duration),
            ("symbol_space_duration", self.symbol_space_duration),
        ];
        for (name, value) in durations {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::ValidationFailed(format!(
                    "{name} 必须是非负数: {value}"
                )));
            }
            if value > MAX_DURATION_SECS {
                return Err(ConfigError::ValidationFailed(format!(
                    "{name} 不能超过 {MAX_DURATION_SECS} 秒: {value}"
                )));
            }
        }

        for (name, c) in [
            ("letter_space_char", self.letter_space_char),
            ("word_space_char", self.word_space_char),
        ] {
            if matches!(c, '.' | '-' | '_') {
                return Err(ConfigError::ValidationFailed(format!(
                    "{name} 不能与点划字符冲突: '{c}'"
                )));
            }
            // 可编码字符与简码括号必须留给文本
            if matches!(c, '<' | '>') || table::render(c).is_some() {
                return Err(ConfigError::ValidationFailed(format!(
                    "{name} 不能是可编码字符或简码括号: '{c}'"
                )));
            }
        }
        if self.letter_space_char == self.word_space_char {
            return Err(ConfigError::ValidationFailed(
                "letter_space_char 与 word_space_char 不能相同".to_string(),
            ));
        }
        Ok(())
    }

    /// 点时长
    pub fn dit(&self) -> Duration {
        secs(self.dit_duration)
    }

    /// 划时长
    pub fn dah(&self) -> Duration {
        secs(self.dah_duration)
    }

    /// 字母间隔时长
    pub fn letter_space(&self) -> Duration {
        secs(self.letter_space_duration)
    }

    /// 单词间隔时长
    pub fn word_space(&self) -> Duration {
        secs(self.word_space_duration)
    }

    /// 结束符时长
    pub fn symbol_space(&self) -> Duration {
        secs(self.symbol_space_duration)
    }
}

/// 非法时长按 0 处理
fn secs(value: f32) -> Duration {
    Duration::try_from_secs_f32(value).unwrap_or_default()
}

impl LaslConfig {
    /// 从 JSON 文件加载配置
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: LaslConfig = serde_json::from_str(&content)?;
        config.validate()?;
        info!(path = %path.display(), "配置文件加载成功");
        Ok(config)
    }

    /// 加载配置，失败时回退到默认配置
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            warn!(path = %path.display(), "配置文件不存在，使用默认配置");
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "配置文件加载失败，使用默认配置");
                Self::default()
            }
        }
    }

    /// 保存配置到文件
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.switch_lights.validate()?;
        self.morse.validate()
    }
}
