//! # Engine 模块
//!
//! 文本 → 信号串 → 信号序列。
//!
//! ## 信号串
//!
//! 编码的中间形式是一个可读的字符串：`.` 为点，`-`（或 `_`）为划，
//! 字母间隔与单词间隔各用一个可配置的字符表示（默认 `' '` 与 `'|'`）。
//! 例如 `"SOS"` 编码为 `"... --- ... "`。
//!
//! ## 文本扫描
//!
//! 扫描器只有两个状态：
//! - **普通**：空格输出单词间隔（紧跟在单词间隔之后时省略）；
//!   表内字符输出点划表示加字母间隔；`<` 进入括号状态；其他字符丢弃
//! - **括号**：累积简码直到 `>`，再按 Q 简语 → 程序信号 → 缩写的顺序查找。
//!   命中时整体输出并用单词间隔包围；未命中则丢弃。
//!   括号内的空格忽略，再次遇到 `<` 时重新开始累积
//!
//! 未闭合的括号在文本结束时丢弃，括号外的 `>` 也丢弃。

use serde::Serialize;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::debug;

use regex::Regex;

use super::player::Player;
use super::symbols::Symbols;
use super::table;
use crate::config::MorseConfig;

/// 规范化时保留的字符：基础表字符、空格和尖括号
static UNSUPPORTED: LazyLock<Regex> = LazyLock::new(|| {
    let class: String = table::TABLE
        .iter()
        .map(|(c, _)| regex::escape(&c.to_string()))
        .collect();
    Regex::new(&format!("[^{class} <>]")).expect("valid character class")
});

/// 信号
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Signal {
    /// 点
    Dit,
    /// 划
    Dah,
    /// 字母间隔
    LetterSpace,
    /// 单词间隔
    WordSpace,
    /// 结束间隔
    SymbolSpace,
}

impl Signal {
    /// 按键是否按下
    pub fn is_mark(self) -> bool {
        matches!(self, Self::Dit | Self::Dah)
    }
}

/// 编译后的信号序列
///
/// 总以恰好一个 [`Signal::SymbolSpace`] 结尾。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Program {
    signals: Vec<Signal>,
    text: String,
    source: String,
}

impl Program {
    /// 信号序列
    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }

    /// 规范化后的原文（直接从信号串编译时为空）
    pub fn text(&self) -> &str {
        &self.text
    }

    /// 编译所用的信号串
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    /// 恒为 false：至少有结尾的 SymbolSpace
    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    /// 按配置播放所需的总时长，溢出时取 [`Duration::MAX`]
    pub fn duration(&self, config: &MorseConfig) -> Duration {
        self.signals
            .iter()
            .map(|signal| match signal {
                Signal::Dit => config.dit().saturating_add(config.dit()),
                Signal::Dah => config.dah().saturating_add(config.dit()),
                Signal::LetterSpace => config.letter_space(),
                Signal::WordSpace => config.word_space(),
                Signal::SymbolSpace => config.symbol_space(),
            })
            .fold(Duration::ZERO, Duration::saturating_add)
    }
}

/// Morse 编码引擎
#[derive(Debug, Clone)]
pub struct Morse {
    config: MorseConfig,
    symbols: Symbols,
}

impl Morse {
    /// 创建引擎并注册标准简码表
    pub fn new(config: MorseConfig) -> Self {
        Self {
            config,
            symbols: Symbols::standard(),
        }
    }

    pub fn config(&self) -> &MorseConfig {
        &self.config
    }

    pub fn symbols(&self) -> &Symbols {
        &self.symbols
    }

    /// 规范化文本：转大写，丢弃无法编码的字符
    pub fn normalize(text: &str) -> String {
        UNSUPPORTED.replace_all(&text.to_uppercase(), "").into_owned()
    }

    /// 把信号串编译为信号序列
    ///
    /// 无法识别的字符忽略；结尾追加一个 [`Signal::SymbolSpace`]。
    pub fn compile(&self, source: &str) -> Program {
        let signals = source
            .chars()
            .filter_map(|c| self.signal_of(c))
            .chain(std::iter::once(Signal::SymbolSpace))
            .collect();
        Program {
            signals,
            text: String::new(),
            source: source.to_string(),
        }
    }

    /// 编码文本
    pub fn encode_from_text(&self, text: &str) -> Program {
        let normalized = Self::normalize(text);
        let source = self.scan(&normalized);
        debug!(text = %normalized, source = %source, "Morse 编码");
        Program {
            text: normalized,
            ..self.compile(&source)
        }
    }

    /// 输入只包含点、划、空格与分隔字符时直接编译，否则按文本编码
    pub fn encode_from_any(&self, input: &str) -> Program {
        if input.chars().all(|c| self.is_signal_char(c)) {
            self.compile(input)
        } else {
            self.encode_from_text(input)
        }
    }

    /// 为程序创建播放器
    pub fn player(&self, program: &Program) -> Player {
        Player::new(program, &self.config)
    }

    fn is_signal_char(&self, c: char) -> bool {
        matches!(c, '.' | '-' | '_' | ' ')
            || c == self.config.letter_space_char
            || c == self.config.word_space_char
    }

    fn signal_of(&self, c: char) -> Option<Signal> {
        match c {
            '.' => Some(Signal::Dit),
            '-' | '_' => Some(Signal::Dah),
            c if c == self.config.letter_space_char => Some(Signal::LetterSpace),
            c if c == self.config.word_space_char => Some(Signal::WordSpace),
            ' ' => Some(Signal::LetterSpace),
            '|' => Some(Signal::WordSpace),
            _ => None,
        }
    }

    fn scan(&self, normalized: &str) -> String {
        let letter_space = self.config.letter_space_char;
        let word_space = self.config.word_space_char;

        let mut out = String::new();
        let mut bracket: Option<String> = None;
        let mut word_spaced = false;

        for c in normalized.chars() {
            if let Some(buffer) = bracket.as_mut() {
                match c {
                    '<' => buffer.clear(),
                    '>' => {
                        if let Some((_, cp)) = self.symbols.lookup(buffer) {
                            if !word_spaced {
                                out.push(word_space);
                            }
                            out.push_str(&cp.morse);
                            out.push(word_space);
                            word_spaced = true;
                        } else {
                            debug!(symbol = %buffer, "未知的 Morse 简码，已丢弃");
                        }
                        bracket = None;
                    }
                    ' ' => {}
                    _ => buffer.push(c),
                }
                continue;
            }

            match c {
                ' ' => {
                    if !word_spaced {
                        out.push(word_space);
                        word_spaced = true;
                    }
                }
                '<' => bracket = Some(String::new()),
                '>' => {}
                _ => {
                    if let Some(rendering) = table::render(c) {
                        out.push_str(rendering);
                        out.push(letter_space);
                        word_spaced = false;
                    }
                }
            }
        }

        if let Some(buffer) = bracket {
            debug!(symbol = %buffer, "未闭合的 Morse 简码，已丢弃");
        }
        out
    }
}

impl Default for Morse {
    fn default() -> Self {
        Self::new(MorseConfig::default())
    }
}
