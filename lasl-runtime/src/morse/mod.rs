//! # Morse 模块
//!
//! Morse 码编码与播放。
//!
//! ```text
//! 文本 ──normalize/scan──► 信号串 ──compile──► Program ──Player──► 按键沿
//! ```
//!
//! - [`Morse`]：编码引擎，持有配置与简码表
//! - [`Program`]：信号序列
//! - [`Player`]：非阻塞的播放状态机
//! - [`Symbols`]：程序信号、Q 简语与缩写

mod engine;
mod player;
mod symbols;
pub mod table;

pub use engine::{Morse, Program, Signal};
pub use player::{Cue, Edge, Keyer, Player, Step};
pub use symbols::{CodePoint, SymbolKind, Symbols};
