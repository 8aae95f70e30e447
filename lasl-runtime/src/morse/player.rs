//! # Player 模块
//!
//! 把信号序列展开为按键沿（按下/抬起）的时间表。
//!
//! ## 设计说明
//!
//! 播放器是一个显式状态机，不持有时钟也不阻塞：
//! 宿主用自己的时间调用 [`Player::poll`]，得到下一个按键沿、需要等待到的时刻，
//! 或者播放结束。[`Player::drive`] 把到期的按键沿直接转发给 [`Keyer`]。
//!
//! 展开规则：
//! - 点/划：按下，保持点/划时长；抬起，保持一个点的时长（元素间隔）
//! - 字母间隔、单词间隔、结束间隔：抬起，保持对应时长
//!
//! 按键沿严格按程序顺序逐个发出。中途停止播放请调用 [`Player::abort`]，
//! 它会在按键仍按下时补发抬起沿；直接 drop 播放器不做任何保证。

use std::time::{Duration, Instant};
use tracing::trace;

use super::engine::{Program, Signal};
use crate::config::MorseConfig;

/// 按键沿
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// 按下
    Rising,
    /// 抬起
    Falling,
}

/// 一个按键沿及其保持时长
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cue {
    pub edge: Edge,
    /// 产生该沿的信号
    pub signal: Signal,
    /// 信号在程序中的下标
    pub index: usize,
    /// 该沿之后需要保持的时长
    pub hold: Duration,
}

/// [`Player::poll`] 的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// 现在发出这个按键沿
    Edge(Cue),
    /// 在此时刻之前没有新的按键沿
    Wait { deadline: Instant },
    /// 播放结束
    Done,
}

/// 按键输出端
pub trait Keyer {
    fn rising_edge(&mut self);
    fn falling_edge(&mut self);
}

/// 播放器
#[derive(Debug, Clone)]
pub struct Player {
    cues: Vec<Cue>,
    cursor: usize,
    deadline: Option<Instant>,
    key_down: bool,
    finished: bool,
}

impl Player {
    /// 按配置的时长展开程序
    pub fn new(program: &Program, config: &MorseConfig) -> Self {
        let mut cues = Vec::with_capacity(program.len() * 2);
        for (index, &signal) in program.signals().iter().enumerate() {
            let mut push = |edge, hold| {
                cues.push(Cue {
                    edge,
                    signal,
                    index,
                    hold,
                })
            };
            match signal {
                Signal::Dit => {
                    push(Edge::Rising, config.dit());
                    push(Edge::Falling, config.dit());
                }
                Signal::Dah => {
                    push(Edge::Rising, config.dah());
                    push(Edge::Falling, config.dit());
                }
                Signal::LetterSpace => push(Edge::Falling, config.letter_space()),
                Signal::WordSpace => push(Edge::Falling, config.word_space()),
                Signal::SymbolSpace => push(Edge::Falling, config.symbol_space()),
            }
        }
        Self {
            cues,
            cursor: 0,
            deadline: None,
            key_down: false,
            finished: false,
        }
    }

    /// 推进状态机
    ///
    /// 上一个沿的保持时间未到时返回 [`Step::Wait`]；
    /// 每个沿之后的保持时间从发出它的 `now` 开始计算。
    pub fn poll(&mut self, now: Instant) -> Step {
        if self.finished {
            return Step::Done;
        }
        match self.deadline {
            Some(deadline) if now < deadline => return Step::Wait { deadline },
            _ => {}
        }
        let Some(&cue) = self.cues.get(self.cursor) else {
            self.finished = true;
            self.deadline = None;
            return Step::Done;
        };
        self.cursor += 1;
        // 无法表示的截止时刻按立即到期处理
        self.deadline = now.checked_add(cue.hold);
        self.key_down = cue.edge == Edge::Rising;
        trace!(signal = ?cue.signal, edge = ?cue.edge, hold = ?cue.hold, "Morse 按键沿");
        Step::Edge(cue)
    }

    /// 发出所有到期的按键沿，返回下一次需要调用的时刻（结束时为 `None`）
    pub fn drive(&mut self, now: Instant, keyer: &mut dyn Keyer) -> Option<Instant> {
        loop {
            match self.poll(now) {
                Step::Edge(cue) => match cue.edge {
                    Edge::Rising => keyer.rising_edge(),
                    Edge::Falling => keyer.falling_edge(),
                },
                Step::Wait { deadline } => return Some(deadline),
                Step::Done => return None,
            }
        }
    }

    /// 停止播放；按键仍按下时补发抬起沿，返回是否补发
    pub fn abort(&mut self, keyer: &mut dyn Keyer) -> bool {
        let owed = self.key_down && !self.finished;
        if owed {
            keyer.falling_edge();
            trace!("Morse 播放中止，补发抬起沿");
        }
        self.key_down = false;
        self.finished = true;
        self.deadline = None;
        owed
    }

    /// 按键当前是否按下
    pub fn is_key_down(&self) -> bool {
        self.key_down
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// 尚未发出的按键沿
    pub fn remaining(&self) -> &[Cue] {
        self.cues.get(self.cursor..).unwrap_or_default()
    }
}
