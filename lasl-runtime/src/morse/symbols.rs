//! # Symbols 模块
//!
//! 多字母简码：程序信号（prosign）、Q 简语、常用缩写。
//!
//! 文本中用尖括号包围的简码（如 `<SOS>`）按 Q 简语 → 程序信号 → 缩写的顺序查找，
//! 命中后整体发送，字母之间不插入字母间隔。

use std::fmt;

use super::table;

/// 简码类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Prosign,
    QCode,
    Abbreviation,
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Prosign => "prosign",
            Self::QCode => "q-code",
            Self::Abbreviation => "abbreviation",
        };
        f.pad(name)
    }
}

/// 简码条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodePoint {
    /// 简码文本
    pub code: &'static str,
    /// 含义
    pub meaning: &'static str,
    /// 点划表示（各字母直接拼接）
    pub morse: String,
}

impl CodePoint {
    fn new(code: &'static str, meaning: &'static str) -> Self {
        Self {
            code,
            meaning,
            morse: table::render_symbol(code),
        }
    }
}

const PROSIGNS: &[(&str, &str)] = &[
    ("AA", "New line"),
    ("AR", "End of message"),
    ("AS", "Wait"),
    ("BK", "Break"),
    ("BT", "New paragraph (also =)"),
    ("CL", "Going off the air ('clear')"),
    ("CT", "Start copying"),
    ("DO", "Change to wabun code"),
    ("KA", "Starting signal"),
    ("KN", "Invite a specific station to transmit"),
    ("SK", "End of transmission"),
    ("VA", "End of transmission"),
    ("VE", "Understood"),
    ("SN", "Understood"),
    ("SOS", "Distress message"),
    ("HH", "ERROR"),
];

const Q_CODES: &[(&str, &str)] = &[
    ("QRL?", "Is the frequency in use?"),
    ("QRL", "The frequency is in use"),
    ("QRM?", "Is my transmission being interfered with?"),
    ("QRM", "Your transmission is being interfered with (1-5)"),
    ("QRN?", "Are you troubled by static?"),
    ("QRN", "I am troubled by static (1-5)"),
    ("QRO?", "Shall I increase transmitter power?"),
    ("QRO", "Increase transmitter power"),
    ("QRP?", "Shall I decrease transmitter power?"),
    ("QRP", "Decrease transmitter power"),
    ("QRQ?", "Shall I send faster?"),
    ("QRQ", "Send faster (...words per minute)"),
    ("QRS?", "Shall I send more slowly?"),
    ("QRS", "Send more slowly (...words per minute)"),
    ("QRT?", "Shall I stop sending?"),
    ("QRT", "Stop sending"),
    ("QRU?", "Have you anything for me?"),
    ("QRU", "I have nothing for you"),
    ("QRV?", "Are you ready to copy?"),
    ("QRV", "I am ready to copy"),
    ("QRX?", "Should I wait?"),
    ("QRX", "Wait"),
    ("QRZ?", "Who is calling me?"),
    ("QRZ", "You are being called by..."),
    ("QSB?", "Are my signals fading?"),
    ("QSB", "Your signals are fading"),
    ("QSL?", "Do you acknowledge?"),
    ("QSL", "I acknowledge receipt"),
    ("QTH?", "What is your location?"),
    ("QTH", "My location is..."),
];

const ABBREVIATIONS: &[(&str, &str)] = &[
    ("73", "Best regards"),
    ("88", "Love and kisses"),
    ("BCNU", "Be seeing you"),
    ("CQ", "Call to all stations"),
    ("CS", "Call sign (request)"),
    ("CUL", "See you later"),
    ("DE", "From (or 'this is')"),
    ("ES", "And"),
    ("K", "Over (invitation to transmit)"),
    ("OM", "Old man"),
    ("R", "Received / Roger"),
    ("RST", "Signal report"),
    ("UR", "You are"),
];

/// 简码表
///
/// 引擎构造时创建一次，之后只读。
#[derive(Debug, Clone)]
pub struct Symbols {
    prosigns: Vec<CodePoint>,
    q_codes: Vec<CodePoint>,
    abbreviations: Vec<CodePoint>,
}

impl Symbols {
    /// 标准简码表
    pub fn standard() -> Self {
        let build = |list: &[(&'static str, &'static str)]| -> Vec<CodePoint> {
            list.iter()
                .map(|&(code, meaning)| CodePoint::new(code, meaning))
                .collect()
        };
        Self {
            prosigns: build(PROSIGNS),
            q_codes: build(Q_CODES),
            abbreviations: build(ABBREVIATIONS),
        }
    }

    /// 查找简码（Q 简语优先，其次程序信号，最后缩写）
    pub fn lookup(&self, code: &str) -> Option<(SymbolKind, &CodePoint)> {
        [SymbolKind::QCode, SymbolKind::Prosign, SymbolKind::Abbreviation]
            .into_iter()
            .find_map(|kind| {
                self.of_kind(kind)
                    .iter()
                    .find(|cp| cp.code == code)
                    .map(|cp| (kind, cp))
            })
    }

    /// 简码含义
    pub fn meaning(&self, code: &str) -> Option<&'static str> {
        self.lookup(code).map(|(_, cp)| cp.meaning)
    }

    /// 某一类简码（注册顺序）
    pub fn of_kind(&self, kind: SymbolKind) -> &[CodePoint] {
        match kind {
            SymbolKind::Prosign => &self.prosigns,
            SymbolKind::QCode => &self.q_codes,
            SymbolKind::Abbreviation => &self.abbreviations,
        }
    }

    /// 全部简码（程序信号、Q 简语、缩写依次排列）
    pub fn iter(&self) -> impl Iterator<Item = (SymbolKind, &CodePoint)> {
        [SymbolKind::Prosign, SymbolKind::QCode, SymbolKind::Abbreviation]
            .into_iter()
            .flat_map(move |kind| self.of_kind(kind).iter().map(move |cp| (kind, cp)))
    }

    pub fn len(&self) -> usize {
        self.prosigns.len() + self.q_codes.len() + self.abbreviations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Symbols {
    fn default() -> Self {
        Self::standard()
    }
}
