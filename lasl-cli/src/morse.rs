//! `lasl morse` 子命令

use anyhow::bail;
use clap::{Subcommand, ValueEnum};
use std::io::Write;
use std::time::Instant;
use tracing::info;

use lasl_runtime::morse::{Step, SymbolKind};
use lasl_runtime::{Edge, Keyer, Morse, MorseConfig, Program};

#[derive(Subcommand)]
pub enum MorseCommand {
    /// 编码文本并输出信号串与信号序列
    Encode {
        /// 文本；只含点划与分隔字符时直接编译
        text: Vec<String>,

        /// 以 JSON 输出编译结果
        #[arg(long)]
        json: bool,
    },

    /// 按配置的时长在终端上播放
    Play {
        /// 文本；只含点划与分隔字符时直接编译
        text: Vec<String>,

        /// 只打印时间表，不等待
        #[arg(long)]
        dry_run: bool,
    },

    /// 列出简码表
    Symbols {
        /// 只列出某一类
        #[arg(short, long, value_enum)]
        kind: Option<Kind>,
    },

    /// 查询简码含义
    Meaning {
        /// 简码，例如 QTH? 或 SOS
        code: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Kind {
    Prosign,
    QCode,
    Abbreviation,
}

impl From<Kind> for SymbolKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Prosign => SymbolKind::Prosign,
            Kind::QCode => SymbolKind::QCode,
            Kind::Abbreviation => SymbolKind::Abbreviation,
        }
    }
}

pub fn run(command: MorseCommand, config: &MorseConfig) -> anyhow::Result<()> {
    let morse = Morse::new(config.clone());
    match command {
        MorseCommand::Encode { text, json } => {
            let program = morse.encode_from_any(&text.join(" "));
            if json {
                println!("{}", serde_json::to_string_pretty(&program)?);
            } else {
                print_program(&program, config);
            }
        }
        MorseCommand::Play { text, dry_run } => {
            let program = morse.encode_from_any(&text.join(" "));
            print_program(&program, config);
            if dry_run {
                print_schedule(&morse, &program);
            } else {
                play(&morse, &program)?;
            }
        }
        MorseCommand::Symbols { kind } => {
            for (k, cp) in morse.symbols().iter() {
                if kind.is_some_and(|want| SymbolKind::from(want) != k) {
                    continue;
                }
                println!("{:<14} {:<6} {:<24} {}", k, cp.code, cp.morse, cp.meaning);
            }
        }
        MorseCommand::Meaning { code } => {
            let code = code.to_uppercase();
            match morse.symbols().lookup(&code) {
                Some((kind, cp)) => println!("{} ({kind}) {}: {}", cp.code, cp.morse, cp.meaning),
                None => bail!("未知的简码: {code}"),
            }
        }
    }
    Ok(())
}

fn print_program(program: &Program, config: &MorseConfig) {
    if !program.text().is_empty() {
        println!("text:     {}", program.text());
    }
    println!("source:   {}", program.source());
    println!("signals:  {}", program.len());
    println!("duration: {:.2}s", program.duration(config).as_secs_f32());
}

/// 终端按键：按下时输出实心块，抬起时输出空格
struct TerminalKeyer<W: Write> {
    out: W,
    down: bool,
}

impl<W: Write> Keyer for TerminalKeyer<W> {
    fn rising_edge(&mut self) {
        self.down = true;
        let _ = write!(self.out, "█");
        let _ = self.out.flush();
    }

    fn falling_edge(&mut self) {
        if self.down {
            let _ = write!(self.out, " ");
            let _ = self.out.flush();
        }
        self.down = false;
    }
}

fn play(morse: &Morse, program: &Program) -> anyhow::Result<()> {
    let mut player = morse.player(program);
    let mut keyer = TerminalKeyer {
        out: std::io::stdout(),
        down: false,
    };
    let started = Instant::now();
    info!(signals = program.len(), "开始播放");

    while let Some(deadline) = player.drive(Instant::now(), &mut keyer) {
        std::thread::sleep(deadline.saturating_duration_since(Instant::now()));
    }
    player.abort(&mut keyer);

    writeln!(keyer.out)?;
    info!(elapsed = ?started.elapsed(), "播放结束");
    Ok(())
}

fn print_schedule(morse: &Morse, program: &Program) {
    let mut player = morse.player(program);
    let start = Instant::now();
    let mut now = start;
    loop {
        match player.poll(now) {
            Step::Edge(cue) => {
                let edge = match cue.edge {
                    Edge::Rising => "on ",
                    Edge::Falling => "off",
                };
                println!(
                    "{:>8.3}s  {edge}  {:<12} hold {:.3}s",
                    (now - start).as_secs_f32(),
                    format!("{:?}", cue.signal),
                    cue.hold.as_secs_f32()
                );
            }
            Step::Wait { deadline } => now = deadline,
            Step::Done => break,
        }
    }
    println!("{:>8.3}s  done", (now - start).as_secs_f32());
}
