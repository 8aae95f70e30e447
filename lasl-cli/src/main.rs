//! # LASL CLI
//!
//! 以命令行宿主的方式驱动 lasl-runtime。
//!
//! ## 用法
//!
//! ```bash
//! lasl morse encode "CQ CQ <DE> K"
//! lasl morse encode --json "<SOS>"
//! lasl morse play "<SOS>"
//! lasl morse symbols --kind q-code
//! lasl lights list
//! lasl lights on --ignore-crewable --ignore-slow
//! lasl lights off --vessel ship.json --save ship.json
//! lasl lights push-pop
//! ```
//!
//! 配置文件默认为当前目录下的 `lasl.json`，不存在时使用默认配置。

mod lights;
mod morse;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use lasl_runtime::LaslConfig;

#[derive(Parser)]
#[command(name = "lasl")]
#[command(about = "LASL 命令行宿主 - Morse 编码播放与载具灯光模拟")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 配置文件（默认：lasl.json）
    #[arg(short, long, default_value = "lasl.json", global = true)]
    config: PathBuf,

    /// 输出调试日志（等价于 RUST_LOG=debug）
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Morse 编码与播放
    Morse {
        #[command(subcommand)]
        command: morse::MorseCommand,
    },

    /// 载具灯光模拟
    Lights {
        #[command(subcommand)]
        command: lights::LightsCommand,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("lasl error: {e:#}");
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = LaslConfig::load_or_default(&cli.config);
    match cli.command {
        Commands::Morse { command } => morse::run(command, &config.morse),
        Commands::Lights { command } => lights::run(command, &config.switch_lights),
    }
}
