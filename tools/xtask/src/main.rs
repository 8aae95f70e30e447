//! # xtask - 开发辅助工具
//!
//! 提供本地质量门禁与开发辅助命令。
//!
//! ## 命令
//!
//! - `check-all`: 按 [`GATES`] 依次执行 cargo 门禁
//! - `cov-runtime` / `cov-workspace`: 覆盖率报告
//! - `vessel-check`: 检查载具描述文件（格式、实例 ID、灯光模块）

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitCode};
use std::rc::Rc;

use lasl_runtime::switch_lights::MemoryVessel;
use lasl_runtime::{LaslConfig, ModuleCache, Part, PartModule};

/// `check-all` 依次执行的 cargo 调用
///
/// 最后一步单独编译关闭 aviation-lights 的 lasl-support，
/// 保证 feature 门控两侧都能通过。
const GATES: &[&[&str]] = &[
    &["fmt", "--all", "--", "--check"],
    &["clippy", "--workspace", "--all-targets"],
    &["test", "--workspace"],
    &["test", "-p", "lasl-support", "--no-default-features"],
];

/// 覆盖率口径
enum Coverage {
    /// 只统计核心库
    Runtime,
    /// 除 xtask 外的所有成员
    Workspace,
}

impl Coverage {
    fn scope(&self) -> &'static [&'static str] {
        match self {
            Self::Runtime => &["-p", "lasl-runtime"],
            Self::Workspace => &["--workspace", "--exclude", "xtask"],
        }
    }
}

/// 执行一次 cargo 调用，失败时带上完整命令行
fn cargo(args: &[&str]) -> anyhow::Result<()> {
    let line = format!("cargo {}", args.join(" "));
    eprintln!("\n==> {line}");
    let status = Command::new("cargo").args(args).status()?;
    if !status.success() {
        anyhow::bail!("{line} failed with {status}");
    }
    Ok(())
}

fn coverage(kind: Coverage) -> anyhow::Result<()> {
    let probe = Command::new("cargo").args(["llvm-cov", "--version"]).status();
    if !probe.is_ok_and(|s| s.success()) {
        anyhow::bail!(
            "cargo llvm-cov 不可用，请先执行 `cargo install cargo-llvm-cov` \
             与 `rustup component add llvm-tools-preview`"
        );
    }

    let mut args = vec!["llvm-cov"];
    args.extend_from_slice(kind.scope());
    args.extend_from_slice(&["--all-features", "--html"]);
    cargo(&args)?;

    eprintln!("\nCoverage HTML: target/llvm-cov/html/index.html");
    Ok(())
}

fn main() -> ExitCode {
    match real_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("xtask error: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn real_main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let sub = args.next().unwrap_or_else(|| "help".to_string());

    match sub.as_str() {
        "check-all" => GATES.iter().try_for_each(|gate| cargo(gate)),
        "cov-runtime" => coverage(Coverage::Runtime),
        "cov-workspace" => coverage(Coverage::Workspace),
        "vessel-check" => vessel_check(args.next().as_deref()),
        "help" | "-h" | "--help" => {
            print_help();
            Ok(())
        }
        other => anyhow::bail!("unknown xtask subcommand: {other}"),
    }
}

fn print_help() {
    eprintln!(
        r#"xtask - lasl 工作区辅助命令

USAGE:
  cargo xtask <command>      （或 .cargo/config.toml 中的同名别名）

COMMANDS:
  check-all       fmt + clippy + test，并单独测试无 aviation-lights 的 lasl-support
  cov-runtime     lasl-runtime 覆盖率（HTML）
  cov-workspace   除 xtask 外全部成员的覆盖率（HTML）
  vessel-check    检查载具描述 JSON 与 lasl.json

VESSEL-CHECK:
  cargo vessel-check [path]

  path 缺省为 vessels/；可以是单个 .json 文件或目录（递归）。
  报告 JSON 格式错误、重复的零件实例 ID，
  以及名称带 Light 却没有注册适配器的模块。
"#
    );
}

//=============================================================================
// vessel-check 命令实现
//=============================================================================

const DEFAULT_VESSELS_DIR: &str = "vessels";
const CONFIG_FILE: &str = "lasl.json";

/// 检查结果
#[derive(Default)]
struct VesselCheckResult {
    vessels_checked: usize,
    errors: usize,
    warnings: usize,
}

fn vessel_check(path: Option<&str>) -> anyhow::Result<()> {
    let files = match path {
        Some(p) => {
            let path = PathBuf::from(p);
            if path.is_file() {
                vec![path]
            } else if path.is_dir() {
                collect_vessel_files(&path)?
            } else {
                anyhow::bail!("路径不存在: {}", p);
            }
        }
        None => {
            let dir = Path::new(DEFAULT_VESSELS_DIR);
            if !dir.exists() {
                anyhow::bail!(
                    "默认载具目录不存在: {}\n请在 workspace 根目录运行，或指定载具路径",
                    dir.display()
                );
            }
            collect_vessel_files(dir)?
        }
    };

    let mut result = VesselCheckResult::default();

    let config = Path::new(CONFIG_FILE);
    if config.exists()
        && let Err(e) = LaslConfig::load(config)
    {
        eprintln!("[ERROR] {}: {}", config.display(), e);
        result.errors += 1;
    }

    if files.is_empty() {
        eprintln!("未找到载具描述文件（.json）");
        return finish(&result);
    }

    eprintln!("==> 检查 {} 个载具描述...\n", files.len());

    let cache = lasl_support::register_all(ModuleCache::builder()).build();
    for file in &files {
        check_vessel_file(file, &cache, &mut result);
    }

    finish(&result)
}

fn collect_vessel_files(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    collect_vessel_files_recursive(dir, &mut files)?;
    files.sort();
    Ok(files)
}

fn collect_vessel_files_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> anyhow::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_vessel_files_recursive(&path, files)?;
        } else if path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    Ok(())
}

fn check_vessel_file(file: &Path, cache: &ModuleCache, result: &mut VesselCheckResult) {
    let id = file.display().to_string();
    result.vessels_checked += 1;

    let vessel = match MemoryVessel::load(file) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("[ERROR] {id}: {e}");
            result.errors += 1;
            return;
        }
    };

    let mut seen = HashSet::new();
    let mut lights = 0;
    for part in vessel.memory_parts() {
        if !seen.insert(part.instance_id()) {
            eprintln!("[ERROR] {id}: 零件实例 ID 重复 {}", part.instance_id());
            result.errors += 1;
        }

        let modules: Vec<Rc<dyn PartModule>> = part.modules();
        if modules.iter().any(|m| cache.supports(&**m)) {
            lights += 1;
            continue;
        }
        for module in &modules {
            if module.module_name().to_lowercase().contains("light") {
                eprintln!(
                    "[WARN] {id}: 零件 {} 的模块 {} 没有注册适配器",
                    part.name(),
                    module.module_name()
                );
                result.warnings += 1;
            }
        }
    }

    eprintln!(
        "[INFO] {id}: {} 个零件，{} 个可控灯光",
        vessel.memory_parts().len(),
        lights
    );
}

fn finish(result: &VesselCheckResult) -> anyhow::Result<()> {
    eprintln!("─────────────────────────────────────────────────────");
    eprintln!("检查完成: {} 个载具", result.vessels_checked);
    if result.errors > 0 {
        eprintln!("❌ {} 个错误, {} 个警告", result.errors, result.warnings);
        anyhow::bail!("载具检查发现错误");
    } else if result.warnings > 0 {
        eprintln!("⚠️  0 个错误, {} 个警告", result.warnings);
    } else {
        eprintln!("✅ 检查通过，无错误");
    }
    Ok(())
}
