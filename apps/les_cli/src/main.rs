// apps/les_cli/src/main.rs

//! 动态 Smagorinsky 模型命令行工具
//!
//! 在笛卡尔盒上施加解析速度场，驱动亚格子模型并输出动态系数汇总；
//! 也可单独检查系数配置文件。

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;

/// 动态 Smagorinsky 亚格子模型命令行工具
#[derive(Parser)]
#[command(name = "les_cli", version, about = "Dynamic Smagorinsky SGS model driver")]
struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)
    #[arg(short, long, default_value_t = Level::INFO, global = true)]
    log_level: Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 在解析流场上运行模型
    Run(commands::run::RunArgs),
    /// 验证系数配置
    Validate(commands::validate::ValidateArgs),
}

/// 日志只写 stderr，stdout 留给汇总表与 JSON 行
fn init_logging(level: Level) -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(anyhow::Error::msg)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level)?;

    match cli.command {
        Commands::Run(args) => commands::run::execute(args),
        Commands::Validate(args) => commands::validate::execute(args),
    }
}
