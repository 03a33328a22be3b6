// apps/les_cli/src/commands/validate.rs

//! 配置验证命令
//!
//! 解析并验证系数配置文件，对可疑但合法的取值给出警告。

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use tracing::{error, info, warn};

use les_config::LesModelConfig;

/// 验证参数
#[derive(Args)]
pub struct ValidateArgs {
    /// 配置文件路径
    #[arg(short, long)]
    pub config: PathBuf,

    /// 严格模式（警告也视为错误）
    #[arg(long)]
    pub strict: bool,
}

/// 验证结果
#[derive(Default)]
struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn is_ok(&self, strict: bool) -> bool {
        self.errors.is_empty() && (!strict || self.warnings.is_empty())
    }
}

fn check_values(config: &LesModelConfig, result: &mut ValidationResult) {
    if !config.turbulence {
        result.add_warning("turbulence = false，模型不会更新 nuSgs");
    }
    if config.k_min > 1e-3 {
        result.add_warning(format!("k_min = {} 较大，可能掩盖亚格子能量", config.k_min));
    }
    if config.delta.delta_coeff > 2.0 {
        result.add_warning(format!("delta_coeff = {} 偏大", config.delta.delta_coeff));
    }
    if config.filter.kind == "laplace" && config.filter.width_coeff < 2.0 {
        result.add_warning(format!(
            "laplace 滤波 width_coeff = {} 过小，滤波可能不稳定",
            config.filter.width_coeff
        ));
    }
}

/// 执行验证命令
pub fn execute(args: ValidateArgs) -> Result<()> {
    info!("=== 系数配置验证 ===");
    println!("\n检查配置文件: {}", args.config.display());

    let mut result = ValidationResult::default();
    match LesModelConfig::from_file(&args.config) {
        Ok(config) => {
            println!("  ✓ 配置文件格式有效");
            println!("  滤波器: {}, delta: {}", config.filter.kind, config.delta.kind);
            check_values(&config, &mut result);
        }
        Err(e) => result.add_error(e.to_string()),
    }

    for w in &result.warnings {
        warn!("{}", w);
        println!("  ⚠ {}", w);
    }
    for e in &result.errors {
        error!("{}", e);
        println!("  ✗ {}", e);
    }

    if result.is_ok(args.strict) {
        println!("\n验证通过");
        Ok(())
    } else {
        bail!(
            "验证失败: {} 个错误, {} 个警告",
            result.errors.len(),
            result.warnings.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warnings_for_suspicious_values() {
        let mut config = LesModelConfig::default();
        config.turbulence = false;
        config.k_min = 0.1;

        let mut result = ValidationResult::default();
        check_values(&config, &mut result);
        assert_eq!(result.warnings.len(), 2);
        assert!(result.is_ok(false));
        assert!(!result.is_ok(true));
    }

    #[test]
    fn test_default_config_is_clean() {
        let mut result = ValidationResult::default();
        check_values(&LesModelConfig::default(), &mut result);
        assert!(result.is_ok(true));
    }
}
