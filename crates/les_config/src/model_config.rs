// crates/les_config/src/model_config.rs

//! LesModelConfig - 动态 Smagorinsky 模型系数配置
//!
//! 对应 LES 模型的系数字典：湍流开关、k 下限、滤波宽度 (delta) 策略、
//! 测试滤波器以及诊断输出级别。
//!
//! 类型名（`delta.kind`、`filter.kind`）以字符串保存，在物理层构建时
//! 做运行时选择。这样未知的类型名只会让该次构建/重读失败，而不是让
//! 整份配置文档无法解析。
//!
//! ```json
//! {
//!   "turbulence": true,
//!   "k_min": 1e-15,
//!   "delta": { "kind": "cubeRootVol", "delta_coeff": 1.0 },
//!   "filter": { "kind": "simple" },
//!   "diagnostics": "summary"
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// 可选的测试滤波器类型
pub const FILTER_TYPES: &[&str] = &["simple", "laplace", "simpson"];

/// 可选的 delta 策略
pub const DELTA_TYPES: &[&str] = &["cubeRootVol", "maxDeltaxyz"];

/// 模型系数配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LesModelConfig {
    /// 湍流开关，关闭时 correct 不更新任何场
    #[serde(default = "default_turbulence")]
    pub turbulence: bool,

    /// 亚格子湍动能下限 [m²/s²]
    #[serde(default = "default_k_min")]
    pub k_min: f64,

    /// 耗散率系数 ε = ce·k^1.5/Δ
    #[serde(default = "default_ce")]
    pub ce: f64,

    /// 滤波宽度策略
    #[serde(default)]
    pub delta: DeltaCoeffs,

    /// 测试滤波器
    #[serde(default)]
    pub filter: FilterCoeffs,

    /// 系数诊断输出级别
    #[serde(default)]
    pub diagnostics: DiagnosticsLevel,
}

fn default_turbulence() -> bool { true }
fn default_k_min() -> f64 { 1.0e-15 }
fn default_ce() -> f64 { 1.048 }

impl Default for LesModelConfig {
    fn default() -> Self {
        Self {
            turbulence: default_turbulence(),
            k_min: default_k_min(),
            ce: default_ce(),
            delta: DeltaCoeffs::default(),
            filter: FilterCoeffs::default(),
            diagnostics: DiagnosticsLevel::default(),
        }
    }
}

/// 滤波宽度 (LES delta) 配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeltaCoeffs {
    /// 策略名：`cubeRootVol` 或 `maxDeltaxyz`
    #[serde(default = "default_delta_kind")]
    pub kind: String,

    /// 宽度系数
    #[serde(default = "default_delta_coeff")]
    pub delta_coeff: f64,
}

fn default_delta_kind() -> String { "cubeRootVol".to_string() }
fn default_delta_coeff() -> f64 { 1.0 }

impl Default for DeltaCoeffs {
    fn default() -> Self {
        Self {
            kind: default_delta_kind(),
            delta_coeff: default_delta_coeff(),
        }
    }
}

impl DeltaCoeffs {
    /// 验证
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !DELTA_TYPES.contains(&self.kind.as_str()) {
            return Err(ConfigError::unknown_type("delta", &self.kind, DELTA_TYPES));
        }
        if !(self.delta_coeff.is_finite() && self.delta_coeff > 0.0) {
            return Err(ConfigError::invalid_value(
                "delta.delta_coeff",
                self.delta_coeff,
                "必须为正",
            ));
        }
        Ok(())
    }
}

/// 测试滤波器配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCoeffs {
    /// 滤波器名：`simple`、`laplace` 或 `simpson`
    #[serde(default = "default_filter_kind")]
    pub kind: String,

    /// Laplace 滤波器宽度系数，扩散系数 = V^(2/3)/width_coeff
    #[serde(default = "default_width_coeff")]
    pub width_coeff: f64,
}

fn default_filter_kind() -> String { "simple".to_string() }
fn default_width_coeff() -> f64 { 6.0 }

impl Default for FilterCoeffs {
    fn default() -> Self {
        Self {
            kind: default_filter_kind(),
            width_coeff: default_width_coeff(),
        }
    }
}

impl FilterCoeffs {
    /// 指定类型名，其余取默认值
    pub fn named(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }

    /// 验证
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !FILTER_TYPES.contains(&self.kind.as_str()) {
            return Err(ConfigError::unknown_type("filter", &self.kind, FILTER_TYPES));
        }
        if !(self.width_coeff.is_finite() && self.width_coeff > 0.0) {
            return Err(ConfigError::invalid_value(
                "filter.width_coeff",
                self.width_coeff,
                "必须为正",
            ));
        }
        Ok(())
    }
}

/// 系数诊断级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticsLevel {
    /// 不输出
    #[default]
    Off,
    /// 每次修正后输出 min/max/mean 汇总
    Summary,
}

impl LesModelConfig {
    /// 从 JSON 文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json(&content)
    }

    /// 从 JSON 字符串解析配置
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: LesModelConfig =
            serde_json::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.k_min.is_finite() && self.k_min >= 0.0) {
            return Err(ConfigError::invalid_value("k_min", self.k_min, "k_min 不能为负"));
        }

        if !(self.ce.is_finite() && self.ce > 0.0) {
            return Err(ConfigError::invalid_value("ce", self.ce, "ce 必须为正"));
        }

        self.delta.validate()?;
        self.filter.validate()?;
        Ok(())
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))?;
        std::fs::write(path, content).map_err(ConfigError::Io)?;
        Ok(())
    }
}
