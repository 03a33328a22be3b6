// crates/les_config/src/lib.rs

//! 配置层
//!
//! 动态 Smagorinsky 模型的系数配置，JSON 序列化，全 f64。
//!
//! # 模块概览
//!
//! - [`model_config`]: LesModelConfig 及其子配置（delta、滤波器、诊断）
//! - [`error`]: 配置错误类型
//!
//! # 设计原则
//!
//! 1. **无泛型**: 本层所有类型都不包含泛型参数
//! 2. **默认值完整**: 所有字段都有 serde 默认值，最小配置为 `{}`
//! 3. **延迟选择**: 类型名以字符串保存，由物理层做运行时选择

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod model_config;

// 重导出核心类型
pub use error::ConfigError;
pub use model_config::{
    DeltaCoeffs, DiagnosticsLevel, FilterCoeffs, LesModelConfig, DELTA_TYPES, FILTER_TYPES,
};
