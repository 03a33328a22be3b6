// crates/les_physics/src/turbulence/mod.rs

//! LES 亚格子湍流模型
//!
//! - [`traits`]: 涡粘性模型接口与分子粘度
//! - [`strain`]: 应变率 D = dev(symm(∇U))
//! - [`dynamic_smagorinsky`]: 动态 Smagorinsky 模型（Germano 恒等式）
//! - [`diagnostics`]: 动态系数汇总与汇报
//! - [`error`]: 模型错误

pub mod diagnostics;
pub mod dynamic_smagorinsky;
pub mod error;
pub mod strain;
pub mod traits;

pub use diagnostics::{
    CoefficientReporter, CoefficientSummary, StatsRecord, SummaryRecorder, TracingReporter,
};
pub use dynamic_smagorinsky::{
    update_k, update_viscosity, DynamicCoefficients, DynamicSmagorinsky,
    DynamicSmagorinskyBuilder, GermanoEstimator,
};
pub use error::ModelError;
pub use strain::{strain_rate, strain_rate_from_gradient};
pub use traits::{EddyViscosityModel, MolecularViscosity};
