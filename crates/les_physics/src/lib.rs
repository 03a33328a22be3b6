// crates/les_physics/src/lib.rs

//! LES 物理模块
//!
//! 提供动态 Smagorinsky 亚格子模型及其依赖的有限体积基础设施：
//! - 网格抽象 (mesh)
//! - 体场与边界条件 (fields)
//! - 显式有限体积算子 (fvc) - 插值、梯度、面平均、Laplace
//! - 测试滤波器 (filter) - simple / laplace / simpson
//! - 滤波宽度 (delta)
//! - 亚格子模型 (turbulence)
//!
//! # Trait 抽象
//!
//! - [`MeshTopology`]: 网格几何与拓扑
//! - [`TestFilter`]: 测试滤波算子
//! - [`EddyViscosityModel`]: 涡粘性亚格子模型

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod delta;
pub mod fields;
pub mod filter;
pub mod fvc;
pub mod mesh;
pub mod turbulence;

// 重导出常用类型
pub use delta::{DeltaKind, LesDelta};
pub use fields::{
    FieldStats, PatchCondition, ScalarField, SymmTensorField, TensorField, VectorField, VolField,
    PARALLEL_THRESHOLD,
};
pub use filter::{LaplaceFilter, LesFilter, SimpleFilter, SimpsonFilter, TestFilter};
pub use mesh::{CartesianMesh, CartesianMeshBuilder, MeshTopology, Patch};
pub use turbulence::{
    CoefficientReporter, CoefficientSummary, DynamicSmagorinsky, EddyViscosityModel,
    GermanoEstimator, ModelError, MolecularViscosity, SummaryRecorder, TracingReporter,
};

// 重导出下层类型
pub use les_config::{ConfigError, LesModelConfig};
pub use les_foundation::{FieldValue, LesError, LesResult, SymmTensor, Tensor};
