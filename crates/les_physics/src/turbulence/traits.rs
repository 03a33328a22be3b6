// crates/les_physics/src/turbulence/traits.rs

//! 涡粘性 LES 模型 trait
//!
//! 定义亚格子模型的公共接口。派生量使用模型当前保存的场：
//!
//! ```text
//! ν_eff = ν + ν_sgs
//! ε     = ce·k^(3/2)/Δ
//! B     = (2/3)·k·I - 2·ν_sgs·D,   D = dev(symm(∇U))
//! ```

use les_config::LesModelConfig;
use les_foundation::float::TWO_THIRDS;
use les_foundation::{LesResult, SymmTensor, VSMALL};

use super::error::ModelError;
use super::strain::strain_rate;
use crate::fields::{ScalarField, SymmTensorField, VectorField};
use crate::mesh::MeshTopology;

/// 分子运动粘度
#[derive(Debug, Clone, PartialEq)]
pub enum MolecularViscosity {
    /// 全场常数 [m²/s]
    Uniform(f64),
    /// 逐单元给定
    Field(ScalarField),
}

impl Default for MolecularViscosity {
    fn default() -> Self {
        MolecularViscosity::Uniform(0.0)
    }
}

impl MolecularViscosity {
    /// 单元值
    #[inline]
    pub fn at(&self, cell: usize) -> f64 {
        match self {
            MolecularViscosity::Uniform(nu) => *nu,
            MolecularViscosity::Field(f) => f.value(cell),
        }
    }

    /// 转为标量场
    pub fn to_field(&self, mesh: &dyn MeshTopology) -> ScalarField {
        match self {
            MolecularViscosity::Uniform(nu) => ScalarField::uniform("nu", mesh, *nu),
            MolecularViscosity::Field(f) => f.clone(),
        }
    }

    /// 检查与网格一致
    pub fn check(&self, mesh: &dyn MeshTopology) -> LesResult<()> {
        match self {
            MolecularViscosity::Uniform(_) => Ok(()),
            MolecularViscosity::Field(f) => f.check(mesh),
        }
    }
}

/// 涡粘性亚格子模型 trait
///
/// # 实现者
///
/// - [`DynamicSmagorinsky`](super::DynamicSmagorinsky): 动态 Smagorinsky 模型
pub trait EddyViscosityModel: Send + Sync {
    /// 模型名称
    fn name(&self) -> &'static str;

    /// 模型所在网格
    fn mesh(&self) -> &dyn MeshTopology;

    /// 是否启用（湍流开关）
    fn is_enabled(&self) -> bool;

    /// 分子粘度
    fn nu(&self) -> &MolecularViscosity;

    /// 亚格子粘度场
    fn nu_sgs(&self) -> &ScalarField;

    /// 亚格子湍动能场
    fn k(&self) -> &ScalarField;

    /// 滤波宽度场
    fn delta(&self) -> &ScalarField;

    /// 耗散率系数
    fn ce(&self) -> f64;

    /// 按当前速度场修正
    fn correct(&mut self, u: &VectorField) -> Result<(), ModelError>;

    /// 重新读取系数配置
    fn reload(&mut self, config: &LesModelConfig) -> Result<(), ModelError>;

    /// 有效粘度 ν + ν_sgs
    fn nu_eff(&self) -> LesResult<ScalarField> {
        let nu = self.nu().to_field(self.mesh());
        Ok(self.nu_sgs().zip_map(&nu, |a, b| a + b)?.named("nuEff"))
    }

    /// 亚格子耗散率 ce·k^(3/2)/Δ
    fn epsilon(&self) -> LesResult<ScalarField> {
        let ce = self.ce();
        Ok(self
            .k()
            .zip_map(self.delta(), |k, d| ce * k.max(0.0).powf(1.5) / d.max(VSMALL))?
            .named("epsilon"))
    }

    /// 亚格子应力 (2/3)·k·I - 2·ν_sgs·D
    fn sgs_stress(&self, u: &VectorField) -> LesResult<SymmTensorField> {
        let d = strain_rate(self.mesh(), u)?;
        let isotropic = self.k().map(|k| SymmTensor::spherical(TWO_THIRDS * k));
        let viscous = d.zip_map(self.nu_sgs(), |s, nu| s * (2.0 * nu))?;
        Ok(isotropic.zip_map(&viscous, |a, b| a - b)?.named("B"))
    }
}
