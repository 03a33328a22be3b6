// crates/les_physics/src/filter/laplace.rs

//! Laplace 滤波
//!
//! ```text
//! F(φ) = φ + ∇·(c ∇φ),   c = V^(2/3) / widthCoeff
//! ```

use les_config::ConfigError;
use les_foundation::{FieldValue, LesResult};

use super::{with_unfiltered_boundary, TestFilter};
use crate::fields::{ScalarField, VolField};
use crate::fvc;
use crate::mesh::MeshTopology;

/// Laplace 滤波器（`laplace`）
#[derive(Debug, Clone)]
pub struct LaplaceFilter {
    width_coeff: f64,
    coeff: ScalarField,
}

impl LaplaceFilter {
    /// 创建滤波器，扩散系数按网格单元体积预先计算
    pub fn new(mesh: &dyn MeshTopology, width_coeff: f64) -> Result<Self, ConfigError> {
        if !(width_coeff.is_finite() && width_coeff > 0.0) {
            return Err(ConfigError::invalid_value(
                "filter.width_coeff",
                width_coeff,
                "必须为正",
            ));
        }

        let mut coeff = ScalarField::uniform("laplaceFilterCoeff", mesh, 0.0);
        for (c, v) in coeff.internal_mut().iter_mut().enumerate() {
            *v = mesh.cell_volume(c).powf(2.0 / 3.0) / width_coeff;
        }
        coeff.correct_boundary_conditions(mesh);

        Ok(Self { width_coeff, coeff })
    }

    /// 宽度系数
    pub fn width_coeff(&self) -> f64 {
        self.width_coeff
    }

    /// 扩散系数场
    pub fn coeff(&self) -> &ScalarField {
        &self.coeff
    }
}

impl TestFilter for LaplaceFilter {
    fn name(&self) -> &'static str {
        "laplace"
    }

    fn apply<T: FieldValue>(
        &self,
        mesh: &dyn MeshTopology,
        field: &VolField<T>,
    ) -> LesResult<VolField<T>> {
        let lap = fvc::laplacian(mesh, &self.coeff, field)?;
        let internal = field
            .internal()
            .iter()
            .zip(lap.internal())
            .map(|(&phi, &l)| phi + l)
            .collect();
        with_unfiltered_boundary(mesh, field, internal)
    }
}
