// crates/les_physics/src/delta.rs

//! LES 滤波宽度 Δ
//!
//! | 名称 | Δ |
//! |------|---|
//! | `cubeRootVol` | deltaCoeff·V^(1/3) |
//! | `maxDeltaxyz` | deltaCoeff·max(Δx, Δy, Δz) |

use les_config::{ConfigError, DeltaCoeffs, DELTA_TYPES};

use crate::fields::ScalarField;
use crate::mesh::MeshTopology;

/// Δ 计算方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeltaKind {
    /// 单元体积立方根
    #[default]
    CubeRootVol,
    /// 三个方向尺度的最大值
    MaxDeltaxyz,
}

/// 滤波宽度策略
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LesDelta {
    kind: DeltaKind,
    delta_coeff: f64,
}

impl Default for LesDelta {
    fn default() -> Self {
        Self { kind: DeltaKind::CubeRootVol, delta_coeff: 1.0 }
    }
}

impl LesDelta {
    /// 按配置构建
    pub fn from_coeffs(coeffs: &DeltaCoeffs) -> Result<Self, ConfigError> {
        let kind = match coeffs.kind.as_str() {
            "cubeRootVol" => DeltaKind::CubeRootVol,
            "maxDeltaxyz" => DeltaKind::MaxDeltaxyz,
            other => return Err(ConfigError::unknown_type("delta", other, DELTA_TYPES)),
        };
        if !(coeffs.delta_coeff.is_finite() && coeffs.delta_coeff > 0.0) {
            return Err(ConfigError::invalid_value(
                "delta.delta_coeff",
                coeffs.delta_coeff,
                "必须为正",
            ));
        }
        Ok(Self { kind, delta_coeff: coeffs.delta_coeff })
    }

    /// 计算方式
    pub fn kind(&self) -> DeltaKind {
        self.kind
    }

    /// 单个单元的 Δ
    pub fn cell_delta(&self, mesh: &dyn MeshTopology, cell: usize) -> f64 {
        let raw = match self.kind {
            DeltaKind::CubeRootVol => mesh.cell_volume(cell).cbrt(),
            DeltaKind::MaxDeltaxyz => mesh.cell_extent(cell).max_element(),
        };
        self.delta_coeff * raw
    }

    /// Δ 场（零梯度边界）
    pub fn compute(&self, mesh: &dyn MeshTopology) -> ScalarField {
        let mut delta = ScalarField::uniform("delta", mesh, 0.0);
        for (c, v) in delta.internal_mut().iter_mut().enumerate() {
            *v = self.cell_delta(mesh, c);
        }
        delta.correct_boundary_conditions(mesh);
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::CartesianMesh;

    fn mesh() -> CartesianMesh {
        CartesianMesh::builder()
            .cells(2, 4, 8)
            .lengths(1.0, 1.0, 1.0)
            .build()
            .unwrap()
    }

    #[test]
    fn test_cube_root_vol() {
        let mesh = mesh();
        let delta = LesDelta::default().compute(&mesh);
        let expected = (0.5_f64 * 0.25 * 0.125).cbrt();
        assert!(delta.internal().iter().all(|&d| (d - expected).abs() < 1e-14));
        assert!(delta.boundary().iter().all(|&d| (d - expected).abs() < 1e-14));
    }

    #[test]
    fn test_max_delta_with_coeff() {
        let mesh = mesh();
        let coeffs = DeltaCoeffs { kind: "maxDeltaxyz".into(), delta_coeff: 2.0 };
        let delta = LesDelta::from_coeffs(&coeffs).unwrap().compute(&mesh);
        assert!(delta.internal().iter().all(|&d| (d - 1.0).abs() < 1e-14));
    }

    #[test]
    fn test_unknown_delta() {
        let coeffs = DeltaCoeffs { kind: "vanDriest".into(), delta_coeff: 1.0 };
        assert!(matches!(
            LesDelta::from_coeffs(&coeffs),
            Err(ConfigError::UnknownType { .. })
        ));
    }
}
