// crates/les_physics/src/filter/mod.rs

//! LES 测试滤波器
//!
//! 动态过程需要把同一个滤波算子作用到矢量、标量与对称张量场上，
//! 因此 [`TestFilter::apply`] 对场值类型泛型。滤波器按配置名在构建时
//! 选择，封装在 [`LesFilter`] 中：
//!
//! | 名称 | 类型 | 说明 |
//! |------|------|------|
//! | `simple` | [`SimpleFilter`] | 面平均（盒式滤波） |
//! | `laplace` | [`LaplaceFilter`] | φ + ∇·(c∇φ)，c = V^(2/3)/widthCoeff |
//! | `simpson` | [`SimpsonFilter`] | 逐方向 1-4-1 Simpson 权重 |
//!
//! 滤波结果的边界值与边界条件沿用未滤波场。

mod laplace;
mod simple;
mod simpson;

pub use laplace::LaplaceFilter;
pub use simple::SimpleFilter;
pub use simpson::SimpsonFilter;

use les_config::{ConfigError, FilterCoeffs, FILTER_TYPES};
use les_foundation::{FieldValue, LesResult};

use crate::fields::VolField;
use crate::mesh::MeshTopology;

/// 测试滤波器接口
pub trait TestFilter {
    /// 配置中使用的类型名
    fn name(&self) -> &'static str;

    /// 对场做一次测试滤波
    fn apply<T: FieldValue>(
        &self,
        mesh: &dyn MeshTopology,
        field: &VolField<T>,
    ) -> LesResult<VolField<T>>;
}

/// 由滤波后的单元值与原场的边界组装结果
pub(crate) fn with_unfiltered_boundary<T: FieldValue>(
    mesh: &dyn MeshTopology,
    field: &VolField<T>,
    internal: Vec<T>,
) -> LesResult<VolField<T>> {
    VolField::from_parts(
        format!("filter({})", field.name()),
        mesh,
        internal,
        field.boundary().to_vec(),
        field.conditions().to_vec(),
    )
}

/// 运行时选择的测试滤波器
#[derive(Debug, Clone)]
pub enum LesFilter {
    /// 盒式滤波
    Simple(SimpleFilter),
    /// Laplace 滤波
    Laplace(LaplaceFilter),
    /// Simpson 滤波
    Simpson(SimpsonFilter),
}

impl Default for LesFilter {
    fn default() -> Self {
        LesFilter::Simple(SimpleFilter)
    }
}

impl LesFilter {
    /// 按配置构建
    pub fn from_coeffs(mesh: &dyn MeshTopology, coeffs: &FilterCoeffs) -> Result<Self, ConfigError> {
        match coeffs.kind.as_str() {
            "simple" => Ok(LesFilter::Simple(SimpleFilter)),
            "laplace" => Ok(LesFilter::Laplace(LaplaceFilter::new(mesh, coeffs.width_coeff)?)),
            "simpson" => Ok(LesFilter::Simpson(SimpsonFilter)),
            other => Err(ConfigError::unknown_type("filter", other, FILTER_TYPES)),
        }
    }
}

impl TestFilter for LesFilter {
    fn name(&self) -> &'static str {
        match self {
            LesFilter::Simple(f) => f.name(),
            LesFilter::Laplace(f) => f.name(),
            LesFilter::Simpson(f) => f.name(),
        }
    }

    fn apply<T: FieldValue>(
        &self,
        mesh: &dyn MeshTopology,
        field: &VolField<T>,
    ) -> LesResult<VolField<T>> {
        match self {
            LesFilter::Simple(f) => f.apply(mesh, field),
            LesFilter::Laplace(f) => f.apply(mesh, field),
            LesFilter::Simpson(f) => f.apply(mesh, field),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::ScalarField;
    use crate::mesh::CartesianMesh;

    fn mesh() -> CartesianMesh {
        CartesianMesh::builder()
            .cells(6, 6, 6)
            .periodic(true, false, true)
            .build()
            .unwrap()
    }

    #[test]
    fn test_select_by_name() {
        let mesh = mesh();
        for name in FILTER_TYPES {
            let filter = LesFilter::from_coeffs(&mesh, &FilterCoeffs::named(*name)).unwrap();
            assert_eq!(filter.name(), *name);
        }
    }

    #[test]
    fn test_unknown_name_rejected() {
        let mesh = mesh();
        let err = LesFilter::from_coeffs(&mesh, &FilterCoeffs::named("tophat")).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownType { .. }));
    }

    #[test]
    fn test_laplace_width_checked() {
        let mesh = mesh();
        let coeffs = FilterCoeffs { width_coeff: 0.0, ..FilterCoeffs::named("laplace") };
        assert!(LesFilter::from_coeffs(&mesh, &coeffs).is_err());
    }

    #[test]
    fn test_all_filters_preserve_uniform_field() {
        let mesh = mesh();
        let phi = ScalarField::uniform("phi", &mesh, 2.5);
        for name in FILTER_TYPES {
            let filter = LesFilter::from_coeffs(&mesh, &FilterCoeffs::named(*name)).unwrap();
            let out = filter.apply(&mesh, &phi).unwrap();
            assert!(out.internal().iter().all(|&v| (v - 2.5).abs() < 1e-13), "{name}");
            assert_eq!(out.boundary(), phi.boundary());
            assert_eq!(out.conditions(), phi.conditions());
        }
    }
}
