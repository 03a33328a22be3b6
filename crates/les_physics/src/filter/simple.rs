// crates/les_physics/src/filter/simple.rs

//! 盒式滤波：相邻面值的面积加权平均

use les_foundation::{FieldValue, LesResult};

use super::{with_unfiltered_boundary, TestFilter};
use crate::fields::VolField;
use crate::fvc;
use crate::mesh::MeshTopology;

/// 盒式滤波器（`simple`）
///
/// 在均匀网格上等价于宽度为 2Δ 的 top-hat 滤波。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimpleFilter;

impl TestFilter for SimpleFilter {
    fn name(&self) -> &'static str {
        "simple"
    }

    fn apply<T: FieldValue>(
        &self,
        mesh: &dyn MeshTopology,
        field: &VolField<T>,
    ) -> LesResult<VolField<T>> {
        let averaged = fvc::average(mesh, field)?;
        with_unfiltered_boundary(mesh, field, averaged.internal().to_vec())
    }
}
