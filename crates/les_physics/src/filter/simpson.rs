// crates/les_physics/src/filter/simpson.rs

//! Simpson 滤波
//!
//! 沿每个坐标方向依次使用 Simpson 权重：
//!
//! ```text
//! F_a(φ)_P = (φ_L + 4φ_P + φ_R) / 6
//! ```
//!
//! L、R 为该方向上的相邻单元；边界面一侧取边界值。非结构单元在同一
//! 方向上可能有多于两个面，此时以面积加权的邻值平均代替 (φ_L + φ_R)/2。

use les_foundation::{FieldValue, LesResult};

use super::{with_unfiltered_boundary, TestFilter};
use crate::fields::{collect_cells, VolField};
use crate::mesh::{FaceSide, MeshTopology};

/// Simpson 滤波器（`simpson`）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimpsonFilter;

impl SimpsonFilter {
    /// 沿单个方向的一次滤波
    fn sweep<T: FieldValue>(
        mesh: &dyn MeshTopology,
        field: &VolField<T>,
        values: &[T],
        axis: usize,
    ) -> Vec<T> {
        collect_cells(mesh.n_cells(), |c| {
            let (sum, area) = mesh
                .cell_faces(c)
                .iter()
                .filter(|cf| mesh.face_axis(cf.face) == axis)
                .fold((T::ZERO, 0.0), |(sum, area), cf| {
                    let f = cf.face;
                    let other = match (mesh.face_neighbor(f), cf.side) {
                        (Some(nb), FaceSide::Owner) => values[nb],
                        (Some(_), FaceSide::Neighbor) => values[mesh.face_owner(f)],
                        (None, _) => field.boundary_value(mesh, f),
                    };
                    let mag_sf = mesh.face_area(f);
                    (sum + other * mag_sf, area + mag_sf)
                });

            if area > 0.0 {
                (values[c] * 4.0 + sum * (2.0 / area)) * (1.0 / 6.0)
            } else {
                values[c]
            }
        })
    }
}

impl TestFilter for SimpsonFilter {
    fn name(&self) -> &'static str {
        "simpson"
    }

    fn apply<T: FieldValue>(
        &self,
        mesh: &dyn MeshTopology,
        field: &VolField<T>,
    ) -> LesResult<VolField<T>> {
        field.check(mesh)?;
        let mut values = field.internal().to_vec();
        for axis in 0..3 {
            values = Self::sweep(mesh, field, &values, axis);
        }
        with_unfiltered_boundary(mesh, field, values)
    }
}
