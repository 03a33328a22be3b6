// crates/les_physics/src/fvc/average.rs

//! 面平均
//!
//! ```text
//! average(φ)_P = Σ_f |S_f| φ_f / Σ_f |S_f|
//! ```
//!
//! φ_f 为线性插值的面值。结果的边界值等于输入场的边界值（即边界面值）。
//! 动态系数估计中分子、分母分别做面平均以抑制网格尺度噪声。

use les_foundation::{FieldValue, LesResult};

use super::interpolate::face_value;
use crate::fields::{collect_cells, PatchCondition, VolField};
use crate::mesh::MeshTopology;

/// 单元所有面上 |Sf|·φ_f 之和与 |Sf| 之和
#[inline]
fn weighted_face_sum<T: FieldValue>(
    mesh: &dyn MeshTopology,
    field: &VolField<T>,
    cell: usize,
) -> (T, f64) {
    mesh.cell_faces(cell)
        .iter()
        .fold((T::ZERO, 0.0), |(sum, area), cf| {
            let mag_sf = mesh.face_area(cf.face);
            (sum + face_value(mesh, field, cf.face) * mag_sf, area + mag_sf)
        })
}

/// 面平均
pub fn average<T: FieldValue>(mesh: &dyn MeshTopology, field: &VolField<T>) -> LesResult<VolField<T>> {
    field.check(mesh)?;
    let internal = collect_cells(mesh.n_cells(), |c| {
        let (sum, area) = weighted_face_sum(mesh, field, c);
        if area > 0.0 {
            sum * (1.0 / area)
        } else {
            field.value(c)
        }
    });

    VolField::from_parts(
        format!("average({})", field.name()),
        mesh,
        internal,
        field.boundary().to_vec(),
        vec![PatchCondition::Calculated; mesh.patches().len()],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::ScalarField;
    use crate::mesh::CartesianMesh;

    fn mesh() -> CartesianMesh {
        CartesianMesh::builder()
            .cells(4, 4, 4)
            .lengths(1.0, 1.0, 1.0)
            .periodic(true, false, true)
            .build()
            .unwrap()
    }

    #[test]
    fn test_average_preserves_uniform_field() {
        let mesh = mesh();
        let phi = ScalarField::uniform("phi", &mesh, 3.5);
        let avg = average(&mesh, &phi).unwrap();
        assert!(avg.internal().iter().all(|&v| (v - 3.5).abs() < 1e-14));
    }

    #[test]
    fn test_average_preserves_linear_field() {
        let mesh = mesh();
        let phi = ScalarField::from_fn("phi", &mesh, |x| 2.0 * x.y + 1.0);
        let avg = average(&mesh, &phi).unwrap();
        for (a, p) in avg.internal().iter().zip(phi.internal()) {
            assert!((a - p).abs() < 1e-12);
        }
        assert_eq!(avg.boundary(), phi.boundary());
    }

    #[test]
    fn test_average_smooths_spike() {
        let mesh = mesh();
        let mut values = vec![0.0; mesh.n_cells()];
        let spike = mesh.cell_index(1, 1, 1);
        values[spike] = 12.0;
        let phi = ScalarField::from_cells("phi", &mesh, values).unwrap();
        let avg = average(&mesh, &phi).unwrap();

        // 6 个面各取 (12 + 0)/2，平均后为 6
        assert!((avg.value(spike) - 6.0).abs() < 1e-12);
        // 相邻单元得到 1/12 的份额
        assert!((avg.value(mesh.cell_index(2, 1, 1)) - 1.0).abs() < 1e-12);
        // 总量守恒（均匀网格、远离边界）
        let total: f64 = avg.internal().iter().sum();
        assert!((total - 12.0).abs() < 1e-10);
    }
}
