// crates/les_physics/src/fvc/gradient.rs

//! Green-Gauss 梯度计算
//!
//! 使用 Gauss 定理将体积分转化为面积分:
//! ```text
//! ∇U ≈ (1/V) ∮ dS ⊗ U  ≈  (1/V_P) Σ_f S_f ⊗ U_f
//! ```
//!
//! 结果张量 (∇U)_ij = ∂U_j/∂x_i。边界面上的值取相邻单元的梯度。

use les_foundation::{LesResult, Tensor};

use super::interpolate::FaceInterpolation;
use crate::fields::{collect_cells, TensorField, VectorField};
use crate::mesh::MeshTopology;

/// Green-Gauss 梯度计算器
#[derive(Debug, Clone, Copy, Default)]
pub struct GreenGaussGradient {
    interpolation: FaceInterpolation,
}

impl GreenGaussGradient {
    /// 创建新实例
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置面插值方法
    pub fn with_face_interpolation(mut self, method: FaceInterpolation) -> Self {
        self.interpolation = method;
        self
    }

    /// 单个单元的速度梯度
    fn cell_gradient(&self, cell: usize, u: &VectorField, mesh: &dyn MeshTopology) -> Tensor {
        let volume = mesh.cell_volume(cell);
        if volume < 1e-300 {
            return Tensor::ZERO;
        }

        let mut grad = Tensor::ZERO;
        for cf in mesh.cell_faces(cell) {
            // owner 侧 Sf 指向外侧，neighbor 取相反号
            let ds = mesh.face_area_vector(cf.face) * cf.side.sign();
            let u_face = self.interpolation.face_value(mesh, u, cf.face);
            grad += Tensor::outer(ds, u_face);
        }

        grad / volume
    }

    /// 计算矢量场梯度
    pub fn compute(&self, mesh: &dyn MeshTopology, u: &VectorField) -> LesResult<TensorField> {
        u.check(mesh)?;
        let cells = collect_cells(mesh.n_cells(), |c| self.cell_gradient(c, u, mesh));
        TensorField::from_cells(format!("grad({})", u.name()), mesh, cells)
    }
}

/// 矢量场梯度（线性插值 Green-Gauss）
pub fn grad(mesh: &dyn MeshTopology, u: &VectorField) -> LesResult<TensorField> {
    GreenGaussGradient::new().compute(mesh, u)
}
