// crates/les_physics/src/turbulence/strain.rs

//! 应变率 D = dev(symm(∇U))

use les_foundation::LesResult;

use crate::fields::{SymmTensorField, TensorField, VectorField};
use crate::fvc;
use crate::mesh::MeshTopology;

/// 由速度梯度计算应变率（对称、无迹）
pub fn strain_rate_from_gradient(
    mesh: &dyn MeshTopology,
    grad_u: &TensorField,
) -> LesResult<SymmTensorField> {
    grad_u.check(mesh)?;
    Ok(grad_u.map(|g| g.symm().dev()).named("D"))
}

/// 由速度场计算应变率
pub fn strain_rate(mesh: &dyn MeshTopology, u: &VectorField) -> LesResult<SymmTensorField> {
    let grad_u = fvc::grad(mesh, u)?;
    strain_rate_from_gradient(mesh, &grad_u)
}
