// crates/les_physics/src/mesh/mod.rs

//! 网格抽象层
//!
//! 有限体积算子通过 [`MeshTopology`] 访问网格；[`CartesianMesh`] 是
//! 内置的均匀结构化实现。

pub mod cartesian;
pub mod topology;

pub use cartesian::{CartesianMesh, CartesianMeshBuilder};
pub use topology::{CellFace, FaceSide, MeshTopology, Patch};
