// crates/les_physics/src/fvc/mod.rs

//! 显式有限体积算子
//!
//! - [`interpolate`]: 单元值到面值的插值
//! - [`grad`]: Green-Gauss 梯度
//! - [`average`]: 面积加权面平均
//! - [`laplacian`]: 显式 Laplace 算子
//!
//! 所有算子只读输入场，返回新场。

pub mod average;
pub mod gradient;
pub mod interpolate;
pub mod laplacian;

pub use average::average;
pub use gradient::{grad, GreenGaussGradient};
pub use interpolate::{face_value, interpolate, FaceInterpolation};
pub use laplacian::laplacian;
