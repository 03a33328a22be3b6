// crates/les_foundation/src/lib.rs

//! 基础层
//!
//! 提供整个工作空间共享的底层抽象。
//!
//! # 模块概览
//!
//! - [`tensor`]: 张量代数原语与场值抽象 [`FieldValue`]
//! - [`float`]: 数值常量（VSMALL、三分之一等）
//! - [`error`]: 基础错误类型
//!
//! # 示例
//!
//! ```
//! use les_foundation::{SymmTensor, Tensor};
//!
//! let grad = Tensor { yx: 1.0, ..Tensor::ZERO };
//! let s = grad.symm().dev();
//! assert!(s.tr().abs() < 1e-15);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod float;
pub mod tensor;

// 重导出常用类型
pub use error::{ensure_len, LesError, LesResult};
pub use float::VSMALL;
pub use glam::DVec3;
pub use tensor::{FieldValue, SymmTensor, Tensor};
