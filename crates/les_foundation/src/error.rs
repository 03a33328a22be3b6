// crates/les_foundation/src/error.rs

//! 错误处理模块，定义基础层统一错误类型
//!
//! 提供 `LesError` 枚举和 `LesResult` 类型别名。
//!
//! 基础层只描述"输入不合法"一类的错误：场长度与网格不符、网格拓扑
//! 不一致等。配置相关错误在 `les_config` 中定义，模型层再将两者合并。
//!
//! # 示例
//!
//! ```
//! use les_foundation::error::{LesError, LesResult};
//!
//! fn check(n: usize) -> LesResult<()> {
//!     if n == 0 {
//!         return Err(LesError::invalid_mesh("网格没有单元"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check(0).is_err());
//! ```

use thiserror::Error;

/// 统一结果类型
pub type LesResult<T> = Result<T, LesError>;

/// 基础层错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LesError {
    /// 数组大小不匹配
    #[error("数组大小不匹配: {name} 期望{expected}, 实际{actual}")]
    SizeMismatch {
        /// 数据名称
        name: &'static str,
        /// 期望大小
        expected: usize,
        /// 实际大小
        actual: usize,
    },

    /// 无效网格
    #[error("无效的网格: {message}")]
    InvalidMesh {
        /// 具体错误信息
        message: String,
    },
}

impl LesError {
    /// 数组大小不匹配
    pub fn size_mismatch(name: &'static str, expected: usize, actual: usize) -> Self {
        Self::SizeMismatch {
            name,
            expected,
            actual,
        }
    }

    /// 无效网格
    pub fn invalid_mesh(message: impl Into<String>) -> Self {
        Self::InvalidMesh {
            message: message.into(),
        }
    }
}

/// 检查长度，不符时返回 [`LesError::SizeMismatch`]
#[inline]
pub fn ensure_len(name: &'static str, expected: usize, actual: usize) -> LesResult<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(LesError::size_mismatch(name, expected, actual))
    }
}
