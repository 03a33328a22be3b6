// crates/les_foundation/src/float.rs

//! 数值常量
//!
//! 与有限体积代码中常见的 VSMALL 约定保持一致。

/// 极小正数，用作分母下限
///
/// 取 f64 可表示的最小正规数，不会对正常量级的系数引入偏差。
pub const VSMALL: f64 = f64::MIN_POSITIVE;

/// 三分之一
pub const ONE_THIRD: f64 = 1.0 / 3.0;

/// 三分之二
pub const TWO_THIRDS: f64 = 2.0 / 3.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vsmall_is_positive() {
        assert!(VSMALL > 0.0);
        assert!(VSMALL < 1.0e-300);
        assert!((1.0 / VSMALL).is_finite());
    }
}
