// crates/les_foundation/src/tensor.rs

//! 张量代数原语
//!
//! 提供三维二阶张量 [`Tensor`] 与对称张量 [`SymmTensor`]，矢量直接使用
//! `glam::DVec3`。分量布局与运算约定：
//!
//! ```text
//! T = ┌ xx xy xz ┐      grad(U)_ij = ∂U_j/∂x_i
//!     │ yx yy yz │
//!     └ zx zy zz ┘
//!
//! symm(T)  = (T + Tᵀ)/2
//! dev(T)   = T - tr(T)/3 · I
//! A && B   = A_ij B_ij          (双点积)
//! |A|²     = A && A
//! sqr(u)   = u ⊗ u              (对称外积)
//! ```
//!
//! 对称张量只存 6 个分量，双点积与模平方中的非对角项按 2 倍计入，
//! 与完整 9 分量张量的结果一致。
//!
//! [`FieldValue`] 抽象了可以放进场里的值类型（标量、矢量、张量），
//! 场运算、插值与滤波对这些秩统一实现。

use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

use crate::float::ONE_THIRD;

// ============================================================
// 对称张量
// ============================================================

/// 三维对称二阶张量
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SymmTensor {
    /// xx 分量
    pub xx: f64,
    /// xy = yx 分量
    pub xy: f64,
    /// xz = zx 分量
    pub xz: f64,
    /// yy 分量
    pub yy: f64,
    /// yz = zy 分量
    pub yz: f64,
    /// zz 分量
    pub zz: f64,
}

impl SymmTensor {
    /// 零张量
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0);

    /// 单位张量
    pub const I: Self = Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 1.0);

    /// 按 (xx, xy, xz, yy, yz, zz) 顺序创建
    #[inline]
    pub const fn new(xx: f64, xy: f64, xz: f64, yy: f64, yz: f64, zz: f64) -> Self {
        Self { xx, xy, xz, yy, yz, zz }
    }

    /// 各向同性张量 s·I
    #[inline]
    pub const fn spherical(s: f64) -> Self {
        Self::new(s, 0.0, 0.0, s, 0.0, s)
    }

    /// 迹
    #[inline]
    pub fn tr(&self) -> f64 {
        self.xx + self.yy + self.zz
    }

    /// 偏斜部分 dev(A) = A - tr(A)/3·I
    #[inline]
    pub fn dev(&self) -> Self {
        let p = ONE_THIRD * self.tr();
        Self::new(self.xx - p, self.xy, self.xz, self.yy - p, self.yz, self.zz - p)
    }

    /// 双点积 A && B
    #[inline]
    pub fn double_dot(&self, other: &Self) -> f64 {
        self.xx * other.xx
            + self.yy * other.yy
            + self.zz * other.zz
            + 2.0 * (self.xy * other.xy + self.xz * other.xz + self.yz * other.yz)
    }

    /// 模平方 |A|² = A && A
    #[inline]
    pub fn mag_sqr(&self) -> f64 {
        self.double_dot(self)
    }

    /// 模 |A|
    #[inline]
    pub fn mag(&self) -> f64 {
        self.mag_sqr().sqrt()
    }

    /// 对称外积 u ⊗ u
    #[inline]
    pub fn sqr(u: DVec3) -> Self {
        Self::new(u.x * u.x, u.x * u.y, u.x * u.z, u.y * u.y, u.y * u.z, u.z * u.z)
    }

    /// 展开为完整张量
    #[inline]
    pub fn to_tensor(&self) -> Tensor {
        Tensor::new(
            self.xx, self.xy, self.xz, self.xy, self.yy, self.yz, self.xz, self.yz, self.zz,
        )
    }
}

impl Add for SymmTensor {
    type Output = Self;
    #[inline]
    fn add(self, o: Self) -> Self {
        Self::new(
            self.xx + o.xx,
            self.xy + o.xy,
            self.xz + o.xz,
            self.yy + o.yy,
            self.yz + o.yz,
            self.zz + o.zz,
        )
    }
}

impl AddAssign for SymmTensor {
    #[inline]
    fn add_assign(&mut self, o: Self) {
        *self = *self + o;
    }
}

impl Sub for SymmTensor {
    type Output = Self;
    #[inline]
    fn sub(self, o: Self) -> Self {
        Self::new(
            self.xx - o.xx,
            self.xy - o.xy,
            self.xz - o.xz,
            self.yy - o.yy,
            self.yz - o.yz,
            self.zz - o.zz,
        )
    }
}

impl Neg for SymmTensor {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        self * -1.0
    }
}

impl Mul<f64> for SymmTensor {
    type Output = Self;
    #[inline]
    fn mul(self, s: f64) -> Self {
        Self::new(
            self.xx * s,
            self.xy * s,
            self.xz * s,
            self.yy * s,
            self.yz * s,
            self.zz * s,
        )
    }
}

impl Mul<SymmTensor> for f64 {
    type Output = SymmTensor;
    #[inline]
    fn mul(self, t: SymmTensor) -> SymmTensor {
        t * self
    }
}

impl Div<f64> for SymmTensor {
    type Output = Self;
    #[inline]
    fn div(self, s: f64) -> Self {
        self * (1.0 / s)
    }
}

// ============================================================
// 一般二阶张量
// ============================================================

/// 三维二阶张量（行主序）
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Tensor {
    /// xx
    pub xx: f64,
    /// xy
    pub xy: f64,
    /// xz
    pub xz: f64,
    /// yx
    pub yx: f64,
    /// yy
    pub yy: f64,
    /// yz
    pub yz: f64,
    /// zx
    pub zx: f64,
    /// zy
    pub zy: f64,
    /// zz
    pub zz: f64,
}

impl Tensor {
    /// 零张量
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0);

    /// 单位张量
    pub const I: Self = Self::new(1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0);

    /// 按行主序创建
    #[allow(clippy::too_many_arguments)]
    #[inline]
    pub const fn new(
        xx: f64,
        xy: f64,
        xz: f64,
        yx: f64,
        yy: f64,
        yz: f64,
        zx: f64,
        zy: f64,
        zz: f64,
    ) -> Self {
        Self { xx, xy, xz, yx, yy, yz, zx, zy, zz }
    }

    /// 外积 a ⊗ b，(a ⊗ b)_ij = a_i b_j
    #[inline]
    pub fn outer(a: DVec3, b: DVec3) -> Self {
        Self::new(
            a.x * b.x,
            a.x * b.y,
            a.x * b.z,
            a.y * b.x,
            a.y * b.y,
            a.y * b.z,
            a.z * b.x,
            a.z * b.y,
            a.z * b.z,
        )
    }

    /// 转置
    #[inline]
    pub fn transpose(&self) -> Self {
        Self::new(
            self.xx, self.yx, self.zx, self.xy, self.yy, self.zy, self.xz, self.yz, self.zz,
        )
    }

    /// 迹
    #[inline]
    pub fn tr(&self) -> f64 {
        self.xx + self.yy + self.zz
    }

    /// 对称部分 symm(T) = (T + Tᵀ)/2
    #[inline]
    pub fn symm(&self) -> SymmTensor {
        SymmTensor::new(
            self.xx,
            0.5 * (self.xy + self.yx),
            0.5 * (self.xz + self.zx),
            self.yy,
            0.5 * (self.yz + self.zy),
            self.zz,
        )
    }

    /// 偏斜部分 dev(T) = T - tr(T)/3·I
    #[inline]
    pub fn dev(&self) -> Self {
        let p = ONE_THIRD * self.tr();
        Self { xx: self.xx - p, yy: self.yy - p, zz: self.zz - p, ..*self }
    }

    /// 双点积 A && B
    #[inline]
    pub fn double_dot(&self, o: &Self) -> f64 {
        self.xx * o.xx
            + self.xy * o.xy
            + self.xz * o.xz
            + self.yx * o.yx
            + self.yy * o.yy
            + self.yz * o.yz
            + self.zx * o.zx
            + self.zy * o.zy
            + self.zz * o.zz
    }

    /// 模平方
    #[inline]
    pub fn mag_sqr(&self) -> f64 {
        self.double_dot(self)
    }
}

impl Add for Tensor {
    type Output = Self;
    #[inline]
    fn add(self, o: Self) -> Self {
        Self::new(
            self.xx + o.xx,
            self.xy + o.xy,
            self.xz + o.xz,
            self.yx + o.yx,
            self.yy + o.yy,
            self.yz + o.yz,
            self.zx + o.zx,
            self.zy + o.zy,
            self.zz + o.zz,
        )
    }
}

impl AddAssign for Tensor {
    #[inline]
    fn add_assign(&mut self, o: Self) {
        *self = *self + o;
    }
}

impl Sub for Tensor {
    type Output = Self;
    #[inline]
    fn sub(self, o: Self) -> Self {
        self + o * -1.0
    }
}

impl Mul<f64> for Tensor {
    type Output = Self;
    #[inline]
    fn mul(self, s: f64) -> Self {
        Self::new(
            self.xx * s,
            self.xy * s,
            self.xz * s,
            self.yx * s,
            self.yy * s,
            self.yz * s,
            self.zx * s,
            self.zy * s,
            self.zz * s,
        )
    }
}

impl Div<f64> for Tensor {
    type Output = Self;
    #[inline]
    fn div(self, s: f64) -> Self {
        self * (1.0 / s)
    }
}

// ============================================================
// 场值抽象
// ============================================================

/// 可存放于场中的值类型
///
/// 标量、矢量、对称张量和一般张量都实现此 trait，插值、面平均、
/// 滤波等线性运算只依赖加减与数乘。
pub trait FieldValue:
    Copy
    + Send
    + Sync
    + Debug
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<f64, Output = Self>
    + 'static
{
    /// 零值
    const ZERO: Self;

    /// 秩的名称，用于日志
    const RANK: &'static str;

    /// 模平方
    fn mag_sqr(&self) -> f64;

    /// 模
    #[inline]
    fn mag(&self) -> f64 {
        self.mag_sqr().sqrt()
    }

    /// 所有分量是否有限
    fn all_finite(&self) -> bool;
}

impl FieldValue for f64 {
    const ZERO: Self = 0.0;
    const RANK: &'static str = "scalar";

    #[inline]
    fn mag_sqr(&self) -> f64 {
        self * self
    }

    #[inline]
    fn mag(&self) -> f64 {
        self.abs()
    }

    #[inline]
    fn all_finite(&self) -> bool {
        self.is_finite()
    }
}

impl FieldValue for DVec3 {
    const ZERO: Self = DVec3::ZERO;
    const RANK: &'static str = "vector";

    #[inline]
    fn mag_sqr(&self) -> f64 {
        self.length_squared()
    }

    #[inline]
    fn all_finite(&self) -> bool {
        self.is_finite()
    }
}

impl FieldValue for SymmTensor {
    const ZERO: Self = SymmTensor::ZERO;
    const RANK: &'static str = "symmTensor";

    #[inline]
    fn mag_sqr(&self) -> f64 {
        SymmTensor::mag_sqr(self)
    }

    #[inline]
    fn all_finite(&self) -> bool {
        [self.xx, self.xy, self.xz, self.yy, self.yz, self.zz]
            .iter()
            .all(|c| c.is_finite())
    }
}

impl FieldValue for Tensor {
    const ZERO: Self = Tensor::ZERO;
    const RANK: &'static str = "tensor";

    #[inline]
    fn mag_sqr(&self) -> f64 {
        Tensor::mag_sqr(self)
    }

    #[inline]
    fn all_finite(&self) -> bool {
        [
            self.xx, self.xy, self.xz, self.yx, self.yy, self.yz, self.zx, self.zy, self.zz,
        ]
        .iter()
        .all(|c| c.is_finite())
    }
}
