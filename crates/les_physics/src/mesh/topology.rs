// crates/les_physics/src/mesh/topology.rs

//! 网格拓扑抽象
//!
//! 有限体积算子（插值、梯度、面平均、Laplace）只通过 [`MeshTopology`]
//! 访问网格，不关心网格的具体生成方式。
//!
//! # 面编号约定
//!
//! - `[0, n_internal_faces)`: 内部面（含周期面），具有 owner 与 neighbor
//! - `[n_internal_faces, n_faces)`: 边界面，按 patch 分组连续存放
//!
//! 面积矢量 `Sf` 由 owner 指向外侧（即指向 neighbor）。
//! 边界面在场中的存储下标为 `face - n_internal_faces`。

use glam::DVec3;
use std::fmt::Debug;

/// 面相对于单元的位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceSide {
    /// 单元是该面的 owner，Sf 指向外侧
    Owner,
    /// 单元是该面的 neighbor，Sf 指向内侧
    Neighbor,
}

impl FaceSide {
    /// 面积矢量相对于单元外法向的符号
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            FaceSide::Owner => 1.0,
            FaceSide::Neighbor => -1.0,
        }
    }
}

/// 单元-面连接
///
/// 周期方向只有一层单元时，同一个面会以 owner 和 neighbor 身份
/// 各出现一次，逐单元收集时两次贡献自然抵消或叠加。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellFace {
    /// 面索引
    pub face: usize,
    /// 单元所处的一侧
    pub side: FaceSide,
}

/// 边界 patch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    /// 名称
    pub name: String,
    /// 起始面索引（全局）
    pub start: usize,
    /// 面数
    pub size: usize,
}

impl Patch {
    /// 全局面索引范围
    #[inline]
    pub fn faces(&self) -> std::ops::Range<usize> {
        self.start..self.start + self.size
    }
}

/// 网格拓扑 trait
pub trait MeshTopology: Send + Sync + Debug {
    // ========== 基本信息 ==========

    /// 单元数量
    fn n_cells(&self) -> usize;

    /// 面数量
    fn n_faces(&self) -> usize;

    /// 内部面数量
    fn n_internal_faces(&self) -> usize;

    /// 边界面数量
    fn n_boundary_faces(&self) -> usize {
        self.n_faces() - self.n_internal_faces()
    }

    // ========== 几何数据 ==========

    /// 单元中心
    fn cell_center(&self, cell: usize) -> DVec3;

    /// 单元体积
    fn cell_volume(&self, cell: usize) -> f64;

    /// 单元在三个坐标方向上的尺度
    fn cell_extent(&self, cell: usize) -> DVec3;

    /// 面积矢量 Sf（owner 外法向 × 面积）
    fn face_area_vector(&self, face: usize) -> DVec3;

    /// 面积 |Sf|
    fn face_area(&self, face: usize) -> f64 {
        self.face_area_vector(face).length()
    }

    /// 面中心
    fn face_center(&self, face: usize) -> DVec3;

    /// 线性插值中 owner 的权重
    fn face_weight(&self, face: usize) -> f64;

    /// 1/|d|，d 为 owner 到 neighbor（边界面为 owner 到面心）的距离
    fn face_delta_coeff(&self, face: usize) -> f64;

    // ========== 拓扑数据 ==========

    /// 面的 owner 单元
    fn face_owner(&self, face: usize) -> usize;

    /// 面的 neighbor 单元（边界面返回 None）
    fn face_neighbor(&self, face: usize) -> Option<usize>;

    /// 单元的所有面
    fn cell_faces(&self, cell: usize) -> &[CellFace];

    // ========== 边界信息 ==========

    /// 边界 patch 列表
    fn patches(&self) -> &[Patch];

    /// 面的主方向（法向绝对值最大的坐标轴）
    fn face_axis(&self, face: usize) -> usize {
        let n = self.face_area_vector(face).abs();
        if n.x >= n.y && n.x >= n.z {
            0
        } else if n.y >= n.z {
            1
        } else {
            2
        }
    }
}
