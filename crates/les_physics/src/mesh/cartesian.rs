// crates/les_physics/src/mesh/cartesian.rs

//! 均匀结构化六面体网格
//!
//! 在长方体 `[origin, origin + lengths]` 上生成 `nx × ny × nz` 个等尺寸单元。
//! 每个坐标方向可单独设为周期：周期方向不产生边界 patch，首尾两层单元
//! 通过内部面相连。非周期方向的两端各生成一个边界 patch，命名为
//! `xMin`/`xMax`/`yMin`/`yMax`/`zMin`/`zMax`。
//!
//! 单元编号 `c = i + nx·(j + ny·k)`。

use glam::DVec3;
use les_foundation::{LesError, LesResult};

use super::topology::{CellFace, FaceSide, MeshTopology, Patch};

const AXIS_NAMES: [&str; 3] = ["x", "y", "z"];

/// 单个面的几何与拓扑
#[derive(Debug, Clone, Copy)]
struct Face {
    owner: usize,
    neighbor: Option<usize>,
    sf: DVec3,
    center: DVec3,
    weight: f64,
    delta_coeff: f64,
}

/// 均匀笛卡尔网格
#[derive(Debug, Clone)]
pub struct CartesianMesh {
    n: [usize; 3],
    spacing: DVec3,
    origin: DVec3,
    periodic: [bool; 3],
    faces: Vec<Face>,
    n_internal_faces: usize,
    cell_faces: Vec<Vec<CellFace>>,
    patches: Vec<Patch>,
}

/// 笛卡尔网格构建器
#[derive(Debug, Clone)]
pub struct CartesianMeshBuilder {
    n: [usize; 3],
    lengths: DVec3,
    origin: DVec3,
    periodic: [bool; 3],
}

impl Default for CartesianMeshBuilder {
    fn default() -> Self {
        Self {
            n: [1, 1, 1],
            lengths: DVec3::ONE,
            origin: DVec3::ZERO,
            periodic: [false; 3],
        }
    }
}

impl CartesianMeshBuilder {
    /// 各方向单元数
    pub fn cells(mut self, nx: usize, ny: usize, nz: usize) -> Self {
        self.n = [nx, ny, nz];
        self
    }

    /// 计算域尺寸
    pub fn lengths(mut self, lx: f64, ly: f64, lz: f64) -> Self {
        self.lengths = DVec3::new(lx, ly, lz);
        self
    }

    /// 计算域原点
    pub fn origin(mut self, origin: DVec3) -> Self {
        self.origin = origin;
        self
    }

    /// 各方向是否周期
    pub fn periodic(mut self, x: bool, y: bool, z: bool) -> Self {
        self.periodic = [x, y, z];
        self
    }

    /// 生成网格
    pub fn build(self) -> LesResult<CartesianMesh> {
        CartesianMesh::new(self.n, self.lengths, self.origin, self.periodic)
    }
}

impl CartesianMesh {
    /// 创建构建器
    pub fn builder() -> CartesianMeshBuilder {
        CartesianMeshBuilder::default()
    }

    /// 生成网格
    pub fn new(n: [usize; 3], lengths: DVec3, origin: DVec3, periodic: [bool; 3]) -> LesResult<Self> {
        if n.iter().any(|&ni| ni == 0) {
            return Err(LesError::invalid_mesh(format!("单元数必须为正: {:?}", n)));
        }
        if !(lengths.is_finite() && lengths.min_element() > 0.0) {
            return Err(LesError::invalid_mesh(format!("计算域尺寸必须为正: {}", lengths)));
        }

        let spacing = lengths / DVec3::new(n[0] as f64, n[1] as f64, n[2] as f64);
        let mut mesh = Self {
            n,
            spacing,
            origin,
            periodic,
            faces: Vec::new(),
            n_internal_faces: 0,
            cell_faces: Vec::new(),
            patches: Vec::new(),
        };
        mesh.generate();
        Ok(mesh)
    }

    /// 各方向单元数
    pub fn dims(&self) -> [usize; 3] {
        self.n
    }

    /// 单元尺寸 (dx, dy, dz)
    pub fn spacing(&self) -> DVec3 {
        self.spacing
    }

    /// 周期标志
    pub fn periodicity(&self) -> [bool; 3] {
        self.periodic
    }

    /// (i, j, k) → 单元编号
    #[inline]
    pub fn cell_index(&self, i: usize, j: usize, k: usize) -> usize {
        i + self.n[0] * (j + self.n[1] * k)
    }

    /// 单元编号 → (i, j, k)
    #[inline]
    pub fn ijk(&self, cell: usize) -> [usize; 3] {
        let i = cell % self.n[0];
        let j = (cell / self.n[0]) % self.n[1];
        let k = cell / (self.n[0] * self.n[1]);
        [i, j, k]
    }

    /// 是否为非周期方向上的首层或末层单元
    pub fn is_near_boundary(&self, cell: usize, layers: usize) -> bool {
        let ijk = self.ijk(cell);
        (0..3).any(|a| {
            !self.periodic[a] && (ijk[a] < layers || ijk[a] + layers >= self.n[a])
        })
    }

    /// 按 patch 名查找
    pub fn patch_by_name(&self, name: &str) -> Option<&Patch> {
        self.patches.iter().find(|p| p.name == name)
    }

    fn unit(axis: usize) -> DVec3 {
        match axis {
            0 => DVec3::X,
            1 => DVec3::Y,
            _ => DVec3::Z,
        }
    }

    fn face_area_of_axis(&self, axis: usize) -> f64 {
        let h = self.spacing;
        match axis {
            0 => h.y * h.z,
            1 => h.x * h.z,
            _ => h.x * h.y,
        }
    }

    fn generate(&mut self) {
        let n_cells = self.n.iter().product();
        let mut faces = Vec::new();

        // 内部面（含周期面）
        for axis in 0..3 {
            let area = self.face_area_of_axis(axis);
            let e = Self::unit(axis);
            let h = self.spacing[axis];

            for cell in 0..n_cells {
                let ijk = self.ijk(cell);
                let mut next = ijk;
                if ijk[axis] + 1 < self.n[axis] {
                    next[axis] += 1;
                } else if self.periodic[axis] {
                    next[axis] = 0;
                } else {
                    continue;
                }

                faces.push(Face {
                    owner: cell,
                    neighbor: Some(self.cell_index(next[0], next[1], next[2])),
                    sf: e * area,
                    center: self.cell_center(cell) + e * (0.5 * h),
                    weight: 0.5,
                    delta_coeff: 1.0 / h,
                });
            }
        }
        let n_internal_faces = faces.len();

        // 边界面，按 patch 分组
        let mut patches = Vec::new();
        for axis in 0..3 {
            if self.periodic[axis] {
                continue;
            }
            let area = self.face_area_of_axis(axis);
            let e = Self::unit(axis);
            let h = self.spacing[axis];

            for (suffix, sign, layer) in [("Min", -1.0, 0), ("Max", 1.0, self.n[axis] - 1)] {
                let start = faces.len();
                for cell in 0..n_cells {
                    if self.ijk(cell)[axis] != layer {
                        continue;
                    }
                    faces.push(Face {
                        owner: cell,
                        neighbor: None,
                        sf: e * (sign * area),
                        center: self.cell_center(cell) + e * (sign * 0.5 * h),
                        weight: 1.0,
                        delta_coeff: 2.0 / h,
                    });
                }
                patches.push(Patch {
                    name: format!("{}{}", AXIS_NAMES[axis], suffix),
                    start,
                    size: faces.len() - start,
                });
            }
        }

        let mut cell_faces = vec![Vec::with_capacity(6); n_cells];
        for (f, face) in faces.iter().enumerate() {
            cell_faces[face.owner].push(CellFace { face: f, side: FaceSide::Owner });
            if let Some(nb) = face.neighbor {
                cell_faces[nb].push(CellFace { face: f, side: FaceSide::Neighbor });
            }
        }

        self.faces = faces;
        self.n_internal_faces = n_internal_faces;
        self.cell_faces = cell_faces;
        self.patches = patches;
    }
}

impl MeshTopology for CartesianMesh {
    fn n_cells(&self) -> usize {
        self.cell_faces.len()
    }

    fn n_faces(&self) -> usize {
        self.faces.len()
    }

    fn n_internal_faces(&self) -> usize {
        self.n_internal_faces
    }

    fn cell_center(&self, cell: usize) -> DVec3 {
        let [i, j, k] = self.ijk(cell);
        self.origin + (DVec3::new(i as f64, j as f64, k as f64) + 0.5) * self.spacing
    }

    fn cell_volume(&self, _cell: usize) -> f64 {
        self.spacing.x * self.spacing.y * self.spacing.z
    }

    fn cell_extent(&self, _cell: usize) -> DVec3 {
        self.spacing
    }

    fn face_area_vector(&self, face: usize) -> DVec3 {
        self.faces[face].sf
    }

    fn face_center(&self, face: usize) -> DVec3 {
        self.faces[face].center
    }

    fn face_weight(&self, face: usize) -> f64 {
        self.faces[face].weight
    }

    fn face_delta_coeff(&self, face: usize) -> f64 {
        self.faces[face].delta_coeff
    }

    fn face_owner(&self, face: usize) -> usize {
        self.faces[face].owner
    }

    fn face_neighbor(&self, face: usize) -> Option<usize> {
        self.faces[face].neighbor
    }

    fn cell_faces(&self, cell: usize) -> &[CellFace] {
        &self.cell_faces[cell]
    }

    fn patches(&self) -> &[Patch] {
        &self.patches
    }
}
