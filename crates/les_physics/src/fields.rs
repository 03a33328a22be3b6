// crates/les_physics/src/fields.rs

//! 体场（单元中心值 + 边界面值）
//!
//! [`VolField<T>`] 保存每个单元一个值，以及每个边界面一个值。边界值的
//! 更新方式由每个 patch 的 [`PatchCondition`] 决定：
//!
//! | 条件 | `correct_boundary_conditions` 行为 |
//! |------|-----------------------------------|
//! | `ZeroGradient` | 边界值取 owner 单元值 |
//! | `FixedValue` | 保持不变 |
//! | `Calculated` | 保持不变（由产生该场的运算给出） |
//!
//! 代数运算（[`VolField::map`]、[`VolField::zip_map`]）同时作用于单元值
//! 与边界值，结果的所有 patch 均为 `Calculated`。
//!
//! 单元数超过 [`PARALLEL_THRESHOLD`] 时逐单元运算使用 rayon 并行。

use glam::DVec3;
use les_foundation::{ensure_len, FieldValue, LesResult, SymmTensor, Tensor};
use rayon::prelude::*;

use crate::mesh::MeshTopology;

/// 并行阈值（单元数）
pub const PARALLEL_THRESHOLD: usize = 4096;

/// 逐单元求值，规模足够大时并行
pub(crate) fn collect_cells<U, F>(n: usize, f: F) -> Vec<U>
where
    U: Send,
    F: Fn(usize) -> U + Sync + Send,
{
    if n >= PARALLEL_THRESHOLD {
        (0..n).into_par_iter().map(f).collect()
    } else {
        (0..n).map(f).collect()
    }
}

fn map_slice<T, U, F>(values: &[T], f: &F) -> Vec<U>
where
    T: Copy + Sync,
    U: Send,
    F: Fn(T) -> U + Sync + Send,
{
    if values.len() >= PARALLEL_THRESHOLD {
        values.par_iter().map(|&v| f(v)).collect()
    } else {
        values.iter().map(|&v| f(v)).collect()
    }
}

fn zip_slice<T, U, V, F>(a: &[T], b: &[U], f: &F) -> Vec<V>
where
    T: Copy + Sync,
    U: Copy + Sync,
    V: Send,
    F: Fn(T, U) -> V + Sync + Send,
{
    if a.len() >= PARALLEL_THRESHOLD {
        a.par_iter().zip(b.par_iter()).map(|(&x, &y)| f(x, y)).collect()
    } else {
        a.iter().zip(b.iter()).map(|(&x, &y)| f(x, y)).collect()
    }
}

/// patch 边界条件
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PatchCondition {
    /// 零梯度：边界值等于相邻单元值
    ZeroGradient,
    /// 固定值
    FixedValue,
    /// 由运算给出
    #[default]
    Calculated,
}

/// 标量统计
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FieldStats {
    /// 最小值
    pub min: f64,
    /// 最大值
    pub max: f64,
    /// 算术平均
    pub mean: f64,
}

/// 体场
#[derive(Debug, Clone, PartialEq)]
pub struct VolField<T: FieldValue> {
    name: String,
    internal: Vec<T>,
    boundary: Vec<T>,
    conditions: Vec<PatchCondition>,
}

/// 标量场
pub type ScalarField = VolField<f64>;
/// 矢量场
pub type VectorField = VolField<DVec3>;
/// 对称张量场
pub type SymmTensorField = VolField<SymmTensor>;
/// 张量场
pub type TensorField = VolField<Tensor>;

impl<T: FieldValue> VolField<T> {
    /// 由各部分创建，检查长度
    pub fn from_parts(
        name: impl Into<String>,
        mesh: &dyn MeshTopology,
        internal: Vec<T>,
        boundary: Vec<T>,
        conditions: Vec<PatchCondition>,
    ) -> LesResult<Self> {
        let field = Self {
            name: name.into(),
            internal,
            boundary,
            conditions,
        };
        field.check(mesh)?;
        Ok(field)
    }

    /// 均匀场，所有 patch 为零梯度
    pub fn uniform(name: impl Into<String>, mesh: &dyn MeshTopology, value: T) -> Self {
        Self {
            name: name.into(),
            internal: vec![value; mesh.n_cells()],
            boundary: vec![value; mesh.n_boundary_faces()],
            conditions: vec![PatchCondition::ZeroGradient; mesh.patches().len()],
        }
    }

    /// 由单元值创建，所有 patch 为零梯度
    pub fn from_cells(
        name: impl Into<String>,
        mesh: &dyn MeshTopology,
        internal: Vec<T>,
    ) -> LesResult<Self> {
        ensure_len("internal", mesh.n_cells(), internal.len())?;
        let mut field = Self {
            name: name.into(),
            internal,
            boundary: vec![T::ZERO; mesh.n_boundary_faces()],
            conditions: vec![PatchCondition::ZeroGradient; mesh.patches().len()],
        };
        field.correct_boundary_conditions(mesh);
        Ok(field)
    }

    /// 在单元中心与边界面心处求解析函数，所有 patch 为固定值
    pub fn from_fn<F>(name: impl Into<String>, mesh: &dyn MeshTopology, f: F) -> Self
    where
        F: Fn(DVec3) -> T + Sync + Send,
    {
        let n_internal = mesh.n_internal_faces();
        Self {
            name: name.into(),
            internal: collect_cells(mesh.n_cells(), |c| f(mesh.cell_center(c))),
            boundary: (0..mesh.n_boundary_faces())
                .map(|b| f(mesh.face_center(n_internal + b)))
                .collect(),
            conditions: vec![PatchCondition::FixedValue; mesh.patches().len()],
        }
    }

    /// 场名
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 改名
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// 单元值
    pub fn internal(&self) -> &[T] {
        &self.internal
    }

    /// 单元值（可变）
    pub fn internal_mut(&mut self) -> &mut [T] {
        &mut self.internal
    }

    /// 边界面值
    pub fn boundary(&self) -> &[T] {
        &self.boundary
    }

    /// 边界面值（可变）
    pub fn boundary_mut(&mut self) -> &mut [T] {
        &mut self.boundary
    }

    /// 各 patch 条件
    pub fn conditions(&self) -> &[PatchCondition] {
        &self.conditions
    }

    /// 单元数
    pub fn len(&self) -> usize {
        self.internal.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.internal.is_empty()
    }

    /// 单元值
    #[inline]
    pub fn value(&self, cell: usize) -> T {
        self.internal[cell]
    }

    /// 设置单个 patch 的条件
    pub fn set_condition(&mut self, patch: usize, condition: PatchCondition) {
        if let Some(c) = self.conditions.get_mut(patch) {
            *c = condition;
        }
    }

    /// 设置固定值 patch 的值
    pub fn fix_patch(&mut self, mesh: &dyn MeshTopology, patch: usize, value: T) {
        let Some(p) = mesh.patches().get(patch) else {
            return;
        };
        let offset = mesh.n_internal_faces();
        for f in p.faces() {
            self.boundary[f - offset] = value;
        }
        self.set_condition(patch, PatchCondition::FixedValue);
    }

    /// 检查长度与网格一致
    pub fn check(&self, mesh: &dyn MeshTopology) -> LesResult<()> {
        ensure_len("internal", mesh.n_cells(), self.internal.len())?;
        ensure_len("boundary", mesh.n_boundary_faces(), self.boundary.len())?;
        ensure_len("conditions", mesh.patches().len(), self.conditions.len())
    }

    /// 面上的边界值
    #[inline]
    pub fn boundary_value(&self, mesh: &dyn MeshTopology, face: usize) -> T {
        self.boundary[face - mesh.n_internal_faces()]
    }

    /// 逐点变换（单元与边界）
    pub fn map<U, F>(&self, f: F) -> VolField<U>
    where
        U: FieldValue,
        F: Fn(T) -> U + Sync + Send,
    {
        VolField {
            name: self.name.clone(),
            internal: map_slice(&self.internal, &f),
            boundary: map_slice(&self.boundary, &f),
            conditions: vec![PatchCondition::Calculated; self.conditions.len()],
        }
    }

    /// 两场逐点组合（单元与边界）
    pub fn zip_map<U, V, F>(&self, other: &VolField<U>, f: F) -> LesResult<VolField<V>>
    where
        U: FieldValue,
        V: FieldValue,
        F: Fn(T, U) -> V + Sync + Send,
    {
        ensure_len(other.rank(), self.internal.len(), other.internal.len())?;
        ensure_len(other.rank(), self.boundary.len(), other.boundary.len())?;
        Ok(VolField {
            name: self.name.clone(),
            internal: zip_slice(&self.internal, &other.internal, &f),
            boundary: zip_slice(&self.boundary, &other.boundary, &f),
            conditions: vec![PatchCondition::Calculated; self.conditions.len()],
        })
    }

    /// 值类型的秩名称
    pub fn rank(&self) -> &'static str {
        T::RANK
    }

    /// 按 patch 条件更新边界值
    pub fn correct_boundary_conditions(&mut self, mesh: &dyn MeshTopology) {
        let offset = mesh.n_internal_faces();
        for (patch, condition) in mesh.patches().iter().zip(&self.conditions) {
            if *condition == PatchCondition::ZeroGradient {
                for f in patch.faces() {
                    self.boundary[f - offset] = self.internal[mesh.face_owner(f)];
                }
            }
        }
    }

    /// 用计算结果更新本场
    ///
    /// 单元值全部替换；固定值 patch 保留原边界值，其余 patch 取计算结果，
    /// 然后按本场的条件修正边界。
    pub fn assign(&mut self, mesh: &dyn MeshTopology, computed: VolField<T>) -> LesResult<()> {
        computed.check(mesh)?;
        let offset = mesh.n_internal_faces();
        self.internal = computed.internal;
        for (patch, condition) in mesh.patches().iter().zip(&self.conditions) {
            if *condition != PatchCondition::FixedValue {
                for f in patch.faces() {
                    self.boundary[f - offset] = computed.boundary[f - offset];
                }
            }
        }
        self.correct_boundary_conditions(mesh);
        Ok(())
    }

    /// 所有值是否有限
    pub fn all_finite(&self) -> bool {
        self.internal.iter().chain(&self.boundary).all(|v| v.all_finite())
    }
}

impl VolField<f64> {
    /// 与下限取大（单元与边界）
    pub fn max_with(&mut self, floor: f64) {
        for v in self.internal.iter_mut().chain(self.boundary.iter_mut()) {
            *v = v.max(floor);
        }
    }

    /// 单元值统计
    pub fn stats(&self) -> FieldStats {
        if self.internal.is_empty() {
            return FieldStats::default();
        }
        let (min, max, sum) = self.internal.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY, 0.0),
            |(lo, hi, s), &v| (lo.min(v), hi.max(v), s + v),
        );
        FieldStats {
            min,
            max,
            mean: sum / self.internal.len() as f64,
        }
    }
}
