// crates/les_physics/src/turbulence/diagnostics.rs

//! 动态系数诊断
//!
//! 每次修正后模型可以把 cD、cI、ν_sgs、k 的 min/max/mean 汇总交给
//! [`CoefficientReporter`]。是否汇报由 `DiagnosticsLevel` 控制。

use std::fmt::Debug;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;

use crate::fields::FieldStats;

/// 单次修正的系数汇总
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CoefficientSummary {
    /// 修正序号（构建时的首次估计为 0）
    pub step: u64,
    /// cD 统计
    pub c_d: StatsRecord,
    /// cI 统计
    pub c_i: StatsRecord,
    /// ν_sgs 统计
    pub nu_sgs: StatsRecord,
    /// k 统计
    pub k: StatsRecord,
}

/// 可序列化的统计量
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct StatsRecord {
    /// 最小值
    pub min: f64,
    /// 最大值
    pub max: f64,
    /// 平均值
    pub mean: f64,
}

impl From<FieldStats> for StatsRecord {
    fn from(s: FieldStats) -> Self {
        Self { min: s.min, max: s.max, mean: s.mean }
    }
}

/// 系数汇报接口
pub trait CoefficientReporter: Send + Sync + Debug {
    /// 汇报一次汇总
    fn report(&self, model: &'static str, summary: &CoefficientSummary);
}

/// 通过 tracing 输出
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl CoefficientReporter for TracingReporter {
    fn report(&self, model: &'static str, s: &CoefficientSummary) {
        tracing::info!(
            model,
            step = s.step,
            c_d.min = s.c_d.min,
            c_d.max = s.c_d.max,
            c_d.mean = s.c_d.mean,
            c_i.min = s.c_i.min,
            c_i.max = s.c_i.max,
            c_i.mean = s.c_i.mean,
            nu_sgs.min = s.nu_sgs.min,
            nu_sgs.max = s.nu_sgs.max,
            k.max = s.k.max,
            "动态系数汇总"
        );
    }
}

/// 在内存中收集汇总，可跨线程共享
#[derive(Debug, Clone, Default)]
pub struct SummaryRecorder {
    records: Arc<Mutex<Vec<CoefficientSummary>>>,
}

impl SummaryRecorder {
    /// 创建空记录器
    pub fn new() -> Self {
        Self::default()
    }

    /// 已收集的汇总
    pub fn records(&self) -> Vec<CoefficientSummary> {
        self.records.lock().clone()
    }

    /// 最近一次汇总
    pub fn last(&self) -> Option<CoefficientSummary> {
        self.records.lock().last().copied()
    }

    /// 汇总条数
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

impl CoefficientReporter for SummaryRecorder {
    fn report(&self, _model: &'static str, summary: &CoefficientSummary) {
        self.records.lock().push(*summary);
    }
}
