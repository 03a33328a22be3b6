// crates/les_physics/src/turbulence/dynamic_smagorinsky.rs

//! 动态 Smagorinsky 亚格子模型
//!
//! 模型系数不取经验常数，而是每步由已解析速度场通过测试滤波（Germano
//! 恒等式）局部重新估计。记测试滤波为 F，应变率 D = dev(symm(∇U))：
//!
//! ```text
//! LL = dev(F(U⊗U) - F(U)⊗F(U))
//! MM = Δ²·(F(|D|·D) - 4·|F(D)|·F(D))
//! cD = 0.5·avg(LL:MM) / max(avg(|MM|²), VSMALL)
//!
//! KK = 0.5·(F(|U|²) - |F(U)|²)
//! mm = Δ²·(4·|F(D)|² - F(|D|²))
//! cI = avg(KK·mm) / max(avg(mm²), VSMALL)
//!
//! k     = max(cI·Δ²·|D|², kMin)
//! ν_sgs = max(cD·Δ²·|D|, -ν)
//! ```
//!
//! avg 为面平均。分子、分母先分别平均再相除；分母取下限只为避免除零。
//! cD、cI 本身不做截断，唯一的物理下限施加在 ν_sgs 上，使 ν + ν_sgs
//! 非负，同时保留有限的反向散射。该截断不输出任何日志。
//!
//! 系数没有时间记忆：每次修正都从当前速度场完整重算。
//!
//! # 加权（Favre）形式
//!
//! 给定密度或相分数 w 时，F̃(φ) = F(w·φ)/F(w)：
//!
//! ```text
//! LL = dev(F(w·U⊗U) - F(w)·F̃(U)⊗F̃(U))
//! MM = Δ²·(F(w·|D|·D) - 4·F(w)·|F̃(D)|·F̃(D))
//! KK = 0.5·(F(w·|U|²) - F(w)·|F̃(U)|²)
//! mm = Δ²·(4·F(w)·|F̃(D)|² - F(w·|D|²))
//! ```
//!
//! w ≡ 1 时与上面的形式一致；无权重时不会构造单位权重场。
//!
//! # 使用示例
//!
//! ```
//! use std::sync::Arc;
//! use glam::DVec3;
//! use les_physics::fields::VectorField;
//! use les_physics::mesh::CartesianMesh;
//! use les_physics::turbulence::DynamicSmagorinsky;
//!
//! let mesh = Arc::new(
//!     CartesianMesh::builder()
//!         .cells(8, 8, 8)
//!         .periodic(true, false, true)
//!         .build()
//!         .unwrap(),
//! );
//! let u = VectorField::from_fn("U", mesh.as_ref(), |x| DVec3::new(x.y, 0.0, 0.0));
//!
//! let mut model = DynamicSmagorinsky::builder(mesh.clone())
//!     .nu(1.0e-5)
//!     .build(&u)
//!     .unwrap();
//! model.correct(&u).unwrap();
//! assert!(model.nu_sgs().internal().iter().all(|&v| v >= -1.0e-5));
//! ```

use std::sync::Arc;

use les_config::{DiagnosticsLevel, LesModelConfig};
use les_foundation::{FieldValue, LesResult, SymmTensor, VSMALL};

use super::diagnostics::{CoefficientReporter, CoefficientSummary, TracingReporter};
use super::error::ModelError;
use super::strain::{strain_rate, strain_rate_from_gradient};
use super::traits::{EddyViscosityModel, MolecularViscosity};
use crate::delta::LesDelta;
use crate::fields::{ScalarField, SymmTensorField, TensorField, VectorField, VolField};
use crate::filter::{LesFilter, TestFilter};
use crate::fvc;
use crate::mesh::MeshTopology;

const MODEL_NAME: &str = "dynamicSmagorinsky";

// ============================================================
// 系数估计
// ============================================================

/// Favre 加权
struct Weighting<'a> {
    w: &'a ScalarField,
    /// F(w)，已取 VSMALL 下限
    fw: ScalarField,
}

/// 一次估计得到的动态系数
#[derive(Debug, Clone)]
pub struct DynamicCoefficients {
    /// Smagorinsky 型系数
    pub c_d: ScalarField,
    /// 各向同性系数
    pub c_i: ScalarField,
}

/// Germano 恒等式最小二乘估计器
pub struct GermanoEstimator<'a> {
    mesh: &'a dyn MeshTopology,
    filter: &'a LesFilter,
    delta: &'a ScalarField,
    weighting: Option<Weighting<'a>>,
}

impl<'a> GermanoEstimator<'a> {
    /// 创建无权重估计器
    pub fn new(mesh: &'a dyn MeshTopology, filter: &'a LesFilter, delta: &'a ScalarField) -> Self {
        Self { mesh, filter, delta, weighting: None }
    }

    /// 使用密度或相分数加权
    pub fn weighted(mut self, w: &'a ScalarField) -> LesResult<Self> {
        w.check(self.mesh)?;
        let mut fw = self.filter.apply(self.mesh, w)?;
        fw.max_with(VSMALL);
        self.weighting = Some(Weighting { w, fw });
        Ok(self)
    }

    /// F(w·φ)，无权重时为 F(φ)
    fn filter_weighted<T: FieldValue>(&self, field: &VolField<T>) -> LesResult<VolField<T>> {
        match &self.weighting {
            None => self.filter.apply(self.mesh, field),
            Some(wt) => self
                .filter
                .apply(self.mesh, &field.zip_map(wt.w, |v, w| v * w)?),
        }
    }

    /// F̃(φ) = F(w·φ)/F(w)
    fn favre<T: FieldValue>(&self, field: &VolField<T>) -> LesResult<VolField<T>> {
        let filtered = self.filter_weighted(field)?;
        match &self.weighting {
            None => Ok(filtered),
            Some(wt) => filtered.zip_map(&wt.fw, |v, fw| v * (1.0 / fw)),
        }
    }

    /// 乘以 F(w)
    fn times_fw<T: FieldValue>(&self, field: VolField<T>) -> LesResult<VolField<T>> {
        match &self.weighting {
            None => Ok(field),
            Some(wt) => field.zip_map(&wt.fw, |v, fw| v * fw),
        }
    }

    /// 乘以 Δ²
    fn times_delta_sqr<T: FieldValue>(&self, field: VolField<T>) -> LesResult<VolField<T>> {
        field.zip_map(self.delta, |v, d| v * (d * d))
    }

    /// avg(num) / max(avg(den), VSMALL)
    fn averaged_ratio(&self, num: &ScalarField, den: &ScalarField) -> LesResult<ScalarField> {
        let num = fvc::average(self.mesh, num)?;
        let mut den = fvc::average(self.mesh, den)?;
        den.max_with(VSMALL);
        num.zip_map(&den, |n, d| n / d)
    }

    fn c_d_from(
        &self,
        u: &VectorField,
        d: &SymmTensorField,
        u_tilde: &VectorField,
        d_tilde: &SymmTensorField,
    ) -> LesResult<ScalarField> {
        let uu = self.filter_weighted(&u.map(SymmTensor::sqr))?;
        let resolved = self.times_fw(u_tilde.map(SymmTensor::sqr))?;
        let ll = uu.zip_map(&resolved, |a, b| (a - b).dev())?;

        let mag_d_d = self.filter_weighted(&d.map(|s| s * s.mag()))?;
        let test = self.times_fw(d_tilde.map(|s| s * (4.0 * s.mag())))?;
        let mm = self.times_delta_sqr(mag_d_d.zip_map(&test, |a, b| a - b)?)?;

        let ll_mm = ll.zip_map(&mm, |l, m| l.double_dot(&m))?;
        let mm_mm = mm.map(|m| m.mag_sqr());
        Ok(self
            .averaged_ratio(&ll_mm, &mm_mm)?
            .map(|c| 0.5 * c)
            .named("cD"))
    }

    fn c_i_from(
        &self,
        u: &VectorField,
        d: &SymmTensorField,
        u_tilde: &VectorField,
        d_tilde: &SymmTensorField,
    ) -> LesResult<ScalarField> {
        let uu = self.filter_weighted(&u.map(|v| v.length_squared()))?;
        let resolved = self.times_fw(u_tilde.map(|v| v.length_squared()))?;
        let kk = uu.zip_map(&resolved, |a, b| 0.5 * (a - b))?;

        let test = self.times_fw(d_tilde.map(|s| 4.0 * s.mag_sqr()))?;
        let grid = self.filter_weighted(&d.map(|s| s.mag_sqr()))?;
        let mm = self.times_delta_sqr(test.zip_map(&grid, |a, b| a - b)?)?;

        let kk_mm = kk.zip_map(&mm, |a, b| a * b)?;
        let mm_mm = mm.map(|m| m * m);
        Ok(self.averaged_ratio(&kk_mm, &mm_mm)?.named("cI"))
    }

    /// Smagorinsky 型系数 cD
    pub fn c_d(&self, u: &VectorField, d: &SymmTensorField) -> LesResult<ScalarField> {
        let u_tilde = self.favre(u)?;
        let d_tilde = self.favre(d)?;
        self.c_d_from(u, d, &u_tilde, &d_tilde)
    }

    /// 各向同性系数 cI
    pub fn c_i(&self, u: &VectorField, d: &SymmTensorField) -> LesResult<ScalarField> {
        let u_tilde = self.favre(u)?;
        let d_tilde = self.favre(d)?;
        self.c_i_from(u, d, &u_tilde, &d_tilde)
    }

    /// 同时估计 cD、cI，共享测试滤波后的 U 与 D
    pub fn estimate(&self, u: &VectorField, d: &SymmTensorField) -> LesResult<DynamicCoefficients> {
        u.check(self.mesh)?;
        d.check(self.mesh)?;
        let u_tilde = self.favre(u)?;
        let d_tilde = self.favre(d)?;
        Ok(DynamicCoefficients {
            c_i: self.c_i_from(u, d, &u_tilde, &d_tilde)?,
            c_d: self.c_d_from(u, d, &u_tilde, &d_tilde)?,
        })
    }
}

// ============================================================
// ν_sgs 与 k
// ============================================================

/// k = max(cI·Δ²·|D|², kMin)
pub fn update_k(
    c_i: &ScalarField,
    d: &SymmTensorField,
    delta: &ScalarField,
    k_min: f64,
) -> LesResult<ScalarField> {
    let mut k = c_i
        .zip_map(delta, |c, dl| c * dl * dl)?
        .zip_map(d, |c, s| c * s.mag_sqr())?
        .named("k");
    k.max_with(k_min);
    Ok(k)
}

/// ν_sgs = max(cD·Δ²·|D|, -ν)
pub fn update_viscosity(
    c_d: &ScalarField,
    d: &SymmTensorField,
    delta: &ScalarField,
    nu: &ScalarField,
) -> LesResult<ScalarField> {
    Ok(c_d
        .zip_map(delta, |c, dl| c * dl * dl)?
        .zip_map(d, |c, s| c * s.mag())?
        .zip_map(nu, |v, nu| v.max(-nu))?
        .named("nuSgs"))
}

// ============================================================
// 模型
// ============================================================

/// 动态 Smagorinsky 模型
///
/// 持有 ν_sgs、k 以及最近一次估计的 cD、cI。所有派生量在每次修正中
/// 重新计算；修正失败时已保存的场保持不变。
#[derive(Debug)]
pub struct DynamicSmagorinsky {
    mesh: Arc<dyn MeshTopology>,
    config: LesModelConfig,
    filter: LesFilter,
    delta_policy: LesDelta,
    delta: ScalarField,
    nu: MolecularViscosity,
    nu_sgs: ScalarField,
    k: ScalarField,
    c_d: ScalarField,
    c_i: ScalarField,
    reporter: Arc<dyn CoefficientReporter>,
    n_corrections: u64,
}

/// 模型构建器
#[derive(Debug)]
pub struct DynamicSmagorinskyBuilder {
    mesh: Arc<dyn MeshTopology>,
    config: LesModelConfig,
    nu: MolecularViscosity,
    nu_sgs: Option<ScalarField>,
    k: Option<ScalarField>,
    reporter: Option<Arc<dyn CoefficientReporter>>,
}

impl DynamicSmagorinskyBuilder {
    /// 系数配置
    pub fn config(mut self, config: LesModelConfig) -> Self {
        self.config = config;
        self
    }

    /// 均匀分子粘度
    pub fn nu(mut self, nu: f64) -> Self {
        self.nu = MolecularViscosity::Uniform(nu);
        self
    }

    /// 分子粘度（常数或场）
    pub fn viscosity(mut self, nu: MolecularViscosity) -> Self {
        self.nu = nu;
        self
    }

    /// ν_sgs 初始场，用于指定其边界条件
    pub fn nu_sgs_field(mut self, field: ScalarField) -> Self {
        self.nu_sgs = Some(field);
        self
    }

    /// k 初始场，用于指定其边界条件
    pub fn k_field(mut self, field: ScalarField) -> Self {
        self.k = Some(field);
        self
    }

    /// 系数汇报器
    pub fn reporter(mut self, reporter: Arc<dyn CoefficientReporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    /// 构建模型并立即完成一次完整估计
    pub fn build(self, u: &VectorField) -> Result<DynamicSmagorinsky, ModelError> {
        self.config.validate()?;
        let mesh = self.mesh;
        let m: &dyn MeshTopology = mesh.as_ref();

        u.check(m)?;
        self.nu.check(m)?;

        let filter = LesFilter::from_coeffs(m, &self.config.filter)?;
        let delta_policy = LesDelta::from_coeffs(&self.config.delta)?;
        let delta = delta_policy.compute(m);

        let nu_sgs = match self.nu_sgs {
            Some(f) => {
                f.check(m)?;
                f.named("nuSgs")
            }
            None => ScalarField::uniform("nuSgs", m, 0.0),
        };
        let k = match self.k {
            Some(f) => {
                f.check(m)?;
                f.named("k")
            }
            None => ScalarField::uniform("k", m, 0.0),
        };
        let c_d = ScalarField::uniform("cD", m, 0.0);
        let c_i = ScalarField::uniform("cI", m, 0.0);

        tracing::debug!(
            n_cells = m.n_cells(),
            filter = filter.name(),
            delta = self.config.delta.kind.as_str(),
            turbulence = self.config.turbulence,
            "构建动态 Smagorinsky 模型"
        );

        let mut model = DynamicSmagorinsky {
            mesh,
            config: self.config,
            filter,
            delta_policy,
            delta,
            nu: self.nu,
            nu_sgs,
            k,
            c_d,
            c_i,
            reporter: self.reporter.unwrap_or_else(|| Arc::new(TracingReporter)),
            n_corrections: 0,
        };

        let d = strain_rate(model.mesh.as_ref(), u)?;
        model.update(u, &d, None)?;
        Ok(model)
    }
}

impl DynamicSmagorinsky {
    /// 创建构建器
    pub fn builder(mesh: Arc<dyn MeshTopology>) -> DynamicSmagorinskyBuilder {
        DynamicSmagorinskyBuilder {
            mesh,
            config: LesModelConfig::default(),
            nu: MolecularViscosity::default(),
            nu_sgs: None,
            k: None,
            reporter: None,
        }
    }

    /// 按当前速度场修正
    ///
    /// 湍流开关关闭时直接返回，不改动任何场。
    pub fn correct(&mut self, u: &VectorField) -> Result<(), ModelError> {
        if !self.config.turbulence {
            tracing::trace!("湍流已关闭，跳过修正");
            return Ok(());
        }
        let d = strain_rate(self.mesh.as_ref(), u)?;
        self.update(u, &d, None)
    }

    /// 使用调用方已有的速度梯度修正
    pub fn correct_with_gradient(
        &mut self,
        u: &VectorField,
        grad_u: &TensorField,
    ) -> Result<(), ModelError> {
        if !self.config.turbulence {
            return Ok(());
        }
        let d = strain_rate_from_gradient(self.mesh.as_ref(), grad_u)?;
        self.update(u, &d, None)
    }

    /// 以密度或相分数 w 加权（Favre 滤波）修正
    pub fn correct_weighted(&mut self, u: &VectorField, w: &ScalarField) -> Result<(), ModelError> {
        if !self.config.turbulence {
            return Ok(());
        }
        let d = strain_rate(self.mesh.as_ref(), u)?;
        self.update(u, &d, Some(w))
    }

    /// 估计系数并更新 k、ν_sgs
    ///
    /// 新值先写入临时场，全部成功后才替换模型中的场。
    fn update(
        &mut self,
        u: &VectorField,
        d: &SymmTensorField,
        w: Option<&ScalarField>,
    ) -> Result<(), ModelError> {
        let mesh: &dyn MeshTopology = self.mesh.as_ref();
        u.check(mesh)?;

        let mut estimator = GermanoEstimator::new(mesh, &self.filter, &self.delta);
        if let Some(w) = w {
            estimator = estimator.weighted(w)?;
        }
        let DynamicCoefficients { c_d, c_i } = estimator.estimate(u, d)?;

        let k_raw = update_k(&c_i, d, &self.delta, self.config.k_min)?;
        let nu = self.nu.to_field(mesh);
        let nu_sgs_raw = update_viscosity(&c_d, d, &self.delta, &nu)?;

        let mut k = self.k.clone();
        k.assign(mesh, k_raw)?;
        let mut nu_sgs = self.nu_sgs.clone();
        nu_sgs.assign(mesh, nu_sgs_raw)?;

        self.k = k;
        self.nu_sgs = nu_sgs;
        self.c_d = c_d;
        self.c_i = c_i;

        if self.config.diagnostics == DiagnosticsLevel::Summary {
            self.reporter.report(MODEL_NAME, &self.summary());
        }
        self.n_corrections += 1;
        Ok(())
    }

    /// 当前系数汇总
    pub fn summary(&self) -> CoefficientSummary {
        CoefficientSummary {
            step: self.n_corrections,
            c_d: self.c_d.stats().into(),
            c_i: self.c_i.stats().into(),
            nu_sgs: self.nu_sgs.stats().into(),
            k: self.k.stats().into(),
        }
    }

    /// 重新读取滤波器与 Δ 配置
    ///
    /// 新配置全部有效时才替换；失败时保留原滤波器与 Δ。已有的系数与
    /// ν_sgs、k 不会重算，下一次修正起生效。
    pub fn reload(&mut self, config: &LesModelConfig) -> Result<(), ModelError> {
        let mesh: &dyn MeshTopology = self.mesh.as_ref();
        let parsed = config.validate().and_then(|_| {
            let filter = LesFilter::from_coeffs(mesh, &config.filter)?;
            let delta_policy = LesDelta::from_coeffs(&config.delta)?;
            Ok((filter, delta_policy))
        });

        match parsed {
            Ok((filter, delta_policy)) => {
                self.delta = delta_policy.compute(mesh);
                self.filter = filter;
                self.delta_policy = delta_policy;
                self.config = config.clone();
                tracing::info!(
                    filter = self.filter.name(),
                    delta = self.config.delta.kind.as_str(),
                    "重新读取模型系数"
                );
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "模型系数重读失败，保留原配置");
                Err(e.into())
            }
        }
    }

    /// 最近一次估计的 cD
    pub fn c_d(&self) -> &ScalarField {
        &self.c_d
    }

    /// 最近一次估计的 cI
    pub fn c_i(&self) -> &ScalarField {
        &self.c_i
    }

    /// 亚格子粘度
    pub fn nu_sgs(&self) -> &ScalarField {
        &self.nu_sgs
    }

    /// 亚格子湍动能
    pub fn k(&self) -> &ScalarField {
        &self.k
    }

    /// 滤波宽度
    pub fn delta(&self) -> &ScalarField {
        &self.delta
    }

    /// 当前测试滤波器
    pub fn filter(&self) -> &LesFilter {
        &self.filter
    }

    /// 当前 Δ 策略
    pub fn delta_policy(&self) -> LesDelta {
        self.delta_policy
    }

    /// 当前配置
    pub fn config(&self) -> &LesModelConfig {
        &self.config
    }

    /// 已完成的估计次数（含构建时的一次）
    pub fn n_corrections(&self) -> u64 {
        self.n_corrections
    }
}

impl EddyViscosityModel for DynamicSmagorinsky {
    fn name(&self) -> &'static str {
        MODEL_NAME
    }

    fn mesh(&self) -> &dyn MeshTopology {
        self.mesh.as_ref()
    }

    fn is_enabled(&self) -> bool {
        self.config.turbulence
    }

    fn nu(&self) -> &MolecularViscosity {
        &self.nu
    }

    fn nu_sgs(&self) -> &ScalarField {
        &self.nu_sgs
    }

    fn k(&self) -> &ScalarField {
        &self.k
    }

    fn delta(&self) -> &ScalarField {
        &self.delta
    }

    fn ce(&self) -> f64 {
        self.config.ce
    }

    fn correct(&mut self, u: &VectorField) -> Result<(), ModelError> {
        DynamicSmagorinsky::correct(self, u)
    }

    fn reload(&mut self, config: &LesModelConfig) -> Result<(), ModelError> {
        DynamicSmagorinsky::reload(self, config)
    }
}
