// crates/les_physics/tests/dynamic_smagorinsky.rs

//! 动态 Smagorinsky 模型测试
//! 验证系数估计、平均顺序、粘度下限与无记忆性

use std::f64::consts::PI;
use std::sync::Arc;

use glam::DVec3;
use les_config::{FilterCoeffs, LesModelConfig};
use les_foundation::{FieldValue, SymmTensor, VSMALL};
use les_physics::fields::{ScalarField, VectorField};
use les_physics::filter::TestFilter;
use les_physics::fvc;
use les_physics::mesh::{CartesianMesh, MeshTopology};
use les_physics::turbulence::{strain_rate, update_viscosity, DynamicSmagorinsky};

fn channel(n: usize) -> Arc<CartesianMesh> {
    Arc::new(
        CartesianMesh::builder()
            .cells(n, n, 4)
            .lengths(1.0, 1.0, 0.25)
            .periodic(true, false, true)
            .build()
            .unwrap(),
    )
}

fn periodic_box(n: usize) -> Arc<CartesianMesh> {
    Arc::new(
        CartesianMesh::builder()
            .cells(n, n, n)
            .periodic(true, true, true)
            .build()
            .unwrap(),
    )
}

/// 周期盒内的非平凡速度场
fn vortical(mesh: &CartesianMesh) -> VectorField {
    VectorField::from_fn("U", mesh, |x| {
        let (sx, cx) = (2.0 * PI * x.x).sin_cos();
        let (sy, cy) = (2.0 * PI * x.y).sin_cos();
        let (sz, cz) = (4.0 * PI * x.z).sin_cos();
        DVec3::new(sx * cy * cz + 0.3 * sz, -cx * sy * cz, 0.5 * cx * sz + 0.2 * sy)
    })
}

fn build(mesh: &Arc<CartesianMesh>, config: LesModelConfig, nu: f64, u: &VectorField) -> DynamicSmagorinsky {
    DynamicSmagorinsky::builder(mesh.clone())
        .config(config)
        .nu(nu)
        .build(u)
        .unwrap()
}

/// 测试 ν_sgs ≥ -ν（单元与边界）
#[test]
fn test_viscosity_floor_holds_everywhere() {
    let nu = 1e-4;
    for kind in ["simple", "laplace", "simpson"] {
        let mesh = periodic_box(8);
        let u = vortical(&mesh);
        let config = LesModelConfig { filter: FilterCoeffs::named(kind), ..Default::default() };
        let model = build(&mesh, config, nu, &u);

        assert!(model.nu_sgs().all_finite());
        assert!(model.nu_sgs().internal().iter().all(|&v| v >= -nu), "{kind}");
        assert!(model.nu_sgs().boundary().iter().all(|&v| v >= -nu), "{kind}");
        // 系数本身不截断
        assert!(model.c_d().all_finite());
    }
}

/// 测试相同输入得到相同结果（无时间记忆）
#[test]
fn test_coefficients_are_memoryless() {
    // 16³ = 4096 个单元，走并行路径
    let mesh = periodic_box(16);
    let u1 = vortical(&mesh);
    let u2 = u1.map(|v| DVec3::new(v.y, -2.0 * v.x, v.z + 0.1));

    let fresh = build(&mesh, LesModelConfig::default(), 1e-5, &u1);

    let mut model = build(&mesh, LesModelConfig::default(), 1e-5, &u2);
    model.correct(&u1).unwrap();
    model.correct(&u2).unwrap();
    model.correct(&u1).unwrap();

    assert_eq!(model.c_d().internal(), fresh.c_d().internal());
    assert_eq!(model.c_i().internal(), fresh.c_i().internal());
    assert_eq!(model.nu_sgs().internal(), fresh.nu_sgs().internal());
    assert_eq!(model.k().internal(), fresh.k().internal());
}

/// 测试均匀速度场（零应变）不产生 NaN/Inf
#[test]
fn test_uniform_velocity_is_stable() {
    let mesh = channel(6);
    let u = VectorField::uniform("U", mesh.as_ref(), DVec3::new(3.0, -1.0, 0.5));
    let model = build(&mesh, LesModelConfig::default(), 1e-5, &u);

    assert!(model.c_d().all_finite());
    assert!(model.c_i().all_finite());
    assert!(model.nu_sgs().all_finite());
    assert!(model.k().all_finite());
    assert!(model.nu_sgs().internal().iter().all(|v| v.abs() < 1e-12));
}

/// 测试应变率对称、无迹
#[test]
fn test_strain_rate_symmetric_trace_free() {
    let mesh = periodic_box(8);
    let u = vortical(&mesh);
    let d = strain_rate(mesh.as_ref(), &u).unwrap();
    let grad = fvc::grad(mesh.as_ref(), &u).unwrap();

    for (s, g) in d.internal().iter().zip(grad.internal()) {
        assert!(s.tr().abs() < 1e-12);
        // 与完整张量的对称部分一致
        let full = s.to_tensor();
        assert!((full - full.transpose()).mag() < 1e-15);
        assert!((s.xy - 0.5 * (g.xy + g.yx)).abs() < 1e-12);
        assert!((s.yz - 0.5 * (g.yz + g.zy)).abs() < 1e-12);
    }
}

/// 测试线性流场中 cD 对速度缩放不变
#[test]
fn test_c_d_scale_invariant_for_linear_flow() {
    let mesh = Arc::new(CartesianMesh::builder().cells(6, 6, 6).build().unwrap());
    let profile = |x: DVec3| DVec3::new(x.y + 0.5 * x.z, -0.3 * x.x + x.z, 0.2 * x.y);
    let u1 = VectorField::from_fn("U", mesh.as_ref(), profile);
    let u3 = VectorField::from_fn("U", mesh.as_ref(), move |x| profile(x) * 3.0);

    let m1 = build(&mesh, LesModelConfig::default(), 0.0, &u1);
    let m3 = build(&mesh, LesModelConfig::default(), 0.0, &u3);

    for c in 0..mesh.n_cells() {
        let (a, b) = (m1.c_d().value(c), m3.c_d().value(c));
        assert!((a - b).abs() <= 1e-8 * a.abs() + 1e-12, "cell {c}: {a} vs {b}");
        // ν_sgs ∝ a
        let (n1, n3) = (m1.nu_sgs().value(c), m3.nu_sgs().value(c));
        if a.abs() > 1e-6 && n1 > 0.0 {
            assert!((n3 / n1 - 3.0).abs() < 1e-6);
        }
    }
}

/// 测试均匀剪切流 U = (k·y, 0, 0)，盒式滤波
#[test]
fn test_uniform_shear_scenario() {
    let mesh = channel(12);
    let u = VectorField::from_fn("U", mesh.as_ref(), |x| DVec3::new(2.0 * x.y, 0.0, 0.0));
    let config = LesModelConfig { filter: FilterCoeffs::named("simple"), ..Default::default() };
    let model = build(&mesh, config, 1e-5, &u);

    for c in 0..mesh.n_cells() {
        if mesh.is_near_boundary(c, 2) {
            continue;
        }
        let cd = model.c_d().value(c);
        assert!(cd.is_finite());
        assert!((-1e-12..=0.03).contains(&cd), "cell {c}: cD = {cd}");
        assert!(model.nu_sgs().value(c) >= 0.0);
    }
}

/// 测试零速度场：所有场精确为零
#[test]
fn test_zero_velocity_gives_zero_fields() {
    let mesh = channel(6);
    let u = VectorField::uniform("U", mesh.as_ref(), DVec3::ZERO);
    let config = LesModelConfig { k_min: 0.0, ..Default::default() };
    let model = build(&mesh, config, 1e-5, &u);

    assert!(model.c_d().internal().iter().all(|&v| v == 0.0));
    assert!(model.c_i().internal().iter().all(|&v| v == 0.0));
    assert!(model.nu_sgs().internal().iter().all(|&v| v == 0.0));
    assert!(model.k().internal().iter().all(|&v| v == 0.0));
}

/// 测试 k 不低于 kMin
#[test]
fn test_k_bounded_below() {
    let mesh = periodic_box(8);
    let u = vortical(&mesh);
    let config = LesModelConfig { k_min: 1e-6, ..Default::default() };
    let model = build(&mesh, config, 1e-5, &u);
    assert!(model.k().internal().iter().all(|&v| v >= 1e-6));
}

/// 测试单位密度加权与无加权一致
#[test]
fn test_unit_density_matches_unweighted() {
    let mesh = periodic_box(8);
    let u = vortical(&mesh);
    let rho = ScalarField::uniform("rho", mesh.as_ref(), 1.0);

    let plain = build(&mesh, LesModelConfig::default(), 1e-5, &u);
    let mut weighted = build(&mesh, LesModelConfig::default(), 1e-5, &u);
    weighted.correct_weighted(&u, &rho).unwrap();

    let nu_scale = plain.nu_sgs().stats().max.abs().max(1e-5);
    let k_scale = plain.k().stats().max.abs();
    for c in 0..mesh.n_cells() {
        let (a, b) = (plain.nu_sgs().value(c), weighted.nu_sgs().value(c));
        assert!((a - b).abs() <= 1e-9 * nu_scale);
        let (a, b) = (plain.k().value(c), weighted.k().value(c));
        assert!((a - b).abs() <= 1e-9 * k_scale + 1e-15);
    }
}

/// 测试非均匀密度改变结果但保持下限
#[test]
fn test_variable_density_respects_floor() {
    let nu = 1e-4;
    let mesh = periodic_box(8);
    let u = vortical(&mesh);
    let rho = ScalarField::from_fn("rho", mesh.as_ref(), |x| 1.0 + 0.5 * (2.0 * PI * x.x).sin());

    let mut model = build(&mesh, LesModelConfig::default(), nu, &u);
    let before = model.c_d().clone();
    model.correct_weighted(&u, &rho).unwrap();

    assert!(model.nu_sgs().internal().iter().all(|&v| v >= -nu));
    assert_ne!(model.c_d().internal(), before.internal());
}

/// 测试使用外部梯度与内部梯度结果一致
#[test]
fn test_correct_with_gradient_matches_correct() {
    let mesh = periodic_box(8);
    let u = vortical(&mesh);
    let grad = fvc::grad(mesh.as_ref(), &u).unwrap();

    let a = build(&mesh, LesModelConfig::default(), 1e-5, &u);
    let mut b = build(&mesh, LesModelConfig::default(), 1e-5, &VectorField::uniform("U", mesh.as_ref(), DVec3::ZERO));
    b.correct_with_gradient(&u, &grad).unwrap();

    assert_eq!(a.c_d().internal(), b.c_d().internal());
    assert_eq!(a.nu_sgs().internal(), b.nu_sgs().internal());
}

/// 按定义逐项重建 cD、cI 的分子与分母
struct GermanoTerms {
    ll_mm: ScalarField,
    mm_mm: ScalarField,
    kk_mm: ScalarField,
    mm2: ScalarField,
}

fn germano_terms(mesh: &CartesianMesh, model: &DynamicSmagorinsky, u: &VectorField) -> GermanoTerms {
    let filter = model.filter();
    let delta = model.delta();
    let d = strain_rate(mesh, u).unwrap();
    let f_u = filter.apply(mesh, u).unwrap();
    let f_d = filter.apply(mesh, &d).unwrap();

    // LL = dev(F(U⊗U) - F(U)⊗F(U))
    let f_uu = filter.apply(mesh, &u.map(SymmTensor::sqr)).unwrap();
    let ll = f_uu.zip_map(&f_u, |a, b| (a - SymmTensor::sqr(b)).dev()).unwrap();

    // MM = Δ²(F(|D|D) - 4|F(D)|F(D))
    let f_dd = filter.apply(mesh, &d.map(|s| s * s.mag())).unwrap();
    let mm = f_dd
        .zip_map(&f_d, |a, b| a - b * (4.0 * b.mag()))
        .unwrap()
        .zip_map(delta, |m, dl| m * (dl * dl))
        .unwrap();

    // KK = 0.5(F(|U|²) - |F(U)|²)
    let f_u2 = filter.apply(mesh, &u.map(|v| v.length_squared())).unwrap();
    let kk = f_u2.zip_map(&f_u, |a, b| 0.5 * (a - b.length_squared())).unwrap();

    // mm = Δ²(4|F(D)|² - F(|D|²))
    let f_d2 = filter.apply(mesh, &d.map(|s| s.mag_sqr())).unwrap();
    let m_iso = f_d
        .zip_map(&f_d2, |b, a| 4.0 * b.mag_sqr() - a)
        .unwrap()
        .zip_map(delta, |m, dl| m * (dl * dl))
        .unwrap();

    GermanoTerms {
        ll_mm: ll.zip_map(&mm, |l, m| l.double_dot(&m)).unwrap(),
        mm_mm: mm.map(|m| m.mag_sqr()),
        kk_mm: kk.zip_map(&m_iso, |a, b| a * b).unwrap(),
        mm2: m_iso.map(|m| m * m),
    }
}

/// avg(num) / max(avg(den), VSMALL)
fn average_then_divide(mesh: &CartesianMesh, num: &ScalarField, den: &ScalarField) -> Vec<f64> {
    let num = fvc::average(mesh, num).unwrap();
    let den = fvc::average(mesh, den).unwrap();
    num.internal()
        .iter()
        .zip(den.internal())
        .map(|(n, d)| n / d.max(VSMALL))
        .collect()
}

fn max_abs_diff(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).abs()).fold(0.0, f64::max)
}

/// 测试 cD、cI 与按定义逐项重建的结果一致
#[test]
fn test_coefficients_match_germano_construction() {
    for kind in ["simple", "laplace", "simpson"] {
        let mesh = periodic_box(8);
        let u = vortical(&mesh);
        let config = LesModelConfig { filter: FilterCoeffs::named(kind), ..Default::default() };
        let model = build(&mesh, config, 1e-5, &u);
        let terms = germano_terms(&mesh, &model, &u);

        let c_d: Vec<f64> = average_then_divide(&mesh, &terms.ll_mm, &terms.mm_mm)
            .into_iter()
            .map(|c| 0.5 * c)
            .collect();
        let c_i = average_then_divide(&mesh, &terms.kk_mm, &terms.mm2);

        let d_scale = c_d.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
        let i_scale = c_i.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
        assert!(d_scale > 1e-6, "{kind}: cD = {d_scale}");
        assert!(i_scale > 1e-6, "{kind}: cI = {i_scale}");
        assert!(max_abs_diff(model.c_d().internal(), &c_d) <= 1e-10 * d_scale, "{kind}");
        assert!(max_abs_diff(model.c_i().internal(), &c_i) <= 1e-10 * i_scale, "{kind}");
    }
}

/// 测试分子、分母先平均再相除，而不是先除后平均
#[test]
fn test_c_d_averages_before_dividing() {
    let mesh = periodic_box(8);
    let u = vortical(&mesh);
    let model = build(&mesh, LesModelConfig::default(), 1e-5, &u);
    let terms = germano_terms(&mesh, &model, &u);

    let local = terms
        .ll_mm
        .zip_map(&terms.mm_mm, |n, d| 0.5 * n / d.max(VSMALL))
        .unwrap();
    let divided_first = fvc::average(mesh.as_ref(), &local).unwrap();

    let scale = model.c_d().stats().max.abs().max(model.c_d().stats().min.abs());
    let diff = max_abs_diff(model.c_d().internal(), divided_first.internal());
    assert!(diff > 1e-3 * scale, "diff = {diff}, scale = {scale}");
}

/// 测试 cD 保留负值（反向散射），下限只作用在 ν_sgs 上
#[test]
fn test_negative_c_d_kept_and_floored_in_viscosity() {
    let nu = 1e-5;
    let mesh = periodic_box(8);
    let u = vortical(&mesh);
    let model = build(&mesh, LesModelConfig::default(), nu, &u);

    let negative: Vec<usize> = (0..mesh.n_cells()).filter(|&c| model.c_d().value(c) < 0.0).collect();
    assert!(!negative.is_empty());

    let d = strain_rate(mesh.as_ref(), &u).unwrap();
    let nu_field = ScalarField::uniform("nu", mesh.as_ref(), nu);
    let expected = update_viscosity(model.c_d(), &d, model.delta(), &nu_field).unwrap();
    for &c in &negative {
        let dl = model.delta().value(c);
        let raw = model.c_d().value(c) * dl * dl * d.value(c).mag();
        assert!(raw < 0.0);
        assert_eq!(model.nu_sgs().value(c), expected.value(c));
        assert_eq!(model.nu_sgs().value(c), raw.max(-nu));
    }
}
