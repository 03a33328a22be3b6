// apps/les_cli/src/commands/run.rs

//! 运行模型命令
//!
//! 构建笛卡尔盒网格，施加解析速度场，按给定步数反复修正模型，
//! 最后输出每步的动态系数汇总。

use std::f64::consts::PI;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use glam::DVec3;
use tracing::info;

use les_config::{DiagnosticsLevel, FilterCoeffs, LesModelConfig};
use les_physics::fields::VectorField;
use les_physics::filter::TestFilter;
use les_physics::mesh::{CartesianMesh, MeshTopology};
use les_physics::turbulence::{CoefficientSummary, DynamicSmagorinsky, SummaryRecorder};

/// 解析流场
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Case {
    /// 均匀剪切 U = (s·y, 0, 0)，y 方向为壁面
    Shear,
    /// Taylor-Green 涡，全周期
    TaylorGreen,
    /// 静止流体
    Zero,
}

/// 运行参数
#[derive(Args)]
pub struct RunArgs {
    /// 系数配置文件（JSON），缺省使用默认配置
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 流场
    #[arg(long, value_enum, default_value = "shear")]
    pub case: Case,

    /// 每个方向的单元数
    #[arg(short = 'n', long, default_value = "16")]
    pub cells: usize,

    /// 盒子边长 [m]
    #[arg(long, default_value = "1.0")]
    pub length: f64,

    /// 速度幅值 [m/s]（剪切时为剪切率 [1/s]）
    #[arg(long, default_value = "1.0")]
    pub amplitude: f64,

    /// 分子粘度 [m²/s]
    #[arg(long, default_value = "1e-5")]
    pub nu: f64,

    /// 修正次数
    #[arg(short, long, default_value = "5")]
    pub steps: usize,

    /// 每步速度衰减率 [1/步]
    #[arg(long, default_value = "0.0")]
    pub decay: f64,

    /// 覆盖配置中的测试滤波器
    #[arg(long)]
    pub filter: Option<String>,

    /// 以 JSON 行输出汇总
    #[arg(long)]
    pub json: bool,
}

fn build_mesh(args: &RunArgs) -> Result<CartesianMesh> {
    let n = args.cells;
    let l = args.length;
    let builder = CartesianMesh::builder().cells(n, n, n).lengths(l, l, l);
    let builder = match args.case {
        Case::Shear => builder.periodic(true, false, true),
        Case::TaylorGreen | Case::Zero => builder.periodic(true, true, true),
    };
    builder.build().context("构建网格失败")
}

fn velocity(case: Case, mesh: &CartesianMesh, length: f64, amplitude: f64) -> VectorField {
    let k = 2.0 * PI / length;
    match case {
        Case::Shear => VectorField::from_fn("U", mesh, |x| DVec3::new(amplitude * x.y, 0.0, 0.0)),
        Case::TaylorGreen => VectorField::from_fn("U", mesh, |x| {
            let (sx, cx) = (k * x.x).sin_cos();
            let (sy, cy) = (k * x.y).sin_cos();
            let cz = (k * x.z).cos();
            DVec3::new(amplitude * sx * cy * cz, -amplitude * cx * sy * cz, 0.0)
        }),
        Case::Zero => VectorField::uniform("U", mesh, DVec3::ZERO),
    }
}

fn print_table(records: &[CoefficientSummary]) {
    println!(
        "\n{:>5} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12}",
        "step", "cD_min", "cD_mean", "cD_max", "cI_mean", "nuSgs_max", "k_max"
    );
    for r in records {
        println!(
            "{:>5} {:>12.4e} {:>12.4e} {:>12.4e} {:>12.4e} {:>12.4e} {:>12.4e}",
            r.step, r.c_d.min, r.c_d.mean, r.c_d.max, r.c_i.mean, r.nu_sgs.max, r.k.max
        );
    }
}

/// 执行运行命令
pub fn execute(args: RunArgs) -> Result<()> {
    info!("=== 动态 Smagorinsky 模型运行 ===");

    let mut config = match &args.config {
        Some(path) => LesModelConfig::from_file(path)
            .with_context(|| format!("读取配置失败: {}", path.display()))?,
        None => LesModelConfig::default(),
    };
    if let Some(kind) = &args.filter {
        config.filter = FilterCoeffs { kind: kind.clone(), ..config.filter };
    }
    config.diagnostics = DiagnosticsLevel::Summary;

    let mesh = Arc::new(build_mesh(&args)?);
    info!(
        "网格: {} 单元, {} 面, {} 个边界 patch",
        mesh.n_cells(),
        mesh.n_faces(),
        mesh.patches().len()
    );

    let recorder = SummaryRecorder::new();
    let u0 = velocity(args.case, &mesh, args.length, args.amplitude);
    let mut model = DynamicSmagorinsky::builder(mesh.clone())
        .config(config)
        .nu(args.nu)
        .reporter(Arc::new(recorder.clone()))
        .build(&u0)
        .context("构建模型失败")?;
    info!("滤波器: {}, 工况: {:?}", model.filter().name(), args.case);

    let start = Instant::now();
    for step in 1..=args.steps {
        let scale = (-args.decay * step as f64).exp();
        let u = u0.map(|v| v * scale);
        model
            .correct(&u)
            .with_context(|| format!("第 {} 步修正失败", step))?;
    }
    let elapsed = start.elapsed();

    let records = recorder.records();
    if args.json {
        for r in &records {
            println!("{}", serde_json::to_string(r)?);
        }
    } else {
        print_table(&records);
    }

    info!("=== 运行完成 ===");
    info!("修正次数: {}", model.n_corrections());
    info!("计算时间: {:.3} s", elapsed.as_secs_f64());

    Ok(())
}
