use anyhow::{Result, bail};
use automation::{
    AutomationConfig, Console, FailurePolicy, RunCtx, ScreenOracle, SessionDriver, SessionError,
    desktop::{DesktopActuator, DesktopCapture},
    files, load_config, logging,
    opener::SystemOpener,
    pipeline::gimp::{self, GimpPatterns},
};
use clap::Parser;
use std::{io, path::PathBuf, process::ExitCode, time::Instant};
use tracing::info;

/// 命令行参数：命令行取值优先于配置文件。
#[derive(Parser, Debug)]
#[command(
    name = "convert-images",
    version,
    about = "借助 GIMP 把 Input 目录中的图片逐个导出为 PNG"
)]
struct Args {
    /// 图片根目录（包含 Input/ 与 Output/）；不指定时交互式询问
    #[arg(long)]
    folder: Option<PathBuf>,

    /// JSON 配置文件
    #[arg(long)]
    config: Option<PathBuf>,

    /// 图案匹配的最低相似度（0.0–1.0）
    #[arg(long)]
    similarity: Option<f64>,

    /// 每次查找图案最多等待的秒数
    #[arg(long)]
    timeout: Option<u64>,

    /// 参考图片目录
    #[arg(long)]
    images_dir: Option<PathBuf>,

    /// 某一步失败后的处理方式
    #[arg(long, value_enum)]
    on_step_failure: Option<FailurePolicy>,
}

fn main() -> ExitCode {
    logging::init();
    match run(Args::parse()) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<ExitCode> {
    let config = resolve_config(&args)?;

    let patterns = GimpPatterns::in_dir(&config.images_dir);
    let missing = patterns.missing_images();
    if !missing.is_empty() {
        let list: Vec<String> = missing.iter().map(|p| p.display().to_string()).collect();
        bail!("缺少参考图片: {}", list.join(", "));
    }

    let mut console = Console::stdio();
    let folder = match args.folder {
        Some(folder) => folder,
        None => files::prompt_folder(
            &mut console,
            &mut io::stdin().lock(),
            &config.default_folder(),
        )?,
    };
    let files = files::list_input_files(&folder)?;
    info!(folder = %folder.display(), count = files.len(), "待转换文件");

    let convert = gimp::export_pipeline(&patterns);
    let cleanup = gimp::cleanup_pipeline(&patterns);
    let mut oracle = ScreenOracle::new(DesktopCapture::primary()?, config.poll_interval());
    let mut actuator = DesktopActuator::new(config.action_delay())?;
    let mut opener = SystemOpener;

    let start = Instant::now();
    let mut ctx = RunCtx::new(&mut oracle, &mut actuator, &mut console, &config);
    let outcome = SessionDriver::new(&mut opener, &convert, &cleanup).run(&mut ctx, &files);
    info!(elapsed = ?start.elapsed(), "总耗时");

    match outcome {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(err @ SessionError::Open { .. }) => {
            info!("{err:#}");
            Ok(ExitCode::from(1))
        }
        Err(err) => Err(err.into()),
    }
}

fn resolve_config(args: &Args) -> Result<AutomationConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => AutomationConfig::default(),
    };
    if let Some(similarity) = args.similarity {
        config.similarity = similarity;
    }
    if let Some(timeout) = args.timeout {
        config.timeout_secs = timeout;
    }
    if let Some(dir) = &args.images_dir {
        config.images_dir = dir.clone();
    }
    if let Some(policy) = args.on_step_failure {
        config.on_step_failure = policy;
    }
    config.validate()?;
    Ok(config)
}
