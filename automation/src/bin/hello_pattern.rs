use anyhow::Result;
use automation::{
    Console, Pattern, ScreenOracle,
    desktop::{DesktopActuator, DesktopCapture},
    hello::{self, DEFAULT_PATTERN},
    logging,
};
use clap::Parser;
use std::{path::PathBuf, process::ExitCode, time::Duration};

/// 最小示例：找到图案就点一下。
#[derive(Parser, Debug)]
#[command(name = "hello-pattern", version, about = "查找屏幕上的一个图案并单击")]
struct Args {
    /// 参考图片路径
    #[arg(long, default_value = DEFAULT_PATTERN)]
    pattern: PathBuf,

    /// 最低相似度（0.0–1.0）
    #[arg(long, default_value_t = 0.8)]
    similarity: f64,

    /// 最多等待的秒数
    #[arg(long, default_value_t = 5)]
    timeout: u64,
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
    anyhow::ensure!(
        (0.0..=1.0).contains(&args.similarity),
        "相似度必须位于 0.0–1.0 之间"
    );
    let mut oracle = ScreenOracle::new(DesktopCapture::primary()?, Duration::from_millis(200));
    let mut actuator = DesktopActuator::new(Duration::from_millis(60))?;
    let mut console = Console::stdio();

    let outcome = hello::find_and_click(
        &mut oracle,
        &mut actuator,
        &mut console,
        &Pattern::new(args.pattern),
        args.similarity,
        Duration::from_secs(args.timeout),
    );
    Ok(outcome.exit_code())
}
