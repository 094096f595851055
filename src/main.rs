use clap::Parser;
use dialoguer::{Confirm, Input};
use indicatif::ProgressBar;
use nutrivision::{analyzer, cli, config, error, report, session};
use nutrivision_common::{AnalysisService, NutritionReport};
use session::{Selection, Session};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Analyze { image, json } => {
            let service = analyzer::HttpAnalysisService::new(config.service()?)?;
            tracing::info!(endpoint = service.endpoint(), "analysis service configured");
            let mut session = Session::new(service);

            match image {
                Some(path) => {
                    if let Err(err) = analyze_once(&mut session, path, json).await {
                        println!("✖ {}", err);
                        return Ok(ExitCode::FAILURE);
                    }
                    // 通知は表示済み。終了コードだけで失敗を伝える
                    if let Err(err) = session.ensure_completed() {
                        tracing::debug!(error = %err, "analysis did not complete");
                        return Ok(ExitCode::FAILURE);
                    }
                }
                None => run_interactive(&mut session, json).await?,
            }
        }

        Commands::Config { set_endpoint, set_api_key, show } => {
            let mut config = config;

            if let Some(endpoint) = set_endpoint {
                config.set_endpoint(endpoint)?;
                println!("✔ Endpoint saved");
            }

            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ API key saved");
            }

            if show {
                let service = config.service()?;
                println!("Settings:");
                println!("  File: {}", Config::config_path()?.display());
                println!("  Endpoint: {}", service.endpoint);
                println!("  API key: {}", if service.api_key.is_some() { "set" } else { "not set" });
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

/// 選択 → 解析 → 表示を1回行う
async fn analyze_once<S: AnalysisService>(session: &mut Session<S>, path: PathBuf, json: bool) -> Result<()> {
    let image = match session.choose(&path)? {
        Selection::Ready(image) => image,
        Selection::Rejected(notice) => {
            println!("{}", report::render_notice(&notice));
            return Ok(());
        }
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_message("Analyzing food...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    let notice = session.analyze(image).await;
    spinner.finish_and_clear();

    println!("{}", report::render_notice(&notice?));

    let Some(result) = session.result() else {
        return Ok(());
    };
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        println!();
        print!("{}", report::render_report(&NutritionReport::from_result(result)));
    }

    Ok(())
}

/// 対話モード: 失敗しても終了せず、別の画像を選び直せる
async fn run_interactive<S: AnalysisService>(session: &mut Session<S>, json: bool) -> Result<()> {
    println!("🍽  NutriVision - Capture or Upload Food\n");

    loop {
        let path: String = Input::new()
            .with_prompt("Image file")
            .interact_text()?;

        if let Err(err) = analyze_once(session, PathBuf::from(path.trim()), json).await {
            tracing::debug!(error = %err, "analysis attempt failed");
            println!("✖ {}", err);
        }

        println!();
        let again = Confirm::new()
            .with_prompt("Choose a different image?")
            .default(true)
            .interact()?;
        if !again {
            break;
        }
        session.reset()?;
    }

    Ok(())
}
