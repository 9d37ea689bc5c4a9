use aadhaar_verify::{cli, config, console, error, logging, render};
use aadhaar_verify::api::HttpApi;
use aadhaar_verify::workflow::{SelectedFile, VerificationSession};
use aadhaar_verify_common::OperationResult;
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use serde::Serialize;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Analyze { file, json } => {
            let session = open_session(&config, cli.api_base.as_deref())?;
            session.select_analyze_file(Some(SelectedFile::open(&file)?)).await;

            let outcome = render::with_spinner("Analyzing…", session.submit_analyze()).await;
            if json {
                print_json(&outcome)?;
            } else {
                println!("{}", render::render_analyze(&session.analyze_view().await));
            }
            session.teardown().await;
            Ok(exit_code(&outcome))
        }

        Commands::VerifyQr { file, json } => {
            let session = open_session(&config, cli.api_base.as_deref())?;
            session.select_qr_file(Some(SelectedFile::open(&file)?)).await;

            let outcome = render::with_spinner("Decoding…", session.submit_qr()).await;
            if json {
                print_json(&outcome)?;
            } else {
                println!("{}", render::render_qr(&session.qr_view().await));
            }
            session.teardown().await;
            Ok(exit_code(&outcome))
        }

        Commands::Lookup { aadhaar, json } => {
            let session = open_session(&config, cli.api_base.as_deref())?;
            session.select_identifier(&aadhaar).await;

            let outcome = render::with_spinner("Looking…", session.submit_lookup()).await;
            if json {
                print_json(&outcome)?;
            } else {
                println!("{}", render::render_lookup(&session.lookup_view().await));
            }
            session.teardown().await;
            Ok(exit_code(&outcome))
        }

        Commands::Check { image, qr, aadhaar } => {
            println!("🪪 aadhaar-verify - check\n");
            let session = open_session(&config, cli.api_base.as_deref())?;

            if let Some(path) = &image {
                session.select_analyze_file(Some(SelectedFile::open(path)?)).await;
            }
            if let Some(path) = &qr {
                session.select_qr_file(Some(SelectedFile::open(path)?)).await;
            }
            if let Some(raw) = &aadhaar {
                session.select_identifier(raw).await;
            }

            // 指定されたものだけを同時に送信
            render::with_spinner("Checking…", async {
                tokio::join!(
                    run_if(image.is_some(), session.submit_analyze()),
                    run_if(qr.is_some(), session.submit_qr()),
                    run_if(aadhaar.is_some(), session.submit_lookup()),
                )
            })
            .await;

            println!("{}", render::render_analyze(&session.analyze_view().await));
            println!("{}", render::render_qr(&session.qr_view().await));
            println!("{}", render::render_lookup(&session.lookup_view().await));
            println!("{}", render::render_history(&session.history().await));
            session.teardown().await;
            Ok(ExitCode::SUCCESS)
        }

        Commands::Console => {
            let session = open_session(&config, cli.api_base.as_deref())?;
            console::run_console(&session).await?;
            Ok(ExitCode::SUCCESS)
        }

        Commands::Config { set_api_base, show } => {
            let mut config = config;

            if let Some(url) = set_api_base {
                config.set_api_base(url)?;
                println!("✔ API base saved");
            }

            if show {
                println!("Settings:");
                println!("  File:     {}", Config::config_path()?.display());
                println!("  Stored:   {}", config.api_base.as_deref().unwrap_or("(none)"));
                println!("  Effective: {}", config.api_base(cli.api_base.as_deref())?);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn open_session(config: &Config, flag: Option<&str>) -> Result<VerificationSession<HttpApi>> {
    let base = config.api_base(flag)?;
    tracing::debug!(%base, "using API base");
    Ok(VerificationSession::new(HttpApi::new(base)?))
}

async fn run_if<F: std::future::Future>(enabled: bool, fut: F) -> Option<F::Output> {
    if enabled {
        Some(fut.await)
    } else {
        None
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn exit_code<T>(outcome: &OperationResult<T>) -> ExitCode {
    if outcome.is_failure() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
