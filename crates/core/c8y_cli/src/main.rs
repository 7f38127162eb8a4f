#![forbid(unsafe_code)]

use anyhow::Context;
use c8y_api::C8yClient;
use c8y_cli::cli::Opt;
use c8y_cli::cli::Output;
use c8y_cli::logging::initialise_tracing_subscriber;
use c8y_config::C8yConfigLocation;
use c8y_http::C8yHttpClient;
use c8y_http::CancellationToken;
use clap::Parser;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let opt = Opt::parse();
    initialise_tracing_subscriber(opt.debug);

    let config_location = C8yConfigLocation::from_custom_root(&opt.config_dir);
    let (config, warnings) = config_location.load_with_warnings().with_context(|| {
        format!(
            "failed to read the configuration from {}",
            config_location.config_file_path().display()
        )
    })?;
    warnings.emit();

    let http = C8yHttpClient::try_from(&config).context("invalid Cumulocity configuration")?;
    let c8y = C8yClient::from(http);

    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Interrupted, cancelling the request");
                cancel.cancel();
            }
        }
    });

    let description = opt.command.description();
    let output = opt
        .command
        .execute(&c8y, cancel)
        .await
        .with_context(|| format!("failed to {description}"))?;

    match output {
        Output::Json(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Output::Saved { path, size } => info!("Saved {size} bytes to {}", path.display()),
        Output::Done => {}
    }
    Ok(())
}
