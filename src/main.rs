//! `shellrelay` 바이너리 진입점.

use shellrelay::interface::cli::{AppComposition, Cli, CliAction, run_shell};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let composition = AppComposition::default();

    match Cli::parse_action() {
        CliAction::InspectConfig(options) => {
            match composition.inspect_config_usecase().execute(&options) {
                Ok(json) => println!("{json}"),
                Err(err) => {
                    eprintln!("error: {err:#}");
                    std::process::exit(1);
                }
            }
        }
        CliAction::Shell(options) => {
            if let Err(err) = run_shell(&composition, &options).await {
                eprintln!("error: {err:#}");
                std::process::exit(1);
            }
        }
    }
}
