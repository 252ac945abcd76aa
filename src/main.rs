use clap::Parser;
use cv_render::cli::{Cli, LogFormat};
use cv_render::CvRenderer;
use std::process::ExitCode;
use tracing::error;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_current_span(false)
                    .with_span_list(false),
            )
            .init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .init(),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // --help and --version arrive here too
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    init_logging(cli.log_format);

    let config = cli.config_from_env();
    let renderer = CvRenderer::new(config);

    if cli.dry_run {
        let yaml = match renderer.build_input().await {
            Ok(document) => serde_yaml::to_string(&document),
            Err(e) => {
                error!("{:#}", e);
                return ExitCode::FAILURE;
            }
        };
        return match yaml {
            Ok(yaml) => {
                print!("{}", yaml);
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!("Failed to serialize engine input: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    match renderer.run().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
