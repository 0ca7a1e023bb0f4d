use clap::Parser;
use redline::cli::args::{Args, Commands};
use redline::commands::{self, ProposeOptions};
use redline::errors::AppError;
use redline::utils::config::read_config;
use redline::utils::logger;

/// The main entry point of the application
#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();
    let config_path = args.config.as_deref();

    // Config edits run without the logger and may repair an invalid file
    if let Some(Commands::Config {
        set_host,
        set_port,
        set_log_level,
        set_model,
        set_base_url,
        set_temperature,
        set_max_body_bytes,
    }) = args.command.clone()
    {
        commands::handle_config_subcommand(
            config_path,
            set_host,
            set_port,
            set_log_level,
            set_model,
            set_base_url,
            set_temperature,
            set_max_body_bytes,
        )?;
        return Ok(());
    }

    let config = read_config(config_path)?;
    logger::setup_logger(&config);

    match args.command {
        Some(Commands::Propose {
            file,
            prompt,
            history,
            feedback,
            previous,
            json,
        }) => {
            commands::handle_propose_subcommand(
                &config,
                ProposeOptions {
                    file,
                    prompt,
                    history,
                    feedback,
                    previous,
                    json,
                },
            )
            .await
        }
        Some(Commands::Serve { host, port }) => {
            commands::handle_serve_subcommand(&config, host, port).await
        }
        Some(Commands::Config { .. }) | None => {
            commands::handle_serve_subcommand(&config, None, None).await
        }
    }
}
