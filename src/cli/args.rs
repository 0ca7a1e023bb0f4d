use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the redline edit-proposal service.
#[derive(Parser, Debug, PartialEq, Clone)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file (defaults to config.toml next to the binary).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to execute. Serves HTTP when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands for the redline application.
#[derive(Subcommand, Debug, PartialEq, Clone)]
pub enum Commands {
    /// Run the HTTP edit endpoint.
    Serve {
        /// Address to bind, overriding the config.
        #[arg(long)]
        host: Option<String>,

        /// Port to bind, overriding the config.
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Ask for a single proposal against a local file and print it.
    Propose {
        /// File whose content is the current document.
        #[arg(short, long)]
        file: PathBuf,

        /// Instruction, or feedback when --feedback is set.
        #[arg(short, long)]
        prompt: String,

        /// JSON file holding prior conversation turns.
        #[arg(long)]
        history: Option<PathBuf>,

        /// Treat the prompt as feedback on a previous proposal.
        #[arg(long)]
        feedback: bool,

        /// JSON file holding the previous proposal.
        #[arg(long, requires = "feedback")]
        previous: Option<PathBuf>,

        /// Print the raw proposal JSON instead of a summary.
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration options.
    Config {
        /// Set the bind address.
        #[arg(long)]
        set_host: Option<String>,

        /// Set the bind port.
        #[arg(long)]
        set_port: Option<u16>,

        /// Set the log level (debug, info, warn, error, off).
        #[arg(long)]
        set_log_level: Option<String>,

        /// Set the model identifier.
        #[arg(long)]
        set_model: Option<String>,

        /// Set the base URL of the chat completions API.
        #[arg(long)]
        set_base_url: Option<String>,

        /// Set the sampling temperature.
        #[arg(long)]
        set_temperature: Option<f32>,

        /// Set the maximum accepted request body in bytes.
        #[arg(long)]
        set_max_body_bytes: Option<usize>,
    },
}
