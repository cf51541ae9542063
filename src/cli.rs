use clap::Parser;

/// Command line interface for the application
#[derive(Parser)]
pub struct Cli {
    /// Path to the YAML configuration file; defaults apply when omitted
    #[arg(short, long)]
    pub config: Option<String>,

    /// Overrides the configured HTTP port
    #[arg(long)]
    pub port: Option<u16>,

    /// Overrides the configured SQLite database path
    #[arg(long)]
    pub database_path: Option<String>,

    /// Sets the logging verbosity level for the application
    /// Possible values: "error", "warn", "info", "debug", "trace"
    /// Default: "info"
    #[arg(long, default_value_t = String::from("info"))]
    pub logging_level: String,

    /// Also write logs to daily rotating files in ./logs
    #[arg(long, default_value_t = false)]
    pub log_to_file: bool,
}
