//! Tidy CLI - string and value helpers from the command line

use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::Colorize;

use tidy_utils::{
    CoreUtils, FixSuggestion, GateOptions, ParamFilter, UtilError, UtilsConfig, Value,
};

#[derive(Parser)]
#[command(name = "tidy")]
#[command(about = "Date, duration, URL and cookie string helpers")]
#[command(version)]
struct Cli {
    /// Path to a YAML config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Join date components, zero-padding all but the first
    Date {
        parts: Vec<String>,

        /// Separator (defaults to the config's date_separator)
        #[arg(short, long)]
        sep: Option<String>,
    },

    /// Parse a duration like 1天2小时3分钟
    Duration {
        input: String,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove or keep query parameters
    Url {
        url: String,

        /// Key to remove (repeatable)
        #[arg(long)]
        remove: Vec<String>,

        /// Key to keep (repeatable)
        #[arg(long)]
        reserve: Vec<String>,
    },

    /// Encode name=value pairs into one cookie string
    Cookies {
        /// Pairs like 'tid=abc; Path=/'
        pairs: Vec<String>,

        /// Separator (defaults to the config's cookie.separator)
        #[arg(short, long)]
        sep: Option<String>,
    },

    /// Print the type tag of a JSON value
    Classify { json: String },

    /// Hold a simulated operation open for at least the minimum interval
    Gate {
        /// Minimum interval in ms (defaults to the config's gate.min_interval_ms)
        #[arg(long)]
        min_ms: Option<u64>,

        /// How long the simulated operation takes, in ms
        #[arg(long, default_value_t = 0)]
        work_ms: u64,
    },
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so command output stays pipeable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match load_utils(cli.config.as_deref()) {
        Ok(utils) => run(&utils, cli.command).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        if let Some(suggestion) = e.fix_suggestion() {
            eprintln!("  {} {}", "Fix:".yellow(), suggestion);
        }
        std::process::exit(1);
    }
}

fn load_utils(path: Option<&str>) -> Result<CoreUtils, UtilError> {
    let config = match path {
        Some(path) => UtilsConfig::from_file(path)?,
        None => UtilsConfig::default(),
    };
    Ok(CoreUtils::with_config(config))
}

async fn run(utils: &CoreUtils, command: Commands) -> Result<(), UtilError> {
    match command {
        Commands::Date { parts, sep } => {
            let out = match sep {
                Some(sep) => tidy_utils::arr_to_string(parts.as_slice(), &sep),
                None => utils.arr_to_string(parts.as_slice()),
            };
            println!("{}", out);
        }
        Commands::Duration { input, json } => {
            let info = utils.parse_duration_default(&input);
            if json {
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("{} ({} ms)", info.formatted, info.total_ms);
            }
        }
        Commands::Url { url, remove, reserve } => {
            let out = if remove.is_empty() && reserve.is_empty() {
                utils.filter_url(&url)
            } else {
                utils.filter_url_params(&url, &ParamFilter { remove, reserve })
            };
            println!("{}", out);
        }
        Commands::Cookies { pairs, sep } => {
            let parsed = pairs
                .iter()
                .map(|pair| {
                    pair.split_once('=').ok_or_else(|| UtilError::InvalidArgument {
                        details: format!("'{}' is not a name=value pair", pair),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            let sep = sep.unwrap_or_else(|| utils.config().cookie.separator.clone());
            println!("{}", tidy_utils::encode_cookies(parsed, &sep));
        }
        Commands::Classify { json } => {
            let value = Value::from(serde_json::from_str::<serde_json::Value>(&json)?);
            println!("{} ({})", utils.classify(&value), utils.coarse_classify(&value));
        }
        Commands::Gate { min_ms, work_ms } => {
            let gate = match min_ms {
                Some(min_interval_ms) => utils.gate_with(GateOptions { min_interval_ms }),
                None => utils.gate(),
            };
            let started = tokio::time::Instant::now();

            gate.start_with(|| println!("{} started", "→".cyan()));
            tokio::time::sleep(Duration::from_millis(work_ms)).await;
            gate.end_with(|| println!("{} ended", "✓".green())).await?;

            println!("held for {} ms", started.elapsed().as_millis());
        }
    }

    Ok(())
}
