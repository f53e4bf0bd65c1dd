use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

use salestrack_core::CreateRecordCommand;

#[derive(Parser, Debug)]
#[command(name = "salestrack", about = "SalesTrack - record, filter and chart sales entries")]
pub struct CliArgs {
    /// Path to config file
    #[arg(short, long, default_value = "salestrack.toml", global = true)]
    pub config: String,

    /// Data file (overrides config file)
    #[arg(short, long, global = true)]
    pub data: Option<PathBuf>,

    /// Log level (overrides config file)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Add a sales entry and save it
    Add(AddArgs),
    /// Show the filtered table, the total and the charts
    Show(ShowArgs),
    /// List the areas available for filtering
    Areas,
    /// List the years available for filtering
    Years,
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct AddArgs {
    /// Salesperson name
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub area: String,

    /// Sales amount, zero or more
    #[arg(long, allow_hyphen_values = true)]
    pub sales: Decimal,

    /// Month, 1 to 12
    #[arg(long, allow_hyphen_values = true)]
    pub month: i64,

    /// Year, 2000 to 2100
    #[arg(long, allow_hyphen_values = true)]
    pub year: i64,
}

impl From<AddArgs> for CreateRecordCommand {
    fn from(args: AddArgs) -> Self {
        CreateRecordCommand {
            name: args.name,
            area: args.area,
            sales: args.sales,
            month: args.month,
            year: args.year,
        }
    }
}

#[derive(Args, Debug, Clone, PartialEq, Default)]
pub struct ShowArgs {
    /// Only show these areas (repeatable, default: all)
    #[arg(long = "area")]
    pub areas: Vec<String>,

    /// Only show these years (repeatable, default: all)
    #[arg(long = "year")]
    pub years: Vec<u16>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub chart: ChartConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub json: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChartConfig {
    /// Width in characters of the longest bar
    #[serde(default = "default_chart_width")]
    pub width: usize,
}

fn default_data_path() -> PathBuf {
    PathBuf::from("data.csv")
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_chart_width() -> usize {
    40
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig { path: default_data_path() }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
            json: false,
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        ChartConfig { width: default_chart_width() }
    }
}

impl Config {
    pub fn load(cli: &CliArgs) -> Self {
        let mut config = match std::fs::read_to_string(&cli.config) {
            Ok(contents) => Config::parse(&contents).unwrap_or_else(|e| {
                eprintln!("Warning: Failed to parse config file: {}", e);
                Config::default()
            }),
            Err(_) => Config::default(),
        };

        // CLI overrides
        if let Some(ref data) = cli.data {
            config.store.path = data.clone();
        }
        if let Some(ref level) = cli.log_level {
            config.logging.level = level.clone();
        }

        config
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}

impl LoggingConfig {
    /// Installs the global subscriber. `RUST_LOG` wins over the configured
    /// level. Logs go to stderr so they never mix with rendered output.
    pub fn init(&self) {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        let result = if self.json {
            fmt().json().with_env_filter(filter).with_writer(std::io::stderr).try_init()
        } else {
            fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init()
        };

        if let Err(e) = result {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.store.path, PathBuf::from("data.csv"));
        assert_eq!(config.logging.level, "warn");
        assert!(!config.logging.json);
        assert_eq!(config.chart.width, 40);
    }

    #[test]
    fn test_parse_partial_file_keeps_defaults() {
        let config = Config::parse("[store]\npath = \"sales/2024.csv\"\n\n[chart]\nwidth = 20\n").unwrap();
        assert_eq!(config.store.path, PathBuf::from("sales/2024.csv"));
        assert_eq!(config.chart.width, 20);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_cli_overrides_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("salestrack.toml");
        std::fs::write(&path, "[store]\npath = \"from-file.csv\"\n[logging]\nlevel = \"info\"\n").unwrap();

        let cli = CliArgs::parse_from([
            "salestrack",
            "--config",
            path.to_str().unwrap(),
            "--data",
            "override.csv",
            "--log-level",
            "debug",
            "areas",
        ]);
        let config = Config::load(&cli);

        assert_eq!(config.store.path, PathBuf::from("override.csv"));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_missing_config_file_uses_defaults() {
        let cli = CliArgs::parse_from(["salestrack", "--config", "/nonexistent/salestrack.toml", "years"]);
        let config = Config::load(&cli);
        assert_eq!(config.store.path, PathBuf::from("data.csv"));
    }

    #[test]
    fn test_parse_show_filters() {
        let cli = CliArgs::parse_from([
            "salestrack", "show", "--area", "north", "--area", "south", "--year", "2024", "--format", "json",
        ]);
        match cli.command {
            Command::Show(args) => {
                assert_eq!(args.areas, vec!["north", "south"]);
                assert_eq!(args.years, vec![2024]);
                assert_eq!(args.format, OutputFormat::Json);
            }
            other => panic!("expected show, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_add_keeps_out_of_range_for_validation() {
        let cli = CliArgs::parse_from([
            "salestrack", "add", "--name", "A", "--area", "north", "--sales", "-5", "--month", "13", "--year", "2024",
        ]);
        match cli.command {
            Command::Add(args) => {
                assert_eq!(args.sales, Decimal::from(-5));
                assert_eq!(args.month, 13);
            }
            other => panic!("expected add, got {:?}", other),
        }
    }
}
