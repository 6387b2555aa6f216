//! Config command implementation.
//!
//! Persistent CLI settings stored as JSON under the user config directory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use mandate_agent::config::AgentConfig;
use mandate_guidelines::comparison::DEFAULT_COMPARISON_DELAY;
use mandate_portfolio::store::DEFAULT_PORTFOLIO;
use tracing::{debug, warn};

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};
use crate::output::{print_header, print_info, print_output, print_success, print_warning, KeyValue};

/// Environment variable overriding the config directory.
pub const CONFIG_DIR_ENV: &str = "MANDATE_CONFIG_DIR";

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Get a configuration value
    Get(GetArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// List available configuration keys
    List,

    /// Reset configuration to defaults
    Reset(ResetArgs),

    /// Show configuration file location
    Path,
}

/// Arguments for get subcommand.
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Configuration key
    pub key: String,
}

/// Arguments for set subcommand.
#[derive(Args, Debug)]
pub struct SetArgs {
    /// Configuration key
    pub key: String,

    /// Configuration value
    pub value: String,
}

/// Arguments for reset subcommand.
#[derive(Args, Debug)]
pub struct ResetArgs {
    /// Reset all settings
    #[arg(long)]
    pub all: bool,

    /// Specific key to reset
    pub key: Option<String>,
}

/// CLI configuration keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    /// Agent service base URL
    ApiBaseUrl,
    /// Agent service API key
    ApiKey,
    /// Per-request timeout
    RequestTimeoutSecs,
    /// Portfolio shown by `mandate portfolio`
    DefaultPortfolio,
    /// Default output format
    DefaultFormat,
    /// Simulated comparison delay
    ComparisonDelayMs,
    /// Whether to use colors
    UseColors,
}

impl ConfigKey {
    /// Every key in display order.
    pub const ALL: [ConfigKey; 7] = [
        Self::ApiBaseUrl,
        Self::ApiKey,
        Self::RequestTimeoutSecs,
        Self::DefaultPortfolio,
        Self::DefaultFormat,
        Self::ComparisonDelayMs,
        Self::UseColors,
    ];

    /// Parses a key name or its short alias.
    pub fn parse(s: &str) -> CliResult<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "api_base_url" | "api_url" | "url" => Ok(Self::ApiBaseUrl),
            "api_key" | "key" => Ok(Self::ApiKey),
            "request_timeout_secs" | "timeout" => Ok(Self::RequestTimeoutSecs),
            "default_portfolio" | "portfolio" => Ok(Self::DefaultPortfolio),
            "default_format" | "format" => Ok(Self::DefaultFormat),
            "comparison_delay_ms" | "delay" => Ok(Self::ComparisonDelayMs),
            "use_colors" | "colors" => Ok(Self::UseColors),
            _ => Err(CliError::UnknownKey(s.to_string())),
        }
    }

    /// Stored key name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ApiBaseUrl => "api_base_url",
            Self::ApiKey => "api_key",
            Self::RequestTimeoutSecs => "request_timeout_secs",
            Self::DefaultPortfolio => "default_portfolio",
            Self::DefaultFormat => "default_format",
            Self::ComparisonDelayMs => "comparison_delay_ms",
            Self::UseColors => "use_colors",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            Self::ApiBaseUrl => "Agent service base URL (http:// or https://)",
            Self::ApiKey => "Agent service API key, sent as a bearer token",
            Self::RequestTimeoutSecs => "Per-request timeout in seconds",
            Self::DefaultPortfolio => "Portfolio shown when none is given (ABC, XYZ, DEF)",
            Self::DefaultFormat => "Default output format (table, json, csv, minimal)",
            Self::ComparisonDelayMs => "Simulated version comparison time in milliseconds",
            Self::UseColors => "Enable colored output (true, false)",
        }
    }

    /// Value used when the key is not set.
    pub fn default_value(&self) -> String {
        match self {
            Self::ApiBaseUrl => AgentConfig::default().api_base_url,
            Self::ApiKey => String::new(),
            Self::RequestTimeoutSecs => AgentConfig::default().request_timeout_secs.to_string(),
            Self::DefaultPortfolio => DEFAULT_PORTFOLIO.to_string(),
            Self::DefaultFormat => "table".to_string(),
            Self::ComparisonDelayMs => DEFAULT_COMPARISON_DELAY.as_millis().to_string(),
            Self::UseColors => "true".to_string(),
        }
    }

    /// Checks a value before it is stored.
    pub fn validate(&self, value: &str) -> CliResult<()> {
        match self {
            Self::ApiBaseUrl => {
                AgentConfig::with_base_url(value)
                    .validate()
                    .map_err(|e| CliError::Config(e.to_string()))?;
            }
            Self::ApiKey | Self::DefaultPortfolio => {}
            Self::RequestTimeoutSecs => {
                let secs: u64 = value
                    .parse()
                    .map_err(|_| CliError::invalid("timeout", value, "Must be a number."))?;
                if secs == 0 {
                    return Err(CliError::invalid("timeout", value, "Must be positive."));
                }
            }
            Self::DefaultFormat => {
                if OutputFormat::from_name(value).is_none() {
                    return Err(CliError::invalid(
                        "format",
                        value,
                        "Use table, json, csv, or minimal.",
                    ));
                }
            }
            Self::ComparisonDelayMs => {
                value
                    .parse::<u64>()
                    .map_err(|_| CliError::invalid("delay", value, "Must be a number."))?;
            }
            Self::UseColors => {
                parse_bool(value)?;
            }
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> CliResult<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(CliError::invalid("boolean", value, "Use true or false.")),
    }
}

/// Stored settings.
#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Settings {
    #[serde(flatten)]
    values: BTreeMap<String, String>,
}

impl Settings {
    /// Loads settings from the default location, or defaults when absent.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path()?)
    }

    /// Loads settings from `path`, or defaults when the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Cannot read settings file {}", path.display()))?;
            let settings = serde_json::from_str(&content)
                .with_context(|| format!("Invalid settings file {}", path.display()))?;
            debug!(path = %path.display(), "Loaded CLI settings");
            Ok(settings)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads settings, falling back to defaults when the file is unreadable.
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(settings) => settings,
            Err(e) => {
                warn!(error = %format!("{e:#}"), "Ignoring stored settings; using defaults");
                Self::default()
            }
        }
    }

    /// Writes settings to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&config_path()?)
    }

    /// Writes settings to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Stored value, if set.
    pub fn get(&self, key: ConfigKey) -> Option<&str> {
        self.values.get(key.as_str()).map(String::as_str)
    }

    /// Stored value or the key's default.
    pub fn value(&self, key: ConfigKey) -> String {
        self.get(key)
            .map(str::to_string)
            .unwrap_or_else(|| key.default_value())
    }

    /// Validates and stores a value.
    pub fn set(&mut self, key: ConfigKey, value: &str) -> CliResult<()> {
        key.validate(value)?;
        self.values.insert(key.as_str().to_string(), value.to_string());
        Ok(())
    }

    /// Removes a stored value.
    pub fn remove(&mut self, key: ConfigKey) {
        self.values.remove(key.as_str());
    }

    /// Output format used when `--format` is not given.
    pub fn format(&self) -> OutputFormat {
        OutputFormat::from_name(&self.value(ConfigKey::DefaultFormat)).unwrap_or_default()
    }

    /// Whether colored output is enabled.
    pub fn use_colors(&self) -> bool {
        parse_bool(&self.value(ConfigKey::UseColors)).unwrap_or(true)
    }

    /// Portfolio used when none is given.
    pub fn default_portfolio(&self) -> String {
        self.value(ConfigKey::DefaultPortfolio)
    }

    /// Simulated comparison delay.
    pub fn comparison_delay(&self) -> Duration {
        self.value(ConfigKey::ComparisonDelayMs)
            .parse()
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_COMPARISON_DELAY)
    }

    /// Agent service settings from the stored values.
    pub fn agent_config(&self) -> AgentConfig {
        let defaults = AgentConfig::default();
        AgentConfig {
            api_base_url: self.value(ConfigKey::ApiBaseUrl),
            api_key: self.get(ConfigKey::ApiKey).filter(|k| !k.is_empty()).map(str::to_string),
            request_timeout_secs: self
                .value(ConfigKey::RequestTimeoutSecs)
                .parse()
                .unwrap_or(defaults.request_timeout_secs),
            check_timeout_secs: None,
        }
    }

    /// Value as shown to the user; the API key is masked.
    fn display_value(&self, key: ConfigKey) -> String {
        let value = self.value(key);
        if key == ConfigKey::ApiKey && !value.is_empty() {
            mask(&value)
        } else {
            value
        }
    }
}

fn mask(secret: &str) -> String {
    let tail: String = secret
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    if secret.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("****{tail}")
    }
}

/// Get the config file path.
pub fn config_path() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir).join("config.json"));
        }
    }
    let home = dirs::config_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    Ok(home.join("mandate").join("config.json"))
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, format: OutputFormat) -> Result<()> {
    match args.command {
        ConfigCommand::Show => execute_show(format),
        ConfigCommand::Get(get_args) => execute_get(&get_args, format),
        ConfigCommand::Set(set_args) => execute_set(&set_args),
        ConfigCommand::List => execute_list(format),
        ConfigCommand::Reset(reset_args) => execute_reset(reset_args),
        ConfigCommand::Path => execute_path(),
    }
}

/// Show current configuration.
fn execute_show(format: OutputFormat) -> Result<()> {
    let settings = Settings::load()?;
    let results: Vec<KeyValue> = ConfigKey::ALL
        .iter()
        .map(|key| KeyValue::new(key.as_str(), settings.display_value(*key)))
        .collect();

    match format {
        OutputFormat::Table => {
            print_header("Current Configuration");
            print_output(&results, format)?;
        }
        OutputFormat::Json => {
            let output: BTreeMap<&str, String> = ConfigKey::ALL
                .iter()
                .map(|key| (key.as_str(), settings.display_value(*key)))
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Csv => print_output(&results, format)?,
        OutputFormat::Minimal => {
            for kv in &results {
                println!("{}={}", kv.key, kv.value);
            }
        }
    }
    Ok(())
}

/// Get a configuration value.
fn execute_get(args: &GetArgs, format: OutputFormat) -> Result<()> {
    let settings = Settings::load()?;
    let key = ConfigKey::parse(&args.key)?;
    let value = settings.display_value(key);

    match format {
        OutputFormat::Table | OutputFormat::Csv => println!("{}: {}", key.as_str(), value),
        OutputFormat::Json => {
            let output = serde_json::json!({ "key": key.as_str(), "value": value });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Minimal => println!("{value}"),
    }
    Ok(())
}

/// Set a configuration value.
fn execute_set(args: &SetArgs) -> Result<()> {
    let key = ConfigKey::parse(&args.key)?;
    let mut settings = Settings::load()?;
    settings.set(key, &args.value)?;
    settings.save()?;

    let shown = settings.display_value(key);
    print_success(&format!("Set {} = {}", key.as_str(), shown));
    Ok(())
}

/// List available configuration keys.
fn execute_list(format: OutputFormat) -> Result<()> {
    let results: Vec<KeyValue> = ConfigKey::ALL
        .iter()
        .map(|key| {
            KeyValue::new(
                key.as_str(),
                format!("{} (default: {})", key.description(), key.default_value()),
            )
        })
        .collect();

    match format {
        OutputFormat::Table => {
            print_header("Available Configuration Keys");
            print_output(&results, format)?;
        }
        OutputFormat::Json => {
            let output: Vec<_> = ConfigKey::ALL
                .iter()
                .map(|key| {
                    serde_json::json!({
                        "key": key.as_str(),
                        "description": key.description(),
                        "default": key.default_value()
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Csv => print_output(&results, format)?,
        OutputFormat::Minimal => {
            for key in ConfigKey::ALL {
                println!("{}", key.as_str());
            }
        }
    }
    Ok(())
}

/// Reset configuration.
fn execute_reset(args: ResetArgs) -> Result<()> {
    if args.all {
        Settings::default().save()?;
        print_success("Reset all configuration to defaults");
    } else if let Some(key_str) = args.key {
        let key = ConfigKey::parse(&key_str)?;
        let mut settings = Settings::load()?;
        settings.remove(key);
        settings.save()?;
        print_success(&format!(
            "Reset {} to default ({})",
            key.as_str(),
            key.default_value()
        ));
    } else {
        print_warning("Use --all to reset all settings, or specify a key to reset");
    }
    Ok(())
}

/// Show configuration file path.
fn execute_path() -> Result<()> {
    let path = config_path()?;
    print_info(&format!("Config file: {}", path.display()));
    if path.exists() {
        print_info("Status: exists");
    } else {
        print_info("Status: not created yet (using defaults)");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_aliases() {
        assert_eq!(ConfigKey::parse("url").unwrap(), ConfigKey::ApiBaseUrl);
        assert_eq!(ConfigKey::parse("Default-Format").unwrap(), ConfigKey::DefaultFormat);
        assert!(matches!(ConfigKey::parse("currency"), Err(CliError::UnknownKey(_))));
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.format(), OutputFormat::Table);
        assert!(settings.use_colors());
        assert_eq!(settings.default_portfolio(), "ABC");
        assert_eq!(settings.comparison_delay(), Duration::from_millis(1500));
        assert_eq!(settings.agent_config(), AgentConfig::default());
    }

    #[test]
    fn test_set_validates() {
        let mut settings = Settings::default();
        assert!(settings.set(ConfigKey::DefaultFormat, "yaml").is_err());
        assert!(settings.set(ConfigKey::RequestTimeoutSecs, "0").is_err());
        assert!(settings.set(ConfigKey::ApiBaseUrl, "ftp://svc").is_err());

        settings.set(ConfigKey::DefaultFormat, "json").unwrap();
        settings.set(ConfigKey::UseColors, "no").unwrap();
        assert_eq!(settings.format(), OutputFormat::Json);
        assert!(!settings.use_colors());
    }

    #[test]
    fn test_round_trip_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut settings = Settings::default();
        settings.set(ConfigKey::ApiKey, "sk-live-123456").unwrap();
        settings.set(ConfigKey::RequestTimeoutSecs, "45").unwrap();
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded, settings);
        let agent = loaded.agent_config();
        assert_eq!(agent.api_key.as_deref(), Some("sk-live-123456"));
        assert_eq!(agent.request_timeout_secs, 45);
        assert_eq!(loaded.display_value(ConfigKey::ApiKey), "****3456");
    }

    #[test]
    fn test_malformed_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = Settings::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid settings file"));
        assert!(err.to_string().contains(&path.display().to_string()));
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Settings::load_from(&dir.path().join("absent.json")).unwrap();
        assert_eq!(loaded, Settings::default());
    }
}
