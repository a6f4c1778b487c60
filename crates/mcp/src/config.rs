// Server configuration: CLI flags, HARNESS_* environment, optional TOML file

use crate::tools::ScopeDefaults;
use anyhow::{bail, Context, Result};
use clap::builder::BoolishValueParser;
use clap::{Args, Parser, Subcommand};
use harness_sdk::config::DEFAULT_TIMEOUT;
use harness_sdk::{HarnessClient, RetryConfig};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://app.harness.io";

/// Toolsets enabled when none are configured.
pub const DEFAULT_TOOLSETS: &[&str] = &["all"];

#[derive(Parser, Debug)]
#[command(name = "harness-mcp-server", version)]
#[command(about = "Harness MCP server", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start a server that speaks JSON-RPC over standard input/output
    Stdio(StdioArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct StdioArgs {
    /// Base URL of the Harness installation
    #[arg(long, env = "HARNESS_BASE_URL")]
    pub base_url: Option<String>,

    /// API key used for every request
    #[arg(long, env = "HARNESS_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Account identifier
    #[arg(long, env = "HARNESS_ACCOUNT_ID")]
    pub account_id: Option<String>,

    /// Default organization identifier
    #[arg(long, env = "HARNESS_ORG_ID")]
    pub org_id: Option<String>,

    /// Default project identifier
    #[arg(long, env = "HARNESS_PROJECT_ID")]
    pub project_id: Option<String>,

    /// Restrict the server to read-only operations
    #[arg(
        long,
        env = "HARNESS_READ_ONLY",
        num_args = 0..=1,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    pub read_only: Option<bool>,

    /// Comma separated list of toolsets to enable, defaults to all
    #[arg(long, env = "HARNESS_TOOLSETS", value_delimiter = ',')]
    pub toolsets: Option<Vec<String>>,

    /// Path to log file
    #[arg(long, env = "HARNESS_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(
        long,
        env = "HARNESS_DEBUG",
        num_args = 0..=1,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    pub debug: Option<bool>,

    /// Path to a TOML configuration file
    #[arg(short, long, env = "HARNESS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, env = "HARNESS_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Attempts per retryable request, including the first
    #[arg(long, env = "HARNESS_RETRY_ATTEMPTS")]
    pub retry_attempts: Option<u32>,
}

/// Contents of the optional configuration file. Every key may be omitted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub account_id: Option<String>,
    pub org_id: Option<String>,
    pub project_id: Option<String>,
    pub read_only: Option<bool>,
    pub toolsets: Option<Vec<String>>,
    pub log_file: Option<PathBuf>,
    pub debug: Option<bool>,
    pub timeout_secs: Option<u64>,
    pub retry_attempts: Option<u32>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {}", path.display()))?;
        toml::from_str(&content).context("Failed to parse configuration file")
    }
}

/// Fully resolved settings of one server process.
#[derive(Clone)]
pub struct ServerConfig {
    pub base_url: String,
    pub api_key: String,
    pub account_id: String,
    pub org_id: String,
    pub project_id: String,
    pub read_only: bool,
    pub toolsets: Vec<String>,
    pub log_file: Option<PathBuf>,
    pub debug: bool,
    pub timeout: Duration,
    pub retry_attempts: u32,
}

impl ServerConfig {
    /// Merge flags and environment (already combined by clap) over the
    /// config file over defaults.
    pub fn resolve(args: StdioArgs) -> Result<Self> {
        let file = match &args.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };

        let api_key = non_empty(args.api_key.or(file.api_key))
            .context("API key not provided")?;
        let account_id = non_empty(args.account_id.or(file.account_id))
            .context("account ID not provided")?;

        let toolsets: Vec<String> = args
            .toolsets
            .or(file.toolsets)
            .unwrap_or_else(|| DEFAULT_TOOLSETS.iter().map(|s| s.to_string()).collect())
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if toolsets.is_empty() {
            bail!("no toolsets enabled");
        }

        Ok(Self {
            base_url: non_empty(args.base_url.or(file.base_url))
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_key,
            account_id,
            org_id: args.org_id.or(file.org_id).unwrap_or_default(),
            project_id: args.project_id.or(file.project_id).unwrap_or_default(),
            read_only: args.read_only.or(file.read_only).unwrap_or(false),
            toolsets,
            log_file: args.log_file.or(file.log_file),
            debug: args.debug.or(file.debug).unwrap_or(false),
            timeout: args
                .timeout_secs
                .or(file.timeout_secs)
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_TIMEOUT),
            retry_attempts: args
                .retry_attempts
                .or(file.retry_attempts)
                .unwrap_or_else(|| RetryConfig::default().max_attempts)
                .max(1),
        })
    }

    pub fn scope_defaults(&self) -> ScopeDefaults {
        ScopeDefaults::new(&self.account_id, &self.org_id, &self.project_id)
    }

    pub fn client(&self) -> Result<HarnessClient> {
        let retry = RetryConfig {
            max_attempts: self.retry_attempts,
            ..RetryConfig::default()
        };
        HarnessClient::builder()
            .base_url(&self.base_url)
            .api_key(&self.api_key)
            .timeout(self.timeout)
            .retry_config(retry)
            .build()
            .context("Failed to create Harness client")
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("account_id", &self.account_id)
            .field("org_id", &self.org_id)
            .field("project_id", &self.project_id)
            .field("read_only", &self.read_only)
            .field("toolsets", &self.toolsets)
            .field("log_file", &self.log_file)
            .field("debug", &self.debug)
            .field("timeout", &self.timeout)
            .field("retry_attempts", &self.retry_attempts)
            .finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn stdio_args(argv: &[&str]) -> StdioArgs {
        let mut full = vec!["harness-mcp-server", "stdio"];
        full.extend_from_slice(argv);
        match Cli::try_parse_from(full).unwrap().command {
            Command::Stdio(args) => args,
        }
    }

    fn config_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config =
            ServerConfig::resolve(stdio_args(&["--api-key", "pat.x", "--account-id", "acc"]))
                .unwrap();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.toolsets, vec!["all"]);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.retry_attempts, 3);
        assert!(!config.read_only);
        assert_eq!(config.scope_defaults(), ScopeDefaults::new("acc", "", ""));
    }

    #[test]
    fn test_toolsets_comma_separated() {
        let args = stdio_args(&[
            "--api-key",
            "pat.x",
            "--account-id",
            "acc",
            "--toolsets",
            "pipelines, logs",
        ]);
        let config = ServerConfig::resolve(args).unwrap();
        assert_eq!(config.toolsets, vec!["pipelines", "logs"]);
    }

    #[test]
    fn test_missing_api_key() {
        let err = ServerConfig::resolve(stdio_args(&["--account-id", "acc"])).unwrap_err();
        assert_eq!(err.to_string(), "API key not provided");
    }

    #[test]
    fn test_missing_account() {
        let err = ServerConfig::resolve(stdio_args(&["--api-key", "pat.x"])).unwrap_err();
        assert_eq!(err.to_string(), "account ID not provided");
    }

    #[test]
    fn test_flags_override_file() {
        let file = config_file(
            r#"
            api_key = "pat.file"
            account_id = "file_acc"
            org_id = "file_org"
            read_only = true
            toolsets = ["repositories"]
            timeout_secs = 30
            "#,
        );
        let path = file.path().to_string_lossy().to_string();
        let config =
            ServerConfig::resolve(stdio_args(&["--config", &path, "--org-id", "cli_org"]))
                .unwrap();

        assert_eq!(config.api_key, "pat.file");
        assert_eq!(config.account_id, "file_acc");
        assert_eq!(config.org_id, "cli_org");
        assert!(config.read_only);
        assert_eq!(config.toolsets, vec!["repositories"]);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_boolean_flags() {
        let config = ServerConfig::resolve(stdio_args(&[
            "--api-key",
            "pat.x",
            "--account-id",
            "acc",
            "--read-only",
            "--debug=true",
        ]))
        .unwrap();
        assert!(config.read_only);
        assert!(config.debug);
    }

    #[test]
    fn test_false_flag_overrides_file() {
        let file = config_file(
            r#"
            api_key = "pat.file"
            account_id = "file_acc"
            read_only = true
            debug = true
            "#,
        );
        let path = file.path().to_string_lossy().to_string();
        let config = ServerConfig::resolve(stdio_args(&[
            "--config",
            &path,
            "--read-only=false",
            "--debug=no",
        ]))
        .unwrap();
        assert!(!config.read_only);
        assert!(!config.debug);
    }

    #[test]
    fn test_invalid_file() {
        let file = config_file("api_key = [");
        let path = file.path().to_string_lossy().to_string();
        let err = ServerConfig::resolve(stdio_args(&["--config", &path])).unwrap_err();
        assert_eq!(err.to_string(), "Failed to parse configuration file");
    }

    #[test]
    fn test_unknown_file_key_rejected() {
        let file = config_file("api_token = \"pat.x\"");
        let path = file.path().to_string_lossy().to_string();
        assert!(ServerConfig::resolve(stdio_args(&["--config", &path])).is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = ServerConfig::resolve(stdio_args(&["--config", "/nonexistent/harness.toml"]))
            .unwrap_err();
        assert!(err
            .to_string()
            .starts_with("Failed to read configuration file"));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config =
            ServerConfig::resolve(stdio_args(&["--api-key", "pat.secret", "--account-id", "acc"]))
                .unwrap();
        assert!(!format!("{:?}", config).contains("pat.secret"));
    }
}
