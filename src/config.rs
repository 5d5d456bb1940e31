use clap::{Args, Parser};
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration flags shared by every CLI command.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE", global = true)]
    pub config: Option<String>,

    /// Backend base URL (the `/api` prefix is appended by the client)
    #[arg(long, env = "TMB_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Directory holding the credential and session files
    #[arg(long, env = "TMB_STORAGE_DIR", global = true)]
    pub storage_dir: Option<String>,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct ConfigCli {
    #[command(flatten)]
    args: ConfigArgs,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    /// Name of the credential entry holding the auth cookie.
    pub cookie_name: String,
    /// Lifetime of the auth cookie.
    pub cookie_ttl_days: u32,
    pub storage_dir: String,
}

impl SessionConfig {
    pub fn credentials_path(&self) -> PathBuf {
        Path::new(&self.storage_dir).join("credentials.json")
    }

    pub fn session_path(&self) -> PathBuf {
        Path::new(&self.storage_dir).join("session.json")
    }

    pub fn cookie_ttl(&self) -> std::time::Duration {
        std::time::Duration::from_secs(u64::from(self.cookie_ttl_days) * 24 * 60 * 60)
    }
}

/// Config file looked up in the working directory when none is given.
const DEFAULT_CONFIG_FILE: &str = "tmb-admin.yaml";

impl AppConfig {
    /// Load from defaults, config file and environment only.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from_args(["tmb-admin"])
    }

    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli = ConfigCli::try_parse_from(args)
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Self::from_args(&cli.args)
    }

    /// Priority: CLI flag > CLI env var > `TMB_` env > config file > defaults.
    pub fn from_args(args: &ConfigArgs) -> Result<Self, config::ConfigError> {
        let mut builder = Config::builder()
            .set_default("api.base_url", "http://localhost:8000")?
            .set_default("session.cookie_name", "tmb_cookie")?
            .set_default("session.cookie_ttl_days", 7)?
            .set_default("session.storage_dir", ".tmb")?;

        builder = match &args.config {
            Some(path) => builder.add_source(File::new(path, FileFormat::Yaml).required(true)),
            None => builder
                .add_source(File::new(DEFAULT_CONFIG_FILE, FileFormat::Yaml).required(false)),
        };

        // E.g. TMB_API__BASE_URL=https://admin.example.com
        builder = builder.add_source(
            Environment::with_prefix("TMB")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        if let Some(url) = &args.base_url {
            builder = builder.set_override("api.base_url", url.as_str())?;
        }
        if let Some(dir) = &args.storage_dir {
            builder = builder.set_override("session.storage_dir", dir.as_str())?;
        }

        let cfg = builder.build()?;
        cfg.try_deserialize()
    }
}
