use std::fmt;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::Parser;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Parser)]
#[command(name = "shoprs", version, about = "Minimal e-commerce backend API")]
pub struct Cli {
    #[arg(long, value_name = "ADDR")]
    pub bind: Option<SocketAddr>,

    #[arg(long, value_name = "URL")]
    pub database_url: Option<String>,

    #[arg(long, value_name = "NAME")]
    pub environment: Option<Environment>,

    /// Comma-separated list of allowed CORS origins.
    #[arg(long, value_name = "ORIGINS")]
    pub cors_origins: Option<String>,

    #[arg(long, short = 'c', value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind: SocketAddr,
    pub database_url: String,
    pub environment: Environment,
    pub cors_origins: Vec<String>,
}

/// Deploy environment. Production fails closed on CORS when no origins are
/// configured; development allows all origins in that case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn is_production(self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(ConfigError::InvalidEnvironment {
                value: String::from(raw),
            }),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid config in {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("invalid environment name: {value}")]
    InvalidEnvironment { value: String },
    #[error("invalid value for env var {key}: {value}")]
    InvalidEnvValue { key: String, value: String },
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    bind: Option<SocketAddr>,
    database_url: Option<String>,
    environment: Option<String>,
    cors_origins: Option<String>,
}

impl AppConfig {
    /// Merge CLI flags, environment variables, and the optional config file.
    /// Precedence: CLI > env > file > default.
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let from_file = read_file_config(cli.config.as_deref())?;

        let bind = match cli.bind {
            Some(bind) => bind,
            None => match read_env_port()? {
                Some(port) => SocketAddr::from(([0, 0, 0, 0], port)),
                None => from_file
                    .bind
                    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 4000))),
            },
        };

        let database_url = cli
            .database_url
            .or(read_env_string("DATABASE_URL")?)
            .or(from_file.database_url)
            .unwrap_or_else(|| String::from("sqlite:shoprs.db"));

        let environment = match cli.environment {
            Some(environment) => environment,
            None => {
                let raw = read_env_string("APP_ENV")?.or(from_file.environment);
                match raw {
                    Some(raw) => raw.parse()?,
                    None => Environment::Development,
                }
            }
        };

        let cors_origins = cli
            .cors_origins
            .or(read_env_string("CORS_ORIGINS")?)
            .or(from_file.cors_origins)
            .map(|raw| parse_origins(&raw))
            .unwrap_or_default();

        Ok(Self {
            bind,
            database_url,
            environment,
            cors_origins,
        })
    }
}

/// Split a comma-separated origin list, trimming entries and dropping empties.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}

fn read_file_config(path: Option<&Path>) -> Result<FileConfig, ConfigError> {
    let Some(path) = path else {
        return Ok(FileConfig::default());
    };

    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;

    toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })
}

fn read_env_string(key: &str) -> Result<Option<String>, ConfigError> {
    match std::env::var(key) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(std::env::VarError::NotUnicode(_)) => Err(ConfigError::InvalidEnvValue {
            key: String::from(key),
            value: String::from("<non-unicode>"),
        }),
    }
}

fn read_env_port() -> Result<Option<u16>, ConfigError> {
    let Some(raw) = read_env_string("PORT")? else {
        return Ok(None);
    };
    raw.trim()
        .parse::<u16>()
        .map(Some)
        .map_err(|_| ConfigError::InvalidEnvValue {
            key: String::from("PORT"),
            value: raw,
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use anyhow::Result;
    use tempfile::tempdir;

    use super::{parse_origins, read_file_config, Environment};

    #[test]
    fn file_config_parses_all_fields() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("shoprs.toml");
        std::fs::write(
            &path,
            "bind = \"127.0.0.1:5000\"\ndatabase_url = \"sqlite::memory:\"\nenvironment = \"production\"\ncors_origins = \"https://a.example,https://b.example\"\n",
        )?;

        let parsed = read_file_config(Some(&path))?;

        assert_eq!(parsed.bind, Some("127.0.0.1:5000".parse()?));
        assert_eq!(parsed.database_url.as_deref(), Some("sqlite::memory:"));
        assert_eq!(parsed.environment.as_deref(), Some("production"));
        assert_eq!(
            parsed.cors_origins.as_deref(),
            Some("https://a.example,https://b.example")
        );
        Ok(())
    }

    #[test]
    fn file_config_rejects_invalid_toml() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("shoprs.toml");
        std::fs::write(&path, "bind = not-a-string")?;

        assert!(read_file_config(Some(&path)).is_err());
        Ok(())
    }

    #[test]
    fn parse_origins_trims_and_drops_empties() {
        let origins = parse_origins("http://localhost:3000, https://shop.example.com ,,");
        assert_eq!(
            origins,
            vec![
                String::from("http://localhost:3000"),
                String::from("https://shop.example.com"),
            ]
        );
    }

    #[test]
    fn parse_origins_of_empty_string_is_empty() {
        assert!(parse_origins("").is_empty());
        assert!(parse_origins(" , ").is_empty());
    }

    #[test]
    fn environment_parses_known_names() {
        assert_eq!(
            "production".parse::<Environment>().ok(),
            Some(Environment::Production)
        );
        assert_eq!(
            "PROD".parse::<Environment>().ok(),
            Some(Environment::Production)
        );
        assert_eq!(
            "development".parse::<Environment>().ok(),
            Some(Environment::Development)
        );
        assert_eq!(
            " dev ".parse::<Environment>().ok(),
            Some(Environment::Development)
        );
    }

    #[test]
    fn environment_rejects_unknown_names() {
        assert!("staging".parse::<Environment>().is_err());
    }
}
