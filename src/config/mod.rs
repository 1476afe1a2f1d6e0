use crate::errors::{AppError, AppResult};
use crate::utils::money::parse_amount;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

pub mod migrate; // use submodule at src/config/migrate.rs

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    /// Hourly rate applied to new agents when none is given ("15.00").
    #[serde(default = "default_rate")]
    pub default_rate: String,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_csv_delimiter")]
    pub csv_delimiter: String,
}

fn default_rate() -> String {
    "15.00".to_string()
}
fn default_currency() -> String {
    "€".to_string()
}
fn default_csv_delimiter() -> String {
    ";".to_string()
}

impl Default for Config {
    fn default() -> Self {
        let db_path = Self::database_file();
        Self {
            database: db_path.to_string_lossy().to_string(),
            default_rate: default_rate(),
            currency: default_currency(),
            csv_delimiter: default_csv_delimiter(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("crewledger")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".crewledger")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("crewledger.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("crewledger.sqlite")
    }

    /// Resolve a possibly user-supplied database name to a full path.
    /// Relative names land inside the config directory so that `init` and
    /// later commands given the same `--db` value hit the same file.
    pub fn resolve_db_path(custom: Option<&str>) -> PathBuf {
        match custom {
            Some(name) => {
                let p = crate::utils::path::expand_tilde(name);
                if p.is_absolute() {
                    p
                } else {
                    Self::config_dir().join(p)
                }
            }
            None => Self::database_file(),
        }
    }

    /// Default hourly rate in cents, parsed from the config string.
    pub fn default_rate_cents(&self) -> AppResult<i64> {
        parse_amount(&self.default_rate).ok_or_else(|| {
            AppError::Config(format!(
                "default_rate '{}' is not a valid amount",
                self.default_rate
            ))
        })
    }

    /// CSV field delimiter as a single byte; falls back to ';' when the
    /// configured string is empty or multi-byte.
    pub fn csv_delimiter_byte(&self) -> u8 {
        match self.csv_delimiter.as_bytes() {
            [b] => *b,
            _ => b';',
        }
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> Self {
        let path = Self::config_file();

        if path.exists() {
            let content = fs::read_to_string(&path).expect("❌ Failed to read configuration file");
            serde_yaml::from_str(&content).expect("❌ Failed to parse configuration file")
        } else {
            Config::default()
        }
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> io::Result<()> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = Self::resolve_db_path(custom_name.as_deref());

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        // Write config file
        if !is_test {
            let yaml = serde_yaml::to_string(&config)
                .map_err(|e| io::Error::other(format!("serialize config: {e}")))?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        // Create empty DB file if not exists
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(())
    }
}
