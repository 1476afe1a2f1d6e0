use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use std::fs;
use std::process::Command;

pub struct ConfigLogic;

const REQUIRED_KEYS: [&str; 4] = ["database", "default_rate", "currency", "csv_delimiter"];

impl ConfigLogic {
    pub fn print(path: &str) -> AppResult<()> {
        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        println!("{}", content);
        Ok(())
    }

    /// Verify the config file parses as YAML and carries every key the
    /// tool reads. Missing keys are reported, not fixed; `config
    /// --migrate` adds them.
    pub fn check(path: &str) -> AppResult<()> {
        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;

        let yaml: serde_yaml::Value = serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("invalid YAML: {e}")))?;

        let map = yaml
            .as_mapping()
            .ok_or_else(|| AppError::Config("config root must be a mapping".into()))?;

        let mut missing = Vec::new();
        for key in REQUIRED_KEYS {
            if !map.contains_key(serde_yaml::Value::String(key.to_string())) {
                missing.push(key);
            }
        }

        if missing.is_empty() {
            success("Configuration file is complete.");
        } else {
            for key in &missing {
                warning(format!("Missing configuration key: {}", key));
            }
            warning("Run 'config --migrate' to add the missing keys with defaults.");
        }

        Ok(())
    }

    pub fn edit(path: &str, editor: &Option<String>) -> AppResult<()> {
        let default_editor = std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| {
                if cfg!(target_os = "windows") {
                    "notepad".to_string()
                } else {
                    "nano".to_string()
                }
            });

        let requested = editor.clone().unwrap_or_else(|| default_editor.clone());

        let status = Command::new(&requested).arg(path).status();
        match status {
            Ok(s) if s.success() => {
                success(format!("Configuration edited with '{}'.", requested));
                Ok(())
            }
            _ if requested != default_editor => {
                // Requested editor missing or failed, retry with the default.
                warning(format!(
                    "Editor '{}' not available, falling back to '{}'.",
                    requested, default_editor
                ));
                let fallback = Command::new(&default_editor)
                    .arg(path)
                    .status()
                    .map_err(|e| AppError::Config(e.to_string()))?;
                if fallback.success() {
                    success(format!("Configuration edited with '{}'.", default_editor));
                    Ok(())
                } else {
                    Err(AppError::Config(format!(
                        "editor '{}' exited with an error",
                        default_editor
                    )))
                }
            }
            Ok(_) => Err(AppError::Config(format!(
                "editor '{}' exited with an error",
                requested
            ))),
            Err(e) => Err(AppError::Config(e.to_string())),
        }
    }
}
