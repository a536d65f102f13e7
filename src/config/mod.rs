use crate::echo::LogLevel;
use crate::error::{Result, RunechoError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Settings for a [`Runner`](crate::process::Runner), fixed for its lifetime
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Logger threshold; stdout lines less severe than this are not shown
    #[serde(default)]
    pub level: LogLevel,

    /// Colour stdout green and stderr red
    #[serde(default = "default_color")]
    pub color: bool,

    /// Keep stdout lines and return them from the run
    #[serde(default)]
    pub capture_stdout: bool,

    /// Working directory for the child (inherited when unset)
    #[serde(default)]
    pub current_dir: Option<PathBuf>,

    /// Extra environment variables for the child
    #[serde(default)]
    pub env: HashMap<String, String>,
}

// Default value functions for serde
fn default_color() -> bool {
    true
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            color: default_color(),
            capture_stdout: false,
            current_dir: None,
            env: HashMap::new(),
        }
    }
}

impl RunnerConfig {
    /// Load a runner configuration from a file (supports TOML and JSON)
    pub fn from_file(path: &Path) -> Result<RunnerConfig> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| RunechoError::ConfigError(format!("Failed to read config file: {}", e)))?;

        let extension = path.extension().and_then(|s| s.to_str()).unwrap_or("");

        let mut config = match extension {
            "toml" => toml::from_str::<RunnerConfig>(&contents)
                .map_err(|e| RunechoError::InvalidConfig(format!("Failed to parse TOML: {}", e)))?,
            "json" => serde_json::from_str::<RunnerConfig>(&contents)
                .map_err(|e| RunechoError::InvalidConfig(format!("Failed to parse JSON: {}", e)))?,
            _ => {
                return Err(RunechoError::InvalidConfig(format!(
                    "Unsupported file format: {}. Use .toml or .json",
                    extension
                )))
            }
        };

        config.expand_env_vars();
        config.validate()?;

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(ref cwd) = self.current_dir {
            if !cwd.exists() {
                return Err(RunechoError::ConfigValidationError(format!(
                    "Working directory does not exist: {}",
                    cwd.display()
                )));
            }
            if !cwd.is_dir() {
                return Err(RunechoError::ConfigValidationError(format!(
                    "Working directory is not a directory: {}",
                    cwd.display()
                )));
            }
        }

        if let Some(key) = self.env.keys().find(|k| k.is_empty() || k.contains('=')) {
            return Err(RunechoError::ConfigValidationError(format!(
                "Invalid environment variable name: '{}'",
                key
            )));
        }

        Ok(())
    }

    /// Expand `$VAR` and `${VAR}` in the working directory and env values
    fn expand_env_vars(&mut self) {
        if let Some(ref cwd) = self.current_dir {
            let expanded = expand_env_in_string(&cwd.to_string_lossy());
            self.current_dir = Some(PathBuf::from(expanded));
        }

        for value in self.env.values_mut() {
            *value = expand_env_in_string(value);
        }
    }
}

/// Substitute variables from the current environment
fn expand_env_in_string(s: &str) -> String {
    expand_with(s, |name| std::env::var(name).ok())
}

/// Replace `$NAME` and `${NAME}` tokens using `lookup`.
///
/// Unknown variables and malformed tokens are kept as written. Substituted
/// values are not scanned again.
fn expand_with<F>(s: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut result = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(pos) = rest.find('$') {
        result.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        let (name, token_len) = match after.strip_prefix('{') {
            Some(braced) => match braced.find('}') {
                Some(end) if is_var_name(&braced[..end]) => (&braced[..end], end + 2),
                _ => ("", 0),
            },
            None => {
                let len = after
                    .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                    .unwrap_or(after.len());
                if is_var_name(&after[..len]) {
                    (&after[..len], len)
                } else {
                    ("", 0)
                }
            }
        };

        if token_len == 0 {
            result.push('$');
            rest = after;
            continue;
        }

        match lookup(name) {
            Some(value) => result.push_str(&value),
            None => {
                result.push('$');
                result.push_str(&after[..token_len]);
            }
        }
        rest = &after[token_len..];
    }

    result.push_str(rest);
    result
}

fn is_var_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
