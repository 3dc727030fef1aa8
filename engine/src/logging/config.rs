use std::collections::HashMap;
use tracing::Level;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

/// Per-scope log levels, e.g. `warn,locomotion=debug,input=trace`.
#[derive(Debug, Clone)]
pub struct LogConfig {
    global_level: Level,
    scope_levels: HashMap<String, Level>,
}

impl LogConfig {
    pub fn new() -> Self {
        Self {
            global_level: Level::WARN,
            scope_levels: HashMap::new(),
        }
    }

    pub fn from_env(env_var_name: &str) -> Self {
        Self::from_env_or(env_var_name, "warn")
    }

    /// Like [`from_env`](Self::from_env), parsing `default` when the variable is unset.
    pub fn from_env_or(env_var_name: &str, default: &str) -> Self {
        match std::env::var(env_var_name) {
            Ok(log_config) => Self::from_config_str(&log_config),
            Err(_) => Self::from_config_str(default),
        }
    }

    pub fn from_config_str(config_str: &str) -> Self {
        let mut config = Self::new();
        config.parse_config_string(config_str);
        config
    }

    fn parse_config_string(&mut self, config_str: &str) {
        for part in config_str.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            match part.split_once('=') {
                Some((scope, level)) => {
                    if let Some(level) = parse_level(level.trim()) {
                        self.scope_levels.insert(scope.trim().to_string(), level);
                    }
                }
                None => {
                    if let Some(level) = parse_level(part) {
                        self.global_level = level;
                    }
                }
            }
        }
    }

    pub fn should_log(&self, scope: &str, level: Level) -> bool {
        let target_level = self.scope_levels.get(scope).unwrap_or(&self.global_level);
        level <= *target_level
    }

    /// Most verbose level any scope asks for.
    pub fn max_level(&self) -> Level {
        self.scope_levels
            .values()
            .copied()
            .fold(self.global_level, |acc, level| acc.max(level))
    }

    pub fn set_global_level(&mut self, level: Level) {
        self.global_level = level;
    }

    pub fn set_scope_level(&mut self, scope: String, level: Level) {
        self.scope_levels.insert(scope, level);
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_level(level_str: &str) -> Option<Level> {
    match level_str.to_lowercase().as_str() {
        "error" => Some(Level::ERROR),
        "warn" => Some(Level::WARN),
        "info" => Some(Level::INFO),
        "debug" => Some(Level::DEBUG),
        "trace" => Some(Level::TRACE),
        _ => None,
    }
}

/// Install the global subscriber and scope table.
///
/// Example: `init_logging("WALKTHROUGH_LOG")` with
/// `WALKTHROUGH_LOG=warn,locomotion=debug`. `RUST_LOG` still applies on top.
pub fn init_logging(env_var_name: &str) -> LogConfig {
    install(LogConfig::from_env(env_var_name))
}

/// [`init_logging`] for binaries that want a chattier default than `warn`,
/// e.g. `init_logging_with_default("WALKTHROUGH_LOG", "info")`.
pub fn init_logging_with_default(env_var_name: &str, default: &str) -> LogConfig {
    install(LogConfig::from_env_or(env_var_name, default))
}

fn install(config: LogConfig) -> LogConfig {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(config.max_level()).into())
        .from_env_lossy();

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    super::set_log_config(config.clone());
    config
}
