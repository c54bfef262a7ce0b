// Configuration module for flixd
// Handles XDG-compliant directory paths and TOML configuration file

use serde::Deserialize;
use std::path::PathBuf;

const APP_NAME: &str = "flixd";
const CONFIG_FILENAME: &str = "config.toml";

/// TOML configuration file structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    /// Server configuration
    pub server: ServerConfig,

    /// Directory paths (overrides XDG defaults)
    pub paths: PathsConfig,

    /// Upstream provider configuration
    pub providers: ProvidersConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server port (default: 8200)
    pub port: u16,

    /// Bind address (default: 0.0.0.0)
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8200,
            bind_address: "0.0.0.0".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Override data directory (database location)
    pub data_dir: Option<PathBuf>,

    /// Override config directory
    pub config_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    /// TMDB API key (required for the catalog endpoints)
    pub tmdb_api_key: Option<String>,

    /// Pexels API key (optional, enables the stock-video endpoints)
    pub pexels_api_key: Option<String>,
}

/// Application paths following XDG Base Directory Specification on Unix
/// On other platforms, falls back to platform-specific locations or the
/// current directory
#[derive(Debug, Clone)]
pub struct AppPaths {
    /// Directory for configuration files (config.toml)
    /// XDG: $XDG_CONFIG_HOME/flixd or ~/.config/flixd
    pub config_dir: PathBuf,

    /// Directory for persistent data (database)
    /// XDG: $XDG_DATA_HOME/flixd or ~/.local/share/flixd
    pub data_dir: PathBuf,
}

impl AppPaths {
    /// Create application paths using XDG directories (or fallbacks)
    ///
    /// Priority order:
    /// 1. Environment variables (FLIXD_CONFIG_DIR, FLIXD_DATA_DIR)
    /// 2. Config file overrides
    /// 3. XDG/platform directories
    /// 4. Current directory fallback
    pub fn new(config_overrides: &PathsConfig) -> Self {
        Self {
            config_dir: Self::resolve_config_dir(&config_overrides.config_dir),
            data_dir: Self::resolve_data_dir(&config_overrides.data_dir),
        }
    }

    /// Create application paths using the current directory (portable mode)
    pub fn current_dir() -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            config_dir: cwd.clone(),
            data_dir: cwd,
        }
    }

    fn resolve_config_dir(config_override: &Option<PathBuf>) -> PathBuf {
        if let Ok(path) = std::env::var("FLIXD_CONFIG_DIR") {
            return PathBuf::from(path);
        }

        if let Some(ref path) = config_override {
            return path.clone();
        }

        if let Some(dir) = dirs::config_dir() {
            return dir.join(APP_NAME);
        }

        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    }

    fn resolve_data_dir(config_override: &Option<PathBuf>) -> PathBuf {
        if let Ok(path) = std::env::var("FLIXD_DATA_DIR") {
            return PathBuf::from(path);
        }

        if let Some(ref path) = config_override {
            return path.clone();
        }

        if let Some(dir) = dirs::data_dir() {
            return dir.join(APP_NAME);
        }

        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    }

    /// Get the database file path
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("flixd.db")
    }

    /// Get the database URL for SQLite
    pub fn database_url(&self) -> String {
        format!("sqlite:{}?mode=rwc", self.database_path().display())
    }

    /// Get the config file path
    pub fn config_file_path(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILENAME)
    }

    /// Ensure all directories exist
    pub async fn ensure_dirs(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.config_dir).await?;
        tokio::fs::create_dir_all(&self.data_dir).await?;
        Ok(())
    }

    /// Log the configured paths
    pub fn log_paths(&self) {
        tracing::info!("Configuration directory: {}", self.config_dir.display());
        tracing::info!("Data directory: {}", self.data_dir.display());
        tracing::debug!("Database path: {}", self.database_path().display());
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new(&PathsConfig::default())
    }
}

/// Application configuration - combines TOML file with environment overrides
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Application paths
    pub paths: AppPaths,

    /// Server port
    pub port: u16,

    /// Bind address
    pub bind_address: String,

    /// TMDB API key
    pub tmdb_api_key: Option<String>,

    /// Pexels API key (optional)
    pub pexels_api_key: Option<String>,
}

impl AppConfig {
    /// Load configuration from TOML file and environment
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables
    /// 2. TOML config file
    /// 3. Default values
    pub fn load() -> Self {
        // Portable mode keeps everything in the current directory
        let portable_mode = std::env::var("FLIXD_PORTABLE")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        if portable_mode {
            tracing::info!("Running in portable mode (using current directory)");
            return Self::portable();
        }

        let config_dir = Self::find_config_dir();
        let config_file = Self::load_config_file(&config_dir);

        Self::build(config_file)
    }

    fn portable() -> Self {
        Self {
            paths: AppPaths::current_dir(),
            port: Self::env_port().unwrap_or(8200),
            bind_address: Self::env_bind_address().unwrap_or_else(|| "0.0.0.0".to_string()),
            tmdb_api_key: std::env::var("TMDB_API_KEY").ok(),
            pexels_api_key: std::env::var("PEXELS_API_KEY").ok(),
        }
    }

    /// Find the config directory (for locating config.toml)
    fn find_config_dir() -> PathBuf {
        if let Ok(path) = std::env::var("FLIXD_CONFIG_DIR") {
            return PathBuf::from(path);
        }

        if let Some(dir) = dirs::config_dir() {
            return dir.join(APP_NAME);
        }

        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    }

    /// Load and parse the TOML config file
    fn load_config_file(config_dir: &std::path::Path) -> ConfigFile {
        let config_path = config_dir.join(CONFIG_FILENAME);

        if !config_path.exists() {
            tracing::debug!(
                "No config file found at {}, using defaults",
                config_path.display()
            );
            return ConfigFile::default();
        }

        match std::fs::read_to_string(&config_path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    tracing::info!("Loaded configuration from {}", config_path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!(
                        "Failed to parse config file {}: {}. Using defaults.",
                        config_path.display(),
                        e
                    );
                    ConfigFile::default()
                }
            },
            Err(e) => {
                tracing::warn!(
                    "Failed to read config file {}: {}. Using defaults.",
                    config_path.display(),
                    e
                );
                ConfigFile::default()
            }
        }
    }

    /// Build configuration from config file with environment overrides
    fn build(config_file: ConfigFile) -> Self {
        let paths = AppPaths::new(&config_file.paths);

        let port = Self::env_port().unwrap_or(config_file.server.port);

        let bind_address =
            Self::env_bind_address().unwrap_or_else(|| config_file.server.bind_address.clone());

        let tmdb_api_key = std::env::var("TMDB_API_KEY")
            .ok()
            .or(config_file.providers.tmdb_api_key);

        let pexels_api_key = std::env::var("PEXELS_API_KEY")
            .ok()
            .or(config_file.providers.pexels_api_key);

        Self {
            paths,
            port,
            bind_address,
            tmdb_api_key,
            pexels_api_key,
        }
    }

    fn env_port() -> Option<u16> {
        std::env::var("FLIXD_PORT").ok().and_then(|p| p.parse().ok())
    }

    fn env_bind_address() -> Option<String> {
        std::env::var("FLIXD_BIND_ADDRESS").ok()
    }

    /// Get the database URL, with override from DATABASE_URL env var
    pub fn database_url(&self) -> String {
        std::env::var("DATABASE_URL").unwrap_or_else(|_| self.paths.database_url())
    }

    /// Log configuration status
    pub fn log_config(&self) {
        self.paths.log_paths();
        tracing::info!("Server listening on {}:{}", self.bind_address, self.port);

        if self.tmdb_api_key.is_some() {
            tracing::info!("Metadata provider: TMDB");
        } else {
            tracing::warn!("No TMDB API key configured; catalog endpoints will not work");
            tracing::info!("Hint: Add tmdb_api_key to config.toml or set TMDB_API_KEY env var");
        }

        if self.pexels_api_key.is_some() {
            tracing::info!("Stock-video provider: Pexels");
        } else {
            tracing::debug!("Stock-video provider: disabled (no Pexels API key)");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_dir_paths() {
        let paths = AppPaths::current_dir();
        assert_eq!(paths.config_dir, paths.data_dir);
    }

    #[test]
    fn test_database_url_format() {
        let paths = AppPaths::current_dir();
        let url = paths.database_url();
        assert!(url.starts_with("sqlite:"));
        assert!(url.ends_with("?mode=rwc"));
    }

    #[test]
    fn test_default_config_file() {
        let config = ConfigFile::default();
        assert_eq!(config.server.port, 8200);
        assert_eq!(config.server.bind_address, "0.0.0.0");
        assert!(config.providers.tmdb_api_key.is_none());
        assert!(config.providers.pexels_api_key.is_none());
    }

    #[test]
    fn test_parse_config_toml() {
        let toml_str = r#"
[server]
port = 9000
bind_address = "127.0.0.1"

[providers]
tmdb_api_key = "test_key"

[paths]
data_dir = "/custom/data"
"#;
        let config: ConfigFile = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.bind_address, "127.0.0.1");
        assert_eq!(config.providers.tmdb_api_key, Some("test_key".to_string()));
        assert!(config.providers.pexels_api_key.is_none());
        assert_eq!(config.paths.data_dir, Some(PathBuf::from("/custom/data")));
    }

    #[test]
    fn test_partial_config_toml() {
        // Partial configs work: only specify what you need
        let toml_str = r#"
[providers]
pexels_api_key = "pexels_key"
"#;
        let config: ConfigFile = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.port, 8200); // default
        assert_eq!(
            config.providers.pexels_api_key,
            Some("pexels_key".to_string())
        );
    }
}
