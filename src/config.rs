//! Optional config file loading. Search order: ./linofeed.toml, then
//! $XDG_CONFIG_HOME/linofeed/config.toml (or ~/.config/linofeed/config.toml).

use serde::Deserialize;

/// Config file contents. All fields optional; only present keys override defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct Config {
    /// Port to listen on.
    pub port: Option<u16>,
    /// HTTP User-Agent header for upstream requests.
    pub user_agent: Option<String>,
    /// Upstream request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

/// Search order: (1) ./linofeed.toml, (2) $XDG_CONFIG_HOME/linofeed/config.toml.
/// Missing file returns Ok(None). Invalid TOML or I/O error reading a present file returns Err.
pub fn load_config() -> Result<Option<Config>, String> {
    let cwd = std::env::current_dir()
        .map_err(|e| format!("Cannot determine current directory: {}", e))?;
    let mut paths = vec![cwd.join("linofeed.toml")];
    if let Some(d) = dirs::config_dir() {
        paths.push(d.join("linofeed").join("config.toml"));
    }
    for path in &paths {
        if path.exists() {
            let s = std::fs::read_to_string(path)
                .map_err(|e| format!("Cannot read config {}: {}", path.display(), e))?;
            let config: Config = toml::from_str(&s)
                .map_err(|e| format!("Invalid config {}: {}", path.display(), e))?;
            return Ok(Some(config));
        }
    }
    Ok(None)
}
