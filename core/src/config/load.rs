use std::path::{Path, PathBuf};

use super::types::AppConfig;

/// Get the default adp data directory: ~/.adp
pub fn get_adp_data_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(PathBuf::from(home).join(".adp"))
}

pub fn load_from_str(s: &str) -> anyhow::Result<AppConfig> {
    Ok(toml::from_str::<AppConfig>(s)?)
}

pub fn load_from_path(path: &Path) -> anyhow::Result<AppConfig> {
    let s = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
    load_from_str(&s)
}

pub fn load_default() -> anyhow::Result<AppConfig> {
    // Priority 1: ~/.adp/config.toml
    let adp_config = get_adp_data_dir()?.join("config.toml");

    // Priority 2: ./config.toml (current directory)
    let local_config = Path::new("config.toml");

    let mut cfg = if adp_config.exists() {
        load_from_path(&adp_config)?
    } else if local_config.exists() {
        load_from_path(local_config)?
    } else {
        AppConfig::default()
    };

    // Environment variable overrides (Priority 0: highest)
    apply_env_overrides(&mut cfg, |name| std::env::var(name).ok())?;
    Ok(cfg)
}

/// Applies `ADP_*` overrides read through `lookup`. Blank values are ignored.
pub fn apply_env_overrides<F>(cfg: &mut AppConfig, lookup: F) -> anyhow::Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(v) = get("ADP_BASE_URL") {
        cfg.adp.base_url = v;
    }
    if let Some(v) = get("ADP_USERNAME") {
        cfg.adp.username = v;
    }
    if let Some(v) = get("ADP_PASSWORD") {
        cfg.adp.password = v;
    }
    if let Some(v) = get("ADP_IGNORE_TLS") {
        cfg.adp.ignore_tls = parse_flag("ADP_IGNORE_TLS", &v)?;
    }
    if let Some(v) = get("ADP_TIMEOUT_MS") {
        cfg.adp.timeout_ms = v
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("ADP_TIMEOUT_MS must be a number of milliseconds, got {v:?}"))?;
    }
    if let Some(v) = get("ADP_DEBUG") {
        cfg.adp.debug = parse_flag("ADP_DEBUG", &v)?;
    }
    Ok(())
}

fn parse_flag(name: &str, value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => anyhow::bail!("{name} must be a boolean, got {value:?}"),
    }
}
