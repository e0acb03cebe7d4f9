use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

/// When the status summary is (re)written.
///
/// `Gated` keeps repeated exports byte-stable: status only moves when a
/// data file actually changed. `Always` restores the older overwrite-on-
/// every-run behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusPolicy {
    #[default]
    Gated,
    Always,
}

impl FromStr for StatusPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gated" => Ok(Self::Gated),
            "always" => Ok(Self::Always),
            other => Err(anyhow!(
                "invalid status policy `{other}`: use `gated` or `always`"
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    pub out_dir: String,
    pub status_policy: StatusPolicy,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            out_dir: "./data".to_string(),
            status_policy: StatusPolicy::Gated,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VaultConfig {
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct PartialVaultConfig {
    export: Option<ExportConfig>,
}

fn env_or_string(var: &str, fallback: &str) -> String {
    match env::var(var) {
        Ok(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => fallback.to_string(),
    }
}

fn validate(cfg: &VaultConfig) -> Result<()> {
    if cfg.export.out_dir.trim().is_empty() {
        return Err(anyhow!("invalid export out_dir: cannot be empty"));
    }
    Ok(())
}

fn resolve_config_path() -> Option<PathBuf> {
    if let Ok(custom) = env::var("ARCVAULT_CONFIG_PATH") {
        let trimmed = custom.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }

    let home = dirs::home_dir()?;
    Some(home.join(".arcvault").join("arcvault.toml"))
}

fn merge_file_config(base: &mut VaultConfig) -> Result<()> {
    let Some(path) = resolve_config_path() else {
        return Ok(());
    };
    if !path.exists() {
        return Ok(());
    }

    let raw = fs::read_to_string(&path)?;
    let parsed: PartialVaultConfig = toml::from_str(&raw)
        .map_err(|err| anyhow!("failed to parse config {}: {err}", path.display()))?;
    if let Some(export) = parsed.export {
        base.export = export;
    }
    Ok(())
}

/// Defaults, overlaid by the optional TOML file, overlaid by env vars.
pub fn load_config() -> Result<VaultConfig> {
    let mut cfg = VaultConfig::default();
    merge_file_config(&mut cfg)?;

    cfg.export.out_dir = env_or_string("ARCVAULT_OUT_DIR", &cfg.export.out_dir);
    if let Ok(v) = env::var("ARCVAULT_STATUS_POLICY") {
        if !v.trim().is_empty() {
            cfg.export.status_policy = v.parse()?;
        }
    }

    validate(&cfg)?;
    Ok(cfg)
}
