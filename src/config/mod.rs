use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct EffectiveConfig {
    pub ui: UiConfig,
    pub analyze: AnalyzeConfig,
    pub reports: ReportsConfig,
    pub fixes: FixesConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_path: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UiConfig {
    pub color: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeConfig {
    pub min_score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportsConfig {
    pub dir: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FixesConfig {
    pub output_dir: String,
}

impl Default for EffectiveConfig {
    fn default() -> Self {
        Self {
            ui: UiConfig { color: true },
            analyze: AnalyzeConfig {
                min_score: crate::analyzer::DEFAULT_MIN_SCORE,
            },
            reports: ReportsConfig {
                dir: ".lighthouse/reports".to_string(),
            },
            fixes: FixesConfig {
                output_dir: ".lighthouse/fixes".to_string(),
            },
            config_path: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    ui: Option<RawUiConfig>,
    analyze: Option<RawAnalyzeConfig>,
    reports: Option<RawReportsConfig>,
    fixes: Option<RawFixesConfig>,
}

#[derive(Debug, Deserialize)]
struct RawUiConfig {
    color: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct RawAnalyzeConfig {
    min_score: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawReportsConfig {
    dir: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawFixesConfig {
    output_dir: Option<String>,
}

pub fn default_config_path(home_dir: &Path) -> PathBuf {
    home_dir.join(".config/sitediet/config.toml")
}

pub fn load(config_path: Option<&Path>, home_dir: &Path) -> Result<EffectiveConfig> {
    let mut cfg = EffectiveConfig::default();

    let path = config_path
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| default_config_path(home_dir));

    if path.exists() {
        let s = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let raw: RawConfig = toml::from_str(&s).context("failed to parse config file (TOML)")?;
        apply_raw_config(&mut cfg, raw)?;
        cfg.config_path = Some(path.display().to_string());
    }

    apply_env_overrides(&mut cfg)?;

    Ok(cfg)
}

fn apply_raw_config(cfg: &mut EffectiveConfig, raw: RawConfig) -> Result<()> {
    if let Some(ui) = raw.ui {
        if let Some(color) = ui.color {
            cfg.ui.color = color;
        }
    }

    if let Some(analyze) = raw.analyze {
        if let Some(min_score) = analyze.min_score {
            cfg.analyze.min_score = validate_min_score(min_score).context("analyze.min_score")?;
        }
    }

    if let Some(reports) = raw.reports {
        if let Some(dir) = reports.dir {
            cfg.reports.dir = dir;
        }
    }

    if let Some(fixes) = raw.fixes {
        if let Some(output_dir) = fixes.output_dir {
            cfg.fixes.output_dir = output_dir;
        }
    }

    Ok(())
}

fn apply_env_overrides(cfg: &mut EffectiveConfig) -> Result<()> {
    if let Ok(v) = std::env::var("SITEDIET_UI_COLOR") {
        cfg.ui.color = parse_bool(&v).with_context(|| "SITEDIET_UI_COLOR")?;
    }
    if let Ok(v) = std::env::var("SITEDIET_ANALYZE_MIN_SCORE") {
        let value = v
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(|n| validate_min_score(n).ok())
            .with_context(|| "SITEDIET_ANALYZE_MIN_SCORE")?;
        cfg.analyze.min_score = value;
    }
    if let Ok(v) = std::env::var("SITEDIET_REPORTS_DIR") {
        let v = v.trim();
        if !v.is_empty() {
            cfg.reports.dir = v.to_string();
        }
    }
    if let Ok(v) = std::env::var("SITEDIET_FIXES_OUTPUT_DIR") {
        let v = v.trim();
        if !v.is_empty() {
            cfg.fixes.output_dir = v.to_string();
        }
    }

    Ok(())
}

pub fn validate_min_score(value: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(anyhow::anyhow!(
            "score threshold out of range: {value} (expected 0.0..=1.0)"
        ))
    }
}

fn parse_bool(s: &str) -> Result<bool> {
    let s = s.trim().to_ascii_lowercase();
    match s.as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(anyhow::anyhow!(
            "invalid boolean: {s} (expected true|false|1|0|yes|no|on|off)"
        )),
    }
}
