//! CLI configuration.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use gradecalc_core::TotalMarksScheme;

/// How command output is rendered on stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Markdown,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "markdown" | "md" => Ok(Self::Markdown),
            other => Err(format!(
                "unknown format '{other}' (expected text, json or markdown)"
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text => "text",
            Self::Json => "json",
            Self::Markdown => "markdown",
        })
    }
}

/// Top-level gradecalc configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradecalcConfig {
    /// Scheme used by `resolve` when `--total` is omitted.
    #[serde(default = "default_total_marks")]
    pub default_total_marks: u32,
    /// Decimals shown for GPA and CGPA values.
    #[serde(default = "default_precision")]
    pub precision: u32,
    #[serde(default)]
    pub default_format: OutputFormat,
    /// Where `dashboard --save` writes reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Refuse to aggregate a transcript that fails validation.
    #[serde(default = "default_true")]
    pub strict: bool,
}

fn default_total_marks() -> u32 {
    60
}
fn default_precision() -> u32 {
    2
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./gradecalc-reports")
}
fn default_true() -> bool {
    true
}

impl Default for GradecalcConfig {
    fn default() -> Self {
        Self {
            default_total_marks: default_total_marks(),
            precision: default_precision(),
            default_format: OutputFormat::default(),
            output_dir: default_output_dir(),
            strict: true,
        }
    }
}

pub const MAX_PRECISION: u32 = 6;

impl GradecalcConfig {
    /// The configured default scheme.
    pub fn default_scheme(&self) -> Result<TotalMarksScheme> {
        TotalMarksScheme::try_from(self.default_total_marks)
            .context("invalid default_total_marks in config")
    }

    fn check(&self) -> Result<()> {
        self.default_scheme()?;
        anyhow::ensure!(
            self.precision <= MAX_PRECISION,
            "precision must be at most {MAX_PRECISION}, got {}",
            self.precision
        );
        Ok(())
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order when no path is given:
/// 1. `gradecalc.toml` in the current directory
/// 2. `~/.config/gradecalc/config.toml`
///
/// Environment variable overrides: `GRADECALC_FORMAT`, `GRADECALC_PRECISION`.
pub fn load_config_from(path: Option<&Path>) -> Result<GradecalcConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("gradecalc.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => GradecalcConfig::default(),
    };

    apply_env_overrides(&mut config)?;
    config.check()?;
    Ok(config)
}

fn parse_config(content: &str) -> Result<GradecalcConfig> {
    Ok(toml::from_str::<GradecalcConfig>(content)?)
}

fn apply_env_overrides(config: &mut GradecalcConfig) -> Result<()> {
    if let Ok(format) = std::env::var("GRADECALC_FORMAT") {
        config.default_format = format
            .parse()
            .map_err(|e: String| anyhow::anyhow!(e))
            .context("invalid GRADECALC_FORMAT")?;
    }

    if let Ok(precision) = std::env::var("GRADECALC_PRECISION") {
        config.precision = precision
            .trim()
            .parse()
            .with_context(|| format!("invalid GRADECALC_PRECISION: {precision}"))?;
    }

    Ok(())
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("gradecalc"))
}
