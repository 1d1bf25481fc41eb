use std::path::Path;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cli::{AppContext, InitArgs};

/// Config file names probed in the working directory, in priority order
pub const CONFIG_FILES: [&str; 4] =
    ["framescan.toml", "framescan.yaml", "framescan.json", ".framescan.toml"];

/// Environment prefix; nested keys use `__`, e.g. `FRAMESCAN__MISSING__STEP=2`
pub const ENV_PREFIX: &str = "FRAMESCAN";

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config
{
    /// Directory scan settings
    pub scan: ScanConfig,

    /// Missing-frame settings
    pub missing: MissingConfig,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig
{
    /// Default extension filter (empty = every extension)
    pub extensions: Vec<String>,

    /// Glob patterns for names to skip while listing
    pub ignore_patterns: Vec<String>,

    /// List dotfiles
    pub include_hidden: bool,

    /// Apply .gitignore/.ignore files found in scanned directories
    pub respect_ignore_files: bool,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MissingConfig
{
    /// Frame step used when looking for gaps
    pub step: Decimal,
}

impl Default for ScanConfig
{
    fn default() -> Self
    {
        Self {
            extensions: Vec::new(),
            ignore_patterns: vec![
                ".DS_Store".to_string(),
                "Thumbs.db".to_string(),
                "*.tmp".to_string(),
            ],
            include_hidden: true,
            respect_ignore_files: false,
        }
    }
}

impl Default for MissingConfig
{
    fn default() -> Self
    {
        Self { step: Decimal::ONE }
    }
}

pub fn load_config() -> Result<Config>
{
    load_config_from(Path::new("."))
}

/// Load configuration from the first config file found in `dir`, then
/// overlay `FRAMESCAN__*` environment variables.
pub fn load_config_from(dir: &Path) -> Result<Config>
{
    let mut builder = config::Config::builder();

    // Load from config files in priority order
    for name in &CONFIG_FILES
    {
        let path = dir.join(name);
        if path.exists()
        {
            builder = builder.add_source(config::File::from(path));
            break;
        }
    }

    // Add environment variables with FRAMESCAN__ prefix
    builder = builder.add_source(
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("scan.extensions")
            .with_list_parse_key("scan.ignore_patterns")
            .try_parsing(true),
    );

    let cfg = builder
        .build()
        .context("Failed to load configuration")?;
    let parsed: Config = cfg
        .try_deserialize()
        .context("Failed to parse configuration")?;

    Ok(parsed)
}

pub fn init(
    args: InitArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let config_path = args
        .path
        .join(CONFIG_FILES[0]);

    if config_path.exists() && !args.force
    {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let config = Config::default();
    let toml_string =
        toml::to_string_pretty(&config).context("Failed to serialize default config")?;

    if args.dry_run
    {
        if !ctx.quiet
        {
            println!("Would write {}:\n{}", config_path.display(), toml_string);
        }
        return Ok(());
    }

    std::fs::write(&config_path, toml_string).context("Failed to write config file")?;

    if !ctx.quiet
    {
        println!("Created config file at {}", config_path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests
{
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_defaults_without_file() -> Result<()>
    {
        let tmp = TempDir::new()?;
        let cfg = load_config_from(tmp.path())?;

        assert!(cfg.scan.extensions.is_empty());
        assert!(cfg.scan.include_hidden);
        assert_eq!(cfg.missing.step, Decimal::ONE);
        Ok(())
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() -> Result<()>
    {
        let tmp = TempDir::new()?;
        std::fs::write(
            tmp.path().join("framescan.toml"),
            "[scan]\nextensions = [\"exr\", \"dpx\"]\n\n[missing]\nstep = \"0.5\"\n",
        )?;

        let cfg = load_config_from(tmp.path())?;
        assert_eq!(cfg.scan.extensions, vec!["exr", "dpx"]);
        assert_eq!(cfg.scan.ignore_patterns, ScanConfig::default().ignore_patterns);
        assert_eq!(cfg.missing.step, "0.5".parse::<Decimal>()?);
        Ok(())
    }

    #[test]
    fn test_default_config_serializes_to_toml() -> Result<()>
    {
        let text = toml::to_string_pretty(&Config::default())?;
        assert!(text.contains("[scan]"));
        assert!(text.contains("[missing]"));

        let back: Config = toml::from_str(&text)?;
        assert_eq!(back.missing.step, Decimal::ONE);
        Ok(())
    }
}
