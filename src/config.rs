use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub facilities: FacilityTableConfig,
    pub regions: Vec<RegionConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FacilityTableConfig {
    pub path: PathBuf,
    /// Source CRS of the facility table, e.g. "EPSG:3857"
    pub crs: String,
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RegionConfig {
    /// Region key partitioning facilities and addresses
    pub key: String,
    pub path: PathBuf,
    pub crs: String,
    /// The LA address export is `;`-delimited, so this is per-dataset
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
}

fn default_delimiter() -> String {
    ",".to_string()
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }
}

impl RegionConfig {
    pub fn delimiter_byte(&self) -> u8 {
        self.delimiter.as_bytes().first().copied().unwrap_or(b',')
    }
}

impl FacilityTableConfig {
    pub fn delimiter_byte(&self) -> u8 {
        self.delimiter.as_bytes().first().copied().unwrap_or(b',')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml_text = r#"
            [facilities]
            path = "schools.csv"
            crs = "EPSG:3857"

            [[regions]]
            key = "lausd"
            path = "addresses.csv"
            crs = "EPSG:2229"
            delimiter = ";"
        "#;
        let config: Config = toml::from_str(toml_text).unwrap();
        assert_eq!(config.facilities.crs, "EPSG:3857");
        assert_eq!(config.facilities.delimiter_byte(), b',');
        assert_eq!(config.regions.len(), 1);
        assert_eq!(config.regions[0].key, "lausd");
        assert_eq!(config.regions[0].delimiter_byte(), b';');
    }
}
