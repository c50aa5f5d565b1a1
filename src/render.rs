use crate::{settings::SettingsError, Settings};
use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Toml,
    Json,
}

impl FromStr for Format {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            _ => Err(anyhow::anyhow!("unsupported format '{}', expected toml or json", s)),
        }
    }
}

impl Display for Format {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Format::Toml => f.write_str("toml"),
            Format::Json => f.write_str("json"),
        }
    }
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("couldn't serialize toml: {0}")]
    Toml(#[from] toml::ser::Error),
    #[error("couldn't serialize json: {0}")]
    Json(#[from] serde_json::Error),
}

impl Settings {
    pub fn render(&self, format: Format) -> Result<String, RenderError> {
        let rendered = match format {
            Format::Toml => toml::to_string_pretty(self)?,
            Format::Json => serde_json::to_string_pretty(self)?,
        };
        Ok(rendered)
    }

    pub fn parse(content: &str, format: Format) -> Result<Self, SettingsError> {
        match format {
            Format::Toml => Self::from_toml_str(content),
            Format::Json => Self::from_json_str(content),
        }
    }
}
