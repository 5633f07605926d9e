use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;

use crate::pipeline;

#[derive(Deserialize)]
pub struct Config {
  pub app: AppConfig,
  #[serde(default)]
  pub augment: pipeline::Params,
}

#[derive(Deserialize)]
pub struct AppConfig {
  pub listen: String,
  pub metrics_listen: String,
  pub max_body_size_mb: usize,
  pub enable_openapi: Option<bool>,
  // Fixes the augmentation RNG for reproducible archives
  pub seed: Option<u64>,
}

pub fn parse(config_path: &str) -> Result<Config> {
  // Load config
  let toml_str = fs::read_to_string(config_path)
    .with_context(|| format!("failed to read config file: {}", config_path))?;
  let cfg: Config = toml::from_str(&toml_str).context("failed to deserialize config")?;

  Ok(cfg)
}
