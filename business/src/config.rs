use anyhow::{Context, bail};
use gove_states::State;
use log::info;
use serde::Deserialize;
use std::env::vars;
use ustr::Ustr;

/// Base URL used when `GOVE_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "http://localhost:700/api";

/// Page size used when `GOVE_PER_PAGE` is not set.
pub const DEFAULT_PER_PAGE: u32 = 10;

/// Raw environment, before defaults are applied.
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    gove_api_url: Option<String>,
    gove_per_page: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessConfig {
    /// Base URL of the user service, e.g. `http://localhost:700/api`.
    pub api_base_url: Ustr,
    /// Rows per page of the users list.
    pub per_page: u32,
}

impl BusinessConfig {
    pub fn new(api_base_url: impl AsRef<str>) -> Self {
        Self {
            api_base_url: Ustr::from(api_base_url.as_ref().trim_end_matches('/')),
            per_page: DEFAULT_PER_PAGE,
        }
    }

    /// Reads `GOVE_API_URL` and `GOVE_PER_PAGE` from the environment.
    pub fn init() -> anyhow::Result<Self> {
        info!("Loading configuration from environment variables");
        let raw: RawConfig =
            serde_env::from_iter(vars()).context("failed to read configuration from env")?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> anyhow::Result<Self> {
        let RawConfig {
            gove_api_url,
            gove_per_page,
        } = raw;

        let api_base_url = match gove_api_url {
            Some(url) if !url.trim().is_empty() => {
                info!("Using provided GOVE_API_URL: {url}");
                url
            }
            _ => {
                info!("GOVE_API_URL not set, defaulting to {DEFAULT_API_URL}");
                DEFAULT_API_URL.to_owned()
            }
        };

        let per_page = match gove_per_page {
            Some(0) => bail!("GOVE_PER_PAGE must be at least 1"),
            Some(per_page) => per_page,
            None => DEFAULT_PER_PAGE,
        };

        Ok(Self {
            per_page,
            ..Self::new(api_base_url)
        })
    }
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl State for BusinessConfig {
    fn snapshot(&self) -> Option<Box<dyn State>> {
        Some(Box::new(self.clone()))
    }
}
