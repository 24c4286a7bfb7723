use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

pub const SCRYFALL_API_BASE: &str = "https://api.scryfall.com";

/// Resolves an opaque card identifier to a display-image URL.
pub trait ImageResolver: Send + Sync {
    fn resolve(&self, id: &str) -> Result<String>;
}

#[derive(Debug, Deserialize)]
struct ImageUris {
    normal: Option<String>,
    small: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CardFace {
    image_uris: Option<ImageUris>,
}

#[derive(Debug, Deserialize)]
struct ScryfallCard {
    image_uris: Option<ImageUris>,
    card_faces: Option<Vec<CardFace>>,
}

/// Prefers the normal-resolution image and falls back to small; a card with
/// no top-level images falls back to its first face the same way.
fn image_from_card(card: &ScryfallCard) -> Option<String> {
    if let Some(uris) = &card.image_uris {
        if let Some(url) = uris.normal.clone().or_else(|| uris.small.clone()) {
            return Some(url);
        }
    }
    let face = card.card_faces.as_ref()?.first()?;
    let uris = face.image_uris.as_ref()?;
    uris.normal.clone().or_else(|| uris.small.clone())
}

/// Blocking client for the read-only Scryfall card endpoint.
pub struct ScryfallClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl ScryfallClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(SCRYFALL_API_BASE)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl ImageResolver for ScryfallClient {
    fn resolve(&self, id: &str) -> Result<String> {
        if id.is_empty() {
            bail!("empty Scryfall identifier");
        }
        let url = format!("{}/cards/{}", self.base_url, id);
        let response = self
            .http
            .get(&url)
            .send()
            .with_context(|| format!("request to {} failed", url))?
            .error_for_status()
            .with_context(|| format!("Scryfall returned an error status for {}", id))?;
        let card: ScryfallCard = response
            .json()
            .with_context(|| format!("unexpected Scryfall response shape for {}", id))?;
        image_from_card(&card)
            .with_context(|| format!("Scryfall record {} carries no image", id))
    }
}
