//! User settings: provider API key (persisted), output language and custom prompt.

pub mod handlers;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;

use crate::generation::content_type::Language;
use crate::history::store::{SlotStore, StoreError};

#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub api_key: Option<String>,
    pub language: Language,
    pub custom_prompt: Option<String>,
}

/// Partial update. Absent fields are left alone; an empty string clears.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsUpdate {
    pub api_key: Option<String>,
    pub language: Option<Language>,
    pub custom_prompt: Option<String>,
}

/// What the settings endpoint returns. The key itself is never echoed back.
#[derive(Debug, Clone, Serialize)]
pub struct SettingsView {
    pub has_api_key: bool,
    pub api_key_hint: Option<String>,
    pub language: Language,
    pub custom_prompt: Option<String>,
}

#[derive(Clone)]
pub struct SettingsService {
    inner: Arc<RwLock<Settings>>,
    store: SlotStore,
}

impl SettingsService {
    /// Reads the key slot once. `seed_key` fills an empty slot on first start.
    pub async fn load(store: SlotStore, seed_key: Option<&str>) -> Result<Self, StoreError> {
        let mut api_key = store.load_api_key()?;
        if api_key.is_none() {
            if let Some(seed) = seed_key.map(str::trim).filter(|k| !k.is_empty()) {
                store.save_api_key(seed).await?;
                info!("Seeded API key slot from environment");
                api_key = Some(seed.to_string());
            }
        }

        Ok(Self {
            inner: Arc::new(RwLock::new(Settings {
                api_key,
                ..Settings::default()
            })),
            store,
        })
    }

    pub async fn current(&self) -> Settings {
        self.inner.read().await.clone()
    }

    pub async fn view(&self) -> SettingsView {
        let settings = self.inner.read().await;
        SettingsView {
            has_api_key: settings.api_key.is_some(),
            api_key_hint: settings.api_key.as_deref().map(mask_key),
            language: settings.language,
            custom_prompt: settings.custom_prompt.clone(),
        }
    }

    pub async fn update(&self, update: SettingsUpdate) -> Result<SettingsView, StoreError> {
        {
            let mut settings = self.inner.write().await;

            if let Some(key) = update.api_key {
                let key = key.trim().to_string();
                self.store.save_api_key(&key).await?;
                settings.api_key = (!key.is_empty()).then_some(key);
            }
            if let Some(language) = update.language {
                settings.language = language;
            }
            if let Some(prompt) = update.custom_prompt {
                settings.custom_prompt = (!prompt.trim().is_empty()).then_some(prompt);
            }
        }
        Ok(self.view().await)
    }
}

/// Keeps the last four characters: `AIzaSyD...9xQ2` → `****9xQ2`.
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{tail}")
}
