//! Session state codec: typed access to the per-profile keys in the store.
//!
//! A `SessionState` binds the shared store to one profile. Reads decode JSON;
//! anything that fails to decode is logged, cleared, and reported as absent,
//! so callers only ever see "present and well-formed" or "absent".

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::store::{KeyValueStore, StoreError};

pub mod extract;
pub mod keys;
pub mod models;

pub use keys::SessionKey;
pub use models::{
    CredentialRecord, Customization, ParsedResume, PlanId, TemplateId, UploadedFile,
    WebsiteRecord,
};

#[derive(Clone)]
pub struct SessionState {
    store: Arc<dyn KeyValueStore>,
    profile: Uuid,
}

impl SessionState {
    pub fn new(store: Arc<dyn KeyValueStore>, profile: Uuid) -> Self {
        Self { store, profile }
    }

    pub fn profile(&self) -> Uuid {
        self.profile
    }

    fn scoped(&self, key: SessionKey) -> String {
        format!("profile:{}:{}", self.profile, key.as_str())
    }

    // ── generic codec ───────────────────────────────────────────────────────

    /// Reads and decodes `key`. A corrupt entry is removed and reads as absent.
    pub async fn read<T: DeserializeOwned>(&self, key: SessionKey) -> Option<T> {
        let raw = self.store.get(&self.scoped(key)).await?;
        match serde_json::from_str::<T>(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(profile = %self.profile, key = %key, "Corrupt session entry, clearing: {e}");
                if let Err(e) = self.store.remove(&self.scoped(key)).await {
                    warn!(profile = %self.profile, key = %key, "Failed to clear corrupt entry: {e}");
                }
                None
            }
        }
    }

    pub async fn write<T: Serialize>(&self, key: SessionKey, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value)?;
        self.store.set(&self.scoped(key), raw).await
    }

    pub async fn remove(&self, key: SessionKey) -> Result<(), StoreError> {
        self.store.remove(&self.scoped(key)).await
    }

    /// True when `key` exists and decodes as the shape registered for it.
    pub async fn present(&self, key: SessionKey) -> bool {
        match key {
            SessionKey::User => self.read::<CredentialRecord>(key).await.is_some(),
            SessionKey::Users => self.read::<Vec<CredentialRecord>>(key).await.is_some(),
            SessionKey::UploadedFile => self.read::<UploadedFile>(key).await.is_some(),
            SessionKey::SelectedPlan => self.read::<PlanId>(key).await.is_some(),
            SessionKey::ParsedData => self.read::<ParsedResume>(key).await.is_some(),
            SessionKey::SelectedTemplate => self.read::<TemplateId>(key).await.is_some(),
            SessionKey::Customizations => self.read::<Customization>(key).await.is_some(),
            SessionKey::Websites => self.read::<Vec<WebsiteRecord>>(key).await.is_some(),
        }
    }

    // ── identity ────────────────────────────────────────────────────────────

    pub async fn current_user(&self) -> Option<CredentialRecord> {
        self.read(SessionKey::User).await
    }

    pub async fn set_current_user(&self, user: &CredentialRecord) -> Result<(), StoreError> {
        self.write(SessionKey::User, &user.without_password()).await
    }

    pub async fn clear_current_user(&self) -> Result<(), StoreError> {
        self.remove(SessionKey::User).await
    }

    pub async fn credentials(&self) -> Vec<CredentialRecord> {
        self.read(SessionKey::Users).await.unwrap_or_default()
    }

    pub async fn set_credentials(&self, users: &[CredentialRecord]) -> Result<(), StoreError> {
        self.write(SessionKey::Users, &users).await
    }

    // ── wizard artifacts ────────────────────────────────────────────────────

    pub async fn uploaded_file(&self) -> Option<UploadedFile> {
        self.read(SessionKey::UploadedFile).await
    }

    pub async fn set_uploaded_file(&self, file: &UploadedFile) -> Result<(), StoreError> {
        self.write(SessionKey::UploadedFile, file).await
    }

    pub async fn selected_plan(&self) -> Option<PlanId> {
        self.read(SessionKey::SelectedPlan).await
    }

    pub async fn set_selected_plan(&self, plan: PlanId) -> Result<(), StoreError> {
        self.write(SessionKey::SelectedPlan, &plan).await
    }

    pub async fn parsed_resume(&self) -> Option<ParsedResume> {
        self.read(SessionKey::ParsedData).await
    }

    /// Writes the parsed document unless a well-formed one already exists.
    /// Returns `false` when an earlier document was kept.
    pub async fn write_parsed_resume_once(&self, doc: &ParsedResume) -> Result<bool, StoreError> {
        if self.present(SessionKey::ParsedData).await {
            return Ok(false);
        }
        self.write(SessionKey::ParsedData, doc).await?;
        Ok(true)
    }

    pub async fn selected_template(&self) -> Option<TemplateId> {
        self.read(SessionKey::SelectedTemplate).await
    }

    pub async fn set_selected_template(&self, template: TemplateId) -> Result<(), StoreError> {
        self.write(SessionKey::SelectedTemplate, &template).await
    }

    pub async fn customization(&self) -> Option<Customization> {
        self.read(SessionKey::Customizations).await
    }

    pub async fn set_customization(&self, customization: &Customization) -> Result<(), StoreError> {
        self.write(SessionKey::Customizations, customization).await
    }

    pub async fn websites(&self) -> Vec<WebsiteRecord> {
        self.read(SessionKey::Websites).await.unwrap_or_default()
    }

    /// Read-modify-write of the whole list. Not atomic across concurrent callers.
    pub async fn append_website(&self, website: WebsiteRecord) -> Result<(), StoreError> {
        let mut websites = self.websites().await;
        websites.push(website);
        self.write(SessionKey::Websites, &websites).await
    }
}
