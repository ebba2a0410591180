use std::{
    sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
    time::Duration,
};

use async_trait::async_trait;
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Contact, ContactDraft, ContactId},
    protocol::{contact_path, contacts_collection_path, ContactPayload, CONTACTS_PATH},
};
use tracing::{debug, info, warn};
use url::Url;

use crate::{cache::ContactCache, error::RemoteError};

const LIST_OK: &[StatusCode] = &[StatusCode::OK];
const WRITE_OK: &[StatusCode] = &[StatusCode::OK, StatusCode::CREATED];
const DELETE_OK: &[StatusCode] = &[StatusCode::NO_CONTENT];

/// Remote-backed contact operations the interaction layer depends on.
///
/// Mutating operations touch the cache only after the remote store confirms them.
#[async_trait]
pub trait ContactService: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<Contact>, RemoteError>;
    async fn create(&self, draft: &ContactDraft) -> Result<Contact, RemoteError>;
    async fn update(&self, id: ContactId, draft: &ContactDraft) -> Result<Contact, RemoteError>;
    async fn fetch_one(&self, id: ContactId) -> Result<Contact, RemoteError>;
    async fn delete(&self, id: ContactId) -> Result<(), RemoteError>;
    fn current_cache(&self) -> Vec<Contact>;
}

/// HTTP client for the contacts API plus the page-lifetime cache.
///
/// Calls are not queued: overlapping mutations each apply to the cache when
/// their own response arrives, so the last response to land wins.
pub struct ContactStore {
    http: Client,
    base_url: Url,
    cache: RwLock<ContactCache>,
}

impl ContactStore {
    pub fn new(server_url: &str, request_timeout: Duration) -> Result<Self, RemoteError> {
        let http = Client::builder().timeout(request_timeout).build()?;
        Self::with_client(http, server_url)
    }

    pub fn with_client(http: Client, server_url: &str) -> Result<Self, RemoteError> {
        Ok(Self {
            http,
            base_url: normalize_base_url(server_url)?,
            cache: RwLock::new(ContactCache::default()),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn cache(&self) -> RwLockReadGuard<'_, ContactCache> {
        self.cache.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn cache_mut(&self) -> RwLockWriteGuard<'_, ContactCache> {
        self.cache.write().unwrap_or_else(PoisonError::into_inner)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        payload: Option<&ContactPayload>,
        accepted: &[StatusCode],
    ) -> Result<Response, RemoteError> {
        let url = self.base_url.join(path)?;
        debug!(%method, %url, "contacts api request");
        let mut request = self.http.request(method.clone(), url);
        if let Some(payload) = payload {
            request = request.json(payload);
        }
        let response = request.send().await?;
        let status = response.status();
        if accepted.contains(&status) {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        warn!(%method, path, %status, "contacts api rejected request");
        Err(RemoteError::Status { status, body })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, RemoteError> {
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl ContactService for ContactStore {
    async fn fetch_all(&self) -> Result<Vec<Contact>, RemoteError> {
        let response = self.send(Method::GET, CONTACTS_PATH, None, LIST_OK).await?;
        let contacts: Vec<Contact> = Self::decode(response).await?;
        info!(count = contacts.len(), "fetched contact list");
        self.cache_mut().replace_all(contacts.clone());
        Ok(contacts)
    }

    async fn create(&self, draft: &ContactDraft) -> Result<Contact, RemoteError> {
        let payload = ContactPayload::from(draft);
        let response = self
            .send(
                Method::POST,
                &contacts_collection_path(),
                Some(&payload),
                WRITE_OK,
            )
            .await?;
        let contact: Contact = Self::decode(response).await?;
        info!(contact_id = contact.id.0, "created contact");
        self.cache_mut().append(contact.clone());
        Ok(contact)
    }

    async fn update(&self, id: ContactId, draft: &ContactDraft) -> Result<Contact, RemoteError> {
        let payload = ContactPayload::from(draft);
        let response = self
            .send(Method::PUT, &contact_path(id), Some(&payload), WRITE_OK)
            .await?;
        let contact: Contact = Self::decode(response).await?;
        info!(contact_id = contact.id.0, "updated contact");
        if !self.cache_mut().replace(contact.clone()) {
            warn!(
                contact_id = contact.id.0,
                "updated contact is not cached; cache left unchanged"
            );
        }
        Ok(contact)
    }

    async fn fetch_one(&self, id: ContactId) -> Result<Contact, RemoteError> {
        let response = self.send(Method::GET, &contact_path(id), None, LIST_OK).await?;
        Self::decode(response).await
    }

    async fn delete(&self, id: ContactId) -> Result<(), RemoteError> {
        self.send(Method::DELETE, &contact_path(id), None, DELETE_OK)
            .await?;
        info!(contact_id = id.0, "deleted contact");
        self.cache_mut().remove(id);
        Ok(())
    }

    fn current_cache(&self) -> Vec<Contact> {
        self.cache().snapshot()
    }
}

/// Ensures the base URL ends with `/` so relative API paths join beneath it.
fn normalize_base_url(server_url: &str) -> Result<Url, url::ParseError> {
    let trimmed = server_url.trim();
    if trimmed.ends_with('/') {
        Url::parse(trimmed)
    } else {
        Url::parse(&format!("{trimmed}/"))
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
