//! The API gateway.
//!
//! One shared execute path for every backend call: attach the bearer token
//! when the vault holds one, parse the `{ data, message }` envelope on
//! success, and inspect failures uniformly — 401/403 broadcast the
//! forced-logout signal before the error propagates; everything else is
//! surfaced through the notifier. Call sites cannot opt out.

use std::sync::Arc;

use reqwest::{RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use stockdesk_events::{InMemorySignalBus, SessionSignal, SignalBus};

use crate::config::ApiConfig;
use crate::envelope::{Envelope, ErrorBody};
use crate::error::{ApiError, GENERIC_ERROR_MESSAGE};
use crate::notify::Notifier;
use crate::vault::SessionVault;

/// Shared signal bus type carried by the gateway.
pub type SessionSignals = InMemorySignalBus<SessionSignal>;

#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: reqwest::Client,
    base_url: String,
    vault: Arc<dyn SessionVault>,
    signals: Arc<SessionSignals>,
    notifier: Arc<dyn Notifier>,
}

impl ApiClient {
    pub fn new(
        config: ApiConfig,
        vault: Arc<dyn SessionVault>,
        signals: Arc<SessionSignals>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                http: reqwest::Client::new(),
                base_url: config.base_url,
                vault,
                signals,
                notifier,
            }),
        }
    }

    /// The signal bus this gateway publishes forced logouts on.
    pub fn signals(&self) -> Arc<SessionSignals> {
        Arc::clone(&self.inner.signals)
    }

    /// The vault this gateway reads bearer tokens from.
    pub fn vault(&self) -> Arc<dyn SessionVault> {
        Arc::clone(&self.inner.vault)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.inner.base_url, path)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Request helpers (one per verb/payload shape the backend uses)
    // ─────────────────────────────────────────────────────────────────────

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<Envelope<T>, ApiError> {
        self.execute(self.inner.http.get(self.url(path))).await
    }

    pub async fn get_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Envelope<T>, ApiError> {
        self.execute(self.inner.http.get(self.url(path)).query(query))
            .await
    }

    pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Envelope<T>, ApiError> {
        self.execute(self.inner.http.post(self.url(path)).json(body))
            .await
    }

    pub async fn post_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Envelope<T>, ApiError> {
        self.execute(self.inner.http.post(self.url(path)).query(query))
            .await
    }

    pub async fn put<T: DeserializeOwned>(&self, path: &str) -> Result<Envelope<T>, ApiError> {
        self.execute(self.inner.http.put(self.url(path))).await
    }

    pub async fn put_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Envelope<T>, ApiError> {
        self.execute(self.inner.http.put(self.url(path)).json(body))
            .await
    }

    pub async fn put_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Envelope<T>, ApiError> {
        self.execute(self.inner.http.put(self.url(path)).query(query))
            .await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Envelope<T>, ApiError> {
        self.execute(self.inner.http.delete(self.url(path))).await
    }

    pub async fn delete_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Envelope<T>, ApiError> {
        self.execute(self.inner.http.delete(self.url(path)).query(query))
            .await
    }

    // ─────────────────────────────────────────────────────────────────────
    // The one shared execute path
    // ─────────────────────────────────────────────────────────────────────

    async fn execute<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<Envelope<T>, ApiError> {
        let builder = match self.inner.vault.token() {
            Ok(Some(token)) => builder.bearer_auth(token),
            Ok(None) => builder,
            Err(err) => {
                // A broken vault means no credentials; send anonymously and
                // let the backend decide.
                warn!(?err, "failed to read token from vault");
                builder
            }
        };

        let response = builder.send().await?;
        let status = response.status();

        if status.is_success() {
            debug!(status = status.as_u16(), "backend call succeeded");
            return response
                .json::<Envelope<T>>()
                .await
                .map_err(|e| ApiError::Decode(e.to_string()));
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .unwrap_or_default()
            .message;

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            warn!(status = status.as_u16(), "credentials rejected; broadcasting forced logout");
            if let Err(err) = self.inner.signals.publish(SessionSignal::ForcedLogout {
                status: status.as_u16(),
            }) {
                warn!(?err, "failed to broadcast forced-logout signal");
            }
            return Err(ApiError::Authorization {
                status: status.as_u16(),
                message,
            });
        }

        let message = message.unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string());
        self.inner.notifier.error(&message);
        Err(ApiError::Backend {
            status: status.as_u16(),
            message,
        })
    }
}
