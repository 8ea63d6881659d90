//! Firestore REST sink. One document per case, keyed by sanitized case number.

use std::path::Path;

use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::config::Settings;
use crate::db::CaseRecord;
use crate::error::StoreError;

const DATASTORE_SCOPE: &str = "https://www.googleapis.com/auth/datastore";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const TOKEN_LIFETIME_SECS: i64 = 3600;
/// Refresh this long before the server-side expiry.
const TOKEN_SLACK_SECS: i64 = 60;

/// A keyed document collection that upserts whole case records.
pub trait RemoteStore {
    async fn upsert(&self, doc_id: &str, record: &CaseRecord) -> Result<(), StoreError>;
}

/// Firestore ids may not contain `/`.
pub fn document_id(case_file_no: &str) -> String {
    case_file_no.replace('/', "_")
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccount {
    pub project_id: String,
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

#[derive(Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

fn default_expires_in() -> i64 {
    TOKEN_LIFETIME_SECS
}

struct CachedToken {
    value: String,
    expires_at: i64,
}

pub struct FirestoreClient {
    http: reqwest::Client,
    account: ServiceAccount,
    key: EncodingKey,
    base_url: String,
    collection: String,
    token: Mutex<Option<CachedToken>>,
}

impl FirestoreClient {
    /// Build a client from the configured service-account file.
    ///
    /// Returns `None` (local-only mode) when the file is absent or unusable.
    pub fn connect(settings: &Settings) -> Option<Self> {
        let path = &settings.service_account_path;
        if !path.exists() {
            warn!("{} not found. Running in local-only mode.", path.display());
            return None;
        }
        match Self::from_file(path, &settings.firestore_base_url, &settings.collection) {
            Ok(client) => {
                info!(project = %client.account.project_id, "Firestore initialized successfully.");
                Some(client)
            }
            Err(e) => {
                error!("Error initializing Firestore: {}", e);
                None
            }
        }
    }

    pub fn from_file(path: &Path, base_url: &str, collection: &str) -> Result<Self, StoreError> {
        let raw = std::fs::read_to_string(path)?;
        let account: ServiceAccount = serde_json::from_str(&raw)?;
        if account.project_id.is_empty() || account.client_email.is_empty() {
            return Err(StoreError::Credentials(
                "project_id and client_email are required".into(),
            ));
        }
        let key = EncodingKey::from_rsa_pem(account.private_key.as_bytes())?;
        Ok(FirestoreClient {
            http: reqwest::Client::new(),
            account,
            key,
            base_url: base_url.trim_end_matches('/').to_string(),
            collection: collection.to_string(),
            token: Mutex::new(None),
        })
    }

    async fn access_token(&self) -> Result<String, StoreError> {
        let mut cached = self.token.lock().await;
        let now = Utc::now().timestamp();
        if let Some(token) = cached.as_ref().filter(|t| t.expires_at > now) {
            return Ok(token.value.clone());
        }

        let claims = Claims {
            iss: &self.account.client_email,
            scope: DATASTORE_SCOPE,
            aud: &self.account.token_uri,
            iat: now,
            exp: now + TOKEN_LIFETIME_SECS,
        };
        let assertion = encode(&Header::new(Algorithm::RS256), &claims, &self.key)?;

        let resp = self
            .http
            .post(&self.account.token_uri)
            .form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(StoreError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let token: TokenResponse = resp.json().await?;
        *cached = Some(CachedToken {
            value: token.access_token.clone(),
            expires_at: now + token.expires_in - TOKEN_SLACK_SECS,
        });
        Ok(token.access_token)
    }

    fn database_path(&self) -> String {
        format!("projects/{}/databases/(default)", self.account.project_id)
    }
}

impl RemoteStore for FirestoreClient {
    async fn upsert(&self, doc_id: &str, record: &CaseRecord) -> Result<(), StoreError> {
        let token = self.access_token().await?;
        let name = format!("{}/documents/{}/{}", self.database_path(), self.collection, doc_id);
        let url = format!("{}/{}/documents:commit", self.base_url, self.database_path());

        let resp = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(&commit_body(&name, record)?)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(StoreError::Server {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

/// A single full-overwrite write with `createdAt` stamped by the server.
fn commit_body(name: &str, record: &CaseRecord) -> Result<Value, StoreError> {
    Ok(json!({
        "writes": [{
            "update": { "name": name, "fields": to_fields(record)? },
            "updateTransforms": [{
                "fieldPath": "createdAt",
                "setToServerValue": "REQUEST_TIME",
            }],
        }],
    }))
}

/// Encode a record's JSON form as Firestore typed values.
fn to_fields(record: &CaseRecord) -> Result<Map<String, Value>, StoreError> {
    let Value::Object(obj) = serde_json::to_value(record)? else {
        return Ok(Map::new());
    };
    Ok(obj
        .into_iter()
        .map(|(k, v)| {
            let typed = match v {
                Value::String(s) => json!({ "stringValue": s }),
                Value::Null => json!({ "nullValue": null }),
                other => json!({ "stringValue": other.to_string() }),
            };
            (k, typed)
        })
        .collect())
}
