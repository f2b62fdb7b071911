//! Blocking HTTP client for the variable store REST surface.
//!
//! Endpoints used:
//! - `POST /api/users/login` — username/password sign-in
//! - `GET  /api/projects/all` — project list, matched by name
//! - `GET  /api/variables/{id}` — fetch a variable set
//! - `PUT  /api/variables/{id}` — replace a variable set, returns the stored view
//!
//! An API key, when configured, rides along as the `X-ApiKey` header on every
//! request.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use varsync_core::settings::Settings;
use varsync_core::types::VariableSet;

use crate::error::ClientError;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "X-ApiKey";

/// A project as listed by the store (only the fields this tool needs).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProjectResource {
    pub id: String,
    pub name: String,
    pub variable_set_id: String,
}

/// Blocking client bound to one server.
#[derive(Debug)]
pub struct StoreClient {
    agent: ureq::Agent,
    base_url: String,
    api_key: Option<String>,
}

impl StoreClient {
    pub fn new(server_url: &str, api_key: Option<String>) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().build(),
            base_url: server_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(&settings.server_url, settings.api_key.clone())
    }

    fn request(&self, method: &str, path: &str) -> ureq::Request {
        let url = format!("{}{path}", self.base_url);
        let mut request = self.agent.request(method, &url).set("Accept", "application/json");
        if let Some(key) = &self.api_key {
            request = request.set(API_KEY_HEADER, key);
        }
        request
    }

    /// Sign in with username/password; the store keeps the session on the
    /// agent's cookie jar.
    pub fn sign_in(&self, user: &str, password: &str) -> Result<(), ClientError> {
        let response = self
            .request("POST", "/api/users/login")
            .send_json(serde_json::json!({ "Username": user, "Password": password }));
        map_response(response, "sign-in")?;
        tracing::debug!("signed in as '{user}'");
        Ok(())
    }

    /// Look up a project by its display name.
    pub fn find_project(&self, name: &str) -> Result<ProjectResource, ClientError> {
        let response = self.request("GET", "/api/projects/all").call();
        let projects: Vec<ProjectResource> = read_json(map_response(response, "project list")?)?;
        projects
            .into_iter()
            .find(|p| p.name == name)
            .ok_or_else(|| ClientError::ProjectNotFound {
                name: name.to_owned(),
            })
    }

    pub fn fetch_variable_set(&self, id: &str) -> Result<VariableSet, ClientError> {
        let response = self.request("GET", &format!("/api/variables/{id}")).call();
        read_json(map_response(response, "variable set fetch")?)
    }

    /// Replace the whole variable set; returns the store's post-write view.
    pub fn update_variable_set(&self, set: &VariableSet) -> Result<VariableSet, ClientError> {
        let response = self
            .request("PUT", &format!("/api/variables/{}", set.id))
            .send_json(set);
        read_json(map_response(response, "variable set update")?)
    }
}

fn map_response(
    result: Result<ureq::Response, ureq::Error>,
    operation: &str,
) -> Result<ureq::Response, ClientError> {
    match result {
        Ok(response) => Ok(response),
        Err(ureq::Error::Status(status @ (401 | 403), response)) => {
            let message = response.into_string().unwrap_or_default();
            Err(ClientError::AccessDenied { status, message })
        }
        Err(ureq::Error::Status(status, response)) => {
            let body = response.into_string().unwrap_or_default();
            Err(ClientError::Request {
                operation: operation.to_string(),
                detail: format!("HTTP {status}: {body}"),
            })
        }
        Err(err) => Err(ClientError::Request {
            operation: operation.to_string(),
            detail: err.to_string(),
        }),
    }
}

fn read_json<T: DeserializeOwned>(response: ureq::Response) -> Result<T, ClientError> {
    response
        .into_json()
        .map_err(|e| ClientError::Malformed(e.to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
