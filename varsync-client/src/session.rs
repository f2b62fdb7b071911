//! Store session — one mutable variable-set snapshot with an explicit
//! `refresh()` / `commit()` pair.
//!
//! The session fetches the collection once on connect; everything between
//! connect and commit operates on that in-memory snapshot. An interrupted
//! run therefore leaves the store in its pre-commit state.

use chrono::{DateTime, Utc};

use varsync_core::scope::ScopeIndex;
use varsync_core::settings::Settings;
use varsync_core::types::{ScopeId, VariableSet};

use crate::client::{ProjectResource, StoreClient};
use crate::error::ClientError;

#[derive(Debug)]
pub struct StoreSession {
    client: StoreClient,
    project: ProjectResource,
    set: VariableSet,
    scopes: ScopeIndex,
    fetched_at: DateTime<Utc>,
}

impl StoreSession {
    /// Sign in (when credentials are configured), resolve the project, and
    /// fetch the initial snapshot.
    pub fn connect(settings: &Settings) -> Result<Self, ClientError> {
        let client = StoreClient::from_settings(settings);
        if let Some((user, password)) = settings.credentials() {
            client.sign_in(user, password)?;
        }

        let project = client.find_project(&settings.project_name)?;
        let set = client.fetch_variable_set(&project.variable_set_id)?;
        let scopes = ScopeIndex::new(&set.scope_values.environments);
        tracing::info!(
            "connected to project '{}': {} variable(s), {} environment(s)",
            project.name,
            set.variables.len(),
            scopes.len()
        );

        Ok(Self {
            client,
            project,
            set,
            scopes,
            fetched_at: Utc::now(),
        })
    }

    pub fn project(&self) -> &ProjectResource {
        &self.project
    }

    pub fn variables(&self) -> &VariableSet {
        &self.set
    }

    pub fn variables_mut(&mut self) -> &mut VariableSet {
        &mut self.set
    }

    /// Scope index for the current snapshot.
    pub fn scopes(&self) -> &ScopeIndex {
        &self.scopes
    }

    /// Resolve an environment name against the current snapshot's scope
    /// values.
    pub fn resolve_environment(&self, name: &str) -> Result<ScopeId, ClientError> {
        Ok(self.scopes.resolve(name)?.clone())
    }

    /// When the current snapshot was taken.
    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    /// Discard the snapshot and re-fetch, rebuilding the scope index.
    pub fn refresh(&mut self) -> Result<(), ClientError> {
        self.adopt(self.client.fetch_variable_set(&self.project.variable_set_id)?);
        tracing::debug!("refreshed snapshot for '{}'", self.project.name);
        Ok(())
    }

    /// Persist the whole snapshot and adopt the store's post-write view.
    pub fn commit(&mut self) -> Result<(), ClientError> {
        tracing::info!(
            "committing {} variable(s) to '{}'",
            self.set.variables.len(),
            self.project.name
        );
        self.adopt(self.client.update_variable_set(&self.set)?);
        Ok(())
    }

    fn adopt(&mut self, set: VariableSet) {
        self.scopes = ScopeIndex::new(&set.scope_values.environments);
        self.set = set;
        self.fetched_at = Utc::now();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
