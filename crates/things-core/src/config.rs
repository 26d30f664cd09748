//! Backend Bootstrap Configuration
//!
//! Opaque settings handed to the hosted database client at startup.

use serde::{Deserialize, Serialize};

/// Firebase project settings, serialized in the shape `initializeApp` expects
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirebaseConfig {
    pub api_key: String,
    pub auth_domain: String,
    pub project_id: String,
}

impl FirebaseConfig {
    pub fn new(
        api_key: impl Into<String>,
        auth_domain: impl Into<String>,
        project_id: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            auth_domain: auth_domain.into(),
            project_id: project_id.into(),
        }
    }

    /// Names of settings left empty. Only used for a startup warning.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            ("apiKey", &self.api_key),
            ("authDomain", &self.auth_domain),
            ("projectId", &self.project_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}
