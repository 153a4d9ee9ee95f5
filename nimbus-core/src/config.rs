//! Client configuration

use serde::Deserialize;

use crate::credentials::Credentials;
use crate::Error;

/// Settings shared by every service client
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_region")]
    pub region: String,

    /// Endpoint override, e.g. a local emulator
    #[serde(default)]
    pub endpoint: Option<String>,

    #[serde(default)]
    pub access_key_id: Option<String>,

    #[serde(default)]
    pub secret_access_key: Option<String>,

    #[serde(default)]
    pub session_token: Option<String>,

    /// Total attempts per call, including the first one
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Dispatch the next page of a paginated call while the current one is consumed
    #[serde(default = "default_true")]
    pub prefetch: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            endpoint: None,
            access_key_id: None,
            secret_access_key: None,
            session_token: None,
            max_attempts: default_max_attempts(),
            timeout_secs: default_timeout_secs(),
            prefetch: true,
        }
    }
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_max_attempts() -> u32 {
    3
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

impl ClientConfig {
    /// Load configuration from an optional `nimbus.{toml,json,yaml}` file and `NIMBUS_*` environment
    pub fn load() -> Result<Self, Error> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("nimbus").required(false))
            .add_source(config::Environment::with_prefix("NIMBUS"))
            .build()?;

        Ok(config.try_deserialize::<ClientConfig>()?)
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.access_key_id = Some(credentials.access_key_id);
        self.secret_access_key = Some(credentials.secret_access_key);
        self.session_token = credentials.session_token;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn with_prefetch(mut self, prefetch: bool) -> Self {
        self.prefetch = prefetch;
        self
    }

    /// Credentials given explicitly in this configuration
    pub fn credentials(&self) -> Option<Credentials> {
        match (&self.access_key_id, &self.secret_access_key) {
            (Some(key), Some(secret)) => Some(Credentials::new(
                key.clone(),
                secret.clone(),
                self.session_token.clone(),
            )),
            _ => None,
        }
    }
}
