//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! Every field has a default so an empty file is a valid configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::blockchain::types::{EndpointConfig, LoginConfig, LoginRule};

/// Root configuration for the session layer.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SessionConfig {
    /// Node endpoint the client binds to.
    pub node: NodeConfig,

    /// Settings applied to every login and registration.
    pub login: LoginSettings,

    /// Account registration settings.
    pub registration: RegistrationSettings,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Node endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NodeConfig {
    /// Node URLs the client may use.
    pub node_url_pool: Vec<String>,

    /// Blockchain instance identifier on the node.
    pub blockchain_iid: u64,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            node_url_pool: vec!["http://localhost:7740".to_string()],
            blockchain_iid: 0,
        }
    }
}

impl NodeConfig {
    pub fn endpoint(&self) -> EndpointConfig {
        EndpointConfig {
            node_url_pool: self.node_url_pool.clone(),
            blockchain_iid: self.blockchain_iid,
        }
    }
}

/// Login configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoginSettings {
    /// Session time-to-live in seconds.
    pub ttl_secs: u64,

    /// Scope flags attached to the session.
    pub flags: Vec<String>,
}

impl Default for LoginSettings {
    fn default() -> Self {
        Self {
            ttl_secs: 2 * 60 * 60,
            flags: vec!["MySession".to_string()],
        }
    }
}

impl LoginSettings {
    pub fn login_config(&self) -> LoginConfig {
        LoginConfig {
            rules: LoginRule::Ttl(Duration::from_secs(self.ttl_secs)),
            flags: self.flags.clone(),
        }
    }
}

/// Registration configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RegistrationSettings {
    /// Remote operation run when an account is registered.
    pub operation: String,

    /// Prefix of the generated display name.
    pub name_prefix: String,

    /// Generated names use a suffix in `0..name_range`.
    pub name_range: u32,

    /// Flags on the single-signature auth descriptor.
    pub auth_flags: Vec<String>,
}

impl Default for RegistrationSettings {
    fn default() -> Self {
        Self {
            operation: "create_user".to_string(),
            name_prefix: "RandomUser_".to_string(),
            name_range: 1000,
            auth_flags: vec!["A".to_string(), "T".to_string()],
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
