//! Chain-facing value types and error definitions.

use std::fmt;
use std::time::Duration;

use alloy::primitives::hex;
use thiserror::Error;

use crate::query::QueryArgs;

/// Account identifier as reported by the key store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccountId(pub Vec<u8>);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(&self.0))
    }
}

impl From<Vec<u8>> for AccountId {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

/// Identity of a key store (for EVM wallets, the 20-byte address).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyStoreId(pub Vec<u8>);

impl fmt::Display for KeyStoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(&self.0))
    }
}

impl From<Vec<u8>> for KeyStoreId {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

/// An account reachable through a key store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
}

/// Node address pool and blockchain instance the client binds to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    pub node_url_pool: Vec<String>,
    pub blockchain_iid: u64,
}

/// Rule attached to a session at login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginRule {
    /// Session expires after the given time-to-live.
    Ttl(Duration),
}

/// Login configuration: expiry rule plus scope flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginConfig {
    pub rules: LoginRule,
    pub flags: Vec<String>,
}

/// Arguments of a login through a key-store interactor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRequest {
    pub account_id: AccountId,
    pub config: LoginConfig,
}

/// Declarative description of how a new account is authorized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthDescriptorRegistration {
    SingleSig {
        flags: Vec<String>,
        signer: KeyStoreId,
    },
}

impl AuthDescriptorRegistration {
    /// Single-signature descriptor for `signer` carrying `flags`.
    pub fn single_sig(flags: Vec<String>, signer: KeyStoreId) -> Self {
        Self::SingleSig { flags, signer }
    }
}

/// How the node should accept a new account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationStrategy {
    /// Anyone may register with the given descriptor.
    Open {
        auth_descriptor: AuthDescriptorRegistration,
        config: LoginConfig,
    },
}

impl RegistrationStrategy {
    pub fn open(auth_descriptor: AuthDescriptorRegistration, config: LoginConfig) -> Self {
        Self::Open {
            auth_descriptor,
            config,
        }
    }
}

/// A remote operation with positional arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    pub name: String,
    pub args: Vec<serde_json::Value>,
}

/// A named read-only query.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryRequest {
    pub name: String,
    pub args: QueryArgs,
}

/// Errors surfaced by chain collaborators.
#[derive(Debug, Error)]
pub enum ChainError {
    /// Transport-level failure talking to the node.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// Request timed out inside the collaborator.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// Wallet or key store failure.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// The node rejected the request.
    #[error("Remote error: {0}")]
    Remote(String),

    /// Response could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Collaborator not reachable or not configured.
    #[error("Blockchain not available: {0}")]
    NotAvailable(String),
}

/// Result type for chain operations.
pub type ChainResult<T> = Result<T, ChainError>;
