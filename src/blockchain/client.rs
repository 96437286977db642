//! Node client capability traits.
//!
//! # Responsibilities
//! - Construct a client bound to a node pool and blockchain instance
//! - Derive key-store interactors bound to that client
//! - Register new accounts and log in existing ones
//! - Run read-only queries on behalf of an authenticated session
//!
//! Transport, serialization and signing all live behind these traits.

use std::sync::Arc;

use async_trait::async_trait;

use crate::blockchain::types::{
    Account, AccountId, ChainResult, EndpointConfig, LoginRequest, Operation, QueryRequest,
    RegistrationStrategy,
};
use crate::blockchain::wallet::KeyStore;

/// Builds node clients from endpoint configuration.
#[async_trait]
pub trait ClientFactory: Send + Sync {
    async fn create_client(&self, endpoint: &EndpointConfig) -> ChainResult<Arc<dyn NodeClient>>;
}

/// A client bound to one blockchain on a node pool.
#[async_trait]
pub trait NodeClient: Send + Sync {
    /// Derive an interactor for `key_store` bound to this client.
    fn interactor(&self, key_store: Arc<dyn KeyStore>) -> Arc<dyn KeyStoreInteractor>;

    /// Register a new account and run `init` as part of the registration.
    async fn register_account(
        &self,
        key_store: Arc<dyn KeyStore>,
        strategy: RegistrationStrategy,
        init: Operation,
    ) -> ChainResult<Arc<dyn Session>>;
}

/// Account discovery and login for a single key store.
#[async_trait]
pub trait KeyStoreInteractor: Send + Sync {
    async fn get_accounts(&self) -> ChainResult<Vec<Account>>;

    async fn login(&self, request: LoginRequest) -> ChainResult<Arc<dyn Session>>;
}

/// Authenticated handle permitting queries on behalf of an account.
#[async_trait]
pub trait Session: Send + Sync {
    fn account_id(&self) -> &AccountId;

    /// Run a named query, returning the already-decoded response value.
    async fn query(&self, request: &QueryRequest) -> ChainResult<serde_json::Value>;
}
