//! Blockchain collaborator boundary.
//!
//! # Data Flow
//! ```text
//! WalletProvider (browser or local wallet)
//!     → KeyStore (identity + signing handle)
//! ClientFactory
//!     → NodeClient (bound to node pool + blockchain iid)
//!     → KeyStoreInteractor (accounts, login) / register_account
//!     → Session (authenticated query capability)
//! ```
//!
//! # Constraints
//! - Signing, transport and wire encoding belong to implementors
//! - Private keys are never logged
//! - No timeouts are layered on top of what implementors provide

pub mod client;
pub mod types;
pub mod wallet;

pub use client::{ClientFactory, KeyStoreInteractor, NodeClient, Session};
pub use types::{
    Account, AccountId, AuthDescriptorRegistration, ChainError, ChainResult, EndpointConfig,
    KeyStoreId, LoginConfig, LoginRequest, LoginRule, Operation, QueryRequest,
    RegistrationStrategy,
};
pub use wallet::{EvmKeyStore, KeyStore, LocalWallet, WalletProvider};
