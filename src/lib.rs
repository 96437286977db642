//! Wallet-backed session management and reactive chain queries.
//!
//! A [`SessionManager`] authenticates through a [`WalletProvider`] and a
//! node [`ClientFactory`], logging in to an existing account or registering
//! a new one. [`Query`] keeps a named read-only query in sync with the
//! session and its arguments.

pub mod blockchain;
pub mod config;
pub mod observability;
pub mod query;
pub mod session;

pub use blockchain::{ClientFactory, KeyStore, KeyStoreInteractor, NodeClient, Session, WalletProvider};
pub use config::SessionConfig;
pub use query::{Query, QueryArgs, QueryResult};
pub use session::{ActiveSession, InitPath, SessionContext, SessionError, SessionManager};
