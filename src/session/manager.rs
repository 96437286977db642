//! Session lifecycle: wallet discovery, account lookup, login or registration.
//!
//! # Responsibilities
//! - Hold the single process-wide optional session
//! - Run initialization as one all-or-nothing attempt
//! - Publish the session to consumers through `SessionContext`

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use rand::Rng;
use thiserror::Error;
use tokio::sync::watch;

use crate::blockchain::client::{ClientFactory, Session};
use crate::blockchain::types::{
    AuthDescriptorRegistration, ChainError, ChainResult, LoginRequest, Operation,
    RegistrationStrategy,
};
use crate::blockchain::wallet::WalletProvider;
use crate::config::{RegistrationSettings, SessionConfig};
use crate::observability::metrics;
use crate::session::context::SessionContext;
use crate::session::state::{ActiveSession, InitPath, SessionId};

/// Errors from session initialization.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No wallet provider is present in the host environment.
    #[error("Wallet provider is not installed")]
    WalletNotInstalled,

    /// A collaborator call failed; no session was stored.
    #[error(transparent)]
    Chain(#[from] ChainError),
}

/// Owner of the process-wide session slot.
pub struct SessionManager {
    inner: Arc<SessionInner>,
}

pub(crate) struct SessionInner {
    config: SessionConfig,
    client_factory: Arc<dyn ClientFactory>,
    wallet: Option<Arc<dyn WalletProvider>>,
    slot: watch::Sender<Option<ActiveSession>>,
    last_id: AtomicU64,
}

impl SessionManager {
    /// Create a manager with no session.
    ///
    /// `wallet` is `None` when the host has no wallet provider installed.
    pub fn new(
        config: SessionConfig,
        client_factory: Arc<dyn ClientFactory>,
        wallet: Option<Arc<dyn WalletProvider>>,
    ) -> Self {
        let (slot, _) = watch::channel(None);
        Self {
            inner: Arc::new(SessionInner {
                config,
                client_factory,
                wallet,
                slot,
                last_id: AtomicU64::new(0),
            }),
        }
    }

    /// Typed handle for consumers of the session.
    pub fn context(&self) -> SessionContext {
        SessionContext::new(self.inner.clone())
    }

    pub fn session(&self) -> Option<ActiveSession> {
        self.inner.current()
    }

    pub async fn init_session(&self) -> Result<InitPath, SessionError> {
        self.inner.init_session().await
    }
}

impl SessionInner {
    pub(crate) fn current(&self) -> Option<ActiveSession> {
        self.slot.borrow().clone()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<Option<ActiveSession>> {
        self.slot.subscribe()
    }

    pub(crate) async fn init_session(&self) -> Result<InitPath, SessionError> {
        tracing::info!("Connecting wallet and initializing session");

        let Some(wallet) = self.wallet.as_ref() else {
            tracing::error!("Wallet provider is not installed");
            metrics::record_session_init("wallet_missing");
            return Err(SessionError::WalletNotInstalled);
        };

        match self.authenticate(&**wallet).await {
            Ok((path, session)) => {
                let active = self.publish(session);
                tracing::info!(
                    session_id = %active.id(),
                    account_id = %active.account_id(),
                    path = path.as_str(),
                    "Session initialized"
                );
                metrics::record_session_init(path.as_str());
                Ok(path)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Session initialization failed");
                metrics::record_session_init("failed");
                Err(e.into())
            }
        }
    }

    async fn authenticate(
        &self,
        wallet: &dyn WalletProvider,
    ) -> ChainResult<(InitPath, Arc<dyn Session>)> {
        let endpoint = self.config.node.endpoint();
        let client = self.client_factory.create_client(&endpoint).await?;
        tracing::debug!(
            nodes = endpoint.node_url_pool.len(),
            blockchain_iid = endpoint.blockchain_iid,
            "Node client created"
        );

        let key_store = wallet.key_store().await?;
        let interactor = client.interactor(key_store.clone());
        let accounts = interactor.get_accounts().await?;
        let login_config = self.config.login.login_config();

        if let Some(account) = accounts.first() {
            if accounts.len() > 1 {
                tracing::debug!(
                    accounts = accounts.len(),
                    account_id = %account.id,
                    "Multiple accounts found, using the first"
                );
            }
            let session = interactor
                .login(LoginRequest {
                    account_id: account.id.clone(),
                    config: login_config,
                })
                .await?;
            return Ok((InitPath::Login, session));
        }

        let registration = &self.config.registration;
        let descriptor =
            AuthDescriptorRegistration::single_sig(registration.auth_flags.clone(), key_store.id());
        let display_name = generate_display_name(registration);
        tracing::info!(
            key_store = %key_store.id(),
            display_name = %display_name,
            "No account found, registering"
        );

        let init = Operation {
            name: registration.operation.clone(),
            args: vec![serde_json::Value::String(display_name)],
        };
        let session = client
            .register_account(
                key_store,
                RegistrationStrategy::open(descriptor, login_config),
                init,
            )
            .await?;
        Ok((InitPath::Registration, session))
    }

    /// Store `session` under a fresh id, replacing any previous one.
    fn publish(&self, session: Arc<dyn Session>) -> ActiveSession {
        let id = SessionId(self.last_id.fetch_add(1, Ordering::SeqCst) + 1);
        let active = ActiveSession::new(id, session);
        self.slot.send_replace(Some(active.clone()));
        active
    }
}

/// Default display name for a freshly registered user.
fn generate_display_name(settings: &RegistrationSettings) -> String {
    let suffix = rand::thread_rng().gen_range(0..settings.name_range.max(1));
    format!("{}{}", settings.name_prefix, suffix)
}
