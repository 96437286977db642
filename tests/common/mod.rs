//! Call-recording mock collaborators shared by the integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chain_session::blockchain::{
    Account, AccountId, ChainError, ChainResult, ClientFactory, EndpointConfig, KeyStore,
    KeyStoreId, KeyStoreInteractor, LoginRequest, NodeClient, Operation, QueryRequest,
    RegistrationStrategy, Session, WalletProvider,
};
use chain_session::{QueryResult, SessionConfig, SessionManager};
use serde::Deserialize;
use serde_json::{json, Value};

type Responder = Box<dyn Fn(&QueryRequest) -> ChainResult<Value> + Send + Sync>;

/// Shared recorder behind every mock; one per test.
pub struct MockChain {
    pub accounts: Mutex<Vec<Account>>,
    pub create_client_calls: AtomicUsize,
    pub get_accounts_calls: AtomicUsize,
    pub logins: Mutex<Vec<LoginRequest>>,
    pub registrations: Mutex<Vec<(RegistrationStrategy, Operation)>>,
    pub queries: Mutex<Vec<QueryRequest>>,
    pub fail_client: AtomicBool,
    pub fail_accounts: AtomicBool,
    pub fail_login: AtomicBool,
    pub fail_register: AtomicBool,
    delays: Mutex<VecDeque<Duration>>,
    responder: Mutex<Responder>,
}

impl MockChain {
    pub fn new(accounts: Vec<Account>) -> Arc<Self> {
        Arc::new(Self {
            accounts: Mutex::new(accounts),
            create_client_calls: AtomicUsize::new(0),
            get_accounts_calls: AtomicUsize::new(0),
            logins: Mutex::new(Vec::new()),
            registrations: Mutex::new(Vec::new()),
            queries: Mutex::new(Vec::new()),
            fail_client: AtomicBool::new(false),
            fail_accounts: AtomicBool::new(false),
            fail_login: AtomicBool::new(false),
            fail_register: AtomicBool::new(false),
            delays: Mutex::new(VecDeque::new()),
            responder: Mutex::new(Box::new(tasks_for_user) as Responder),
        })
    }

    pub fn set_responder<F>(&self, f: F)
    where
        F: Fn(&QueryRequest) -> ChainResult<Value> + Send + Sync + 'static,
    {
        *self.responder.lock().unwrap() = Box::new(f);
    }

    /// Delay applied to the next query calls, in order.
    pub fn push_delay(&self, delay: Duration) {
        self.delays.lock().unwrap().push_back(delay);
    }

    pub fn query_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    pub fn login_count(&self) -> usize {
        self.logins.lock().unwrap().len()
    }

    pub fn registration_count(&self) -> usize {
        self.registrations.lock().unwrap().len()
    }
}

pub fn account(byte: u8) -> Account {
    Account {
        id: AccountId(vec![byte; 32]),
    }
}

pub struct MockFactory(pub Arc<MockChain>);

#[async_trait]
impl ClientFactory for MockFactory {
    async fn create_client(&self, _endpoint: &EndpointConfig) -> ChainResult<Arc<dyn NodeClient>> {
        self.0.create_client_calls.fetch_add(1, Ordering::SeqCst);
        if self.0.fail_client.load(Ordering::SeqCst) {
            return Err(ChainError::NotAvailable("node unreachable".into()));
        }
        Ok(Arc::new(MockClient(self.0.clone())))
    }
}

pub struct MockClient(Arc<MockChain>);

#[async_trait]
impl NodeClient for MockClient {
    fn interactor(&self, _key_store: Arc<dyn KeyStore>) -> Arc<dyn KeyStoreInteractor> {
        Arc::new(MockInteractor(self.0.clone()))
    }

    async fn register_account(
        &self,
        key_store: Arc<dyn KeyStore>,
        strategy: RegistrationStrategy,
        init: Operation,
    ) -> ChainResult<Arc<dyn Session>> {
        self.0.registrations.lock().unwrap().push((strategy, init));
        if self.0.fail_register.load(Ordering::SeqCst) {
            return Err(ChainError::Remote("registration rejected".into()));
        }
        Ok(Arc::new(MockSession {
            account_id: AccountId(key_store.id().0),
            chain: self.0.clone(),
        }))
    }
}

pub struct MockInteractor(Arc<MockChain>);

#[async_trait]
impl KeyStoreInteractor for MockInteractor {
    async fn get_accounts(&self) -> ChainResult<Vec<Account>> {
        self.0.get_accounts_calls.fetch_add(1, Ordering::SeqCst);
        if self.0.fail_accounts.load(Ordering::SeqCst) {
            return Err(ChainError::Rpc("account lookup failed".into()));
        }
        Ok(self.0.accounts.lock().unwrap().clone())
    }

    async fn login(&self, request: LoginRequest) -> ChainResult<Arc<dyn Session>> {
        let account_id = request.account_id.clone();
        self.0.logins.lock().unwrap().push(request);
        if self.0.fail_login.load(Ordering::SeqCst) {
            return Err(ChainError::Remote("login rejected".into()));
        }
        Ok(Arc::new(MockSession {
            account_id,
            chain: self.0.clone(),
        }))
    }
}

pub struct MockSession {
    account_id: AccountId,
    chain: Arc<MockChain>,
}

#[async_trait]
impl Session for MockSession {
    fn account_id(&self) -> &AccountId {
        &self.account_id
    }

    async fn query(&self, request: &QueryRequest) -> ChainResult<Value> {
        self.chain.queries.lock().unwrap().push(request.clone());
        let delay = self.chain.delays.lock().unwrap().pop_front();
        let response = (self.chain.responder.lock().unwrap())(request);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        response
    }
}

pub struct MockWallet {
    pub id: KeyStoreId,
    /// Key store derivation fails, as with a locked or rejecting wallet.
    pub fail: bool,
}

#[async_trait]
impl WalletProvider for MockWallet {
    async fn key_store(&self) -> ChainResult<Arc<dyn KeyStore>> {
        if self.fail {
            return Err(ChainError::Wallet("user rejected the request".into()));
        }
        Ok(Arc::new(MockKeyStore(self.id.clone())))
    }
}

pub struct MockKeyStore(KeyStoreId);

#[async_trait]
impl KeyStore for MockKeyStore {
    fn id(&self) -> KeyStoreId {
        self.0.clone()
    }

    async fn sign_message(&self, message: &[u8]) -> ChainResult<Vec<u8>> {
        Ok(message.to_vec())
    }
}

pub fn wallet_id() -> KeyStoreId {
    KeyStoreId(vec![0xab; 20])
}

/// Manager wired to `chain`, with a wallet unless `with_wallet` is false.
pub fn manager(chain: &Arc<MockChain>, with_wallet: bool) -> SessionManager {
    let wallet: Option<Arc<dyn WalletProvider>> = if with_wallet {
        Some(Arc::new(MockWallet {
            id: wallet_id(),
            fail: false,
        }))
    } else {
        None
    };
    SessionManager::new(
        SessionConfig::default(),
        Arc::new(MockFactory(chain.clone())),
        wallet,
    )
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TaskUser {
    pub account: u64,
    pub id: Vec<u8>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Task {
    pub title: String,
    pub description: String,
    pub duedate: String,
    pub id: Vec<u8>,
    pub iscomplete: u8,
    pub timestamp: u64,
    pub user: TaskUser,
}

/// Default responder: one task titled after the `user` argument.
pub fn tasks_for_user(request: &QueryRequest) -> ChainResult<Value> {
    let user = request.args.get("user").cloned().unwrap_or(Value::Null);
    Ok(json!([{
        "title": format!("task for {}", user),
        "description": "",
        "duedate": "2026-10-14",
        "id": [1, 2, 3],
        "iscomplete": 0,
        "timestamp": 1_760_000_000u64,
        "user": { "account": 1, "id": [9], "name": "RandomUser_1" }
    }]))
}

pub fn first_title(tasks: &Option<Vec<Task>>) -> Option<String> {
    tasks.as_ref().and_then(|t| t.first()).map(|t| t.title.clone())
}

/// Wait for the next applied result, failing the test after two seconds.
pub async fn next_result<T: Clone>(result: &mut QueryResult<T>) -> Option<T> {
    tokio::time::timeout(Duration::from_secs(2), result.changed())
        .await
        .expect("timed out waiting for query result");
    result.get()
}

/// Give spawned watcher and execution tasks time to run.
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(100)).await;
}
