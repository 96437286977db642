//! Wallet provider and key store capabilities.
//!
//! `LocalWallet` is an in-process EVM wallet for hosts without a browser
//! wallet. Its private key is never logged or serialized.

use std::sync::Arc;

use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::Signer;
use async_trait::async_trait;

use crate::blockchain::types::{ChainError, ChainResult, KeyStoreId};

/// Source of a signing key store, typically a user's wallet.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    async fn key_store(&self) -> ChainResult<Arc<dyn KeyStore>>;
}

/// Signing capability derived from a wallet.
#[async_trait]
pub trait KeyStore: Send + Sync {
    fn id(&self) -> KeyStoreId;

    async fn sign_message(&self, message: &[u8]) -> ChainResult<Vec<u8>>;
}

/// Wallet backed by a locally held EVM private key.
#[derive(Debug, Clone)]
pub struct LocalWallet {
    signer: PrivateKeySigner,
}

impl LocalWallet {
    /// Create a wallet from a hex-encoded private key (with or without 0x prefix).
    pub fn from_private_key(private_key_hex: &str) -> ChainResult<Self> {
        let key_hex = private_key_hex.strip_prefix("0x").unwrap_or(private_key_hex);

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| ChainError::Wallet(format!("Invalid private key format: {}", e)))?;

        tracing::info!(address = %signer.address(), "Local wallet initialized");

        Ok(Self { signer })
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }
}

#[async_trait]
impl WalletProvider for LocalWallet {
    async fn key_store(&self) -> ChainResult<Arc<dyn KeyStore>> {
        Ok(Arc::new(EvmKeyStore {
            signer: self.signer.clone(),
        }))
    }
}

/// Key store whose identity is an EVM address.
#[derive(Debug, Clone)]
pub struct EvmKeyStore {
    signer: PrivateKeySigner,
}

impl EvmKeyStore {
    pub fn address(&self) -> Address {
        self.signer.address()
    }
}

#[async_trait]
impl KeyStore for EvmKeyStore {
    fn id(&self) -> KeyStoreId {
        KeyStoreId(self.signer.address().to_vec())
    }

    /// EIP-191 personal-message signature, 65 bytes (r, s, v).
    async fn sign_message(&self, message: &[u8]) -> ChainResult<Vec<u8>> {
        let signature = self
            .signer
            .sign_message(message)
            .await
            .map_err(|e| ChainError::Wallet(format!("Message signing failed: {}", e)))?;
        Ok(signature.as_bytes().to_vec())
    }
}
