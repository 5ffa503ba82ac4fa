//! EIP-1193 wallet providers for sigpad.
//!
//! A browser wallet extension exposes `request({ method, params })`. This crate
//! models that interface as the [`WalletProvider`] trait and ships two
//! providers:
//!
//! - [`HttpWalletProvider`] speaks JSON-RPC 2.0 over HTTP to a wallet that
//!   exposes an RPC endpoint (Frame, a local signer, a test harness).
//! - [`InMemoryWallet`] answers the same calls from local keys, for demos and
//!   tests.
//!
//! [`ExtensionSigner`] adapts any provider to the
//! [`MessageSigner`](sigpad_eth::MessageSigner) capability: request accounts,
//! then `personal_sign` with the first one.

pub mod error;
pub mod extension;
pub mod http;
pub mod memory;
pub mod provider;

pub use error::{codes, WalletError};
pub use extension::ExtensionSigner;
pub use http::HttpWalletProvider;
pub use memory::InMemoryWallet;
pub use provider::WalletProvider;
