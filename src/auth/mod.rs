//! Credential and token lifecycle
//!
//! Leaf-first: [`credentials`] reads the client-credentials file,
//! [`issuer`] performs the OAuth exchange, [`token_store`] persists the
//! result and [`manager`] ties them together behind a single
//! "get a usable token" operation.

pub mod clock;
pub mod credentials;
pub mod issuer;
pub mod manager;
pub mod models;
pub mod token_store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use credentials::CredentialStore;
pub use issuer::{HttpTokenIssuer, TokenIssuer};
pub use manager::TokenManager;
pub use models::{AuthState, Credentials, IssuedToken, TokenRecord};
pub use token_store::TokenStore;
