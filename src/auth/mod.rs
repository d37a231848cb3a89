//! Authentication and request signing for the Billpay API.
//!
//! Two independent pieces live here:
//!
//! 1. **Token acquisition** - [`TokenProvider`] exchanges the client id and
//!    secret for a bearer token using the OAuth2 `client_credentials` grant.
//! 2. **Signing** - [`Signer`] produces the RSA-PSS `Signature` header that
//!    order creation requires.
//!
//! Both are built once per [`BillpayClient`](crate::BillpayClient) from its
//! [`Credentials`] and reused for every call.
//!
//! ```no_run
//! use billpay_rs::Credentials;
//!
//! # fn example() -> billpay_rs::Result<()> {
//! let pem = std::fs::read_to_string("private_key.pem").unwrap();
//! let credentials = Credentials::new("client-id", "client-secret")?
//!     .with_private_key(pem);
//! # Ok(())
//! # }
//! ```

mod credentials;
mod signer;
mod token;

pub use credentials::Credentials;
pub use signer::{pss_salt_len, Signer, SHA256_LEN};
pub use token::{AccessToken, TokenProvider};
