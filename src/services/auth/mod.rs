pub mod access_jwt;
pub mod factory;

pub use access_jwt::{Identity, TokenError, TokenVerifier, VerifierOptions};
pub use factory::build_token_verifier;
