use jsonwebtoken::{Algorithm, DecodingKey, Validation, errors::ErrorKind};
use serde::Deserialize;
use std::{error::Error as StdError, fmt};
use uuid::Uuid;

/// The only signing algorithm access tokens may use.
pub const ACCESS_TOKEN_ALGORITHM: Algorithm = Algorithm::RS256;

// Errors returned by access-token verification.
//
// `Expired` is kept apart from everything else: the client should re-authenticate,
// while the other variants mean the token is malformed or forged.
#[derive(Debug)]
pub enum TokenError {
    Expired,
    Jwt(jsonwebtoken::errors::Error),
    MissingSubject,
    MalformedSubject,
}

impl TokenError {
    pub fn is_expired(&self) -> bool {
        matches!(self, Self::Expired)
    }
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expired => write!(f, "token has expired"),
            Self::Jwt(e) => write!(f, "jwt verification failed: {}", e),
            Self::MissingSubject => write!(f, "missing 'sub' claim"),
            Self::MalformedSubject => write!(f, "invalid 'sub' (expected UUID)"),
        }
    }
}

impl StdError for TokenError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Jwt(e) => Some(e),
            _ => None,
        }
    }
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::ExpiredSignature => Self::Expired,
            _ => Self::Jwt(e),
        }
    }
}

/// Claims read from an access token. Only `sub` matters to this service;
/// `exp` (and `iss`/`aud` when configured) are checked by `Validation`.
#[derive(Debug, Clone, Deserialize)]
struct AccessTokenClaims {
    #[serde(default)]
    sub: Option<String>,
}

/// The verified caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
}

impl Identity {
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }
}

#[derive(Debug, Clone, Default)]
pub struct VerifierOptions {
    pub issuer: Option<String>,
    pub audience: Option<String>,
    pub leeway_seconds: u64,
}

/// RS256 access-token verifier.
///
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenVerifier {
    /// `public_key_pem` must be an RSA public key (SPKI or PKCS#1 PEM).
    pub fn new(
        public_key_pem: &str,
        options: VerifierOptions,
    ) -> Result<Self, jsonwebtoken::errors::Error> {
        let decoding_key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes())?;

        // `Validation::new` pins the accepted algorithm list, so a token whose header
        // names anything else (HS256 signed with the public key, `none`, ...) is rejected.
        let mut validation = Validation::new(ACCESS_TOKEN_ALGORITHM);
        validation.leeway = options.leeway_seconds;
        if let Some(iss) = &options.issuer {
            validation.set_issuer(&[iss]);
        }
        match &options.audience {
            Some(aud) => validation.set_audience(&[aud]),
            None => validation.validate_aud = false,
        }

        Ok(Self {
            decoding_key,
            validation,
        })
    }

    /// Verify the signature and claims, then lift `sub` into an `Identity`.
    pub fn verify(&self, token: &str) -> Result<Identity, TokenError> {
        let data =
            jsonwebtoken::decode::<AccessTokenClaims>(token, &self.decoding_key, &self.validation)?;

        let sub = data
            .claims
            .sub
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(TokenError::MissingSubject)?;

        let user_id = Uuid::parse_str(sub).map_err(|_| TokenError::MalformedSubject)?;

        Ok(Identity::new(user_id))
    }
}
