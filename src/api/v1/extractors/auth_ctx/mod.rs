/*!
 * Authentication context extractor
 *
 * Responsibility:
 * - Give handlers the context (AuthCtx) of an authenticated request
 * - axum-specific code stays in core; the type lives in types
 *
 * Public API:
 * - AuthCtx
 * - CurrentUser
 */

mod core;
mod types;

pub use core::CurrentUser;
pub use types::AuthCtx;
