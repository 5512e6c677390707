mod auth_ctx;
mod json_body;

pub use auth_ctx::{AuthCtx, CurrentUser};
pub use json_body::JsonBody;
