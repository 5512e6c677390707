/*
 * Responsibility
 * - Public surface of the middleware layers
 * - auth: the gate in front of profile routes; the rest wrap the whole app
 */
pub mod auth;
pub mod cors;
pub mod http;
pub mod security_headers;
