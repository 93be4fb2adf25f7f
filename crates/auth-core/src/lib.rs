//! Signed-token issuance and pluggable validation.
//!
//! This library mints HMAC-SHA-512 signed access and refresh tokens for an
//! authenticated principal, enriches them with contextual claims, and
//! dispatches field-level validity checks to named validators.
//!
//! # Modules
//!
//! - `config` - Token settings (issuer, signing secret, lifetimes)
//! - `crypto` - JWT signing and verification
//! - `errors` - Error types
//! - `models` - Response bodies
//! - `observability` - Metrics and log correlation helpers
//! - `tokens` - Principal, claims, factory and enhancer
//! - `validation` - Validator registry and constraints

pub mod config;
pub mod crypto;
pub mod errors;
pub mod models;
pub mod observability;
pub mod tokens;
pub mod validation;
