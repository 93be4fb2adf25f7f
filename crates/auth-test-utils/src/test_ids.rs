//! Fixed test values for deterministic tests
//!
//! Every suite uses the same issuer, secrets and principals so failures are
//! reproducible and token contents are predictable.

// Issuer
pub const TEST_ISSUER: &str = "dch-auth";

// Signing secrets (never use outside tests)
pub const TEST_SIGNING_SECRET: &str = "s3cr3t-32-bytes-min";
pub const OTHER_SIGNING_SECRET: &str = "another-secret-do-not-use-in-production";

// Lifetimes (minutes)
pub const TEST_ACCESS_TOKEN_MINUTES: u64 = 15;
pub const TEST_REFRESH_TOKEN_MINUTES: u64 = 30 * 24 * 60;

// Usernames
pub const TEST_USER_ALICE: &str = "alice";
pub const TEST_USER_BOB: &str = "bob";

// Authorities
pub const ROLE_USER: &str = "ROLE_USER";
pub const ROLE_ADMIN: &str = "ROLE_ADMIN";
pub const ROLE_AUDITOR: &str = "ROLE_AUDITOR";

// Email addresses for uniqueness checks
pub const TEST_EMAIL_TAKEN: &str = "alice@example.com";
pub const TEST_EMAIL_FREE: &str = "bob@example.com";
