//! # Auth Test Utilities
//!
//! Shared test utilities for token issuance and validation.
//!
//! This crate provides:
//! - Fixed test values (issuer, secrets, principals, authorities)
//! - Settings and factory fixtures
//! - Test data builders (TestPrincipalBuilder, TestClaimsBuilder)
//! - Custom assertions (TokenAssertions trait)
//! - Validator test doubles (RecordingValidator, StaticValidator, FailingValidator)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use auth_test_utils::*;
//!
//! #[test]
//! fn test_example() {
//!     let factory = test_factory();
//!     let principal = TestPrincipalBuilder::new()
//!         .for_user(TEST_USER_ALICE)
//!         .with_authority(ROLE_USER)
//!         .build();
//!
//!     let token = factory.create_access_token(&principal).unwrap();
//!
//!     token.as_str()
//!         .assert_valid_jwt()
//!         .assert_has_scope(ROLE_USER)
//!         .assert_for_subject(TEST_USER_ALICE);
//! }
//! ```

pub mod assertions;
pub mod fixtures;
pub mod test_ids;
pub mod token_builders;
pub mod validators;

// Re-export commonly used items
pub use assertions::*;
pub use fixtures::*;
pub use test_ids::*;
pub use token_builders::*;
pub use validators::*;
