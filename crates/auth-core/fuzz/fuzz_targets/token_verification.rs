#![no_main]

use auth_core::config::TokenSettings;
use auth_core::tokens::TokenFactory;
use common::secret::SecretString;
use libfuzzer_sys::fuzz_target;
use std::sync::OnceLock;
use std::time::Duration;

fn factory() -> &'static TokenFactory {
    static FACTORY: OnceLock<TokenFactory> = OnceLock::new();
    FACTORY.get_or_init(|| {
        let settings = TokenSettings::new(
            "dch-auth",
            SecretString::from("fuzz-signing-secret-0123456789"),
            Duration::from_secs(900),
            Duration::from_secs(86_400),
        )
        .expect("fuzz settings are valid");
        TokenFactory::new(settings)
    })
}

fuzz_target!(|data: &[u8]| {
    // Arbitrary input must be rejected, never panic
    if let Ok(token) = std::str::from_utf8(data) {
        let factory = factory();
        let _ = factory.verify(token);
        let _ = factory.verify_access_token(token);
        let _ = factory.verify_refresh_token(token);
        let _ = common::jwt::extract_alg(token);
    }
});
