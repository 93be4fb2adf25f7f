use auth_core::config::TokenSettings;
use auth_core::models::TokenResponse;
use auth_core::tokens::{AuthenticationContext, Principal, TokenEnhancer, TokenFactory, TokenPair};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "usage: token-issuer <username> [authority ...]";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so stdout carries only the JSON response
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth_core=info,token_issuer=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut args = std::env::args().skip(1);
    let Some(username) = args.next() else {
        error!("{}", USAGE);
        return Err(USAGE.into());
    };
    let authorities: Vec<String> = args.collect();

    let settings = TokenSettings::from_env().map_err(|e| {
        error!("Failed to load token settings: {}", e);
        e
    })?;

    info!(
        issuer = %settings.issuer(),
        access_secs = settings.access_token_lifetime().as_secs(),
        refresh_secs = settings.refresh_token_lifetime().as_secs(),
        "Token settings loaded"
    );

    let factory = TokenFactory::new(settings);
    let enhancer = TokenEnhancer::new(&factory);
    let principal = Principal::new(username, authorities);

    let pair = factory.issue_token_pair(&principal).map_err(|e| {
        error!("Failed to issue tokens: {}", e);
        e
    })?;

    let access = enhancer
        .enhance(&pair.access, &AuthenticationContext::from(&principal))
        .map_err(|e| {
            error!("Failed to enhance access token: {}", e);
            e
        })?;

    let response = TokenResponse::from(&TokenPair {
        access,
        refresh: pair.refresh,
    });

    info!(expires_in = response.expires_in, "Token pair issued");
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
