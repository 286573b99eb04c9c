use billing_mock::application::assertion::AssertionBuilder;
use billing_mock::application::coordinator::RedirectCoordinator;
use billing_mock::config::GatewayConfig;
use billing_mock::domain::ports::{AssertionSignerBox, CheckoutLedgerBox};
use billing_mock::infrastructure::in_memory::PositionalLedger;
use billing_mock::infrastructure::jwt::Hs256Signer;
use billing_mock::interfaces::http::{AppState, router};
use clap::Parser;
use miette::{IntoDiagnostic, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<()> {
    let config = GatewayConfig::parse();

    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Signing must be available before anything is served
    config.validate().into_diagnostic()?;
    let signer: AssertionSignerBox =
        Box::new(Hs256Signer::new(&config.jwt_secret).into_diagnostic()?);
    let ledger: CheckoutLedgerBox = Box::new(PositionalLedger::new());

    let coordinator = RedirectCoordinator::new(
        ledger,
        AssertionBuilder::new(signer, config.assertion_options()),
        config.confirmation_url(),
    )
    .with_fallback_url(config.fallback_url.clone());

    let app = router(AppState::new(coordinator, config.gateway_count));

    let listener = tokio::net::TcpListener::bind(config.bind_address())
        .await
        .into_diagnostic()?;
    info!(
        addr = %config.bind_address(),
        confirmation_url = %config.confirmation_url(),
        "Billing server mock listening"
    );

    axum::serve(listener, app).await.into_diagnostic()?;

    Ok(())
}
