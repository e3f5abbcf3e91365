//! Vesta marketplace - scripted storefront session
//!
//! Walks one buyer and one administrator through the in-memory
//! marketplace and logs every step.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin vesta-demo
//!
//! VESTA_LATENCY_MS=300 VESTA_LOG_FORMAT=json cargo run --bin vesta-demo
//! ```
//!
//! # Environment Variables
//!
//! * `VESTA_LOG_LEVEL` - Log level or filter directive (default: info)
//! * `VESTA_LOG_FORMAT` - `fmt` or `json` (default: fmt)
//! * `VESTA_LATENCY_MS` - Simulated backend latency (default: 0)
//! * `VESTA_TIMEZONE` - Marketplace timezone (default: Europe/Madrid)

use anyhow::Context;
use chrono::{Datelike, Utc};
use tracing::{info, warn};

use core_kernel::{InsuranceId, UserId};
use domain_cart::PaymentDetails;
use domain_catalog::{CatalogFilter, CategorySelector};
use domain_policy::{StatusFilter, CANCEL_CONFIRMATION};
use domain_user::{DirectoryQuery, RoleFilter, DELETE_CONFIRMATION, DEMO_EMAIL, DEMO_PASSWORD};
use interface_app::consent::{CookieConsent, STORAGE_KEY};
use interface_app::marketplace::fallback_view;
use interface_app::{telemetry, AppConfig, Marketplace, Session, View};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("loading VESTA_* configuration")?;
    telemetry::init(&config)?;

    info!(timezone = %config.timezone.0.name(), latency_ms = config.latency_ms, "Starting Vesta demo session");

    let market = Marketplace::in_memory(&config);
    for health in market.health().await {
        info!(adapter = %health.adapter_id, message = ?health.message, "Adapter ready");
    }

    let mut consent = CookieConsent::load(None);
    if consent.shows_banner() {
        consent.reject_all(Utc::now());
        info!(key = STORAGE_KEY, stored = ?consent.to_json()?, "Cookie banner answered");
    }

    let mut session = Session::default();
    browse(&market).await?;

    // Guarded view while anonymous
    let landed = session.navigate(View::Dashboard);
    info!(?landed, "Opened dashboard without a session");

    market
        .sign_in(&mut session, DEMO_EMAIL, DEMO_PASSWORD)
        .await
        .context("demo sign-in")?;

    market.add_to_cart(&mut session, &InsuranceId::new("ins-001"), 1, Some(7)).await?;
    market.add_to_cart(&mut session, &InsuranceId::new("ins-006"), 2, None).await?;
    let summary = session.cart().summary();
    info!(
        items = session.cart().item_count(),
        subtotal = %summary.subtotal.round_to_currency(),
        tax = %summary.tax.round_to_currency(),
        total = %summary.total.round_to_currency(),
        "Cart ready"
    );

    let expiry = format!("12/{:02}", (market.today().year() + 2) % 100);
    let bad_card = PaymentDetails::new("4111", "", "13/20", "1");
    if let Err(e) = market.checkout(&mut session, &bad_card).await {
        warn!(problems = ?e.messages(), "Payment rejected");
    }

    let card = PaymentDetails::new("4111 1111 1111 1111", "Usuario Demo", &expiry, "123");
    let receipt = market.checkout(&mut session, &card).await?;
    for policy in &receipt.policies {
        info!(number = policy.policy_number(), ends = %policy.end_date(), price = %policy.price(), "Policy issued");
    }

    let overview = market.dashboard(&session, StatusFilter::Active).await?;
    info!(
        all = overview.counts.all,
        active = overview.counts.active,
        inactive = overview.counts.inactive,
        "Dashboard loaded"
    );

    if let Some(first) = overview.policies.first() {
        let declined = market.cancel_policy(&session, first.id(), Some("cancelar")).await?;
        info!(message = ?declined.message(), "First cancellation attempt");
        let confirmed = market
            .cancel_policy(&session, first.id(), Some(CANCEL_CONFIRMATION))
            .await?;
        info!(message = ?confirmed.message(), "Second cancellation attempt");

        let document = market.download_policy(&session, first.id()).await?;
        info!(file = %document.file_name, bytes = document.content.len(), "Certificate rendered");
    }

    if let Err(e) = market.directory(&session, &DirectoryQuery::default()).await {
        warn!(error = %e, redirect = ?fallback_view(&e), "Admin panel refused");
    }
    session.sign_out();

    market
        .sign_in(&mut session, "admin@vesta.com", "admin123")
        .await
        .context("admin sign-in")?;
    info!(view = ?session.navigate(View::Admin), "Administrator signed in");

    let page = market
        .directory(&session, &DirectoryQuery::new("", RoleFilter::All))
        .await?;
    info!(
        total = page.stats.total,
        administrators = page.stats.administrators,
        confirmed = page.stats.confirmed_emails,
        "Directory loaded"
    );

    for (id, confirmation) in [
        ("user-001", DELETE_CONFIRMATION),
        ("user-002", DELETE_CONFIRMATION),
        ("user-004", DELETE_CONFIRMATION),
    ] {
        let outcome = market
            .delete_user(&session, &UserId::new(id), Some(confirmation))
            .await?;
        info!(user_id = id, message = %outcome.message(), "Deletion requested");
    }

    for event in market.take_policy_events().await? {
        info!(event = event.event_type(), policy_id = %event.policy_id(), "Policy event");
    }

    info!("Demo session complete");
    Ok(())
}

async fn browse(market: &Marketplace) -> anyhow::Result<()> {
    let pills = market.category_choices().await?;
    info!(categories = ?pills.iter().map(ToString::to_string).collect::<Vec<_>>(), "Storefront categories");

    let filter = CatalogFilter::new("seguro", CategorySelector::category("Viaje"));
    for product in market.browse(&filter).await? {
        info!(id = %product.id, name = %product.name, price = %product.base_price, "Matching product");
    }

    let quote = market.quote(&InsuranceId::new("ins-001"), 7).await?;
    info!(duration = %quote.describe_duration(), total = %quote.total.round_to_currency(), "Quoted");
    Ok(())
}
