//! CareerHub navigation demo
//!
//! Loads configuration, wires the shared session store and drives the header
//! state machine through a scripted visit, logging every view and effect.

use careerhub::nav::*;
use careerhub::store::{self, RedisConnector};
use careerhub::Config;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_default();
    careerhub::logging::init(&config.logging);

    tracing::info!("CareerHub navigation shell v{}", env!("CARGO_PKG_VERSION"));

    let store = store::init_shared(config.store.clone(), Arc::new(RedisConnector))?;
    tracing::info!(url = %store.config().redacted_url(), "Session store configured");

    // The header keeps working whether or not the store is reachable
    demo_store(store).await;

    let catalog = Rc::new(config.navigation.catalog()?);
    demo_visit(catalog, config.navigation.breakpoint_px)?;

    tracing::info!("Demo complete");
    Ok(())
}

async fn demo_store(store: &store::StoreConnection) {
    match store.ping().await {
        Ok(()) => {
            let visits = store.incr("demo:visits", 1).await;
            let cached = store
                .set("demo:last-route", "/", Some(Duration::from_secs(60)))
                .await;
            tracing::info!(?visits, ?cached, "Session store reachable");
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                state = ?store.state().await,
                "Session store unavailable, continuing without it"
            );
        }
    }
}

fn demo_visit(catalog: Rc<LinkCatalog>, breakpoint_px: u32) -> anyhow::Result<()> {
    let mut header = NavigationMachine::mount(catalog, "/companies", NavEnvironment::default())
        .with_breakpoint(breakpoint_px);

    let plans = header
        .catalog()
        .get("Plans")
        .cloned()
        .unwrap_or_else(|| LinkEntry::anchor("Plans", "pricing"));

    let script = vec![
        NavEvent::ViewportResized { width: 390 },
        NavEvent::SessionChanged(SessionStatus::Loading),
        NavEvent::SessionChanged(SessionStatus::Unauthenticated),
        NavEvent::ToggleMenu,
        NavEvent::ActivateLink(plans),
        NavEvent::RouteChanged("/".to_string()),
        NavEvent::ToggleMenu,
        NavEvent::ActivateCta(compose(SessionStatus::Unauthenticated)[2]),
        NavEvent::RouteChanged("/signup".to_string()),
        NavEvent::SessionChanged(SessionStatus::Authenticated),
        NavEvent::ViewportResized { width: 1280 },
    ];

    for event in script {
        tracing::info!(?event, "Dispatch");
        for effect in header.dispatch(event) {
            tracing::info!(effect = %serde_json::to_string(&effect)?, "Effect");
        }
    }

    tracing::info!(view = %serde_json::to_string_pretty(&header.view())?, "Final header");
    Ok(())
}
