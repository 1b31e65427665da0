//! # Provider admin TUI
//!
//! Terminal front end for the provider dashboard: a searchable provider
//! table, a six-tab edit form with a payments panel, confirmation prompts
//! and toast notifications. All state transitions live in
//! `provadmin-engine`; this crate routes keys, renders, and runs gateway
//! calls on the Tokio runtime.

mod app;
mod ui;

use std::sync::Arc;

use anyhow::Result;
use provadmin_api::ProviderGateway;

/// Runs the dashboard until the user quits.
///
/// # Errors
///
/// Fails when the terminal cannot be put into (or restored from) raw mode
/// or the alternate screen, or when drawing a frame fails.
pub async fn run(gateway: Arc<dyn ProviderGateway>) -> Result<()> {
    ui::runtime::run_app(gateway).await
}
