//! RBAC Audit - prints the role/permission matrix of every resource kind.
//!
//! Output is JSON: `{ kind: { role: [permission, ...] } }`.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use tracing::info;

use platform_rbac::config::Config;
use platform_rbac::permissions::RoleRegistry;
use platform_rbac::resources::ResourceKind;

fn main() -> Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    // Initialize tracing (stderr, so stdout stays pure JSON)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.clone().into()),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "Auditing role registry");

    let registry = RoleRegistry::standard();
    let matrix: BTreeMap<_, _> = ResourceKind::all()
        .iter()
        .map(|kind| (*kind, registry.matrix(*kind)))
        .collect();

    let rendered =
        serde_json::to_string_pretty(&matrix).context("Failed to serialize permission matrix")?;
    println!("{rendered}");

    info!(kinds = matrix.len(), "Audit complete");
    Ok(())
}
