//! Bookshelf application library
//!
//! Wires the books module into the kernel registry and runs the HTTP server.

pub mod modules;

use anyhow::Context;
use bookshelf_kernel::{settings::Settings, InitCtx, ModuleRegistry};

pub use modules::*;

/// Registry with every application module registered
pub fn registry() -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry);
    registry
}

/// Initialize and start all modules, serve HTTP until shutdown, then stop modules.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    tracing::info!(
        env = ?settings.environment,
        address = %settings.server.bind_address(),
        "bookshelf bootstrap starting"
    );

    let registry = registry();
    let ctx = InitCtx {
        settings: &settings,
    };

    registry
        .init_modules(&ctx)
        .await
        .context("module initialization failed")?;
    registry
        .start_modules(&ctx)
        .await
        .context("module start-up failed")?;

    let served = bookshelf_http::start_server(&registry, &settings).await;

    registry
        .stop_modules()
        .await
        .context("module shutdown failed")?;

    served
}
