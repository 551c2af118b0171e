//! Bookshelf application library
//!
//! Wires the catalog module into the module kernel and runs the HTTP server.

use std::future::Future;

use anyhow::Context;
use bookshelf_kernel::{settings::Settings, InitCtx, ModuleRegistry};

pub mod modules;

pub use modules::catalog;

/// Build a registry holding every application module
pub fn build_registry(settings: &Settings) -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, settings);
    registry
}

/// Run the service until Ctrl-C
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    run_until(settings, bookshelf_http::shutdown_signal()).await
}

/// Run the service: init and start modules, serve until `shutdown` resolves, stop modules
pub async fn run_until<F>(settings: Settings, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let registry = build_registry(&settings);
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
        .context("module start failed")?;

    let served = bookshelf_http::start_server(&registry, &settings, shutdown).await;

    registry
        .stop_modules()
        .await
        .context("module shutdown failed")?;

    served
}
