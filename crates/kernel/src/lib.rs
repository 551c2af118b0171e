//! Module kernel for bookshelf: the `Module` trait, its lifecycle registry,
//! and layered application settings.

pub mod module;
pub mod registry;
pub mod settings;

pub use module::{InitCtx, Module};
pub use registry::ModuleRegistry;
