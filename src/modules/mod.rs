pub mod catalog;

use bookshelf_kernel::{settings::Settings, ModuleRegistry};

/// Register all application modules with the registry
pub fn register_all(registry: &mut ModuleRegistry, settings: &Settings) {
    registry.register(catalog::create_module(&settings.catalog));
}
