pub mod books;
pub mod catalog;

use std::sync::Arc;

use portfolio_kernel::{settings::Settings, ModuleRegistry};

use crate::layout::Shell;

/// Register every site section with the registry, sharing one page shell
pub fn register_all(registry: &mut ModuleRegistry, settings: &Settings) -> anyhow::Result<()> {
    let shell = Arc::new(Shell::from_settings(&settings.site));

    registry.register(catalog::create_module(settings, shell.clone()))?;
    registry.register(books::create_module(settings, shell))?;

    Ok(())
}
