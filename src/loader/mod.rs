pub mod cleaner;
pub mod error;
#[allow(clippy::module_inception)]
pub mod loader;
