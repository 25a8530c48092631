//! Reserved-path registries backed by the host router.

mod static_path_registry;

pub use static_path_registry::StaticPathRegistry;
