//! Application discovery.
//!
//! The scanner walks each search-path root, recognizes packages among its
//! immediate subdirectories, finds descriptor modules inside each package and
//! asks the registered loaders to instantiate them. Discovery is best-effort:
//! nothing in this module returns an error for a missing or malformed item.

pub mod loader;
pub mod scanner;

pub use loader::{DescriptorFactory, FactoryRegistry, ManifestLoader, ModuleLoader, ModuleSource};
pub use scanner::{APPLICATION_MODULE_EXTENSION, APPLICATION_MODULE_SUFFIX, Scanner};

use crate::descriptor::ApplicationDescriptor;

/// Unordered, unfiltered collection of every discoverable application.
pub fn discover_applications(scanner: &Scanner) -> Vec<ApplicationDescriptor> {
    scanner.discover()
}
