//! Application descriptor model.
//!
//! Authors declare an [`ApplicationInfo`] per application, with every field
//! optional. [`ApplicationDescriptor::new`] resolves unset fields to defaults
//! and computes the derived version string, window title and menu path. The
//! `render` module holds the fixed-layout text and markup views used by the
//! listing binaries.

pub mod model;
pub mod render;

pub use model::{
    ApplicationDescriptor, ApplicationInfo, Developer, Document, MENU_ROOT, Version,
};
