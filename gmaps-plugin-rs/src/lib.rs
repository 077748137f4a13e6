// Allow uninlined format args for cleaner anyhow!/bail! macros
#![allow(clippy::uninlined_format_args)]
#![doc = include_str!("../README.md")]

pub mod codegen;
pub mod entry;
pub mod error;
pub mod options;
pub mod pipeline;
pub mod plugin;
pub mod text;
pub mod types;
pub mod validate;
pub mod virtual_module;

#[macro_use]
extern crate lazy_static;

/// The npm package providing `APIProvider` and the base `Map` component.
pub const MAPS_PACKAGE: &str = "@vis.gl/react-google-maps";

pub use error::PluginError;
pub use options::{BuildContext, BuildMode, MapDefaults, PluginOptions};
pub use pipeline::PluginPipeline;
pub use plugin::{BuildPlugin, ConfigPatch, Enforce, GoogleMapsPlugin, TransformOutput};
pub use virtual_module::{RESOLVED_VIRTUAL_MODULE_ID, VIRTUAL_MODULE_ID};
pub use anyhow;
pub use serde_json;
