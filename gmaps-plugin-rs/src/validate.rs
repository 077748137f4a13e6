//! Construction-time configuration checks.

use crate::error::PluginError;
use crate::options::{BuildContext, PluginOptions};
use crate::MAPS_PACKAGE;
use log::warn;
use std::path::Path;

/// A missing or blank key fails production builds and only warns otherwise.
pub fn check_api_key(options: &PluginOptions, ctx: &BuildContext) -> Result<(), PluginError> {
    if options.usable_api_key().is_some() {
        return Ok(());
    }
    if ctx.mode.is_production() {
        return Err(PluginError::MissingApiKey);
    }
    warn!(
        "[vite-plugin-google-maps] No Google Maps apiKey was provided. \
         The provider will not be able to load the API."
    );
    Ok(())
}

/// Looks for the maps package under `<root>/node_modules`. Hoisted or
/// workspace installs elsewhere are not detected.
pub fn maps_package_installed(root: &Path) -> bool {
    root.join("node_modules").join(MAPS_PACKAGE).exists()
}

pub fn check_maps_package(ctx: &BuildContext) {
    if !maps_package_installed(&ctx.root) {
        warn!(
            "[vite-plugin-google-maps] The library \"{}\" is not installed.\n\n  npm install {}\n",
            MAPS_PACKAGE, MAPS_PACKAGE
        );
    }
}
