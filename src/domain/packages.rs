//! Composer package set and installed-package detection.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::domain::features::FeatureSelection;

/// Packages installed unconditionally.
pub const CORE_PACKAGES: [&str; 5] =
    ["laravel/fortify", "laravel/sanctum", "laravel/pail", "laravel/wayfinder", "sqids/sqids"];

pub const HORIZON_PACKAGE: &str = "laravel/horizon";
pub const REVERB_PACKAGE: &str = "laravel/reverb";
pub const TELESCOPE_PACKAGE: &str = "laravel/telescope";

#[derive(Debug, Deserialize, Default)]
struct ComposerManifest {
    #[serde(default)]
    require: serde_json::Map<String, serde_json::Value>,
    #[serde(default, rename = "require-dev")]
    require_dev: serde_json::Map<String, serde_json::Value>,
}

/// The ordered list of packages required for the given selection.
pub fn required_packages(selection: FeatureSelection) -> Vec<&'static str> {
    let mut packages: Vec<&'static str> = CORE_PACKAGES.to_vec();

    if selection.horizon {
        packages.push(HORIZON_PACKAGE);
    }
    if selection.reverb {
        packages.push(REVERB_PACKAGE);
    }
    if selection.telescope {
        packages.push(TELESCOPE_PACKAGE);
    }

    packages
}

/// Read the set of packages already present in composer.json.
///
/// An absent or unparsable manifest is treated as "nothing installed" with a
/// warning; package installation stays idempotent either way.
pub fn installed_packages(composer_json: &Path) -> HashSet<String> {
    let content = match fs::read_to_string(composer_json) {
        Ok(content) => content,
        Err(_) => {
            eprintln!("Warning: composer.json not found, assuming no packages installed.");
            return HashSet::new();
        }
    };

    let manifest: ComposerManifest = match serde_json::from_str(&content) {
        Ok(manifest) => manifest,
        Err(err) => {
            eprintln!("Warning: could not parse composer.json ({err}), assuming no packages installed.");
            return HashSet::new();
        }
    };

    manifest.require.keys().chain(manifest.require_dev.keys()).cloned().collect()
}

/// Required packages not yet present in the manifest, in install order.
pub fn missing_packages(
    selection: FeatureSelection,
    installed: &HashSet<String>,
) -> Vec<&'static str> {
    required_packages(selection).into_iter().filter(|pkg| !installed.contains(*pkg)).collect()
}
