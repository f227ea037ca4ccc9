//! composer.json patching: dev script and package auto-discovery.

use std::fs;

use serde_json::{Value, json};

use crate::domain::AppError;
use crate::domain::features::FeatureSelection;
use crate::domain::project::Project;

/// Display colors for the concurrently processes, truncated to the number of
/// active process names.
const PROCESS_COLORS: [&str; 5] = ["#93c5fd", "#c4b5fd", "#fb7185", "#fdba74", "#4ade80"];

/// Rewrite `scripts.dev` to run every selected dev process concurrently and,
/// for Telescope, disable its package auto-discovery.
///
/// The manifest is parsed, mutated and re-serialized with stable pretty
/// formatting; a missing composer.json is fatal.
pub fn patch_composer_json(project: &Project, selection: FeatureSelection) -> Result<(), AppError> {
    let path = project.composer_json_path();
    if !path.exists() {
        return Err(AppError::MissingProjectFile(path));
    }

    let mut manifest: Value = serde_json::from_str(&fs::read_to_string(&path)?)?;

    let scripts = manifest
        .as_object_mut()
        .ok_or_else(|| AppError::MalformedManifest("root is not an object".to_string()))?
        .entry("scripts")
        .or_insert_with(|| json!({}));
    scripts
        .as_object_mut()
        .ok_or_else(|| AppError::MalformedManifest("scripts is not an object".to_string()))?
        .insert("dev".to_string(), json!(dev_script(selection)));

    if selection.telescope {
        disable_telescope_discovery(&mut manifest);
    }

    let mut serialized = serde_json::to_string_pretty(&manifest)?;
    serialized.push('\n');
    fs::write(&path, serialized)?;
    println!("Updated composer.json scripts");
    Ok(())
}

/// Build the two-entry dev script: a timeout guard plus the concurrently line.
fn dev_script(selection: FeatureSelection) -> Vec<String> {
    let mut commands = vec!["php artisan serve".to_string()];
    let mut names = vec!["server"];

    if selection.horizon {
        commands.push("php artisan horizon".to_string());
        names.push("horizon");
    }
    if selection.reverb {
        commands.push("php artisan reverb:start".to_string());
        names.push("reverb");
    }
    commands.push("php artisan pail --timeout=0".to_string());
    names.push("logs");
    commands.push("npm run dev".to_string());
    names.push("vite");

    let colors = PROCESS_COLORS[..names.len()].join(",");
    let quoted = commands.join("\" \"");

    vec![
        "Composer\\Config::disableProcessTimeout".to_string(),
        format!(
            "npx concurrently -c \"{colors}\" \"{quoted}\" --names={} --kill-others",
            names.join(",")
        ),
    ]
}

/// Append laravel/telescope to extra.laravel.dont-discover, once.
fn disable_telescope_discovery(manifest: &mut Value) {
    let dont_discover = &mut manifest["extra"]["laravel"]["dont-discover"];
    if dont_discover.is_null() {
        *dont_discover = json!([]);
    }

    if let Some(entries) = dont_discover.as_array_mut()
        && !entries.iter().any(|entry| entry == "laravel/telescope")
    {
        entries.push(json!("laravel/telescope"));
    }
}
