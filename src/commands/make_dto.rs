//! make:dto generator: immutable value objects under app/DataTransferObjects.

use std::fs;
use std::path::PathBuf;

use serde::Serialize;

use crate::domain::{AppError, Project};
use crate::ports::Prompter;
use crate::templates;

/// Options for the make:dto command.
#[derive(Debug, Clone, Default)]
pub struct MakeDtoOptions {
    /// DTO name; the `Data` suffix is appended when missing.
    pub name: String,
    /// Model class for a generated `fromModel` factory method.
    pub model: Option<String>,
    /// Comma-separated `name:type` property list.
    pub properties: Option<String>,
    pub force: bool,
    pub no_interaction: bool,
}

/// One constructor property of the generated DTO.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DtoProperty {
    pub name: String,
    pub php_type: String,
    pub nullable: bool,
}

#[derive(Debug, Serialize)]
struct DtoContext {
    class_name: String,
    model: Option<String>,
    properties: Vec<DtoProperty>,
}

/// Append the `Data` suffix unless the name already carries it.
pub fn ensure_data_suffix(name: &str) -> String {
    if name.ends_with("Data") { name.to_string() } else { format!("{name}Data") }
}

/// Parse a comma-separated `name:type` list; a leading `?` marks the type
/// nullable, a missing type defaults to `mixed`.
pub fn parse_properties(input: &str) -> Vec<DtoProperty> {
    input
        .split(',')
        .map(str::trim)
        .filter(|prop| !prop.is_empty())
        .map(|prop| {
            let (name, raw_type) = match prop.split_once(':') {
                Some((name, raw_type)) => (name, raw_type),
                None => (prop, "mixed"),
            };
            let nullable = raw_type.starts_with('?');
            DtoProperty {
                name: name.to_string(),
                php_type: raw_type.trim_start_matches('?').to_string(),
                nullable,
            }
        })
        .collect()
}

/// Execute the make:dto command. Returns the created file path.
pub fn execute(
    project: &Project,
    options: &MakeDtoOptions,
    prompter: &dyn Prompter,
) -> Result<PathBuf, AppError> {
    if options.name.trim().is_empty() {
        return Err(AppError::InvalidName(options.name.clone()));
    }

    let class_name = ensure_data_suffix(options.name.trim());
    if class_name != options.name.trim() {
        println!("Renamed to {class_name} (DTOs should end with 'Data')");
    }

    let directory = project.app_path("DataTransferObjects");
    let file_path = directory.join(format!("{class_name}.php"));

    if file_path.exists() && !options.force {
        return Err(AppError::FileExists(file_path));
    }

    let mut properties = options.properties.as_deref().map(parse_properties).unwrap_or_default();

    if properties.is_empty() && !options.no_interaction {
        let answer = prompter
            .text("Properties (comma-separated)", "e.g., id:int,name:string,email:string")?;
        if let Some(input) = answer {
            properties = parse_properties(&input);
        }
    }

    if properties.is_empty() {
        properties = vec![DtoProperty {
            name: "id".to_string(),
            php_type: "int".to_string(),
            nullable: false,
        }];
    }

    fs::create_dir_all(&directory)?;

    let ctx = DtoContext { class_name: class_name.clone(), model: options.model.clone(), properties };
    fs::write(&file_path, templates::render("dto.php", &ctx)?)?;

    println!("DTO created: {}", file_path.display());
    Ok(file_path)
}
