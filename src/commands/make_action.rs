//! make:action generator: boilerplate unit-of-work classes under app/Actions.

use std::fs;
use std::path::PathBuf;

use serde::Serialize;

use crate::domain::{AppError, Project};
use crate::templates;

/// Verb prefixes the naming convention expects.
const VERB_PREFIXES: [&str; 14] = [
    "Create", "Update", "Delete", "Get", "List", "Toggle", "Send", "Process", "Calculate",
    "Validate", "Mark", "Approve", "Reject", "Publish",
];

/// Options for the make:action command.
#[derive(Debug, Clone, Default)]
pub struct MakeActionOptions {
    /// Action name, optionally slash-nested (e.g. `User/UpdateProfile`).
    pub name: String,
    /// Overwrite an existing file.
    pub force: bool,
}

#[derive(Debug, Serialize)]
struct ActionContext {
    namespace: String,
    class_name: String,
}

/// Parsed target: namespace, class and destination directory segments.
#[derive(Debug, PartialEq, Eq)]
pub struct ActionName {
    pub namespace: String,
    pub class_name: String,
    pub domain_segments: Vec<String>,
}

/// Split a slash-delimited name into namespace and class.
pub fn parse_action_name(raw: &str) -> Result<ActionName, AppError> {
    let mut segments: Vec<String> =
        raw.split('/').map(str::trim).filter(|s| !s.is_empty()).map(str::to_string).collect();

    let Some(class_name) = segments.pop() else {
        return Err(AppError::InvalidName(raw.to_string()));
    };

    let namespace = if segments.is_empty() {
        "App\\Actions".to_string()
    } else {
        format!("App\\Actions\\{}", segments.join("\\"))
    };

    Ok(ActionName { namespace, class_name, domain_segments: segments })
}

/// Execute the make:action command. Returns the created file path.
pub fn execute(project: &Project, options: &MakeActionOptions) -> Result<PathBuf, AppError> {
    let name = parse_action_name(&options.name)?;

    if !VERB_PREFIXES.iter().any(|prefix| name.class_name.starts_with(prefix)) {
        eprintln!("Warning: Consider prefixing with a verb (Create, Update, Delete, etc.) for clarity.");
    }

    let mut directory = project.app_path("Actions");
    for segment in &name.domain_segments {
        directory = directory.join(segment);
    }
    let file_path = directory.join(format!("{}.php", name.class_name));

    if file_path.exists() && !options.force {
        return Err(AppError::FileExists(file_path));
    }

    fs::create_dir_all(&directory)?;

    let ctx = ActionContext {
        namespace: name.namespace.clone(),
        class_name: name.class_name.clone(),
    };
    fs::write(&file_path, templates::render("action.php", &ctx)?)?;

    println!("Action created: {}", file_path.display());
    if !name.domain_segments.is_empty() {
        println!("  - Namespace: {}", name.namespace);
        println!("  - Usage: app({}::class)->handle(...)", name.class_name);
    }

    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn project_in(dir: &TempDir) -> Project {
        Project::new(PathBuf::from(dir.path()))
    }

    #[test]
    fn nested_name_maps_to_namespace_and_subdirectory() {
        let name = parse_action_name("User/UpdateProfile").unwrap();
        assert_eq!(name.namespace, "App\\Actions\\User");
        assert_eq!(name.class_name, "UpdateProfile");
        assert_eq!(name.domain_segments, vec!["User".to_string()]);
    }

    #[test]
    fn flat_name_maps_to_root_namespace() {
        let name = parse_action_name("UpdateProfile").unwrap();
        assert_eq!(name.namespace, "App\\Actions");
        assert!(name.domain_segments.is_empty());
    }

    #[test]
    fn deeply_nested_name_keeps_all_segments() {
        let name = parse_action_name("Billing/Invoices/SendReminder").unwrap();
        assert_eq!(name.namespace, "App\\Actions\\Billing\\Invoices");
        assert_eq!(name.class_name, "SendReminder");
    }

    #[test]
    fn empty_name_is_invalid() {
        assert!(matches!(parse_action_name(""), Err(AppError::InvalidName(_))));
        assert!(matches!(parse_action_name("//"), Err(AppError::InvalidName(_))));
    }

    #[test]
    fn execute_writes_nested_action_file() {
        let dir = TempDir::new().unwrap();
        let project = project_in(&dir);
        let options =
            MakeActionOptions { name: "User/UpdateProfile".to_string(), force: false };

        let path = execute(&project, &options).unwrap();

        assert_eq!(path, dir.path().join("app/Actions/User/UpdateProfile.php"));
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("namespace App\\Actions\\User;"));
        assert!(content.contains("class UpdateProfile"));
    }

    #[test]
    fn execute_writes_flat_action_file() {
        let dir = TempDir::new().unwrap();
        let project = project_in(&dir);
        let options = MakeActionOptions { name: "UpdateProfile".to_string(), force: false };

        let path = execute(&project, &options).unwrap();

        assert_eq!(path, dir.path().join("app/Actions/UpdateProfile.php"));
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("namespace App\\Actions;"));
    }

    #[test]
    fn existing_file_requires_force() {
        let dir = TempDir::new().unwrap();
        let project = project_in(&dir);
        let options = MakeActionOptions { name: "UpdateProfile".to_string(), force: false };

        execute(&project, &options).unwrap();
        let err = execute(&project, &options).unwrap_err();
        assert!(matches!(err, AppError::FileExists(_)));

        let forced = MakeActionOptions { force: true, ..options };
        execute(&project, &forced).unwrap();
    }
}
