//! Path map for the target Laravel project tree.

use std::path::{Path, PathBuf};

use crate::domain::AppError;
use crate::domain::name::sanitize_project_name;

/// Fallback database name when sanitization yields an empty token.
const DEFAULT_PROJECT_TOKEN: &str = "laravel";

/// Represents the target project rooted at a given path.
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
}

impl Project {
    /// Create a project instance for the given root directory.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Create a project instance for the current directory.
    pub fn current() -> Result<Self, AppError> {
        let cwd = std::env::current_dir()?;
        Ok(Self::new(cwd))
    }

    /// The project root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a path relative to the project root.
    pub fn base_path<P: AsRef<Path>>(&self, rel: P) -> PathBuf {
        self.root.join(rel)
    }

    /// Resolve a path under `app/`.
    pub fn app_path<P: AsRef<Path>>(&self, rel: P) -> PathBuf {
        self.root.join("app").join(rel)
    }

    pub fn env_path(&self) -> PathBuf {
        self.root.join(".env")
    }

    pub fn composer_json_path(&self) -> PathBuf {
        self.root.join("composer.json")
    }

    pub fn providers_path(&self) -> PathBuf {
        self.root.join("bootstrap").join("providers.php")
    }

    pub fn web_routes_path(&self) -> PathBuf {
        self.root.join("routes").join("web.php")
    }

    pub fn app_service_provider_path(&self) -> PathBuf {
        self.app_path("Providers/AppServiceProvider.php")
    }

    pub fn claude_md_path(&self) -> PathBuf {
        self.root.join("CLAUDE.md")
    }

    /// Derive the project token from an explicit name or the directory name.
    ///
    /// The token names the database, so it falls back to a fixed default when
    /// sanitization produces an empty string.
    pub fn project_token(&self, name: Option<&str>) -> String {
        let raw = match name {
            Some(value) => value.to_string(),
            None => self
                .root
                .file_name()
                .map(|base| base.to_string_lossy().to_string())
                .unwrap_or_default(),
        };

        let token = sanitize_project_name(&raw);
        if token.is_empty() { DEFAULT_PROJECT_TOKEN.to_string() } else { token }
    }
}
