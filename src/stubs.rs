//! Embedded stub bundle and the publish-unless-exists copier.

use std::fs;
use std::path::Path;

use include_dir::{Dir, DirEntry, include_dir};

use crate::domain::{AppError, Project};

static STUBS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/stubs");

/// Whether a stub entry publishes a single file or a whole directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StubKind {
    File,
    Dir,
}

/// One publishable stub: embedded source, destination relative to the project
/// root, and a human label for skip/publish messages.
#[derive(Debug, Clone, Copy)]
pub struct StubEntry {
    pub source: &'static str,
    pub destination: &'static str,
    pub label: &'static str,
    pub kind: StubKind,
}

/// Stubs published on every install.
pub const BASE_STUBS: [StubEntry; 9] = [
    StubEntry {
        source: "app/Services/SqidService.php.stub",
        destination: "app/Services/SqidService.php",
        label: "SqidService",
        kind: StubKind::File,
    },
    StubEntry {
        source: "app/Models/Traits/HasUid.php.stub",
        destination: "app/Models/Traits/HasUid.php",
        label: "HasUid trait",
        kind: StubKind::File,
    },
    StubEntry {
        source: "config/sqids.php.stub",
        destination: "config/sqids.php",
        label: "config/sqids.php",
        kind: StubKind::File,
    },
    StubEntry {
        source: "HealthCheckController.php.stub",
        destination: "app/Http/Controllers/HealthCheckController.php",
        label: "HealthCheckController",
        kind: StubKind::File,
    },
    StubEntry {
        source: "health-check.tsx.stub",
        destination: "resources/js/pages/health-check.tsx",
        label: "health-check.tsx",
        kind: StubKind::File,
    },
    StubEntry {
        source: "docs/standards",
        destination: "docs/standards",
        label: "docs/standards",
        kind: StubKind::Dir,
    },
    StubEntry {
        source: "prettierrc.stub",
        destination: ".prettierrc",
        label: ".prettierrc",
        kind: StubKind::File,
    },
    StubEntry {
        source: "prettierignore.stub",
        destination: ".prettierignore",
        label: ".prettierignore",
        kind: StubKind::File,
    },
    StubEntry {
        source: "editorconfig.stub",
        destination: ".editorconfig",
        label: ".editorconfig",
        kind: StubKind::File,
    },
];

/// eslint config, kept separate so tests can name it directly.
pub const ESLINT_STUB: StubEntry = StubEntry {
    source: "eslint.config.js.stub",
    destination: "eslint.config.js",
    label: "eslint.config.js",
    kind: StubKind::File,
};

pub const HORIZON_PROVIDER_STUB: StubEntry = StubEntry {
    source: "HorizonServiceProvider.php.stub",
    destination: "app/Providers/HorizonServiceProvider.php",
    label: "HorizonServiceProvider",
    kind: StubKind::File,
};

pub const TELESCOPE_PROVIDER_STUB: StubEntry = StubEntry {
    source: "TelescopeServiceProvider.php.stub",
    destination: "app/Providers/TelescopeServiceProvider.php",
    label: "TelescopeServiceProvider",
    kind: StubKind::File,
};

/// GitHub workflow files, skipped with `--no-workflows`.
pub const WORKFLOW_STUBS: [StubEntry; 6] = [
    StubEntry {
        source: ".github/workflows/tests.yml.stub",
        destination: ".github/workflows/tests.yml",
        label: ".github/workflows/tests.yml",
        kind: StubKind::File,
    },
    StubEntry {
        source: ".github/workflows/lint.yml.stub",
        destination: ".github/workflows/lint.yml",
        label: ".github/workflows/lint.yml",
        kind: StubKind::File,
    },
    StubEntry {
        source: ".github/workflows/claude-code-review.yml.stub",
        destination: ".github/workflows/claude-code-review.yml",
        label: ".github/workflows/claude-code-review.yml",
        kind: StubKind::File,
    },
    StubEntry {
        source: ".github/workflows/claude.yml.stub",
        destination: ".github/workflows/claude.yml",
        label: ".github/workflows/claude.yml",
        kind: StubKind::File,
    },
    StubEntry {
        source: ".github/workflows/dependabot-automerge.yml.stub",
        destination: ".github/workflows/dependabot-automerge.yml",
        label: ".github/workflows/dependabot-automerge.yml",
        kind: StubKind::File,
    },
    StubEntry {
        source: ".github/dependabot.yml.stub",
        destination: ".github/dependabot.yml",
        label: ".github/dependabot.yml",
        kind: StubKind::File,
    },
];

/// Content of the CLAUDE.md stub prepended to the project's CLAUDE.md.
pub fn claude_md_stub() -> &'static str {
    STUBS_DIR
        .get_file("CLAUDE.md.stub")
        .and_then(|file| file.contents_utf8())
        .unwrap_or_default()
}

/// Publish one stub entry into the project tree.
///
/// An existing destination of the entry's kind is skipped with a warning
/// unless `force` is set; a copy failure is fatal for the whole install.
pub fn publish(project: &Project, entry: &StubEntry, force: bool) -> Result<(), AppError> {
    let destination = project.base_path(entry.destination);

    let exists = match entry.kind {
        StubKind::File => destination.exists(),
        StubKind::Dir => destination.is_dir(),
    };
    if exists && !force {
        eprintln!("Warning: Skipping {} (already exists). Use --force to overwrite.", entry.label);
        return Ok(());
    }

    match entry.kind {
        StubKind::File => {
            let file = STUBS_DIR
                .get_file(entry.source)
                .ok_or_else(|| AppError::Template(format!("missing stub '{}'", entry.source)))?;
            if let Some(parent) = destination.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&destination, file.contents())?;
        }
        StubKind::Dir => {
            let dir = STUBS_DIR
                .get_dir(entry.source)
                .ok_or_else(|| AppError::Template(format!("missing stub '{}'", entry.source)))?;
            fs::create_dir_all(&destination)?;
            extract_dir(dir, entry.source, &destination)?;
        }
    }

    println!("Published {}", entry.label);
    Ok(())
}

fn extract_dir(dir: &'static Dir, root: &str, destination: &Path) -> Result<(), AppError> {
    for entry in dir.entries() {
        let rel = entry
            .path()
            .strip_prefix(root)
            .map_err(|_| AppError::Template(format!("stub path outside '{root}'")))?;
        match entry {
            DirEntry::File(file) => {
                let target = destination.join(rel);
                if let Some(parent) = target.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(target, file.contents())?;
            }
            DirEntry::Dir(subdir) => {
                fs::create_dir_all(destination.join(rel))?;
                extract_dir(subdir, root, destination)?;
            }
        }
    }
    Ok(())
}
