//! Shared testing utilities for larkit CLI tests.

use assert_cmd::Command;
use assert_fs::TempDir;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Testing harness providing an isolated Laravel-like project tree plus fake
/// `composer`/`php` executables on PATH.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
    bin_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment with succeeding fake tools.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let root = root.into_persistent_if(std::env::var_os("TEST_PERSIST").is_some());
        let work_dir = root.path().join("work");
        let bin_dir = root.path().join("bin");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");
        fs::create_dir_all(&bin_dir).expect("Failed to create test bin directory");

        let ctx = Self { root, work_dir, bin_dir };
        ctx.install_fake_tool("composer", 0);
        ctx.install_fake_tool("php", 0);
        ctx
    }

    /// Path to the workspace directory used for CLI invocations.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Install a fake executable that logs its arguments and exits with the
    /// given status. Replaces any previous fake of the same name.
    pub fn install_fake_tool(&self, name: &str, exit_code: i32) {
        let log = self.root.path().join(format!("{name}.log"));
        let script = format!(
            "#!/bin/sh\necho \"$@\" >> {}\nexit {}\n",
            log.display(),
            exit_code
        );
        let path = self.bin_dir.join(name);
        fs::write(&path, script).expect("Failed to write fake tool");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .expect("Failed to mark fake tool executable");
    }

    /// Argument lines recorded by a fake tool, one per invocation.
    pub fn tool_calls(&self, name: &str) -> Vec<String> {
        let log = self.root.path().join(format!("{name}.log"));
        fs::read_to_string(log)
            .map(|content| content.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Build a command for invoking the compiled `larkit` binary in the work
    /// directory, with the fake tools first on PATH.
    pub fn cli(&self) -> Command {
        let original_path = std::env::var("PATH").unwrap_or_default();
        let mut cmd = Command::cargo_bin("larkit").expect("Failed to locate larkit binary");
        cmd.current_dir(&self.work_dir)
            .env("PATH", format!("{}:{}", self.bin_dir.display(), original_path));
        cmd
    }

    /// Lay down the minimal Laravel project files the installer mutates.
    pub fn write_laravel_fixture(&self) {
        let root = &self.work_dir;
        fs::create_dir_all(root.join("bootstrap")).unwrap();
        fs::create_dir_all(root.join("routes")).unwrap();
        fs::create_dir_all(root.join("app/Providers")).unwrap();

        fs::write(root.join("composer.json"), "{\n    \"require\": {\n        \"php\": \"^8.2\"\n    }\n}\n").unwrap();
        fs::write(root.join(".env"), Self::env_fixture()).unwrap();
        fs::write(
            root.join("bootstrap/providers.php"),
            "<?php\n\nreturn [\n    App\\Providers\\AppServiceProvider::class,\n];\n",
        )
        .unwrap();
        fs::write(
            root.join("routes/web.php"),
            "<?php\n\nRoute::get('/', fn () => view('welcome'));\n",
        )
        .unwrap();
        fs::write(
            root.join("app/Providers/AppServiceProvider.php"),
            "<?php\n\nnamespace App\\Providers;\n\nuse Illuminate\\Support\\ServiceProvider;\n\nclass AppServiceProvider extends ServiceProvider\n{\n    public function register(): void\n    {\n        //\n    }\n\n    public function boot(): void\n    {\n        //\n    }\n}\n",
        )
        .unwrap();
    }

    pub fn env_fixture() -> &'static str {
        "APP_NAME=Laravel\n\
APP_ENV=local\n\
APP_MAINTENANCE_DRIVER=file\n\
DB_CONNECTION=sqlite\n\
# DB_HOST=127.0.0.1\n\
# DB_PORT=3306\n\
# DB_DATABASE=laravel\n\
# DB_USERNAME=root\n\
# DB_PASSWORD=\n\
SESSION_DRIVER=database\n\
CACHE_STORE=database\n\
QUEUE_CONNECTION=database\n\
MAIL_MAILER=log\n"
    }

    /// Read a file from the work directory.
    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.work_dir.join(rel))
            .unwrap_or_else(|_| panic!("Failed to read {rel}"))
    }

    /// Whether a path exists in the work directory.
    pub fn exists(&self, rel: &str) -> bool {
        self.work_dir.join(rel).exists()
    }
}
