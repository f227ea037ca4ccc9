//! Idempotent rule pipeline for the target project's `.env` file.
//!
//! Each rule checks its own trigger against the current text, rewrites whole
//! lines in place (multiline-anchored regex, value = rest of line) and records
//! a label when it fires. Running the pipeline twice yields no second-pass
//! changes.

use rand::Rng;
use regex::{NoExpand, Regex};

use crate::domain::features::FeatureSelection;
use crate::domain::name::title_case_project_name;

/// Keys switched to the Redis backend when set to anything else.
const REDIS_SETTINGS: [&str; 3] = ["SESSION_DRIVER", "CACHE_STORE", "QUEUE_CONNECTION"];

/// Mail transport keys written by the outbound-mail rule.
const MAIL_SETTINGS: [(&str, &str); 6] = [
    ("MAIL_MAILER", "smtp"),
    ("MAIL_HOST", "127.0.0.1"),
    ("MAIL_PORT", "2525"),
    ("MAIL_USERNAME", "null"),
    ("MAIL_PASSWORD", "null"),
    ("MAIL_FROM_ADDRESS", "\"hello@example.com\""),
];

/// Anchor line the first mail key is inserted after when absent.
const MAIL_ANCHOR_KEY: &str = "APP_MAINTENANCE_DRIVER";

/// Result of running the rule pipeline over the env text.
#[derive(Debug)]
pub struct EnvMutation {
    /// Full mutated file text.
    pub content: String,
    /// Labels of the rules that fired, in rule order.
    pub changes: Vec<String>,
}

impl EnvMutation {
    pub fn changed(&self) -> bool {
        !self.changes.is_empty()
    }

    /// Human-readable change summary, e.g. `APP_NAME, DB_*`.
    pub fn summary(&self) -> String {
        self.changes.join(", ")
    }
}

/// Run every rule in order against the given env text.
pub fn mutate_env(content: &str, token: &str, selection: FeatureSelection) -> EnvMutation {
    let mut text = content.to_string();
    let mut changes = Vec::new();

    if apply_app_name(&mut text, token) {
        changes.push("APP_NAME".to_string());
    }
    if apply_database(&mut text, token) {
        changes.push("DB_*".to_string());
    }
    for key in REDIS_SETTINGS {
        if apply_backend(&mut text, key, "redis") {
            changes.push(key.to_string());
        }
    }
    if selection.reverb && apply_reverb(&mut text) {
        changes.push("REVERB_*".to_string());
    }
    if apply_admin_emails(&mut text) {
        changes.push("ADMIN_EMAILS".to_string());
    }
    if apply_mail(&mut text) {
        changes.push("MAIL_*".to_string());
    }

    EnvMutation { content: text, changes }
}

/// Replace the placeholder app name with a title-cased project name.
fn apply_app_name(text: &mut String, token: &str) -> bool {
    if !text.contains("APP_NAME=Laravel") {
        return false;
    }

    let display = title_case_project_name(token);
    let re = Regex::new(r"(?m)^APP_NAME=.*$").unwrap();
    *text = re.replace_all(text, NoExpand(&format!("APP_NAME=\"{display}\""))).into_owned();
    true
}

/// Overwrite the connection block when the file still carries the framework
/// default driver or a commented-out host line.
fn apply_database(text: &mut String, token: &str) -> bool {
    let commented_host = Regex::new(r"(?m)^#\s*DB_HOST=").unwrap();
    if !text.contains("DB_CONNECTION=sqlite") && !commented_host.is_match(text) {
        return false;
    }

    upsert_key(text, "DB_CONNECTION", "pgsql");
    upsert_key(text, "DB_HOST", "127.0.0.1");
    upsert_key(text, "DB_PORT", "5432");
    upsert_key(text, "DB_DATABASE", token);
    upsert_key(text, "DB_USERNAME", "postgres");
    upsert_key(text, "DB_PASSWORD", "");
    true
}

/// Set `key` to `target` when it is present with any other value.
///
/// The original used a `(?!...)` lookahead; the regex crate has none, so the
/// current value is captured and compared instead. A missing key never fires.
fn apply_backend(text: &mut String, key: &str, target: &str) -> bool {
    let re = Regex::new(&format!(r"(?m)^{key}=(.*)$")).unwrap();
    let Some(current) = re.captures(text) else {
        return false;
    };

    if current[1].starts_with(target) {
        return false;
    }

    *text = re.replace_all(text, NoExpand(&format!("{key}={target}"))).into_owned();
    true
}

/// Append freshly generated Reverb credentials when none exist.
fn apply_reverb(text: &mut String) -> bool {
    if text.contains("REVERB_APP_ID") {
        return false;
    }

    let mut rng = rand::thread_rng();
    let app_id: u32 = rng.gen_range(100_000..=999_999);
    let mut key_bytes = [0u8; 16];
    let mut secret_bytes = [0u8; 16];
    rng.fill(&mut key_bytes);
    rng.fill(&mut secret_bytes);

    text.push_str("\n# Reverb WebSocket Server\n");
    text.push_str(&format!("REVERB_APP_ID={app_id}\n"));
    text.push_str(&format!("REVERB_APP_KEY={}\n", hex::encode(key_bytes)));
    text.push_str(&format!("REVERB_APP_SECRET={}\n", hex::encode(secret_bytes)));
    text.push_str("REVERB_HOST=localhost\n");
    text.push_str("REVERB_PORT=8080\n");
    text.push_str("REVERB_SCHEME=http\n");
    true
}

/// Append an empty admin allow-list key when absent.
fn apply_admin_emails(text: &mut String) -> bool {
    if text.contains("ADMIN_EMAILS") {
        return false;
    }

    text.push_str("\n# Comma-separated list of admin e-mail addresses\n");
    text.push_str("ADMIN_EMAILS=\n");
    true
}

/// Point the mail transport at a local SMTP relay.
///
/// Fires when the mailer is absent, set to the `log` driver, or set to any
/// non-smtp transport. Existing keys (commented or not) are replaced in place;
/// a missing `MAIL_MAILER` is inserted after the maintenance-driver anchor.
fn apply_mail(text: &mut String) -> bool {
    let mailer = Regex::new(r"(?m)^#?\s*MAIL_MAILER=(.*)$").unwrap();
    if let Some(current) = mailer.captures(text)
        && current[1].starts_with("smtp")
        && !current[0].starts_with('#')
    {
        return false;
    }

    for (key, value) in MAIL_SETTINGS {
        if !upsert_key(text, key, value) && key == "MAIL_MAILER" {
            insert_after_anchor(text, MAIL_ANCHOR_KEY, &format!("MAIL_MAILER={value}"));
        }
    }
    true
}

/// Replace every `KEY=...` line (commented or not) with `KEY=value`,
/// uncommenting as needed. Returns false when no line matched.
fn upsert_key(text: &mut String, key: &str, value: &str) -> bool {
    let re = Regex::new(&format!(r"(?m)^#?\s*{key}=.*$")).unwrap();
    if !re.is_match(text) {
        return false;
    }

    *text = re.replace_all(text, NoExpand(&format!("{key}={value}"))).into_owned();
    true
}

/// Insert `line` directly after the line carrying `anchor_key`, or append it
/// when the anchor is absent.
fn insert_after_anchor(text: &mut String, anchor_key: &str, line: &str) {
    let re = Regex::new(&format!(r"(?m)^{anchor_key}=.*$")).unwrap();
    match re.find(text) {
        Some(found) => {
            let at = found.end();
            text.insert_str(at, &format!("\n{line}"));
        }
        None => {
            if !text.ends_with('\n') {
                text.push('\n');
            }
            text.push_str(line);
            text.push('\n');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE_ENV: &str = "APP_NAME=Laravel\n\
APP_ENV=local\n\
APP_MAINTENANCE_DRIVER=file\n\
\n\
DB_CONNECTION=sqlite\n\
# DB_HOST=127.0.0.1\n\
# DB_PORT=3306\n\
# DB_DATABASE=laravel\n\
# DB_USERNAME=root\n\
# DB_PASSWORD=\n\
\n\
SESSION_DRIVER=database\n\
CACHE_STORE=database\n\
QUEUE_CONNECTION=database\n\
\n\
MAIL_MAILER=log\n\
MAIL_HOST=127.0.0.1\n\
MAIL_PORT=2525\n\
MAIL_USERNAME=null\n\
MAIL_PASSWORD=null\n\
MAIL_FROM_ADDRESS=\"hello@example.com\"\n";

    fn selection_all() -> FeatureSelection {
        FeatureSelection::ALL
    }

    fn selection_no_reverb() -> FeatureSelection {
        FeatureSelection { horizon: true, reverb: false, telescope: true }
    }

    #[test]
    fn app_name_is_replaced_with_title_case() {
        let result = mutate_env(BASE_ENV, "my_shop", selection_no_reverb());
        assert!(result.content.contains("APP_NAME=\"My Shop\""));
        assert!(result.changes.contains(&"APP_NAME".to_string()));
    }

    #[test]
    fn app_name_untouched_when_not_placeholder() {
        let env = BASE_ENV.replace("APP_NAME=Laravel", "APP_NAME=\"Custom\"");
        let result = mutate_env(&env, "my_shop", selection_no_reverb());
        assert!(result.content.contains("APP_NAME=\"Custom\""));
        assert!(!result.changes.contains(&"APP_NAME".to_string()));
    }

    #[test]
    fn database_block_is_uncommented_and_overwritten() {
        let result = mutate_env(BASE_ENV, "my_shop", selection_no_reverb());
        assert!(result.content.contains("DB_CONNECTION=pgsql"));
        assert!(result.content.contains("DB_HOST=127.0.0.1"));
        assert!(result.content.contains("DB_PORT=5432"));
        assert!(result.content.contains("DB_DATABASE=my_shop"));
        assert!(result.content.contains("DB_USERNAME=postgres"));
        assert!(result.content.contains("DB_PASSWORD="));
        assert!(!result.content.contains("# DB_HOST"));
        assert!(result.changes.contains(&"DB_*".to_string()));
    }

    #[test]
    fn database_rule_skipped_for_configured_connection() {
        let env = "DB_CONNECTION=mysql\nDB_HOST=db.internal\n";
        let result = mutate_env(env, "my_shop", selection_no_reverb());
        assert!(result.content.contains("DB_CONNECTION=mysql"));
        assert!(result.content.contains("DB_HOST=db.internal"));
    }

    #[test]
    fn backend_keys_switch_to_redis() {
        let result = mutate_env(BASE_ENV, "my_shop", selection_no_reverb());
        assert!(result.content.contains("SESSION_DRIVER=redis"));
        assert!(result.content.contains("CACHE_STORE=redis"));
        assert!(result.content.contains("QUEUE_CONNECTION=redis"));
        assert!(result.changes.contains(&"SESSION_DRIVER".to_string()));
    }

    #[test]
    fn backend_rule_ignores_missing_keys() {
        let env = "APP_ENV=local\n";
        let result = mutate_env(env, "my_shop", selection_no_reverb());
        assert!(!result.content.contains("SESSION_DRIVER"));
    }

    #[test]
    fn reverb_block_appended_with_generated_credentials() {
        let result = mutate_env(BASE_ENV, "my_shop", selection_all());
        assert!(result.changes.contains(&"REVERB_*".to_string()));

        let id = Regex::new(r"(?m)^REVERB_APP_ID=(\d{6})$").unwrap();
        assert!(id.is_match(&result.content));
        let key = Regex::new(r"(?m)^REVERB_APP_KEY=([0-9a-f]{32})$").unwrap();
        assert!(key.is_match(&result.content));
        let secret = Regex::new(r"(?m)^REVERB_APP_SECRET=([0-9a-f]{32})$").unwrap();
        assert!(secret.is_match(&result.content));
        assert!(result.content.contains("REVERB_HOST=localhost"));
        assert!(result.content.contains("REVERB_PORT=8080"));
        assert!(result.content.contains("REVERB_SCHEME=http"));
    }

    #[test]
    fn reverb_block_skipped_when_not_selected() {
        let result = mutate_env(BASE_ENV, "my_shop", selection_no_reverb());
        assert!(!result.content.contains("REVERB_APP_ID"));
    }

    #[test]
    fn reverb_block_not_duplicated() {
        let first = mutate_env(BASE_ENV, "my_shop", selection_all());
        let second = mutate_env(&first.content, "my_shop", selection_all());
        assert!(!second.changes.contains(&"REVERB_*".to_string()));
        assert_eq!(second.content.matches("REVERB_APP_ID").count(), 1);
    }

    #[test]
    fn admin_emails_key_appended_once() {
        let first = mutate_env(BASE_ENV, "my_shop", selection_no_reverb());
        assert!(first.content.contains("ADMIN_EMAILS=\n"));

        let second = mutate_env(&first.content, "my_shop", selection_no_reverb());
        assert!(!second.changes.contains(&"ADMIN_EMAILS".to_string()));
    }

    #[test]
    fn mail_keys_replaced_when_driver_is_log() {
        let result = mutate_env(BASE_ENV, "my_shop", selection_no_reverb());
        assert!(result.content.contains("MAIL_MAILER=smtp"));
        assert!(result.content.contains("MAIL_USERNAME=null"));
        assert!(result.content.contains("MAIL_FROM_ADDRESS=\"hello@example.com\""));
        assert!(result.changes.contains(&"MAIL_*".to_string()));
    }

    #[test]
    fn missing_mailer_inserted_after_maintenance_anchor() {
        let env = "APP_NAME=Laravel\nAPP_MAINTENANCE_DRIVER=file\nAPP_DEBUG=true\n";
        let result = mutate_env(env, "my_shop", selection_no_reverb());
        let maintenance_at = result.content.find("APP_MAINTENANCE_DRIVER").unwrap();
        let mailer_at = result.content.find("MAIL_MAILER=smtp").unwrap();
        let debug_at = result.content.find("APP_DEBUG").unwrap();
        assert!(maintenance_at < mailer_at && mailer_at < debug_at);
    }

    #[test]
    fn missing_mailer_appended_without_anchor() {
        let env = "APP_NAME=Laravel\n";
        let result = mutate_env(env, "my_shop", selection_no_reverb());
        assert!(result.content.contains("MAIL_MAILER=smtp\n"));
    }

    #[test]
    fn mail_rule_skipped_when_already_smtp() {
        let env = "MAIL_MAILER=smtp\nMAIL_HOST=mail.internal\n";
        let result = mutate_env(env, "my_shop", selection_no_reverb());
        assert!(result.content.contains("MAIL_HOST=mail.internal"));
        assert!(!result.changes.contains(&"MAIL_*".to_string()));
    }

    #[test]
    fn second_pass_reports_zero_changes() {
        let first = mutate_env(BASE_ENV, "my_shop", selection_all());
        assert!(first.changed());

        let second = mutate_env(&first.content, "my_shop", selection_all());
        assert!(!second.changed(), "unexpected second-pass changes: {}", second.summary());
        assert_eq!(second.content, first.content);
    }
}
