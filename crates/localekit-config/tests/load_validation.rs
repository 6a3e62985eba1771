// crates/localekit-config/tests/load_validation.rs
// ============================================================================
// Module: Config Load and Validation Tests
// Description: Exercises fail-closed loading guards and semantic validation.
// Purpose: Ensure malformed or oversized configs are rejected deterministically.
// Dependencies: localekit-config, tempfile
// ============================================================================

//! Configuration tests covering the guard order (path, size, encoding,
//! parse, semantics) and credential resolution.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use localekit_config::ConfigError;
use localekit_config::LocalekitConfig;

// ============================================================================
// SECTION: Helpers
// ============================================================================

type TestResult = Result<(), Box<dyn std::error::Error>>;

const VALID_CONFIG: &str = r#"
source_root = "frontend/src"
extensions = ["js", "vue"]

[locales]
es = "static/i18n/es.json"
pt = "static/i18n/pt.json"
"#;

fn write_config(dir: &Path, text: &str) -> Result<PathBuf, std::io::Error> {
    let path = dir.join("localekit.toml");
    fs::write(&path, text)?;
    Ok(path)
}

// ============================================================================
// SECTION: Load Tests
// ============================================================================

/// Confirms a well-formed config loads with its locale table intact.
#[test]
fn load_accepts_valid_config() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = write_config(dir.path(), VALID_CONFIG)?;
    let config = LocalekitConfig::load(Some(&path))?;
    assert_eq!(config.source_root, PathBuf::from("frontend/src"));
    assert_eq!(config.extensions, ["js", "vue"]);
    assert_eq!(config.locales.len(), 2);
    assert!(config.datastore.is_none());
    assert!(config.exclude_dirs.is_none());
    Ok(())
}

/// Confirms the optional datastore table parses.
#[test]
fn load_accepts_datastore_section() -> TestResult {
    let dir = tempfile::tempdir()?;
    let text = format!(
        "{VALID_CONFIG}\n[datastore]\nendpoint = \"https://db.example.com/sql\"\n\
         credential_env = \"LOCALEKIT_DB_TOKEN\"\n"
    );
    let path = write_config(dir.path(), &text)?;
    let config = LocalekitConfig::load(Some(&path))?;
    let datastore = config.datastore.ok_or("datastore missing")?;
    assert_eq!(datastore.endpoint, "https://db.example.com/sql");
    assert_eq!(datastore.credential_env, "LOCALEKIT_DB_TOKEN");
    Ok(())
}

/// Confirms a missing file maps to the dedicated missing variant.
#[test]
fn load_missing_file_is_distinguished() {
    let result = LocalekitConfig::load(Some(Path::new("/nonexistent/localekit.toml")));
    assert!(matches!(result, Err(ConfigError::Missing { .. })));
}

/// Confirms the path length guard runs before any filesystem access.
#[test]
fn load_rejects_overlong_path() {
    let long = format!("/tmp/{}.toml", "a".repeat(5000));
    let result = LocalekitConfig::load(Some(Path::new(&long)));
    assert!(matches!(result, Err(ConfigError::PathTooLong { .. })));
}

/// Confirms a single overlong component is rejected even on a short path.
#[test]
fn load_rejects_overlong_path_component() {
    let long_component = format!("/tmp/{}/c.toml", "b".repeat(300));
    let result = LocalekitConfig::load(Some(Path::new(&long_component)));
    assert!(matches!(result, Err(ConfigError::PathComponentTooLong { .. })));
}

/// Confirms an oversized config file is rejected before reading.
#[test]
fn load_rejects_oversized_file() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("localekit.toml");
    let file = fs::File::create(&path)?;
    file.set_len(1024 * 1024 + 1)?;
    drop(file);
    let result = LocalekitConfig::load(Some(&path));
    assert!(matches!(result, Err(ConfigError::TooLarge { .. })));
    Ok(())
}

/// Confirms non-UTF-8 bytes are rejected with the encoding variant.
#[test]
fn load_rejects_invalid_utf8() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("localekit.toml");
    fs::write(&path, [0xff, 0xfe, 0x00, 0x01])?;
    let result = LocalekitConfig::load(Some(&path));
    assert!(matches!(result, Err(ConfigError::NotUtf8 { .. })));
    Ok(())
}

/// Confirms unknown fields fail the parse instead of being ignored.
#[test]
fn load_rejects_unknown_fields() -> TestResult {
    let dir = tempfile::tempdir()?;
    let text = format!("{VALID_CONFIG}\nsurprise = true\n");
    let path = write_config(dir.path(), &text)?;
    let result = LocalekitConfig::load(Some(&path));
    assert!(matches!(result, Err(ConfigError::Parse { .. })));
    Ok(())
}

// ============================================================================
// SECTION: Validation Tests
// ============================================================================

/// Asserts that a config text fails validation with an `Invalid` error.
fn assert_invalid(text: &str) -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = write_config(dir.path(), text)?;
    let result = LocalekitConfig::load(Some(&path));
    assert!(
        matches!(result, Err(ConfigError::Invalid(_))),
        "expected invalid-config error, got {result:?}"
    );
    Ok(())
}

/// Confirms an empty extension list is rejected.
#[test]
fn validate_rejects_empty_extensions() -> TestResult {
    assert_invalid(
        r#"
source_root = "src"
extensions = []

[locales]
es = "es.json"
"#,
    )
}

/// Confirms dotted extensions are rejected.
#[test]
fn validate_rejects_dotted_extensions() -> TestResult {
    assert_invalid(
        r#"
source_root = "src"
extensions = [".js"]

[locales]
es = "es.json"
"#,
    )
}

/// Confirms an empty locale table is rejected.
#[test]
fn validate_rejects_empty_locales() -> TestResult {
    assert_invalid(
        r#"
source_root = "src"
extensions = ["js"]

[locales]
"#,
    )
}

/// Confirms an empty per-locale catalog path is rejected.
#[test]
fn validate_rejects_empty_catalog_path() -> TestResult {
    assert_invalid(
        r#"
source_root = "src"
extensions = ["js"]

[locales]
es = ""
"#,
    )
}

/// Confirms non-HTTP datastore endpoints are rejected.
#[test]
fn validate_rejects_non_http_endpoint() -> TestResult {
    assert_invalid(
        r#"
source_root = "src"
extensions = ["js"]

[locales]
es = "es.json"

[datastore]
endpoint = "ftp://db.example.com"
credential_env = "TOKEN"
"#,
    )
}

/// Confirms an empty credential variable name is rejected.
#[test]
fn validate_rejects_empty_credential_env() -> TestResult {
    assert_invalid(
        r#"
source_root = "src"
extensions = ["js"]

[locales]
es = "es.json"

[datastore]
endpoint = "https://db.example.com"
credential_env = "  "
"#,
    )
}

// ============================================================================
// SECTION: Credential Tests
// ============================================================================

/// Confirms an unset credential variable is reported by name, never read
/// from the config file itself.
#[test]
fn credential_reports_unset_variable() -> TestResult {
    let dir = tempfile::tempdir()?;
    let text = format!(
        "{VALID_CONFIG}\n[datastore]\nendpoint = \"https://db.example.com\"\n\
         credential_env = \"LOCALEKIT_TEST_UNSET_TOKEN\"\n"
    );
    let path = write_config(dir.path(), &text)?;
    let config = LocalekitConfig::load(Some(&path))?;
    let datastore = config.datastore.ok_or("datastore missing")?;
    let result = datastore.credential();
    match result {
        Err(ConfigError::CredentialUnset {
            name,
        }) => assert_eq!(name, "LOCALEKIT_TEST_UNSET_TOKEN"),
        other => panic!("expected unset credential error, got {other:?}"),
    }
    Ok(())
}
