// crates/localekit-cli/src/i18n.rs
// ============================================================================
// Module: CLI Internationalization Helpers
// Description: Provides message catalog and translation utilities for the CLI.
// Purpose: Centralize user-facing strings; a translation tool should eat its
//          own cooking.
// Dependencies: Standard library collections and formatting utilities.
// ============================================================================

//! ## Overview
//! The Localekit CLI stores its user-facing strings in a small static
//! translation catalog. All runtime output should be routed through the
//! [`t!`](crate::t) macro.
//!
//! ## Invariants
//! - The catalog is initialized once and read-only thereafter.
//! - Missing keys fall back to English and then to the key itself.
//! - Placeholder substitutions preserve deterministic order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Supported CLI locales.
///
/// # Invariants
/// - Variants are stable for CLI parsing and catalog lookup.
/// - [`Locale::En`] is the default fallback locale.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Locale {
    /// English (default).
    En,
    /// Spanish.
    Es,
}

impl Locale {
    /// Returns the canonical locale label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
        }
    }

    /// Attempts to parse a locale value (case-insensitive, tolerant of region tags).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        let normalized = value.to_ascii_lowercase();
        let lang = normalized.split(['-', '_']).next().unwrap_or("");
        match lang {
            "en" => Some(Self::En),
            "es" => Some(Self::Es),
            _ => None,
        }
    }
}

/// Ordered list of supported CLI locales.
///
/// # Invariants
/// - Ordering is stable for deterministic presentation.
pub const SUPPORTED_LOCALES: &[Locale] = &[Locale::En, Locale::Es];

/// A formatted message argument captured by the [`macro@crate::t`] macro.
///
/// # Invariants
/// - `key` matches a placeholder name without braces (for example, `path`).
/// - `value` is preformatted and should be safe for display.
#[derive(Clone)]
pub struct MessageArg {
    /// The placeholder name used in message templates (e.g., `"path"`).
    pub key: &'static str,
    /// The formatted string value to substitute for this placeholder.
    pub value: String,
}

impl MessageArg {
    /// Constructs a new [`MessageArg`] from a key and displayable value.
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

// ============================================================================
// SECTION: Locale Selection
// ============================================================================

/// Global locale selection for CLI output.
static CURRENT_LOCALE: OnceLock<Locale> = OnceLock::new();

/// Sets the CLI locale. Only the first call wins.
pub fn set_locale(locale: Locale) {
    let _ = CURRENT_LOCALE.set(locale);
}

/// Returns the current CLI locale (defaults to English).
#[must_use]
pub fn current_locale() -> Locale {
    CURRENT_LOCALE.get().copied().unwrap_or(Locale::En)
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Static English catalog entries loaded into the localized message bundle.
const CATALOG_EN: &[(&str, &str)] = &[
    ("main.version", "localekit {version}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "output"),
    ("output.write_failed", "Failed to write to {stream}: {error}"),
    ("config.load_failed", "Failed to load config: {error}"),
    ("config.validate.ok", "Config valid."),
    ("audit.scan_failed", "Source scan failed: {error}"),
    (
        "audit.scan.summary",
        "Scanned {files} files under {root}; {keys} distinct translation keys referenced.",
    ),
    ("audit.scan.warning", "Warning: skipped {file}: {reason}"),
    ("audit.locale.header", "Locale {locale}:"),
    ("audit.locale.catalog_missing", "  catalog missing at {path}; all {used} keys uncovered"),
    ("audit.locale.load_failed", "  failed to load catalog: {error}"),
    (
        "audit.locale.coverage",
        "  coverage {coverage}% ({covered}/{used} keys, {missing} missing)",
    ),
    ("audit.locale.missing_header", "  missing keys:"),
    ("audit.locale.missing_key", "    - {key}"),
    ("audit.locale.files_header", "  files referencing missing keys:"),
    ("audit.locale.file_entry", "    - {file}: {count}"),
    (
        "audit.summary",
        "Audit complete: {locales} locales, {complete} complete, {incomplete} incomplete, \
         {failed} failed to load.",
    ),
    ("repair.plan.load_failed", "Failed to load repair plan: {error}"),
    ("repair.file.fixed", "Fixed {file} ({applied} operations applied)"),
    ("repair.file.skipped", "Unchanged {file}"),
    ("repair.file.failed", "Error in {file}: {error}"),
    (
        "repair.summary",
        "Repair complete: {total} files, {fixed} fixed, {skipped} unchanged, {errors} errors.",
    ),
    ("migrate.config.missing_datastore", "datastore is not configured in the config file."),
    ("migrate.credential_failed", "Failed to resolve datastore credential: {error}"),
    ("migrate.statements.load_failed", "Failed to load statement list: {error}"),
    ("migrate.executor_failed", "Failed to initialize datastore executor: {error}"),
    ("migrate.statement.ok", "  [{index}] ok"),
    ("migrate.statement.failed", "  [{index}] failed: {error}"),
    (
        "migrate.summary",
        "Migration complete: {total} statements, {succeeded} succeeded, {failed} failed.",
    ),
    ("i18n.lang.invalid_env", "Invalid value for {env}: {value}. Expected 'en' or 'es'."),
    (
        "i18n.disclaimer.machine_translated",
        "Note: non-English output is machine-translated and may be inaccurate.",
    ),
];

/// Static Spanish catalog entries loaded into the localized message bundle.
const CATALOG_ES: &[(&str, &str)] = &[
    ("main.version", "localekit {version}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "salida"),
    ("output.write_failed", "No se pudo escribir en {stream}: {error}"),
    ("config.load_failed", "No se pudo cargar la configuración: {error}"),
    ("config.validate.ok", "Configuración válida."),
    ("audit.scan_failed", "Falló el escaneo del código fuente: {error}"),
    (
        "audit.scan.summary",
        "Se escanearon {files} archivos en {root}; {keys} claves de traducción distintas \
         referenciadas.",
    ),
    ("audit.scan.warning", "Aviso: se omitió {file}: {reason}"),
    ("audit.locale.header", "Idioma {locale}:"),
    (
        "audit.locale.catalog_missing",
        "  falta el catálogo en {path}; las {used} claves quedan sin cubrir",
    ),
    ("audit.locale.load_failed", "  no se pudo cargar el catálogo: {error}"),
    (
        "audit.locale.coverage",
        "  cobertura {coverage}% ({covered}/{used} claves, {missing} ausentes)",
    ),
    ("audit.locale.missing_header", "  claves ausentes:"),
    ("audit.locale.missing_key", "    - {key}"),
    ("audit.locale.files_header", "  archivos que referencian claves ausentes:"),
    ("audit.locale.file_entry", "    - {file}: {count}"),
    (
        "audit.summary",
        "Auditoría completada: {locales} idiomas, {complete} completos, {incomplete} \
         incompletos, {failed} con errores de carga.",
    ),
    ("repair.plan.load_failed", "No se pudo cargar el plan de reparación: {error}"),
    ("repair.file.fixed", "Reparado {file} ({applied} operaciones aplicadas)"),
    ("repair.file.skipped", "Sin cambios {file}"),
    ("repair.file.failed", "Error en {file}: {error}"),
    (
        "repair.summary",
        "Reparación completada: {total} archivos, {fixed} reparados, {skipped} sin cambios, \
         {errors} errores.",
    ),
    ("migrate.config.missing_datastore", "datastore no está configurado en el archivo de configuración."),
    ("migrate.credential_failed", "No se pudo resolver la credencial del datastore: {error}"),
    ("migrate.statements.load_failed", "No se pudo cargar la lista de sentencias: {error}"),
    ("migrate.executor_failed", "No se pudo inicializar el ejecutor del datastore: {error}"),
    ("migrate.statement.ok", "  [{index}] correcto"),
    ("migrate.statement.failed", "  [{index}] falló: {error}"),
    (
        "migrate.summary",
        "Migración completada: {total} sentencias, {succeeded} correctas, {failed} fallidas.",
    ),
    ("i18n.lang.invalid_env", "Valor no válido para {env}: {value}. Se esperaba 'en' o 'es'."),
    (
        "i18n.disclaimer.machine_translated",
        "Nota: la salida que no está en inglés se traduce automáticamente y puede ser inexacta.",
    ),
];

/// Returns the message catalog for the requested locale.
pub(crate) fn catalog_for(locale: Locale) -> &'static HashMap<&'static str, &'static str> {
    static CATALOG_EN_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    static CATALOG_ES_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    match locale {
        Locale::En => CATALOG_EN_MAP.get_or_init(|| CATALOG_EN.iter().copied().collect()),
        Locale::Es => CATALOG_ES_MAP.get_or_init(|| CATALOG_ES.iter().copied().collect()),
    }
}

// ============================================================================
// SECTION: Translation
// ============================================================================

/// Translates `key` using the selected locale while substituting `args`.
#[must_use]
pub fn translate(key: &str, args: Vec<MessageArg>) -> String {
    let locale = current_locale();
    let template = catalog_for(locale)
        .get(key)
        .copied()
        .or_else(|| catalog_for(Locale::En).get(key).copied())
        .unwrap_or(key);
    if args.is_empty() {
        return template.to_string();
    }

    let mut result = template.to_string();
    for arg in args {
        let placeholder = format!("{{{}}}", arg.key);
        result = result.replace(&placeholder, &arg.value);
    }
    result
}

// ============================================================================
// SECTION: Macro
// ============================================================================

/// Formats a localized message from a key and named arguments.
///
/// # Arguments
///
/// - `$key` must match a catalog entry.
/// - Named arguments are substituted into `{placeholder}` positions.
///
/// # Returns
///
/// A localized [`String`] with placeholders substituted.
#[macro_export]
macro_rules! t {
    ($key:literal $(, $name:ident = $value:expr )* $(,)?) => {{
        let args = ::std::vec![
            $(
                $crate::i18n::MessageArg::new(stringify!($name), $value.to_string()),
            )*
        ];
        $crate::i18n::translate($key, args)
    }};
}
