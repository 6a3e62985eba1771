// crates/localekit-cli/src/main.rs
// ============================================================================
// Module: Localekit CLI Entry Point
// Description: Command dispatcher for catalog audit, repair, and migrations.
// Purpose: Provide a single localized CLI for translation maintenance tasks.
// Dependencies: clap, localekit-config, localekit-core, localekit-datastore.
// ============================================================================

//! ## Overview
//! The Localekit CLI consolidates the translation maintenance workflows:
//! auditing catalog coverage against the application source tree, applying
//! repair plans, fixing text encoding damage, validating configuration, and
//! running data-store migrations. All user-facing strings are routed through
//! the i18n catalog. Failures local to one locale or file never halt a
//! batch; a final summary always prints, even under partial failure.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use localekit_cli::i18n::Locale;
use localekit_cli::i18n::set_locale;
use localekit_cli::t;
use localekit_config::LocalekitConfig;
use localekit_core::Catalog;
use localekit_core::CatalogError;
use localekit_core::FileRepair;
use localekit_core::KeyExtractor;
use localekit_core::LocaleCoverage;
use localekit_core::RepairOp;
use localekit_core::RepairPlan;
use localekit_core::RepairSummary;
use localekit_core::ScanOptions;
use localekit_core::apply_plan;
use localekit_core::diff_locale;
use localekit_datastore::HttpStatementExecutor;
use localekit_datastore::MigrationRunner;
use localekit_datastore::StatementList;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable for CLI locale selection.
const LANG_ENV: &str = "LOCALEKIT_LANG";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "localekit", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Preferred output language (overrides `LOCALEKIT_LANG`).
    #[arg(long, value_enum, value_name = "LANG", global = true)]
    lang: Option<LangArg>,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Audit translation coverage for every configured locale.
    Audit(AuditCommand),
    /// Apply a repair plan to one or more catalog files.
    Repair(RepairCommand),
    /// Strip byte-order marks and fix mojibake in catalog files.
    FixEncoding(FixEncodingCommand),
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
    /// Run an ordered list of migration statements against the data store.
    Migrate(MigrateCommand),
}

/// Arguments for the `audit` command.
#[derive(Args, Debug)]
struct AuditCommand {
    /// Optional config file path (defaults to localekit.toml).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// List every missing key per locale instead of counts only.
    #[arg(long, action = ArgAction::SetTrue)]
    show_keys: bool,
}

/// Arguments for the `repair` command.
#[derive(Args, Debug)]
struct RepairCommand {
    /// Path to the repair plan JSON document.
    #[arg(long, value_name = "PATH")]
    plan: PathBuf,
}

/// Arguments for the `fix-encoding` command.
#[derive(Args, Debug)]
struct FixEncodingCommand {
    /// Catalog files to fix, in order.
    #[arg(value_name = "CATALOG", required = true)]
    catalogs: Vec<PathBuf>,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate a Localekit configuration file.
    Validate(ConfigValidateCommand),
}

/// Arguments for `config validate`.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Optional config file path (defaults to localekit.toml).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Arguments for the `migrate` command.
#[derive(Args, Debug)]
struct MigrateCommand {
    /// Path to the JSON statement list document.
    #[arg(long, value_name = "PATH")]
    statements: PathBuf,
    /// Optional config file path (defaults to localekit.toml).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// CLI language selection values.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum LangArg {
    /// English output.
    En,
    /// Spanish output.
    Es,
}

impl From<LangArg> for Locale {
    fn from(value: LangArg) -> Self {
        match value {
            LangArg::En => Self::En,
            LangArg::Es => Self::Es,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for localized error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a localized message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    let env_lang = std::env::var(LANG_ENV).ok().filter(|value| !value.trim().is_empty());
    let locale = resolve_locale(cli.lang, env_lang.as_deref())?;
    set_locale(locale);
    if locale != Locale::En {
        write_stderr_line(&t!("i18n.disclaimer.machine_translated"))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Audit(command) => command_audit(&command),
        Commands::Repair(command) => command_repair(&command),
        Commands::FixEncoding(command) => command_fix_encoding(&command),
        Commands::Config {
            command,
        } => command_config(command),
        Commands::Migrate(command) => command_migrate(&command),
    }
}

/// Prints top-level help when no subcommand is given.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line("").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(())
}

// ============================================================================
// SECTION: Audit Command
// ============================================================================

/// Executes the `audit` command.
fn command_audit(command: &AuditCommand) -> CliResult<ExitCode> {
    let config = LocalekitConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    let extractor = KeyExtractor::new()
        .map_err(|err| CliError::new(t!("audit.scan_failed", error = err)))?;
    let mut options =
        ScanOptions::new(config.source_root.clone(), config.extensions.clone());
    if let Some(exclude) = &config.exclude_dirs {
        options.exclude_dirs.clone_from(exclude);
    }
    let scan = extractor
        .scan(&options)
        .map_err(|err| CliError::new(t!("audit.scan_failed", error = err)))?;

    for warning in &scan.warnings {
        write_stderr_checked(&t!(
            "audit.scan.warning",
            file = warning.file.display(),
            reason = warning.message
        ))?;
    }
    write_stdout_checked(&t!(
        "audit.scan.summary",
        files = scan.files_scanned,
        root = config.source_root.display(),
        keys = scan.keys.len()
    ))?;

    let mut complete = 0_usize;
    let mut incomplete = 0_usize;
    let mut failed = 0_usize;
    for (locale, catalog_path) in &config.locales {
        write_stdout_checked(&t!("audit.locale.header", locale = locale))?;
        match Catalog::load(catalog_path) {
            Ok(catalog) => {
                let coverage = diff_locale(locale, Some(&catalog), &scan);
                if coverage.missing.is_empty() {
                    complete += 1;
                } else {
                    incomplete += 1;
                }
                print_locale_coverage(&coverage, command.show_keys)?;
            }
            Err(CatalogError::Missing {
                path,
            }) => {
                incomplete += 1;
                write_stdout_checked(&t!(
                    "audit.locale.catalog_missing",
                    path = path.display(),
                    used = scan.keys.len()
                ))?;
            }
            Err(err) => {
                failed += 1;
                write_stderr_checked(&t!("audit.locale.load_failed", error = err))?;
            }
        }
    }

    write_stdout_checked(&t!(
        "audit.summary",
        locales = config.locales.len(),
        complete = complete,
        incomplete = incomplete,
        failed = failed
    ))?;
    if failed > 0 {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// Prints one locale's coverage block.
fn print_locale_coverage(coverage: &LocaleCoverage, show_keys: bool) -> CliResult<()> {
    write_stdout_checked(&t!(
        "audit.locale.coverage",
        coverage = format_coverage(coverage.coverage),
        covered = coverage.used.saturating_sub(coverage.missing.len()),
        used = coverage.used,
        missing = coverage.missing.len()
    ))?;
    if show_keys && !coverage.missing.is_empty() {
        write_stdout_checked(&t!("audit.locale.missing_header"))?;
        for key in &coverage.missing {
            write_stdout_checked(&t!("audit.locale.missing_key", key = key))?;
        }
    }
    if !coverage.file_missing.is_empty() {
        write_stdout_checked(&t!("audit.locale.files_header"))?;
        for entry in &coverage.file_missing {
            write_stdout_checked(&t!(
                "audit.locale.file_entry",
                file = entry.file.display(),
                count = entry.missing
            ))?;
        }
    }
    Ok(())
}

/// Formats a coverage percentage with one decimal place.
fn format_coverage(coverage: f64) -> String {
    format!("{coverage:.1}")
}

// ============================================================================
// SECTION: Repair Commands
// ============================================================================

/// Executes the `repair` command.
fn command_repair(command: &RepairCommand) -> CliResult<ExitCode> {
    let plan = RepairPlan::load(&command.plan)
        .map_err(|err| CliError::new(t!("repair.plan.load_failed", error = err)))?;
    let summary = apply_plan(&plan);
    print_repair_summary(&summary)?;
    if summary.errors > 0 {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// Executes the `fix-encoding` command as an encoding-only repair plan.
fn command_fix_encoding(command: &FixEncodingCommand) -> CliResult<ExitCode> {
    let plan = RepairPlan {
        files: command
            .catalogs
            .iter()
            .map(|catalog| FileRepair {
                file: catalog.clone(),
                ops: vec![RepairOp::StripBom, RepairOp::FixMojibake],
            })
            .collect(),
    };
    let summary = apply_plan(&plan);
    print_repair_summary(&summary)?;
    if summary.errors > 0 {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// Prints per-file outcomes and the batch summary for a repair run.
fn print_repair_summary(summary: &RepairSummary) -> CliResult<()> {
    for outcome in &summary.outcomes {
        if let Some(error) = &outcome.error {
            write_stderr_checked(&t!(
                "repair.file.failed",
                file = outcome.file.display(),
                error = error
            ))?;
        } else if outcome.changed {
            write_stdout_checked(&t!(
                "repair.file.fixed",
                file = outcome.file.display(),
                applied = outcome.applied
            ))?;
        } else {
            write_stdout_checked(&t!("repair.file.skipped", file = outcome.file.display()))?;
        }
    }
    write_stdout_checked(&t!(
        "repair.summary",
        total = summary.total,
        fixed = summary.fixed,
        skipped = summary.skipped,
        errors = summary.errors
    ))
}

// ============================================================================
// SECTION: Config Command
// ============================================================================

/// Dispatches config subcommands.
fn command_config(command: ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate(command) => {
            LocalekitConfig::load(command.config.as_deref())
                .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
            write_stdout_checked(&t!("config.validate.ok"))?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

// ============================================================================
// SECTION: Migrate Command
// ============================================================================

/// Executes the `migrate` command.
fn command_migrate(command: &MigrateCommand) -> CliResult<ExitCode> {
    let config = LocalekitConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    let Some(datastore) = &config.datastore else {
        return Err(CliError::new(t!("migrate.config.missing_datastore")));
    };
    let credential = datastore
        .credential()
        .map_err(|err| CliError::new(t!("migrate.credential_failed", error = err)))?;
    let list = StatementList::load(&command.statements)
        .map_err(|err| CliError::new(t!("migrate.statements.load_failed", error = err)))?;
    let executor = HttpStatementExecutor::new(&datastore.endpoint, credential)
        .map_err(|err| CliError::new(t!("migrate.executor_failed", error = err)))?;
    let report = MigrationRunner::new(executor).run(&list);

    for outcome in &report.outcomes {
        match &outcome.error {
            None => write_stdout_checked(&t!("migrate.statement.ok", index = outcome.index))?,
            Some(error) => write_stderr_checked(&t!(
                "migrate.statement.failed",
                index = outcome.index,
                error = error
            ))?,
        }
    }
    write_stdout_checked(&t!(
        "migrate.summary",
        total = report.total,
        succeeded = report.succeeded,
        failed = report.failed
    ))?;
    if report.failed > 0 {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Locale Helpers
// ============================================================================

/// Resolves the CLI locale from the flag, then the environment.
fn resolve_locale(lang: Option<LangArg>, env_lang: Option<&str>) -> CliResult<Locale> {
    if let Some(lang) = lang {
        return Ok(lang.into());
    }
    if let Some(value) = env_lang {
        return Locale::parse(value).ok_or_else(|| {
            CliError::new(t!("i18n.lang.invalid_env", env = LANG_ENV, value = value))
        });
    }
    Ok(Locale::En)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a line to stdout, converting failures into CLI errors.
fn write_stdout_checked(message: &str) -> CliResult<()> {
    write_stdout_line(message).map_err(|err| CliError::new(output_error("stdout", &err)))
}

/// Writes a line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Writes a line to stderr, converting failures into CLI errors.
fn write_stderr_checked(message: &str) -> CliResult<()> {
    write_stderr_line(message).map_err(|err| CliError::new(output_error("stderr", &err)))
}

/// Formats a localized output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
