//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! structured formats use serde, plain emits one identifier per line.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};

use hrdash_core::{Page, Resource};

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled on stderr.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
    }
}

/// Print a success line to stderr, respecting quiet mode.
pub fn status(global: &GlobalOpts, message: &str) {
    if global.quiet {
        return;
    }
    if should_color(global.color_mode()) {
        eprintln!("{} {message}", "✓".green());
    } else {
        eprintln!("✓ {message}");
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render one page of entities.
///
/// Structured formats serialize the whole page as the server sent it;
/// `table` and `plain` show only the rows.
pub fn render_page<R, Row>(
    format: OutputFormat,
    page: &Page<R>,
    to_row: impl Fn(&R) -> Row,
    id_fn: impl Fn(&R) -> String,
) -> Result<String, CliError>
where
    R: Resource,
    Row: Tabled,
{
    Ok(match format {
        OutputFormat::Table => {
            let rows: Vec<Row> = page.items.iter().map(to_row).collect();
            render_table(&rows)
        }
        OutputFormat::Json => serde_json::to_string_pretty(page)?,
        OutputFormat::JsonCompact => serde_json::to_string(page)?,
        OutputFormat::Yaml => render_yaml(page)?,
        OutputFormat::Plain => page.items.iter().map(id_fn).collect::<Vec<_>>().join("\n"),
    })
}

/// Render a single serde-serializable item in the chosen format.
///
/// Table rendering uses `detail_fn`, since single-item views don't use
/// the `Tabled` derive.
pub fn render_single<T>(
    format: OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: Serialize,
{
    Ok(match format {
        OutputFormat::Table => detail_fn(data),
        OutputFormat::Json => serde_json::to_string_pretty(data)?,
        OutputFormat::JsonCompact => serde_json::to_string(data)?,
        OutputFormat::Yaml => render_yaml(data)?,
        OutputFormat::Plain => id_fn(data),
    })
}

/// Footer describing the page position, for table output.
pub fn page_footer<R>(page: &Page<R>) -> String {
    let shown = page.items.len();
    match page.total_pages {
        Some(total) => format!(
            "page {} of {total} ({shown} shown, size {})",
            page.page_number + 1,
            page.page_size
        ),
        None => format!("page {} ({shown} shown)", page.page_number + 1),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

fn render_yaml<T: Serialize + ?Sized>(data: &T) -> Result<String, CliError> {
    serde_yaml::to_string(data).map_err(|e| CliError::Config(format!("cannot render YAML: {e}")))
}
