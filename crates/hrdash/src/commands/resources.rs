//! Handlers shared by the four entity command groups.

use std::path::Path;

use serde_json::Value;
use tabled::Tabled;

use hrdash_core::{Page, ResourceHandle, SearchQuery, TreeResource};

use crate::cli::{GlobalOpts, OutputFormat, PageArgs, SearchArgs};
use crate::error::CliError;
use crate::output;

use super::util;

/// An entity family the CLI can print.
pub trait Listing: TreeResource {
    type Row: Tabled;

    fn row(&self) -> Self::Row;

    /// Identifier printed by `--output plain`.
    fn id(&self) -> String {
        self.key().to_string()
    }
}

pub async fn list<R: Listing>(
    handle: &ResourceHandle<R>,
    args: &PageArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let page = handle.list((args.page.as_str(), args.size.as_str())).await?;
    print_page(&page, global)
}

pub async fn search<R: Listing>(
    handle: &ResourceHandle<R>,
    args: &SearchArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let query = SearchQuery::new(args.text.as_str()).in_categories(args.fields.iter().map(String::as_str));
    let page = handle
        .search_text(&query, (args.page.page.as_str(), args.page.size.as_str()))
        .await?;
    print_page(&page, global)
}

pub async fn create<R: Listing>(
    handle: &ResourceHandle<R>,
    item: &R,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let created = handle.create(item).await?;
    output::status(global, &format!("Created {} {}", R::KIND.singular(), created.id()));
    refresh(handle, global).await
}

pub async fn update<R: Listing>(
    handle: &ResourceHandle<R>,
    item: &R,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let updated = handle.update(item).await?;
    output::status(global, &format!("Updated {} {}", R::KIND.singular(), updated.id()));
    refresh(handle, global).await
}

pub async fn delete<R: Listing>(
    handle: &ResourceHandle<R>,
    key: &R::Key,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let noun = R::KIND.singular();
    if !util::confirm(&format!("Delete {noun} {key}?"), &format!("{noun} delete"), global.yes)? {
        return Ok(());
    }

    let ack = handle.delete(key).await?;
    let message = match ack {
        Value::String(text) if !text.trim().is_empty() => text,
        _ => format!("Deleted {noun} {key}"),
    };
    output::status(global, &message);
    refresh(handle, global).await
}

/// Parse an entity from a `--from-file` JSON document.
pub fn from_file<R: Listing>(path: &Path) -> Result<R, CliError> {
    Ok(serde_json::from_value(util::read_json_file(path)?)?)
}

/// Re-run the last query and print the fresh page.
async fn refresh<R: Listing>(handle: &ResourceHandle<R>, global: &GlobalOpts) -> Result<(), CliError> {
    let page = handle.refresh().await?;
    print_page(&page, global)
}

fn print_page<R: Listing>(page: &Page<R>, global: &GlobalOpts) -> Result<(), CliError> {
    let format = global.format();
    let out = output::render_page(format, page, R::row, R::id)?;
    output::print_output(&out, global.quiet);
    if format == OutputFormat::Table && !global.quiet {
        eprintln!("{}", output::page_footer(page));
    }
    Ok(())
}
