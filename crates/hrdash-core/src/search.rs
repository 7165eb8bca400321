// ── Search criteria construction ──
//
// A search box plus a category picker becomes the `searchArgs` object the
// server filters on. The client never filters rows itself.

use hrdash_api::{Criteria, Resource};

use crate::error::CoreError;

/// Category meaning "every searchable field".
pub const ALL: &str = "ALL";

/// Free text plus the categories it should match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub categories: Vec<String>,
}

impl SearchQuery {
    /// Search every field for `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            categories: Vec::new(),
        }
    }

    /// Restrict the search to the given fields.
    pub fn in_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    /// Build the criteria for entity family `R`.
    ///
    /// Blank text yields `None`: the caller lists instead of searching.
    /// No categories, or the `ALL` sentinel, maps the text to every search
    /// field of `R`. Naming a field `R` does not search on is an error.
    pub fn criteria<R: Resource>(&self) -> Result<Option<Criteria>, CoreError> {
        let text = self.text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        let everything =
            self.categories.is_empty() || self.categories.iter().any(|c| c.eq_ignore_ascii_case(ALL));
        let fields: Vec<&str> = if everything {
            R::SEARCH_FIELDS.to_vec()
        } else {
            self.categories
                .iter()
                .map(|category| resolve_field::<R>(category.as_str()))
                .collect::<Result<_, _>>()?
        };

        Ok(Some(
            fields
                .into_iter()
                .map(|field| (field.to_owned(), text.to_owned()))
                .collect(),
        ))
    }
}

/// Match a category name against `R`'s search fields, ignoring case.
fn resolve_field<R: Resource>(category: &str) -> Result<&'static str, CoreError> {
    let category = category.trim();
    R::SEARCH_FIELDS
        .iter()
        .copied()
        .find(|field| field.eq_ignore_ascii_case(category))
        .ok_or_else(|| {
            CoreError::validation(format!(
                "unknown {} search field {category:?} (expected one of: {})",
                R::KIND.singular(),
                R::SEARCH_FIELDS.join(", ")
            ))
        })
}
