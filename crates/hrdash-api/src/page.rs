// ── Paged envelope ──
//
// Every list/search endpoint answers with the same envelope:
// `{ <list key>: [...], page_number, page_size, totalPages }`. Only the
// list key differs per entity, so (de)serialization is driven by
// `Resource::LIST_KEY`.

use std::fmt;

use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Error;
use crate::resource::{Criteria, Resource};

/// One page of entities as returned by the server.
///
/// `page_number` and `page_size` read as 0 when the server leaves them
/// out, and are always written back.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<R> {
    pub items: Vec<R>,
    pub page_number: u32,
    pub page_size: u32,
    /// Absent on some endpoints; kept optional rather than guessed.
    pub total_pages: Option<u32>,
    /// Any envelope fields beyond the ones named above.
    pub extra: Map<String, Value>,
}

impl<R> Default for Page<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            page_number: 0,
            page_size: 0,
            total_pages: None,
            extra: Map::new(),
        }
    }
}

impl<R> Page<R> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// `true` when the server reports more pages after this one.
    pub fn has_next(&self) -> bool {
        self.total_pages
            .is_some_and(|total| self.page_number.saturating_add(1) < total)
    }
}

impl<'de, R: Resource> Deserialize<'de> for Page<R> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Envelope {
            #[serde(default)]
            page_number: u32,
            #[serde(default)]
            page_size: u32,
            #[serde(rename = "totalPages", default)]
            total_pages: Option<u32>,
            #[serde(flatten)]
            rest: Map<String, Value>,
        }

        let mut envelope = Envelope::deserialize(deserializer)?;
        let items = match envelope.rest.remove(R::LIST_KEY) {
            None => return Err(de::Error::missing_field(R::LIST_KEY)),
            Some(Value::Null) => Vec::new(),
            Some(list) => serde_json::from_value(list).map_err(de::Error::custom)?,
        };

        Ok(Self {
            items,
            page_number: envelope.page_number,
            page_size: envelope.page_size,
            total_pages: envelope.total_pages,
            extra: envelope.rest,
        })
    }
}

impl<R: Resource> Serialize for Page<R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry(R::LIST_KEY, &self.items)?;
        map.serialize_entry("page_number", &self.page_number)?;
        map.serialize_entry("page_size", &self.page_size)?;
        if let Some(total) = self.total_pages {
            map.serialize_entry("totalPages", &total)?;
        }
        for (key, value) in &self.extra {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

// ── Page requests ────────────────────────────────────────────────────

/// Validated pagination arguments: zero-based page number, positive size.
///
/// Constructing one is the only way to reach a list or search endpoint,
/// so malformed arguments fail before any request is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page_number: u32,
    page_size: u32,
}

impl PageRequest {
    pub const DEFAULT_SIZE: u32 = 10;

    pub fn new(page_number: u32, page_size: u32) -> Result<Self, Error> {
        if page_size == 0 {
            return Err(Error::validation("page size must be greater than zero"));
        }
        Ok(Self {
            page_number,
            page_size,
        })
    }

    /// First page with the default size.
    pub fn first() -> Self {
        Self {
            page_number: 0,
            page_size: Self::DEFAULT_SIZE,
        }
    }

    /// Parse pagination arguments coming from untyped input.
    ///
    /// Both values are required and must be non-negative integers.
    pub fn parse(page_number: Option<&str>, page_size: Option<&str>) -> Result<Self, Error> {
        let number = parse_component("page number", page_number)?;
        let size = parse_component("page size", page_size)?;
        Self::new(number, size)
    }

    pub fn page_number(self) -> u32 {
        self.page_number
    }

    pub fn page_size(self) -> u32 {
        self.page_size
    }

    /// The same page size, one page further.
    pub fn next(self) -> Self {
        Self {
            page_number: self.page_number.saturating_add(1),
            page_size: self.page_size,
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

impl fmt::Display for PageRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page {} (size {})", self.page_number, self.page_size)
    }
}

fn parse_component(name: &str, raw: Option<&str>) -> Result<u32, Error> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::validation(format!("{name} is required")))?;
    raw.parse::<u32>()
        .map_err(|_| Error::validation(format!("{name} must be a non-negative integer, got {raw:?}")))
}

impl TryFrom<(u32, u32)> for PageRequest {
    type Error = Error;

    fn try_from((page_number, page_size): (u32, u32)) -> Result<Self, Error> {
        Self::new(page_number, page_size)
    }
}

impl TryFrom<(i64, i64)> for PageRequest {
    type Error = Error;

    fn try_from((page_number, page_size): (i64, i64)) -> Result<Self, Error> {
        let number = u32::try_from(page_number).map_err(|_| {
            Error::validation(format!(
                "page number must be a non-negative integer, got {page_number}"
            ))
        })?;
        let size = u32::try_from(page_size).map_err(|_| {
            Error::validation(format!(
                "page size must be a non-negative integer, got {page_size}"
            ))
        })?;
        Self::new(number, size)
    }
}

impl TryFrom<(&str, &str)> for PageRequest {
    type Error = Error;

    fn try_from((page_number, page_size): (&str, &str)) -> Result<Self, Error> {
        Self::parse(Some(page_number), Some(page_size))
    }
}

// ── Search body ──────────────────────────────────────────────────────

/// Body of `POST /{entity}/search`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchRequest<'a> {
    pub search_args: &'a Criteria,
    pub page_number: u32,
    pub page_size: u32,
}

impl<'a> SearchRequest<'a> {
    pub(crate) fn new(criteria: &'a Criteria, page: PageRequest) -> Self {
        Self {
            search_args: criteria,
            page_number: page.page_number(),
            page_size: page.page_size(),
        }
    }
}
