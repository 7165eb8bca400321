// Per-entity state container.

use hrdash_api::{Criteria, Page, PageRequest};
use serde_json::Value;

use super::Reducer;

/// The list or search call that produced a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    List(PageRequest),
    Search {
        criteria: Criteria,
        page: PageRequest,
    },
}

impl Query {
    pub fn page(&self) -> PageRequest {
        match self {
            Self::List(page) | Self::Search { page, .. } => *page,
        }
    }
}

/// Last paged result for one entity family plus request flags.
///
/// `list` and `search` share the `page` slot. Mutations never touch it;
/// consumers re-fetch after a mutation instead.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceState<R> {
    pub loading: bool,
    pub error: bool,
    pub error_message: Option<String>,
    pub page: Page<R>,
    /// Body of the last successful create/update/delete.
    pub last_ack: Option<Value>,
    pub last_query: Option<Query>,
    /// Newest list/search sequence number seen.
    issued: u64,
}

impl<R> Default for ResourceState<R> {
    fn default() -> Self {
        Self {
            loading: false,
            error: false,
            error_message: None,
            page: Page::default(),
            last_ack: None,
            last_query: None,
            issued: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub enum ResourceEvent<R> {
    /// A list or search started. `query` is `None` when it was rejected
    /// locally before it could be built.
    FetchPending { seq: u64, query: Option<Query> },
    FetchFulfilled { seq: u64, page: Page<R> },
    FetchRejected { seq: u64, message: String },
    MutationPending,
    MutationFulfilled { ack: Value },
    MutationRejected { message: String },
    Reset,
}

impl<R> ResourceState<R> {
    fn is_stale(&self, seq: u64) -> bool {
        seq < self.issued
    }

    fn reject(&mut self, message: String) {
        self.loading = false;
        self.error = true;
        self.error_message = Some(message);
    }
}

impl<R: Clone + Send + Sync + 'static> Reducer for ResourceState<R> {
    type Event = ResourceEvent<R>;

    fn reduce(&mut self, event: ResourceEvent<R>) -> bool {
        match event {
            ResourceEvent::FetchPending { seq, query } => {
                if self.is_stale(seq) {
                    return false;
                }
                self.issued = seq;
                self.loading = true;
                self.error = false;
                self.error_message = None;
                if query.is_some() {
                    self.last_query = query;
                }
            }
            ResourceEvent::FetchFulfilled { seq, page } => {
                if self.is_stale(seq) {
                    return false;
                }
                self.loading = false;
                self.error = false;
                self.error_message = None;
                self.page = page;
            }
            ResourceEvent::FetchRejected { seq, message } => {
                if self.is_stale(seq) {
                    return false;
                }
                self.reject(message);
            }
            ResourceEvent::MutationPending => {
                self.loading = true;
                self.error = false;
                self.error_message = None;
            }
            ResourceEvent::MutationFulfilled { ack } => {
                self.loading = false;
                self.error = false;
                self.error_message = None;
                self.last_ack = Some(ack);
            }
            ResourceEvent::MutationRejected { message } => self.reject(message),
            ResourceEvent::Reset => {
                let issued = self.issued;
                *self = Self {
                    issued,
                    ..Self::default()
                };
            }
        }
        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use hrdash_api::Department;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    type State = ResourceState<Department>;

    fn page_of(names: &[&str]) -> Page<Department> {
        Page {
            items: names
                .iter()
                .zip(1..)
                .map(|(name, dnum)| Department::new(dnum, *name))
                .collect(),
            page_number: 0,
            page_size: 10,
            total_pages: Some(1),
            ..Page::default()
        }
    }

    fn list_query() -> Option<Query> {
        Some(Query::List(PageRequest::first()))
    }

    #[test]
    fn initial_state_is_empty() {
        let state = State::default();
        assert!(!state.loading);
        assert!(!state.error);
        assert!(state.page.is_empty());
        assert_eq!(state.page.page_number, 0);
        assert_eq!(state.page.page_size, 0);
    }

    #[test]
    fn fetch_lifecycle() {
        let mut state = State::default();

        state.reduce(ResourceEvent::FetchPending { seq: 1, query: list_query() });
        assert!(state.loading);
        assert_eq!(state.last_query, list_query());

        state.reduce(ResourceEvent::FetchFulfilled { seq: 1, page: page_of(&["Research"]) });
        assert!(!state.loading);
        assert!(!state.error);
        assert_eq!(state.page, page_of(&["Research"]));
    }

    #[test]
    fn rejection_keeps_previous_snapshot() {
        let mut state = State::default();
        state.reduce(ResourceEvent::FetchPending { seq: 1, query: list_query() });
        state.reduce(ResourceEvent::FetchFulfilled { seq: 1, page: page_of(&["Research"]) });

        state.reduce(ResourceEvent::FetchPending { seq: 2, query: list_query() });
        state.reduce(ResourceEvent::FetchRejected {
            seq: 2,
            message: "Failed to fetch departments".into(),
        });

        assert!(!state.loading);
        assert!(state.error);
        assert_eq!(state.error_message.as_deref(), Some("Failed to fetch departments"));
        assert_eq!(state.page.len(), 1);
    }

    #[test]
    fn stale_responses_are_ignored() {
        let mut state = State::default();
        state.reduce(ResourceEvent::FetchPending { seq: 1, query: list_query() });
        state.reduce(ResourceEvent::FetchPending { seq: 2, query: list_query() });

        state.reduce(ResourceEvent::FetchFulfilled { seq: 2, page: page_of(&["New"]) });
        let changed = state.reduce(ResourceEvent::FetchFulfilled { seq: 1, page: page_of(&["Old"]) });

        assert!(!changed);
        assert_eq!(state.page.items[0].dname, "New");

        let changed = state.reduce(ResourceEvent::FetchRejected { seq: 1, message: "late".into() });
        assert!(!changed);
        assert!(!state.error);
    }

    #[test]
    fn mutation_leaves_snapshot_alone() {
        let mut state = State::default();
        state.reduce(ResourceEvent::FetchPending { seq: 1, query: list_query() });
        state.reduce(ResourceEvent::FetchFulfilled { seq: 1, page: page_of(&["Research"]) });

        state.reduce(ResourceEvent::MutationPending);
        assert!(state.loading);
        state.reduce(ResourceEvent::MutationFulfilled { ack: json!({ "message": "ok" }) });

        assert!(!state.loading);
        assert!(!state.error);
        assert_eq!(state.last_ack, Some(json!({ "message": "ok" })));
        assert_eq!(state.page, page_of(&["Research"]));
    }

    #[test]
    fn mutation_rejection_sets_error() {
        let mut state = State::default();
        state.reduce(ResourceEvent::MutationPending);
        state.reduce(ResourceEvent::MutationRejected { message: "Failed to add department".into() });
        assert!(!state.loading);
        assert!(state.error);
        assert_eq!(state.error_message.as_deref(), Some("Failed to add department"));
    }

    #[test]
    fn local_rejection_keeps_last_query() {
        let mut state = State::default();
        state.reduce(ResourceEvent::FetchPending { seq: 1, query: list_query() });
        state.reduce(ResourceEvent::FetchPending { seq: 2, query: None });
        state.reduce(ResourceEvent::FetchRejected { seq: 2, message: "bad page".into() });
        assert_eq!(state.last_query, list_query());
    }

    #[test]
    fn reset_keeps_fencing() {
        let mut state = State::default();
        state.reduce(ResourceEvent::FetchPending { seq: 5, query: list_query() });
        state.reduce(ResourceEvent::Reset);
        assert!(!state.loading);
        assert!(state.last_query.is_none());
        assert!(!state.reduce(ResourceEvent::FetchFulfilled { seq: 4, page: page_of(&["x"]) }));
    }
}
