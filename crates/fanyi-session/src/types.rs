use std::sync::Arc;

use fanyi_core::suggest::SuggestionIndex;

/// What the caller should do with the currently displayed suggestion
/// list.
pub enum SuggestAction {
    /// Leave the list as-is. A debounced refresh may be in flight; stale
    /// entries stay visible until it lands.
    Keep,
    /// Clear the list now and cancel any pending query.
    Clear,
}

/// A debounced suggestion query for the worker.
///
/// Carries the index it must run against, so a query can never race a
/// direction change: the session hands out the index that was current
/// when the event happened.
pub struct SuggestRequest {
    pub index: Arc<SuggestionIndex>,
    pub input: String,
}

/// Response from a session event.
///
/// Exact output and alternatives are already updated on the session when
/// this is returned; only suggestion work is delegated. The caller is
/// expected to invalidate the worker on `SuggestAction::Clear` and to
/// submit `suggest_request` when present.
pub struct SessionResponse {
    pub suggest_request: Option<SuggestRequest>,
    pub suggestions: SuggestAction,
}

impl SessionResponse {
    pub(crate) fn keep() -> Self {
        Self {
            suggest_request: None,
            suggestions: SuggestAction::Keep,
        }
    }

    pub(crate) fn clear() -> Self {
        Self {
            suggest_request: None,
            suggestions: SuggestAction::Clear,
        }
    }

    pub(crate) fn request(request: SuggestRequest) -> Self {
        Self {
            suggest_request: Some(request),
            suggestions: SuggestAction::Keep,
        }
    }
}
