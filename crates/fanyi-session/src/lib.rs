//! Stateful translation session: input text, direction, exact output,
//! alternatives, suggestions, and pagination.
//!
//! Exact lookups and alternatives are recomputed synchronously on every
//! event, so they are never stale. Fuzzy suggestions are the one async
//! surface: events return a [`SuggestRequest`] for the caller to hand to
//! the [`worker::SuggestWorker`], and completed queries come back through
//! [`TranslationSession::receive_suggestions`], which drops results for
//! superseded input.

pub mod pager;
pub(crate) mod types;
pub mod worker;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use tracing::debug;

use fanyi_core::dictionary::{Alternative, Language, PhraseBook};
use fanyi_core::settings::Settings;
use fanyi_core::suggest::{self, Suggestion, SuggestionIndex};

pub use types::{SessionResponse, SuggestAction, SuggestRequest};

/// Session tuning, read from `Settings` once at startup.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub suggest_threshold: f64,
    pub page_size: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            suggest_threshold: suggest::DEFAULT_THRESHOLD,
            page_size: pager::DEFAULT_PAGE_SIZE,
        }
    }
}

impl From<&Settings> for SessionConfig {
    fn from(s: &Settings) -> Self {
        Self {
            suggest_threshold: s.suggest.threshold,
            page_size: s.session.page_size,
        }
    }
}

/// Stateful translation session over a shared phrase book.
pub struct TranslationSession {
    book: Arc<PhraseBook>,
    /// Fuzzy index for the current source direction. Rebuilt on swap,
    /// source change, and book replacement; handed out by `Arc` so an
    /// in-flight query keeps the index it started with.
    index: Arc<SuggestionIndex>,

    source: Language,
    target: Language,
    input_text: String,
    output_text: String,
    alternatives: Vec<Alternative>,
    suggestions: Vec<Suggestion>,
    current_page: usize,

    config: SessionConfig,
}

impl TranslationSession {
    pub fn new(book: Arc<PhraseBook>, config: SessionConfig) -> Self {
        let source = Language::English;
        let index = Arc::new(SuggestionIndex::with_threshold(
            &book,
            source,
            config.suggest_threshold,
        ));
        Self {
            book,
            index,
            source,
            target: Language::Chinese,
            input_text: String::new(),
            output_text: String::new(),
            alternatives: Vec::new(),
            suggestions: Vec::new(),
            current_page: 1,
            config,
        }
    }

    pub fn source(&self) -> Language {
        self.source
    }

    pub fn target(&self) -> Language {
        self.target
    }

    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    /// Exact translation of the current input, empty when there is none.
    pub fn output_text(&self) -> &str {
        &self.output_text
    }

    pub fn alternatives(&self) -> &[Alternative] {
        &self.alternatives
    }

    /// Currently displayed suggestions, possibly behind the input while a
    /// debounced refresh is pending.
    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_count(&self) -> usize {
        pager::page_count(self.listing_len(), self.config.page_size)
    }

    /// Page-number links for the current listing.
    pub fn page_window(&self) -> Vec<usize> {
        pager::page_window(self.current_page, self.page_count())
    }

    /// The current page of the active direction's listing, in dictionary
    /// insertion order.
    pub fn page_items(&self) -> Vec<(&str, &str)> {
        let listing = self.book.map_for(self.source);
        let (start, end) = pager::page_bounds(self.current_page, listing.len(), self.config.page_size);
        listing.iter().skip(start).take(end - start).collect()
    }

    /// Replace the input text, recompute output and alternatives, and
    /// schedule a suggestion refresh. Setting the same text is a no-op.
    pub fn set_input_text(&mut self, text: &str) -> SessionResponse {
        if text == self.input_text {
            return SessionResponse::keep();
        }
        self.input_text = text.to_string();
        self.refresh_output();
        self.request_suggestions()
    }

    /// Change the source language. The target is left alone, matching
    /// the independent language selectors this models.
    pub fn set_source_language(&mut self, language: Language) -> SessionResponse {
        if self.source == language {
            return SessionResponse::keep();
        }
        self.source = language;
        self.rebuild_index();
        self.clamp_page();
        self.refresh_output();
        self.request_suggestions()
    }

    /// Change the target language. Lookup direction follows the source
    /// alone, so the output text does not change here.
    pub fn set_target_language(&mut self, language: Language) -> SessionResponse {
        if self.target == language {
            return SessionResponse::keep();
        }
        self.target = language;
        self.refresh_output();
        self.request_suggestions()
    }

    /// Swap the two languages and carry the previous output over as the
    /// new input, then re-derive everything for the new direction.
    pub fn swap_languages(&mut self) -> SessionResponse {
        std::mem::swap(&mut self.source, &mut self.target);
        self.input_text = std::mem::take(&mut self.output_text);
        self.rebuild_index();
        self.clamp_page();
        self.refresh_output();
        debug!(
            source = %self.source,
            target = %self.target,
            input = %self.input_text,
            "swapped languages"
        );
        self.request_suggestions()
    }

    /// Accept the displayed suggestion at `index`: its text becomes the
    /// input, the dropdown is cleared, and no refresh is scheduled, so a
    /// late query result cannot bring the dropdown back. Returns `None`
    /// for an out-of-range index.
    pub fn select_suggestion(&mut self, index: usize) -> Option<SessionResponse> {
        let item = self.suggestions.get(index)?;
        self.input_text = item.text.clone();
        self.refresh_output();
        self.suggestions.clear();
        Some(SessionResponse::clear())
    }

    /// Jump to a listing page, clamped to the valid range.
    pub fn set_page(&mut self, page: usize) -> SessionResponse {
        self.current_page = page.clamp(1, self.page_count().max(1));
        SessionResponse::keep()
    }

    /// Apply a completed suggestion query. Returns the displayed list,
    /// or `None` when `for_input` no longer matches the session input
    /// (the result is stale and ignored).
    pub fn receive_suggestions(
        &mut self,
        for_input: &str,
        items: Vec<Suggestion>,
    ) -> Option<&[Suggestion]> {
        if for_input != self.input_text {
            debug!(%for_input, current = %self.input_text, "dropped stale suggestions");
            return None;
        }
        self.suggestions = items;
        Some(&self.suggestions)
    }

    /// Swap in a freshly built phrase book (store reload) and re-derive
    /// the whole session state against it.
    pub fn replace_book(&mut self, book: Arc<PhraseBook>) -> SessionResponse {
        self.book = book;
        self.rebuild_index();
        self.clamp_page();
        self.refresh_output();
        debug!(entries = self.book.len(), "replaced phrase book");
        self.request_suggestions()
    }

    fn listing_len(&self) -> usize {
        self.book.map_for(self.source).len()
    }

    fn refresh_output(&mut self) {
        self.output_text = self
            .book
            .translate(self.source, &self.input_text)
            .unwrap_or_default()
            .to_string();
        self.alternatives = self.book.alternatives_for(&self.input_text).to_vec();
    }

    fn rebuild_index(&mut self) {
        self.index = Arc::new(SuggestionIndex::with_threshold(
            &self.book,
            self.source,
            self.config.suggest_threshold,
        ));
    }

    fn clamp_page(&mut self) {
        self.current_page = self.current_page.clamp(1, self.page_count().max(1));
    }

    fn request_suggestions(&mut self) -> SessionResponse {
        if self.input_text.trim().is_empty() {
            self.suggestions.clear();
            return SessionResponse::clear();
        }
        SessionResponse::request(SuggestRequest {
            index: Arc::clone(&self.index),
            input: self.input_text.clone(),
        })
    }
}
