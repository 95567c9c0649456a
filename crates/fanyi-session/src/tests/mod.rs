
use std::sync::Arc;

use fanyi_core::builtin::builtin_book;
use fanyi_core::dictionary::PhraseBook;
use fanyi_core::suggest::DEFAULT_LIMIT;

use super::{SessionConfig, SessionResponse, TranslationSession};

pub(super) fn make_test_book() -> Arc<PhraseBook> {
    Arc::new(builtin_book())
}

pub(super) fn make_session() -> TranslationSession {
    TranslationSession::new(make_test_book(), SessionConfig::default())
}

// Helper: fulfil a pending suggest request synchronously, the way the
// worker would after its debounce.
pub(super) fn deliver(session: &mut TranslationSession, response: &SessionResponse) {
    if let Some(request) = &response.suggest_request {
        let items = request.index.query(&request.input, DEFAULT_LIMIT);
        session.receive_suggestions(&request.input, items);
    }
}
