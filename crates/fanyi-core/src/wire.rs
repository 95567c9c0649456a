//! Wire types for the translations API, shared by the server and the
//! CLI client so both sides agree on field names and message strings.

use serde::{Deserialize, Serialize};

use crate::dictionary::{AlternativeMap, PhraseBook, PhraseMap};

pub const ERR_MISSING_FIELDS: &str = "Both English and Chinese translations are required";
pub const ERR_DUPLICATE: &str = "Translation already exists";
pub const MSG_ADDED: &str = "Translation added successfully";

/// Both direction maps as they appear under `"translations"`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranslationMaps {
    pub english_to_chinese: PhraseMap,
    pub chinese_to_english: PhraseMap,
}

/// Body of `GET /api/translations`. Success carries the maps and the
/// alternatives index; failure carries only `error`.
#[derive(Debug, Serialize, Deserialize)]
pub struct TranslationsResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translations: Option<TranslationMaps>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternatives: Option<AlternativeMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TranslationsResponse {
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            translations: None,
            alternatives: None,
            error: Some(error.into()),
        }
    }

    /// Rebuild a `PhraseBook` from a successful response. `None` when the
    /// response reports failure or lacks the maps.
    pub fn into_book(self) -> Option<PhraseBook> {
        if !self.success {
            return None;
        }
        let maps = self.translations?;
        Some(PhraseBook {
            forward: maps.english_to_chinese,
            reverse: maps.chinese_to_english,
            alternatives: self.alternatives.unwrap_or_default(),
        })
    }
}

impl From<PhraseBook> for TranslationsResponse {
    fn from(book: PhraseBook) -> Self {
        Self {
            success: true,
            translations: Some(TranslationMaps {
                english_to_chinese: book.forward,
                chinese_to_english: book.reverse,
            }),
            alternatives: Some(book.alternatives),
            error: None,
        }
    }
}

/// Body of `POST /api/translations/add`. Absent fields deserialize as
/// empty strings and fail the same presence check as explicit empties.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddRequest {
    #[serde(default)]
    pub english: String,
    #[serde(default)]
    pub chinese: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AddResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AddResponse {
    pub fn added() -> Self {
        Self {
            success: true,
            message: Some(MSG_ADDED.to_string()),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::builtin_book;
    use crate::dictionary::Language;

    #[test]
    fn success_response_has_no_error_key() {
        let resp = TranslationsResponse::from(builtin_book());
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["success"], true);
        assert!(json.get("error").is_none());
        assert_eq!(json["translations"]["english_to_chinese"]["Hello"], "你好");
        assert_eq!(json["translations"]["chinese_to_english"]["你好"], "Hello");
        assert_eq!(json["alternatives"]["Hello"][1]["text"], "您好");
    }

    #[test]
    fn failure_response_has_only_error() {
        let json = serde_json::to_value(TranslationsResponse::failure("boom")).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "boom");
        assert!(json.get("translations").is_none());
        assert!(json.get("alternatives").is_none());
    }

    #[test]
    fn response_round_trips_to_book() {
        let resp = TranslationsResponse::from(builtin_book());
        let json = serde_json::to_string(&resp).unwrap();
        let parsed: TranslationsResponse = serde_json::from_str(&json).unwrap();
        let book = parsed.into_book().unwrap();
        assert_eq!(book.translate(Language::English, "I love you"), Some("我爱你"));
        assert_eq!(book.alternatives_for("Thank you").len(), 3);
    }

    #[test]
    fn failure_response_yields_no_book() {
        assert!(TranslationsResponse::failure("down").into_book().is_none());
    }

    #[test]
    fn add_request_defaults_missing_fields_to_empty() {
        let req: AddRequest = serde_json::from_str(r#"{"english":"Hi"}"#).unwrap();
        assert_eq!(req.english, "Hi");
        assert_eq!(req.chinese, "");
    }

    #[test]
    fn add_response_messages() {
        let json = serde_json::to_value(AddResponse::added()).unwrap();
        assert_eq!(json["message"], "Translation added successfully");
        assert!(json.get("error").is_none());

        let json = serde_json::to_value(AddResponse::failure(ERR_DUPLICATE)).unwrap();
        assert_eq!(json["error"], "Translation already exists");
        assert!(json.get("message").is_none());
    }
}
