//! Compiled-in fallback dictionary.
//!
//! Clients fall back to this phrase book when the translations endpoint
//! is unreachable or reports an error, so basic lookups keep working
//! without the server. Its alternatives table is richer than the
//! store-built one, which only echoes the stored pair.

use crate::dictionary::{Alternative, AlternativeMap, PhraseBook};

pub const BUILTIN_PAIRS: [(&str, &str); 10] = [
    ("How are you?", "你好吗？"),
    ("Hello", "你好"),
    ("Thank you", "谢谢"),
    ("Good morning", "早上好"),
    ("Good night", "晚安"),
    ("I love you", "我爱你"),
    ("What is your name?", "你叫什么名字？"),
    ("Where are you from?", "你从哪里来？"),
    ("I don't understand", "我不明白"),
    ("Please speak slowly", "请说慢一点"),
];

/// Build the fallback phrase book.
pub fn builtin_book() -> PhraseBook {
    let mut book = PhraseBook::build(
        BUILTIN_PAIRS.map(|(english, chinese)| (english.to_string(), chinese.to_string())),
    );
    book.alternatives = builtin_alternatives();
    book
}

fn alt(text: &str, translation: &str) -> Alternative {
    Alternative {
        text: text.to_string(),
        translation: translation.to_string(),
    }
}

fn builtin_alternatives() -> AlternativeMap {
    let mut map = AlternativeMap::new();
    map.insert(
        "How are you?".to_string(),
        vec![
            alt("你好吗？", "How are you?"),
            alt("你怎么样？", "How are you? How do you do?"),
            alt("你还好吗？", "How are you? How are you doing?"),
            alt("最近如何？", "How are you getting on? How is it going?"),
            alt(
                "你过得怎么样？",
                "What's up? How are things? How are you? How do you do?",
            ),
        ],
    );
    map.insert(
        "Hello".to_string(),
        vec![
            alt("你好", "Hello"),
            alt("您好", "Hello (formal)"),
            alt("大家好", "Hello everyone"),
        ],
    );
    map.insert(
        "Thank you".to_string(),
        vec![
            alt("谢谢", "Thank you"),
            alt("谢谢你", "Thank you (to you specifically)"),
            alt("非常感谢", "Thank you very much"),
        ],
    );
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::Language;

    #[test]
    fn builtin_book_covers_both_directions() {
        let book = builtin_book();
        assert_eq!(book.len(), 10);
        assert_eq!(book.reverse.len(), 10);
        assert_eq!(book.translate(Language::English, "Good night"), Some("晚安"));
        assert_eq!(
            book.translate(Language::Chinese, "请说慢一点"),
            Some("Please speak slowly")
        );
    }

    #[test]
    fn builtin_alternatives_are_richer_than_store_built() {
        let book = builtin_book();
        assert_eq!(book.alternatives_for("How are you?").len(), 5);
        assert_eq!(book.alternatives_for("Hello").len(), 3);
        assert_eq!(book.alternatives_for("Thank you").len(), 3);
        assert!(book.alternatives_for("Good morning").is_empty());
    }
}
