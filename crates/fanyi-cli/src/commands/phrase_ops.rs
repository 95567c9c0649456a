use std::path::Path;
use std::process;

use fanyi_core::dictionary::{Language, PhraseBook};
use fanyi_core::store::{PhrasePair, PhraseStore, StoreError};
use fanyi_core::suggest::{SuggestionIndex, DEFAULT_LIMIT};
use fanyi_session::pager;
use unicode_width::UnicodeWidthStr;

use crate::client::ApiClient;
use crate::commands::pad_to;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

fn source_language(from_chinese: bool) -> Language {
    if from_chinese {
        Language::Chinese
    } else {
        Language::English
    }
}

/// The dictionary to run against: a local CSV when `--store` is given,
/// otherwise the server with the builtin fallback.
fn resolve_book(client: &ApiClient, store: Option<&Path>) -> PhraseBook {
    match store {
        Some(path) => {
            let store = die!(PhraseStore::load(path), "Error reading store: {}");
            PhraseBook::from_pairs(store.pairs())
        }
        None => client.fetch_book_or_builtin(),
    }
}

pub fn translate(client: &ApiClient, store: Option<&Path>, text: &str, from_chinese: bool) {
    let book = resolve_book(client, store);
    let source = source_language(from_chinese);
    match book.translate(source, text) {
        Some(output) => {
            println!("{output}");
            let alternatives = book.alternatives_for(text);
            if !alternatives.is_empty() {
                println!("---");
                for alt in alternatives {
                    println!("{}\t{}", alt.text, alt.translation);
                }
            }
        }
        None => {
            eprintln!("No translation for: {text}");
            let index = SuggestionIndex::build(&book, source);
            let hits = index.query(text, DEFAULT_LIMIT);
            if !hits.is_empty() {
                eprintln!("Closest matches:");
                for hit in &hits {
                    eprintln!("  {} → {}", hit.text, hit.translation);
                }
            }
            process::exit(1);
        }
    }
}

pub fn suggest(
    client: &ApiClient,
    store: Option<&Path>,
    text: &str,
    from_chinese: bool,
    limit: usize,
) {
    let book = resolve_book(client, store);
    let index = SuggestionIndex::build(&book, source_language(from_chinese));
    let hits = index.query(text, limit);
    if hits.is_empty() {
        println!("(no matches)");
        return;
    }
    for hit in &hits {
        println!("{:.2}  {} → {}", hit.score, hit.text, hit.translation);
    }
}

pub fn add(client: &ApiClient, english: &str, chinese: &str) {
    let response = die!(client.add(english, chinese), "Error calling server: {}");
    if response.success {
        println!(
            "{}",
            response.message.unwrap_or_else(|| "Added".to_string())
        );
    } else {
        eprintln!(
            "{}",
            response.error.unwrap_or_else(|| "add failed".to_string())
        );
        process::exit(1);
    }
}

/// Append straight to a local CSV store, no server involved.
pub fn add_local(store_path: &Path, english: &str, chinese: &str) {
    let pair = die!(PhrasePair::new(english, chinese), "Invalid phrase: {}");
    let mut store = if store_path.exists() {
        die!(PhraseStore::load(store_path), "Error reading store: {}")
    } else {
        die!(
            PhraseStore::create(store_path, Vec::new()),
            "Error creating store: {}"
        )
    };
    match store.append(pair) {
        Ok(()) => println!("Added: {english} → {chinese}"),
        Err(StoreError::Duplicate) => println!("Already exists: {english} → {chinese}"),
        Err(e) => {
            eprintln!("Error appending: {e}");
            process::exit(1);
        }
    }
}

pub fn list(
    client: &ApiClient,
    store: Option<&Path>,
    from_chinese: bool,
    page: usize,
    per_page: usize,
) {
    let book = resolve_book(client, store);
    let listing = book.map_for(source_language(from_chinese));
    if listing.is_empty() {
        println!("(empty)");
        return;
    }
    let pages = pager::page_count(listing.len(), per_page);
    let page = page.clamp(1, pages.max(1));
    let (start, end) = pager::page_bounds(page, listing.len(), per_page);
    let items: Vec<(&str, &str)> = listing.iter().skip(start).take(end - start).collect();

    let width = items
        .iter()
        .map(|(key, _)| UnicodeWidthStr::width(*key))
        .max()
        .unwrap_or(0);
    for (key, value) in &items {
        println!("{}  {}", pad_to(key, width), value);
    }
    println!("---");
    println!("page {page}/{pages}, {} entries", listing.len());
}
