//! Flat-file phrase store.
//!
//! Persists `(english, chinese)` pairs as a two-column CSV with a header
//! row. The whole file is rewritten on every append; there is no file
//! locking, so concurrent writers can lose an append. Single tear-free
//! writes come from the tmp-then-rename save.


use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

pub const CSV_HEADER: &str = "english,chinese";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid {field} phrase: {reason}")]
    InvalidPhrase {
        field: &'static str,
        reason: &'static str,
    },

    #[error("translation already exists")]
    Duplicate,
}

/// One validated store record: both sides trimmed, non-empty, single-line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhrasePair {
    pub english: String,
    pub chinese: String,
}

impl PhrasePair {
    /// Validate and normalize a raw pair. This is the only constructor,
    /// so every `PhrasePair` in the system satisfies the record rules.
    pub fn new(english: &str, chinese: &str) -> Result<Self, StoreError> {
        Ok(Self {
            english: clean_phrase("english", english)?,
            chinese: clean_phrase("chinese", chinese)?,
        })
    }
}

fn clean_phrase(field: &'static str, raw: &str) -> Result<String, StoreError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(StoreError::InvalidPhrase {
            field,
            reason: "must not be empty",
        });
    }
    if value.contains(['\r', '\n']) {
        return Err(StoreError::InvalidPhrase {
            field,
            reason: "must not contain line breaks",
        });
    }
    Ok(value.to_string())
}

/// The phrase store: an in-memory record list bound to its CSV file.
#[derive(Debug)]
pub struct PhraseStore {
    path: PathBuf,
    pairs: Vec<PhrasePair>,
}

impl PhraseStore {
    /// Load a store from `path`.
    ///
    /// The first non-blank line is the column header and is skipped.
    /// Rows that fail to parse or validate are skipped; blank lines are
    /// ignored. An unreadable file (including a missing one) is an error,
    /// so a misconfigured path surfaces instead of reading as empty.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let content = fs::read_to_string(path)?;
        let mut pairs = Vec::new();
        let mut rows = 0u64;
        let mut skipped = 0u64;
        let mut saw_header = false;

        for line in content.lines() {
            if line.trim().is_empty() {
                continue;
            }
            if !saw_header {
                saw_header = true;
                continue;
            }
            rows += 1;
            let Some(pair) = parse_row(line) else {
                skipped += 1;
                continue;
            };
            pairs.push(pair);
        }

        if skipped > 0 {
            debug!(skipped, rows, path = %path.display(), "skipped malformed store rows");
        }
        Ok(Self {
            path: path.to_path_buf(),
            pairs,
        })
    }

    /// Write `pairs` to a fresh store at `path`, replacing any existing file.
    pub fn create(path: &Path, pairs: Vec<PhrasePair>) -> Result<Self, StoreError> {
        let store = Self {
            path: path.to_path_buf(),
            pairs,
        };
        store.save()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn pairs(&self) -> &[PhrasePair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// A pair is a duplicate when either column matches an existing record
    /// exactly. Matching one direction is enough: the dictionary maps each
    /// column to the other, so a half-matching pair would shadow an entry.
    pub fn is_duplicate(&self, pair: &PhrasePair) -> bool {
        self.pairs
            .iter()
            .any(|p| p.english == pair.english || p.chinese == pair.chinese)
    }

    /// Append one record and rewrite the file.
    ///
    /// Returns `StoreError::Duplicate` without touching the file if either
    /// column already exists. On a failed write the in-memory list is
    /// rolled back so the store still mirrors the file.
    pub fn append(&mut self, pair: PhrasePair) -> Result<(), StoreError> {
        if self.is_duplicate(&pair) {
            return Err(StoreError::Duplicate);
        }
        self.pairs.push(pair);
        if let Err(e) = self.save() {
            self.pairs.pop();
            return Err(e);
        }
        Ok(())
    }

    /// Full rewrite: serialize all records, write to `.tmp`, rename over
    /// the store file.
    pub fn save(&self) -> Result<(), StoreError> {
        let tmp = self.path.with_extension("tmp");
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&tmp, self.to_csv())?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn to_csv(&self) -> String {
        let mut out = String::with_capacity(self.pairs.len() * 32 + CSV_HEADER.len() + 1);
        out.push_str(CSV_HEADER);
        out.push('\n');
        for pair in &self.pairs {
            write_field(&mut out, &pair.english);
            out.push(',');
            write_field(&mut out, &pair.chinese);
            out.push('\n');
        }
        out
    }
}

/// Parse one data row into a validated pair. `None` means skip the row:
/// wrong column count, broken quoting, or a value that fails validation.
fn parse_row(line: &str) -> Option<PhrasePair> {
    let fields = split_record(line)?;
    let [english, chinese] = fields.as_slice() else {
        return None;
    };
    PhrasePair::new(english, chinese).ok()
}

/// Split one CSV record into fields, honoring double-quote escaping:
/// a field starting with `"` runs to the closing quote, `""` inside is a
/// literal quote, and commas inside quotes do not split. Returns `None`
/// on an unterminated quote.
fn split_record(line: &str) -> Option<Vec<String>> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
        } else {
            match c {
                '"' if field.is_empty() => in_quotes = true,
                ',' => fields.push(std::mem::take(&mut field)),
                _ => field.push(c),
            }
        }
    }

    if in_quotes {
        return None;
    }
    fields.push(field);
    Some(fields)
}

/// Append one field to `out`, quoting only when the value needs it.
fn write_field(out: &mut String, field: &str) {
    if field.contains([',', '"', '\r', '\n']) {
        out.push('"');
        for c in field.chars() {
            if c == '"' {
                out.push('"');
            }
            out.push(c);
        }
        out.push('"');
    } else {
        out.push_str(field);
    }
}
