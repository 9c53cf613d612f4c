//! Identifier decomposition into word tokens.
//!
//! Splits `PascalCase`, `camelCase` and `snake_case` identifiers into words
//! while keeping acronym runs together:
//!
//! ```
//! use docfill::naming::decompose;
//!
//! assert_eq!(decompose("XMLDocument"), vec!["XML", "Document"]);
//! assert_eq!(decompose("getHTTPResponse2"), vec!["get", "HTTP", "Response2"]);
//! ```
//!
//! Casing is preserved; the phrase layer decides how words are rendered.

/// Ordered word fragments of an identifier.
///
/// Tokens borrow nothing from the source identifier so they can outlive it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NameTokens(Vec<String>);

impl NameTokens {
    /// Decomposes `identifier` into tokens.
    pub fn parse(identifier: &str) -> Self {
        Self(decompose(identifier))
    }

    /// Wraps an already-split token list.
    pub fn from_words(words: Vec<String>) -> Self {
        Self(words)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn words(&self) -> &[String] {
        &self.0
    }

    pub fn first(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// Tokens after a leading word equal to `prefix` (case-insensitive).
    ///
    /// Returns `None` unless the prefix matches AND at least one token remains,
    /// so `Get` alone never counts as a `Get…` name.
    pub fn strip_prefix(&self, prefix: &str) -> Option<NameTokens> {
        match self.0.split_first() {
            Some((head, rest)) if !rest.is_empty() && head.eq_ignore_ascii_case(prefix) => {
                Some(Self(rest.to_vec()))
            }
            _ => None,
        }
    }

    /// Tokens before a trailing word equal to `suffix` (case-insensitive).
    ///
    /// Same non-empty-remainder rule as [`NameTokens::strip_prefix`].
    pub fn strip_suffix(&self, suffix: &str) -> Option<NameTokens> {
        match self.0.split_last() {
            Some((tail, rest)) if !rest.is_empty() && tail.eq_ignore_ascii_case(suffix) => {
                Some(Self(rest.to_vec()))
            }
            _ => None,
        }
    }

    /// Renders the tokens as lower-case prose.
    ///
    /// Multi-letter words are lower-cased; all-uppercase acronyms ("XML") and
    /// single letters ("X") keep their casing.
    pub fn humanize(&self) -> String {
        self.0
            .iter()
            .map(|word| humanize_word(word))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl std::fmt::Display for NameTokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.join(" "))
    }
}

/// Splits an identifier into words.
///
/// Rules:
/// - a new word opens before an uppercase letter unless the previous letter is
///   also uppercase;
/// - an uppercase run of two or more followed by a lowercase letter gives its
///   last capital to the next word (`HTTPRequest` → `HTTP`, `Request`);
/// - digits stay with the word before them;
/// - `_` and any other non-alphanumeric character separate words and are dropped.
///
/// Empty input yields no tokens. Input without any alphanumeric character is
/// returned unchanged as a single token.
pub fn decompose(identifier: &str) -> Vec<String> {
    if identifier.is_empty() {
        return Vec::new();
    }

    let chars: Vec<char> = identifier.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (idx, &ch) in chars.iter().enumerate() {
        if !ch.is_alphanumeric() {
            flush(&mut current, &mut words);
            continue;
        }

        if ch.is_uppercase() && !current.is_empty() {
            let prev = chars[idx - 1];
            let next_is_lower = chars.get(idx + 1).is_some_and(|c| c.is_lowercase());
            // A fresh capital after a lowercase letter or digit, or the last
            // capital of an acronym run that starts the next word.
            if !prev.is_uppercase() || next_is_lower {
                flush(&mut current, &mut words);
            }
        }

        current.push(ch);
    }
    flush(&mut current, &mut words);

    if words.is_empty() {
        return vec![identifier.to_string()];
    }
    words
}

fn flush(current: &mut String, words: &mut Vec<String>) {
    if !current.is_empty() {
        words.push(std::mem::take(current));
    }
}

/// Lower-cases a word unless it is an acronym or a single letter.
pub fn humanize_word(word: &str) -> String {
    let letters = word.chars().filter(|c| c.is_alphabetic()).count();
    let is_acronym = letters >= 2
        && word
            .chars()
            .filter(|c| c.is_alphabetic())
            .all(char::is_uppercase);
    if letters <= 1 || is_acronym {
        word.to_string()
    } else {
        word.to_lowercase()
    }
}
