//! Start-case conversion for section and level labels.
//!
//! `getting-started` becomes `Getting Started`, `apiReference` becomes
//! `Api Reference`. Words are split on:
//! - any non-alphanumeric character (`-`, `_`, spaces, dots)
//! - a lowercase letter followed by an uppercase one (`fooBar`)
//! - the end of an acronym that runs into a word (`XMLHttp` -> `XML`, `Http`)
//! - a change between letters and digits (`chapter1`), except for ordinal
//!   suffixes (`1st`, `2nd`, `3rd`, `4th`)
//!
//! Apostrophes are dropped without splitting (`don't` -> `Dont`). Only the
//! first character of each word is upper-cased; the rest is kept as written
//! so acronyms survive. Accented letters are kept as they are.

const APOSTROPHES: [char; 2] = ['\'', '\u{2019}'];

const ORDINAL_SUFFIXES: [&str; 4] = ["st", "nd", "rd", "th"];

/// Split a path segment into words.
pub fn split_words(input: &str) -> Vec<String> {
    let chars: Vec<char> = input.chars().filter(|c| !APOSTROPHES.contains(c)).collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            flush(&mut words, &mut current);
            continue;
        }

        if let Some(prev) = current.chars().last() {
            let next = chars.get(i + 1).copied();
            let camel = prev.is_lowercase() && c.is_uppercase();
            let acronym_end = prev.is_uppercase()
                && c.is_uppercase()
                && next.is_some_and(|n| n.is_lowercase());
            let ordinal = prev.is_numeric() && is_ordinal_suffix(&chars[i..]);
            let digit_change = prev.is_numeric() != c.is_numeric() && !ordinal;

            if camel || acronym_end || digit_change {
                flush(&mut words, &mut current);
            }
        }

        current.push(c);
    }
    flush(&mut words, &mut current);

    words
}

/// Whether `rest` starts with an ordinal suffix that ends the word.
fn is_ordinal_suffix(rest: &[char]) -> bool {
    let Some(suffix) = rest.get(..2) else {
        return false;
    };
    let suffix: String = suffix.iter().flat_map(|c| c.to_lowercase()).collect();
    ORDINAL_SUFFIXES.contains(&suffix.as_str()) && !rest.get(2).is_some_and(|c| c.is_lowercase())
}

fn flush(words: &mut Vec<String>, current: &mut String) {
    if !current.is_empty() {
        words.push(std::mem::take(current));
    }
}

/// Convert a path segment to a capitalized, space-separated label.
pub fn title_case(input: &str) -> String {
    split_words(input)
        .iter()
        .map(|word| capitalize(word))
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
