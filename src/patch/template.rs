//! `{{file}}` and `{{function}}` placeholders in titles and descriptions.
//!
//! A placeholder that cannot be filled is removed together with the word
//! that introduces it, so `"Remove unused variable in {{function}}"` reads
//! `"Remove unused variable"` when the diff touches several functions.

use std::ops::Range;

use crate::infer::FunctionNameList;

const FILE: &str = "file";
const FUNCTION: &str = "function";

/// What the changed path looks like to the templates.
#[derive(Debug, Clone, Copy)]
pub struct TemplateTarget<'a> {
    pub is_dir: bool,
    pub file_name: &'a str,
}

/// Expand the placeholders of `template`.
///
/// `functions` is only called when the template has a `{{function}}`
/// placeholder. Unknown placeholders are left untouched.
pub fn substitute<F>(template: &str, target: TemplateTarget<'_>, functions: F) -> String
where
    F: FnOnce() -> FunctionNameList,
{
    if placeholders(template).next().is_none() {
        return template.to_string();
    }

    let value = if target.is_dir {
        resolve(template, FILE, None, &["from"])
    } else {
        resolve(template, FILE, Some(target.file_name), &[])
    };

    if !has_placeholder(&value, FUNCTION) {
        return value;
    }
    let functions = functions();
    match functions.single() {
        Some(function) => resolve(&value, FUNCTION, Some(function), &[]),
        None => resolve(&value, FUNCTION, None, &["of", "in"]),
    }
}

/// Byte ranges and trimmed names of every `{{ name }}` in `text`.
fn placeholders(text: &str) -> impl Iterator<Item = (Range<usize>, &str)> + '_ {
    let mut pos = 0;
    std::iter::from_fn(move || {
        loop {
            let first = pos + text.get(pos..)?.find("{{")?;
            let close = first + 2 + text[first + 2..].find("}}")?;
            // The innermost `{{` before the closing braces opens the placeholder.
            let open = first + text[first..close].rfind("{{").unwrap_or(0);
            let inner = &text[open + 2..close];
            if inner.contains('}') {
                pos = open + 1;
                continue;
            }
            pos = close + 2;
            return Some((open..close + 2, inner.trim()));
        }
    })
}

fn has_placeholder(text: &str, name: &str) -> bool {
    placeholders(text).any(|(_, found)| found == name)
}

/// Replace each `name` placeholder with `replacement`, or drop it along with
/// a preceding `<space>word<space>` for the first matching word.
fn resolve(text: &str, name: &str, replacement: Option<&str>, elided_words: &[&str]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for (range, found) in placeholders(text) {
        if found != name {
            continue;
        }
        out.push_str(&text[last..range.start]);
        match replacement {
            Some(value) => out.push_str(value),
            None => {
                if let Some(cut) = elided_words.iter().find_map(|w| word_prefix_start(&out, w)) {
                    out.truncate(cut);
                }
            }
        }
        last = range.end;
    }
    out.push_str(&text[last..]);
    out
}

/// Start of a trailing `<whitespace>+word<whitespace>*` in `text`.
fn word_prefix_start(text: &str, word: &str) -> Option<usize> {
    let before_word = text.trim_end().strip_suffix(word)?;
    let start = before_word.trim_end().len();
    (start < before_word.len()).then_some(start)
}
