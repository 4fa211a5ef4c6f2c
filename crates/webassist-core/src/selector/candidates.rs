//! Ordered, de-duplicated selector candidates with validity filtering.

use std::collections::HashSet;

use tracing::debug;

/// Ordered, de-duplicated list of selectors tried in sequence.
///
/// Every entry has passed [`is_valid`]. Malformed input is repaired in
/// place when possible and dropped otherwise; valid entries keep their
/// relative order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectorCandidateSet {
    selectors: Vec<String>,
    seen: HashSet<String>,
}

impl SelectorCandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw strings, repairing or dropping malformed entries.
    pub fn from_raw<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        set.extend_raw(raw);
        set
    }

    /// Add one selector. Returns false when it was dropped or already present.
    pub fn push(&mut self, raw: &str) -> bool {
        let Some(selector) = repair(raw).filter(|s| is_valid(s)) else {
            if !raw.trim().is_empty() {
                debug!("Dropping malformed selector: {}", raw);
            }
            return false;
        };

        if !self.seen.insert(selector.clone()) {
            return false;
        }
        self.selectors.push(selector);
        true
    }

    pub fn extend_raw<I, S>(&mut self, raw: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for selector in raw {
            self.push(selector.as_ref());
        }
    }

    /// Append another set after this one, keeping first-seen order.
    pub fn append(&mut self, other: SelectorCandidateSet) {
        for selector in other.selectors {
            if self.seen.insert(selector.clone()) {
                self.selectors.push(selector);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    pub fn contains(&self, selector: &str) -> bool {
        self.seen.contains(selector)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.selectors.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.selectors
    }

    pub fn into_vec(self) -> Vec<String> {
        self.selectors
    }
}

impl<S: AsRef<str>> FromIterator<S> for SelectorCandidateSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_raw(iter)
    }
}

/// Whether `selector` is well formed enough to hand to the page driver.
///
/// Rejects empty strings, non-CSS leading characters (XPath included),
/// unbalanced brackets, parentheses and quotes, and IDs or classes that
/// start with a digit.
pub fn is_valid(selector: &str) -> bool {
    let selector = selector.trim();
    let Some(first) = selector.chars().next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || matches!(first, '#' | '.' | '[' | '*' | ':')) {
        return false;
    }

    let chars: Vec<char> = selector.chars().collect();
    let mut stack: Vec<char> = Vec::new();
    let mut quote: Option<char> = None;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c == '\\' {
            i += 2;
            continue;
        }
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            i += 1;
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '[' | '(' => stack.push(c),
            ']' => {
                if stack.pop() != Some('[') {
                    return false;
                }
            }
            ')' => {
                if stack.pop() != Some('(') {
                    return false;
                }
            }
            '#' | '.' if stack.is_empty() => match chars.get(i + 1) {
                Some(next) if next.is_ascii_digit() => return false,
                None => return false,
                _ => {}
            },
            _ => {}
        }
        i += 1;
    }

    quote.is_none() && stack.is_empty()
}

/// Best-effort rewrite of a malformed selector.
///
/// `:contains(` becomes `:has-text(` and numeric-leading IDs become
/// attribute selectors (`tr#123` to `tr[id="123"]`). Returns `None` for
/// blank input. The result may still be invalid; callers check it with
/// [`is_valid`].
pub fn repair(selector: &str) -> Option<String> {
    let trimmed = selector.trim();
    if trimmed.is_empty() {
        return None;
    }
    let rewritten = trimmed.replace(":contains(", ":has-text(");
    Some(rewrite_numeric_ids(&rewritten))
}

fn rewrite_numeric_ids(selector: &str) -> String {
    let chars: Vec<char> = selector.chars().collect();
    let mut out = String::with_capacity(selector.len() + 8);
    let mut quote: Option<char> = None;
    let mut brackets = 0usize;
    let mut parens = 0usize;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '\\' {
            out.push(c);
            if let Some(next) = chars.get(i + 1) {
                out.push(*next);
            }
            i += 2;
            continue;
        }

        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            out.push(c);
            i += 1;
            continue;
        }

        match c {
            '"' | '\'' => quote = Some(c),
            '[' => brackets += 1,
            ']' => brackets = brackets.saturating_sub(1),
            '(' => parens += 1,
            ')' => parens = parens.saturating_sub(1),
            '#' if brackets == 0 && parens == 0 && chars.get(i + 1).is_some_and(|n| n.is_ascii_digit()) => {
                let start = i + 1;
                let mut end = start;
                while end < chars.len()
                    && (chars[end].is_ascii_alphanumeric() || matches!(chars[end], '-' | '_'))
                {
                    end += 1;
                }
                let id: String = chars[start..end].iter().collect();
                out.push_str(&format!("[id=\"{}\"]", id));
                i = end;
                continue;
            }
            _ => {}
        }

        out.push(c);
        i += 1;
    }

    out
}

#[cfg(test)]
#[path = "candidates_tests.rs"]
mod tests;
