//! Parsing of property paths.
//!
//! A path string is split on `.`; a list of properties on `,`. Quoted
//! segments may contain the separator:
//!
//! ```text
//! a."b.0".c["d.e.f"]   =>  ["a", "b.0", "c", "d.e.f"]
//! a, "b,0", c["x,y"]   =>  {"a", "b,0", "c[\"x,y\"]"}
//! ```

/// Conversion into an ordered list of property keys.
///
/// Strings are parsed; sequences of strings are taken as already split.
pub trait IntoKeys {
    fn into_keys(self) -> Vec<String>;
}

impl IntoKeys for &str {
    fn into_keys(self) -> Vec<String> {
        parse_path(self)
    }
}

impl IntoKeys for &String {
    fn into_keys(self) -> Vec<String> {
        parse_path(self)
    }
}

impl IntoKeys for String {
    fn into_keys(self) -> Vec<String> {
        parse_path(&self)
    }
}

impl IntoKeys for Vec<String> {
    fn into_keys(self) -> Vec<String> {
        self
    }
}

impl IntoKeys for &[String] {
    fn into_keys(self) -> Vec<String> {
        self.to_vec()
    }
}

impl IntoKeys for Vec<&str> {
    fn into_keys(self) -> Vec<String> {
        self.into_iter().map(str::to_string).collect()
    }
}

impl IntoKeys for &[&str] {
    fn into_keys(self) -> Vec<String> {
        self.iter().map(|k| k.to_string()).collect()
    }
}

impl<const N: usize> IntoKeys for [&str; N] {
    fn into_keys(self) -> Vec<String> {
        self.iter().map(|k| k.to_string()).collect()
    }
}

/// Conversion into a set of property paths, used by `pick` and `omit`.
///
/// Strings are split on `,`; sequences are used as given. Duplicates are
/// dropped, the first occurrence keeps its position.
pub trait IntoProps {
    fn into_props(self) -> Vec<String>;
}

impl IntoProps for &str {
    fn into_props(self) -> Vec<String> {
        parse_props(self)
    }
}

impl IntoProps for &String {
    fn into_props(self) -> Vec<String> {
        parse_props(self)
    }
}

impl IntoProps for String {
    fn into_props(self) -> Vec<String> {
        parse_props(&self)
    }
}

impl IntoProps for Vec<String> {
    fn into_props(self) -> Vec<String> {
        dedup(self)
    }
}

impl IntoProps for &[String] {
    fn into_props(self) -> Vec<String> {
        dedup(self.to_vec())
    }
}

impl IntoProps for Vec<&str> {
    fn into_props(self) -> Vec<String> {
        dedup(self.into_iter().map(str::to_string).collect())
    }
}

impl IntoProps for &[&str] {
    fn into_props(self) -> Vec<String> {
        dedup(self.iter().map(|k| k.to_string()).collect())
    }
}

impl<const N: usize> IntoProps for [&str; N] {
    fn into_props(self) -> Vec<String> {
        dedup(self.iter().map(|k| k.to_string()).collect())
    }
}

/// Splits a dotted/bracketed path into keys.
pub fn split_path(input: impl IntoKeys) -> Vec<String> {
    input.into_keys()
}

/// Splits a comma separated list of paths.
pub fn split_props(input: impl IntoProps) -> Vec<String> {
    input.into_props()
}

/// Joins separator-split pieces back together while a quoted run is open.
struct Segmenter {
    separator: char,
    pending: Option<String>,
}

impl Segmenter {
    fn new(separator: char) -> Self {
        Segmenter {
            separator,
            pending: None,
        }
    }

    /// Feeds the next piece; returns a finished, trimmed and unquoted
    /// segment, or `None` while a quoted run is still open.
    fn feed(&mut self, piece: &str) -> Option<String> {
        let segment = match self.pending.take() {
            Some(mut pending) => {
                pending.push(self.separator);
                pending.push_str(piece);
                if !closes_quote(piece) {
                    self.pending = Some(pending);
                    return None;
                }
                pending
            }
            None if opens_quote(piece) && !closes_quote(piece) => {
                self.pending = Some(piece.to_string());
                return None;
            }
            None => piece.to_string(),
        };
        Some(strip_quotes(segment.trim()).to_string())
    }
}

fn is_quote(c: char) -> bool {
    c == '"' || c == '\''
}

fn opens_quote(piece: &str) -> bool {
    piece.contains("[\"") || piece.contains("['") || piece.trim_start().starts_with(is_quote)
}

fn closes_quote(piece: &str) -> bool {
    piece.contains("\"]") || piece.contains("']") || piece.trim_end().ends_with(is_quote)
}

/// Removes one pair of matching surrounding quotes.
fn strip_quotes(segment: &str) -> &str {
    let bytes = segment.as_bytes();
    if bytes.len() >= 2 && is_quote(bytes[0] as char) && bytes[bytes.len() - 1] == bytes[0] {
        &segment[1..segment.len() - 1]
    } else {
        segment
    }
}

/// Splits a trailing bracket suffix: `name[key]` or `name["key"]`.
fn split_bracket(segment: &str) -> Option<(&str, &str)> {
    let inner = segment.strip_suffix(']')?;
    let open = inner.find('[')?;
    let name = &inner[..open];
    let rest = &inner[open + 1..];
    if name.is_empty() {
        return None;
    }
    let key = match rest.chars().next() {
        Some(q) if is_quote(q) && rest.len() >= 3 && rest.ends_with(q) => &rest[1..rest.len() - 1],
        _ => rest,
    };
    if key.is_empty() {
        return None;
    }
    Some((name, key))
}

fn parse_path(input: &str) -> Vec<String> {
    let mut segmenter = Segmenter::new('.');
    let mut keys = Vec::new();
    for piece in input.split('.') {
        let Some(segment) = segmenter.feed(piece) else {
            continue;
        };
        if segment.is_empty() {
            continue;
        }
        match split_bracket(&segment) {
            Some((name, key)) => {
                keys.push(name.to_string());
                keys.push(key.to_string());
            }
            None => keys.push(segment),
        }
    }
    keys
}

fn parse_props(input: &str) -> Vec<String> {
    let mut segmenter = Segmenter::new(',');
    let props = input
        .split(',')
        .filter_map(|piece| segmenter.feed(piece))
        .filter(|segment| !segment.is_empty())
        .collect();
    dedup(props)
}

fn dedup(props: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    props
        .into_iter()
        .filter(|prop| seen.insert(prop.clone()))
        .collect()
}
