use std::iter::Peekable;
use std::str::Chars;

use crate::rdf::vocab::PIM_STORAGE_TYPE;

/// One `<target>; param=value; ...` entry of a `Link` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LinkValue {
    pub(crate) target: String,
    /// Parameter names are lowercased, values are unquoted.
    pub(crate) params: Vec<(String, String)>,
}

impl LinkValue {
    pub(crate) fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// `rel` may hold several space separated relation types.
    pub(crate) fn has_rel(&self, rel: &str) -> bool {
        self.param("rel")
            .is_some_and(|rels| rels.split_ascii_whitespace().any(|r| r.eq_ignore_ascii_case(rel)))
    }
}

/// Parses a `Link` header value (RFC 8288). Malformed link-values are
/// skipped rather than failing the whole header.
pub(crate) fn parse_link_header(input: &str) -> Vec<LinkValue> {
    let mut links = vec![];
    let mut chars = input.chars().peekable();
    loop {
        skip_whitespace(&mut chars);
        match chars.peek() {
            None => break,
            Some('<') => {
                chars.next();
                let target: String = chars.by_ref().take_while(|&c| c != '>').collect();
                let params = parse_params(&mut chars);
                links.push(LinkValue {
                    target: target.trim().to_string(),
                    params,
                });
            }
            Some(_) => skip_link_value(&mut chars),
        }
    }
    links
}

/// Whether any of the given `Link` header lines types the resource as a
/// pim-space storage.
pub(crate) fn has_storage_type<S: AsRef<str>>(headers: impl IntoIterator<Item = S>) -> bool {
    headers.into_iter().any(|header| {
        parse_link_header(header.as_ref())
            .iter()
            .any(|link| link.target == PIM_STORAGE_TYPE && link.has_rel("type"))
    })
}

fn parse_params(chars: &mut Peekable<Chars>) -> Vec<(String, String)> {
    let mut params = vec![];
    loop {
        skip_whitespace(chars);
        match chars.next() {
            Some(';') => {}
            Some(',') | None => break,
            Some(_) => {
                skip_link_value(chars);
                break;
            }
        }
        skip_whitespace(chars);
        let mut name = String::new();
        while let Some(&c) = chars.peek() {
            if c == '=' || c == ';' || c == ',' || c.is_whitespace() {
                break;
            }
            name.push(c.to_ascii_lowercase());
            chars.next();
        }
        skip_whitespace(chars);
        let mut value = String::new();
        if chars.peek() == Some(&'=') {
            chars.next();
            skip_whitespace(chars);
            if chars.peek() == Some(&'"') {
                chars.next();
                value = parse_quoted_string(chars);
            } else {
                while let Some(&c) = chars.peek() {
                    if c == ';' || c == ',' || c.is_whitespace() {
                        break;
                    }
                    value.push(c);
                    chars.next();
                }
            }
        }
        if !name.is_empty() {
            params.push((name, value));
        }
    }
    params
}

/// Reads up to the closing DQUOTE, honoring backslash escapes.
fn parse_quoted_string(chars: &mut Peekable<Chars>) -> String {
    let mut string = String::new();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    string.push(escaped);
                }
            }
            '"' => break,
            c => string.push(c),
        }
    }
    string
}

/// Skips to the next top-level comma.
fn skip_link_value(chars: &mut Peekable<Chars>) {
    let mut in_quotes = false;
    let mut in_target = false;
    while let Some(c) = chars.next() {
        match c {
            '\\' if in_quotes => {
                chars.next();
            }
            '"' if !in_target => in_quotes = !in_quotes,
            '<' if !in_quotes => in_target = true,
            '>' if !in_quotes => in_target = false,
            ',' if !in_quotes && !in_target => break,
            _ => {}
        }
    }
}

fn skip_whitespace(chars: &mut Peekable<Chars>) {
    while chars.peek().is_some_and(|c| c.is_whitespace()) {
        chars.next();
    }
}
