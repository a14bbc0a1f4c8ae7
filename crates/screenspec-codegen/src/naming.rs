//! Identifier and string literal helpers shared by the backends.

use convert_case::{Case, Casing};
use once_cell::sync::Lazy;
use regex::Regex;

/// Suffix appended to every generated screen component.
pub const SCREEN_SUFFIX: &str = "Screen";

static NON_WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9]+").expect("valid non-word regex"));

/// Component name for a route.
///
/// `/` becomes `HomeScreen`, `/settings/profile` becomes
/// `SettingsProfileScreen` and dynamic segments keep their word, so
/// `/users/[id]` becomes `UsersIdScreen`.
pub fn component_name(route: &str) -> String {
    let stem: String = route
        .split('/')
        .map(|segment| NON_WORD_RE.replace_all(segment, " "))
        .map(|segment| segment.trim().to_case(Case::Pascal))
        .filter(|segment| !segment.is_empty())
        .collect();

    let stem = if stem.is_empty() { "Home".to_string() } else { stem };
    if stem.starts_with(|c: char| c.is_ascii_digit()) {
        format!("Page{stem}{SCREEN_SUFFIX}")
    } else {
        format!("{stem}{SCREEN_SUFFIX}")
    }
}

/// Route path without its leading slash, for directory-per-route layouts.
pub fn route_dir(route: &str) -> String {
    route
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// A JavaScript identifier derived from a node id.
pub fn js_ident(id: &str) -> String {
    let ident = NON_WORD_RE.replace_all(id, " ").trim().to_case(Case::Camel);
    match ident.chars().next() {
        None => "node".to_string(),
        Some(c) if c.is_ascii_digit() => format!("n{ident}"),
        Some(_) => ident,
    }
}

/// Target string literal syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// JavaScript and TypeScript, double quoted.
    Js,
    Swift,
    /// Kotlin, which also interpolates `$`.
    Kotlin,
}

/// Quote and escape `s` as a string literal.
pub fn string_literal(s: &str, dialect: Dialect) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '$' if dialect == Dialect::Kotlin => out.push_str("\\$"),
            c if c.is_control() => match dialect {
                Dialect::Js => out.push_str(&format!("\\u{:04x}", c as u32)),
                Dialect::Swift => out.push_str(&format!("\\u{{{:x}}}", c as u32)),
                Dialect::Kotlin => out.push_str(&format!("\\u{:04x}", c as u32)),
            },
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// JavaScript string literal.
pub fn js_string(s: &str) -> String {
    string_literal(s, Dialect::Js)
}

/// Escape text for a JSX comment or attribute-free position.
pub fn comment_text(s: &str) -> String {
    s.replace("*/", "* /").replace(['\n', '\r'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_name_from_route() {
        assert_eq!(component_name("/"), "HomeScreen");
        assert_eq!(component_name("/settings/profile"), "SettingsProfileScreen");
        assert_eq!(component_name("/users/[id]"), "UsersIdScreen");
        assert_eq!(component_name("/order-history"), "OrderHistoryScreen");
        assert_eq!(component_name("/404"), "Page404Screen");
    }

    #[test]
    fn test_route_dir() {
        assert_eq!(route_dir("/"), "");
        assert_eq!(route_dir("/users/[id]/"), "users/[id]");
    }

    #[test]
    fn test_js_ident() {
        assert_eq!(js_ident("signup-form"), "signupForm");
        assert_eq!(js_ident("3col"), "n3Col");
        assert_eq!(js_ident("--"), "node");
    }

    #[test]
    fn test_string_literal_dialects() {
        assert_eq!(js_string("say \"hi\"\n"), r#""say \"hi\"\n""#);
        assert_eq!(string_literal("$5", Dialect::Kotlin), r#""\$5""#);
        assert_eq!(string_literal("$5", Dialect::Swift), r#""$5""#);
        assert_eq!(string_literal("\u{1}", Dialect::Swift), r#""\u{1}""#);
    }
}
