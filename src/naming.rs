//! Identifier conventions shared by both lowering engines.
use serde::{Deserialize, Serialize};

const GO_KEYWORDS: &[&str] = &[
    "break", "case", "chan", "const", "continue", "default", "defer", "else",
    "fallthrough", "for", "func", "go", "goto", "if", "import", "interface",
    "map", "package", "range", "return", "select", "struct", "switch", "type", "var",
];

/// `Get*` methods that keep their prefix under [`NameStyle::Idiomatic`].
const GET_EXCEPTIONS: &[&str] = &["GetScale"];

pub fn is_go_keyword(name: &str) -> bool {
    GO_KEYWORDS.contains(&name)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NameStyle {
    /// `getPosition` → `GetPosition`
    #[default]
    Verbatim,
    /// `getPosition` → `Position`, `create` → `New…`, `destroy` → `Free…`
    Idiomatic,
}

pub fn strip_prefix<'a>(name: &'a str, prefix: &str) -> &'a str {
    name.strip_prefix(prefix).unwrap_or(name)
}

/// Split on separators and case boundaries. Digits stay with the word they
/// follow (`Vector2i` is one word).
fn split_words(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut words = Vec::new();
    let mut cur = String::new();
    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !cur.is_empty() { words.push(std::mem::take(&mut cur)); }
            continue;
        }
        if c.is_uppercase() && !cur.is_empty() {
            let prev = chars[i - 1];
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            // fooBar | HTTPServer (split before the `S`)
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_lower) {
                words.push(std::mem::take(&mut cur));
            }
        }
        cur.push(c);
    }
    if !cur.is_empty() { words.push(cur); }
    words
}

pub fn pascal_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for word in split_words(s) {
        let mut cs = word.chars();
        if let Some(first) = cs.next() {
            out.extend(first.to_uppercase());
            out.push_str(&cs.as_str().to_lowercase());
        }
    }
    out
}

pub fn camel_case(s: &str) -> String {
    let pascal = pascal_case(s);
    let mut cs = pascal.chars();
    match cs.next() {
        Some(first) => first.to_lowercase().chain(cs).collect(),
        None => pascal,
    }
}

/// Target-side name of a native declaration: prefix stripped, PascalCased.
pub fn target_type_name(native: &str, prefix: &str) -> String {
    pascal_case(strip_prefix(native, prefix))
}

pub fn method_name(native_method: &str, style: NameStyle) -> String {
    let pascal = pascal_case(native_method);
    match style {
        NameStyle::Verbatim => pascal,
        NameStyle::Idiomatic => idiomatic(pascal),
    }
}

fn idiomatic(pascal: String) -> String {
    if pascal.contains("Create") {
        return format!("New{}", pascal.replace("Create", ""));
    }
    if let Some(rest) = pascal.strip_suffix("Destroy") {
        return format!("Free{rest}");
    }
    if let Some(rest) = pascal.strip_prefix("Get") {
        if rest.starts_with(|c: char| c.is_ascii_uppercase()) && !GET_EXCEPTIONS.contains(&pascal.as_str()) {
            return rest.to_string();
        }
    }
    pascal
}

/// A usable Go parameter name. Anonymous parameters become `arg<i>`.
pub fn param_name(native: &str, index: usize) -> String {
    if native.is_empty() {
        return format!("arg{index}");
    }
    if is_go_keyword(native) {
        return format!("{native}_");
    }
    if native.starts_with(|c: char| c.is_ascii_digit()) {
        return format!("_{native}");
    }
    native.to_string()
}

/// How cgo spells a C struct member from Go: keywords get a leading `_`.
pub fn cgo_field(native: &str) -> String {
    if is_go_keyword(native) { format!("_{native}") } else { native.to_string() }
}

/// Single-letter receiver variable, e.g. `r` for `RenderWindow`.
pub fn receiver_var(type_name: &str) -> String {
    type_name
        .chars()
        .next()
        .map(|c| c.to_lowercase().collect())
        .unwrap_or_else(|| "recv".to_string())
}

/// Local holding the native-side copy of a target value, e.g. `cPosition`.
pub fn native_local(name: &str) -> String {
    format!("c{}", pascal_case(name.trim_start_matches('_')))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn pascal_case_follows_case_boundaries() {
        assert_eq!(pascal_case("getPosition"), "GetPosition");
        assert_eq!(pascal_case("RenderWindow"), "RenderWindow");
        assert_eq!(pascal_case("Vector2i"), "Vector2i");
        assert_eq!(pascal_case("sRgbCapable"), "SRgbCapable");
        assert_eq!(pascal_case("Mouse_getPosition"), "MouseGetPosition");
        assert_eq!(pascal_case("KeyLBracket"), "KeyLBracket");
        assert_eq!(camel_case("TexCoords"), "texCoords");
    }

    #[test]
    fn idiomatic_names() {
        assert_eq!(method_name("getPosition", NameStyle::Idiomatic), "Position");
        assert_eq!(method_name("getScale", NameStyle::Idiomatic), "GetScale");
        assert_eq!(method_name("RenderWindow_create", NameStyle::Idiomatic), "NewRenderWindow");
        assert_eq!(method_name("Sprite_destroy", NameStyle::Idiomatic), "FreeSprite");
        assert_eq!(method_name("getPosition", NameStyle::Verbatim), "GetPosition");
        assert_eq!(method_name("getter", NameStyle::Idiomatic), "Getter");
    }

    #[test]
    fn parameter_names_are_sanitized() {
        assert_eq!(param_name("", 2), "arg2");
        assert_eq!(param_name("type", 0), "type_");
        assert_eq!(param_name("2d", 0), "_2d");
        assert_eq!(cgo_field("type"), "_type");
        assert_eq!(native_local("type_"), "cType");
    }
}
