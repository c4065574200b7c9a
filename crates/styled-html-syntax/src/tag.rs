//! Parsing the inside of start and end tags.
//!
//! Names are lowercased. Attribute values may be double-quoted,
//! single-quoted, unquoted or missing, and are entity-decoded. When a name
//! repeats, the first occurrence wins.

use crate::cursor::Cursor;

/// One `name="value"` pair on a start tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Looks up an attribute value by its (lowercase) name.
pub fn attribute<'a>(attributes: &'a [Attribute], name: &str) -> Option<&'a str> {
    attributes
        .iter()
        .find(|a| a.name == name)
        .map(|a| a.value.as_str())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartTag {
    pub name: String,
    pub attributes: Vec<Attribute>,
    /// The tag ended in `/>`.
    pub self_closing: bool,
}

/// Parses a `<name ...>` token. `base` is the token's offset in the source.
pub fn parse_start_tag(raw: &str, base: usize) -> StartTag {
    let inner = raw.strip_prefix('<').unwrap_or(raw);
    let inner = inner.strip_suffix('>').unwrap_or(inner);
    let mut cur = Cursor::new(inner, base + 1);

    let name = cur
        .eat_while(|b| !b.is_ascii_whitespace() && b != b'/')
        .to_ascii_lowercase();

    let mut attributes: Vec<Attribute> = Vec::new();
    let mut self_closing = false;

    loop {
        cur.skip_whitespace();
        match cur.peek() {
            None => break,
            Some(b'/') => {
                cur.bump();
                self_closing = cur.eof();
                continue;
            }
            _ => {}
        }

        let attr_name = cur.eat_while(|b| !b.is_ascii_whitespace() && b != b'=' && b != b'/');
        if attr_name.is_empty() {
            // A stray `=` or quote where a name should be
            log::trace!("skipping malformed attribute byte at {}", cur.pos());
            cur.bump();
            continue;
        }

        cur.skip_whitespace();
        let value = if cur.peek() == Some(b'=') {
            cur.bump();
            cur.skip_whitespace();
            attribute_value(&mut cur)
        } else {
            ""
        };

        let attr_name = attr_name.to_ascii_lowercase();
        if attributes.iter().any(|a| a.name == attr_name) {
            log::trace!("duplicate attribute {attr_name:?} on <{name}> ignored");
            continue;
        }
        attributes.push(Attribute {
            name: attr_name,
            value: html_escape::decode_html_entities(value).into_owned(),
        });
    }

    StartTag {
        name,
        attributes,
        self_closing,
    }
}

fn attribute_value<'a>(cur: &mut Cursor<'a>) -> &'a str {
    match cur.peek() {
        Some(quote @ (b'"' | b'\'')) => {
            cur.bump();
            let value = cur.eat_while(|b| b != quote);
            cur.bump();
            value
        }
        _ => cur.eat_while(|b| !b.is_ascii_whitespace()),
    }
}

/// Parses a `</name ...>` token into the lowercase element name.
pub fn parse_end_tag(raw: &str) -> String {
    let inner = raw.strip_prefix("</").unwrap_or(raw);
    let mut cur = Cursor::new(inner, 0);
    cur.eat_while(|b| !b.is_ascii_whitespace() && b != b'/' && b != b'>')
        .to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn attrs(tag: &StartTag) -> Vec<(&str, &str)> {
        tag.attributes
            .iter()
            .map(|a| (a.name.as_str(), a.value.as_str()))
            .collect()
    }

    #[test]
    fn name_is_lowercased() {
        let tag = parse_start_tag("<BR>", 0);
        assert_eq!(tag.name, "br");
        assert!(tag.attributes.is_empty());
        assert!(!tag.self_closing);
    }

    #[rstest]
    #[case(r#"<a href="x y">"#, vec![("href", "x y")])]
    #[case("<a href='x'>", vec![("href", "x")])]
    #[case("<ol start=5>", vec![("start", "5")])]
    #[case("<ol start = 5 >", vec![("start", "5")])]
    #[case("<input disabled>", vec![("disabled", "")])]
    #[case(r#"<b FOO="BAR">"#, vec![("foo", "BAR")])]
    #[case(r#"<img alt="a > b" src=x.png>"#, vec![("alt", "a > b"), ("src", "x.png")])]
    fn attribute_forms(#[case] raw: &str, #[case] expected: Vec<(&str, &str)>) {
        assert_eq!(attrs(&parse_start_tag(raw, 0)), expected);
    }

    #[test]
    fn values_are_entity_decoded() {
        let tag = parse_start_tag(r#"<img alt="Fish &amp; Chips &#9731;">"#, 0);
        assert_eq!(attrs(&tag), vec![("alt", "Fish & Chips \u{2603}")]);
    }

    #[test]
    fn first_duplicate_wins() {
        let tag = parse_start_tag(r#"<a href="one" HREF="two">"#, 0);
        assert_eq!(attrs(&tag), vec![("href", "one")]);
    }

    #[rstest]
    #[case("<br/>", true)]
    #[case("<br />", true)]
    #[case(r#"<img src="a.png" />"#, true)]
    #[case("<a href=/path/>", false)]
    #[case("<p>", false)]
    fn self_closing(#[case] raw: &str, #[case] expected: bool) {
        assert_eq!(parse_start_tag(raw, 0).self_closing, expected);
    }

    #[test]
    fn malformed_attributes_do_not_stop_parsing() {
        let tag = parse_start_tag(r#"<p ="x" style="color:red">"#, 0);
        assert_eq!(tag.name, "p");
        assert_eq!(tag.attributes.last().map(|a| a.value.as_str()), Some("color:red"));
    }

    #[rstest]
    #[case("</p>", "p")]
    #[case("</DIV >", "div")]
    #[case("</b junk>", "b")]
    fn end_tag_names(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(parse_end_tag(raw), expected);
    }
}
