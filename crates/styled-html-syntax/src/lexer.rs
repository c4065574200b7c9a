//! # Lexer - Splitting Markup Into Tags And Text
//!
//! This module provides the first stage of tokenizing: breaking the source
//! into coarse tokens using the [Logos] lexer generator.
//!
//! [Logos]: https://docs.rs/logos
//!
//! ## Coverage
//!
//! Every byte of the input appears in exactly one token, so concatenating the
//! token texts gives back the source:
//!
//! ```
//! use styled_html_syntax::lexer::lex;
//!
//! let input = "<p class=\"a\">Hello</p><!-- note -->";
//! let tokens = lex(input);
//!
//! let reconstructed: String = tokens.iter().map(|t| t.text).collect();
//! assert_eq!(input, reconstructed);
//! ```
//!
//! ## Token Design
//!
//! Tokens are kept at the level of whole tags. The lexer does not know which
//! elements are void, which close a paragraph, or where an unclosed element
//! ends. That is the driver's job (see [`crate::driver`]).
//!
//! - `<name ...>` → [`TokenKind::StartTag`] (quoted values may contain `>`)
//! - `</name ...>` → [`TokenKind::EndTag`]
//! - `<!-- ... -->` → [`TokenKind::Comment`], running to end of input if unterminated
//! - `<!DOCTYPE ...>` and friends → [`TokenKind::Declaration`]
//! - `<? ... >` → [`TokenKind::ProcessingInstruction`]
//! - a `<` that starts none of the above → [`TokenKind::Lt`], which is text
//! - everything else → [`TokenKind::Text`]

use logos::{Lexer, Logos};

/// Token kinds produced by the Logos lexer.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// `<name attr="value">`, possibly self-closing
    #[regex(r#"<[a-zA-Z]([^>"']|"[^"]*"|'[^']*')*>"#)]
    StartTag,

    /// `</name>`
    #[regex(r"</[a-zA-Z][^>]*>")]
    EndTag,

    /// `<!-- ... -->`
    #[token("<!--", comment)]
    Comment,

    /// `<!DOCTYPE html>`, `<![CDATA[...]]>`
    #[token("<!", up_to_gt)]
    Declaration,

    /// `<?xml ... ?>`
    #[token("<?", up_to_gt)]
    ProcessingInstruction,

    /// A `<` that does not start markup
    #[token("<")]
    Lt,

    /// Character data between tags
    #[regex(r"[^<]+")]
    Text,
}

impl TokenKind {
    /// Tokens that carry character data once decoded.
    pub fn is_text(self) -> bool {
        matches!(self, TokenKind::Text | TokenKind::Lt)
    }

    /// Tokens that are dropped without producing any event.
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            TokenKind::Comment | TokenKind::Declaration | TokenKind::ProcessingInstruction
        )
    }
}

fn comment(lex: &mut Lexer<TokenKind>) -> bool {
    let rest = lex.remainder();
    let len = rest.find("-->").map_or(rest.len(), |i| i + 3);
    lex.bump(len);
    true
}

fn up_to_gt(lex: &mut Lexer<TokenKind>) -> bool {
    let rest = lex.remainder();
    let len = rest.find('>').map_or(rest.len(), |i| i + 1);
    lex.bump(len);
    true
}

/// A lexed token with its kind and text slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

/// Lex the input into a sequence of tokens.
///
/// Guarantees that all bytes from the input appear in the output tokens.
pub fn lex(input: &str) -> Vec<Token<'_>> {
    lex_with_spans(input).into_iter().map(|(t, _)| t).collect()
}

/// Lex and return tokens along with their byte spans.
pub fn lex_with_spans(input: &str) -> Vec<(Token<'_>, std::ops::Range<usize>)> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(input);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let text = lexer.slice();
        // Anything Logos rejects is character data
        let kind = result.unwrap_or(TokenKind::Text);
        tokens.push((Token { kind, text }, span));
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn token(kind: TokenKind, text: &str) -> Token<'_> {
        Token { kind, text }
    }

    #[test]
    fn lex_empty_input() {
        assert_eq!(lex(""), vec![]);
    }

    #[test]
    fn lex_plain_text() {
        assert_eq!(lex("hello world"), vec![token(TokenKind::Text, "hello world")]);
    }

    #[test]
    fn lex_element() {
        assert_eq!(
            lex("<b>bold</b>"),
            vec![
                token(TokenKind::StartTag, "<b>"),
                token(TokenKind::Text, "bold"),
                token(TokenKind::EndTag, "</b>"),
            ]
        );
    }

    #[test]
    fn quoted_attribute_may_contain_gt() {
        assert_eq!(
            lex(r#"<img alt="a > b">"#),
            vec![token(TokenKind::StartTag, r#"<img alt="a > b">"#)]
        );
    }

    #[test]
    fn comment_is_one_token() {
        assert_eq!(
            lex("a<!-- <b> -->c"),
            vec![
                token(TokenKind::Text, "a"),
                token(TokenKind::Comment, "<!-- <b> -->"),
                token(TokenKind::Text, "c"),
            ]
        );
    }

    #[test]
    fn unterminated_comment_runs_to_end() {
        assert_eq!(
            lex("a<!-- never closed"),
            vec![
                token(TokenKind::Text, "a"),
                token(TokenKind::Comment, "<!-- never closed"),
            ]
        );
    }

    #[rstest]
    #[case("<!DOCTYPE html>", TokenKind::Declaration)]
    #[case("<?xml version=\"1.0\"?>", TokenKind::ProcessingInstruction)]
    fn markup_declarations(#[case] input: &str, #[case] kind: TokenKind) {
        assert_eq!(lex(input), vec![token(kind, input)]);
    }

    #[test]
    fn lone_lt() {
        assert_eq!(
            lex("4 < 5"),
            vec![
                token(TokenKind::Text, "4 "),
                token(TokenKind::Lt, "<"),
                token(TokenKind::Text, " 5"),
            ]
        );
    }

    #[rstest]
    #[case("<b")]
    #[case("a</>")]
    #[case("x <3 y")]
    fn unfinished_markup_is_text(#[case] input: &str) {
        let tokens = lex(input);
        assert!(tokens.iter().all(|t| t.kind.is_text()), "{tokens:?}");
        let reconstructed: String = tokens.iter().map(|t| t.text).collect();
        assert_eq!(input, reconstructed);
    }

    #[test]
    fn spans_follow_tokens() {
        let spans: Vec<_> = lex_with_spans("<p>hi</p>")
            .into_iter()
            .map(|(_, span)| span)
            .collect();
        assert_eq!(spans, vec![0..3, 3..5, 5..9]);
    }

    #[test]
    fn all_bytes_preserved() {
        let input = "<!DOCTYPE html>\n<ol start=5><li>a &amp; b<br/></li></ol><!-- x --> 3 < 4 <?pi?>";
        let reconstructed: String = lex(input).iter().map(|t| t.text).collect();
        assert_eq!(input, reconstructed);
    }
}
