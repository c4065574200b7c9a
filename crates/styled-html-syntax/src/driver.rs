//! # Driver - Recovering An Element Stream
//!
//! The driver walks the lexer's tokens and keeps a stack of open element
//! names. It repairs markup the way a lenient HTML parser does, so that a
//! [`Sink`] always sees balanced start/end pairs:
//!
//! - `html` and `body` are implied before the first element; stray text at
//!   the top level also gets an implied `p`
//! - void elements (`br`, `img`, ...) and `/>` tags end immediately
//! - some starts close the open element (`<li>` ends an open `li`, block
//!   elements end an open `p`)
//! - an end tag closes everything above its match, unless something more
//!   structural is in the way; unmatched end tags are dropped
//! - `</body>` and `</html>` wait for the end of input
//! - `script` and `style` content is passed through undecoded to
//!   [`Sink::raw_text`], which ignores it by default
//! - adjacent character data is merged into one `characters` call

use crate::elements::{end_priority, is_head_content, is_raw_text, is_void, start_closes};
use crate::lexer::{TokenKind, lex_with_spans};
use crate::sink::Sink;
use crate::tag::{Attribute, StartTag, parse_end_tag, parse_start_tag};

/// Feeds the recovered event stream for `input` into `sink`.
pub fn drive<S: Sink>(input: &str, sink: &mut S) -> Result<(), S::Error> {
    let mut driver = Driver::new(sink);
    for (token, span) in lex_with_spans(input) {
        driver.token(token.kind, token.text, span.start)?;
    }
    driver.finish()
}

struct Driver<'s, S: Sink> {
    sink: &'s mut S,
    open: Vec<String>,
    pending: String,
    raw_text: Option<String>,
    raw_content: String,
}

impl<'s, S: Sink> Driver<'s, S> {
    fn new(sink: &'s mut S) -> Self {
        Self {
            sink,
            open: vec![],
            pending: String::new(),
            raw_text: None,
            raw_content: String::new(),
        }
    }

    fn token(&mut self, kind: TokenKind, text: &str, offset: usize) -> Result<(), S::Error> {
        if let Some(raw) = &self.raw_text {
            if kind == TokenKind::EndTag && parse_end_tag(text) == *raw {
                self.raw_text = None;
                self.flush_raw_text()?;
                return self.end_tag(parse_end_tag(text), offset);
            }
            self.raw_content.push_str(text);
            return Ok(());
        }

        if kind.is_trivia() {
            return Ok(());
        }
        if kind.is_text() {
            self.pending
                .push_str(&html_escape::decode_html_entities(text));
            return Ok(());
        }

        self.flush_text()?;
        if kind == TokenKind::EndTag {
            self.end_tag(parse_end_tag(text), offset)
        } else {
            self.start_tag(parse_start_tag(text, offset))
        }
    }

    fn finish(mut self) -> Result<(), S::Error> {
        self.flush_text()?;
        self.flush_raw_text()?;
        while !self.open.is_empty() {
            self.close_top()?;
        }
        Ok(())
    }

    fn flush_text(&mut self) -> Result<(), S::Error> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let mut text = std::mem::take(&mut self.pending);

        if matches!(self.current(), None | Some("html") | Some("head")) {
            let trimmed = text.trim_start_matches(|c: char| c.is_ascii_whitespace());
            if trimmed.is_empty() {
                return Ok(());
            }
            text = trimmed.to_string();
            log::trace!("text outside body, implying <p>");
            self.imply_body()?;
            self.open_element("p", &[])?;
        }

        self.sink.characters(&text)
    }

    fn flush_raw_text(&mut self) -> Result<(), S::Error> {
        if self.raw_content.is_empty() {
            return Ok(());
        }
        let content = std::mem::take(&mut self.raw_content);
        self.sink.raw_text(&content)
    }

    fn start_tag(&mut self, tag: StartTag) -> Result<(), S::Error> {
        let name = tag.name.as_str();

        match name {
            "html" if !self.open.is_empty() => {
                log::trace!("ignoring nested <html>");
                return Ok(());
            }
            "body" if self.is_open("body") => {
                log::trace!("ignoring repeated <body>");
                return Ok(());
            }
            "head" if self.is_open("body") || self.is_open("head") => {
                log::trace!("ignoring late <head>");
                return Ok(());
            }
            "html" => {}
            "head" => self.imply_html()?,
            "body" => {
                self.imply_html()?;
                self.close_head()?;
            }
            n if is_head_content(n) && !self.is_open("body") => self.imply_html()?,
            _ => self.imply_body()?,
        }

        while let Some(current) = self.current() {
            if !start_closes(name, current) {
                break;
            }
            self.close_top()?;
        }

        if is_void(name) || tag.self_closing {
            self.sink.start_element(name, &tag.attributes)?;
            return self.sink.end_element(name);
        }

        self.open_element(name, &tag.attributes)?;
        if is_raw_text(name) {
            self.raw_text = Some(tag.name);
        }
        Ok(())
    }

    fn end_tag(&mut self, name: String, offset: usize) -> Result<(), S::Error> {
        if name == "html" || name == "body" {
            log::trace!("deferring </{name}> at {offset} to end of input");
            return Ok(());
        }

        let Some(index) = self.open.iter().rposition(|n| *n == name) else {
            log::debug!("ignoring unmatched </{name}> at {offset}");
            return Ok(());
        };

        let priority = end_priority(&name);
        if let Some(blocker) = self.open[index + 1..]
            .iter()
            .find(|n| end_priority(n) > priority)
        {
            log::debug!("ignoring </{name}> at {offset}: <{blocker}> is still open");
            return Ok(());
        }

        while self.open.len() > index {
            self.close_top()?;
        }
        Ok(())
    }

    fn current(&self) -> Option<&str> {
        self.open.last().map(String::as_str)
    }

    fn is_open(&self, name: &str) -> bool {
        self.open.iter().any(|n| n == name)
    }

    fn open_element(&mut self, name: &str, attributes: &[Attribute]) -> Result<(), S::Error> {
        self.open.push(name.to_string());
        self.sink.start_element(name, attributes)
    }

    fn close_top(&mut self) -> Result<(), S::Error> {
        match self.open.pop() {
            Some(name) => self.sink.end_element(&name),
            None => Ok(()),
        }
    }

    fn imply_html(&mut self) -> Result<(), S::Error> {
        if self.open.is_empty() {
            self.open_element("html", &[])?;
        }
        Ok(())
    }

    fn close_head(&mut self) -> Result<(), S::Error> {
        while let Some(current) = self.current() {
            if current == "html" || !is_head_content(current) {
                break;
            }
            self.close_top()?;
        }
        Ok(())
    }

    fn imply_body(&mut self) -> Result<(), S::Error> {
        self.imply_html()?;
        if !self.is_open("body") {
            self.close_head()?;
            self.open_element("body", &[])?;
        }
        Ok(())
    }
}
