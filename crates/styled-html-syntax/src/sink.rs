//! # Sinks - Where Events Go
//!
//! The driver never builds a tree. It reports what it sees to a [`Sink`],
//! one call per element boundary or text run, the way a SAX parser would:
//!
//! ```text
//! <p>Hi <b>there</b>      start_element("html")
//!                         start_element("body")
//!                         start_element("p")
//!                         characters("Hi ")
//!                         start_element("b")
//!                         characters("there")
//!                         end_element("b")
//!                         end_element("p")     (at end of input)
//!                         end_element("body")
//!                         end_element("html")
//! ```
//!
//! Every method returns a `Result`. The first error stops the drive and is
//! handed back to the caller unchanged.

use std::convert::Infallible;

use crate::tag::Attribute;

/// Receives the recovered event stream.
pub trait Sink {
    type Error;

    fn start_element(&mut self, name: &str, attributes: &[Attribute]) -> Result<(), Self::Error>;

    fn end_element(&mut self, name: &str) -> Result<(), Self::Error>;

    fn characters(&mut self, text: &str) -> Result<(), Self::Error>;

    /// Undecoded content of a `script` or `style` element. Ignored unless
    /// the sink asks for it.
    fn raw_text(&mut self, _text: &str) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// An owned copy of one sink call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Start {
        name: String,
        attributes: Vec<Attribute>,
    },
    End {
        name: String,
    },
    Text(String),
}

/// A sink that records every event, for tests and debugging.
#[derive(Debug, Default)]
pub struct EventCollector {
    pub events: Vec<Event>,
}

impl Sink for EventCollector {
    type Error = Infallible;

    fn start_element(&mut self, name: &str, attributes: &[Attribute]) -> Result<(), Self::Error> {
        self.events.push(Event::Start {
            name: name.to_string(),
            attributes: attributes.to_vec(),
        });
        Ok(())
    }

    fn end_element(&mut self, name: &str) -> Result<(), Self::Error> {
        self.events.push(Event::End {
            name: name.to_string(),
        });
        Ok(())
    }

    fn characters(&mut self, text: &str) -> Result<(), Self::Error> {
        self.events.push(Event::Text(text.to_string()));
        Ok(())
    }
}

/// Renders events one per line, indented by nesting depth.
pub fn format_events(events: &[Event]) -> String {
    let mut result = String::new();
    let mut depth = 0usize;

    for event in events {
        match event {
            Event::Start { name, attributes } => {
                result.push_str(&"  ".repeat(depth));
                result.push_str(&format!("<{name}"));
                for a in attributes {
                    result.push_str(&format!(" {}={:?}", a.name, a.value));
                }
                result.push_str(">\n");
                depth += 1;
            }
            Event::End { name } => {
                depth = depth.saturating_sub(1);
                result.push_str(&"  ".repeat(depth));
                result.push_str(&format!("</{name}>\n"));
            }
            Event::Text(text) => {
                result.push_str(&"  ".repeat(depth));
                result.push_str(&format!("{text:?}\n"));
            }
        }
    }

    result
}
