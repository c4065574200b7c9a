//! Static knowledge about HTML elements used during recovery.

/// Elements that never have content. Their start tag is also their end.
pub const VOID: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose content is raw text, never markup or entities.
pub const RAW_TEXT: &[&str] = &["script", "style"];

/// Elements that may appear before `body` without implying it.
pub const HEAD_CONTENT: &[&str] = &[
    "head", "title", "meta", "link", "style", "script", "base", "noscript",
];

const HEADINGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

/// Block-level elements whose start implicitly ends an open `p`.
const CLOSES_PARAGRAPH: &[&str] = &[
    "address", "article", "aside", "blockquote", "center", "details", "dialog", "dir", "div",
    "dl", "dd", "dt", "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4",
    "h5", "h6", "header", "hgroup", "hr", "li", "main", "menu", "nav", "ol", "p", "pre",
    "section", "table", "ul",
];

pub fn is_void(name: &str) -> bool {
    VOID.contains(&name)
}

pub fn is_raw_text(name: &str) -> bool {
    RAW_TEXT.contains(&name)
}

pub fn is_head_content(name: &str) -> bool {
    HEAD_CONTENT.contains(&name)
}

/// Whether starting `incoming` implicitly ends the currently open `current`.
pub fn start_closes(incoming: &str, current: &str) -> bool {
    match current {
        "p" => CLOSES_PARAGRAPH.contains(&incoming),
        "li" => incoming == "li",
        "dt" | "dd" => matches!(incoming, "dt" | "dd"),
        "option" => incoming == "option",
        c if HEADINGS.contains(&c) => HEADINGS.contains(&incoming),
        _ => false,
    }
}

/// How hard an open element resists being closed by an unrelated end tag.
///
/// An end tag may only close elements above its match whose priority does
/// not exceed its own.
pub fn end_priority(name: &str) -> u16 {
    match name {
        "div" => 150,
        "td" | "th" => 160,
        "tr" => 170,
        "thead" | "tbody" | "tfoot" => 180,
        "table" => 190,
        "head" | "body" => 200,
        "html" => 220,
        _ => 100,
    }
}
