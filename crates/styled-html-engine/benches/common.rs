// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_article(sections: usize) -> String {
    let base = "<h2>Section</h2>\n<p>Paragraph with <b>some</b> <i>content</i> and a <a href=\"https://example.com\">link</a>.</p>\n<ul>\n  <li>Bullet point</li>\n  <li>Another <mark>item</mark></li>\n</ul>\n";
    base.repeat(sections)
}

#[allow(dead_code)]
pub fn generate_nested_lists(depth: usize) -> String {
    let mut content = String::new();
    for level in 0..depth {
        let tag = if level % 2 == 0 { "ol" } else { "ul" };
        content.push_str(&format!("<{tag}><li>Item at level {level}"));
    }
    for level in (0..depth).rev() {
        let tag = if level % 2 == 0 { "ol" } else { "ul" };
        content.push_str(&format!("</li></{tag}>"));
    }
    content
}

#[allow(dead_code)]
pub fn generate_symbol_list(items: usize) -> String {
    let mut content = String::from("<h3>Transport</h3>\n<ul>\n");
    for i in 0..items {
        let name = if i % 2 == 0 { "bus.fill" } else { "bicycle" };
        content.push_str(&format!("<li><img src=\"{name}\"> Option {i}</li>\n"));
    }
    content.push_str("</ul>");
    content
}

#[allow(dead_code)]
pub fn generate_paragraphs(count: usize) -> String {
    (0..count)
        .map(|i| format!("<p>Paragraph number {i} with <b>some</b> text.</p>\n"))
        .collect()
}
