use pretty_assertions::assert_eq;
use styled_html_syntax::tree::{self, Node, NodeKind, ParseError};

const ARTICLE: &str = r#"<!DOCTYPE html>
<html class="client-nojs" lang="en" dir="ltr">
<head>
<meta charset="UTF-8">
<title>XML - Wikipedia</title>
<script>var wgTitle = 1 < 2 && "XML";</script>
</head>
<body class="mediawiki">
<h1 id="firstHeading">XML</h1>
<div id="content"><p>Extensible <b>Markup</b> Language</p></div>
<div id="footer">Text is available</div>
</body>
</html>
"#;

fn article() -> Node {
    tree::parse(ARTICLE).unwrap()
}

fn elements(node: &Node) -> Vec<&Node> {
    node.iter().filter(|n| n.kind() == NodeKind::Element).collect()
}

#[test]
fn root_is_the_html_element() {
    let html = article();

    assert_eq!(html.name(), "html");
    assert_eq!(html.kind(), NodeKind::Element);
    assert!(!html.is_empty());
}

#[test]
fn child_counts() {
    let html = article();
    let names: Vec<&str> = html.iter().map(Node::name).collect();
    assert_eq!(names, vec!["head", "body"]);

    let head = &html.children()[0];
    assert_eq!(head.len(), 3);

    // Whitespace between body elements is kept as text
    let body = &html.children()[1];
    assert_eq!(body.len(), 7);
    assert_eq!(elements(body).len(), 3);
}

#[test]
fn head_content() {
    let html = article();
    let head = &html.children()[0];

    let title = &head.children()[1];
    assert_eq!(title.name(), "title");
    assert_eq!(title.content(), "XML - Wikipedia");

    let meta = &head.children()[0];
    assert!(meta.is_empty());
    assert_eq!(meta.attribute("charset"), Some("UTF-8"));

    let script = head.children()[2].children().first().unwrap();
    assert_eq!(script.name(), "");
    assert_eq!(script.kind(), NodeKind::CharacterData);
    assert_eq!(script.content(), r#"var wgTitle = 1 < 2 && "XML";"#);
}

#[test]
fn attribute_lookup() {
    let html = article();

    assert_eq!(html.attribute("class"), Some("client-nojs"));
    assert_eq!(html.attribute("lang"), Some("en"));
    assert_eq!(html.attribute("dir"), Some("ltr"));
    assert_eq!(html.attribute(""), None);
    assert_eq!(html.attribute("data-does-not-exist"), None);

    let body = &html.children()[1];
    let footer = elements(body)[2];
    assert_eq!(footer.name(), "div");
    assert_eq!(footer.attribute("id"), Some("footer"));
    assert_eq!(footer.content(), "Text is available");
}

#[test]
fn content_joins_descendant_text() {
    let html = article();
    let content = elements(&html.children()[1])[1];

    assert_eq!(content.content(), "Extensible Markup Language");
}

#[test]
fn description_is_markup() {
    let description = article().to_string();

    assert!(description.starts_with("<html class=\"client-nojs\" lang=\"en\" dir=\"ltr\">"));
    assert!(description.ends_with("</html>"));
    assert!(description.contains("<meta charset=\"UTF-8\"><title>"));
}

#[test]
fn text_fragment() {
    let html = tree::parse("Lorem ipsum dolor amet").unwrap();

    assert_eq!(html.name(), "html");
    assert_eq!(html.kind(), NodeKind::Element);
    assert_eq!(html.content(), "Lorem ipsum dolor amet");
}

#[test]
fn empty_and_cut_off_input() {
    assert_eq!(tree::parse(""), Err(ParseError::Empty));
    assert_eq!(
        tree::parse("<"),
        Err(ParseError::UnterminatedTag { offset: 0 })
    );
}
