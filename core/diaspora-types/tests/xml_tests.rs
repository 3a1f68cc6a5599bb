use diaspora_types::{Element, XmlError};
use pretty_assertions::assert_eq;

// ── Parsing ──────────────────────────────────────────────────────

#[test]
fn parses_nested_elements_with_text() {
    let el = Element::parse("<post><guid>abc</guid><text>hi &amp; bye</text></post>").unwrap();
    assert_eq!(el.name(), "post");
    assert_eq!(el.children().len(), 2);
    assert_eq!(el.child("guid").unwrap().text(), "abc");
    assert_eq!(el.child("text").unwrap().text(), "hi & bye");
}

#[test]
fn lookups_ignore_namespace_prefix() {
    let xml = r#"<me:env xmlns:me="http://salmon-protocol.org/ns/magic-env"><me:data type="post">x</me:data></me:env>"#;
    let el = Element::parse(xml).unwrap();
    assert_eq!(el.name(), "me:env");
    assert_eq!(el.local_name(), "env");
    let data = el.child("data").unwrap();
    assert_eq!(data.attribute("type"), Some("post"));
    assert_eq!(el.attribute("me"), None);
}

#[test]
fn empty_element_has_empty_text() {
    let el = Element::parse("<a><b/><c></c></a>").unwrap();
    assert_eq!(el.child("b").unwrap().text(), "");
    assert_eq!(el.child("c").unwrap().text(), "");
}

#[test]
fn cdata_is_text() {
    let el = Element::parse("<a><![CDATA[<raw>]]></a>").unwrap();
    assert_eq!(el.text(), "<raw>");
}

#[test]
fn children_named_preserves_order() {
    let el = Element::parse("<a><p>1</p><q/><p>2</p></a>").unwrap();
    let texts: Vec<&str> = el.children_named("p").map(|p| p.text()).collect();
    assert_eq!(texts, vec!["1", "2"]);
}

#[test]
fn rejects_empty_document() {
    assert_eq!(Element::parse("   ").unwrap_err(), XmlError::NoRootElement);
}

#[test]
fn rejects_text_outside_root() {
    assert!(matches!(
        Element::parse("PGZvbz4="),
        Err(XmlError::Malformed(_))
    ));
}

#[test]
fn rejects_mismatched_tags() {
    assert!(Element::parse("<a><b></a></b>").is_err());
}

#[test]
fn rejects_unclosed_root() {
    assert!(Element::parse("<a><b>x</b>").is_err());
}

#[test]
fn rejects_second_root() {
    assert!(matches!(
        Element::parse("<a/><b/>"),
        Err(XmlError::Malformed(_))
    ));
}

// ── Writing ──────────────────────────────────────────────────────

#[test]
fn writes_attributes_and_escapes_text() {
    let el = Element::new("me:data")
        .with_attribute("type", "a\"b")
        .with_text("<x> & y");
    let xml = el.to_xml().unwrap();
    assert_eq!(xml, r#"<me:data type="a&quot;b">&lt;x&gt; &amp; y</me:data>"#);
}

#[test]
fn write_parse_roundtrip() {
    let el = Element::new("root")
        .with_attribute("xmlns:me", "urn:x")
        .with_child(Element::new("me:one").with_text("1"))
        .with_child(Element::new("two").with_child(Element::new("three").with_text("")));
    let parsed = Element::parse(&el.to_xml().unwrap()).unwrap();
    assert_eq!(parsed, el);
}

#[test]
fn child_mut_allows_editing() {
    let mut el = Element::parse("<a><b>old</b></a>").unwrap();
    el.child_mut("b").unwrap().set_text("new");
    assert_eq!(el.to_string(), "<a><b>new</b></a>");
}
