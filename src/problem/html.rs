use std::sync::LazyLock;

use scraper::{ElementRef, Html, Node, Selector};

static ARTICLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("article").unwrap());
static HEADING: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h2").unwrap());
static PRE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("pre").unwrap());

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Narrative containers in document order, skipping any nested inside another.
pub fn containers(page: &Html) -> Vec<ElementRef<'_>> {
    page.select(&ARTICLE)
        .filter(|article| {
            !article
                .ancestors()
                .filter_map(ElementRef::wrap)
                .any(|a| a.value().name() == "article")
        })
        .collect()
}

pub fn headings(page: &Html) -> impl Iterator<Item = ElementRef<'_>> {
    page.select(&HEADING)
}

pub fn preformatted(page: &Html) -> impl Iterator<Item = ElementRef<'_>> {
    page.select(&PRE)
}

/// Concatenated, entity-decoded text of every descendant.
pub fn text_content(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// The only child element, ignoring whitespace-only text around it.
pub fn sole_child(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    let mut found = None;
    for child in element.children() {
        match child.value() {
            Node::Text(t) if t.trim().is_empty() => {}
            Node::Comment(_) => {}
            Node::Element(_) if found.is_none() => found = ElementRef::wrap(child),
            _ => return None,
        }
    }
    found
}

/// Opening tag rebuilt from the parsed element, attribute values escaped.
pub fn open_tag(element: ElementRef<'_>) -> String {
    let el = element.value();
    let mut tag = format!("<{}", el.name());
    for (name, value) in el.attrs() {
        tag.push_str(&format!(" {}=\"{}\"", name, escape_attr(value)));
    }
    tag.push('>');
    tag
}

pub fn close_tag(element: ElementRef<'_>) -> String {
    let name = element.value().name();
    if VOID_ELEMENTS.contains(&name) {
        String::new()
    } else {
        format!("</{name}>")
    }
}

/// Re-encode text for markdown output so literal `<`/`>`/`&` in the page
/// can never read back as markup.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

fn escape_attr(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn containers_in_document_order() {
        let page = Html::parse_document(
            "<article><p>one</p></article><p>between</p><article><p>two</p></article>",
        );
        let found: Vec<_> = containers(&page).into_iter().map(text_content).collect();
        assert_eq!(found, vec!["one", "two"]);
    }

    #[test]
    fn nested_containers_not_repeated() {
        let page = Html::parse_document("<article>a<article>b</article></article>");
        assert_eq!(containers(&page).len(), 1);
    }

    #[test]
    fn text_content_decodes_entities() {
        let page = Html::parse_document("<pre><code>&lt;^^&gt; &amp; <em>x</em></code></pre>");
        let pre = preformatted(&page).next().unwrap();
        assert_eq!(text_content(pre), "<^^> & x");
    }

    #[test]
    fn script_contents_are_not_markup() {
        let page = Html::parse_document("<script>var s = '<article>';</script><p>after</p>");
        assert!(containers(&page).is_empty());
    }

    #[test]
    fn sole_child_ignores_whitespace() {
        let page = Html::parse_document("<pre>\n<code>x</code>\n</pre><pre>text<code>y</code></pre>");
        let pres: Vec<_> = preformatted(&page).collect();
        assert_eq!(sole_child(pres[0]).map(|e| e.value().name()), Some("code"));
        assert!(sole_child(pres[1]).is_none());
    }

    #[test]
    fn rebuilds_tags() {
        let page = Html::parse_document(r#"<p><a href="/2024/day/1?a=1&amp;b=2">x</a><br></p>"#);
        let a = page
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .find(|e| e.value().name() == "a")
            .unwrap();
        assert_eq!(open_tag(a), r#"<a href="/2024/day/1?a=1&amp;b=2">"#);
        assert_eq!(close_tag(a), "</a>");

        let br = page
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .find(|e| e.value().name() == "br")
            .unwrap();
        assert_eq!(close_tag(br), "");
    }

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(escape_text("<vv> & <em>"), "&lt;vv&gt; &amp; &lt;em&gt;");
        assert_eq!(escape_text("plain *text*"), "plain *text*");
    }
}
