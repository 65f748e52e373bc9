use std::sync::LazyLock;

use regex::Regex;

use scraper::{ElementRef, Node};

use super::html;

static BLANK_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Problem-page markup classified into the shapes that have a markdown form.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// `<article>`: one part of the puzzle narrative.
    Container(Vec<Block>),
    Heading(Vec<Block>),
    Paragraph(Vec<Block>),
    /// `<pre><code>`, holding its verbatim text.
    CodeBlock(String),
    Emphasis(Vec<Block>),
    InlineCode(Vec<Block>),
    List(Vec<Block>),
    ListItem(Vec<Block>),
    /// Anything else, reproduced with its original tags.
    Raw {
        open: String,
        close: String,
        children: Vec<Block>,
    },
    Text(String),
}

/// Classify the child nodes of `parent`. Comments and other non-content
/// nodes are dropped.
pub fn classify(parent: ElementRef<'_>) -> Vec<Block> {
    parent
        .children()
        .filter_map(|node| match node.value() {
            Node::Text(t) => Some(Block::Text(t.to_string())),
            Node::Element(_) => ElementRef::wrap(node).map(classify_element),
            _ => None,
        })
        .collect()
}

pub fn classify_element(element: ElementRef<'_>) -> Block {
    let children = || classify(element);
    match element.value().name() {
        "article" => Block::Container(children()),
        "h2" => Block::Heading(children()),
        "pre" if is_code_block(element) => Block::CodeBlock(html::text_content(element)),
        "p" => Block::Paragraph(children()),
        "em" => Block::Emphasis(children()),
        "code" => Block::InlineCode(children()),
        "ul" => Block::List(children()),
        "li" => Block::ListItem(children()),
        _ => Block::Raw {
            open: html::open_tag(element),
            close: html::close_tag(element),
            children: children(),
        },
    }
}

/// A `pre` whose only content is a `code` element.
pub fn is_code_block(element: ElementRef<'_>) -> bool {
    element.value().name() == "pre"
        && html::sole_child(element).is_some_and(|c| c.value().name() == "code")
}

impl Block {
    pub fn write_markdown(&self, out: &mut String) {
        match self {
            Block::Container(children) => write_all(children, out),
            // The title is captured separately.
            Block::Heading(_) => {}
            Block::Paragraph(children) => {
                write_all(children, out);
                out.push_str("\n\n");
            }
            Block::CodeBlock(text) => {
                out.push_str("```\n");
                out.push_str(&html::escape_text(text));
                if !text.ends_with('\n') {
                    out.push('\n');
                }
                out.push_str("```\n\n");
            }
            Block::Emphasis(children) => {
                out.push('*');
                write_all(children, out);
                out.push('*');
            }
            Block::InlineCode(children) => {
                out.push('`');
                write_all(children, out);
                out.push('`');
            }
            Block::List(children) => {
                // Whitespace between items would turn into blank lines.
                for child in children {
                    if !matches!(child, Block::Text(t) if t.trim().is_empty()) {
                        child.write_markdown(out);
                    }
                }
                out.push('\n');
            }
            Block::ListItem(children) => {
                out.push_str("- ");
                write_all(children, out);
                out.push('\n');
            }
            Block::Raw {
                open,
                close,
                children,
            } => {
                out.push_str(open);
                write_all(children, out);
                out.push_str(close);
            }
            Block::Text(t) => out.push_str(&html::escape_text(t)),
        }
    }

    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        self.write_markdown(&mut out);
        out
    }
}

fn write_all(blocks: &[Block], out: &mut String) {
    for block in blocks {
        block.write_markdown(out);
    }
}

/// Collapse runs of three or more newlines to a single blank line.
pub fn collapse_blank_lines(text: &str) -> String {
    BLANK_RUN_RE.replace_all(text, "\n\n").into_owned()
}

/// Markdown for one narrative container, trimmed and with blank-line runs
/// collapsed.
pub fn render_container(block: &Block) -> String {
    collapse_blank_lines(&block.to_markdown()).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    /// Rewrite a fragment with the same rules used for containers.
    fn md(markup: &str) -> String {
        let fragment = Html::parse_fragment(markup);
        render_container(&Block::Container(classify(fragment.root_element())))
    }

    #[test]
    fn emphasis() {
        assert_eq!(md("<p>Find the <em>total distance</em>.</p>"), "Find the *total distance*.");
    }

    #[test]
    fn inline_code() {
        assert_eq!(md("<p>Use <code>x + 1</code> here</p>"), "Use `x + 1` here");
    }

    #[test]
    fn code_wrapping_emphasis() {
        assert_eq!(md("<p>Answer: <code><em>11</em></code>.</p>"), "Answer: `*11*`.");
    }

    #[test]
    fn paragraphs_separated_by_blank_line() {
        assert_eq!(md("<p>one</p><p>two</p>"), "one\n\ntwo");
    }

    #[test]
    fn code_block_fenced() {
        let out = md("<p>Example:</p>\n<pre><code>3   4\n4   3\n</code></pre>\n<p>Then</p>");
        assert_eq!(out, "Example:\n\n```\n3   4\n4   3\n```\n\nThen");
    }

    #[test]
    fn code_block_without_trailing_newline_still_closes_on_own_line() {
        assert_eq!(md("<pre><code>a\nb</code></pre>"), "```\na\nb\n```");
    }

    #[test]
    fn code_block_drops_inner_emphasis_tags() {
        assert_eq!(md("<pre><code>1 <em>2</em> 3\n</code></pre>"), "```\n1 2 3\n```");
    }

    #[test]
    fn lists() {
        let out = md("<p>Items:</p>\n<ul>\n<li>first</li>\n<li>second <em>one</em></li>\n</ul>\n<p>done</p>");
        assert_eq!(out, "Items:\n\n- first\n- second *one*\n\ndone");
    }

    #[test]
    fn heading_stripped() {
        assert_eq!(md("<h2>--- Day 1: Title ---</h2><p>Body</p>"), "Body");
    }

    #[test]
    fn unknown_tags_pass_through() {
        assert_eq!(
            md(r#"<p>See <a href="/about">here</a> and <span title="x">this</span>.</p>"#),
            r#"See <a href="/about">here</a> and <span title="x">this</span>."#
        );
    }

    #[test]
    fn pre_without_code_is_not_a_code_block() {
        let page = Html::parse_document("<pre>plain</pre>");
        let pre = html::preformatted(&page).next().unwrap();
        assert!(!is_code_block(pre));
        assert_eq!(md("<pre>plain</pre>"), "<pre>plain</pre>");
    }

    #[test]
    fn collapses_long_newline_runs() {
        assert_eq!(collapse_blank_lines("a\n\n\n\n\nb\n\n\nc\n\nd"), "a\n\nb\n\nc\n\nd");
        assert_eq!(md("<p>a</p>\n\n\n\n<p>b</p>"), "a\n\nb");
    }

    #[test]
    fn rewriting_is_idempotent() {
        let once = md(
            "<p>Find the <em>total distance</em> with <code><em>x</em></code>.</p>\
             <pre><code>3   4\n4   3\n</code></pre><ul><li>a</li><li>b</li></ul>",
        );
        assert!(once.contains("```\n3   4\n4   3\n```"));
        assert_eq!(md(&once), once);
    }

    #[test]
    fn implied_list_item_end_tags() {
        assert_eq!(md("<ul><li>one<li>two</ul>"), "- one\n- two");
    }

    #[test]
    fn literal_markup_characters_stay_escaped() {
        assert_eq!(
            md("<p>Write <code>&lt;p&gt;</code> &amp; <code>a &lt; b</code></p>"),
            "Write `&lt;p&gt;` &amp; `a &lt; b`"
        );
    }

    #[test]
    fn rewriting_escaped_markup_is_idempotent() {
        let once = md(
            "<p>Moves: <code>&lt;vv&gt;^&lt;v^&gt;</code></p>\
             <pre><code>&lt;^^&gt;&gt;&gt;vv&lt;v&gt;&gt;v&lt;&lt;\n</code></pre>",
        );
        assert_eq!(
            once,
            "Moves: `&lt;vv&gt;^&lt;v^&gt;`\n\n```\n&lt;^^&gt;&gt;&gt;vv&lt;v&gt;&gt;v&lt;&lt;\n```"
        );
        assert_eq!(md(&once), once);
    }

    #[test]
    fn comments_are_dropped() {
        assert_eq!(md("<p>a<!-- note -->b</p>"), "ab");
    }

    #[test]
    fn classify_shapes() {
        let fragment = Html::parse_fragment("<article><p>x</p><pre><code>y</code></pre></article>");
        let blocks = classify(fragment.root_element());
        assert_eq!(
            blocks,
            vec![Block::Container(vec![
                Block::Paragraph(vec![Block::Text("x".into())]),
                Block::CodeBlock("y".into()),
            ])]
        );
    }
}
