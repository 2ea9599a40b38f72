use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::Html;

/// Turns a server message into text fit for a terminal.
pub trait MessageConverter: Send + Sync {
    fn to_plain_text(&self, markup: &str) -> String;
}

/// Drops tags, maps `<br>` to a newline and decodes entities. The endpoint
/// wraps command output as `<code>escaped<br>lines</code>`.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkupTextConverter;

impl MessageConverter for MarkupTextConverter {
    fn to_plain_text(&self, markup: &str) -> String {
        if !markup.contains(['<', '&']) {
            return markup.to_string();
        }

        let fragment = Html::parse_fragment(markup);
        let mut text = String::new();
        for child in fragment.root_element().children() {
            visit_node(child, &mut text);
        }
        text.trim_end_matches('\n').to_string()
    }
}

fn visit_node(node: NodeRef<'_, Node>, out: &mut String) {
    match node.value() {
        Node::Text(text) => out.push_str(text),
        Node::Element(element) if element.name().eq_ignore_ascii_case("br") => out.push('\n'),
        _ => {
            for child in node.children() {
                visit_node(child, out);
            }
        }
    }
}
