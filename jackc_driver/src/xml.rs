use jackc_bytecode::observer::{NodeKind, ParseObserver};
use jackc_parse::token::Token;

/// Renders the parse of one unit as an indented XML tree: one element per
/// grammar node and one leaf element per token.
#[derive(Debug, Default)]
pub struct XmlObserver {
    out: String,
    depth: usize,
}

impl XmlObserver {
    pub fn new() -> XmlObserver {
        XmlObserver::default()
    }

    pub fn finish(self) -> String {
        self.out
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.out.push_str("  ");
        }
        self.out.push_str(text);
        self.out.push('\n');
    }
}

impl ParseObserver for XmlObserver {
    fn token(&mut self, tkn: &Token) {
        let tag = tkn.kind().to_string();
        let text = format!("<{}> {} </{}>", tag, escape(&tkn.to_string()), tag);
        self.line(&text);
    }

    fn enter(&mut self, node: NodeKind) {
        self.line(&format!("<{}>", node.tag()));
        self.depth += 1;
    }

    fn exit(&mut self, node: NodeKind) {
        self.depth = self.depth.saturating_sub(1);
        self.line(&format!("</{}>", node.tag()));
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
