//! Hand-built element trees for unit tests.
//!
//! Keeps engine tests independent of any XML parser.

use crate::document::{SpreadsheetDocument, SpreadsheetElement};

#[derive(Debug, Clone, Default)]
pub struct Node {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub text: String,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(tag: &str) -> Self {
        Self { tag: tag.to_string(), ..Default::default() }
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.push((name.to_string(), value.to_string()));
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    fn collect<'a>(&'a self, tag: &str, out: &mut Vec<&'a Node>) {
        for child in &self.children {
            if child.tag == tag {
                out.push(child);
            }
            child.collect(tag, out);
        }
    }
}

impl SpreadsheetElement for Node {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn elements_by_tag(&self, tag: &str) -> Vec<&Self> {
        let mut out = Vec::new();
        self.collect(tag, &mut out);
        out
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn text_content(&self) -> String {
        let mut s = self.text.clone();
        for child in &self.children {
            s.push_str(&child.text_content());
        }
        s
    }
}

/// A document is just its root node.
pub struct Doc(pub Node);

impl SpreadsheetDocument for Doc {
    type Element = Node;

    fn elements_by_tag(&self, tag: &str) -> Vec<&Node> {
        let mut out = Vec::new();
        if self.0.tag == tag {
            out.push(&self.0);
        }
        self.0.collect(tag, &mut out);
        out
    }
}

// ---------------------------------------------------------------------------
// Shorthand builders
// ---------------------------------------------------------------------------

/// `<Cell><Data ss:Type="String">text</Data></Cell>`
pub fn text_cell(text: &str) -> Node {
    Node::new("Cell").child(Node::new("Data").attr("ss:Type", "String").text(text))
}

/// `<Cell/>` with no payload.
pub fn blank_cell() -> Node {
    Node::new("Cell")
}

pub fn row(cells: Vec<Node>) -> Node {
    cells.into_iter().fold(Node::new("Row"), Node::child)
}

/// Workbook/Worksheet/Table wrapper; `extent` adds the expanded counts.
pub fn workbook(extent: Option<(usize, usize)>, rows: Vec<Node>) -> Doc {
    let mut table = Node::new("Table");
    if let Some((r, c)) = extent {
        table = table
            .attr("ss:ExpandedColumnCount", &c.to_string())
            .attr("ss:ExpandedRowCount", &r.to_string());
    }
    let table = rows.into_iter().fold(table, Node::child);
    Doc(Node::new("Workbook").child(Node::new("Worksheet").child(table)))
}
