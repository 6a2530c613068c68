//! Input contract: the parsed XML Spreadsheet tree.
//!
//! The engine never parses XML itself. Anything that can hand out elements
//! by qualified tag name, answer attribute queries and produce text content
//! can be pasted from (`pastegrid-io` ships a quick-xml backed tree).
//!
//! Lookups follow DOM `getElementsByTagName` semantics: all descendants in
//! document order, matched on the qualified name exactly as written
//! (`Row`, `ss:Index`). A comment's `<ss:Data>` is therefore never confused
//! with the cell's own `<Data>`.

pub const TABLE_TAG: &str = "Table";
pub const ROW_TAG: &str = "Row";
pub const CELL_TAG: &str = "Cell";
pub const DATA_TAG: &str = "Data";

pub const INDEX_ATTR: &str = "ss:Index";
pub const TYPE_ATTR: &str = "ss:Type";
pub const ROW_COUNT_ATTR: &str = "ss:ExpandedRowCount";
pub const COLUMN_COUNT_ATTR: &str = "ss:ExpandedColumnCount";
pub const MERGE_ACROSS_ATTR: &str = "ss:MergeAcross";
pub const MERGE_DOWN_ATTR: &str = "ss:MergeDown";

/// `ss:Type` value marking a date payload.
pub const DATE_TIME_TYPE: &str = "DateTime";

/// A read-only element of the source tree.
pub trait SpreadsheetElement {
    /// Qualified tag name, e.g. `"Cell"` or `"ss:Data"`.
    fn tag(&self) -> &str;

    /// All descendants (not including `self`) with the given tag, in
    /// document order.
    fn elements_by_tag(&self, tag: &str) -> Vec<&Self>;

    fn attribute(&self, name: &str) -> Option<&str>;

    fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// Concatenated text of every descendant text node.
    fn text_content(&self) -> String;
}

/// Document-level entry point.
pub trait SpreadsheetDocument {
    type Element: SpreadsheetElement;

    /// Every element in the document with the given tag, root included, in
    /// document order.
    fn elements_by_tag(&self, tag: &str) -> Vec<&Self::Element>;
}
