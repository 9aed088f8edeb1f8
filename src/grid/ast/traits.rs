//! AST traits - Common interfaces for uniform node access
//!
//! Inspection formats (treeviz) walk the tree through [`AstNode`] so they do not
//! need to know every concrete node type.

/// Common interface for all AST nodes
pub trait AstNode {
    /// Short type name, e.g. `"GridRow"`
    fn node_type(&self) -> &'static str;

    /// Human readable one-line label
    fn display_label(&self) -> String;

    /// Child nodes in document order. Leaves return an empty list.
    fn children(&self) -> Vec<&dyn AstNode> {
        Vec::new()
    }
}
