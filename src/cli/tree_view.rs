//! Rendering parsed trees with termtree

use termtree::Tree;

use crate::domain::Node;

pub trait ToTermTree {
    fn to_term_tree(&self) -> Tree<String>;
}

impl ToTermTree for Node {
    /// Simple values are folded into one label, `name = value`.
    fn to_term_tree(&self) -> Tree<String> {
        if self.is_simple_value() {
            if let Some(value) = self.first_value() {
                return Tree::new(format!("{} = {}", self.name(), value));
            }
        }

        let leaves: Vec<_> = self.children().iter().map(|c| c.to_term_tree()).collect();
        Tree::new(self.name().to_string()).with_leaves(leaves)
    }
}
