//! Tree display via termtree

use std::collections::HashSet;

use termtree::Tree;
use tracing::instrument;

use crate::domain::{DecisionTree, NodeRef};

/// Render `tree` from its entry question.
///
/// A question is expanded once; later references print `(see #n)`.
#[instrument(level = "debug", skip(tree))]
pub fn to_display_tree(tree: &DecisionTree) -> Tree<String> {
    let mut expanded = HashSet::new();
    question_node(tree, tree.entry(), &mut expanded)
}

fn question_node(tree: &DecisionTree, index: usize, expanded: &mut HashSet<usize>) -> Tree<String> {
    let Ok(question) = tree.question(index) else {
        return Tree::new(format!("#{} (missing)", index));
    };
    let root = format!("#{} {}", index, question.prompt);
    if !expanded.insert(index) {
        return Tree::new(format!("(see #{})", index));
    }

    let leaves: Vec<_> = [("yes", &question.on_yes), ("no", &question.on_no)]
        .into_iter()
        .map(|(label, edge)| match edge {
            NodeRef::Question(next) => {
                let mut child = question_node(tree, *next, expanded);
                child.root = format!("{}: {}", label, child.root);
                child
            }
            NodeRef::Result(classification) => {
                Tree::new(format!("{}: = {}", label, classification.label))
            }
        })
        .collect();

    Tree::new(root).with_leaves(leaves)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Classification, Question};

    #[test]
    fn given_shared_successor_when_rendering_then_second_reference_is_collapsed() {
        let tree = DecisionTree::new(vec![
            Question::new("a", NodeRef::Question(1), NodeRef::Question(1)),
            Question::new(
                "b",
                NodeRef::Result(Classification::new("X", "")),
                NodeRef::Result(Classification::new("Y", "")),
            ),
        ])
        .unwrap();

        let rendered = to_display_tree(&tree).to_string();

        assert!(rendered.starts_with("#0 a"));
        assert!(rendered.contains("yes: #1 b"));
        assert!(rendered.contains("no: (see #1)"));
        assert!(rendered.contains("yes: = X"));
    }
}
