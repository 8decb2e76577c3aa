//! Authoring check for decision trees.
//!
//! Traversal never consults this; it is run on demand (`rsdiag check`) to
//! catch content mistakes such as orphaned questions or loops.

use std::collections::BTreeSet;

use tracing::instrument;

use crate::domain::entities::NodeRef;
use crate::domain::tree::DecisionTree;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeReport {
    pub question_count: usize,
    /// Distinct classification labels reachable from the entry
    pub result_labels: BTreeSet<String>,
    pub reachable: BTreeSet<usize>,
    pub unreachable: Vec<usize>,
    /// A question on some loop reachable from the entry
    pub cycle_at: Option<usize>,
    /// Most questions asked on any root-to-leaf walk, `None` if a cycle exists
    pub longest_walk: Option<usize>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnStack,
    Done,
}

impl TreeReport {
    #[instrument(level = "debug", skip(tree))]
    pub fn analyze(tree: &DecisionTree) -> Self {
        let len = tree.len();
        let mut marks = vec![Mark::Unvisited; len];
        // deepest walk starting at each question, filled post-order
        let mut depth = vec![0usize; len];
        let mut reachable = BTreeSet::new();
        let mut result_labels = BTreeSet::new();
        let mut cycle_at = None;

        // iterative DFS: (question, children already pushed)
        let mut stack = vec![(tree.entry(), false)];
        while let Some((idx, expanded)) = stack.pop() {
            let question = match tree.questions().get(idx) {
                Some(question) => question,
                None => continue,
            };
            if expanded {
                depth[idx] = 1 + question
                    .edges()
                    .iter()
                    .map(|edge| match edge {
                        NodeRef::Question(next) => depth[*next],
                        NodeRef::Result(_) => 0,
                    })
                    .max()
                    .unwrap_or(0);
                marks[idx] = Mark::Done;
                continue;
            }
            if marks[idx] != Mark::Unvisited {
                continue;
            }
            marks[idx] = Mark::OnStack;
            reachable.insert(idx);
            stack.push((idx, true));

            for edge in question.edges() {
                match edge {
                    NodeRef::Question(next) => match marks.get(*next) {
                        Some(Mark::Unvisited) => stack.push((*next, false)),
                        Some(Mark::OnStack) => {
                            cycle_at.get_or_insert(*next);
                        }
                        _ => {}
                    },
                    NodeRef::Result(classification) => {
                        result_labels.insert(classification.label.clone());
                    }
                }
            }
        }

        let unreachable = (0..len).filter(|idx| !reachable.contains(idx)).collect();
        let longest_walk = match cycle_at {
            Some(_) => None,
            None => Some(depth[tree.entry()]),
        };

        Self {
            question_count: len,
            result_labels,
            reachable,
            unreachable,
            cycle_at,
            longest_walk,
        }
    }

    /// No orphans and no loops.
    pub fn is_clean(&self) -> bool {
        self.unreachable.is_empty() && self.cycle_at.is_none()
    }
}
