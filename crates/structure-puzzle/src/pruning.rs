//! Search space pruning rules for the solver.
//!
//! These rules detect moves and states that can never lead to a shortest
//! win, allowing the solver to skip large portions of the search space.

use crate::element::Element;
use crate::operation::{Operation, OperationKind};
use crate::puzzle::{Level, StructureKind};

/// Check if `next` immediately undoes `prev`
pub fn is_redundant_pair(prev: &Operation, next: &Operation) -> bool {
    match (prev, next) {
        // push X, pop
        (Operation::Push { .. }, Operation::Pop) => true,

        // insert at p, delete at p
        (
            Operation::Insert {
                position: Some(p), ..
            },
            Operation::Delete { position: Some(q) },
        ) => p == q,
        (Operation::Insert { position: None, .. }, Operation::Delete { position: None }) => true,

        // add vertex V, remove vertex V
        (Operation::AddVertex { value: a }, Operation::RemoveVertex { value: b }) => a == b,

        // Two searches never change anything
        (Operation::Search { .. }, Operation::Search { .. }) => true,

        _ => false,
    }
}

/// Operations worth trying from a state that exports `current`.
///
/// Values are drawn from `values`, normally the distinct elements of the
/// level's initial and target sequences.
pub fn candidate_operations(
    level: &Level,
    current: &[Element],
    values: &[Element],
) -> Vec<Operation> {
    let mut candidates = Vec::new();
    let len = current.len();

    for &kind in &level.operations {
        match kind {
            OperationKind::Pop => candidates.push(Operation::Pop),
            OperationKind::Dequeue => candidates.push(Operation::Dequeue),
            OperationKind::Push => candidates.extend(
                values
                    .iter()
                    .map(|v| Operation::Push { value: v.clone() }),
            ),
            OperationKind::Enqueue => candidates.extend(
                values
                    .iter()
                    .map(|v| Operation::Enqueue { value: v.clone() }),
            ),
            OperationKind::InsertTree => candidates.extend(
                values
                    .iter()
                    .map(|v| Operation::InsertTree { value: v.clone() }),
            ),
            OperationKind::AddVertex => candidates.extend(
                values
                    .iter()
                    .map(|v| Operation::AddVertex { value: v.clone() }),
            ),
            OperationKind::Insert => {
                for value in values {
                    for position in 0..len {
                        candidates.push(Operation::Insert {
                            value: value.clone(),
                            position: Some(position),
                        });
                    }
                    candidates.push(Operation::Insert {
                        value: value.clone(),
                        position: None,
                    });
                }
            }
            OperationKind::Delete => {
                // `None` deletes the tail, same as `Some(len - 1)`
                candidates.extend((0..len).map(|p| Operation::Delete { position: Some(p) }));
            }
            OperationKind::Search => {
                // Searching never changes the tree, so one value is enough
                if let Some(value) = current.first() {
                    candidates.push(Operation::Search {
                        value: value.clone(),
                    });
                }
            }
            OperationKind::RemoveVertex => candidates.extend(
                current
                    .iter()
                    .map(|v| Operation::RemoveVertex { value: v.clone() }),
            ),
            OperationKind::AddEdge => {
                // A self-loop only adds its vertex
                for from in values {
                    for to in values {
                        candidates.push(Operation::AddEdge {
                            from: from.clone(),
                            to: to.clone(),
                        });
                    }
                }
            }
        }
    }

    candidates
}

/// Check if no sequence of legal moves can turn `current` into `target`
pub fn is_dead_end(level: &Level, current: &[Element], target: &[Element]) -> bool {
    if !level.allows_removal() {
        // Elements only accumulate
        let reachable = match level.structure {
            StructureKind::Stack | StructureKind::Queue | StructureKind::Graph => {
                target.starts_with(current)
            }
            StructureKind::LinkedList | StructureKind::Tree => is_subsequence(current, target),
        };
        if !reachable {
            return true;
        }
    }

    if !level.allows_insertion() {
        // Elements only drain
        let reachable = match level.structure {
            StructureKind::Stack => current.starts_with(target),
            StructureKind::Queue => current.ends_with(target),
            StructureKind::LinkedList | StructureKind::Tree | StructureKind::Graph => {
                is_subsequence(target, current)
            }
        };
        if !reachable {
            return true;
        }
    }

    false
}

/// A lower bound on the moves needed to get from `current` to `target`.
///
/// Exact for stacks and queues when both insert and remove are legal.
pub fn remaining_moves_lower_bound(level: &Level, current: &[Element], target: &[Element]) -> usize {
    match level.structure {
        StructureKind::Stack => {
            let common = current
                .iter()
                .zip(target)
                .take_while(|(a, b)| a == b)
                .count();
            (current.len() - common) + (target.len() - common)
        }
        StructureKind::Queue => (0..=current.len())
            .filter(|&k| target.starts_with(&current[k..]))
            .map(|k| k + target.len() - (current.len() - k))
            .min()
            .unwrap_or(current.len() + target.len()),
        StructureKind::LinkedList | StructureKind::Tree => {
            let common = longest_common_subsequence(current, target);
            current.len() + target.len() - 2 * common
        }
        StructureKind::Graph => {
            // New vertices are always appended, so only a prefix of the
            // target can survive from the current vertex list
            let mut kept = 0;
            for vertex in current {
                if target.get(kept) == Some(vertex) {
                    kept += 1;
                }
            }
            let missing = target.len() - kept;
            let additions = if level.allows(OperationKind::AddEdge) {
                // One edge can bring in two vertices
                missing.div_ceil(2)
            } else {
                missing
            };
            current.len() - kept + additions
        }
    }
}

fn is_subsequence(needle: &[Element], haystack: &[Element]) -> bool {
    let mut rest = haystack.iter();
    needle.iter().all(|n| rest.any(|h| h == n))
}

fn longest_common_subsequence(a: &[Element], b: &[Element]) -> usize {
    let mut row = vec![0usize; b.len() + 1];
    for x in a {
        let mut diagonal = 0;
        for (j, y) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if x == y {
                diagonal + 1
            } else {
                above.max(row[j])
            };
            diagonal = above;
        }
    }
    row[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::Difficulty;

    fn seq(items: &str) -> Vec<Element> {
        items.chars().map(|c| Element::text(&c.to_string())).collect()
    }

    fn level(structure: StructureKind, operations: Vec<OperationKind>) -> Level {
        Level::new(
            structure,
            1,
            "Test",
            Difficulty::Easy,
            Vec::new(),
            Vec::new(),
            operations,
            10,
        )
    }

    #[test]
    fn test_push_pop_is_redundant() {
        let push = Operation::Push {
            value: Element::text("A"),
        };
        assert!(is_redundant_pair(&push, &Operation::Pop));
        assert!(!is_redundant_pair(&Operation::Pop, &push));
        assert!(!is_redundant_pair(
            &Operation::Enqueue {
                value: Element::text("A")
            },
            &Operation::Dequeue
        ));
    }

    #[test]
    fn test_insert_delete_same_position_is_redundant() {
        let insert = Operation::Insert {
            value: Element::text("A"),
            position: Some(1),
        };
        assert!(is_redundant_pair(&insert, &Operation::Delete { position: Some(1) }));
        assert!(!is_redundant_pair(&insert, &Operation::Delete { position: Some(0) }));
    }

    #[test]
    fn test_add_remove_vertex_is_redundant() {
        let add = Operation::AddVertex {
            value: Element::text("A"),
        };
        let remove_a = Operation::RemoveVertex {
            value: Element::text("A"),
        };
        let remove_b = Operation::RemoveVertex {
            value: Element::text("B"),
        };
        assert!(is_redundant_pair(&add, &remove_a));
        assert!(!is_redundant_pair(&add, &remove_b));
    }

    #[test]
    fn test_candidates_for_list() {
        let l = level(
            StructureKind::LinkedList,
            vec![OperationKind::Insert, OperationKind::Delete],
        );
        let candidates = candidate_operations(&l, &seq("AB"), &seq("XY"));
        // 2 values * (2 positions + append) + 2 deletions
        assert_eq!(candidates.len(), 8);
    }

    #[test]
    fn test_candidates_skip_search_on_empty_tree() {
        let l = level(StructureKind::Tree, vec![OperationKind::Search]);
        assert!(candidate_operations(&l, &[], &seq("A")).is_empty());
        assert_eq!(candidate_operations(&l, &seq("AB"), &seq("A")).len(), 1);
    }

    #[test]
    fn test_dead_end_without_removal() {
        let push_only = level(StructureKind::Stack, vec![OperationKind::Push]);
        assert!(!is_dead_end(&push_only, &seq("AB"), &seq("ABC")));
        assert!(is_dead_end(&push_only, &seq("AC"), &seq("ABC")));

        let insert_only = level(StructureKind::LinkedList, vec![OperationKind::Insert]);
        assert!(!is_dead_end(&insert_only, &seq("AC"), &seq("ABC")));
        assert!(is_dead_end(&insert_only, &seq("CA"), &seq("ABC")));
    }

    #[test]
    fn test_dead_end_without_insertion() {
        let dequeue_only = level(StructureKind::Queue, vec![OperationKind::Dequeue]);
        assert!(!is_dead_end(&dequeue_only, &seq("ABC"), &seq("BC")));
        assert!(is_dead_end(&dequeue_only, &seq("ABC"), &seq("AB")));

        let remove_only = level(StructureKind::Graph, vec![OperationKind::RemoveVertex]);
        assert!(is_dead_end(&remove_only, &seq("ABCDEF"), &seq("XYZ")));
        assert!(!is_dead_end(&remove_only, &seq("ABCDE"), &seq("A")));
    }

    #[test]
    fn test_stack_bound_is_exact() {
        let l = level(StructureKind::Stack, vec![OperationKind::Push, OperationKind::Pop]);
        assert_eq!(remaining_moves_lower_bound(&l, &seq("ABCDE"), &seq("EDCBA")), 10);
        assert_eq!(remaining_moves_lower_bound(&l, &seq("AB"), &seq("ABA")), 1);
    }

    #[test]
    fn test_queue_bound_is_exact() {
        let l = level(
            StructureKind::Queue,
            vec![OperationKind::Enqueue, OperationKind::Dequeue],
        );
        // dequeue A, enqueue A
        assert_eq!(remaining_moves_lower_bound(&l, &seq("ABC"), &seq("BCA")), 2);
        assert_eq!(remaining_moves_lower_bound(&l, &seq("ABCD"), &seq("BDAC")), 8);
    }

    #[test]
    fn test_list_and_graph_bounds() {
        let list = level(
            StructureKind::LinkedList,
            vec![OperationKind::Insert, OperationKind::Delete],
        );
        assert_eq!(remaining_moves_lower_bound(&list, &seq("ABC"), &seq("ACB")), 2);

        let graph = level(
            StructureKind::Graph,
            vec![OperationKind::AddVertex, OperationKind::RemoveVertex],
        );
        assert_eq!(remaining_moves_lower_bound(&graph, &seq("ABC"), &seq("AXYC")), 5);
        assert_eq!(remaining_moves_lower_bound(&graph, &seq("AB"), &seq("AB")), 0);
    }

    #[test]
    fn test_edges_halve_graph_additions() {
        let graph = level(
            StructureKind::Graph,
            vec![OperationKind::AddEdge, OperationKind::RemoveVertex],
        );
        assert_eq!(remaining_moves_lower_bound(&graph, &[], &seq("ABC")), 2);
        assert_eq!(remaining_moves_lower_bound(&graph, &seq("AZ"), &seq("AB")), 2);
    }
}
