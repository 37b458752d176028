//! Unbalanced binary search tree.
//!
//! Values smaller than a node go left, everything else (including equal
//! values) goes right. There is no deletion and no rebalancing.

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;

use smallvec::SmallVec;

use crate::element::Element;

type Link = Option<Box<TreeNode>>;

pub struct TreeNode {
    value: Element,
    left: Link,
    right: Link,
}

impl TreeNode {
    fn new(value: Element) -> Self {
        Self {
            value,
            left: None,
            right: None,
        }
    }

    pub fn value(&self) -> &Element {
        &self.value
    }

    pub fn left(&self) -> Option<&TreeNode> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&TreeNode> {
        self.right.as_deref()
    }
}

#[derive(Default)]
pub struct BinarySearchTree {
    root: Link,
    len: usize,
}

impl BinarySearchTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn root(&self) -> Option<&TreeNode> {
        self.root.as_deref()
    }

    /// Insert a value. Ties go to the right subtree.
    pub fn insert(&mut self, value: Element) {
        let mut cursor = &mut self.root;
        while let Some(node) = cursor {
            cursor = if value < node.value {
                &mut node.left
            } else {
                &mut node.right
            };
        }
        *cursor = Some(Box::new(TreeNode::new(value)));
        self.len += 1;
    }

    /// Exact-match search along a single root-to-leaf path
    pub fn search(&self, value: &Element) -> bool {
        let mut cursor = self.root.as_deref();
        while let Some(node) = cursor {
            cursor = match value.cmp(&node.value) {
                Ordering::Equal => return true,
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
            };
        }
        false
    }

    /// Number of nodes on the longest root-to-leaf path
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut level: VecDeque<&TreeNode> = self.root.as_deref().into_iter().collect();
        while !level.is_empty() {
            height += 1;
            for _ in 0..level.len() {
                if let Some(node) = level.pop_front() {
                    level.extend(node.left.as_deref());
                    level.extend(node.right.as_deref());
                }
            }
        }
        height
    }

    /// Values in ascending order
    pub fn iter(&self) -> InOrder<'_> {
        let mut iter = InOrder {
            stack: SmallVec::new(),
        };
        iter.push_left_spine(self.root.as_deref());
        iter
    }

    /// Values in pre-order; re-inserting them rebuilds the same shape.
    fn preorder(&self) -> Vec<&Element> {
        let mut out = Vec::with_capacity(self.len);
        let mut stack: SmallVec<[&TreeNode; 16]> = self.root.as_deref().into_iter().collect();
        while let Some(node) = stack.pop() {
            out.push(&node.value);
            stack.extend(node.right.as_deref());
            stack.extend(node.left.as_deref());
        }
        out
    }
}

impl Clone for BinarySearchTree {
    fn clone(&self) -> Self {
        let mut tree = BinarySearchTree::new();
        for value in self.preorder() {
            tree.insert(value.clone());
        }
        tree
    }
}

impl fmt::Debug for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeNode")
            .field("value", &self.value)
            .field("left", &self.left().map(TreeNode::value))
            .field("right", &self.right().map(TreeNode::value))
            .finish()
    }
}

/// Two trees are equal when they hold the same values in the same shape
impl PartialEq for BinarySearchTree {
    fn eq(&self, other: &Self) -> bool {
        if self.len != other.len {
            return false;
        }
        let mut pending: Vec<(Option<&TreeNode>, Option<&TreeNode>)> =
            vec![(self.root(), other.root())];
        while let Some(pair) = pending.pop() {
            match pair {
                (None, None) => {}
                (Some(a), Some(b)) if a.value == b.value => {
                    pending.push((a.left(), b.left()));
                    pending.push((a.right(), b.right()));
                }
                _ => return false,
            }
        }
        true
    }
}

impl Eq for BinarySearchTree {}

impl fmt::Debug for BinarySearchTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinarySearchTree")
            .field("preorder", &self.preorder())
            .finish()
    }
}

impl Drop for BinarySearchTree {
    fn drop(&mut self) {
        let mut pending: Vec<Box<TreeNode>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }
}

/// In-order traversal iterator
pub struct InOrder<'a> {
    stack: SmallVec<[&'a TreeNode; 16]>,
}

impl<'a> InOrder<'a> {
    fn push_left_spine(&mut self, mut node: Option<&'a TreeNode>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a> Iterator for InOrder<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        Some(&node.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(values: &[i64]) -> BinarySearchTree {
        let mut t = BinarySearchTree::new();
        for &v in values {
            t.insert(Element::Int(v));
        }
        t
    }

    fn in_order(t: &BinarySearchTree) -> Vec<i64> {
        t.iter()
            .map(|e| match e {
                Element::Int(n) => *n,
                Element::Text(_) => panic!("unexpected text"),
            })
            .collect()
    }

    #[test]
    fn test_in_order_is_sorted() {
        let t = tree(&[50, 30, 70, 20, 40, 60, 80]);
        assert_eq!(in_order(&t), [20, 30, 40, 50, 60, 70, 80]);
        assert_eq!(t.len(), 7);
        assert_eq!(t.height(), 3);
    }

    #[test]
    fn test_ties_go_right() {
        let t = tree(&[5, 5]);
        assert_eq!(in_order(&t), [5, 5]);

        let root = t.root().unwrap();
        assert_eq!(root.value(), &Element::Int(5));
        assert!(root.left().is_none());
        assert_eq!(root.right().map(|n| n.value()), Some(&Element::Int(5)));
    }

    #[test]
    fn test_search() {
        let t = tree(&[10, 5, 15, 2, 7]);
        assert!(t.search(&Element::Int(7)));
        assert!(t.search(&Element::Int(10)));
        assert!(!t.search(&Element::Int(8)));
        assert!(!BinarySearchTree::new().search(&Element::Int(1)));
    }

    #[test]
    fn test_skewed_tree_height() {
        let t = tree(&[1, 2, 3, 4, 5]);
        assert_eq!(t.height(), 5);
        assert!(t.root().unwrap().left().is_none());
    }

    #[test]
    fn test_clone_keeps_shape() {
        let t = tree(&[8, 4, 12, 2, 6, 10, 14, 4]);
        let copy = t.clone();
        assert_eq!(t, copy);
        assert_eq!(copy.height(), t.height());
    }

    #[test]
    fn test_same_values_different_shape_differ() {
        let a = tree(&[2, 1, 3]);
        let b = tree(&[1, 2, 3]);
        assert_eq!(a.iter().collect::<Vec<_>>(), b.iter().collect::<Vec<_>>());
        assert_ne!(a, b);
    }

    #[test]
    fn test_skewed_tree_compares_without_recursion() {
        let values: Vec<i64> = (0..20_000).collect();
        let a = tree(&values);
        let b = a.clone();
        assert_eq!(a.height(), 20_000);
        assert_eq!(a, b);
        assert!(format!("{a:?}").starts_with("BinarySearchTree { preorder: [Int(0), Int(1)"));
    }

    #[test]
    fn test_mixed_elements_sort_ints_first() {
        let mut t = BinarySearchTree::new();
        t.insert(Element::text("B"));
        t.insert(Element::Int(3));
        t.insert(Element::text("A"));
        let values: Vec<_> = t.iter().map(|e| e.to_string()).collect();
        assert_eq!(values, ["3", "A", "B"]);
    }
}
