//! Last-in-first-out stack.

use crate::element::Element;

/// Stack backed by a vector. Index 0 is the bottom.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stack {
    items: Vec<Element>,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: Element) {
        self.items.push(item);
    }

    pub fn pop(&mut self) -> Option<Element> {
        self.items.pop()
    }

    pub fn peek(&self) -> Option<&Element> {
        self.items.last()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Elements from bottom to top
    pub fn iter(&self) -> impl Iterator<Item = &Element> + '_ {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifo_order() {
        let mut stack = Stack::new();
        stack.push(Element::text("A"));
        stack.push(Element::text("B"));

        assert_eq!(stack.peek(), Some(&Element::text("B")));
        assert_eq!(stack.pop(), Some(Element::text("B")));
        assert_eq!(stack.pop(), Some(Element::text("A")));
        assert_eq!(stack.pop(), None);
        assert!(stack.is_empty());
    }

    #[test]
    fn test_iter_is_bottom_to_top() {
        let mut stack = Stack::new();
        for s in ["A", "B", "C"] {
            stack.push(Element::text(s));
        }
        let items: Vec<_> = stack.iter().map(|e| e.to_string()).collect();
        assert_eq!(items, ["A", "B", "C"]);
    }
}
