//! First-in-first-out queue.

use std::collections::VecDeque;

use crate::element::Element;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Queue {
    items: VecDeque<Element>,
}

impl Queue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element at the back
    pub fn enqueue(&mut self, item: Element) {
        self.items.push_back(item);
    }

    /// Remove the element at the front
    pub fn dequeue(&mut self) -> Option<Element> {
        self.items.pop_front()
    }

    pub fn front(&self) -> Option<&Element> {
        self.items.front()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Elements from front to back
    pub fn iter(&self) -> impl Iterator<Item = &Element> + '_ {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut queue = Queue::new();
        queue.enqueue(Element::text("A"));
        queue.enqueue(Element::text("B"));

        assert_eq!(queue.front(), Some(&Element::text("A")));
        assert_eq!(queue.dequeue(), Some(Element::text("A")));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.dequeue(), Some(Element::text("B")));
        assert_eq!(queue.dequeue(), None);
    }
}
