//! Singly linked list with positional insert and delete.

use std::fmt;

use crate::element::Element;

type Link = Option<Box<Node>>;

struct Node {
    data: Element,
    next: Link,
}

/// Singly linked list. Positions are zero-based from the head.
#[derive(Default)]
pub struct LinkedList {
    head: Link,
    len: usize,
}

impl LinkedList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Insert `data` before the element currently at `position`.
    ///
    /// `None`, or a position past the last element, appends at the tail.
    pub fn insert(&mut self, data: Element, position: Option<usize>) {
        let index = match position {
            Some(p) if p < self.len => p,
            _ => self.len,
        };

        let mut cursor = &mut self.head;
        for _ in 0..index {
            match cursor {
                Some(node) => cursor = &mut node.next,
                None => break,
            }
        }

        let next = cursor.take();
        *cursor = Some(Box::new(Node { data, next }));
        self.len += 1;
    }

    /// Remove the element at `position`, or the tail when `position` is `None`.
    ///
    /// Returns `None` when the list is empty or the position is out of range.
    pub fn delete(&mut self, position: Option<usize>) -> Option<Element> {
        if self.len == 0 {
            return None;
        }
        let index = position.unwrap_or(self.len - 1);
        if index >= self.len {
            return None;
        }

        let mut cursor = &mut self.head;
        for _ in 0..index {
            match cursor {
                Some(node) => cursor = &mut node.next,
                None => return None,
            }
        }

        let node = cursor.take()?;
        let Node { data, next } = *node;
        *cursor = next;
        self.len -= 1;
        Some(data)
    }

    pub fn get(&self, position: usize) -> Option<&Element> {
        self.iter().nth(position)
    }

    /// Elements from head to tail
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            next: self.head.as_deref(),
        }
    }
}

impl FromIterator<Element> for LinkedList {
    fn from_iter<I: IntoIterator<Item = Element>>(iter: I) -> Self {
        let mut head: Link = None;
        let mut len = 0;
        let mut tail = &mut head;
        for data in iter {
            let node = tail.insert(Box::new(Node { data, next: None }));
            tail = &mut node.next;
            len += 1;
        }
        Self { head, len }
    }
}

impl Clone for LinkedList {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

// Comparison and formatting walk the nodes in a loop, so long lists never
// recurse once per node.
impl PartialEq for LinkedList {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl Eq for LinkedList {}

impl fmt::Debug for LinkedList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl Drop for LinkedList {
    fn drop(&mut self) {
        let mut link = self.head.take();
        while let Some(mut node) = link {
            link = node.next.take();
        }
    }
}

/// Borrowing iterator over a [`LinkedList`]
pub struct Iter<'a> {
    next: Option<&'a Node>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            &node.data
        })
    }
}
