//! Undirected simple graph stored as adjacency lists.

use std::collections::HashMap;

use crate::element::Element;

/// Undirected graph. Vertices keep their first insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    order: Vec<Element>,
    adjacency: HashMap<Element, Vec<Element>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex. Returns `false` if it was already present.
    pub fn add_vertex(&mut self, vertex: Element) -> bool {
        if self.adjacency.contains_key(&vertex) {
            return false;
        }
        self.order.push(vertex.clone());
        self.adjacency.insert(vertex, Vec::new());
        true
    }

    /// Connect two vertices, adding either endpoint if missing.
    ///
    /// Returns `false` when no new edge was created (duplicate edge or self-loop).
    pub fn add_edge(&mut self, a: Element, b: Element) -> bool {
        self.add_vertex(a.clone());
        self.add_vertex(b.clone());
        if a == b || self.has_edge(&a, &b) {
            return false;
        }
        if let Some(edges) = self.adjacency.get_mut(&a) {
            edges.push(b.clone());
        }
        if let Some(edges) = self.adjacency.get_mut(&b) {
            edges.push(a);
        }
        true
    }

    /// Remove a vertex and every edge touching it. Missing vertices are ignored.
    pub fn remove_vertex(&mut self, vertex: &Element) -> bool {
        let Some(neighbors) = self.adjacency.remove(vertex) else {
            return false;
        };
        for neighbor in &neighbors {
            if let Some(edges) = self.adjacency.get_mut(neighbor) {
                edges.retain(|v| v != vertex);
            }
        }
        self.order.retain(|v| v != vertex);
        true
    }

    pub fn contains(&self, vertex: &Element) -> bool {
        self.adjacency.contains_key(vertex)
    }

    pub fn has_edge(&self, a: &Element, b: &Element) -> bool {
        self.adjacency
            .get(a)
            .is_some_and(|edges| edges.contains(b))
    }

    pub fn neighbors(&self, vertex: &Element) -> &[Element] {
        self.adjacency
            .get(vertex)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn vertex_count(&self) -> usize {
        self.order.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum::<usize>() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Vertices in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Element> + '_ {
        self.order.iter()
    }
}
