//! Dijkstra's shortest-path algorithm over any heap in this crate.
//!
//! The solver is generic over [`MinHeap`], which is the whole point: the
//! choice of heap variant changes the asymptotic cost (binary:
//! O((V + E) log V), Fibonacci: O(E + V log V)) but never the computed
//! distances or the order in which vertices settle. Vertices still queued
//! are re-prioritized with `decrease_key` when a shorter path is found.

use crate::traits::{MinHeap, Weight};

/// Weighted directed graph over adjacency lists. Vertices are `0..n`.
pub struct Graph<W> {
    adjacency: Vec<Vec<(usize, W)>>,
}

impl<W: Weight> Graph<W> {
    /// Creates a graph with `vertices` vertices and no edges.
    pub fn new(vertices: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); vertices],
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Adds a directed edge. Panics if either endpoint is out of range.
    pub fn add_edge(&mut self, source: usize, destination: usize, weight: W) {
        assert!(source < self.adjacency.len(), "source out of range");
        assert!(destination < self.adjacency.len(), "destination out of range");
        self.adjacency[source].push((destination, weight));
    }

    /// Adds the edge in both directions.
    pub fn add_edge_undirected(&mut self, a: usize, b: usize, weight: W) {
        self.add_edge(a, b, weight);
        self.add_edge(b, a, weight);
    }

    pub fn neighbors(&self, vertex: usize) -> &[(usize, W)] {
        &self.adjacency[vertex]
    }
}

/// Single-source shortest-path result: per-vertex distance and predecessor.
pub struct ShortestPaths<W> {
    source: usize,
    distance: Vec<Option<W>>,
    predecessor: Vec<Option<usize>>,
}

impl<W: Weight> ShortestPaths<W> {
    /// Distance from the source, or `None` if the vertex is unreachable.
    pub fn distance(&self, vertex: usize) -> Option<W> {
        self.distance[vertex]
    }

    /// The vertex sequence of a shortest path from the source to `vertex`,
    /// or `None` if unreachable.
    pub fn path(&self, vertex: usize) -> Option<Vec<usize>> {
        self.distance[vertex]?;

        let mut path = vec![vertex];
        let mut current = vertex;
        while current != self.source {
            current = self.predecessor[current].expect("reachable non-source vertex has a predecessor");
            path.push(current);
        }
        path.reverse();
        Some(path)
    }
}

/// Runs Dijkstra's algorithm from `source`, using `H` as the open set.
///
/// The heap holds `(tentative distance, vertex)` entries; discovering a
/// shorter path to a queued vertex lowers its key in place. The solver owns
/// the heap for the duration of the run.
pub fn dijkstra<W, H>(graph: &Graph<W>, source: usize) -> ShortestPaths<W>
where
    W: Weight,
    H: MinHeap<W, usize>,
{
    let n = graph.vertex_count();
    let mut distance: Vec<Option<W>> = vec![None; n];
    let mut predecessor: Vec<Option<usize>> = vec![None; n];
    let mut settled = vec![false; n];

    let mut queue = H::new();
    distance[source] = Some(W::default());
    queue
        .insert(W::default(), source)
        .expect("source inserted into a fresh heap");

    while let Ok((dist, vertex)) = queue.extract_minimum() {
        settled[vertex] = true;

        for &(next, weight) in graph.neighbors(vertex) {
            if settled[next] {
                continue;
            }
            let candidate = dist + weight;
            match distance[next] {
                Some(best) if best <= candidate => {}
                Some(_) => {
                    distance[next] = Some(candidate);
                    predecessor[next] = Some(vertex);
                    queue
                        .decrease_key(&next, candidate)
                        .expect("shorter path strictly decreases the queued key");
                }
                None => {
                    distance[next] = Some(candidate);
                    predecessor[next] = Some(vertex);
                    queue
                        .insert(candidate, next)
                        .expect("undiscovered vertex is not yet queued");
                }
            }
        }
    }

    ShortestPaths {
        source,
        distance,
        predecessor,
    }
}
