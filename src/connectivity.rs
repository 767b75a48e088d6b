//! Connected-component analysis over the maze grid.
//!
//! Three notions of "connected" coexist here. [`DisjointSets`] tracks which
//! cells the generator has already joined through open passages. [`fragments`]
//! groups cells by raw grid adjacency, ignoring passage flags, which is the
//! unit of work for generation and repair. [`open_components`] groups cells by
//! actual open-passage reachability, which is what gameplay cares about.

use crate::grid::{Direction, Grid};
use std::collections::VecDeque;

/// Union-find over cell arena ids, with path compression and union by size.
///
/// The generation strategies use this to answer "are these two cells already
/// mutually reachable" without repainting ids across the grid after every
/// merge.
#[derive(Clone, Debug)]
pub struct DisjointSets {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl DisjointSets {
    /// Creates one singleton set per arena slot.
    pub fn new(len: usize) -> Self {
        DisjointSets {
            parent: (0..len).collect(),
            size: vec![1; len],
        }
    }

    /// Creates sets pre-merged along every open passage whose endpoints both
    /// lie in `subset`, and returns them together with the number of sets
    /// covering `subset`.
    ///
    /// `subset` must not repeat ids. On a fully closed grid every subset cell
    /// starts alone, so the count is simply `subset.len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use mazeweave::connectivity::DisjointSets;
    /// use mazeweave::grid::{Direction, Grid};
    ///
    /// let mut grid = Grid::new(3, 1).unwrap();
    /// grid.set_passage(0, 0, Direction::Right, true).unwrap();
    ///
    /// let (mut sets, components) = DisjointSets::from_open_passages(&grid, &[0, 1, 2]);
    /// assert_eq!(components, 2);
    /// assert!(sets.connected(0, 1));
    /// assert!(!sets.connected(1, 2));
    /// ```
    pub fn from_open_passages(grid: &Grid, subset: &[usize]) -> (Self, usize) {
        let mut sets = DisjointSets::new(grid.cells().len());
        let mut in_subset = vec![false; grid.cells().len()];
        for &idx in subset {
            in_subset[idx] = true;
        }
        let mut components = subset.len();
        for &idx in subset {
            // Down and Right cover each passage exactly once
            for direction in [Direction::Down, Direction::Right] {
                if !grid.cells()[idx].is_open(direction) {
                    continue;
                }
                if let Some(neighbor) = grid.neighbor_index(idx, direction) {
                    if in_subset[neighbor] && sets.union(idx, neighbor) {
                        components -= 1;
                    }
                }
            }
        }
        (sets, components)
    }

    /// Returns the representative id of the set holding `i`.
    pub fn find(&mut self, i: usize) -> usize {
        let mut root = i;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // point everything on the walked path straight at the root
        let mut node = i;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    /// Merges the sets holding `a` and `b`.
    ///
    /// Returns `false` if they were already in the same set.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let mut root_a = self.find(a);
        let mut root_b = self.find(b);
        if root_a == root_b {
            return false;
        }
        if self.size[root_a] < self.size[root_b] {
            std::mem::swap(&mut root_a, &mut root_b);
        }
        self.parent[root_b] = root_a;
        self.size[root_a] += self.size[root_b];
        true
    }

    /// Returns whether `a` and `b` are in the same set.
    pub fn connected(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }
}

/// Returns the maximal groups of mutually grid-adjacent non-blocked cells, in
/// row-major discovery order.
///
/// Adjacency ignores passage flags: two side-by-side non-blocked cells share a
/// fragment even when the wall between them is closed. Blocked cells belong to
/// no fragment.
///
/// # Examples
///
/// ```
/// use mazeweave::connectivity::fragments;
/// use mazeweave::grid::Grid;
///
/// let mut grid = Grid::new(5, 1).unwrap();
/// grid.set_blocked(2, 0, true).unwrap();
///
/// let found = fragments(&grid);
/// assert_eq!(found.len(), 2);
/// ```
pub fn fragments(grid: &Grid) -> Vec<Vec<usize>> {
    let mut visited = vec![false; grid.cells().len()];
    let mut found = vec![];
    for idx in 0..grid.cells().len() {
        if let Some(fragment) = flood_fragment(grid, idx, &mut visited) {
            found.push(fragment);
        }
    }
    found
}

/// Returns the fragments containing at least one of `seeds`.
///
/// Each fragment is reported once no matter how many seeds land in it, and
/// blocked seeds are skipped.
pub fn fragments_from(grid: &Grid, seeds: &[usize]) -> Vec<Vec<usize>> {
    let mut visited = vec![false; grid.cells().len()];
    let mut found = vec![];
    for &idx in seeds {
        if let Some(fragment) = flood_fragment(grid, idx, &mut visited) {
            found.push(fragment);
        }
    }
    found
}

/// Iterative flood fill over grid adjacency from `start`.
///
/// Returns `None` when `start` is blocked or already claimed by an earlier
/// fill against the same `visited` buffer.
fn flood_fragment(grid: &Grid, start: usize, visited: &mut [bool]) -> Option<Vec<usize>> {
    if visited[start] || grid.cells()[start].is_blocked() {
        return None;
    }
    visited[start] = true;
    let mut fragment = vec![];
    let mut stack = vec![start];
    while let Some(idx) = stack.pop() {
        fragment.push(idx);
        for direction in Direction::ALL {
            if let Some(neighbor) = grid.neighbor_index(idx, direction) {
                if !visited[neighbor] && !grid.cells()[neighbor].is_blocked() {
                    visited[neighbor] = true;
                    stack.push(neighbor);
                }
            }
        }
    }
    Some(fragment)
}

/// Returns the groups of cells that are mutually reachable through open
/// passages.
///
/// Unlike [`fragments`], a non-blocked cell with every passage closed forms a
/// group of its own. A freshly generated fragment collapses into a single
/// group here.
pub fn open_components(grid: &Grid) -> Vec<Vec<usize>> {
    let mut visited = vec![false; grid.cells().len()];
    let mut components = vec![];
    for start in 0..grid.cells().len() {
        if visited[start] || grid.cells()[start].is_blocked() {
            continue;
        }
        visited[start] = true;
        let mut component = vec![];
        let mut stack = vec![start];
        while let Some(idx) = stack.pop() {
            component.push(idx);
            for direction in Direction::ALL {
                if !grid.cells()[idx].is_open(direction) {
                    continue;
                }
                if let Some(neighbor) = grid.neighbor_index(idx, direction) {
                    if !visited[neighbor] {
                        visited[neighbor] = true;
                        stack.push(neighbor);
                    }
                }
            }
        }
        components.push(component);
    }
    components
}

/// Returns whether `a` and `b` stay mutually reachable through open passages
/// when the direct passage between them is ignored.
///
/// The braid strategy asks this before closing a passage, so corridors whose
/// endpoints have no alternate route are left open.
pub fn connected_without_edge(grid: &Grid, a: usize, b: usize) -> bool {
    let mut visited = vec![false; grid.cells().len()];
    visited[a] = true;
    visited[b] = true;
    let mut queue = VecDeque::new();
    // breadth-first from a's other passages; b is only reachable via a detour
    for direction in Direction::ALL {
        if !grid.cells()[a].is_open(direction) {
            continue;
        }
        if let Some(neighbor) = grid.neighbor_index(a, direction) {
            if !visited[neighbor] {
                visited[neighbor] = true;
                queue.push_back(neighbor);
            }
        }
    }
    while let Some(idx) = queue.pop_front() {
        for direction in Direction::ALL {
            if !grid.cells()[idx].is_open(direction) {
                continue;
            }
            if let Some(neighbor) = grid.neighbor_index(idx, direction) {
                if neighbor == b {
                    return true;
                }
                if !visited[neighbor] {
                    visited[neighbor] = true;
                    queue.push_back(neighbor);
                }
            }
        }
    }
    false
}
