//! Maze generation strategies and partial regeneration.

use crate::connectivity::{self, DisjointSets};
use crate::grid::{Direction, Grid, GridError};
use log::{debug, trace};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Enum for the interchangeable maze generation algorithms.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum GenerationStrategy {
    /// Starts from a fully closed field and opens passages between cells that
    /// are not yet mutually reachable, producing a perfect maze with exactly
    /// one route between any two cells.
    SpanningTree,
    /// Starts from a fully open field and closes passages one at a time,
    /// keeping every cell reachable and at least two sides open, producing a
    /// dense maze with no dead ends.
    BraidDensify,
}

/// Generates and repairs mazes on a [`Grid`] using the strategy chosen at
/// construction.
///
/// The generator holds no grid state of its own; randomness comes in through
/// the caller's [`Rng`], so a seeded generator reproduces the same maze.
///
/// # Examples
///
/// ```
/// use mazeweave::generate::{GenerationStrategy, MazeGenerator};
/// use mazeweave::grid::Grid;
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let mut grid = Grid::new(22, 18).unwrap();
/// let mut rng = StdRng::seed_from_u64(42);
/// MazeGenerator::new(GenerationStrategy::SpanningTree).generate(&mut grid, &mut rng);
///
/// assert_eq!(mazeweave::connectivity::open_components(&grid).len(), 1);
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct MazeGenerator {
    strategy: GenerationStrategy,
}

impl MazeGenerator {
    /// Creates a generator using the given strategy.
    pub fn new(strategy: GenerationStrategy) -> Self {
        MazeGenerator { strategy }
    }

    /// Returns the strategy this generator weaves with.
    pub fn strategy(&self) -> GenerationStrategy {
        self.strategy
    }

    /// Generates a fresh maze over every fragment of the grid.
    ///
    /// Existing passages are discarded; blocked cells stay blocked and keep
    /// their walls. Each fragment is woven independently, so a grid split by
    /// blocked cells ends up with one maze per fragment.
    pub fn generate<R: Rng>(&self, grid: &mut Grid, rng: &mut R) {
        if self.strategy == GenerationStrategy::SpanningTree {
            grid.close_all_passages();
        }
        let fragments = connectivity::fragments(grid);
        for fragment in &fragments {
            trace!("weaving fragment of {} cells", fragment.len());
            self.weave(grid, fragment, rng);
        }
        debug!(
            "generated {:?} maze across {} fragment(s)",
            self.strategy,
            fragments.len()
        );
    }

    /// Blocks every cell in `cells`, then re-weaves the fragments that lost a
    /// passage to the blocked area.
    ///
    /// Fails without touching the grid if any coordinate is out of bounds.
    /// Fragments that kept all their passages are left exactly as they were,
    /// so repeating a blast over already-blocked cells changes nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use mazeweave::generate::{GenerationStrategy, MazeGenerator};
    /// use mazeweave::grid::Grid;
    /// use rand::rngs::StdRng;
    /// use rand::SeedableRng;
    ///
    /// let mut grid = Grid::new(8, 8).unwrap();
    /// let mut rng = StdRng::seed_from_u64(7);
    /// let generator = MazeGenerator::new(GenerationStrategy::BraidDensify);
    /// generator.generate(&mut grid, &mut rng);
    ///
    /// generator
    ///     .mark_blocked_and_regenerate(&mut grid, &[(3, 3), (4, 3)], &mut rng)
    ///     .unwrap();
    /// assert!(grid.cell_at(3, 3).unwrap().is_blocked());
    /// ```
    pub fn mark_blocked_and_regenerate<R: Rng>(
        &self,
        grid: &mut Grid,
        cells: &[(i32, i32)],
        rng: &mut R,
    ) -> Result<(), GridError> {
        let mut indices = Vec::with_capacity(cells.len());
        for &(x, y) in cells {
            indices.push(
                grid.index_of(x, y)
                    .ok_or(GridError::OutOfBounds { x, y })?,
            );
        }

        // wall off the selection, remembering which neighbors lost a passage
        let mut seeds = vec![];
        for &idx in &indices {
            for direction in Direction::ALL {
                if grid.cells()[idx].is_open(direction) {
                    if let Some(neighbor) = grid.neighbor_index(idx, direction) {
                        seeds.push(neighbor);
                    }
                }
            }
            grid.block_by_index(idx);
        }
        seeds.retain(|&idx| !grid.cells()[idx].is_blocked());

        let affected = connectivity::fragments_from(grid, &seeds);
        for fragment in &affected {
            trace!("re-weaving fragment of {} cells", fragment.len());
            self.weave(grid, fragment, rng);
        }
        debug!(
            "blocked {} cell(s), re-wove {} fragment(s)",
            indices.len(),
            affected.len()
        );
        Ok(())
    }

    fn weave<R: Rng>(&self, grid: &mut Grid, subset: &[usize], rng: &mut R) {
        match self.strategy {
            GenerationStrategy::SpanningTree => spanning_tree_weave(grid, subset, rng),
            GenerationStrategy::BraidDensify => braid_weave(grid, subset, rng),
        }
    }
}

/// Joins `subset` into a single open component by opening passages between
/// cells whose sets are not yet merged.
///
/// `subset` must be connected by grid adjacency, or the draw loop cannot
/// finish. Passages already open inside the subset are kept and pre-merged, so
/// re-weaving a damaged fragment only fills in what is missing.
fn spanning_tree_weave<R: Rng>(grid: &mut Grid, subset: &[usize], rng: &mut R) {
    if subset.len() <= 1 {
        return;
    }
    let mut in_subset = vec![false; grid.cells().len()];
    for &idx in subset {
        in_subset[idx] = true;
    }

    let (mut sets, mut components) = DisjointSets::from_open_passages(grid, subset);
    while components > 1 {
        let idx = subset[rng.gen_range(0..subset.len())];
        let direction = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
        let Some(neighbor) = grid.neighbor_index(idx, direction) else {
            continue;
        };
        if !in_subset[neighbor] || !sets.union(idx, neighbor) {
            continue;
        }
        grid.set_passage_by_index(idx, direction, true);
        components -= 1;
    }
}

/// Opens every passage inside `subset`, then walks the walls in random order
/// and closes each one that leaves the maze connected and no endpoint with
/// more than two closed sides.
fn braid_weave<R: Rng>(grid: &mut Grid, subset: &[usize], rng: &mut R) {
    let mut in_subset = vec![false; grid.cells().len()];
    for &idx in subset {
        in_subset[idx] = true;
    }

    for &idx in subset {
        // Down and Right cover each passage exactly once
        for direction in [Direction::Down, Direction::Right] {
            if let Some(neighbor) = grid.neighbor_index(idx, direction) {
                if in_subset[neighbor] {
                    grid.set_passage_by_index(idx, direction, true);
                }
            }
        }
    }

    // each passage is listed once per endpoint, so doubly-eligible walls get
    // two chances in the shuffle
    let mut walls = vec![];
    for &idx in subset {
        for direction in Direction::ALL {
            if !grid.cells()[idx].is_open(direction) {
                continue;
            }
            if let Some(neighbor) = grid.neighbor_index(idx, direction) {
                if in_subset[neighbor] {
                    walls.push((idx, direction));
                }
            }
        }
    }
    walls.shuffle(rng);

    for (idx, direction) in walls {
        if !grid.cells()[idx].is_open(direction) {
            continue;
        }
        if grid.cells()[idx].closed_sides() >= 2 {
            continue;
        }
        let Some(neighbor) = grid.neighbor_index(idx, direction) else {
            continue;
        };
        if grid.cells()[neighbor].closed_sides() >= 2 {
            continue;
        }
        if !connectivity::connected_without_edge(grid, idx, neighbor) {
            continue;
        }
        grid.set_passage_by_index(idx, direction, false);
    }
}
