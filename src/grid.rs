//! Logical maze grid structs and spatial queries.

use crate::constants::CELL_SIZE_PX;
use nalgebra::Point2;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned by [`Grid`] constructors and coordinate-taking operations.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum GridError {
    /// Grids must be at least 1x1 cells
    #[error("grid dimensions {width}x{height} are invalid")]
    InvalidDimensions {
        /// Requested width, in cells
        width: i32,
        /// Requested height, in cells
        height: i32,
    },
    /// Cell coordinates outside `[0, width) x [0, height)`
    #[error("coordinates ({x}, {y}) are outside the grid")]
    OutOfBounds {
        /// Requested x coordinate
        x: i32,
        /// Requested y coordinate
        y: i32,
    },
}

/// Enum for passage direction values.
///
/// Declaration order is the iteration order everywhere the crate walks a
/// cell's sides, and matches the layout of the per-cell passage flags.
#[derive(
    Copy, Clone, Debug, Eq, PartialEq, Hash, IntoPrimitive, TryFromPrimitive, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum Direction {
    /// Toward the previous row; `y` grows downward
    Up = 0,
    /// Toward the next row
    Down = 1,
    /// Toward the previous column
    Left = 2,
    /// Toward the next column
    Right = 3,
}

impl Direction {
    /// All directions, in declaration order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Returns the direction pointing the opposite way.
    ///
    /// # Examples
    ///
    /// ```
    /// use mazeweave::grid::Direction;
    ///
    /// assert_eq!(Direction::Up.opposite(), Direction::Down);
    /// assert_eq!(Direction::Left.opposite(), Direction::Right);
    /// ```
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Returns the `(dx, dy)` step one cell in this direction.
    ///
    /// # Examples
    ///
    /// ```
    /// use mazeweave::grid::Direction;
    ///
    /// assert_eq!(Direction::Up.offset(), (0, -1));
    /// assert_eq!(Direction::Right.offset(), (1, 0));
    /// ```
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// An axis-aligned rectangle in pixel space.
///
/// `min` is the top left corner (inclusive) and `max` the bottom right corner
/// (exclusive), so a rectangle covers the half-open spans `[min.x, max.x)` and
/// `[min.y, max.y)`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Rect {
    /// Top left corner (inclusive)
    pub min: Point2<i32>,
    /// Bottom right corner (exclusive)
    pub max: Point2<i32>,
}

impl Rect {
    /// Creates a rectangle from its top left corner and extent.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Rect {
            min: Point2::new(x, y),
            max: Point2::new(x + width, y + height),
        }
    }

    /// Returns whether the rectangle covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    /// Returns whether `self` and `other` overlap.
    ///
    /// Overlap is strict: rectangles that merely share an edge or a corner do
    /// not intersect, and a rectangle with zero or negative extent intersects
    /// nothing, even when it lies inside the other rectangle.
    ///
    /// # Examples
    ///
    /// ```
    /// use mazeweave::grid::Rect;
    ///
    /// let a = Rect::new(0, 0, 16, 16);
    /// assert!(a.intersects(&Rect::new(15, 15, 16, 16)));
    /// assert!(!a.intersects(&Rect::new(16, 0, 16, 16)));
    /// assert!(!a.intersects(&Rect::new(8, 8, 0, 0)));
    /// ```
    pub fn intersects(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

/// One cell of the maze playfield.
///
/// Cells are created by [`Grid::new`] and only ever mutated through [`Grid`]
/// methods, so the passage flags of adjacent cells always mirror each other.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Cell {
    id: usize,
    x: i32,
    y: i32,
    /// indexed by `Direction as usize`
    open: [bool; 4],
    blocked: bool,
}

impl Cell {
    /// Returns the x coordinate, in cells.
    pub fn x(&self) -> i32 {
        self.x
    }

    /// Returns the y coordinate, in cells.
    pub fn y(&self) -> i32 {
        self.y
    }

    /// Returns the cell's stable arena id, `y * width + x`.
    ///
    /// Ids index into [`Grid::cells`] and never change for the lifetime of the
    /// grid.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Returns whether the passage on the given side is open.
    pub fn is_open(&self, direction: Direction) -> bool {
        self.open[direction as usize]
    }

    /// Returns whether the cell is blocked (removed from play).
    ///
    /// A blocked cell keeps all four passages closed.
    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    /// Returns the directions with an open passage, in declaration order.
    pub fn open_directions(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL
            .into_iter()
            .filter(move |&direction| self.open[direction as usize])
    }

    /// Returns how many of the four sides are closed.
    ///
    /// Grid edges count as closed sides, so a corner cell with no open
    /// passages reports 4.
    pub fn closed_sides(&self) -> usize {
        self.open.iter().filter(|&&open| !open).count()
    }

    /// Returns the pixel position of the cell's top left corner.
    pub fn pixel_pos(&self) -> Point2<i32> {
        Point2::new(self.x * CELL_SIZE_PX, self.y * CELL_SIZE_PX)
    }

    /// Returns the cell's square pixel hitbox.
    ///
    /// # Examples
    ///
    /// ```
    /// use mazeweave::grid::Grid;
    ///
    /// let grid = Grid::new(4, 4).unwrap();
    /// let hitbox = grid.cell_at(1, 2).unwrap().hitbox();
    /// assert_eq!((hitbox.min.x, hitbox.min.y), (16, 32));
    /// assert_eq!((hitbox.max.x, hitbox.max.y), (32, 48));
    /// ```
    pub fn hitbox(&self) -> Rect {
        Rect::new(
            self.x * CELL_SIZE_PX,
            self.y * CELL_SIZE_PX,
            CELL_SIZE_PX,
            CELL_SIZE_PX,
        )
    }

    /// Returns the Euclidean distance to another cell, in cell units.
    pub fn distance_from(&self, other: &Cell) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        dx.hypot(dy)
    }
}

/// A fixed-size arena of [`Cell`]s with mirror-consistent passage flags.
///
/// The grid owns cell state and the primitives that mutate it; everything
/// algorithmic (carving mazes, repairing blast damage) lives in
/// [`crate::generate::MazeGenerator`].
///
/// # Examples
///
/// ```
/// use mazeweave::grid::{Direction, Grid};
///
/// let mut grid = Grid::new(22, 18).unwrap();
/// grid.set_passage(3, 4, Direction::Right, true).unwrap();
/// assert!(grid.cell_at(4, 4).unwrap().is_open(Direction::Left));
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid with every passage closed and no cells blocked.
    ///
    /// # Examples
    ///
    /// ```
    /// use mazeweave::grid::{Grid, GridError};
    ///
    /// assert!(Grid::new(22, 18).is_ok());
    /// assert_eq!(
    ///     Grid::new(0, 18).unwrap_err(),
    ///     GridError::InvalidDimensions { width: 0, height: 18 },
    /// );
    /// ```
    pub fn new(width: i32, height: i32) -> Result<Self, GridError> {
        if width < 1 || height < 1 || width.checked_mul(height).is_none() {
            return Err(GridError::InvalidDimensions { width, height });
        }
        let mut cells = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                cells.push(Cell {
                    id: (y * width + x) as usize,
                    x,
                    y,
                    open: [false; 4],
                    blocked: false,
                });
            }
        }
        Ok(Grid {
            width,
            height,
            cells,
        })
    }

    /// Returns the grid width, in cells.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Returns the grid height, in cells.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Returns the playfield width, in pixels.
    pub fn pixel_width(&self) -> i32 {
        self.width * CELL_SIZE_PX
    }

    /// Returns the playfield height, in pixels.
    pub fn pixel_height(&self) -> i32 {
        self.height * CELL_SIZE_PX
    }

    /// Returns all cells in row-major order, indexable by [`Cell::id`].
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Returns the cell at `(x, y)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use mazeweave::grid::{Grid, GridError};
    ///
    /// let grid = Grid::new(4, 4).unwrap();
    /// assert_eq!(grid.cell_at(3, 2).unwrap().id(), 11);
    /// assert_eq!(
    ///     grid.cell_at(4, 2).unwrap_err(),
    ///     GridError::OutOfBounds { x: 4, y: 2 },
    /// );
    /// ```
    pub fn cell_at(&self, x: i32, y: i32) -> Result<&Cell, GridError> {
        let idx = self
            .index_of(x, y)
            .ok_or(GridError::OutOfBounds { x, y })?;
        Ok(&self.cells[idx])
    }

    /// Returns the neighboring cell one step in the given direction, or `None`
    /// at the grid edge.
    ///
    /// `cell` must belong to this grid.
    pub fn neighbor_in(&self, cell: &Cell, direction: Direction) -> Option<&Cell> {
        let (dx, dy) = direction.offset();
        let idx = self.index_of(cell.x + dx, cell.y + dy)?;
        Some(&self.cells[idx])
    }

    /// Returns the in-bounds neighbors of `cell`, in [`Direction`] declaration
    /// order.
    ///
    /// Blocked neighbors are included; callers that want traversable cells
    /// should use [`Grid::open_neighbors_of`].
    pub fn neighbors_of<'a>(&'a self, cell: &'a Cell) -> impl Iterator<Item = &'a Cell> + 'a {
        Direction::ALL
            .into_iter()
            .filter_map(move |direction| self.neighbor_in(cell, direction))
    }

    /// Returns the neighbors reachable from `cell` through an open passage, in
    /// [`Direction`] declaration order.
    ///
    /// # Examples
    ///
    /// ```
    /// use mazeweave::grid::{Direction, Grid};
    ///
    /// let mut grid = Grid::new(4, 4).unwrap();
    /// grid.set_passage(1, 1, Direction::Down, true).unwrap();
    /// grid.set_passage(1, 1, Direction::Right, true).unwrap();
    ///
    /// let cell = grid.cell_at(1, 1).unwrap();
    /// let ids: Vec<usize> = grid.open_neighbors_of(cell).map(|c| c.id()).collect();
    /// assert_eq!(ids, vec![9, 6]);
    /// ```
    pub fn open_neighbors_of<'a>(&'a self, cell: &'a Cell) -> impl Iterator<Item = &'a Cell> + 'a {
        Direction::ALL.into_iter().filter_map(move |direction| {
            if cell.is_open(direction) {
                self.neighbor_in(cell, direction)
            } else {
                None
            }
        })
    }

    /// Returns the cells whose hitboxes overlap `rect`, in row-major order.
    ///
    /// Overlap is strict, so a rectangle gliding along cell boundaries touches
    /// only the cells it actually enters. The iterator is lazy and borrows the
    /// grid.
    ///
    /// # Examples
    ///
    /// ```
    /// use mazeweave::grid::{Grid, Rect};
    ///
    /// let grid = Grid::new(4, 4).unwrap();
    /// let ids: Vec<usize> = grid
    ///     .colliding_cells(Rect::new(8, 8, 16, 16))
    ///     .map(|c| c.id())
    ///     .collect();
    /// assert_eq!(ids, vec![0, 1, 4, 5]);
    /// ```
    pub fn colliding_cells(&self, rect: Rect) -> impl Iterator<Item = &Cell> + '_ {
        // cell range the rectangle can reach, clamped to the grid
        let x0 = rect.min.x.div_euclid(CELL_SIZE_PX).max(0);
        let y0 = rect.min.y.div_euclid(CELL_SIZE_PX).max(0);
        let x1 = (rect.max.x.saturating_sub(1))
            .div_euclid(CELL_SIZE_PX)
            .min(self.width - 1);
        let y1 = (rect.max.y.saturating_sub(1))
            .div_euclid(CELL_SIZE_PX)
            .min(self.height - 1);
        (y0..=y1)
            .flat_map(move |y| (x0..=x1).map(move |x| &self.cells[(y * self.width + x) as usize]))
            .filter(move |cell| cell.hitbox().intersects(&rect))
    }

    /// Opens or closes the passage on one side of `(x, y)`, updating the
    /// mirrored flag of the adjacent cell in the same call.
    ///
    /// Requests that cannot produce a valid passage are silently ignored:
    /// opening toward the grid edge, or opening a passage whose either
    /// endpoint is blocked. Closing is always honored.
    ///
    /// # Examples
    ///
    /// ```
    /// use mazeweave::grid::{Direction, Grid};
    ///
    /// let mut grid = Grid::new(4, 4).unwrap();
    /// grid.set_passage(0, 0, Direction::Up, true).unwrap();
    /// assert!(!grid.cell_at(0, 0).unwrap().is_open(Direction::Up));
    ///
    /// grid.set_passage(0, 0, Direction::Down, true).unwrap();
    /// assert!(grid.cell_at(0, 1).unwrap().is_open(Direction::Up));
    /// ```
    pub fn set_passage(
        &mut self,
        x: i32,
        y: i32,
        direction: Direction,
        open: bool,
    ) -> Result<(), GridError> {
        let idx = self
            .index_of(x, y)
            .ok_or(GridError::OutOfBounds { x, y })?;
        self.set_passage_by_index(idx, direction, open);
        Ok(())
    }

    /// Blocks or unblocks the cell at `(x, y)`.
    ///
    /// Blocking closes all four of the cell's passages (mirrored into its
    /// neighbors). Unblocking only clears the flag; the cell stays walled off
    /// until passages are opened again.
    ///
    /// # Examples
    ///
    /// ```
    /// use mazeweave::grid::{Direction, Grid};
    ///
    /// let mut grid = Grid::new(4, 4).unwrap();
    /// grid.set_passage(1, 1, Direction::Right, true).unwrap();
    /// grid.set_blocked(1, 1, true).unwrap();
    ///
    /// assert!(grid.cell_at(1, 1).unwrap().is_blocked());
    /// assert!(!grid.cell_at(2, 1).unwrap().is_open(Direction::Left));
    /// ```
    pub fn set_blocked(&mut self, x: i32, y: i32, blocked: bool) -> Result<(), GridError> {
        let idx = self
            .index_of(x, y)
            .ok_or(GridError::OutOfBounds { x, y })?;
        if blocked {
            self.block_by_index(idx);
        } else {
            self.cells[idx].blocked = false;
        }
        Ok(())
    }

    /// Returns the arena index for in-bounds coordinates.
    pub(crate) fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some((y * self.width + x) as usize)
    }

    /// Returns the arena index one step in the given direction, or `None` at
    /// the grid edge.
    pub(crate) fn neighbor_index(&self, idx: usize, direction: Direction) -> Option<usize> {
        let cell = &self.cells[idx];
        let (dx, dy) = direction.offset();
        self.index_of(cell.x + dx, cell.y + dy)
    }

    /// Index-addressed variant of [`Grid::set_passage`], with the same
    /// silent-ignore rules.
    pub(crate) fn set_passage_by_index(&mut self, idx: usize, direction: Direction, open: bool) {
        let Some(other) = self.neighbor_index(idx, direction) else {
            return;
        };
        if open && (self.cells[idx].blocked || self.cells[other].blocked) {
            return;
        }
        self.cells[idx].open[direction as usize] = open;
        self.cells[other].open[direction.opposite() as usize] = open;
    }

    /// Closes the cell's passages and marks it blocked.
    pub(crate) fn block_by_index(&mut self, idx: usize) {
        for direction in Direction::ALL {
            self.set_passage_by_index(idx, direction, false);
        }
        self.cells[idx].blocked = true;
    }

    /// Closes every passage in the grid, leaving blocked flags untouched.
    pub(crate) fn close_all_passages(&mut self) {
        for cell in &mut self.cells {
            cell.open = [false; 4];
        }
    }
}

/// Panics if any passage flag is unmirrored, points off the grid, or touches a
/// blocked cell.
#[cfg(test)]
pub(crate) fn check_invariants(grid: &Grid) {
    for cell in grid.cells() {
        for direction in Direction::ALL {
            match grid.neighbor_in(cell, direction) {
                Some(neighbor) => assert_eq!(
                    cell.is_open(direction),
                    neighbor.is_open(direction.opposite()),
                    "passage at ({}, {}) {:?} is not mirrored",
                    cell.x(),
                    cell.y(),
                    direction,
                ),
                None => assert!(
                    !cell.is_open(direction),
                    "open passage off the grid edge at ({}, {})",
                    cell.x(),
                    cell.y(),
                ),
            }
        }
        if cell.is_blocked() {
            assert_eq!(
                cell.closed_sides(),
                4,
                "blocked cell ({}, {}) has an open passage",
                cell.x(),
                cell.y(),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_invalid_dimensions() {
        for (width, height) in [(0, 5), (5, 0), (-1, 5), (5, -3), (0, 0)] {
            assert_eq!(
                Grid::new(width, height).unwrap_err(),
                GridError::InvalidDimensions { width, height }
            );
        }
    }

    #[test]
    fn new_starts_closed_and_unblocked() {
        let grid = Grid::new(3, 2).unwrap();
        assert_eq!(grid.cells().len(), 6);
        for cell in grid.cells() {
            assert!(!cell.is_blocked());
            assert_eq!(cell.closed_sides(), 4);
            assert_eq!(cell.open_directions().count(), 0);
        }
    }

    #[test]
    fn cell_ids_are_row_major() {
        let grid = Grid::new(5, 3).unwrap();
        for y in 0..3 {
            for x in 0..5 {
                let cell = grid.cell_at(x, y).unwrap();
                assert_eq!(cell.id(), (y * 5 + x) as usize);
                assert_eq!(grid.cells()[cell.id()], *cell);
            }
        }
    }

    #[test]
    fn cell_at_out_of_bounds() {
        let grid = Grid::new(4, 4).unwrap();
        for (x, y) in [(-1, 0), (0, -1), (4, 0), (0, 4), (100, 100)] {
            assert_eq!(
                grid.cell_at(x, y).unwrap_err(),
                GridError::OutOfBounds { x, y }
            );
        }
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            format!("{}", GridError::InvalidDimensions { width: 0, height: 9 }),
            "grid dimensions 0x9 are invalid"
        );
        assert_eq!(
            format!("{}", GridError::OutOfBounds { x: -1, y: 3 }),
            "coordinates (-1, 3) are outside the grid"
        );
    }

    #[test]
    fn set_passage_mirrors_both_cells() {
        let mut grid = Grid::new(4, 4).unwrap();
        grid.set_passage(1, 1, Direction::Right, true).unwrap();
        assert!(grid.cell_at(1, 1).unwrap().is_open(Direction::Right));
        assert!(grid.cell_at(2, 1).unwrap().is_open(Direction::Left));
        check_invariants(&grid);

        grid.set_passage(2, 1, Direction::Left, false).unwrap();
        assert!(!grid.cell_at(1, 1).unwrap().is_open(Direction::Right));
        assert!(!grid.cell_at(2, 1).unwrap().is_open(Direction::Left));
        check_invariants(&grid);
    }

    #[test]
    fn set_passage_off_edge_is_ignored() {
        let mut grid = Grid::new(4, 4).unwrap();
        grid.set_passage(0, 0, Direction::Up, true).unwrap();
        grid.set_passage(0, 0, Direction::Left, true).unwrap();
        grid.set_passage(3, 3, Direction::Down, true).unwrap();
        grid.set_passage(3, 3, Direction::Right, true).unwrap();
        for cell in grid.cells() {
            assert_eq!(cell.closed_sides(), 4);
        }
    }

    #[test]
    fn set_passage_out_of_bounds_fails() {
        let mut grid = Grid::new(4, 4).unwrap();
        assert_eq!(
            grid.set_passage(4, 0, Direction::Left, true).unwrap_err(),
            GridError::OutOfBounds { x: 4, y: 0 }
        );
    }

    #[test]
    fn set_passage_into_blocked_is_ignored() {
        let mut grid = Grid::new(4, 4).unwrap();
        grid.set_blocked(2, 1, true).unwrap();

        grid.set_passage(1, 1, Direction::Right, true).unwrap();
        assert!(!grid.cell_at(1, 1).unwrap().is_open(Direction::Right));

        // opening from the blocked cell itself is also ignored
        grid.set_passage(2, 1, Direction::Down, true).unwrap();
        assert_eq!(grid.cell_at(2, 1).unwrap().closed_sides(), 4);
        check_invariants(&grid);
    }

    #[test]
    fn set_blocked_closes_passages() {
        let mut grid = Grid::new(4, 4).unwrap();
        for direction in Direction::ALL {
            grid.set_passage(1, 1, direction, true).unwrap();
        }
        assert_eq!(grid.cell_at(1, 1).unwrap().closed_sides(), 0);

        grid.set_blocked(1, 1, true).unwrap();
        let cell = grid.cell_at(1, 1).unwrap();
        assert!(cell.is_blocked());
        assert_eq!(cell.closed_sides(), 4);
        assert!(!grid.cell_at(1, 0).unwrap().is_open(Direction::Down));
        assert!(!grid.cell_at(1, 2).unwrap().is_open(Direction::Up));
        assert!(!grid.cell_at(0, 1).unwrap().is_open(Direction::Right));
        assert!(!grid.cell_at(2, 1).unwrap().is_open(Direction::Left));
        check_invariants(&grid);
    }

    #[test]
    fn unblock_keeps_passages_closed() {
        let mut grid = Grid::new(4, 4).unwrap();
        grid.set_blocked(1, 1, true).unwrap();
        grid.set_blocked(1, 1, false).unwrap();

        let cell = grid.cell_at(1, 1).unwrap();
        assert!(!cell.is_blocked());
        assert_eq!(cell.closed_sides(), 4);

        // passages may be opened again once unblocked
        grid.set_passage(1, 1, Direction::Right, true).unwrap();
        assert!(grid.cell_at(1, 1).unwrap().is_open(Direction::Right));
    }

    #[test]
    fn open_directions_order() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set_passage(1, 1, Direction::Right, true).unwrap();
        grid.set_passage(1, 1, Direction::Up, true).unwrap();

        let open: Vec<Direction> = grid.cell_at(1, 1).unwrap().open_directions().collect();
        assert_eq!(open, vec![Direction::Up, Direction::Right]);
    }

    #[test]
    fn neighbors_follow_declaration_order() {
        let grid = Grid::new(3, 3).unwrap();

        let center = grid.cell_at(1, 1).unwrap();
        let ids: Vec<usize> = grid.neighbors_of(center).map(|c| c.id()).collect();
        assert_eq!(ids, vec![1, 7, 3, 5]);

        // corner cells only report in-bounds neighbors
        let corner = grid.cell_at(0, 0).unwrap();
        let ids: Vec<usize> = grid.neighbors_of(corner).map(|c| c.id()).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn open_neighbors_require_open_passage() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set_passage(1, 1, Direction::Down, true).unwrap();
        grid.set_passage(1, 1, Direction::Left, true).unwrap();

        let center = grid.cell_at(1, 1).unwrap();
        let ids: Vec<usize> = grid.open_neighbors_of(center).map(|c| c.id()).collect();
        assert_eq!(ids, vec![7, 3]);
    }

    #[test]
    fn colliding_cells_overlap_region() {
        let grid = Grid::new(4, 4).unwrap();
        let ids: Vec<usize> = grid
            .colliding_cells(Rect::new(10, 20, 20, 20))
            .map(|c| c.id())
            .collect();
        // spans x in [10, 30), y in [20, 40): columns 0-1, rows 1-2
        assert_eq!(ids, vec![4, 5, 8, 9]);
    }

    #[test]
    fn colliding_cells_strict_overlap() {
        let grid = Grid::new(4, 4).unwrap();
        // exactly covers the hitbox of cell (1, 1) and touches its neighbors' edges
        let ids: Vec<usize> = grid
            .colliding_cells(Rect::new(16, 16, 16, 16))
            .map(|c| c.id())
            .collect();
        assert_eq!(ids, vec![5]);
    }

    #[test]
    fn colliding_cells_clamps_to_grid() {
        let grid = Grid::new(4, 4).unwrap();
        let all: Vec<usize> = grid
            .colliding_cells(Rect::new(-100, -100, 1000, 1000))
            .map(|c| c.id())
            .collect();
        assert_eq!(all, (0..16).collect::<Vec<usize>>());

        assert_eq!(grid.colliding_cells(Rect::new(-50, 0, 10, 10)).count(), 0);
        assert_eq!(grid.colliding_cells(Rect::new(64, 0, 10, 10)).count(), 0);
    }

    #[test]
    fn colliding_cells_degenerate_rect() {
        let grid = Grid::new(4, 4).unwrap();
        assert_eq!(grid.colliding_cells(Rect::new(8, 8, 0, 0)).count(), 0);
        assert_eq!(grid.colliding_cells(Rect::new(8, 8, -4, 12)).count(), 0);
    }

    #[test]
    fn rect_edge_touch_is_not_intersection() {
        let a = Rect::new(0, 0, 16, 16);
        assert!(!a.intersects(&Rect::new(16, 0, 16, 16)));
        assert!(!a.intersects(&Rect::new(0, 16, 16, 16)));
        assert!(!a.intersects(&Rect::new(16, 16, 16, 16)));
        assert!(a.intersects(&Rect::new(15, 15, 16, 16)));
        assert!(a.intersects(&a));
    }

    #[test]
    fn hitbox_and_pixel_dimensions() {
        let grid = Grid::new(22, 18).unwrap();
        assert_eq!(grid.pixel_width(), 352);
        assert_eq!(grid.pixel_height(), 288);

        let hitbox = grid.cell_at(21, 17).unwrap().hitbox();
        assert_eq!((hitbox.min.x, hitbox.min.y), (336, 272));
        assert_eq!((hitbox.max.x, hitbox.max.y), (352, 288));
    }

    #[test]
    fn distance_between_cells() {
        let grid = Grid::new(8, 8).unwrap();
        let a = grid.cell_at(1, 1).unwrap();
        let b = grid.cell_at(4, 5).unwrap();
        assert_eq!(a.distance_from(b), 5.0);
        assert_eq!(a.distance_from(a), 0.0);
    }
}
