//! Provides constants for the library.

/// Width and height of one cell's hitbox, in pixels
pub const CELL_SIZE_PX: i32 = 16;
/// Default playfield width, in cells
pub const DEFAULT_WIDTH: i32 = 22;
/// Default playfield height, in cells
pub const DEFAULT_HEIGHT: i32 = 18;
