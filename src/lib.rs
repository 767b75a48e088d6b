#![warn(missing_docs)]
//! Maze playfields for arcade games: generation, partial regeneration, and
//! pixel-space collision queries

pub mod connectivity;
pub mod constants;
pub mod generate;
pub mod grid;
