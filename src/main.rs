//! Command line demo: weave a maze, print it, and optionally blast a hole in
//! it to show partial regeneration.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use mazeweave::connectivity::open_components;
use mazeweave::constants::{CELL_SIZE_PX, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use mazeweave::generate::{GenerationStrategy, MazeGenerator};
use mazeweave::grid::{Direction, Grid, Rect};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generate a maze playfield and optionally blast a hole in it
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Playfield width, in cells
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: i32,
    /// Playfield height, in cells
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: i32,
    /// Generation strategy
    #[arg(long, value_enum, default_value = "braid")]
    strategy: StrategyArg,
    /// Seed for reproducible mazes
    #[arg(long)]
    seed: Option<u64>,
    /// Blast a random region out of the maze and regenerate around it
    #[arg(long)]
    blast: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum StrategyArg {
    /// Perfect maze with a single route between any two cells
    SpanningTree,
    /// Dense maze with no dead ends
    Braid,
}

impl From<StrategyArg> for GenerationStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::SpanningTree => GenerationStrategy::SpanningTree,
            StrategyArg::Braid => GenerationStrategy::BraidDensify,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut grid = Grid::new(args.width, args.height)?;
    let generator = MazeGenerator::new(args.strategy.into());
    generator.generate(&mut grid, &mut rng);
    print!("{}", render(&grid));

    if args.blast {
        // drop a two-by-two-cell explosion somewhere inside the playfield
        let size = 2 * CELL_SIZE_PX;
        let x = rng.gen_range(0..(grid.pixel_width() - size).max(1));
        let y = rng.gen_range(0..(grid.pixel_height() - size).max(1));
        let blast = Rect::new(x, y, size, size);

        let hit: Vec<(i32, i32)> = grid
            .colliding_cells(blast)
            .map(|cell| (cell.x(), cell.y()))
            .collect();
        generator.mark_blocked_and_regenerate(&mut grid, &hit, &mut rng)?;

        println!("blasted {} cell(s) around pixel ({x}, {y}):", hit.len());
        print!("{}", render(&grid));
        println!(
            "{} open component(s) remain",
            open_components(&grid).len()
        );
    }
    Ok(())
}

/// Draws the maze with `+--+` walls; blocked cells are filled with `##`.
fn render(grid: &Grid) -> String {
    let width = grid.width() as usize;
    let mut out = String::new();
    for row in grid.cells().chunks(width) {
        for cell in row {
            out.push('+');
            out.push_str(if cell.is_open(Direction::Up) { "  " } else { "--" });
        }
        out.push_str("+\n");
        for cell in row {
            out.push_str(if cell.is_open(Direction::Left) { " " } else { "|" });
            out.push_str(if cell.is_blocked() { "##" } else { "  " });
        }
        out.push_str("|\n");
    }
    for _ in 0..width {
        out.push_str("+--");
    }
    out.push_str("+\n");
    out
}
