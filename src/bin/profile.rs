use std::time::{Duration, Instant};

use mazeweave::{
    Grid,
    config::Config,
    generators::{Generator, generate_maze},
    solvers::{is_perfect, longest_path},
};
use tracing_subscriber::EnvFilter;

/// Run every generator `iterations` times on a `rows` x `columns` grid without observers.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env();
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args();
    args.next(); // Skip executable name
    let mut next_number = |default: usize| {
        args.next()
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(default)
    };
    let iterations = next_number(10).max(1);
    let rows = next_number(64);
    let columns = next_number(64);

    tracing::info!(
        "[profile] {} iterations on a {}x{} grid (seed {:?})",
        iterations,
        rows,
        columns,
        config.seed
    );

    for generator in Generator::ALL {
        let mut elapsed = Duration::ZERO;
        let mut dead_ends = 0;
        let mut longest = 0;
        for i in 0..iterations {
            let grid = Grid::new(rows, columns)?;
            let seed = config.seed.map(|s| s.wrapping_add(i as u64));
            let start = Instant::now();
            let maze = generate_maze(grid, generator, seed)?;
            elapsed += start.elapsed();

            if !is_perfect(&maze) {
                tracing::error!("[profile] {} produced an imperfect maze", generator.name());
                return Err(format!("{} produced an imperfect maze", generator).into());
            }
            dead_ends += maze.dead_ends().len();
            longest = longest.max(longest_path(&maze)?.len());
        }

        let cells = (rows * columns * iterations) as f64;
        tracing::info!(
            "[profile] {:<22} {:>10.3?}/maze  dead ends {:>5.1}%  longest path {}",
            generator.name(),
            elapsed / iterations as u32,
            100.0 * dead_ends as f64 / cells,
            longest
        );
    }
    Ok(())
}
