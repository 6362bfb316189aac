use std::collections::HashSet;

use crate::{
    error::Result,
    generators::{RandomSource, choose},
    maze::{Coord, Grid},
    report::Reporter,
};

/// Random walk through unvisited cells. When the walk dead-ends, the grid is scanned
/// in row-major order for the first unvisited cell bordering the maze, which is linked
/// in and becomes the new walk head.
pub fn hunt_and_kill(mut grid: Grid, reporter: &Reporter, rng: &mut dyn RandomSource) -> Result<Grid> {
    let coords = grid.coords().collect::<Vec<_>>();
    let Some(start) = choose(rng, &coords) else {
        return Ok(grid);
    };

    let mut visited: HashSet<Coord> = HashSet::from([start]);
    let mut current = Some(start);
    while let Some(cell) = current {
        let unvisited = grid
            .neighbors(cell)
            .filter(|n| !visited.contains(n))
            .collect::<Vec<_>>();

        let step = match choose(rng, &unvisited) {
            // Kill: walk on into a random unvisited neighbor
            Some(next) => Some((cell, next)),
            None => hunt(&grid, &visited, rng).map(|(found, neighbor)| (neighbor, found)),
        };

        current = match step {
            Some((from, to)) => {
                grid.link(from, to)?;
                reporter.update(&grid)?;
                visited.insert(to);
                Some(to)
            }
            None => None,
        };
    }
    Ok(grid)
}

/// First unvisited cell in row-major order with at least one visited neighbor, paired
/// with one of those neighbors chosen at random.
fn hunt(grid: &Grid, visited: &HashSet<Coord>, rng: &mut dyn RandomSource) -> Option<(Coord, Coord)> {
    let found = grid
        .coords()
        .filter(|c| !visited.contains(c))
        .find_map(|c| {
            let visited_neighbors = grid
                .neighbors(c)
                .filter(|n| visited.contains(n))
                .collect::<Vec<_>>();
            choose(rng, &visited_neighbors).map(|n| (c, n))
        });
    match found {
        Some((cell, _)) => tracing::trace!("[hunt-and-kill] hunt found {:?}", cell),
        None => tracing::trace!("[hunt-and-kill] hunt found nothing, maze complete"),
    }
    found
}
