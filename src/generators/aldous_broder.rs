use std::collections::HashSet;

use crate::{
    error::Result,
    generators::{RandomSource, choose},
    maze::{Coord, Grid},
    report::Reporter,
};

/// Random walk that links each cell the first time the walk enters it.
pub fn aldous_broder(mut grid: Grid, reporter: &Reporter, rng: &mut dyn RandomSource) -> Result<Grid> {
    let coords = grid.coords().collect::<Vec<_>>();
    let Some(mut current) = choose(rng, &coords) else {
        return Ok(grid);
    };

    let mut visited: HashSet<Coord> = HashSet::from([current]);
    let mut steps = 0usize;
    while visited.len() < grid.size() {
        let neighbors = grid.neighbors(current).collect::<Vec<_>>();
        let Some(next) = choose(rng, &neighbors) else {
            break;
        };
        // Moves onto already visited cells carve nothing and publish nothing
        if visited.insert(next) {
            grid.link(current, next)?;
            reporter.update(&grid)?;
        }
        current = next;
        steps += 1;
    }
    tracing::trace!("[aldous-broder] walk took {} steps", steps);
    Ok(grid)
}
