use std::collections::HashSet;

use crate::{
    error::Result,
    generators::{RandomSource, choose},
    maze::{Coord, Grid},
    report::Reporter,
};

/// Depth-first carving with an explicit stack of visited cells.
pub fn recursive_backtracker(
    mut grid: Grid,
    reporter: &Reporter,
    rng: &mut dyn RandomSource,
) -> Result<Grid> {
    let coords = grid.coords().collect::<Vec<_>>();
    let Some(start) = choose(rng, &coords) else {
        return Ok(grid);
    };

    let mut visited: HashSet<Coord> = HashSet::from([start]);
    // The stack keeps only visited cells
    let mut stack = vec![start];

    while let Some(cell) = stack.pop() {
        let neighbors = grid
            .neighbors(cell)
            .filter(|n| !visited.contains(n))
            .collect::<Vec<_>>();

        if let Some(neighbor) = choose(rng, &neighbors) {
            grid.link(cell, neighbor)?;
            reporter.update(&grid)?;
            visited.insert(neighbor);
            // Put the cell back first so we can look at another neighbor of this cell later
            stack.push(cell);
            // Put the neighbor to carve the maze in that neighbor's direction
            stack.push(neighbor);
        }
    }
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::testing::{FixedChoice, carve_steps};

    #[test]
    fn test_backtracks_to_unfinished_cell() {
        // Start in the middle, carve west, backtrack, then carve east
        let (steps, _) = carve_steps(recursive_backtracker, 1, 3, FixedChoice(1));
        assert_eq!(steps, vec![vec![(0, 0), (0, 1)], vec![(0, 1), (0, 2)]]);
    }

    #[test]
    fn test_first_choice_snakes_through_grid() {
        // Always taking the first unvisited neighbor from (0, 0) snakes through a 2x2 grid
        let (steps, grid) = carve_steps(recursive_backtracker, 2, 2, FixedChoice(0));
        assert_eq!(
            steps,
            vec![
                vec![(0, 0), (1, 0)],
                vec![(1, 0), (1, 1)],
                vec![(0, 1), (1, 1)],
            ]
        );
        assert_eq!(grid.dead_ends(), vec![(0, 0), (0, 1)]);
    }
}
