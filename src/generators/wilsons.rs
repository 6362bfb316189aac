use std::collections::{HashMap, HashSet};

use crate::{
    error::{MazeError, Result},
    generators::{RandomSource, choose},
    maze::{Coord, Grid},
    report::Reporter,
};

/// Grows the maze from one random cell with loop-erased random walks.
///
/// Walks are explored without touching the grid. Only once a walk reaches the maze is
/// its loop-free path carved, one published link per step.
pub fn wilsons(mut grid: Grid, reporter: &Reporter, rng: &mut dyn RandomSource) -> Result<Grid> {
    let mut unvisited = grid.coords().collect::<Vec<_>>();
    if unvisited.is_empty() {
        return Ok(grid);
    }
    let first = unvisited.swap_remove(rng.index(unvisited.len()));
    let mut in_maze = HashSet::from([first]);

    while let Some(start) = choose(rng, &unvisited) {
        let path = loop_erased_walk(&grid, &in_maze, start, rng)?;
        tracing::trace!("[wilsons] carving path of {} cells from {:?}", path.len(), start);
        for pair in path.windows(2) {
            grid.link(pair[0], pair[1])?;
            reporter.update(&grid)?;
            in_maze.insert(pair[0]);
        }
        unvisited.retain(|c| !in_maze.contains(c));
    }
    Ok(grid)
}

/// Walks randomly from `start` until a cell of `in_maze` is reached.
///
/// Only the last exit taken from each cell is kept, so revisiting a cell erases the
/// loop made since the previous visit. The returned path starts at `start` and ends on
/// the first maze cell reached.
fn loop_erased_walk(
    grid: &Grid,
    in_maze: &HashSet<Coord>,
    start: Coord,
    rng: &mut dyn RandomSource,
) -> Result<Vec<Coord>> {
    let mut exits: HashMap<Coord, Coord> = HashMap::new();
    let mut current = start;
    while !in_maze.contains(&current) {
        let neighbors = grid.neighbors(current).collect::<Vec<_>>();
        let next = choose(rng, &neighbors).ok_or(MazeError::UnreachableCell(current))?;
        exits.insert(current, next);
        current = next;
    }

    let mut path = vec![start];
    let mut current = start;
    while let Some(&next) = exits.get(&current) {
        path.push(next);
        current = next;
    }
    Ok(path)
}
