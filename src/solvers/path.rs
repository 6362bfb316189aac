use crate::{
    error::{MazeError, Result},
    maze::{Coord, Grid},
    solvers::distances::{Distances, distances},
};

/// Shortest path from `from` to `to`, both inclusive.
///
/// Walks back from `to`, always stepping to a linked neighbor exactly one closer to
/// the root of `distances`, until `from` is reached.
pub fn find_path(distances: &Distances, from: Coord, to: Coord) -> Result<Vec<Coord>> {
    let grid = distances.grid();
    grid.lookup(from)?;
    grid.lookup(to)?;
    let no_path = MazeError::NoPath { from, to };

    let mut current = to;
    let mut remaining = distances.get(to).ok_or_else(|| no_path.clone())?;
    let mut path = vec![to];
    while current != from {
        current = grid
            .links(current)
            .find(|&n| distances.get(n).is_some_and(|d| d + 1 == remaining))
            .ok_or_else(|| no_path.clone())?;
        remaining -= 1;
        path.push(current);
    }
    path.reverse();
    Ok(path)
}

/// One of the longest paths in a perfect maze.
///
/// The farthest cell from an arbitrary start is one end of a longest path; the farthest
/// cell from that end is the other.
pub fn longest_path(grid: &Grid) -> Result<Vec<Coord>> {
    let (end, _) = distances(grid, (0, 0))?.max();
    let from_end = distances(grid, end)?;
    let (other_end, _) = from_end.max();
    find_path(&from_end, end, other_end)
}
