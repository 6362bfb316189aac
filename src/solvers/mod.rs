//! Analysis of a carved maze: distances over links and shortest paths.

mod distances;
mod path;

use std::collections::{HashSet, VecDeque};

pub use distances::{Distances, distances, find_distances, shell_distance, spawn_distances};
pub use path::{find_path, longest_path};

use crate::maze::{Coord, Grid};

/// Whether the link graph of `grid` is a perfect maze: connected and acyclic.
///
/// A connected graph over `n` cells with exactly `n - 1` links has no cycle.
pub fn is_perfect(grid: &Grid) -> bool {
    if grid.link_count() + 1 != grid.size() {
        return false;
    }
    let start = (0, 0);
    let mut seen = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(cell) = queue.pop_front() {
        for next in grid.links(cell) {
            if seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    seen.len() == grid.size()
}

/// Whether walking links from any cell, never going straight back over the link just
/// used, ever returns to a cell already seen.
pub fn has_cycle(grid: &Grid) -> bool {
    let mut seen: HashSet<Coord> = HashSet::new();
    for root in grid.coords() {
        if !seen.insert(root) {
            continue;
        }
        let mut stack = vec![(root, None::<Coord>)];
        while let Some((cell, came_from)) = stack.pop() {
            for next in grid.links(cell).filter(|&n| Some(n) != came_from) {
                if !seen.insert(next) {
                    return true;
                }
                stack.push((next, Some(cell)));
            }
        }
    }
    false
}
