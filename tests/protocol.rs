use std::collections::{BTreeSet, HashMap};

use mazeweave::{
    Coord, Generator, Grid, GridEvent, MazeError, algorithm_function, algorithm_names,
    generate_maze,
    generators::{get_rng, spawn_generation},
    render::to_text,
    solvers::{distances, find_path, is_perfect, longest_path, shell_distance, spawn_distances},
};

fn run(generator: Generator, rows: usize, columns: usize, seed: u64) -> (Vec<GridEvent>, Grid) {
    let grid = Grid::new(rows, columns).unwrap();
    let mut stream = spawn_generation(grid, generator, get_rng(Some(seed)), 1);
    let events = stream.by_ref().collect::<Vec<_>>();
    (events, stream.finish().unwrap())
}

fn hook() -> Grid {
    let mut grid = Grid::new(2, 2).unwrap();
    grid.link((0, 0), (0, 1)).unwrap();
    grid.link((0, 1), (1, 1)).unwrap();
    grid.link((1, 1), (1, 0)).unwrap();
    grid
}

#[test]
fn every_algorithm_follows_the_protocol() {
    for name in algorithm_names() {
        let generator = algorithm_function(name).unwrap();
        for (rows, columns) in [(1, 1), (1, 9), (3, 3), (7, 4)] {
            let (events, maze) = run(generator, rows, columns, 17);

            assert_eq!(
                events.first(),
                Some(&GridEvent::Initial(Grid::new(rows, columns).unwrap())),
                "{} did not start fresh",
                name
            );
            for event in &events[1..] {
                assert!(matches!(event, GridEvent::Update(_)));
                assert!(!event.grid().changed_cells().is_empty());
            }

            assert!(is_perfect(&maze), "{} {}x{}", name, rows, columns);
            assert_eq!(maze.link_count(), rows * columns - 1);
            assert_eq!(maze.algorithm(), Some(name));

            if rows * columns > 1 {
                let covered = events
                    .iter()
                    .flat_map(|e| e.grid().changed_cells().iter().copied())
                    .chain(maze.changed_cells().iter().copied())
                    .collect::<BTreeSet<Coord>>();
                assert_eq!(covered, maze.coords().collect::<BTreeSet<_>>(), "{}", name);
            }
        }
    }
}

#[test]
fn single_cell_run_closes_immediately() {
    for generator in Generator::ALL {
        let (events, maze) = run(generator, 1, 1, 0);
        assert_eq!(events.len(), 1);
        assert!(events[0].grid().cells().eq(maze.cells()));
        assert_eq!(maze.link_count(), 0);
    }
}

#[test]
fn earlier_snapshots_are_not_changed_by_later_links() {
    let (events, _) = run(Generator::AldousBroder, 4, 4, 5);
    for (i, event) in events.iter().enumerate() {
        assert_eq!(event.grid().link_count(), i);
    }
}

#[test]
fn distances_and_path_on_hook() {
    let d = distances(&hook(), (0, 0)).unwrap();
    let expected = HashMap::from([((0, 0), 0), ((0, 1), 1), ((1, 1), 2), ((1, 0), 3)]);
    assert_eq!(d.iter().collect::<HashMap<_, _>>(), expected);
    assert_eq!(d.max().1, 3);

    let path = find_path(&d, (0, 0), (1, 0)).unwrap();
    assert_eq!(path, vec![(0, 0), (0, 1), (1, 1), (1, 0)]);
}

#[test]
fn distance_shells_are_monotonic() {
    let maze = generate_maze(Grid::new(6, 6).unwrap(), Generator::Wilsons, Some(3)).unwrap();
    let mut stream = spawn_distances(maze, (2, 3), 1).unwrap();
    assert!(matches!(stream.next(), Some(GridEvent::Initial(_))));

    let mut announced = HashMap::new();
    for (shell, event) in stream.by_ref().enumerate() {
        let grid = event.grid();
        assert_eq!(shell_distance(grid), Some(shell));
        for &coord in grid.changed_cells() {
            assert_eq!(grid[coord].annotation(), Some(shell));
            assert!(announced.insert(coord, shell).is_none(), "{:?} announced twice", coord);
        }
    }
    let result = stream.finish().unwrap();
    assert_eq!(announced.len(), 36);
    assert_eq!(announced.values().max().copied(), Some(result.max().1));
    for (coord, distance) in result.iter() {
        assert_eq!(announced[&coord], distance);
    }
}

#[test]
fn analysis_reports_malformed_grids() {
    let mut grid = Grid::new(2, 2).unwrap();
    grid.link((0, 0), (0, 1)).unwrap();
    assert!(matches!(
        distances(&grid, (0, 0)),
        Err(MazeError::UnreachableCell(_))
    ));
    assert!(matches!(
        distances(&grid, (5, 5)),
        Err(MazeError::OutOfBounds { .. })
    ));
}

#[test]
fn unknown_algorithm_is_rejected() {
    assert_eq!(
        algorithm_function("not-an-algorithm"),
        Err(MazeError::UnknownAlgorithm("not-an-algorithm".to_string()))
    );
}

#[test]
fn invalid_dimensions_are_rejected() {
    assert_eq!(
        Grid::new(0, 3),
        Err(MazeError::InvalidDimension { rows: 0, columns: 3 })
    );
}

#[test]
fn cancelled_run_reports_cancellation() {
    let grid = Grid::new(30, 30).unwrap();
    let mut stream = spawn_generation(grid, Generator::AldousBroder, get_rng(Some(1)), 1);
    assert!(matches!(stream.next(), Some(GridEvent::Initial(_))));
    assert_eq!(stream.cancel(), Err(MazeError::Cancelled));
}

#[test]
fn longest_path_spans_a_generated_maze() {
    let maze = generate_maze(Grid::new(8, 5).unwrap(), Generator::HuntAndKill, Some(9)).unwrap();
    let path = longest_path(&maze).unwrap();
    for pair in path.windows(2) {
        assert!(maze.is_linked(pair[0], pair[1]));
    }
    let picture = to_text(&maze);
    assert_eq!(picture.lines().count(), 8 * 2 + 1);
}
