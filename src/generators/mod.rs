use rand::{Rng, SeedableRng, rngs::StdRng};

mod aldous_broder;
mod binary_tree;
mod hunt_and_kill;
mod recursive_backtracker;
mod sidewinder;
mod wilsons;

use aldous_broder::aldous_broder;
use binary_tree::binary_tree;
use hunt_and_kill::hunt_and_kill;
use recursive_backtracker::recursive_backtracker;
use sidewinder::sidewinder;
use wilsons::wilsons;

use crate::{
    error::{MazeError, Result},
    maze::Grid,
    report::{ReportStream, Reporter, run_sync},
};

/// Get a random number generator, optionally seeded for reproducibility.
pub fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Uniform choices made by the generators.
///
/// Every [`rand::Rng`] is a `RandomSource`. Tests can plug in fixed choosers.
pub trait RandomSource {
    /// A uniformly chosen index in `0..len`. `len` is never zero.
    fn index(&mut self, len: usize) -> usize;

    /// A fair coin flip.
    fn coin(&mut self) -> bool {
        self.index(2) == 0
    }
}

impl<R: Rng> RandomSource for R {
    fn index(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }

    fn coin(&mut self) -> bool {
        self.random_bool(0.5)
    }
}

/// Pick one item uniformly, or `None` from an empty slice.
pub(crate) fn choose<T: Copy>(rng: &mut dyn RandomSource, items: &[T]) -> Option<T> {
    match items.len() {
        0 => None,
        len => Some(items[rng.index(len)]),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Generator {
    BinaryTree,
    Sidewinder,
    AldousBroder,
    Wilsons,
    HuntAndKill,
    RecursiveBacktracker,
}

impl Generator {
    pub const ALL: [Generator; 6] = [
        Generator::BinaryTree,
        Generator::Sidewinder,
        Generator::AldousBroder,
        Generator::Wilsons,
        Generator::HuntAndKill,
        Generator::RecursiveBacktracker,
    ];

    /// Stable identifier used on command lines and in grid metadata.
    pub fn name(self) -> &'static str {
        match self {
            Generator::BinaryTree => "binary-tree",
            Generator::Sidewinder => "sidewinder",
            Generator::AldousBroder => "aldous-broder",
            Generator::Wilsons => "wilsons",
            Generator::HuntAndKill => "hunt-and-kill",
            Generator::RecursiveBacktracker => "recursive-backtracker",
        }
    }

    /// Carves `grid` into a perfect maze, publishing one snapshot per new link.
    ///
    /// The returned grid records this generator's name.
    pub fn run(
        self,
        mut grid: Grid,
        reporter: &Reporter,
        rng: &mut dyn RandomSource,
    ) -> Result<Grid> {
        tracing::debug!(
            "[{}] generating {}x{} maze",
            self.name(),
            grid.rows(),
            grid.columns()
        );
        grid.set_algorithm(self.name());
        let grid = match self {
            Generator::BinaryTree => binary_tree(grid, reporter, rng),
            Generator::Sidewinder => sidewinder(grid, reporter, rng),
            Generator::AldousBroder => aldous_broder(grid, reporter, rng),
            Generator::Wilsons => wilsons(grid, reporter, rng),
            Generator::HuntAndKill => hunt_and_kill(grid, reporter, rng),
            Generator::RecursiveBacktracker => recursive_backtracker(grid, reporter, rng),
        }?;
        tracing::debug!(
            "[{}] finished with {} links",
            self.name(),
            grid.link_count()
        );
        Ok(grid)
    }
}

impl std::fmt::Display for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Generator::BinaryTree => write!(f, "Binary Tree"),
            Generator::Sidewinder => write!(f, "Sidewinder"),
            Generator::AldousBroder => write!(f, "Aldous-Broder"),
            Generator::Wilsons => write!(f, "Wilson's Algorithm"),
            Generator::HuntAndKill => write!(f, "Hunt-and-Kill"),
            Generator::RecursiveBacktracker => write!(f, "Recursive Backtracker"),
        }
    }
}

impl std::str::FromStr for Generator {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self> {
        Generator::ALL
            .into_iter()
            .find(|g| g.name() == s)
            .ok_or_else(|| MazeError::UnknownAlgorithm(s.to_string()))
    }
}

/// Identifiers of every available generator.
pub fn algorithm_names() -> impl Iterator<Item = &'static str> {
    Generator::ALL.into_iter().map(Generator::name)
}

/// Resolve a generator by its identifier.
pub fn algorithm_function(name: &str) -> Result<Generator> {
    name.parse()
}

/// Generate a maze without observing intermediate snapshots.
pub fn generate_maze(grid: Grid, generator: Generator, seed: Option<u64>) -> Result<Grid> {
    let mut rng = get_rng(seed);
    run_sync(grid, |grid, reporter| generator.run(grid, reporter, &mut rng))
}

/// Generate a maze on a producer thread, returning the stream of snapshots.
pub fn spawn_generation<R>(
    grid: Grid,
    generator: Generator,
    mut rng: R,
    capacity: usize,
) -> ReportStream<Grid>
where
    R: RandomSource + Send + 'static,
{
    ReportStream::spawn(grid, capacity, move |grid, reporter| {
        generator.run(grid, reporter, &mut rng)
    })
}
