//! Producer/consumer handoff of grid snapshots.
//!
//! A routine (a maze generator or a distance search) receives a [`Reporter`] and
//! publishes snapshots through it while it works. The consumer side is a
//! [`ReportStream`]: it yields [`GridEvent::Initial`] first, then every
//! [`GridEvent::Update`] in publish order, and ends when the routine returns. Only
//! then is the routine's final value read, through [`ReportStream::finish`].
//!
//! The stream is a bounded channel, so a producer blocks on publish until the
//! consumer has taken enough snapshots. This paces generation to the consumer.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc::{Receiver, SyncSender, sync_channel},
    },
    thread::JoinHandle,
};

use crate::{
    error::{MazeError, Result},
    maze::Grid,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridEvent {
    /// The untouched input grid, with no changed cells. Always the first event.
    Initial(Grid),
    /// A snapshot with at least one changed cell.
    Update(Grid),
}

impl GridEvent {
    pub fn grid(&self) -> &Grid {
        match self {
            GridEvent::Initial(grid) | GridEvent::Update(grid) => grid,
        }
    }

    pub fn into_grid(self) -> Grid {
        match self {
            GridEvent::Initial(grid) | GridEvent::Update(grid) => grid,
        }
    }
}

/// Shared flag a consumer sets to ask the producer to stop at its next publish.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Producer half of a run.
#[derive(Debug)]
pub struct Reporter {
    /// `None` when snapshots are discarded (synchronous runs).
    sender: Option<SyncSender<GridEvent>>,
    cancel: CancelToken,
}

impl Reporter {
    /// A reporter that drops every snapshot at the publish point.
    pub fn discard() -> Self {
        Reporter {
            sender: None,
            cancel: CancelToken::new(),
        }
    }

    /// Publishes an intermediate snapshot.
    ///
    /// Snapshots without changed cells are never published. Fails with
    /// [`MazeError::Cancelled`] once the consumer has cancelled or gone away.
    pub fn update(&self, grid: &Grid) -> Result<()> {
        if self.cancel.is_cancelled() {
            tracing::info!("[report] producer observed cancellation");
            return Err(MazeError::Cancelled);
        }
        if grid.changed_cells().is_empty() {
            tracing::trace!("[report] skipping snapshot with no changed cells");
            return Ok(());
        }
        self.send(GridEvent::Update(grid.clone()))
    }

    fn send(&self, event: GridEvent) -> Result<()> {
        match &self.sender {
            Some(sender) => sender.send(event).map_err(|_| {
                tracing::info!("[report] consumer dropped the stream");
                MazeError::Cancelled
            }),
            None => Ok(()),
        }
    }
}

/// Runs a routine without a consumer and returns only its final value.
pub fn run_sync<T, F>(grid: Grid, routine: F) -> Result<T>
where
    F: FnOnce(Grid, &Reporter) -> Result<T>,
{
    routine(grid, &Reporter::discard())
}

/// Consumer half of a run: an iterator of snapshots followed by a final result.
#[derive(Debug)]
pub struct ReportStream<T> {
    events: Option<Receiver<GridEvent>>,
    handle: Option<JoinHandle<Result<T>>>,
    cancel: CancelToken,
    closed: bool,
}

impl<T: Send + 'static> ReportStream<T> {
    /// Starts `routine` on a producer thread.
    ///
    /// `capacity` bounds how many snapshots may wait in the stream. `0` makes every
    /// publish a rendezvous with the consumer.
    pub fn spawn<F>(grid: Grid, capacity: usize, routine: F) -> Self
    where
        F: FnOnce(Grid, &Reporter) -> Result<T> + Send + 'static,
    {
        let (sender, receiver) = sync_channel(capacity);
        let cancel = CancelToken::new();
        let reporter = Reporter {
            sender: Some(sender),
            cancel: cancel.clone(),
        };
        let handle = std::thread::spawn(move || -> Result<T> {
            reporter.send(GridEvent::Initial(grid.clone()))?;
            let result = routine(grid, &reporter);
            // Close the stream before the result becomes observable
            drop(reporter);
            result
        });
        ReportStream {
            events: Some(receiver),
            handle: Some(handle),
            cancel,
            closed: false,
        }
    }
}

impl<T> ReportStream<T> {
    /// Whether the producer has closed the stream and it has been drained.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Drains any remaining snapshots, then returns the routine's final value.
    ///
    /// Panics raised on the producer thread are resumed here.
    pub fn finish(mut self) -> Result<T> {
        for _event in self.by_ref() {}
        self.join()
    }

    /// Stops the run. The producer unblocks at its next publish and the routine's
    /// result is returned, which is [`MazeError::Cancelled`] unless it had already finished.
    pub fn cancel(mut self) -> Result<T> {
        self.cancel.cancel();
        // Dropping the receiver wakes a producer blocked on a full stream
        self.events = None;
        self.closed = true;
        self.join()
    }

    fn join(&mut self) -> Result<T> {
        let Some(handle) = self.handle.take() else {
            return Err(MazeError::Cancelled);
        };
        match handle.join() {
            Ok(result) => result,
            Err(payload) => std::panic::resume_unwind(payload),
        }
    }
}

impl<T> Iterator for ReportStream<T> {
    type Item = GridEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let event = self.events.as_ref()?.recv().ok();
        if event.is_none() {
            self.closed = true;
        }
        event
    }
}

impl<T> Drop for ReportStream<T> {
    fn drop(&mut self) {
        if self.handle.is_some() {
            tracing::debug!("[report] stream dropped before completion, cancelling producer");
            self.cancel.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn carve_row(mut grid: Grid, reporter: &Reporter) -> Result<Grid> {
        for column in 1..grid.columns() {
            grid.link((0, column - 1), (0, column))?;
            reporter.update(&grid)?;
        }
        Ok(grid)
    }

    #[test]
    fn test_initial_then_updates_then_result() {
        let grid = Grid::new(1, 3).unwrap();
        let mut stream = ReportStream::spawn(grid.clone(), 1, carve_row);

        assert_eq!(stream.next(), Some(GridEvent::Initial(grid)));
        let updates = stream.by_ref().collect::<Vec<_>>();
        assert!(stream.is_closed());
        assert_eq!(updates.len(), 2);
        assert!(updates.iter().all(|e| matches!(e, GridEvent::Update(_))));
        assert_eq!(updates[0].grid().link_count(), 1);
        assert_eq!(updates[1].grid().link_count(), 2);

        let last = updates[1].grid().clone();
        assert_eq!(stream.finish().unwrap(), last);
    }

    #[test]
    fn test_finish_drains_remaining_events() {
        let grid = Grid::new(1, 5).unwrap();
        let stream = ReportStream::spawn(grid, 0, carve_row);
        let result = stream.finish().unwrap();
        assert_eq!(result.link_count(), 4);
    }

    #[test]
    fn test_empty_updates_are_not_published() {
        let grid = Grid::new(1, 2).unwrap();
        let stream = ReportStream::spawn(grid, 1, |mut grid, reporter| {
            reporter.update(&grid)?;
            grid.link((0, 0), (0, 1))?;
            reporter.update(&grid)?;
            // Relinking leaves nothing changed
            grid.link((0, 0), (0, 1))?;
            reporter.update(&grid)?;
            Ok(grid)
        });
        let events = stream.collect::<Vec<_>>();
        assert_eq!(events.len(), 2);
        assert!(events[1..].iter().all(|e| !e.grid().changed_cells().is_empty()));
    }

    #[test]
    fn test_cancel_unblocks_producer() {
        let grid = Grid::new(1, 1).unwrap();
        let mut stream = ReportStream::spawn(grid, 1, |mut grid, reporter| -> Result<Grid> {
            let mut value = 0;
            loop {
                value += 1;
                grid.annotate([((0, 0), value)])?;
                reporter.update(&grid)?;
            }
        });
        assert!(matches!(stream.next(), Some(GridEvent::Initial(_))));
        assert!(matches!(stream.next(), Some(GridEvent::Update(_))));
        assert_eq!(stream.cancel(), Err(MazeError::Cancelled));
    }

    #[test]
    fn test_dropped_stream_stops_producer() {
        let (done_tx, done_rx) = std::sync::mpsc::channel();
        let grid = Grid::new(1, 1).unwrap();
        let mut stream = ReportStream::spawn(grid, 1, move |mut grid, reporter| -> Result<Grid> {
            let mut value = 0;
            let result = loop {
                value += 1;
                grid.annotate([((0, 0), value)])?;
                if let Err(e) = reporter.update(&grid) {
                    break Err(e);
                }
            };
            done_tx.send(()).ok();
            result
        });
        stream.next();
        drop(stream);
        assert!(done_rx.recv_timeout(Duration::from_secs(5)).is_ok());
    }

    #[test]
    fn test_run_sync_discards_snapshots() {
        let grid = Grid::new(1, 4).unwrap();
        let result = run_sync(grid, carve_row).unwrap();
        assert_eq!(result.link_count(), 3);
    }

    #[test]
    #[should_panic(expected = "producer failure")]
    fn test_producer_panic_is_resumed() {
        let grid = Grid::new(1, 1).unwrap();
        let stream = ReportStream::spawn(grid, 1, |_grid, _reporter| -> Result<Grid> {
            panic!("producer failure");
        });
        let _ = stream.finish();
    }
}
