//! Bounded-concurrency driver for batches of asynchronous invocations.
//!
//! A [`Pipelining`] instance keeps at most `depth` units of work in
//! flight. Work is pulled one unit at a time from a caller-supplied
//! source; every successful completion immediately pulls the next unit,
//! so the window stays full instead of draining batch by batch. The
//! first failure stops all further pulls and surfaces immediately;
//! units still in flight are dropped, not awaited.

use futures::stream::{FuturesUnordered, StreamExt};
use std::future::Future;

use gridlink_core::{GridlinkError, Result};

/// Drives up to a fixed number of concurrent asynchronous units.
///
/// The instance holds no per-run state, so it can be reused for any
/// number of runs, one at a time or concurrently.
#[derive(Debug, Clone, Copy)]
pub struct Pipelining {
    depth: usize,
}

impl Pipelining {
    /// Creates a driver with the given maximum in-flight depth.
    ///
    /// # Panics
    ///
    /// Panics if `depth` is zero.
    pub fn new(depth: usize) -> Self {
        assert!(depth > 0, "pipelining depth must be positive");
        Self { depth }
    }

    /// Maximum number of units kept in flight.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Runs all units the source yields, discarding their results.
    ///
    /// Returns the first failure, if any.
    pub async fn run<F, Fut, T>(&self, source: F) -> Result<()>
    where
        F: FnMut() -> Option<Fut>,
        Fut: Future<Output = Result<T>>,
    {
        self.drive(source, false).await.map(|_| ())
    }

    /// Runs all units the source yields and returns their results in
    /// submission order, regardless of completion order.
    pub async fn run_collect<F, Fut, T>(&self, source: F) -> Result<Vec<T>>
    where
        F: FnMut() -> Option<Fut>,
        Fut: Future<Output = Result<T>>,
    {
        let slots = self.drive(source, true).await?;
        slots
            .into_iter()
            .map(|slot| {
                slot.ok_or_else(|| {
                    GridlinkError::Connection(
                        "pipelined unit settled without recording a result".to_string(),
                    )
                })
            })
            .collect()
    }

    /// Shared driver loop.
    ///
    /// Each unit is tagged with its submission index when pulled. In
    /// collect mode a result slot is reserved at pull time and filled
    /// on success, which is what keeps output order independent of
    /// completion order.
    async fn drive<F, Fut, T>(&self, mut source: F, collect: bool) -> Result<Vec<Option<T>>>
    where
        F: FnMut() -> Option<Fut>,
        Fut: Future<Output = Result<T>>,
    {
        let mut in_flight = FuturesUnordered::new();
        let mut slots: Vec<Option<T>> = Vec::new();
        let mut submitted = 0usize;
        let mut exhausted = false;

        loop {
            while !exhausted && in_flight.len() < self.depth {
                match source() {
                    Some(unit) => {
                        let index = submitted;
                        submitted += 1;
                        if collect {
                            slots.push(None);
                        }
                        in_flight.push(async move { (index, unit.await) });
                    }
                    None => exhausted = true,
                }
            }

            match in_flight.next().await {
                Some((index, Ok(value))) => {
                    if collect {
                        slots[index] = Some(value);
                    }
                }
                Some((index, Err(error))) => {
                    tracing::debug!(index, "pipelined unit failed, abandoning the rest");
                    return Err(error);
                }
                None => return Ok(slots),
            }
        }
    }
}
