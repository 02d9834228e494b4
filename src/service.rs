use slimefinder_chunks::{ClassificationGrid, GridEvaluator, GridQuery};
use slimefinder_common::Result;
use slimefinder_logger::{log, LogSeverity::*};
use std::io;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

/// A grid together with the request that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSnapshot {
    pub generation: u64,
    pub query: GridQuery,
    pub grid: Arc<ClassificationGrid>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Publication {
    /// The result was current and is now the published grid.
    Published(GridSnapshot),
    /// A newer request arrived first; the result for this generation was dropped.
    Superseded(u64),
}

/// Recomputes grids as queries change, publishing only the newest result.
///
/// Every `submit` takes the next generation number. Work for a generation
/// that is no longer current stops between rows, and its result is never
/// published over a newer one.
#[derive(Debug)]
pub struct GridService {
    generation: Arc<AtomicU64>,
    published: watch::Sender<Option<GridSnapshot>>,
}

impl Default for GridService {
    fn default() -> Self {
        Self::new()
    }
}

impl GridService {
    pub fn new() -> Self {
        let (published, _) = watch::channel(None);
        GridService {
            generation: Arc::new(AtomicU64::new(0)),
            published,
        }
    }

    /// Receiver that observes every published grid.
    pub fn subscribe(&self) -> watch::Receiver<Option<GridSnapshot>> {
        self.published.subscribe()
    }

    pub fn latest(&self) -> Option<GridSnapshot> {
        self.published.borrow().clone()
    }

    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    pub async fn submit(&self, query: GridQuery) -> Result<Publication> {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        let counter = Arc::clone(&self.generation);
        let worker_query = query.clone();

        let evaluated = tokio::task::spawn_blocking(move || {
            GridEvaluator::evaluate_while(&worker_query, || {
                counter.load(Ordering::Acquire) == generation
            })
        })
        .await
        .map_err(io::Error::from)??;

        match evaluated {
            Some(grid) => Ok(self.publish(GridSnapshot {
                generation,
                query,
                grid: Arc::new(grid),
            })),
            None => {
                log(format!("Abandoned grid generation {}", generation), Debug);
                Ok(Publication::Superseded(generation))
            }
        }
    }

    fn publish(&self, snapshot: GridSnapshot) -> Publication {
        let generation = snapshot.generation;
        let current = self.current_generation();
        let candidate = snapshot.clone();

        let replaced = self.published.send_if_modified(|slot| {
            let newer = slot.as_ref().map_or(true, |old| old.generation < generation);
            if newer && generation == current {
                *slot = Some(candidate);
                true
            } else {
                false
            }
        });

        if replaced {
            log(
                format!(
                    "Published grid generation {} with {} marked chunks",
                    generation,
                    snapshot.grid.marked_count()
                ),
                Debug,
            );
            Publication::Published(snapshot)
        } else {
            log(format!("Dropped stale grid generation {}", generation), Debug);
            Publication::Superseded(generation)
        }
    }
}
