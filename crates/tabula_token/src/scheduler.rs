//! Deferred processing.
//!
//! Tasks are registered while primary tokens are parsed and run in one pass
//! once the load unit is complete, in ascending priority with registration
//! order breaking ties.

use std::collections::HashSet;
use std::sync::Arc;

use tabula_foundation::{EntityId, Error};
use tabula_storage::ObjectStore;
use tracing::{debug, error};

use crate::token::DeferredToken;

/// A registered deferred task.
#[derive(Clone, Debug)]
pub struct DeferredTask {
    /// Scheduling priority; lower runs first.
    pub priority: i32,
    /// Entity the task finalizes.
    pub entity: EntityId,
    /// The work.
    pub task: Arc<dyn DeferredToken>,
}

/// Outcome of one scheduler run.
#[derive(Debug, Default)]
pub struct SchedulerRun {
    /// Tasks that completed.
    pub succeeded: usize,
    /// Failures, one per failed task, in execution order.
    pub failures: Vec<Error>,
}

/// Priority-ordered queue of deferred tasks.
#[derive(Debug, Default)]
pub struct DeferredScheduler {
    tasks: Vec<DeferredTask>,
    registered: HashSet<(String, EntityId)>,
}

impl DeferredScheduler {
    /// Creates an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `task` for `entity` at `priority`.
    ///
    /// A task is registered at most once per task name and entity. Returns
    /// false if it was already registered.
    pub fn register(&mut self, priority: i32, entity: EntityId, task: Arc<dyn DeferredToken>) -> bool {
        if !self.registered.insert((task.name().to_string(), entity)) {
            return false;
        }
        self.tasks.push(DeferredTask {
            priority,
            entity,
            task,
        });
        true
    }

    /// Returns the number of registered tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Returns the tasks in execution order.
    #[must_use]
    pub fn ordered(&self) -> Vec<&DeferredTask> {
        let mut ordered: Vec<_> = self.tasks.iter().collect();
        // Stable: equal priorities keep registration order.
        ordered.sort_by_key(|t| t.priority);
        ordered
    }

    /// Runs every task against `store`.
    ///
    /// A failing task does not roll back the others; its error is logged and
    /// returned in the run summary. Tasks stay registered, so running again
    /// is allowed and, with idempotent tasks, changes nothing.
    pub fn run_all(&self, store: &mut ObjectStore) -> SchedulerRun {
        let mut run = SchedulerRun::default();
        for DeferredTask {
            priority,
            entity,
            task,
        } in self.ordered()
        {
            match task.process(store, *entity) {
                Ok(()) => {
                    debug!(task = task.name(), priority, %entity, "deferred task done");
                    run.succeeded += 1;
                }
                Err(err) => {
                    error!(task = task.name(), priority, %entity, %err, "deferred task failed");
                    run.failures.push(Error::deferred_task(
                        format!("{} on {entity}", task.name()),
                        err.to_string(),
                    ));
                }
            }
        }
        run
    }
}
