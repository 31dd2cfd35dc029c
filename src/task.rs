//! Units of work that an external scheduler can invoke.
//!
//! A [`Task`] runs once per call, to completion or failure, and shares no mutable
//! state with other invocations. [`TaskBatch`] runs several of them concurrently
//! with a concurrency cap, returning results in input order.

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use serde_json::Value;
use std::error::Error as StdError;
use std::sync::Arc;
use thiserror::Error;

const DEFAULT_MAX_CONCURRENCY: usize = 8;

/// A single invocable unit of work.
#[async_trait]
pub trait Task: Send + Sync {
    /// Name used in logs and errors.
    fn name(&self) -> &str;

    /// Runs the task once.
    ///
    /// # Returns
    /// The task's JSON result, or a [`TaskError`] naming the task.
    async fn run(&self) -> Result<Value, TaskError>;
}

#[derive(Debug, Error)]
#[error("Task '{task}' failed: {source}")]
pub struct TaskError {
    pub task: String,
    #[source]
    pub source: Box<dyn StdError + Send + Sync>,
}

impl TaskError {
    pub fn new(task: impl Into<String>, source: impl StdError + Send + Sync + 'static) -> Self {
        Self {
            task: task.into(),
            source: Box::new(source),
        }
    }

    /// The underlying error, if it is of type `E`.
    pub fn source_as<E: StdError + 'static>(&self) -> Option<&E> {
        self.source.downcast_ref::<E>()
    }
}

/// Runs independent tasks concurrently, at most `max_concurrency` at a time.
#[derive(Clone)]
pub struct TaskBatch {
    tasks: Vec<Arc<dyn Task>>,
    max_concurrency: usize,
}

impl TaskBatch {
    pub fn new(tasks: Vec<Arc<dyn Task>>) -> Self {
        TaskBatch {
            tasks,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }

    pub fn with_concurrency(self, max_concurrency: usize) -> Self {
        assert!(
            max_concurrency > 0,
            "Max concurrency must be greater than 0"
        );
        TaskBatch {
            tasks: self.tasks,
            max_concurrency,
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Runs every task once. The i-th result belongs to the i-th task.
    pub async fn run(&self) -> Vec<Result<Value, TaskError>> {
        stream::iter(self.tasks.iter())
            .map(|task| async move {
                let result = task.run().await;
                if let Err(ref e) = result {
                    log::warn!("{}", e);
                }
                result
            })
            .buffered(self.max_concurrency)
            .collect()
            .await
    }
}
