//! queue
//!
//! Deferred execution for git commits.
//!
//! # Why this exists
//!
//! Git cannot run concurrent add+commit pairs against one working tree.
//! When many entries are processed in bulk, each operation stages its own
//! paths but the commit must be serialized. The engine therefore asks for
//! a [`Ticket`] wrapping the commit work: with a [`CommitQueue`] in scope
//! the work is handed to a single background worker, without one the
//! ticket simply runs the task inline.
//!
//! The engine never touches threading primitives; it only ever invokes a
//! ticket.
//!
//! # Invariants
//!
//! - Queued tasks execute one at a time, in submission order
//! - [`CommitQueue::close`] drains every accepted task before returning
//! - A closed queue degrades to inline execution instead of dropping work

use std::sync::mpsc::{channel, Sender};
use std::sync::Mutex;
use std::thread::{self, JoinHandle};

use crate::store::StoreError;

/// A unit of deferred git work.
pub type Task = Box<dyn FnOnce() -> Result<(), StoreError> + Send + 'static>;

/// A handle to work that may or may not have been deferred.
pub enum Ticket {
    /// No queue backs this ticket; invoking runs the task synchronously.
    Inline(Task),
    /// The task was accepted by a background worker; invoking reports
    /// acceptance. The task's own error surfaces from [`CommitQueue::close`].
    Queued,
}

impl Ticket {
    /// Execute (or acknowledge) the ticket, propagating the task's error.
    pub fn invoke(self) -> Result<(), StoreError> {
        match self {
            Ticket::Inline(task) => task(),
            Ticket::Queued => Ok(()),
        }
    }
}

/// A serializing background worker for git commit tasks.
pub struct CommitQueue {
    sender: Mutex<Option<Sender<Task>>>,
    worker: Mutex<Option<JoinHandle<Vec<StoreError>>>>,
}

impl CommitQueue {
    /// Start the background worker.
    pub fn new() -> Self {
        let (tx, rx) = channel::<Task>();
        let worker = thread::spawn(move || {
            let mut errors = Vec::new();
            for task in rx {
                if let Err(err) = task() {
                    errors.push(err);
                }
            }
            errors
        });

        Self {
            sender: Mutex::new(Some(tx)),
            worker: Mutex::new(Some(worker)),
        }
    }

    /// Hand a task to the worker.
    ///
    /// Returns [`Ticket::Queued`] on acceptance. After [`close`] the task
    /// comes back as an inline ticket so no work is ever lost.
    ///
    /// [`close`]: CommitQueue::close
    pub fn add(&self, task: Task) -> Ticket {
        let guard = self.sender.lock().expect("queue sender poisoned");
        match guard.as_ref() {
            Some(tx) => match tx.send(task) {
                Ok(()) => Ticket::Queued,
                Err(unsent) => Ticket::Inline(unsent.0),
            },
            None => Ticket::Inline(task),
        }
    }

    /// Drain all accepted tasks and stop the worker.
    ///
    /// Returns the errors the tasks produced, in execution order.
    pub fn close(&self) -> Vec<StoreError> {
        // dropping the sender ends the worker's receive loop
        self.sender.lock().expect("queue sender poisoned").take();

        let worker = self.worker.lock().expect("queue worker poisoned").take();
        match worker {
            Some(handle) => handle.join().unwrap_or_default(),
            None => Vec::new(),
        }
    }
}

impl Default for CommitQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CommitQueue {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn inline_ticket_runs_task() {
        let ran = Arc::new(AtomicUsize::new(0));
        let ran2 = Arc::clone(&ran);
        let ticket = Ticket::Inline(Box::new(move || {
            ran2.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }));

        ticket.invoke().expect("inline task");
        assert_eq!(ran.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn inline_ticket_propagates_error() {
        let ticket = Ticket::Inline(Box::new(|| Err(StoreError::NotFound)));
        assert!(matches!(ticket.invoke(), Err(StoreError::NotFound)));
    }

    #[test]
    fn queued_tasks_run_in_order() {
        let queue = CommitQueue::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for i in 0..10 {
            let order = Arc::clone(&order);
            let ticket = queue.add(Box::new(move || {
                // give later submissions a chance to overtake if the
                // worker were not serializing
                thread::sleep(Duration::from_millis(2));
                order.lock().unwrap().push(i);
                Ok(())
            }));
            assert!(matches!(ticket, Ticket::Queued));
            ticket.invoke().expect("queued ticket acks");
        }

        let errors = queue.close();
        assert!(errors.is_empty());
        assert_eq!(*order.lock().unwrap(), (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn close_collects_task_errors() {
        let queue = CommitQueue::new();
        queue
            .add(Box::new(|| Err(StoreError::NotFound)))
            .invoke()
            .expect("acceptance is not failure");
        queue.add(Box::new(|| Ok(()))).invoke().expect("ack");

        let errors = queue.close();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], StoreError::NotFound));
    }

    #[test]
    fn add_after_close_degrades_to_inline() {
        let queue = CommitQueue::new();
        queue.close();

        let ran = Arc::new(AtomicUsize::new(0));
        let ran2 = Arc::clone(&ran);
        let ticket = queue.add(Box::new(move || {
            ran2.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }));

        assert!(matches!(ticket, Ticket::Inline(_)));
        ticket.invoke().expect("inline run");
        assert_eq!(ran.load(Ordering::SeqCst), 1);
    }
}
