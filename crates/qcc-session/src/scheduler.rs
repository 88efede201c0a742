//! One-shot timers keyed by session id.
//!
//! The scheduler has no thread and no wall clock of its own. The owner
//! drives it with `advance`, which returns every action that came due,
//! ordered by due time and then by scheduling order.

use std::fmt;
use std::time::Duration;

/// Identifies the session a timer belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

/// Handle for a single scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

#[derive(Debug)]
struct Task<A> {
    id: TaskId,
    session: SessionId,
    due: Duration,
    action: A,
}

/// Cancellable one-shot timer queue.
#[derive(Debug)]
pub struct Scheduler<A> {
    now: Duration,
    next_id: u64,
    tasks: Vec<Task<A>>,
}

impl<A> Scheduler<A> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            tasks: Vec::new(),
        }
    }

    /// Schedule `action` to fire `delay` from now.
    pub fn schedule(&mut self, session: SessionId, delay: Duration, action: A) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.push(Task {
            id,
            session,
            due: self.now + delay,
            action,
        });
        id
    }

    /// Cancel one timer. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    /// Cancel every pending timer of `session`. Returns how many were dropped.
    pub fn cancel_session(&mut self, session: SessionId) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.session != session);
        before - self.tasks.len()
    }

    /// Number of pending timers for `session`.
    pub fn pending_for(&self, session: SessionId) -> usize {
        self.tasks.iter().filter(|t| t.session == session).count()
    }

    /// Move the clock forward and collect every timer that came due.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<(SessionId, A)> {
        self.now += elapsed;
        let now = self.now;
        let (mut due, rest): (Vec<Task<A>>, Vec<Task<A>>) =
            std::mem::take(&mut self.tasks)
                .into_iter()
                .partition(|t| t.due <= now);
        self.tasks = rest;
        due.sort_by_key(|t| (t.due, t.id));
        due.into_iter().map(|t| (t.session, t.action)).collect()
    }
}

impl<A> Default for Scheduler<A> {
    fn default() -> Self {
        Self::new()
    }
}
