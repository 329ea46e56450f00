use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use super::key::ApiKey;

/// How often a queued task re-checks whether it has reached the head of
/// its queue. Smaller values lower grant latency, larger values lower
/// wakeup churn.
const HEAD_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// An admission marker for one pending request under an API key.
///
/// Tickets are handed out in strictly increasing order and served FIFO
/// per key. A ticket is consumed exactly once, by [`AdmissionQueue::release`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Per-key bookkeeping, all guarded by one mutex.
#[derive(Debug, Default)]
struct Lanes {
    /// Pending tickets per key, in arrival order. Entries are removed
    /// when their queue drains.
    queues: HashMap<ApiKey, VecDeque<Ticket>>,
    /// When the most recent request for a key was dispatched. Persists
    /// across drained queues; it is the spacing memory.
    last_dispatch: HashMap<ApiKey, Instant>,
}

/// Serializes concurrent requests sharing an API key.
///
/// Callers [`acquire`](Self::acquire) a [`Ticket`], suspend in
/// [`await_turn`](Self::await_turn) until the ticket reaches the head of
/// its key's queue and the minimum spacing since the key's previous
/// dispatch has elapsed, and [`release`](Self::release) the ticket once
/// the request went out (or was abandoned). Tickets for the same key are
/// granted strictly in acquisition order; keys proceed independently of
/// each other.
///
/// The queue is a value, not a global: independent instances never share
/// state.
#[derive(Debug)]
pub struct AdmissionQueue {
    lanes: Mutex<Lanes>,
    next_ticket: AtomicU64,
    min_interval: Duration,
}

impl AdmissionQueue {
    /// Create a queue enforcing the given minimum gap between dispatches
    /// sharing a key
    #[must_use]
    pub fn new(min_interval: Duration) -> Self {
        Self {
            lanes: Mutex::new(Lanes::default()),
            next_ticket: AtomicU64::new(0),
            min_interval,
        }
    }

    /// The configured minimum gap between two dispatches sharing a key
    #[must_use]
    pub const fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Register a new ticket at the tail of `key`'s queue.
    ///
    /// Non-blocking; the returned ticket must later be passed to
    /// [`release`](Self::release) exactly once.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned
    pub fn acquire(&self, key: &ApiKey) -> Ticket {
        let ticket = Ticket(self.next_ticket.fetch_add(1, Ordering::Relaxed));
        let mut lanes = self.lanes.lock().unwrap();
        lanes.queues.entry(key.clone()).or_default().push_back(ticket);
        ticket
    }

    /// Suspend until `ticket` is at the head of `key`'s queue and the
    /// minimum spacing since the key's last dispatch has elapsed.
    ///
    /// Exactly one ticket per key is unblocked at a time, in ticket
    /// order. If the ticket has already been released, this returns
    /// immediately; the turn it granted is forfeit.
    ///
    /// The internal mutex is only held for the head check, never across
    /// an await.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned
    pub async fn await_turn(&self, key: &ApiKey, ticket: Ticket) {
        loop {
            let wait = {
                let lanes = self.lanes.lock().unwrap();
                match lanes.queues.get(key) {
                    Some(queue) if queue.front() == Some(&ticket) => {
                        match lanes.last_dispatch.get(key) {
                            Some(last) => {
                                let since = last.elapsed();
                                if since >= self.min_interval {
                                    return;
                                }
                                // Head of the queue, just too early: sleep
                                // out the exact remainder instead of polling.
                                self.min_interval - since
                            }
                            None => return,
                        }
                    }
                    Some(queue) if queue.contains(&ticket) => HEAD_POLL_INTERVAL,
                    // Ticket no longer queued; it was released elsewhere.
                    _ => return,
                }
            };
            tokio::time::sleep(wait).await;
        }
    }

    /// Remove `ticket` from `key`'s queue and record now as the key's
    /// last-dispatch time.
    ///
    /// Must be called on every exit path of a dispatch attempt, whether
    /// it succeeded, failed, or is being retried. Releasing a ticket that
    /// is already gone is a no-op for the queue (the timestamp is still
    /// recorded). A drained queue is dropped entirely so no per-key queue
    /// state lingers.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned
    pub fn release(&self, key: &ApiKey, ticket: Ticket) {
        let mut lanes = self.lanes.lock().unwrap();
        let drained = match lanes.queues.get_mut(key) {
            Some(queue) => {
                if let Some(position) = queue.iter().position(|&queued| queued == ticket) {
                    queue.remove(position);
                }
                queue.is_empty()
            }
            None => false,
        };
        if drained {
            lanes.queues.remove(key);
        }
        lanes.last_dispatch.insert(key.clone(), Instant::now());
    }

    /// Acquire a ticket wrapped in a guard that releases it on drop.
    ///
    /// The guard keeps the cleanup on every exit path, including
    /// cancellation while suspended.
    pub(crate) fn enter<'a>(&'a self, key: &'a ApiKey) -> TurnGuard<'a> {
        let ticket = self.acquire(key);
        TurnGuard {
            queue: self,
            key,
            ticket,
        }
    }

    /// Number of pending tickets for `key`
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned
    #[must_use]
    pub fn pending(&self, key: &ApiKey) -> usize {
        self.lanes
            .lock()
            .unwrap()
            .queues
            .get(key)
            .map_or(0, VecDeque::len)
    }

    /// Number of keys with at least one pending ticket
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned
    #[must_use]
    pub fn queued_keys(&self) -> usize {
        self.lanes.lock().unwrap().queues.len()
    }
}

/// RAII handle for one admission ticket.
///
/// Dropping the guard releases the ticket and stamps the key's
/// last-dispatch time, so an abandoned attempt can never starve the
/// tickets queued behind it.
#[derive(Debug)]
pub(crate) struct TurnGuard<'a> {
    queue: &'a AdmissionQueue,
    key: &'a ApiKey,
    ticket: Ticket,
}

impl TurnGuard<'_> {
    /// Wait until the wrapped ticket's turn comes up
    pub(crate) async fn wait(&self) {
        self.queue.await_turn(self.key, self.ticket).await;
    }
}

impl Drop for TurnGuard<'_> {
    fn drop(&mut self) {
        self.queue.release(self.key, self.ticket);
    }
}
