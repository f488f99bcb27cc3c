//! Debounced highlight scheduling.
//!
//! Every buffer mutation advances a [`Generation`] and arms one deferred callback carrying the
//! generation it was armed with, due one quiet interval later. When a callback comes due it only
//! wins if no later mutation has happened since; otherwise it is discarded. A burst of edits
//! therefore ends in exactly one highlight pass, run one quiet interval after the last edit.
//!
//! The scheduler is single-threaded: state is shared through `Rc` so a clone can be handed to
//! the buffer as its mutation observer while the session polls its own handle.

use log::{debug, trace};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::{Duration, Instant};
use wacccode_core::MutationCallback;

/// Default quiet interval.
pub const DEFAULT_QUIET_INTERVAL: Duration = Duration::from_millis(1000);

/// Monotonic mutation counter.
///
/// When the count reaches `u64::MAX` the next mutation resets it to zero and starts a new epoch,
/// so no two live generations ever compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Generation {
    epoch: u32,
    count: u64,
}

impl Generation {
    /// Mutations counted in the current epoch.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Number of counter resets so far.
    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    fn next(self) -> Self {
        match self.count.checked_add(1) {
            Some(count) => Self {
                epoch: self.epoch,
                count,
            },
            None => Self {
                epoch: self.epoch.wrapping_add(1),
                count: 0,
            },
        }
    }
}

/// Source of the current time.
pub trait Clock {
    /// The current instant.
    fn now(&self) -> Instant;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    /// Start at the current instant.
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

#[derive(Debug, Clone, Copy)]
struct Armed {
    due: Instant,
    token: Generation,
}

struct SchedulerState {
    generation: Cell<Generation>,
    armed: RefCell<VecDeque<Armed>>,
    quiet_interval: Duration,
    clock: Rc<dyn Clock>,
}

/// Debounces mutation notifications into highlight passes.
///
/// Cloning yields a handle onto the same state.
#[derive(Clone)]
pub struct HighlightScheduler {
    state: Rc<SchedulerState>,
}

impl HighlightScheduler {
    /// Create a scheduler on the wall clock.
    pub fn new(quiet_interval: Duration) -> Self {
        Self::with_clock(quiet_interval, Rc::new(SystemClock))
    }

    /// Create a scheduler on a custom clock.
    pub fn with_clock(quiet_interval: Duration, clock: Rc<dyn Clock>) -> Self {
        Self::starting_at(Generation::default(), quiet_interval, clock)
    }

    fn starting_at(generation: Generation, quiet_interval: Duration, clock: Rc<dyn Clock>) -> Self {
        Self {
            state: Rc::new(SchedulerState {
                generation: Cell::new(generation),
                armed: RefCell::new(VecDeque::new()),
                quiet_interval,
                clock,
            }),
        }
    }

    /// The quiet interval.
    pub fn quiet_interval(&self) -> Duration {
        self.state.quiet_interval
    }

    /// The current generation.
    pub fn generation(&self) -> Generation {
        self.state.generation.get()
    }

    /// The current time on the scheduler's clock.
    pub fn now(&self) -> Instant {
        self.state.clock.now()
    }

    /// Record a mutation: advance the generation and arm a callback for it.
    pub fn notify_mutation(&self) -> Generation {
        let token = self.state.generation.get().next();
        self.state.generation.set(token);

        let due = self.state.clock.now() + self.state.quiet_interval;
        self.state.armed.borrow_mut().push_back(Armed { due, token });
        trace!(epoch = token.epoch, count = token.count; "armed highlight callback");
        token
    }

    /// A buffer observer that forwards every mutation to this scheduler.
    pub fn mutation_observer(&self) -> MutationCallback {
        let scheduler = self.clone();
        Box::new(move |_event| {
            scheduler.notify_mutation();
        })
    }

    /// Drop every armed callback. Returns how many were dropped.
    pub fn disarm(&self) -> usize {
        let dropped = self.state.armed.borrow_mut().drain(..).count();
        if dropped > 0 {
            trace!(dropped = dropped; "disarmed highlight callbacks");
        }
        dropped
    }

    /// Number of armed callbacks not yet due.
    pub fn pending(&self) -> usize {
        self.state.armed.borrow().len()
    }

    /// When the earliest armed callback comes due.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.state.armed.borrow().front().map(|armed| armed.due)
    }

    /// Returns `true` if a callback armed with `token` should run its highlight pass.
    pub fn fire(&self, token: Generation) -> bool {
        let current = self.state.generation.get();
        if token == current {
            true
        } else {
            debug!(
                token = token.count,
                current = current.count;
                "superseded highlight callback discarded"
            );
            false
        }
    }

    /// Fire every callback due at `now`. Returns the winning generation, if any.
    pub fn poll_at(&self, now: Instant) -> Option<Generation> {
        let mut winner = None;
        loop {
            let next = {
                let mut armed = self.state.armed.borrow_mut();
                match armed.front() {
                    Some(front) if front.due <= now => armed.pop_front(),
                    _ => None,
                }
            };
            let Some(armed) = next else {
                break;
            };
            if self.fire(armed.token) {
                winner = Some(armed.token);
            }
        }
        winner
    }

    /// Fire every callback due on the scheduler's clock.
    pub fn poll(&self) -> Option<Generation> {
        self.poll_at(self.state.clock.now())
    }
}

impl std::fmt::Debug for HighlightScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HighlightScheduler")
            .field("generation", &self.generation())
            .field("pending", &self.pending())
            .field("quiet_interval", &self.state.quiet_interval)
            .finish()
    }
}
