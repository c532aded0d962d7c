use std::cell::Cell;
use std::rc::Rc;

pub type TimerId = u32;

/// Handle returned by scheduling; stays valid to `cancel()` indefinitely.
///
/// Canceling an already-fired one-shot task is a silent no-op. Cancellation is
/// lazy: the flag is checked when the task comes due, the queue is never
/// reordered or eagerly searched.
#[derive(Clone)]
pub struct TimerHandle {
    id: TimerId,
    canceled: Rc<Cell<bool>>,
}

impl TimerHandle {
    pub fn id(&self) -> TimerId {
        self.id
    }

    pub fn cancel(&self) {
        self.canceled.set(true);
    }

    pub fn is_canceled(&self) -> bool {
        self.canceled.get()
    }
}

/// A deferred callback keyed by simulated time
pub struct TimerTask<C> {
    id: TimerId,
    at: f64,
    repeat: bool,
    interval: f64,
    canceled: Rc<Cell<bool>>,
    callback: Box<dyn FnMut(&mut C)>,
}

impl<C> TimerTask<C> {
    pub fn id(&self) -> TimerId {
        self.id
    }

    pub fn fire_at(&self) -> f64 {
        self.at
    }

    pub fn is_repeating(&self) -> bool {
        self.repeat
    }

    pub fn interval(&self) -> f64 {
        self.interval
    }

    pub fn is_canceled(&self) -> bool {
        self.canceled.get()
    }

    pub fn invoke(&mut self, ctx: &mut C) {
        (self.callback)(ctx);
    }

    /// Moves the fire time forward by one interval
    pub fn advance(&mut self) {
        self.at += self.interval;
    }
}

/// Ordered queue of deferred and repeating callbacks, kept sorted ascending by
/// fire time with binary-search insertion.
pub struct TimerQueue<C> {
    next_id: TimerId,
    tasks: Vec<TimerTask<C>>,
}

impl<C> TimerQueue<C> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            tasks: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
        self.next_id = 0;
    }

    /// Schedules a one-shot callback `delay` simulated seconds after `now`.
    /// Negative delays clamp to zero.
    pub fn schedule(
        &mut self,
        now: f64,
        delay: f64,
        callback: Box<dyn FnMut(&mut C)>,
    ) -> TimerHandle {
        self.push_task(now + delay.max(0.0), false, 0.0, callback)
    }

    /// Schedules a repeating callback; the first fire comes one interval after
    /// `now`. If the simulation stalls past multiple intervals the callback
    /// fires once per missed interval when drained, not once with a larger
    /// delta.
    pub fn schedule_interval(
        &mut self,
        now: f64,
        interval: f64,
        callback: Box<dyn FnMut(&mut C)>,
    ) -> TimerHandle {
        let interval = interval.max(0.0);
        self.push_task(now + interval, true, interval, callback)
    }

    fn push_task(
        &mut self,
        at: f64,
        repeat: bool,
        interval: f64,
        callback: Box<dyn FnMut(&mut C)>,
    ) -> TimerHandle {
        self.next_id += 1;
        let canceled = Rc::new(Cell::new(false));
        let task = TimerTask {
            id: self.next_id,
            at,
            repeat,
            interval,
            canceled: Rc::clone(&canceled),
            callback,
        };
        self.insert(task);
        TimerHandle {
            id: self.next_id,
            canceled,
        }
    }

    /// Re-inserts a task (used after a repeating task catches up)
    pub fn insert(&mut self, task: TimerTask<C>) {
        // binary search keeps the queue ascending by fire time; ties keep
        // insertion order by landing after existing equal entries
        let mut lo = 0;
        let mut hi = self.tasks.len();
        while lo < hi {
            let mid = (lo + hi) / 2;
            if self.tasks[mid].at <= task.at {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        self.tasks.insert(lo, task);
    }

    /// Pops the head task if it fires at or before `now`
    pub fn pop_due(&mut self, now: f64) -> Option<TimerTask<C>> {
        if self.tasks.first()?.at <= now {
            Some(self.tasks.remove(0))
        } else {
            None
        }
    }
}

impl<C> Default for TimerQueue<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// A simulation context that owns a [`TimerQueue`] keyed by its own simulated
/// clock. The provided `process_timers` implements the drain-with-catch-up
/// policy in one place for both the authoritative and observer worlds.
pub trait TimerContext: Sized {
    fn timer_queue(&mut self) -> &mut TimerQueue<Self>;
    fn sim_time(&self) -> f64;

    /// Drains every task due at the current simulated time.
    ///
    /// One-shots fire once and are dropped. Repeating tasks catch up: one
    /// invocation per missed interval before control returns. A repeating
    /// task with a non-positive interval fires once and is dropped rather
    /// than spinning.
    fn process_timers(&mut self) {
        loop {
            let now = self.sim_time();
            let Some(mut task) = self.timer_queue().pop_due(now) else {
                break;
            };
            if task.is_canceled() {
                continue;
            }

            if !task.is_repeating() {
                task.invoke(self);
                continue;
            }

            if task.interval() <= 0.0 {
                task.invoke(self);
                continue;
            }

            loop {
                task.invoke(self);
                task.advance();
                if task.fire_at() > self.sim_time() || task.is_canceled() {
                    break;
                }
            }
            if !task.is_canceled() {
                self.timer_queue().insert(task);
            }
        }
    }
}
