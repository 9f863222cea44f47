use std::time::{Duration, Instant};

/// Timing of a counter transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TweenSpec {
    pub duration: Duration,
    pub steps: u32,
}

impl TweenSpec {
    pub fn new(duration: Duration, steps: u32) -> Self {
        TweenSpec {
            duration,
            steps: steps.max(1),
        }
    }

    fn step_len(&self) -> Duration {
        self.duration / self.steps
    }
}

/// Linear step-wise transition from one integer to another
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tween {
    from: i64,
    to: i64,
    started: Instant,
    spec: TweenSpec,
}

impl Tween {
    /// Steps completed at `now`, capped at the step count
    fn step_at(&self, now: Instant) -> u32 {
        let elapsed = now.saturating_duration_since(self.started);
        let step_len = self.spec.step_len();
        if step_len.is_zero() {
            return self.spec.steps;
        }
        let steps = elapsed.as_nanos() / step_len.as_nanos();
        steps.min(self.spec.steps as u128) as u32
    }

    /// Displayed value at `now`. The last step lands exactly on the target.
    pub fn value_at(&self, now: Instant) -> i64 {
        let step = self.step_at(now);
        if step >= self.spec.steps {
            return self.to;
        }
        let delta = (self.to - self.from) as f64 * step as f64 / self.spec.steps as f64;
        (self.from as f64 + delta).round() as i64
    }

    pub fn is_done(&self, now: Instant) -> bool {
        self.step_at(now) >= self.spec.steps
    }
}

/// A displayed number that animates toward each new target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counter {
    shown: i64,
    tween: Option<Tween>,
}

impl Counter {
    pub fn new(value: i64) -> Self {
        Counter {
            shown: value,
            tween: None,
        }
    }

    /// Value to draw at `now`
    pub fn value_at(&self, now: Instant) -> i64 {
        match &self.tween {
            Some(t) => t.value_at(now),
            None => self.shown,
        }
    }

    /// Final value this counter is heading to
    pub fn target(&self) -> i64 {
        self.tween.map_or(self.shown, |t| t.to)
    }

    /// Start moving toward `value` from whatever is on screen at `now`.
    /// No transition starts when the on-screen value already equals `value`.
    pub fn set_target(&mut self, value: i64, now: Instant, spec: TweenSpec) {
        let current = self.value_at(now);
        self.shown = current;
        if current == value {
            self.tween = None;
            return;
        }
        self.tween = Some(Tween {
            from: current,
            to: value,
            started: now,
            spec,
        });
    }

    /// Drop a finished transition. Returns true while still animating.
    pub fn tick(&mut self, now: Instant) -> bool {
        if let Some(t) = self.tween {
            if t.is_done(now) {
                self.shown = t.to;
                self.tween = None;
            } else {
                return true;
            }
        }
        false
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }
}
