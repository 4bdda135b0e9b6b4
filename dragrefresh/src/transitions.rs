use std::time::{Duration, Instant};

/// Configuration for a single value transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionConfig {
    pub duration: Duration,
    pub easing: Easing,
}

impl TransitionConfig {
    pub fn new(duration: Duration, easing: Easing) -> Self {
        Self { duration, easing }
    }

    /// A transition that completes on the spot.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO, Easing::Linear)
    }
}

/// Easing function for transitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl Easing {
    /// Apply easing to progress (0.0 to 1.0).
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

/// Called once when a transition ends. The flag is false if the transition
/// was interrupted by another one before reaching its target.
pub type Completion = Box<dyn FnOnce(bool)>;

struct ActiveTransition {
    from: f32,
    to: f32,
    start: Instant,
    config: TransitionConfig,
    on_complete: Option<Completion>,
}

impl ActiveTransition {
    fn value_at(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.start);
        let progress = if self.config.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f32() / self.config.duration.as_secs_f32()).min(1.0)
        };
        let eased = self.config.easing.apply(progress);
        self.from + (self.to - self.from) * eased
    }

    fn is_done(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start) >= self.config.duration
    }
}

/// A scalar that moves toward a target over time.
///
/// Has no timer of its own: the owner calls [`AnimatedValue::advance`] with
/// the current time. Completion callbacks are dropped, not invoked, if the
/// value itself is dropped mid-transition.
pub struct AnimatedValue {
    current: f32,
    active: Option<ActiveTransition>,
}

impl AnimatedValue {
    pub fn new(value: f32) -> Self {
        Self {
            current: value,
            active: None,
        }
    }

    /// Value as of the last `advance`/`set`.
    pub fn value(&self) -> f32 {
        self.current
    }

    /// Final value once any running transition settles.
    pub fn target(&self) -> f32 {
        self.active.as_ref().map_or(self.current, |t| t.to)
    }

    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    /// Jump to `value`, cancelling any running transition.
    pub fn set(&mut self, value: f32) {
        self.interrupt();
        self.current = value;
    }

    /// Start moving toward `to`.
    ///
    /// A running transition is interrupted and the new one starts from its
    /// current interpolated value. Zero-length transitions complete before
    /// this returns.
    pub fn animate_to(
        &mut self,
        to: f32,
        config: TransitionConfig,
        now: Instant,
        on_complete: Option<Completion>,
    ) {
        if let Some(active) = &self.active {
            self.current = active.value_at(now);
        }
        self.interrupt();

        if config.duration.is_zero() || self.current == to {
            self.current = to;
            if let Some(callback) = on_complete {
                callback(true);
            }
            return;
        }

        self.active = Some(ActiveTransition {
            from: self.current,
            to,
            start: now,
            config,
            on_complete,
        });
    }

    /// Move the value forward to `now`. Returns true if a transition
    /// finished during this call.
    pub fn advance(&mut self, now: Instant) -> bool {
        let Some(active) = &self.active else {
            return false;
        };

        if !active.is_done(now) {
            self.current = active.value_at(now);
            return false;
        }

        let Some(finished) = self.active.take() else {
            return false;
        };
        self.current = finished.to;
        if let Some(callback) = finished.on_complete {
            callback(true);
        }
        true
    }

    fn interrupt(&mut self) {
        if let Some(active) = self.active.take() {
            if let Some(callback) = active.on_complete {
                callback(false);
            }
        }
    }
}

impl std::fmt::Debug for AnimatedValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimatedValue")
            .field("current", &self.current)
            .field("target", &self.target())
            .finish()
    }
}
