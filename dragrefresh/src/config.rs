//! Controller and indicator configuration.

use std::time::Duration;

use crate::error::ConfigError;
use crate::indicator::IndicatorLabels;
use crate::transitions::{Easing, TransitionConfig};

/// Natural height of the refresh header, in points.
pub const DEFAULT_INDICATOR_HEIGHT: f32 = 60.0;

/// Tunables for a pull-to-refresh header.
///
/// The release threshold is always the indicator's natural height.
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshConfig {
    /// Natural height of the indicator, also the release threshold.
    pub indicator_height: f32,

    /// Duration of the arrow flip and the reveal.
    pub fast_transition: Duration,

    /// Duration of the collapse after a pull or a refresh ends.
    pub collapse_transition: Duration,

    /// Time each spinner glyph stays on screen.
    pub spinner_interval: Duration,

    pub easing: Easing,

    /// When true, every transition completes instantly.
    pub reduced_motion: bool,

    pub labels: IndicatorLabels,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            indicator_height: DEFAULT_INDICATOR_HEIGHT,
            fast_transition: Duration::from_millis(200),
            collapse_transition: Duration::from_millis(300),
            spinner_interval: Duration::from_millis(80),
            easing: Easing::EaseOut,
            reduced_motion: false,
            labels: IndicatorLabels::default(),
        }
    }
}

impl RefreshConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the natural height (and therefore the release threshold).
    pub fn indicator_height(mut self, height: f32) -> Self {
        self.indicator_height = height;
        self
    }

    pub fn fast_transition(mut self, duration: Duration) -> Self {
        self.fast_transition = duration;
        self
    }

    pub fn collapse_transition(mut self, duration: Duration) -> Self {
        self.collapse_transition = duration;
        self
    }

    pub fn spinner_interval(mut self, interval: Duration) -> Self {
        self.spinner_interval = interval;
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Enable or disable reduced motion (accessibility).
    pub fn reduced_motion(mut self, enabled: bool) -> Self {
        self.reduced_motion = enabled;
        self
    }

    pub fn labels(mut self, labels: IndicatorLabels) -> Self {
        self.labels = labels;
        self
    }

    /// Check the configuration before anything is built from it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.indicator_height.is_finite() || self.indicator_height <= 0.0 {
            return Err(ConfigError::InvalidThreshold(self.indicator_height));
        }
        Ok(())
    }

    /// Transition used for the reveal and the arrow flip.
    pub(crate) fn fast(&self) -> TransitionConfig {
        self.transition(self.fast_transition)
    }

    /// Transition used for collapsing the header.
    pub(crate) fn collapse(&self) -> TransitionConfig {
        self.transition(self.collapse_transition)
    }

    fn transition(&self, duration: Duration) -> TransitionConfig {
        if self.reduced_motion {
            TransitionConfig::instant()
        } else {
            TransitionConfig::new(duration, self.easing)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(RefreshConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_heights() {
        for height in [0.0, -10.0, f32::NAN, f32::INFINITY] {
            let err = RefreshConfig::new().indicator_height(height).validate();
            assert!(
                matches!(err, Err(ConfigError::InvalidThreshold(_))),
                "height {} accepted",
                height
            );
        }
    }

    #[test]
    fn test_reduced_motion_makes_transitions_instant() {
        let config = RefreshConfig::new().reduced_motion(true);
        assert!(config.fast().duration.is_zero());
        assert!(config.collapse().duration.is_zero());
    }
}
