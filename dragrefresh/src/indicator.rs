//! The pull-to-refresh header view.
//!
//! The view is purely reactive: the controller tells it which mode to draw,
//! how far the pull has progressed and what time it is. It owns no timers.

use std::time::Instant;

use chrono::{DateTime, Local};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::config::RefreshConfig;
use crate::error::ConfigError;
use crate::state::{IndicatorStatus, VisualMode};
use crate::transitions::AnimatedValue;

/// Braille spinner glyphs, one per frame.
const SPINNER_FRAMES: [char; 8] = [
    '\u{28F7}', // ⣷
    '\u{28EF}', // ⣯
    '\u{28DF}', // ⣟
    '\u{287F}', // ⡿
    '\u{28BF}', // ⢿
    '\u{28FB}', // ⣻
    '\u{28FD}', // ⣽
    '\u{28FE}', // ⣾
];

const ARROW_DOWN: char = '\u{2193}';
const ARROW_UP: char = '\u{2191}';

/// Arrow rotation, in degrees, once the header is armed.
const ARROW_FLIPPED: f32 = 180.0;

/// Status texts shown in the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorLabels {
    pub pull: String,
    pub release: String,
    pub refreshing: String,
    /// Prefix for the last-updated line.
    pub last_updated: String,
}

impl Default for IndicatorLabels {
    fn default() -> Self {
        Self {
            pull: "Pull down to refresh...".to_string(),
            release: "Release to refresh...".to_string(),
            refreshing: "Refreshing...".to_string(),
            last_updated: "Last updated: ".to_string(),
        }
    }
}

impl IndicatorLabels {
    pub fn for_status(&self, status: IndicatorStatus) -> &str {
        match status {
            IndicatorStatus::PullToRefresh => &self.pull,
            IndicatorStatus::ReleaseToRefresh => &self.release,
            IndicatorStatus::Refreshing => &self.refreshing,
        }
    }
}

/// Everything a host needs to draw the header for the current frame.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorAppearance {
    pub mode: VisualMode,
    pub status: IndicatorStatus,
    pub status_text: String,
    /// Pull progress, 0.0 to 1.0.
    pub progress: f32,
    /// 0.0 fully hidden, 1.0 fully shown.
    pub opacity: f32,
    /// Arrow rotation in degrees; 180 means "release to refresh".
    pub arrow_rotation: f32,
    /// Current spinner glyph while spinning.
    pub spinner: Option<char>,
    pub last_updated: Option<String>,
}

/// Header control drawn above the list while pulling and refreshing.
pub struct RefreshIndicatorView {
    config: RefreshConfig,
    mode: VisualMode,
    status: IndicatorStatus,
    progress: f32,
    opacity: AnimatedValue,
    arrow: AnimatedValue,
    spin_started: Option<Instant>,
    clock: Instant,
    last_updated: Option<DateTime<Local>>,
}

impl RefreshIndicatorView {
    pub fn new(config: RefreshConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            mode: VisualMode::Hidden,
            status: IndicatorStatus::PullToRefresh,
            progress: 0.0,
            opacity: AnimatedValue::new(0.0),
            arrow: AnimatedValue::new(0.0),
            spin_started: None,
            clock: Instant::now(),
            last_updated: None,
        })
    }

    /// Height of the header when fully revealed.
    pub fn natural_height(&self) -> f32 {
        self.config.indicator_height
    }

    pub fn config(&self) -> &RefreshConfig {
        &self.config
    }

    pub fn mode(&self) -> VisualMode {
        self.mode
    }

    pub fn status(&self) -> IndicatorStatus {
        self.status
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn opacity(&self) -> f32 {
        self.opacity.value()
    }

    pub fn arrow_rotation(&self) -> f32 {
        self.arrow.value()
    }

    /// True while the header is shown or still animating out.
    pub fn is_visible(&self) -> bool {
        self.opacity.value() > 0.0 || self.opacity.target() > 0.0
    }

    pub fn is_animating(&self) -> bool {
        self.opacity.is_animating() || self.arrow.is_animating()
    }

    pub fn last_updated(&self) -> Option<DateTime<Local>> {
        self.last_updated
    }

    /// Seed or replace the last-updated stamp.
    pub fn set_last_updated(&mut self, at: DateTime<Local>) {
        self.last_updated = Some(at);
    }

    /// Set pull progress, clamped to 0.0..=1.0.
    pub fn set_progress(&mut self, progress: f32) {
        self.progress = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
    }

    pub fn set_mode(&mut self, mode: VisualMode, now: Instant) {
        if self.mode == mode {
            return;
        }
        self.spin_started = match mode {
            VisualMode::Spinning => Some(now),
            _ => None,
        };
        self.mode = mode;
    }

    /// Change the status line, flipping the arrow between pull and release.
    pub fn set_status(&mut self, status: IndicatorStatus, now: Instant) {
        if self.status == status {
            return;
        }
        self.status = status;
        let rotation = match status {
            IndicatorStatus::PullToRefresh => 0.0,
            IndicatorStatus::ReleaseToRefresh => ARROW_FLIPPED,
            IndicatorStatus::Refreshing => return,
        };
        self.arrow.animate_to(rotation, self.config.fast(), now, None);
    }

    /// Put the arrow back in the pull position without animating.
    pub fn reset_arrow(&mut self) {
        self.status = IndicatorStatus::PullToRefresh;
        self.arrow.set(0.0);
    }

    /// Fade the header in. `on_complete` runs once the reveal settles, or
    /// with `false` if a later show/hide interrupts it.
    pub fn show<F>(&mut self, now: Instant, on_complete: F)
    where
        F: FnOnce(bool) + 'static,
    {
        self.clock = now;
        self.opacity
            .animate_to(1.0, self.config.fast(), now, Some(Box::new(on_complete)));
    }

    /// Collapse the header. Mode and progress drop immediately; the fade
    /// runs until `on_complete` fires.
    pub fn hide<F>(&mut self, now: Instant, on_complete: F)
    where
        F: FnOnce(bool) + 'static,
    {
        self.clock = now;
        self.set_mode(VisualMode::Hidden, now);
        self.progress = 0.0;
        self.opacity
            .animate_to(0.0, self.config.collapse(), now, Some(Box::new(on_complete)));
    }

    /// Advance animations and the spinner to `now`.
    pub fn tick(&mut self, now: Instant) {
        if now > self.clock {
            self.clock = now;
        }
        self.opacity.advance(self.clock);
        self.arrow.advance(self.clock);
    }

    /// Index into the spinner glyphs for the current clock.
    pub fn spinner_frame(&self) -> Option<usize> {
        let started = self.spin_started?;
        let interval = self.config.spinner_interval.as_millis().max(1);
        let elapsed = self.clock.saturating_duration_since(started).as_millis();
        Some(((elapsed / interval) % SPINNER_FRAMES.len() as u128) as usize)
    }

    pub fn last_updated_text(&self) -> Option<String> {
        self.last_updated.map(|at| {
            format!(
                "{}{}",
                self.config.labels.last_updated,
                at.format("%-m/%-d/%y %-I:%M %p")
            )
        })
    }

    pub fn appearance(&self) -> IndicatorAppearance {
        IndicatorAppearance {
            mode: self.mode,
            status: self.status,
            status_text: self.config.labels.for_status(self.status).to_string(),
            progress: self.progress,
            opacity: self.opacity.value(),
            arrow_rotation: self.arrow.value(),
            spinner: self.spinner_frame().map(|frame| SPINNER_FRAMES[frame]),
            last_updated: self.last_updated_text(),
        }
    }

    /// Render the header as centered text lines, `width` columns wide.
    ///
    /// Returns no lines once the header has fully collapsed.
    pub fn render(&self, width: usize) -> Vec<String> {
        if self.mode == VisualMode::Hidden && !self.is_visible() {
            return Vec::new();
        }

        let appearance = self.appearance();
        let glyph = match appearance.spinner {
            Some(frame) => frame,
            None if appearance.arrow_rotation >= ARROW_FLIPPED / 2.0 => ARROW_UP,
            None => ARROW_DOWN,
        };

        let mut lines = vec![center(&format!("{} {}", glyph, appearance.status_text), width)];
        if let Some(updated) = appearance.last_updated {
            lines.push(center(&updated, width));
        }
        lines
    }
}

impl std::fmt::Debug for RefreshIndicatorView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshIndicatorView")
            .field("mode", &self.mode)
            .field("status", &self.status)
            .field("progress", &self.progress)
            .field("opacity", &self.opacity)
            .field("arrow", &self.arrow)
            .finish()
    }
}

fn center(text: &str, width: usize) -> String {
    let text = truncate_to_width(text, width);
    let pad = width.saturating_sub(text.width());
    let left = pad / 2;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(pad - left))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let target_width = max_width - 1;
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > target_width {
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result.push('…');
    result
}
