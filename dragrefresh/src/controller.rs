//! Drag-to-refresh state machine.
//!
//! The controller watches overscroll on a list, drives the header indicator
//! through a drag, and emits one refresh request per qualifying release:
//!
//! ```text
//! Idle ──drag past top──▶ Pulling ──past threshold──▶ ArmedToRelease
//!  ▲                       │  ▲                          │      │
//!  │◀───────release────────┘  └─────back under──────────┘      │ release
//!  │                                                            ▼
//!  └──────────────────────finish_refresh()────────────────── Refreshing
//! ```

use std::rc::Rc;
use std::time::Instant;

use crate::channel::{ChannelId, RefreshModel, RefreshSignal, SubscriptionId};
use crate::error::ConfigError;
use crate::event::ScrollEvent;
use crate::indicator::RefreshIndicatorView;
use crate::metrics::{overscroll, EdgeInsets, ScrollMetricsSource};
use crate::state::RefreshState;

/// How the host's refresh work ended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Data was reloaded; the last-updated stamp moves to now.
    #[default]
    Succeeded,
    /// Work failed; the header collapses but keeps its old stamp.
    Failed,
}

type CollapseHandler = Rc<dyn Fn(ChannelId)>;

/// Builder for [`DragRefreshController`].
pub struct ControllerBuilder<S> {
    source: S,
    indicator: Option<RefreshIndicatorView>,
    channel: Option<ChannelId>,
    signal: Option<RefreshSignal>,
}

impl<S: ScrollMetricsSource> ControllerBuilder<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            indicator: None,
            channel: None,
            signal: None,
        }
    }

    pub fn indicator(mut self, indicator: RefreshIndicatorView) -> Self {
        self.indicator = Some(indicator);
        self
    }

    pub fn channel(mut self, channel: ChannelId) -> Self {
        self.channel = Some(channel);
        self
    }

    /// Take the channel from the host's model.
    pub fn model<M: RefreshModel + ?Sized>(mut self, model: &M) -> Self {
        self.channel = Some(model.channel_id());
        self
    }

    /// Share a signal hub with other lists. A private hub is created if
    /// none is given.
    pub fn signal(mut self, signal: RefreshSignal) -> Self {
        self.signal = Some(signal);
        self
    }

    pub fn build(self) -> Result<DragRefreshController<S>, ConfigError> {
        let indicator = self.indicator.ok_or(ConfigError::MissingIndicator)?;
        let channel = self.channel.ok_or(ConfigError::MissingChannel)?;

        let release_threshold = indicator.natural_height();
        if !release_threshold.is_finite() || release_threshold <= 0.0 {
            return Err(ConfigError::InvalidThreshold(release_threshold));
        }

        let metrics = self.source.metrics();
        log::debug!(
            "[refresh] controller on {} attached (threshold {}, top inset {})",
            channel,
            release_threshold,
            metrics.inset.top
        );

        Ok(DragRefreshController {
            source: self.source,
            indicator,
            state: RefreshState::Idle,
            release_threshold,
            is_user_dragging: false,
            original_inset: metrics.inset,
            overscroll: 0.0,
            channel,
            signal: self.signal.unwrap_or_default(),
            ignored_events: 0,
            on_collapsed: None,
        })
    }
}

/// Pull-to-refresh controller for one list.
///
/// All calls are expected on the UI thread; nothing here locks or blocks.
pub struct DragRefreshController<S> {
    source: S,
    indicator: RefreshIndicatorView,
    state: RefreshState,
    release_threshold: f32,
    is_user_dragging: bool,
    /// Insets as last reported outside a refresh; restored afterwards.
    original_inset: EdgeInsets,
    overscroll: f32,
    channel: ChannelId,
    signal: RefreshSignal,
    ignored_events: u64,
    on_collapsed: Option<CollapseHandler>,
}

impl<S: ScrollMetricsSource> DragRefreshController<S> {
    pub fn builder(source: S) -> ControllerBuilder<S> {
        ControllerBuilder::new(source)
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn state(&self) -> RefreshState {
        self.state
    }

    pub fn progress(&self) -> f32 {
        self.indicator.progress()
    }

    pub fn release_threshold(&self) -> f32 {
        self.release_threshold
    }

    pub fn is_user_dragging(&self) -> bool {
        self.is_user_dragging
    }

    /// Overscroll measured on the last offset event.
    pub fn overscroll(&self) -> f32 {
        self.overscroll
    }

    pub fn channel(&self) -> ChannelId {
        self.channel
    }

    pub fn signal(&self) -> &RefreshSignal {
        &self.signal
    }

    pub fn indicator(&self) -> &RefreshIndicatorView {
        &self.indicator
    }

    /// Seed the header's last-updated stamp, e.g. from the host's cache.
    pub fn set_last_updated(&mut self, at: chrono::DateTime<chrono::Local>) {
        self.indicator.set_last_updated(at);
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Top inset the list had before any refresh pinned it.
    pub fn original_top_inset(&self) -> f32 {
        self.original_inset.top
    }

    /// Scroll events dropped because a refresh was in progress.
    pub fn ignored_events(&self) -> u64 {
        self.ignored_events
    }

    /// Register a handler for `refresh_requested` on this controller's
    /// channel. Shorthand for subscribing on [`Self::signal`].
    pub fn on_refresh_requested<F>(&self, handler: F) -> SubscriptionId
    where
        F: FnMut(ChannelId) + 'static,
    {
        self.signal.subscribe(self.channel, handler)
    }

    /// Run `handler` once the header has fully collapsed after a refresh.
    pub fn on_collapsed<F>(&mut self, handler: F)
    where
        F: Fn(ChannelId) + 'static,
    {
        self.on_collapsed = Some(Rc::new(handler));
    }

    // -------------------------------------------------------------------------
    // Inbound events
    // -------------------------------------------------------------------------

    pub fn handle_event(&mut self, event: ScrollEvent) {
        match event {
            ScrollEvent::OffsetChanged { offset_y, inset } => {
                self.on_scroll_offset_changed(offset_y, inset)
            }
            ScrollEvent::DragStateChanged { is_dragging } => {
                self.on_drag_state_changed(is_dragging)
            }
        }
    }

    /// The list scrolled. Recomputes overscroll and progress.
    pub fn on_scroll_offset_changed(&mut self, offset_y: f32, inset: EdgeInsets) {
        if self.state == RefreshState::Refreshing {
            self.ignored_events += 1;
            log::trace!("[refresh] {} ignoring offset {} while refreshing", self.channel, offset_y);
            return;
        }

        self.original_inset = inset;
        self.overscroll = overscroll(offset_y, inset.top);
        log::trace!(
            "[refresh] {} offset {} overscroll {}",
            self.channel,
            offset_y,
            self.overscroll
        );
        self.evaluate(Instant::now());
    }

    /// The user put a finger down or lifted it.
    pub fn on_drag_state_changed(&mut self, is_dragging: bool) {
        let was_dragging = self.is_user_dragging;
        self.is_user_dragging = is_dragging;

        if self.state == RefreshState::Refreshing {
            self.ignored_events += 1;
            return;
        }

        let now = Instant::now();
        if was_dragging && !is_dragging {
            self.release(now);
        } else {
            self.evaluate(now);
        }
    }

    /// Pull the current metrics from the source and apply them, offset first.
    pub fn sync_from_source(&mut self) {
        let metrics = self.source.metrics();
        self.on_scroll_offset_changed(metrics.offset_y, metrics.inset);
        if metrics.is_dragging != self.is_user_dragging {
            self.on_drag_state_changed(metrics.is_dragging);
        }
    }

    /// Advance indicator animations to `now`.
    pub fn tick(&mut self, now: Instant) {
        self.indicator.tick(now);
    }

    // -------------------------------------------------------------------------
    // Host entry points
    // -------------------------------------------------------------------------

    /// The host finished its refresh work.
    ///
    /// Returns false (and does nothing) unless a refresh is in progress.
    pub fn finish_refresh(&mut self) -> bool {
        self.finish_refresh_with(RefreshOutcome::Succeeded)
    }

    pub fn finish_refresh_with(&mut self, outcome: RefreshOutcome) -> bool {
        if self.state != RefreshState::Refreshing {
            log::trace!("[refresh] {} finish ignored in {}", self.channel, self.state);
            return false;
        }

        let now = Instant::now();
        self.set_state(RefreshState::Idle);
        self.overscroll = 0.0;
        self.source.set_top_content_inset(self.original_inset.top);

        if outcome == RefreshOutcome::Succeeded {
            self.indicator.set_last_updated(chrono::Local::now());
        }
        self.indicator.reset_arrow();

        let channel = self.channel;
        let on_collapsed = self.on_collapsed.clone();
        self.indicator.hide(now, move |finished| {
            if !finished {
                return;
            }
            if let Some(handler) = on_collapsed {
                handler(channel);
            }
        });

        log::debug!("[refresh] {} refresh finished ({:?})", self.channel, outcome);
        true
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Apply the dragging transitions for the current overscroll.
    fn evaluate(&mut self, now: Instant) {
        if !self.is_user_dragging {
            return;
        }

        match self.state {
            RefreshState::Idle => {
                if self.overscroll > 0.0 {
                    self.set_state(RefreshState::Pulling);
                    self.indicator.show(now, |_| {});
                    self.indicator.set_mode(self.state.visual_mode(), now);
                    self.update_pull(now);
                }
            }
            state if state.is_pulling() => self.update_pull(now),
            _ => {}
        }
    }

    /// Move between Pulling and ArmedToRelease and refresh the progress.
    fn update_pull(&mut self, now: Instant) {
        let armed = self.overscroll >= self.release_threshold;
        match (self.state, armed) {
            (RefreshState::Pulling, true) => self.set_state(RefreshState::ArmedToRelease),
            (RefreshState::ArmedToRelease, false) => self.set_state(RefreshState::Pulling),
            _ => {}
        }
        self.indicator.set_status(self.state.status(), now);
        self.indicator.set_progress(self.overscroll / self.release_threshold);
    }

    /// Finger lifted.
    fn release(&mut self, now: Instant) {
        match self.state {
            RefreshState::Pulling => {
                self.set_state(RefreshState::Idle);
                let channel = self.channel;
                self.indicator.hide(now, move |finished| {
                    log::trace!("[refresh] {} pull collapsed (finished: {})", channel, finished);
                });
            }
            RefreshState::ArmedToRelease => {
                self.set_state(RefreshState::Refreshing);
                self.indicator.set_mode(self.state.visual_mode(), now);
                self.indicator.set_status(self.state.status(), now);
                self.indicator.set_progress(1.0);
                self.source
                    .set_top_content_inset(self.original_inset.top + self.release_threshold);
                self.signal.emit(self.channel);
            }
            RefreshState::Idle | RefreshState::Refreshing => {}
        }
    }

    fn set_state(&mut self, state: RefreshState) {
        if self.state != state {
            log::debug!("[refresh] {} {} -> {}", self.channel, self.state, state);
            self.state = state;
        }
    }
}

impl<S> std::fmt::Debug for DragRefreshController<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DragRefreshController")
            .field("channel", &self.channel)
            .field("state", &self.state)
            .field("release_threshold", &self.release_threshold)
            .field("is_user_dragging", &self.is_user_dragging)
            .field("overscroll", &self.overscroll)
            .field("indicator", &self.indicator)
            .finish()
    }
}
