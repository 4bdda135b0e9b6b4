#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use dragrefresh::{
    ChannelId, DragRefreshController, EdgeInsets, RefreshConfig, RefreshIndicatorView,
    RefreshSignal, ScrollMetrics, ScrollMetricsSource,
};

/// In-memory scroll view that records every inset request.
#[derive(Debug, Default)]
pub struct MockScrollView {
    pub metrics: ScrollMetrics,
    pub inset_requests: Vec<f32>,
}

impl MockScrollView {
    pub fn with_top_inset(top: f32) -> Self {
        Self {
            metrics: ScrollMetrics {
                offset_y: -top,
                inset: EdgeInsets::top(top),
                content_size: (320.0, 2000.0),
                is_dragging: false,
            },
            inset_requests: Vec::new(),
        }
    }
}

impl ScrollMetricsSource for MockScrollView {
    fn metrics(&self) -> ScrollMetrics {
        self.metrics
    }

    fn set_top_content_inset(&mut self, value: f32) {
        self.metrics.inset.top = value;
        self.inset_requests.push(value);
    }
}

pub type Controller = DragRefreshController<MockScrollView>;

/// Controller with instant transitions and a private signal hub.
pub fn controller(threshold: f32) -> Controller {
    controller_on(threshold, 0.0, RefreshSignal::new(), ChannelId::next())
}

pub fn controller_on(
    threshold: f32,
    top_inset: f32,
    signal: RefreshSignal,
    channel: ChannelId,
) -> Controller {
    let config = RefreshConfig::new()
        .indicator_height(threshold)
        .reduced_motion(true);
    let indicator = RefreshIndicatorView::new(config).expect("valid indicator config");
    DragRefreshController::builder(MockScrollView::with_top_inset(top_inset))
        .indicator(indicator)
        .channel(channel)
        .signal(signal)
        .build()
        .expect("valid controller")
}

/// Subscribe a counter to the controller's channel.
pub fn count_requests(controller: &Controller) -> Rc<RefCell<Vec<ChannelId>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    controller.on_refresh_requested(move |channel| sink.borrow_mut().push(channel));
    seen
}

/// Put a finger down and drag to `overscroll` past the top.
pub fn drag_to(controller: &mut Controller, overscroll: f32) {
    if !controller.is_user_dragging() {
        controller.on_drag_state_changed(true);
    }
    move_to(controller, overscroll);
}

/// Move to `overscroll` without changing the drag state.
pub fn move_to(controller: &mut Controller, overscroll: f32) {
    let inset = EdgeInsets::top(controller.original_top_inset());
    controller.on_scroll_offset_changed(-(overscroll + inset.top), inset);
}

pub fn release(controller: &mut Controller) {
    controller.on_drag_state_changed(false);
}
