use crate::metrics::EdgeInsets;

/// Inbound events from the scroll collaborator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollEvent {
    /// Content offset or inset changed while scrolling.
    OffsetChanged { offset_y: f32, inset: EdgeInsets },
    /// User put a finger down (`true`) or lifted it (`false`).
    DragStateChanged { is_dragging: bool },
}

impl ScrollEvent {
    pub fn offset(offset_y: f32, inset: EdgeInsets) -> Self {
        ScrollEvent::OffsetChanged { offset_y, inset }
    }

    pub fn drag_began() -> Self {
        ScrollEvent::DragStateChanged { is_dragging: true }
    }

    pub fn drag_ended() -> Self {
        ScrollEvent::DragStateChanged { is_dragging: false }
    }
}
