/// Content insets of a scroll view, in points.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EdgeInsets {
    pub top: f32,
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
}

impl EdgeInsets {
    pub fn new(top: f32, left: f32, bottom: f32, right: f32) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Insets with only the top edge set.
    pub fn top(top: f32) -> Self {
        Self {
            top,
            ..Default::default()
        }
    }

    /// Copy of these insets with a different top edge.
    pub fn with_top(self, top: f32) -> Self {
        Self { top, ..self }
    }
}

/// Point-in-time view of the scroll collaborator.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollMetrics {
    /// Vertical content offset. Negative when pulled down past the top.
    pub offset_y: f32,
    pub inset: EdgeInsets,
    /// Content size (width, height).
    pub content_size: (f32, f32),
    /// True while the user's finger is on the content.
    pub is_dragging: bool,
}

/// The scrollable list a refresh controller is attached to.
///
/// Implementors hand out their current metrics on request and apply the top
/// inset changes the controller asks for. The controller calls
/// `set_top_content_inset` only when a refresh starts and when it finishes.
pub trait ScrollMetricsSource {
    /// Current scroll metrics.
    fn metrics(&self) -> ScrollMetrics;

    /// Replace the top content inset, keeping the other edges.
    fn set_top_content_inset(&mut self, value: f32);
}

impl<S: ScrollMetricsSource + ?Sized> ScrollMetricsSource for Box<S> {
    fn metrics(&self) -> ScrollMetrics {
        (**self).metrics()
    }

    fn set_top_content_inset(&mut self, value: f32) {
        (**self).set_top_content_inset(value)
    }
}

/// Distance the content has been pulled past its natural top edge.
///
/// Always >= 0. Ordinary scrolling into the content yields 0.
pub fn overscroll(offset_y: f32, top_inset: f32) -> f32 {
    let distance = -(offset_y + top_inset);
    if distance.is_nan() {
        return 0.0;
    }
    distance.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overscroll_resting_is_zero() {
        assert_eq!(overscroll(0.0, 0.0), 0.0);
        // Resting position with a top inset is offset == -inset
        assert_eq!(overscroll(-20.0, 20.0), 0.0);
    }

    #[test]
    fn test_overscroll_scrolled_into_content_is_zero() {
        assert_eq!(overscroll(150.0, 0.0), 0.0);
        assert_eq!(overscroll(5.0, 20.0), 0.0);
    }

    #[test]
    fn test_overscroll_pulled_past_top() {
        assert_eq!(overscroll(-40.0, 0.0), 40.0);
        assert_eq!(overscroll(-60.0, 20.0), 40.0);
    }

    #[test]
    fn test_overscroll_nan_is_zero() {
        assert_eq!(overscroll(f32::NAN, 0.0), 0.0);
    }

    #[test]
    fn test_edge_insets_with_top() {
        let insets = EdgeInsets::new(1.0, 2.0, 3.0, 4.0).with_top(10.0);
        assert_eq!(insets, EdgeInsets::new(10.0, 2.0, 3.0, 4.0));
    }
}
