pub mod channel;
pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod indicator;
pub mod metrics;
pub mod state;
pub mod transitions;

pub use channel::{ChannelId, RefreshModel, RefreshSignal, SubscriptionId};
pub use config::RefreshConfig;
pub use controller::{ControllerBuilder, DragRefreshController, RefreshOutcome};
pub use error::ConfigError;
pub use event::ScrollEvent;
pub use indicator::{IndicatorAppearance, IndicatorLabels, RefreshIndicatorView};
pub use metrics::{overscroll, EdgeInsets, ScrollMetrics, ScrollMetricsSource};
pub use state::{IndicatorStatus, RefreshState, VisualMode};
pub use transitions::{AnimatedValue, Easing, TransitionConfig};
