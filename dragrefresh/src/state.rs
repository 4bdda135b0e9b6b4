/// Lifecycle of a single pull-to-refresh gesture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RefreshState {
    /// Nothing pulled, indicator hidden.
    #[default]
    Idle,
    /// User is dragging past the top edge but has not reached the threshold.
    Pulling,
    /// User has dragged past the threshold; releasing now starts a refresh.
    ArmedToRelease,
    /// Refresh requested, waiting for the host to finish.
    Refreshing,
}

impl RefreshState {
    /// Returns true while the user is actively pulling the header.
    pub fn is_pulling(self) -> bool {
        matches!(self, RefreshState::Pulling | RefreshState::ArmedToRelease)
    }

    /// Visual mode the indicator should display for this state.
    pub fn visual_mode(self) -> VisualMode {
        match self {
            RefreshState::Idle => VisualMode::Hidden,
            RefreshState::Pulling | RefreshState::ArmedToRelease => VisualMode::Progress,
            RefreshState::Refreshing => VisualMode::Spinning,
        }
    }

    /// Status text slot the indicator should display for this state.
    pub fn status(self) -> IndicatorStatus {
        match self {
            RefreshState::Idle | RefreshState::Pulling => IndicatorStatus::PullToRefresh,
            RefreshState::ArmedToRelease => IndicatorStatus::ReleaseToRefresh,
            RefreshState::Refreshing => IndicatorStatus::Refreshing,
        }
    }
}

impl std::fmt::Display for RefreshState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RefreshState::Idle => "idle",
            RefreshState::Pulling => "pulling",
            RefreshState::ArmedToRelease => "armed",
            RefreshState::Refreshing => "refreshing",
        };
        f.write_str(name)
    }
}

/// What the indicator is drawing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum VisualMode {
    /// Hidden or collapsing.
    #[default]
    Hidden,
    /// Arrow plus pull progress.
    Progress,
    /// Activity spinner.
    Spinning,
}

/// Status line shown next to the arrow or spinner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum IndicatorStatus {
    #[default]
    PullToRefresh,
    ReleaseToRefresh,
    Refreshing,
}
