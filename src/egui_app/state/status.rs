/// Tone of the footer status message, mapped to a color by the renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusTone {
    #[default]
    Idle,
    Busy,
    Error,
}

/// Status text shown in the footer.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusBarState {
    pub text: String,
    pub tone: StatusTone,
}

impl StatusBarState {
    /// Default status shown when no basket is selected.
    pub fn idle() -> Self {
        Self {
            text: "Create a basket to get started".into(),
            tone: StatusTone::Idle,
        }
    }
}

impl Default for StatusBarState {
    fn default() -> Self {
        Self::idle()
    }
}
