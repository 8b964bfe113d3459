#![forbid(unsafe_code)]

//! Commands returned from component and screen hooks.

/// Side effects requested by a hook.
///
/// The engine applies commands after the update phase of the frame in which
/// they were returned. `Msg` is delivered to the current screen; `SetScreen`
/// only records a pending transition.
#[derive(Default)]
pub enum Cmd<M> {
    /// No operation.
    #[default]
    None,
    /// Stop the main loop once this frame has been drawn.
    Quit,
    /// Request a screen transition at the start of the next frame.
    SetScreen(String),
    /// Deliver a message to the current screen.
    Msg(M),
    /// Several commands, applied in order.
    Batch(Vec<Cmd<M>>),
}

impl<M: std::fmt::Debug> std::fmt::Debug for Cmd<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Quit => write!(f, "Quit"),
            Self::SetScreen(name) => f.debug_tuple("SetScreen").field(name).finish(),
            Self::Msg(m) => f.debug_tuple("Msg").field(m).finish(),
            Self::Batch(cmds) => f.debug_tuple("Batch").field(cmds).finish(),
        }
    }
}

impl<M> Cmd<M> {
    #[inline]
    pub fn none() -> Self {
        Self::None
    }

    #[inline]
    pub fn quit() -> Self {
        Self::Quit
    }

    #[inline]
    pub fn msg(m: M) -> Self {
        Self::Msg(m)
    }

    #[inline]
    pub fn set_screen(name: impl Into<String>) -> Self {
        Self::SetScreen(name.into())
    }

    /// Combine commands, dropping no-ops and flattening single entries.
    pub fn batch(cmds: Vec<Self>) -> Self {
        let mut cmds: Vec<Self> = cmds.into_iter().filter(|c| !c.is_none()).collect();
        match cmds.len() {
            0 => Self::None,
            1 => cmds.pop().unwrap_or_default(),
            _ => Self::Batch(cmds),
        }
    }

    /// `self` followed by `other`.
    pub fn and(self, other: Self) -> Self {
        match (self, other) {
            (Self::None, other) => other,
            (this, Self::None) => this,
            (Self::Batch(mut cmds), other) => {
                cmds.push(other);
                Self::Batch(cmds)
            }
            (this, other) => Self::Batch(vec![this, other]),
        }
    }

    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Stable name for tracing.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Quit => "Quit",
            Self::SetScreen(_) => "SetScreen",
            Self::Msg(_) => "Msg",
            Self::Batch(_) => "Batch",
        }
    }
}
