/// What the frame loop should do after `get_current_texture` fails.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; the next redraw can acquire again.
    Reconfigured,
    /// Transient error; drop this frame without drawing.
    SkipFrame,
    /// Unrecoverable (commonly OOM); stop issuing frames and exit.
    Fatal,
}

impl SurfaceErrorAction {
    #[inline]
    pub fn is_fatal(self) -> bool {
        matches!(self, SurfaceErrorAction::Fatal)
    }
}
