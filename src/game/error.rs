use thiserror::Error;

/// Failures the engine reports to its host.
///
/// Collisions and growth are ordinary outcomes and never show up here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Every cell of the grid is occupied, so no food can be placed
    #[error("no free cell left on a {width}x{height} board")]
    ExhaustedBoard { width: u32, height: u32 },

    /// Board geometry is fixed while a game is running
    #[error("board cannot be resized while a game is running")]
    ResizeWhileRunning,
}
