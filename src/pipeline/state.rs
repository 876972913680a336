use std::fmt;

/// Stage of a single file conversion.
///
/// ```text
/// Idle -> Resolving -> Streaming -> Draining -> Done
///   \________\____________\____________\-----> Aborted
/// ```
///
/// `Done` and `Aborted` return to `Idle` when the converter is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// Nothing started
    Idle,
    /// Validating the input and resolving header, schema and partition column
    Resolving,
    /// Reading batches, writing each one a step behind
    Streaming,
    /// Input exhausted; writing the held-back last batch without its trailer
    Draining,
    /// All segments written
    Done,
    /// Stopped on the first fatal error
    Aborted,
}

impl PipelineState {
    /// Whether moving from `self` to `next` is a legal step
    pub fn can_transition_to(&self, next: PipelineState) -> bool {
        use PipelineState::*;
        matches!(
            (*self, next),
            (Idle, Resolving)
                | (Resolving, Streaming)
                | (Streaming, Draining)
                | (Draining, Done)
                | (Idle | Resolving | Streaming | Draining, Aborted)
                | (Done | Aborted, Idle)
        )
    }

    /// Whether the conversion has finished, successfully or not
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Done | PipelineState::Aborted)
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineState::Idle => "idle",
            PipelineState::Resolving => "resolving",
            PipelineState::Streaming => "streaming",
            PipelineState::Draining => "draining",
            PipelineState::Done => "done",
            PipelineState::Aborted => "aborted",
        };
        f.write_str(name)
    }
}
