/// Per-run refinement state machine.
///
/// `Pending → Converted → Reviewed → {Approved | Revise → Pending | Failed}`
/// with `Approved` and `Failed` terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Pending,
    Converted,
    Reviewed,
    Approved,
    Revise,
    Failed,
}

impl RunPhase {
    /// A candidate was produced for the current attempt
    pub fn candidate_produced(self) -> Self {
        match self {
            RunPhase::Pending => RunPhase::Converted,
            other => other,
        }
    }

    /// The reviewer returned a payload for the current candidate
    pub fn reviewed(self) -> Self {
        match self {
            RunPhase::Converted => RunPhase::Reviewed,
            other => other,
        }
    }

    /// The verdict was extracted and the attempt resolved
    pub fn resolved(self, approved: bool, attempts_remain: bool) -> Self {
        match self {
            RunPhase::Reviewed => {
                if approved {
                    RunPhase::Approved
                } else if attempts_remain {
                    RunPhase::Revise
                } else {
                    RunPhase::Failed
                }
            }
            other => other,
        }
    }

    /// A revise outcome rolls over into the next attempt
    pub fn next_attempt(self) -> Self {
        match self {
            RunPhase::Revise => RunPhase::Pending,
            other => other,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RunPhase::Approved | RunPhase::Failed)
    }
}

impl std::fmt::Display for RunPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RunPhase::Pending => "pending",
            RunPhase::Converted => "converted",
            RunPhase::Reviewed => "reviewed",
            RunPhase::Approved => "approved",
            RunPhase::Revise => "revise",
            RunPhase::Failed => "failed",
        };
        write!(f, "{}", name)
    }
}
