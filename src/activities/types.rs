//! Activities domain: lifecycle shared by every activity variant.

use std::fmt;

use serde::Serialize;

/// NotStarted -> Running -> Completed, never backwards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Lifecycle {
    #[default]
    NotStarted,
    Running,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ActivityKind {
    Waves,
    Guards,
    Sequence,
    Lanterns,
    Plates,
}

impl ActivityKind {
    pub fn is_puzzle(&self) -> bool {
        !matches!(self, ActivityKind::Waves | ActivityKind::Guards)
    }
}

/// Monotonic lifecycle plus a one-shot completion report latch.
#[derive(Debug, Clone, Default)]
pub struct ActivityState {
    lifecycle: Lifecycle,
    reported: bool,
}

impl ActivityState {
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_running(&self) -> bool {
        self.lifecycle == Lifecycle::Running
    }

    pub fn is_completed(&self) -> bool {
        self.lifecycle == Lifecycle::Completed
    }

    /// Returns true only on the NotStarted -> Running transition
    pub fn start(&mut self) -> bool {
        if self.lifecycle != Lifecycle::NotStarted {
            return false;
        }
        self.lifecycle = Lifecycle::Running;
        true
    }

    /// Returns true only on the first transition to Completed
    pub fn complete(&mut self) -> bool {
        if self.lifecycle == Lifecycle::Completed {
            return false;
        }
        self.lifecycle = Lifecycle::Completed;
        true
    }

    /// Yields true exactly once after completion
    pub fn take_completion(&mut self) -> bool {
        if self.is_completed() && !self.reported {
            self.reported = true;
            return true;
        }
        false
    }
}

/// Misconfiguration detected when an activity is built from content
#[derive(Debug, Clone, PartialEq)]
pub enum ActivityConfigError {
    /// Wave budget can never be reached (no initial spawn and no waves)
    UnreachableBudget { max_total: u32 },
    NoSequences,
    NoPads,
    EmptySequence { index: usize },
    RaggedSequence {
        index: usize,
        expected: usize,
        found: usize,
    },
    SymbolOutOfRange {
        index: usize,
        symbol: u8,
        pad_count: usize,
    },
    NoTargets,
    NoPlates,
    NoGuards,
    NonPositiveDuration { field: &'static str },
    NegativeDuration { field: &'static str },
}

impl fmt::Display for ActivityConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnreachableBudget { max_total } => write!(
                f,
                "max_total {} can never be reached with zero initial_count and zero wave_size",
                max_total
            ),
            Self::NoSequences => write!(f, "no sequences configured"),
            Self::NoPads => write!(f, "no input pads configured"),
            Self::EmptySequence { index } => write!(f, "sequence {} is empty", index),
            Self::RaggedSequence {
                index,
                expected,
                found,
            } => write!(
                f,
                "sequence {} has {} steps, expected {}",
                index, found, expected
            ),
            Self::SymbolOutOfRange {
                index,
                symbol,
                pad_count,
            } => write!(
                f,
                "sequence {} uses pad {} but only {} pads exist",
                index, symbol, pad_count
            ),
            Self::NoTargets => write!(f, "zero lantern targets configured"),
            Self::NoPlates => write!(f, "zero pressure plates configured"),
            Self::NoGuards => write!(f, "no guard positions configured"),
            Self::NonPositiveDuration { field } => write!(f, "{} must be positive", field),
            Self::NegativeDuration { field } => write!(f, "{} must not be negative", field),
        }
    }
}

/// Stand-in for an activity whose configuration was rejected.
/// Completes on its first tick so the room is never blocked forever.
#[derive(Debug, Clone)]
pub struct InertActivity {
    pub kind: ActivityKind,
    pub reason: ActivityConfigError,
    pub(crate) state: ActivityState,
}

impl InertActivity {
    pub fn new(kind: ActivityKind, reason: ActivityConfigError) -> Self {
        Self {
            kind,
            reason,
            state: ActivityState::default(),
        }
    }

    pub fn start(&mut self) -> bool {
        self.state.start()
    }

    pub fn tick(&mut self) -> bool {
        self.state.is_running() && self.state.complete()
    }
}
