//! Memory-sequence puzzle: watch a lit pattern, then repeat it on the input pads.

use std::time::Duration;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::types::{ActivityConfigError, ActivityState};

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct SequenceTiming {
    pub lead_in: f32,
    pub show_step: f32,
    pub step_gap: f32,
    pub advance_delay: f32,
    pub retry_delay: f32,
    /// Cosmetic flash on a pressed input pad
    pub press_flash: f32,
}

impl SequenceTiming {
    /// First timing field below zero, if any
    pub fn negative_field(&self) -> Option<&'static str> {
        [
            ("lead_in", self.lead_in),
            ("show_step", self.show_step),
            ("step_gap", self.step_gap),
            ("advance_delay", self.advance_delay),
            ("retry_delay", self.retry_delay),
            ("press_flash", self.press_flash),
        ]
        .into_iter()
        .find(|(_, seconds)| *seconds < 0.0)
        .map(|(field, _)| field)
    }
}

impl Default for SequenceTiming {
    fn default() -> Self {
        Self {
            lead_in: 0.3,
            show_step: 0.4,
            step_gap: 0.15,
            advance_delay: 0.6,
            retry_delay: 0.7,
            press_flash: 0.2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ProgressMark {
    #[default]
    Neutral,
    Ok,
    Fail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadResponse {
    /// Not accepting input, or the pad does not exist
    Ignored,
    Buffered,
    Correct,
    Wrong,
    Solved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    LeadIn,
    Lit(usize),
    Gap(usize),
}

#[derive(Debug, Clone)]
pub enum SequencePhase {
    Dormant,
    Showing { stage: Playback, timer: Timer },
    Accepting,
    Advancing { timer: Timer },
    Retrying { timer: Timer },
    Solved,
}

#[derive(Debug, Clone)]
pub struct SequencePuzzle {
    sequences: Vec<Vec<u8>>,
    pad_count: usize,
    timing: SequenceTiming,
    cursor: usize,
    input: Vec<u8>,
    accepting: bool,
    progress: Vec<ProgressMark>,
    phase: SequencePhase,
    pub(crate) state: ActivityState,
}

impl SequencePuzzle {
    pub fn new(
        sequences: Vec<Vec<u8>>,
        pad_count: usize,
        timing: SequenceTiming,
    ) -> Result<Self, ActivityConfigError> {
        if pad_count == 0 {
            return Err(ActivityConfigError::NoPads);
        }
        if let Some(field) = timing.negative_field() {
            return Err(ActivityConfigError::NegativeDuration { field });
        }
        let Some(first) = sequences.first() else {
            return Err(ActivityConfigError::NoSequences);
        };
        let expected = first.len();
        for (index, sequence) in sequences.iter().enumerate() {
            if sequence.is_empty() {
                return Err(ActivityConfigError::EmptySequence { index });
            }
            if sequence.len() != expected {
                return Err(ActivityConfigError::RaggedSequence {
                    index,
                    expected,
                    found: sequence.len(),
                });
            }
            if let Some(&symbol) = sequence.iter().find(|s| usize::from(**s) >= pad_count) {
                return Err(ActivityConfigError::SymbolOutOfRange {
                    index,
                    symbol,
                    pad_count,
                });
            }
        }

        Ok(Self {
            progress: vec![ProgressMark::Neutral; sequences.len()],
            sequences,
            pad_count,
            timing,
            cursor: 0,
            input: Vec::new(),
            accepting: false,
            phase: SequencePhase::Dormant,
            state: ActivityState::default(),
        })
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn sequence_count(&self) -> usize {
        self.sequences.len()
    }

    pub fn step_length(&self) -> usize {
        self.sequences.first().map_or(0, Vec::len)
    }

    pub fn input(&self) -> &[u8] {
        &self.input
    }

    pub fn is_accepting(&self) -> bool {
        self.accepting
    }

    pub fn progress(&self) -> &[ProgressMark] {
        &self.progress
    }

    pub fn phase(&self) -> &SequencePhase {
        &self.phase
    }

    pub fn timing(&self) -> &SequenceTiming {
        &self.timing
    }

    /// Display pad currently lit during playback
    pub fn lit_pad(&self) -> Option<u8> {
        match &self.phase {
            SequencePhase::Showing {
                stage: Playback::Lit(step),
                ..
            } => self
                .sequences
                .get(self.cursor)
                .and_then(|sequence| sequence.get(*step))
                .copied(),
            _ => None,
        }
    }

    pub fn start(&mut self) -> bool {
        if !self.state.start() {
            return false;
        }
        self.begin_showing();
        true
    }

    pub fn tick(&mut self, delta: Duration) {
        match &mut self.phase {
            SequencePhase::Showing { timer, .. } => {
                timer.tick(delta);
                self.advance_playback();
            }
            SequencePhase::Advancing { timer } => {
                timer.tick(delta);
                if timer.remaining_secs() == 0.0 {
                    self.begin_showing();
                }
            }
            SequencePhase::Retrying { timer } => {
                timer.tick(delta);
                if timer.remaining_secs() == 0.0 {
                    if let Some(mark) = self.progress.get_mut(self.cursor) {
                        *mark = ProgressMark::Neutral;
                    }
                    self.begin_showing();
                }
            }
            SequencePhase::Dormant | SequencePhase::Accepting | SequencePhase::Solved => {}
        }
    }

    pub fn press(&mut self, pad: u8) -> PadResponse {
        if !self.state.is_running() || !self.accepting {
            return PadResponse::Ignored;
        }
        if usize::from(pad) >= self.pad_count {
            return PadResponse::Ignored;
        }

        self.input.push(pad);
        if self.input.len() < self.step_length() {
            return PadResponse::Buffered;
        }

        self.accepting = false;
        self.evaluate()
    }

    fn evaluate(&mut self) -> PadResponse {
        let expected = &self.sequences[self.cursor];
        if self.input == *expected {
            self.progress[self.cursor] = ProgressMark::Ok;
            self.cursor += 1;
            if self.cursor >= self.sequences.len() {
                self.phase = SequencePhase::Solved;
                self.state.complete();
                info!("[SEQUENCE] All {} sequences solved", self.sequences.len());
                return PadResponse::Solved;
            }
            debug!("[SEQUENCE] Sequence {} correct", self.cursor);
            self.phase = SequencePhase::Advancing {
                timer: Timer::from_seconds(self.timing.advance_delay.max(0.0), TimerMode::Once),
            };
            PadResponse::Correct
        } else {
            debug!(
                "[SEQUENCE] Wrong input {:?} for sequence {}",
                self.input,
                self.cursor + 1
            );
            self.progress[self.cursor] = ProgressMark::Fail;
            self.phase = SequencePhase::Retrying {
                timer: Timer::from_seconds(self.timing.retry_delay.max(0.0), TimerMode::Once),
            };
            PadResponse::Wrong
        }
    }

    fn begin_showing(&mut self) {
        self.input.clear();
        self.accepting = false;
        self.phase = SequencePhase::Showing {
            stage: Playback::LeadIn,
            timer: Timer::from_seconds(self.timing.lead_in.max(0.0), TimerMode::Once),
        };
        self.advance_playback();
    }

    /// Steps through finished playback stages; zero-length stages pass immediately
    fn advance_playback(&mut self) {
        let steps = self.step_length();
        loop {
            let SequencePhase::Showing { stage, timer } = &self.phase else {
                return;
            };
            if timer.remaining_secs() > 0.0 {
                return;
            }
            let next = match *stage {
                Playback::LeadIn => Some((Playback::Lit(0), self.timing.show_step)),
                Playback::Lit(step) if step + 1 < steps => {
                    Some((Playback::Gap(step), self.timing.step_gap))
                }
                Playback::Lit(_) => None,
                Playback::Gap(step) => Some((Playback::Lit(step + 1), self.timing.show_step)),
            };
            match next {
                Some((stage, seconds)) => {
                    self.phase = SequencePhase::Showing {
                        stage,
                        timer: Timer::from_seconds(seconds.max(0.0), TimerMode::Once),
                    };
                }
                None => {
                    self.phase = SequencePhase::Accepting;
                    self.accepting = true;
                    return;
                }
            }
        }
    }
}
