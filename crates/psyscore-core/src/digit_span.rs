//! Digit-span working-memory game.
//!
//! The participant sees a random digit sequence and types it back, first in
//! the order shown and then reversed. A correct recall raises the span by
//! one; a wrong one repeats the span with a fresh sequence. The score is the
//! longest span recalled in either mode.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::DigitSpanError;

/// Span of the first round in each mode.
pub const STARTING_SPAN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigitSpanMode {
    Forward,
    Reversed,
}

impl fmt::Display for DigitSpanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DigitSpanMode::Forward => write!(f, "forward"),
            DigitSpanMode::Reversed => write!(f, "reversed"),
        }
    }
}

/// Uniformly random digits 0–9.
pub fn generate_sequence<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Vec<u8> {
    (0..len).map(|_| rng.gen_range(0..10)).collect()
}

/// Whether `input` recalls `sequence` correctly for `mode`.
///
/// Any character that is not an ASCII digit makes the recall wrong.
pub fn check_recall(sequence: &[u8], input: &str, mode: DigitSpanMode) -> bool {
    let digits: Option<Vec<u8>> = input
        .chars()
        .map(|c| c.to_digit(10).map(|d| d as u8))
        .collect();
    let Some(digits) = digits else {
        return false;
    };
    if digits.len() != sequence.len() {
        return false;
    }
    match mode {
        DigitSpanMode::Forward => digits == sequence,
        DigitSpanMode::Reversed => digits.iter().eq(sequence.iter().rev()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    Correct,
    Wrong,
}

/// Final result of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DigitSpanResult {
    /// Longest forward span recalled.
    pub forward: u32,
    /// Longest reversed span recalled.
    pub reversed: u32,
    /// Rounds started across both modes.
    pub attempts: u32,
}

impl DigitSpanResult {
    /// The stored digit-span score: the better of the two modes.
    pub fn score(&self) -> u32 {
        self.forward.max(self.reversed)
    }
}

/// In-progress game state.
#[derive(Debug, Clone)]
pub struct DigitSpanGame {
    mode: DigitSpanMode,
    current_span: usize,
    sequence: Option<Vec<u8>>,
    result: DigitSpanResult,
    finished: bool,
}

impl Default for DigitSpanGame {
    fn default() -> Self {
        Self::new()
    }
}

impl DigitSpanGame {
    pub fn new() -> Self {
        Self {
            mode: DigitSpanMode::Forward,
            current_span: STARTING_SPAN,
            sequence: None,
            result: DigitSpanResult::default(),
            finished: false,
        }
    }

    pub fn mode(&self) -> DigitSpanMode {
        self.mode
    }

    pub fn current_span(&self) -> usize {
        self.current_span
    }

    pub fn result(&self) -> DigitSpanResult {
        self.result
    }

    /// Show a new sequence at the current span. Counts as an attempt.
    pub fn start_round<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<&[u8], DigitSpanError> {
        if self.finished {
            return Err(DigitSpanError::Finished);
        }
        self.result.attempts += 1;
        let sequence = self.sequence.insert(generate_sequence(rng, self.current_span));
        Ok(sequence.as_slice())
    }

    /// Check the participant's recall of the sequence on screen.
    pub fn submit(&mut self, input: &str) -> Result<RoundOutcome, DigitSpanError> {
        if self.finished {
            return Err(DigitSpanError::Finished);
        }
        let Some(sequence) = self.sequence.as_ref() else {
            return Err(DigitSpanError::NoActiveRound);
        };
        let actual = input.chars().count();
        if actual != self.current_span {
            return Err(DigitSpanError::InputLength {
                expected: self.current_span,
                actual,
            });
        }

        let correct = check_recall(sequence, input, self.mode);
        self.sequence = None;

        if !correct {
            tracing::debug!(mode = %self.mode, span = self.current_span, "recall wrong");
            return Ok(RoundOutcome::Wrong);
        }

        let span = self.current_span as u32;
        match self.mode {
            DigitSpanMode::Forward => self.result.forward = self.result.forward.max(span),
            DigitSpanMode::Reversed => self.result.reversed = self.result.reversed.max(span),
        }
        self.current_span += 1;
        tracing::debug!(mode = %self.mode, span, "recall correct");
        Ok(RoundOutcome::Correct)
    }

    /// Move on to reversed mode. Allowed once a forward span was recalled.
    pub fn switch_to_reversed(&mut self) -> Result<(), DigitSpanError> {
        if self.finished {
            return Err(DigitSpanError::Finished);
        }
        if self.result.forward == 0 {
            return Err(DigitSpanError::ForwardIncomplete);
        }
        self.mode = DigitSpanMode::Reversed;
        self.current_span = STARTING_SPAN;
        self.sequence = None;
        Ok(())
    }

    /// End the game and return its result.
    pub fn finish(&mut self) -> DigitSpanResult {
        self.finished = true;
        self.sequence = None;
        self.result
    }
}
