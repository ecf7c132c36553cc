//! Draws numbers 1–90 without replacement and records their order.

use rand::Rng;

use crate::GameError;

/// Highest drawable number.
const MAX_NUMBER: u8 = 90;

/// One successful draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Draw {
    /// The number that came out.
    pub number: u8,
    /// How many numbers have been drawn so far, this one included.
    pub total: usize,
}

/// The draw sequence: sole writer of the drawn-number list.
///
/// Keeps both the ordered history (what clients replay on restore) and
/// a membership mask for O(1) repeat checks.
#[derive(Debug)]
pub struct DrawSequencer {
    drawn: Vec<u8>,
    seen: [bool; MAX_NUMBER as usize + 1],
}

impl Default for DrawSequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawSequencer {
    pub fn new() -> Self {
        Self {
            drawn: Vec::with_capacity(MAX_NUMBER as usize),
            seen: [false; MAX_NUMBER as usize + 1],
        }
    }

    /// Draws uniformly among the numbers not yet out, appends it, and
    /// returns it with the new total.
    ///
    /// # Errors
    /// [`GameError::DrawExhausted`] once all 90 numbers are out; the
    /// sequence is left untouched.
    pub fn draw(&mut self) -> Result<Draw, GameError> {
        let remaining: Vec<u8> = (1..=MAX_NUMBER)
            .filter(|&n| !self.seen[n as usize])
            .collect();
        if remaining.is_empty() {
            return Err(GameError::DrawExhausted);
        }

        let number = remaining[rand::rng().random_range(0..remaining.len())];
        self.seen[number as usize] = true;
        self.drawn.push(number);

        Ok(Draw { number, total: self.drawn.len() })
    }

    /// The drawn numbers, in draw order.
    pub fn drawn(&self) -> &[u8] {
        &self.drawn
    }

    /// Whether `number` has already been drawn.
    pub fn contains(&self, number: u8) -> bool {
        number <= MAX_NUMBER && self.seen[number as usize]
    }

    pub fn total(&self) -> usize {
        self.drawn.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.drawn.len() == MAX_NUMBER as usize
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_never_repeats_over_a_full_run() {
        let mut draws = DrawSequencer::new();
        let mut seen = [false; 91];

        for expected_total in 1..=90 {
            let draw = draws.draw().expect("numbers remain");
            assert!((1..=90).contains(&draw.number));
            assert!(!seen[draw.number as usize], "repeated {}", draw.number);
            seen[draw.number as usize] = true;
            assert_eq!(draw.total, expected_total);
        }

        assert!(draws.is_exhausted());
        assert!(seen[1..].iter().all(|&s| s), "every number must come out");
    }

    #[test]
    fn test_ninety_first_draw_signals_exhaustion_without_mutation() {
        let mut draws = DrawSequencer::new();
        for _ in 0..90 {
            draws.draw().unwrap();
        }
        let history: Vec<u8> = draws.drawn().to_vec();

        let err = draws.draw().unwrap_err();
        assert_eq!(err, GameError::DrawExhausted);
        assert_eq!(draws.drawn(), history.as_slice(), "history must not change");
        assert_eq!(draws.total(), 90);
    }

    #[test]
    fn test_drawn_preserves_order_and_contains_matches() {
        let mut draws = DrawSequencer::new();
        let first = draws.draw().unwrap().number;
        let second = draws.draw().unwrap().number;

        assert_eq!(draws.drawn(), &[first, second]);
        assert!(draws.contains(first));
        assert!(draws.contains(second));
        // 91 is outside the universe and never drawn.
        assert!(!draws.contains(91));
    }

    #[test]
    fn test_fresh_sequencer_is_empty() {
        let draws = DrawSequencer::new();
        assert_eq!(draws.total(), 0);
        assert!(draws.drawn().is_empty());
        assert!(!draws.is_exhausted());
    }
}
