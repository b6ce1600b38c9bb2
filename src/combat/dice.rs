//! Dice rolling and hit counting.

use rand::Rng;

/// Number of faces on a combat die.
pub const DIE_FACES: u32 = 6;

/// A source of six-sided die rolls.
pub trait Dice {
    /// Returns a roll in `1..=6`.
    fn roll(&mut self) -> u32;
}

impl<R: Rng> Dice for R {
    fn roll(&mut self) -> u32 {
        self.gen_range(1..=DIE_FACES)
    }
}

/// Replays a fixed sequence of rolls, cycling when exhausted.
///
/// Used to make battles reproducible in tests and replays.
#[derive(Debug, Clone)]
pub struct LoadedDice {
    rolls: Vec<u32>,
    next: usize,
}

impl LoadedDice {
    /// Creates dice that return `rolls` in order. An empty script always rolls 6.
    pub fn new(rolls: Vec<u32>) -> Self {
        LoadedDice { rolls, next: 0 }
    }

    /// Dice that always show the same face.
    pub fn always(face: u32) -> Self {
        LoadedDice::new(vec![face])
    }

    /// Number of rolls made so far.
    pub fn rolled(&self) -> usize {
        self.next
    }
}

impl Dice for LoadedDice {
    fn roll(&mut self) -> u32 {
        if self.rolls.is_empty() {
            self.next += 1;
            return DIE_FACES;
        }
        let face = self.rolls[self.next % self.rolls.len()];
        self.next += 1;
        face
    }
}

/// Rolls a single die.
pub fn roll_die(dice: &mut impl Dice) -> u32 {
    dice.roll()
}

/// Rolls `strength` dice and counts those at or below `hit_threshold`.
pub fn attack(dice: &mut impl Dice, strength: u32, hit_threshold: u32) -> u32 {
    (0..strength).filter(|_| dice.roll() <= hit_threshold).count() as u32
}
