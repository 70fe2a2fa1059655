//! Random implementations.

use crate::infrastructure::ports::RandomPort;

/// System random - uses real randomness.
pub struct SystemRandom;

impl SystemRandom {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPort for SystemRandom {
    fn gen_range(&self, min: i32, max: i32) -> i32 {
        use rand::Rng;
        rand::thread_rng().gen_range(min..=max)
    }
}

/// Fixed random for testing.
#[cfg(test)]
pub struct FixedRandom(pub i32);

#[cfg(test)]
impl RandomPort for FixedRandom {
    fn gen_range(&self, _min: i32, _max: i32) -> i32 {
        self.0
    }
}

/// Replays a fixed list of draws, then repeats the last one.
#[cfg(test)]
pub struct SequenceRandom {
    draws: std::sync::Mutex<std::collections::VecDeque<i32>>,
    last: std::sync::Mutex<i32>,
}

#[cfg(test)]
impl SequenceRandom {
    pub fn new(draws: impl IntoIterator<Item = i32>) -> Self {
        Self {
            draws: std::sync::Mutex::new(draws.into_iter().collect()),
            last: std::sync::Mutex::new(0),
        }
    }
}

#[cfg(test)]
impl RandomPort for SequenceRandom {
    fn gen_range(&self, _min: i32, _max: i32) -> i32 {
        let mut last = self.last.lock().unwrap();
        if let Some(next) = self.draws.lock().unwrap().pop_front() {
            *last = next;
        }
        *last
    }
}
