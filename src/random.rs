use rand::Rng;
use std::collections::VecDeque;

/// Bounded random integers, inclusive on both ends.
pub trait RandomSource: Send {
    fn in_range(&mut self, min: u32, max: u32) -> u32;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn in_range(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            return min;
        }
        rand::thread_rng().gen_range(min..=max)
    }
}

/// Replays scripted draws. Each value is clamped into the requested range;
/// once the script runs out every draw returns `min`.
#[derive(Debug, Clone, Default)]
pub struct SequenceRandom {
    script: VecDeque<u32>,
}

impl SequenceRandom {
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            script: values.into_iter().collect(),
        }
    }
}

impl RandomSource for SequenceRandom {
    fn in_range(&mut self, min: u32, max: u32) -> u32 {
        match self.script.pop_front() {
            Some(value) => value.clamp(min, max.max(min)),
            None => min,
        }
    }
}
