//! Frame-sequence animation clock.
//!
//! An [`Animation`] is a list of frame numbers plus the time each step stays on
//! screen. The clock is driven from outside with explicit instants so that
//! playback can be simulated deterministically in tests.

use std::time::{Duration, Instant};

use crate::sprite::SpriteError;

#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    sequence: Vec<i32>,
    /// Current position in `sequence`.
    index: usize,
    /// Time per step; zero means "show the last entry, never advance".
    step: Duration,
    start: Instant,
    loops: u32,
}

impl Animation {
    pub fn new(sequence: Vec<i32>, duration: f32) -> Result<Self, SpriteError> {
        if sequence.is_empty() {
            return Err(SpriteError::EmptySequence);
        }
        // Steps longer than `Duration::MAX` never elapse anyway.
        let step = if duration.is_finite() && duration > 0.0 {
            Duration::try_from_secs_f32(duration).unwrap_or(Duration::MAX)
        } else {
            Duration::ZERO
        };
        Ok(Self {
            sequence,
            index: 0,
            step,
            start: Instant::now(),
            loops: 0,
        })
    }

    pub fn sequence(&self) -> &[i32] {
        &self.sequence
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Seconds per step.
    pub fn duration(&self) -> f32 {
        self.step.as_secs_f32()
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    pub fn loops(&self) -> u32 {
        self.loops
    }

    pub fn is_static(&self) -> bool {
        self.step.is_zero()
    }

    /// Rewind to the first step and restart the step timer at `now`.
    pub fn restart(&mut self, now: Instant) {
        self.index = if self.is_static() {
            self.sequence.len() - 1
        } else {
            0
        };
        self.start = now;
        self.loops = 0;
    }

    /// Advance one step if the current one has been on screen longer than the
    /// step duration. Returns true when a step was taken.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.is_static() {
            return false;
        }
        let elapsed = now.saturating_duration_since(self.start);
        if elapsed <= self.step {
            return false;
        }

        self.index += 1;
        if self.index >= self.sequence.len() {
            self.index = 0;
            self.loops += 1;
        }
        self.start = now;
        true
    }

    /// Frame number for the current step shifted by `offset` steps.
    pub fn frame(&self, offset: usize) -> i32 {
        self.sequence[(self.index + offset) % self.sequence.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn empty_sequence_is_rejected() {
        assert!(matches!(
            Animation::new(Vec::new(), 0.1),
            Err(SpriteError::EmptySequence)
        ));
    }

    #[test]
    fn does_not_advance_before_duration_elapses() {
        let t0 = Instant::now();
        let mut anim = Animation::new(vec![4, 5, 6], 0.1).unwrap();
        anim.restart(t0);
        assert!(!anim.tick(t0 + ms(50)));
        assert!(!anim.tick(t0 + ms(100)));
        assert_eq!(anim.frame(0), 4);
        assert!(anim.tick(t0 + ms(101)));
        assert_eq!(anim.frame(0), 5);
    }

    #[test]
    fn wrap_counts_exactly_one_loop() {
        let t0 = Instant::now();
        let mut anim = Animation::new(vec![0, 1], 0.1).unwrap();
        anim.restart(t0);
        anim.tick(t0 + ms(105));
        assert_eq!((anim.index(), anim.loops()), (1, 0));
        anim.tick(t0 + ms(210));
        assert_eq!((anim.index(), anim.loops()), (0, 1));
        anim.tick(t0 + ms(315));
        assert_eq!((anim.index(), anim.loops()), (1, 1));
    }

    #[test]
    fn static_animation_shows_last_entry() {
        let t0 = Instant::now();
        let mut anim = Animation::new(vec![7, 8, 9], 0.0).unwrap();
        anim.restart(t0);
        assert_eq!(anim.frame(0), 9);
        assert!(!anim.tick(t0 + Duration::from_secs(10)));
        assert_eq!(anim.loops(), 0);
    }

    #[test]
    fn negative_or_nan_duration_is_static() {
        assert!(Animation::new(vec![1], -1.0).unwrap().is_static());
        assert!(Animation::new(vec![1], f32::NAN).unwrap().is_static());
    }

    #[test]
    fn huge_duration_saturates_instead_of_panicking() {
        let t0 = Instant::now();
        let mut anim = Animation::new(vec![0, 1], 1e30).unwrap();
        assert_eq!(anim.step(), Duration::MAX);
        assert!(!anim.is_static());
        anim.restart(t0);
        assert!(!anim.tick(t0 + Duration::from_secs(3600)));
        assert_eq!(anim.frame(0), 0);

        let finite = Animation::new(vec![0], f32::MAX).unwrap();
        assert_eq!(finite.step(), Duration::MAX);
    }

    #[test]
    fn frame_offset_wraps_sequence() {
        let anim = Animation::new(vec![10, 11, 12], 0.2).unwrap();
        assert_eq!(anim.frame(1), 11);
        assert_eq!(anim.frame(4), 11);
    }
}
