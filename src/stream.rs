//! Controllable pseudo-random streams for resampling.
//!
//! Resampling engines do not draw from a hidden global generator. They draw
//! from a [`RandomStream`], a capability object the caller can seed, reset,
//! advance, and flip to antithetic generation. The concrete implementation,
//! [`XoshiroStream`], wraps `Xoshiro256PlusPlus` and maps the substream
//! operations onto its `jump()` (2^128 steps), so substreams never overlap
//! in practice.
//!
//! Common-random-number designs are expressed through ownership: clone a
//! stream (or construct two streams from the same seed) and hand one copy to
//! each engine. Two engines then consume identical draw sequences.

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// A controllable source of uniform random draws.
///
/// This is the contract consumed by the resampling engines. It is
/// deliberately small so tests can substitute a scripted stream: uniform
/// draws on `[0, 1)`, uniform index draws on `[0, n)`, and the four stream
/// control operations.
pub trait RandomStream {
    /// Draw the next uniform value.
    ///
    /// Plain draws lie in `[0, 1)`. With antithetic generation switched on
    /// the stream returns `1 - u` instead, which lies in `(0, 1]`.
    fn next_u01(&mut self) -> f64;

    /// Draw a uniform index in `[0, bound)`.
    ///
    /// The default implementation scales [`next_u01`](Self::next_u01), so
    /// antithetic generation inverts index draws as well.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `bound` is zero.
    fn next_index(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0, "index bound must be positive");
        let u = self.next_u01();
        // u may equal 1.0 under antithetic generation; clamp to the last index.
        let index = (u * bound as f64) as usize;
        index.min(bound - 1)
    }

    /// Rewind to the very beginning of the stream.
    fn reset_start(&mut self);

    /// Rewind to the beginning of the current substream.
    fn reset_start_substream(&mut self);

    /// Advance to the beginning of the next substream.
    fn advance_substream(&mut self);

    /// Whether antithetic generation is currently switched on.
    fn antithetic(&self) -> bool;

    /// Switch antithetic generation on or off.
    ///
    /// Takes effect from the next draw; it does not move the stream
    /// position.
    fn set_antithetic(&mut self, on: bool);
}

/// A seedable random stream backed by `Xoshiro256PlusPlus`.
///
/// Keeps three generator states: the start of the stream, the start of the
/// current substream, and the current position. Substreams are spaced by the
/// generator's `jump()`, 2^128 draws apart.
///
/// # Example
///
/// ```
/// use simstat::{RandomStream, XoshiroStream};
///
/// let mut stream = XoshiroStream::new(42);
/// let first = stream.next_u01();
/// stream.next_u01();
/// stream.reset_start();
/// assert_eq!(stream.next_u01(), first);
/// ```
#[derive(Debug, Clone)]
pub struct XoshiroStream {
    stream_start: Xoshiro256PlusPlus,
    substream_start: Xoshiro256PlusPlus,
    current: Xoshiro256PlusPlus,
    antithetic: bool,
}

impl XoshiroStream {
    /// Create a stream from an explicit seed.
    ///
    /// Streams built from the same seed produce identical draw sequences.
    pub fn new(seed: u64) -> Self {
        let rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        Self {
            stream_start: rng.clone(),
            substream_start: rng.clone(),
            current: rng,
            antithetic: false,
        }
    }
}

impl Default for XoshiroStream {
    /// An entropy-seeded stream for callers that do not need reproducibility.
    fn default() -> Self {
        Self::new(rand::rng().random())
    }
}

impl RandomStream for XoshiroStream {
    fn next_u01(&mut self) -> f64 {
        let u: f64 = self.current.random();
        if self.antithetic {
            1.0 - u
        } else {
            u
        }
    }

    fn reset_start(&mut self) {
        self.substream_start = self.stream_start.clone();
        self.current = self.stream_start.clone();
    }

    fn reset_start_substream(&mut self) {
        self.current = self.substream_start.clone();
    }

    fn advance_substream(&mut self) {
        self.substream_start.jump();
        self.current = self.substream_start.clone();
    }

    fn antithetic(&self) -> bool {
        self.antithetic
    }

    fn set_antithetic(&mut self, on: bool) {
        self.antithetic = on;
    }
}

/// Draw `sample_size` values uniformly with replacement from `data`.
///
/// This is the population-sampling primitive underneath the bootstrap
/// engines. Every draw consumes exactly one value from `stream`, so a
/// resample of size n moves the stream forward by n draws.
///
/// # Panics
///
/// Panics if `data` is empty.
pub fn sample_with_replacement<S: RandomStream>(
    data: &[f64],
    sample_size: usize,
    stream: &mut S,
) -> Vec<f64> {
    assert!(!data.is_empty(), "cannot sample from an empty slice");
    let n = data.len();
    (0..sample_size).map(|_| data[stream.next_index(n)]).collect()
}
