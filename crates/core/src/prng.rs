//! Deterministic random source for artwork generation.
//!
//! [`SeededRng`] wraps one of two streams:
//!
//! - a **sine stream** for seeded sources: `s = sin(s) * 10000`, returning
//!   the fractional part of `s`. The starting state is the numeric seed or
//!   the rolling hash of a text seed (see [`Seed::hash_text`]). This is the
//!   legacy scheme and is reproduced exactly so old seeds keep their art.
//! - an [`Xorshift64`] stream seeded from OS entropy when no seed is given.
//!
//! Every helper (`range`, `pick`, `shuffle`, `weighted`, ...) consumes a
//! fixed number of stream values, documented per method. Generation code
//! relies on that to keep output stable for a given seed.

use crate::error::EngineError;
use crate::noise::SimplexNoise;
use crate::seed::Seed;
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Xorshift64 deterministic PRNG. Same seed always produces the same sequence.
///
/// Uses the standard shift parameters (13, 7, 17). Seed of 0 is replaced
/// with a non-zero fallback to avoid the all-zeros fixed point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    const FALLBACK_SEED: u64 = 0x5EED_DEAD_BEEF_CAFE;

    /// Creates a new PRNG with the given seed (0 is replaced by a fallback).
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    /// Creates a PRNG seeded from OS entropy. Not reproducible.
    pub fn from_entropy() -> Self {
        Self::new(rand::random::<u64>())
    }

    /// Advances the state and returns the next 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Returns a uniformly distributed f64 in [0, 1) from the upper 53 bits.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Starting state used when a seed maps to 0, where `sin` has a fixed point.
const ZERO_STATE_FALLBACK: f64 = 1.0;

/// The raw value stream behind a [`SeededRng`].
#[derive(Debug, Clone)]
enum Stream {
    Sine(f64),
    Xorshift(Xorshift64),
}

impl Stream {
    fn for_seed(seed: Option<&Seed>) -> Self {
        match seed {
            Some(seed) => {
                let state = seed.initial_state();
                if state == 0.0 || !state.is_finite() {
                    Stream::Sine(ZERO_STATE_FALLBACK)
                } else {
                    Stream::Sine(state)
                }
            }
            None => Stream::Xorshift(Xorshift64::from_entropy()),
        }
    }

    fn next(&mut self) -> f64 {
        match self {
            Stream::Sine(state) => {
                *state = state.sin() * 10_000.0;
                let v = *state - state.floor();
                // Guard against `1.0` from rounding on tiny negative states.
                if v >= 1.0 {
                    0.0
                } else {
                    v
                }
            }
            Stream::Xorshift(rng) => rng.next_f64(),
        }
    }
}

/// Seeded pseudo-random source with gradient noise.
///
/// Construction (and [`set_seed`](Self::set_seed)) consumes 255 stream values
/// to shuffle the noise permutation table before any other draw.
#[derive(Debug, Clone)]
pub struct SeededRng {
    seed: Option<Seed>,
    stream: Stream,
    noise: SimplexNoise,
    gaussian_next: Option<f64>,
}

impl SeededRng {
    /// Creates a source from an optional seed. `None` is not reproducible.
    pub fn new(seed: Option<Seed>) -> Self {
        let mut stream = Stream::for_seed(seed.as_ref());
        let noise = SimplexNoise::new(|| stream.next());
        Self {
            seed,
            stream,
            noise,
            gaussian_next: None,
        }
    }

    /// Shorthand for a seeded, reproducible source.
    pub fn seeded(seed: impl Into<Seed>) -> Self {
        Self::new(Some(seed.into()))
    }

    /// The seed this source was (re)built from.
    pub fn seed(&self) -> Option<&Seed> {
        self.seed.as_ref()
    }

    /// Re-seeds the source, resetting the stream, the cached Gaussian sample
    /// and the noise permutation table.
    pub fn set_seed(&mut self, seed: Option<Seed>) {
        *self = Self::new(seed);
    }

    /// Uniform value in [0, 1). One draw.
    pub fn value(&mut self) -> f64 {
        self.stream.next()
    }

    /// Uniform value in (0, 1). Draws until non-zero.
    pub fn value_non_zero(&mut self) -> f64 {
        loop {
            let v = self.value();
            if v != 0.0 {
                return v;
            }
        }
    }

    /// `true` when a draw exceeds 0.5. One draw.
    pub fn boolean(&mut self) -> bool {
        self.value() > 0.5
    }

    /// `true` with the given probability. One draw.
    pub fn chance(&mut self, probability: f64) -> bool {
        self.value() < probability
    }

    /// Random sign, -1.0 or 1.0. One draw.
    pub fn sign(&mut self) -> f64 {
        if self.boolean() {
            1.0
        } else {
            -1.0
        }
    }

    /// Uniform value in [min, max). One draw.
    pub fn range(&mut self, min: f64, max: f64) -> f64 {
        self.value() * (max - min) + min
    }

    /// `floor(range(min, max))`. One draw.
    pub fn range_floor(&mut self, min: f64, max: f64) -> i64 {
        self.range(min, max).floor() as i64
    }

    /// Index in `0..len` drawn with `range_floor(0, len)`. One draw.
    fn index(&mut self, len: usize) -> usize {
        let i = self.range_floor(0.0, len as f64).max(0) as usize;
        i.min(len - 1)
    }

    /// Uniformly picks one element. `None` (and no draw) for an empty slice.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let i = self.index(items.len());
        items.get(i)
    }

    /// Fisher–Yates shuffle into a new vector; the input is left untouched.
    ///
    /// Walks `i` from `len - 1` down to 1, swapping with
    /// `range_floor(0, i + 1)`. `len - 1` draws.
    pub fn shuffle<T: Clone>(&mut self, items: &[T]) -> Vec<T> {
        let mut out = items.to_vec();
        for i in (1..out.len()).rev() {
            let j = self.index(i + 1);
            out.swap(i, j);
        }
        out
    }

    /// Cumulative-weight selection of an index.
    ///
    /// Returns `Ok(None)` for no weights (no draw), an error when the total
    /// is not positive (no draw), and otherwise one draw. Falls back to
    /// index 0 if floating-point residue leaves the draw unassigned.
    pub fn weighted(&mut self, weights: &[f64]) -> Result<Option<usize>, EngineError> {
        if weights.is_empty() {
            return Ok(None);
        }
        let total: f64 = weights.iter().sum();
        if total <= 0.0 || total.is_nan() {
            return Err(EngineError::NonPositiveWeights(total));
        }
        let mut remaining = self.value() * total;
        for (i, &w) in weights.iter().enumerate() {
            if remaining < w {
                return Ok(Some(i));
            }
            remaining -= w;
        }
        Ok(Some(0))
    }

    /// Weighted pick over `(value, weight)` pairs. Same draws as [`weighted`](Self::weighted).
    pub fn weighted_set<'a, T>(&mut self, items: &'a [(T, f64)]) -> Result<Option<&'a T>, EngineError> {
        let weights: Vec<f64> = items.iter().map(|(_, w)| *w).collect();
        Ok(self.weighted(&weights)?.map(|i| &items[i].0))
    }

    /// Normal sample via the Marsaglia polar form of Box–Muller.
    ///
    /// Each accepted pair yields two samples; the second is cached and
    /// returned (without drawing) by the next call.
    pub fn gaussian(&mut self, mean: f64, std_dev: f64) -> f64 {
        if let Some(cached) = self.gaussian_next.take() {
            return mean + std_dev * cached;
        }
        let (u, v, s) = loop {
            let u = self.value() * 2.0 - 1.0;
            let v = self.value() * 2.0 - 1.0;
            let s = u * u + v * v;
            if s < 1.0 && s != 0.0 {
                break (u, v, s);
            }
        };
        let multiplier = (-2.0 * s.ln() / s).sqrt();
        self.gaussian_next = Some(v * multiplier);
        mean + std_dev * (u * multiplier)
    }

    /// Point on a circle of the given radius. One draw.
    pub fn on_circle(&mut self, radius: f64) -> DVec2 {
        let angle = self.value() * TAU;
        DVec2::new(radius * angle.cos(), radius * angle.sin())
    }

    /// Point inside a disc of the given radius (area-uniform). Two draws.
    pub fn inside_circle(&mut self, radius: f64) -> DVec2 {
        let dir = self.on_circle(1.0);
        dir * (radius * self.value().sqrt())
    }

    /// Rebuilds the noise permutation table from the current stream (255 draws).
    pub fn permute_noise(&mut self) {
        let stream = &mut self.stream;
        self.noise = SimplexNoise::new(|| stream.next());
    }

    /// 1D noise sampled along the x axis of the 2D field.
    pub fn noise1d(&self, x: f64, frequency: f64, amplitude: f64) -> f64 {
        amplitude * self.noise.noise2d(x * frequency, 0.0)
    }

    pub fn noise2d(&self, x: f64, y: f64, frequency: f64, amplitude: f64) -> f64 {
        amplitude * self.noise.noise2d(x * frequency, y * frequency)
    }

    pub fn noise3d(&self, x: f64, y: f64, z: f64, frequency: f64, amplitude: f64) -> f64 {
        amplitude * self.noise.noise3d(x * frequency, y * frequency, z * frequency)
    }

    pub fn noise4d(&self, x: f64, y: f64, z: f64, w: f64, frequency: f64, amplitude: f64) -> f64 {
        amplitude
            * self
                .noise
                .noise4d(x * frequency, y * frequency, z * frequency, w * frequency)
    }
}
