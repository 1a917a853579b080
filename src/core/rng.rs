//! Random sources for the engine.
//!
//! Every random draw goes through a `&mut dyn FnMut() -> f64` returning values
//! in `[0, 1)`. These helpers build the common sources.
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Reproducible source for tests and replays.
pub fn seeded(seed: u64) -> impl FnMut() -> f64 {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    move || rng.gen::<f64>()
}

pub fn thread_source() -> impl FnMut() -> f64 {
    let mut rng = rand::thread_rng();
    move || rng.gen::<f64>()
}

/// Yields `values` in order, then 0.5 forever.
pub fn scripted(values: Vec<f64>) -> impl FnMut() -> f64 {
    let mut idx = 0usize;
    move || {
        let v = values.get(idx).copied().unwrap_or(0.5);
        idx += 1;
        v
    }
}

/// Uniform index into a collection of `len` items (`len` must be non-zero).
pub fn pick_index(rng: &mut dyn FnMut() -> f64, len: usize) -> usize {
    let idx = (rng() * len as f64) as usize;
    idx.min(len.saturating_sub(1))
}
