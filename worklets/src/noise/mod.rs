//! Noise generators.
//!
//! Each instance owns its random stream, seeded from the `seed` option when
//! one is given so renders can be reproduced.

pub mod pink;
pub mod ridge_rat;
pub mod white;

use dsynth::fastrand::Rng;

/// Uniform value in `[-1, 1)`.
#[inline]
pub fn bipolar(rng: &mut Rng) -> f32 {
    rng.f32() * 2.0 - 1.0
}
