//! Playback of a static audio buffer.
//!
//! The buffer arrives once through the `audio_data` option and is shared
//! read-only; a fractional play head indexes it by truncation. Reads outside
//! the buffer are silent.
//!
//! Three variants differ only in how the head moves:
//!
//! * `sampler_wrap` wraps around the whole buffer.
//! * `sampler` loops a window spanning a whole number of `freq` periods,
//!   anchored at `fulcrum` and opened by `open`.
//! * `sampler_quantized` loops from `start`, with the length `end - start`
//!   rounded up to whole periods.

use std::sync::Arc;

use dsynth::{Command, Error, Event, ProcessorOptions};

pub mod quantized;
pub mod windowed;
pub mod wrap;

/// Fractional read position into a shared buffer.
#[derive(Debug, Clone)]
pub struct PlayHead {
    data: Arc<[f32]>,
    position: f64,
}

impl PlayHead {
    /// Head at the start of the `audio_data` buffer.
    pub fn from_options(options: &ProcessorOptions) -> Result<Self, Error> {
        Ok(Self {
            data: options.audio_data()?,
            position: 0.0,
        })
    }

    /// Buffer length in frames.
    #[inline]
    pub fn buffer_len(&self) -> f64 {
        self.data.len() as f64
    }

    /// Current position in frames.
    #[inline]
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Sample under the head, or silence outside the buffer.
    #[inline]
    pub fn read(&self) -> f32 {
        if self.position >= 0.0 {
            // truncation; NaN fails the comparison above
            self.data
                .get(self.position as usize)
                .copied()
                .unwrap_or(0.0)
        } else {
            0.0
        }
    }

    /// Fraction of the buffer traversed, clamped to `[0, 1]`.
    pub fn phase(&self) -> f32 {
        let phase = self.position / self.buffer_len();
        if phase.is_nan() {
            0.0
        } else {
            phase.clamp(0.0, 1.0) as f32
        }
    }

    /// Moves `rate` frames, wrapping around the buffer in either direction.
    #[inline]
    pub fn step_wrapped(&mut self, rate: f32) {
        let len = self.buffer_len();
        let next = (self.position + f64::from(rate)).rem_euclid(len);
        self.position = if next.is_finite() && next < len { next } else { 0.0 };
    }

    /// Moves `rate` frames inside `region` and returns the sample landed on.
    ///
    /// A head before the region snaps to its (floored) start first. After the
    /// read, a head at or past the end snaps back the same way.
    #[inline]
    pub fn step_looped(&mut self, rate: f32, region: LoopRegion) -> f32 {
        let restart = region.start.floor();

        if self.position < region.start {
            self.position = restart;
        }

        self.position += f64::from(rate);
        let sample = self.read();

        if self.position >= region.end || self.position.is_nan() {
            self.position = if restart.is_finite() { restart } else { 0.0 };
        }

        sample
    }

    /// Answers a phase query.
    pub fn on_command(&self, command: Command) -> Option<Event> {
        match command {
            Command::GetPhase => Some(Event::Phase(self.phase())),
        }
    }
}

/// Loop bounds in frames, `start` inclusive and `end` exclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopRegion {
    pub start: f64,
    pub end: f64,
}

impl LoopRegion {
    /// The whole buffer.
    pub fn whole(len: f64) -> Self {
        Self { start: 0.0, end: len }
    }

    /// Length in frames.
    pub fn frames(&self) -> f64 {
        self.end - self.start
    }
}

/// Period of `freq` in frames, if it is a usable positive length.
#[inline]
pub fn period_frames(sample_rate: f32, freq: f32) -> Option<f64> {
    let period = f64::from(sample_rate) / f64::from(freq);
    (period.is_finite() && period > 0.0).then_some(period)
}

/// Window of whole periods placed so that `fulcrum` of the way through the
/// buffer stays at the same relative point in the window.
///
/// `open` is raised to the 12th power: the window stays a single period for
/// most of the travel and widens to the whole buffer near 1.
pub fn windowed_region(
    len: f64,
    sample_rate: f32,
    freq: f32,
    fulcrum: f32,
    open: f32,
) -> LoopRegion {
    let Some(period) = period_frames(sample_rate, freq) else {
        return LoopRegion::whole(len);
    };
    let fulcrum = f64::from(fulcrum);
    let open = f64::from(open).powi(12);

    let total = len / period;
    let periods = (open * (total - 1.0)).floor() + 1.0;
    let frames = periods * period;
    let anchor = len * fulcrum;

    LoopRegion {
        start: anchor - frames * fulcrum,
        end: anchor + frames * (1.0 - fulcrum),
    }
}

/// Loop from `start` whose length is `|end - start|` rounded up past the next
/// whole period. Both bounds are fractions of the buffer.
pub fn quantized_region(
    len: f64,
    sample_rate: f32,
    freq: f32,
    start: f32,
    end: f32,
) -> LoopRegion {
    let Some(period) = period_frames(sample_rate, freq) else {
        return LoopRegion::whole(len);
    };
    let span = (f64::from(end) - f64::from(start)).abs() * len;
    let frames = ((span / period).floor() + 1.0) * period;
    let start = f64::from(start) * len;

    LoopRegion {
        start,
        end: start + frames,
    }
}
