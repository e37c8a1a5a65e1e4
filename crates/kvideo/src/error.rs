//! Video configuration errors.

use core::fmt;

use crate::activate::ActivatorState;

/// Errors raised while computing or programming a video mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoError {
    /// A clock-mode selector outside the four modes the controller knows.
    /// This is a programming error; see [`VideoError::is_fatal`].
    InvalidClockMode(u8),
    /// The PLL kept reporting busy for the whole bounded wait.
    PllTimeout { spins: u32 },
    /// No framebuffer was allocated.
    NullFramebuffer,
    /// Colour depth other than 1, 8, 16 or 24 bits per pixel.
    UnsupportedDepth(u16),
    /// Zero or out-of-range width, height or refresh rate.
    InvalidResolution { width: u32, height: u32, refresh_hz: u32 },
    /// Timing values out of order or too tight for the VIDEL margins.
    InvalidModeline,
    /// Timing formula constants that cannot produce an ordered modeline.
    InvalidTimingParams,
    /// Pixel clock of 0 MHz or too large for the frequency register.
    InvalidFrequency(u32),
    /// A mode-activation step was run from the wrong state.
    OutOfSequence {
        expected: ActivatorState,
        found: ActivatorState,
    },
}

impl VideoError {
    /// `true` for faults that mean the caller's configuration is broken.
    ///
    /// The caller is expected to report the fault and halt rather than
    /// retry: nothing about the hardware state will make a second attempt
    /// succeed.
    pub fn is_fatal(&self) -> bool {
        matches!(self, VideoError::InvalidClockMode(_))
    }
}

impl fmt::Display for VideoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VideoError::InvalidClockMode(mode) => write!(f, "illegal clock mode {}", mode),
            VideoError::PllTimeout { spins } => {
                write!(f, "video PLL still busy after {} polls", spins)
            }
            VideoError::NullFramebuffer => f.write_str("no framebuffer allocated"),
            VideoError::UnsupportedDepth(bpp) => write!(f, "unsupported colour depth {} bpp", bpp),
            VideoError::InvalidResolution {
                width,
                height,
                refresh_hz,
            } => write!(f, "invalid resolution {}x{}@{}", width, height, refresh_hz),
            VideoError::InvalidModeline => f.write_str("modeline timing out of order"),
            VideoError::InvalidTimingParams => f.write_str("timing formula constants out of range"),
            VideoError::InvalidFrequency(mhz) => write!(f, "pixel clock {} MHz out of range", mhz),
            VideoError::OutOfSequence { expected, found } => write!(
                f,
                "mode activation step needs state {:?}, controller is {:?}",
                expected, found
            ),
        }
    }
}
