//! Resolution requests and framebuffer addresses.

use core::num::NonZeroU32;

use crate::error::VideoError;
use crate::modeline::{CHARACTER_CELL, GtfParams, Modeline};

/// Largest accepted width or height in pixels.
pub const MAX_DIMENSION: u32 = 4096;
/// Highest accepted refresh rate.
pub const MAX_REFRESH_HZ: u32 = 240;

/// Pixel formats the controller can scan out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum ColorDepth {
    Mono = 1,
    Indexed8 = 8,
    HiColor16 = 16,
    TrueColor24 = 24,
}

impl ColorDepth {
    #[inline]
    pub const fn bits_per_pixel(self) -> u16 {
        self as u16
    }
}

impl TryFrom<u16> for ColorDepth {
    type Error = VideoError;

    fn try_from(bpp: u16) -> Result<Self, Self::Error> {
        match bpp {
            1 => Ok(ColorDepth::Mono),
            8 => Ok(ColorDepth::Indexed8),
            16 => Ok(ColorDepth::HiColor16),
            24 => Ok(ColorDepth::TrueColor24),
            other => Err(VideoError::UnsupportedDepth(other)),
        }
    }
}

/// A display mode as asked for by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionRequest {
    pub width: u32,
    pub height: u32,
    pub depth: ColorDepth,
    pub refresh_hz: u32,
}

impl ResolutionRequest {
    /// 640x480, 16 bpp, 70 Hz.
    pub const DEFAULT: Self = Self {
        width: 640,
        height: 480,
        depth: ColorDepth::HiColor16,
        refresh_hz: 70,
    };

    /// Build a request from raw values, validating all of them.
    pub fn new(width: u32, height: u32, bpp: u16, refresh_hz: u32) -> Result<Self, VideoError> {
        let request = Self {
            width,
            height,
            depth: ColorDepth::try_from(bpp)?,
            refresh_hz,
        };
        request.validate()?;
        Ok(request)
    }

    /// Width after clearing the bits below the character cell.
    #[inline]
    pub const fn aligned_width(&self) -> u32 {
        self.width & !(CHARACTER_CELL - 1)
    }

    pub fn validate(&self) -> Result<(), VideoError> {
        let width = self.aligned_width();
        if width == 0
            || width > MAX_DIMENSION
            || self.height == 0
            || self.height > MAX_DIMENSION
            || self.refresh_hz == 0
            || self.refresh_hz > MAX_REFRESH_HZ
        {
            return Err(VideoError::InvalidResolution {
                width: self.width,
                height: self.height,
                refresh_hz: self.refresh_hz,
            });
        }
        Ok(())
    }

    /// GTF timing for this request.
    pub fn modeline(&self) -> Result<Modeline, VideoError> {
        self.validate()?;
        GtfParams::default().compute(self.width, self.height, self.refresh_hz, false)
    }
}

impl Default for ResolutionRequest {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Physical address of an allocated framebuffer, as the controller sees it.
///
/// Allocation and alignment belong to the caller. A failed allocation
/// surfaces here as [`VideoError::NullFramebuffer`], before any register
/// has been touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramebufferAddr(NonZeroU32);

impl FramebufferAddr {
    pub fn new(addr: u32) -> Result<Self, VideoError> {
        NonZeroU32::new(addr)
            .map(Self)
            .ok_or(VideoError::NullFramebuffer)
    }

    #[inline]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}
