//! FireBee video controller programming.
//!
//! Turns a [`ResolutionRequest`] into running video:
//!
//! 1. [`modeline`] computes GTF timing for the request.
//! 2. [`activate::ModeActivator`] blanks the display and sets the screen base.
//! 3. [`clock::ClockProgrammer`] retunes the pixel clock PLL.
//! 4. [`timing::TimingRegisterWriter`] writes the VIDEL counters.
//! 5. The activator selects the colour depth, leaves the legacy shift modes
//!    and enables output.
//!
//! All stages share one [`regs::VideoRegs`] handle. On hardware that is
//! [`hw::init`]; tests build one over simulated registers.
//!
//! The sequence expects to run to completion with interrupts masked. The
//! framebuffer must already be allocated and the colour lookup table loaded.
#![cfg_attr(not(test), no_std)]

pub mod activate;
pub mod clock;
pub mod error;
pub mod hw;
pub mod modeline;
pub mod regs;
pub mod request;
pub mod timing;

#[cfg(test)]
mod testing;

use khal::Mmio;
use log::info;

pub use activate::{ActivatorState, ModeActivator};
pub use error::VideoError;
pub use modeline::{GtfParams, Modeline, compute_modeline};
pub use regs::VideoRegs;
pub use request::{ColorDepth, FramebufferAddr, ResolutionRequest};

/// Compute the modeline for `request` and activate it on `regs`.
///
/// Returns the modeline that was programmed.
pub fn set_video_mode<M: Mmio>(
    regs: &VideoRegs<M>,
    request: &ResolutionRequest,
    framebuffer: FramebufferAddr,
) -> Result<Modeline, VideoError> {
    let modeline = request.modeline()?;
    info!(
        "{}x{}x{}@{} -> {}",
        request.width,
        request.height,
        request.depth.bits_per_pixel(),
        request.refresh_hz,
        modeline
    );
    ModeActivator::new(regs).activate(&modeline, request.depth, framebuffer)?;
    Ok(modeline)
}
