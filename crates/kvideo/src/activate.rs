//! Mode activation sequence.
//!
//! The controller falls back to Falcon/ST compatibility video if its legacy
//! shift-mode registers are written while FireBee video is enabled, and it
//! shows garbage if enabled half-configured. Activation is therefore a
//! fixed walk through four states:
//!
//! ```text
//! Disabled -> BaseAddressSet -> TimingConfigured -> Enabled
//!    ^                                                 |
//!    +-------------------------------------------------+
//! ```
//!
//! * **Disabled**: output, DAC and shift-mode enables cleared (blank screen).
//! * **BaseAddressSet**: screen base programmed from the framebuffer address.
//! * **TimingConfigured**: pixel clock and counters written, depth selected.
//! * **Enabled**: ST then Falcon shift-mode registers zeroed, then output,
//!   DAC, depth and sync bits raised in one update.
//!
//! No step can be confirmed by reading the hardware back; the ordering is
//! the only guarantee.

use khal::{Mmio, SpinLimit};
use log::{debug, info};

use crate::error::VideoError;
use crate::modeline::Modeline;
use crate::regs::{Control, VideoRegs};
use crate::request::{ColorDepth, FramebufferAddr};
use crate::timing::{TimingRegisterWriter, VidelTiming};

/// Where the activation sequence currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivatorState {
    Disabled,
    BaseAddressSet,
    TimingConfigured,
    Enabled,
}

/// Sequences a mode change on the controller.
pub struct ModeActivator<'a, M> {
    regs: &'a VideoRegs<M>,
    timing: TimingRegisterWriter<'a, M>,
    state: ActivatorState,
    mode: Control,
}

impl<'a, M: Mmio> ModeActivator<'a, M> {
    pub fn new(regs: &'a VideoRegs<M>) -> Self {
        Self::with_limit(regs, SpinLimit::Forever)
    }

    /// An activator whose PLL waits are bounded by `limit`.
    pub fn with_limit(regs: &'a VideoRegs<M>, limit: SpinLimit) -> Self {
        Self {
            regs,
            timing: TimingRegisterWriter::with_limit(regs, limit),
            state: ActivatorState::Disabled,
            mode: Control::empty(),
        }
    }

    pub fn state(&self) -> ActivatorState {
        self.state
    }

    fn expect(&self, expected: ActivatorState) -> Result<(), VideoError> {
        if self.state != expected {
            return Err(VideoError::OutOfSequence {
                expected,
                found: self.state,
            });
        }
        Ok(())
    }

    /// Blank the display. Allowed from any state.
    pub fn disable(&mut self) {
        self.regs
            .modify_control(|ctrl| ctrl & !(Control::SHIFT_MODES | Control::OUTPUT).bits());
        self.state = ActivatorState::Disabled;
        debug!("video disabled");
    }

    /// Point the controller at the framebuffer.
    pub fn set_base_address(&mut self, framebuffer: FramebufferAddr) -> Result<(), VideoError> {
        self.expect(ActivatorState::Disabled)?;
        self.regs.write_base_address(framebuffer);
        self.state = ActivatorState::BaseAddressSet;
        Ok(())
    }

    /// Apply `modeline` and select `depth`.
    ///
    /// Any previously selected depth is cleared in the same write that sets
    /// the new one. On error the state is left at
    /// [`ActivatorState::BaseAddressSet`] with output still disabled.
    pub fn configure_timing(
        &mut self,
        modeline: &Modeline,
        depth: ColorDepth,
    ) -> Result<VidelTiming, VideoError> {
        self.expect(ActivatorState::BaseAddressSet)?;
        let timing = self.timing.write_timing(modeline)?;

        let mode = Control::for_mode(depth, modeline);
        self.regs.modify_control(|ctrl| {
            let cleared = ctrl & !(Control::DEPTH | Control::SHIFT_MODES).bits();
            cleared | mode.bits()
        });
        self.mode = mode;
        self.state = ActivatorState::TimingConfigured;
        Ok(timing)
    }

    /// Leave compatibility mode and turn the display on.
    pub fn enable(&mut self) -> Result<(), VideoError> {
        self.expect(ActivatorState::TimingConfigured)?;

        // Must be the last shift-mode writes before output goes on.
        self.regs.clear_shift_modes();
        let on = Control::OUTPUT | self.mode;
        self.regs.modify_control(|ctrl| ctrl | on.bits());

        self.state = ActivatorState::Enabled;
        debug!("video enabled, control {:?}", self.regs.control());
        Ok(())
    }

    /// Run the whole sequence from whatever state the controller is in.
    pub fn activate(
        &mut self,
        modeline: &Modeline,
        depth: ColorDepth,
        framebuffer: FramebufferAddr,
    ) -> Result<VidelTiming, VideoError> {
        self.disable();
        self.set_base_address(framebuffer)?;
        let timing = self.configure_timing(modeline, depth)?;
        self.enable()?;
        info!("{} at {} bpp, screen {:#010x}", modeline, depth.bits_per_pixel(), framebuffer.get());
        Ok(timing)
    }
}
