//! Pixel clock PLL programming.
//!
//! The PLL is retuned in a fixed handshake:
//!
//! 1. select the PLL as clock source in the control word
//! 2. wait until the PLL reports idle
//! 3. write the frequency (MHz, minus one)
//! 4. wait until the PLL reports idle again
//! 5. write the reconfigure strobe to latch the new frequency
//!
//! Writing the frequency or the strobe while the PLL is still busy leaves
//! it with an unstable output, so both waits are mandatory.

use khal::{Mmio, SpinLimit, TimedOut, spin_until};
use log::{debug, error};

use crate::error::VideoError;
use crate::regs::{CLOCK_MODE, ClockMode, VideoRegs};

/// Encode a pixel clock for the 16-bit frequency register.
pub fn encode_frequency(mhz: u32) -> Result<u16, VideoError> {
    match mhz {
        1..=0x1_0000 => Ok((mhz - 1) as u16),
        _ => Err(VideoError::InvalidFrequency(mhz)),
    }
}

/// Drives the pixel clock generator.
pub struct ClockProgrammer<'a, M> {
    regs: &'a VideoRegs<M>,
    limit: SpinLimit,
}

impl<'a, M: Mmio> ClockProgrammer<'a, M> {
    /// A programmer that waits on the PLL for as long as it takes.
    pub fn new(regs: &'a VideoRegs<M>) -> Self {
        Self::with_limit(regs, SpinLimit::Forever)
    }

    /// A programmer whose PLL waits give up after `limit` polls with
    /// [`VideoError::PllTimeout`].
    pub fn with_limit(regs: &'a VideoRegs<M>, limit: SpinLimit) -> Self {
        Self { regs, limit }
    }

    /// Select the clock source.
    pub fn set_clock_mode(&self, mode: ClockMode) {
        debug!("clock mode {:?}", mode);
        // The selector is issued twice back to back.
        for _ in 0..2 {
            self.regs
                .modify_control(|ctrl| CLOCK_MODE.insert(ctrl, mode as u32));
        }
    }

    /// Select the clock source from a raw selector value.
    ///
    /// An unknown selector is refused before anything is written.
    pub fn set_clock_mode_raw(&self, selector: u8) -> Result<(), VideoError> {
        let mode = ClockMode::try_from(selector).inspect_err(|e| error!("{}", e))?;
        self.set_clock_mode(mode);
        Ok(())
    }

    /// Switch to the PLL and retune it to `mhz`.
    pub fn set_frequency(&self, mhz: u32) -> Result<(), VideoError> {
        let encoded = encode_frequency(mhz)?;

        self.set_clock_mode(ClockMode::Pll);

        self.wait_idle()?;
        self.regs.write_pll_frequency(encoded);
        self.wait_idle()?;
        self.regs.strobe_pll_reconfig();

        debug!("pixel clock {} MHz", mhz);
        Ok(())
    }

    fn wait_idle(&self) -> Result<(), VideoError> {
        match spin_until(|| !self.regs.pll_busy(), self.limit) {
            Ok(0) => Ok(()),
            Ok(spins) => {
                debug!("PLL idle after {} polls", spins);
                Ok(())
            }
            Err(TimedOut { spins }) => {
                let err = VideoError::PllTimeout { spins };
                error!("{}", err);
                Err(err)
            }
        }
    }
}
