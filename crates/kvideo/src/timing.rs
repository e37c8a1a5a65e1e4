//! Modeline to VIDEL timing registers.
//!
//! The VIDEL counts each line and frame as a total with the active area
//! centred in it. Counter values are derived from the modeline's leading
//! margin (half the blanking, rounded down):
//!
//! ```text
//! hht = h_total          hdb = margin              hbe = margin - 1
//! hde = margin - 1 + hd  hbb = margin + hd         hss = h_total - hsync width
//! ```
//!
//! and the same construction vertically.

use khal::{Mmio, SpinLimit};
use log::debug;

use crate::clock::ClockProgrammer;
use crate::error::VideoError;
use crate::modeline::{Modeline, SyncTiming};
use crate::regs::{VideoRegs, videl};

/// Counter values for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisCounters {
    /// Total (HHT / VFT).
    pub total: u16,
    /// Display end (HDE / VDE).
    pub display_end: u16,
    /// Blank end (HBE / VBE).
    pub blank_end: u16,
    /// Display begin (HDB / VDB).
    pub display_begin: u16,
    /// Blank begin (HBB / VBB).
    pub blank_begin: u16,
    /// Sync start (HSS / VSS).
    pub sync_start: u16,
}

impl AxisCounters {
    fn from_axis(axis: &SyncTiming) -> Result<Self, VideoError> {
        let margin = axis.leading_margin();
        if margin == 0 {
            return Err(VideoError::InvalidModeline);
        }
        let reg = |value: u32| u16::try_from(value).map_err(|_| VideoError::InvalidModeline);
        let sync_start = axis
            .sync_end
            .checked_sub(axis.sync_start)
            .and_then(|width| axis.total.checked_sub(width))
            .ok_or(VideoError::InvalidModeline)?;
        Ok(Self {
            total: reg(axis.total)?,
            display_end: reg(margin - 1 + axis.display)?,
            blank_end: reg(margin - 1)?,
            display_begin: reg(margin)?,
            blank_begin: reg(margin + axis.display)?,
            sync_start: reg(sync_start)?,
        })
    }
}

/// Complete VIDEL timing for a modeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VidelTiming {
    pub horizontal: AxisCounters,
    pub vertical: AxisCounters,
}

impl VidelTiming {
    /// Derive the counters, refusing modelines whose blanking leaves no
    /// leading margin or whose values overflow the 16-bit counters.
    pub fn from_modeline(modeline: &Modeline) -> Result<Self, VideoError> {
        Ok(Self {
            horizontal: AxisCounters::from_axis(&modeline.horizontal())?,
            vertical: AxisCounters::from_axis(&modeline.vertical())?,
        })
    }

    fn write_to<M: Mmio>(&self, regs: &VideoRegs<M>) {
        let h = &self.horizontal;
        regs.write_videl(videl::HHT, h.total);
        regs.write_videl(videl::HDE, h.display_end);
        regs.write_videl(videl::HBE, h.blank_end);
        regs.write_videl(videl::HDB, h.display_begin);
        regs.write_videl(videl::HBB, h.blank_begin);
        regs.write_videl(videl::HSS, h.sync_start);

        let v = &self.vertical;
        regs.write_videl(videl::VFT, v.total);
        regs.write_videl(videl::VDE, v.display_end);
        regs.write_videl(videl::VBE, v.blank_end);
        regs.write_videl(videl::VDB, v.display_begin);
        regs.write_videl(videl::VBB, v.blank_begin);
        regs.write_videl(videl::VSS, v.sync_start);
    }
}

/// Applies a modeline: pixel clock first, then the VIDEL counters.
///
/// Clock and counters form one update. Changing either alone produces a
/// frame scanned with mismatched timing.
pub struct TimingRegisterWriter<'a, M> {
    regs: &'a VideoRegs<M>,
    clock: ClockProgrammer<'a, M>,
}

impl<'a, M: Mmio> TimingRegisterWriter<'a, M> {
    pub fn new(regs: &'a VideoRegs<M>) -> Self {
        Self::with_limit(regs, SpinLimit::Forever)
    }

    pub fn with_limit(regs: &'a VideoRegs<M>, limit: SpinLimit) -> Self {
        Self {
            regs,
            clock: ClockProgrammer::with_limit(regs, limit),
        }
    }

    /// Program the pixel clock and timing counters for `modeline`.
    ///
    /// The counters are derived before anything is written, so a modeline
    /// the VIDEL cannot represent leaves the hardware untouched.
    pub fn write_timing(&self, modeline: &Modeline) -> Result<VidelTiming, VideoError> {
        let timing = VidelTiming::from_modeline(modeline)?;

        self.clock.set_frequency(modeline.pixel_clock_mhz())?;
        timing.write_to(self.regs);

        debug!("videl timing {:?}", timing);
        Ok(timing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modeline::{ModeFlags, compute_modeline};
    use crate::regs::fbctl;
    use crate::testing::Rig;

    #[test]
    fn counters_for_vga_70hz() {
        let timing = VidelTiming::from_modeline(&compute_modeline(640, 480, 70, false)).unwrap();
        assert_eq!(
            timing.horizontal,
            AxisCounters {
                total: 816,
                display_end: 727,
                blank_end: 87,
                display_begin: 88,
                blank_begin: 728,
                sync_start: 752,
            }
        );
        assert_eq!(
            timing.vertical,
            AxisCounters {
                total: 500,
                display_end: 489,
                blank_end: 9,
                display_begin: 10,
                blank_begin: 490,
                sync_start: 497,
            }
        );
    }

    #[test]
    fn odd_blanking_truncates_margin() {
        let h = SyncTiming {
            display: 640,
            sync_start: 656,
            sync_end: 752,
            total: 801,
        };
        let v = SyncTiming {
            display: 480,
            sync_start: 490,
            sync_end: 492,
            total: 525,
        };
        let ml = Modeline::new(25, h, v, ModeFlags::empty()).unwrap();
        let timing = VidelTiming::from_modeline(&ml).unwrap();
        assert_eq!(timing.horizontal.display_begin, 80);
        assert_eq!(timing.vertical.display_begin, 22);
    }

    #[test]
    fn zero_margin_is_refused() {
        let h = SyncTiming {
            display: 640,
            sync_start: 640,
            sync_end: 641,
            total: 641,
        };
        let v = SyncTiming {
            display: 480,
            sync_start: 490,
            sync_end: 492,
            total: 525,
        };
        let ml = Modeline::new(25, h, v, ModeFlags::empty()).unwrap();

        let rig = Rig::new();
        let regs = rig.regs();
        assert_eq!(
            TimingRegisterWriter::new(&regs).write_timing(&ml),
            Err(VideoError::InvalidModeline)
        );
        assert!(rig.bus.trace().is_empty());
    }

    #[test]
    fn sync_wider_than_total_is_refused() {
        let axis = SyncTiming {
            display: 640,
            sync_start: 640,
            sync_end: 1840,
            total: 800,
        };
        assert_eq!(AxisCounters::from_axis(&axis), Err(VideoError::InvalidModeline));
    }

    #[test]
    fn clock_is_set_before_counters() {
        let rig = Rig::new();
        let regs = rig.regs();
        let ml = compute_modeline(800, 600, 60, false);

        let timing = TimingRegisterWriter::new(&regs).write_timing(&ml).unwrap();

        let writes = rig.bus.writes();
        let strobe = writes
            .iter()
            .position(|w| w.is_write_to(Rig::ctrl_addr(fbctl::PLL_RECONFIG)))
            .unwrap();
        let first_counter = writes
            .iter()
            .position(|w| w.is_write_to(Rig::videl_addr(videl::HHT)))
            .unwrap();
        assert!(strobe < first_counter);

        let counters: Vec<usize> = writes[first_counter..].iter().map(|w| w.addr).collect();
        let expected: Vec<usize> = [
            videl::HHT,
            videl::HDE,
            videl::HBE,
            videl::HDB,
            videl::HBB,
            videl::HSS,
            videl::VFT,
            videl::VDE,
            videl::VBE,
            videl::VDB,
            videl::VBB,
            videl::VSS,
        ]
        .iter()
        .map(|&off| Rig::videl_addr(off))
        .collect();
        assert_eq!(counters, expected);

        assert_eq!(regs.read_videl(videl::HHT) as u32, ml.horizontal().total);
        assert_eq!(regs.read_videl(videl::VSS), timing.vertical.sync_start);
    }
}
