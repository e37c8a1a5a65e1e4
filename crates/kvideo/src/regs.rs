//! FireBee video register map.
//!
//! The controller is reached through two register blocks:
//!
//! | Block                | Contents                                        |
//! |----------------------|-------------------------------------------------|
//! | FireBee control      | video control word, PLL frequency, PLL reconfig |
//! | VIDEL (Falcon video) | screen base, shift modes, H/V timing counters   |
//!
//! Both are live hardware with no software shadow: every read below goes to
//! the device and every write takes effect immediately. Register fields are
//! named bit ranges; updating one field is a read-modify-write of the whole
//! register and is not atomic.

use bitflags::bitflags;
use khal::Mmio;
use log::trace;

use crate::error::VideoError;
use crate::modeline::{ModeFlags, Modeline};
use crate::request::{ColorDepth, FramebufferAddr};

/// Offsets into the FireBee control block.
pub mod fbctl {
    /// Video control word (32 bit).
    pub const CONTROL: usize = 0x400;
    /// PLL output frequency in MHz, minus one (16 bit).
    pub const PLL_FREQUENCY: usize = 0x604;
    /// PLL status on read (negative while reconfiguring), reconfigure strobe
    /// on write (16 bit).
    pub const PLL_RECONFIG: usize = 0x800;
}

/// Offsets into the VIDEL block.
pub mod videl {
    /// Screen base bits 25:16 (16 bit, 10 bits used).
    pub const VBASX: usize = 0x00;
    /// Screen base bits 15:8 (8 bit).
    pub const VBASM: usize = 0x03;
    /// Screen base bits 7:0 (8 bit).
    pub const VBASL: usize = 0x0D;
    /// ST shift mode (8 bit).
    pub const STSFT: usize = 0x60;
    /// Falcon shift mode (16 bit).
    pub const SPSHIFT: usize = 0x66;

    // Horizontal counters (16 bit).
    pub const HHT: usize = 0x82;
    pub const HBB: usize = 0x84;
    pub const HBE: usize = 0x86;
    pub const HDB: usize = 0x88;
    pub const HDE: usize = 0x8A;
    pub const HSS: usize = 0x8C;

    // Vertical counters (16 bit).
    pub const VFT: usize = 0xA2;
    pub const VBB: usize = 0xA4;
    pub const VBE: usize = 0xA6;
    pub const VDB: usize = 0xA8;
    pub const VDE: usize = 0xAA;
    pub const VSS: usize = 0xAC;
}

/// A bit range within a register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub shift: u32,
    pub width: u32,
}

impl Field {
    pub const fn new(shift: u32, width: u32) -> Self {
        Self { shift, width }
    }

    /// In-place mask of the field.
    #[inline]
    pub const fn mask(self) -> u32 {
        ((1 << self.width) - 1) << self.shift
    }

    /// Extract the field from `reg`.
    #[inline]
    pub const fn get(self, reg: u32) -> u32 {
        (reg & self.mask()) >> self.shift
    }

    /// Replace the field in `reg` with `value`, leaving other bits alone.
    /// Bits of `value` wider than the field are dropped.
    #[inline]
    pub const fn insert(self, reg: u32, value: u32) -> u32 {
        (reg & !self.mask()) | ((value << self.shift) & self.mask())
    }
}

/// Clock source selector in the control word.
pub const CLOCK_MODE: Field = Field::new(8, 2);

/// Screen base address as split across VBASX / VBASM / VBASL.
pub const BASE_HIGH: Field = Field::new(16, 10);
pub const BASE_MID: Field = Field::new(8, 8);
pub const BASE_LOW: Field = Field::new(0, 8);

bitflags! {
    /// Flag bits of the FireBee video control word.
    ///
    /// The depth selectors are meant to be mutually exclusive but the
    /// hardware does not enforce it; setting one must clear the others.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Control: u32 {
        const VIDEO_ON          = 1 << 0;
        const COLOR1            = 1 << 2;
        const COLOR8            = 1 << 3;
        const COLOR16           = 1 << 4;
        const COLOR24           = 1 << 5;
        const ST_SHIFT_MODE     = 1 << 6;
        const FALCON_SHIFT_MODE = 1 << 7;
        const NEG_SYNC_ALLOWED  = 1 << 15;
        const VIDEO_DAC_ON      = 1 << 24;
    }
}

impl Control {
    /// All colour-depth selectors.
    pub const DEPTH: Self = Self::COLOR1
        .union(Self::COLOR8)
        .union(Self::COLOR16)
        .union(Self::COLOR24);

    /// Legacy shift-mode enables.
    pub const SHIFT_MODES: Self = Self::ST_SHIFT_MODE.union(Self::FALCON_SHIFT_MODE);

    /// Output enables.
    pub const OUTPUT: Self = Self::VIDEO_ON.union(Self::VIDEO_DAC_ON);

    /// Depth selector for `depth`.
    pub const fn for_depth(depth: ColorDepth) -> Self {
        match depth {
            ColorDepth::Mono => Self::COLOR1,
            ColorDepth::Indexed8 => Self::COLOR8,
            ColorDepth::HiColor16 => Self::COLOR16,
            ColorDepth::TrueColor24 => Self::COLOR24,
        }
    }

    /// Depth selector plus the sync polarity bit `modeline` needs.
    pub fn for_mode(depth: ColorDepth, modeline: &Modeline) -> Self {
        let mut bits = Self::for_depth(depth);
        if modeline
            .flags()
            .intersects(ModeFlags::HSYNC_NEGATIVE | ModeFlags::VSYNC_NEGATIVE)
        {
            bits |= Self::NEG_SYNC_ALLOWED;
        }
        bits
    }
}

/// Pixel clock source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ClockMode {
    /// First fixed on-board oscillator.
    FixedA = 0,
    /// Second fixed on-board oscillator.
    FixedB = 1,
    /// External clock input.
    External = 2,
    /// Programmable PLL, the only source with an arbitrary frequency.
    Pll = 3,
}

impl ClockMode {
    /// Decode the two-bit selector field.
    pub const fn from_field(bits: u32) -> Self {
        match bits & 0b11 {
            0 => ClockMode::FixedA,
            1 => ClockMode::FixedB,
            2 => ClockMode::External,
            _ => ClockMode::Pll,
        }
    }
}

impl TryFrom<u8> for ClockMode {
    type Error = VideoError;

    fn try_from(selector: u8) -> Result<Self, Self::Error> {
        match selector {
            0..=3 => Ok(Self::from_field(selector.into())),
            other => Err(VideoError::InvalidClockMode(other)),
        }
    }
}

/// Handle on the controller's registers.
///
/// Constructed once for the hardware (see [`crate::hw`]) and passed by
/// reference to every stage of the mode sequence. Any [`Mmio`] pair works,
/// which is how tests substitute a simulated register set.
pub struct VideoRegs<M> {
    ctrl: M,
    videl: M,
}

impl<M: Mmio> VideoRegs<M> {
    pub const fn new(ctrl: M, videl: M) -> Self {
        Self { ctrl, videl }
    }

    /// Current control word.
    pub fn control(&self) -> Control {
        Control::from_bits_retain(self.ctrl.read_u32(fbctl::CONTROL))
    }

    /// Currently selected clock source.
    pub fn clock_mode(&self) -> ClockMode {
        ClockMode::from_field(CLOCK_MODE.get(self.ctrl.read_u32(fbctl::CONTROL)))
    }

    /// Read-modify-write of the control word.
    pub(crate) fn modify_control<F: FnOnce(u32) -> u32>(&self, f: F) {
        self.ctrl.modify_u32(fbctl::CONTROL, |old| {
            let new = f(old);
            trace!("control {:#010x} -> {:#010x}", old, new);
            new
        });
    }

    /// `true` while the PLL is reconfiguring.
    pub fn pll_busy(&self) -> bool {
        self.ctrl.read_i16(fbctl::PLL_RECONFIG) < 0
    }

    pub(crate) fn write_pll_frequency(&self, encoded: u16) {
        trace!("pll frequency <- {}", encoded);
        self.ctrl.write_u16(fbctl::PLL_FREQUENCY, encoded);
    }

    /// Latch the programmed frequency into the PLL.
    pub(crate) fn strobe_pll_reconfig(&self) {
        trace!("pll reconfigure");
        self.ctrl.write_u16(fbctl::PLL_RECONFIG, 0);
    }

    pub(crate) fn write_base_address(&self, framebuffer: FramebufferAddr) {
        let addr = framebuffer.get();
        trace!("screen base <- {:#010x}", addr);
        self.videl.write_u16(videl::VBASX, BASE_HIGH.get(addr) as u16);
        self.videl.write_u8(videl::VBASM, BASE_MID.get(addr) as u8);
        self.videl.write_u8(videl::VBASL, BASE_LOW.get(addr) as u8);
    }

    /// Screen base as currently programmed.
    pub fn base_address(&self) -> u32 {
        let high = self.videl.read_u16(videl::VBASX) as u32;
        let mid = self.videl.read_u8(videl::VBASM) as u32;
        let low = self.videl.read_u8(videl::VBASL) as u32;
        BASE_LOW.insert(BASE_MID.insert(BASE_HIGH.insert(0, high), mid), low)
    }

    /// Zero the ST then the Falcon shift-mode register.
    pub(crate) fn clear_shift_modes(&self) {
        trace!("shift modes <- 0");
        self.videl.write_u8(videl::STSFT, 0);
        self.videl.write_u16(videl::SPSHIFT, 0);
    }

    pub(crate) fn write_videl(&self, offset: usize, value: u16) {
        trace!("videl[{:#04x}] <- {}", offset, value);
        self.videl.write_u16(offset, value);
    }

    /// A 16-bit VIDEL register, for callers inspecting the live mode.
    pub fn read_videl(&self, offset: usize) -> u16 {
        self.videl.read_u16(offset)
    }
}
