//! Simulated controller for unit tests.

use khal::sim::{SimBus, SimWindow};
use log::LevelFilter;

use crate::hw;
use crate::regs::VideoRegs;

struct Discard;

impl klog::Sink for Discard {
    fn write_str(&self, _: &str) {}
}

static DISCARD: Discard = Discard;

pub struct Rig {
    pub bus: SimBus,
}

impl Rig {
    pub fn new() -> Self {
        // Route every log line through formatting; first caller installs.
        klog::init(&DISCARD, LevelFilter::Trace);
        Self { bus: SimBus::new() }
    }

    pub fn regs(&self) -> VideoRegs<SimWindow<'_>> {
        VideoRegs::new(
            self.bus.window(hw::FBCTL_BASE, hw::FBCTL_SIZE),
            self.bus.window(hw::VIDEL_BASE, hw::VIDEL_SIZE),
        )
    }

    pub fn ctrl_addr(offset: usize) -> usize {
        hw::FBCTL_BASE + offset
    }

    pub fn videl_addr(offset: usize) -> usize {
        hw::VIDEL_BASE + offset
    }
}
