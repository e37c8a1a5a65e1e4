//! Recording register simulator.
//!
//! A [`SimBus`] stands in for the physical address space. Windows taken from
//! it implement [`Mmio`] and share one trace, so the relative order of
//! accesses to different register blocks is preserved. Reads return scripted
//! values first (to model status registers that change on their own) and
//! otherwise the last value written to the address.

use alloc::collections::{BTreeMap, VecDeque};
use alloc::vec::Vec;
use spin::Mutex;

use crate::mmio::{Mmio, Width};

/// Direction of a recorded access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Read,
    Write,
}

/// One recorded register access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Access {
    pub addr: usize,
    pub width: Width,
    pub value: u32,
    pub direction: Direction,
}

impl Access {
    #[inline]
    pub fn is_write(&self) -> bool {
        self.direction == Direction::Write
    }

    /// `true` for a write to `addr`.
    #[inline]
    pub fn is_write_to(&self, addr: usize) -> bool {
        self.is_write() && self.addr == addr
    }
}

#[derive(Default)]
struct SimState {
    trace: Vec<Access>,
    cells: BTreeMap<usize, u32>,
    scripted: BTreeMap<usize, VecDeque<u32>>,
}

/// Simulated physical address space.
#[derive(Default)]
pub struct SimBus {
    state: Mutex<SimState>,
}

impl SimBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// A register window of `size` bytes at `base`.
    pub fn window(&self, base: usize, size: usize) -> SimWindow<'_> {
        SimWindow {
            bus: self,
            base,
            size,
        }
    }

    /// Set the value at `addr` without recording an access.
    pub fn preset(&self, addr: usize, value: u32) {
        self.state.lock().cells.insert(addr, value);
    }

    /// Queue values returned by the next reads of `addr`, oldest first.
    pub fn script_reads(&self, addr: usize, values: &[u32]) {
        self.state
            .lock()
            .scripted
            .entry(addr)
            .or_default()
            .extend(values.iter().copied());
    }

    /// Current value at `addr`, without recording an access.
    pub fn peek(&self, addr: usize) -> u32 {
        self.state.lock().cells.get(&addr).copied().unwrap_or(0)
    }

    /// Every access since creation or the last [`SimBus::clear_trace`].
    pub fn trace(&self) -> Vec<Access> {
        self.state.lock().trace.clone()
    }

    /// Only the writes from [`SimBus::trace`].
    pub fn writes(&self) -> Vec<Access> {
        self.state
            .lock()
            .trace
            .iter()
            .filter(|a| a.is_write())
            .copied()
            .collect()
    }

    pub fn clear_trace(&self) {
        self.state.lock().trace.clear();
    }

    fn read(&self, addr: usize, width: Width) -> u32 {
        let mut state = self.state.lock();
        let scripted = state.scripted.get_mut(&addr).and_then(VecDeque::pop_front);
        let stored = match scripted {
            Some(value) => value,
            None => state.cells.get(&addr).copied().unwrap_or(0),
        };
        let value = stored & width.mask();
        state.trace.push(Access {
            addr,
            width,
            value,
            direction: Direction::Read,
        });
        value
    }

    fn write(&self, addr: usize, width: Width, value: u32) {
        let mut state = self.state.lock();
        state.cells.insert(addr, value);
        state.trace.push(Access {
            addr,
            width,
            value,
            direction: Direction::Write,
        });
    }
}

/// A window into a [`SimBus`], usable wherever an [`Mmio`] block is.
#[derive(Clone, Copy)]
pub struct SimWindow<'a> {
    bus: &'a SimBus,
    base: usize,
    size: usize,
}

impl SimWindow<'_> {
    #[inline]
    fn addr(&self, offset: usize, width: Width) -> usize {
        let len = match width {
            Width::Byte => 1,
            Width::Half => 2,
            Width::Word => 4,
        };
        assert!(offset + len <= self.size, "offset {:#x} outside window", offset);
        self.base + offset
    }
}

impl Mmio for SimWindow<'_> {
    fn read_u8(&self, offset: usize) -> u8 {
        self.bus.read(self.addr(offset, Width::Byte), Width::Byte) as u8
    }

    fn read_u16(&self, offset: usize) -> u16 {
        self.bus.read(self.addr(offset, Width::Half), Width::Half) as u16
    }

    fn read_u32(&self, offset: usize) -> u32 {
        self.bus.read(self.addr(offset, Width::Word), Width::Word)
    }

    fn write_u8(&self, offset: usize, value: u8) {
        self.bus
            .write(self.addr(offset, Width::Byte), Width::Byte, value.into())
    }

    fn write_u16(&self, offset: usize, value: u16) {
        self.bus
            .write(self.addr(offset, Width::Half), Width::Half, value.into())
    }

    fn write_u32(&self, offset: usize, value: u32) {
        self.bus.write(self.addr(offset, Width::Word), Width::Word, value)
    }
}
