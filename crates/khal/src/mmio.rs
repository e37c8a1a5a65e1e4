//! Memory-mapped register access.
//!
//! Drivers never dereference fixed device addresses themselves. They are
//! handed an [`Mmio`] capability covering one register block and address
//! registers by offset within it. On hardware the capability is an
//! [`IoMem`] window; under test it is a [`crate::sim::SimWindow`] that
//! records every access.

use core::mem;
use core::ptr;

/// Width of a single register transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    Byte,
    Half,
    Word,
}

impl Width {
    /// Mask selecting the bits a transfer of this width can carry.
    #[inline]
    pub const fn mask(self) -> u32 {
        match self {
            Width::Byte => 0xFF,
            Width::Half => 0xFFFF,
            Width::Word => 0xFFFF_FFFF,
        }
    }
}

/// A block of device registers addressed by byte offset.
///
/// Every read observes live device state and every write takes effect
/// immediately; implementations must not cache or reorder accesses.
pub trait Mmio {
    fn read_u8(&self, offset: usize) -> u8;
    fn read_u16(&self, offset: usize) -> u16;
    fn read_u32(&self, offset: usize) -> u32;
    fn write_u8(&self, offset: usize, value: u8);
    fn write_u16(&self, offset: usize, value: u16);
    fn write_u32(&self, offset: usize, value: u32);

    /// Signed view of a 16-bit status register.
    #[inline]
    fn read_i16(&self, offset: usize) -> i16 {
        self.read_u16(offset) as i16
    }

    /// Read-modify-write of a 32-bit register.
    ///
    /// This is a plain read followed by a plain write. Another bus master
    /// writing the same register in between is lost, so callers must own
    /// the block exclusively for the duration.
    #[inline]
    fn modify_u32<F: FnOnce(u32) -> u32>(&self, offset: usize, f: F) {
        let value = self.read_u32(offset);
        self.write_u32(offset, f(value));
    }
}

impl<T: Mmio + ?Sized> Mmio for &T {
    #[inline]
    fn read_u8(&self, offset: usize) -> u8 {
        (**self).read_u8(offset)
    }

    #[inline]
    fn read_u16(&self, offset: usize) -> u16 {
        (**self).read_u16(offset)
    }

    #[inline]
    fn read_u32(&self, offset: usize) -> u32 {
        (**self).read_u32(offset)
    }

    #[inline]
    fn write_u8(&self, offset: usize, value: u8) {
        (**self).write_u8(offset, value)
    }

    #[inline]
    fn write_u16(&self, offset: usize, value: u16) {
        (**self).write_u16(offset, value)
    }

    #[inline]
    fn write_u32(&self, offset: usize, value: u32) {
        (**self).write_u32(offset, value)
    }
}

/// A volatile window over a physical register block.
#[derive(Debug, Clone, Copy)]
pub struct IoMem {
    base: usize,
    size: usize,
}

impl IoMem {
    /// Create a window of `size` bytes starting at `base`.
    ///
    /// # Safety
    ///
    /// `base..base + size` must be mapped device memory that stays valid
    /// for the lifetime of the window, and nothing else may treat it as
    /// ordinary memory.
    #[inline]
    pub const unsafe fn new(base: usize, size: usize) -> Self {
        Self { base, size }
    }

    /// First address covered by the window.
    #[inline]
    pub const fn base(&self) -> usize {
        self.base
    }

    /// Size of the window in bytes.
    #[inline]
    pub const fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn read<T: Copy>(&self, offset: usize) -> T {
        assert!(offset + mem::size_of::<T>() <= self.size);
        assert!(offset % mem::align_of::<T>() == 0);
        // SAFETY: in bounds and aligned; validity of the block is the
        // contract of `IoMem::new`.
        unsafe { ptr::read_volatile((self.base + offset) as *const T) }
    }

    #[inline]
    fn write<T: Copy>(&self, offset: usize, value: T) {
        assert!(offset + mem::size_of::<T>() <= self.size);
        assert!(offset % mem::align_of::<T>() == 0);
        // SAFETY: as for `read`.
        unsafe { ptr::write_volatile((self.base + offset) as *mut T, value) }
    }
}

impl Mmio for IoMem {
    #[inline]
    fn read_u8(&self, offset: usize) -> u8 {
        self.read(offset)
    }

    #[inline]
    fn read_u16(&self, offset: usize) -> u16 {
        self.read(offset)
    }

    #[inline]
    fn read_u32(&self, offset: usize) -> u32 {
        self.read(offset)
    }

    #[inline]
    fn write_u8(&self, offset: usize, value: u8) {
        self.write(offset, value)
    }

    #[inline]
    fn write_u16(&self, offset: usize, value: u16) {
        self.write(offset, value)
    }

    #[inline]
    fn write_u32(&self, offset: usize, value: u32) {
        self.write(offset, value)
    }
}
