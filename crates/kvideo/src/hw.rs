//! The FireBee's video registers.
//!
//! The register handle is process-wide: it is built once when the
//! privileged entry point first asks for it and shared by reference from
//! then on.

use khal::IoMem;
use spin::Once;

use crate::regs::VideoRegs;

/// Physical base of the FireBee control block.
pub const FBCTL_BASE: usize = 0xF000_0000;
/// Bytes covered by the control block window.
pub const FBCTL_SIZE: usize = 0x1000;

/// Physical base of the VIDEL register block.
pub const VIDEL_BASE: usize = 0xFFFF_8200;
/// Bytes covered by the VIDEL window.
pub const VIDEL_SIZE: usize = 0x100;

static REGS: Once<VideoRegs<IoMem>> = Once::new();

/// Get the hardware register handle, building it on first use.
///
/// # Safety
///
/// Must be called in supervisor mode with both register blocks accessible
/// at their physical addresses, and nothing else may drive the video
/// registers while a mode sequence runs.
pub unsafe fn init() -> &'static VideoRegs<IoMem> {
    REGS.call_once(|| {
        // SAFETY: the caller guarantees the blocks are mapped device memory.
        unsafe {
            VideoRegs::new(
                IoMem::new(FBCTL_BASE, FBCTL_SIZE),
                IoMem::new(VIDEL_BASE, VIDEL_SIZE),
            )
        }
    })
}

/// The handle, if [`init`] has run.
pub fn get() -> Option<&'static VideoRegs<IoMem>> {
    REGS.get()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_is_built_once() {
        // Building the handle does not access the registers.
        let first = unsafe { init() };
        let second = unsafe { init() };
        assert!(core::ptr::eq(first, second));
        assert!(get().is_some_and(|regs| core::ptr::eq(regs, first)));
    }
}
