//! Hardware Abstraction Layer.
#![cfg_attr(not(test), no_std)]

#[cfg(any(test, feature = "sim"))]
extern crate alloc;

pub mod mmio;
#[cfg(any(test, feature = "sim"))]
pub mod sim;
pub mod wait;

pub use mmio::{IoMem, Mmio, Width};
pub use wait::{SpinLimit, TimedOut, spin_until};
