//! Busy waits on device status.
//!
//! The privileged context these run in has interrupts masked and nothing to
//! yield to, so waiting is a tight spin on a status read.

/// How long a status poll may spin before giving up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpinLimit {
    /// Spin until the device reports ready, however long that takes.
    #[default]
    Forever,
    /// Give up after this many unsuccessful polls.
    Bounded(u32),
}

/// A bounded wait that ran out of polls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimedOut {
    pub spins: u32,
}

/// Poll `ready` until it returns `true`.
///
/// Returns the number of unsuccessful polls before the device became ready.
/// With [`SpinLimit::Forever`] this only returns once `ready` does.
pub fn spin_until<F: FnMut() -> bool>(mut ready: F, limit: SpinLimit) -> Result<u32, TimedOut> {
    let mut spins: u32 = 0;
    while !ready() {
        if let SpinLimit::Bounded(max) = limit {
            if spins >= max {
                return Err(TimedOut { spins });
            }
        }
        spins = spins.saturating_add(1);
        core::hint::spin_loop();
    }
    Ok(spins)
}
