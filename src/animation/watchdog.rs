// src/animation/watchdog.rs
//! One-shot deadline that forces the animation to stop.

use log::info;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use crate::platform::TimerQueue;

/// Shared stop flag. The watchdog is the only writer; the driver reads it once per tick.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Rc<Cell<bool>>);

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the flag. Returns true if this call flipped it.
    pub fn cancel(&self) -> bool {
        !self.0.replace(true)
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// Bounds total run time regardless of how many frames were produced.
pub struct Watchdog {
    flag: CancellationFlag,
}

impl Watchdog {
    pub fn new(flag: CancellationFlag) -> Self {
        Self { flag }
    }

    /// Start the timer. On expiry the flag is set exactly once.
    ///
    /// Consumes the watchdog: an armed timer cannot be disarmed.
    pub fn arm(self, timers: &mut dyn TimerQueue, duration: Duration) {
        info!("Watchdog: armed for {:?}", duration);
        let flag = self.flag;
        timers.set_timeout(
            duration,
            Box::new(move || {
                if flag.cancel() {
                    info!("Watchdog: deadline reached, cancelling animation");
                }
            }),
        );
    }
}
