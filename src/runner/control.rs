use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub const MIN_SPEED: u32 = 1;
pub const MAX_SPEED: u32 = 10;
pub const DEFAULT_SPEED: u32 = 5;

/// Run flag plus the live speed setting. Clones share the same flag, so a
/// stop requested from any handle is seen by the pacer before its next step.
#[derive(Clone, Debug)]
pub struct RunControl {
    running: Arc<AtomicBool>,
    speed: Arc<AtomicU32>,
}

impl RunControl {
    pub fn new(speed: u32) -> Self {
        RunControl {
            running: Arc::new(AtomicBool::new(false)),
            speed: Arc::new(AtomicU32::new(clamp_speed(speed))),
        }
    }

    pub fn try_start(&self) -> bool {
        self.running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub fn request_stop(&self) {
        self.running.store(false, Ordering::Release);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    pub fn finish(&self) {
        self.running.store(false, Ordering::Release);
    }

    pub fn set_speed(&self, speed: u32) -> u32 {
        let speed = clamp_speed(speed);
        self.speed.store(speed, Ordering::Relaxed);
        speed
    }

    pub fn speed(&self) -> u32 {
        self.speed.load(Ordering::Relaxed)
    }

    pub fn delay(&self) -> Duration {
        delay_for_speed(self.speed())
    }
}

impl Default for RunControl {
    fn default() -> Self {
        RunControl::new(DEFAULT_SPEED)
    }
}

pub fn clamp_speed(speed: u32) -> u32 {
    speed.clamp(MIN_SPEED, MAX_SPEED)
}

pub fn delay_for_speed(speed: u32) -> Duration {
    Duration::from_millis(1000 / u64::from(clamp_speed(speed)))
}
