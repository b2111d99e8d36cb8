use std::time::{Duration, Instant};

/// Delay applied after every processed line
pub trait Pacer {
    fn pace(&mut self, interval: Duration);
}

/// Blocks the calling thread for the whole interval
#[derive(Debug, Default, Clone, Copy)]
pub struct SleepPacer;

impl Pacer for SleepPacer {
    fn pace(&mut self, interval: Duration) {
        if !interval.is_zero() {
            std::thread::sleep(interval);
        }
    }
}

/// Keeps consecutive ticks at least `interval` apart.
///
/// Time already spent waiting on the source counts towards the interval, so
/// a live port that blocked for its full timeout is not delayed again.
#[derive(Debug, Default, Clone, Copy)]
pub struct IntervalPacer {
    last_tick: Option<Instant>,
}

impl IntervalPacer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Pacer for IntervalPacer {
    fn pace(&mut self, interval: Duration) {
        if let Some(last_tick) = self.last_tick {
            let elapsed = last_tick.elapsed();
            if elapsed < interval {
                std::thread::sleep(interval - elapsed);
            }
        }
        self.last_tick = Some(Instant::now());
    }
}
