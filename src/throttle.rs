use rand::Rng;
use std::ops::RangeInclusive;
use std::thread;
use std::time::Duration;

/// Fixed random delay between consecutive requests to one host, to stay
/// under server-side rate limits. Uniform within the configured bounds;
/// tests use [`Throttle::none`] to keep runs instant.
#[derive(Debug, Clone)]
pub struct Throttle {
    secs: RangeInclusive<f64>,
}

impl Throttle {
    /// The production setting: 1–5 seconds.
    pub fn polite() -> Self {
        Self { secs: 1.0..=5.0 }
    }

    pub fn none() -> Self {
        Self { secs: 0.0..=0.0 }
    }

    pub fn sample(&self) -> Duration {
        let secs = rand::rng().random_range(self.secs.clone());
        Duration::from_secs_f64(secs)
    }

    pub fn pause(&self) {
        let delay = self.sample();
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polite_delay_stays_within_bounds() {
        let throttle = Throttle::polite();
        for _ in 0..100 {
            let d = throttle.sample();
            assert!(d >= Duration::from_secs(1));
            assert!(d <= Duration::from_secs(5));
        }
    }

    #[test]
    fn none_never_delays() {
        assert_eq!(Throttle::none().sample(), Duration::ZERO);
    }
}
