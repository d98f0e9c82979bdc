use crate::error::AcquireError;
use rand::Rng;
use std::time::Duration;

/// Randomized delay between searches.
#[derive(Debug, Clone, Copy)]
pub struct Pacer {
    min: Duration,
    max: Duration,
}

impl Pacer {
    pub fn new(min: Duration, max: Duration) -> Result<Self, AcquireError> {
        if min > max {
            return Err(AcquireError::Config(format!(
                "pause range is inverted ({min:?} > {max:?})"
            )));
        }
        Ok(Self { min, max })
    }

    pub fn bounds(&self) -> (Duration, Duration) {
        (self.min, self.max)
    }

    /// Draw a delay uniformly from `[min, max]` at millisecond resolution.
    pub fn next_delay(&self) -> Duration {
        let lo = self.min.as_millis() as u64;
        let hi = self.max.as_millis() as u64;
        let ms = rand::rng().random_range(lo..=hi);
        Duration::from_millis(ms).clamp(self.min, self.max)
    }

    /// Sleep for a freshly drawn delay and return it.
    pub async fn pause(&self) -> Duration {
        let delay = self.next_delay();
        tracing::debug!(delay_ms = delay.as_millis() as u64, "Pacing pause");
        tokio::time::sleep(delay).await;
        delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delays_stay_within_bounds() {
        let pacer = Pacer::new(Duration::from_millis(1000), Duration::from_millis(3000)).unwrap();
        for _ in 0..500 {
            let d = pacer.next_delay();
            assert!(d >= Duration::from_millis(1000) && d <= Duration::from_millis(3000));
        }
    }

    #[test]
    fn test_fixed_delay() {
        let pacer = Pacer::new(Duration::from_millis(250), Duration::from_millis(250)).unwrap();
        assert_eq!(pacer.next_delay(), Duration::from_millis(250));
    }

    #[test]
    fn test_sub_millisecond_bounds_are_respected() {
        let min = Duration::from_micros(1500);
        let max = Duration::from_micros(1800);
        let pacer = Pacer::new(min, max).unwrap();
        for _ in 0..50 {
            let d = pacer.next_delay();
            assert!(d >= min && d <= max);
        }
    }

    #[test]
    fn test_rejects_inverted_range() {
        assert!(Pacer::new(Duration::from_secs(2), Duration::from_secs(1)).is_err());
    }

    #[tokio::test]
    async fn test_pause_sleeps_for_drawn_delay() {
        let pacer = Pacer::new(Duration::from_millis(5), Duration::from_millis(20)).unwrap();
        let start = tokio::time::Instant::now();
        let delay = pacer.pause().await;
        assert!(start.elapsed() >= delay);
        assert!(delay >= Duration::from_millis(5) && delay <= Duration::from_millis(20));
    }
}
