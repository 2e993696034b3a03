//! Scatter series: each trade projected onto (time of day | duration, net P&L).
//!
//! Jitter is the only source of randomness in the crate and it only ever moves
//! the x coordinate. Pass [`NoJitter`] for reproducible output.

use crate::parsers::{parse_duration_minutes, parse_time_of_day};
use crate::report::ScatterPoint;
use core_types::TradeRecord;
use rand::Rng;
use rand::rngs::ThreadRng;

/// Supplies the horizontal offset added to each scatter point.
pub trait JitterSource {
    /// Returns an offset in `[-amplitude, amplitude]`.
    fn offset(&mut self, amplitude: f64) -> f64;
}

/// Leaves every point where it is.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoJitter;

impl JitterSource for NoJitter {
    fn offset(&mut self, _amplitude: f64) -> f64 {
        0.0
    }
}

/// Uniformly distributed jitter drawn from any `rand` generator.
#[derive(Debug, Clone)]
pub struct UniformJitter<R: Rng> {
    rng: R,
}

impl UniformJitter<ThreadRng> {
    pub fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }
}

impl Default for UniformJitter<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> UniformJitter<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> JitterSource for UniformJitter<R> {
    fn offset(&mut self, amplitude: f64) -> f64 {
        if !amplitude.is_finite() || amplitude <= 0.0 {
            return 0.0;
        }
        self.rng.gen_range(-amplitude..=amplitude)
    }
}

/// Entry time as a fractional hour against net P&L.
///
/// Trades without a parseable `entry_time` are dropped.
pub fn time_of_day_series<J: JitterSource + ?Sized>(
    trades: &[&TradeRecord],
    jitter: &mut J,
    amplitude_hours: f64,
) -> Vec<ScatterPoint> {
    trades
        .iter()
        .filter(|r| r.is_trade() && !r.entry_time.trim().is_empty())
        .filter_map(|trade| match parse_time_of_day(&trade.entry_time) {
            Ok(hour) => Some(ScatterPoint {
                x: hour + jitter.offset(amplitude_hours),
                y: trade.net_pl(),
            }),
            Err(e) => {
                tracing::debug!(id = %trade.id, "Trade dropped from time-of-day series: {}", e);
                None
            }
        })
        .collect()
}

/// Trade duration in minutes against net P&L. Jittered x values never go below zero.
///
/// Trades without a parseable `duration` (including open ones) are dropped.
pub fn duration_series<J: JitterSource + ?Sized>(
    trades: &[&TradeRecord],
    jitter: &mut J,
    amplitude_minutes: f64,
) -> Vec<ScatterPoint> {
    trades
        .iter()
        .filter(|r| r.is_trade() && !r.duration.trim().is_empty())
        .filter_map(|trade| match parse_duration_minutes(&trade.duration) {
            Ok(minutes) => Some(ScatterPoint {
                x: (minutes + jitter.offset(amplitude_minutes)).max(0.0),
                y: trade.net_pl(),
            }),
            Err(e) => {
                tracing::debug!(id = %trade.id, "Trade dropped from duration series: {}", e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rust_decimal_macros::dec;

    fn trade(entry_time: &str, duration: &str) -> TradeRecord {
        TradeRecord {
            entry_time: entry_time.to_string(),
            duration: duration.to_string(),
            gain_loss: dec!(120),
            fees: dec!(2),
            ..TradeRecord::default()
        }
    }

    /// Always pushes points left by the full amplitude.
    struct MaxLeft;

    impl JitterSource for MaxLeft {
        fn offset(&mut self, amplitude: f64) -> f64 {
            -amplitude
        }
    }

    #[test]
    fn time_points_without_jitter() {
        let records = vec![trade("2:30:00 PM", ""), trade("09:15:00", ""), trade("", ""), trade("lunch", "")];
        let refs: Vec<&TradeRecord> = records.iter().collect();
        let points = time_of_day_series(&refs, &mut NoJitter, 0.15);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0], ScatterPoint { x: 14.5, y: dec!(118) });
        assert_eq!(points[1].x, 9.25);
    }

    #[test]
    fn duration_points_without_jitter() {
        let records = vec![trade("", "1:15:30"), trade("", ""), trade("", "1:75:00")];
        let refs: Vec<&TradeRecord> = records.iter().collect();
        let points = duration_series(&refs, &mut NoJitter, 0.5);
        assert_eq!(points.len(), 1);
        assert!((points[0].x - 75.5).abs() < 1e-9);
        assert_eq!(points[0].y, dec!(118));
    }

    #[test]
    fn duration_is_clamped_at_zero() {
        let records = vec![trade("", "0:00:10")];
        let refs: Vec<&TradeRecord> = records.iter().collect();
        let points = duration_series(&refs, &mut MaxLeft, 5.0);
        assert_eq!(points[0].x, 0.0);
    }

    #[test]
    fn seeded_jitter_stays_within_amplitude() {
        let mut jitter = UniformJitter::with_rng(StdRng::seed_from_u64(7));
        let records: Vec<TradeRecord> = (0..200).map(|_| trade("12:00:00", "")).collect();
        let refs: Vec<&TradeRecord> = records.iter().collect();
        let points = time_of_day_series(&refs, &mut jitter, 0.15);
        assert_eq!(points.len(), 200);
        assert!(points.iter().all(|p| (p.x - 12.0).abs() <= 0.15));
        // Jitter never touches the P&L axis.
        assert!(points.iter().all(|p| p.y == dec!(118)));
    }

    #[test]
    fn zero_amplitude_means_no_offset() {
        let mut jitter = UniformJitter::with_rng(StdRng::seed_from_u64(1));
        assert_eq!(jitter.offset(0.0), 0.0);
        assert_eq!(jitter.offset(f64::NAN), 0.0);
    }

    #[test]
    fn infinite_amplitude_means_no_offset() {
        let mut jitter = UniformJitter::with_rng(StdRng::seed_from_u64(1));
        assert_eq!(jitter.offset(f64::INFINITY), 0.0);
    }
}
