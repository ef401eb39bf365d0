use crate::error::ChartError;
use crate::MAX_X_TICKS;
use std::fmt;
use std::str::FromStr;

/// Spacing between two consecutive x ticks, always finite and > 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickStep(f64);

impl TickStep {
    pub fn new(step: f64) -> Result<TickStep, ChartError> {
        if step.is_finite() && step > 0. {
            Ok(TickStep(step))
        } else {
            Err(ChartError::InvalidTickStep(step.to_string()))
        }
    }

    pub fn get(&self) -> f64 {
        self.0
    }
}

impl FromStr for TickStep {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse::<f64>() {
            Ok(step) => TickStep::new(step),
            Err(_) => Err(ChartError::InvalidTickStep(s.to_string())),
        }
    }
}

impl fmt::Display for TickStep {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ticks at 0, step, 2 * step, ... up to the first multiple of step >= max.
/// Multiples are computed from the index to avoid accumulating rounding errors,
/// and a small tolerance keeps max itself as the last tick when it is a multiple.
pub fn x_ticks(step: TickStep, max: f64) -> Result<Vec<f64>, ChartError> {
    let s = step.get();
    let n = if max > 0. { (max / s - 1e-9).ceil() } else { 0. };
    if n + 1. > MAX_X_TICKS as f64 {
        return Err(ChartError::TooManyTicks {
            step: s,
            max,
            limit: MAX_X_TICKS,
        });
    }
    let ticks = (0..=n as usize).map(|k| k as f64 * s).collect();
    Ok(ticks)
}

/// Smallest and largest element, None for an empty iterator.
pub fn min_and_max<'a, I, T>(mut s: I) -> Option<(T, T)>
where
    I: Iterator<Item = &'a T>,
    T: 'a + std::cmp::PartialOrd + Clone,
{
    let (mut min, mut max) = match s.next() {
        Some(v) => (v, v),
        None => return None,
    };
    for es in s {
        if es > max {
            max = es
        } else if es < min {
            min = es
        }
    }
    Some((min.clone(), max.clone()))
}

/// Widen a positive range by a constant fraction of its decades,
/// so that the extreme values do not sit on the frame of a log axis.
/// A single value is given one decade on each side.
pub fn pad_log_range(min: f64, max: f64) -> (f64, f64) {
    if min >= max {
        return (min / 10., max * 10.);
    }
    let pad = (max / min).powf(0.05);
    (min / pad, max * pad)
}
