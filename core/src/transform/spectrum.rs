use crate::prelude::DataPoint;
use std::f64::consts::PI;

/// Fixed sample count of the spectrum display curve.
pub const SPECTRUM_STEPS: usize = 1000;

/// Closed-form sinusoidal display curve over the given period range.
///
/// This is a placeholder spectrum, not a frequency-domain transform; the
/// formula is contractual and must stay in data parity with the original
/// classroom tool. Returns `None` when `start > stop` so the caller keeps
/// the previously computed series.
pub fn spectrum(start: f64, stop: f64, step_count: usize) -> Option<Vec<DataPoint>> {
    if start > stop {
        return None;
    }

    let steps = step_count as f64;
    let mut data = Vec::with_capacity(step_count);
    for i in 0..step_count {
        let i = i as f64;
        data.push(DataPoint::new(
            (stop - start) / steps * i + start,
            (PI * (start - stop) / steps * i).sin(),
        ));
    }
    Some(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formula_matches_at_the_anchor_steps() {
        let data = spectrum(0.0, 1.0, SPECTRUM_STEPS).unwrap();
        assert_eq!(data.len(), SPECTRUM_STEPS);
        assert_eq!(data[0], DataPoint::new(0.0, 0.0));

        let expected_y = (PI * (0.0 - 1.0) / 1000.0 * 500.0).sin();
        assert!((data[500].x - 0.5).abs() < 1e-12);
        assert!((data[500].y - expected_y).abs() < 1e-12);
        assert!((data[500].y + 1.0).abs() < 1e-12);
    }

    #[test]
    fn inverted_bounds_refuse_to_compute() {
        assert!(spectrum(2.0, 1.0, SPECTRUM_STEPS).is_none());
    }

    #[test]
    fn equal_bounds_produce_a_flat_curve() {
        let data = spectrum(0.5, 0.5, 10).unwrap();
        assert!(data.iter().all(|point| point.x == 0.5 && point.y == 0.0));
    }
}
