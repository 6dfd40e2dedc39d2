use crate::math::NumericHelper;
use crate::prelude::DataPoint;

/// Folds a light curve by `period`, anchored at `min_mjd`.
///
/// Each input point produces two output points: the phase-reduced point and
/// its copy shifted one period right, so the folded curve visually repeats
/// across two periods. A zero period is a no-op: the input comes back
/// unchanged, with no duplication. A negative period follows the
/// `float_mod` contract and reduces nothing.
pub fn fold(light_curve: &[DataPoint], period: f64, min_mjd: f64) -> Vec<DataPoint> {
    if period == 0.0 {
        return light_curve.to_vec();
    }

    let mut folded = Vec::with_capacity(light_curve.len() * 2);
    for point in light_curve {
        let phase = NumericHelper::float_mod(point.x - min_mjd, period) + min_mjd;
        folded.push(DataPoint::new(phase, point.y));
        folded.push(DataPoint::new(phase + period, point.y));
    }
    folded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_period_is_a_no_op() {
        let curve = vec![DataPoint::new(10.0, 1.0), DataPoint::new(20.0, 2.0)];
        let folded = fold(&curve, 0.0, 5.0);
        assert_eq!(folded, curve);
    }

    #[test]
    fn each_point_is_duplicated_one_period_apart() {
        let folded = fold(&[DataPoint::new(10.0, 1.0)], 5.0, 0.0);
        let phase = NumericHelper::float_mod(10.0, 5.0);
        assert_eq!(
            folded,
            vec![
                DataPoint::new(phase, 1.0),
                DataPoint::new(phase + 5.0, 1.0),
            ]
        );
        assert_eq!(folded[0].x, 5.0);
        assert_eq!(folded[1].x, 10.0);
    }

    #[test]
    fn phase_is_anchored_at_min_mjd() {
        let folded = fold(&[DataPoint::new(27.0, 3.0)], 4.0, 20.0);
        // 27 - 20 = 7 reduces to 3, shifted back by the anchor.
        assert_eq!(folded[0], DataPoint::new(23.0, 3.0));
        assert_eq!(folded[1], DataPoint::new(27.0, 3.0));
    }

    #[test]
    fn output_doubles_the_input_length() {
        let curve: Vec<DataPoint> = (0..7)
            .map(|i| DataPoint::new(i as f64 * 3.0, i as f64))
            .collect();
        assert_eq!(fold(&curve, 2.5, 0.0).len(), curve.len() * 2);
    }
}
