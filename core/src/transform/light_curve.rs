use crate::prelude::DataPoint;
use serde::{Deserialize, Serialize};

/// Which comparison source is treated as the variable (target) star; the
/// other becomes the reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetStar {
    Src1,
    Src2,
}

impl TargetStar {
    pub fn reference(self) -> TargetStar {
        match self {
            TargetStar::Src1 => TargetStar::Src2,
            TargetStar::Src2 => TargetStar::Src1,
        }
    }
}

/// Differential magnitude series: target minus reference, plus the
/// user-supplied reference magnitude.
///
/// The two inputs are paired positionally, never aligned by `x`; when their
/// lengths differ the result silently truncates to the shorter one.
pub fn light_curve(
    target: &[DataPoint],
    reference: &[DataPoint],
    reference_mag: f64,
) -> Vec<DataPoint> {
    target
        .iter()
        .zip(reference.iter())
        .map(|(t, r)| DataPoint::new(t.x, t.y - r.y + reference_mag))
        .collect()
}

/// Display label for every light-curve-derived series, carrying the current
/// offset as free text.
pub fn light_curve_label(reference_mag: f64) -> String {
    format!(
        "Variable Star Mag + ({} - Reference Star Mag)",
        reference_mag
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_truncates_to_the_shorter_input() {
        let target: Vec<DataPoint> = (0..5).map(|i| DataPoint::new(i as f64, 10.0)).collect();
        let reference: Vec<DataPoint> = (0..3).map(|i| DataPoint::new(i as f64, 8.0)).collect();
        let curve = light_curve(&target, &reference, 0.0);
        assert_eq!(curve.len(), 3);
    }

    #[test]
    fn points_keep_target_x_and_subtract_reference_y() {
        let target = vec![DataPoint::new(100.0, 14.5)];
        let reference = vec![DataPoint::new(100.2, 12.0)];
        let curve = light_curve(&target, &reference, 1.5);
        assert_eq!(curve[0].x, 100.0);
        assert_eq!(curve[0].y, 14.5 - 12.0 + 1.5);
    }

    #[test]
    fn label_carries_the_offset_value() {
        assert_eq!(
            light_curve_label(0.0),
            "Variable Star Mag + (0 - Reference Star Mag)"
        );
        assert_eq!(
            light_curve_label(2.25),
            "Variable Star Mag + (2.25 - Reference Star Mag)"
        );
    }
}
