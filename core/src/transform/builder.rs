use crate::prelude::DataPoint;
use crate::table::Row;

/// Extent of the raw `jd` column, rebuilt in full on every table change.
/// The table stays small (tens to low hundreds of rows), so no incremental
/// bookkeeping is attempted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MjdExtent {
    pub min_mjd: f64,
    pub max_mjd: f64,
}

impl Default for MjdExtent {
    fn default() -> Self {
        Self {
            min_mjd: f64::INFINITY,
            max_mjd: f64::NEG_INFINITY,
        }
    }
}

/// The two positionally-paired comparison-star series plus the `jd` extent.
#[derive(Debug, Clone, Default)]
pub struct BuiltSeries {
    pub src1: Vec<DataPoint>,
    pub src2: Vec<DataPoint>,
    pub extent: MjdExtent,
}

/// Converts table rows into the two comparison-star point sequences.
///
/// A row with an empty `jd` or magnitude cell is dropped from that series
/// only; the other series still gets its point. Point order equals row
/// order, and the extent scans every present `jd` value.
pub fn build_series(rows: &[Row]) -> BuiltSeries {
    let mut built = BuiltSeries::default();

    for row in rows {
        let Some(jd) = row.jd else {
            continue;
        };
        built.extent.min_mjd = built.extent.min_mjd.min(jd);
        built.extent.max_mjd = built.extent.max_mjd.max(jd);

        if let Some(mag) = row.src1 {
            built.src1.push(DataPoint::new(jd, mag));
        }
        if let Some(mag) = row.src2 {
            built.src2.push(DataPoint::new(jd, mag));
        }
    }

    built
}
