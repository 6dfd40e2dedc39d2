use crate::prelude::{ChartError, ChartResult};
use crate::table::Row;
use crate::telemetry::LogManager;
use csv::{ReaderBuilder, StringRecord, Trim};

/// Parsed photometry upload: the two comparison-star names from the `id`
/// column plus one table row per time sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Upload {
    pub src1: String,
    pub src2: String,
    pub rows: Vec<Row>,
}

/// Parses an uploaded photometry CSV.
///
/// The expected format is fixed: a header row naming at least `id`, `mjd`,
/// and `mag` columns, then two data rows per time sample, one per
/// comparison star. File names without a `.csv` extension are rejected
/// before any parsing; rows with a non-numeric `mjd` or `mag` are dropped
/// silently, as is a trailing unpaired row.
pub fn parse_photometry_csv(file_name: &str, contents: &str) -> ChartResult<Upload> {
    if !file_name.to_ascii_lowercase().ends_with(".csv") {
        return Err(ChartError::UnsupportedUpload(file_name.to_string()));
    }

    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(contents.as_bytes());

    let headers = reader
        .headers()
        .map_err(|err| ChartError::MalformedUpload(err.to_string()))?;
    let id_col = column_index(headers, "id")?;
    let mjd_col = column_index(headers, "mjd")?;
    let mag_col = column_index(headers, "mag")?;

    let logger = LogManager::new("ingest");
    let mut dropped = 0usize;
    let records: Vec<StringRecord> = reader
        .records()
        .filter_map(|record| match record {
            Ok(record) => Some(record),
            Err(_) => {
                dropped += 1;
                None
            }
        })
        .collect();

    if records.len() < 2 {
        return Err(ChartError::MalformedUpload(
            "expected two data rows per time sample".to_string(),
        ));
    }

    let src1 = field(&records[0], id_col).to_string();
    let src2 = field(&records[1], id_col).to_string();

    let mut rows = Vec::with_capacity(records.len() / 2);
    for pair in records.chunks(2) {
        let [first, second] = pair else {
            dropped += 1;
            continue;
        };
        let mjd = field(first, mjd_col).parse::<f64>();
        let mag1 = field(first, mag_col).parse::<f64>();
        let mag2 = field(second, mag_col).parse::<f64>();
        match (mjd, mag1, mag2) {
            (Ok(jd), Ok(mag1), Ok(mag2)) => rows.push(Row::new(jd, mag1, mag2)),
            _ => dropped += 1,
        }
    }

    if dropped > 0 {
        logger.record(&format!("{} dropped {} malformed entries", file_name, dropped));
    }

    Ok(Upload { src1, src2, rows })
}

fn column_index(headers: &StringRecord, name: &str) -> ChartResult<usize> {
    headers
        .iter()
        .position(|header| header == name)
        .ok_or_else(|| ChartError::MalformedUpload(format!("missing column {name}")))
}

fn field<'a>(record: &'a StringRecord, index: usize) -> &'a str {
    record.get(index).unwrap_or("")
}
