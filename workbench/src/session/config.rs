use anyhow::Context;
use photocore::transform::TargetStar;
use photocore::view::Mode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One saved workbench session: the active mode plus every transform
/// parameter the input forms hold.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub mode: Mode,
    pub target: Option<TargetStar>,
    pub reference_mag: f64,
    pub period: f64,
    pub spectrum_start: f64,
    pub spectrum_stop: f64,
    pub title: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Lc,
            target: None,
            reference_mag: 0.0,
            period: 0.0,
            spectrum_start: 0.1,
            spectrum_stop: 1.0,
            title: None,
        }
    }
}

impl SessionConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading session config {}", path_ref.display()))?;
        let config: SessionConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing session config {}", path_ref.display()))?;
        Ok(config)
    }
}

/// Maps a form/CLI star name onto a target selection. `none` clears the
/// selection, matching the form's placeholder option.
pub fn parse_target(name: &str) -> Option<TargetStar> {
    match name.to_ascii_lowercase().as_str() {
        "src1" => Some(TargetStar::Src1),
        "src2" => Some(TargetStar::Src2),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn default_session_matches_the_form_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.mode, Mode::Lc);
        assert_eq!(config.spectrum_start, 0.1);
        assert_eq!(config.spectrum_stop, 1.0);
        assert_eq!(config.period, 0.0);
    }

    #[test]
    fn config_load_reads_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"mode: pf\ntarget: src1\nperiod: 2.5\n")
            .unwrap();
        let path = temp.into_temp_path();
        let config = SessionConfig::load(&path).unwrap();
        assert_eq!(config.mode, Mode::Pf);
        assert_eq!(config.target, Some(TargetStar::Src1));
        assert_eq!(config.period, 2.5);
        assert_eq!(config.reference_mag, 0.0);
    }

    #[test]
    fn parse_target_accepts_none() {
        assert_eq!(parse_target("none"), None);
        assert_eq!(parse_target("SRC2"), Some(TargetStar::Src2));
    }
}
