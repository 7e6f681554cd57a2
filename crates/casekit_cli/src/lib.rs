//! `casekit_cli` v1:
//! Configuration resolution and the outline-to-sheet pipeline.
//!
//! - config   : constants file loading, flag overrides, default output path
//! - pipeline : decode -> extract -> write -> beautify
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use casekit_io_xlsx::{
    CaseSheetWriter, SpecCaseSheetLayout, SpecXlsxReport, beautify_case_sheet,
};
use casekit_outline::{
    CaseClock, SpecCaseConstants, SpecOutlineMarkers, collect_test_cases, read_outline,
};
use tracing::info;

////////////////////////////////////////////////////////////////////////////////
// #region Configuration

/// Output file name suffix, preceded by the input prefix and followed by the author.
pub const C_OUTPUT_SUFFIX: &str = "测试用例";
/// Output file extension.
pub const C_OUTPUT_EXT: &str = "xlsx";

/// Per-field constant overrides from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecConstantOverrides {
    pub sub_system: Option<String>,
    pub um_code: Option<String>,
    pub is_trans: Option<String>,
    pub significance: Option<String>,
    pub author: Option<String>,
}

impl SpecConstantOverrides {
    /// Apply every set override onto `constants`.
    pub fn apply(self, constants: &mut SpecCaseConstants) {
        let l_pairs = [
            (self.sub_system, &mut constants.sub_system),
            (self.um_code, &mut constants.um_code),
            (self.is_trans, &mut constants.is_trans),
            (self.significance, &mut constants.significance),
            (self.author, &mut constants.author),
        ];
        for (v_override, field) in l_pairs {
            if let Some(val) = v_override {
                *field = val;
            }
        }
    }
}

/// Load constants from a JSON config file; missing keys keep their defaults.
pub fn load_case_constants(path_config: &Path) -> Result<SpecCaseConstants> {
    let c_text = fs::read_to_string(path_config)
        .with_context(|| format!("failed to read config {}", path_config.display()))?;
    serde_json::from_str(&c_text)
        .with_context(|| format!("invalid config {}", path_config.display()))
}

/// Resolve constants with precedence flag > config file > default.
pub fn resolve_case_constants(
    path_config: Option<&Path>,
    overrides: SpecConstantOverrides,
) -> Result<SpecCaseConstants> {
    let mut constants = match path_config {
        Some(path) => load_case_constants(path)?,
        None => SpecCaseConstants::default(),
    };
    overrides.apply(&mut constants);
    Ok(constants)
}

/// Output path next to `input`: file-name prefix before the first `-`,
/// then `测试用例-{author}.xlsx`.
///
/// Without a `-` in the file name the stem is used as prefix.
pub fn derive_default_output_path(input: &Path, author: &str) -> PathBuf {
    let c_file_name = input
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let c_prefix = match c_file_name.split_once('-') {
        Some((c_head, _)) => c_head.to_string(),
        None => input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default(),
    };

    let c_name_out = format!("{c_prefix}{C_OUTPUT_SUFFIX}-{author}.{C_OUTPUT_EXT}");
    match input.parent() {
        Some(dir) => dir.join(c_name_out),
        None => PathBuf::from(c_name_out),
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Pipeline

/// Everything one generation run needs besides the clock.
#[derive(Debug, Clone)]
pub struct SpecRunOptions {
    /// Outline file (`.xmind` or decoded JSON).
    pub input: PathBuf,
    /// Target workbook; derived from the input when `None`.
    pub output: Option<PathBuf>,
    pub constants: SpecCaseConstants,
    pub markers: SpecOutlineMarkers,
    pub layout: SpecCaseSheetLayout,
    /// Run the formatting pass after writing.
    pub if_beautify: bool,
}

impl SpecRunOptions {
    /// Options with default markers/layout and the formatting pass enabled.
    pub fn new(input: impl Into<PathBuf>, constants: SpecCaseConstants) -> Self {
        Self {
            input: input.into(),
            output: None,
            constants,
            markers: SpecOutlineMarkers::default(),
            layout: SpecCaseSheetLayout::default(),
            if_beautify: true,
        }
    }

    /// Effective output path.
    pub fn file_out(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| derive_default_output_path(&self.input, &self.constants.author))
    }
}

/// Outcome of one generation run.
#[derive(Debug, Clone)]
pub struct SpecRunReport {
    pub path_out: PathBuf,
    pub n_cases: usize,
    pub sheet: SpecXlsxReport,
    pub if_beautified: bool,
    pub elapsed_secs: f64,
}

/// Decode the outline, extract cases, write them and optionally beautify.
///
/// The first failure of any phase aborts the run. A failure after the
/// write leaves the written file in place.
pub fn run_generate(opts: &SpecRunOptions, clock: &dyn CaseClock) -> Result<SpecRunReport> {
    let t_start = Instant::now();
    let path_out = opts.file_out();

    let node_root = read_outline(&opts.input)
        .with_context(|| format!("failed to decode outline {}", opts.input.display()))?;

    let l_cases = collect_test_cases(&node_root, &opts.markers, &opts.constants, clock)
        .with_context(|| format!("failed to extract cases from {}", opts.input.display()))?;
    info!(n_cases = l_cases.len(), "cases extracted");

    let l_rows: Vec<Vec<String>> = l_cases.iter().map(|case| case.to_row().to_vec()).collect();
    let report_sheet = CaseSheetWriter::new(&path_out)
        .write_rows(&l_rows)
        .with_context(|| format!("failed to write {}", path_out.display()))?;

    if opts.if_beautify {
        beautify_case_sheet(&path_out, &opts.layout)
            .with_context(|| format!("failed to format {}", path_out.display()))?;
    }

    let n_secs = t_start.elapsed().as_secs_f64();
    info!(
        output = %path_out.display(),
        n_cases = l_cases.len(),
        "done in {n_secs:.3}s"
    );

    Ok(SpecRunReport {
        path_out,
        n_cases: l_cases.len(),
        sheet: report_sheet,
        if_beautified: opts.if_beautify,
        elapsed_secs: n_secs,
    })
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path_uses_prefix_before_dash() {
        let path = derive_default_output_path(Path::new("/tmp/in/支付-v2.xmind"), "张三");
        assert_eq!(path, PathBuf::from("/tmp/in/支付测试用例-张三.xlsx"));
    }

    #[test]
    fn test_default_output_path_without_dash_uses_stem() {
        let path = derive_default_output_path(Path::new("outline.json"), "author");
        assert_eq!(path, PathBuf::from("outline测试用例-author.xlsx"));
    }

    #[test]
    fn test_overrides_only_replace_set_fields() {
        let mut constants = SpecCaseConstants::default();
        SpecConstantOverrides {
            um_code: Some("U42".to_string()),
            ..Default::default()
        }
        .apply(&mut constants);
        assert_eq!(constants.um_code, "U42");
        assert_eq!(constants.sub_system, SpecCaseConstants::default().sub_system);
    }

    #[test]
    fn test_flag_beats_config_beats_default() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path_cfg = tmp.path().join("casekit.json");
        fs::write(&path_cfg, r#"{"sub_system": "CFG", "um_code": "CFG-UM"}"#)
            .expect("write config");

        let constants = resolve_case_constants(
            Some(&path_cfg),
            SpecConstantOverrides {
                um_code: Some("FLAG-UM".to_string()),
                ..Default::default()
            },
        )
        .expect("resolve");
        assert_eq!(constants.sub_system, "CFG");
        assert_eq!(constants.um_code, "FLAG-UM");
        assert_eq!(constants.is_trans, "否");
    }

    #[test]
    fn test_bad_config_is_an_error() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path_cfg = tmp.path().join("bad.json");
        fs::write(&path_cfg, "not json").expect("write config");
        assert!(load_case_constants(&path_cfg).is_err());
        assert!(load_case_constants(&tmp.path().join("missing.json")).is_err());
    }
}
