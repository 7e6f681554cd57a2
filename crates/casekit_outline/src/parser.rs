//! Positional parsing of a leaf path into case fields.
//!
//! Segments are indexed from both ends of the path:
//!
//! | segment            | field                                   |
//! |--------------------|-----------------------------------------|
//! | `[1..3]`           | import path                             |
//! | `[2..len-2]`       | case name (marker fragments stripped)   |
//! | `[2]`              | module, decides interface vs UI steps   |
//! | `[2..4]`           | UI navigation trail                     |
//! | `[len-4]`          | direction                               |
//! | `[len-3]`          | step action                             |
//! | `[len-2]`          | expected result                         |
//! | `[len-1]`          | level                                   |

use crate::conf::{
    C_PATH_SEPARATOR, C_STEP_INTERFACE, C_STEP_NAV_SEPARATOR, N_PATH_DEPTH_MIN, TUP_NAME_STRIP,
};
use crate::spec::{
    CaseError, EnumCaseDirection, SpecCaseFields, SpecCasePath, SpecOutlineMarkers,
};

/// Validated view over a path with at least [`N_PATH_DEPTH_MIN`] segments.
struct CaseSegments<'a> {
    segments: &'a [String],
}

impl<'a> CaseSegments<'a> {
    fn new(segments: &'a [String], path: &SpecCasePath) -> Result<Self, CaseError> {
        if segments.len() < N_PATH_DEPTH_MIN {
            return Err(CaseError::PathTooShort {
                path: path.joined(),
                depth: segments.len(),
                required: N_PATH_DEPTH_MIN,
            });
        }
        Ok(Self { segments })
    }

    fn from_end(&self, n_offset: usize) -> &'a str {
        &self.segments[self.segments.len() - n_offset]
    }

    fn module(&self) -> &'a str {
        &self.segments[2]
    }

    fn import_path(&self) -> String {
        self.segments[1..3].join(C_PATH_SEPARATOR)
    }

    fn name(&self) -> String {
        let n_end = self.segments.len() - 2;
        let mut c_name = self.segments[2..n_end].join(C_PATH_SEPARATOR);
        for c_fragment in TUP_NAME_STRIP {
            c_name = c_name.replace(c_fragment, "");
        }
        c_name
    }

    fn navigation(&self) -> String {
        self.segments[2..4].join(C_STEP_NAV_SEPARATOR)
    }

    fn direction_segment(&self) -> &'a str {
        self.from_end(4)
    }

    fn action(&self) -> &'a str {
        self.from_end(3)
    }

    fn expected_result(&self) -> &'a str {
        self.from_end(2)
    }

    fn level(&self) -> &'a str {
        self.from_end(1)
    }
}

/// Parse one leaf path into case fields.
///
/// Paths shorter than [`N_PATH_DEPTH_MIN`] segments fail with
/// [`CaseError::PathTooShort`]; callers abort the run on it.
pub fn parse_case_path(
    path: &SpecCasePath,
    markers: &SpecOutlineMarkers,
) -> Result<SpecCaseFields, CaseError> {
    let l_segments = path.segments();
    let segs = CaseSegments::new(&l_segments, path)?;

    let direction = if segs.direction_segment().contains(markers.positive.as_str()) {
        EnumCaseDirection::Positive
    } else {
        EnumCaseDirection::Negative
    };

    let steps = if segs.module().contains(markers.interface.as_str()) {
        C_STEP_INTERFACE.to_string()
    } else {
        format!(
            "1、用户进入\"{}\"界面\n2、{}",
            segs.navigation(),
            segs.action()
        )
    };

    Ok(SpecCaseFields {
        import_path: segs.import_path(),
        name: segs.name(),
        steps,
        expected_result: segs.expected_result().to_string(),
        direction,
        level: segs.level().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_of(titles: &[&str]) -> SpecCasePath {
        titles.iter().copied().collect()
    }

    #[test]
    fn test_parse_ui_case() {
        let path = path_of(&["系统", "支付", "转账页", "正向", "输入金额", "转账成功", "高"]);
        let fields = parse_case_path(&path, &SpecOutlineMarkers::default()).expect("parse");

        assert_eq!(fields.import_path, "支付-转账页");
        assert_eq!(fields.name, "转账页-输入金额");
        assert_eq!(fields.direction, EnumCaseDirection::Positive);
        assert_eq!(fields.expected_result, "转账成功");
        assert_eq!(fields.level, "高");
        assert_eq!(fields.steps, "1、用户进入\"转账页-->正向\"界面\n2、输入金额");
    }

    #[test]
    fn test_parse_interface_case() {
        let path = path_of(&["系统", "开放", "接口-caseB-正向-期望结果X-测试点-高"]);
        let fields = parse_case_path(&path, &SpecOutlineMarkers::default()).expect("parse");

        assert_eq!(fields.steps, C_STEP_INTERFACE);
        assert_eq!(fields.direction, EnumCaseDirection::Positive);
        assert_eq!(fields.name, "接口-caseB-期望结果X");
        assert_eq!(fields.expected_result, "测试点");
        assert_eq!(fields.level, "高");
    }

    #[test]
    fn test_direction_without_marker_is_negative() {
        let path = path_of(&["r", "m", "页", "反向", "操作", "报错", "低"]);
        let fields = parse_case_path(&path, &SpecOutlineMarkers::default()).expect("parse");
        assert_eq!(fields.direction, EnumCaseDirection::Negative);
        assert_eq!(fields.direction.label(), "反例");
        assert_eq!(fields.name, "页-操作");
    }

    #[test]
    fn test_minimum_depth_parses_and_one_less_fails() {
        let path_min = path_of(&["系统", "支付", "转账页", "高"]);
        let fields = parse_case_path(&path_min, &SpecOutlineMarkers::default()).expect("parse");
        assert_eq!(fields.import_path, "支付-转账页");
        assert_eq!(fields.name, "");
        assert_eq!(fields.expected_result, "转账页");
        assert_eq!(fields.level, "高");
        assert_eq!(fields.direction, EnumCaseDirection::Negative);
        assert_eq!(fields.steps, "1、用户进入\"转账页-->高\"界面\n2、支付");

        let path_short = path_of(&["系统", "支付", "高"]);
        let err = parse_case_path(&path_short, &SpecOutlineMarkers::default())
            .expect_err("must fail");
        assert!(matches!(
            err,
            CaseError::PathTooShort {
                depth: 3,
                required: N_PATH_DEPTH_MIN,
                ..
            }
        ));
    }

    #[test]
    fn test_depth_counts_split_segments_not_titles() {
        let path = path_of(&["r", "a-b-c"]);
        assert!(parse_case_path(&path, &SpecOutlineMarkers::default()).is_ok());
    }

    #[test]
    fn test_strip_requires_leading_separator() {
        let path = path_of(&["r", "m", "测试点", "正向", "x", "y", "z"]);
        let fields = parse_case_path(&path, &SpecOutlineMarkers::default()).expect("parse");
        assert_eq!(fields.name, "测试点-x");
    }
}
