//! Outline markers, output labels and literal step templates.

/// Separator used when threading titles into one breadcrumb string.
pub const C_PATH_SEPARATOR: &str = "-";
/// Separator between the two screens named in a UI navigation step.
pub const C_STEP_NAV_SEPARATOR: &str = "-->";

/// Minimum number of path segments the parser needs, root title included.
pub const N_PATH_DEPTH_MIN: usize = 4;
/// Fixed width of one test-case row.
pub const N_CASE_FIELDS: usize = 15;

/// Key carrying a topic's title text.
pub const C_KEY_TITLE: &str = "title";
/// Key carrying a topic's child topics.
pub const C_KEY_TOPICS: &str = "topics";
/// Key carrying a topic's plain-text note.
pub const C_KEY_NOTE: &str = "note";

/// Subtrees whose path contains this marker are not generated yet.
pub const C_MARKER_EXCLUDE: &str = "改造点";
/// Direction segment containing this marker yields a positive case.
pub const C_MARKER_POSITIVE: &str = "正向";
/// Module segment containing this marker yields an API-driven case.
pub const C_MARKER_INTERFACE: &str = "接口";

/// Literal fragments removed from the case name.
pub const TUP_NAME_STRIP: [&str; 3] = ["-测试点", "-正向", "-反向"];

/// Direction label for positive cases.
pub const C_LABEL_POSITIVE: &str = "正例";
/// Direction label for negative cases.
pub const C_LABEL_NEGATIVE: &str = "反例";

/// Single step used for interface cases.
pub const C_STEP_INTERFACE: &str = "1、使用postman调用接口";

/// Date format written into the record.
pub const C_DATE_FORMAT: &str = "%Y-%m-%d";
