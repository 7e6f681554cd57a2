//! Outline models, case records, configuration and errors.

use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;

use crate::conf::{
    C_KEY_TITLE, C_KEY_TOPICS, C_MARKER_EXCLUDE, C_MARKER_INTERFACE, C_MARKER_POSITIVE,
    C_PATH_SEPARATOR, N_CASE_FIELDS,
};

////////////////////////////////////////////////////////////////////////////////
// #region OutlineNode

/// One node of a decoded mind-map tree.
///
/// Mappings keep their source key order; the walker depends on seeing a
/// topic's title before its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumOutlineNode {
    /// Ordered key/value pairs.
    Map(Vec<(String, EnumOutlineNode)>),
    /// Ordered child nodes.
    Sequence(Vec<EnumOutlineNode>),
    /// Leaf text.
    Scalar(String),
}

impl EnumOutlineNode {
    /// Build a topic mapping `{title, topics?}`; `topics` is omitted when empty.
    pub fn topic(title: impl Into<String>, children: Vec<EnumOutlineNode>) -> Self {
        let mut l_entries = vec![(
            C_KEY_TITLE.to_string(),
            EnumOutlineNode::Scalar(title.into()),
        )];
        if !children.is_empty() {
            l_entries.push((
                C_KEY_TOPICS.to_string(),
                EnumOutlineNode::Sequence(children),
            ));
        }
        EnumOutlineNode::Map(l_entries)
    }

    /// Whether a mapping holds `key`. Always false for non-mappings.
    pub fn has_key(&self, key: &str) -> bool {
        match self {
            EnumOutlineNode::Map(entries) => entries.iter().any(|(k, _)| k == key),
            _ => false,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region CasePath

/// Breadcrumb of titles from the root topic down to one leaf.
///
/// Extending returns a new path; sibling branches never share a buffer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecCasePath {
    titles: Vec<String>,
}

impl SpecCasePath {
    /// Empty breadcrumb (the root sentinel).
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy of `self` with `title` appended.
    pub fn extend(&self, title: &str) -> Self {
        let mut l_titles = Vec::with_capacity(self.titles.len() + 1);
        l_titles.extend(self.titles.iter().cloned());
        l_titles.push(title.to_string());
        Self { titles: l_titles }
    }

    /// Raw titles, one per tree level.
    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    /// Titles joined with the path separator.
    pub fn joined(&self) -> String {
        self.titles.join(C_PATH_SEPARATOR)
    }

    /// Positional segments: every title split on the path separator.
    ///
    /// A title such as `"接口-caseB-正向"` contributes three segments.
    pub fn segments(&self) -> Vec<String> {
        self.titles
            .iter()
            .flat_map(|title| title.split(C_PATH_SEPARATOR))
            .map(ToString::to_string)
            .collect()
    }

    /// Substring test across the whole joined breadcrumb.
    pub fn contains(&self, marker: &str) -> bool {
        self.joined().contains(marker)
    }
}

impl<S: Into<String>> FromIterator<S> for SpecCasePath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            titles: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for SpecCasePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.joined())
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Configuration

/// Literal markers steering traversal and classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecOutlineMarkers {
    /// Mapping key holding the title scalar.
    pub key_title: String,
    /// Mapping key holding child topics.
    pub key_topics: String,
    /// Paths containing this text emit no record.
    pub exclude: String,
    /// Direction segment marker for positive cases.
    pub positive: String,
    /// Module segment marker for interface cases.
    pub interface: String,
}

impl Default for SpecOutlineMarkers {
    fn default() -> Self {
        Self {
            key_title: C_KEY_TITLE.to_string(),
            key_topics: C_KEY_TOPICS.to_string(),
            exclude: C_MARKER_EXCLUDE.to_string(),
            positive: C_MARKER_POSITIVE.to_string(),
            interface: C_MARKER_INTERFACE.to_string(),
        }
    }
}

/// Constant metadata stamped into every record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SpecCaseConstants {
    /// Subsystem label.
    pub sub_system: String,
    /// Organisational (UM) code of the author.
    pub um_code: String,
    /// Whether the case is a transformed one.
    pub is_trans: String,
    /// Significance level.
    pub significance: String,
    /// Author name; only used to derive the default output file name.
    pub author: String,
}

impl Default for SpecCaseConstants {
    fn default() -> Self {
        Self {
            sub_system: "BOBS-OBP-开放银行".to_string(),
            um_code: "umCode".to_string(),
            is_trans: "否".to_string(),
            significance: "1".to_string(),
            author: "author".to_string(),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region CaseRecord

/// Case direction derived from the direction segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumCaseDirection {
    /// Positive (happy-path) case.
    Positive,
    /// Negative case.
    Negative,
}

impl EnumCaseDirection {
    /// Spreadsheet label.
    pub fn label(self) -> &'static str {
        match self {
            EnumCaseDirection::Positive => crate::conf::C_LABEL_POSITIVE,
            EnumCaseDirection::Negative => crate::conf::C_LABEL_NEGATIVE,
        }
    }
}

/// Fields extracted from one path by the segment parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecCaseFields {
    /// Import path placeholder (segments 1 and 2).
    pub import_path: String,
    /// Case name with marker fragments stripped.
    pub name: String,
    /// Step description.
    pub steps: String,
    /// Expected result (second-to-last segment).
    pub expected_result: String,
    /// Positive/negative classification.
    pub direction: EnumCaseDirection,
    /// Priority level (last segment).
    pub level: String,
}

/// One fixed-width spreadsheet row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecTestCase {
    pub import_path: String,
    pub sub_system: String,
    pub name: String,
    pub description: String,
    pub steps: String,
    pub expected_result: String,
    pub direction: String,
    pub level: String,
    pub is_trans: String,
    pub um_code: String,
    pub date: String,
    pub significance: String,
}

impl SpecTestCase {
    /// Row cells in sheet column order; columns 12..=14 are always blank.
    pub fn to_row(&self) -> [String; N_CASE_FIELDS] {
        [
            self.import_path.clone(),
            self.sub_system.clone(),
            self.name.clone(),
            self.description.clone(),
            self.steps.clone(),
            self.expected_result.clone(),
            self.direction.clone(),
            self.level.clone(),
            self.is_trans.clone(),
            self.um_code.clone(),
            self.date.clone(),
            String::new(),
            String::new(),
            String::new(),
            self.significance.clone(),
        ]
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Failures raised while decoding an outline or extracting cases.
#[derive(Debug, thiserror::Error)]
pub enum CaseError {
    /// The leaf path is too shallow for positional parsing.
    #[error("path too short ({depth} segments, need {required}): {path}")]
    PathTooShort {
        /// Joined breadcrumb of the offending leaf.
        path: String,
        /// Number of segments found.
        depth: usize,
        /// Minimum number of segments.
        required: usize,
    },
    /// Outline file could not be read.
    #[error("failed to read outline {}: {source}", path.display())]
    Io {
        /// Outline path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// Mind-map archive is not a readable ZIP.
    #[error("invalid mind-map archive: {0}")]
    Zip(#[from] zip::result::ZipError),
    /// Outline content is not valid JSON.
    #[error("invalid outline json: {0}")]
    Json(#[from] serde_json::Error),
    /// The archive uses a layout this decoder does not read.
    #[error("unsupported outline format: {0}")]
    UnsupportedFormat(String),
    /// JSON parsed but does not have the expected sheet/topic shape.
    #[error("invalid outline structure: {0}")]
    InvalidOutline(String),
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
