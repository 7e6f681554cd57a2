//! `casekit_outline` v1:
//! Mind-map outline to test-case record kernel.
//!
//! - `conf`   : markers, labels and literal templates
//! - `spec`   : outline/path/record models, configuration and errors
//! - `decode` : `.xmind` / JSON outline decoding
//! - `walker` : depth-first leaf collection
//! - `parser` : positional path parsing
//! - `record` : record formatting and clock capability
pub mod conf;
pub mod decode;
pub mod parser;
pub mod record;
pub mod spec;
pub mod walker;

pub use conf::{N_CASE_FIELDS, N_PATH_DEPTH_MIN};
pub use decode::{parse_outline_json, read_outline, read_xmind};
pub use parser::parse_case_path;
pub use record::{CaseClock, FixedClock, SystemClock, format_test_case};
pub use spec::{
    CaseError, EnumCaseDirection, EnumOutlineNode, SpecCaseConstants, SpecCaseFields,
    SpecCasePath, SpecOutlineMarkers, SpecTestCase,
};
pub use walker::{collect_leaf_paths, collect_test_cases};
