//! Depth-first walk over an outline tree, collecting leaf paths and records.

use tracing::debug;

use crate::parser::parse_case_path;
use crate::record::{CaseClock, format_test_case};
use crate::spec::{
    CaseError, EnumOutlineNode, SpecCaseConstants, SpecCasePath, SpecOutlineMarkers, SpecTestCase,
};

/// Collect the breadcrumb of every qualifying leaf, in pre-order.
///
/// A leaf is a mapping without a children key; its title scalar ends the
/// breadcrumb. Leaves whose breadcrumb contains the exclusion marker are
/// skipped, but their ancestors' other branches are still walked.
pub fn collect_leaf_paths(
    root: &EnumOutlineNode,
    markers: &SpecOutlineMarkers,
) -> Vec<SpecCasePath> {
    let mut l_paths = Vec::new();
    walk_node(root, &SpecCasePath::new(), markers, &mut l_paths);
    l_paths
}

/// Walk `root`, parse every qualifying leaf and format it into a record.
///
/// The first leaf that is too shallow aborts the whole collection.
pub fn collect_test_cases(
    root: &EnumOutlineNode,
    markers: &SpecOutlineMarkers,
    constants: &SpecCaseConstants,
    clock: &dyn CaseClock,
) -> Result<Vec<SpecTestCase>, CaseError> {
    collect_leaf_paths(root, markers)
        .iter()
        .map(|path| {
            let fields = parse_case_path(path, markers)?;
            debug!(path = %path, name = %fields.name, "case extracted");
            Ok(format_test_case(fields, constants, clock))
        })
        .collect()
}

fn walk_node(
    node: &EnumOutlineNode,
    path: &SpecCasePath,
    markers: &SpecOutlineMarkers,
    out: &mut Vec<SpecCasePath>,
) {
    match node {
        EnumOutlineNode::Map(entries) => walk_mapping(node, entries, path, markers, out),
        EnumOutlineNode::Sequence(items) => walk_sequence(items, path, markers, out),
        EnumOutlineNode::Scalar(_) => {}
    }
}

fn walk_sequence(
    items: &[EnumOutlineNode],
    path: &SpecCasePath,
    markers: &SpecOutlineMarkers,
    out: &mut Vec<SpecCasePath>,
) {
    for item in items {
        if matches!(item, EnumOutlineNode::Map(_)) {
            walk_node(item, path, markers, out);
        }
    }
}

fn walk_mapping(
    node: &EnumOutlineNode,
    entries: &[(String, EnumOutlineNode)],
    path: &SpecCasePath,
    markers: &SpecOutlineMarkers,
    out: &mut Vec<SpecCasePath>,
) {
    let if_is_leaf = !node.has_key(&markers.key_topics);
    let mut path_cur = path.clone();

    for (key, value) in entries {
        match value {
            EnumOutlineNode::Map(_) => walk_node(value, &path_cur, markers, out),
            EnumOutlineNode::Sequence(items) => walk_sequence(items, &path_cur, markers, out),
            EnumOutlineNode::Scalar(text) => {
                if *key != markers.key_title {
                    continue;
                }
                let path_next = path_cur.extend(text);
                if if_is_leaf {
                    if !path_next.contains(&markers.exclude) {
                        out.push(path_next);
                        return;
                    }
                    debug!(path = %path_next, "leaf excluded");
                }
                path_cur = path_next;
            }
        }
    }
}
