//! Outline decoding: `.xmind` archives and pre-decoded JSON dictionaries.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::conf::{C_KEY_NOTE, C_KEY_TITLE, C_KEY_TOPICS};
use crate::spec::{CaseError, EnumOutlineNode};

const C_XMIND_CONTENT_JSON: &str = "content.json";
const C_XMIND_CONTENT_XML: &str = "content.xml";
const C_HINT_RESAVE: &str =
    "re-save it with XMind 2020 or later, or pass the outline as decoded JSON";

/// Read the root topic of the first sheet of an outline file.
///
/// `.xmind` files are read as XMind archives; anything else is taken as a
/// JSON document, either a sheet list `[{"title", "topic"}]` or one topic.
pub fn read_outline(path: &Path) -> Result<EnumOutlineNode, CaseError> {
    info!(path = %path.display(), "decoding outline");
    let if_is_xmind = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xmind"));

    if if_is_xmind {
        let file = File::open(path).map_err(|source| CaseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        return read_xmind(BufReader::new(file));
    }

    let c_text = std::fs::read_to_string(path).map_err(|source| CaseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_outline_json(&c_text)
}

/// Decode an XMind (2020+) archive from any seekable reader.
pub fn read_xmind<R: Read + std::io::Seek>(reader: R) -> Result<EnumOutlineNode, CaseError> {
    let mut archive = zip::ZipArchive::new(reader)?;

    let if_has_content_json = archive.file_names().any(|name| name == C_XMIND_CONTENT_JSON);
    if !if_has_content_json {
        let if_has_content_xml = archive.file_names().any(|name| name == C_XMIND_CONTENT_XML);
        let c_reason = if if_has_content_xml {
            format!("legacy XMind 8 archive ({C_XMIND_CONTENT_XML}); {C_HINT_RESAVE}")
        } else {
            format!("archive has no {C_XMIND_CONTENT_JSON}; {C_HINT_RESAVE}")
        };
        return Err(CaseError::UnsupportedFormat(c_reason));
    }

    let mut c_content = String::new();
    archive
        .by_name(C_XMIND_CONTENT_JSON)?
        .read_to_string(&mut c_content)
        .map_err(|source| CaseError::Io {
            path: C_XMIND_CONTENT_JSON.into(),
            source,
        })?;

    let value: Value = serde_json::from_str(&c_content)?;
    let l_sheets = value
        .as_array()
        .ok_or_else(|| CaseError::InvalidOutline("content.json is not a sheet list".into()))?;
    let sheet = l_sheets
        .first()
        .ok_or_else(|| CaseError::InvalidOutline("workbook has no sheets".into()))?;
    let root_topic = sheet
        .get("rootTopic")
        .and_then(Value::as_object)
        .ok_or_else(|| CaseError::InvalidOutline("first sheet has no rootTopic".into()))?;

    debug!(n_sheets = l_sheets.len(), "xmind content decoded");
    Ok(convert_xmind_topic(root_topic))
}

/// Parse a JSON outline already in decoded-dictionary shape.
pub fn parse_outline_json(text: &str) -> Result<EnumOutlineNode, CaseError> {
    let value: Value = serde_json::from_str(text)?;
    match &value {
        Value::Array(l_sheets) => {
            let topic = l_sheets
                .first()
                .and_then(|sheet| sheet.get("topic"))
                .ok_or_else(|| {
                    CaseError::InvalidOutline("first sheet has no \"topic\" entry".into())
                })?;
            Ok(convert_json_value(topic))
        }
        Value::Object(_) => Ok(convert_json_value(&value)),
        _ => Err(CaseError::InvalidOutline(
            "outline must be a sheet list or a topic object".into(),
        )),
    }
}

/// Normalize an XMind topic into `{title, note?, topics?}`.
///
/// `note` is kept for the decoded-dictionary node shape; the walker skips it.
fn convert_xmind_topic(topic: &Map<String, Value>) -> EnumOutlineNode {
    let mut l_entries = vec![(
        C_KEY_TITLE.to_string(),
        EnumOutlineNode::Scalar(derive_scalar_text(topic.get("title"))),
    )];

    let c_note = topic
        .get("notes")
        .and_then(|notes| notes.get("plain"))
        .and_then(|plain| plain.get("content"))
        .and_then(Value::as_str);
    if let Some(c_note) = c_note {
        l_entries.push((
            C_KEY_NOTE.to_string(),
            EnumOutlineNode::Scalar(c_note.to_string()),
        ));
    }

    let l_children: Vec<EnumOutlineNode> = topic
        .get("children")
        .and_then(|children| children.get("attached"))
        .and_then(Value::as_array)
        .map(|attached| {
            attached
                .iter()
                .filter_map(Value::as_object)
                .map(convert_xmind_topic)
                .collect()
        })
        .unwrap_or_default();
    if !l_children.is_empty() {
        l_entries.push((
            C_KEY_TOPICS.to_string(),
            EnumOutlineNode::Sequence(l_children),
        ));
    }

    EnumOutlineNode::Map(l_entries)
}

fn convert_json_value(value: &Value) -> EnumOutlineNode {
    match value {
        Value::Object(map) => EnumOutlineNode::Map(
            map.iter()
                .map(|(key, val)| (key.clone(), convert_json_value(val)))
                .collect(),
        ),
        Value::Array(items) => {
            EnumOutlineNode::Sequence(items.iter().map(convert_json_value).collect())
        }
        other => EnumOutlineNode::Scalar(derive_scalar_text(Some(other))),
    }
}

fn derive_scalar_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
