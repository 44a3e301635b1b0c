use std::collections::BTreeMap;

use kurbo::BezPath;
use serde_json::Value;

use crate::error::TopoError;

/// Property key carrying the geometry identifier.
pub const LOCATION_KEY: &str = "locationPath";
/// Property key carrying the building code.
pub const BUILDING_KEY: &str = "buildingCode";

/// Caller-supplied knobs for one conversion run. The core never reads
/// the environment; everything arrives through this struct.
#[derive(Debug, Clone)]
pub struct ConvertDesc {
    /// Evaluations per curve segment, `samples + 1` points each.
    pub samples: u32,
    /// Flip the y axis (screen-space sources grow downward).
    pub mirrored: bool,
    pub compression: bool,
    /// Remove `[0, 0]` offsets before compression.
    pub drop_zero_deltas: bool,
    pub object_name: String,
    pub building_code: String,
}

impl Default for ConvertDesc {
    fn default() -> Self {
        Self {
            samples: 50,
            mirrored: true,
            compression: true,
            drop_zero_deltas: true,
            object_name: "continents".to_string(),
            building_code: "WKD".to_string(),
        }
    }
}

impl ConvertDesc {
    /// Rejects impossible settings before any sampling starts.
    pub fn validate(&self) -> Result<(), TopoError> {
        if self.samples < 1 {
            return Err(TopoError::InvalidSamples(self.samples));
        }
        Ok(())
    }
}

/// One `<path>` element lifted out of the document: its raw path data
/// and its `id` attribute, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathDesc {
    pub id: Option<String>,
    pub d: String,
}

impl PathDesc {
    /// Geometry properties for this path at `position` (zero-based
    /// document order). The identifier falls back to the 1-based
    /// position when the element has no `id`, and numeric identifiers
    /// are zero-padded to three digits ("7" becomes "007").
    pub fn properties(&self, position: usize, building_code: &str) -> BTreeMap<String, Value> {
        let raw = match &self.id {
            Some(id) => id.clone(),
            None => (position + 1).to_string(),
        };
        let location = match raw.parse::<i64>() {
            Ok(n) => format!("{n:03}"),
            Err(_) => raw,
        };

        let mut props = BTreeMap::new();
        props.insert(LOCATION_KEY.to_string(), Value::String(location));
        props.insert(
            BUILDING_KEY.to_string(),
            Value::String(building_code.to_string()),
        );
        props
    }
}

/// Walks an SVG document and collects every `<path>` element that has a
/// `d` attribute, in document order. Elements without `d` are skipped.
/// The tag match ignores namespaces so both `<path>` and `<svg:path>`
/// spellings are found.
pub fn scan_svg_paths(doc_text: &str) -> Result<Vec<PathDesc>, TopoError> {
    let doc = roxmltree::Document::parse(doc_text)?;

    let mut paths: Vec<PathDesc> = Vec::new();
    for node in doc.descendants() {
        if !node.is_element() || node.tag_name().name() != "path" {
            continue;
        }
        let Some(d) = node.attribute("d") else {
            log::debug!("skipping <path> without d attribute");
            continue;
        };
        paths.push(PathDesc {
            id: node.attribute("id").map(str::to_string),
            d: d.to_string(),
        });
    }

    Ok(paths)
}

/// Parses raw path data into an evaluable curve. Malformed data is
/// fatal for this path only; the caller decides whether the batch
/// continues.
pub fn parse_path_data(d: &str) -> Result<BezPath, TopoError> {
    Ok(BezPath::from_svg(d)?)
}
