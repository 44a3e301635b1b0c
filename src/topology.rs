use std::collections::BTreeMap;

use kurbo::BezPath;
use serde::Serialize;
use serde_json::Value;

use crate::delta::{Delta, compress_deltas, points_to_deltas};
use crate::desc::{ConvertDesc, LOCATION_KEY, parse_path_data, scan_svg_paths};
use crate::error::TopoError;
use crate::sample::{close_ring, sample_path};

/// Root of the output document. Built once per run, serialized, and
/// never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct Topology {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub arcs: Vec<Vec<Delta>>,
    pub transform: Transform,
    pub objects: BTreeMap<String, GeometryCollection>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Transform {
    pub scale: [f64; 2],
    pub translate: [i64; 2],
}

impl Default for Transform {
    fn default() -> Self {
        // Micro-degree quantization, no offset.
        Self {
            scale: [1e-6, 1e-6],
            translate: [0, 0],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GeometryCollection {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub geometries: Vec<Geometry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub arcs: Vec<Vec<usize>>,
    pub properties: BTreeMap<String, Value>,
}

/// Accumulates compressed arcs and their geometries. Arc indices are
/// handed out sequentially in push order, so geometry i always
/// references arc i.
#[derive(Debug, Default)]
pub struct TopoBuilder {
    arcs: Vec<Vec<Delta>>,
    geometries: Vec<Geometry>,
}

impl TopoBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }

    /// Appends one ring as a single-ring polygon. When the property map
    /// has no identifier, `unnamed_<position>` is filled in.
    pub fn push_ring(
        &mut self,
        arc: Vec<Delta>,
        mut properties: BTreeMap<String, Value>,
    ) -> usize {
        let arc_index = self.arcs.len();

        properties
            .entry(LOCATION_KEY.to_string())
            .or_insert_with(|| Value::String(format!("unnamed_{arc_index}")));

        self.arcs.push(arc);
        self.geometries.push(Geometry {
            kind: "Polygon",
            arcs: vec![vec![arc_index]],
            properties,
        });

        arc_index
    }

    pub fn build(self, object_name: &str) -> Topology {
        let mut objects = BTreeMap::new();
        objects.insert(
            object_name.to_string(),
            GeometryCollection {
                kind: "GeometryCollection",
                geometries: self.geometries,
            },
        );

        Topology {
            kind: "Topology",
            arcs: self.arcs,
            transform: Transform::default(),
            objects,
        }
    }
}

/// Runs one curve through the whole pipeline: sample, close, encode,
/// and (per settings) compress.
pub fn arc_from_path(path: &BezPath, desc: &ConvertDesc) -> Result<Vec<Delta>, TopoError> {
    let mut points = sample_path(path, desc.samples, desc.mirrored);
    close_ring(&mut points)?;

    let deltas = points_to_deltas(&points, desc.drop_zero_deltas);
    if desc.compression {
        Ok(compress_deltas(&deltas))
    } else {
        Ok(deltas)
    }
}

/// Converts a whole SVG document into a topology. Paths with malformed
/// or empty geometry are logged and skipped; the rest of the batch
/// continues. Callers that want to abort on the first bad path can
/// drive `scan_svg_paths` / `arc_from_path` themselves.
pub fn svg_to_topology(doc_text: &str, desc: &ConvertDesc) -> Result<Topology, TopoError> {
    desc.validate()?;

    let paths = scan_svg_paths(doc_text)?;
    let mut builder = TopoBuilder::new();

    for (i, path_desc) in paths.iter().enumerate() {
        let arc = parse_path_data(&path_desc.d)
            .and_then(|curve| arc_from_path(&curve, desc));
        let arc = match arc {
            Ok(arc) => arc,
            Err(err) => {
                log::warn!("skipping path {}: {err}", i + 1);
                continue;
            }
        };

        log::debug!("path {}: {} deltas", i + 1, arc.len());
        builder.push_ring(arc, path_desc.properties(i, &desc.building_code));
    }

    Ok(builder.build(&desc.object_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::bez;

    fn plain_desc() -> ConvertDesc {
        // samples = 1 keeps fixtures hand-checkable: line segments
        // contribute exactly their endpoints.
        ConvertDesc {
            samples: 1,
            mirrored: false,
            ..ConvertDesc::default()
        }
    }

    #[test]
    fn arc_indices_follow_push_order() {
        let mut builder = TopoBuilder::new();
        let anchors: Vec<Vec<Delta>> = (0..5).map(|i| vec![[i, i]]).collect();

        for (i, arc) in anchors.iter().enumerate() {
            let got = builder.push_ring(arc.clone(), BTreeMap::new());
            assert_eq!(got, i);
        }

        let topo = builder.build("zones");
        assert_eq!(topo.arcs, anchors);
        let geometries = &topo.objects["zones"].geometries;
        for (i, geom) in geometries.iter().enumerate() {
            assert_eq!(geom.arcs, vec![vec![i]]);
        }
    }

    #[test]
    fn missing_identifier_gets_fallback_name() {
        let mut builder = TopoBuilder::new();
        builder.push_ring(vec![[0, 0]], BTreeMap::new());

        let topo = builder.build("zones");
        let props = &topo.objects["zones"].geometries[0].properties;
        assert_eq!(props[LOCATION_KEY], Value::String("unnamed_0".to_string()));
    }

    #[test]
    fn compression_flag_selects_raw_or_folded_arcs() {
        let path = bez("M 0 0 L 3 0");
        let desc = ConvertDesc {
            samples: 3,
            ..plain_desc()
        };

        let folded = arc_from_path(&path, &desc).unwrap();
        assert_eq!(folded, vec![[0, 0], [3, 0], [-3, 0]]);

        let raw_desc = ConvertDesc {
            compression: false,
            ..desc
        };
        let raw = arc_from_path(&path, &raw_desc).unwrap();
        assert_eq!(
            raw,
            vec![[0, 0], [1, 0], [1, 0], [1, 0], [-3, 0]],
        );
    }

    #[test]
    fn pointless_path_is_an_empty_path_error() {
        let path = bez("M 1 1");
        assert!(matches!(
            arc_from_path(&path, &plain_desc()),
            Err(TopoError::EmptyPath)
        ));
    }

    #[test]
    fn document_converts_to_expected_topology() {
        let doc = r#"
            <svg xmlns="http://www.w3.org/2000/svg">
                <path id="7" d="M 0 0 L 4 0 L 4 3 L 0 3 Z"/>
            </svg>
        "#;

        let topo = svg_to_topology(doc, &plain_desc()).unwrap();
        let got = serde_json::to_value(&topo).unwrap();

        let want: Value = serde_json::from_str(
            r#"
            {
                "type": "Topology",
                "arcs": [
                    [[0, 0], [4, 0], [0, 3], [-4, 0], [0, -3]]
                ],
                "transform": {
                    "scale": [1e-6, 1e-6],
                    "translate": [0, 0]
                },
                "objects": {
                    "continents": {
                        "type": "GeometryCollection",
                        "geometries": [
                            {
                                "type": "Polygon",
                                "arcs": [[0]],
                                "properties": {
                                    "locationPath": "007",
                                    "buildingCode": "WKD"
                                }
                            }
                        ]
                    }
                }
            }
            "#,
        )
        .unwrap();

        assert_eq!(got, want);
    }

    #[test]
    fn bad_paths_are_skipped_not_fatal() {
        let doc = r#"
            <svg xmlns="http://www.w3.org/2000/svg">
                <path id="good" d="M 0 0 L 4 0 L 4 3 Z"/>
                <path id="bad" d="M 0 0 L wat"/>
                <path id="empty" d="M 5 5"/>
            </svg>
        "#;

        let topo = svg_to_topology(doc, &plain_desc()).unwrap();
        assert_eq!(topo.arcs.len(), 1);

        let geometries = &topo.objects["continents"].geometries;
        assert_eq!(geometries.len(), 1);
        assert_eq!(
            geometries[0].properties[LOCATION_KEY],
            Value::String("good".to_string())
        );
    }

    #[test]
    fn invalid_samples_abort_before_scanning() {
        let desc = ConvertDesc {
            samples: 0,
            ..plain_desc()
        };
        assert!(matches!(
            svg_to_topology("<svg/>", &desc),
            Err(TopoError::InvalidSamples(0))
        ));
    }
}
