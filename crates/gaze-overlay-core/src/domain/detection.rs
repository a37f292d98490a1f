//! Detector output shapes.
//!
//! Landmark detectors emit faces in one of two layouts: a positional mesh of
//! coordinate tuples (older detector builds) or a list of point objects, some
//! of which carry a `name`. The layout is decided once per face, when a
//! [`FaceRecord`] is converted into a [`DetectionResult`].

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::Point2D;

/// One positional entry of the legacy mesh: `[x, y]` or `[x, y, z]`.
///
/// `None` marks a hole in the mesh. Entries with fewer than two components
/// never resolve.
pub type MeshEntry = Option<Vec<f64>>;

/// A single point object in the keypoint layout.
///
/// Coordinates are optional so partially populated points survive decoding;
/// a keypoint without both `x` and `y` is present but unresolvable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    /// Horizontal position in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    /// Vertical position in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// Depth, ignored by the overlay.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
    /// Anatomical name such as `leftIris`, when the detector supplies one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Keypoint {
    /// Creates an unnamed keypoint.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            z: None,
            name: None,
        }
    }

    /// Creates a named keypoint.
    #[must_use]
    pub fn named(name: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::new(x, y)
        }
    }

    /// Returns the 2D position if both coordinates are present.
    #[must_use]
    pub fn position(&self) -> Option<Point2D> {
        Some(Point2D::new(self.x?, self.y?))
    }
}

/// Landmarks of one detected face, tagged by layout.
#[derive(Debug, Clone, PartialEq)]
pub enum DetectionResult {
    /// Positional coordinate tuples (`scaledMesh` / `mesh`).
    LegacyMesh(Vec<MeshEntry>),
    /// Point objects, optionally named (`keypoints`).
    Keypoints(Vec<Option<Keypoint>>),
}

impl DetectionResult {
    /// Returns the keypoint list, or `None` for the legacy mesh layout.
    #[must_use]
    pub fn keypoints(&self) -> Option<&[Option<Keypoint>]> {
        match self {
            Self::Keypoints(points) => Some(points),
            Self::LegacyMesh(_) => None,
        }
    }

    /// Number of positional entries.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::LegacyMesh(mesh) => mesh.len(),
            Self::Keypoints(points) => points.len(),
        }
    }

    /// Returns true if the face carries no entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Wire shape of one face as emitted by a landmark detector.
///
/// Any combination of the three fields may be present. Decoding is lenient
/// below the face level: a field of the wrong type reads as absent, and a
/// malformed element becomes a hole instead of failing the whole face.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceRecord {
    /// Point objects, optionally named.
    #[serde(
        default,
        deserialize_with = "lenient_keypoints",
        skip_serializing_if = "Option::is_none"
    )]
    pub keypoints: Option<Vec<Option<Keypoint>>>,
    /// Legacy mesh scaled to frame coordinates.
    #[serde(
        default,
        deserialize_with = "lenient_mesh",
        skip_serializing_if = "Option::is_none"
    )]
    pub scaled_mesh: Option<Vec<MeshEntry>>,
    /// Legacy mesh, used when no scaled mesh is present.
    #[serde(
        default,
        deserialize_with = "lenient_mesh",
        skip_serializing_if = "Option::is_none"
    )]
    pub mesh: Option<Vec<MeshEntry>>,
}

fn lenient_keypoints<'de, D>(deserializer: D) -> Result<Option<Vec<Option<Keypoint>>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_array()
        .map(|items| items.iter().map(keypoint_from_value).collect()))
}

fn lenient_mesh<'de, D>(deserializer: D) -> Result<Option<Vec<MeshEntry>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_array()
        .map(|items| items.iter().map(mesh_entry_from_value).collect()))
}

/// Non-object elements are holes; non-numeric coordinates and a non-string
/// name read as absent.
fn keypoint_from_value(value: &Value) -> Option<Keypoint> {
    let object = value.as_object()?;
    let number = |key: &str| object.get(key).and_then(Value::as_f64);

    Some(Keypoint {
        x: number("x"),
        y: number("y"),
        z: number("z"),
        name: object.get("name").and_then(Value::as_str).map(str::to_owned),
    })
}

/// Keeps the leading run of numeric components; fewer than two is a hole.
fn mesh_entry_from_value(value: &Value) -> MeshEntry {
    let components: Vec<f64> = value.as_array()?.iter().map_while(Value::as_f64).collect();
    (components.len() >= 2).then_some(components)
}

impl From<FaceRecord> for DetectionResult {
    /// Picks the layout once: a non-empty `keypoints` list wins, then
    /// `scaledMesh`, then `mesh`. A face exposing none of them becomes an
    /// empty keypoint list, against which every lookup is absent.
    fn from(record: FaceRecord) -> Self {
        match record.keypoints {
            Some(points) if !points.is_empty() => Self::Keypoints(points),
            keypoints => record
                .scaled_mesh
                .or(record.mesh)
                .map_or_else(|| Self::Keypoints(keypoints.unwrap_or_default()), Self::LegacyMesh),
        }
    }
}
