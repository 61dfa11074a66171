use serde::{Deserialize, Serialize};

use crate::shared::constants::UNKNOWN_NAME;
use crate::shared::region::FaceLocation;

/// One face reported by the recognition service for a single frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub name: String,
    /// Match confidence in `[0, 1]`.
    pub confidence: f64,
    pub location: FaceLocation,
}

impl Detection {
    pub fn new(name: impl Into<String>, confidence: f64, location: FaceLocation) -> Self {
        Self {
            name: name.into(),
            confidence,
            location,
        }
    }

    /// Detected but not matched to any enrolled identity.
    pub fn is_unknown(&self) -> bool {
        self.name == UNKNOWN_NAME
    }

    /// Confidence as a percentage with one decimal place, e.g. `"93.0"`.
    pub fn confidence_percent(&self) -> String {
        format!("{:.1}", self.confidence * 100.0)
    }

    /// Overlay caption: `"Alice (93.0%)"`.
    pub fn label(&self) -> String {
        format!("{} ({}%)", self.name, self.confidence_percent())
    }
}

/// Detections for one frame, in the order the service reported them.
///
/// An empty result means no face was found, which is distinct from a
/// detection named [`UNKNOWN_NAME`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecognitionResult {
    detections: Vec<Detection>,
}

impl RecognitionResult {
    pub fn new(detections: Vec<Detection>) -> Self {
        Self { detections }
    }

    pub fn detections(&self) -> &[Detection] {
        &self.detections
    }

    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }

    pub fn len(&self) -> usize {
        self.detections.len()
    }

    pub fn known_count(&self) -> usize {
        self.detections.iter().filter(|d| !d.is_unknown()).count()
    }
}

/// The service's current enrollment set, as returned by `GET /status`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemInfo {
    pub known_faces: u32,
    #[serde(default)]
    pub face_names: Vec<String>,
}
