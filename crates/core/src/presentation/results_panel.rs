use crate::shared::constants::{NO_FACES_PLACEHOLDER, STOPPED_PLACEHOLDER};
use crate::shared::detection::{Detection, RecognitionResult};

/// One row of the results list.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultEntry {
    pub name: String,
    pub known: bool,
    /// e.g. `"置信度: 93.0%"`
    pub confidence: String,
    /// e.g. `"位置: [10, 200, 150, 50]"`
    pub location: String,
}

impl From<&Detection> for ResultEntry {
    fn from(d: &Detection) -> Self {
        Self {
            name: d.name.clone(),
            known: !d.is_unknown(),
            confidence: format!("置信度: {}%", d.confidence_percent()),
            location: format!("位置: {}", d.location),
        }
    }
}

/// What the results list shows.
#[derive(Clone, Debug, PartialEq)]
pub enum ResultsView {
    /// Recognition was stopped by the user.
    Stopped,
    /// The last frame contained no faces.
    NoFaces,
    Detections(Vec<ResultEntry>),
}

impl ResultsView {
    pub fn from_result(result: &RecognitionResult) -> Self {
        if result.is_empty() {
            ResultsView::NoFaces
        } else {
            ResultsView::Detections(result.detections().iter().map(ResultEntry::from).collect())
        }
    }

    /// Text lines in display order.
    pub fn lines(&self) -> Vec<String> {
        match self {
            ResultsView::Stopped => vec![STOPPED_PLACEHOLDER.to_string()],
            ResultsView::NoFaces => vec![NO_FACES_PLACEHOLDER.to_string()],
            ResultsView::Detections(entries) => entries
                .iter()
                .map(|e| format!("{} | {} | {}", e.name, e.confidence, e.location))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::region::FaceLocation;

    #[test]
    fn test_empty_result_is_no_faces_placeholder() {
        let view = ResultsView::from_result(&RecognitionResult::default());
        assert_eq!(view, ResultsView::NoFaces);
        assert_eq!(view.lines(), vec!["未检测到人脸".to_string()]);
    }

    #[test]
    fn test_stopped_placeholder_text() {
        assert_eq!(ResultsView::Stopped.lines(), vec!["识别已停止".to_string()]);
    }

    #[test]
    fn test_entries_mark_unknown_faces() {
        let result = RecognitionResult::new(vec![
            Detection::new("Alice", 0.93, FaceLocation::new(10, 200, 150, 50)),
            Detection::new("Unknown", 0.41, FaceLocation::new(5, 60, 70, 20)),
        ]);
        let ResultsView::Detections(entries) = ResultsView::from_result(&result) else {
            panic!("expected detections");
        };
        assert_eq!(entries.len(), 2);
        assert!(entries[0].known);
        assert_eq!(entries[0].confidence, "置信度: 93.0%");
        assert_eq!(entries[0].location, "位置: [10, 200, 150, 50]");
        assert!(!entries[1].known);
    }

    #[test]
    fn test_lines_follow_detection_order() {
        let result = RecognitionResult::new(vec![
            Detection::new("Bob", 0.5, FaceLocation::new(0, 10, 10, 0)),
            Detection::new("Alice", 0.9, FaceLocation::new(0, 10, 10, 0)),
        ]);
        let lines = ResultsView::from_result(&result).lines();
        assert!(lines[0].starts_with("Bob"));
        assert!(lines[1].starts_with("Alice"));
    }
}
