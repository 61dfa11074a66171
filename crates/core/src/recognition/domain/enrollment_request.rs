use crate::shared::encoded_frame::EncodedFrame;

/// An image paired with the name to enroll it under.
///
/// Can only be built with a label that is non-empty after trimming, so an
/// empty enrollment never reaches the network.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnrollmentRequest {
    image: EncodedFrame,
    label: String,
}

impl EnrollmentRequest {
    pub fn new(image: EncodedFrame, label: &str) -> Option<Self> {
        let label = label.trim();
        if label.is_empty() {
            return None;
        }
        Some(Self {
            image,
            label: label.to_string(),
        })
    }

    pub fn image(&self) -> &EncodedFrame {
        &self.image
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn image() -> EncodedFrame {
        EncodedFrame::new("data:image/jpeg;base64,AA==".into())
    }

    #[rstest]
    #[case::empty("")]
    #[case::spaces("   ")]
    #[case::tabs_and_newlines("\t\n ")]
    fn test_blank_label_is_rejected(#[case] label: &str) {
        assert!(EnrollmentRequest::new(image(), label).is_none());
    }

    #[test]
    fn test_label_is_trimmed() {
        let request = EnrollmentRequest::new(image(), "  Alice ").unwrap();
        assert_eq!(request.label(), "Alice");
        assert_eq!(request.image(), &image());
    }
}
