/// A compressed still image ready to be sent to the recognition service,
/// carried as a `data:` URL (e.g. `data:image/jpeg;base64,...`).
///
/// Owned by the in-flight request that carries it and dropped once that
/// request resolves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedFrame {
    data_url: String,
}

impl EncodedFrame {
    pub fn new(data_url: String) -> Self {
        Self { data_url }
    }

    pub fn data_url(&self) -> &str {
        &self.data_url
    }

    /// MIME type from the `data:` prefix, if present.
    pub fn mime_type(&self) -> Option<&str> {
        let rest = self.data_url.strip_prefix("data:")?;
        let end = rest.find([';', ','])?;
        Some(&rest[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_type_from_data_url() {
        let frame = EncodedFrame::new("data:image/jpeg;base64,AAAA".to_string());
        assert_eq!(frame.mime_type(), Some("image/jpeg"));
    }

    #[test]
    fn test_mime_type_missing_prefix() {
        let frame = EncodedFrame::new("AAAA".to_string());
        assert_eq!(frame.mime_type(), None);
    }
}
