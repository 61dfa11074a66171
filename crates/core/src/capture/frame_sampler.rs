use crate::capture::domain::frame_encoder::{EncodeError, FrameEncoder};
use crate::capture::domain::video_source::VideoSource;
use crate::presentation::domain::presentation_surface::PresentationSurface;
use crate::shared::encoded_frame::EncodedFrame;
use crate::shared::frame::Frame;

/// A painted and encoded snapshot of the live video.
#[derive(Clone, Debug)]
pub struct Sample {
    pub frame: Frame,
    pub encoded: EncodedFrame,
}

/// Snapshots the live video onto the presentation surface and encodes it.
///
/// The sampler itself is timer-agnostic: the session drives it once per
/// cadence tick, or once per manual enrollment action.
pub struct FrameSampler {
    encoder: Box<dyn FrameEncoder>,
}

impl FrameSampler {
    pub fn new(encoder: Box<dyn FrameEncoder>) -> Self {
        Self { encoder }
    }

    /// Paints and encodes the current frame.
    ///
    /// Returns `Ok(None)` when the source has not buffered enough video
    /// yet; that is normal operation, not an error.
    pub fn sample(
        &self,
        source: &dyn VideoSource,
        surface: &mut dyn PresentationSurface,
    ) -> Result<Option<Sample>, EncodeError> {
        let Some(frame) = self.snapshot(source, surface) else {
            return Ok(None);
        };
        let encoded = self.encoder.encode(&frame)?;
        Ok(Some(Sample { frame, encoded }))
    }

    /// Paints the current frame without encoding it.
    pub fn snapshot(
        &self,
        source: &dyn VideoSource,
        surface: &mut dyn PresentationSurface,
    ) -> Option<Frame> {
        if !source.has_enough_data() {
            log::debug!("Video not ready, skipping sample");
            return None;
        }
        let frame = source.current_frame()?;
        surface.draw_frame(&frame);
        surface.present();
        Some(frame)
    }

    pub fn encode(&self, frame: &Frame) -> Result<EncodedFrame, EncodeError> {
        self.encoder.encode(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeEncoder, FakeVideoSource, RecordingSurface, SurfaceOp};

    #[test]
    fn test_skips_when_video_not_ready() {
        let source = FakeVideoSource::not_ready();
        let mut surface = RecordingSurface::new(64, 48);
        let sampler = FrameSampler::new(Box::new(FakeEncoder::default()));

        let sample = sampler.sample(&source, &mut surface).unwrap();

        assert!(sample.is_none());
        assert!(surface.ops().is_empty());
    }

    #[test]
    fn test_paints_then_encodes_current_frame() {
        let source = FakeVideoSource::ready(64, 48);
        let mut surface = RecordingSurface::new(64, 48);
        let encoder = FakeEncoder::default();
        let sampler = FrameSampler::new(Box::new(encoder.clone()));

        let sample = sampler.sample(&source, &mut surface).unwrap().unwrap();

        assert_eq!(surface.ops(), vec![SurfaceOp::Frame(64, 48)]);
        assert_eq!(sample.frame.width(), 64);
        assert_eq!(encoder.calls(), 1);
        assert!(sample.encoded.data_url().starts_with("data:image/jpeg"));
    }

    #[test]
    fn test_encode_failure_is_reported() {
        let source = FakeVideoSource::ready(8, 8);
        let mut surface = RecordingSurface::new(8, 8);
        let sampler = FrameSampler::new(Box::new(FakeEncoder::failing()));

        assert!(sampler.sample(&source, &mut surface).is_err());
    }

    #[test]
    fn test_snapshot_does_not_encode() {
        let source = FakeVideoSource::ready(8, 8);
        let mut surface = RecordingSurface::new(8, 8);
        let encoder = FakeEncoder::default();
        let sampler = FrameSampler::new(Box::new(encoder.clone()));

        assert!(sampler.snapshot(&source, &mut surface).is_some());
        assert_eq!(encoder.calls(), 0);
    }
}
