use std::path::{Path, PathBuf};

use crate::capture::domain::video_source::{CameraAcquisitionError, CaptureConstraints, VideoSource};
use crate::shared::frame::Frame;

/// Serves a fixed image as the live video surface.
///
/// Stands in for a camera in headless runs, one-shot commands and tests.
pub struct StillImageSource {
    path: Option<PathBuf>,
    frame: Option<Frame>,
    active: bool,
}

impl StillImageSource {
    pub fn from_path(path: &Path) -> Self {
        Self {
            path: Some(path.to_path_buf()),
            frame: None,
            active: false,
        }
    }

    pub fn from_frame(frame: Frame) -> Self {
        Self {
            path: None,
            frame: Some(frame),
            active: false,
        }
    }

    fn load(path: &Path) -> Result<Frame, CameraAcquisitionError> {
        if !path.exists() {
            return Err(CameraAcquisitionError::NoDevice(path.display().to_string()));
        }
        let img = image::open(path)
            .map_err(|e| CameraAcquisitionError::Device(format!("{}: {e}", path.display())))?;
        Ok(Frame::from_rgb_image(img.to_rgb8(), 0))
    }
}

impl VideoSource for StillImageSource {
    fn start(&mut self, _constraints: &CaptureConstraints) -> Result<(), CameraAcquisitionError> {
        if self.frame.is_none() {
            let path = self
                .path
                .as_deref()
                .ok_or_else(|| CameraAcquisitionError::Device("no image configured".into()))?;
            self.frame = Some(Self::load(path)?);
        }
        self.active = true;
        Ok(())
    }

    fn stop(&mut self) {
        self.active = false;
    }

    fn has_enough_data(&self) -> bool {
        self.active && self.frame.is_some()
    }

    fn current_frame(&self) -> Option<Frame> {
        if self.active {
            self.frame.clone()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constraints() -> CaptureConstraints {
        CaptureConstraints::new(640, 480)
    }

    #[test]
    fn test_not_ready_before_start() {
        let source = StillImageSource::from_frame(Frame::filled(4, 4, [1, 2, 3]));
        assert!(!source.has_enough_data());
        assert!(source.current_frame().is_none());
    }

    #[test]
    fn test_serves_frame_after_start() {
        let mut source = StillImageSource::from_frame(Frame::filled(4, 4, [1, 2, 3]));
        source.start(&constraints()).unwrap();
        assert!(source.has_enough_data());
        assert_eq!(source.current_frame().unwrap().width(), 4);

        source.stop();
        assert!(!source.has_enough_data());
    }

    #[test]
    fn test_loads_image_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("face.png");
        image::RgbImage::from_pixel(20, 10, image::Rgb([50, 100, 200]))
            .save(&path)
            .unwrap();

        let mut source = StillImageSource::from_path(&path);
        source.start(&constraints()).unwrap();
        let frame = source.current_frame().unwrap();
        assert_eq!((frame.width(), frame.height()), (20, 10));
        assert_eq!(&frame.data()[0..3], &[50, 100, 200]);
    }

    #[test]
    fn test_missing_file_is_no_device() {
        let mut source = StillImageSource::from_path(Path::new("/nonexistent/face.png"));
        let err = source.start(&constraints()).unwrap_err();
        assert!(matches!(err, CameraAcquisitionError::NoDevice(_)));
    }
}
