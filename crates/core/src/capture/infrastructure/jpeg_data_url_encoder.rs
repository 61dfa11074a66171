use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine as _};
use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;

use crate::capture::domain::frame_encoder::{EncodeError, FrameEncoder};
use crate::shared::constants::JPEG_QUALITY;
use crate::shared::encoded_frame::EncodedFrame;
use crate::shared::frame::Frame;

const DATA_URL_PREFIX: &str = "data:image/jpeg;base64,";

/// Encodes frames as base64 JPEG `data:` URLs, the format the recognition
/// service expects in its `image` field.
pub struct JpegDataUrlEncoder {
    quality: u8,
}

impl JpegDataUrlEncoder {
    /// `quality` is on the 1-100 scale and is clamped into it.
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }
}

impl Default for JpegDataUrlEncoder {
    fn default() -> Self {
        Self::new(JPEG_QUALITY)
    }
}

impl FrameEncoder for JpegDataUrlEncoder {
    fn encode(&self, frame: &Frame) -> Result<EncodedFrame, EncodeError> {
        let expected = (frame.width() as usize) * (frame.height() as usize) * Frame::CHANNELS;
        if frame.data().len() != expected || frame.width() == 0 || frame.height() == 0 {
            return Err(EncodeError::InvalidFrame {
                width: frame.width(),
                height: frame.height(),
            });
        }

        let mut jpeg = Vec::new();
        JpegEncoder::new_with_quality(&mut jpeg, self.quality).encode(
            frame.data(),
            frame.width(),
            frame.height(),
            ExtendedColorType::Rgb8,
        )?;

        let mut data_url = String::with_capacity(DATA_URL_PREFIX.len() + jpeg.len() * 4 / 3 + 4);
        data_url.push_str(DATA_URL_PREFIX);
        BASE64_STANDARD.encode_string(&jpeg, &mut data_url);
        Ok(EncodedFrame::new(data_url))
    }
}
