pub mod ffmpeg_camera_source;
pub mod jpeg_data_url_encoder;
pub mod still_image_source;
