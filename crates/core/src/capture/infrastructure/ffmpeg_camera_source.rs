use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use crate::capture::domain::video_source::{CameraAcquisitionError, CaptureConstraints, VideoSource};
use crate::shared::frame::Frame;

/// Live camera feed decoded by ffmpeg-next (libavdevice + libavcodec).
///
/// A background thread owns the input context, decodes frames to RGB24 and
/// publishes the newest one into a shared slot. Readers copy out of the
/// slot, so sampling never waits on the decoder.
///
/// `device` is anything ffmpeg can open: `/dev/video0` with `v4l2`,
/// `0` with `avfoundation`, or a plain file/stream URL with no format.
pub struct FfmpegCameraSource {
    device: String,
    format: Option<String>,
    latest: Arc<Mutex<Option<Frame>>>,
    running: Arc<AtomicBool>,
    worker: Option<thread::JoinHandle<()>>,
}

impl FfmpegCameraSource {
    pub fn new(device: impl Into<String>, format: Option<String>) -> Self {
        Self {
            device: device.into(),
            format,
            latest: Arc::new(Mutex::new(None)),
            running: Arc::new(AtomicBool::new(false)),
            worker: None,
        }
    }
}

impl VideoSource for FfmpegCameraSource {
    fn start(&mut self, constraints: &CaptureConstraints) -> Result<(), CameraAcquisitionError> {
        if self.running.load(Ordering::Relaxed) {
            return Ok(());
        }
        log::debug!(
            "Opening camera {} ({}x{}, front-facing: {})",
            self.device,
            constraints.ideal_width,
            constraints.ideal_height,
            constraints.front_facing
        );

        let (ready_tx, ready_rx) = crossbeam_channel::bounded(1);
        let device = self.device.clone();
        let format = self.format.clone();
        let constraints = *constraints;
        let latest = self.latest.clone();
        let running = self.running.clone();
        running.store(true, Ordering::Relaxed);

        // Readiness is reported only once the decoder and scaler exist, so
        // a device without a usable video stream fails `start` itself.
        let worker = thread::spawn(move || {
            let stream = match open_stream(&device, format.as_deref(), &constraints) {
                Ok(stream) => stream,
                Err(e) => {
                    running.store(false, Ordering::Relaxed);
                    let _ = ready_tx.send(Err(e));
                    return;
                }
            };
            let _ = ready_tx.send(Ok(()));
            if let Err(e) = decode_loop(stream, &latest, &running) {
                log::error!("Camera decoding stopped: {e}");
            }
            running.store(false, Ordering::Relaxed);
        });

        match ready_rx.recv() {
            Ok(Ok(())) => {
                self.worker = Some(worker);
                Ok(())
            }
            Ok(Err(e)) => {
                let _ = worker.join();
                Err(e)
            }
            Err(_) => {
                self.running.store(false, Ordering::Relaxed);
                Err(CameraAcquisitionError::Device(
                    "camera thread exited before opening the device".into(),
                ))
            }
        }
    }

    fn stop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        // The decoder thread notices on its next packet; a stalled device
        // must not block the caller, so the handle is detached.
        self.worker = None;
        if let Ok(mut slot) = self.latest.lock() {
            *slot = None;
        }
    }

    fn has_enough_data(&self) -> bool {
        self.latest.lock().map(|slot| slot.is_some()).unwrap_or(false)
    }

    fn current_frame(&self) -> Option<Frame> {
        self.latest.lock().ok().and_then(|slot| slot.clone())
    }
}

impl Drop for FfmpegCameraSource {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
    }
}

fn open_input(
    device: &str,
    format: Option<&str>,
    constraints: &CaptureConstraints,
) -> Result<ffmpeg_next::format::context::Input, CameraAcquisitionError> {
    ffmpeg_next::init().map_err(|e| CameraAcquisitionError::Device(e.to_string()))?;
    ffmpeg_next::device::register_all();

    let mut options = ffmpeg_next::Dictionary::new();
    options.set(
        "video_size",
        &format!("{}x{}", constraints.ideal_width, constraints.ideal_height),
    );

    match format {
        Some(name) => {
            options.set("framerate", "30");
            let input_format = ffmpeg_next::device::input::video()
                .find(|f| f.name() == name)
                .ok_or_else(|| {
                    CameraAcquisitionError::NoDevice(format!(
                        "{device} (input format '{name}' unavailable)"
                    ))
                })?;
            ffmpeg_next::format::open_with(&device, &input_format, options)
                .map(|ctx| ctx.input())
                .map_err(|e| classify_open_error(device, e))
        }
        None => ffmpeg_next::format::input_with_dictionary(&device, options)
            .map_err(|e| classify_open_error(device, e)),
    }
}

fn classify_open_error(device: &str, error: ffmpeg_next::Error) -> CameraAcquisitionError {
    let message = error.to_string();
    if message.contains("Permission denied") {
        CameraAcquisitionError::PermissionDenied(device.to_string())
    } else if message.contains("No such file or directory") {
        CameraAcquisitionError::NoDevice(device.to_string())
    } else {
        CameraAcquisitionError::Device(format!("{device}: {message}"))
    }
}

struct CameraStream {
    ictx: ffmpeg_next::format::context::Input,
    video_stream_index: usize,
    decoder: ffmpeg_next::decoder::Video,
    scaler: ffmpeg_next::software::scaling::Context,
    width: u32,
    height: u32,
}

fn open_stream(
    device: &str,
    format: Option<&str>,
    constraints: &CaptureConstraints,
) -> Result<CameraStream, CameraAcquisitionError> {
    let ictx = open_input(device, format, constraints)?;
    let setup_error = |what: &str| CameraAcquisitionError::Device(format!("{device}: {what}"));

    let stream = ictx
        .streams()
        .best(ffmpeg_next::media::Type::Video)
        .ok_or_else(|| setup_error("no video stream"))?;
    let video_stream_index = stream.index();
    let codec_ctx = ffmpeg_next::codec::context::Context::from_parameters(stream.parameters())
        .map_err(|e| setup_error(&e.to_string()))?;
    let decoder = codec_ctx
        .decoder()
        .video()
        .map_err(|e| setup_error(&e.to_string()))?;

    let width = decoder.width();
    let height = decoder.height();
    let scaler = ffmpeg_next::software::scaling::Context::get(
        decoder.format(),
        width,
        height,
        ffmpeg_next::format::Pixel::RGB24,
        width,
        height,
        ffmpeg_next::software::scaling::Flags::BILINEAR,
    )
    .map_err(|e| setup_error(&e.to_string()))?;

    Ok(CameraStream {
        ictx,
        video_stream_index,
        decoder,
        scaler,
        width,
        height,
    })
}

fn decode_loop(
    stream: CameraStream,
    latest: &Mutex<Option<Frame>>,
    running: &AtomicBool,
) -> Result<(), Box<dyn std::error::Error>> {
    let CameraStream {
        mut ictx,
        video_stream_index,
        mut decoder,
        mut scaler,
        width,
        height,
    } = stream;
    log::info!("Camera streaming at {width}x{height}");

    let mut frame_index = 0usize;
    let mut decoded = ffmpeg_next::util::frame::video::Video::empty();
    let mut rgb_frame = ffmpeg_next::util::frame::video::Video::empty();

    for (stream, packet) in ictx.packets() {
        if !running.load(Ordering::Relaxed) {
            return Ok(());
        }
        if stream.index() != video_stream_index {
            continue;
        }
        if decoder.send_packet(&packet).is_err() {
            continue;
        }
        while decoder.receive_frame(&mut decoded).is_ok() {
            scaler.run(&decoded, &mut rgb_frame)?;
            let pixels = extract_rgb_pixels(&rgb_frame, width, height);
            let frame = Frame::new(pixels, width, height, frame_index);
            frame_index += 1;
            if let Ok(mut slot) = latest.lock() {
                *slot = Some(frame);
            }
        }
    }

    // End of a finite input: the last frame stays on the surface.
    log::info!("Camera input ended after {frame_index} frames");
    Ok(())
}

/// Copies pixel data from an ffmpeg frame into a contiguous RGB buffer,
/// dropping per-row stride padding.
fn extract_rgb_pixels(
    rgb_frame: &ffmpeg_next::util::frame::video::Video,
    width: u32,
    height: u32,
) -> Vec<u8> {
    let stride = rgb_frame.stride(0);
    let data = rgb_frame.data(0);
    let row_bytes = width as usize * Frame::CHANNELS;

    let mut pixels = Vec::with_capacity(row_bytes * height as usize);
    for row in 0..height as usize {
        let row_start = row * stride;
        pixels.extend_from_slice(&data[row_start..row_start + row_bytes]);
    }
    pixels
}
