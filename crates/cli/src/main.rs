use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use std::thread;

use clap::{Parser, Subcommand};
use crossbeam_channel::Sender;

use facewatch_core::capture::domain::frame_encoder::FrameEncoder;
use facewatch_core::capture::domain::video_source::{CaptureConstraints, VideoSource};
use facewatch_core::capture::frame_sampler::FrameSampler;
use facewatch_core::capture::infrastructure::ffmpeg_camera_source::FfmpegCameraSource;
use facewatch_core::capture::infrastructure::jpeg_data_url_encoder::JpegDataUrlEncoder;
use facewatch_core::capture::infrastructure::still_image_source::StillImageSource;
use facewatch_core::presentation::domain::presentation_surface::PresentationSurface;
use facewatch_core::presentation::info_reporter::SystemInfoView;
use facewatch_core::presentation::infrastructure::console_reporter::{
    ConsoleControlPanel, ConsoleStatusSink,
};
use facewatch_core::presentation::infrastructure::raster_surface::RasterSurface;
use facewatch_core::presentation::overlay_renderer::OverlayRenderer;
use facewatch_core::presentation::results_panel::ResultsView;
use facewatch_core::recognition::domain::enrollment_request::EnrollmentRequest;
use facewatch_core::recognition::domain::recognition_service::RecognitionService;
use facewatch_core::recognition::infrastructure::http_recognition_client::HttpRecognitionClient;
use facewatch_core::session::controller::{ClientController, ClientPorts, ControllerConfig};
use facewatch_core::session::event_loop;
use facewatch_core::session::events::{Event, Intent};
use facewatch_core::session::infrastructure::thread_dispatcher::ThreadDispatcher;
use facewatch_core::session::infrastructure::thread_scheduler::ThreadScheduler;
use facewatch_core::shared::config::ClientConfig;
use facewatch_core::shared::constants::IMAGE_EXTENSIONS;
use facewatch_core::shared::frame::Frame;

/// Live face recognition against a remote recognition service.
#[derive(Parser)]
#[command(name = "facewatch")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Config file (defaults to the per-user config directory).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Base URL of the recognition service.
    #[arg(long, global = true)]
    backend_url: Option<String>,

    /// Camera device, e.g. /dev/video0, or any ffmpeg input URL.
    #[arg(long, global = true)]
    device: Option<String>,

    /// ffmpeg input format for the device (v4l2, avfoundation, dshow).
    #[arg(long, global = true)]
    format: Option<String>,

    /// Use a still image instead of the camera.
    #[arg(long, global = true)]
    image: Option<PathBuf>,

    /// Write the composited frame and overlay to this image file.
    #[arg(long, global = true)]
    overlay_out: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive session driven by commands on stdin (the default).
    Run,
    /// Recognize the faces in a single image.
    Recognize {
        /// Image to send.
        input: PathBuf,
    },
    /// Register the face in an image under a name.
    Register {
        /// Image containing the face.
        input: PathBuf,

        /// Name to register.
        #[arg(long)]
        name: String,
    },
    /// Print the service's known-face count and names.
    Status,
    /// Write the effective configuration, flags included, to the config file.
    SaveConfig,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    log::debug!("Using backend {}", config.backend_url);

    match &cli.command {
        None | Some(Command::Run) => run_session(&cli, config),
        Some(Command::Recognize { input }) => run_recognize(input, cli.overlay_out.as_deref(), &config),
        Some(Command::Register { input, name }) => run_register(input, name, &config),
        Some(Command::Status) => run_status(&config),
        Some(Command::SaveConfig) => run_save_config(cli.config.as_deref(), &config),
    }
}

fn resolve_config(cli: &Cli) -> Result<ClientConfig, Box<dyn std::error::Error>> {
    let creating = matches!(cli.command, Some(Command::SaveConfig));
    let mut config = match &cli.config {
        Some(path) if creating && !path.exists() => ClientConfig::default(),
        Some(path) => ClientConfig::load_from(path)?,
        None => ClientConfig::load(),
    };
    if let Some(url) = &cli.backend_url {
        config.backend_url = url.clone();
    }
    if let Some(device) = &cli.device {
        config.camera_device = device.clone();
    }
    if let Some(format) = &cli.format {
        config.camera_format = Some(format.clone());
    }
    config.validate()?;
    Ok(config)
}

fn build_client(config: &ClientConfig) -> Result<HttpRecognitionClient, Box<dyn std::error::Error>> {
    Ok(HttpRecognitionClient::new(
        &config.backend_url,
        config.request_timeout(),
    )?)
}

fn run_session(cli: &Cli, config: ClientConfig) -> Result<(), Box<dyn std::error::Error>> {
    let service: Arc<dyn RecognitionService> = Arc::new(build_client(&config)?);
    let (tx, rx) = crossbeam_channel::unbounded::<Event>();

    let video: Box<dyn VideoSource> = match &cli.image {
        Some(path) => Box::new(StillImageSource::from_path(path)),
        None => Box::new(FfmpegCameraSource::new(
            config.camera_device.clone(),
            config.camera_format.clone(),
        )),
    };
    let mut surface = RasterSurface::new(config.ideal_width, config.ideal_height);
    if let Some(path) = &cli.overlay_out {
        surface = surface.with_output(path);
    }

    let ports = ClientPorts {
        video,
        surface: Box::new(surface),
        status: Box::new(ConsoleStatusSink::new()),
        panel: Box::new(ConsoleControlPanel::new()),
        dispatcher: Box::new(ThreadDispatcher::new(service, tx.clone())),
        scheduler: Box::new(ThreadScheduler::new(tx.clone())),
    };
    let sampler = FrameSampler::new(Box::new(JpegDataUrlEncoder::new(config.jpeg_quality)));
    let mut controller = ClientController::new(ControllerConfig::from(&config), ports, sampler);

    controller.initialize();
    spawn_stdin_reader(tx);
    eprintln!("commands: start, stop, capture, name <text>, register, quit");

    let handled = event_loop::run(&mut controller, &rx);
    log::info!("Session ended after {handled} events");
    Ok(())
}

fn spawn_stdin_reader(events: Sender<Event>) {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            match parse_command(&line) {
                Some(Event::Shutdown) => break,
                Some(event) => {
                    if events.send(event).is_err() {
                        return;
                    }
                }
                None if line.trim().is_empty() => {}
                None => eprintln!("Unknown command: {}", line.trim()),
            }
        }
        let _ = events.send(Event::Shutdown);
    });
}

/// Maps a line of input to a session event.
fn parse_command(line: &str) -> Option<Event> {
    let line = line.trim();
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };
    let intent = match command {
        "start" => Intent::Start,
        "stop" => Intent::Stop,
        "capture" => Intent::Capture,
        "name" => Intent::NameChanged(rest.to_string()),
        "register" => Intent::ConfirmRegister,
        "quit" | "exit" => return Some(Event::Shutdown),
        _ => return None,
    };
    Some(intent.into())
}

fn run_recognize(
    input: &Path,
    overlay_out: Option<&Path>,
    config: &ClientConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let frame = load_image(input)?;
    let client = build_client(config)?;
    let encoded = JpegDataUrlEncoder::new(config.jpeg_quality).encode(&frame)?;

    let result = client.recognize(&encoded)?;
    for line in ResultsView::from_result(&result).lines() {
        println!("{line}");
    }

    if let Some(path) = overlay_out {
        let mut surface = RasterSurface::new(frame.width(), frame.height()).with_output(path);
        OverlayRenderer::new().render(&mut surface, Some(&frame), &result);
        for label in surface.labels() {
            log::debug!("Label {} at ({}, {})", label.text, label.x, label.y);
        }
        log::info!(
            "Overlay ({}x{}) written to {}",
            surface.width(),
            surface.height(),
            path.display()
        );
    }
    Ok(())
}

fn run_register(
    input: &Path,
    name: &str,
    config: &ClientConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let frame = load_image(input)?;
    let encoded = JpegDataUrlEncoder::new(config.jpeg_quality).encode(&frame)?;
    let request = EnrollmentRequest::new(encoded, name).ok_or("请输入姓名")?;

    build_client(config)?.register(&request)?;
    println!("成功注册: {}", request.label());
    Ok(())
}

fn run_status(config: &ClientConfig) -> Result<(), Box<dyn std::error::Error>> {
    let outcome = build_client(config)?.fetch_system_info();
    if let Err(e) = &outcome {
        log::warn!("Error loading system info: {e}");
    }
    println!("{}", SystemInfoView::from_poll(&outcome));
    Ok(())
}

fn run_save_config(
    path: Option<&Path>,
    config: &ClientConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let written = match path {
        Some(path) => {
            config.save_to(path)?;
            path.to_path_buf()
        }
        None => config.save()?,
    };
    println!("Config written to {}", written.display());
    Ok(())
}

fn load_image(path: &Path) -> Result<Frame, Box<dyn std::error::Error>> {
    if !is_image(path) {
        return Err(format!("Not a supported image file: {}", path.display()).into());
    }
    let mut source = StillImageSource::from_path(path);
    source.start(&CaptureConstraints::new(0, 0))?;
    Ok(source
        .current_frame()
        .ok_or_else(|| format!("Could not read image: {}", path.display()))?)
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
