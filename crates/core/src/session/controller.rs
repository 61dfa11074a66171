use std::time::Duration;

use crate::capture::domain::video_source::{CaptureConstraints, VideoSource};
use crate::capture::frame_sampler::FrameSampler;
use crate::presentation::domain::control_panel::ControlPanel;
use crate::presentation::domain::presentation_surface::PresentationSurface;
use crate::presentation::domain::status_sink::{Severity, StatusSink};
use crate::presentation::info_reporter::SystemInfoView;
use crate::presentation::overlay_renderer::OverlayRenderer;
use crate::presentation::results_panel::ResultsView;
use crate::recognition::domain::enrollment_request::EnrollmentRequest;
use crate::recognition::domain::recognition_service::RecognitionClientError;
use crate::session::domain::job_dispatcher::{Completion, Job, JobDispatcher, RequestTicket};
use crate::session::domain::scheduler::{Scheduler, TaskId, TimerKind};
use crate::session::events::{Event, Intent};
use crate::session::session::{Mode, Session, SessionError};
use crate::shared::config::ClientConfig;
use crate::shared::constants::STOPPED_PLACEHOLDER;
use crate::shared::detection::{RecognitionResult, SystemInfo};
use crate::shared::frame::Frame;

const MSG_CAMERA_STARTED: &str = "摄像头已启动";
const MSG_CAMERA_NOT_READY: &str = "摄像头尚未就绪";
const MSG_RECOGNIZING: &str = "人脸识别中...";
const MSG_STOPPED: &str = STOPPED_PLACEHOLDER;
const MSG_STOP_BEFORE_CAPTURE: &str = "请先停止识别再进行注册";
const MSG_ENTER_NAME_AND_CONFIRM: &str = "请输入姓名并点击确认注册";
const MSG_ENTER_NAME: &str = "请输入姓名";
const MSG_CAPTURE_FIRST: &str = "请先捕获人脸图像";
const MSG_REGISTERING: &str = "注册中...";

/// Timing and policy knobs for the session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControllerConfig {
    pub cadence: Duration,
    pub info_poll_interval: Duration,
    /// Drop a recognition result older than the one already displayed.
    /// When off, whichever result completes last is painted.
    pub discard_stale_responses: bool,
    pub constraints: CaptureConstraints,
}

impl From<&ClientConfig> for ControllerConfig {
    fn from(config: &ClientConfig) -> Self {
        Self {
            cadence: config.cadence(),
            info_poll_interval: config.info_poll_interval(),
            discard_stale_responses: config.discard_stale_responses,
            constraints: CaptureConstraints::new(config.ideal_width, config.ideal_height),
        }
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::from(&ClientConfig::default())
    }
}

/// Everything the controller talks to.
pub struct ClientPorts {
    pub video: Box<dyn VideoSource>,
    pub surface: Box<dyn PresentationSurface>,
    pub status: Box<dyn StatusSink>,
    pub panel: Box<dyn ControlPanel>,
    pub dispatcher: Box<dyn JobDispatcher>,
    pub scheduler: Box<dyn Scheduler>,
}

/// Drives the session: turns intents, timer ticks and job completions into
/// state transitions and UI updates.
///
/// All methods run on the session thread, one event at a time. Network
/// calls leave through the dispatcher and come back as completions, which
/// are checked for relevance before anything is painted:
/// - a recognition result from an earlier run, or arriving after stop, is
///   dropped;
/// - with `discard_stale_responses`, a result older than the displayed one
///   is dropped too.
pub struct ClientController {
    config: ControllerConfig,
    session: Session,
    video: Box<dyn VideoSource>,
    surface: Box<dyn PresentationSurface>,
    status: Box<dyn StatusSink>,
    panel: Box<dyn ControlPanel>,
    dispatcher: Box<dyn JobDispatcher>,
    scheduler: Box<dyn Scheduler>,
    sampler: FrameSampler,
    renderer: OverlayRenderer,
    camera_ready: bool,
    cadence: Option<TaskId>,
    info_poll: Option<TaskId>,
    generation: u64,
    next_sequence: u64,
    displayed_sequence: Option<u64>,
    last_painted: Option<Frame>,
    enrollment_frame: Option<Frame>,
}

impl ClientController {
    pub fn new(config: ControllerConfig, ports: ClientPorts, sampler: FrameSampler) -> Self {
        Self {
            config,
            session: Session::new(),
            video: ports.video,
            surface: ports.surface,
            status: ports.status,
            panel: ports.panel,
            dispatcher: ports.dispatcher,
            scheduler: ports.scheduler,
            sampler,
            renderer: OverlayRenderer::new(),
            camera_ready: false,
            cadence: None,
            info_poll: None,
            generation: 0,
            next_sequence: 0,
            displayed_sequence: None,
            last_painted: None,
            enrollment_frame: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn mode(&self) -> Mode {
        self.session.mode()
    }

    pub fn camera_ready(&self) -> bool {
        self.camera_ready
    }

    pub fn cadence_active(&self) -> bool {
        self.cadence.is_some()
    }

    /// Startup: initial controls, camera acquisition, and the info poll
    /// (once now, then periodically for the client's lifetime).
    pub fn initialize(&mut self) {
        self.sync_controls();

        match self.video.start(&self.config.constraints) {
            Ok(()) => {
                self.camera_ready = true;
                log::info!("Camera acquired");
                self.report(MSG_CAMERA_STARTED, Severity::Success);
            }
            Err(e) => {
                log::error!("Error accessing camera: {e}");
                self.report(&format!("无法访问摄像头: {e}"), Severity::Error);
            }
        }

        self.dispatcher.dispatch(Job::FetchSystemInfo);
        if self.info_poll.is_none() {
            self.info_poll = Some(
                self.scheduler
                    .every(self.config.info_poll_interval, TimerKind::InfoPoll),
            );
        }
    }

    pub fn handle(&mut self, event: Event) {
        match event {
            Event::Intent(intent) => self.handle_intent(intent),
            Event::Timer { id, kind } => self.handle_timer(id, kind),
            Event::Completed(completion) => self.handle_completion(completion),
            Event::Shutdown => self.shutdown(),
        }
    }

    /// Cancels both periodic tasks and releases the camera.
    pub fn shutdown(&mut self) {
        if let Some(id) = self.cadence.take() {
            self.scheduler.cancel(id);
        }
        if let Some(id) = self.info_poll.take() {
            self.scheduler.cancel(id);
        }
        self.video.stop();
        self.camera_ready = false;
        log::info!("Session shut down");
    }

    fn handle_intent(&mut self, intent: Intent) {
        match intent {
            Intent::Start => self.start_recognition(),
            Intent::Stop => self.stop_recognition(),
            Intent::Capture => self.prepare_registration(),
            Intent::NameChanged(text) => self.session.set_pending_label(&text),
            Intent::ConfirmRegister => self.confirm_registration(),
        }
    }

    fn start_recognition(&mut self) {
        if let Err(e) = self.session.start() {
            log::debug!("Ignoring start: {e}");
            return;
        }
        self.enrollment_frame = None;
        self.generation += 1;
        self.displayed_sequence = None;
        if let Some(stale) = self.cadence.take() {
            self.scheduler.cancel(stale);
        }
        self.cadence = Some(self.scheduler.every(self.config.cadence, TimerKind::Cadence));

        log::info!("Recognition started (run {})", self.generation);
        self.sync_controls();
        self.report(MSG_RECOGNIZING, Severity::Success);
    }

    fn stop_recognition(&mut self) {
        if let Err(e) = self.session.stop() {
            log::debug!("Ignoring stop: {e}");
            return;
        }
        if let Some(id) = self.cadence.take() {
            self.scheduler.cancel(id);
        }
        self.last_painted = None;

        log::info!("Recognition stopped (run {})", self.generation);
        self.report(MSG_STOPPED, Severity::Info);
        self.sync_controls();
        self.renderer.clear(self.surface.as_mut());
        self.panel.show_results(&ResultsView::Stopped);
    }

    fn prepare_registration(&mut self) {
        if self.session.is_recognizing() {
            log::warn!("Capture rejected: {}", SessionError::CaptureWhileRecognizing);
            self.report(MSG_STOP_BEFORE_CAPTURE, Severity::Error);
            return;
        }
        let Some(frame) = self.sampler.snapshot(self.video.as_ref(), self.surface.as_mut())
        else {
            log::warn!("Capture rejected: no video frame available");
            self.report(MSG_CAMERA_NOT_READY, Severity::Error);
            return;
        };
        if let Err(e) = self.session.begin_enrollment() {
            log::warn!("Capture rejected: {e}");
            return;
        }

        self.enrollment_frame = Some(frame);
        self.panel.clear_name_input();
        self.sync_controls();
        self.report(MSG_ENTER_NAME_AND_CONFIRM, Severity::Info);
    }

    /// Encodes the held snapshot before committing, so a failed encode
    /// leaves the capture and the typed name in place for another try.
    fn confirm_registration(&mut self) {
        let label = match self.session.enrollment_label() {
            Ok(label) => label.to_string(),
            Err(SessionError::EmptyLabel) => {
                log::warn!("Registration rejected: empty name");
                self.report(MSG_ENTER_NAME, Severity::Error);
                return;
            }
            Err(e) => {
                log::warn!("Registration rejected: {e}");
                self.report(MSG_CAPTURE_FIRST, Severity::Error);
                return;
            }
        };

        let Some(frame) = self.enrollment_frame.as_ref() else {
            log::error!("Registration for {label} has no captured frame");
            self.report(MSG_CAPTURE_FIRST, Severity::Error);
            return;
        };
        let image = match self.sampler.encode(frame) {
            Ok(image) => image,
            Err(e) => {
                log::error!("Registration encoding failed: {e}");
                self.report(&format!("注册请求失败: {e}"), Severity::Error);
                return;
            }
        };
        let Some(request) = EnrollmentRequest::new(image, &label) else {
            self.report(MSG_ENTER_NAME, Severity::Error);
            return;
        };
        if let Err(e) = self.session.confirm_registration() {
            log::warn!("Registration rejected: {e}");
            return;
        }
        self.enrollment_frame = None;
        self.sync_controls();

        log::info!("Registering {label}");
        self.report(MSG_REGISTERING, Severity::Info);
        self.dispatcher.dispatch(Job::Register(request));
    }

    fn handle_timer(&mut self, id: TaskId, kind: TimerKind) {
        match kind {
            TimerKind::Cadence => {
                if self.cadence != Some(id) || !self.session.is_recognizing() {
                    log::debug!("Ignoring tick from inactive cadence {id:?}");
                    return;
                }
                self.sample_frame();
            }
            TimerKind::InfoPoll => {
                if self.info_poll == Some(id) {
                    self.dispatcher.dispatch(Job::FetchSystemInfo);
                }
            }
        }
    }

    fn sample_frame(&mut self) {
        match self
            .sampler
            .sample(self.video.as_ref(), self.surface.as_mut())
        {
            Ok(None) => {}
            Ok(Some(sample)) => {
                self.next_sequence += 1;
                let ticket = RequestTicket {
                    generation: self.generation,
                    sequence: self.next_sequence,
                };
                self.last_painted = Some(sample.frame);
                self.dispatcher.dispatch(Job::Recognize {
                    ticket,
                    image: sample.encoded,
                });
            }
            Err(e) => {
                log::error!("Frame encoding failed: {e}");
                self.report(&format!("识别请求失败: {e}"), Severity::Error);
            }
        }
    }

    fn handle_completion(&mut self, completion: Completion) {
        match completion {
            Completion::Recognition { ticket, outcome } => self.apply_recognition(ticket, outcome),
            Completion::Registration { label, outcome } => self.apply_registration(&label, outcome),
            Completion::SystemInfo(outcome) => self.apply_system_info(outcome),
        }
    }

    fn apply_recognition(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<RecognitionResult, RecognitionClientError>,
    ) {
        if !self.session.is_recognizing() || ticket.generation != self.generation {
            log::debug!("Discarding late recognition result {ticket:?}");
            return;
        }

        match outcome {
            Ok(result) => {
                if self.config.discard_stale_responses
                    && self
                        .displayed_sequence
                        .is_some_and(|shown| ticket.sequence <= shown)
                {
                    log::debug!("Discarding out-of-order recognition result {ticket:?}");
                    return;
                }
                self.displayed_sequence = Some(ticket.sequence);
                log::debug!(
                    "Recognized {} face(s), {} known",
                    result.len(),
                    result.known_count()
                );
                self.panel.show_results(&ResultsView::from_result(&result));
                self.renderer
                    .render(self.surface.as_mut(), self.last_painted.as_ref(), &result);
            }
            Err(e) => {
                log::error!("Recognition error: {e}");
                let message = match &e {
                    RecognitionClientError::Recognition(msg) => format!("识别失败: {msg}"),
                    other => format!("识别请求失败: {other}"),
                };
                self.report(&message, Severity::Error);
            }
        }
    }

    fn apply_registration(&mut self, label: &str, outcome: Result<(), RecognitionClientError>) {
        match outcome {
            Ok(()) => {
                log::info!("Registered {label}");
                self.report(&format!("成功注册: {label}"), Severity::Success);
                self.session.clear_pending_label();
                self.panel.clear_name_input();
                self.dispatcher.dispatch(Job::FetchSystemInfo);
            }
            Err(e) => {
                log::error!("Registration error: {e}");
                let message = match &e {
                    RecognitionClientError::Registration(msg) => format!("注册失败: {msg}"),
                    other => format!("注册请求失败: {other}"),
                };
                self.report(&message, Severity::Error);
            }
        }
    }

    fn apply_system_info(&mut self, outcome: Result<SystemInfo, RecognitionClientError>) {
        if let Err(e) = &outcome {
            log::warn!("Error loading system info: {e}");
        }
        self.panel.show_system_info(&SystemInfoView::from_poll(&outcome));
    }

    fn sync_controls(&mut self) {
        self.panel.set_controls(self.session.controls());
    }

    fn report(&mut self, message: &str, severity: Severity) {
        self.status.set_status(message, severity);
    }
}
