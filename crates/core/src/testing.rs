//! In-memory fakes for every port, shared by the unit tests.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::capture::domain::frame_encoder::{EncodeError, FrameEncoder};
use crate::capture::domain::video_source::{CameraAcquisitionError, CaptureConstraints, VideoSource};
use crate::presentation::domain::control_panel::{ControlPanel, ControlState};
use crate::presentation::domain::presentation_surface::{Color, PresentationSurface};
use crate::presentation::domain::status_sink::{Severity, StatusSink};
use crate::presentation::info_reporter::SystemInfoView;
use crate::presentation::results_panel::ResultsView;
use crate::recognition::domain::enrollment_request::EnrollmentRequest;
use crate::recognition::domain::recognition_service::{RecognitionClientError, RecognitionService};
use crate::session::domain::job_dispatcher::{Job, JobDispatcher};
use crate::session::domain::scheduler::{Scheduler, TaskId, TimerKind};
use crate::shared::detection::{RecognitionResult, SystemInfo};
use crate::shared::encoded_frame::EncodedFrame;
use crate::shared::frame::Frame;
use crate::shared::region::Rect;

// ── Video ────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct FakeVideoSource {
    state: Arc<Mutex<VideoState>>,
}

struct VideoState {
    frame: Option<Frame>,
    ready: bool,
    start_error: Option<CameraAcquisitionError>,
    started: bool,
}

impl FakeVideoSource {
    pub fn ready(width: u32, height: u32) -> Self {
        Self::with(Some(Frame::filled(width, height, [80, 80, 80])), true, None)
    }

    pub fn not_ready() -> Self {
        Self::with(None, false, None)
    }

    pub fn failing(error: CameraAcquisitionError) -> Self {
        Self::with(None, false, Some(error))
    }

    fn with(frame: Option<Frame>, ready: bool, start_error: Option<CameraAcquisitionError>) -> Self {
        Self {
            state: Arc::new(Mutex::new(VideoState {
                frame,
                ready,
                start_error,
                started: false,
            })),
        }
    }

    pub fn set_ready(&self, ready: bool) {
        self.state.lock().unwrap().ready = ready;
    }

    pub fn is_started(&self) -> bool {
        self.state.lock().unwrap().started
    }
}

impl VideoSource for FakeVideoSource {
    fn start(&mut self, _constraints: &CaptureConstraints) -> Result<(), CameraAcquisitionError> {
        let mut state = self.state.lock().unwrap();
        if let Some(err) = state.start_error.clone() {
            return Err(err);
        }
        state.started = true;
        Ok(())
    }

    fn stop(&mut self) {
        self.state.lock().unwrap().started = false;
    }

    fn has_enough_data(&self) -> bool {
        let state = self.state.lock().unwrap();
        state.ready && state.frame.is_some()
    }

    fn current_frame(&self) -> Option<Frame> {
        self.state.lock().unwrap().frame.clone()
    }
}

// ── Encoder ──────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct FakeEncoder {
    calls: Arc<Mutex<usize>>,
    failing: bool,
}

impl FakeEncoder {
    pub fn failing() -> Self {
        Self {
            calls: Arc::default(),
            failing: true,
        }
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

impl FrameEncoder for FakeEncoder {
    fn encode(&self, frame: &Frame) -> Result<EncodedFrame, EncodeError> {
        let mut calls = self.calls.lock().unwrap();
        *calls += 1;
        if self.failing {
            return Err(EncodeError::InvalidFrame {
                width: frame.width(),
                height: frame.height(),
            });
        }
        Ok(EncodedFrame::new(format!(
            "data:image/jpeg;base64,frame{}",
            *calls
        )))
    }
}

// ── Surface ──────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceOp {
    Clear,
    Frame(u32, u32),
    Stroke(Rect, Color, u32),
    Fill(Rect, Color),
    Text(String, i32, i32, Color),
}

/// Records drawing since the most recent `clear`, i.e. what is visible.
#[derive(Clone)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    log: Arc<Mutex<SurfaceLog>>,
}

#[derive(Default)]
struct SurfaceLog {
    ops: Vec<SurfaceOp>,
    presented: usize,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            log: Arc::default(),
        }
    }

    pub fn ops(&self) -> Vec<SurfaceOp> {
        self.log.lock().unwrap().ops.clone()
    }

    pub fn presented(&self) -> usize {
        self.log.lock().unwrap().presented
    }

    pub fn stroked(&self) -> Vec<(Rect, Color, u32)> {
        self.ops()
            .into_iter()
            .filter_map(|op| match op {
                SurfaceOp::Stroke(r, c, w) => Some((r, c, w)),
                _ => None,
            })
            .collect()
    }

    pub fn filled(&self) -> Vec<(Rect, Color)> {
        self.ops()
            .into_iter()
            .filter_map(|op| match op {
                SurfaceOp::Fill(r, c) => Some((r, c)),
                _ => None,
            })
            .collect()
    }

    pub fn texts(&self) -> Vec<(String, i32, i32, Color)> {
        self.ops()
            .into_iter()
            .filter_map(|op| match op {
                SurfaceOp::Text(t, x, y, c) => Some((t, x, y, c)),
                _ => None,
            })
            .collect()
    }

    fn push(&self, op: SurfaceOp) {
        self.log.lock().unwrap().ops.push(op);
    }
}

impl PresentationSurface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self) {
        let mut log = self.log.lock().unwrap();
        log.ops.clear();
        log.ops.push(SurfaceOp::Clear);
    }

    fn draw_frame(&mut self, frame: &Frame) {
        self.push(SurfaceOp::Frame(frame.width(), frame.height()));
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, line_width: u32) {
        self.push(SurfaceOp::Stroke(rect, color, line_width));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.push(SurfaceOp::Fill(rect, color));
    }

    fn fill_text(&mut self, text: &str, x: i32, y: i32, color: Color) {
        self.push(SurfaceOp::Text(text.to_string(), x, y, color));
    }

    fn present(&mut self) {
        self.log.lock().unwrap().presented += 1;
    }
}

// ── Status and panel ─────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct RecordingStatus {
    history: Arc<Mutex<Vec<(String, Severity)>>>,
}

impl RecordingStatus {
    pub fn last(&self) -> Option<(String, Severity)> {
        self.history.lock().unwrap().last().cloned()
    }

    pub fn count(&self) -> usize {
        self.history.lock().unwrap().len()
    }
}

impl StatusSink for RecordingStatus {
    fn set_status(&mut self, message: &str, severity: Severity) {
        self.history
            .lock()
            .unwrap()
            .push((message.to_string(), severity));
    }
}

#[derive(Clone, Default)]
pub struct RecordingPanel {
    state: Arc<Mutex<PanelState>>,
}

#[derive(Default)]
struct PanelState {
    controls: Option<ControlState>,
    results: Option<ResultsView>,
    results_updates: usize,
    info: Option<SystemInfoView>,
    name_cleared: usize,
}

impl RecordingPanel {
    pub fn controls(&self) -> Option<ControlState> {
        self.state.lock().unwrap().controls
    }

    pub fn results(&self) -> Option<ResultsView> {
        self.state.lock().unwrap().results.clone()
    }

    pub fn results_updates(&self) -> usize {
        self.state.lock().unwrap().results_updates
    }

    pub fn info(&self) -> Option<SystemInfoView> {
        self.state.lock().unwrap().info.clone()
    }

    pub fn name_cleared(&self) -> usize {
        self.state.lock().unwrap().name_cleared
    }
}

impl ControlPanel for RecordingPanel {
    fn set_controls(&mut self, controls: ControlState) {
        self.state.lock().unwrap().controls = Some(controls);
    }

    fn show_results(&mut self, results: &ResultsView) {
        let mut state = self.state.lock().unwrap();
        state.results = Some(results.clone());
        state.results_updates += 1;
    }

    fn show_system_info(&mut self, info: &SystemInfoView) {
        self.state.lock().unwrap().info = Some(info.clone());
    }

    fn clear_name_input(&mut self) {
        self.state.lock().unwrap().name_cleared += 1;
    }
}

// ── Dispatcher and scheduler ─────────────────────────────────────────

/// Holds jobs instead of running them, so tests decide when and in which
/// order completions arrive.
#[derive(Clone, Default)]
pub struct RecordingDispatcher {
    jobs: Arc<Mutex<Vec<Job>>>,
}

impl RecordingDispatcher {
    pub fn jobs(&self) -> Vec<Job> {
        self.jobs.lock().unwrap().clone()
    }

    pub fn take(&self) -> Vec<Job> {
        std::mem::take(&mut *self.jobs.lock().unwrap())
    }
}

impl JobDispatcher for RecordingDispatcher {
    fn dispatch(&mut self, job: Job) {
        self.jobs.lock().unwrap().push(job);
    }
}

#[derive(Clone, Default)]
pub struct FakeScheduler {
    state: Arc<Mutex<SchedulerState>>,
}

#[derive(Default)]
struct SchedulerState {
    next_id: u64,
    active: BTreeSet<u64>,
    kinds: Vec<(TaskId, TimerKind, Duration)>,
}

impl FakeScheduler {
    pub fn active_of(&self, kind: TimerKind) -> Vec<TaskId> {
        let state = self.state.lock().unwrap();
        state
            .kinds
            .iter()
            .filter(|(id, k, _)| *k == kind && state.active.contains(&id.0))
            .map(|(id, _, _)| *id)
            .collect()
    }

    pub fn created(&self) -> usize {
        self.state.lock().unwrap().kinds.len()
    }

    pub fn period_of(&self, id: TaskId) -> Option<Duration> {
        self.state
            .lock()
            .unwrap()
            .kinds
            .iter()
            .find(|(i, _, _)| *i == id)
            .map(|(_, _, p)| *p)
    }
}

impl Scheduler for FakeScheduler {
    fn every(&mut self, period: Duration, kind: TimerKind) -> TaskId {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let id = TaskId(state.next_id);
        state.active.insert(id.0);
        state.kinds.push((id, kind, period));
        id
    }

    fn cancel(&mut self, id: TaskId) {
        self.state.lock().unwrap().active.remove(&id.0);
    }
}

// ── Service ──────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct FakeService {
    registered: Arc<Mutex<Vec<String>>>,
}

impl FakeService {
    pub fn registered(&self) -> Vec<String> {
        self.registered.lock().unwrap().clone()
    }
}

impl RecognitionService for FakeService {
    fn recognize(&self, _image: &EncodedFrame) -> Result<RecognitionResult, RecognitionClientError> {
        Ok(RecognitionResult::default())
    }

    fn register(&self, request: &EnrollmentRequest) -> Result<(), RecognitionClientError> {
        self.registered
            .lock()
            .unwrap()
            .push(request.label().to_string());
        Ok(())
    }

    fn fetch_system_info(&self) -> Result<SystemInfo, RecognitionClientError> {
        let names = self.registered();
        Ok(SystemInfo {
            known_faces: names.len() as u32,
            face_names: names,
        })
    }
}
