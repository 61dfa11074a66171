use crate::recognition::domain::recognition_service::RecognitionClientError;
use crate::shared::constants::{NO_NAMES_PLACEHOLDER, UNREACHABLE_PLACEHOLDER};
use crate::shared::detection::SystemInfo;

/// What the system-info line shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SystemInfoView {
    Available(SystemInfo),
    /// The poll failed. Startup and steady-state failures look the same.
    Unreachable,
}

impl SystemInfoView {
    pub fn from_poll(result: &Result<SystemInfo, RecognitionClientError>) -> Self {
        match result {
            Ok(info) => SystemInfoView::Available(info.clone()),
            Err(_) => SystemInfoView::Unreachable,
        }
    }
}

impl std::fmt::Display for SystemInfoView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SystemInfoView::Available(info) => {
                let names = if info.face_names.is_empty() {
                    NO_NAMES_PLACEHOLDER.to_string()
                } else {
                    info.face_names.join(", ")
                };
                write!(f, "已知人脸数量: {}\n已注册姓名: {names}", info.known_faces)
            }
            SystemInfoView::Unreachable => write!(f, "{UNREACHABLE_PLACEHOLDER}"),
        }
    }
}
