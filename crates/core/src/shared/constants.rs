pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";

/// Period of the recognition cadence while recognizing.
pub const CADENCE_MS: u64 = 1000;
/// Period of the system-info poll; runs for the whole client lifetime.
pub const INFO_POLL_MS: u64 = 10_000;
pub const REQUEST_TIMEOUT_MS: u64 = 10_000;

/// JPEG quality on the 1-100 scale (0.8 on the browser's 0-1 scale).
pub const JPEG_QUALITY: u8 = 80;

pub const IDEAL_WIDTH: u32 = 640;
pub const IDEAL_HEIGHT: u32 = 480;

/// Name the service reports for a face it detected but could not match.
pub const UNKNOWN_NAME: &str = "Unknown";

pub const STOPPED_PLACEHOLDER: &str = "识别已停止";
pub const NO_FACES_PLACEHOLDER: &str = "未检测到人脸";
pub const NO_NAMES_PLACEHOLDER: &str = "无";
pub const UNREACHABLE_PLACEHOLDER: &str = "无法连接到后端服务";

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];
