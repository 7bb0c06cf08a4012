//! Application configuration constants.

/// Supported image file extensions for scanning directories.
pub const SUPPORTED_IMAGE_EXTENSIONS: [&str; 8] =
    ["jpg", "jpeg", "png", "bmp", "gif", "tif", "tiff", "webp"];

/// Number of fixed category slots (bound to keys 1-9).
pub const CATEGORY_SLOTS: usize = 9;

/// Default preview canvas size in pixels.
pub const PREVIEW_WIDTH: u32 = 800;
pub const PREVIEW_HEIGHT: u32 = 600;

/// Number of images after the first one that are decoded in the background
/// when a folder is opened.
pub const WARMUP_COUNT: usize = 15;

/// Letterbox colour behind previews (opaque dark grey).
pub const CANVAS_COLOR: [u8; 4] = [32, 32, 32, 255];

/// Settings location under the platform config directory.
pub const SETTINGS_DIR_NAME: &str = "photo-sorter";
pub const SETTINGS_FILE_NAME: &str = "settings.json";

pub const DEFAULT_WINDOW_SIZE: [u32; 2] = [800, 600];
pub const DEFAULT_UI_BACKEND: &str = "console";
