//! Status line text shown under the preview.

use crate::state::ImageEntry;

pub const STATUS_SELECT_FOLDER: &str = "Select a source folder";
pub const STATUS_NO_IMAGES: &str = "No images found.";
pub const STATUS_ALL_SORTED: &str = "All images sorted from this folder!";

/// `"b.png (2/3) - 12.5 KB"`.
///
/// The size is omitted when the file cannot be stat'ed; a failed decode adds
/// a note so the placeholder is explained.
pub fn format_status(entry: &ImageEntry, index: usize, total: usize, failed: bool) -> String {
    let mut status = format!("{} ({}/{})", entry.name, index + 1, total);
    if let Some(kb) = entry.size_kb() {
        status.push_str(&format!(" - {:.1} KB", kb));
    }
    if failed {
        status.push_str(" - could not load");
    }
    status
}
