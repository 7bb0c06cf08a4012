//! Navigation state for the current folder, its images and the current position.

use crate::file_utils::{self, PathExt};
use log::{debug, warn};
use std::path::{Path, PathBuf};

/// Direction for navigation through images.
#[derive(Debug, Clone, Copy)]
enum Direction {
    Next,
    Previous,
}

/// One image of the scanned folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    pub path: PathBuf,
    pub name: String,
}

impl ImageEntry {
    pub fn new(path: PathBuf) -> Self {
        let name = file_utils::display_name(&path);
        Self { path, name }
    }

    /// Read from disk on every call.
    pub fn size_kb(&self) -> Option<f64> {
        file_utils::file_size_kb(&self.path)
    }
}

/// Current folder, image list and index.
///
/// `current_index` always points at an entry while `images` is non-empty and
/// is 0 otherwise.
#[derive(Debug, Default)]
pub struct NavigationState {
    current_folder: Option<PathBuf>,
    images: Vec<ImageEntry>,
    current_index: usize,
}

impl NavigationState {
    /// Creates a new empty navigation state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the folder and its image list wholesale. The list is kept in
    /// the order given.
    pub fn load_folder(&mut self, folder: PathBuf, files: Vec<PathBuf>) {
        let start = std::time::Instant::now();
        self.images = files.into_iter().map(ImageEntry::new).collect();
        self.current_index = 0;
        debug!(
            "Loaded {} images from {} in {:?}",
            self.images.len(),
            folder.display(),
            start.elapsed()
        );
        self.current_folder = Some(folder);
    }

    /// Forgets the folder and all images.
    pub fn reset(&mut self) {
        self.current_folder = None;
        self.images.clear();
        self.current_index = 0;
    }

    fn navigate_to(&mut self, direction: Direction) -> bool {
        if self.images.is_empty() {
            warn!("No images available for navigation");
            return false;
        }

        match direction {
            Direction::Next if self.current_index + 1 < self.images.len() => {
                self.current_index += 1;
            }
            Direction::Previous if self.current_index > 0 => {
                self.current_index -= 1;
            }
            _ => {
                debug!("Already at the {:?} boundary", direction);
                return false;
            }
        }
        true
    }

    /// Moves to the next image. Returns false at the last image.
    pub fn next(&mut self) -> bool {
        self.navigate_to(Direction::Next)
    }

    /// Moves to the previous image. Returns false at the first image.
    pub fn previous(&mut self) -> bool {
        self.navigate_to(Direction::Previous)
    }

    /// Removes the current entry and clamps the index to the shorter list.
    pub fn remove_current(&mut self) -> Option<ImageEntry> {
        if self.images.is_empty() {
            return None;
        }
        let removed = self.images.remove(self.current_index);
        debug!("Removed {} from the list", removed.path.format_for_log());
        self.current_index = self.current_index.min(self.images.len().saturating_sub(1));
        Some(removed)
    }

    pub fn current(&self) -> Option<&ImageEntry> {
        self.images.get(self.current_index)
    }

    /// The entry after the current one, without moving.
    pub fn peek_next(&self) -> Option<&ImageEntry> {
        self.images.get(self.current_index + 1)
    }

    pub fn current_folder(&self) -> Option<&Path> {
        self.current_folder.as_deref()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn images(&self) -> &[ImageEntry] {
        &self.images
    }

    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}
