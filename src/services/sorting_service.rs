//! The browsing and filing session.
//!
//! Coordinates the navigation state, the category slots, the thumbnail cache
//! and the file moves. Every operation runs to completion on the caller's
//! thread; only thumbnail warm-up happens in the background.

use crate::config::{CATEGORY_SLOTS, WARMUP_COUNT};
use crate::error::{Result, SortError};
use crate::file_utils::{self, PathExt};
use crate::image_cache::ThumbnailCache;
use crate::image_loader::{PreviewSize, ThumbnailSource};
use crate::services::WarmupService;
use crate::settings::{Settings, SettingsStore};
use crate::state::{CategoryStore, NavigationState};
use crate::ui::{self, ViewRenderer};
use log::{error, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Tunables for a session.
#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    pub preview_size: PreviewSize,
    /// How many images after the first are warmed when a folder opens.
    /// Zero disables background warm-up entirely.
    pub warmup_count: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            preview_size: PreviewSize::default(),
            warmup_count: WARMUP_COUNT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No folder, or no images left.
    Empty,
    Browsing,
}

/// Result of filing the current image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignOutcome {
    /// Moved; more images remain.
    Filed { destination: PathBuf },
    /// Moved the last image of the folder.
    Finished { destination: PathBuf },
    /// The slot has no name or folder yet; the shell should open the editor.
    NotConfigured(usize),
    /// Nothing is displayed.
    NoImage,
}

/// Result of the category editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryEdit {
    Save { name: String, path: PathBuf },
    Delete,
    Cancel,
}

pub struct SortingSession<V: ViewRenderer, S: SettingsStore> {
    navigation: NavigationState,
    categories: CategoryStore,
    settings: Settings,
    store: S,
    cache: Arc<ThumbnailCache>,
    warmup: WarmupService,
    view: V,
    options: SessionOptions,
}

impl<V: ViewRenderer, S: SettingsStore> SortingSession<V, S> {
    /// Loads settings from `store` and starts in the empty state.
    pub fn new(
        store: S,
        view: V,
        source: Arc<dyn ThumbnailSource>,
        options: SessionOptions,
    ) -> Self {
        let settings = store.load();
        let categories = CategoryStore::from_records(&settings.categories);
        let cache = Arc::new(ThumbnailCache::new(source, options.preview_size));
        let warmup = WarmupService::new(cache.clone());

        let mut session = Self {
            navigation: NavigationState::new(),
            categories,
            settings,
            store,
            cache,
            warmup,
            view,
            options,
        };
        session.view.render_preview(None);
        session.view.render_status(ui::STATUS_SELECT_FOLDER);
        session.render_categories();
        session
    }

    /// Reopens the folder remembered from the last run, if it still exists.
    pub fn restore_last_folder(&mut self) -> bool {
        let last = PathBuf::from(&self.settings.last_folder);
        if self.settings.last_folder.is_empty() || !last.is_dir() {
            return false;
        }
        info!("Restoring last folder {}", last.display());
        self.select_folder(&last);
        true
    }

    /// Scans `folder`, replaces the image list, clears the cache and shows the
    /// first image. Remembers the folder in settings.
    pub fn select_folder(&mut self, folder: &Path) {
        let files = file_utils::scan_directory(folder);
        info!("Opened {} ({} images)", folder.display(), files.len());

        let generation = self.cache.clear();
        self.navigation.load_folder(folder.to_path_buf(), files);

        self.settings.last_folder = folder.to_string_lossy().into_owned();
        self.persist();

        self.show_current();
        self.schedule_warmup(generation);
    }

    /// Moves forward one image. No-op at the end or when empty.
    pub fn next(&mut self) -> bool {
        let moved = self.navigation.next();
        if moved {
            self.show_current();
        }
        moved
    }

    /// Moves back one image. No-op at the start or when empty.
    pub fn previous(&mut self) -> bool {
        let moved = self.navigation.previous();
        if moved {
            self.show_current();
        }
        moved
    }

    /// Files the current image into the category in `slot`.
    ///
    /// An unusable slot yields `NotConfigured` without touching the list. When
    /// the move fails the image stays current and the error carries the file
    /// name and the underlying reason.
    pub fn assign_category(&mut self, slot: usize) -> Result<AssignOutcome> {
        if slot >= CATEGORY_SLOTS {
            return Err(SortError::SlotOutOfRange(slot));
        }
        let Some(category) = self.categories.usable(slot) else {
            info!("Category {} is not configured", slot + 1);
            return Ok(AssignOutcome::NotConfigured(slot));
        };
        let Some(entry) = self.navigation.current() else {
            return Ok(AssignOutcome::NoImage);
        };

        let moved_to = file_utils::move_image(&entry.path, &category.destination).map_err(
            |source| {
                warn!("Failed to move {}: {}", entry.path.format_for_log(), source);
                SortError::Move {
                    file_name: entry.name.clone(),
                    source,
                }
            },
        )?;

        self.navigation.remove_current();

        if self.navigation.is_empty() {
            info!("All images sorted from this folder");
            self.navigation.reset();
            self.settings.last_folder.clear();
            self.persist();
            self.view.render_preview(None);
            self.view.render_status(ui::STATUS_ALL_SORTED);
            return Ok(AssignOutcome::Finished {
                destination: moved_to,
            });
        }

        self.show_current();
        Ok(AssignOutcome::Filed {
            destination: moved_to,
        })
    }

    /// Applies the outcome of the category editor for `slot`.
    ///
    /// Blank input is rejected before anything is saved.
    pub fn edit_category(&mut self, slot: usize, edit: CategoryEdit) -> Result<()> {
        match edit {
            CategoryEdit::Save { name, path } => {
                self.categories.set(slot, &name, &path)?;
                info!("Category {} set to {} -> {}", slot + 1, name.trim(), path.display());
            }
            CategoryEdit::Delete => {
                self.categories.clear(slot)?;
                info!("Category {} cleared", slot + 1);
            }
            CategoryEdit::Cancel => {
                if slot >= CATEGORY_SLOTS {
                    return Err(SortError::SlotOutOfRange(slot));
                }
                return Ok(());
            }
        }
        self.persist();
        self.render_categories();
        Ok(())
    }

    /// Clears categories, the remembered folder and the session, whatever the
    /// current state.
    pub fn reset(&mut self) {
        info!("Resetting categories and source folder");
        self.categories.clear_all();
        self.settings.last_folder.clear();
        self.navigation.reset();
        self.cache.clear();
        self.persist();

        self.view.render_preview(None);
        self.view.render_status(ui::STATUS_SELECT_FOLDER);
        self.render_categories();
    }

    /// Stores window placement reported by the shell.
    pub fn record_window_geometry(&mut self, size: [u32; 2], position: Option<[i32; 2]>) {
        self.settings.window_size = size;
        self.settings.window_position = position;
        self.persist();
    }

    pub fn phase(&self) -> SessionPhase {
        if self.navigation.is_empty() {
            SessionPhase::Empty
        } else {
            SessionPhase::Browsing
        }
    }

    pub fn navigation(&self) -> &NavigationState {
        &self.navigation
    }

    pub fn categories(&self) -> &CategoryStore {
        &self.categories
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn cache(&self) -> &Arc<ThumbnailCache> {
        &self.cache
    }

    #[cfg(test)]
    pub fn view(&self) -> &V {
        &self.view
    }

    fn render_categories(&mut self) {
        let views = self.categories.views();
        self.view.render_categories(&views);
    }

    /// Renders the current image (or the empty placeholder) and its status.
    fn show_current(&mut self) {
        let Some(entry) = self.navigation.current() else {
            self.view.render_preview(None);
            self.view.render_status(ui::STATUS_NO_IMAGES);
            return;
        };

        let thumbnail = self.cache.get_or_create(&entry.path);
        let status = ui::format_status(
            entry,
            self.navigation.current_index(),
            self.navigation.image_count(),
            thumbnail.is_failed(),
        );
        self.view.render_preview(thumbnail.preview());
        self.view.render_status(&status);

        self.preload_next();
    }

    /// Warms the image after the current one.
    fn preload_next(&self) {
        if self.options.warmup_count == 0 {
            return;
        }
        if let Some(next) = self.navigation.peek_next() {
            if !self.cache.contains(&next.path) {
                self.warmup
                    .schedule(vec![next.path.clone()], self.cache.generation());
            }
        }
    }

    /// Warms the images following the first one after a folder change.
    fn schedule_warmup(&self, generation: u64) {
        let paths: Vec<PathBuf> = self
            .navigation
            .images()
            .iter()
            .skip(1)
            .take(self.options.warmup_count)
            .map(|entry| entry.path.clone())
            .collect();
        self.warmup.schedule(paths, generation);
    }

    /// Writes settings; a failure is shown as a warning and the in-memory state
    /// is kept.
    fn persist(&mut self) {
        self.settings.categories = self.categories.to_records();
        if let Err(e) = self.store.save(&self.settings) {
            error!("{}", e);
            self.view.render_warning(&e.to_string());
        }
    }
}
