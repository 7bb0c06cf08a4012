use crate::config::SUPPORTED_IMAGE_EXTENSIONS;
use log::{debug, info};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Path formatting helpers for log output.
pub trait PathExt {
    fn format_for_log(&self) -> String;
}

impl PathExt for Path {
    fn format_for_log(&self) -> String {
        self.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.display().to_string())
    }
}

/// Returns true when the path has one of the supported image extensions
/// (case-insensitive).
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext_str| SUPPORTED_IMAGE_EXTENSIONS.contains(&ext_str.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Lists the images directly inside `dir`, sorted by path.
///
/// A missing or unreadable folder yields an empty list.
pub fn scan_directory(dir: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!("Scan unavailable for {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut image_files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_supported_image(path))
        .collect();

    image_files.sort();
    image_files
}

/// File name shown in the status line.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Size of the file in kilobytes, if it can be read.
pub fn file_size_kb(path: &Path) -> Option<f64> {
    fs::metadata(path).ok().map(|m| m.len() as f64 / 1024.0)
}

fn is_cross_device(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::CrossesDevices
}

/// Copy + delete for moves across filesystems. Never overwrites `dst`.
fn copy_then_remove(src: &Path, dst: &Path) -> io::Result<()> {
    let mut reader = fs::File::open(src)?;
    let mut writer = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(dst)?;

    if let Err(e) = io::copy(&mut reader, &mut writer).and_then(|_| writer.sync_all()) {
        drop(writer);
        let _ = fs::remove_file(dst);
        return Err(e);
    }

    fs::remove_file(src)
}

/// Links `src` to `dst` and unlinks `src`. The link fails with
/// `AlreadyExists` if `dst` appears at any point, so nothing is replaced.
fn rename_noreplace(src: &Path, dst: &Path) -> io::Result<()> {
    match fs::hard_link(src, dst) {
        Ok(()) => {
            if let Err(e) = fs::remove_file(src) {
                let _ = fs::remove_file(dst);
                return Err(e);
            }
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists || is_cross_device(&e) => Err(e),
        Err(e) => {
            // Filesystems without hard links (FAT, some network mounts).
            // The existence check and the rename are not atomic here.
            debug!("hard link unavailable for {}: {}", dst.display(), e);
            if dst.exists() {
                return Err(already_exists(dst));
            }
            fs::rename(src, dst)
        }
    }
}

fn already_exists(target: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::AlreadyExists,
        format!("{} already exists", target.display()),
    )
}

/// Moves `src` into `dest_folder`, creating the folder when needed.
///
/// Fails with `AlreadyExists` instead of replacing a file of the same name.
/// Returns the new path of the file.
pub fn move_image(src: &Path, dest_folder: &Path) -> io::Result<PathBuf> {
    fs::create_dir_all(dest_folder)?;

    let file_name = src.file_name().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "source path has no file name")
    })?;
    let target = dest_folder.join(file_name);

    match rename_noreplace(src, &target) {
        Err(e) if is_cross_device(&e) => copy_then_remove(src, &target)?,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => return Err(already_exists(&target)),
        other => other?,
    }

    info!("Moved {} -> {}", src.format_for_log(), target.display());
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn create_test_file(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = fs::File::create(&path).expect("failed to create test file");
        file.write_all(b"fake image data")
            .expect("failed to write test file");
        path
    }

    #[test]
    fn scan_filters_and_sorts() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        create_test_file(temp_dir.path(), "c.jpg");
        create_test_file(temp_dir.path(), "a.jpg");
        create_test_file(temp_dir.path(), "b.PNG");
        create_test_file(temp_dir.path(), "d.TIFF");
        create_test_file(temp_dir.path(), "notes.txt");
        create_test_file(temp_dir.path(), "noext");
        fs::create_dir(temp_dir.path().join("sub.jpg")).unwrap();
        create_test_file(&temp_dir.path().join("sub.jpg"), "inner.jpg");

        let files = scan_directory(temp_dir.path());
        let names: Vec<String> = files.iter().map(|p| display_name(p)).collect();

        assert_eq!(names, vec!["a.jpg", "b.PNG", "c.jpg", "d.TIFF"]);
        let mut sorted = files.clone();
        sorted.sort();
        assert_eq!(files, sorted);
    }

    #[test]
    fn scan_of_missing_folder_is_empty() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let files = scan_directory(&temp_dir.path().join("gone"));
        assert!(files.is_empty());
    }

    #[test]
    fn scan_of_file_path_is_empty() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let file = create_test_file(temp_dir.path(), "a.jpg");
        assert!(scan_directory(&file).is_empty());
    }

    #[test]
    fn move_creates_destination_folder() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let src = create_test_file(temp_dir.path(), "a.jpg");
        let dest = temp_dir.path().join("sorted").join("keep");

        let moved = move_image(&src, &dest).expect("move should succeed");

        assert_eq!(moved, dest.join("a.jpg"));
        assert!(moved.exists());
        assert!(!src.exists());
    }

    #[test]
    fn move_refuses_to_overwrite() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let src = create_test_file(temp_dir.path(), "a.jpg");
        let dest = temp_dir.path().join("dest");
        fs::create_dir(&dest).unwrap();
        fs::write(dest.join("a.jpg"), b"older").unwrap();

        let err = move_image(&src, &dest).unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        assert!(src.exists());
        assert_eq!(fs::read(dest.join("a.jpg")).unwrap(), b"older");
    }

    #[test]
    fn rename_noreplace_never_replaces_existing_target() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let src = temp_dir.path().join("new.jpg");
        fs::write(&src, b"new").unwrap();
        let dst = temp_dir.path().join("taken.jpg");
        fs::write(&dst, b"old").unwrap();

        let err = rename_noreplace(&src, &dst).unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        assert_eq!(fs::read(&dst).unwrap(), b"old");
        assert_eq!(fs::read(&src).unwrap(), b"new");
    }

    #[test]
    fn rename_noreplace_moves_to_free_name() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let src = create_test_file(temp_dir.path(), "a.jpg");
        let dst = temp_dir.path().join("b.jpg");

        rename_noreplace(&src, &dst).unwrap();

        assert!(!src.exists());
        assert_eq!(fs::read(&dst).unwrap(), b"fake image data");
    }

    #[test]
    fn move_fails_when_destination_is_a_file() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let src = create_test_file(temp_dir.path(), "a.jpg");
        let blocker = create_test_file(temp_dir.path(), "blocker");

        assert!(move_image(&src, &blocker).is_err());
        assert!(src.exists());
    }

    #[test]
    fn size_and_name_helpers() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = create_test_file(temp_dir.path(), "photo.jpg");

        assert_eq!(display_name(&path), "photo.jpg");
        let kb = file_size_kb(&path).unwrap();
        assert!((kb - 15.0 / 1024.0).abs() < f64::EPSILON);
        assert_eq!(file_size_kb(&temp_dir.path().join("missing.jpg")), None);
        assert_eq!(path.as_path().format_for_log(), "photo.jpg");
    }
}
