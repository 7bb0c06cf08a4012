use crate::services::SortingSession;
use crate::settings::SettingsStore;
use crate::ui::ViewRenderer;
use std::ffi::OsString;
use std::path::PathBuf;

/// First non-flag argument that names a directory.
fn startup_folder_from_args<I>(args: I) -> Option<PathBuf>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .filter_map(|arg| {
            let arg_str = arg.to_string_lossy();
            if arg_str.starts_with('-') {
                None
            } else {
                Some(PathBuf::from(arg))
            }
        })
        .find(|path| path.is_dir())
}

/// Opens the folder given on the command line, or else the one remembered
/// from the previous run.
pub fn configure_startup_opening<V, S>(session: &mut SortingSession<V, S>)
where
    V: ViewRenderer,
    S: SettingsStore,
{
    if let Some(folder) = startup_folder_from_args(std::env::args_os().skip(1)) {
        log::info!("Opening folder from command line: {}", folder.display());
        session.select_folder(&folder);
    } else if !session.restore_last_folder() {
        log::debug!("No folder to open at startup");
    }
}

/// Terminal size in columns and rows, reported as the console's window size.
pub fn terminal_geometry() -> Option<[u32; 2]> {
    geometry_from_vars(std::env::var("COLUMNS").ok(), std::env::var("LINES").ok())
}

fn geometry_from_vars(columns: Option<String>, lines: Option<String>) -> Option<[u32; 2]> {
    let parse = |value: String| value.trim().parse::<u32>().ok().filter(|&n| n > 0);
    Some([parse(columns?)?, parse(lines?)?])
}
