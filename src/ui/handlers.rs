//! Command handling for the console shell.
//!
//! Each input line is either a command (`open`, `n`, `p`, `1`-`9`, `edit`,
//! `delete`, `status`, `reset`, `quit`) or, while the category editor is open, an answer
//! to the editor's prompt. The shell owns the editor state; digits typed into
//! the editor are field input and never reach the session as shortcuts.

use crate::error::SortError;
use crate::services::{AssignOutcome, CategoryEdit, SessionPhase, SortingSession};
use crate::settings::SettingsStore;
use crate::ui::ViewRenderer;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

const HELP: &str =
    "commands: open <folder> | n | p | 1-9 | edit <n> | delete <n> | status | reset | quit";

/// Whether the shell keeps reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Open(PathBuf),
    Next,
    Previous,
    Assign(usize),
    Edit(usize),
    Delete(usize),
    Status,
    Reset,
    Help,
    Quit,
    Unknown(String),
}

/// Category editor progress.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Mode {
    Browse,
    EditName { slot: usize },
    EditPath { slot: usize, name: String },
}

/// `"1"`..`"9"` to a zero-based slot.
fn parse_slot(text: &str) -> Option<usize> {
    match text.trim().parse::<usize>() {
        Ok(n @ 1..=9) => Some(n - 1),
        _ => None,
    }
}

fn parse_command(line: &str) -> Command {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word {
        "open" | "o" if !rest.is_empty() => Command::Open(PathBuf::from(rest)),
        "n" | "next" => Command::Next,
        "p" | "prev" | "previous" => Command::Previous,
        "edit" | "e" => parse_slot(rest).map_or(Command::Unknown(line.into()), Command::Edit),
        "delete" | "d" => parse_slot(rest).map_or(Command::Unknown(line.into()), Command::Delete),
        "status" | "s" => Command::Status,
        "reset" => Command::Reset,
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        _ => parse_slot(word)
            .filter(|_| rest.is_empty())
            .map_or(Command::Unknown(line.into()), Command::Assign),
    }
}

/// Line-oriented UI shell.
pub struct Shell<W: Write> {
    out: W,
    mode: Mode,
    geometry: Option<[u32; 2]>,
}

impl<W: Write> Shell<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            mode: Mode::Browse,
            geometry: None,
        }
    }

    /// Size reported to the session when the shell closes.
    pub fn with_geometry(mut self, geometry: Option<[u32; 2]>) -> Self {
        self.geometry = geometry;
        self
    }

    /// True while the category editor is waiting for input.
    pub fn is_modal_open(&self) -> bool {
        self.mode != Mode::Browse
    }

    /// Reads commands until `quit` or end of input, then reports the shell's
    /// geometry to the session.
    pub fn run<R, V, S>(
        &mut self,
        session: &mut SortingSession<V, S>,
        mut input: R,
    ) -> io::Result<()>
    where
        R: BufRead,
        V: ViewRenderer,
        S: SettingsStore,
    {
        writeln!(self.out, "{}", HELP)?;
        let mut line = String::new();
        loop {
            if !self.is_modal_open() {
                write!(self.out, "> ")?;
                self.out.flush()?;
            }
            line.clear();
            if input.read_line(&mut line)? == 0 {
                break;
            }
            if self.handle_line(session, &line)? == Flow::Quit {
                break;
            }
        }

        if let Some(size) = self.geometry {
            let position = session.settings().window_position;
            session.record_window_geometry(size, position);
        }
        Ok(())
    }

    pub fn handle_line<V, S>(
        &mut self,
        session: &mut SortingSession<V, S>,
        line: &str,
    ) -> io::Result<Flow>
    where
        V: ViewRenderer,
        S: SettingsStore,
    {
        match std::mem::replace(&mut self.mode, Mode::Browse) {
            Mode::Browse => self.handle_command(session, parse_command(line)),
            Mode::EditName { slot } => {
                self.handle_name(session, slot, line.trim())?;
                Ok(Flow::Continue)
            }
            Mode::EditPath { slot, name } => {
                self.handle_path(session, slot, name, line.trim())?;
                Ok(Flow::Continue)
            }
        }
    }

    fn handle_command<V, S>(
        &mut self,
        session: &mut SortingSession<V, S>,
        command: Command,
    ) -> io::Result<Flow>
    where
        V: ViewRenderer,
        S: SettingsStore,
    {
        match command {
            Command::Open(folder) => session.select_folder(&folder),
            Command::Next => {
                session.next();
            }
            Command::Previous => {
                session.previous();
            }
            Command::Assign(slot) => self.assign(session, slot)?,
            Command::Edit(slot) => self.open_editor(session, slot)?,
            Command::Delete(slot) => self.finish_edit(session, slot, CategoryEdit::Delete)?,
            Command::Status => self.print_status(session)?,
            Command::Reset => session.reset(),
            Command::Help => writeln!(self.out, "{}", HELP)?,
            Command::Quit => return Ok(Flow::Quit),
            Command::Unknown(text) if text.is_empty() => {}
            Command::Unknown(text) => writeln!(self.out, "unknown command: {} ({})", text, HELP)?,
        }
        Ok(Flow::Continue)
    }

    fn print_status<V, S>(&mut self, session: &SortingSession<V, S>) -> io::Result<()>
    where
        V: ViewRenderer,
        S: SettingsStore,
    {
        let navigation = session.navigation();
        match (session.phase(), navigation.current_folder()) {
            (SessionPhase::Browsing, Some(folder)) => writeln!(
                self.out,
                "{}: image {} of {}, {} previews cached",
                folder.display(),
                navigation.current_index() + 1,
                navigation.image_count(),
                session.cache().len()
            ),
            _ => writeln!(self.out, "no images open"),
        }
    }

    fn assign<V, S>(&mut self, session: &mut SortingSession<V, S>, slot: usize) -> io::Result<()>
    where
        V: ViewRenderer,
        S: SettingsStore,
    {
        match session.assign_category(slot) {
            Ok(AssignOutcome::Filed { destination }) => {
                writeln!(self.out, "moved to {}", destination.display())
            }
            Ok(AssignOutcome::Finished { destination }) => {
                writeln!(self.out, "moved to {}", destination.display())
            }
            Ok(AssignOutcome::NotConfigured(slot)) => self.open_editor(session, slot),
            Ok(AssignOutcome::NoImage) => writeln!(self.out, "no image to file"),
            Err(e) => writeln!(self.out, "error: {}", e),
        }
    }

    fn open_editor<V, S>(&mut self, session: &SortingSession<V, S>, slot: usize) -> io::Result<()>
    where
        V: ViewRenderer,
        S: SettingsStore,
    {
        let Some(current) = session.categories().get(slot) else {
            return writeln!(self.out, "error: {}", SortError::SlotOutOfRange(slot));
        };
        writeln!(
            self.out,
            "Category {} name [{}] (empty to cancel, '-' to delete):",
            slot + 1,
            current.name
        )?;
        self.mode = Mode::EditName { slot };
        Ok(())
    }

    fn handle_name<V, S>(
        &mut self,
        session: &mut SortingSession<V, S>,
        slot: usize,
        name: &str,
    ) -> io::Result<()>
    where
        V: ViewRenderer,
        S: SettingsStore,
    {
        match name {
            "" => self.finish_edit(session, slot, CategoryEdit::Cancel),
            "-" => self.finish_edit(session, slot, CategoryEdit::Delete),
            _ => {
                writeln!(self.out, "Destination folder:")?;
                self.mode = Mode::EditPath {
                    slot,
                    name: name.to_string(),
                };
                Ok(())
            }
        }
    }

    fn handle_path<V, S>(
        &mut self,
        session: &mut SortingSession<V, S>,
        slot: usize,
        name: String,
        path: &str,
    ) -> io::Result<()>
    where
        V: ViewRenderer,
        S: SettingsStore,
    {
        if path.is_empty() {
            return self.finish_edit(session, slot, CategoryEdit::Cancel);
        }
        let edit = CategoryEdit::Save {
            name,
            path: PathBuf::from(path),
        };
        self.finish_edit(session, slot, edit)
    }

    fn finish_edit<V, S>(
        &mut self,
        session: &mut SortingSession<V, S>,
        slot: usize,
        edit: CategoryEdit,
    ) -> io::Result<()>
    where
        V: ViewRenderer,
        S: SettingsStore,
    {
        let cancelled = edit == CategoryEdit::Cancel;
        match session.edit_category(slot, edit) {
            Ok(()) if cancelled => writeln!(self.out, "cancelled"),
            Ok(()) => Ok(()),
            Err(SortError::InvalidCategoryInput) => {
                writeln!(self.out, "error: {}", SortError::InvalidCategoryInput)?;
                self.open_editor(session, slot)
            }
            Err(e) => writeln!(self.out, "error: {}", e),
        }
    }
}
