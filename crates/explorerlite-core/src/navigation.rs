/// Navigation -- back/forward history and the browsing session that owns it.
///
/// Every navigation is validated and listed *before* any state changes, so a
/// failed navigation never leaves the session half-moved.
use crate::error::NavigationError;
use crate::lister::list_dir;
use crate::model::ListedEntry;
use std::path::{Component, Path, PathBuf};
use tracing::{info, warn};

/// Default maximum number of history entries kept.
pub const DEFAULT_HISTORY_CAPACITY: usize = 256;

/// Linear back/forward history with a cursor.
///
/// A new navigation truncates everything after the cursor. When the list
/// grows past `capacity` the oldest entry is evicted and the cursor shifts
/// with it.
#[derive(Debug, Clone)]
pub struct NavigationHistory {
    entries: Vec<PathBuf>,
    cursor: usize,
    capacity: usize,
}

impl NavigationHistory {
    /// `capacity` is clamped to at least 2 so back/forward stay meaningful.
    pub fn new(initial: PathBuf, capacity: usize) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
            capacity: capacity.max(2),
        }
    }

    pub fn current(&self) -> &Path {
        &self.entries[self.cursor]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    /// Record a fresh navigation to `path`.
    pub fn push(&mut self, path: PathBuf) {
        self.entries.truncate(self.cursor + 1);
        if self.entries.last() != Some(&path) {
            self.entries.push(path);
        }
        while self.entries.len() > self.capacity {
            self.entries.remove(0);
        }
        self.cursor = self.entries.len() - 1;
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// The entry `go_back` would move to, without moving.
    pub fn peek_back(&self) -> Option<&Path> {
        self.cursor
            .checked_sub(1)
            .map(|i| self.entries[i].as_path())
    }

    /// The entry `go_forward` would move to, without moving.
    pub fn peek_forward(&self) -> Option<&Path> {
        self.entries.get(self.cursor + 1).map(PathBuf::as_path)
    }

    pub fn go_back(&mut self) -> Option<&Path> {
        if !self.can_go_back() {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    pub fn go_forward(&mut self) -> Option<&Path> {
        if !self.can_go_forward() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }
}

/// The browsing session: current directory, its listing, and history.
#[derive(Debug)]
pub struct Browser {
    current_path: PathBuf,
    entries: Vec<ListedEntry>,
    history: NavigationHistory,
}

impl Browser {
    /// Open the first listable directory among `start`, the home directory,
    /// and the process working directory.
    ///
    /// If none can be listed the session still opens on `start` with an empty
    /// listing, and the error for `start` is returned alongside it.
    pub fn open(start: &Path, history_capacity: usize) -> (Self, Option<NavigationError>) {
        let start = normalize_path(&absolutize(start, None));
        let first_err = match resolve_and_list(&start) {
            Ok(entries) => {
                return (Self::at(start, entries, history_capacity), None);
            }
            Err(err) => err,
        };
        warn!("Cannot open {}: {first_err}", start.display());

        for fallback in fallback_dirs() {
            if fallback == start {
                continue;
            }
            if let Ok(entries) = resolve_and_list(&fallback) {
                info!("Falling back to {}", fallback.display());
                return (
                    Self::at(fallback, entries, history_capacity),
                    Some(first_err),
                );
            }
        }

        (
            Self::at(start, Vec::new(), history_capacity),
            Some(first_err),
        )
    }

    fn at(path: PathBuf, entries: Vec<ListedEntry>, history_capacity: usize) -> Self {
        Self {
            history: NavigationHistory::new(path.clone(), history_capacity),
            current_path: path,
            entries,
        }
    }

    pub fn current_path(&self) -> &Path {
        &self.current_path
    }

    pub fn entries(&self) -> &[ListedEntry] {
        &self.entries
    }

    pub fn history(&self) -> &NavigationHistory {
        &self.history
    }

    /// Full path of a listed entry.
    pub fn entry_path(&self, entry: &ListedEntry) -> PathBuf {
        self.current_path.join(entry.name.as_str())
    }

    /// Navigate to `target` as a fresh history entry.
    ///
    /// Relative targets resolve against the current directory.
    pub fn navigate_to(&mut self, target: &Path) -> Result<(), NavigationError> {
        let path = normalize_path(&absolutize(target, Some(&self.current_path)));
        let entries = resolve_and_list(&path)?;
        info!("Navigated to {}", path.display());
        self.history.push(path.clone());
        self.current_path = path;
        self.entries = entries;
        Ok(())
    }

    /// Step back one entry. Returns `Ok(false)` when there is nothing to go
    /// back to; on error the cursor does not move.
    pub fn go_back(&mut self) -> Result<bool, NavigationError> {
        let Some(target) = self.history.peek_back().map(Path::to_path_buf) else {
            return Ok(false);
        };
        let entries = resolve_and_list(&target)?;
        self.history.go_back();
        self.current_path = target;
        self.entries = entries;
        Ok(true)
    }

    /// Step forward one entry. Same contract as [`Browser::go_back`].
    pub fn go_forward(&mut self) -> Result<bool, NavigationError> {
        let Some(target) = self.history.peek_forward().map(Path::to_path_buf) else {
            return Ok(false);
        };
        let entries = resolve_and_list(&target)?;
        self.history.go_forward();
        self.current_path = target;
        self.entries = entries;
        Ok(true)
    }

    /// Navigate to the parent directory as a fresh history entry.
    pub fn go_up(&mut self) -> Result<(), NavigationError> {
        let parent = self
            .current_path
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| NavigationError::NoParent {
                path: self.current_path.clone(),
            })?;
        self.navigate_to(&parent)
    }

    /// Re-list the current directory in place.
    pub fn refresh(&mut self) -> Result<(), NavigationError> {
        self.entries = resolve_and_list(&self.current_path)?;
        Ok(())
    }

    pub fn can_go_back(&self) -> bool {
        self.history.can_go_back()
    }

    pub fn can_go_forward(&self) -> bool {
        self.history.can_go_forward()
    }

    pub fn can_go_up(&self) -> bool {
        self.current_path.parent().is_some()
    }
}

/// Validate that `path` is an existing directory and list it.
fn resolve_and_list(path: &Path) -> Result<Vec<ListedEntry>, NavigationError> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => {
            return Err(NavigationError::NotADirectory {
                path: path.to_path_buf(),
            })
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(NavigationError::NotFound {
                path: path.to_path_buf(),
            })
        }
        Err(err) => return Err(crate::error::AccessError::new(path, err).into()),
    }
    Ok(list_dir(path)?)
}

fn absolutize(path: &Path, base: Option<&Path>) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match base {
        Some(base) => base.join(path),
        None => std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf()),
    }
}

/// Lexically resolve `.` and `..` without touching the filesystem.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `pop` refuses to climb above the root.
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

fn fallback_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Some(home) = std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE")) {
        dirs.push(PathBuf::from(home));
    }
    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }
    dirs
}
