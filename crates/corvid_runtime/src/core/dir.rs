//! State behind a `Dir` object.
//!
//! The directory is listed once when the object is created. Later changes
//! to the directory on disk are never observed; create a new `Dir` to see
//! them. Reads walk the snapshot with a cursor that may be moved anywhere,
//! including past the end, where reads report exhaustion instead of failing.

use std::rc::Rc;

use tracing::{debug, trace, warn};

use crate::errors::{Result, RuntimeError, messages};
use crate::util::FileSystem;

#[derive(Debug)]
pub struct DirHandle {
    path: Rc<str>,
    snapshot: Rc<[Rc<str>]>,
    pos: i64,
    open: bool,
}

impl DirHandle {
    /// Resolves `path` against `base` and captures the listing.
    pub fn open(fs: &dyn FileSystem, base: &str, path: &str) -> Result<Self> {
        let resolved = fs.resolve(base, path);
        if !fs.is_dir(&resolved) {
            return Err(RuntimeError::not_a_directory(path));
        }
        let listing = list_or_empty(fs, &resolved);
        debug!(path, entries = listing.len(), "directory snapshot captured");
        Ok(Self::from_listing(path, listing))
    }

    /// Builds a handle over an already captured listing.
    pub fn from_listing(path: &str, listing: Vec<String>) -> Self {
        let snapshot: Rc<[Rc<str>]> = with_dot_entries(listing)
            .into_iter()
            .map(Rc::from)
            .collect();
        Self {
            path: Rc::from(path),
            snapshot,
            pos: 0,
            open: true,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Idempotent.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Shares the snapshot buffer; valid after close.
    pub fn snapshot(&self) -> Rc<[Rc<str>]> {
        Rc::clone(&self.snapshot)
    }

    pub fn entries(&self) -> &[Rc<str>] {
        &self.snapshot
    }

    /// Visits every snapshot entry in order. Does not check for close.
    pub fn each<F>(&self, mut visit: F) -> Result<()>
    where
        F: FnMut(&str) -> Result<()>,
    {
        for name in self.snapshot.iter() {
            visit(name)?;
        }
        Ok(())
    }

    pub fn tell(&self) -> i64 {
        self.pos
    }

    /// No bounds check; out-of-range positions make `read` report exhaustion.
    pub fn seek(&mut self, pos: i64) {
        self.pos = pos;
    }

    /// Next entry, or `None` once the cursor is outside the snapshot.
    pub fn read(&mut self) -> Result<Option<Rc<str>>> {
        if !self.open {
            return Err(RuntimeError::ClosedResource(
                messages::DIRECTORY_ALREADY_CLOSED.into(),
            ));
        }
        let entry = usize::try_from(self.pos)
            .ok()
            .and_then(|i| self.snapshot.get(i))
            .cloned();
        if entry.is_some() {
            self.pos += 1;
        }
        trace!(pos = self.pos, exhausted = entry.is_none(), "dir read");
        Ok(entry)
    }

    pub fn rewind(&mut self) -> i64 {
        self.pos = 0;
        self.pos
    }

    pub fn path(&self) -> Result<&str> {
        if !self.open {
            return Err(RuntimeError::ClosedResource(messages::CLOSED_DIRECTORY.into()));
        }
        Ok(&self.path)
    }

    /// Path as given at creation, regardless of state.
    pub fn raw_path(&self) -> &str {
        &self.path
    }
}

/// Standalone listing of `path` resolved against `base`, with `.` and `..`.
pub fn list_entries(fs: &dyn FileSystem, base: &str, path: &str) -> Result<Vec<String>> {
    let resolved = fs.resolve(base, path);
    if !fs.is_dir(&resolved) {
        return Err(RuntimeError::NotFound(messages::NO_SUCH_DIRECTORY.into()));
    }
    Ok(with_dot_entries(list_or_empty(fs, &resolved)))
}

fn list_or_empty(fs: &dyn FileSystem, resolved: &str) -> Vec<String> {
    match fs.list_dir(resolved) {
        Ok(names) => names,
        Err(e) => {
            warn!(path = resolved, error = %e, "directory listing failed; treating as empty");
            Vec::new()
        }
    }
}

fn with_dot_entries(listing: Vec<String>) -> Vec<String> {
    let mut names = Vec::with_capacity(listing.len() + 2);
    names.push(".".to_string());
    names.push("..".to_string());
    names.extend(listing);
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle() -> DirHandle {
        DirHandle::from_listing("/tmp/d", vec!["b".into(), "a".into()])
    }

    fn names(h: &DirHandle) -> Vec<String> {
        h.entries().iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn snapshot_is_prefixed_and_keeps_listing_order() {
        assert_eq!(names(&handle()), [".", "..", "b", "a"]);
    }

    #[test]
    fn read_walks_then_exhausts() {
        let mut h = handle();
        let mut got = Vec::new();
        while let Some(name) = h.read().unwrap() {
            got.push(name.to_string());
        }
        assert_eq!(got, [".", "..", "b", "a"]);
        assert_eq!(h.tell(), 4);
        assert_eq!(h.read().unwrap(), None);
        assert_eq!(h.tell(), 4);
        assert_eq!(h.rewind(), 0);
        assert_eq!(h.read().unwrap().as_deref(), Some("."));
    }

    #[test]
    fn seek_accepts_any_position() {
        let mut h = handle();
        h.seek(99);
        assert_eq!(h.tell(), 99);
        assert_eq!(h.read().unwrap(), None);
        h.seek(-5);
        assert_eq!(h.tell(), -5);
        assert_eq!(h.read().unwrap(), None);
        assert_eq!(h.tell(), -5);
        h.seek(2);
        assert_eq!(h.read().unwrap().as_deref(), Some("b"));
    }

    #[test]
    fn close_is_terminal_for_read_and_path() {
        let mut h = handle();
        assert_eq!(h.path().unwrap(), "/tmp/d");
        h.close();
        h.close();
        assert!(!h.is_open());
        assert!(matches!(h.read(), Err(RuntimeError::ClosedResource(_))));
        assert!(matches!(h.path(), Err(RuntimeError::ClosedResource(_))));
        assert_eq!(h.raw_path(), "/tmp/d");
    }

    #[test]
    fn unchecked_operations_still_work_after_close() {
        let mut h = handle();
        h.close();
        h.seek(3);
        assert_eq!(h.tell(), 3);
        assert_eq!(h.rewind(), 0);
        let mut seen = 0;
        h.each(|_| {
            seen += 1;
            Ok(())
        })
        .unwrap();
        assert_eq!(seen, 4);
    }

    #[test]
    fn each_propagates_visitor_errors() {
        let h = handle();
        let mut seen = Vec::new();
        let res = h.each(|name| {
            seen.push(name.to_string());
            if name == ".." {
                return Err(RuntimeError::Argument("stop".into()));
            }
            Ok(())
        });
        assert_eq!(res, Err(RuntimeError::Argument("stop".into())));
        assert_eq!(seen, [".", ".."]);
    }
}
