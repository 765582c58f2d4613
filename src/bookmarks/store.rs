//! Bookmark store persistence.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};

use super::Bookmark;
use crate::error::{Error, Result};

/// Ordered, append-only collection of bookmarks backed by a YAML file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    #[serde(default, deserialize_with = "null_as_empty")]
    bookmarks: Vec<Bookmark>,
}

/// `bookmarks:` with no value decodes as an empty list rather than an error
fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<Bookmark>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Bookmark>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Store {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the store from `path`.
    ///
    /// A missing file is not an error: an empty store is written to `path`
    /// (creating parent directories) and returned, so the first run needs no
    /// separate init step.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::metadata(path) {
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("no store at {}, creating an empty one", path.display());
                let store = Self::new();
                store.save(path)?;
                return Ok(store);
            }
            Err(e) => return Err(Error::io("check bookmarks file", path, e)),
        }

        let content =
            fs::read_to_string(path).map_err(|e| Error::io("read bookmarks file", path, e))?;
        let store = Self::parse(&content).map_err(|source| Error::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        log::debug!(
            "loaded {} bookmarks from {}",
            store.bookmarks.len(),
            path.display()
        );
        Ok(store)
    }

    fn parse(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        // An empty document holds no bookmarks
        if content.trim().is_empty() {
            return Ok(Self::new());
        }
        serde_yaml::from_str(content)
    }

    /// Write the whole store to `path`, replacing any previous content.
    ///
    /// The data lands in a temporary file beside the real store file and is
    /// renamed over it, so readers never observe a half-written store. A
    /// symlinked `path` is written through, and the file keeps its mode.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self).map_err(Error::Serialize)?;

        let target = resolve_target(path);
        if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| Error::io("create directory for bookmarks file", parent, e))?;
        }
        let permissions = fs::metadata(&target).ok().map(|m| m.permissions());

        let tmp = staging_path(&target);
        fs::write(&tmp, content).map_err(|e| Error::io("write bookmarks file", &tmp, e))?;
        if let Some(permissions) = permissions {
            if let Err(e) = fs::set_permissions(&tmp, permissions) {
                let _ = fs::remove_file(&tmp);
                return Err(Error::io("set permissions on bookmarks file", &tmp, e));
            }
        }
        if let Err(e) = fs::rename(&tmp, &target) {
            let _ = fs::remove_file(&tmp);
            return Err(Error::io("replace bookmarks file", &target, e));
        }

        log::debug!(
            "saved {} bookmarks to {}",
            self.bookmarks.len(),
            target.display()
        );
        Ok(())
    }

    /// Check if any entry already stores exactly this link
    pub fn has_link(&self, link: &str) -> bool {
        self.bookmarks.iter().any(|b| b.link == link)
    }

    /// Append a bookmark. No validation and no duplicate check; callers that
    /// care about duplicates ask `has_link` first.
    pub fn add(&mut self, key: impl Into<String>, link: impl Into<String>) {
        self.bookmarks.push(Bookmark::new(key, link));
    }

    /// All bookmarks in insertion order
    pub fn bookmarks(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    pub fn len(&self) -> usize {
        self.bookmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookmarks.is_empty()
    }
}

/// File that actually holds the store: symlinks are followed, even dangling ones
fn resolve_target(path: &Path) -> PathBuf {
    if let Ok(resolved) = fs::canonicalize(path) {
        return resolved;
    }
    match fs::read_link(path) {
        Ok(link) if link.is_relative() => path
            .parent()
            .map_or_else(|| link.clone(), |parent| parent.join(&link)),
        Ok(link) => link,
        Err(_) => path.to_path_buf(),
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "bookmarks".into());
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Store {
        let mut store = Store::new();
        store.add("Docs", "https://example.org");
        store.add("snippet", "git log --oneline --graph");
        store.add("Docs", "https://example.org/other");
        store
    }

    #[test]
    fn save_then_load_preserves_entries_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bookmarks.yml");

        let store = sample();
        store.save(&path).unwrap();
        let loaded = Store::load(&path).unwrap();

        assert_eq!(loaded, store);
        assert_eq!(loaded.bookmarks()[1].link, "git log --oneline --graph");
    }

    #[test]
    fn round_trip_keeps_values_that_look_like_other_yaml_types() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bookmarks.yml");

        let mut store = Store::new();
        store.add("yes", "42");
        store.add("null", "key: value # not a comment");
        store.add("multi", "line one\nline two");
        store.save(&path).unwrap();

        assert_eq!(Store::load(&path).unwrap(), store);
    }

    #[test]
    fn load_missing_file_creates_empty_store_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("bookmarkit").join("bookmarks.yml");

        let store = Store::load(&path).unwrap();
        assert!(store.is_empty());
        assert!(path.exists());

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.trim(), "bookmarks: []");
        assert!(Store::load(&path).unwrap().is_empty());
    }

    #[test]
    fn load_reads_the_documented_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bookmarks.yml");
        fs::write(
            &path,
            "bookmarks:\n  - key: A\n    link: http://a\n  - key: B\n    link: text-b\n",
        )
        .unwrap();

        let store = Store::load(&path).unwrap();
        assert_eq!(
            store.bookmarks(),
            &[Bookmark::new("A", "http://a"), Bookmark::new("B", "text-b")]
        );
    }

    #[test]
    fn load_accepts_empty_file_and_null_list() {
        let dir = tempfile::tempdir().unwrap();

        let empty = dir.path().join("empty.yml");
        fs::write(&empty, "").unwrap();
        assert!(Store::load(&empty).unwrap().is_empty());

        let null = dir.path().join("null.yml");
        fs::write(&null, "bookmarks:\n").unwrap();
        assert!(Store::load(&null).unwrap().is_empty());
    }

    #[test]
    fn load_malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bookmarks.yml");
        fs::write(&path, "bookmarks:\n  - key: [unterminated\n").unwrap();

        let err = Store::load(&path).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }), "got {err:?}");
    }

    #[test]
    fn load_entry_missing_link_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bookmarks.yml");
        fs::write(&path, "bookmarks:\n  - key: lonely\n").unwrap();

        assert!(matches!(Store::load(&path), Err(Error::Parse { .. })));
    }

    #[test]
    fn load_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Store::load(dir.path()).unwrap_err();
        assert!(matches!(err, Error::Io { .. }), "got {err:?}");
    }

    #[test]
    fn save_overwrites_previous_content_and_leaves_no_staging_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bookmarks.yml");

        sample().save(&path).unwrap();
        let mut smaller = Store::new();
        smaller.add("only", "https://only.example");
        smaller.save(&path).unwrap();

        assert_eq!(Store::load(&path).unwrap(), smaller);
        assert!(!dir.path().join("bookmarks.yml.tmp").exists());
    }

    #[cfg(unix)]
    #[test]
    fn save_through_symlink_updates_the_link_target() {
        use std::os::unix::fs::symlink;

        let dir = tempfile::tempdir().unwrap();
        let real = dir.path().join("dotfiles").join("bookmarks.yml");
        Store::new().save(&real).unwrap();

        let link = dir.path().join("config").join("bookmarks.yml");
        fs::create_dir_all(link.parent().unwrap()).unwrap();
        symlink(&real, &link).unwrap();

        let mut store = Store::load(&link).unwrap();
        store.add("k", "v");
        store.save(&link).unwrap();

        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(Store::load(&real).unwrap().bookmarks(), &[Bookmark::new("k", "v")]);
        assert!(!dir.path().join("dotfiles").join("bookmarks.yml.tmp").exists());
    }

    #[cfg(unix)]
    #[test]
    fn save_through_dangling_symlink_creates_the_target() {
        use std::os::unix::fs::symlink;

        let dir = tempfile::tempdir().unwrap();
        let real = dir.path().join("bookmarks-real.yml");
        let link = dir.path().join("bookmarks.yml");
        symlink("bookmarks-real.yml", &link).unwrap();

        sample().save(&link).unwrap();

        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(Store::load(&real).unwrap(), sample());
    }

    #[cfg(unix)]
    #[test]
    fn save_keeps_existing_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bookmarks.yml");
        Store::new().save(&path).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o600)).unwrap();

        sample().save(&path).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn has_link_is_exact_and_case_sensitive() {
        let store = sample();
        assert!(store.has_link("https://example.org"));
        assert!(!store.has_link("https://EXAMPLE.org"));
        assert!(!store.has_link("https://example.org/"));
        assert!(!Store::new().has_link(""));
    }

    #[test]
    fn add_appends_last_and_keeps_prior_entries() {
        let mut store = sample();
        let before = store.bookmarks().to_vec();

        store.add("new", "https://example.org");

        assert_eq!(store.len(), before.len() + 1);
        assert_eq!(&store.bookmarks()[..before.len()], before.as_slice());
        assert_eq!(
            store.bookmarks().last(),
            Some(&Bookmark::new("new", "https://example.org"))
        );
    }
}
