//! Player profiles persisted as a JSON file.
//!
//! The game core never touches this store; it only ever receives a display
//! name. Profiles exist to label sessions and to block accidental duplicate
//! names.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

use serde::{Deserialize, Serialize};

/// One player record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Unique, monotonically assigned identifier.
    pub id: u64,
    /// Display name, unique ignoring ASCII case.
    pub name: String,
    /// Short label derived from the name, e.g. `"AB"` for `"Ada Byron"`.
    pub initials: String,
    /// Unix timestamp of creation, in seconds.
    pub created_at: u64,
}

/// Errors from the profile store.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum ProfileError {
    /// A profile with the same name (ignoring case) already exists.
    #[display("a profile named '{name}' already exists")]
    #[from(skip)]
    DuplicateName {
        /// The rejected name.
        name: String,
    },
    /// The store file could not be read or written.
    #[display("profile store I/O failed: {_0}")]
    Io(std::io::Error),
    /// The store file holds invalid JSON.
    #[display("profile store is corrupted: {_0}")]
    Format(serde_json::Error),
}

/// A JSON-file-backed collection of [`Profile`] records.
#[derive(Debug)]
pub struct ProfileStore {
    path: PathBuf,
    profiles: Vec<Profile>,
}

impl ProfileStore {
    /// The default store location under the platform data directory.
    #[must_use]
    pub fn default_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("digitforge_profiles.json")
    }

    /// Opens the store at `path`, creating an empty one if the file does not
    /// exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Io`] when the file cannot be read and
    /// [`ProfileError::Format`] when it holds invalid JSON.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ProfileError> {
        let path = path.into();
        let profiles = match fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json)?,
            Err(err) if err.kind() == ErrorKind::NotFound => Vec::new(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self { path, profiles })
    }

    /// Returns the file backing this store.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns all profiles, in creation order.
    #[must_use]
    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    /// Finds a profile by name, ignoring ASCII case.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Profile> {
        self.profiles
            .iter()
            .find(|profile| profile.name.eq_ignore_ascii_case(name))
    }

    /// Creates a profile and persists the store.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::DuplicateName`] when a profile with the same
    /// name already exists (ignoring case), or an I/O error when the store
    /// cannot be written.
    pub fn create(&mut self, name: &str) -> Result<&Profile, ProfileError> {
        if self.find(name).is_some() {
            return Err(ProfileError::DuplicateName {
                name: name.to_owned(),
            });
        }

        let id = self.profiles.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let created_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_secs());
        self.profiles.push(Profile {
            id,
            name: name.to_owned(),
            initials: initials(name),
            created_at,
        });
        self.save()?;
        Ok(self.profiles.last().unwrap_or_else(|| unreachable!()))
    }

    fn save(&self) -> Result<(), ProfileError> {
        let json = serde_json::to_string_pretty(&self.profiles)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// First letter of up to the first two whitespace-separated words, uppercased.
fn initials(name: &str) -> String {
    name.split_whitespace()
        .take(2)
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::{
        process,
        sync::atomic::{AtomicU32, Ordering},
    };

    use super::*;

    struct TempStore(PathBuf);

    impl TempStore {
        fn new() -> Self {
            static COUNTER: AtomicU32 = AtomicU32::new(0);
            let n = COUNTER.fetch_add(1, Ordering::Relaxed);
            Self(std::env::temp_dir().join(format!(
                "digitforge_profiles_test_{}_{n}.json",
                process::id()
            )))
        }
    }

    impl Drop for TempStore {
        fn drop(&mut self) {
            let _ = fs::remove_file(&self.0);
        }
    }

    #[test]
    fn test_create_and_reload() {
        let tmp = TempStore::new();
        let mut store = ProfileStore::open(&tmp.0).unwrap();
        let profile = store.create("Ada Byron").unwrap();
        assert_eq!(profile.id, 1);
        assert_eq!(profile.initials, "AB");

        let reloaded = ProfileStore::open(&tmp.0).unwrap();
        assert_eq!(reloaded.profiles().len(), 1);
        assert_eq!(reloaded.find("ada byron").map(|p| p.id), Some(1));
    }

    #[test]
    fn test_duplicate_names_are_rejected_case_insensitively() {
        let tmp = TempStore::new();
        let mut store = ProfileStore::open(&tmp.0).unwrap();
        store.create("Sam").unwrap();

        let err = store.create("SAM").unwrap_err();
        assert!(matches!(err, ProfileError::DuplicateName { name } if name == "SAM"));
        assert_eq!(store.profiles().len(), 1);
    }

    #[test]
    fn test_ids_are_monotonic() {
        let tmp = TempStore::new();
        let mut store = ProfileStore::open(&tmp.0).unwrap();
        assert_eq!(store.create("one").unwrap().id, 1);
        assert_eq!(store.create("two").unwrap().id, 2);
        assert_eq!(store.create("three").unwrap().id, 3);
    }

    #[test]
    fn test_missing_file_is_an_empty_store() {
        let tmp = TempStore::new();
        let store = ProfileStore::open(&tmp.0).unwrap();
        assert!(store.profiles().is_empty());
        assert_eq!(store.find("anyone"), None);
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let tmp = TempStore::new();
        fs::write(&tmp.0, "not json").unwrap();
        assert!(matches!(
            ProfileStore::open(&tmp.0),
            Err(ProfileError::Format(_))
        ));
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("Ada Byron"), "AB");
        assert_eq!(initials("ada"), "A");
        assert_eq!(initials("  a  b  c "), "AB");
        assert_eq!(initials(""), "");
    }
}
