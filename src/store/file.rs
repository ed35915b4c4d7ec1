//! User store mirrored to a JSON file

use log::{info, warn};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Mutex;

use super::{touch, CardStore, MemoryStore, User};
use crate::error::{PlannerError, Result};

const TMP_SUFFIX: &str = "tmp";

/// What to do when the mirror file cannot be written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PersistPolicy {
    /// Keep the in-memory change and log a warning
    #[default]
    LogAndContinue,
    /// Reject the write; the in-memory state is left unchanged
    FailRequest,
}

impl FromStr for PersistPolicy {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "log" | "log-and-continue" => Ok(PersistPolicy::LogAndContinue),
            "fail" | "fail-request" => Ok(PersistPolicy::FailRequest),
            other => Err(PlannerError::invalid(format!(
                "unknown persist policy: {} (expected \"log\" or \"fail\")",
                other
            ))),
        }
    }
}

/// In-memory store whose every `put` is written through to a JSON file
#[derive(Debug)]
pub struct FileStore {
    memory: MemoryStore,
    path: PathBuf,
    policy: PersistPolicy,
    /// Held from snapshot to memory insert so each file write includes every earlier put
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Open the store, loading existing users if the file exists
    pub fn open<P: AsRef<Path>>(path: P, policy: PersistPolicy) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let users: Vec<User> = if path.exists() {
            let data = fs::read_to_string(&path)?;
            if data.trim().is_empty() {
                Vec::new()
            } else {
                serde_json::from_str(&data)?
            }
        } else {
            Vec::new()
        };

        info!("Loaded {} users from {}", users.len(), path.display());

        Ok(Self {
            memory: MemoryStore::with_users(users),
            path,
            policy,
            write_lock: Mutex::new(()),
        })
    }

    fn persist(&self, users: &[User]) -> Result<()> {
        let data = serde_json::to_string_pretty(users)?;
        write_atomic(&self.path, &data)
    }
}

impl CardStore for FileStore {
    fn get(&self, user_id: &str) -> Result<Option<User>> {
        self.memory.get(user_id)
    }

    fn put(&self, user: User) -> Result<User> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let user = touch(user);

        let mut users: Vec<User> = self
            .memory
            .snapshot()
            .into_iter()
            .filter(|u| u.id != user.id)
            .collect();
        users.push(user.clone());
        users.sort_by(|a, b| a.id.cmp(&b.id));

        match self.persist(&users) {
            Ok(()) => {}
            Err(err) => match self.policy {
                PersistPolicy::LogAndContinue => {
                    warn!("Failed to save store to {}: {}", self.path.display(), err);
                }
                PersistPolicy::FailRequest => return Err(err),
            },
        }

        self.memory.insert(user.clone());
        Ok(user)
    }
}

/// Sibling temp file: `cards.json` becomes `cards.json.tmp`
fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

/// Write to a sibling temp file, then rename over the target
fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let tmp = tmp_path(path);
    let mut file = fs::File::create(&tmp)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Card;

    fn user_with_card() -> User {
        let mut user = User::new("u1");
        user.cards.push(Card::new("c1", "Visa", 500.0, 19.0, 25.0, 10));
        user
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let store = FileStore::open(&path, PersistPolicy::FailRequest).unwrap();
        store.put(user_with_card()).unwrap();
        assert!(path.exists());

        let reopened = FileStore::open(&path, PersistPolicy::FailRequest).unwrap();
        let user = reopened.get("u1").unwrap().unwrap();
        assert_eq!(user.cards.len(), 1);
        assert_eq!(user.cards[0].name, "Visa");
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let store = FileStore::open(&path, PersistPolicy::FailRequest).unwrap();
        store.put(User::new("u1")).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_fail_policy_rejects_and_keeps_memory() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be makes every write fail
        let path = dir.path().join("blocked");
        fs::create_dir_all(tmp_path(&path)).unwrap();

        let store = FileStore::open(&path, PersistPolicy::FailRequest).unwrap();
        assert!(store.put(user_with_card()).is_err());
        assert!(store.get("u1").unwrap().is_none());
    }

    #[test]
    fn test_log_policy_keeps_change() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blocked");
        fs::create_dir_all(tmp_path(&path)).unwrap();

        let store = FileStore::open(&path, PersistPolicy::LogAndContinue).unwrap();
        store.put(user_with_card()).unwrap();
        assert!(store.get("u1").unwrap().is_some());
    }

    #[test]
    fn test_temp_file_keeps_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cards.json");
        let sibling = dir.path().join("cards.tmp");
        fs::write(&sibling, "keep").unwrap();

        assert_eq!(tmp_path(&path), dir.path().join("cards.json.tmp"));

        let store = FileStore::open(&path, PersistPolicy::FailRequest).unwrap();
        store.put(User::new("u1")).unwrap();
        assert_eq!(fs::read_to_string(&sibling).unwrap(), "keep");
        assert!(!tmp_path(&path).exists());
    }

    #[test]
    fn test_concurrent_puts_all_reach_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let store = FileStore::open(&path, PersistPolicy::FailRequest).unwrap();

        std::thread::scope(|scope| {
            for i in 0..8 {
                let store = &store;
                scope.spawn(move || {
                    for round in 0..10 {
                        store.put(User::new(format!("user-{}-{}", i, round))).unwrap();
                    }
                });
            }
        });

        let reopened = FileStore::open(&path, PersistPolicy::FailRequest).unwrap();
        assert_eq!(store.memory.snapshot().len(), 80);
        assert_eq!(reopened.memory.snapshot().len(), 80);
        assert!(reopened.get("user-7-9").unwrap().is_some());
    }

    #[test]
    fn test_parse_policy() {
        assert_eq!("log".parse::<PersistPolicy>().unwrap(), PersistPolicy::LogAndContinue);
        assert_eq!("FAIL".parse::<PersistPolicy>().unwrap(), PersistPolicy::FailRequest);
        assert!("ignore".parse::<PersistPolicy>().is_err());
    }
}
