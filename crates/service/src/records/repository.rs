use std::path::{Path, PathBuf};

use models::User;
use tracing::info;

use crate::errors::ServiceError;
use crate::storage::JsonFile;

/// Persistence abstraction for the record store.
/// Every call moves the whole user list; there are no partial reads or writes.
pub trait RecordRepository {
    fn load(&self) -> Result<Vec<User>, ServiceError>;
    fn save(&self, users: &[User]) -> Result<(), ServiceError>;
}

/// Repository backed by one JSON array of users on disk.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    file: JsonFile,
}

impl JsonFileRepository {
    pub fn new<P: Into<PathBuf>>(path: P, pretty: bool) -> Self {
        Self { file: JsonFile::new(path, pretty) }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

impl RecordRepository for JsonFileRepository {
    fn load(&self) -> Result<Vec<User>, ServiceError> {
        match self.file.read::<Vec<User>>()? {
            Some(users) => Ok(users),
            None => {
                info!(path = %self.file.path().display(), "data file not found; starting empty");
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, users: &[User]) -> Result<(), ServiceError> {
        self.file.write(users)
    }
}

/// Simple in-memory repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MemoryRepository {
        users: Mutex<Vec<User>>,
        saves: AtomicUsize,
        fail_next_save: AtomicBool,
    }

    impl MemoryRepository {
        pub fn seeded(users: Vec<User>) -> Self {
            Self { users: Mutex::new(users), ..Default::default() }
        }

        /// Number of successful saves so far.
        pub fn saves(&self) -> usize {
            self.saves.load(Ordering::SeqCst)
        }

        /// Make the next `save` fail with a storage error.
        pub fn fail_next_save(&self) {
            self.fail_next_save.store(true, Ordering::SeqCst);
        }

        pub fn snapshot(&self) -> Vec<User> {
            self.users.lock().map(|u| u.clone()).unwrap_or_default()
        }
    }

    impl RecordRepository for MemoryRepository {
        fn load(&self) -> Result<Vec<User>, ServiceError> {
            let users = self.users.lock().map_err(|e| ServiceError::Storage(e.to_string()))?;
            Ok(users.clone())
        }

        fn save(&self, users: &[User]) -> Result<(), ServiceError> {
            if self.fail_next_save.swap(false, Ordering::SeqCst) {
                return Err(ServiceError::Storage("simulated write failure".into()));
            }
            let mut stored = self.users.lock().map_err(|e| ServiceError::Storage(e.to_string()))?;
            *stored = users.to_vec();
            self.saves.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }
}
