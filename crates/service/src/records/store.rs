use models::{Entry, EntryKind, Pet, User};
use tracing::{debug, info, instrument, warn};

use crate::errors::ServiceError;
use crate::records::repository::RecordRepository;

/// Position of a user inside one [`RecordStore`].
///
/// Users are never removed, so a handle stays valid for the store's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserHandle(usize);

/// Position of a pet inside its owner's pet list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PetHandle {
    user: UserHandle,
    pet: usize,
}

impl PetHandle {
    pub fn owner(&self) -> UserHandle {
        self.user
    }
}

/// In-memory users and pets, flushed in full through the repository after
/// every successful mutation.
///
/// # Examples
/// ```
/// use models::EntryKind;
/// use service::records::{repository::mock::MemoryRepository, RecordStore};
///
/// let mut store = RecordStore::open(MemoryRepository::default()).unwrap();
/// store.register("alice", "pw1").unwrap();
/// let alice = store.authenticate("alice", "pw1").unwrap();
/// let rex = store.add_pet(alice, "Rex", "lab", "3", "20kg").unwrap();
/// store.add_entry(rex, EntryKind::Vaccination, "2024-01-01", "rabies").unwrap();
/// assert_eq!(store.pet(rex).unwrap().vaccinations.len(), 1);
/// assert_eq!(store.repository().saves(), 3);
/// ```
pub struct RecordStore<R: RecordRepository> {
    repo: R,
    users: Vec<User>,
    current: Option<UserHandle>,
}

impl<R: RecordRepository> RecordStore<R> {
    /// Load every user through `repo`. A corrupt or unreadable backing file is an error.
    #[instrument(skip(repo))]
    pub fn open(repo: R) -> Result<Self, ServiceError> {
        let users = repo.load()?;
        info!(users = users.len(), "record_store_loaded");
        Ok(Self { repo, users, current: None })
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn user(&self, handle: UserHandle) -> Option<&User> {
        self.users.get(handle.0)
    }

    pub fn pet(&self, handle: PetHandle) -> Option<&Pet> {
        self.user(handle.user).and_then(|u| u.pets.get(handle.pet))
    }

    /// A user's pets in insertion order; empty for an unknown handle.
    pub fn pets(&self, user: UserHandle) -> &[Pet] {
        self.user(user).map(|u| u.pets.as_slice()).unwrap_or(&[])
    }

    /// Handles for all of a user's pets, in insertion order.
    pub fn pet_handles(&self, user: UserHandle) -> Vec<PetHandle> {
        self.user(user)
            .map(|u| (0..u.pets.len()).map(|pet| PetHandle { user, pet }).collect())
            .unwrap_or_default()
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current.and_then(|h| self.user(h))
    }

    pub fn current_handle(&self) -> Option<UserHandle> {
        self.current
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.current_user() {
            debug!(username = %user.username, "user_logged_out");
        }
        self.current = None;
    }

    /// Find the first user whose username and password both match exactly and
    /// make them the current user.
    #[instrument(skip(self, password))]
    pub fn authenticate(&mut self, username: &str, password: &str) -> Result<UserHandle, ServiceError> {
        let idx = self
            .users
            .iter()
            .position(|u| u.matches(username, password))
            .ok_or_else(|| {
                debug!("authentication_failed");
                ServiceError::AuthenticationFailed
            })?;
        let handle = UserHandle(idx);
        self.current = Some(handle);
        info!("user_authenticated");
        Ok(handle)
    }

    /// Create an account. Usernames are compared case-sensitively.
    /// The new user is not logged in.
    #[instrument(skip(self, password))]
    pub fn register(&mut self, username: &str, password: &str) -> Result<UserHandle, ServiceError> {
        if self.users.iter().any(|u| u.username == username) {
            debug!("user exists");
            return Err(ServiceError::DuplicateUsername);
        }

        self.users.push(User::new(username, password));
        if let Err(e) = self.persist() {
            self.users.pop();
            return Err(e);
        }
        info!("user_registered");
        Ok(UserHandle(self.users.len() - 1))
    }

    /// Append a pet to `user`. Only the name must be non-empty.
    #[instrument(skip(self, breed, age, weight))]
    pub fn add_pet(
        &mut self,
        user: UserHandle,
        name: &str,
        breed: &str,
        age: &str,
        weight: &str,
    ) -> Result<PetHandle, ServiceError> {
        let pet = Pet::new(name, breed, age, weight)?;
        let owner = self.users.get_mut(user.0).ok_or_else(|| ServiceError::not_found("user"))?;
        owner.pets.push(pet);
        let handle = PetHandle { user, pet: owner.pets.len() - 1 };

        if let Err(e) = self.persist() {
            if let Some(owner) = self.users.get_mut(user.0) {
                owner.pets.pop();
            }
            return Err(e);
        }
        info!(owner = %self.users[user.0].username, "pet_added");
        Ok(handle)
    }

    /// Append a dated entry to exactly the journal selected by `kind`.
    #[instrument(skip(self, kind, date, description), fields(kind = %kind))]
    pub fn add_entry(
        &mut self,
        pet: PetHandle,
        kind: EntryKind,
        date: &str,
        description: &str,
    ) -> Result<(), ServiceError> {
        let entry = Entry::new(date, description)?;
        self.pet_mut(pet)?.entries_mut(kind).push(entry);

        if let Err(e) = self.persist() {
            if let Ok(target) = self.pet_mut(pet) {
                target.entries_mut(kind).pop();
            }
            return Err(e);
        }
        info!("entry_added");
        Ok(())
    }

    fn pet_mut(&mut self, handle: PetHandle) -> Result<&mut Pet, ServiceError> {
        self.users
            .get_mut(handle.user.0)
            .and_then(|u| u.pets.get_mut(handle.pet))
            .ok_or_else(|| ServiceError::not_found("pet"))
    }

    fn persist(&self) -> Result<(), ServiceError> {
        self.repo.save(&self.users).map_err(|e| {
            warn!(error = %e, "record_store_save_failed");
            e
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::repository::mock::MemoryRepository;

    fn store() -> RecordStore<MemoryRepository> {
        RecordStore::open(MemoryRepository::default()).expect("open store")
    }

    fn store_with_pet() -> (RecordStore<MemoryRepository>, PetHandle) {
        let mut s = store();
        let alice = s.register("alice", "pw1").expect("register");
        let rex = s.add_pet(alice, "Rex", "lab", "3", "20kg").expect("add pet");
        (s, rex)
    }

    #[test]
    fn register_then_duplicate_is_rejected_without_mutation() {
        let mut s = store();
        s.register("alice", "pw1").unwrap();
        let before = s.users().to_vec();
        let saves = s.repository().saves();

        let err = s.register("alice", "pw2").unwrap_err();
        assert!(matches!(err, ServiceError::DuplicateUsername));
        assert_eq!(s.users(), &before[..]);
        assert_eq!(s.repository().saves(), saves);
    }

    #[test]
    fn usernames_are_case_sensitive() {
        let mut s = store();
        s.register("alice", "pw1").unwrap();
        assert!(s.register("Alice", "pw1").is_ok());
        assert_eq!(s.users().len(), 2);
    }

    #[test]
    fn authenticate_requires_exact_pair() {
        let mut s = store();
        s.register("alice", "pw1").unwrap();
        assert!(s.current_user().is_none());

        assert!(matches!(s.authenticate("alice", "pw2"), Err(ServiceError::AuthenticationFailed)));
        assert!(matches!(s.authenticate("bob", "pw1"), Err(ServiceError::AuthenticationFailed)));
        assert!(s.current_user().is_none());

        let h = s.authenticate("alice", "pw1").unwrap();
        assert_eq!(s.current_handle(), Some(h));
        assert_eq!(s.current_user().unwrap().username, "alice");

        s.logout();
        assert!(s.current_user().is_none());
    }

    #[test]
    fn authenticate_picks_first_duplicate() {
        let repo = MemoryRepository::seeded(vec![User::new("a", "x"), User::new("a", "y")]);
        let mut s = RecordStore::open(repo).unwrap();
        let h = s.authenticate("a", "y").unwrap();
        assert_eq!(s.user(h).unwrap().password, "y");
        assert!(matches!(s.register("a", "z"), Err(ServiceError::DuplicateUsername)));
    }

    #[test]
    fn add_pet_with_empty_name_does_nothing() {
        let mut s = store();
        let alice = s.register("alice", "pw1").unwrap();
        let saves = s.repository().saves();
        let err = s.add_pet(alice, "", "lab", "3", "20").unwrap_err();
        assert!(matches!(err, ServiceError::MissingRequiredField("name")));
        assert!(s.user(alice).unwrap().pets.is_empty());
        assert_eq!(s.repository().saves(), saves);
    }

    #[test]
    fn add_pet_is_not_idempotent() {
        let mut s = store();
        let alice = s.register("alice", "pw1").unwrap();
        let a = s.add_pet(alice, "Rex", "lab", "3", "20").unwrap();
        let b = s.add_pet(alice, "Rex", "lab", "3", "20").unwrap();
        assert_ne!(a, b);
        assert_eq!(s.pet_handles(alice), vec![a, b]);
        assert_eq!(a.owner(), alice);
    }

    #[test]
    fn add_entry_targets_only_its_kind() {
        let (mut s, rex) = store_with_pet();
        s.add_entry(rex, EntryKind::Appointment, "2024-05-01", "dental").unwrap();
        let pet = s.pet(rex).unwrap();
        assert_eq!(pet.appointments, vec![Entry::new("2024-05-01", "dental").unwrap()]);
        assert!(pet.health_records.is_empty());
        assert!(pet.vaccinations.is_empty());
    }

    #[test]
    fn add_entry_validation_does_nothing() {
        let (mut s, rex) = store_with_pet();
        let saves = s.repository().saves();
        assert!(matches!(
            s.add_entry(rex, EntryKind::HealthRecord, "", "limping"),
            Err(ServiceError::MissingRequiredField("date"))
        ));
        assert!(matches!(
            s.add_entry(rex, EntryKind::HealthRecord, "2024-01-01", ""),
            Err(ServiceError::MissingRequiredField("description"))
        ));
        assert!(s.pet(rex).unwrap().health_records.is_empty());
        assert_eq!(s.repository().saves(), saves);
    }

    #[test]
    fn every_mutation_saves_full_state() {
        let (mut s, rex) = store_with_pet();
        assert_eq!(s.repository().saves(), 2);
        s.add_entry(rex, EntryKind::Vaccination, "2024-01-01", "rabies").unwrap();
        assert_eq!(s.repository().saves(), 3);
        assert_eq!(s.repository().snapshot(), s.users());
    }

    #[test]
    fn failed_save_rolls_back() {
        let (mut s, rex) = store_with_pet();
        let before = s.users().to_vec();

        s.repository().fail_next_save();
        assert!(matches!(s.register("bob", "pw"), Err(ServiceError::Storage(_))));
        s.repository().fail_next_save();
        assert!(s.add_pet(rex.owner(), "Tom", "", "", "").is_err());
        s.repository().fail_next_save();
        assert!(s.add_entry(rex, EntryKind::Vaccination, "2024-01-01", "rabies").is_err());

        assert_eq!(s.users(), &before[..]);
    }

    #[test]
    fn unknown_handles_are_not_found() {
        let (mut s, rex) = store_with_pet();
        let ghost = PetHandle { user: rex.owner(), pet: 9 };
        assert!(matches!(
            s.add_entry(ghost, EntryKind::Appointment, "2024-01-01", "x"),
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(s.add_pet(UserHandle(7), "Tom", "", "", ""), Err(ServiceError::NotFound(_))));
        assert!(s.pet_handles(UserHandle(7)).is_empty());
        assert!(s.pets(UserHandle(7)).is_empty());
    }

    #[test]
    fn pets_lists_in_insertion_order() {
        let (mut s, rex) = store_with_pet();
        let alice = rex.owner();
        s.add_pet(alice, "Tom", "tabby", "5", "4kg").unwrap();
        let names: Vec<&str> = s.pets(alice).iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Rex", "Tom"]);
        let bob = s.register("bob", "pw").unwrap();
        assert!(s.pets(bob).is_empty());
    }
}
