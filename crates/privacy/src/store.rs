use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use edudash_core::{Entity, SubjectId};

use crate::error::StoreError;
use crate::subject::ProtectedSubject;

/// Storage abstraction for protected-subject records.
///
/// The guard serializes all writes; implementations only need to make each
/// individual call atomic.
pub trait SubjectStore: Send + Sync {
    fn load(&self, subject_id: SubjectId) -> Result<Option<ProtectedSubject>, StoreError>;
    /// Insert or replace the record keyed by its subject id.
    fn save(&self, subject: ProtectedSubject) -> Result<(), StoreError>;
    /// Remove a record, returning it if it existed.
    fn delete(&self, subject_id: SubjectId) -> Result<Option<ProtectedSubject>, StoreError>;
    fn list_ids(&self) -> Result<Vec<SubjectId>, StoreError>;
}

impl<S> SubjectStore for Arc<S>
where
    S: SubjectStore + ?Sized,
{
    fn load(&self, subject_id: SubjectId) -> Result<Option<ProtectedSubject>, StoreError> {
        (**self).load(subject_id)
    }

    fn save(&self, subject: ProtectedSubject) -> Result<(), StoreError> {
        (**self).save(subject)
    }

    fn delete(&self, subject_id: SubjectId) -> Result<Option<ProtectedSubject>, StoreError> {
        (**self).delete(subject_id)
    }

    fn list_ids(&self) -> Result<Vec<SubjectId>, StoreError> {
        (**self).list_ids()
    }
}

/// In-memory store for seeded data sets and tests.
#[derive(Debug, Default)]
pub struct InMemorySubjectStore {
    inner: RwLock<HashMap<SubjectId, ProtectedSubject>>,
}

impl InMemorySubjectStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Unavailable("subject store lock poisoned".to_string())
}

impl SubjectStore for InMemorySubjectStore {
    fn load(&self, subject_id: SubjectId) -> Result<Option<ProtectedSubject>, StoreError> {
        let map = self.inner.read().map_err(poisoned)?;
        Ok(map.get(&subject_id).cloned())
    }

    fn save(&self, subject: ProtectedSubject) -> Result<(), StoreError> {
        let mut map = self.inner.write().map_err(poisoned)?;
        map.insert(*subject.id(), subject);
        Ok(())
    }

    fn delete(&self, subject_id: SubjectId) -> Result<Option<ProtectedSubject>, StoreError> {
        let mut map = self.inner.write().map_err(poisoned)?;
        Ok(map.remove(&subject_id))
    }

    fn list_ids(&self) -> Result<Vec<SubjectId>, StoreError> {
        let map = self.inner.read().map_err(poisoned)?;
        let mut ids: Vec<SubjectId> = map.keys().copied().collect();
        ids.sort();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use edudash_core::MarkId;

    use super::*;
    use crate::mark::{PrivacyMark, ProtectionType, SeverityLevel};

    fn subject(id: u64) -> ProtectedSubject {
        ProtectedSubject::new(PrivacyMark {
            id: MarkId::new(),
            subject_id: SubjectId::new(id),
            protection: ProtectionType::ProtectedRegistration,
            level: SeverityLevel::Low,
            reason: "Test".to_string(),
            effective_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            expiry_date: None,
            authorized_by: "Registry".to_string(),
            notes: None,
        })
    }

    #[test]
    fn save_load_delete() {
        let store = InMemorySubjectStore::new();
        let saved = subject(1);
        store.save(saved.clone()).unwrap();

        assert_eq!(store.load(SubjectId::new(1)).unwrap(), Some(saved.clone()));
        assert_eq!(store.delete(SubjectId::new(1)).unwrap(), Some(saved));
        assert!(store.delete(SubjectId::new(1)).unwrap().is_none());
        assert_eq!(store.load(SubjectId::new(1)).unwrap(), None);
    }

    #[test]
    fn list_ids_is_sorted() {
        let store = Arc::new(InMemorySubjectStore::new());
        for id in [9, 2, 5] {
            store.save(subject(id)).unwrap();
        }
        let ids = store.list_ids().unwrap();
        assert_eq!(ids, vec![SubjectId::new(2), SubjectId::new(5), SubjectId::new(9)]);
    }
}
