//! In-memory student repository backed by a JSON store.
//!
//! The repository owns the full record list for the process lifetime. It is
//! loaded once at open and the whole list is rewritten after every mutation.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::error::RecordError;
use crate::model::{Student, StudentPatch};
use crate::store::JsonStore;

/// Result of a confirmed or declined delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(Student),
    Cancelled,
}

/// Ordered collection of students with unique ids.
#[derive(Debug)]
pub struct StudentRepository {
    store: JsonStore<Vec<Student>>,
    students: Vec<Student>,
    last_save_ok: bool,
}

impl StudentRepository {
    /// Load the repository; a missing or corrupt file yields an empty one.
    pub fn open(store: JsonStore<Vec<Student>>) -> Self {
        let students = store.load_or(Vec::new());

        let mut seen = HashSet::new();
        for s in &students {
            if !seen.insert(s.id.as_str()) {
                warn!(id = %s.id, path = %store.path().display(), "duplicate student ID in store");
            }
        }

        Self {
            store,
            students,
            last_save_ok: true,
        }
    }

    pub fn store(&self) -> &JsonStore<Vec<Student>> {
        &self.store
    }

    /// Whether the most recent write reached disk.
    pub fn last_save_ok(&self) -> bool {
        self.last_save_ok
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// All records in insertion order.
    pub fn list(&self) -> &[Student] {
        &self.students
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn find(&self, id: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.students.iter().position(|s| s.id == id)
    }

    fn persist(&mut self) {
        self.last_save_ok = self.store.save(&self.students);
    }

    /// Append a new record. Rejected if the id is already taken.
    pub fn add(&mut self, student: Student) -> Result<&Student, RecordError> {
        if self.contains(&student.id) {
            return Err(RecordError::DuplicateId(student.id));
        }

        info!(id = %student.id, "adding student");
        self.students.push(student);
        self.persist();
        Ok(&self.students[self.students.len() - 1])
    }

    /// Records whose id equals `query` exactly, or whose name equals it
    /// ignoring case.
    pub fn search(&self, query: &str) -> Vec<&Student> {
        let lowered = query.to_lowercase();
        self.students
            .iter()
            .filter(|s| s.id == query || s.name.to_lowercase() == lowered)
            .collect()
    }

    /// Remove the record with `id` if `confirm` approves it.
    ///
    /// `confirm` sees the record about to be removed. Declining leaves both
    /// memory and disk untouched.
    pub fn delete<F>(&mut self, id: &str, confirm: F) -> Result<DeleteOutcome, RecordError>
    where
        F: FnOnce(&Student) -> bool,
    {
        let idx = self
            .position(id)
            .ok_or_else(|| RecordError::NotFound(id.to_string()))?;

        if !confirm(&self.students[idx]) {
            return Ok(DeleteOutcome::Cancelled);
        }

        let removed = self.students.remove(idx);
        info!(id = %removed.id, "deleted student");
        self.persist();
        Ok(DeleteOutcome::Deleted(removed))
    }

    /// Apply `patch` to the record with `id` and persist.
    pub fn update(&mut self, id: &str, patch: StudentPatch) -> Result<&Student, RecordError> {
        let idx = self
            .position(id)
            .ok_or_else(|| RecordError::NotFound(id.to_string()))?;

        if patch.is_empty() {
            debug!(id = %id, "update left every field unchanged");
        }
        self.students[idx].apply(patch);
        info!(id = %id, "updated student");
        self.persist();
        Ok(&self.students[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open(dir: &TempDir) -> StudentRepository {
        StudentRepository::open(JsonStore::new(dir.path().join("students.json")))
    }

    fn seeded(dir: &TempDir) -> StudentRepository {
        let mut repo = open(dir);
        repo.add(Student::new("S1", "Alice", "CS", 90)).unwrap();
        repo.add(Student::new("S2", "Bob", "Math", 75)).unwrap();
        repo
    }

    fn disk_bytes(repo: &StudentRepository) -> Vec<u8> {
        std::fs::read(repo.store().path()).unwrap()
    }

    #[test]
    fn add_then_list_single_record() {
        let dir = TempDir::new().unwrap();
        let mut repo = open(&dir);
        assert!(repo.is_empty());

        repo.add(Student::new("S1", "Alice", "CS", 90)).unwrap();
        assert_eq!(repo.list(), &[Student::new("S1", "Alice", "CS", 90)]);

        let reopened = open(&dir);
        assert_eq!(reopened.list(), repo.list());
    }

    #[test]
    fn duplicate_add_leaves_repository_unchanged() {
        let dir = TempDir::new().unwrap();
        let mut repo = seeded(&dir);
        let before = disk_bytes(&repo);

        let err = repo.add(Student::new("S1", "Other", "Art", 1)).unwrap_err();
        assert_eq!(err, RecordError::DuplicateId("S1".into()));
        assert_eq!(repo.len(), 2);
        assert_eq!(repo.find("S1").unwrap().name, "Alice");
        assert_eq!(disk_bytes(&repo), before);
    }

    #[test]
    fn ids_are_case_sensitive() {
        let dir = TempDir::new().unwrap();
        let mut repo = seeded(&dir);
        repo.add(Student::new("s1", "Lower", "CS", 50)).unwrap();
        assert_eq!(repo.len(), 3);
    }

    #[test]
    fn ids_stay_unique_across_many_adds() {
        let dir = TempDir::new().unwrap();
        let mut repo = open(&dir);
        for i in 0..20 {
            let _ = repo.add(Student::new(format!("S{}", i % 7), "N", "C", i));
        }
        let ids: HashSet<_> = repo.list().iter().map(|s| s.id.clone()).collect();
        assert_eq!(ids.len(), repo.len());
        assert_eq!(repo.len(), 7);
    }

    #[test]
    fn insertion_order_is_display_order() {
        let dir = TempDir::new().unwrap();
        let mut repo = open(&dir);
        for id in ["Z", "A", "M"] {
            repo.add(Student::new(id, id, "C", 0)).unwrap();
        }
        let ids: Vec<_> = open(&dir).list().iter().map(|s| s.id.clone()).collect();
        assert_eq!(ids, ["Z", "A", "M"]);
    }

    #[test]
    fn search_name_ignores_case() {
        let dir = TempDir::new().unwrap();
        let repo = seeded(&dir);

        let hits = repo.search("alice");
        assert_eq!(hits, vec![&Student::new("S1", "Alice", "CS", 90)]);
        assert_eq!(repo.search("ALICE").len(), 1);
        assert!(repo.search("S3").is_empty());
    }

    #[test]
    fn search_id_is_exact() {
        let dir = TempDir::new().unwrap();
        let repo = seeded(&dir);

        assert_eq!(repo.search("S2")[0].name, "Bob");
        assert!(repo.search("s2").is_empty());
        assert!(repo.search("S").is_empty());
        assert!(repo.search("Ali").is_empty());
    }

    #[test]
    fn search_returns_every_match() {
        let dir = TempDir::new().unwrap();
        let mut repo = seeded(&dir);
        repo.add(Student::new("S3", "alice", "Bio", 60)).unwrap();
        // An id that equals another student's name matches too.
        repo.add(Student::new("Alice", "Dana", "Art", 70)).unwrap();

        let ids: Vec<_> = repo.search("Alice").iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["S1", "S3", "Alice"]);
    }

    #[test]
    fn delete_missing_id_is_not_found() {
        let dir = TempDir::new().unwrap();
        let mut repo = seeded(&dir);
        let mut asked = false;
        let err = repo
            .delete("S9", |_| {
                asked = true;
                true
            })
            .unwrap_err();
        assert_eq!(err, RecordError::NotFound("S9".into()));
        assert!(!asked, "confirmation must not be requested for a missing id");
    }

    #[test]
    fn declined_delete_changes_nothing() {
        let dir = TempDir::new().unwrap();
        let mut repo = seeded(&dir);
        let before_disk = disk_bytes(&repo);
        let before_mem = repo.list().to_vec();

        let outcome = repo
            .delete("S1", |s| {
                assert_eq!(s.name, "Alice");
                false
            })
            .unwrap();

        assert_eq!(outcome, DeleteOutcome::Cancelled);
        assert_eq!(repo.list(), before_mem.as_slice());
        assert_eq!(disk_bytes(&repo), before_disk);
    }

    #[test]
    fn confirmed_delete_removes_and_persists() {
        let dir = TempDir::new().unwrap();
        let mut repo = seeded(&dir);

        let outcome = repo.delete("S1", |_| true).unwrap();
        assert_eq!(
            outcome,
            DeleteOutcome::Deleted(Student::new("S1", "Alice", "CS", 90))
        );
        assert!(repo.find("S1").is_none());
        assert_eq!(open(&dir).list(), &[Student::new("S2", "Bob", "Math", 75)]);
    }

    #[test]
    fn empty_patch_keeps_all_fields() {
        let dir = TempDir::new().unwrap();
        let mut repo = seeded(&dir);

        let updated = repo.update("S1", StudentPatch::default()).unwrap().clone();
        assert_eq!(updated, Student::new("S1", "Alice", "CS", 90));
        assert_eq!(open(&dir).find("S1"), Some(&updated));
    }

    #[test]
    fn name_only_patch() {
        let dir = TempDir::new().unwrap();
        let mut repo = seeded(&dir);

        let patch = StudentPatch {
            name: Some("X".into()),
            ..Default::default()
        };
        repo.update("S1", patch).unwrap();
        assert_eq!(repo.find("S1"), Some(&Student::new("S1", "X", "CS", 90)));
        assert_eq!(open(&dir).find("S1").unwrap().name, "X");
    }

    #[test]
    fn full_patch_updates_all_fields() {
        let dir = TempDir::new().unwrap();
        let mut repo = seeded(&dir);

        let patch = StudentPatch {
            name: Some("Robert".into()),
            course: Some("Stats".into()),
            marks: Some(95),
        };
        repo.update("S2", patch).unwrap();
        assert_eq!(
            open(&dir).find("S2"),
            Some(&Student::new("S2", "Robert", "Stats", 95))
        );
    }

    #[test]
    fn update_missing_id_is_not_found() {
        let dir = TempDir::new().unwrap();
        let mut repo = seeded(&dir);
        let before = disk_bytes(&repo);

        let err = repo.update("nope", StudentPatch::default()).unwrap_err();
        assert_eq!(err, RecordError::NotFound("nope".into()));
        assert_eq!(disk_bytes(&repo), before);
    }

    #[test]
    fn corrupt_store_opens_empty() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("students.json"), "{{{").unwrap();
        let repo = open(&dir);
        assert!(repo.is_empty());
    }

    #[test]
    fn failed_save_keeps_memory_change() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("students.json");
        std::fs::create_dir(&path).unwrap();

        let mut repo = StudentRepository::open(JsonStore::new(&path));
        repo.add(Student::new("S1", "Alice", "CS", 90)).unwrap();
        assert!(!repo.last_save_ok());
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn duplicate_ids_on_disk_are_kept() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::new(dir.path().join("students.json"));
        store.save(&vec![
            Student::new("S1", "Alice", "CS", 90),
            Student::new("S1", "Alias", "CS", 80),
        ]);

        let repo = StudentRepository::open(store);
        assert_eq!(repo.len(), 2);
        assert_eq!(repo.find("S1").unwrap().name, "Alice");
    }
}
