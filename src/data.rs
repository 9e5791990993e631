use crate::error::RosterResult;
use async_trait::async_trait;
use gender::Gender;
use student::Student;

pub mod gender;
pub mod memory;
pub mod postgres;
pub mod student;

/// Every read and write the application makes against student storage goes through here.
///
/// Implementations must make each call atomic: a reader never sees half of a `save`.
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// All genders, sorted by name.
    async fn find_genders(&self) -> RosterResult<Vec<Gender>>;

    /// Students whose last name starts with `prefix` (case-sensitive, no wildcards), ordered by id.
    /// An empty prefix matches everyone.
    async fn find_by_last_name(&self, prefix: &str) -> RosterResult<Vec<Student>>;

    /// Fails with [`RosterError::MissingStudent`](crate::error::RosterError::MissingStudent) if there is no such student.
    async fn find_by_id(&self, id: i32) -> RosterResult<Student>;

    async fn find_all(&self) -> RosterResult<Vec<Student>>;

    /// Inserts when `student.id` is `None`, otherwise overwrites the row with that id.
    /// Returns the persisted student, which always has an id.
    async fn save(&self, student: Student) -> RosterResult<Student>;

    async fn delete_by_id(&self, id: i32) -> RosterResult<()>;
}
