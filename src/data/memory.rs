use crate::{
    data::{StudentRepository, gender::Gender, student::Student},
    error::{MissingStudentSnafu, RosterResult},
};
use async_trait::async_trait;
use chrono::NaiveDate;
use snafu::OptionExt;
use std::{collections::BTreeMap, sync::Arc};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Store {
    genders: Vec<Gender>,
    students: BTreeMap<i32, Student>,
    last_id: i32,
}

/// Process-local storage, one lock for the whole store so every call is atomic.
#[derive(Clone, Debug, Default)]
pub struct InMemoryStudentRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryStudentRepository {
    /// Same reference data and sample students the database migrations create.
    pub fn seeded() -> Self {
        let genders = ["female", "male", "other"]
            .into_iter()
            .zip(1..)
            .map(|(name, id)| Gender {
                id,
                name: name.to_string(),
            })
            .collect();

        let students = [
            ("George", "Franklin", Some((2001, 3, 14)), "Madison", "Physics", "6085551023", Some(2)),
            ("Betty", "Davis", Some((2002, 7, 2)), "Sun Prairie", "Chemistry", "6085551749", Some(1)),
            ("Eduardo", "Rodriquez", Some((2000, 11, 23)), "McFarland", "Mathematics", "6085558763", Some(2)),
            ("Harold", "Davis", Some((2001, 1, 30)), "Windsor", "History", "6085553198", Some(2)),
            ("Peter", "McTavish", Some((2003, 5, 9)), "Madison", "Economics", "6085552765", Some(2)),
            ("Jean", "Coleman", None, "Monona", "Biology", "6085552654", Some(1)),
            ("Jeff", "Black", Some((2002, 9, 17)), "Monona", "Computer Science", "6085555387", None),
            ("Maria", "Escobito", Some((2000, 4, 4)), "Madison", "Linguistics", "6085557683", Some(1)),
        ];

        let students: BTreeMap<_, _> = students
            .into_iter()
            .zip(1..)
            .map(
                |((first_name, last_name, birth_date, hometown, department, student_id, gender_id), id)| {
                    let student = Student {
                        id: Some(id),
                        first_name: first_name.to_string(),
                        last_name: last_name.to_string(),
                        birth_date: birth_date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
                        hometown: hometown.to_string(),
                        department: department.to_string(),
                        student_id: student_id.to_string(),
                        gender_id,
                    };
                    (id, student)
                },
            )
            .collect();

        let last_id = students.keys().next_back().copied().unwrap_or_default();

        Self {
            store: Arc::new(RwLock::new(Store {
                genders,
                students,
                last_id,
            })),
        }
    }
}

#[async_trait]
impl StudentRepository for InMemoryStudentRepository {
    async fn find_genders(&self) -> RosterResult<Vec<Gender>> {
        let mut genders = self.store.read().await.genders.clone();
        genders.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(genders)
    }

    async fn find_by_last_name(&self, prefix: &str) -> RosterResult<Vec<Student>> {
        Ok(self
            .store
            .read()
            .await
            .students
            .values()
            .filter(|student| student.last_name.starts_with(prefix))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> RosterResult<Student> {
        self.store
            .read()
            .await
            .students
            .get(&id)
            .cloned()
            .context(MissingStudentSnafu { id })
    }

    async fn find_all(&self) -> RosterResult<Vec<Student>> {
        Ok(self.store.read().await.students.values().cloned().collect())
    }

    async fn save(&self, mut student: Student) -> RosterResult<Student> {
        let mut store = self.store.write().await;

        if let Some(id) = student.id {
            let existing = store
                .students
                .get_mut(&id)
                .context(MissingStudentSnafu { id })?;
            existing.clone_from(&student);
            debug!(id, "updated student");
        } else {
            store.last_id += 1;
            let id = store.last_id;
            student.id = Some(id);
            store.students.insert(id, student.clone());
            info!(id, "inserted student");
        }

        Ok(student)
    }

    async fn delete_by_id(&self, id: i32) -> RosterResult<()> {
        self.store
            .write()
            .await
            .students
            .remove(&id)
            .context(MissingStudentSnafu { id })?;
        info!(id, "deleted student");
        Ok(())
    }
}
