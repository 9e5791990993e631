use crate::data::gender::{Gender, GenderFormatter};
use chrono::NaiveDate;
use maud::Render;
use serde::Deserialize;

const BIRTH_DATE_FORMAT: &str = "%Y-%m-%d";
const MAX_STUDENT_ID_DIGITS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Student {
    pub id: Option<i32>,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<NaiveDate>,
    pub hometown: String,
    pub department: String,
    pub student_id: String,
    pub gender_id: Option<i32>,
}

impl Student {
    pub fn gender<'a>(&self, genders: &'a [Gender]) -> Option<&'a Gender> {
        let gender_id = self.gender_id?;
        genders.iter().find(|gender| gender.id == gender_id)
    }
}

impl Render for Student {
    fn render_to(&self, buffer: &mut String) {
        self.first_name.render_to(buffer);
        buffer.push(' ');
        self.last_name.render_to(buffer);
    }
}

/// The create/edit form as submitted. Has no `id` field: ids come from storage or the path, never the body.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct StudentForm {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: String,
    pub hometown: String,
    pub department: String,
    pub student_id: String,
    pub gender: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn reject(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn for_field(&self, field: &str) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(move |error| error.field == field)
            .map(|error| error.message.as_str())
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|error| error.field)
    }
}

impl StudentForm {
    pub fn from_student(student: &Student, genders: &[Gender]) -> Self {
        Self {
            first_name: student.first_name.clone(),
            last_name: student.last_name.clone(),
            birth_date: student
                .birth_date
                .map(|date| date.format(BIRTH_DATE_FORMAT).to_string())
                .unwrap_or_default(),
            hometown: student.hometown.clone(),
            department: student.department.clone(),
            student_id: student.student_id.clone(),
            gender: student
                .gender(genders)
                .map(|gender| GenderFormatter::print(gender).to_string())
                .unwrap_or_default(),
        }
    }

    /// Field checks that need nothing beyond the form itself.
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();

        for (field, value) in [
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
            ("hometown", &self.hometown),
            ("department", &self.department),
            ("studentId", &self.student_id),
        ] {
            if value.is_empty() {
                errors.reject(field, "must not be empty");
            }
        }

        if !self.student_id.is_empty() && !is_student_id(&self.student_id) {
            errors.reject(
                "studentId",
                "numeric value out of bounds (<10 digits>.<0 digits> expected)",
            );
        }

        errors
    }

    /// Validates and converts into an unpersisted [`Student`]; gender names are resolved through `formatter`.
    pub async fn bind(&self, formatter: &GenderFormatter<'_>) -> Result<Student, FieldErrors> {
        let mut errors = self.validate();

        let birth_date = if self.birth_date.is_empty() {
            None
        } else {
            match NaiveDate::parse_from_str(&self.birth_date, BIRTH_DATE_FORMAT) {
                Ok(date) => Some(date),
                Err(e) => {
                    debug!(?e, birth_date = ?self.birth_date, "unparseable birth date");
                    errors.reject("birthDate", "invalid date, expected yyyy-MM-dd");
                    None
                }
            }
        };

        let gender_id = if self.gender.is_empty() {
            None
        } else {
            match formatter.parse(&self.gender).await {
                Ok(gender) => Some(gender.id),
                Err(e) => {
                    errors.reject("gender", e.to_string());
                    None
                }
            }
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Student {
            id: None,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            birth_date,
            hometown: self.hometown.clone(),
            department: self.department.clone(),
            student_id: self.student_id.clone(),
            gender_id,
        })
    }
}

fn is_student_id(s: &str) -> bool {
    s.len() <= MAX_STUDENT_ID_DIGITS && s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::memory::InMemoryStudentRepository;

    fn filled_form() -> StudentForm {
        StudentForm {
            first_name: "Sam".into(),
            last_name: "Schultz".into(),
            birth_date: "2002-02-02".into(),
            hometown: "4, Evans Street".into(),
            department: "Wollongong".into(),
            student_id: "4444444444".into(),
            gender: "male".into(),
        }
    }

    #[test]
    fn complete_form_is_valid() {
        assert!(filled_form().validate().is_empty());
    }

    #[test]
    fn blank_form_rejects_every_required_field() {
        let errors = StudentForm::default().validate();
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            ["firstName", "lastName", "hometown", "department", "studentId"]
        );
        assert_eq!(
            errors.for_field("studentId").collect::<Vec<_>>(),
            ["must not be empty"]
        );
    }

    #[test]
    fn student_id_must_be_at_most_ten_digits() {
        for bad in ["abc", "12a4", "12345678901", "-1", "1.5", " 12"] {
            let form = StudentForm {
                student_id: bad.into(),
                ..filled_form()
            };
            assert_eq!(
                form.validate().fields().collect::<Vec<_>>(),
                ["studentId"],
                "{bad:?} should be rejected"
            );
        }

        for good in ["0", "1234567890", "0000000001"] {
            let form = StudentForm {
                student_id: good.into(),
                ..filled_form()
            };
            assert!(form.validate().is_empty(), "{good:?} should be accepted");
        }
    }

    #[tokio::test]
    async fn bind_resolves_gender_and_date() {
        let repo = InMemoryStudentRepository::seeded();
        let formatter = GenderFormatter::new(&repo);

        let student = filled_form().bind(&formatter).await.unwrap();
        let male = formatter.parse("male").await.unwrap();

        assert_eq!(student.id, None);
        assert_eq!(student.gender_id, Some(male.id));
        assert_eq!(student.birth_date, NaiveDate::from_ymd_opt(2002, 2, 2));
    }

    #[tokio::test]
    async fn bind_treats_blank_optionals_as_unset() {
        let repo = InMemoryStudentRepository::seeded();
        let formatter = GenderFormatter::new(&repo);
        let form = StudentForm {
            birth_date: String::new(),
            gender: String::new(),
            ..filled_form()
        };

        let student = form.bind(&formatter).await.unwrap();
        assert_eq!(student.birth_date, None);
        assert_eq!(student.gender_id, None);
    }

    #[tokio::test]
    async fn bind_reports_conversion_failures_as_field_errors() {
        let repo = InMemoryStudentRepository::seeded();
        let formatter = GenderFormatter::new(&repo);
        let form = StudentForm {
            birth_date: "02/02/2002".into(),
            gender: "robot".into(),
            ..filled_form()
        };

        let errors = form.bind(&formatter).await.unwrap_err();
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            ["birthDate", "gender"]
        );
        assert_eq!(
            errors.for_field("gender").collect::<Vec<_>>(),
            ["type not found: robot"]
        );
    }

    #[tokio::test]
    async fn form_round_trips_through_a_student() {
        let repo = InMemoryStudentRepository::seeded();
        let formatter = GenderFormatter::new(&repo);
        let genders = formatter.genders().await.unwrap();

        let student = filled_form().bind(&formatter).await.unwrap();
        assert_eq!(StudentForm::from_student(&student, &genders), filled_form());
    }
}
