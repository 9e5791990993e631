use crate::{
    data::StudentRepository,
    error::{RosterResult, UnknownGenderSnafu},
};
use maud::Render;
use snafu::OptionExt;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Gender {
    pub id: i32,
    pub name: String,
}

impl Render for Gender {
    fn render_to(&self, buffer: &mut String) {
        self.name.render_to(buffer);
    }
}

/// Converts between a [`Gender`] and the name shown in (and submitted by) the student form.
#[derive(Clone, Copy)]
pub struct GenderFormatter<'a> {
    repo: &'a dyn StudentRepository,
}

impl<'a> GenderFormatter<'a> {
    pub const fn new(repo: &'a dyn StudentRepository) -> Self {
        Self { repo }
    }

    pub fn print(gender: &Gender) -> &str {
        &gender.name
    }

    pub async fn parse(&self, text: &str) -> RosterResult<Gender> {
        self.genders()
            .await?
            .into_iter()
            .find(|gender| gender.name == text)
            .context(UnknownGenderSnafu { text })
    }

    pub async fn genders(&self) -> RosterResult<Vec<Gender>> {
        self.repo.find_genders().await
    }
}
