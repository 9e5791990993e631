use crate::{
    config::{RuntimeConfiguration, StorageConfig},
    data::{StudentRepository, memory::InMemoryStudentRepository, postgres::PostgresStudentRepository},
    error::RosterResult,
    maud_conveniences::render_nav,
};
use maud::{DOCTYPE, Markup, html};
use sqlx::postgres::PgPoolOptions;
use std::{ops::Deref, sync::Arc};

#[derive(Clone)]
pub struct RosterState {
    repo: Arc<dyn StudentRepository>,
}

impl RosterState {
    pub async fn new(options: PgPoolOptions, config: &RuntimeConfiguration) -> RosterResult<Self> {
        let repo: Arc<dyn StudentRepository> = match config.storage() {
            StorageConfig::Postgres(db_config) => {
                Arc::new(PostgresStudentRepository::connect(options, db_config).await?)
            }
            StorageConfig::Memory => {
                warn!("using in-memory storage, nothing will be persisted");
                Arc::new(InMemoryStudentRepository::seeded())
            }
        };

        Ok(Self::with_repository(repo))
    }

    pub fn with_repository(repo: Arc<dyn StudentRepository>) -> Self {
        Self { repo }
    }

    #[allow(clippy::unused_self)] //in case self is ever needed :)
    pub fn render(&self, markup: Markup) -> Markup {
        html! {
            (DOCTYPE)
            html {
                head {
                    meta charset="UTF-8" {}
                    meta name="viewport" content="width=device-width, initial-scale=1.0" {}
                    script src="https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4" {}
                    title { "Roster" }
                }
                body class="bg-gray-900 min-h-screen flex flex-col items-center justify-center text-white" {
                    (render_nav())
                    (markup)
                }
            }
        }
    }
}

impl Deref for RosterState {
    type Target = dyn StudentRepository;

    fn deref(&self) -> &Self::Target {
        &*self.repo
    }
}
