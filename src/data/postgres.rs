use crate::{
    config::DbConfig,
    data::{StudentRepository, gender::Gender, student::Student},
    error::{
        GetDatabaseConnectionSnafu, MakeQuerySnafu, MigrateSnafu, MissingStudentSnafu,
        OpenDatabaseSnafu, RosterResult,
    },
};
use async_trait::async_trait;
use snafu::{OptionExt, ResultExt};
use sqlx::{Pool, Postgres, pool::PoolConnection, postgres::PgPoolOptions};

const STUDENT_COLUMNS: &str =
    "id, first_name, last_name, birth_date, hometown, department, student_id, gender_id";

#[derive(Clone, Debug)]
pub struct PostgresStudentRepository {
    pool: Pool<Postgres>,
}

impl PostgresStudentRepository {
    pub async fn connect(options: PgPoolOptions, config: &DbConfig) -> RosterResult<Self> {
        let pool = options
            .connect(&config.get_db_path())
            .await
            .context(OpenDatabaseSnafu)?;

        sqlx::migrate!().run(&pool).await.context(MigrateSnafu)?;

        Ok(Self::new(pool))
    }

    /// Wraps an already-migrated pool.
    pub const fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    async fn get_connection(&self) -> RosterResult<PoolConnection<Postgres>> {
        self.pool
            .acquire()
            .await
            .context(GetDatabaseConnectionSnafu)
    }
}

#[async_trait]
impl StudentRepository for PostgresStudentRepository {
    async fn find_genders(&self) -> RosterResult<Vec<Gender>> {
        sqlx::query_as::<_, Gender>("SELECT id, name FROM public.genders ORDER BY name")
            .fetch_all(&mut *self.get_connection().await?)
            .await
            .context(MakeQuerySnafu)
    }

    async fn find_by_last_name(&self, prefix: &str) -> RosterResult<Vec<Student>> {
        //starts_with rather than LIKE so `%` and `_` in the prefix are literal
        sqlx::query_as::<_, Student>(&format!(
            "SELECT DISTINCT {STUDENT_COLUMNS} FROM public.students WHERE starts_with(last_name, $1) ORDER BY id"
        ))
        .bind(prefix)
        .fetch_all(&mut *self.get_connection().await?)
        .await
        .context(MakeQuerySnafu)
    }

    async fn find_by_id(&self, id: i32) -> RosterResult<Student> {
        sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM public.students WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&mut *self.get_connection().await?)
        .await
        .context(MakeQuerySnafu)?
        .context(MissingStudentSnafu { id })
    }

    async fn find_all(&self) -> RosterResult<Vec<Student>> {
        sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM public.students ORDER BY id"
        ))
        .fetch_all(&mut *self.get_connection().await?)
        .await
        .context(MakeQuerySnafu)
    }

    async fn save(&self, mut student: Student) -> RosterResult<Student> {
        let mut conn = self.get_connection().await?;

        if let Some(id) = student.id {
            let result = sqlx::query(
                "UPDATE public.students SET first_name = $1, last_name = $2, birth_date = $3, hometown = $4, department = $5, student_id = $6, gender_id = $7 WHERE id = $8",
            )
            .bind(&student.first_name)
            .bind(&student.last_name)
            .bind(student.birth_date)
            .bind(&student.hometown)
            .bind(&student.department)
            .bind(&student.student_id)
            .bind(student.gender_id)
            .bind(id)
            .execute(&mut *conn)
            .await
            .context(MakeQuerySnafu)?;

            snafu::ensure!(result.rows_affected() == 1, MissingStudentSnafu { id });
            debug!(id, "updated student");
        } else {
            let id: i32 = sqlx::query_scalar(
                "INSERT INTO public.students (first_name, last_name, birth_date, hometown, department, student_id, gender_id) VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING id",
            )
            .bind(&student.first_name)
            .bind(&student.last_name)
            .bind(student.birth_date)
            .bind(&student.hometown)
            .bind(&student.department)
            .bind(&student.student_id)
            .bind(student.gender_id)
            .fetch_one(&mut *conn)
            .await
            .context(MakeQuerySnafu)?;

            student.id = Some(id);
            info!(id, "inserted student");
        }

        Ok(student)
    }

    async fn delete_by_id(&self, id: i32) -> RosterResult<()> {
        let result = sqlx::query("DELETE FROM public.students WHERE id = $1")
            .bind(id)
            .execute(&mut *self.get_connection().await?)
            .await
            .context(MakeQuerySnafu)?;

        snafu::ensure!(result.rows_affected() == 1, MissingStudentSnafu { id });
        info!(id, "deleted student");
        Ok(())
    }
}
