//! PostgreSQL-backed volunteer and volunteer task repositories.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{
    VolunteerRepository, VolunteerRepositoryError, VolunteerTaskRepository,
    VolunteerTaskRepositoryError,
};
use crate::domain::{
    NewVolunteer, NewVolunteerTask, TaskStatus, UserId, Volunteer, VolunteerId, VolunteerTask,
};

use super::diesel_basic_error_mapping::{
    map_basic_diesel_error, map_basic_pool_error, unique_violation,
};
use super::models::{NewVolunteerRow, NewVolunteerTaskRow, VolunteerRow, VolunteerTaskRow};
use super::pool::DbPool;
use super::schema::{volunteer_tasks, volunteers};

/// Diesel-backed implementation of the `VolunteerRepository` port.
#[derive(Clone)]
pub struct DieselVolunteerRepository {
    pool: DbPool,
}

impl DieselVolunteerRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Diesel-backed implementation of the `VolunteerTaskRepository` port.
#[derive(Clone)]
pub struct DieselVolunteerTaskRepository {
    pool: DbPool,
}

impl DieselVolunteerTaskRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_volunteer_error(error: diesel::result::Error) -> VolunteerRepositoryError {
    map_basic_diesel_error(
        error,
        VolunteerRepositoryError::query,
        VolunteerRepositoryError::connection,
    )
}

fn map_task_error(error: diesel::result::Error) -> VolunteerTaskRepositoryError {
    map_basic_diesel_error(
        error,
        VolunteerTaskRepositoryError::query,
        VolunteerTaskRepositoryError::connection,
    )
}

impl From<VolunteerRow> for Volunteer {
    fn from(row: VolunteerRow) -> Self {
        Self {
            id: VolunteerId::new(row.id),
            user_id: UserId::new(row.user_id),
            skills: row.skills,
            availability: row.availability,
            joined_at: row.joined_at,
        }
    }
}

fn row_to_task(row: VolunteerTaskRow) -> Result<VolunteerTask, VolunteerTaskRepositoryError> {
    let status = row
        .status
        .parse::<TaskStatus>()
        .map_err(|err| VolunteerTaskRepositoryError::query(err.to_string()))?;
    Ok(VolunteerTask {
        id: row.id,
        name: row.name,
        description: row.description,
        status,
        assigned_to: row.assigned_to.map(VolunteerId::new),
    })
}

#[async_trait]
impl VolunteerRepository for DieselVolunteerRepository {
    async fn insert(&self, volunteer: &NewVolunteer) -> Result<Volunteer, VolunteerRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_basic_pool_error(err, VolunteerRepositoryError::connection))?;
        let row = NewVolunteerRow {
            user_id: volunteer.user_id.get(),
            skills: &volunteer.skills,
            availability: &volunteer.availability,
            joined_at: volunteer.joined_at,
        };
        let inserted = diesel::insert_into(volunteers::table)
            .values(&row)
            .returning(VolunteerRow::as_returning())
            .get_result(&mut conn)
            .await;
        match inserted {
            Ok(stored) => Ok(Volunteer::from(stored)),
            Err(err) if unique_violation(&err).is_some() => Err(
                VolunteerRepositoryError::duplicate_user(volunteer.user_id.get()),
            ),
            Err(err) => Err(map_volunteer_error(err)),
        }
    }

    async fn find_by_user_id(
        &self,
        user_id: UserId,
    ) -> Result<Option<Volunteer>, VolunteerRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_basic_pool_error(err, VolunteerRepositoryError::connection))?;
        let row: Option<VolunteerRow> = volunteers::table
            .filter(volunteers::user_id.eq(user_id.get()))
            .select(VolunteerRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_volunteer_error)?;
        Ok(row.map(Volunteer::from))
    }

    async fn find_by_id(
        &self,
        id: VolunteerId,
    ) -> Result<Option<Volunteer>, VolunteerRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_basic_pool_error(err, VolunteerRepositoryError::connection))?;
        let row: Option<VolunteerRow> = volunteers::table
            .find(id.get())
            .select(VolunteerRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_volunteer_error)?;
        Ok(row.map(Volunteer::from))
    }

    async fn list_all(&self) -> Result<Vec<Volunteer>, VolunteerRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_basic_pool_error(err, VolunteerRepositoryError::connection))?;
        let rows: Vec<VolunteerRow> = volunteers::table
            .order(volunteers::id.asc())
            .select(VolunteerRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_volunteer_error)?;
        Ok(rows.into_iter().map(Volunteer::from).collect())
    }
}

#[async_trait]
impl VolunteerTaskRepository for DieselVolunteerTaskRepository {
    async fn insert(
        &self,
        task: &NewVolunteerTask,
    ) -> Result<VolunteerTask, VolunteerTaskRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_basic_pool_error(err, VolunteerTaskRepositoryError::connection))?;
        let row = NewVolunteerTaskRow {
            name: &task.name,
            description: &task.description,
            status: task.status.as_str(),
            assigned_to: task.assigned_to.map(VolunteerId::get),
        };
        let stored = diesel::insert_into(volunteer_tasks::table)
            .values(&row)
            .returning(VolunteerTaskRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_task_error)?;
        row_to_task(stored)
    }

    async fn list_assigned_to(
        &self,
        volunteer_id: VolunteerId,
    ) -> Result<Vec<VolunteerTask>, VolunteerTaskRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_basic_pool_error(err, VolunteerTaskRepositoryError::connection))?;
        let rows: Vec<VolunteerTaskRow> = volunteer_tasks::table
            .filter(volunteer_tasks::assigned_to.eq(volunteer_id.get()))
            .order(volunteer_tasks::id.asc())
            .select(VolunteerTaskRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_task_error)?;
        rows.into_iter().map(row_to_task).collect()
    }

    async fn list_unassigned(&self) -> Result<Vec<VolunteerTask>, VolunteerTaskRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_basic_pool_error(err, VolunteerTaskRepositoryError::connection))?;
        let rows: Vec<VolunteerTaskRow> = volunteer_tasks::table
            .filter(volunteer_tasks::assigned_to.is_null())
            .order(volunteer_tasks::id.asc())
            .select(VolunteerTaskRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_task_error)?;
        rows.into_iter().map(row_to_task).collect()
    }

    async fn list_all(&self) -> Result<Vec<VolunteerTask>, VolunteerTaskRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_basic_pool_error(err, VolunteerTaskRepositoryError::connection))?;
        let rows: Vec<VolunteerTaskRow> = volunteer_tasks::table
            .order(volunteer_tasks::id.asc())
            .select(VolunteerTaskRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_task_error)?;
        rows.into_iter().map(row_to_task).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn task_rows_map_null_assignee_to_none() {
        let task = row_to_task(VolunteerTaskRow {
            id: 1,
            name: "Cook".into(),
            description: "Evening meal".into(),
            status: "InProgress".into(),
            assigned_to: None,
        })
        .expect("valid row");
        assert_eq!(task.assigned_to, None);
        assert_eq!(task.status, TaskStatus::InProgress);
    }

    #[rstest]
    fn unknown_task_status_is_a_query_error() {
        let error = row_to_task(VolunteerTaskRow {
            id: 1,
            name: "Cook".into(),
            description: "Evening meal".into(),
            status: "Paused".into(),
            assigned_to: Some(2),
        })
        .expect_err("corrupt row");
        assert!(matches!(error, VolunteerTaskRepositoryError::Query { .. }));
    }
}
