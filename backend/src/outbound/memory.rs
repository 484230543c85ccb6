//! In-memory store implementing every repository port.
//!
//! Used when no database URL is configured and by the HTTP integration tests.
//! All tables sit behind one mutex, so uniqueness checks and inserts are
//! atomic with respect to each other. Identifiers are assigned sequentially
//! from 1 per table.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::ports::{
    DonationRepository, DonationRepositoryError, IncidentRepository, IncidentRepositoryError,
    Repositories, UserRepository, UserRepositoryError, VolunteerRepository,
    VolunteerRepositoryError, VolunteerTaskRepository, VolunteerTaskRepositoryError,
};
use crate::domain::{
    Donation, Email, Incident, NewDonation, NewIncident, NewUser, NewVolunteer, NewVolunteerTask,
    Role, User, UserId, Volunteer, VolunteerId, VolunteerTask,
};

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    incidents: Vec<Incident>,
    donations: Vec<Donation>,
    volunteers: Vec<Volunteer>,
    tasks: Vec<VolunteerTask>,
}

/// Process-local store shared by all repository handles cloned from it.
///
/// # Examples
/// ```
/// use reliefdesk::outbound::memory::MemoryStore;
///
/// let store = MemoryStore::new();
/// let repos = store.repositories();
/// # let _ = repos;
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every repository port backed by this store.
    pub fn repositories(&self) -> Repositories {
        Repositories {
            users: Arc::new(self.clone()),
            incidents: Arc::new(self.clone()),
            donations: Arc::new(self.clone()),
            volunteers: Arc::new(self.clone()),
            tasks: Arc::new(self.clone()),
        }
    }

    fn with_tables<T, E>(
        &self,
        poisoned: impl FnOnce(String) -> E,
        f: impl FnOnce(&mut Tables) -> Result<T, E>,
    ) -> Result<T, E> {
        let mut guard = self
            .tables
            .lock()
            .map_err(|_| poisoned("in-memory store lock poisoned".to_owned()))?;
        f(&mut guard)
    }
}

fn next_id<E>(len: usize, overflow: impl FnOnce(String) -> E) -> Result<i32, E> {
    len.checked_add(1)
        .and_then(|next| i32::try_from(next).ok())
        .ok_or_else(|| overflow("identifier space exhausted".to_owned()))
}

fn newest_first_incidents(mut rows: Vec<Incident>) -> Vec<Incident> {
    rows.sort_by(|a, b| b.reported_at.cmp(&a.reported_at).then(b.id.cmp(&a.id)));
    rows
}

fn newest_first_donations(mut rows: Vec<Donation>) -> Vec<Donation> {
    rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    rows
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn insert(&self, user: &NewUser) -> Result<User, UserRepositoryError> {
        self.with_tables(UserRepositoryError::query, |tables| {
            if tables.users.iter().any(|u| u.email == user.email) {
                return Err(UserRepositoryError::duplicate_email(user.email.as_ref()));
            }
            let id = next_id(tables.users.len(), UserRepositoryError::query)?;
            let stored = user.clone().into_user(UserId::new(id));
            tables.users.push(stored.clone());
            Ok(stored)
        })
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserRepositoryError> {
        self.with_tables(UserRepositoryError::query, |tables| {
            Ok(tables.users.iter().find(|u| &u.email == email).cloned())
        })
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError> {
        self.with_tables(UserRepositoryError::query, |tables| {
            Ok(tables.users.iter().find(|u| u.id == id).cloned())
        })
    }

    async fn update_role(&self, id: UserId, role: Role) -> Result<(), UserRepositoryError> {
        self.with_tables(UserRepositoryError::query, |tables| {
            let user = tables
                .users
                .iter_mut()
                .find(|u| u.id == id)
                .ok_or_else(|| UserRepositoryError::query(format!("user {id} not found")))?;
            user.role = role;
            Ok(())
        })
    }

    async fn list_all(&self) -> Result<Vec<User>, UserRepositoryError> {
        self.with_tables(UserRepositoryError::query, |tables| Ok(tables.users.clone()))
    }
}

#[async_trait]
impl IncidentRepository for MemoryStore {
    async fn insert(&self, incident: &NewIncident) -> Result<Incident, IncidentRepositoryError> {
        self.with_tables(IncidentRepositoryError::query, |tables| {
            if !tables.users.iter().any(|u| u.id == incident.reporter_id) {
                return Err(IncidentRepositoryError::query("foreign key violation"));
            }
            let id = next_id(tables.incidents.len(), IncidentRepositoryError::query)?;
            let stored = incident.clone().into_incident(id);
            tables.incidents.push(stored.clone());
            Ok(stored)
        })
    }

    async fn list_by_reporter(
        &self,
        reporter_id: UserId,
    ) -> Result<Vec<Incident>, IncidentRepositoryError> {
        self.with_tables(IncidentRepositoryError::query, |tables| {
            let rows = tables
                .incidents
                .iter()
                .filter(|i| i.reporter_id == reporter_id)
                .cloned()
                .collect();
            Ok(newest_first_incidents(rows))
        })
    }

    async fn list_all(&self) -> Result<Vec<Incident>, IncidentRepositoryError> {
        self.with_tables(IncidentRepositoryError::query, |tables| {
            Ok(newest_first_incidents(tables.incidents.clone()))
        })
    }
}

#[async_trait]
impl DonationRepository for MemoryStore {
    async fn insert(&self, donation: &NewDonation) -> Result<Donation, DonationRepositoryError> {
        self.with_tables(DonationRepositoryError::query, |tables| {
            if donation.quantity < 0 {
                return Err(DonationRepositoryError::query("check constraint violated"));
            }
            let id = next_id(tables.donations.len(), DonationRepositoryError::query)?;
            let stored = donation.clone().into_donation(id);
            tables.donations.push(stored.clone());
            Ok(stored)
        })
    }

    async fn list_by_email(&self, email: &Email) -> Result<Vec<Donation>, DonationRepositoryError> {
        self.with_tables(DonationRepositoryError::query, |tables| {
            let rows = tables
                .donations
                .iter()
                .filter(|d| &d.email == email)
                .cloned()
                .collect();
            Ok(newest_first_donations(rows))
        })
    }

    async fn list_all(&self) -> Result<Vec<Donation>, DonationRepositoryError> {
        self.with_tables(DonationRepositoryError::query, |tables| {
            Ok(newest_first_donations(tables.donations.clone()))
        })
    }
}

#[async_trait]
impl VolunteerRepository for MemoryStore {
    async fn insert(&self, volunteer: &NewVolunteer) -> Result<Volunteer, VolunteerRepositoryError> {
        self.with_tables(VolunteerRepositoryError::query, |tables| {
            if tables.volunteers.iter().any(|v| v.user_id == volunteer.user_id) {
                return Err(VolunteerRepositoryError::duplicate_user(volunteer.user_id.get()));
            }
            let id = next_id(tables.volunteers.len(), VolunteerRepositoryError::query)?;
            let stored = volunteer.clone().into_volunteer(VolunteerId::new(id));
            tables.volunteers.push(stored.clone());
            Ok(stored)
        })
    }

    async fn find_by_user_id(
        &self,
        user_id: UserId,
    ) -> Result<Option<Volunteer>, VolunteerRepositoryError> {
        self.with_tables(VolunteerRepositoryError::query, |tables| {
            Ok(tables.volunteers.iter().find(|v| v.user_id == user_id).cloned())
        })
    }

    async fn find_by_id(
        &self,
        id: VolunteerId,
    ) -> Result<Option<Volunteer>, VolunteerRepositoryError> {
        self.with_tables(VolunteerRepositoryError::query, |tables| {
            Ok(tables.volunteers.iter().find(|v| v.id == id).cloned())
        })
    }

    async fn list_all(&self) -> Result<Vec<Volunteer>, VolunteerRepositoryError> {
        self.with_tables(VolunteerRepositoryError::query, |tables| {
            Ok(tables.volunteers.clone())
        })
    }
}

#[async_trait]
impl VolunteerTaskRepository for MemoryStore {
    async fn insert(
        &self,
        task: &NewVolunteerTask,
    ) -> Result<VolunteerTask, VolunteerTaskRepositoryError> {
        self.with_tables(VolunteerTaskRepositoryError::query, |tables| {
            let dangling = task
                .assigned_to
                .is_some_and(|assignee| !tables.volunteers.iter().any(|v| v.id == assignee));
            if dangling {
                return Err(VolunteerTaskRepositoryError::query("foreign key violation"));
            }
            let id = next_id(tables.tasks.len(), VolunteerTaskRepositoryError::query)?;
            let stored = task.clone().into_task(id);
            tables.tasks.push(stored.clone());
            Ok(stored)
        })
    }

    async fn list_assigned_to(
        &self,
        volunteer_id: VolunteerId,
    ) -> Result<Vec<VolunteerTask>, VolunteerTaskRepositoryError> {
        self.with_tables(VolunteerTaskRepositoryError::query, |tables| {
            Ok(tables
                .tasks
                .iter()
                .filter(|t| t.assigned_to == Some(volunteer_id))
                .cloned()
                .collect())
        })
    }

    async fn list_unassigned(&self) -> Result<Vec<VolunteerTask>, VolunteerTaskRepositoryError> {
        self.with_tables(VolunteerTaskRepositoryError::query, |tables| {
            Ok(tables
                .tasks
                .iter()
                .filter(|t| t.assigned_to.is_none())
                .cloned()
                .collect())
        })
    }

    async fn list_all(&self) -> Result<Vec<VolunteerTask>, VolunteerTaskRepositoryError> {
        self.with_tables(VolunteerTaskRepositoryError::query, |tables| Ok(tables.tasks.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PasswordDigest, TaskStatus};
    use chrono::{Duration, Utc};
    use rstest::{fixture, rstest};

    #[fixture]
    fn store() -> MemoryStore {
        MemoryStore::new()
    }

    fn new_user(email: &str) -> NewUser {
        NewUser {
            full_name: "Test User".into(),
            email: Email::parse(email).expect("valid email"),
            password_digest: PasswordDigest::of("secret"),
            role: Role::User,
            created_at: Utc::now(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn user_ids_are_sequential_and_emails_unique(store: MemoryStore) {
        let users: &dyn UserRepository = &store;
        let first = users.insert(&new_user("a@example.org")).await.expect("insert");
        let second = users.insert(&new_user("b@example.org")).await.expect("insert");
        assert_eq!(first.id, UserId::new(1));
        assert_eq!(second.id, UserId::new(2));

        let duplicate = users.insert(&new_user("A@example.org")).await;
        assert_eq!(
            duplicate,
            Err(UserRepositoryError::duplicate_email("a@example.org"))
        );
        assert_eq!(users.list_all().await.expect("list").len(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn role_update_is_visible_to_other_handles(store: MemoryStore) {
        let repos = store.repositories();
        let user = repos.users.insert(&new_user("c@example.org")).await.expect("insert");
        repos
            .users
            .update_role(user.id, Role::Volunteer)
            .await
            .expect("update");

        let reloaded = store
            .repositories()
            .users
            .find_by_id(user.id)
            .await
            .expect("lookup")
            .expect("present");
        assert_eq!(reloaded.role, Role::Volunteer);
    }

    #[rstest]
    #[tokio::test]
    async fn second_volunteer_profile_is_rejected(store: MemoryStore) {
        let repos = store.repositories();
        let user = repos.users.insert(&new_user("d@example.org")).await.expect("insert");
        let profile = NewVolunteer {
            user_id: user.id,
            skills: "Cooking".into(),
            availability: "Mornings".into(),
            joined_at: Utc::now(),
        };
        repos.volunteers.insert(&profile).await.expect("first profile");
        let again = repos.volunteers.insert(&profile).await;
        assert_eq!(
            again,
            Err(VolunteerRepositoryError::duplicate_user(user.id.get()))
        );
        assert_eq!(repos.volunteers.list_all().await.expect("list").len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn incidents_are_listed_newest_first(store: MemoryStore) {
        let repos = store.repositories();
        let user = repos.users.insert(&new_user("e@example.org")).await.expect("insert");
        let now = Utc::now();
        for (title, offset) in [("older", 2), ("newer", 1)] {
            repos
                .incidents
                .insert(&NewIncident {
                    title: title.into(),
                    description: "d".into(),
                    location: "l".into(),
                    reporter_id: user.id,
                    reported_at: now - Duration::minutes(offset),
                })
                .await
                .expect("insert");
        }
        let titles: Vec<_> = repos
            .incidents
            .list_by_reporter(user.id)
            .await
            .expect("list")
            .into_iter()
            .map(|i| i.title)
            .collect();
        assert_eq!(titles, ["newer", "older"]);
    }

    #[rstest]
    #[tokio::test]
    async fn unassigned_tasks_are_separated(store: MemoryStore) {
        let repos = store.repositories();
        let user = repos.users.insert(&new_user("f@example.org")).await.expect("insert");
        let volunteer = repos
            .volunteers
            .insert(&NewVolunteer {
                user_id: user.id,
                skills: "Lifting".into(),
                availability: "Any".into(),
                joined_at: Utc::now(),
            })
            .await
            .expect("profile");
        for assigned_to in [None, Some(volunteer.id)] {
            repos
                .tasks
                .insert(&NewVolunteerTask {
                    name: "Unload truck".into(),
                    description: "Depot 2".into(),
                    status: TaskStatus::Open,
                    assigned_to,
                })
                .await
                .expect("task");
        }

        assert_eq!(repos.tasks.list_unassigned().await.expect("list").len(), 1);
        assert_eq!(
            repos
                .tasks
                .list_assigned_to(volunteer.id)
                .await
                .expect("list")
                .len(),
            1
        );

        let dangling = repos
            .tasks
            .insert(&NewVolunteerTask {
                name: "Ghost".into(),
                description: "Nobody".into(),
                status: TaskStatus::Open,
                assigned_to: Some(VolunteerId::new(99)),
            })
            .await;
        assert!(matches!(dangling, Err(VolunteerTaskRepositoryError::Query { .. })));
    }
}
