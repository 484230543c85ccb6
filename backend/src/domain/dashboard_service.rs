//! Dashboard read models assembled from the repositories.

use async_trait::async_trait;

use crate::domain::ports::{DashboardQuery, Repositories};
use crate::domain::repository_errors::{
    map_donation_error, map_incident_error, map_task_error, map_user_error, map_volunteer_error,
};
use crate::domain::{
    AdminDashboard, Error, User, UserDashboard, UserId, UserSummary, VolunteerDashboard,
};

/// Dashboard service implementing [`DashboardQuery`].
#[derive(Clone)]
pub struct DashboardService {
    repos: Repositories,
}

impl DashboardService {
    /// Create a new service over every repository.
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    /// The account behind a session, or `Unauthorized` once it is gone.
    async fn account(&self, user: UserId) -> Result<User, Error> {
        self.repos
            .users
            .find_by_id(user)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::unauthorized("account no longer exists"))
    }
}

#[async_trait]
impl DashboardQuery for DashboardService {
    async fn user_home(&self, user: UserId) -> Result<UserDashboard, Error> {
        let account = self.account(user).await?;

        let incidents = self
            .repos
            .incidents
            .list_by_reporter(user)
            .await
            .map_err(map_incident_error)?;
        let donations = self
            .repos
            .donations
            .list_by_email(&account.email)
            .await
            .map_err(map_donation_error)?;
        let volunteer = self
            .repos
            .volunteers
            .find_by_user_id(user)
            .await
            .map_err(map_volunteer_error)?;

        Ok(UserDashboard {
            incidents,
            donations,
            volunteer,
        })
    }

    async fn volunteer_home(&self, user: UserId) -> Result<VolunteerDashboard, Error> {
        self.account(user).await?;
        let volunteer = self
            .repos
            .volunteers
            .find_by_user_id(user)
            .await
            .map_err(map_volunteer_error)?;
        let assigned_tasks = match &volunteer {
            Some(profile) => self
                .repos
                .tasks
                .list_assigned_to(profile.id)
                .await
                .map_err(map_task_error)?,
            None => Vec::new(),
        };
        let open_tasks = self
            .repos
            .tasks
            .list_unassigned()
            .await
            .map_err(map_task_error)?;

        Ok(VolunteerDashboard {
            volunteer,
            assigned_tasks,
            open_tasks,
        })
    }

    async fn admin_home(&self) -> Result<AdminDashboard, Error> {
        let users = self.repos.users.list_all().await.map_err(map_user_error)?;
        Ok(AdminDashboard {
            users: users.iter().map(UserSummary::from).collect(),
            incidents: self
                .repos
                .incidents
                .list_all()
                .await
                .map_err(map_incident_error)?,
            donations: self
                .repos
                .donations
                .list_all()
                .await
                .map_err(map_donation_error)?,
            volunteers: self
                .repos
                .volunteers
                .list_all()
                .await
                .map_err(map_volunteer_error)?,
            tasks: self.repos.tasks.list_all().await.map_err(map_task_error)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;
    use rstest::rstest;

    use super::*;
    use crate::domain::ports::{
        MockDonationRepository, MockIncidentRepository, MockUserRepository,
        MockVolunteerRepository, MockVolunteerTaskRepository, VolunteerTaskRepositoryError,
    };
    use crate::domain::{
        Email, ErrorCode, NewUser, NewVolunteer, NewVolunteerTask, PasswordDigest, Role,
        TaskStatus, VolunteerId,
    };

    #[derive(Default)]
    struct Mocks {
        users: MockUserRepository,
        incidents: MockIncidentRepository,
        donations: MockDonationRepository,
        volunteers: MockVolunteerRepository,
        tasks: MockVolunteerTaskRepository,
    }

    impl Mocks {
        fn into_service(self) -> DashboardService {
            DashboardService::new(Repositories {
                users: Arc::new(self.users),
                incidents: Arc::new(self.incidents),
                donations: Arc::new(self.donations),
                volunteers: Arc::new(self.volunteers),
                tasks: Arc::new(self.tasks),
            })
        }
    }

    fn task(id: i32, assigned_to: Option<VolunteerId>) -> crate::domain::VolunteerTask {
        NewVolunteerTask {
            name: format!("task {id}"),
            description: "help".into(),
            status: TaskStatus::Open,
            assigned_to,
        }
        .into_task(id)
    }

    fn account(id: UserId, role: Role) -> crate::domain::User {
        NewUser {
            full_name: "Kai".into(),
            email: Email::parse("kai@example.org").expect("valid email"),
            password_digest: PasswordDigest::of("pw"),
            role,
            created_at: Utc::now(),
        }
        .into_user(id)
    }

    #[rstest]
    #[tokio::test]
    async fn user_home_looks_up_donations_by_account_email() {
        let mut mocks = Mocks::default();
        mocks
            .users
            .expect_find_by_id()
            .times(1)
            .return_once(|id| Ok(Some(account(id, Role::User))));
        mocks
            .incidents
            .expect_list_by_reporter()
            .times(1)
            .return_once(|_| Ok(Vec::new()));
        mocks
            .donations
            .expect_list_by_email()
            .withf(|email: &Email| email.as_ref() == "kai@example.org")
            .times(1)
            .return_once(|_| Ok(Vec::new()));
        mocks
            .volunteers
            .expect_find_by_user_id()
            .times(1)
            .return_once(|_| Ok(None));

        let dashboard = mocks
            .into_service()
            .user_home(UserId::new(3))
            .await
            .expect("dashboard");
        assert_eq!(dashboard, UserDashboard::default());
    }

    #[rstest]
    #[tokio::test]
    async fn user_home_for_missing_account_is_unauthorized() {
        let mut mocks = Mocks::default();
        mocks.users.expect_find_by_id().times(1).return_once(|_| Ok(None));

        let error = mocks
            .into_service()
            .user_home(UserId::new(3))
            .await
            .expect_err("missing account");
        assert_eq!(error.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    #[tokio::test]
    async fn volunteer_home_splits_assigned_and_open_tasks() {
        let mut mocks = Mocks::default();
        mocks
            .users
            .expect_find_by_id()
            .times(1)
            .return_once(|id| Ok(Some(account(id, Role::Volunteer))));
        mocks.volunteers.expect_find_by_user_id().times(1).return_once(|user| {
            Ok(Some(
                NewVolunteer {
                    user_id: user,
                    skills: "Driving".into(),
                    availability: "Evenings".into(),
                    joined_at: Utc::now(),
                }
                .into_volunteer(VolunteerId::new(6)),
            ))
        });
        mocks
            .tasks
            .expect_list_assigned_to()
            .withf(|id| *id == VolunteerId::new(6))
            .times(1)
            .return_once(|id| Ok(vec![task(1, Some(id))]));
        mocks
            .tasks
            .expect_list_unassigned()
            .times(1)
            .return_once(|| Ok(vec![task(2, None), task(3, None)]));

        let dashboard = mocks
            .into_service()
            .volunteer_home(UserId::new(3))
            .await
            .expect("dashboard");
        assert_eq!(dashboard.assigned_tasks.len(), 1);
        assert_eq!(dashboard.open_tasks.len(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn volunteer_home_without_profile_skips_assigned_lookup() {
        let mut mocks = Mocks::default();
        mocks
            .users
            .expect_find_by_id()
            .times(1)
            .return_once(|id| Ok(Some(account(id, Role::Volunteer))));
        mocks
            .volunteers
            .expect_find_by_user_id()
            .times(1)
            .return_once(|_| Ok(None));
        mocks.tasks.expect_list_assigned_to().never();
        mocks
            .tasks
            .expect_list_unassigned()
            .times(1)
            .return_once(|| Ok(Vec::new()));

        let dashboard = mocks
            .into_service()
            .volunteer_home(UserId::new(3))
            .await
            .expect("dashboard");
        assert!(dashboard.volunteer.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn volunteer_home_for_missing_account_is_unauthorized() {
        let mut mocks = Mocks::default();
        mocks.users.expect_find_by_id().times(1).return_once(|_| Ok(None));
        mocks.volunteers.expect_find_by_user_id().never();
        mocks.tasks.expect_list_unassigned().never();

        let error = mocks
            .into_service()
            .volunteer_home(UserId::new(3))
            .await
            .expect_err("missing account");
        assert_eq!(error.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    #[tokio::test]
    async fn admin_home_propagates_store_outage() {
        let mut mocks = Mocks::default();
        mocks.users.expect_list_all().times(1).return_once(|| Ok(Vec::new()));
        mocks.incidents.expect_list_all().times(1).return_once(|| Ok(Vec::new()));
        mocks.donations.expect_list_all().times(1).return_once(|| Ok(Vec::new()));
        mocks.volunteers.expect_list_all().times(1).return_once(|| Ok(Vec::new()));
        mocks
            .tasks
            .expect_list_all()
            .times(1)
            .return_once(|| Err(VolunteerTaskRepositoryError::connection("down")));

        let error = mocks
            .into_service()
            .admin_home()
            .await
            .expect_err("outage");
        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    }
}
