//! Notification fan-out.

use std::sync::Arc;

use veranda_core::types::DbId;
use veranda_db::models::user::User;
use veranda_db::repositories::{NotificationRepo, UserRepo};
use veranda_db::DbPool;

use crate::email::EmailDelivery;

/// Creates in-app notifications and mirrors them by email when a mailer is
/// configured.
///
/// The database insert is the source of truth; email is best-effort and runs
/// on a detached task so a slow or broken SMTP relay cannot stall a request.
#[derive(Clone)]
pub struct Notifier {
    pool: DbPool,
    mailer: Option<Arc<EmailDelivery>>,
}

impl Notifier {
    pub fn new(pool: DbPool, mailer: Option<EmailDelivery>) -> Self {
        Self {
            pool,
            mailer: mailer.map(Arc::new),
        }
    }

    /// Notify a single user.
    pub async fn notify_user(
        &self,
        user_id: DbId,
        email: Option<&str>,
        category: &str,
        title: &str,
        body: &str,
    ) -> Result<(), sqlx::Error> {
        NotificationRepo::create(&self.pool, user_id, category, title, body).await?;
        if let Some(address) = email {
            self.send_email(address, title, body);
        }
        Ok(())
    }

    /// Notify a set of users in one insert, then mirror each by email.
    pub async fn notify_users(
        &self,
        users: &[User],
        category: &str,
        title: &str,
        body: &str,
    ) -> Result<u64, sqlx::Error> {
        let ids: Vec<DbId> = users.iter().map(|u| u.id).collect();
        let inserted = NotificationRepo::create_many(&self.pool, &ids, category, title, body).await?;
        for user in users {
            self.send_email(&user.email, title, body);
        }
        Ok(inserted)
    }

    /// Notify the active residents of a unit.
    pub async fn notify_unit_residents(
        &self,
        unit_id: DbId,
        category: &str,
        title: &str,
        body: &str,
    ) -> Result<u64, sqlx::Error> {
        let residents = UserRepo::list_active_by_unit(&self.pool, unit_id).await?;
        self.notify_users(&residents, category, title, body).await
    }

    /// Notify a project's active users holding the named role.
    pub async fn notify_project_role(
        &self,
        project_id: DbId,
        role_name: &str,
        category: &str,
        title: &str,
        body: &str,
    ) -> Result<u64, sqlx::Error> {
        let users = UserRepo::list_active_by_role(&self.pool, project_id, role_name).await?;
        self.notify_users(&users, category, title, body).await
    }

    /// Fire-and-forget email send. Failures are logged, never propagated.
    fn send_email(&self, to: &str, subject: &str, body: &str) {
        let Some(mailer) = self.mailer.clone() else {
            return;
        };
        let to = to.to_string();
        let subject = subject.to_string();
        let body = body.to_string();
        tokio::spawn(async move {
            if let Err(err) = mailer.deliver(&to, &subject, &body).await {
                tracing::warn!(to, error = %err, "Email delivery failed");
            }
        });
    }
}
