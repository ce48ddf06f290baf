pub mod announcements;
pub mod attendance;
pub mod audit_logs;
pub mod auth;
pub mod bills;
pub mod bookings;
pub mod dashboard;
pub mod equipment;
pub mod facilities;
pub mod health;
pub mod maintenance;
pub mod notifications;
pub mod parcels;
pub mod patrol;
pub mod projects;
pub mod sos;
pub mod support;
pub mod units;
pub mod users;
pub mod visitors;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                     login (public)
/// /auth/refresh                   refresh (public)
/// /auth/logout                    logout
/// /auth/me                        own profile
///
/// /projects                       list, create
/// /projects/{id}                  get, update, delete
/// /projects/{id}/settings         settings (GET, PUT)
///
/// /units                          list, create
/// /units/{id}                     get, update, delete
///
/// /users                          list, create
/// /users/all                      every account (super admin)
/// /users/staff                    project staff
/// /users/{id}                     get, update, deactivate
/// /users/{id}/reset-password      reset password (POST)
///
/// /announcements                  list, create
/// /announcements/{id}             get, update, delete
///
/// /bills                          list, issue
/// /bills/{id}                     get
/// /bills/{id}/pay                 record payment (POST)
/// /bills/{id}/cancel              cancel (POST)
///
/// /visitors                       list, pre-register
/// /visitors/{id}                  get
/// /visitors/{id}/check-in         gate check-in (POST)
/// /visitors/{id}/check-out        gate check-out (POST)
///
/// /parcels                        list, log
/// /parcels/{id}                   get
/// /parcels/{id}/collect           mark collected (POST)
///
/// /maintenance                    list, open
/// /maintenance/{id}               get
/// /maintenance/{id}/assign        assign staff (POST)
/// /maintenance/{id}/status        advance lifecycle (POST)
///
/// /equipment                      list, register
/// /equipment/{id}                 get, update, delete
///
/// /facilities                     list, create
/// /facilities/{id}                get, update, delete
///
/// /bookings                       list, request
/// /bookings/{id}                  get
/// /bookings/{id}/decide           approve or reject (POST)
/// /bookings/{id}/cancel           cancel (POST)
///
/// /sos                            list, raise
/// /sos/{id}                       get
/// /sos/{id}/acknowledge           acknowledge (POST)
/// /sos/{id}/resolve               resolve (POST)
///
/// /support                        list, open
/// /support/{id}                   ticket + thread
/// /support/{id}/replies           reply (POST)
/// /support/{id}/close             close (POST)
///
/// /notifications                  own inbox
/// /notifications/unread-count     unread count
/// /notifications/read-all         mark all read (POST)
/// /notifications/{id}/read        mark one read (POST)
///
/// /attendance                     shift history (admin)
/// /attendance/me                  own open shift
/// /attendance/check-in            open shift (POST)
/// /attendance/check-out           close shift (POST)
///
/// /patrol/checkpoints             list, create
/// /patrol/checkpoints/{id}        update
/// /patrol/scans                   record scan (POST)
/// /patrol/logs                    scan history
///
/// /audit-logs                     query audit trail (admin)
/// /audit-logs/export              raw export (super admin)
///
/// /dashboard                      aggregate counts (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/projects", projects::router())
        .nest("/units", units::router())
        .nest("/users", users::router())
        .nest("/announcements", announcements::router())
        .nest("/bills", bills::router())
        .nest("/visitors", visitors::router())
        .nest("/parcels", parcels::router())
        .nest("/maintenance", maintenance::router())
        .nest("/equipment", equipment::router())
        .nest("/facilities", facilities::router())
        .nest("/bookings", bookings::router())
        .nest("/sos", sos::router())
        .nest("/support", support::router())
        .nest("/notifications", notifications::router())
        .nest("/attendance", attendance::router())
        .nest("/patrol", patrol::router())
        .nest("/audit-logs", audit_logs::router())
        .nest("/dashboard", dashboard::router())
}
