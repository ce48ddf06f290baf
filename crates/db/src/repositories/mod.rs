//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod announcement_repo;
pub mod attendance_repo;
pub mod audit_repo;
pub mod bill_repo;
pub mod booking_repo;
pub mod equipment_repo;
pub mod facility_repo;
pub mod maintenance_repo;
pub mod notification_repo;
pub mod parcel_repo;
pub mod patrol_repo;
pub mod project_repo;
pub mod role_repo;
pub mod session_repo;
pub mod sos_repo;
pub mod support_repo;
pub mod unit_repo;
pub mod user_repo;
pub mod visitor_repo;

pub use announcement_repo::AnnouncementRepo;
pub use attendance_repo::AttendanceRepo;
pub use audit_repo::AuditLogRepo;
pub use bill_repo::BillRepo;
pub use booking_repo::BookingRepo;
pub use equipment_repo::EquipmentRepo;
pub use facility_repo::FacilityRepo;
pub use maintenance_repo::MaintenanceRepo;
pub use notification_repo::NotificationRepo;
pub use parcel_repo::ParcelRepo;
pub use patrol_repo::PatrolRepo;
pub use project_repo::ProjectRepo;
pub use role_repo::RoleRepo;
pub use session_repo::SessionRepo;
pub use sos_repo::SosRepo;
pub use support_repo::SupportRepo;
pub use unit_repo::UnitRepo;
pub use user_repo::UserRepo;
pub use visitor_repo::VisitorRepo;
