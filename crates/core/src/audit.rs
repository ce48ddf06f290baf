//! Audit action name constants.
//!
//! Action strings follow `<entity>.<verb>` so the audit log can be filtered
//! by prefix. Keep these in sync with the handlers that record them.

pub const ACTION_USER_CREATE: &str = "user.create";
pub const ACTION_USER_UPDATE: &str = "user.update";
pub const ACTION_USER_DEACTIVATE: &str = "user.deactivate";
pub const ACTION_USER_RESET_PASSWORD: &str = "user.reset_password";

pub const ACTION_PROJECT_CREATE: &str = "project.create";
pub const ACTION_PROJECT_UPDATE: &str = "project.update";
pub const ACTION_PROJECT_DELETE: &str = "project.delete";
pub const ACTION_PROJECT_SETTINGS_UPDATE: &str = "project.settings_update";

pub const ACTION_UNIT_CREATE: &str = "unit.create";
pub const ACTION_UNIT_UPDATE: &str = "unit.update";
pub const ACTION_UNIT_DELETE: &str = "unit.delete";

pub const ACTION_ANNOUNCEMENT_CREATE: &str = "announcement.create";
pub const ACTION_ANNOUNCEMENT_UPDATE: &str = "announcement.update";
pub const ACTION_ANNOUNCEMENT_DELETE: &str = "announcement.delete";

pub const ACTION_BILL_ISSUE: &str = "bill.issue";
pub const ACTION_BILL_PAY: &str = "bill.pay";
pub const ACTION_BILL_CANCEL: &str = "bill.cancel";

pub const ACTION_VISITOR_REGISTER: &str = "visitor.register";
pub const ACTION_VISITOR_CHECK_IN: &str = "visitor.check_in";
pub const ACTION_VISITOR_CHECK_OUT: &str = "visitor.check_out";

pub const ACTION_PARCEL_LOG: &str = "parcel.log";
pub const ACTION_PARCEL_COLLECT: &str = "parcel.collect";

pub const ACTION_MAINTENANCE_OPEN: &str = "maintenance.open";
pub const ACTION_MAINTENANCE_ASSIGN: &str = "maintenance.assign";
pub const ACTION_MAINTENANCE_STATUS: &str = "maintenance.status";

pub const ACTION_EQUIPMENT_CREATE: &str = "equipment.create";
pub const ACTION_EQUIPMENT_UPDATE: &str = "equipment.update";
pub const ACTION_EQUIPMENT_DELETE: &str = "equipment.delete";

pub const ACTION_FACILITY_CREATE: &str = "facility.create";
pub const ACTION_FACILITY_UPDATE: &str = "facility.update";
pub const ACTION_FACILITY_DELETE: &str = "facility.delete";

pub const ACTION_BOOKING_CREATE: &str = "booking.create";
pub const ACTION_BOOKING_DECIDE: &str = "booking.decide";
pub const ACTION_BOOKING_CANCEL: &str = "booking.cancel";

pub const ACTION_SOS_RAISE: &str = "sos.raise";
pub const ACTION_SOS_ACKNOWLEDGE: &str = "sos.acknowledge";
pub const ACTION_SOS_RESOLVE: &str = "sos.resolve";

pub const ACTION_SUPPORT_OPEN: &str = "support.open";
pub const ACTION_SUPPORT_REPLY: &str = "support.reply";
pub const ACTION_SUPPORT_CLOSE: &str = "support.close";

pub const ACTION_ATTENDANCE_CHECK_IN: &str = "attendance.check_in";
pub const ACTION_ATTENDANCE_CHECK_OUT: &str = "attendance.check_out";

pub const ACTION_PATROL_CHECKPOINT_CREATE: &str = "patrol.checkpoint_create";
pub const ACTION_PATROL_CHECKPOINT_UPDATE: &str = "patrol.checkpoint_update";
pub const ACTION_PATROL_SCAN: &str = "patrol.scan";
