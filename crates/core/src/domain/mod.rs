pub mod role;
pub mod timesheet;
