pub mod use_alerts;
pub mod use_students;

pub use use_alerts::{use_alerts, AlertsState};
pub use use_students::{use_students, StudentsState};
