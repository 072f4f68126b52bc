pub mod alerts;
pub mod filter_bar;
pub mod stats_cards;
pub mod student_form;
pub mod student_table;

pub use alerts::Alerts;
pub use filter_bar::{FilterBar, ALL_OPTION};
pub use stats_cards::StatsCards;
pub use student_form::StudentForm;
pub use student_table::StudentTable;
