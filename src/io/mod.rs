pub mod csv_export;
pub mod file;

pub use file::{load_projects, save_projects};
