pub mod csv_export;
pub mod file;

pub use csv_export::export_csv;
