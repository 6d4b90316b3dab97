pub mod csv_export;
pub mod records;
pub mod store;
pub mod transfer;

pub use records::{add, delete, find_by_id, find_by_id_mut, next_objective_number, touch, update};
pub use store::RecordStore;
pub use transfer::{export_json, import_json};
