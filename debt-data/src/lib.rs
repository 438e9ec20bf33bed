pub mod export;
pub mod loader;

pub use export::{
    ExportError, debts_to_string, schedule_headers, schedule_to_string, write_debts, write_schedule,
    write_schedule_file,
};
pub use loader::{DebtLoader, DebtLoaderError, DebtRecord};
