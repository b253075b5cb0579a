pub mod config;
pub mod error;
pub mod pdf;
pub mod print;
pub mod record;
pub mod view;

pub use config::{Business, Config};
pub use error::{Result, StatementError};
pub use pdf::{build_document, PrintDocument};
pub use print::{PrintHandle, PrintScheduler, Printer};
pub use record::{load_records, ServiceRecord};
pub use view::{derive, reduce, Action, DerivedView, Effect, Mode, ViewState};
