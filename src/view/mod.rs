mod filter;
mod pages;
mod state;

pub use filter::{derive, facilities, matches, month_prefix, DerivedView};
pub use pages::{page_count, paginate, Page, RECEIPTS_PER_PAGE, STATEMENT_ROWS_PER_PAGE};
pub use state::{reduce, Action, Effect, Mode, ViewState, ADMIN_PAGE_ID};
