use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// Page identifier handed to the router when leaving the statement view
pub const ADMIN_PAGE_ID: &str = "admin";

/// Which print template is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    FullStatement,
    IndividualReceipts,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::FullStatement => write!(f, "statement"),
            Mode::IndividualReceipts => write!(f, "receipts"),
        }
    }
}

/// Filter selections and template choice for one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    /// `YYYY-MM`, as produced by a month picker
    pub selected_month: String,
    /// Empty means every facility
    pub selected_facility: String,
    pub mode: Mode,
}

impl ViewState {
    /// Initial state: the month containing `today`, no facility, full statement
    pub fn new(today: NaiveDate) -> Self {
        Self {
            selected_month: today.format("%Y-%m").to_string(),
            selected_facility: String::new(),
            mode: Mode::FullStatement,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SelectMonth(String),
    SelectFacility(String),
    PrintStatement,
    PrintReceipts,
    ReturnToAdmin,
}

/// Side effect the caller must carry out after committing the new state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Render the committed template, then print it after the fixed delay
    RequestPrint(Mode),
    /// Hand the page identifier to the router
    Navigate(&'static str),
}

/// Pure transition function for the view
pub fn reduce(state: &ViewState, action: Action) -> (ViewState, Option<Effect>) {
    let mut next = state.clone();
    let effect = match action {
        Action::SelectMonth(month) => {
            next.selected_month = month;
            None
        }
        Action::SelectFacility(facility) => {
            next.selected_facility = facility;
            None
        }
        Action::PrintStatement => {
            next.mode = Mode::FullStatement;
            Some(Effect::RequestPrint(next.mode))
        }
        Action::PrintReceipts => {
            next.mode = Mode::IndividualReceipts;
            Some(Effect::RequestPrint(next.mode))
        }
        Action::ReturnToAdmin => Some(Effect::Navigate(ADMIN_PAGE_ID)),
    };
    (next, effect)
}
