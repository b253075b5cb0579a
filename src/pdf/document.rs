use serde::Serialize;

use crate::config::{Business, Config};
use crate::pdf::format::{
    day_with_weekday, format_money, item_line, month_heading, receipt_date, receipt_number,
};
use crate::view::{paginate, DerivedView, Mode, ViewState, RECEIPTS_PER_PAGE, STATEMENT_ROWS_PER_PAGE};

/// A line on the full statement
#[derive(Debug, Serialize, PartialEq)]
pub struct StatementRow {
    pub number: usize,
    pub day: String,
    pub room: String,
    pub name: String,
    pub menu: String,
    pub price: String,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct StatementPage {
    pub number: usize,
    /// Title/issuer block on the first page, fixed spacer elsewhere
    pub show_header: bool,
    /// Grand total and bank notice on the last page
    pub show_total: bool,
    pub rows: Vec<StatementRow>,
}

/// Complete data for rendering the full statement PDF
#[derive(Debug, Serialize)]
pub struct StatementDocument {
    pub title: String,
    pub month: String,
    pub facility: String,
    pub business: Business,
    pub total: String,
    pub bank_notice: Vec<String>,
    pub pages: Vec<StatementPage>,
}

/// One cut-out receipt
#[derive(Debug, Serialize, PartialEq)]
pub struct ReceiptTile {
    pub number: String,
    pub name: String,
    pub price: String,
    pub item: String,
    pub date: String,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ReceiptPage {
    pub number: usize,
    pub tiles: Vec<ReceiptTile>,
}

/// Complete data for rendering the 8-up receipt sheets
#[derive(Debug, Serialize)]
pub struct ReceiptDocument {
    pub title: String,
    pub attestation: String,
    pub business: Business,
    pub pages: Vec<ReceiptPage>,
}

/// The committed template for the current view state
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum PrintDocument {
    Statement(StatementDocument),
    Receipts(ReceiptDocument),
}

impl PrintDocument {
    pub fn mode(&self) -> Mode {
        match self {
            PrintDocument::Statement(_) => Mode::FullStatement,
            PrintDocument::Receipts(_) => Mode::IndividualReceipts,
        }
    }

    pub fn page_count(&self) -> usize {
        match self {
            PrintDocument::Statement(doc) => doc.pages.len(),
            PrintDocument::Receipts(doc) => doc.pages.len(),
        }
    }
}

pub fn build_statement(view: &DerivedView, state: &ViewState, config: &Config) -> StatementDocument {
    let symbol = &config.statement.currency_symbol;

    let pages = paginate(&view.sorted, STATEMENT_ROWS_PER_PAGE)
        .into_iter()
        .map(|page| StatementPage {
            number: page.number,
            show_header: page.is_first,
            show_total: page.is_last,
            rows: page
                .items
                .iter()
                .enumerate()
                .map(|(i, r)| StatementRow {
                    number: page.offset + i + 1,
                    day: day_with_weekday(r.date),
                    room: r.room.clone(),
                    name: r.name.clone(),
                    menu: r.menu.clone(),
                    price: format_money(r.price, symbol),
                })
                .collect(),
        })
        .collect();

    StatementDocument {
        title: config.statement.title.clone(),
        month: month_heading(&state.selected_month),
        facility: state.selected_facility.clone(),
        business: config.business.clone(),
        total: format_money(view.total, symbol),
        bank_notice: config.statement.bank_notice.clone(),
        pages,
    }
}

pub fn build_receipts(view: &DerivedView, config: &Config) -> ReceiptDocument {
    let symbol = &config.statement.currency_symbol;
    let receipt = &config.receipt;

    let pages = paginate(&view.sorted, RECEIPTS_PER_PAGE)
        .into_iter()
        .map(|page| ReceiptPage {
            number: page.number,
            tiles: page
                .items
                .iter()
                .enumerate()
                .map(|(i, r)| ReceiptTile {
                    number: receipt_number(page.offset + i + 1),
                    name: format!("{} {}", r.name, receipt.honorific).trim_end().to_string(),
                    price: format_money(r.price, symbol),
                    item: item_line(&receipt.item_format, &r.menu),
                    date: receipt_date(r.date),
                })
                .collect(),
        })
        .collect();

    ReceiptDocument {
        title: receipt.title.clone(),
        attestation: receipt.attestation.clone(),
        business: config.business.clone(),
        pages,
    }
}

/// Render the template selected by `state.mode`
pub fn build_document(view: &DerivedView, state: &ViewState, config: &Config) -> PrintDocument {
    let document = match state.mode {
        Mode::FullStatement => PrintDocument::Statement(build_statement(view, state, config)),
        Mode::IndividualReceipts => PrintDocument::Receipts(build_receipts(view, config)),
    };
    tracing::debug!(mode = %state.mode, pages = document.page_count(), "committed template");
    document
}
