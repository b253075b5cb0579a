mod document;
pub mod format;
mod typst;

pub use document::{
    build_document, build_receipts, build_statement, PrintDocument, ReceiptDocument, ReceiptPage,
    ReceiptTile, StatementDocument, StatementPage, StatementRow,
};
pub use typst::{generate_pdf, open_path, write_source, SourcePrinter, TypstPrinter};
