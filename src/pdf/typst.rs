use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{Result, StatementError};
use crate::pdf::PrintDocument;
use crate::print::Printer;

/// Embedded Typst template for the full statement.
/// A4 portrait, near-zero top margin, wide right margin, fixed content width.
const STATEMENT_TEMPLATE: &str = r##"// Statement Template
// Data is loaded from JSON file

#let data = json("DATA_JSON_PATH")

#set page(
  paper: "a4",
  margin: (top: 2mm, right: 30mm, bottom: 10mm, left: 8mm),
)

#set text(font: ("Noto Sans CJK JP", "Hiragino Sans", "Helvetica"), size: 9pt, lang: "ja")

#for page in data.pages [
  #if page.number > 1 { pagebreak() }

  #block(width: 172mm)[
    #if page.show_header [
      #v(6mm)
      #align(center, text(size: 18pt, weight: "bold")[#data.title])
      #v(4mm)
      #grid(
        columns: (1fr, 1fr),
        align: (left, right),
        [
          #text(size: 12pt, weight: "bold")[#data.facility]
          #v(0.3em)
          #data.month
        ],
        [
          #text(weight: "bold")[#data.business.name] \
          #data.business.address \
          TEL #data.business.phone
        ],
      )
      #v(4mm)
    ] else [
      #v(14mm)
    ]

    #table(
      columns: (8mm, 16mm, 16mm, 1fr, 1fr, 24mm),
      align: (right, center, center, left, left, right),
      stroke: (x, y) => if y == 0 { (bottom: 1pt + black) } else { (bottom: 0.5pt + gray) },
      inset: 5pt,
      fill: (x, y) => if y == 0 { luma(240) } else { none },

      [*No.*], [*日付*], [*部屋*], [*お名前*], [*内容*], [*金額*],

      ..page.rows.map(row => (
        str(row.number),
        row.day,
        row.room,
        row.name,
        row.menu,
        row.price,
      )).flatten()
    )

    #if page.show_total [
      #v(4mm)
      #align(right)[
        #table(
          columns: (auto, auto),
          stroke: none,
          inset: 6pt,
          table.hline(stroke: 1pt),
          [*合計*], [*#data.total*],
        )
      ]
      #v(6mm)
      #block(width: 100%, inset: 4mm, stroke: 0.5pt + gray)[
        #for line in data.bank_notice [
          #line \
        ]
      ]
    ]
  ]
]
"##;

/// Embedded Typst template for the 8-up receipt sheets.
/// A4 split into a 2 x 4 grid of 105mm x 74.25mm cells; no borders, the
/// paper's perforations separate the receipts.
const RECEIPTS_TEMPLATE: &str = r##"// Receipts Template
// Data is loaded from JSON file

#let data = json("DATA_JSON_PATH")

#set page(paper: "a4", margin: 0mm)

#set text(font: ("Noto Sans CJK JP", "Hiragino Sans", "Helvetica"), size: 9pt, lang: "ja")

#let receipt(tile) = block(width: 105mm, height: 74.25mm, inset: 6mm)[
  #grid(
    columns: (1fr, auto),
    text(size: 14pt, weight: "bold")[#data.title],
    [No. #tile.number],
  )
  #v(2mm)
  #text(size: 12pt)[#tile.name]
  #v(1mm)
  #align(center, text(size: 18pt, weight: "bold")[#tile.price -])
  #v(1mm)
  #tile.item \
  #tile.date \
  #data.attestation
  #v(1fr)
  #align(right)[
    #text(weight: "bold")[#data.business.name] \
    #data.business.address \
    TEL #data.business.phone
  ]
]

#for page in data.pages [
  #if page.number > 1 { pagebreak() }

  #grid(
    columns: (105mm, 105mm),
    rows: (74.25mm,) * 4,
    stroke: none,
    ..page.tiles.map(receipt)
  )
]
"##;

fn template_for(document: &PrintDocument) -> (&'static str, &'static str) {
    match document {
        PrintDocument::Statement(_) => (STATEMENT_TEMPLATE, "statement"),
        PrintDocument::Receipts(_) => (RECEIPTS_TEMPLATE, "receipts"),
    }
}

/// Write `<stem>.json` and `<stem>.typ` into `dir`, returning the template path
pub fn write_source(document: &PrintDocument, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let (template, stem) = template_for(document);

    let json_data = serde_json::to_string_pretty(document)
        .map_err(|e| StatementError::PdfGeneration(e.to_string()))?;
    let json_name = format!("{stem}.json");
    std::fs::write(dir.join(&json_name), json_data)?;

    let template_path = dir.join(format!("{stem}.typ"));
    std::fs::write(&template_path, template.replace("DATA_JSON_PATH", &json_name))?;

    Ok(template_path)
}

/// Generate PDF using Typst CLI
pub fn generate_pdf(document: &PrintDocument, output_path: &Path) -> Result<()> {
    compile("typst", &std::env::temp_dir(), document, output_path)
}

/// Compile with `program`, staging the sources in a fresh directory under
/// `staging_root` that is removed on every return path
fn compile(
    program: &str,
    staging_root: &Path,
    document: &PrintDocument,
    output_path: &Path,
) -> Result<()> {
    // Check if typst is available
    if Command::new(program).arg("--version").output().is_err() {
        return Err(StatementError::TypstNotFound);
    }

    let staging = tempfile::Builder::new()
        .prefix("statement-")
        .tempdir_in(staging_root)?;
    let template_path = write_source(document, staging.path())?;

    tracing::debug!(template = %template_path.display(), output = %output_path.display(), "running typst compile");

    // Run typst compile with root set to the staging directory
    let output = Command::new(program)
        .arg("compile")
        .arg("--root")
        .arg(staging.path())
        .arg(&template_path)
        .arg(output_path)
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(StatementError::PdfGeneration(stderr.to_string()));
    }

    Ok(())
}

/// Open a file with the system default viewer
pub fn open_path(path: &Path) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        Command::new("open").arg(path).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        Command::new("xdg-open").arg(path).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        Command::new("cmd")
            .args(["/C", "start", ""])
            .arg(path)
            .spawn()?;
    }
    Ok(())
}

/// Compiles the document to a PDF and optionally opens it
#[derive(Debug, Clone)]
pub struct TypstPrinter {
    pub output: PathBuf,
    pub open: bool,
}

impl Printer for TypstPrinter {
    fn print(&self, document: &PrintDocument) -> Result<PathBuf> {
        if let Some(parent) = self.output.parent() {
            std::fs::create_dir_all(parent)?;
        }
        generate_pdf(document, &self.output)?;
        if self.open {
            open_path(&self.output)?;
        }
        Ok(self.output.clone())
    }
}

/// Writes the Typst template and its JSON data without compiling
#[derive(Debug, Clone)]
pub struct SourcePrinter {
    pub dir: PathBuf,
}

impl Printer for SourcePrinter {
    fn print(&self, document: &PrintDocument) -> Result<PathBuf> {
        write_source(document, &self.dir)
    }
}
