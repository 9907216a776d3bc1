//! # Etiqueta CLI
//!
//! Command-line interface for generating purchase-order stickers.
//!
//! ## Usage
//!
//! ```bash
//! # Generate stickers.pdf from a PO workbook
//! etiqueta generate po.xlsx
//!
//! # Times-Bold, with logo and QR code, to a custom file
//! etiqueta generate po.xlsx --font times --logo --qr --output out.pdf
//!
//! # Use a different label stock
//! etiqueta generate po.xlsx --stock stock.json
//!
//! # Show what would be printed without writing a PDF
//! etiqueta inspect po.xlsx
//! ```
//!
//! Set `RUST_LOG=debug` for per-label fit details.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use etiqueta::{
    EtiquetaError, FontFace, LabelStock,
    job::{self, DEFAULT_OUTPUT, JobOptions},
    printer::HeightClass,
    sheet,
};

/// Etiqueta - PO sticker generator
#[derive(Parser, Debug)]
#[command(name = "etiqueta")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a sticker PDF from a purchase-order workbook
    Generate {
        /// Workbook to read (xlsx, xls, xlsb, ods)
        input: PathBuf,

        /// Font face: helvetica, times, courier (or 1, 2, 3)
        #[arg(long, default_value = "helvetica")]
        font: String,

        /// Print the company logo in the top-right corner
        #[arg(long)]
        logo: bool,

        /// Print a QR code in the bottom-right corner
        #[arg(long)]
        qr: bool,

        /// Output PDF path
        #[arg(long, short, default_value = DEFAULT_OUTPUT)]
        output: PathBuf,

        /// Label stock JSON file (defaults to 58x39mm)
        #[arg(long, value_name = "FILE")]
        stock: Option<PathBuf>,
    },

    /// Show the detected header, metadata and labels without writing a PDF
    Inspect {
        /// Workbook to read
        input: PathBuf,

        /// Font face used for fitting
        #[arg(long, default_value = "helvetica")]
        font: String,

        /// Label stock JSON file
        #[arg(long, value_name = "FILE")]
        stock: Option<PathBuf>,
    },
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), EtiquetaError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            input,
            font,
            logo,
            qr,
            output,
            stock,
        } => {
            let options = JobOptions {
                face: FontFace::from_choice(&font),
                include_logo: logo,
                include_qr: qr,
                stock: load_stock(stock.as_deref())?,
                ..Default::default()
            };

            let report = job::run(&input, &output, &options)?;
            println!(
                "Wrote {} page(s) for {} label(s) to {}",
                report.pages,
                report.labels,
                report.output.display()
            );
            if report.skipped > 0 {
                println!("Skipped {} row(s) without a description", report.skipped);
            }
            Ok(())
        }

        Commands::Inspect { input, font, stock } => {
            let options = JobOptions {
                face: FontFace::from_choice(&font),
                stock: load_stock(stock.as_deref())?,
                ..Default::default()
            };

            let sheet = sheet::load_workbook(&input)?;
            let prepared = job::prepare(&sheet, &options.stock)?;

            println!("Header row: {}", prepared.header_row_number());
            println!("Company:    {}", prepared.preamble.company);
            println!("PO Number:  {}", prepared.preamble.po_number);
            println!("Font:       {}", options.face.postscript_name());
            println!();

            for (i, label) in job::summarize(&prepared, &options).iter().enumerate() {
                let height = match label.height_class {
                    HeightClass::Compact => "compact",
                    HeightClass::Standard => "standard",
                };
                println!(
                    "{:>3}. x{:<3} {:<8} {:>4.1}pt{} {}",
                    i + 1,
                    label.copies,
                    height,
                    label.font_size,
                    if label.fits { " " } else { "!" },
                    label.description
                );
            }

            println!();
            println!(
                "{} label(s), {} page(s), {} row(s) skipped",
                prepared.labels.len(),
                prepared.total_copies(),
                prepared.skipped
            );
            Ok(())
        }
    }
}

fn load_stock(path: Option<&Path>) -> Result<LabelStock, EtiquetaError> {
    match path {
        Some(path) => LabelStock::from_json_file(path),
        None => Ok(LabelStock::standard()),
    }
}
