//! varlik-katalog - Inventory export to library catalog converter
//!
//! This crate converts a "Varlık İşlem Fişi" inventory export (a spreadsheet
//! whose rows describe library materials) into the nine-column catalog
//! import sheet expected by library automation software.
//!
//! Each input row must provide `malzemeAdi`, `sicilNo`, `barKod` and
//! `birimFiyat`. The composite `malzemeAdi` value
//! (`category-subcategory-title-ISBN`) is split into an ISBN and a title,
//! the unit price is normalized to two decimals, and the registry number and
//! barcode are copied through.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::fs::File;
//! use varlik_katalog::ConverterBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create a converter with default settings (XLSX in, XLSX out)
//!     let converter = ConverterBuilder::new().build()?;
//!
//!     let input = File::open("varlik_islem_fisi.xlsx")?;
//!     let output = File::create("katalog.xlsx")?;
//!
//!     let summary = converter.convert(input, output)?;
//!     println!("{} records, {} with ISBN", summary.records, summary.with_isbn);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Custom Configuration
//!
//! ```rust,no_run
//! use std::fs::File;
//! use varlik_katalog::{ConverterBuilder, InputFormat, OutputFormat, ParsePolicy};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let converter = ConverterBuilder::new()
//!         .with_input_format(InputFormat::Csv)
//!         .with_csv_delimiter(';')
//!         .with_parse_policy(ParsePolicy::Positional)
//!         .with_output_format(OutputFormat::Json)
//!         .build()?;
//!
//!     let input = File::open("export.csv")?;
//!     let output = File::create("katalog.json")?;
//!     converter.convert(input, output)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Step by Step
//!
//! The pipeline stages are also available individually, e.g. to preview the
//! mapped records before writing them:
//!
//! ```rust,no_run
//! use std::fs::File;
//! use varlik_katalog::ConverterBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let converter = ConverterBuilder::new().build()?;
//!
//!     let records = converter.read_records(File::open("varlik_islem_fisi.xlsx")?)?;
//!     let batch = converter.transform(&records)?;
//!     println!("{}", converter.preview(&batch.records, 10)?);
//!
//!     converter.write_records(&batch.records, File::create("katalog.xlsx")?)?;
//!     Ok(())
//! }
//! ```
//!
//! The engine functions ([`validate`], [`transform`], [`map_record`],
//! [`normalize_price`]) are pure and can be used without the reader and
//! writer.

mod api;
mod builder;
mod engine;
mod error;
mod output;
mod reader;
mod security;
mod types;

// 公開API
pub use api::{InputFormat, OutputFormat, ParsePolicy, SheetSelector};
pub use builder::{Converter, ConverterBuilder};
pub use engine::{
    check_dataset, is_isbn, map_record, normalize_price, parse_price, split_parts, transform,
    validate, BatchDriver, BatchOutput, BatchState, BatchSummary, CompositeName, Validation,
    REQUIRED_COLUMNS,
};
pub use error::{ConversionError, InputError};
pub use types::{CellValue, InputRecord, OutputRecord, BAR_KOD, BIRIM_FIYAT, MALZEME_ADI, SICIL_NO};
