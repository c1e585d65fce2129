//! # geotide-io
//!
//! Reads the JSON hand-off record (`time`, `gw`, `bp`, optional `et`)
//! produced by the data-preparation layer and writes analysis results as
//! JSON. Bridges files into the `&[f64]` slice APIs of the analysis crates.

mod error;
mod reader;
mod record;
mod validate;
mod writer;

pub use error::IoError;
pub use reader::read_record;
pub use record::Record;
pub use writer::write_json;
