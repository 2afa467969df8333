// Report ingestion: text -> rows -> units -> dataset.
pub mod csv_parser;
pub mod dataset;
pub mod record_builder;

pub use csv_parser::{CsvDocument, CsvRow, ReportCsvParser};
pub use dataset::Dataset;
pub use record_builder::RecordBuilder;

/// Decodes report text and builds the dataset for it.
pub fn parse_report(source: &str, text: &str) -> Dataset {
    let document = ReportCsvParser::decode(text);
    let units = RecordBuilder::build(&document.rows);
    Dataset::new(source, units)
}
