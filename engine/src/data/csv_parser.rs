use crate::error::EngineError;
use csv::{QuoteStyle, ReaderBuilder, Terminator, Trim, WriterBuilder};
use std::collections::HashMap;

/// One decoded report line, keyed by header name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsvRow {
    fields: HashMap<String, String>,
}

impl CsvRow {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    /// Value under `header`, or "" when the report has no such column.
    pub fn get(&self, header: &str) -> &str {
        self.fields.get(header).map(String::as_str).unwrap_or("")
    }

    pub fn has(&self, header: &str) -> bool {
        self.fields.contains_key(header)
    }
}

/// Header line plus every non-empty record line, in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsvDocument {
    pub headers: Vec<String>,
    pub rows: Vec<CsvRow>,
}

pub struct ReportCsvParser;

impl ReportCsvParser {
    // Header: nte,inep,sec,escola,municipio,saldoInicial_capital,...,labRobotica
    // Example Row: 1,29000001,1001,"Escola A, Centro",Salvador,"R$ 1.234,56",...
    //
    // Never fails: broken quoting is read best-effort and missing values become "".
    pub fn decode(text: &str) -> CsvDocument {
        let normalized = text.trim().replace('\r', "");
        let mut lines = normalized.split('\n');

        let headers: Vec<String> = match lines.next() {
            Some(header_line) if !header_line.trim().is_empty() => Self::split_fields(header_line),
            _ => return CsvDocument::default(),
        };

        let rows = lines
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                let values = Self::split_fields(line);
                CsvRow::from_pairs(headers.iter().enumerate().map(|(idx, header)| {
                    (header.clone(), values.get(idx).cloned().unwrap_or_default())
                }))
            })
            .collect();

        CsvDocument { headers, rows }
    }

    /// Writes a header and records back out, quoting only the fields that need it.
    pub fn encode<H, R, F>(headers: &[H], rows: R) -> Result<String, EngineError>
    where
        H: AsRef<str>,
        R: IntoIterator<Item = Vec<F>>,
        F: AsRef<str>,
    {
        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Necessary)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        writer.write_record(headers.iter().map(|h| h.as_ref()))?;
        for row in rows {
            writer.write_record(row.iter().map(|f| f.as_ref()))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| EngineError::ProcessingError(format!("Failed to flush CSV writer: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| EngineError::ProcessingError(format!("CSV output is not UTF-8: {}", e)))
    }

    // Each physical line is its own record: a quote left open never spills into the next line.
    fn split_fields(line: &str) -> Vec<String> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(line.as_bytes());

        match rdr.records().next() {
            Some(Ok(record)) => record.iter().map(str::to_string).collect(),
            Some(Err(e)) => {
                tracing::debug!(error = %e, "Unreadable report line, treating it as empty");
                Vec::new()
            }
            None => Vec::new(),
        }
    }
}
