extern crate csv;

use std::io;

use csv::{Reader, ReaderBuilder, StringRecord, Writer, WriterBuilder};
use tracing::debug;

use crate::errors::{CsvReverseError, CsvReverseResult};

fn string_record_to_vec(record: &StringRecord) -> Vec<String> {
    let mut string_vec = Vec::new();
    for field in record.iter() {
        string_vec.push(String::from(field));
    }
    string_vec
}

/// Reader and writer settings shared by both ends of the transform
#[derive(Clone, Debug)]
pub struct CsvConfig {
    delimiter: u8,
}

impl Default for CsvConfig {
    fn default() -> Self {
        CsvConfig::new(b',')
    }
}

impl CsvConfig {
    pub fn new(delimiter: u8) -> CsvConfig {
        CsvConfig { delimiter }
    }

    pub fn new_reader<R: io::Read>(&self, rdr: R) -> Reader<R> {
        ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(rdr)
    }

    pub fn new_writer<W: io::Write>(&self, wtr: W) -> Writer<W> {
        WriterBuilder::new()
            .delimiter(self.delimiter)
            .quote_style(csv::QuoteStyle::Necessary)
            .from_writer(wtr)
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Row {
    /// 1-based number of the record in the input, header excluded
    pub record_num: usize,
    pub fields: Vec<String>,
}

/// A fully materialized CSV file: header plus data rows
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    /// Read the whole input. The first record is the header.
    pub fn read<R: io::Read>(rdr: R, config: &CsvConfig) -> CsvReverseResult<Table> {
        let mut reader = config.new_reader(rdr);

        let headers_record = reader.headers()?.clone();
        if headers_record.is_empty() {
            return Err(CsvReverseError::NoColumns);
        }
        let headers = string_record_to_vec(&headers_record);

        let mut rows = Vec::new();
        for (i, record) in reader.records().enumerate() {
            let record = record?;
            let record_num = i + 1;
            if record.len() > headers.len() {
                return Err(CsvReverseError::TooManyFields {
                    line: record.position().map_or(0, |p| p.line()),
                    expected: headers.len(),
                    found: record.len(),
                });
            }
            let mut fields = string_record_to_vec(&record);
            if fields.len() < headers.len() {
                debug!(record_num, found = fields.len(), "padding short row");
                fields.resize(headers.len(), String::new());
            }
            rows.push(Row { record_num, fields });
        }
        debug!(columns = headers.len(), rows = rows.len(), "read table");

        Ok(Table { headers, rows })
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn reverse_rows(&mut self) {
        self.rows.reverse();
    }

    pub fn write<W: io::Write>(&self, wtr: W, config: &CsvConfig) -> CsvReverseResult<()> {
        let mut writer = config.new_writer(wtr);
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(&row.fields)?;
        }
        writer.flush()?;
        Ok(())
    }
}
