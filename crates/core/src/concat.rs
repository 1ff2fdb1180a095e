//! Title/abstract concatenation over an already-written CSV table

use crate::Result;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::info;

// Input columns are positional: id,title,abstract,categories,update_date
const TITLE: usize = 1;
const ABSTRACT: usize = 2;
const CATEGORIES: usize = 3;
const UPDATE_DATE: usize = 4;

/// Output header
pub const CONCAT_HEADER: [&str; 3] = ["categories", "update_date", "concat"];

fn concat_field(title: &str, abstract_text: &str) -> String {
    if title.is_empty() || abstract_text.is_empty() {
        String::new()
    } else {
        format!("{title} {abstract_text}")
    }
}

/// Replace the `title` and `abstract` columns with their concatenation.
///
/// Reads `id,title,abstract,categories,update_date` rows and writes
/// `categories,update_date,concat`. The concatenation is empty when either
/// side is empty or missing. Returns the number of rows written.
pub fn concatenate_columns<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<usize> {
    let input = input.as_ref();
    let output = output.as_ref();

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(File::open(input)?);

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(BufWriter::new(File::create(output)?));
    writer.write_record(CONCAT_HEADER)?;

    let mut rows = 0;
    for result in reader.records() {
        let record = result?;
        let field = |index: usize| record.get(index).unwrap_or("");
        let concat = concat_field(field(TITLE), field(ABSTRACT));

        writer.write_record([field(CATEGORIES), field(UPDATE_DATE), concat.as_str()])?;
        rows += 1;
    }
    writer.flush()?;

    info!("Concatenated {} rows from {:?} to {:?}", rows, input, output);

    Ok(rows)
}
