//! Head sampling for CSV files
//!
//! Copies the header and the first N data rows of a CSV file into a new
//! file, leaving every field byte-for-byte unchanged.

use crate::Result;
use std::path::Path;
use tracing::info;

/// Rows taken when no explicit count is given
pub const DEFAULT_SAMPLE_ROWS: usize = 100;

/// Write the header and the first `rows` data rows of `input` to `output`.
///
/// Returns the number of data rows copied, which is less than `rows` when
/// the input is shorter.
pub fn sample_csv<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q, rows: usize) -> Result<usize> {
    let input = input.as_ref();
    let output = output.as_ref();

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(input)?;
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_path(output)?;

    writer.write_byte_record(reader.byte_headers()?)?;

    let mut copied = 0;
    let mut record = csv::ByteRecord::new();
    while copied < rows && reader.read_byte_record(&mut record)? {
        writer.write_byte_record(&record)?;
        copied += 1;
    }
    writer.flush()?;

    info!("Sampled {} rows from {:?} into {:?}", copied, input, output);

    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data_rows(path: &Path) -> Vec<csv::StringRecord> {
        csv::Reader::from_path(path)
            .unwrap()
            .records()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap()
    }

    #[test]
    fn test_sample_first_hundred_rows() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("data.csv");
        let output = dir.path().join("sample.csv");

        let mut contents = String::from("text,categories,update_date\n");
        for i in 0..250 {
            contents.push_str(&format!("token{i} lattice,\"hep-th, gr-qc\",2020-01-{:02}\n", i % 28 + 1));
        }
        std::fs::write(&input, &contents).unwrap();

        let copied = sample_csv(&input, &output, DEFAULT_SAMPLE_ROWS).unwrap();
        assert_eq!(copied, 100);

        let source = data_rows(&input);
        let sample = data_rows(&output);
        assert_eq!(sample.len(), 100);
        assert_eq!(&source[..100], &sample[..]);

        let header = std::fs::read_to_string(&output).unwrap();
        assert!(header.starts_with("text,categories,update_date\n"));
    }

    #[test]
    fn test_sample_short_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("data.csv");
        let output = dir.path().join("sample.csv");
        std::fs::write(&input, "text\nalpha\nbeta\n").unwrap();

        assert_eq!(sample_csv(&input, &output, 100).unwrap(), 2);
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "text\nalpha\nbeta\n");
    }

    #[test]
    fn test_sample_preserves_multiline_fields() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("data.csv");
        let output = dir.path().join("sample.csv");
        std::fs::write(&input, "text,n\n\"line one\nline two\",1\nnext,2\nlast,3\n").unwrap();

        assert_eq!(sample_csv(&input, &output, 2).unwrap(), 2);
        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "text,n\n\"line one\nline two\",1\nnext,2\n"
        );
    }

    #[test]
    fn test_sample_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let result = sample_csv(dir.path().join("missing.csv"), dir.path().join("out.csv"), 10);
        assert!(result.is_err());
    }
}
