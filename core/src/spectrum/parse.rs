use ndarray::Array1;

use crate::prelude::{StackError, StackResult};
use crate::spectrum::periodogram::Periodogram;

/// Layout of a delimited periodogram table.
///
/// A space delimiter splits rows on runs of whitespace so aligned columns
/// parse; any other delimiter splits exactly, trimming surrounding blanks.
/// Text from the comment character to the end of its line is discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableFormat {
    pub delimiter: char,
    pub comments: char,
}

impl Default for TableFormat {
    fn default() -> Self {
        Self {
            delimiter: ' ',
            comments: '#',
        }
    }
}

impl TableFormat {
    pub fn new(delimiter: char, comments: char) -> Self {
        Self {
            delimiter,
            comments,
        }
    }

    /// Parse one file's text into a periodogram.
    ///
    /// Every data row must repeat the first row's field count and carry at
    /// least two fields; only the first two are read (frequency, power).
    pub fn parse(&self, text: &str) -> StackResult<Periodogram> {
        let mut frequencies = Vec::new();
        let mut powers = Vec::new();
        let mut expected_fields: Option<usize> = None;

        for (index, raw) in text.lines().enumerate() {
            let line = match raw.find(self.comments) {
                Some(position) => &raw[..position],
                None => raw,
            };
            if line.trim().is_empty() {
                continue;
            }

            let fields: Vec<&str> = if self.delimiter == ' ' {
                line.split_whitespace().collect()
            } else {
                line.split(self.delimiter).map(str::trim).collect()
            };

            let count = *expected_fields.get_or_insert(fields.len());
            if fields.len() != count {
                return Err(StackError::Load(format!(
                    "line {}: expected {} fields, found {}",
                    index + 1,
                    count,
                    fields.len()
                )));
            }
            if fields.len() < 2 {
                return Err(StackError::Load(format!(
                    "line {}: expected at least 2 fields, found {}",
                    index + 1,
                    fields.len()
                )));
            }

            frequencies.push(Self::parse_field(fields[0], index, "frequency")?);
            powers.push(Self::parse_field(fields[1], index, "power")?);
        }

        if frequencies.is_empty() {
            return Err(StackError::Load("no data rows".into()));
        }

        Ok(Periodogram::new(
            Array1::from(frequencies),
            Array1::from(powers),
        ))
    }

    fn parse_field(field: &str, index: usize, column: &str) -> StackResult<f64> {
        field.parse::<f64>().map_err(|_| {
            StackError::Load(format!(
                "line {}: invalid {} value {:?}",
                index + 1,
                column,
                field
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn whitespace_delimiter_accepts_aligned_columns() {
        let format = TableFormat::default();
        let pg = format
            .parse("0.10   1.25\n0.20   0.75\n0.30   0.50\n")
            .unwrap();
        assert_eq!(pg.frequencies, array![0.1, 0.2, 0.3]);
        assert_eq!(pg.powers, array![1.25, 0.75, 0.5]);
    }

    #[test]
    fn custom_delimiter_splits_exactly_and_trims() {
        let format = TableFormat::new(',', '#');
        let pg = format.parse("0.1, 1.0\n0.2, 2.0\n").unwrap();
        assert_eq!(pg.frequencies, array![0.1, 0.2]);
        assert_eq!(pg.powers, array![1.0, 2.0]);
    }

    #[test]
    fn comments_and_blank_lines_are_dropped() {
        let format = TableFormat::default();
        let text = "# header comment\n\n0.1 1.0  # trailing note\n0.2 2.0\n";
        let pg = format.parse(text).unwrap();
        assert_eq!(pg.len(), 2);
        assert_eq!(pg.powers, array![1.0, 2.0]);
    }

    #[test]
    fn extra_columns_are_ignored_but_counted() {
        let format = TableFormat::default();
        let pg = format.parse("0.1 1.0 9.9\n0.2 2.0 8.8\n").unwrap();
        assert_eq!(pg.powers, array![1.0, 2.0]);

        let err = format.parse("0.1 1.0 9.9\n0.2 2.0\n").unwrap_err();
        assert!(matches!(err, StackError::Load(_)));
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn non_numeric_fields_report_their_line() {
        let format = TableFormat::default();
        let err = format.parse("0.1 1.0\n0.2 watts\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));
        assert!(err.to_string().contains("power"));
    }

    #[test]
    fn single_column_rows_are_rejected() {
        let format = TableFormat::default();
        let err = format.parse("0.1\n0.2\n").unwrap_err();
        assert!(err.to_string().contains("at least 2 fields"));
    }

    #[test]
    fn empty_or_comment_only_text_has_no_data_rows() {
        let format = TableFormat::default();
        assert!(matches!(format.parse(""), Err(StackError::Load(_))));
        let err = format.parse("# only\n# comments\n").unwrap_err();
        assert_eq!(err.to_string(), "load failure: no data rows");
    }
}
