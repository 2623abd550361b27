use anyhow::Context;
use stackcore::spectrum::StackedPeriodogram;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write the stacked table as delimited text, nine decimal places per value.
///
/// The optional header row names the columns behind the comment prefix, so
/// the file parses back as a plain two-plus-column table.
pub fn write_table<P: AsRef<Path>>(
    stacked: &StackedPeriodogram,
    path: P,
    delimiter: char,
    comments: char,
    header: bool,
) -> anyhow::Result<()> {
    let path_ref = path.as_ref();
    let file = File::create(path_ref)
        .with_context(|| format!("creating output table {}", path_ref.display()))?;
    let mut writer = BufWriter::new(file);

    if header {
        writeln!(writer, "{}frec{}AND{}OR", comments, delimiter, delimiter)?;
    }
    for row in stacked.rows() {
        writeln!(
            writer,
            "{:.9}{}{:.9}{}{:.9}",
            row.frequency, delimiter, row.and_power, delimiter, row.or_power
        )?;
    }
    writer
        .flush()
        .with_context(|| format!("writing output table {}", path_ref.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use std::fs;
    use tempfile::tempdir;

    fn sample() -> StackedPeriodogram {
        StackedPeriodogram {
            frequencies: array![1.0, 2.0, 3.0],
            and_curve: array![0.0, 0.0, 2.0],
            or_curve: array![1.0 / 3.0, 1.0 / 3.0, 1.0],
        }
    }

    #[test]
    fn table_rows_carry_nine_decimals() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.dat");
        write_table(&sample(), &path, ' ', '#', true).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "#frec AND OR");
        assert_eq!(lines[1], "1.000000000 0.000000000 0.333333333");
        assert_eq!(lines[3], "3.000000000 2.000000000 1.000000000");
    }

    #[test]
    fn header_can_be_omitted_and_delimiter_changed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_table(&sample(), &path, ',', '#', false).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("1.000000000,"));
        assert_eq!(text.lines().count(), 3);
    }
}
