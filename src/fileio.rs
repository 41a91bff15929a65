use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::PathBuf;

use tracing::{info, warn};

use crate::error::{Result, ViewError};
use crate::table::Table;

/// Settings of the delimited text parser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    pub delimiter: u8,
    /// Remove leading and trailing whitespace from the fields
    pub trim: bool,
    /// Reject rows with a different number of fields instead of padding them
    pub strict_columns: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            trim: true,
            strict_columns: false,
        }
    }
}

/// Result of loading a file, including any warnings
pub struct LoadResult {
    pub table: Table,
    pub warnings: Vec<String>,
}

pub struct FileIO {
    /// None reads from stdin
    pub file_path: Option<PathBuf>,
    config: ParserConfig,
}

impl FileIO {
    /// Creates the reader for a file. A missing path or `-` reads stdin.
    pub fn new(file_path: Option<PathBuf>, config: ParserConfig) -> Self {
        let file_path = file_path.filter(|p| p.as_os_str() != "-");
        Self { file_path, config }
    }

    pub fn file_name(&self) -> String {
        self.file_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "stdin".to_string())
    }

    /// Load table from the file or stdin, returning warnings about any
    /// modifications
    pub fn load_table(&self) -> Result<LoadResult> {
        let result = match &self.file_path {
            Some(path) => {
                let file = File::open(path)?;
                self.read_records(BufReader::with_capacity(1 << 20, file))
            }
            None => self.read_records(io::stdin().lock()),
        }?;

        info!(
            source = %self.file_name(),
            rows = result.table.no_rows(),
            columns = result.table.no_columns(),
            "table loaded"
        );
        Ok(result)
    }

    /// Parses delimited text into a table. Short rows are padded with empty
    /// fields, unless strict columns are requested.
    pub fn read_records<R: Read>(&self, reader: R) -> Result<LoadResult> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(self.config.delimiter)
            .has_headers(false)
            .flexible(true)
            .trim(if self.config.trim { csv::Trim::Fields } else { csv::Trim::None })
            .from_reader(reader);

        let mut rows: Vec<Vec<String>> = Vec::new();
        let mut max_cols: usize = 0;
        let mut needs_padding = false;

        for result in csv_reader.records() {
            let record = result?;
            let row: Vec<String> = record.iter().map(normalize_line_breaks).collect();

            if let Some(first) = rows.first() {
                let expected = first.len();
                if row.len() != expected {
                    if self.config.strict_columns {
                        return Err(ViewError::StrictColumns {
                            row: rows.len() + 1,
                            expected,
                            found: row.len(),
                        });
                    }
                    needs_padding = true;
                }
            }

            max_cols = max_cols.max(row.len());
            rows.push(row);
        }

        if rows.is_empty() {
            return Err(ViewError::EmptyInput);
        }

        let mut warnings = Vec::new();

        if needs_padding {
            warn!(max_cols, "padded rows with empty fields");
            warnings.push(format!(
                "Padded rows with empty fields (max width: {} columns)",
                max_cols
            ));

            for row in rows.iter_mut() {
                if row.len() < max_cols {
                    row.resize(max_cols, String::new());
                }
            }
        }

        Ok(LoadResult {
            table: Table::new(rows),
            warnings,
        })
    }
}

/// Fields can contain quoted line breaks, the height of a field counts `\n`.
fn normalize_line_breaks(field: &str) -> String {
    if field.contains('\r') {
        field.replace("\r\n", "\n")
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn read(data: &str, config: ParserConfig) -> Result<LoadResult> {
        FileIO::new(None, config).read_records(data.as_bytes())
    }

    #[test]
    fn test_read_file() {
        let mut file = NamedTempFile::with_suffix(".csv").unwrap();
        writeln!(file, "a,b,c").unwrap();
        writeln!(file, "1,2,3").unwrap();

        let file_io = FileIO::new(Some(file.path().to_path_buf()), ParserConfig::default());
        let result = file_io.load_table().unwrap();

        assert_eq!(result.table.no_rows(), 2);
        assert_eq!(result.table.no_columns(), 3);
        assert_eq!(result.table.field(1, 2), "3");
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let file_io = FileIO::new(Some(PathBuf::from("/nonexistent/table.csv")), ParserConfig::default());
        assert!(matches!(file_io.load_table(), Err(ViewError::Io(_))));
    }

    #[test]
    fn test_dash_is_stdin() {
        let file_io = FileIO::new(Some(PathBuf::from("-")), ParserConfig::default());
        assert!(file_io.file_path.is_none());
        assert_eq!(file_io.file_name(), "stdin");
    }

    #[test]
    fn test_csv_padding_warning() {
        let result = read("a,b,c\n1,2\n3,4,5\n", ParserConfig::default()).unwrap();

        assert_eq!(result.table.no_columns(), 3);
        assert_eq!(result.table.field(1, 2), "");
        assert!(!result.warnings.is_empty());
        assert!(result.warnings[0].contains("Padded"));
    }

    #[test]
    fn test_strict_columns() {
        let config = ParserConfig {
            strict_columns: true,
            ..ParserConfig::default()
        };

        match read("a,b,c\n1,2,3\n4,5\n", config) {
            Err(ViewError::StrictColumns { row, expected, found }) => {
                assert_eq!((row, expected, found), (3, 3, 2));
            }
            _ => panic!("expected a strict columns error"),
        }
    }

    #[test]
    fn test_trim() {
        let result = read(" a , b \n", ParserConfig::default()).unwrap();
        assert_eq!(result.table.field(0, 0), "a");
        assert_eq!(result.table.field(0, 1), "b");

        let config = ParserConfig {
            trim: false,
            ..ParserConfig::default()
        };
        let result = read(" a , b \n", config).unwrap();
        assert_eq!(result.table.field(0, 0), " a ");
    }

    #[test]
    fn test_delimiter() {
        let config = ParserConfig {
            delimiter: b';',
            ..ParserConfig::default()
        };
        let result = read("a;b,c\n", config).unwrap();
        assert_eq!(result.table.no_columns(), 2);
        assert_eq!(result.table.field(0, 1), "b,c");
    }

    #[test]
    fn test_multi_line_field() {
        let result = read("a,\"line 1\r\nline 2\"\n", ParserConfig::default()).unwrap();
        assert_eq!(result.table.field(0, 1), "line 1\nline 2");
        assert_eq!(result.table.height, vec![2]);
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(read("", ParserConfig::default()), Err(ViewError::EmptyInput)));
    }
}
