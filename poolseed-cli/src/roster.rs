/// Roster loading from delimited text.
///
/// Rows are `last name, first name, club, rank` with no header. Rows with any
/// other number of fields are skipped silently; rows with a bad rank are
/// skipped with a warning, or abort the load in strict mode.
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use poolseed_core::{Competitor, InvalidRankError, Roster};
use thiserror::Error;
use tracing::{debug, warn};

const FIELDS_PER_ROW: usize = 4;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Unable to open file {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read roster: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to read roster {path}: {source}")]
    Read { path: PathBuf, source: csv::Error },

    #[error("Invalid rank on line {line}: {source}")]
    InvalidRank { line: u64, source: InvalidRankError },
}

#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub delimiter: u8,
    /// Abort on the first invalid rank instead of skipping the row.
    pub strict: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions {
            delimiter: b',',
            strict: false,
        }
    }
}

#[derive(Debug)]
pub struct LoadedRoster {
    pub roster: Roster,
    /// Rows dropped for having the wrong number of fields.
    pub malformed_rows: usize,
    /// Rows dropped for an invalid rank (always 0 in strict mode).
    pub invalid_ranks: usize,
}

/// Parse a single-character delimiter such as `,`, `;` or `\t`.
pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "\\t" | "tab" => Ok(b'\t'),
        _ if value.len() == 1 && value.is_ascii() => Ok(value.as_bytes()[0]),
        _ => Err(format!("Delimiter must be a single ASCII character, got \"{value}\"")),
    }
}

/// Read a roster from any reader. The result is sorted strongest first.
pub fn read_roster<R: Read>(reader: R, options: &LoadOptions) -> Result<LoadedRoster, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(options.delimiter)
        .from_reader(reader);

    let mut competitors = Vec::new();
    let mut malformed_rows = 0;
    let mut invalid_ranks = 0;

    for result in reader.records() {
        let record = result?;
        let line = record.position().map_or(0, |p| p.line());

        if record.len() != FIELDS_PER_ROW {
            debug!(line, fields = record.len(), "skipping malformed row");
            malformed_rows += 1;
            continue;
        }

        match Competitor::from_fields(&record[0], &record[1], &record[2], &record[3]) {
            Ok(competitor) => competitors.push(competitor),
            Err(source) if options.strict => return Err(LoadError::InvalidRank { line, source }),
            Err(e) => {
                warn!(line, rank = record[3].trim(), "skipping row with invalid rank: {e}");
                invalid_ranks += 1;
            }
        }
    }

    Ok(LoadedRoster {
        roster: Roster::new(competitors),
        malformed_rows,
        invalid_ranks,
    })
}

/// Open and read a roster file.
pub fn load_roster(path: &Path, options: &LoadOptions) -> Result<LoadedRoster, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_roster(file, options).map_err(|err| match err {
        LoadError::Csv(source) => LoadError::Read {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn read(text: &str) -> LoadedRoster {
        read_roster(text.as_bytes(), &LoadOptions::default()).unwrap()
    }

    #[test]
    fn test_read_roster_normalizes_and_sorts() {
        let loaded = read(
            "laster, Rory, salle mauro, C5\n\
             Doe,Jane,,a\n\
             smith , Al , Blade , u\n",
        );
        let roster = &loaded.roster;
        assert_eq!(roster.len(), 3);
        assert_eq!(roster[0].last_name, "DOE");
        assert_eq!(roster[0].club, "");
        assert_eq!(roster[1].last_name, "LASTER");
        assert_eq!(roster[1].first_name, "Rory");
        assert_eq!(roster[1].club, "SALLE MAURO");
        assert_eq!(roster[1].rank.to_string(), "C5");
        assert_eq!(roster[2].first_name, "Al");
        assert_eq!(roster[2].club, "BLADE");
    }

    #[test]
    fn test_read_roster_drops_wrong_field_counts() {
        let loaded = read(
            "Too,Few,Fields\n\
             Way,Too,Many,Fields,Here\n\
             Ok,Row,CLUB,B2\n",
        );
        assert_eq!(loaded.roster.len(), 1);
        assert_eq!(loaded.malformed_rows, 2);
        assert_eq!(loaded.invalid_ranks, 0);
    }

    #[test]
    fn test_read_roster_skips_invalid_rank_by_default() {
        let loaded = read("A,B,C,Z1\nD,E,F,C\nG,H,I,\n");
        assert_eq!(loaded.roster.len(), 1);
        assert_eq!(loaded.invalid_ranks, 2);
    }

    #[test]
    fn test_read_roster_strict_reports_line() {
        let options = LoadOptions { strict: true, ..Default::default() };
        let err = read_roster("A,B,C,D\nE,F,G,X9\n".as_bytes(), &options).unwrap_err();
        match err {
            LoadError::InvalidRank { line, source } => {
                assert_eq!(line, 2);
                assert_eq!(source, InvalidRankError::UnknownGrade('X'));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_read_roster_custom_delimiter() {
        let options = LoadOptions { delimiter: b';', ..Default::default() };
        let loaded = read_roster("Doe;Jane;X;E3\n".as_bytes(), &options).unwrap();
        assert_eq!(loaded.roster.len(), 1);
        assert_eq!(loaded.roster[0].rank.to_string(), "E3");
    }

    #[test]
    fn test_equal_ranks_keep_file_order() {
        let loaded = read("One,A,,C\nTwo,B,,B\nThree,C,,C\n");
        let names: Vec<&str> = loaded.roster.iter().map(|c| c.last_name.as_str()).collect();
        assert_eq!(names, vec!["TWO", "ONE", "THREE"]);
    }

    #[test]
    fn test_load_roster_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Doe,Jane,SALLE,A1").unwrap();
        writeln!(file, "Roe,Rich,SALLE,B").unwrap();
        let loaded = load_roster(file.path(), &LoadOptions::default()).unwrap();
        assert_eq!(loaded.roster.len(), 2);
    }

    #[test]
    fn test_load_roster_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_roster(&dir.path().join("nope.csv"), &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, LoadError::Open { .. }));
        assert!(err.to_string().starts_with("Unable to open file"));
    }

    #[test]
    fn test_load_roster_read_error_names_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"Doe,Jane,SALLE,A1\nR\xffe,Rich,SALLE,B\n").unwrap();
        let err = load_roster(file.path(), &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, LoadError::Read { .. }));
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter(","), Ok(b','));
        assert_eq!(parse_delimiter(";"), Ok(b';'));
        assert_eq!(parse_delimiter("\\t"), Ok(b'\t'));
        assert_eq!(parse_delimiter("tab"), Ok(b'\t'));
        assert!(parse_delimiter(",,").is_err());
        assert!(parse_delimiter("").is_err());
    }
}
