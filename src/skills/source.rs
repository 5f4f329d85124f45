use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, info, warn};

use super::error::DataError;
use super::table::{
    COUNTRY_COLUMN, OCCUPATIONS_COLUMN, RATIO_COLUMN, REQUIRED_COLUMNS, SKILL_COLUMN,
    SourceRecord, SourceTable,
};

/// Anything that can hand over the penetration table in one blocking read.
pub trait DataSource: Send + Sync {
    fn describe(&self) -> String;

    fn read_table(&self) -> Result<SourceTable, DataError>;
}

#[derive(Clone, Debug)]
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DataSource for CsvFileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn read_table(&self) -> Result<SourceTable, DataError> {
        let file = File::open(&self.path).map_err(|source| DataError::Open {
            path: self.path.clone(),
            source,
        })?;

        let table = read_table_from_reader(file)?;
        if table.is_empty() {
            warn!(path = %self.path.display(), "penetration table has no rows");
        }
        info!(
            path = %self.path.display(),
            rows = table.len(),
            skills = table.skills().len(),
            countries = table.countries().len(),
            "loaded penetration table"
        );
        Ok(table)
    }
}

pub fn read_table_from_reader<R: Read>(reader: R) -> Result<SourceTable, DataError> {
    parse_table(ReaderBuilder::new().trim(Trim::Headers).from_reader(reader))
}

struct ColumnIndex {
    skill: usize,
    country: usize,
    ratio: usize,
    occupations: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self, DataError> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|header| header.trim_start_matches('\u{feff}') == name)
                .ok_or(DataError::MissingColumn(name))
        };

        for name in REQUIRED_COLUMNS {
            find(name)?;
        }

        Ok(Self {
            skill: find(SKILL_COLUMN)?,
            country: find(COUNTRY_COLUMN)?,
            ratio: find(RATIO_COLUMN)?,
            occupations: find(OCCUPATIONS_COLUMN)?,
        })
    }
}

fn parse_table<R: Read>(mut reader: csv::Reader<R>) -> Result<SourceTable, DataError> {
    let headers = reader.headers()?.clone();
    let columns = ColumnIndex::from_headers(&headers)?;
    debug!(?headers, "validated CSV header");

    let mut table = SourceTable::default();
    for result in reader.records() {
        let row = result?;
        let line = row.position().map(|position| position.line()).unwrap_or(0);
        let field = |index: usize| row.get(index).unwrap_or("");

        let record = SourceRecord {
            skill: field(columns.skill).to_owned(),
            country: field(columns.country).to_owned(),
            ratio: parse_ratio(field(columns.ratio), line)?,
            occupations: parse_occupations(field(columns.occupations), line)?,
        };
        table.insert(record, line)?;
    }

    Ok(table)
}

/// Cell spellings read as a missing value rather than a number.
const MISSING_MARKERS: [&str; 6] = ["", "NA", "N/A", "NaN", "nan", "null"];

fn is_missing(trimmed: &str) -> bool {
    MISSING_MARKERS.contains(&trimmed)
}

fn parse_ratio(raw: &str, line: u64) -> Result<Option<f64>, DataError> {
    let trimmed = raw.trim();
    if is_missing(trimmed) {
        return Ok(None);
    }

    trimmed
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .map(Some)
        .ok_or_else(|| DataError::InvalidNumber {
            column: RATIO_COLUMN,
            line,
            value: raw.to_owned(),
        })
}

fn parse_occupations(raw: &str, line: u64) -> Result<Option<u64>, DataError> {
    let trimmed = raw.trim();
    if is_missing(trimmed) {
        return Ok(None);
    }

    let invalid = || DataError::InvalidNumber {
        column: OCCUPATIONS_COLUMN,
        line,
        value: raw.to_owned(),
    };

    if let Ok(value) = trimmed.parse::<u64>() {
        return Ok(Some(value));
    }

    // Exports sometimes write integer counts as floats ("12.0").
    let value = trimmed.parse::<f64>().map_err(|_| invalid())?;
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u64::MAX as f64 {
        Ok(Some(value as u64))
    } else {
        Err(invalid())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const HEADER: &str = "skill_group_name,country_name,relative_skill_group_penetration,n_occupations_country_skill";

    fn parse(body: &str) -> Result<SourceTable, DataError> {
        read_table_from_reader(format!("{HEADER}\n{body}").as_bytes())
    }

    #[test]
    fn reads_rows_in_file_order() {
        let table = parse(
            "Artificial Intelligence (AI),Kenya,3.57,12\n\
             Digital Literacy,Kenya,0.91,30\n\
             Artificial Intelligence (AI),Germany,1.4,55\n",
        )
        .unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(
            table.skills(),
            &["Artificial Intelligence (AI)", "Digital Literacy"]
        );
        assert_eq!(table.countries(), &["Kenya", "Germany"]);

        let record = table.get("Artificial Intelligence (AI)", "Kenya").unwrap();
        assert_eq!(record.ratio, Some(3.57));
        assert_eq!(record.occupations, Some(12));
    }

    #[test]
    fn extra_columns_and_column_order_do_not_matter() {
        let csv = "country_code, country_name ,n_occupations_country_skill,skill_group_name,relative_skill_group_penetration\n\
                   KE,Kenya,12,AI,3.57\n";
        let table = read_table_from_reader(csv.as_bytes()).unwrap();
        let record = table.get("AI", "Kenya").unwrap();
        assert_eq!((record.ratio, record.occupations), (Some(3.57), Some(12)));
    }

    #[test]
    fn missing_column_fails_before_rows_are_read() {
        let csv = "skill_group_name,country_name,n_occupations_country_skill\nAI,Kenya,not-a-number\n";
        let error = read_table_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(error, DataError::MissingColumn(RATIO_COLUMN)));
        assert_eq!(
            error.to_string(),
            "missing required field `relative_skill_group_penetration` in CSV header"
        );
    }

    #[test]
    fn invalid_ratio_reports_line() {
        let error = parse("AI,Kenya,3.57,12\nAI,Germany,high,4\n").unwrap_err();
        match error {
            DataError::InvalidNumber { column, line, value } => {
                assert_eq!(column, RATIO_COLUMN);
                assert_eq!(line, 3);
                assert_eq!(value, "high");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn blank_and_na_cells_become_gaps() {
        let table = parse("AI,Kenya,,12\nAI,Germany,1.4,\nAI,Ghana,NaN,NA\n").unwrap();

        let kenya = table.get("AI", "Kenya").unwrap();
        assert_eq!((kenya.ratio, kenya.occupations), (None, Some(12)));
        let germany = table.get("AI", "Germany").unwrap();
        assert_eq!((germany.ratio, germany.occupations), (Some(1.4), None));
        let ghana = table.get("AI", "Ghana").unwrap();
        assert_eq!((ghana.ratio, ghana.occupations), (None, None));

        let grid = crate::skills::Selection::new(["AI"], ["Kenya"]).grid(&table);
        assert_eq!(grid.entries()[0].ratio, None);
        assert_eq!(grid.entries()[0].occupations, Some(12));
    }

    #[test]
    fn occupation_counts_accept_integral_floats_only() {
        let table = parse("AI,Kenya,3.57,12.0\n").unwrap();
        assert_eq!(table.get("AI", "Kenya").unwrap().occupations, Some(12));

        assert!(matches!(
            parse("AI,Kenya,3.57,1.5\n"),
            Err(DataError::InvalidNumber { column: OCCUPATIONS_COLUMN, .. })
        ));
        assert!(matches!(
            parse("AI,Kenya,3.57,-2\n"),
            Err(DataError::InvalidNumber { column: OCCUPATIONS_COLUMN, .. })
        ));
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let error = parse("AI,Kenya,3.57,12\nAI,Germany,1.0,3\nAI,Kenya,2.0,9\n").unwrap_err();
        match error {
            DataError::DuplicateKey {
                skill,
                country,
                first_line,
                line,
            } => {
                assert_eq!((skill.as_str(), country.as_str()), ("AI", "Kenya"));
                assert_eq!((first_line, line), (2, 4));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn header_only_file_is_an_empty_table() {
        let table = parse("").unwrap();
        assert!(table.is_empty());
        assert!(table.skills().is_empty());
    }

    #[test]
    fn file_source_reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "\u{feff}{HEADER}").unwrap();
        writeln!(file, "Scientific Computing,Poland,1.25,48").unwrap();

        let source = CsvFileSource::new(file.path());
        let table = source.read_table().unwrap();
        assert_eq!(
            table.get("Scientific Computing", "Poland").unwrap().occupations,
            Some(48)
        );
        assert_eq!(source.describe(), file.path().display().to_string());
    }

    #[test]
    fn header_only_file_on_disk_loads_empty() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER}").unwrap();

        let table = CsvFileSource::new(file.path()).read_table().unwrap();
        assert!(table.is_empty());
        assert!(table.countries().is_empty());
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.csv");
        let error = CsvFileSource::new(&path).read_table().unwrap_err();
        assert!(matches!(error, DataError::Open { .. }));
        assert!(error.to_string().contains("absent.csv"));
    }
}
