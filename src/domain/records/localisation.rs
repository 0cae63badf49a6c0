//! Localisation tables (`localisation/*.csv`).
//!
//! Not part of the brace grammar: each row is one key followed by 13 text
//! columns and a literal `x`, separated by semicolons.

use std::fmt;
use std::path::{Path, PathBuf};

use itertools::Itertools;
use tracing::{info, trace};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::syntax::{COMMENT_MARKER, NEW_LINE};

pub const COLUMN_COUNT: usize = 15;
pub const ID_COLUMN: usize = 0;
pub const END_MARKER_COLUMN: usize = COLUMN_COUNT - 1;
pub const END_MARKER: &str = "x";
pub const FIELD_SEPARATOR: char = ';';
pub const HEADER: &str = "#CODE;ENGLISH;FRENCH;GERMAN;;SPANISH;;;;;;;;;x";

/// Languages of the base game and their columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    English,
    French,
    German,
    Spanish,
}

impl Language {
    pub const ALL: [Language; 4] = [
        Language::English,
        Language::French,
        Language::German,
        Language::Spanish,
    ];

    pub fn column(self) -> usize {
        match self {
            Language::English => 1,
            Language::French => 2,
            Language::German => 3,
            Language::Spanish => 5,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Language::English => "english",
            Language::French => "french",
            Language::German => "german",
            Language::Spanish => "spanish",
        };
        f.write_str(name)
    }
}

/// One row of translations identified by its key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Localisation {
    columns: [String; COLUMN_COUNT],
}

impl Localisation {
    pub fn new(id: impl Into<String>) -> DomainResult<Self> {
        let mut localisation = Self {
            columns: Default::default(),
        };
        localisation.set_id(id)?;
        localisation.columns[END_MARKER_COLUMN] = END_MARKER.to_string();
        Ok(localisation)
    }

    pub fn id(&self) -> &str {
        &self.columns[ID_COLUMN]
    }

    pub fn set_id(&mut self, id: impl Into<String>) -> DomainResult<()> {
        let id = id.into();
        ensure_no_separator(&id, ID_COLUMN)?;
        self.columns[ID_COLUMN] = id;
        Ok(())
    }

    /// Translation for `language`; empty when unset.
    pub fn text(&self, language: Language) -> &str {
        &self.columns[language.column()]
    }

    /// Raw column content, `None` past the last column.
    pub fn column(&self, column: usize) -> Option<&str> {
        self.columns.get(column).map(String::as_str)
    }

    pub fn set_text(&mut self, language: Language, text: impl Into<String>) -> DomainResult<()> {
        self.set_column(language.column(), text)
    }

    /// Set a text column (1 to 13). The text must not contain semicolons.
    pub fn set_column(&mut self, column: usize, text: impl Into<String>) -> DomainResult<()> {
        if column == ID_COLUMN {
            return Err(DomainError::InvalidArgument(
                "the key must be set with set_id".to_string(),
            ));
        }
        if column == END_MARKER_COLUMN {
            return Err(DomainError::InvalidArgument(format!(
                "column {} is reserved for the end marker '{}'",
                END_MARKER_COLUMN, END_MARKER
            )));
        }
        if column > END_MARKER_COLUMN {
            return Err(DomainError::InvalidArgument(format!(
                "column must not be larger than {} but was {}",
                END_MARKER_COLUMN, column
            )));
        }
        let text = text.into();
        ensure_no_separator(&text, column)?;
        self.columns[column] = text;
        Ok(())
    }

    /// Parse one data row.
    ///
    /// A `x` in a text column counts as empty; the end marker column is
    /// not checked. Rows may be shorter than 15 columns but not longer.
    pub fn parse_line(line: &str) -> DomainResult<Self> {
        let columns: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
        if columns.len() > COLUMN_COUNT {
            return Err(DomainError::Format {
                name: columns[ID_COLUMN].to_string(),
                value: line.to_string(),
                reason: format!(
                    "expected at most {} columns but found {}",
                    COLUMN_COUNT,
                    columns.len()
                ),
            });
        }

        let mut localisation = Self::new(columns[ID_COLUMN])?;
        for (column, text) in columns.iter().enumerate().take(END_MARKER_COLUMN).skip(1) {
            if *text == END_MARKER {
                continue;
            }
            localisation.columns[column] = text.to_string();
        }
        Ok(localisation)
    }

    /// Row in file form, without line terminator.
    pub fn to_line(&self) -> String {
        self.columns.iter().join(&FIELD_SEPARATOR.to_string())
    }
}

/// A row whose first column starts with `#`.
pub fn is_comment(line: &str) -> bool {
    line.split(FIELD_SEPARATOR)
        .next()
        .is_some_and(|first| first.trim().starts_with(COMMENT_MARKER))
}

fn ensure_no_separator(text: &str, column: usize) -> DomainResult<()> {
    if text.contains(FIELD_SEPARATOR) {
        return Err(DomainError::InvalidArgument(format!(
            "text must not contain semicolons but was '{}' (column: {})",
            text, column
        )));
    }
    Ok(())
}

/// All rows of one localisation file, in file order and without duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalisationFile {
    path: PathBuf,
    rows: Vec<Localisation>,
}

impl LocalisationFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            rows: Vec::new(),
        }
    }

    /// Parse the decoded text of a file. Comment and blank lines are skipped.
    pub fn parse(path: impl Into<PathBuf>, text: &str) -> DomainResult<Self> {
        let mut file = Self::new(path);
        for (index, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            if is_comment(line) {
                trace!("Skipping comment line '{}'", line);
                continue;
            }
            let row = Localisation::parse_line(line).map_err(|e| e.at_line(index + 1))?;
            file.add(row);
        }
        Ok(file)
    }

    /// Header followed by every row, each terminated by CRLF.
    pub fn to_text(&self) -> String {
        let mut out = String::from(HEADER);
        out.push_str(NEW_LINE);
        for row in &self.rows {
            out.push_str(&row.to_line());
            out.push_str(NEW_LINE);
        }
        out
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    pub fn rows(&self) -> &[Localisation] {
        &self.rows
    }

    /// Append a row. Adding an equal row a second time does nothing.
    pub fn add(&mut self, row: Localisation) {
        if self.rows.contains(&row) {
            info!("Localisation already in this file: {}", row.id());
        } else {
            self.rows.push(row);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn given_new_row_then_only_key_and_end_marker_are_set() {
        let row = Localisation::new("KEY").unwrap();
        assert_eq!(row.to_line(), "KEY;;;;;;;;;;;;;;x");
        assert_eq!(row.text(Language::English), "");
    }

    #[rstest]
    #[case(Language::English, 1)]
    #[case(Language::French, 2)]
    #[case(Language::German, 3)]
    #[case(Language::Spanish, 5)]
    fn given_language_then_maps_to_fixed_column(#[case] language: Language, #[case] column: usize) {
        let mut row = Localisation::new("KEY").unwrap();
        row.set_text(language, "text").unwrap();
        assert_eq!(row.column(column), Some("text"));
    }

    #[rstest]
    #[case(0)]
    #[case(14)]
    #[case(15)]
    fn given_reserved_column_when_setting_then_fails(#[case] column: usize) {
        let mut row = Localisation::new("KEY").unwrap();
        assert!(matches!(
            row.set_column(column, "text"),
            Err(DomainError::InvalidArgument(_))
        ));
    }

    #[test]
    fn given_semicolon_in_text_when_setting_then_fails() {
        let mut row = Localisation::new("KEY").unwrap();
        assert!(row.set_text(Language::German, "a;b").is_err());
        assert!(Localisation::new("A;B").is_err());
    }

    #[test]
    fn given_row_with_x_placeholders_when_parsing_then_they_are_empty() {
        let row = Localisation::parse_line("KEY;Hello;Bonjour;x;;Hola;x;x;x;x;x;x;x;x").unwrap();
        assert_eq!(row.id(), "KEY");
        assert_eq!(row.text(Language::English), "Hello");
        assert_eq!(row.text(Language::French), "Bonjour");
        assert_eq!(row.text(Language::German), "");
        assert_eq!(row.text(Language::Spanish), "Hola");
        assert_eq!(row.column(END_MARKER_COLUMN), Some(END_MARKER));
    }

    #[test]
    fn given_short_row_when_parsing_then_missing_columns_are_empty() {
        let row = Localisation::parse_line("KEY;Hello").unwrap();
        assert_eq!(row.text(Language::English), "Hello");
        assert_eq!(row.to_line(), "KEY;Hello;;;;;;;;;;;;;x");
    }

    #[test]
    fn given_too_many_columns_when_parsing_then_fails() {
        let line = "KEY;;;;;;;;;;;;;;x;extra";
        assert!(matches!(
            Localisation::parse_line(line),
            Err(DomainError::Format { .. })
        ));
    }

    #[rstest]
    #[case("#CODE;ENGLISH", true)]
    #[case("  # note", true)]
    #[case("KEY;#text", false)]
    fn given_line_then_detects_comment(#[case] line: &str, #[case] expected: bool) {
        assert_eq!(is_comment(line), expected);
    }

    #[test]
    fn given_text_when_parsing_file_then_skips_comments_blanks_and_duplicates() {
        let text = format!("{}\r\nA;One;;;;;;;;;;;;;x\r\n\r\nB;Two;;;;;;;;;;;;;x\r\nA;One;;;;;;;;;;;;;x\r\n", HEADER);
        let file = LocalisationFile::parse("test.csv", &text).unwrap();
        let ids: Vec<_> = file.rows().iter().map(Localisation::id).collect();
        assert_eq!(ids, vec!["A", "B"]);
        assert_eq!(file.name(), "test.csv");
    }

    #[test]
    fn given_bad_row_when_parsing_file_then_error_has_line_number() {
        let text = "A;;;;;;;;;;;;;;x\nB;;;;;;;;;;;;;;x;;\n";
        let err = LocalisationFile::parse("t.csv", text).unwrap_err();
        assert_eq!(err.line(), Some(2));
    }

    #[test]
    fn given_rows_when_rendering_then_header_first_and_crlf() {
        let mut file = LocalisationFile::new("out.csv");
        let mut row = Localisation::new("GREETING").unwrap();
        row.set_text(Language::English, "Hello").unwrap();
        file.add(row);

        assert_eq!(
            file.to_text(),
            "#CODE;ENGLISH;FRENCH;GERMAN;;SPANISH;;;;;;;;;x\r\nGREETING;Hello;;;;;;;;;;;;;x\r\n"
        );
    }
}
