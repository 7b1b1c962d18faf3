//! Parser for the movie/actor flat file.
//!
//! One movie per line, fields separated by `/`:
//!
//! ```text
//! Title (Year)/Last, First/Last, First/...
//! ```
//!
//! The file is Windows-1252 encoded. A record whose year field contains a
//! comma (`(1990, 1991)`) is skipped without complaint; a record that does
//! not have the `Title (Year)` shape at all is a parse error, or a logged
//! skip in lenient mode.

use crate::error::{DataLoadError, RecordError, Result};
use crate::types::*;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

const FIELD_DELIMITER: char = '/';
const NAME_DELIMITER: &str = ", ";

/// Code points for bytes 0x80..=0x9F in Windows-1252.
///
/// The five bytes the code page leaves undefined map to the C1 control with
/// the same value, as ISO-8859-1 would.
const CP1252_HIGH: [char; 32] = [
    '\u{20AC}', '\u{0081}', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02C6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{008D}', '\u{017D}', '\u{008F}',
    '\u{0090}', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}',
    '\u{02DC}', '\u{2122}', '\u{0161}', '\u{203A}', '\u{0153}', '\u{009D}', '\u{017E}', '\u{0178}',
];

/// Decodes Windows-1252 bytes into a `String`.
///
/// Every byte outside 0x80..=0x9F maps to the Unicode scalar with the same
/// value, so the decoding never fails.
pub fn decode_windows_1252(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| match b {
            0x80..=0x9F => CP1252_HIGH[(b - 0x80) as usize],
            _ => b as char,
        })
        .collect()
}

/// Reads a whole Windows-1252 file and splits it into lines
fn read_lines_windows_1252(path: &Path) -> Result<Vec<String>> {
    let mut file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;

    let content = decode_windows_1252(&bytes);
    Ok(content.lines().map(|s| s.to_string()).collect())
}

/// What a single line turned into
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    Movie(Movie),
    /// Year field held several values; the record is dropped on purpose
    Skipped,
}

/// Result of parsing a whole file, duplicates included
#[derive(Debug, Default)]
pub struct ParsedMovies {
    pub movies: Vec<Movie>,
    /// Records dropped because of a multi-valued year
    pub skipped: usize,
    /// Broken records dropped in lenient mode
    pub rejected: usize,
}

/// Parses one record.
///
/// The caller attaches the file name and line number to any error.
pub fn parse_line(line: &str) -> std::result::Result<ParsedLine, RecordError> {
    let mut fields = line.split(FIELD_DELIMITER);
    // split always yields at least one item
    let head = fields.next().unwrap_or_default();

    let open = head.rfind('(').ok_or_else(|| RecordError::MissingYearOpen {
        field: head.to_string(),
    })?;
    let close = head[open + 1..]
        .find(')')
        .map(|offset| open + 1 + offset)
        .ok_or_else(|| RecordError::MissingYearClose {
            field: head.to_string(),
        })?;

    let title = head[..open].trim();
    let year_str = &head[open + 1..close];

    if year_str.contains(',') {
        return Ok(ParsedLine::Skipped);
    }

    let release_year: Year = year_str
        .trim()
        .parse()
        .map_err(|_| RecordError::InvalidValue {
            field: "year".to_string(),
            value: year_str.to_string(),
        })?;

    let mut movie = Movie::new(title, release_year);
    for field in fields {
        if let Some(actor) = parse_actor(field) {
            movie.add_actor(actor);
        }
    }

    Ok(ParsedLine::Movie(movie))
}

/// Parses `Last, First` into an Actor.
///
/// The first name defaults to empty and anything after a second `", "` is
/// dropped. A field without a last name (blank, or just a separator)
/// yields `None`.
fn parse_actor(field: &str) -> Option<Actor> {
    let mut name = field.split(NAME_DELIMITER);
    let last_name = name.next().unwrap_or_default().trim();
    if last_name.is_empty() {
        return None;
    }
    let first_name = name.next().map(str::trim).unwrap_or_default();
    Some(Actor::new(last_name, first_name))
}

/// Parses every line of an already decoded file.
///
/// `file` is only used to label errors.
pub fn parse_movie_lines<'a, I>(file: &str, lines: I, mode: ParseMode) -> Result<ParsedMovies>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut parsed = ParsedMovies::default();

    for (idx, line) in lines.into_iter().enumerate() {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue; // Skip empty lines
        }

        match parse_line(line) {
            Ok(ParsedLine::Movie(movie)) => parsed.movies.push(movie),
            Ok(ParsedLine::Skipped) => parsed.skipped += 1,
            Err(reason) => match mode {
                ParseMode::Strict => {
                    return Err(DataLoadError::ParseError {
                        file: file.to_string(),
                        line: line_no,
                        reason,
                    });
                }
                ParseMode::Lenient => {
                    tracing::warn!(file, line = line_no, %reason, "Skipping malformed record");
                    parsed.rejected += 1;
                }
            },
        }
    }

    Ok(parsed)
}

/// Parse a movie file from disk
pub fn parse_movies(path: &Path, mode: ParseMode) -> Result<ParsedMovies> {
    let lines = read_lines_windows_1252(path)?;
    let file = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    parse_movie_lines(&file, lines.iter().map(String::as_str), mode)
}
