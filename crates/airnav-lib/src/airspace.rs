//! Airspace ingestion from the three whitespace-separated text files.
//!
//! * points:   `number name latitude longitude`
//! * segments: `origin destination distance`
//! * airports: `CODE id1 id2 ...` (first half SIDs, second half STARs)
//!
//! The first line of each file may be a header. There is no marker for it:
//! the line is parsed as a record and treated as a header when that fails.
//! A header that happens to parse (or a data row that does not) is
//! misclassified; the rule is kept as is for compatibility with existing data.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};

use crate::dataset::AirSpaceFiles;
use crate::error::{Error, Result};
use crate::network::{AirSpace, Airport, Node, SegmentInsert};
use crate::space::Aeronautical;

/// Code prefixes identifying airport records (Spanish and French ICAO codes).
pub const AIRPORT_PREFIXES: &[&str] = &["LE", "LF"];

/// Airspace names derived from the points file name.
const AIRSPACE_NAMES: &[(&[&str], &str)] = &[
    (&["Cat_", "cat_"], "Catalunya"),
    (&["Esp_", "esp_"], "España"),
    (&["Eur_", "eur_"], "Europe"),
];

/// Per-file ingestion counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FileReport {
    /// Records added to the airspace.
    pub loaded: usize,
    /// Whether the first line was classified as a header and skipped.
    pub header_skipped: bool,
    /// Short or unparseable records.
    pub malformed: usize,
    /// Records naming a point that is not in the airspace.
    pub unknown_references: usize,
    /// Records whose identity was already present.
    pub duplicates: usize,
    /// Lines that are not records of this file's kind (annotations, continuations).
    pub ignored: usize,
}

impl FileReport {
    /// Records that looked like data but were not loaded.
    pub fn skipped(&self) -> usize {
        self.malformed + self.unknown_references + self.duplicates
    }
}

/// Counters for a full three-file load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub points: FileReport,
    pub segments: FileReport,
    pub airports: FileReport,
}

/// Build a new airspace from the three data files.
pub fn load_airspace(files: &AirSpaceFiles) -> Result<AirSpace> {
    let mut airspace = AirSpace::default();
    airspace.load_from_files(files)?;
    Ok(airspace)
}

impl AirSpace {
    /// Load points, then segments, then airports into this airspace.
    ///
    /// A missing or unreadable file aborts the load with
    /// [`Error::DataFile`]; whatever earlier files added stays in the
    /// airspace, so callers should discard it. Malformed lines never abort.
    pub fn load_from_files(&mut self, files: &AirSpaceFiles) -> Result<LoadReport> {
        if let Some(name) = airspace_name_for(&files.points) {
            self.set_name(name);
        }

        let points = load_file(self, &files.points, "points", load_points)?;
        let segments = load_file(self, &files.segments, "segments", load_segments)?;
        let airports = load_file(self, &files.airports, "airports", load_airports)?;

        debug!(
            airspace = self.name(),
            points = self.node_count(),
            segments = self.segment_count(),
            airports = self.airport_count(),
            "loaded airspace"
        );

        Ok(LoadReport {
            points,
            segments,
            airports,
        })
    }
}

/// Airspace name implied by a points file name such as `Cat_nav.txt`.
pub fn airspace_name_for(points_path: &Path) -> Option<&'static str> {
    let file_name = points_path.file_name()?.to_str()?;
    AIRSPACE_NAMES
        .iter()
        .find(|(prefixes, _)| prefixes.iter().any(|prefix| file_name.starts_with(prefix)))
        .map(|(_, name)| *name)
}

fn load_file(
    airspace: &mut AirSpace,
    path: &Path,
    kind: &str,
    loader: fn(&mut AirSpace, BufReader<File>) -> Result<FileReport>,
) -> Result<FileReport> {
    let file = File::open(path).map_err(|source| Error::DataFile {
        path: path.to_path_buf(),
        source,
    })?;

    let report = loader(airspace, BufReader::new(file)).map_err(|err| match err {
        Error::Io(source) => Error::DataFile {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })?;

    if report.skipped() > 0 {
        warn!(
            file = %path.display(),
            malformed = report.malformed,
            unknown_references = report.unknown_references,
            duplicates = report.duplicates,
            "skipped {kind} records"
        );
    }
    debug!(file = %path.display(), loaded = report.loaded, "loaded {kind}");
    Ok(report)
}

/// Load navigation points. Duplicate numbers keep the first definition.
pub fn load_points<R: BufRead>(airspace: &mut AirSpace, reader: R) -> Result<FileReport> {
    scan_records(reader, is_point_record, |tokens, report| {
        let Some(point) = parse_point(tokens) else {
            report.malformed += 1;
            return;
        };
        match airspace.add_node(point) {
            Ok(()) => report.loaded += 1,
            Err(_) => report.duplicates += 1,
        }
    })
}

/// Load segments between already loaded points.
///
/// Records with a negative or non-finite distance are malformed; a connection
/// already present in either direction counts as a duplicate.
pub fn load_segments<R: BufRead>(airspace: &mut AirSpace, reader: R) -> Result<FileReport> {
    scan_records(reader, is_segment_record, |tokens, report| {
        let Some((origin, destination, distance)) = parse_segment(tokens) else {
            report.malformed += 1;
            return;
        };
        if !airspace.contains(&origin) || !airspace.contains(&destination) {
            report.unknown_references += 1;
            return;
        }
        match airspace.add_segment(&origin, &destination, distance) {
            Ok(SegmentInsert::Inserted) => report.loaded += 1,
            Ok(SegmentInsert::AlreadyPresent) => report.duplicates += 1,
            Err(_) => report.unknown_references += 1,
        }
    })
}

/// Load airports and their SID/STAR point lists.
pub fn load_airports<R: BufRead>(airspace: &mut AirSpace, reader: R) -> Result<FileReport> {
    scan_records(reader, is_airport_record, |tokens, report| {
        if !is_airport_line(tokens) {
            report.ignored += 1;
            return;
        }
        let Some(airport) = parse_airport(tokens) else {
            report.malformed += 1;
            return;
        };
        let all_known = airport
            .sids
            .iter()
            .chain(&airport.stars)
            .all(|key| airspace.contains(key));
        if !all_known {
            report.unknown_references += 1;
            return;
        }
        match airspace.add_airport(airport) {
            Ok(()) => report.loaded += 1,
            Err(_) => report.duplicates += 1,
        }
    })
}

/// Walk the lines of a data file, skipping a sniffed header and blank lines.
///
/// A line that is not valid UTF-8 is malformed (or the header, on line one);
/// it does not end the scan.
fn scan_records<R, F>(
    reader: R,
    is_data: fn(&[&str]) -> bool,
    mut apply: F,
) -> Result<FileReport>
where
    R: BufRead,
    F: FnMut(&[&str], &mut FileReport),
{
    let mut report = FileReport::default();
    for (line_no, line) in text_lines(reader).enumerate() {
        let Some(line) = line? else {
            if line_no == 0 {
                report.header_skipped = true;
            } else {
                report.malformed += 1;
            }
            continue;
        };
        let tokens: Vec<&str> = line.split_whitespace().collect();

        if line_no == 0 && !is_data(tokens.as_slice()) {
            report.header_skipped = true;
            continue;
        }
        if tokens.is_empty() {
            continue;
        }
        apply(tokens.as_slice(), &mut report);
    }
    Ok(report)
}

/// Lines of `reader`, `None` for a line that is not valid UTF-8.
pub(crate) fn text_lines<R: BufRead>(reader: R) -> TextLines<R> {
    TextLines {
        reader,
        buffer: Vec::new(),
    }
}

pub(crate) struct TextLines<R> {
    reader: R,
    buffer: Vec<u8>,
}

impl<R: BufRead> Iterator for TextLines<R> {
    type Item = std::io::Result<Option<String>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buffer.clear();
        match self.reader.read_until(b'\n', &mut self.buffer) {
            Ok(0) => None,
            Ok(_) => Some(Ok(std::str::from_utf8(&self.buffer)
                .ok()
                .map(|line| line.trim_end_matches(['\n', '\r']).to_string()))),
            Err(err) => Some(Err(err)),
        }
    }
}

fn is_point_record(tokens: &[&str]) -> bool {
    parse_point(tokens).is_some()
}

fn parse_point(tokens: &[&str]) -> Option<Node<Aeronautical>> {
    if tokens.len() < 4 {
        return None;
    }
    let number = tokens[0].parse::<i64>().ok()?;
    let latitude = tokens[2].parse::<f64>().ok()?;
    let longitude = tokens[3].parse::<f64>().ok()?;
    Some(Node::nav_point(number, tokens[1], latitude, longitude))
}

fn is_segment_record(tokens: &[&str]) -> bool {
    tokens.len() >= 3
        && tokens[0].parse::<i64>().is_ok()
        && tokens[1].parse::<i64>().is_ok()
        && tokens[2].parse::<f64>().is_ok()
}

fn parse_segment(tokens: &[&str]) -> Option<(i64, i64, f64)> {
    if tokens.len() < 3 {
        return None;
    }
    let origin = tokens[0].parse::<i64>().ok()?;
    let destination = tokens[1].parse::<i64>().ok()?;
    let distance = tokens[2].parse::<f64>().ok()?;
    if !distance.is_finite() || distance < 0.0 {
        return None;
    }
    Some((origin, destination, distance))
}

fn is_airport_record(tokens: &[&str]) -> bool {
    is_airport_line(tokens) && parse_airport(tokens).is_some()
}

/// A recognised airport code with no comma anywhere on the line.
fn is_airport_line(tokens: &[&str]) -> bool {
    let Some(code) = tokens.first() else {
        return false;
    };
    AIRPORT_PREFIXES.iter().any(|prefix| code.starts_with(prefix))
        && !tokens.iter().any(|token| token.contains(','))
}

/// Split the point list in half: SIDs first, STARs second. An odd count
/// gives the STARs the extra point.
fn parse_airport(tokens: &[&str]) -> Option<Airport<i64>> {
    let (code, ids) = tokens.split_first()?;
    let ids = ids
        .iter()
        .map(|token| token.parse::<i64>().ok())
        .collect::<Option<Vec<_>>>()?;

    let mid = ids.len() / 2;
    let mut airport = Airport::new(*code);
    for &sid in &ids[..mid] {
        airport.add_sid(sid);
    }
    for &star in &ids[mid..] {
        airport.add_star(star);
    }
    Some(airport)
}
