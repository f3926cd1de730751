//! Bulk loader for delimited course catalogs.
//!
//! One logical record per line, fields split on a single-character delimiter:
//!
//! ```text
//! <courseId><d><courseName>[<d><prerequisite>...]
//! ```
//!
//! Lines with fewer than two fields are skipped and counted; duplicate course
//! ids are counted and ignored. The index itself performs no I/O and never
//! observes malformed input.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

use crate::map::BoxwoodMap;

/// Default field delimiter for catalog files.
pub const FIELD_DELIMITER: char = ',';

/// A course record: unique id, display title and the ordered list of
/// prerequisite course ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub id: String,
    pub title: String,
    pub prerequisites: Vec<String>,
}

/// An ordered course index keyed by course id.
pub type Catalog = BoxwoodMap<String, Course>;

/// Hard failures while loading a catalog. Malformed lines and duplicate ids
/// are not errors; they are counted in the [`LoadReport`].
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unable to open {path}: {source}")]
    Open { path: String, source: io::Error },

    /// The input source failed before a clean end-of-input.
    #[error("input failure before reaching the end of data: {0}")]
    Read(#[from] io::Error),
}

/// Outcome counters for one load pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    /// Well-formed records inserted into the catalog.
    pub loaded: usize,
    /// Lines skipped for having fewer than two fields.
    pub skipped: usize,
    /// Well-formed records ignored because their id was already present.
    pub duplicates: usize,
}

/// Reads delimited course records from `input` into `catalog`.
///
/// The first field of each line is the course id, the second the title and
/// any remaining fields are prerequisite ids. The first record wins when ids
/// collide. A read failure mid-stream aborts with [`LoadError::Read`],
/// leaving records loaded so far in place.
pub fn load_catalog<R: BufRead>(
    input: R,
    delimiter: char,
    catalog: &mut Catalog,
) -> Result<LoadReport, LoadError> {
    let mut report = LoadReport::default();

    for line in input.lines() {
        let line = line?;
        let mut fields: Vec<&str> = line.trim_end_matches('\r').split(delimiter).collect();

        // a trailing delimiter produces one empty token with no record text
        // after it; drop it so "," is a one-field line and "a,b," carries no
        // phantom empty prerequisite
        if fields.last() == Some(&"") {
            fields.pop();
        }

        if fields.len() < 2 {
            report.skipped += 1;
            continue;
        }

        let course = Course {
            id: fields[0].to_string(),
            title: fields[1].to_string(),
            prerequisites: fields[2..].iter().map(|field| field.to_string()).collect(),
        };

        match catalog.insert(course.id.clone(), course) {
            Ok(()) => report.loaded += 1,
            Err(_) => report.duplicates += 1,
        }
    }

    Ok(report)
}

/// Opens `path` and loads it with the default [`FIELD_DELIMITER`].
pub fn load_catalog_file<P: AsRef<Path>>(
    path: P,
    catalog: &mut Catalog,
) -> Result<LoadReport, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.display().to_string(),
        source,
    })?;

    load_catalog(BufReader::new(file), FIELD_DELIMITER, catalog)
}
