use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::error::SegmentListError;

const ENTRIES_PER_LINE: usize = 2; // start, end

/// A requested data interval [start, end) in integer GPS seconds.
///
/// Construction enforces start < end; segment lists that violate this are
/// rejected at parse time, before any network traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSegment {
    pub start: i64,
    pub end: i64,
}

impl TimeSegment {
    pub fn new(start: i64, end: i64) -> Result<Self, SegmentListError> {
        if start >= end {
            return Err(SegmentListError::InvertedSegment(start, end));
        }
        Ok(Self { start, end })
    }

    /// The `<start>_<end>` token used for directory and file names.
    pub fn dir_name(&self) -> String {
        format!("{}_{}", self.start, self.end)
    }

    pub fn duration(&self) -> i64 {
        self.end - self.start
    }
}

impl std::fmt::Display for TimeSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// The ordered set of segments to fetch, read from a headerless two-column
/// CSV file where each row is `start,end` in GPS seconds.
#[derive(Debug, Clone, Default)]
pub struct SegmentList {
    pub segments: Vec<TimeSegment>,
}

impl SegmentList {
    pub fn from_csv(path: &Path) -> Result<Self, SegmentListError> {
        if !path.exists() {
            return Err(SegmentListError::BadFilePath(path.to_path_buf()));
        }
        let mut contents = String::new();
        let mut file = File::open(path)?;
        file.read_to_string(&mut contents)?;

        let mut list = SegmentList::default();
        for (row, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let entries: Vec<&str> = line.split_terminator(",").collect();
            if entries.len() != ENTRIES_PER_LINE {
                return Err(SegmentListError::BadRowFormat(row));
            }
            let start: i64 = entries[0]
                .trim()
                .parse()
                .map_err(|e| SegmentListError::BadGpsTime(row, e))?;
            let end: i64 = entries[1]
                .trim()
                .parse()
                .map_err(|e| SegmentListError::BadGpsTime(row, e))?;
            list.segments.push(TimeSegment::new(start, end)?);
        }
        Ok(list)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_segments() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("time.csv");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "1238166018,1238170549").unwrap();
        writeln!(file, "1238170549,1238175080").unwrap();

        let list = SegmentList::from_csv(&path).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.segments[0].start, 1238166018);
        assert_eq!(list.segments[0].end, 1238170549);
        assert_eq!(list.segments[0].dir_name(), "1238166018_1238170549");
    }

    #[test]
    fn test_inverted_segment_rejected() {
        match TimeSegment::new(100, 100) {
            Err(SegmentListError::InvertedSegment(100, 100)) => (),
            _ => panic!("expected InvertedSegment"),
        }
    }

    #[test]
    fn test_bad_row_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("time.csv");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "1238166018,1238170549").unwrap();
        writeln!(file, "1238170549,notatime").unwrap();

        match SegmentList::from_csv(&path) {
            Err(SegmentListError::BadGpsTime(1, _)) => (),
            _ => panic!("expected BadGpsTime for row 1"),
        }
    }
}
