//! Point-source ingestion and space-separated result tables.
//!
//! The point format is line oriented: each line whose first two
//! whitespace-separated tokens parse as integers contributes one city;
//! every other line is skipped.

use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;

use crate::error::AnnealError;
use crate::tsp::{Point, Progress};

/// Parses cities from point-source text, skipping malformed lines.
pub fn parse_points(text: &str) -> Vec<Point> {
    let mut skipped = 0usize;
    let points: Vec<Point> = text
        .lines()
        .filter_map(|line| {
            let point = parse_line(line);
            if point.is_none() && !line.trim().is_empty() {
                skipped += 1;
            }
            point
        })
        .collect();
    if skipped > 0 {
        log::debug!(
            "io.points: parsed={} skipped={skipped}",
            points.len()
        );
    }
    points
}

fn parse_line(line: &str) -> Option<Point> {
    let mut tokens = line.split_whitespace();
    let x = tokens.next()?.parse().ok()?;
    let y = tokens.next()?.parse().ok()?;
    Some(Point::new(x, y))
}

/// Reads and parses a point-source file.
///
/// # Errors
///
/// [`AnnealError::Io`] when the file cannot be read.
pub fn load_points(path: impl AsRef<Path>) -> Result<Vec<Point>, AnnealError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| AnnealError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let points = parse_points(&text);
    log::info!("io.points: loaded cities={} from {}", points.len(), path.display());
    Ok(points)
}

fn ssv_writer<W: Write>(writer: W) -> csv::Writer<W> {
    WriterBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .from_writer(writer)
}

/// Writes `step length temperature` rows.
pub fn write_progress<W: Write>(writer: W, history: &[Progress]) -> Result<(), AnnealError> {
    let mut out = ssv_writer(writer);
    for p in history {
        out.write_record([
            p.step.to_string(),
            p.length.to_string(),
            p.temperature.to_string(),
        ])?;
    }
    out.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Writes `t f_0 f_1 ...` rows of a frequency trace.
pub fn write_frequency_trace<W: Write>(
    writer: W,
    trace: &[(usize, Vec<f64>)],
) -> Result<(), AnnealError> {
    let mut out = ssv_writer(writer);
    for (t, freqs) in trace {
        let row = std::iter::once(t.to_string()).chain(freqs.iter().map(f64::to_string));
        out.write_record(row)?;
    }
    out.flush().map_err(csv::Error::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_points_skips_malformed_lines() {
        let text = "10 20\n\
                    \n\
                    x 5\n\
                    7\n\
                    -3\t4 trailing words\n  \
                    5 6\n\
                    1.5 2\n";
        let points = parse_points(text);
        assert_eq!(
            points,
            vec![Point::new(10, 20), Point::new(-3, 4), Point::new(5, 6)]
        );
    }

    #[test]
    fn test_parse_points_empty() {
        assert!(parse_points("").is_empty());
        assert!(parse_points("\n\n   \n").is_empty());
    }

    #[test]
    fn test_load_points_missing_file() {
        let err = load_points("/nonexistent/u-anneal/points.txt").unwrap_err();
        assert!(matches!(err, AnnealError::Io { .. }));
    }

    #[test]
    fn test_load_points_roundtrip_file() {
        let dir = std::env::temp_dir().join(format!("u-anneal-io-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("points.txt");
        std::fs::write(&path, "0 0\n3 4\nbad line\n6 0\n").unwrap();
        let points = load_points(&path).unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points[1], Point::new(3, 4));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_write_progress_rows() {
        let history = [
            Progress {
                step: 0,
                length: 12.5,
                temperature: 100.0,
            },
            Progress {
                step: 1,
                length: 10.0,
                temperature: 90.0,
            },
        ];
        let mut buf = Vec::new();
        write_progress(&mut buf, &history).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "0 12.5 100\n1 10 90\n");
    }

    #[test]
    fn test_write_frequency_trace_rows() {
        let trace = vec![(0, vec![1.0, 0.0]), (100, vec![0.25, 0.75])];
        let mut buf = Vec::new();
        write_frequency_trace(&mut buf, &trace).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "0 1 0\n100 0.25 0.75\n");
    }
}
