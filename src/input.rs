// Input resolution - read from a named file or fall back to stdin

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Open `path` for buffered reading.
///
/// No path, or a path of `-`, means stdin. Errors opening the file are returned as is.
pub fn open_input(path: Option<&Path>) -> io::Result<Box<dyn BufRead>> {
    match path {
        Some(path) if path != Path::new("-") => {
            let file = File::open(path)?;
            Ok(Box::new(BufReader::new(file)))
        }
        _ => Ok(Box::new(io::stdin().lock())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_open_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("input.txt");
        fs::write(&path, "first\nsecond\n").unwrap();

        let reader = open_input(Some(&path)).unwrap();
        let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
        assert_eq!(lines, vec!["first", "second"]);
    }

    #[test]
    fn test_open_missing_file() {
        let result = open_input(Some(Path::new("/nonexistent/runecho/input.txt")));
        assert_eq!(result.err().map(|e| e.kind()), Some(io::ErrorKind::NotFound));
    }

    #[test]
    fn test_dash_means_stdin() {
        assert!(open_input(Some(Path::new("-"))).is_ok());
        assert!(open_input(None).is_ok());
    }
}
