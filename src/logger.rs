use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

lazy_static::lazy_static! {
    static ref LOGGER: Mutex<Option<File>> = Mutex::new(None);
}

pub const DEFAULT_LOG_FILE: &str = "matrix_debug.log";

/// Opens the debug log for appending. Later calls keep the first file.
pub fn init(path: impl AsRef<Path>) {
    let Ok(mut logger) = LOGGER.lock() else {
        return;
    };
    if logger.is_none()
        && let Ok(file) = OpenOptions::new().create(true).append(true).open(path)
    {
        *logger = Some(file);
    }
}

pub fn log(message: &str) {
    if let Ok(mut logger) = LOGGER.lock()
        && let Some(file) = logger.as_mut()
    {
        let _ = write_entry(file, message);
    }
}

fn write_entry<W: Write>(out: &mut W, message: &str) -> io::Result<()> {
    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    writeln!(out, "[{}] {}", timestamp, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_before_init_is_silent() {
        log("nobody is listening");
    }

    #[test]
    fn test_entry_is_timestamped_line() {
        let mut out = Vec::new();
        write_entry(&mut out, "Graded: 2 / 2").unwrap();
        let line = String::from_utf8(out).unwrap();

        assert!(line.starts_with('['));
        assert!(line.ends_with("] Graded: 2 / 2\n"));
        // "[YYYY-MM-DD HH:MM:SS] "
        assert_eq!(line.find(']'), Some(20));
    }

    #[test]
    fn test_entries_append_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matrix.log");
        for message in ["Starting quiz", "Hint requested"] {
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .unwrap();
            write_entry(&mut file, message).unwrap();
        }

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("] Starting quiz"));
        assert!(lines[1].ends_with("] Hint requested"));
    }
}
