use std::{
    fs::{File, OpenOptions},
    io::Write,
    path::Path,
    sync::Mutex,
};

use crate::trace::trace::GenerationEvent;

/// Append-only JSONL trace. Failures are reported on stderr and never abort
/// a generation.
pub struct TraceLogger {
    file: Option<Mutex<File>>,
}

impl TraceLogger {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let file = OpenOptions::new().create(true).append(true).open(path);

        match file {
            Ok(f) => Self {
                file: Some(Mutex::new(f)),
            },
            Err(e) => {
                eprintln!("Warning: could not open trace file '{}': {}", path.display(), e);
                Self { file: None }
            }
        }
    }

    pub fn disabled() -> Self {
        Self { file: None }
    }

    pub fn log(&self, event: &GenerationEvent) {
        let Some(file) = &self.file else {
            return;
        };

        if let Err(msg) = append_line(file, event) {
            eprintln!("Warning: trace event dropped: {}", msg);
        }
    }
}

fn append_line(file: &Mutex<File>, event: &GenerationEvent) -> Result<(), String> {
    let json = serde_json::to_string(event).map_err(|e| format!("serialize failed: {}", e))?;
    let mut file = file.lock().map_err(|e| format!("lock poisoned: {}", e))?;
    writeln!(file, "{}", json).map_err(|e| format!("write failed: {}", e))
}
