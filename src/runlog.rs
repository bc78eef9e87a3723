use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Append-only JSONL record of a run: one event object per line.
pub struct RunLog {
    pub path: PathBuf,
    run_id: String,
    file: File,
}

#[derive(Serialize)]
struct Event<'a> {
    ts: DateTime<Utc>,
    run_id: &'a str,
    #[serde(rename = "type")]
    event_type: &'a str,
    #[serde(flatten)]
    data: serde_json::Value,
}

impl RunLog {
    /// Open (or create) the log at `path`. Every open gets a fresh run id,
    /// so appended runs stay distinguishable.
    pub fn new(path: &Path) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            path: path.to_path_buf(),
            run_id: uuid::Uuid::new_v4().to_string(),
            file,
        })
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn log(&mut self, event_type: &str, data: serde_json::Value) -> Result<()> {
        let event = Event {
            ts: Utc::now(),
            run_id: &self.run_id,
            event_type,
            data,
        };
        let line = serde_json::to_string(&event)?;
        writeln!(self.file, "{}", line)?;
        self.file.flush()?;
        Ok(())
    }

    pub fn run_start(&mut self, argv: &[String]) -> Result<()> {
        self.log("run_start", serde_json::json!({ "argv": argv }))
    }

    pub fn demo_start(&mut self, name: &str) -> Result<()> {
        self.log("demo_start", serde_json::json!({ "name": name }))
    }

    pub fn demo_line(&mut self, name: &str, line: &str) -> Result<()> {
        self.log(
            "demo_line",
            serde_json::json!({ "name": name, "line": line }),
        )
    }

    pub fn demo_end(&mut self, name: &str, lines: usize) -> Result<()> {
        self.log(
            "demo_end",
            serde_json::json!({ "name": name, "lines": lines }),
        )
    }

    /// Log one line of playground input.
    pub fn repl_command(&mut self, input: &str) -> Result<()> {
        self.log("repl_command", serde_json::json!({ "input": input }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_are_json_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.jsonl");

        let mut log = RunLog::new(&path).unwrap();
        log.run_start(&["kata".to_string(), "roster".to_string()])
            .unwrap();
        log.demo_start("roster").unwrap();
        log.demo_line("roster", "Hi, I'm Alex and I'm 25 years old.")
            .unwrap();
        log.demo_end("roster", 2).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 4);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["type"], "run_start");
        assert_eq!(first["run_id"], log.run_id());
        assert!(first["ts"].is_string());
        assert_eq!(first["argv"][1], "roster");

        let third: serde_json::Value = serde_json::from_str(lines[2]).unwrap();
        assert_eq!(third["type"], "demo_line");
        assert_eq!(third["line"], "Hi, I'm Alex and I'm 25 years old.");
    }

    #[test]
    fn test_repl_commands_are_logged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.jsonl");

        let mut log = RunLog::new(&path).unwrap();
        log.repl_command("person Alex 25").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let event: serde_json::Value =
            serde_json::from_str(content.lines().next().unwrap()).unwrap();
        assert_eq!(event["type"], "repl_command");
        assert_eq!(event["input"], "person Alex 25");
        assert_eq!(event["run_id"], log.run_id());
        assert!(event["ts"].is_string());
    }

    #[test]
    fn test_reopening_appends_with_a_fresh_run_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.jsonl");

        let mut first = RunLog::new(&path).unwrap();
        first.demo_start("roster").unwrap();
        let first_id = first.run_id().to_string();
        drop(first);

        let mut second = RunLog::new(&path).unwrap();
        second.demo_start("banking").unwrap();
        assert_ne!(second.run_id(), first_id);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }
}
