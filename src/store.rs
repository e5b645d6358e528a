//! Task store and snapshot persistence.
//!
//! The store owns the ordered task list and rewrites the full list to a
//! single JSON file after every mutation. Schedule strings are built,
//! split, and formatted here as well, since they belong to data shaping
//! rather than to the view.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};

use crate::task::Task;

/// Ordered task list backed by one JSON snapshot file.
#[derive(Debug)]
pub struct TaskStore {
    tasks: Vec<Task>,
    path: PathBuf,
    load_warning: Option<String>,
}

impl TaskStore {
    /// Load the store from its snapshot file.
    ///
    /// A missing file yields an empty list. An unreadable or undecodable
    /// file also yields an empty list, with the reason retained so the view
    /// can surface it once instead of crashing on bad data.
    pub fn load(path: &Path) -> Self {
        let (tasks, load_warning) = if !path.exists() {
            (Vec::new(), None)
        } else {
            match fs::read_to_string(path).map_err(|e| e.to_string()).and_then(|buf| {
                serde_json::from_str::<Vec<Task>>(&buf).map_err(|e| e.to_string())
            }) {
                Ok(tasks) => (tasks, None),
                Err(e) => (
                    Vec::new(),
                    Some(format!("Stored tasks unreadable, starting fresh: {e}")),
                ),
            }
        };
        TaskStore {
            tasks,
            path: path.to_path_buf(),
            load_warning,
        }
    }

    /// Take the warning produced by a failed load, if any.
    pub fn take_load_warning(&mut self) -> Option<String> {
        self.load_warning.take()
    }

    /// All tasks in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Tasks not yet completed.
    pub fn remaining(&self) -> Vec<&Task> {
        self.tasks.iter().filter(|t| !t.is_completed).collect()
    }

    /// Completed tasks.
    pub fn completed(&self) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.is_completed).collect()
    }

    /// Append a new task built from the input field values.
    ///
    /// Whitespace-only text is a silent no-op. Returns the id of the
    /// created task, or `None` when nothing was created.
    pub fn add(&mut self, text: &str, date: &str, time: &str) -> io::Result<Option<u64>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        let id = self.next_id();
        self.tasks.push(Task {
            id,
            text: text.to_string(),
            is_completed: false,
            scheduled_at: build_schedule(date, time),
        });
        self.save()?;
        Ok(Some(id))
    }

    /// Remove a task and hand it back for re-editing.
    ///
    /// The removal is persisted immediately: until the caller resubmits the
    /// record through [`TaskStore::add`], it exists nowhere but in the
    /// input fields.
    pub fn take(&mut self, id: u64) -> io::Result<Option<Task>> {
        let Some(pos) = self.tasks.iter().position(|t| t.id == id) else {
            return Ok(None);
        };
        let task = self.tasks.remove(pos);
        self.save()?;
        Ok(Some(task))
    }

    /// Delete a task. Unknown ids are ignored.
    pub fn remove(&mut self, id: u64) -> io::Result<()> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() != before {
            self.save()?;
        }
        Ok(())
    }

    /// Set the completion flag on a task. Unknown ids are ignored.
    pub fn set_completed(&mut self, id: u64, value: bool) -> io::Result<()> {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            task.is_completed = value;
            self.save()?;
        }
        Ok(())
    }

    fn next_id(&self) -> u64 {
        self.tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1
    }

    /// Write the full list to the snapshot file using atomic write
    /// (temp file + rename).
    fn save(&self) -> io::Result<()> {
        let tmp = self.path.with_extension("json.tmp");
        let mut f = File::create(&tmp)?;
        let data = serde_json::to_string_pretty(&self.tasks).unwrap();
        f.write_all(data.as_bytes())?;
        f.flush()?;
        fs::rename(tmp, &self.path)?;
        Ok(())
    }
}

/// Combine the date and time field values into a stored schedule string.
///
/// No date means no schedule; a date without a time defaults to midnight.
pub fn build_schedule(date: &str, time: &str) -> Option<String> {
    let date = date.trim();
    if date.is_empty() {
        return None;
    }
    let time = time.trim();
    if time.is_empty() {
        Some(format!("{date}T00:00"))
    } else {
        Some(format!("{date}T{time}"))
    }
}

/// Split a stored schedule string back into date and time field values.
pub fn split_schedule(schedule: &str) -> (String, String) {
    match schedule.split_once('T') {
        Some((date, time)) => (date.to_string(), time.to_string()),
        None => (schedule.to_string(), String::new()),
    }
}

fn parse_schedule(raw: &str) -> Option<NaiveDateTime> {
    for fmt in ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }
    // Bare dates can end up in the file when an older snapshot is reused.
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Format a schedule for display.
///
/// Absent schedules and values that do not parse as a calendar date/time
/// render as fixed placeholders, never as an error.
pub fn format_schedule(schedule: Option<&str>) -> String {
    match schedule {
        None => "No Date".to_string(),
        Some(raw) => match parse_schedule(raw) {
            Some(dt) => dt.format("%b %-d, %Y %H:%M").to_string(),
            None => "Invalid Date".to_string(),
        },
    }
}
