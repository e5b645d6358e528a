//! Entry form for the input section: task text, date, and time fields.
//!
//! The form holds transient input only. Submitting goes through the task
//! store's add operation; staging an edit repopulates the fields from the
//! record the store handed back.

use crate::store::split_schedule;
use crate::task::Task;
use crate::tui::input::InputField;

/// Field order within the input section.
pub const TEXT_FIELD: usize = 0;
pub const DATE_FIELD: usize = 1;
pub const TIME_FIELD: usize = 2;

const FIELD_COUNT: usize = 3;

/// Input state for adding (or resubmitting) a task.
pub struct EntryForm {
    pub text: InputField,
    pub date: InputField,
    pub time: InputField,
    pub current_field: usize,
}

impl EntryForm {
    /// Create an empty form with the text field active.
    pub fn new() -> Self {
        Self {
            text: InputField::new(),
            date: InputField::new(),
            time: InputField::new(),
            current_field: TEXT_FIELD,
        }
    }

    /// Populate the fields from a task staged for editing.
    pub fn stage(&mut self, task: &Task) {
        self.text.set(&task.text);
        match task.scheduled_at.as_deref() {
            Some(schedule) => {
                let (date, time) = split_schedule(schedule);
                self.date.set(&date);
                self.time.set(&time);
            }
            None => {
                self.date.clear();
                self.time.clear();
            }
        }
        self.current_field = TEXT_FIELD;
    }

    /// Clear all fields after a successful add.
    pub fn reset(&mut self) {
        self.text.clear();
        self.date.clear();
        self.time.clear();
        self.current_field = TEXT_FIELD;
    }

    /// Move to the next field, wrapping around.
    pub fn next_field(&mut self) {
        self.current_field = (self.current_field + 1) % FIELD_COUNT;
    }

    /// Move to the previous field, wrapping around.
    pub fn prev_field(&mut self) {
        self.current_field = if self.current_field == 0 {
            FIELD_COUNT - 1
        } else {
            self.current_field - 1
        };
    }

    fn active_mut(&mut self) -> &mut InputField {
        match self.current_field {
            DATE_FIELD => &mut self.date,
            TIME_FIELD => &mut self.time,
            _ => &mut self.text,
        }
    }

    /// Type a character into the active field.
    pub fn handle_char(&mut self, c: char) {
        self.active_mut().insert_char(c);
    }

    /// Backspace in the active field.
    pub fn handle_backspace(&mut self) {
        self.active_mut().backspace();
    }

    /// Forward-delete in the active field.
    pub fn handle_delete(&mut self) {
        self.active_mut().delete();
    }

    /// Move the cursor in the active field.
    pub fn move_cursor(&mut self, right: bool) {
        let field = self.active_mut();
        if right {
            field.move_right()
        } else {
            field.move_left()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(text: &str, scheduled_at: Option<&str>) -> Task {
        Task {
            id: 1,
            text: text.to_string(),
            is_completed: false,
            scheduled_at: scheduled_at.map(|s| s.to_string()),
        }
    }

    #[test]
    fn staging_splits_the_schedule_into_fields() {
        let mut form = EntryForm::new();
        form.current_field = TIME_FIELD;

        form.stage(&task("Dentist", Some("2024-06-10T14:30")));

        assert_eq!(form.text.value, "Dentist");
        assert_eq!(form.date.value, "2024-06-10");
        assert_eq!(form.time.value, "14:30");
        assert_eq!(form.current_field, TEXT_FIELD);
    }

    #[test]
    fn staging_an_undated_task_clears_old_field_values() {
        let mut form = EntryForm::new();
        form.date.set("2024-01-01");
        form.time.set("08:00");

        form.stage(&task("Call Bob", None));

        assert_eq!(form.text.value, "Call Bob");
        assert_eq!(form.date.value, "");
        assert_eq!(form.time.value, "");
    }

    #[test]
    fn field_cycling_wraps_both_ways() {
        let mut form = EntryForm::new();
        form.next_field();
        assert_eq!(form.current_field, DATE_FIELD);
        form.next_field();
        assert_eq!(form.current_field, TIME_FIELD);
        form.next_field();
        assert_eq!(form.current_field, TEXT_FIELD);
        form.prev_field();
        assert_eq!(form.current_field, TIME_FIELD);
    }

    #[test]
    fn typing_goes_to_the_active_field() {
        let mut form = EntryForm::new();
        form.handle_char('A');
        form.next_field();
        for c in "2024".chars() {
            form.handle_char(c);
        }
        assert_eq!(form.text.value, "A");
        assert_eq!(form.date.value, "2024");

        form.reset();
        assert_eq!(form.text.value, "");
        assert_eq!(form.date.value, "");
        assert_eq!(form.current_field, TEXT_FIELD);
    }
}
