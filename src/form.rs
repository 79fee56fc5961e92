use ratatui::crossterm::event::{KeyCode, KeyEvent};
use tracing::{debug, trace};

use crate::employee::{DEPARTMENTS, Employee, Field};
use crate::inputter::{Charset, InputResult, Inputter};
use crate::states::STATES;

/// Field order of the creation form.
pub const FORM_ORDER: [Field; 9] = [
    Field::FirstName,
    Field::LastName,
    Field::DateOfBirth,
    Field::StartDate,
    Field::Street,
    Field::City,
    Field::State,
    Field::ZipCode,
    Field::Department,
];

/// What the form wants the model to do after a key press.
#[derive(Debug, PartialEq)]
pub enum FormAction {
    None,
    Submit,
    Leave,
}

/// Why a submit was refused. Both lists follow the form order.
#[derive(Debug, PartialEq)]
pub struct Rejection {
    pub missing: Vec<Field>,
    pub invalid_dates: Vec<Field>,
}

/// One option of a select field: stored value and display label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

fn options_for(field: Field) -> Option<Vec<SelectOption>> {
    match field {
        Field::State => Some(
            STATES
                .iter()
                .map(|s| SelectOption {
                    value: s.abbreviation,
                    label: s.name,
                })
                .collect(),
        ),
        Field::Department => Some(
            DEPARTMENTS
                .iter()
                .map(|&d| SelectOption { value: d, label: d })
                .collect(),
        ),
        _ => None,
    }
}

/// Read only rendering data of one form row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormFieldView {
    pub label: String,
    pub display: String,
    pub is_select: bool,
    pub placeholder: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormView {
    pub fields: Vec<FormFieldView>,
    pub focus: usize,
    pub input: InputResult,
}

pub struct EmployeeForm {
    draft: Employee,
    focus: usize,
    input: Inputter,
}

impl Default for EmployeeForm {
    fn default() -> Self {
        Self::new()
    }
}

impl EmployeeForm {
    pub fn new() -> Self {
        let mut form = Self {
            draft: Employee::default(),
            focus: 0,
            input: Inputter::default(),
        };
        form.load_input();
        form
    }

    pub fn focused_field(&self) -> Field {
        FORM_ORDER[self.focus]
    }

    #[cfg(test)]
    pub fn draft(&self) -> &Employee {
        &self.draft
    }

    pub fn read(&mut self, key: KeyEvent) -> FormAction {
        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => return FormAction::Leave,
            (KeyCode::Enter, _) => {
                self.commit_input();
                return FormAction::Submit;
            }
            (KeyCode::Tab, _) | (KeyCode::Down, _) => self.move_focus(1),
            (KeyCode::BackTab, _) | (KeyCode::Up, _) => self.move_focus(-1),
            _ => {
                if self.is_select() {
                    self.select_key(key);
                } else {
                    self.input.read(key);
                    self.commit_input();
                }
            }
        }
        FormAction::None
    }

    /// Take the draft if every field is filled in and both dates are valid,
    /// otherwise report the offending fields and focus the first of them.
    pub fn submit(&mut self) -> Result<Employee, Rejection> {
        self.commit_input();
        let missing: Vec<Field> = FORM_ORDER
            .iter()
            .copied()
            .filter(|&f| self.draft.field(f).is_empty())
            .collect();
        let invalid = self.draft.invalid_dates();
        let invalid_dates: Vec<Field> = FORM_ORDER
            .iter()
            .copied()
            .filter(|f| invalid.contains(f))
            .collect();

        let first = FORM_ORDER
            .iter()
            .copied()
            .find(|f| missing.contains(f) || invalid_dates.contains(f));
        if let Some(first) = first {
            debug!("Rejecting form, missing {missing:?}, invalid {invalid_dates:?}");
            self.focus_field(first);
            return Err(Rejection {
                missing,
                invalid_dates,
            });
        }

        let employee = std::mem::take(&mut self.draft);
        self.focus = 0;
        self.load_input();
        Ok(employee)
    }

    pub fn focus_field(&mut self, field: Field) {
        if let Some(idx) = FORM_ORDER.iter().position(|&f| f == field) {
            self.commit_input();
            self.focus = idx;
            self.load_input();
        }
    }

    pub fn view(&self) -> FormView {
        let fields = FORM_ORDER
            .iter()
            .map(|&f| {
                let value = self.draft.field(f);
                match options_for(f) {
                    Some(options) => {
                        let selected = options.iter().find(|o| o.value == value);
                        FormFieldView {
                            label: f.label().to_string(),
                            display: selected
                                .map(|o| o.label.to_string())
                                .unwrap_or_else(|| format!("Select {}", f.label())),
                            is_select: true,
                            placeholder: selected.is_none(),
                        }
                    }
                    None => FormFieldView {
                        label: f.label().to_string(),
                        display: value.to_string(),
                        is_select: false,
                        placeholder: false,
                    },
                }
            })
            .collect();

        FormView {
            fields,
            focus: self.focus,
            input: self.input.get(),
        }
    }

    fn is_select(&self) -> bool {
        options_for(self.focused_field()).is_some()
    }

    fn move_focus(&mut self, step: isize) {
        self.commit_input();
        let len = FORM_ORDER.len() as isize;
        self.focus = (self.focus as isize + step).rem_euclid(len) as usize;
        self.load_input();
        trace!("Form focus on {:?}", self.focused_field());
    }

    fn commit_input(&mut self) {
        if !self.is_select() {
            let field = self.focused_field();
            *self.draft.field_mut(field) = self.input.value().to_string();
        }
    }

    fn load_input(&mut self) {
        let field = self.focused_field();
        self.input.clear();
        self.input.set(self.draft.field(field));
        let charset = match field {
            Field::ZipCode => Charset::Digits,
            f if f.is_date() => Charset::Date,
            _ => Charset::Any,
        };
        self.input.set_charset(charset);
    }

    fn select_key(&mut self, key: KeyEvent) {
        let field = self.focused_field();
        let Some(options) = options_for(field) else {
            return;
        };
        let current = options
            .iter()
            .position(|o| o.value == self.draft.field(field));

        let next = match key.code {
            KeyCode::Right => Some(current.map_or(0, |i| (i + 1) % options.len())),
            KeyCode::Left => Some(current.map_or(options.len() - 1, |i| {
                (i + options.len() - 1) % options.len()
            })),
            KeyCode::Backspace | KeyCode::Delete => None,
            KeyCode::Char(c) => {
                // Jump to the next option starting with the typed letter.
                let c = c.to_ascii_lowercase();
                let start = current.map_or(0, |i| i + 1);
                let found = (0..options.len())
                    .map(|offset| (start + offset) % options.len())
                    .find(|&i| options[i].label.to_ascii_lowercase().starts_with(c));
                match found {
                    Some(i) => Some(i),
                    None => return,
                }
            }
            _ => return,
        };

        *self.draft.field_mut(field) = next
            .map(|i| options[i].value.to_string())
            .unwrap_or_default();
    }
}
