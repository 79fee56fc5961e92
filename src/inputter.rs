use ratatui::crossterm::event::{self, KeyCode, KeyModifiers};
use tracing::trace;

/// Characters an input accepts.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum Charset {
    #[default]
    Any,
    /// Ascii digits, like a number input field.
    Digits,
    /// Ascii digits and `-`, enough to type `YYYY-MM-DD`.
    Date,
}

impl Charset {
    fn accepts(&self, chr: char) -> bool {
        match self {
            Charset::Any => true,
            Charset::Digits => chr.is_ascii_digit(),
            Charset::Date => chr.is_ascii_digit() || chr == '-',
        }
    }
}

/// Single line text input with a character based cursor.
#[derive(Default)]
pub struct Inputter {
    current_input: String,
    curser_pos: usize,
    charset: Charset,
    finished: bool,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct InputResult {
    pub input: String,
    pub finished: bool,
    pub curser_pos: usize,
}

impl Inputter {
    pub fn read(&mut self, key: event::KeyEvent) -> InputResult {
        match (key.code, key.modifiers) {
            (KeyCode::Enter, KeyModifiers::NONE) => self.enter(),
            (KeyCode::Esc, KeyModifiers::NONE) => self.escape(),
            (KeyCode::Backspace, KeyModifiers::NONE) => self.backspace(),
            (KeyCode::Delete, KeyModifiers::NONE) => self.delete(),
            (KeyCode::Left, KeyModifiers::NONE) => self.left(),
            (KeyCode::Right, KeyModifiers::NONE) => self.right(),
            (KeyCode::Home, _) => self.home(),
            (KeyCode::End, _) => self.end(),
            (kc, km) => self.key(kc, km),
        }
    }

    /// Replace the content and put the cursor behind it.
    pub fn set(&mut self, s: &str) {
        self.current_input = s.to_string();
        self.curser_pos = s.chars().count();
    }

    pub fn set_charset(&mut self, charset: Charset) {
        self.charset = charset;
    }

    pub fn get(&self) -> InputResult {
        InputResult {
            finished: self.finished,
            input: self.current_input.clone(),
            curser_pos: self.curser_pos,
        }
    }

    pub fn value(&self) -> &str {
        &self.current_input
    }

    pub fn clear(&mut self) {
        self.finished = false;
        self.current_input.clear();
        self.curser_pos = 0;
    }

    fn enter(&mut self) -> InputResult {
        self.finished = true;
        self.get()
    }

    fn escape(&mut self) -> InputResult {
        self.clear();
        self.finished = true;
        self.get()
    }

    fn backspace(&mut self) -> InputResult {
        if self.curser_pos > 0 {
            self.curser_pos -= 1;
            let pos = self.getbytepos();
            self.current_input.remove(pos);
        }
        self.get()
    }

    fn delete(&mut self) -> InputResult {
        if self.curser_pos < self.current_input.chars().count() {
            let pos = self.getbytepos();
            self.current_input.remove(pos);
        }
        self.get()
    }

    fn left(&mut self) -> InputResult {
        self.curser_pos = self.curser_pos.saturating_sub(1);
        self.get()
    }

    fn right(&mut self) -> InputResult {
        if self.curser_pos < self.current_input.chars().count() {
            self.curser_pos += 1;
        }
        self.get()
    }

    fn home(&mut self) -> InputResult {
        self.curser_pos = 0;
        self.get()
    }

    fn end(&mut self) -> InputResult {
        self.curser_pos = self.current_input.chars().count();
        self.get()
    }

    fn key(&mut self, code: KeyCode, modifier: KeyModifiers) -> InputResult {
        if modifier.contains(KeyModifiers::CONTROL) || modifier.contains(KeyModifiers::ALT) {
            trace!("Ignoring {code:?} with {modifier:?}");
            return self.get();
        }
        if let Some(chr) = code.as_char() {
            if !self.charset.accepts(chr) {
                return self.get();
            }
            self.current_input.insert(self.getbytepos(), chr);
            self.curser_pos += 1;
        }
        self.get()
    }

    fn getbytepos(&self) -> usize {
        self.current_input
            .char_indices()
            .nth(self.curser_pos)
            .map(|(byte_idx, _)| byte_idx)
            .unwrap_or(self.current_input.len())
    }
}
