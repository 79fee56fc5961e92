use std::time::Duration;
use tracing::trace;

use crate::domain::{HRConfig, HRError, Message};
use crate::model::Model;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyModifiers};

pub struct Controller {
    event_poll_time: u64,
}

impl Controller {
    pub fn new(cfg: &HRConfig) -> Self {
        Self {
            event_poll_time: cfg.event_poll_time,
        }
    }

    pub fn handle_event(&self, model: &Model) -> Result<Option<Message>, HRError> {
        if event::poll(Duration::from_millis(self.event_poll_time))?
            && let Event::Key(key) = event::read()?
            && key.kind == event::KeyEventKind::Press
        {
            return Ok(self.handle_key(key, model.raw_keyevents()));
        }
        Ok(None)
    }

    fn handle_key(&self, key: event::KeyEvent, raw: bool) -> Option<Message> {
        let message = if raw {
            Self::handle_raw_key(key)
        } else {
            Self::handle_command_key(key)
        };
        trace!("Mapped: {key:?} => {message:?}");
        message
    }

    // While typing, everything except the global keys goes to the input.
    fn handle_raw_key(key: event::KeyEvent) -> Option<Message> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(Message::Quit),
            (KeyCode::F(1), _) => Some(Message::Help),
            _ => Some(Message::RawKey(key)),
        }
    }

    fn handle_command_key(key: event::KeyEvent) -> Option<Message> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') => Some(Message::Quit),
                _ => None,
            };
        }
        match key.code {
            KeyCode::Char('q') => Some(Message::Quit),
            KeyCode::Char('?') | KeyCode::F(1) => Some(Message::Help),
            KeyCode::Esc => Some(Message::Exit),
            KeyCode::Enter => Some(Message::Enter),
            KeyCode::Up | KeyCode::Char('k') => Some(Message::MoveUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Message::MoveDown),
            KeyCode::Left | KeyCode::Char('h') => Some(Message::MoveLeft),
            KeyCode::Right | KeyCode::Char('l') => Some(Message::MoveRight),
            KeyCode::Char('s') => Some(Message::SortColumn),
            KeyCode::PageDown | KeyCode::Char('n') => Some(Message::NextPage),
            KeyCode::PageUp | KeyCode::Char('p') => Some(Message::PrevPage),
            KeyCode::Home | KeyCode::Char('g') => Some(Message::FirstPage),
            KeyCode::End | KeyCode::Char('G') => Some(Message::LastPage),
            KeyCode::Char(d @ '1'..='9') => d.to_digit(10).map(|n| Message::GoToPage(n as usize)),
            KeyCode::Char('+') => Some(Message::CyclePageSize),
            KeyCode::Char('/') => Some(Message::Search),
            KeyCode::Char('x') => Some(Message::ClearSearch),
            KeyCode::Char('c') => Some(Message::CreateEmployee),
            KeyCode::Char('y') => Some(Message::CopyRow),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyEvent;

    fn command(code: KeyCode) -> Option<Message> {
        Controller::handle_command_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn command_keys() {
        assert!(matches!(command(KeyCode::Char('q')), Some(Message::Quit)));
        assert!(matches!(command(KeyCode::Char('7')), Some(Message::GoToPage(7))));
        assert!(matches!(command(KeyCode::Char('0')), None));
        assert!(matches!(command(KeyCode::Char('G')), Some(Message::LastPage)));
        assert!(matches!(command(KeyCode::PageDown), Some(Message::NextPage)));
        assert!(matches!(command(KeyCode::Char('/')), Some(Message::Search)));
    }

    #[test]
    fn raw_mode_passes_keys_through() {
        let q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert!(matches!(Controller::handle_raw_key(q), Some(Message::RawKey(_))));

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(matches!(Controller::handle_raw_key(ctrl_c), Some(Message::Quit)));
        assert!(matches!(Controller::handle_command_key(ctrl_c), Some(Message::Quit)));
    }
}
