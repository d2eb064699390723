//! Key event handlers for the dashboard and the detail modal

use crate::input_key::InputKey;
use crate::message::Message;
use crate::state::{AppState, ModalPhase};

/// Convert key events to messages based on what is on screen
pub fn handle_key(state: &AppState, key: InputKey) -> Option<Message> {
    // Force quit from anywhere
    if key == InputKey::CharCtrl('c') {
        return Some(Message::Quit);
    }

    match state.modal.phase() {
        ModalPhase::Closed => handle_key_dashboard(state, key),
        ModalPhase::Opening => handle_key_opening(key),
        ModalPhase::Open => handle_key_modal(key),
    }
}

fn handle_key_dashboard(state: &AppState, key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('q') | InputKey::Esc => Some(Message::Quit),

        InputKey::Left | InputKey::Char('h') | InputKey::BackTab => Some(Message::PreviousCategory),
        InputKey::Right | InputKey::Char('l') | InputKey::Tab => Some(Message::NextCategory),

        InputKey::Up | InputKey::Char('k') => Some(Message::CursorUp),
        InputKey::Down | InputKey::Char('j') => Some(Message::CursorDown),

        InputKey::Enter => Some(Message::OpenSelected),

        // Disabled while its own fetch is in flight
        InputKey::Char('r') if !state.dashboard.is_fetching() => Some(Message::Refresh),

        _ => None,
    }
}

/// Waiting for the first detail response
fn handle_key_opening(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Esc | InputKey::Char('q') => Some(Message::CloseModal),
        _ => None,
    }
}

fn handle_key_modal(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Esc | InputKey::Char('q') => Some(Message::CloseModal),
        InputKey::Up | InputKey::Char('k') => Some(Message::PanelUp),
        InputKey::Down | InputKey::Char('j') => Some(Message::PanelDown),
        InputKey::Char(' ') | InputKey::Enter => Some(Message::ToggleSelectedPanel),
        InputKey::Char('r') => Some(Message::RefreshModal),
        _ => None,
    }
}
