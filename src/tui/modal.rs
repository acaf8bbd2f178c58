// Modal system for TUI overlays
//
// Self-contained modal dialogs that handle their own input and return actions.
// App just holds Option<Modal>, input routing acts on returned ModalAction.

use crossterm::event::KeyCode;

/// Actions returned by modal input handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalAction {
    /// Input consumed, no state change needed
    None,
    /// Close the modal
    Close,
}

/// Available modal types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    /// Help overlay - shows keyboard shortcuts
    Help,
    /// Failed analysis - message and troubleshooting hints
    ///
    /// The error itself lives on the session; closing the modal dismisses it.
    Error,
    /// Request and raw response of the stored run (scrollable)
    Details { scroll: usize },
}

/// Lines moved per PageUp/PageDown in a scrollable modal
const MODAL_PAGE: usize = 10;

impl Modal {
    /// Handle keyboard input, return action for caller to execute
    pub fn handle_input(&mut self, key: KeyCode) -> ModalAction {
        match self {
            Modal::Help => match key {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => ModalAction::Close,
                _ => ModalAction::None,
            },
            Modal::Error => match key {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => ModalAction::Close,
                _ => ModalAction::None,
            },
            Modal::Details { scroll } => {
                match key {
                    KeyCode::Esc | KeyCode::Char('d') | KeyCode::Char('q') => {
                        return ModalAction::Close
                    }
                    KeyCode::Up | KeyCode::Char('k') => *scroll = scroll.saturating_sub(1),
                    KeyCode::Down | KeyCode::Char('j') => *scroll = scroll.saturating_add(1),
                    KeyCode::PageUp => *scroll = scroll.saturating_sub(MODAL_PAGE),
                    KeyCode::PageDown => *scroll = scroll.saturating_add(MODAL_PAGE),
                    KeyCode::Home => *scroll = 0,
                    _ => {}
                }
                ModalAction::None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_closes_on_question_mark() {
        let mut modal = Modal::Help;
        assert_eq!(modal.handle_input(KeyCode::Char('?')), ModalAction::Close);
        assert_eq!(modal.handle_input(KeyCode::Enter), ModalAction::None);
    }

    #[test]
    fn details_scrolls_and_closes() {
        let mut modal = Modal::Details { scroll: 0 };
        assert_eq!(modal.handle_input(KeyCode::Up), ModalAction::None);
        assert_eq!(modal, Modal::Details { scroll: 0 });
        modal.handle_input(KeyCode::PageDown);
        modal.handle_input(KeyCode::Char('j'));
        assert_eq!(modal, Modal::Details { scroll: 11 });
        assert_eq!(modal.handle_input(KeyCode::Char('d')), ModalAction::Close);
    }

    #[test]
    fn error_closes_on_enter() {
        let mut modal = Modal::Error;
        assert_eq!(modal.handle_input(KeyCode::Enter), ModalAction::Close);
        assert_eq!(modal.handle_input(KeyCode::Char('?')), ModalAction::None);
    }
}
