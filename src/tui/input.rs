// Keyboard dispatch
//
// Layered: Modal → mode component (search box, editor field, table) →
// mode keys. Only Press events are acted on; Release/Repeat are ignored.

use super::app::{App, InputMode};
use super::modal::{Modal, ModalAction};
use super::traits::Interactive;
use crate::engine::TableAction;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Handle one key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    // Ctrl+C quits from anywhere, even mid-edit
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    // Layer 1: Modal captures all input when active
    if handle_modal_input(app, &key) {
        return;
    }

    // Layer 2 + 3: whoever owns the current mode, then its fallback keys
    match app.mode {
        InputMode::Search => handle_search_keys(app, key),
        InputMode::Edit => handle_edit_keys(app, key),
        InputMode::Normal => {
            if app.table.handle_key(key).was_handled() {
                return;
            }
            handle_normal_keys(app, key);
        }
    }
}

/// Returns true if a modal absorbed the input
fn handle_modal_input(app: &mut App, key: &KeyEvent) -> bool {
    let Some(modal) = app.modal.as_mut() else {
        return false;
    };

    match modal.handle_input(key.code) {
        ModalAction::None => {}
        ModalAction::Close => app.modal = None,
        ModalAction::Export(scope) => {
            app.modal = None;
            app.export(scope);
        }
    }
    true
}

fn handle_search_keys(app: &mut App, key: KeyEvent) {
    if app.search.handle_key(key).was_handled() {
        app.apply_search();
        return;
    }
    match key.code {
        // Keep the filter, go back to the table
        KeyCode::Enter | KeyCode::Down => app.mode = InputMode::Normal,
        KeyCode::Esc => {
            app.clear_search();
            app.mode = InputMode::Normal;
        }
        _ => {}
    }
}

fn handle_edit_keys(app: &mut App, key: KeyEvent) {
    if app.focused_input_mut().handle_key(key).was_handled() {
        app.sync_draft();
        return;
    }
    match key.code {
        KeyCode::Tab | KeyCode::BackTab => app.edit_field = app.edit_field.toggle(),
        KeyCode::Enter => app.commit_edit(),
        KeyCode::Esc => app.cancel_edit(),
        _ => {}
    }
}

fn handle_normal_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.should_quit = true,
        KeyCode::Char('?') => app.modal = Some(Modal::help()),
        KeyCode::Char('/') => app.mode = InputMode::Search,
        KeyCode::Enter | KeyCode::Char('e') => app.start_edit(),

        // Pages
        KeyCode::Right | KeyCode::Char('l') | KeyCode::PageDown => {
            app.navigate(TableAction::NextPage)
        }
        KeyCode::Left | KeyCode::Char('h') | KeyCode::PageUp => {
            app.navigate(TableAction::PrevPage)
        }
        KeyCode::Home | KeyCode::Char('g') => app.navigate(TableAction::FirstPage),
        KeyCode::End | KeyCode::Char('G') => app.navigate(TableAction::LastPage),
        KeyCode::Char(c @ '1'..='9') => {
            let page = c as usize - '0' as usize;
            app.navigate(TableAction::GoToPage(page));
        }

        KeyCode::Char('x') => app.open_export_menu(),
        KeyCode::Char('y') => app.copy_selected(),
        KeyCode::Char('L') => app.show_logs = !app.show_logs,
        KeyCode::Esc => {
            if !app.search.value().is_empty() {
                app.clear_search();
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::tests::loaded_app;

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_release_events_are_ignored() {
        let (mut app, _) = loaded_app(20);
        let mut key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        handle_key_event(&mut app, key);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_page_keys() {
        let (mut app, _) = loaded_app(40);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.model.view_state().current_page, 2);
        press(&mut app, KeyCode::Char('G'));
        assert_eq!(app.model.view_state().current_page, 3);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.model.view_state().current_page, 3);
        press(&mut app, KeyCode::Char('g'));
        assert_eq!(app.model.view_state().current_page, 1);
        press(&mut app, KeyCode::Char('9'));
        assert_eq!(app.model.view_state().current_page, 3);
    }

    #[test]
    fn test_search_mode_types_instead_of_commands() {
        let (mut app, _) = loaded_app(40);
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.mode, InputMode::Search);

        // 'q' is text here, not quit
        type_str(&mut app, "q");
        assert!(!app.should_quit);
        assert_eq!(app.model.view_state().search_term, "q");

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, InputMode::Normal);
        assert_eq!(app.model.view_state().search_term, "");
    }

    #[test]
    fn test_search_enter_keeps_filter() {
        let (mut app, _) = loaded_app(40);
        let title = app.model.record(7).unwrap().title.clone();

        press(&mut app, KeyCode::Char('/'));
        type_str(&mut app, &title.to_uppercase());
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.mode, InputMode::Normal);
        let snapshot = app.model.snapshot();
        assert!(snapshot.is_filtering);
        assert!(snapshot.visible_records.iter().any(|r| r.id == 7));
        assert!(snapshot
            .visible_records
            .iter()
            .all(|r| r.title.to_lowercase().contains(&title)));
    }

    #[test]
    fn test_escape_clears_whitespace_term() {
        let (mut app, _) = loaded_app(20);
        press(&mut app, KeyCode::Char('/'));
        type_str(&mut app, "   ");
        press(&mut app, KeyCode::Enter);
        assert!(!app.model.view_state().is_filtering());
        assert_eq!(app.search.value(), "   ");

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.search.value(), "");
        assert_eq!(app.model.view_state().search_term, "");
    }

    #[test]
    fn test_edit_flow_through_keys() {
        let (mut app, _) = loaded_app(20);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, InputMode::Edit);
        assert_eq!(app.model.edit_session().editing_id(), Some(2));

        // Clear the title: commit is refused
        handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL),
        );
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, InputMode::Edit);

        type_str(&mut app, "Fixed");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::End);
        type_str(&mut app, "!");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.mode, InputMode::Normal);
        let record = app.model.record(2).unwrap();
        assert_eq!(record.title, "Fixed");
        assert!(record.body.ends_with('!'));
    }

    #[test]
    fn test_escape_cancels_edit() {
        let (mut app, _) = loaded_app(5);
        let before = app.model.record(1).unwrap().clone();
        press(&mut app, KeyCode::Char('e'));
        type_str(&mut app, "junk");
        press(&mut app, KeyCode::Esc);

        assert_eq!(app.mode, InputMode::Normal);
        assert_eq!(app.model.record(1).unwrap(), &before);
    }

    #[test]
    fn test_export_menu_all_records() {
        let (mut app, calls) = loaded_app(20);
        press(&mut app, KeyCode::Char('x'));
        assert!(app.modal.is_some());

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert!(app.modal.is_none());

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "todos_os_itens");
        assert_eq!(calls[0].1.len(), 20);
    }

    #[test]
    fn test_modal_absorbs_quit() {
        let (mut app, _) = loaded_app(5);
        press(&mut app, KeyCode::Char('?'));
        press(&mut app, KeyCode::Char('j'));
        assert!(!app.should_quit);
        assert_eq!(app.table.selected(), 0);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.modal.is_none());
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
