use crate::application::{App, AppMode, TextInput};
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match app.mode {
            AppMode::Normal => Self::handle_normal_mode(app, key),
            AppMode::Search => Self::handle_search_mode(app, key, modifiers),
            AppMode::Form => Self::handle_form_mode(app, key, modifiers),
            AppMode::Details => app.close_details(),
            AppMode::ConfirmRemove => Self::handle_confirm_mode(app, key),
            AppMode::Alert => Self::handle_alert_mode(app, key),
            AppMode::Help => Self::handle_help_mode(app, key),
        }
    }

    fn handle_normal_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => app.select_next(),
            KeyCode::Home | KeyCode::Char('g') => app.select_first(),
            KeyCode::End | KeyCode::Char('G') => app.select_last(),
            KeyCode::Enter => app.view_selected(),
            KeyCode::Char('/') | KeyCode::Char('s') => app.start_search(),
            KeyCode::Char('1') => app.show_alphabetical(),
            KeyCode::Char('2') => app.show_reverse_alphabetical(),
            KeyCode::Char('3') => app.show_order_added(),
            KeyCode::Char('4') => app.reverse_order_added(),
            KeyCode::Char('a') => app.start_add(),
            KeyCode::Char('e') => app.start_edit(),
            KeyCode::Char('d') | KeyCode::Delete => app.request_remove(),
            KeyCode::F(1) | KeyCode::Char('?') => app.open_help(),
            KeyCode::Esc => app.clear_selection(),
            // 'q' is handled by the main loop
            _ => {}
        }
    }

    fn handle_search_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match key {
            KeyCode::Enter => app.perform_search(),
            KeyCode::Esc => app.cancel_search(),
            _ => Self::edit_text(&mut app.search, key, modifiers),
        }
    }

    fn handle_form_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match key {
            KeyCode::Enter => app.submit_form(),
            KeyCode::Esc => app.cancel_form(),
            _ => {
                let Some(form) = app.form.as_mut() else {
                    return;
                };
                match key {
                    KeyCode::BackTab | KeyCode::Up => form.focus_previous(),
                    KeyCode::Tab if modifiers.contains(KeyModifiers::SHIFT) => {
                        form.focus_previous()
                    }
                    KeyCode::Tab | KeyCode::Down => form.focus_next(),
                    _ => Self::edit_text(form.focused_mut(), key, modifiers),
                }
            }
        }
    }

    fn handle_confirm_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_remove(),
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => app.cancel_remove(),
            _ => {}
        }
    }

    fn handle_alert_mode(app: &mut App, key: KeyCode) {
        if matches!(key, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            app.dismiss_alert();
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.close_help();
            }
            KeyCode::Up | KeyCode::Char('k') => app.scroll_help_up(1),
            KeyCode::Down | KeyCode::Char('j') => app.scroll_help_down(1),
            KeyCode::PageUp => app.scroll_help_up(5),
            KeyCode::PageDown => app.scroll_help_down(5),
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }

    fn edit_text(input: &mut TextInput, key: KeyCode, modifiers: KeyModifiers) {
        match key {
            // Ctrl/Alt chords are shortcuts, not text.
            KeyCode::Char(_) if modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {}
            KeyCode::Backspace => input.backspace(),
            KeyCode::Delete => input.delete(),
            KeyCode::Left => input.move_left(),
            KeyCode::Right => input.move_right(),
            KeyCode::Home => input.move_home(),
            KeyCode::End => input.move_end(),
            KeyCode::Char(c) => input.insert(c),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{FormKind, ListView};
    use crate::domain::Registry;
    use crate::infrastructure::PartnerRepository;
    use tempfile::TempDir;

    fn test_app() -> (TempDir, App) {
        let dir = TempDir::new().unwrap();
        let repository = PartnerRepository::new(dir.path().join("partners.csv"));
        let mut registry = Registry::new();
        registry.add("Bright Tech", "Business", "Laptops", "555-0101");
        registry.add("Acme Foodbank", "Nonprofit", "Food,Shelter", "555-0100");
        (dir, App::new(registry, repository))
    }

    fn press(app: &mut App, key: KeyCode) {
        InputHandler::handle_key_event(app, key, KeyModifiers::NONE);
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_ordering_keys() {
        let (_dir, mut app) = test_app();

        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.view, ListView::Alphabetical);
        assert_eq!(app.visible, vec!["Acme Foodbank", "Bright Tech"]);

        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.visible, vec!["Bright Tech", "Acme Foodbank"]);

        press(&mut app, KeyCode::Char('4'));
        assert_eq!(app.view, ListView::OrderAdded);
        assert_eq!(app.visible, vec!["Acme Foodbank", "Bright Tech"]);

        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.visible, vec!["Acme Foodbank", "Bright Tech"]);
    }

    #[test]
    fn test_search_typing_and_submit() {
        let (_dir, mut app) = test_app();
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.mode, AppMode::Search);

        type_text(&mut app, "shelterx");
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.visible, vec!["Acme Foodbank"]);
    }

    #[test]
    fn test_search_escape_keeps_list() {
        let (_dir, mut app) = test_app();
        press(&mut app, KeyCode::Char('s'));
        type_text(&mut app, "zzz");
        press(&mut app, KeyCode::Esc);

        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.visible.len(), 2);
    }

    #[test]
    fn test_add_form_via_keys() {
        let (_dir, mut app) = test_app();
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.mode, AppMode::Form);

        type_text(&mut app, "Harbor Youth");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "Community");
        press(&mut app, KeyCode::Down);
        type_text(&mut app, "Mentoring");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "555-0150");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.mode, AppMode::Normal);
        let partner = app.registry.find_by_name("Harbor Youth").unwrap();
        assert_eq!(partner.partner_type, "Community");
        assert_eq!(partner.resources, "Mentoring");
        assert_eq!(partner.contact, "555-0150");
    }

    #[test]
    fn test_form_field_navigation_backwards() {
        let (_dir, mut app) = test_app();
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.form.as_ref().unwrap().focus, 3);
        InputHandler::handle_key_event(&mut app, KeyCode::Tab, KeyModifiers::SHIFT);
        assert_eq!(app.form.as_ref().unwrap().focus, 2);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.form.as_ref().unwrap().focus, 1);
    }

    #[test]
    fn test_form_typing_letters_does_not_trigger_shortcuts() {
        let (_dir, mut app) = test_app();
        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "de1q");

        assert_eq!(app.mode, AppMode::Form);
        assert_eq!(app.form.as_ref().unwrap().fields[0].value(), "de1q");
        assert_eq!(app.registry.len(), 2);
    }

    #[test]
    fn test_edit_and_cancel_via_keys() {
        let (_dir, mut app) = test_app();
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(
            app.form.as_ref().unwrap().kind,
            FormKind::Edit {
                original: "Bright Tech".to_string()
            }
        );
        type_text(&mut app, " Labs");
        press(&mut app, KeyCode::Esc);

        assert_eq!(app.mode, AppMode::Normal);
        assert!(app.registry.find_by_name("Bright Tech").is_some());
    }

    #[test]
    fn test_remove_confirm_and_decline() {
        let (_dir, mut app) = test_app();
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.mode, AppMode::ConfirmRemove);
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.mode, AppMode::ConfirmRemove);
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.registry.len(), 2);

        press(&mut app, KeyCode::Delete);
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.registry.len(), 1);
        assert!(app.registry.find_by_name("Bright Tech").is_none());
    }

    #[test]
    fn test_details_open_and_close() {
        let (_dir, mut app) = test_app();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, AppMode::Details);
        assert_eq!(app.details.as_ref().unwrap().name, "Acme Foodbank");

        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.mode, AppMode::Normal);
    }

    #[test]
    fn test_escape_clears_selection_then_edit_alerts() {
        let (_dir, mut app) = test_app();
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.selected, None);

        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.mode, AppMode::Alert);
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.mode, AppMode::Alert);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, AppMode::Normal);
    }

    #[test]
    fn test_control_and_alt_chords_are_not_typed() {
        let (_dir, mut app) = test_app();
        press(&mut app, KeyCode::Char('a'));
        InputHandler::handle_key_event(&mut app, KeyCode::Char('a'), KeyModifiers::CONTROL);
        InputHandler::handle_key_event(&mut app, KeyCode::Char('x'), KeyModifiers::ALT);
        InputHandler::handle_key_event(&mut app, KeyCode::Char('H'), KeyModifiers::SHIFT);
        assert_eq!(app.form.as_ref().unwrap().fields[0].value(), "H");

        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('/'));
        InputHandler::handle_key_event(&mut app, KeyCode::Char('u'), KeyModifiers::CONTROL);
        type_text(&mut app, "food");
        assert_eq!(app.search.value(), "food");
    }

    #[test]
    fn test_help_scrolling_is_bounded() {
        let (_dir, mut app) = test_app();
        press(&mut app, KeyCode::Char('?'));
        for _ in 0..50 {
            press(&mut app, KeyCode::PageDown);
        }
        let bottom = app.help_scroll;
        press(&mut app, KeyCode::Up);
        assert_eq!(app.help_scroll, bottom - 1);
    }

    #[test]
    fn test_help_scrolling() {
        let (_dir, mut app) = test_app();
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.mode, AppMode::Help);
        press(&mut app, KeyCode::PageDown);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.help_scroll, 4);
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.mode, AppMode::Normal);
    }
}
