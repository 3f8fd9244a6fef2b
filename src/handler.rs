use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, EditMode, FocusPane, InputMode, ResultsTab};

/// Convert a character index to a byte index for UTF-8 safe string edits.
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ctrl+C quits from anywhere.
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Editing => handle_editing_mode(app, key),
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,

        // Generate from anywhere; App::submit ignores it while loading.
        KeyCode::Char('g') => app.submit(),

        KeyCode::Tab => {
            app.focus = match app.focus {
                FocusPane::Form => FocusPane::Canvas,
                FocusPane::Canvas => FocusPane::Form,
            };
        }

        _ => match app.focus {
            FocusPane::Form => handle_form_normal(app, key),
            FocusPane::Canvas => handle_canvas_normal(app, key),
        },
    }
}

fn handle_form_normal(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.form_nav_down(),
        KeyCode::Char('k') | KeyCode::Up => app.form_nav_up(),

        // Select fields cycle; text fields open for typing.
        KeyCode::Char('h') | KeyCode::Left => app.cycle_form_field(-1),
        KeyCode::Char('l') | KeyCode::Right => app.cycle_form_field(1),

        KeyCode::Enter | KeyCode::Char('i') => {
            if app.form_field().is_select() {
                app.cycle_form_field(1);
            } else {
                app.input_mode = InputMode::Editing;
                app.input_cursor = app
                    .active_input()
                    .map_or(0, |text| text.chars().count());
            }
        }

        _ => {}
    }
}

fn handle_canvas_normal(app: &mut App, key: KeyEvent) {
    // The error canvas only offers "try again".
    if app.error.is_some() {
        if key.code == KeyCode::Char('r') {
            app.reset();
        }
        return;
    }
    if app.result.is_none() {
        return;
    }

    match key.code {
        // Section tabs
        KeyCode::Char('h') | KeyCode::Left => {
            app.tab = app.tab.cycled(-1);
            app.canvas_scroll = 0;
        }
        KeyCode::Char('l') | KeyCode::Right => {
            app.tab = app.tab.cycled(1);
            app.canvas_scroll = 0;
        }
        KeyCode::Char('1') => app.tab = ResultsTab::Variations,
        KeyCode::Char('2') => app.tab = ResultsTab::Insights,
        KeyCode::Char('3') => app.tab = ResultsTab::Compliance,
        KeyCode::Char('4') => app.tab = ResultsTab::Channels,

        KeyCode::Char('j') | KeyCode::Down => {
            if app.tab == ResultsTab::Variations {
                app.select_next_variation();
            } else {
                app.scroll_down();
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            if app.tab == ResultsTab::Variations {
                app.select_prev_variation();
            } else {
                app.scroll_up();
            }
        }

        // Variation actions
        KeyCode::Char('e') | KeyCode::Enter => {
            if app.tab == ResultsTab::Variations {
                app.begin_edit(app.selected_variation);
            }
        }
        KeyCode::Char('c') => {
            if app.tab == ResultsTab::Variations {
                if let Some(text) = app.variation_export_text(app.selected_variation) {
                    if copy_to_clipboard(&text) {
                        app.flash_copied();
                    }
                }
            }
        }

        // Start a fresh campaign from the results view.
        KeyCode::Char('r') => app.reset(),

        _ => {}
    }
}

fn handle_editing_mode(app: &mut App, key: KeyEvent) {
    let editing_variation = matches!(app.edit, EditMode::Editing { .. });

    match key.code {
        KeyCode::Esc => {
            if editing_variation {
                app.cancel_edit();
            } else {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Enter => {
            if editing_variation {
                app.save_edit();
            } else {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Tab | KeyCode::Down => {
            if editing_variation {
                app.edit_focus(true);
            }
        }
        KeyCode::BackTab | KeyCode::Up => {
            if editing_variation {
                app.edit_focus(false);
            }
        }

        KeyCode::Backspace => {
            let cursor = app.input_cursor;
            if cursor > 0 {
                if let Some(input) = app.active_input_mut() {
                    let byte_pos = char_to_byte_index(input, cursor - 1);
                    input.remove(byte_pos);
                    app.input_cursor = cursor - 1;
                }
            }
        }
        KeyCode::Delete => {
            let cursor = app.input_cursor;
            if let Some(input) = app.active_input_mut() {
                if cursor < input.chars().count() {
                    let byte_pos = char_to_byte_index(input, cursor);
                    input.remove(byte_pos);
                }
            }
        }
        KeyCode::Left => {
            app.input_cursor = app.input_cursor.saturating_sub(1);
        }
        KeyCode::Right => {
            let len = app.active_input().map_or(0, |text| text.chars().count());
            app.input_cursor = (app.input_cursor + 1).min(len);
        }
        KeyCode::Home => app.input_cursor = 0,
        KeyCode::End => {
            app.input_cursor = app.active_input().map_or(0, |text| text.chars().count());
        }
        KeyCode::Char(c) => {
            let cursor = app.input_cursor;
            if let Some(input) = app.active_input_mut() {
                let byte_pos = char_to_byte_index(input, cursor);
                input.insert(byte_pos, c);
                app.input_cursor = cursor + 1;
            }
        }
        _ => {}
    }
}

/// Put text on the system clipboard. Copying is a side effect only, so a
/// missing clipboard (headless session, no display server) is ignored.
fn copy_to_clipboard(text: &str) -> bool {
    match arboard::Clipboard::new() {
        Ok(mut clipboard) => clipboard.set_text(text).is_ok(),
        Err(e) => {
            tracing::debug!(error = %e, "clipboard unavailable");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::GeneratorClient;
    use crossterm::event::{KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn test_app() -> App {
        App::new(GeneratorClient::new("http://localhost:8000"))
    }

    #[test]
    fn typing_into_the_product_field_mutates_the_draft() {
        let mut app = test_app();
        handle_key(&mut app, key(KeyCode::Enter)); // open Product Name
        assert_eq!(app.input_mode, InputMode::Editing);

        for c in "Mist".chars() {
            handle_key(&mut app, key(KeyCode::Char(c)));
        }
        handle_key(&mut app, key(KeyCode::Backspace));

        assert_eq!(app.draft.product_name, "Mis");
        handle_key(&mut app, key(KeyCode::Esc));
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn select_fields_cycle_instead_of_editing() {
        let mut app = test_app();
        // Move down to the Platform row.
        for _ in 0..3 {
            handle_key(&mut app, key(KeyCode::Char('j')));
        }
        handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.draft.platform.as_str(), "Facebook");

        handle_key(&mut app, key(KeyCode::Char('h')));
        assert_eq!(app.draft.platform.as_str(), "Instagram");
    }

    #[test]
    fn cursor_handles_multibyte_input() {
        let mut app = test_app();
        handle_key(&mut app, key(KeyCode::Enter));
        for c in "héllo".chars() {
            handle_key(&mut app, key(KeyCode::Char(c)));
        }
        handle_key(&mut app, key(KeyCode::Left));
        handle_key(&mut app, key(KeyCode::Left));
        handle_key(&mut app, key(KeyCode::Char('x')));
        assert_eq!(app.draft.product_name, "hélxlo");
    }
}
