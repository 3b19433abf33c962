//! Event handler for the TUI
//!
//! Routes keyboard events to the appropriate handlers based on the
//! current application state.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{ActiveDialog, ActiveView, App};
use super::event::Event;
use crate::table::TransactionColumn;

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) -> Result<()> {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Tick => {
            app.poll_worker();
            Ok(())
        }
        Event::Resize(_, _) => Ok(()),
    }
}

/// Handle a key event
fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return Ok(());
    }

    // Check if we're in a dialog first
    if app.has_dialog() {
        return handle_dialog_key(app, key);
    }

    handle_normal_key(app, key)
}

/// Handle keys when no dialog is open
fn handle_normal_key(app: &mut App, key: KeyEvent) -> Result<()> {
    // Global keys (work everywhere)
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            app.quit();
            return Ok(());
        }
        KeyCode::Char('?') => {
            app.open_dialog(ActiveDialog::Help);
            return Ok(());
        }
        KeyCode::Tab => {
            app.switch_view(app.active_view.next());
            return Ok(());
        }
        KeyCode::BackTab => {
            app.switch_view(app.active_view.prev());
            return Ok(());
        }
        KeyCode::Char('[') | KeyCode::Char('h') | KeyCode::Left => {
            app.change_month(false);
            return Ok(());
        }
        KeyCode::Char(']') | KeyCode::Char('l') | KeyCode::Right => {
            app.change_month(true);
            return Ok(());
        }
        KeyCode::Char('r') => {
            app.clear_status();
            app.refresh();
            return Ok(());
        }
        KeyCode::Char('L') => {
            app.sign_out();
            return Ok(());
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.move_down();
            return Ok(());
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.move_up();
            return Ok(());
        }
        KeyCode::Char('g') => {
            app.select_first();
            return Ok(());
        }
        KeyCode::Char('G') => {
            app.select_last();
            return Ok(());
        }
        _ => {}
    }

    match app.active_view {
        ActiveView::Overview => handle_overview_key(app, key),
        ActiveView::Transactions => handle_register_view_key(app, key),
        ActiveView::Budgets => handle_budget_view_key(app, key),
    }
}

fn handle_overview_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('a') => app.open_add_transaction(),
        KeyCode::Char('n') => app.open_add_category(),
        _ => {}
    }
    Ok(())
}

fn handle_register_view_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char(c @ '1'..='4') => {
            let index = (c as usize) - ('1' as usize);
            app.sort_by(TransactionColumn::ALL[index]);
        }
        KeyCode::Char('a') | KeyCode::Char('n') => app.open_add_transaction(),
        KeyCode::Char('d') | KeyCode::Delete => {
            if app.dashboard.busy {
                app.set_status("Please wait for the current request to finish");
            } else {
                app.open_confirm_delete();
            }
        }
        _ => {}
    }
    Ok(())
}

fn handle_budget_view_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('e') | KeyCode::Char('b') | KeyCode::Enter => app.open_edit_budget(),
        KeyCode::Char('n') | KeyCode::Char('a') => app.open_add_category(),
        _ => {}
    }
    Ok(())
}

/// Handle keys when a dialog is open
fn handle_dialog_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match &app.active_dialog {
        ActiveDialog::Help => {
            // Close help on any key
            app.close_dialog();
        }
        ActiveDialog::ConfirmDelete(id) => {
            let id = id.clone();
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    app.close_dialog();
                    app.delete_transaction(id);
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    app.close_dialog();
                }
                _ => {}
            }
        }
        ActiveDialog::Login => {
            super::dialogs::login::handle_key(app, key);
        }
        ActiveDialog::AddTransaction => {
            super::dialogs::transaction::handle_key(app, key);
        }
        ActiveDialog::AddCategory => {
            super::dialogs::category::handle_key(app, key);
        }
        ActiveDialog::EditBudget => {
            super::dialogs::budget::handle_key(app, key);
        }
        ActiveDialog::None => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CostbookPaths, Settings};
    use crate::models::{Month, TransactionId};
    use crate::sync::worker::fake::FakeApi;
    use crate::table::SortOrder;
    use tempfile::TempDir;

    fn press(app: &mut App, code: KeyCode) {
        handle_event(app, Event::Key(KeyEvent::from(code))).unwrap();
    }

    #[test]
    fn test_tab_cycles_views() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CostbookPaths::with_base_dir(temp_dir.path().to_path_buf());
        let settings = Settings::default();
        let month = Month::new(2024, 3).unwrap();
        let mut app = App::new(&paths, &settings, Box::new(FakeApi::default()), month);

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.active_view, ActiveView::Transactions);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.active_view, ActiveView::Budgets);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.active_view, ActiveView::Transactions);
    }

    #[test]
    fn test_number_keys_sort_register() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CostbookPaths::with_base_dir(temp_dir.path().to_path_buf());
        let settings = Settings::default();
        let month = Month::new(2024, 3).unwrap();
        let mut app = App::new(&paths, &settings, Box::new(FakeApi::default()), month);
        app.switch_view(ActiveView::Transactions);

        press(&mut app, KeyCode::Char('4'));
        assert_eq!(app.dashboard.sort.key(), TransactionColumn::Amount);
        assert_eq!(app.dashboard.sort.order(), SortOrder::Ascending);
        press(&mut app, KeyCode::Char('4'));
        assert_eq!(app.dashboard.sort.order(), SortOrder::Descending);
    }

    #[test]
    fn test_month_keys_move_month() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CostbookPaths::with_base_dir(temp_dir.path().to_path_buf());
        let settings = Settings::default();
        let month = Month::new(2024, 1).unwrap();
        let mut app = App::new(&paths, &settings, Box::new(FakeApi::default()), month);

        press(&mut app, KeyCode::Char('['));
        assert_eq!(app.dashboard.month, Month::new(2023, 12).unwrap());
        press(&mut app, KeyCode::Char(']'));
        press(&mut app, KeyCode::Char(']'));
        assert_eq!(app.dashboard.month, Month::new(2024, 2).unwrap());
    }

    #[test]
    fn test_confirm_dialog_cancel_keeps_row() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CostbookPaths::with_base_dir(temp_dir.path().to_path_buf());
        let settings = Settings::default();
        let month = Month::new(2024, 3).unwrap();
        let mut app = App::new(&paths, &settings, Box::new(FakeApi::default()), month);
        app.open_dialog(ActiveDialog::ConfirmDelete(TransactionId::new("t1")));

        press(&mut app, KeyCode::Char('n'));
        assert!(!app.has_dialog());
        assert!(!app.dashboard.busy);
    }

    #[test]
    fn test_help_closes_on_any_key() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CostbookPaths::with_base_dir(temp_dir.path().to_path_buf());
        let settings = Settings::default();
        let month = Month::new(2024, 3).unwrap();
        let mut app = App::new(&paths, &settings, Box::new(FakeApi::default()), month);

        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.active_dialog, ActiveDialog::Help);
        press(&mut app, KeyCode::Char('x'));
        assert!(!app.has_dialog());
    }
}
