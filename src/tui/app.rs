//! Application state for the TUI
//!
//! The App struct holds all state needed for rendering and handling events,
//! and owns the handle to the background API worker.

use log::{debug, info, warn};
use zeroize::Zeroizing;

use crate::api::ExpenseApi;
use crate::config::{CostbookPaths, Session, Settings};
use crate::error::CostbookError;
use crate::models::{
    Category, CategoryId, Money, Month, NewCategory, NewTransaction, Transaction, TransactionId,
};
use crate::sync::{Job, JobResult, LoadChannel, LoadGuard, Outcome, Ticket, Worker};
use crate::table::TransactionColumn;

use super::dashboard::Dashboard;
use super::dialogs::budget::BudgetFormState;
use super::dialogs::category::CategoryFormState;
use super::dialogs::login::LoginFormState;
use super::dialogs::transaction::TransactionFormState;

/// Which view is currently active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Overview,
    Transactions,
    Budgets,
}

impl ActiveView {
    pub const ALL: [ActiveView; 3] = [Self::Overview, Self::Transactions, Self::Budgets];

    pub fn title(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Transactions => "Transactions",
            Self::Budgets => "Budgets",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Overview => Self::Transactions,
            Self::Transactions => Self::Budgets,
            Self::Budgets => Self::Overview,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Overview => Self::Budgets,
            Self::Transactions => Self::Overview,
            Self::Budgets => Self::Transactions,
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Overview => 0,
            Self::Transactions => 1,
            Self::Budgets => 2,
        }
    }
}

/// Currently active dialog (if any)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ActiveDialog {
    #[default]
    None,
    Help,
    Login,
    AddTransaction,
    AddCategory,
    EditBudget,
    ConfirmDelete(TransactionId),
}

/// Main application state
pub struct App<'a> {
    /// Paths configuration
    pub paths: &'a CostbookPaths,

    /// Application settings
    pub settings: &'a Settings,

    /// Data loaded from the server
    pub dashboard: Dashboard,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Currently active view
    pub active_view: ActiveView,

    /// Currently active dialog
    pub active_dialog: ActiveDialog,

    /// Selected row in the transaction register (display order)
    pub selected_transaction_index: usize,

    /// Selected row in the budgets view
    pub selected_category_index: usize,

    /// Status message to display
    pub status_message: Option<String>,

    pub login_form: LoginFormState,
    pub transaction_form: TransactionFormState,
    pub category_form: CategoryFormState,
    pub budget_form: BudgetFormState,

    worker: Worker,
    guard: LoadGuard,
    in_flight: Vec<Ticket>,
}

impl<'a> App<'a> {
    /// Create a new App instance, moving the API client onto the worker thread
    pub fn new(
        paths: &'a CostbookPaths,
        settings: &'a Settings,
        api: Box<dyn ExpenseApi>,
        month: Month,
    ) -> Self {
        Self {
            paths,
            settings,
            dashboard: Dashboard::new(month),
            should_quit: false,
            active_view: ActiveView::default(),
            active_dialog: ActiveDialog::default(),
            selected_transaction_index: 0,
            selected_category_index: 0,
            status_message: None,
            login_form: LoginFormState::new(),
            transaction_form: TransactionFormState::default(),
            category_form: CategoryFormState::new(),
            budget_form: BudgetFormState::default(),
            worker: Worker::spawn(api),
            guard: LoadGuard::new(),
            in_flight: Vec::new(),
        }
    }

    /// Validate a stored token, or ask for credentials
    pub fn start(&mut self, has_token: bool) {
        if has_token {
            self.submit(LoadChannel::Session, Job::Validate);
        } else {
            self.open_login(None);
        }
    }

    /// Request to quit the application
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear the status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn open_dialog(&mut self, dialog: ActiveDialog) {
        self.active_dialog = dialog;
    }

    pub fn close_dialog(&mut self) {
        self.active_dialog = ActiveDialog::None;
    }

    pub fn has_dialog(&self) -> bool {
        self.active_dialog != ActiveDialog::None
    }

    /// Switch to a different view
    pub fn switch_view(&mut self, view: ActiveView) {
        self.active_view = view;
    }

    /// Index of the active view in the tab bar
    pub fn view_index(&self) -> usize {
        self.active_view.index()
    }

    /// Whether any load or mutation is outstanding
    pub fn is_loading(&self) -> bool {
        !self.in_flight.is_empty()
    }

    /// Whether a login or token check is outstanding
    pub fn is_signing_in(&self) -> bool {
        self.in_flight
            .iter()
            .any(|t| t.channel == LoadChannel::Session)
    }

    // ---- requests ----

    fn submit(&mut self, channel: LoadChannel, job: Job) {
        let ticket = self.guard.issue(channel);
        self.in_flight.retain(|t| t.channel != channel);
        self.dashboard.error = None;
        if channel == LoadChannel::Mutation {
            self.dashboard.busy = true;
        }

        match self.worker.submit(ticket, job) {
            Ok(()) => self.in_flight.push(ticket),
            Err(e) => {
                self.dashboard.busy = false;
                self.dashboard.error = Some(e.user_message());
            }
        }
    }

    /// Reload categories and the month's transactions
    pub fn refresh(&mut self) {
        if !self.dashboard.signed_in {
            self.open_login(None);
            return;
        }
        self.submit(LoadChannel::Categories, Job::LoadCategories);
        self.load_transactions();
    }

    /// Reload the transactions of the selected month
    pub fn load_transactions(&mut self) {
        if !self.dashboard.signed_in {
            return;
        }
        let range = self.dashboard.month.range();
        self.submit(LoadChannel::Transactions, Job::LoadTransactions(range));
    }

    /// Move to the previous or next month and load it
    pub fn change_month(&mut self, forward: bool) {
        let month = if forward {
            self.dashboard.month.next()
        } else {
            self.dashboard.month.prev()
        };
        self.dashboard.set_month(month);
        self.selected_transaction_index = 0;
        self.load_transactions();
    }

    /// Log in (or register) with the given credentials
    pub fn sign_in(&mut self, name: String, password: Zeroizing<String>, register: bool) {
        self.submit(
            LoadChannel::Session,
            Job::SignIn {
                name,
                password,
                register,
            },
        );
    }

    /// Forget the token and every outstanding request
    pub fn sign_out(&mut self) {
        if let Err(e) = Session::clear(self.paths) {
            warn!("failed to remove session: {}", e);
        }
        self.guard.invalidate_all();
        self.in_flight.clear();
        self.dashboard.sign_out();
        self.submit(LoadChannel::Session, Job::SignOut);
        info!("signed out");
        self.open_login(Some("Signed out".to_string()));
    }

    /// Queue a mutation unless one is already running
    fn mutate(&mut self, job: Job) -> bool {
        if self.dashboard.busy {
            self.set_status("Please wait for the current request to finish");
            return false;
        }
        if !self.dashboard.signed_in {
            self.open_login(None);
            return false;
        }
        self.submit(LoadChannel::Mutation, job);
        true
    }

    pub fn add_transaction(&mut self, payload: NewTransaction) -> bool {
        self.mutate(Job::CreateTransaction(payload))
    }

    pub fn add_category(&mut self, payload: NewCategory) -> bool {
        self.mutate(Job::CreateCategory(payload))
    }

    pub fn save_budget(&mut self, id: CategoryId, budget: Money) -> bool {
        self.mutate(Job::SetBudget(id, budget))
    }

    pub fn delete_transaction(&mut self, id: TransactionId) -> bool {
        self.mutate(Job::DeleteTransaction(id))
    }

    // ---- results ----

    /// Apply every finished job
    pub fn poll_worker(&mut self) {
        for result in self.worker.drain() {
            self.handle_result(result);
        }
    }

    /// Apply one result, dropping it if a newer request superseded it
    pub fn handle_result(&mut self, result: JobResult) {
        let ticket = result.ticket;
        self.in_flight.retain(|t| *t != ticket);

        if !self.guard.is_current(&ticket) {
            debug!(
                "dropping stale {} result #{}",
                ticket.channel, ticket.generation
            );
            return;
        }

        if ticket.channel == LoadChannel::Mutation {
            self.dashboard.busy = false;
        }

        match result.outcome {
            Ok(outcome) => self.apply_outcome(outcome),
            Err(e) => self.apply_error(ticket.channel, e),
        }
    }

    fn apply_outcome(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Validated(_) => {
                self.dashboard.signed_in = true;
                self.refresh();
            }
            Outcome::SignedIn { token } => {
                if let Err(e) = Session::new(token).save(self.paths) {
                    warn!("failed to save session: {}", e);
                }
                self.dashboard.signed_in = true;
                self.login_form = LoginFormState::new();
                if self.active_dialog == ActiveDialog::Login {
                    self.close_dialog();
                }
                self.set_status("Signed in");
                self.refresh();
            }
            Outcome::SignedOut => {}
            Outcome::Categories(categories) => {
                self.dashboard.categories = categories;
                self.clamp_selection();
            }
            Outcome::Transactions(transactions) => {
                self.dashboard.set_transactions(transactions);
                self.clamp_selection();
            }
            Outcome::CategoryCreated(category) => {
                self.set_status(format!("Category '{}' added", category.name));
                self.dashboard.upsert_category(category);
            }
            Outcome::BudgetSaved(category) => {
                self.set_status(format!("Budget for '{}' saved", category.name));
                self.dashboard.upsert_category(category);
            }
            Outcome::TransactionCreated(_) => {
                self.set_status("Transaction added");
                self.load_transactions();
            }
            Outcome::TransactionDeleted(id) => {
                self.dashboard.remove_transaction(&id);
                self.set_status("Transaction deleted");
                self.clamp_selection();
            }
        }
    }

    fn apply_error(&mut self, channel: LoadChannel, error: CostbookError) {
        let message = error.user_message();

        if error.is_unauthorized() {
            if let Err(e) = Session::clear(self.paths) {
                warn!("failed to remove session: {}", e);
            }
            self.guard.invalidate_all();
            self.in_flight.clear();
            self.dashboard.sign_out();
            self.dashboard.error = Some(message.clone());
            self.open_login(Some(message));
            return;
        }

        if channel == LoadChannel::Session && self.active_dialog == ActiveDialog::Login {
            self.login_form.error = Some(message.clone());
        }
        self.dashboard.error = Some(message);
    }

    /// Show the login dialog with an optional message
    pub fn open_login(&mut self, message: Option<String>) {
        self.login_form.error = message;
        self.open_dialog(ActiveDialog::Login);
    }

    // ---- selection ----

    fn row_count(&self) -> usize {
        match self.active_view {
            ActiveView::Overview => 0,
            ActiveView::Transactions => self.dashboard.transactions.len(),
            ActiveView::Budgets => self.dashboard.categories.len(),
        }
    }

    fn selection_mut(&mut self) -> Option<&mut usize> {
        match self.active_view {
            ActiveView::Overview => None,
            ActiveView::Transactions => Some(&mut self.selected_transaction_index),
            ActiveView::Budgets => Some(&mut self.selected_category_index),
        }
    }

    /// Move selection up
    pub fn move_up(&mut self) {
        if let Some(index) = self.selection_mut() {
            *index = index.saturating_sub(1);
        }
    }

    /// Move selection down
    pub fn move_down(&mut self) {
        let count = self.row_count();
        if let Some(index) = self.selection_mut() {
            if count > 0 && *index < count - 1 {
                *index += 1;
            }
        }
    }

    pub fn select_first(&mut self) {
        if let Some(index) = self.selection_mut() {
            *index = 0;
        }
    }

    pub fn select_last(&mut self) {
        let count = self.row_count();
        if let Some(index) = self.selection_mut() {
            *index = count.saturating_sub(1);
        }
    }

    fn clamp_selection(&mut self) {
        let transactions = self.dashboard.transactions.len();
        let categories = self.dashboard.categories.len();
        self.selected_transaction_index = self
            .selected_transaction_index
            .min(transactions.saturating_sub(1));
        self.selected_category_index = self
            .selected_category_index
            .min(categories.saturating_sub(1));
    }

    /// Pick a sort column for the register
    pub fn sort_by(&mut self, column: TransactionColumn) {
        self.dashboard.sort.toggle(column);
        self.selected_transaction_index = 0;
    }

    /// The highlighted register row
    pub fn selected_transaction(&self) -> Option<&Transaction> {
        self.dashboard
            .sorted_transactions()
            .get(self.selected_transaction_index)
            .copied()
    }

    /// The highlighted budgets row
    pub fn selected_category(&self) -> Option<&Category> {
        self.dashboard.categories.get(self.selected_category_index)
    }

    // ---- dialogs ----

    pub fn open_add_transaction(&mut self) {
        if self.dashboard.categories.is_empty() {
            self.set_status("Add a category first (Budgets view, n)");
            return;
        }
        let month = self.dashboard.month;
        let count = self.dashboard.categories.len();
        self.transaction_form.prepare(month, count);
        self.open_dialog(ActiveDialog::AddTransaction);
    }

    pub fn open_add_category(&mut self) {
        self.category_form = CategoryFormState::new();
        self.open_dialog(ActiveDialog::AddCategory);
    }

    pub fn open_edit_budget(&mut self) {
        if let Some(category) = self.selected_category().cloned() {
            self.budget_form.init(&category);
            self.open_dialog(ActiveDialog::EditBudget);
        }
    }

    pub fn open_confirm_delete(&mut self) {
        if let Some(id) = self.selected_transaction().map(|t| t.id.clone()) {
            self.open_dialog(ActiveDialog::ConfirmDelete(id));
        }
    }

    /// Block until every outstanding request has been applied
    #[cfg(test)]
    pub(crate) fn settle(&mut self) {
        while self.is_loading() {
            match self.worker.recv() {
                Some(result) => self.handle_result(result),
                None => break,
            }
        }
    }
}
