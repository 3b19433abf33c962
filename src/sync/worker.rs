//! Background API worker
//!
//! A single thread owns the [`ExpenseApi`] client. The TUI sends it
//! [`Job`]s tagged with a [`Ticket`] and drains [`JobResult`]s on each tick,
//! so the event loop never blocks on the network.

use std::fmt;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

use log::{debug, warn};
use zeroize::Zeroizing;

use super::guard::Ticket;
use crate::api::{ExpenseApi, TokenValidation};
use crate::error::{CostbookError, CostbookResult};
use crate::models::{
    Category, CategoryId, Money, MonthRange, NewCategory, NewTransaction, Transaction,
    TransactionId,
};

/// Work sent to the background thread
pub enum Job {
    /// Check the stored token
    Validate,
    /// Log in, or register first when `register` is set
    SignIn {
        name: String,
        password: Zeroizing<String>,
        register: bool,
    },
    /// Forget the token
    SignOut,
    LoadCategories,
    LoadTransactions(MonthRange),
    CreateCategory(NewCategory),
    SetBudget(CategoryId, Money),
    CreateTransaction(NewTransaction),
    DeleteTransaction(TransactionId),
}

impl Job {
    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Self::Validate => "validate",
            Self::SignIn { register: true, .. } => "register",
            Self::SignIn { .. } => "login",
            Self::SignOut => "logout",
            Self::LoadCategories => "load categories",
            Self::LoadTransactions(_) => "load transactions",
            Self::CreateCategory(_) => "create category",
            Self::SetBudget(..) => "set budget",
            Self::CreateTransaction(_) => "create transaction",
            Self::DeleteTransaction(_) => "delete transaction",
        }
    }
}

impl fmt::Debug for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validate => f.write_str("Validate"),
            Self::SignIn { name, register, .. } => f
                .debug_struct("SignIn")
                .field("name", name)
                .field("password", &"<redacted>")
                .field("register", register)
                .finish(),
            Self::SignOut => f.write_str("SignOut"),
            Self::LoadCategories => f.write_str("LoadCategories"),
            Self::LoadTransactions(range) => f.debug_tuple("LoadTransactions").field(range).finish(),
            Self::CreateCategory(category) => f.debug_tuple("CreateCategory").field(category).finish(),
            Self::SetBudget(id, budget) => f.debug_tuple("SetBudget").field(id).field(budget).finish(),
            Self::CreateTransaction(txn) => f.debug_tuple("CreateTransaction").field(txn).finish(),
            Self::DeleteTransaction(id) => f.debug_tuple("DeleteTransaction").field(id).finish(),
        }
    }
}

/// Successful result of a job
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Validated(TokenValidation),
    SignedIn { token: String },
    SignedOut,
    Categories(Vec<Category>),
    Transactions(Vec<Transaction>),
    CategoryCreated(Category),
    BudgetSaved(Category),
    TransactionCreated(Transaction),
    TransactionDeleted(TransactionId),
}

/// A job's ticket together with its outcome
#[derive(Debug)]
pub struct JobResult {
    pub ticket: Ticket,
    pub outcome: CostbookResult<Outcome>,
}

/// Run one job against the client
pub fn execute(api: &mut dyn ExpenseApi, job: Job) -> CostbookResult<Outcome> {
    match job {
        Job::Validate => {
            let validation = api.validate()?;
            if !validation.valid {
                return Err(CostbookError::Unauthorized("auth token expired".into()));
            }
            Ok(Outcome::Validated(validation))
        }
        Job::SignIn {
            name,
            password,
            register,
        } => {
            let issued = if register {
                api.register(&name, &password)?
            } else {
                None
            };
            let token = match issued {
                Some(token) => token,
                None => api.login(&name, &password)?,
            };
            api.set_token(Some(token.clone()));
            Ok(Outcome::SignedIn { token })
        }
        Job::SignOut => {
            api.set_token(None);
            Ok(Outcome::SignedOut)
        }
        Job::LoadCategories => api.list_categories().map(Outcome::Categories),
        Job::LoadTransactions(range) => api.list_transactions(&range).map(Outcome::Transactions),
        Job::CreateCategory(category) => api.create_category(&category).map(Outcome::CategoryCreated),
        Job::SetBudget(id, budget) => api.set_category_budget(&id, budget).map(Outcome::BudgetSaved),
        Job::CreateTransaction(txn) => api
            .create_transaction(&txn)
            .map(Outcome::TransactionCreated),
        Job::DeleteTransaction(id) => {
            api.delete_transaction(&id)?;
            Ok(Outcome::TransactionDeleted(id))
        }
    }
}

/// Handle to the background thread
pub struct Worker {
    jobs: Sender<(Ticket, Job)>,
    results: Receiver<JobResult>,
    #[allow(dead_code)]
    handle: thread::JoinHandle<()>,
}

impl Worker {
    /// Spawn the worker, moving the client onto its thread
    pub fn spawn(mut api: Box<dyn ExpenseApi>) -> Self {
        let (jobs, job_rx) = mpsc::channel::<(Ticket, Job)>();
        let (result_tx, results) = mpsc::channel();

        let handle = thread::spawn(move || {
            for (ticket, job) in job_rx {
                let name = job.name();
                debug!("worker: {} ({} #{})", name, ticket.channel, ticket.generation);
                let outcome = execute(api.as_mut(), job);
                if let Err(e) = &outcome {
                    warn!("worker: {} failed: {}", name, e);
                }
                if result_tx.send(JobResult { ticket, outcome }).is_err() {
                    return;
                }
            }
        });

        Self {
            jobs,
            results,
            handle,
        }
    }

    /// Queue a job
    pub fn submit(&self, ticket: Ticket, job: Job) -> CostbookResult<()> {
        self.jobs
            .send((ticket, job))
            .map_err(|_| CostbookError::Tui("API worker has stopped".into()))
    }

    /// Collect every finished job without blocking
    pub fn drain(&self) -> Vec<JobResult> {
        let mut finished = Vec::new();
        loop {
            match self.results.try_recv() {
                Ok(result) => finished.push(result),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        finished
    }

    /// Wait for the next result (used by tests)
    pub fn recv(&self) -> Option<JobResult> {
        self.results.recv().ok()
    }
}


#[cfg(test)]
mod tests {
    use super::fake::FakeApi;
    use super::*;
    use crate::models::Month;
    use crate::sync::guard::{LoadChannel, LoadGuard};
    use chrono::NaiveDate;

    #[test]
    fn test_register_without_token_falls_back_to_login() {
        let mut api = FakeApi::default();
        let outcome = execute(
            &mut api,
            Job::SignIn {
                name: "ana".into(),
                password: Zeroizing::new("pw".into()),
                register: true,
            },
        )
        .unwrap();

        assert_eq!(outcome, Outcome::SignedIn { token: "good".into() });
        assert_eq!(api.token(), Some("good"));
        assert_eq!(
            api.state.lock().unwrap().requests,
            vec!["register".to_string(), "login".to_string()]
        );
    }

    #[test]
    fn test_register_with_token_skips_login() {
        let mut api = FakeApi::default();
        api.state.lock().unwrap().issue_token_on_register = true;
        execute(
            &mut api,
            Job::SignIn {
                name: "ana".into(),
                password: Zeroizing::new("pw".into()),
                register: true,
            },
        )
        .unwrap();
        assert_eq!(api.state.lock().unwrap().requests, vec!["register".to_string()]);
    }

    #[test]
    fn test_invalid_token_is_unauthorized() {
        let mut api = FakeApi::with_token("stale");
        let err = execute(&mut api, Job::Validate).unwrap_err();
        assert!(err.is_unauthorized());

        let err = execute(&mut api, Job::LoadCategories).unwrap_err();
        assert!(err.is_unauthorized());
    }

    #[test]
    fn test_worker_round_trip_keeps_tickets() {
        let api = FakeApi::with_token("good");
        api.state.lock().unwrap().transactions.push(Transaction::new(
            "t1",
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
            Money::from_major(10),
            "c1",
        ));
        let worker = Worker::spawn(Box::new(api));
        let mut guard = LoadGuard::new();

        let stale = guard.issue(LoadChannel::Transactions);
        worker
            .submit(stale, Job::LoadTransactions(Month::new(2024, 1).unwrap().range()))
            .unwrap();
        let fresh = guard.issue(LoadChannel::Transactions);
        worker
            .submit(fresh, Job::LoadTransactions(Month::new(2024, 2).unwrap().range()))
            .unwrap();

        let first = worker.recv().unwrap();
        let second = worker.recv().unwrap();
        assert_eq!(first.ticket, stale);
        assert!(!guard.is_current(&first.ticket));
        assert!(guard.is_current(&second.ticket));

        match second.outcome.unwrap() {
            Outcome::Transactions(txns) => assert_eq!(txns.len(), 1),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_debug_redacts_password() {
        let job = Job::SignIn {
            name: "ana".into(),
            password: Zeroizing::new("hunter2".into()),
            register: false,
        };
        let printed = format!("{:?}", job);
        assert!(printed.contains("ana"));
        assert!(printed.contains("<redacted>"));
        assert!(!printed.contains("hunter2"));
    }
}
