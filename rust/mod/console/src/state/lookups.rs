//! Lookup lists used by the QR form and search: sessions and employees.

use qrportal_client::{Employee, Session};
use qrportal_flux::{Outcome, Slice};
use serde::Serialize;

use super::op::OpStatus;

/// Stored at `sessions/state`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionsSlice {
    pub status: OpStatus,
    pub sessions: Vec<Session>,
}

#[derive(Debug, Clone)]
pub enum SessionsAction {
    Started,
    Fulfilled(Vec<Session>),
    Rejected(String),
    Reset,
}

impl Slice for SessionsSlice {
    const PATH: &'static str = "sessions/state";
    type Action = SessionsAction;

    fn reduce(&mut self, action: SessionsAction) -> Outcome {
        match action {
            SessionsAction::Started => self.status.start("Fetching sessions..."),
            SessionsAction::Fulfilled(sessions) => {
                self.sessions = sessions;
                self.status.succeed();
            }
            SessionsAction::Rejected(error) => self.status.fail(error),
            SessionsAction::Reset => *self = Self::default(),
        }
        Outcome::Applied
    }
}

impl SessionsSlice {
    pub fn find(&self, id: &str) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id == id)
    }
}

/// Stored at `employees/state`. Fetches are generation-guarded like the QR list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EmployeesSlice {
    pub status: OpStatus,
    pub employees: Vec<Employee>,
    pub generation: u64,
}

#[derive(Debug, Clone)]
pub enum EmployeesAction {
    Started { generation: u64 },
    Fulfilled { generation: u64, employees: Vec<Employee> },
    Rejected { generation: u64, error: String },
    Reset { generation: u64 },
}

impl Slice for EmployeesSlice {
    const PATH: &'static str = "employees/state";
    type Action = EmployeesAction;

    fn reduce(&mut self, action: EmployeesAction) -> Outcome {
        match action {
            EmployeesAction::Started { generation } => {
                if generation <= self.generation {
                    return Outcome::Ignored;
                }
                self.generation = generation;
                self.status.start("Fetching employees...");
            }
            EmployeesAction::Fulfilled {
                generation,
                employees,
            } => {
                if generation != self.generation {
                    return Outcome::Ignored;
                }
                self.employees = employees;
                self.status.succeed();
            }
            EmployeesAction::Rejected { generation, error } => {
                if generation != self.generation {
                    return Outcome::Ignored;
                }
                self.status.fail(error);
            }
            EmployeesAction::Reset { generation } => {
                *self = EmployeesSlice {
                    generation: generation.max(self.generation),
                    ..Default::default()
                };
            }
        }
        Outcome::Applied
    }
}
