//! Event types, stored at `eventTypes/state`.

use qrportal_client::{EventCategory, EventType};
use qrportal_flux::{Outcome, Slice};
use serde::Serialize;

use super::op::OpStatus;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTypesSlice {
    /// Status of the list fetch.
    pub status: OpStatus,
    /// Status of the last create, update or delete.
    pub mutation: OpStatus,
    pub event_types: Vec<EventType>,
    pub generation: u64,
}

#[derive(Debug, Clone)]
pub enum EventTypesAction {
    ListStarted { generation: u64 },
    ListFulfilled { generation: u64, event_types: Vec<EventType> },
    ListRejected { generation: u64, error: String },
    MutationStarted { message: &'static str },
    Created(EventType),
    /// Replaces the entry with the same name. The stored category wins.
    Updated(EventType),
    Removed { name: String },
    MutationRejected { error: String },
    Reset { generation: u64 },
}

impl Slice for EventTypesSlice {
    const PATH: &'static str = "eventTypes/state";
    type Action = EventTypesAction;

    fn reduce(&mut self, action: EventTypesAction) -> Outcome {
        match action {
            EventTypesAction::ListStarted { generation } => {
                if generation <= self.generation {
                    return Outcome::Ignored;
                }
                self.generation = generation;
                self.status.start("Fetching event types...");
            }
            EventTypesAction::ListFulfilled {
                generation,
                event_types,
            } => {
                if generation != self.generation {
                    return Outcome::Ignored;
                }
                self.event_types = event_types;
                self.status.succeed();
            }
            EventTypesAction::ListRejected { generation, error } => {
                if generation != self.generation {
                    return Outcome::Ignored;
                }
                self.status.fail(error);
            }
            EventTypesAction::MutationStarted { message } => {
                self.mutation.start(message);
            }
            EventTypesAction::Created(event_type) => {
                match self.position(&event_type.event_type_name) {
                    Some(i) => self.event_types[i] = event_type,
                    None => self.event_types.push(event_type),
                }
                self.mutation.succeed();
            }
            EventTypesAction::Updated(mut event_type) => {
                if let Some(i) = self.position(&event_type.event_type_name) {
                    event_type.category = self.event_types[i].category;
                    self.event_types[i] = event_type;
                }
                self.mutation.succeed();
            }
            EventTypesAction::Removed { name } => {
                self.event_types.retain(|et| et.event_type_name != name);
                self.mutation.succeed();
            }
            EventTypesAction::MutationRejected { error } => {
                self.mutation.fail(error);
            }
            EventTypesAction::Reset { generation } => {
                *self = EventTypesSlice {
                    generation: generation.max(self.generation),
                    ..Default::default()
                };
            }
        }
        Outcome::Applied
    }
}

impl EventTypesSlice {
    fn position(&self, name: &str) -> Option<usize> {
        self.event_types
            .iter()
            .position(|et| et.event_type_name == name)
    }

    pub fn find(&self, name: &str) -> Option<&EventType> {
        self.position(name).map(|i| &self.event_types[i])
    }

    /// First seeded entry of a system category.
    pub fn first_of(&self, category: EventCategory) -> Option<&EventType> {
        self.event_types.iter().find(|et| et.category == category)
    }

    pub fn general(&self) -> impl Iterator<Item = &EventType> {
        self.event_types
            .iter()
            .filter(|et| et.category == EventCategory::General)
    }

    pub fn system(&self) -> impl Iterator<Item = &EventType> {
        self.event_types.iter().filter(|et| et.category.is_system())
    }
}
