//! In-memory fest store with copy-on-begin transactions.
//!
//! The store mirrors the relational rules of the Postgres schema: unique
//! emails, registration numbers, team names and link pairs, foreign keys on
//! writes, and the same cascades on delete. A unit of work copies the state
//! when it begins and writes the copy back on commit; the last commit wins.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{EligibilityReader, RepositoryError, UnitOfWork, UnitOfWorkProvider};
use crate::domain::{
    Event, EventId, Link, LinkId, Pass, PassId, SupportTicket, SupportTicketId, Team, TeamId,
    User, UserId,
};

#[derive(Debug, Clone, Default)]
pub(super) struct FestState {
    pub(super) users: BTreeMap<UserId, User>,
    pub(super) passes: BTreeMap<PassId, Pass>,
    pub(super) events: BTreeMap<EventId, Event>,
    pub(super) teams: BTreeMap<TeamId, Team>,
    pub(super) tickets: BTreeMap<SupportTicketId, SupportTicket>,
    pub(super) links: Vec<(LinkId, Link)>,
}

impl FestState {
    /// Collect one side of every link accepted by `select`.
    pub(super) fn linked<T>(&self, select: impl Fn(&Link) -> Option<T>) -> Vec<T> {
        self.links.iter().filter_map(|(_, link)| select(link)).collect()
    }

    pub(super) fn check_user(&self, user: &User) -> Result<(), RepositoryError> {
        let clash = self.users.values().find(|other| {
            other.id != user.id
                && (other.email_address == user.email_address
                    || (user.registration_number.is_some()
                        && other.registration_number == user.registration_number))
        });
        if let Some(other) = clash {
            return Err(RepositoryError::unique_violation(format!(
                "user {} already uses that email address or registration number",
                other.id
            )));
        }
        if let Some(pass_id) = user
            .pass_id
            .as_ref()
            .filter(|id| !self.passes.contains_key(*id))
        {
            return Err(RepositoryError::foreign_key_violation(format!(
                "pass {pass_id} does not exist"
            )));
        }
        Ok(())
    }

    pub(super) fn check_event(&self, event: &Event) -> Result<(), RepositoryError> {
        if let Some(organizer_id) = event
            .organizer_id
            .as_ref()
            .filter(|id| !self.users.contains_key(*id))
        {
            return Err(RepositoryError::foreign_key_violation(format!(
                "user {organizer_id} does not exist"
            )));
        }
        Ok(())
    }

    pub(super) fn check_team(&self, team: &Team) -> Result<(), RepositoryError> {
        if self
            .teams
            .values()
            .any(|other| other.id != team.id && other.name == team.name)
        {
            return Err(RepositoryError::unique_violation(format!(
                "team name {} is taken",
                team.name
            )));
        }
        if !self.users.contains_key(&team.host_id) {
            return Err(RepositoryError::foreign_key_violation(format!(
                "user {} does not exist",
                team.host_id
            )));
        }
        Ok(())
    }

    fn check_link(&self, link: &Link) -> Result<(), RepositoryError> {
        let endpoints_exist = match link {
            Link::PassEvent { pass_id, event_id } => {
                self.passes.contains_key(pass_id) && self.events.contains_key(event_id)
            }
            Link::TeamUser { team_id, user_id } => {
                self.teams.contains_key(team_id) && self.users.contains_key(user_id)
            }
            Link::TeamEvent { team_id, event_id } => {
                self.teams.contains_key(team_id) && self.events.contains_key(event_id)
            }
            Link::UserEvent { user_id, event_id } => {
                self.users.contains_key(user_id) && self.events.contains_key(event_id)
            }
        };
        if !endpoints_exist {
            return Err(RepositoryError::foreign_key_violation(format!(
                "{link} references a missing record"
            )));
        }
        if self.links.iter().any(|(_, existing)| existing == link) {
            return Err(RepositoryError::unique_violation(format!(
                "{link} already exists"
            )));
        }
        Ok(())
    }

    pub(super) fn remove_user(&mut self, id: &UserId) -> Option<User> {
        let user = self.users.remove(id)?;
        let hosted: Vec<TeamId> = self
            .teams
            .values()
            .filter(|team| &team.host_id == id)
            .map(|team| team.id.clone())
            .collect();
        for team_id in &hosted {
            self.remove_team(team_id);
        }
        for event in self.events.values_mut() {
            if event.organizer_id.as_ref() == Some(id) {
                event.organizer_id = None;
            }
        }
        self.links.retain(|(_, link)| match link {
            Link::TeamUser { user_id, .. } | Link::UserEvent { user_id, .. } => user_id != id,
            _ => true,
        });
        Some(user)
    }

    pub(super) fn remove_pass(&mut self, id: &PassId) -> Option<Pass> {
        let pass = self.passes.remove(id)?;
        for user in self.users.values_mut() {
            if user.pass_id.as_ref() == Some(id) {
                user.pass_id = None;
            }
        }
        self.links.retain(|(_, link)| match link {
            Link::PassEvent { pass_id, .. } => pass_id != id,
            _ => true,
        });
        Some(pass)
    }

    pub(super) fn remove_event(&mut self, id: &EventId) -> Option<Event> {
        let event = self.events.remove(id)?;
        self.links.retain(|(_, link)| match link {
            Link::PassEvent { event_id, .. }
            | Link::TeamEvent { event_id, .. }
            | Link::UserEvent { event_id, .. } => event_id != id,
            Link::TeamUser { .. } => true,
        });
        Some(event)
    }

    pub(super) fn remove_team(&mut self, id: &TeamId) -> Option<Team> {
        let team = self.teams.remove(id)?;
        self.links.retain(|(_, link)| match link {
            Link::TeamUser { team_id, .. } | Link::TeamEvent { team_id, .. } => team_id != id,
            _ => true,
        });
        Some(team)
    }
}

/// Shared in-memory store. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFestStore {
    state: Arc<Mutex<FestState>>,
}

impl InMemoryFestStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(super) fn lock(&self) -> Result<MutexGuard<'_, FestState>, RepositoryError> {
        self.state
            .lock()
            .map_err(|_| RepositoryError::query("in-memory store lock poisoned"))
    }

    /// Whether `link` is currently stored.
    pub fn contains_link(&self, link: &Link) -> bool {
        self.lock()
            .map(|state| state.links.iter().any(|(_, existing)| existing == link))
            .unwrap_or(false)
    }

    /// Number of stored links of every kind.
    pub fn link_count(&self) -> usize {
        self.lock().map(|state| state.links.len()).unwrap_or(0)
    }
}

#[async_trait]
impl UnitOfWorkProvider for InMemoryFestStore {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>, RepositoryError> {
        let working = self.lock()?.clone();
        Ok(Box::new(InMemoryUnitOfWork {
            store: self.clone(),
            working,
        }))
    }
}

/// Private copy of the store state, published on commit.
#[derive(Debug)]
pub struct InMemoryUnitOfWork {
    store: InMemoryFestStore,
    working: FestState,
}

#[async_trait]
impl EligibilityReader for InMemoryUnitOfWork {
    async fn event_pass_ids(
        &mut self,
        event_id: &EventId,
    ) -> Result<Vec<PassId>, RepositoryError> {
        Ok(self.working.linked(|link| match link {
            Link::PassEvent {
                pass_id,
                event_id: linked,
            } if linked == event_id => Some(pass_id.clone()),
            _ => None,
        }))
    }

    async fn user_pass_id(&mut self, user_id: &UserId) -> Result<Option<PassId>, RepositoryError> {
        Ok(self
            .working
            .users
            .get(user_id)
            .and_then(|user| user.pass_id.clone()))
    }

    async fn team_host_id(&mut self, team_id: &TeamId) -> Result<Option<UserId>, RepositoryError> {
        Ok(self
            .working
            .teams
            .get(team_id)
            .map(|team| team.host_id.clone()))
    }

    async fn team_member_ids(
        &mut self,
        team_id: &TeamId,
    ) -> Result<Vec<UserId>, RepositoryError> {
        Ok(self.working.linked(|link| match link {
            Link::TeamUser {
                team_id: linked,
                user_id,
            } if linked == team_id => Some(user_id.clone()),
            _ => None,
        }))
    }

    async fn team_event_ids(
        &mut self,
        team_id: &TeamId,
    ) -> Result<Vec<EventId>, RepositoryError> {
        Ok(self.working.linked(|link| match link {
            Link::TeamEvent {
                team_id: linked,
                event_id,
            } if linked == team_id => Some(event_id.clone()),
            _ => None,
        }))
    }
}

#[async_trait]
impl UnitOfWork for InMemoryUnitOfWork {
    async fn insert_link(&mut self, link: &Link, id: &LinkId) -> Result<(), RepositoryError> {
        self.working.check_link(link)?;
        self.working.links.push((id.clone(), link.clone()));
        Ok(())
    }

    async fn delete_link(&mut self, link: &Link) -> Result<Option<LinkId>, RepositoryError> {
        let position = self
            .working
            .links
            .iter()
            .position(|(_, existing)| existing == link);
        Ok(position.map(|index| self.working.links.remove(index).0))
    }

    async fn commit(self: Box<Self>) -> Result<(), RepositoryError> {
        let Self { store, working } = *self;
        *store.lock()? = working;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), RepositoryError> {
        Ok(())
    }
}
