//! Repository ports over [`InMemoryFestStore`].

use async_trait::async_trait;

use super::fest_store::InMemoryFestStore;
use crate::domain::ports::{
    AssociationRepository, EventRepository, PassRepository, RepositoryError,
    SupportTicketRepository, TeamRepository, UserRepository,
};
use crate::domain::{
    Event, EventId, EventPatch, Link, Pass, PassId, PassPatch, SupportTicket, SupportTicketId,
    SupportTicketPatch, Team, TeamId, TeamPatch, User, UserId, UserPatch,
};

fn duplicate(kind: &str, id: &impl std::fmt::Display) -> RepositoryError {
    RepositoryError::unique_violation(format!("{kind} {id} already exists"))
}

#[async_trait]
impl UserRepository for InMemoryFestStore {
    async fn create(&self, user: &User) -> Result<(), RepositoryError> {
        let mut state = self.lock()?;
        if state.users.contains_key(&user.id) {
            return Err(duplicate("user", &user.id));
        }
        state.check_user(user)?;
        state.users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self.lock()?.users.get(id).cloned())
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, RepositoryError> {
        let state = self.lock()?;
        Ok(ids.iter().filter_map(|id| state.users.get(id).cloned()).collect())
    }

    async fn find_id_by_email(
        &self,
        email_address: &str,
    ) -> Result<Option<UserId>, RepositoryError> {
        Ok(self
            .lock()?
            .users
            .values()
            .find(|user| user.email_address == email_address)
            .map(|user| user.id.clone()))
    }

    async fn find_id_by_registration_number(
        &self,
        registration_number: i64,
    ) -> Result<Option<UserId>, RepositoryError> {
        Ok(self
            .lock()?
            .users
            .values()
            .find(|user| user.registration_number == Some(registration_number))
            .map(|user| user.id.clone()))
    }

    async fn update(
        &self,
        id: &UserId,
        patch: &UserPatch,
    ) -> Result<Option<User>, RepositoryError> {
        let mut state = self.lock()?;
        let Some(mut user) = state.users.get(id).cloned() else {
            return Ok(None);
        };
        patch.apply_to(&mut user);
        state.check_user(&user)?;
        state.users.insert(id.clone(), user.clone());
        Ok(Some(user))
    }

    async fn delete(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self.lock()?.remove_user(id))
    }
}

#[async_trait]
impl PassRepository for InMemoryFestStore {
    async fn create(&self, pass: &Pass) -> Result<(), RepositoryError> {
        let mut state = self.lock()?;
        if state.passes.contains_key(&pass.id) {
            return Err(duplicate("pass", &pass.id));
        }
        state.passes.insert(pass.id.clone(), pass.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &PassId) -> Result<Option<Pass>, RepositoryError> {
        Ok(self.lock()?.passes.get(id).cloned())
    }

    async fn find_by_ids(&self, ids: &[PassId]) -> Result<Vec<Pass>, RepositoryError> {
        let state = self.lock()?;
        Ok(ids.iter().filter_map(|id| state.passes.get(id).cloned()).collect())
    }

    async fn list_all(&self) -> Result<Vec<Pass>, RepositoryError> {
        Ok(self.lock()?.passes.values().cloned().collect())
    }

    async fn update(
        &self,
        id: &PassId,
        patch: &PassPatch,
    ) -> Result<Option<Pass>, RepositoryError> {
        let mut state = self.lock()?;
        Ok(state.passes.get_mut(id).map(|pass| {
            patch.apply_to(pass);
            pass.clone()
        }))
    }

    async fn delete(&self, id: &PassId) -> Result<Option<Pass>, RepositoryError> {
        Ok(self.lock()?.remove_pass(id))
    }
}

#[async_trait]
impl EventRepository for InMemoryFestStore {
    async fn create(&self, event: &Event) -> Result<(), RepositoryError> {
        let mut state = self.lock()?;
        if state.events.contains_key(&event.id) {
            return Err(duplicate("event", &event.id));
        }
        state.check_event(event)?;
        state.events.insert(event.id.clone(), event.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>, RepositoryError> {
        Ok(self.lock()?.events.get(id).cloned())
    }

    async fn find_by_ids(&self, ids: &[EventId]) -> Result<Vec<Event>, RepositoryError> {
        let state = self.lock()?;
        Ok(ids.iter().filter_map(|id| state.events.get(id).cloned()).collect())
    }

    async fn list_all(&self) -> Result<Vec<Event>, RepositoryError> {
        Ok(self.lock()?.events.values().cloned().collect())
    }

    async fn find_by_organizer(
        &self,
        organizer_id: &UserId,
    ) -> Result<Vec<Event>, RepositoryError> {
        Ok(self
            .lock()?
            .events
            .values()
            .filter(|event| event.organizer_id.as_ref() == Some(organizer_id))
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        id: &EventId,
        patch: &EventPatch,
    ) -> Result<Option<Event>, RepositoryError> {
        let mut state = self.lock()?;
        let Some(mut event) = state.events.get(id).cloned() else {
            return Ok(None);
        };
        patch.apply_to(&mut event);
        state.check_event(&event)?;
        state.events.insert(id.clone(), event.clone());
        Ok(Some(event))
    }

    async fn delete(&self, id: &EventId) -> Result<Option<Event>, RepositoryError> {
        Ok(self.lock()?.remove_event(id))
    }
}

#[async_trait]
impl TeamRepository for InMemoryFestStore {
    async fn create(&self, team: &Team) -> Result<(), RepositoryError> {
        let mut state = self.lock()?;
        if state.teams.contains_key(&team.id) {
            return Err(duplicate("team", &team.id));
        }
        state.check_team(team)?;
        state.teams.insert(team.id.clone(), team.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &TeamId) -> Result<Option<Team>, RepositoryError> {
        Ok(self.lock()?.teams.get(id).cloned())
    }

    async fn find_by_ids(&self, ids: &[TeamId]) -> Result<Vec<Team>, RepositoryError> {
        let state = self.lock()?;
        Ok(ids.iter().filter_map(|id| state.teams.get(id).cloned()).collect())
    }

    async fn find_by_host(&self, host_id: &UserId) -> Result<Vec<Team>, RepositoryError> {
        Ok(self
            .lock()?
            .teams
            .values()
            .filter(|team| &team.host_id == host_id)
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        id: &TeamId,
        patch: &TeamPatch,
    ) -> Result<Option<Team>, RepositoryError> {
        let mut state = self.lock()?;
        let Some(mut team) = state.teams.get(id).cloned() else {
            return Ok(None);
        };
        patch.apply_to(&mut team);
        state.check_team(&team)?;
        state.teams.insert(id.clone(), team.clone());
        Ok(Some(team))
    }

    async fn delete(&self, id: &TeamId) -> Result<Option<Team>, RepositoryError> {
        Ok(self.lock()?.remove_team(id))
    }
}

#[async_trait]
impl SupportTicketRepository for InMemoryFestStore {
    async fn create(&self, ticket: &SupportTicket) -> Result<(), RepositoryError> {
        let mut state = self.lock()?;
        if state.tickets.contains_key(&ticket.id) {
            return Err(duplicate("support ticket", &ticket.id));
        }
        state.tickets.insert(ticket.id.clone(), ticket.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &SupportTicketId,
    ) -> Result<Option<SupportTicket>, RepositoryError> {
        Ok(self.lock()?.tickets.get(id).cloned())
    }

    async fn update(
        &self,
        id: &SupportTicketId,
        patch: &SupportTicketPatch,
    ) -> Result<Option<SupportTicket>, RepositoryError> {
        let mut state = self.lock()?;
        Ok(state.tickets.get_mut(id).map(|ticket| {
            patch.apply_to(ticket);
            ticket.clone()
        }))
    }

    async fn delete(
        &self,
        id: &SupportTicketId,
    ) -> Result<Option<SupportTicket>, RepositoryError> {
        Ok(self.lock()?.tickets.remove(id))
    }
}

#[async_trait]
impl AssociationRepository for InMemoryFestStore {
    async fn pass_event_ids(&self, pass_id: &PassId) -> Result<Vec<EventId>, RepositoryError> {
        Ok(self.lock()?.linked(|link| match link {
            Link::PassEvent {
                pass_id: linked,
                event_id,
            } if linked == pass_id => Some(event_id.clone()),
            _ => None,
        }))
    }

    async fn event_pass_ids(&self, event_id: &EventId) -> Result<Vec<PassId>, RepositoryError> {
        Ok(self.lock()?.linked(|link| match link {
            Link::PassEvent {
                pass_id,
                event_id: linked,
            } if linked == event_id => Some(pass_id.clone()),
            _ => None,
        }))
    }

    async fn user_team_ids(&self, user_id: &UserId) -> Result<Vec<TeamId>, RepositoryError> {
        Ok(self.lock()?.linked(|link| match link {
            Link::TeamUser {
                team_id,
                user_id: linked,
            } if linked == user_id => Some(team_id.clone()),
            _ => None,
        }))
    }

    async fn user_event_ids(&self, user_id: &UserId) -> Result<Vec<EventId>, RepositoryError> {
        Ok(self.lock()?.linked(|link| match link {
            Link::UserEvent {
                user_id: linked,
                event_id,
            } if linked == user_id => Some(event_id.clone()),
            _ => None,
        }))
    }

    async fn team_user_ids(&self, team_id: &TeamId) -> Result<Vec<UserId>, RepositoryError> {
        Ok(self.lock()?.linked(|link| match link {
            Link::TeamUser {
                team_id: linked,
                user_id,
            } if linked == team_id => Some(user_id.clone()),
            _ => None,
        }))
    }

    async fn team_event_ids(&self, team_id: &TeamId) -> Result<Vec<EventId>, RepositoryError> {
        Ok(self.lock()?.linked(|link| match link {
            Link::TeamEvent {
                team_id: linked,
                event_id,
            } if linked == team_id => Some(event_id.clone()),
            _ => None,
        }))
    }

    async fn event_team_ids(&self, event_id: &EventId) -> Result<Vec<TeamId>, RepositoryError> {
        Ok(self.lock()?.linked(|link| match link {
            Link::TeamEvent {
                team_id,
                event_id: linked,
            } if linked == event_id => Some(team_id.clone()),
            _ => None,
        }))
    }

    async fn event_user_ids(&self, event_id: &EventId) -> Result<Vec<UserId>, RepositoryError> {
        Ok(self.lock()?.linked(|link| match link {
            Link::UserEvent {
                user_id,
                event_id: linked,
            } if linked == event_id => Some(user_id.clone()),
            _ => None,
        }))
    }
}
