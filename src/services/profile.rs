//! Profile viewer: fetches one user by identifier and tracks the view state.
//!
//! Every fetch is tagged with a [`FetchTicket`]. When the identifier changes
//! while a fetch is still in flight, the old ticket stops being current and
//! its result is dropped instead of overwriting the newer view.

use crate::domain::types::UserId;
use crate::domain::user::User;
use crate::dto::profile::ProfileView;
use crate::repository::UserReader;
use crate::repository::errors::RepositoryResult;

/// Message shown whenever the profile cannot be fetched.
pub const PROFILE_LOAD_FAILED: &str = "Failed to load the user profile.";

/// Tag identifying one fetch issued for one identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    id: UserId,
}

impl FetchTicket {
    /// Identifier the fetch was issued for.
    pub fn id(&self) -> &UserId {
        &self.id
    }
}

/// What happened to a resolved fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// The outcome became the current view.
    Applied,
    /// The ticket was superseded or already resolved; the view is untouched.
    Stale,
}

#[derive(Debug)]
struct ActiveFetch {
    ticket: FetchTicket,
    resolved: bool,
}

/// State machine behind the profile page.
#[derive(Debug)]
pub struct ProfileViewer {
    generation: u64,
    active: Option<ActiveFetch>,
    view: ProfileView,
}

impl ProfileViewer {
    /// Creates a viewer for the identifier found in the current route.
    ///
    /// Returns the ticket of the fetch to issue, if any.
    pub fn open(id: Option<&str>) -> (Self, Option<FetchTicket>) {
        let mut viewer = Self {
            generation: 0,
            active: None,
            view: ProfileView::NotFound,
        };
        let ticket = viewer.navigate(id);
        (viewer, ticket)
    }

    /// Reacts to a navigation.
    ///
    /// A missing or blank identifier ends in `NotFound` without a fetch. A new
    /// identifier switches to `Loading` and yields a ticket; the identifier
    /// already being shown yields nothing.
    pub fn navigate(&mut self, id: Option<&str>) -> Option<FetchTicket> {
        let Some(id) = id.and_then(|raw| UserId::new(raw).ok()) else {
            self.generation += 1;
            self.active = None;
            self.view = ProfileView::NotFound;
            return None;
        };

        if self
            .active
            .as_ref()
            .is_some_and(|active| active.ticket.id == id)
        {
            return None;
        }

        self.generation += 1;
        let ticket = FetchTicket {
            generation: self.generation,
            id,
        };
        self.active = Some(ActiveFetch {
            ticket: ticket.clone(),
            resolved: false,
        });
        self.view = ProfileView::Loading;

        Some(ticket)
    }

    /// Applies the outcome of the fetch identified by `ticket`.
    pub fn resolve(
        &mut self,
        ticket: &FetchTicket,
        outcome: RepositoryResult<Option<User>>,
    ) -> Resolution {
        let Some(active) = self
            .active
            .as_mut()
            .filter(|active| active.ticket == *ticket && !active.resolved)
        else {
            log::debug!(
                "Discarding stale profile response for user {} (generation {})",
                ticket.id,
                ticket.generation
            );
            return Resolution::Stale;
        };
        active.resolved = true;

        self.view = match outcome {
            Ok(Some(user)) => ProfileView::Loaded { user },
            Ok(None) => ProfileView::NotFound,
            Err(err) => {
                log::error!("Failed to load user profile {}: {err}", ticket.id);
                ProfileView::Error {
                    message: PROFILE_LOAD_FAILED.to_string(),
                }
            }
        };

        Resolution::Applied
    }

    pub fn view(&self) -> &ProfileView {
        &self.view
    }

    pub fn into_view(self) -> ProfileView {
        self.view
    }
}

/// Runs one navigation to completion and returns the final view.
pub async fn load_profile<R>(repo: &R, id: Option<&str>) -> ProfileView
where
    R: UserReader + ?Sized,
{
    let (mut viewer, ticket) = ProfileViewer::open(id);

    if let Some(ticket) = ticket {
        let outcome = repo.get_user_by_id(ticket.id()).await;
        viewer.resolve(&ticket, outcome);
    }

    viewer.into_view()
}
