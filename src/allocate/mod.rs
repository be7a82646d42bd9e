//! Buckets a round's attendees into per-category, per-room attendee lists.
//!
//! Within a category the rows are ordered by scheduling priority: every
//! room's team speakers and chair come first (room by room, in draw order),
//! then every panellist, then every trainee. Batches are capped in size, so
//! this keeps the people a debate cannot run without at the front.

use serde::Serialize;

use crate::{
    error::Result,
    tournaments::{
        ParticipantId, TeamId,
        rooms::{
            Categories, Category, Venue, VenueIndex,
            categories::UNCATEGORISED,
        },
        rounds::Room,
    },
};

pub mod batch;
pub mod leftovers;

pub use batch::{Batch, MAX_BATCH_SIZE};
pub use leftovers::{NameLookup, ReconciledRow, reconcile};

/// Where attendee emails come from: a [`ResolutionMap`] built ahead of the
/// round, or a live participant store.
///
/// Participants with no known email are left out; that is not an error.
///
/// [`ResolutionMap`]: crate::resolve::ResolutionMap
pub trait IdentitySource {
    fn team_emails(&mut self, team: TeamId) -> Result<Vec<String>>;

    /// Emails of `participants`, in the order the ids were given.
    fn participant_emails(
        &mut self,
        participants: &[ParticipantId],
    ) -> Result<Vec<String>>;
}

impl<T: IdentitySource + ?Sized> IdentitySource for &mut T {
    fn team_emails(&mut self, team: TeamId) -> Result<Vec<String>> {
        (**self).team_emails(team)
    }

    fn participant_emails(
        &mut self,
        participants: &[ParticipantId],
    ) -> Result<Vec<String>> {
        (**self).participant_emails(participants)
    }
}

/// One line of a pre-assignment file.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct AllocationRow {
    pub venue: String,
    pub email: String,
}

impl AllocationRow {
    pub fn new(venue: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            venue: venue.into(),
            email: email.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Allocation {
    pub category: Category,
    pub rows: Vec<AllocationRow>,
}

impl Allocation {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// A category's rows while the draw is being walked.
struct Bucket {
    category: Category,
    primary: Vec<AllocationRow>,
    panellists: Vec<AllocationRow>,
    trainees: Vec<AllocationRow>,
}

impl Bucket {
    fn new(category: Category) -> Self {
        Self {
            category,
            primary: Vec::new(),
            panellists: Vec::new(),
            trainees: Vec::new(),
        }
    }

    fn into_allocation(self) -> Allocation {
        let mut rows = self.primary;
        rows.extend(self.panellists);
        rows.extend(self.trainees);
        Allocation {
            category: self.category,
            rows,
        }
    }
}

fn push_rows(rows: &mut Vec<AllocationRow>, venue: &str, emails: Vec<String>) {
    rows.extend(
        emails
            .into_iter()
            .map(|email| AllocationRow::new(venue, email)),
    );
}

/// Allocates every attendee of `rooms` to their room.
///
/// Returns one allocation per configured category, in configured order,
/// followed by the uncategorised allocation. Venues which match no category
/// are logged and allocated as uncategorised. A failing identity lookup
/// aborts the whole allocation, as a room with a silently incomplete set of
/// attendees is worse than none.
#[tracing::instrument(skip_all, fields(rooms = rooms.len()))]
pub fn allocate(
    mut identities: impl IdentitySource,
    venues: &[Venue],
    rooms: &[Room],
    categories: &Categories,
) -> Result<Vec<Allocation>> {
    let index = VenueIndex::new(venues);

    let mut buckets = categories
        .iter()
        .cloned()
        .map(Bucket::new)
        .collect::<Vec<_>>();
    let uncategorised = buckets.len();
    buckets.push(Bucket::new(UNCATEGORISED.clone()));

    for room in rooms {
        let venue = index.name_or_id(room.venue_id);
        let bucket = match categories.classify(&venue) {
            Ok(Some(position)) => &mut buckets[position],
            Ok(None) => &mut buckets[uncategorised],
            Err(e) => {
                tracing::warn!("{e}");
                &mut buckets[uncategorised]
            }
        };

        for team in &room.team_ids {
            let emails = identities.team_emails(*team)?;
            if emails.is_empty() {
                tracing::debug!("no emails for team {team} in {venue}");
            }
            push_rows(&mut bucket.primary, &venue, emails);
        }

        if let Some(chair) = room.chair_id {
            let emails = identities.participant_emails(&[chair])?;
            push_rows(&mut bucket.primary, &venue, emails);
        }

        let emails = identities.participant_emails(&room.panellist_ids)?;
        push_rows(&mut bucket.panellists, &venue, emails);

        let emails = identities.participant_emails(&room.trainee_ids)?;
        push_rows(&mut bucket.trainees, &venue, emails);
    }

    let allocations = buckets
        .into_iter()
        .map(Bucket::into_allocation)
        .collect::<Vec<_>>();

    for allocation in &allocations {
        tracing::info!(
            "category {:?}: {} rows",
            allocation.category.name,
            allocation.len()
        );
    }

    Ok(allocations)
}
