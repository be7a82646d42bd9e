//! The local participant store: a SQLite copy of the tournament roster,
//! plus the chat identities participants bind at registration.

use std::collections::HashMap;

use diesel::{prelude::*, sqlite::Sqlite, upsert::excluded};
use diesel_migrations::MigrationHarness;
use serde::Serialize;

use crate::{
    MIGRATIONS,
    allocate::{IdentitySource, NameLookup},
    error::{Error, Result},
    schema::{participants, team_members},
    tournaments::{Participant, ParticipantId, Role, Team, TeamId},
    validation::is_valid_email,
};

#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = participants)]
#[diesel(check_for_backend(Sqlite))]
pub struct StoredParticipant {
    pub id: i64,
    pub barcode: Option<String>,
    pub name: String,
    pub email: Option<String>,
    pub kind: String,
    pub chat_id: Option<String>,
    pub url_key: Option<String>,
}

impl StoredParticipant {
    fn of(participant: &Participant) -> Self {
        Self {
            id: db_id(participant.id),
            barcode: participant.barcode.clone(),
            name: participant.name.clone(),
            email: Some(participant.email.clone()).filter(|e| !e.is_empty()),
            kind: participant.role.as_str().to_string(),
            chat_id: None,
            url_key: participant.url_key.clone(),
        }
    }

    pub fn role(&self) -> Role {
        match self.kind.as_str() {
            "speaker" => Role::Speaker,
            _ => Role::Adjudicator,
        }
    }
}

/// A participant whose chat identity is known.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct BoundParticipant {
    pub id: ParticipantId,
    /// `[<team emoji>] <name>`, or `[J] <name>` for adjudicators.
    pub label: String,
    pub role: Role,
}

fn db_id(id: u64) -> i64 {
    id as i64
}

/// Shortens every name but the first to an initial: `Jane Mary Doe` becomes
/// `Jane M D`.
pub fn redact_name(name: &str) -> String {
    let mut words = name.split_whitespace();
    let Some(first) = words.next() else {
        return String::new();
    };

    std::iter::once(first.to_string())
        .chain(words.filter_map(|word| {
            word.chars().next().map(|c| c.to_uppercase().to_string())
        }))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn redact_names(participants: &mut [Participant]) {
    for participant in participants {
        participant.name = redact_name(&participant.name);
    }
}

pub struct ParticipantStore {
    conn: SqliteConnection,
}

impl ParticipantStore {
    /// Opens (creating if needed) the store at `database_url` and brings its
    /// schema up to date.
    pub fn open(database_url: &str) -> Result<Self> {
        let mut conn = SqliteConnection::establish(database_url)?;
        conn.run_pending_migrations(MIGRATIONS)
            .map_err(|e| Error::Migration(e.to_string()))?;
        tracing::debug!("opened participant store at {database_url}");
        Ok(Self { conn })
    }

    pub fn in_memory() -> Result<Self> {
        Self::open(":memory:")
    }

    /// Removes every participant and team.
    pub fn reset(&mut self) -> Result<()> {
        self.conn.transaction::<_, Error, _>(|conn| {
            diesel::delete(team_members::table).execute(conn)?;
            diesel::delete(participants::table).execute(conn)?;
            Ok(())
        })
    }

    #[tracing::instrument(skip_all, fields(teams = teams.len()))]
    pub fn add_teams(&mut self, teams: &[Team]) -> Result<()> {
        self.conn.transaction::<_, Error, _>(|conn| {
            for team in teams {
                upsert_participants(conn, &team.speakers)?;

                // A re-import replaces the team's line-up outright, so
                // withdrawn or moved speakers drop off it.
                diesel::delete(
                    team_members::table
                        .filter(team_members::team_id.eq(db_id(team.id))),
                )
                .execute(conn)?;

                for (position, speaker) in team.speakers.iter().enumerate() {
                    diesel::replace_into(team_members::table)
                        .values((
                            team_members::team_id.eq(db_id(team.id)),
                            team_members::participant_id.eq(db_id(speaker.id)),
                            team_members::emoji.eq(&team.emoji),
                            team_members::position.eq(position as i64),
                        ))
                        .execute(conn)?;
                }
            }
            Ok(())
        })?;

        tracing::info!("inserted {} teams into the store", teams.len());
        Ok(())
    }

    #[tracing::instrument(skip_all, fields(adjudicators = adjudicators.len()))]
    pub fn add_adjudicators(
        &mut self,
        adjudicators: &[Participant],
    ) -> Result<()> {
        self.conn.transaction::<_, Error, _>(|conn| {
            upsert_participants(conn, adjudicators)
        })?;

        tracing::info!(
            "inserted {} adjudicators into the store",
            adjudicators.len()
        );
        Ok(())
    }

    pub fn participant(
        &mut self,
        id: ParticipantId,
    ) -> Result<Option<StoredParticipant>> {
        Ok(participants::table
            .find(db_id(id))
            .select(StoredParticipant::as_select())
            .first(&mut self.conn)
            .optional()?)
    }

    pub fn name_from_email(&mut self, email: &str) -> Result<Option<String>> {
        Ok(participants::table
            .filter(participants::email.eq(email))
            .order_by(participants::id.asc())
            .select(participants::name)
            .first::<String>(&mut self.conn)
            .optional()?)
    }

    /// Binds `chat_id` to the participant whose registration code is
    /// `barcode`. Binding only happens once per participant and once per
    /// chat identity.
    #[tracing::instrument(skip(self))]
    pub fn bind_chat_identity(
        &mut self,
        barcode: &str,
        chat_id: &str,
    ) -> Result<BoundParticipant> {
        self.conn.transaction::<_, Error, _>(|conn| {
            let chat_id_taken = participants::table
                .filter(participants::chat_id.eq(chat_id))
                .count()
                .get_result::<i64>(conn)?
                > 0;

            let participant = participants::table
                .filter(participants::barcode.eq(barcode))
                .filter(participants::chat_id.is_null())
                .select(StoredParticipant::as_select())
                .first(conn)
                .optional()?;

            let participant = match participant {
                Some(participant) if !chat_id_taken => participant,
                _ => {
                    return Err(Error::NotBindable {
                        barcode: barcode.to_string(),
                    });
                }
            };

            diesel::update(participants::table.find(participant.id))
                .set(participants::chat_id.eq(chat_id))
                .execute(conn)?;

            bound(conn, participant)
        })
    }

    pub fn participant_from_chat_identity(
        &mut self,
        chat_id: &str,
    ) -> Result<Option<BoundParticipant>> {
        let participant = participants::table
            .filter(participants::chat_id.eq(chat_id))
            .select(StoredParticipant::as_select())
            .first(&mut self.conn)
            .optional()?;

        participant
            .map(|participant| bound(&mut self.conn, participant))
            .transpose()
    }

    pub fn chat_ids_for_team(&mut self, team: TeamId) -> Result<Vec<String>> {
        Ok(participants::table
            .inner_join(team_members::table)
            .filter(team_members::team_id.eq(db_id(team)))
            .order_by(team_members::position.asc())
            .select(participants::chat_id)
            .load::<Option<String>>(&mut self.conn)?
            .into_iter()
            .flatten()
            .collect())
    }

    pub fn chat_ids_for_participants(
        &mut self,
        ids: &[ParticipantId],
    ) -> Result<Vec<String>> {
        let found = load_participants(&mut self.conn, ids)?;
        Ok(in_order(ids, &found, |p| p.chat_id.as_ref()))
    }
}

fn upsert_participants(
    conn: &mut SqliteConnection,
    participants: &[Participant],
) -> Result<()> {
    for participant in participants {
        if !participant.email.is_empty() && !is_valid_email(&participant.email)
        {
            tracing::warn!(
                "participant {} ({}) has a malformed email {:?}",
                participant.id,
                participant.name,
                participant.email
            );
        }

        // The chat identity is owned by registration, so an update leaves
        // it alone.
        diesel::insert_into(participants::table)
            .values(StoredParticipant::of(participant))
            .on_conflict(participants::id)
            .do_update()
            .set((
                participants::barcode.eq(excluded(participants::barcode)),
                participants::name.eq(excluded(participants::name)),
                participants::email.eq(excluded(participants::email)),
                participants::kind.eq(excluded(participants::kind)),
                participants::url_key.eq(excluded(participants::url_key)),
            ))
            .execute(conn)?;
    }
    Ok(())
}

fn bound(
    conn: &mut SqliteConnection,
    participant: StoredParticipant,
) -> Result<BoundParticipant> {
    let emoji = team_members::table
        .filter(team_members::participant_id.eq(participant.id))
        .select(team_members::emoji)
        .first::<String>(conn)
        .optional()?;

    Ok(BoundParticipant {
        id: participant.id as u64,
        label: format!(
            "[{}] {}",
            emoji.as_deref().unwrap_or("J"),
            participant.name
        ),
        role: participant.role(),
    })
}

fn load_participants(
    conn: &mut SqliteConnection,
    ids: &[ParticipantId],
) -> Result<HashMap<i64, StoredParticipant>> {
    let ids = ids.iter().copied().map(db_id).collect::<Vec<_>>();
    Ok(participants::table
        .filter(participants::id.eq_any(&ids))
        .select(StoredParticipant::as_select())
        .load(conn)?
        .into_iter()
        .map(|participant| (participant.id, participant))
        .collect())
}

/// Picks a non-empty field out of each participant, in the order of `ids`.
fn in_order(
    ids: &[ParticipantId],
    found: &HashMap<i64, StoredParticipant>,
    field: impl Fn(&StoredParticipant) -> Option<&String>,
) -> Vec<String> {
    ids.iter()
        .filter_map(|id| found.get(&db_id(*id)))
        .filter_map(|participant| field(participant))
        .filter(|value| !value.is_empty())
        .cloned()
        .collect()
}

impl IdentitySource for ParticipantStore {
    fn team_emails(&mut self, team: TeamId) -> Result<Vec<String>> {
        Ok(participants::table
            .inner_join(team_members::table)
            .filter(team_members::team_id.eq(db_id(team)))
            .order_by(team_members::position.asc())
            .select(participants::email)
            .load::<Option<String>>(&mut self.conn)?
            .into_iter()
            .flatten()
            .filter(|email| !email.is_empty())
            .collect())
    }

    fn participant_emails(
        &mut self,
        ids: &[ParticipantId],
    ) -> Result<Vec<String>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let found = load_participants(&mut self.conn, ids)?;
        Ok(in_order(ids, &found, |p| p.email.as_ref()))
    }
}

impl NameLookup for ParticipantStore {
    fn name_for_email(&mut self, email: &str) -> Result<Option<String>> {
        self.name_from_email(email)
    }
}
