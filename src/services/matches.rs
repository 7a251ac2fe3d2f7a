use anyhow::Result;
use chrono::Utc;
use log::{error, info};
use tokio::sync::watch;
use validator::Validate;

use super::dashboard::{Dashboard, LiveDashboard};
use super::feed::MatchFeed;
use crate::database::{self, matches, DbPool};
use crate::domain::filter::{sort_newest_first, sort_oldest_first};
use crate::domain::{score_entry, CurrentUser, HistoryFilter, Match, MatchEntryForm, MatchId};
use crate::errors::TrackerError;
use crate::performance::{self, MatchStatistics, PerformanceSeries};

/// Match history of the logged-in user: scoring on the way in, derived
/// views on the way out, and a live feed refreshed after every write.
#[derive(Clone)]
pub struct MatchService {
    pool: DbPool,
    feed: MatchFeed,
}

impl MatchService {
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            feed: MatchFeed::new(),
        }
    }

    /// Newest first
    pub fn list_matches(&self, user: &CurrentUser) -> Result<Vec<Match>> {
        let mut list = self.load(user)?;
        sort_newest_first(&mut list);
        Ok(list)
    }

    pub fn history(&self, user: &CurrentUser, filter: &HistoryFilter) -> Result<Vec<Match>> {
        filter.validate().map_err(TrackerError::from)?;
        let list = self.list_matches(user)?;
        Ok(filter.apply(&list))
    }

    pub fn statistics(&self, user: &CurrentUser) -> Result<MatchStatistics> {
        let list = self.load(user)?;
        Ok(MatchStatistics::from_matches(&list))
    }

    pub fn series(&self, user: &CurrentUser) -> Result<PerformanceSeries> {
        let mut list = self.load(user)?;
        sort_oldest_first(&mut list);
        Ok(performance::build(&list))
    }

    pub fn dashboard(&self, user: &CurrentUser, filter: &HistoryFilter) -> Result<Dashboard> {
        filter.validate().map_err(TrackerError::from)?;
        let list = self.load(user)?;
        Ok(Dashboard::build(&user.display_name(), &list, filter))
    }

    /// Scores the entry and stores it when it yields a win or a loss.
    /// Nothing is evaluated when no user is logged in.
    pub fn record_match(&self, user: Option<&CurrentUser>, form: &MatchEntryForm) -> Result<Match> {
        let user = user.ok_or(TrackerError::MissingIdentity)?;
        let scored = score_entry(form)?;
        let new_match = scored.into_new_match(user, Utc::now());

        let mut conn = database::get_connection(&self.pool)?;
        let stored = matches::insert_match(&mut conn, &new_match).inspect_err(|e| {
            error!("Failed to store match for user {}: {:?}", user.id, e);
        })?;
        drop(conn);

        info!(
            "Recorded {} against {} for user {}",
            stored.outcome, stored.opponent_name, user.id
        );
        self.refresh_feed(user)?;
        Ok(stored)
    }

    /// Re-scores the match from a new entry, keeping owner and creation time
    pub fn update_match(&self, user: &CurrentUser, id: MatchId, form: &MatchEntryForm) -> Result<Match> {
        let scored = score_entry(form)?;

        let mut conn = database::get_connection(&self.pool)?;
        let updated = matches::update_match(
            &mut conn,
            user.id,
            id,
            &scored.opponent_name,
            &scored.sets,
            scored.analysis.outcome,
            scored.analysis.is_finished,
        )
        .inspect_err(|e| error!("Failed to update match {}: {:?}", id, e))?
        .ok_or(TrackerError::MatchNotFound(id))?;
        drop(conn);

        info!("Updated match {} for user {}", id, user.id);
        self.refresh_feed(user)?;
        Ok(updated)
    }

    pub fn delete_match(&self, user: &CurrentUser, id: MatchId) -> Result<()> {
        let mut conn = database::get_connection(&self.pool)?;
        let deleted = matches::delete_match(&mut conn, user.id, id)
            .inspect_err(|e| error!("Failed to delete match {}: {:?}", id, e))?;
        drop(conn);

        if !deleted {
            return Err(TrackerError::MatchNotFound(id).into());
        }

        info!("Deleted match {} for user {}", id, user.id);
        self.refresh_feed(user)
    }

    /// Live complete match list, seeded with the current state
    pub fn subscribe(&self, user: &CurrentUser) -> Result<watch::Receiver<Vec<Match>>> {
        let list = self.load(user)?;
        Ok(self.feed.subscribe(user.id, list))
    }

    pub fn live_dashboard(&self, user: &CurrentUser, filter: HistoryFilter) -> Result<LiveDashboard> {
        filter.validate().map_err(TrackerError::from)?;
        let receiver = self.subscribe(user)?;
        Ok(LiveDashboard::new(user.display_name(), filter, receiver))
    }

    fn load(&self, user: &CurrentUser) -> Result<Vec<Match>> {
        let mut conn = database::get_connection(&self.pool)?;
        matches::list_by_user(&mut conn, user.id)
    }

    fn refresh_feed(&self, user: &CurrentUser) -> Result<()> {
        if self.feed.observer_count(user.id) == 0 {
            return Ok(());
        }
        let list = self.load(user)?;
        self.feed.publish(user.id, list);
        Ok(())
    }
}
