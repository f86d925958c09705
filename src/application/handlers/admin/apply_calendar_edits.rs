//! ApplyCalendarEditsHandler - reconciles submitted block edits against
//! the block maps cached when the calendar was shown.
//!
//! A cache built for a different month than the one posted is ignored, so
//! nothing is deleted on its strength.
//!
//! Rooms are processed in id order. The first store error stops the
//! request; deletes and inserts already issued stay applied.

use std::sync::Arc;

use crate::domain::calendar::{
    block_map_session_key, plan_block_changes, BlockEdit, BlockMap, CachedBlocks, CalendarError,
    CalendarMonth,
};
use crate::domain::foundation::RoomId;
use crate::ports::{RestrictionRepository, RoomRepository, SessionHandle, SessionRead};

#[derive(Debug, Clone)]
pub struct ApplyCalendarEditsCommand {
    pub month: CalendarMonth,
    pub edits: Vec<BlockEdit>,
}

/// Counts of store writes issued.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CalendarEditSummary {
    pub deleted: usize,
    pub inserted: usize,
}

pub struct ApplyCalendarEditsHandler {
    rooms: Arc<dyn RoomRepository>,
    restrictions: Arc<dyn RestrictionRepository>,
}

impl ApplyCalendarEditsHandler {
    pub fn new(rooms: Arc<dyn RoomRepository>, restrictions: Arc<dyn RestrictionRepository>) -> Self {
        Self {
            rooms,
            restrictions,
        }
    }

    pub async fn handle(
        &self,
        session: &SessionHandle,
        cmd: ApplyCalendarEditsCommand,
    ) -> Result<CalendarEditSummary, CalendarError> {
        let month = cmd.month;
        let edits: Vec<BlockEdit> = cmd
            .edits
            .into_iter()
            .filter(|edit| month.contains(edit.date))
            .collect();

        let mut summary = CalendarEditSummary::default();
        for room in self.rooms.all_rooms().await? {
            let cached = self.cached_blocks(session, room.id, &month).await?;
            let plan = plan_block_changes(room.id, &cached, &edits);

            for id in plan.deletes {
                self.restrictions.delete_block_by_id(id).await?;
                summary.deleted += 1;
            }
            for block in plan.inserts {
                self.restrictions
                    .insert_block_for_room(block.room_id(), block.stay().start())
                    .await?;
                summary.inserted += 1;
            }
        }

        tracing::info!(
            month = %month,
            deleted = summary.deleted,
            inserted = summary.inserted,
            "Calendar edits applied"
        );
        Ok(summary)
    }

    /// The block map shown to the admin for `month`. Without one there is
    /// nothing to delete.
    async fn cached_blocks(
        &self,
        session: &SessionHandle,
        room_id: RoomId,
        month: &CalendarMonth,
    ) -> Result<BlockMap, CalendarError> {
        let cached = match session.get::<CachedBlocks>(&block_map_session_key(room_id)).await? {
            SessionRead::Present(cached) => cached,
            SessionRead::Absent => return Ok(BlockMap::for_month(month)),
            SessionRead::Malformed(reason) => {
                tracing::warn!(room_id = %room_id, %reason, "Ignoring unreadable cached block map");
                return Ok(BlockMap::for_month(month));
            }
        };

        let shown = cached.month;
        match cached.for_month(month) {
            Some(blocks) => Ok(blocks),
            None => {
                tracing::warn!(
                    room_id = %room_id,
                    shown = %shown,
                    posted = %month,
                    "Cached block map is for another month; deleting nothing"
                );
                Ok(BlockMap::for_month(month))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryBookingStore;
    use crate::application::handlers::admin::test_support::{book, date};
    use crate::application::handlers::admin::BuildCalendarHandler;
    use crate::application::handlers::reservation::test_support::session;
    use crate::domain::foundation::ErrorCode;
    use crate::domain::reservation::RestrictionKind;

    fn january() -> CalendarMonth {
        CalendarMonth::new(2050, 1).unwrap()
    }

    fn room() -> RoomId {
        RoomId::new(1)
    }

    async fn blocked_days(store: &InMemoryBookingStore, room_id: RoomId) -> Vec<u32> {
        use chrono::Datelike;
        let mut days: Vec<u32> = store
            .restrictions()
            .await
            .into_iter()
            .filter(|r| r.room_id == room_id && r.kind == RestrictionKind::OwnerBlock)
            .map(|r| r.stay.start().day())
            .collect();
        days.sort();
        days
    }

    #[tokio::test]
    async fn keeps_checked_removes_unchecked_and_adds_new() {
        let store = Arc::new(InMemoryBookingStore::seeded());
        for day in ["2050-01-05", "2050-01-06", "2050-01-07"] {
            store.insert_block_for_room(room(), date(day)).await.unwrap();
        }
        let session = session();
        BuildCalendarHandler::new(store.clone(), store.clone())
            .handle(&session, january())
            .await
            .unwrap();

        let summary = ApplyCalendarEditsHandler::new(store.clone(), store.clone())
            .handle(
                &session,
                ApplyCalendarEditsCommand {
                    month: january(),
                    edits: vec![
                        BlockEdit::keep(room(), date("2050-01-06")),
                        BlockEdit::add(room(), date("2050-01-10")),
                    ],
                },
            )
            .await
            .unwrap();

        assert_eq!(summary, CalendarEditSummary { deleted: 2, inserted: 1 });
        assert_eq!(blocked_days(&store, room()).await, vec![6, 10]);
    }

    #[tokio::test]
    async fn reservations_made_after_view_are_untouched() {
        let store = Arc::new(InMemoryBookingStore::seeded());
        let session = session();
        BuildCalendarHandler::new(store.clone(), store.clone())
            .handle(&session, january())
            .await
            .unwrap();
        book(&store, 1, "2050-01-12", "2050-01-14").await;

        let summary = ApplyCalendarEditsHandler::new(store.clone(), store.clone())
            .handle(&session, ApplyCalendarEditsCommand { month: january(), edits: vec![] })
            .await
            .unwrap();

        assert_eq!(summary, CalendarEditSummary::default());
        assert_eq!(store.restrictions().await.len(), 1);
    }

    #[tokio::test]
    async fn missing_cache_deletes_nothing() {
        let store = Arc::new(InMemoryBookingStore::seeded());
        store.insert_block_for_room(room(), date("2050-01-05")).await.unwrap();

        let summary = ApplyCalendarEditsHandler::new(store.clone(), store.clone())
            .handle(
                &session(),
                ApplyCalendarEditsCommand {
                    month: january(),
                    edits: vec![BlockEdit::add(room(), date("2050-01-09"))],
                },
            )
            .await
            .unwrap();

        assert_eq!(summary, CalendarEditSummary { deleted: 0, inserted: 1 });
        assert_eq!(blocked_days(&store, room()).await, vec![5, 9]);
    }

    #[tokio::test]
    async fn cache_from_another_month_deletes_nothing() {
        let store = Arc::new(InMemoryBookingStore::seeded());
        store.insert_block_for_room(room(), date("2050-01-05")).await.unwrap();
        let session = session();
        BuildCalendarHandler::new(store.clone(), store.clone())
            .handle(&session, january())
            .await
            .unwrap();

        let february = CalendarMonth::new(2050, 2).unwrap();
        let summary = ApplyCalendarEditsHandler::new(store.clone(), store.clone())
            .handle(
                &session,
                ApplyCalendarEditsCommand {
                    month: february,
                    edits: vec![BlockEdit::keep(room(), date("2050-01-05"))],
                },
            )
            .await
            .unwrap();

        assert_eq!(summary, CalendarEditSummary::default());
        assert_eq!(blocked_days(&store, room()).await, vec![5]);
    }

    #[tokio::test]
    async fn edits_outside_month_are_ignored() {
        let store = Arc::new(InMemoryBookingStore::seeded());
        let summary = ApplyCalendarEditsHandler::new(store.clone(), store.clone())
            .handle(
                &session(),
                ApplyCalendarEditsCommand {
                    month: january(),
                    edits: vec![BlockEdit::add(room(), date("2050-02-01"))],
                },
            )
            .await
            .unwrap();

        assert_eq!(summary, CalendarEditSummary::default());
    }

    #[tokio::test]
    async fn store_error_aborts_without_rollback() {
        let store = Arc::new(InMemoryBookingStore::seeded());
        store.insert_block_for_room(room(), date("2050-01-05")).await.unwrap();
        let session = session();
        BuildCalendarHandler::new(store.clone(), store.clone())
            .handle(&session, january())
            .await
            .unwrap();
        store.fail_restriction_inserts(true);

        let err = ApplyCalendarEditsHandler::new(store.clone(), store.clone())
            .handle(
                &session,
                ApplyCalendarEditsCommand {
                    month: january(),
                    edits: vec![BlockEdit::add(room(), date("2050-01-20"))],
                },
            )
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::DatabaseError);
        // The delete for day 5 went through before the insert failed.
        assert!(blocked_days(&store, room()).await.is_empty());
    }
}
