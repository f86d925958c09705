//! Set-difference reconciliation of admin block edits.
//!
//! The calendar view caches each room's block map. On submit, the admin
//! posts one `Keep` edit per previously blocked day that is still checked
//! and one `Add` edit per newly checked day. Cached blocks without a `Keep`
//! are deleted; `Add` days become new single-night owner blocks. Days with
//! no edit and no cached block are not touched, so reservations written
//! between view and submit survive.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{RestrictionId, RoomId};
use crate::domain::reservation::NewRoomRestriction;

use super::BlockMap;

/// What the admin asked for on one room/day cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockAction {
    /// Leave the existing block in place.
    Keep,
    /// Create a new block.
    Add,
}

/// One submitted calendar cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockEdit {
    pub room_id: RoomId,
    pub date: NaiveDate,
    pub action: BlockAction,
}

impl BlockEdit {
    pub fn keep(room_id: RoomId, date: NaiveDate) -> Self {
        Self {
            room_id,
            date,
            action: BlockAction::Keep,
        }
    }

    pub fn add(room_id: RoomId, date: NaiveDate) -> Self {
        Self {
            room_id,
            date,
            action: BlockAction::Add,
        }
    }
}

/// Store writes needed to bring one room in line with the submitted form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockPlan {
    pub deletes: Vec<RestrictionId>,
    pub inserts: Vec<NewRoomRestriction>,
}

impl BlockPlan {
    pub fn is_empty(&self) -> bool {
        self.deletes.is_empty() && self.inserts.is_empty()
    }
}

/// Diffs `edits` for `room_id` against the room's cached block map.
///
/// Edits for other rooms are ignored. An `Add` on a day the cache already
/// shows as blocked is treated as `Keep`; duplicate `Add`s collapse.
pub fn plan_block_changes(room_id: RoomId, cached: &BlockMap, edits: &[BlockEdit]) -> BlockPlan {
    let mut kept = BTreeSet::new();
    let mut added = BTreeSet::new();

    for edit in edits.iter().filter(|e| e.room_id == room_id) {
        if cached.is_marked(edit.date) {
            kept.insert(edit.date);
            continue;
        }
        if edit.action == BlockAction::Add {
            added.insert(edit.date);
        }
    }

    let deletes = cached
        .marked()
        .filter(|(day, _)| !kept.contains(day))
        .map(|(_, id)| id)
        .collect();

    let inserts = added
        .into_iter()
        .map(|day| NewRoomRestriction::owner_block(room_id, day))
        .collect();

    BlockPlan { deletes, inserts }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::calendar::CalendarMonth;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2050, 1, d).unwrap()
    }

    fn room() -> RoomId {
        RoomId::new(1)
    }

    fn cached_blocks() -> BlockMap {
        let mut map = BlockMap::for_month(&CalendarMonth::new(2050, 1).unwrap());
        map.mark(day(5), RestrictionId::new(105));
        map.mark(day(6), RestrictionId::new(106));
        map.mark(day(7), RestrictionId::new(107));
        map
    }

    #[test]
    fn keeps_checked_deletes_unchecked_adds_new() {
        let edits = [BlockEdit::keep(room(), day(6)), BlockEdit::add(room(), day(10))];
        let plan = plan_block_changes(room(), &cached_blocks(), &edits);

        assert_eq!(
            plan.deletes,
            vec![RestrictionId::new(105), RestrictionId::new(107)]
        );
        assert_eq!(
            plan.inserts,
            vec![NewRoomRestriction::owner_block(room(), day(10))]
        );
    }

    #[test]
    fn keeping_everything_is_a_no_op() {
        let edits = [
            BlockEdit::keep(room(), day(5)),
            BlockEdit::keep(room(), day(6)),
            BlockEdit::keep(room(), day(7)),
        ];
        assert!(plan_block_changes(room(), &cached_blocks(), &edits).is_empty());
    }

    #[test]
    fn empty_submission_clears_all_cached_blocks() {
        let plan = plan_block_changes(room(), &cached_blocks(), &[]);
        assert_eq!(plan.deletes.len(), 3);
        assert!(plan.inserts.is_empty());
    }

    #[test]
    fn edits_for_other_rooms_are_ignored() {
        let other = RoomId::new(2);
        let edits = [
            BlockEdit::keep(other, day(5)),
            BlockEdit::add(other, day(20)),
        ];
        let plan = plan_block_changes(room(), &cached_blocks(), &edits);
        assert_eq!(plan.deletes.len(), 3);
        assert!(plan.inserts.is_empty());
    }

    #[test]
    fn add_on_already_blocked_day_keeps_it() {
        let edits = [
            BlockEdit::add(room(), day(5)),
            BlockEdit::keep(room(), day(6)),
            BlockEdit::keep(room(), day(7)),
        ];
        assert!(plan_block_changes(room(), &cached_blocks(), &edits).is_empty());
    }

    #[test]
    fn duplicate_adds_collapse() {
        let empty = BlockMap::for_month(&CalendarMonth::new(2050, 1).unwrap());
        let edits = [BlockEdit::add(room(), day(9)), BlockEdit::add(room(), day(9))];
        let plan = plan_block_changes(room(), &empty, &edits);
        assert_eq!(plan.inserts.len(), 1);
    }

    #[test]
    fn block_edit_deserializes_from_form_json() {
        let json = r#"{"room_id":3,"date":"2050-01-10","action":"add"}"#;
        let edit: BlockEdit = serde_json::from_str(json).unwrap();
        assert_eq!(edit, BlockEdit::add(RoomId::new(3), day(10)));
    }
}
