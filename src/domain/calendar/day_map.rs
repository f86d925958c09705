//! Per-room, per-day occupancy maps for the admin calendar.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ReservationId, RestrictionId, RoomId};
use crate::domain::reservation::{Room, RoomRestriction};

use super::CalendarMonth;

/// One entry per day of a month, each either empty or holding a row id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayMap<Id>(BTreeMap<NaiveDate, Option<Id>>);

/// Day → reservation occupying the room that day.
pub type ReservationMap = DayMap<ReservationId>;

/// Day → owner block restriction row starting that day.
pub type BlockMap = DayMap<RestrictionId>;

impl<Id: Copy> DayMap<Id> {
    /// A map with every day of `month` present and empty.
    pub fn for_month(month: &CalendarMonth) -> Self {
        Self(month.days().map(|day| (day, None)).collect())
    }

    /// Sets `day` if it belongs to the map's month; other days are ignored.
    pub fn mark(&mut self, day: NaiveDate, id: Id) {
        if let Some(slot) = self.0.get_mut(&day) {
            *slot = Some(id);
        }
    }

    pub fn get(&self, day: NaiveDate) -> Option<Id> {
        self.0.get(&day).copied().flatten()
    }

    pub fn is_marked(&self, day: NaiveDate) -> bool {
        self.get(day).is_some()
    }

    /// Marked days in order.
    pub fn marked(&self) -> impl Iterator<Item = (NaiveDate, Id)> + '_ {
        self.0.iter().filter_map(|(day, id)| id.map(|id| (*day, id)))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Session key for the cached block map of one room.
pub fn block_map_session_key(room_id: RoomId) -> String {
    format!("block_map_{}", room_id)
}

/// A room's block map as last shown to the admin, tagged with its month.
///
/// Edits are only diffed against a cache of the month they were posted
/// for; a cache of any other month counts as no cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedBlocks {
    pub month: CalendarMonth,
    pub blocks: BlockMap,
}

impl CachedBlocks {
    pub fn new(month: CalendarMonth, blocks: BlockMap) -> Self {
        Self { month, blocks }
    }

    /// The blocks, if this cache was built for `month`.
    pub fn for_month(self, month: &CalendarMonth) -> Option<BlockMap> {
        (self.month == *month).then_some(self.blocks)
    }
}

/// Calendar row for one room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomCalendar {
    pub room: Room,
    pub reservations: ReservationMap,
    pub blocks: BlockMap,
}

impl RoomCalendar {
    /// Overlays restriction rows onto empty maps for `month`.
    ///
    /// Reservation-backed rows mark every day from start to end inclusive.
    /// Owner blocks mark only their start day, whatever their stored end.
    pub fn build(month: &CalendarMonth, room: Room, restrictions: &[RoomRestriction]) -> Self {
        let mut reservations = ReservationMap::for_month(month);
        let mut blocks = BlockMap::for_month(month);

        for restriction in restrictions {
            match restriction.reservation_id {
                Some(reservation_id) => {
                    let mut day = restriction.stay.start().max(month.first_day());
                    let last = restriction.stay.end().min(month.last_day());
                    while day <= last {
                        reservations.mark(day, reservation_id);
                        day += Duration::days(1);
                    }
                }
                None => blocks.mark(restriction.stay.start(), restriction.id),
            }
        }

        Self {
            room,
            reservations,
            blocks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{StayDates, Timestamp};
    use crate::domain::reservation::RestrictionKind;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2050, 1, d).unwrap()
    }

    fn row(id: i32, start: NaiveDate, end: NaiveDate, reservation: Option<i32>) -> RoomRestriction {
        RoomRestriction {
            id: RestrictionId::new(id),
            stay: StayDates::new(start, end).unwrap(),
            room_id: RoomId::new(1),
            reservation_id: reservation.map(ReservationId::new),
            kind: if reservation.is_some() {
                RestrictionKind::Reservation
            } else {
                RestrictionKind::OwnerBlock
            },
            created_at: Timestamp::now(),
            updated_at: Timestamp::now(),
        }
    }

    fn january() -> CalendarMonth {
        CalendarMonth::new(2050, 1).unwrap()
    }

    #[test]
    fn empty_month_has_every_day_unmarked() {
        let map = BlockMap::for_month(&january());
        assert_eq!(map.len(), 31);
        assert_eq!(map.marked().count(), 0);
    }

    #[test]
    fn reservation_marks_inclusive_range() {
        let cal = RoomCalendar::build(
            &january(),
            Room::new(RoomId::new(1), "Room"),
            &[row(10, day(3), day(5), Some(77))],
        );
        let marked: Vec<_> = cal.reservations.marked().map(|(d, _)| d).collect();
        assert_eq!(marked, vec![day(3), day(4), day(5)]);
        assert_eq!(cal.reservations.get(day(4)), Some(ReservationId::new(77)));
        assert_eq!(cal.blocks.marked().count(), 0);
    }

    #[test]
    fn block_marks_only_start_day() {
        let cal = RoomCalendar::build(
            &january(),
            Room::new(RoomId::new(1), "Room"),
            &[row(11, day(8), day(12), None)],
        );
        let marked: Vec<_> = cal.blocks.marked().collect();
        assert_eq!(marked, vec![(day(8), RestrictionId::new(11))]);
    }

    #[test]
    fn reservation_spanning_month_boundary_is_clipped() {
        let start = NaiveDate::from_ymd_opt(2049, 12, 30).unwrap();
        let cal = RoomCalendar::build(
            &january(),
            Room::new(RoomId::new(1), "Room"),
            &[row(12, start, day(2), Some(5))],
        );
        let marked: Vec<_> = cal.reservations.marked().map(|(d, _)| d).collect();
        assert_eq!(marked, vec![day(1), day(2)]);
        assert_eq!(cal.reservations.len(), 31);
    }

    #[test]
    fn block_map_roundtrips_through_json() {
        let mut map = BlockMap::for_month(&january());
        map.mark(day(6), RestrictionId::new(3));
        let json = serde_json::to_string(&map).unwrap();
        let back: BlockMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }

    #[test]
    fn cached_blocks_only_answer_for_their_own_month() {
        let mut map = BlockMap::for_month(&january());
        map.mark(day(5), RestrictionId::new(9));
        let cached = CachedBlocks::new(january(), map.clone());

        let february = CalendarMonth::new(2050, 2).unwrap();
        assert_eq!(cached.clone().for_month(&february), None);
        assert_eq!(cached.for_month(&january()), Some(map));
    }

    #[test]
    fn session_key_is_room_scoped() {
        assert_eq!(block_map_session_key(RoomId::new(4)), "block_map_4");
    }
}
