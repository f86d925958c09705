//! Admin calendar: month day-maps and block reconciliation.

mod day_map;
mod errors;
mod month;
mod reconcile;

pub use day_map::{
    block_map_session_key, BlockMap, CachedBlocks, DayMap, ReservationMap, RoomCalendar,
};
pub use errors::CalendarError;
pub use month::CalendarMonth;
pub use reconcile::{plan_block_changes, BlockAction, BlockEdit, BlockPlan};
