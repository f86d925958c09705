//! PostgreSQL implementation of RestrictionRepository.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use crate::domain::foundation::{
    DomainError, ErrorCode, ReservationId, RestrictionId, RoomId, StayDates, Timestamp,
};
use crate::domain::reservation::{NewRoomRestriction, RestrictionKind, RoomRestriction};
use crate::ports::RestrictionRepository;

use super::deadline::{bounded, column};

#[derive(Clone)]
pub struct PostgresRestrictionRepository {
    pool: PgPool,
    statement_timeout: Duration,
}

impl PostgresRestrictionRepository {
    pub fn new(pool: PgPool, statement_timeout: Duration) -> Self {
        Self {
            pool,
            statement_timeout,
        }
    }
}

#[async_trait]
impl RestrictionRepository for PostgresRestrictionRepository {
    async fn insert_room_restriction(
        &self,
        restriction: &NewRoomRestriction,
    ) -> Result<RestrictionId, DomainError> {
        let now = Utc::now();
        let stay = restriction.stay();
        let (id,): (i32,) = bounded(
            self.statement_timeout,
            "insert_room_restriction",
            sqlx::query_as(
                r#"
                INSERT INTO room_restrictions (
                    start_date, end_date, room_id, reservation_id,
                    restriction_id, created_at, updated_at
                ) VALUES ($1, $2, $3, $4, $5, $6, $6)
                RETURNING id
                "#,
            )
            .bind(stay.start())
            .bind(stay.end())
            .bind(restriction.room_id().as_i32())
            .bind(restriction.reservation_id().map(|id| id.as_i32()))
            .bind(restriction.kind().as_i32())
            .bind(now)
            .fetch_one(&self.pool),
        )
        .await?;

        Ok(RestrictionId::new(id))
    }

    async fn get_restrictions_for_room_by_date(
        &self,
        room_id: RoomId,
        first: NaiveDate,
        last: NaiveDate,
    ) -> Result<Vec<RoomRestriction>, DomainError> {
        let rows = bounded(
            self.statement_timeout,
            "get_restrictions_for_room_by_date",
            sqlx::query(
                r#"
                SELECT id, start_date, end_date, room_id, reservation_id,
                       restriction_id, created_at, updated_at
                FROM room_restrictions
                WHERE $1 < end_date
                  AND $2 >= start_date
                  AND room_id = $3
                ORDER BY start_date, id
                "#,
            )
            .bind(first)
            .bind(last)
            .bind(room_id.as_i32())
            .fetch_all(&self.pool),
        )
        .await?;

        rows.iter().map(row_to_restriction).collect()
    }

    async fn insert_block_for_room(
        &self,
        room_id: RoomId,
        date: NaiveDate,
    ) -> Result<RestrictionId, DomainError> {
        self.insert_room_restriction(&NewRoomRestriction::owner_block(room_id, date))
            .await
    }

    async fn delete_block_by_id(&self, id: RestrictionId) -> Result<(), DomainError> {
        bounded(
            self.statement_timeout,
            "delete_block_by_id",
            sqlx::query("DELETE FROM room_restrictions WHERE id = $1")
                .bind(id.as_i32())
                .execute(&self.pool),
        )
        .await?;
        Ok(())
    }
}

fn row_to_restriction(row: &PgRow) -> Result<RoomRestriction, DomainError> {
    let id: i32 = column(row, "id")?;
    let start: NaiveDate = column(row, "start_date")?;
    let end: NaiveDate = column(row, "end_date")?;
    let room_id: i32 = column(row, "room_id")?;
    let reservation_id: Option<i32> = column(row, "reservation_id")?;
    let kind_code: i32 = column(row, "restriction_id")?;
    let created_at: DateTime<Utc> = column(row, "created_at")?;
    let updated_at: DateTime<Utc> = column(row, "updated_at")?;

    let kind = RestrictionKind::from_i32(kind_code).ok_or_else(|| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Unknown restriction kind {} on row {}", kind_code, id),
        )
    })?;

    Ok(RoomRestriction {
        id: RestrictionId::new(id),
        stay: StayDates::from_stored_unchecked(start, end),
        room_id: RoomId::new(room_id),
        // Legacy rows may carry 0 instead of NULL for blocks.
        reservation_id: reservation_id.filter(|id| *id > 0).map(ReservationId::new),
        kind,
        created_at: Timestamp::from_datetime(created_at),
        updated_at: Timestamp::from_datetime(updated_at),
    })
}
