//! PostgreSQL implementation of RoomRepository.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ErrorCode, RoomId, StayDates, Timestamp};
use crate::domain::reservation::Room;
use crate::ports::RoomRepository;

use super::deadline::{bounded, column};

/// PostgreSQL implementation of RoomRepository.
#[derive(Clone)]
pub struct PostgresRoomRepository {
    pool: PgPool,
    statement_timeout: Duration,
}

impl PostgresRoomRepository {
    pub fn new(pool: PgPool, statement_timeout: Duration) -> Self {
        Self {
            pool,
            statement_timeout,
        }
    }
}

#[async_trait]
impl RoomRepository for PostgresRoomRepository {
    async fn all_rooms(&self) -> Result<Vec<Room>, DomainError> {
        let rows = bounded(
            self.statement_timeout,
            "all_rooms",
            sqlx::query("SELECT id, room_name, created_at, updated_at FROM rooms ORDER BY id")
                .fetch_all(&self.pool),
        )
        .await?;

        rows.iter().map(row_to_room).collect()
    }

    async fn get_room_by_id(&self, id: RoomId) -> Result<Room, DomainError> {
        let row = bounded(
            self.statement_timeout,
            "get_room_by_id",
            sqlx::query("SELECT id, room_name, created_at, updated_at FROM rooms WHERE id = $1")
                .bind(id.as_i32())
                .fetch_optional(&self.pool),
        )
        .await?;

        match row {
            Some(row) => row_to_room(&row),
            None => Err(DomainError::new(
                ErrorCode::RoomNotFound,
                format!("Room not found: {}", id),
            )),
        }
    }

    async fn search_availability_by_dates_by_room_id(
        &self,
        stay: StayDates,
        room_id: RoomId,
    ) -> Result<bool, DomainError> {
        let (overlapping,): (i64,) = bounded(
            self.statement_timeout,
            "search_availability_by_dates_by_room_id",
            sqlx::query_as(
                r#"
                SELECT COUNT(id)
                FROM room_restrictions
                WHERE room_id = $1
                  AND start_date < $3
                  AND end_date > $2
                "#,
            )
            .bind(room_id.as_i32())
            .bind(stay.start())
            .bind(stay.end())
            .fetch_one(&self.pool),
        )
        .await?;

        Ok(overlapping == 0)
    }

    async fn search_availability_for_all_rooms(
        &self,
        stay: StayDates,
    ) -> Result<Vec<Room>, DomainError> {
        let rows = bounded(
            self.statement_timeout,
            "search_availability_for_all_rooms",
            sqlx::query(
                r#"
                SELECT r.id, r.room_name, r.created_at, r.updated_at
                FROM rooms r
                WHERE r.id NOT IN (
                    SELECT rr.room_id
                    FROM room_restrictions rr
                    WHERE rr.start_date < $2
                      AND rr.end_date > $1
                )
                ORDER BY r.id
                "#,
            )
            .bind(stay.start())
            .bind(stay.end())
            .fetch_all(&self.pool),
        )
        .await?;

        rows.iter().map(row_to_room).collect()
    }
}

fn row_to_room(row: &PgRow) -> Result<Room, DomainError> {
    let id: i32 = column(row, "id")?;
    let room_name: String = column(row, "room_name")?;
    let created_at: DateTime<Utc> = column(row, "created_at")?;
    let updated_at: DateTime<Utc> = column(row, "updated_at")?;

    Ok(Room {
        id: RoomId::new(id),
        room_name,
        created_at: Timestamp::from_datetime(created_at),
        updated_at: Timestamp::from_datetime(updated_at),
    })
}
