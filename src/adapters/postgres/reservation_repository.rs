//! PostgreSQL implementation of ReservationRepository.
//!
//! The `processed` flag is stored as the integer 0/1.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use crate::domain::foundation::{
    DomainError, ErrorCode, ReservationId, RoomId, StayDates, Timestamp,
};
use crate::domain::reservation::{NewReservation, Reservation, Room};
use crate::ports::ReservationRepository;

use super::deadline::{bounded, column};

const RESERVATION_WITH_ROOM: &str = r#"
    SELECT r.id, r.first_name, r.last_name, r.email, r.phone,
           r.start_date, r.end_date, r.room_id, r.processed,
           r.created_at, r.updated_at,
           rm.room_name,
           rm.created_at AS room_created_at,
           rm.updated_at AS room_updated_at
    FROM reservations r
    LEFT JOIN rooms rm ON rm.id = r.room_id
"#;

/// PostgreSQL implementation of ReservationRepository.
#[derive(Clone)]
pub struct PostgresReservationRepository {
    pool: PgPool,
    statement_timeout: Duration,
}

impl PostgresReservationRepository {
    pub fn new(pool: PgPool, statement_timeout: Duration) -> Self {
        Self {
            pool,
            statement_timeout,
        }
    }

    async fn list(&self, operation: &str, only_new: bool) -> Result<Vec<Reservation>, DomainError> {
        let sql = if only_new {
            format!("{} WHERE r.processed = 0 ORDER BY r.start_date ASC, r.id", RESERVATION_WITH_ROOM)
        } else {
            format!("{} ORDER BY r.start_date ASC, r.id", RESERVATION_WITH_ROOM)
        };

        let rows = bounded(
            self.statement_timeout,
            operation,
            sqlx::query(&sql).fetch_all(&self.pool),
        )
        .await?;

        rows.iter().map(row_to_reservation).collect()
    }
}

fn not_found(id: ReservationId) -> DomainError {
    DomainError::new(
        ErrorCode::ReservationNotFound,
        format!("Reservation not found: {}", id),
    )
}

#[async_trait]
impl ReservationRepository for PostgresReservationRepository {
    async fn insert_reservation(&self, new: &NewReservation) -> Result<ReservationId, DomainError> {
        let now = Utc::now();
        let (id,): (i32,) = bounded(
            self.statement_timeout,
            "insert_reservation",
            sqlx::query_as(
                r#"
                INSERT INTO reservations (
                    first_name, last_name, email, phone,
                    start_date, end_date, room_id, processed,
                    created_at, updated_at
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, 0, $8, $8)
                RETURNING id
                "#,
            )
            .bind(&new.guest.first_name)
            .bind(&new.guest.last_name)
            .bind(&new.guest.email)
            .bind(&new.guest.phone)
            .bind(new.stay.start())
            .bind(new.stay.end())
            .bind(new.room_id.as_i32())
            .bind(now)
            .fetch_one(&self.pool),
        )
        .await?;

        Ok(ReservationId::new(id))
    }

    async fn all_reservations(&self) -> Result<Vec<Reservation>, DomainError> {
        self.list("all_reservations", false).await
    }

    async fn all_new_reservations(&self) -> Result<Vec<Reservation>, DomainError> {
        self.list("all_new_reservations", true).await
    }

    async fn get_reservation_by_id(&self, id: ReservationId) -> Result<Reservation, DomainError> {
        let sql = format!("{} WHERE r.id = $1", RESERVATION_WITH_ROOM);
        let row = bounded(
            self.statement_timeout,
            "get_reservation_by_id",
            sqlx::query(&sql).bind(id.as_i32()).fetch_optional(&self.pool),
        )
        .await?;

        match row {
            Some(row) => row_to_reservation(&row),
            None => Err(not_found(id)),
        }
    }

    async fn update_reservation(&self, reservation: &Reservation) -> Result<(), DomainError> {
        let result = bounded(
            self.statement_timeout,
            "update_reservation",
            sqlx::query(
                r#"
                UPDATE reservations SET
                    first_name = $2,
                    last_name = $3,
                    email = $4,
                    phone = $5,
                    updated_at = $6
                WHERE id = $1
                "#,
            )
            .bind(reservation.id.as_i32())
            .bind(&reservation.first_name)
            .bind(&reservation.last_name)
            .bind(&reservation.email)
            .bind(&reservation.phone)
            .bind(Utc::now())
            .execute(&self.pool),
        )
        .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(reservation.id));
        }
        Ok(())
    }

    async fn delete_reservation(&self, id: ReservationId) -> Result<(), DomainError> {
        let result = bounded(
            self.statement_timeout,
            "delete_reservation",
            sqlx::query("DELETE FROM reservations WHERE id = $1")
                .bind(id.as_i32())
                .execute(&self.pool),
        )
        .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }

    async fn update_processed_for_reservation(
        &self,
        id: ReservationId,
        processed: bool,
    ) -> Result<(), DomainError> {
        let result = bounded(
            self.statement_timeout,
            "update_processed_for_reservation",
            sqlx::query("UPDATE reservations SET processed = $2, updated_at = $3 WHERE id = $1")
                .bind(id.as_i32())
                .bind(i32::from(processed))
                .bind(Utc::now())
                .execute(&self.pool),
        )
        .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}

fn row_to_reservation(row: &PgRow) -> Result<Reservation, DomainError> {
    let id: i32 = column(row, "id")?;
    let room_id = RoomId::new(column(row, "room_id")?);
    let start: NaiveDate = column(row, "start_date")?;
    let end: NaiveDate = column(row, "end_date")?;
    let processed: i32 = column(row, "processed")?;
    let created_at: DateTime<Utc> = column(row, "created_at")?;
    let updated_at: DateTime<Utc> = column(row, "updated_at")?;

    let room_name: Option<String> = column(row, "room_name")?;
    let room = match room_name {
        Some(room_name) => {
            let room_created: DateTime<Utc> = column(row, "room_created_at")?;
            let room_updated: DateTime<Utc> = column(row, "room_updated_at")?;
            Some(Room {
                id: room_id,
                room_name,
                created_at: Timestamp::from_datetime(room_created),
                updated_at: Timestamp::from_datetime(room_updated),
            })
        }
        None => None,
    };

    Ok(Reservation {
        id: ReservationId::new(id),
        first_name: column(row, "first_name")?,
        last_name: column(row, "last_name")?,
        email: column(row, "email")?,
        phone: column(row, "phone")?,
        stay: StayDates::from_stored_unchecked(start, end),
        room_id,
        room,
        processed: processed != 0,
        created_at: Timestamp::from_datetime(created_at),
        updated_at: Timestamp::from_datetime(updated_at),
    })
}
