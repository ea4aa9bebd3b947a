// server/src/repository/pg.rs

use super::reservation_number::generate_reservation_number;
use super::{
  reservation_not_found, transition_error, AbstCheckoutRepo, NumberGenerator, RowCounts,
  MAX_RESERVATION_NUMBER_ATTEMPTS,
};
use crate::errors::{AppError, Result as AppResult};
use crate::models::{Buyer, CheckoutOrder, PaymentInfoRecord, Reservation, ReservationDetails};
use archiplan_core::{Project, ProjectCategory, ReservationStatus};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgConnection, PgPool};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

const PROJECT_COLUMNS: &str = "id, name, description, category, price, currency, images, features, area, rooms, \
   bathrooms, floors, style, is_active, created_at, updated_at";

const RESERVATION_COLUMNS: &str = "id, reservation_number, project_id, buyer_id, payment_info_id, reservation_type, \
   status, total_amount, currency, created_at, updated_at, confirmed_at, cancelled_at, completed_at";

/// Runtime-checked queries; the schema lives in `server/migrations`.
pub struct PgCheckoutRepo {
  pool: PgPool,
  next_number: NumberGenerator,
}

impl PgCheckoutRepo {
  pub fn new(pool: PgPool) -> Self {
    Self {
      pool,
      next_number: generate_reservation_number,
    }
  }

  pub fn with_number_generator(mut self, generator: NumberGenerator) -> Self {
    self.next_number = generator;
    self
  }

  pub async fn connect(database_url: &str) -> AppResult<Self> {
    let pool = PgPool::connect(database_url).await?;
    info!("Successfully connected to the database.");
    Ok(Self::new(pool))
  }

  pub async fn run_migrations(&self) -> AppResult<()> {
    sqlx::migrate!("./migrations").run(&self.pool).await?;
    info!("Database migrations applied.");
    Ok(())
  }
}

async fn load_details(conn: &mut PgConnection, reservation: Reservation) -> AppResult<ReservationDetails> {
  let project: Project = sqlx::query_as(&format!("SELECT {} FROM projects WHERE id = $1", PROJECT_COLUMNS))
    .bind(&reservation.project_id)
    .fetch_one(&mut *conn)
    .await?;
  let buyer: Buyer = sqlx::query_as("SELECT * FROM buyers WHERE id = $1")
    .bind(reservation.buyer_id)
    .fetch_one(&mut *conn)
    .await?;
  let payment_info: PaymentInfoRecord = sqlx::query_as("SELECT * FROM payment_infos WHERE id = $1")
    .bind(reservation.payment_info_id)
    .fetch_one(&mut *conn)
    .await?;
  Ok(ReservationDetails {
    reservation,
    project,
    buyer,
    payment_info,
  })
}

async fn upsert_buyer(conn: &mut PgConnection, order: &CheckoutOrder) -> AppResult<Buyer> {
  let info = &order.buyer;
  let buyer = sqlx::query_as::<_, Buyer>(
    "INSERT INTO buyers (id, first_name, last_name, email, phone, document_type, document_number, \
       address, city, state, country, postal_code, notes) \
     VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
     ON CONFLICT (email) DO UPDATE SET \
       first_name = EXCLUDED.first_name, last_name = EXCLUDED.last_name, phone = EXCLUDED.phone, \
       document_type = EXCLUDED.document_type, document_number = EXCLUDED.document_number, \
       address = EXCLUDED.address, city = EXCLUDED.city, state = EXCLUDED.state, \
       country = EXCLUDED.country, postal_code = EXCLUDED.postal_code, notes = EXCLUDED.notes, \
       updated_at = now() \
     RETURNING *",
  )
  .bind(Uuid::new_v4())
  .bind(&info.first_name)
  .bind(&info.last_name)
  .bind(info.email.trim())
  .bind(&info.phone)
  .bind(info.document_type)
  .bind(&info.document_number)
  .bind(&info.address)
  .bind(&info.city)
  .bind(&info.state)
  .bind(info.country_or(&order.default_country))
  .bind(&info.postal_code)
  .bind(&info.notes)
  .fetch_one(&mut *conn)
  .await?;
  Ok(buyer)
}

async fn insert_payment_info(conn: &mut PgConnection, record: &PaymentInfoRecord) -> AppResult<()> {
  sqlx::query(
    "INSERT INTO payment_infos (id, payment_method, cardholder_name, billing_same_as_shipping, \
       billing_address, billing_city, billing_state, billing_country, billing_postal_code, created_at) \
     VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
  )
  .bind(record.id)
  .bind(record.payment_method)
  .bind(&record.cardholder_name)
  .bind(record.billing_same_as_shipping)
  .bind(&record.billing_address)
  .bind(&record.billing_city)
  .bind(&record.billing_state)
  .bind(&record.billing_country)
  .bind(&record.billing_postal_code)
  .bind(record.created_at)
  .execute(&mut *conn)
  .await?;
  Ok(())
}

/// `None` when the reservation number is already taken.
async fn try_insert_reservation(conn: &mut PgConnection, r: &Reservation) -> AppResult<Option<Reservation>> {
  let inserted = sqlx::query_as::<_, Reservation>(&format!(
    "INSERT INTO reservations (id, reservation_number, project_id, buyer_id, payment_info_id, \
       reservation_type, status, total_amount, currency, created_at, updated_at) \
     VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
     ON CONFLICT (reservation_number) DO NOTHING \
     RETURNING {}",
    RESERVATION_COLUMNS
  ))
  .bind(r.id)
  .bind(&r.reservation_number)
  .bind(&r.project_id)
  .bind(r.buyer_id)
  .bind(r.payment_info_id)
  .bind(r.reservation_type)
  .bind(r.status)
  .bind(r.total_amount)
  .bind(&r.currency)
  .bind(r.created_at)
  .bind(r.updated_at)
  .fetch_optional(&mut *conn)
  .await?;
  Ok(inserted)
}

#[async_trait]
impl AbstCheckoutRepo for PgCheckoutRepo {
  async fn list_active_projects(&self) -> AppResult<Vec<Project>> {
    let projects = sqlx::query_as(&format!(
      "SELECT {} FROM projects WHERE is_active ORDER BY created_at DESC",
      PROJECT_COLUMNS
    ))
    .fetch_all(&self.pool)
    .await?;
    Ok(projects)
  }

  async fn list_projects_by_category(&self, category: ProjectCategory) -> AppResult<Vec<Project>> {
    let projects = sqlx::query_as(&format!(
      "SELECT {} FROM projects WHERE is_active AND category = $1 ORDER BY created_at DESC",
      PROJECT_COLUMNS
    ))
    .bind(category)
    .fetch_all(&self.pool)
    .await?;
    Ok(projects)
  }

  async fn find_project(&self, id: &str) -> AppResult<Option<Project>> {
    let project = sqlx::query_as(&format!("SELECT {} FROM projects WHERE id = $1", PROJECT_COLUMNS))
      .bind(id)
      .fetch_optional(&self.pool)
      .await?;
    Ok(project)
  }

  #[instrument(name = "PgCheckoutRepo::create_reservation", skip_all, fields(project_id = %order.project.id))]
  async fn create_reservation(&self, order: &CheckoutOrder) -> AppResult<ReservationDetails> {
    // Dropping `tx` without commit rolls everything back.
    let mut tx = self.pool.begin().await?;
    let now = Utc::now();

    let buyer = upsert_buyer(&mut tx, order).await?;
    let payment_info = PaymentInfoRecord::new(&order.payment, now);
    insert_payment_info(&mut tx, &payment_info).await?;

    let mut inserted = None;
    for attempt in 1..=MAX_RESERVATION_NUMBER_ATTEMPTS {
      let candidate = order.new_reservation((self.next_number)(), buyer.id, payment_info.id, now);
      if let Some(row) = try_insert_reservation(&mut tx, &candidate).await? {
        inserted = Some(row);
        break;
      }
      debug!(attempt, number = %candidate.reservation_number, "Reservation number already taken, drawing again.");
    }
    let Some(reservation) = inserted else {
      warn!("Could not allocate a unique reservation number.");
      return Err(AppError::Internal("Could not allocate a unique reservation number".to_string()));
    };

    let details = load_details(&mut tx, reservation).await?;
    tx.commit().await?;
    Ok(details)
  }

  async fn list_reservations(&self) -> AppResult<Vec<ReservationDetails>> {
    let mut conn = self.pool.acquire().await?;
    let reservations: Vec<Reservation> = sqlx::query_as(&format!(
      "SELECT {} FROM reservations ORDER BY created_at DESC",
      RESERVATION_COLUMNS
    ))
    .fetch_all(&mut *conn)
    .await?;

    let mut details = Vec::with_capacity(reservations.len());
    for reservation in reservations {
      details.push(load_details(&mut conn, reservation).await?);
    }
    Ok(details)
  }

  async fn find_reservation(&self, id: Uuid) -> AppResult<Option<ReservationDetails>> {
    let mut conn = self.pool.acquire().await?;
    let reservation: Option<Reservation> =
      sqlx::query_as(&format!("SELECT {} FROM reservations WHERE id = $1", RESERVATION_COLUMNS))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    match reservation {
      Some(r) => Ok(Some(load_details(&mut conn, r).await?)),
      None => Ok(None),
    }
  }

  async fn find_reservation_by_number(&self, number: &str) -> AppResult<Option<ReservationDetails>> {
    let mut conn = self.pool.acquire().await?;
    let reservation: Option<Reservation> = sqlx::query_as(&format!(
      "SELECT {} FROM reservations WHERE reservation_number = $1",
      RESERVATION_COLUMNS
    ))
    .bind(number)
    .fetch_optional(&mut *conn)
    .await?;
    match reservation {
      Some(r) => Ok(Some(load_details(&mut conn, r).await?)),
      None => Ok(None),
    }
  }

  async fn update_reservation_status(&self, id: Uuid, next: ReservationStatus) -> AppResult<ReservationDetails> {
    let mut tx = self.pool.begin().await?;
    let mut reservation: Reservation = sqlx::query_as(&format!(
      "SELECT {} FROM reservations WHERE id = $1 FOR UPDATE",
      RESERVATION_COLUMNS
    ))
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(reservation_not_found)?;

    if !reservation.status.can_transition_to(next) {
      return Err(transition_error(reservation.status, next));
    }
    reservation.apply_status(next, Utc::now());

    sqlx::query(
      "UPDATE reservations SET status = $2, updated_at = $3, confirmed_at = $4, cancelled_at = $5, \
         completed_at = $6 WHERE id = $1",
    )
    .bind(reservation.id)
    .bind(reservation.status)
    .bind(reservation.updated_at)
    .bind(reservation.confirmed_at)
    .bind(reservation.cancelled_at)
    .bind(reservation.completed_at)
    .execute(&mut *tx)
    .await?;

    let details = load_details(&mut tx, reservation).await?;
    tx.commit().await?;
    Ok(details)
  }

  async fn row_counts(&self) -> AppResult<RowCounts> {
    let (buyers, payment_infos, reservations): (i64, i64, i64) = sqlx::query_as(
      "SELECT (SELECT COUNT(*) FROM buyers), (SELECT COUNT(*) FROM payment_infos), \
         (SELECT COUNT(*) FROM reservations)",
    )
    .fetch_one(&self.pool)
    .await?;
    Ok(RowCounts {
      buyers,
      payment_infos,
      reservations,
    })
  }

  async fn seed_projects(&self, projects: &[Project]) -> AppResult<usize> {
    let mut tx = self.pool.begin().await?;
    let mut added = 0;
    for p in projects {
      let result = sqlx::query(&format!(
        "INSERT INTO projects ({}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16) \
         ON CONFLICT (id) DO NOTHING",
        PROJECT_COLUMNS
      ))
      .bind(&p.id)
      .bind(&p.name)
      .bind(&p.description)
      .bind(p.category)
      .bind(p.price)
      .bind(&p.currency)
      .bind(&p.images)
      .bind(&p.features)
      .bind(p.area)
      .bind(p.rooms)
      .bind(p.bathrooms)
      .bind(p.floors)
      .bind(&p.style)
      .bind(p.is_active)
      .bind(p.created_at)
      .bind(p.updated_at)
      .execute(&mut *tx)
      .await?;
      added += result.rows_affected() as usize;
    }
    tx.commit().await?;
    Ok(added)
  }
}
