//! PostgreSQL implementation of CouponRepository.
//!
//! Provides persistent storage for coupons using PostgreSQL. Every write is a
//! single statement with `RETURNING`, so each update is atomic per row and
//! the post-update state comes back in the same round trip.

use crate::domain::coupon::{Coupon, CouponFilter, CouponPatch, CouponStatus, FieldPatch};
use crate::domain::foundation::{CouponId, DomainError, ErrorCode, Timestamp};
use crate::ports::CouponRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

const COUPON_COLUMNS: &str = "id, name, description, discount_value, discount_percentage, status, \
     code, expiration_date, responsible_user, use_limit, applicable_categories";

const CODE_UNIQUE_CONSTRAINT: &str = "coupons_code_key";

/// PostgreSQL implementation of the CouponRepository port.
pub struct PostgresCouponRepository {
    pool: PgPool,
}

impl PostgresCouponRepository {
    /// Creates a new PostgresCouponRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a coupon.
#[derive(Debug, sqlx::FromRow)]
struct CouponRow {
    id: Uuid,
    name: String,
    description: String,
    discount_value: Option<f64>,
    discount_percentage: Option<f64>,
    status: String,
    code: String,
    expiration_date: DateTime<Utc>,
    responsible_user: Option<String>,
    use_limit: Option<i64>,
    applicable_categories: Vec<String>,
}

impl TryFrom<CouponRow> for Coupon {
    type Error = DomainError;

    fn try_from(row: CouponRow) -> Result<Self, Self::Error> {
        let status = parse_status(&row.status)?;
        let use_limit = row.use_limit.map(from_db_limit).transpose()?;

        Ok(Coupon {
            id: Some(CouponId::from_uuid(row.id)),
            name: row.name,
            description: row.description,
            discount_value: row.discount_value,
            discount_percentage: row.discount_percentage,
            status,
            code: row.code,
            expiration_date: Timestamp::from_datetime(row.expiration_date),
            responsible_user: row.responsible_user,
            use_limit,
            applicable_categories: row.applicable_categories.into_iter().collect(),
        })
    }
}

fn parse_status(s: &str) -> Result<CouponStatus, DomainError> {
    s.parse::<CouponStatus>()
        .map_err(|e| DomainError::new(ErrorCode::DatabaseError, e))
}

fn from_db_limit(value: i64) -> Result<u32, DomainError> {
    u32::try_from(value).map_err(|_| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid use_limit value: {}", value),
        )
    })
}

// BIGINT column, so every u32 fits.
fn to_db_limit(value: u32) -> i64 {
    i64::from(value)
}

fn required_id(id: Option<CouponId>) -> Result<Uuid, DomainError> {
    id.map(|id| *id.as_uuid())
        .ok_or_else(|| DomainError::new(ErrorCode::CouponIdRequired, "Coupon id is required"))
}

fn not_found(id: Uuid) -> DomainError {
    DomainError::new(ErrorCode::CouponNotFound, "Coupon not found").with_detail("id", id.to_string())
}

fn map_write_error(context: &str, code: Option<&str>, e: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.constraint() == Some(CODE_UNIQUE_CONSTRAINT) {
            let err = DomainError::new(ErrorCode::CouponCodeAlreadyExists, "Coupon code already exists");
            return match code {
                Some(code) => err.with_detail("code", code),
                None => err,
            };
        }
    }
    DomainError::database(context, e)
}

/// Appends `, column = <value>` for a set field and `, column = NULL` for a
/// cleared one.
fn push_assignment<'args, T>(
    builder: &mut QueryBuilder<'args, Postgres>,
    column: &str,
    patch: FieldPatch<T>,
) where
    T: 'args + sqlx::Encode<'args, Postgres> + sqlx::Type<Postgres> + Send,
{
    match patch {
        FieldPatch::Absent => {}
        FieldPatch::Clear => {
            builder.push(format!(", {} = NULL", column));
        }
        FieldPatch::Set(value) => {
            builder.push(format!(", {} = ", column)).push_bind(value);
        }
    }
}

/// Builds the single-row UPDATE for a patch.
fn build_update(id: Uuid, patch: &CouponPatch) -> QueryBuilder<'static, Postgres> {
    let patch = patch.clone();
    let use_limit = match patch.use_limit {
        FieldPatch::Absent => FieldPatch::Absent,
        FieldPatch::Clear => FieldPatch::Clear,
        FieldPatch::Set(limit) => FieldPatch::Set(to_db_limit(limit)),
    };
    let status = match patch.status {
        FieldPatch::Absent => FieldPatch::Absent,
        FieldPatch::Clear => FieldPatch::Clear,
        FieldPatch::Set(status) => FieldPatch::Set(status.as_str()),
    };
    let expiration_date = match patch.expiration_date {
        FieldPatch::Absent => FieldPatch::Absent,
        FieldPatch::Clear => FieldPatch::Clear,
        FieldPatch::Set(at) => FieldPatch::Set(*at.as_datetime()),
    };
    let categories = match patch.applicable_categories {
        FieldPatch::Absent => FieldPatch::Absent,
        FieldPatch::Clear => FieldPatch::Set(Vec::new()),
        FieldPatch::Set(set) => FieldPatch::Set(set.into_iter().collect::<Vec<String>>()),
    };

    let mut builder = QueryBuilder::new("UPDATE coupons SET updated_at = now()");
    push_assignment(&mut builder, "name", patch.name);
    push_assignment(&mut builder, "description", patch.description);
    push_assignment(&mut builder, "discount_value", patch.discount_value);
    push_assignment(&mut builder, "discount_percentage", patch.discount_percentage);
    push_assignment(&mut builder, "status", status);
    push_assignment(&mut builder, "code", patch.code);
    push_assignment(&mut builder, "expiration_date", expiration_date);
    push_assignment(&mut builder, "responsible_user", patch.responsible_user);
    push_assignment(&mut builder, "use_limit", use_limit);
    push_assignment(&mut builder, "applicable_categories", categories);

    builder.push(" WHERE id = ").push_bind(id);
    builder.push(format!(" RETURNING {}", COUPON_COLUMNS));
    builder
}

/// Builds the SELECT for a filter; absent criteria add no clause.
fn build_select(filter: &CouponFilter) -> QueryBuilder<'static, Postgres> {
    let filter = filter.clone();
    let mut builder = QueryBuilder::new(format!("SELECT {} FROM coupons WHERE TRUE", COUPON_COLUMNS));

    if let Some(id) = filter.id {
        builder.push(" AND id = ").push_bind(*id.as_uuid());
    }
    if let Some(name) = filter.name {
        builder.push(" AND name = ").push_bind(name);
    }
    if let Some(description) = filter.description {
        builder.push(" AND description = ").push_bind(description);
    }
    if let Some(value) = filter.discount_value {
        builder.push(" AND discount_value = ").push_bind(value);
    }
    if let Some(percentage) = filter.discount_percentage {
        builder.push(" AND discount_percentage = ").push_bind(percentage);
    }
    if let Some(status) = filter.status {
        builder.push(" AND status = ").push_bind(status.as_str());
    }
    if let Some(code) = filter.code {
        builder.push(" AND code = ").push_bind(code);
    }
    if let Some(user) = filter.responsible_user {
        builder.push(" AND responsible_user = ").push_bind(user);
    }
    if let Some(day) = filter.expiration_date {
        let start = Timestamp::start_of_day(day);
        builder
            .push(" AND expiration_date >= ")
            .push_bind(*start.as_datetime())
            .push(" AND expiration_date < ")
            .push_bind(*start.plus_days(1).as_datetime());
    }
    if let Some(range) = filter.expiration_range {
        builder
            .push(" AND expiration_date BETWEEN ")
            .push_bind(*range.start.as_datetime())
            .push(" AND ")
            .push_bind(*range.end.as_datetime());
    }

    builder
}

#[async_trait]
impl CouponRepository for PostgresCouponRepository {
    async fn find_by_id(&self, id: &CouponId) -> Result<Option<Coupon>, DomainError> {
        let row: Option<CouponRow> = sqlx::query_as(&format!(
            "SELECT {} FROM coupons WHERE id = $1",
            COUPON_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to find coupon", e))?;

        row.map(Coupon::try_from).transpose()
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Coupon>, DomainError> {
        let row: Option<CouponRow> = sqlx::query_as(&format!(
            "SELECT {} FROM coupons WHERE code = $1",
            COUPON_COLUMNS
        ))
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to find coupon by code", e))?;

        row.map(Coupon::try_from).transpose()
    }

    async fn find_by_filter(&self, filter: &CouponFilter) -> Result<Vec<Coupon>, DomainError> {
        let mut builder = build_select(filter);

        let rows: Vec<CouponRow> = builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to list coupons", e))?;

        rows.into_iter().map(Coupon::try_from).collect()
    }

    async fn save(&self, coupon: &Coupon) -> Result<Coupon, DomainError> {
        let use_limit = coupon.use_limit.map(to_db_limit);
        let categories: Vec<String> = coupon.applicable_categories.iter().cloned().collect();

        let row: CouponRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO coupons (
                id, name, description, discount_value, discount_percentage, status,
                code, expiration_date, responsible_user, use_limit, applicable_categories
            ) VALUES (COALESCE($1, gen_random_uuid()), $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                description = EXCLUDED.description,
                discount_value = EXCLUDED.discount_value,
                discount_percentage = EXCLUDED.discount_percentage,
                status = EXCLUDED.status,
                code = EXCLUDED.code,
                expiration_date = EXCLUDED.expiration_date,
                responsible_user = EXCLUDED.responsible_user,
                use_limit = EXCLUDED.use_limit,
                applicable_categories = EXCLUDED.applicable_categories,
                updated_at = now()
            RETURNING {}
            "#,
            COUPON_COLUMNS
        ))
        .bind(coupon.id.map(|id| *id.as_uuid()))
        .bind(&coupon.name)
        .bind(&coupon.description)
        .bind(coupon.discount_value)
        .bind(coupon.discount_percentage)
        .bind(coupon.status.as_str())
        .bind(&coupon.code)
        .bind(coupon.expiration_date.as_datetime())
        .bind(&coupon.responsible_user)
        .bind(use_limit)
        .bind(categories)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error("Failed to save coupon", Some(&coupon.code), e))?;

        Coupon::try_from(row)
    }

    async fn update(&self, patch: &CouponPatch) -> Result<Coupon, DomainError> {
        let id = required_id(patch.id)?;
        let mut builder = build_update(id, patch);

        let row: Option<CouponRow> = builder
            .build_query_as()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                map_write_error(
                    "Failed to update coupon",
                    patch.code.as_set().map(String::as_str),
                    e,
                )
            })?;

        row.ok_or_else(|| not_found(id))?.try_into()
    }

    async fn update_usage(&self, coupon: &Coupon) -> Result<Coupon, DomainError> {
        let id = required_id(coupon.id)?;
        let use_limit = coupon.use_limit.map(to_db_limit);

        let row: Option<CouponRow> = sqlx::query_as(&format!(
            "UPDATE coupons SET use_limit = $2, updated_at = now() WHERE id = $1 RETURNING {}",
            COUPON_COLUMNS
        ))
        .bind(id)
        .bind(use_limit)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to update coupon usage", e))?;

        row.ok_or_else(|| not_found(id))?.try_into()
    }

    async fn update_applicable_categories(&self, coupon: &Coupon) -> Result<Coupon, DomainError> {
        let id = required_id(coupon.id)?;
        let categories: Vec<String> = coupon.applicable_categories.iter().cloned().collect();

        let row: Option<CouponRow> = sqlx::query_as(&format!(
            "UPDATE coupons SET applicable_categories = $2, updated_at = now() \
             WHERE id = $1 RETURNING {}",
            COUPON_COLUMNS
        ))
        .bind(id)
        .bind(categories)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to update coupon categories", e))?;

        row.ok_or_else(|| not_found(id))?.try_into()
    }
}
