use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{ParkingSpotStore, StoreError, StoreResult};
use crate::models::{Page, PageRequest, ParkingSpot};

const SELECT_PARKING_SPOT: &str = r#"
    SELECT
        id, parking_spot_number, license_plate_car, model_car, brand_car,
        color_car, responsible_name, apartment, block, registration_date
    FROM tb_parking_spot
"#;

const UPSERT_PARKING_SPOT: &str = r#"
    INSERT INTO tb_parking_spot (
        id, parking_spot_number, license_plate_car, model_car, brand_car,
        color_car, responsible_name, apartment, block, registration_date
    )
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
    ON CONFLICT (id) DO UPDATE SET
        parking_spot_number = EXCLUDED.parking_spot_number,
        license_plate_car = EXCLUDED.license_plate_car,
        model_car = EXCLUDED.model_car,
        brand_car = EXCLUDED.brand_car,
        color_car = EXCLUDED.color_car,
        responsible_name = EXCLUDED.responsible_name,
        apartment = EXCLUDED.apartment,
        block = EXCLUDED.block
    RETURNING
        id, parking_spot_number, license_plate_car, model_car, brand_car,
        color_car, responsible_name, apartment, block, registration_date
"#;

const UPDATE_PARKING_SPOT: &str = r#"
    UPDATE tb_parking_spot SET
        parking_spot_number = $2,
        license_plate_car = $3,
        model_car = $4,
        brand_car = $5,
        color_car = $6,
        responsible_name = $7,
        apartment = $8,
        block = $9
    WHERE id = $1
    RETURNING
        id, parking_spot_number, license_plate_car, model_car, brand_car,
        color_car, responsible_name, apartment, block, registration_date
"#;

#[derive(Clone)]
pub struct PgParkingSpotRepository {
    pool: PgPool,
}

impl PgParkingSpotRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ParkingSpotStore for PgParkingSpotRepository {
    async fn save(&self, spot: &ParkingSpot) -> StoreResult<ParkingSpot> {
        let mut tx = self.pool.begin().await?;

        // registration_date is only written on insert; the upsert never touches it.
        let saved = sqlx::query_as::<_, ParkingSpot>(UPSERT_PARKING_SPOT)
            .bind(spot.id)
            .bind(&spot.parking_spot_number)
            .bind(&spot.license_plate_car)
            .bind(&spot.model_car)
            .bind(&spot.brand_car)
            .bind(&spot.color_car)
            .bind(&spot.responsible_name)
            .bind(&spot.apartment)
            .bind(&spot.block)
            .bind(spot.registration_date)
            .fetch_one(&mut *tx)
            .await
            .map_err(StoreError::from_sqlx)?;

        tx.commit().await?;
        Ok(saved)
    }

    async fn update(&self, spot: &ParkingSpot) -> StoreResult<Option<ParkingSpot>> {
        let mut tx = self.pool.begin().await?;

        // A row deleted since the caller read it stays deleted.
        let updated = sqlx::query_as::<_, ParkingSpot>(UPDATE_PARKING_SPOT)
            .bind(spot.id)
            .bind(&spot.parking_spot_number)
            .bind(&spot.license_plate_car)
            .bind(&spot.model_car)
            .bind(&spot.brand_car)
            .bind(&spot.color_car)
            .bind(&spot.responsible_name)
            .bind(&spot.apartment)
            .bind(&spot.block)
            .fetch_optional(&mut *tx)
            .await
            .map_err(StoreError::from_sqlx)?;

        tx.commit().await?;
        Ok(updated)
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<ParkingSpot>> {
        let query = format!("{} WHERE id = $1", SELECT_PARKING_SPOT);
        let spot = sqlx::query_as::<_, ParkingSpot>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(spot)
    }

    async fn delete_by_id(&self, id: Uuid) -> StoreResult<bool> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM tb_parking_spot WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    async fn exists_by_license_plate_car(&self, license_plate_car: &str) -> StoreResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM tb_parking_spot WHERE license_plate_car = $1)",
        )
        .bind(license_plate_car)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn exists_by_parking_spot_number(&self, parking_spot_number: &str) -> StoreResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM tb_parking_spot WHERE parking_spot_number = $1)",
        )
        .bind(parking_spot_number)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn exists_by_apartment_and_block(
        &self,
        apartment: &str,
        block: &str,
    ) -> StoreResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM tb_parking_spot WHERE apartment = $1 AND block = $2)",
        )
        .bind(apartment)
        .bind(block)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn find_all(&self, request: &PageRequest) -> StoreResult<Page<ParkingSpot>> {
        let mut tx = self.pool.begin().await?;

        // Count and slice must see the same snapshot.
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tb_parking_spot")
            .fetch_one(&mut *tx)
            .await?;

        // Sort columns come from a closed enum, so interpolation is safe.
        let query = format!(
            "{} ORDER BY {}, id ASC LIMIT $1 OFFSET $2",
            SELECT_PARKING_SPOT, request.sort
        );
        let content = sqlx::query_as::<_, ParkingSpot>(&query)
            .bind(request.size as i64)
            .bind(request.offset().min(i64::MAX as u64) as i64)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Page::new(content, request, total.max(0) as u64))
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
