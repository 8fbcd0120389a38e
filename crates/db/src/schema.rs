use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

const STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        name VARCHAR(255) NOT NULL,
        email VARCHAR(255) NOT NULL UNIQUE,
        password_hash VARCHAR(255) NOT NULL,
        role VARCHAR(16) NOT NULL DEFAULT 'user',
        created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
        CONSTRAINT valid_role CHECK (role IN ('user', 'owner', 'admin'))
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS venues (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        name VARCHAR(255) NOT NULL,
        address VARCHAR(512) NOT NULL,
        city VARCHAR(255) NOT NULL,
        description TEXT NULL,
        rating DOUBLE PRECISION NOT NULL DEFAULT 0,
        price_per_hour DOUBLE PRECISION NOT NULL,
        is_approved BOOLEAN NOT NULL DEFAULT FALSE,
        owner_id UUID NOT NULL REFERENCES users(id),
        created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS courts (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        venue_id UUID NOT NULL REFERENCES venues(id) ON DELETE CASCADE,
        name VARCHAR(255) NOT NULL,
        sport_type VARCHAR(64) NOT NULL,
        price_per_hour DOUBLE PRECISION NOT NULL,
        is_active BOOLEAN NOT NULL DEFAULT TRUE,
        created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS time_slots (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        venue_id UUID NOT NULL REFERENCES venues(id) ON DELETE CASCADE,
        court_id UUID NOT NULL REFERENCES courts(id) ON DELETE CASCADE,
        day_of_week SMALLINT NOT NULL,
        start_time TIME NOT NULL,
        end_time TIME NOT NULL,
        is_available BOOLEAN NOT NULL DEFAULT TRUE,
        created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
        CONSTRAINT valid_day_of_week CHECK (day_of_week BETWEEN 0 AND 6),
        CONSTRAINT valid_time_range CHECK (end_time > start_time)
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS bookings (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        user_id UUID NOT NULL REFERENCES users(id),
        venue_id UUID NOT NULL REFERENCES venues(id) ON DELETE CASCADE,
        court_id UUID NOT NULL REFERENCES courts(id) ON DELETE CASCADE,
        booking_date DATE NOT NULL,
        start_time TIME NOT NULL,
        end_time TIME NOT NULL,
        total_price DOUBLE PRECISION NOT NULL,
        status VARCHAR(16) NOT NULL DEFAULT 'confirmed',
        created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
        CONSTRAINT valid_booking_range CHECK (end_time > start_time),
        CONSTRAINT valid_status CHECK (status IN ('confirmed', 'cancelled'))
    );
    "#,
    // At most one confirmed booking may start at a given court/date/time
    r#"
    CREATE UNIQUE INDEX IF NOT EXISTS uq_bookings_confirmed_start
        ON bookings(court_id, booking_date, start_time)
        WHERE status = 'confirmed';
    "#,
    "CREATE INDEX IF NOT EXISTS idx_venues_owner_id ON venues(owner_id);",
    "CREATE INDEX IF NOT EXISTS idx_venues_city ON venues(city);",
    "CREATE INDEX IF NOT EXISTS idx_courts_venue_id ON courts(venue_id);",
    "CREATE INDEX IF NOT EXISTS idx_courts_sport_type ON courts(LOWER(sport_type));",
    "CREATE INDEX IF NOT EXISTS idx_time_slots_court_day ON time_slots(court_id, day_of_week);",
    "CREATE INDEX IF NOT EXISTS idx_time_slots_venue_id ON time_slots(venue_id);",
    "CREATE INDEX IF NOT EXISTS idx_bookings_court_date ON bookings(court_id, booking_date);",
    "CREATE INDEX IF NOT EXISTS idx_bookings_user_id ON bookings(user_id);",
    "CREATE INDEX IF NOT EXISTS idx_bookings_venue_id ON bookings(venue_id);",
];

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    for statement in STATEMENTS {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
