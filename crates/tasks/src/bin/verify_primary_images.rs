//! Check the primary-image invariants over the images table. Exits
//! non-zero when violations are found.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use plinth_tasks::verify_primary_images;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "plinth_tasks=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url =
        std::env::var("DATABASE_URL").map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;
    let pool = plinth_db::create_pool(&database_url).await?;

    let report = verify_primary_images(&pool).await?;

    tracing::info!(
        missing_primary = report.missing_primary,
        multiple_primary = report.multiple_primary,
        misparented_primary = report.misparented_primary,
        "Primary-image verification finished"
    );

    if !report.is_clean() {
        anyhow::bail!(
            "primary-image violations: {} entries missing a primary, {} with more than one, {} primaries outside entries",
            report.missing_primary,
            report.multiple_primary,
            report.misparented_primary
        );
    }

    Ok(())
}
