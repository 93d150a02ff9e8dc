//! Promote the oldest image of each entry to primary where the flag is
//! missing. Safe to re-run; pass `--dry-run` to report without writing.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use plinth_tasks::backfill_primary_images;

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

    let mut dry_run = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--dry-run" => dry_run = true,
            other => anyhow::bail!("unknown argument {other:?}; usage: backfill-primary-images [--dry-run]"),
        }
    }

    let database_url =
        std::env::var("DATABASE_URL").map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;
    let pool = plinth_db::create_pool(&database_url).await?;

    let report = backfill_primary_images(&pool, dry_run).await?;

    tracing::info!(
        dry_run,
        entries_with_images = report.entries_with_images,
        already_primary = report.already_primary,
        promoted = report.promoted,
        "Primary-image backfill finished"
    );

    Ok(())
}
