//! One-shot maintenance tasks for the images table.
//!
//! The primary-image flag was introduced after entries already carried
//! images, so historical rows have no primary. `backfill_primary_images`
//! promotes the oldest image of each affected entry and
//! `verify_primary_images` counts whatever violations remain. Both run as
//! standalone binaries against `DATABASE_URL`; both are single-pass and
//! safe to re-run.

use sqlx::PgPool;

/// Counts reported by one backfill run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackfillReport {
    /// Entries that have at least one image.
    pub entries_with_images: i64,
    /// Entries that already had a primary image before the run.
    pub already_primary: i64,
    /// Entries whose oldest image was (or, on a dry run, would be) promoted.
    pub promoted: i64,
}

/// Promote the oldest image (`ORDER BY created_at, id`) to primary for
/// every entry that has images but no primary one.
///
/// The promotion is a single `UPDATE ... FROM` statement, so a crashed run
/// leaves either all candidates promoted or none. Re-running is a no-op:
/// entries that gained a primary are no longer candidates. With `dry_run`
/// the candidates are only counted.
pub async fn backfill_primary_images(
    pool: &PgPool,
    dry_run: bool,
) -> Result<BackfillReport, sqlx::Error> {
    let entries_with_images: i64 =
        sqlx::query_scalar("SELECT COUNT(DISTINCT entry_id) FROM images WHERE entry_id IS NOT NULL")
            .fetch_one(pool)
            .await?;

    // At most one primary per entry (partial unique index), so this counts
    // entries as well as rows.
    let already_primary: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM images WHERE entry_id IS NOT NULL AND is_primary")
            .fetch_one(pool)
            .await?;

    let promoted = if dry_run {
        sqlx::query_scalar(
            "SELECT COUNT(DISTINCT c.entry_id)
             FROM images c
             WHERE c.entry_id IS NOT NULL
               AND NOT EXISTS (
                   SELECT 1 FROM images p
                   WHERE p.entry_id = c.entry_id AND p.is_primary
               )",
        )
        .fetch_one(pool)
        .await?
    } else {
        let result = sqlx::query(
            "UPDATE images
             SET is_primary = TRUE
             FROM (
                 SELECT DISTINCT ON (c.entry_id) c.id
                 FROM images c
                 WHERE c.entry_id IS NOT NULL
                   AND NOT EXISTS (
                       SELECT 1 FROM images p
                       WHERE p.entry_id = c.entry_id AND p.is_primary
                   )
                 ORDER BY c.entry_id, c.created_at, c.id
             ) AS oldest
             WHERE images.id = oldest.id",
        )
        .execute(pool)
        .await?;
        result.rows_affected() as i64
    };

    Ok(BackfillReport {
        entries_with_images,
        already_primary,
        promoted,
    })
}

/// Violation counts reported by one verification run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifyReport {
    /// Entries that have images but no primary image.
    pub missing_primary: i64,
    /// Entries with more than one primary image. The partial unique index
    /// makes this impossible to create; a non-zero count means the index
    /// is gone or was bypassed.
    pub multiple_primary: i64,
    /// Primary flags on images whose parent is an artist or a registration.
    pub misparented_primary: i64,
}

impl VerifyReport {
    /// Whether the table satisfies all primary-image invariants.
    pub fn is_clean(&self) -> bool {
        self.missing_primary == 0 && self.multiple_primary == 0 && self.misparented_primary == 0
    }
}

/// Count every way the primary-image invariants can be violated.
pub async fn verify_primary_images(pool: &PgPool) -> Result<VerifyReport, sqlx::Error> {
    let missing_primary: i64 = sqlx::query_scalar(
        "SELECT COUNT(DISTINCT c.entry_id)
         FROM images c
         WHERE c.entry_id IS NOT NULL
           AND NOT EXISTS (
               SELECT 1 FROM images p
               WHERE p.entry_id = c.entry_id AND p.is_primary
           )",
    )
    .fetch_one(pool)
    .await?;

    let multiple_primary: i64 = sqlx::query_scalar(
        "SELECT COUNT(*)
         FROM (
             SELECT entry_id
             FROM images
             WHERE entry_id IS NOT NULL AND is_primary
             GROUP BY entry_id
             HAVING COUNT(*) > 1
         ) AS dup",
    )
    .fetch_one(pool)
    .await?;

    let misparented_primary: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM images WHERE is_primary AND entry_id IS NULL")
            .fetch_one(pool)
            .await?;

    Ok(VerifyReport {
        missing_primary,
        multiple_primary,
        misparented_primary,
    })
}
