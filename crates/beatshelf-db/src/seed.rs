//! Fixed sample catalog and the operation that swaps it in.

use sea_orm::{DbErr, EntityTrait, Set, TransactionTrait};

use crate::entities::track;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedTrack {
    pub title: &'static str,
    pub artist: &'static str,
    pub genre: &'static str,
    pub duration: &'static str,
    pub audio_url: &'static str,
    pub cover_url: &'static str,
    pub plays: i32,
    pub likes: i32,
}

impl SeedTrack {
    #[allow(clippy::too_many_arguments)]
    const fn new(
        title: &'static str,
        artist: &'static str,
        genre: &'static str,
        duration: &'static str,
        audio_url: &'static str,
        cover_url: &'static str,
        plays: i32,
        likes: i32,
    ) -> Self {
        Self {
            title,
            artist,
            genre,
            duration,
            audio_url,
            cover_url,
            plays,
            likes,
        }
    }

    /// Row to insert; `id` and `uploaded_at` stay unset so the store assigns them.
    pub fn to_active_model(&self) -> track::ActiveModel {
        track::ActiveModel {
            title: Set(self.title.to_string()),
            artist: Set(self.artist.to_string()),
            genre: Set(self.genre.to_string()),
            duration: Set(self.duration.to_string()),
            audio_url: Set(self.audio_url.to_string()),
            cover_url: Set(Some(self.cover_url.to_string())),
            plays: Set(self.plays),
            likes: Set(self.likes),
            ..Default::default()
        }
    }
}

#[rustfmt::skip]
pub const SEED_TRACKS: [SeedTrack; 15] = [
    SeedTrack::new("Midnight City", "M83", "Synthwave", "4:04", "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-1.mp3", "https://images.unsplash.com/photo-1614149162883-504ce4d13909?w=400", 245_000, 18_500),
    SeedTrack::new("Genesis", "Justice", "Electronic", "3:48", "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-2.mp3", "https://images.unsplash.com/photo-1571330735066-03aaa9429d89?w=400", 198_000, 14_200),
    SeedTrack::new("Strobe", "Deadmau5", "Progressive House", "10:37", "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-3.mp3", "https://images.unsplash.com/photo-1470225620780-dba8ba36b745?w=400", 420_000, 32_000),
    SeedTrack::new("Scary Monsters", "Skrillex", "Dubstep", "4:03", "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-4.mp3", "https://images.unsplash.com/photo-1493225457124-a3eb161ffa5f?w=400", 567_000, 41_000),
    SeedTrack::new("Language", "Porter Robinson", "Electronic", "4:43", "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-5.mp3", "https://images.unsplash.com/photo-1511379938547-c1f69419868d?w=400", 312_000, 25_800),
    SeedTrack::new("Animals", "Martin Garrix", "Big Room House", "5:02", "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-6.mp3", "https://images.unsplash.com/photo-1487180144351-b8472da7d491?w=400", 892_000, 67_000),
    SeedTrack::new("Levels", "Avicii", "Progressive House", "3:19", "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-7.mp3", "https://images.unsplash.com/photo-1508700115892-45ecd05ae2ad?w=400", 1_245_000, 95_000),
    SeedTrack::new("Titanium", "David Guetta", "Electro House", "4:05", "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-8.mp3", "https://images.unsplash.com/photo-1514525253161-7a46d19cd819?w=400", 678_000, 52_000),
    SeedTrack::new("One More Time", "Daft Punk", "House", "5:20", "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-9.mp3", "https://images.unsplash.com/photo-1459749411175-04bf5292ceea?w=400", 1_560_000, 120_000),
    SeedTrack::new("Faded", "Alan Walker", "Progressive House", "3:32", "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-10.mp3", "https://images.unsplash.com/photo-1445985543470-41fba5c3144a?w=400", 987_000, 78_000),
    SeedTrack::new("Clarity", "Zedd", "Electro House", "4:31", "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-11.mp3", "https://images.unsplash.com/photo-1506157786151-b8491531f063?w=400", 534_000, 42_000),
    SeedTrack::new("Wake Me Up", "Avicii", "Progressive House", "4:09", "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-12.mp3", "https://images.unsplash.com/photo-1518972734183-c0ea79a3eee1?w=400", 1_123_000, 89_000),
    SeedTrack::new("Lean On", "Major Lazer", "Electronic", "2:56", "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-13.mp3", "https://images.unsplash.com/photo-1487180144351-b8472da7d491?w=400", 2_340_000, 180_000),
    SeedTrack::new("Don't You Worry Child", "Swedish House Mafia", "Progressive House", "3:32", "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-14.mp3", "https://images.unsplash.com/photo-1493225457124-a3eb161ffa5f?w=400", 876_000, 65_000),
    SeedTrack::new("Summertime Sadness", "Lana Del Rey", "Indie Electronic", "4:25", "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-15.mp3", "https://images.unsplash.com/photo-1511379938547-c1f69419868d?w=400", 654_000, 51_000),
];

/// Replace the whole catalog with [`SEED_TRACKS`].
///
/// Runs as one transaction: if the delete or the insert fails, the
/// transaction is dropped without commit and the previous rows survive.
/// Returns the number of rows inserted.
pub async fn reseed<C>(db: &C) -> Result<u64, DbErr>
where
    C: TransactionTrait,
{
    let txn = db.begin().await?;

    let removed = track::Entity::delete_many().exec(&txn).await?.rows_affected;

    let inserted = track::Entity::insert_many(SEED_TRACKS.iter().map(SeedTrack::to_active_model))
        .exec_without_returning(&txn)
        .await?;

    txn.commit().await?;

    tracing::info!(removed, inserted, "catalog reseeded");
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{ActiveValue, DatabaseBackend, MockDatabase, MockExecResult};
    use std::collections::HashSet;

    fn exec_ok(rows_affected: u64) -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected,
        }
    }

    #[test]
    fn test_seed_has_fifteen_distinct_titles() {
        assert_eq!(SEED_TRACKS.len(), 15);
        let titles: HashSet<_> = SEED_TRACKS.iter().map(|t| t.title).collect();
        assert_eq!(titles.len(), 15);
    }

    #[test]
    fn test_seed_rows_are_complete() {
        for t in &SEED_TRACKS {
            assert!(!t.title.is_empty());
            assert!(!t.artist.is_empty());
            assert!(!t.genre.is_empty());
            assert!(t.audio_url.starts_with("https://"));
            assert!(t.cover_url.starts_with("https://"));
            assert!(t.plays > t.likes);
        }
    }

    #[test]
    fn test_seed_keeps_apostrophe_literal() {
        assert!(SEED_TRACKS
            .iter()
            .any(|t| t.title == "Don't You Worry Child"));
    }

    #[test]
    fn test_to_active_model_leaves_server_columns_unset() {
        let am = SEED_TRACKS[0].to_active_model();
        assert!(matches!(am.id, ActiveValue::NotSet));
        assert!(matches!(am.uploaded_at, ActiveValue::NotSet));
        assert_eq!(am.title, Set("Midnight City".to_string()));
        assert_eq!(am.cover_url, Set(Some(SEED_TRACKS[0].cover_url.to_string())));
        assert_eq!(am.plays, Set(245_000));
        assert_eq!(am.likes, Set(18_500));
    }

    #[tokio::test]
    async fn test_reseed_deletes_then_inserts() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([exec_ok(4), exec_ok(15)])
            .into_connection();

        let inserted = reseed(&db).await.unwrap();
        assert_eq!(inserted, 15);

        let log = db.into_transaction_log();
        assert_eq!(log.len(), 1);
        let stmts = log[0].statements();
        assert_eq!(stmts.len(), 4);
        assert_eq!(stmts[0].sql, "BEGIN");
        assert!(stmts[1].sql.starts_with(r#"DELETE FROM "tracks""#));
        assert!(stmts[2].sql.starts_with(r#"INSERT INTO "tracks""#));
        // 15 rows of 8 bound columns each
        assert_eq!(stmts[2].values.as_ref().map(|v| v.0.len()), Some(120));
        assert_eq!(stmts[3].sql, "COMMIT");
    }

    #[tokio::test]
    async fn test_reseed_propagates_insert_failure() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([exec_ok(4)])
            .append_exec_errors([DbErr::Custom("duplicate key value".into())])
            .into_connection();

        let err = reseed(&db).await.unwrap_err();
        assert!(err.to_string().contains("duplicate key value"));

        let log = db.into_transaction_log();
        let stmts: Vec<&str> = log
            .iter()
            .flat_map(|t| t.statements())
            .map(|s| s.sql.as_str())
            .collect();
        assert_eq!(stmts.first(), Some(&"BEGIN"));
        assert_eq!(stmts.last(), Some(&"ROLLBACK"));
        assert!(!stmts.contains(&"COMMIT"));
        assert!(stmts.iter().any(|s| s.starts_with(r#"DELETE FROM "tracks""#)));
    }

    #[tokio::test]
    async fn test_reseed_propagates_delete_failure() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_errors([DbErr::Custom("relation \"tracks\" does not exist".into())])
            .into_connection();

        assert!(reseed(&db).await.is_err());
    }
}
