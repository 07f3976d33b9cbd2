//! 영상 레코드 스트림.

use arcmonitor_core::error::CoreError;
use arcmonitor_core::models::video::VideoRecord;
use tracing::debug;

use super::{parse_timestamp, SqliteStorage};

impl SqliteStorage {
    pub(crate) fn insert_video(&self, record: &VideoRecord) -> Result<(), CoreError> {
        self.with_conn("영상 레코드 저장 실패", |conn| {
            conn.execute(
                "INSERT INTO videos (timestamp, duration, file_path) VALUES (?1, ?2, ?3)",
                rusqlite::params![
                    record.timestamp.to_rfc3339(),
                    record.duration_seconds,
                    record.file_path,
                ],
            )
        })?;

        debug!("영상 레코드 저장: {} ({}초)", record.file_path, record.duration_seconds);
        Ok(())
    }

    /// 최근 영상 레코드 (최신순)
    pub fn recent_videos(&self, limit: usize) -> Result<Vec<VideoRecord>, CoreError> {
        self.with_conn("영상 레코드 조회 실패", |conn| {
            let mut stmt = conn.prepare(
                "SELECT timestamp, duration, file_path FROM videos ORDER BY id DESC LIMIT ?1",
            )?;
            let rows = stmt.query_map([limit as i64], |row| {
                let ts: String = row.get(0)?;
                Ok(VideoRecord {
                    timestamp: parse_timestamp(&ts),
                    duration_seconds: row.get(1)?,
                    file_path: row.get(2)?,
                })
            })?;
            rows.collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{ArtifactDirs, SqliteStorage};
    use arcmonitor_core::models::video::VideoRecord;
    use arcmonitor_core::ports::storage::TelemetryStore;
    use chrono::{SubsecRound, Utc};

    #[tokio::test]
    async fn video_record_roundtrip() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = SqliteStorage::open_in_memory(ArtifactDirs::new(dir.path())).unwrap();
        let record = VideoRecord {
            timestamp: Utc::now().trunc_subsecs(0),
            duration_seconds: 10,
            file_path: "videos/recording_20240101_000000.mp4".into(),
        };

        store.append_video(&record).await.unwrap();
        let stored = store.recent_videos(5).unwrap();
        assert_eq!(stored, vec![record]);
    }
}
