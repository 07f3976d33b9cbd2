//! 활동 스냅샷 스트림.

use arcmonitor_core::error::CoreError;
use arcmonitor_core::models::activity::{ActivitySnapshot, WindowIdentity};
use tracing::debug;

use super::{parse_timestamp, SqliteStorage};

impl SqliteStorage {
    /// 활동 스냅샷 저장 후 행 ID 반환
    pub(crate) fn insert_activity(&self, snapshot: &ActivitySnapshot) -> Result<i64, CoreError> {
        let id = self.with_conn("활동 저장 실패", |conn| {
            conn.execute(
                "INSERT INTO activities
                 (timestamp, window_title, process_name, screenshot, ocr_text, active_session, artifact_path)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                rusqlite::params![
                    snapshot.timestamp.to_rfc3339(),
                    snapshot.window.title,
                    snapshot.window.process,
                    snapshot.thumbnail,
                    snapshot.extracted_text,
                    snapshot.active_session,
                    snapshot.artifact_path,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })?;

        debug!(
            "활동 저장 #{id}: {} / {} (썸네일 {}B, 텍스트 {}자)",
            snapshot.window.process,
            snapshot.window.title,
            snapshot.thumbnail.len(),
            snapshot.extracted_text.chars().count()
        );
        Ok(id)
    }

    pub(crate) fn query_recent_activity(
        &self,
        limit: usize,
    ) -> Result<Vec<ActivitySnapshot>, CoreError> {
        self.with_conn("활동 조회 실패", |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, timestamp, window_title, process_name, screenshot, ocr_text,
                        active_session, artifact_path
                 FROM activities
                 WHERE active_session = 1
                 ORDER BY id DESC
                 LIMIT ?1",
            )?;
            let rows = stmt.query_map([limit as i64], |row| {
                let ts: String = row.get(1)?;
                let thumbnail: Option<Vec<u8>> = row.get(4)?;
                Ok(ActivitySnapshot {
                    id: Some(row.get(0)?),
                    timestamp: parse_timestamp(&ts),
                    window: WindowIdentity::new(row.get::<_, String>(2)?, row.get::<_, String>(3)?),
                    thumbnail: thumbnail.unwrap_or_default(),
                    extracted_text: row.get(5)?,
                    active_session: row.get(6)?,
                    artifact_path: row.get(7)?,
                })
            })?;
            rows.collect()
        })
    }
}
