//! 메트릭 스트림.

use arcmonitor_core::error::CoreError;
use arcmonitor_core::models::metrics::MetricSample;
use tracing::debug;

use super::{parse_timestamp, SqliteStorage};

impl SqliteStorage {
    pub(crate) fn insert_metric(&self, sample: &MetricSample) -> Result<(), CoreError> {
        self.with_conn("메트릭 저장 실패", |conn| {
            conn.execute(
                "INSERT INTO metrics (timestamp, cpu, memory, network_sent, network_recv)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![
                    sample.timestamp.to_rfc3339(),
                    sample.cpu_percent,
                    sample.memory_percent,
                    sample.bytes_sent as i64,
                    sample.bytes_recv as i64,
                ],
            )
        })?;

        debug!(
            "메트릭 저장: CPU {:.1}%, 메모리 {:.1}%",
            sample.cpu_percent, sample.memory_percent
        );
        Ok(())
    }

    /// 최근 메트릭 샘플 (최신순)
    pub fn recent_metrics(&self, limit: usize) -> Result<Vec<MetricSample>, CoreError> {
        self.with_conn("메트릭 조회 실패", |conn| {
            let mut stmt = conn.prepare(
                "SELECT timestamp, cpu, memory, network_sent, network_recv
                 FROM metrics ORDER BY id DESC LIMIT ?1",
            )?;
            let rows = stmt.query_map([limit as i64], |row| {
                let ts: String = row.get(0)?;
                let sent: i64 = row.get(3)?;
                let recv: i64 = row.get(4)?;
                Ok(MetricSample {
                    timestamp: parse_timestamp(&ts),
                    cpu_percent: row.get(1)?,
                    memory_percent: row.get(2)?,
                    bytes_sent: sent.max(0) as u64,
                    bytes_recv: recv.max(0) as u64,
                })
            })?;
            rows.collect()
        })
    }
}
