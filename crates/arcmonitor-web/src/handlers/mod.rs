//! API 핸들러 모듈.

pub mod control;
pub mod history;
pub mod media;
pub mod status;

use serde::Deserialize;

/// 개수 제한 쿼리 파라미터
#[derive(Debug, Default, Deserialize)]
pub struct LimitQuery {
    /// 최대 조회 개수 (기본: 설정의 history_limit)
    pub limit: Option<usize>,
}

impl LimitQuery {
    /// 기본값이 적용된 제한 개수 (0은 기본값으로 취급)
    pub fn limit_or(&self, default: usize) -> usize {
        match self.limit {
            Some(0) | None => default,
            Some(n) => n.min(MAX_LIMIT),
        }
    }
}

/// 한 번에 반환하는 최대 레코드 수
const MAX_LIMIT: usize = 500;
