//! 활동 상태 머신.
//!
//! 현재 활성 창, 마지막 활동 시각, 마지막 스크린샷/영상 시각을 추적한다.
//! 모든 판정 함수는 `now`를 인자로 받아 시계에 의존하지 않는다.

use crate::models::activity::WindowIdentity;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;

/// 활동 상태 스냅샷
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityState {
    /// 마지막으로 관측된 활성 창
    pub current_window: WindowIdentity,
    /// 마지막 창 전환 시각 (유휴 시계 기준점)
    pub last_activity_at: DateTime<Utc>,
    /// 마지막 스크린샷 성공 시각
    pub last_screenshot_at: DateTime<Utc>,
    /// 마지막 영상 녹화 성공 시각
    pub last_video_at: DateTime<Utc>,
}

impl ActivityState {
    /// 시작 시각 기준 초기 상태. 창은 아직 관측되지 않음.
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            current_window: WindowIdentity::empty(),
            last_activity_at: started_at,
            last_screenshot_at: started_at,
            last_video_at: started_at,
        }
    }

    /// 관측된 창을 반영한다. 창이 바뀌었으면 유휴 시계를 리셋하고 `true` 반환.
    pub fn observe(&mut self, identity: WindowIdentity, now: DateTime<Utc>) -> bool {
        if identity == self.current_window {
            return false;
        }
        self.current_window = identity;
        self.last_activity_at = now;
        true
    }

    /// 마지막 창 전환 이후 경과 시간 (초, 음수는 0으로)
    pub fn inactive_secs(&self, now: DateTime<Utc>) -> f64 {
        elapsed_secs(self.last_activity_at, now)
    }

    /// 유휴 임계값 미만이면 활성 세션
    pub fn is_active(&self, now: DateTime<Utc>, inactivity_threshold: Duration) -> bool {
        self.inactive_secs(now) < inactivity_threshold.as_secs_f64()
    }

    /// 활성 세션이면서 스크린샷 주기가 경과했는지
    pub fn screenshot_due(
        &self,
        now: DateTime<Utc>,
        screenshot_interval: Duration,
        inactivity_threshold: Duration,
    ) -> bool {
        self.is_active(now, inactivity_threshold)
            && elapsed_secs(self.last_screenshot_at, now) >= screenshot_interval.as_secs_f64()
    }

    /// 영상 주기를 초과했는지 (경계값은 포함하지 않음)
    pub fn video_due(&self, now: DateTime<Utc>, video_interval: Duration) -> bool {
        elapsed_secs(self.last_video_at, now) > video_interval.as_secs_f64()
    }
}

fn elapsed_secs(since: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let millis = (now - since).num_milliseconds().max(0);
    millis as f64 / 1000.0
}

/// 루프와 조회 API가 공유하는 활동 상태 핸들
///
/// 창/시각 튜플은 한 번의 쓰기 잠금 안에서 갱신되므로
/// 읽는 쪽은 절반만 갱신된 상태를 보지 않는다.
#[derive(Debug, Clone)]
pub struct ActivityTracker {
    inner: Arc<RwLock<ActivityState>>,
}

impl ActivityTracker {
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ActivityState::new(started_at))),
        }
    }

    /// 현재 상태 복제본
    pub fn snapshot(&self) -> ActivityState {
        self.inner.read().clone()
    }

    /// 창 관측 반영 후 스크린샷 도래 여부를 한 번에 판정
    ///
    /// 반환: (창 전환 여부, 스크린샷 도래 여부, 반영 후 활성 창)
    pub fn observe_and_check(
        &self,
        identity: WindowIdentity,
        now: DateTime<Utc>,
        screenshot_interval: Duration,
        inactivity_threshold: Duration,
    ) -> (bool, bool, WindowIdentity) {
        let mut state = self.inner.write();
        let changed = state.observe(identity, now);
        let due = state.screenshot_due(now, screenshot_interval, inactivity_threshold);
        (changed, due, state.current_window.clone())
    }

    pub fn video_due(&self, now: DateTime<Utc>, video_interval: Duration) -> bool {
        self.inner.read().video_due(now, video_interval)
    }

    pub fn mark_screenshot(&self, at: DateTime<Utc>) {
        self.inner.write().last_screenshot_at = at;
    }

    pub fn mark_video(&self, at: DateTime<Utc>) {
        self.inner.write().last_video_at = at;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const SHOT: Duration = Duration::from_secs(30);
    const IDLE: Duration = Duration::from_secs(60);

    fn t(secs: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap() + chrono::Duration::seconds(secs)
    }

    #[test]
    fn activity_clock_resets_only_on_change() {
        let mut state = ActivityState::new(t(0));
        assert!(state.observe(WindowIdentity::new("a", "p"), t(5)));
        assert_eq!(state.last_activity_at, t(5));

        assert!(!state.observe(WindowIdentity::new("a", "p"), t(20)));
        assert_eq!(state.last_activity_at, t(5));

        assert!(state.observe(WindowIdentity::new("b", "p"), t(25)));
        assert_eq!(state.last_activity_at, t(25));

        assert!(state.observe(WindowIdentity::new("b", "q"), t(26)));
        assert_eq!(state.last_activity_at, t(26));
    }

    #[test]
    fn screenshot_scenario_0_30_70() {
        let mut state = ActivityState::new(t(0));
        state.observe(WindowIdentity::new("editor", "code"), t(0));

        let mut captures = Vec::new();
        for s in 0..=80 {
            let now = t(s);
            state.observe(WindowIdentity::new("editor", "code"), now);
            if state.screenshot_due(now, SHOT, IDLE) {
                state.last_screenshot_at = now;
                captures.push(s);
            }
        }

        // 30초에 1회, 60초 경계에서 유휴 판정되어 이후 억제
        assert_eq!(captures, vec![30]);
        assert!(!state.screenshot_due(t(70), SHOT, IDLE));
        assert!(state.inactive_secs(t(70)) >= 60.0);
    }

    #[test]
    fn idle_suppresses_even_when_interval_elapsed() {
        let mut state = ActivityState::new(t(0));
        state.observe(WindowIdentity::new("a", "p"), t(0));
        state.last_screenshot_at = t(-600);
        assert!(!state.screenshot_due(t(60), SHOT, IDLE));
        assert!(!state.screenshot_due(t(61), SHOT, IDLE));
        assert!(state.screenshot_due(t(59), SHOT, IDLE));
    }

    #[test]
    fn transition_reactivates_idle_session() {
        let mut state = ActivityState::new(t(0));
        state.observe(WindowIdentity::new("a", "p"), t(0));
        assert!(!state.screenshot_due(t(100), SHOT, IDLE));

        state.observe(WindowIdentity::new("b", "p"), t(100));
        assert!(state.screenshot_due(t(100), SHOT, IDLE));
    }

    #[test]
    fn unchanged_screenshot_time_retries_next_tick() {
        let mut state = ActivityState::new(t(0));
        state.observe(WindowIdentity::new("a", "p"), t(0));
        assert!(state.screenshot_due(t(30), SHOT, IDLE));
        // 캡처 실패: last_screenshot_at 미갱신
        assert!(state.screenshot_due(t(31), SHOT, IDLE));
    }

    #[test]
    fn video_due_is_strictly_greater() {
        let state = ActivityState::new(t(0));
        let interval = Duration::from_secs(1800);
        assert!(!state.video_due(t(1800), interval));
        assert!(state.video_due(t(1801), interval));
    }

    #[test]
    fn clock_going_backwards_counts_as_zero() {
        let state = ActivityState::new(t(10));
        assert_eq!(state.inactive_secs(t(0)), 0.0);
    }

    #[test]
    fn tracker_updates_tuple_atomically() {
        let tracker = ActivityTracker::new(t(0));
        let (changed, due, window) =
            tracker.observe_and_check(WindowIdentity::new("x", "y"), t(3), SHOT, IDLE);
        assert!(changed);
        assert!(!due);
        assert_eq!(window, WindowIdentity::new("x", "y"));

        let snap = tracker.snapshot();
        assert_eq!(snap.current_window, window);
        assert_eq!(snap.last_activity_at, t(3));

        tracker.mark_screenshot(t(40));
        tracker.mark_video(t(41));
        let snap = tracker.snapshot();
        assert_eq!(snap.last_screenshot_at, t(40));
        assert_eq!(snap.last_video_at, t(41));
    }
}
