use crate::error::PianoError;
use std::collections::HashSet;

/// 재생 요청 하나의 식별자 (건반 + 요청마다 다른 번호)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoundTicket {
    pub key: char,
    pub serial: u64,
}

/// 백엔드가 티켓별로 돌려보내는 알림
#[derive(Debug, Clone, PartialEq)]
pub enum SoundEvent {
    Ready(SoundTicket),   // 끊김 없이 재생 가능 (canplaythrough)
    Started(SoundTicket), // 재생 시작됨
    Paused(SoundTicket),  // 재생이 멈춤 (끝까지 재생된 경우 포함)
    Failed(SoundTicket, PianoError),
}

impl SoundEvent {
    pub fn ticket(&self) -> SoundTicket {
        match self {
            SoundEvent::Ready(t)
            | SoundEvent::Started(t)
            | SoundEvent::Paused(t)
            | SoundEvent::Failed(t, _) => *t,
        }
    }
}

/// 피아노가 사용하는 오디오 백엔드.
///
/// `load`와 `start`는 작업을 시작만 하고, 결과는 나중에 [`SoundEvent`]로
/// 돌아옴. 소유자가 이를 `Piano::handle_sound`에 전달함
pub trait SoundBackend {
    /// `src`로 새 핸들을 만들고 로딩 시작 (핸들 재사용 없음)
    fn load(&mut self, ticket: SoundTicket, src: &str) -> Result<(), PianoError>;

    /// 로딩된 핸들 재생 시작
    fn start(&mut self, ticket: SoundTicket) -> Result<(), PianoError>;

    /// 핸들과 리스너 해제
    fn release(&mut self, ticket: SoundTicket);
}

/// 검증 시 음원 경로가 존재하는지 확인
pub trait AssetCheck {
    fn is_available(&self, src: &str) -> bool;
}

// 음원 확인 결과 (없는 파일 목록)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetReport {
    missing: HashSet<String>,
}

impl AssetReport {
    pub fn mark_missing(&mut self, src: impl Into<String>) {
        self.missing.insert(src.into());
    }

    pub fn missing_count(&self) -> usize {
        self.missing.len()
    }
}

impl AssetCheck for AssetReport {
    fn is_available(&self, src: &str) -> bool {
        !self.missing.contains(src)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_only_rejects_marked_sources() {
        let mut report = AssetReport::default();
        report.mark_missing("sounds/Q.mp3");
        assert!(report.is_available("sounds/A.mp3"));
        assert!(!report.is_available("sounds/Q.mp3"));
        assert_eq!(report.missing_count(), 1);
    }

    #[test]
    fn every_event_carries_its_ticket() {
        let t = SoundTicket { key: 'a', serial: 7 };
        let failed = SoundEvent::Failed(t, PianoError::Config("x".to_string()));
        assert_eq!(failed.ticket(), t);
        assert_eq!(SoundEvent::Paused(t).ticket(), t);
    }
}
