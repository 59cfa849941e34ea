use crate::sound::SoundTicket;
use std::fmt;

// 피아노 위젯에서 발생하는 오류
#[derive(Debug, Clone, PartialEq)]
pub enum PianoError {
    /// 음원 파일을 만들거나 불러오지 못함
    SoundLoad { src: String, reason: String },
    /// 재생 요청이 거부됨
    Playback { key: char, reason: String },
    /// 해당 티켓의 오디오 핸들이 없음
    MissingSound(SoundTicket),
    /// 설정 파일 파싱 실패
    Config(String),
}

impl PianoError {
    // JS 쪽 오류 값을 문자열로 변환 (콘솔 출력과 같은 형식)
    pub fn js_reason(value: &wasm_bindgen::JsValue) -> String {
        match value.as_string() {
            Some(text) => text,
            None => format!("{:?}", value),
        }
    }
}

impl fmt::Display for PianoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PianoError::SoundLoad { src, reason } => {
                write!(f, "failed to load sound '{src}': {reason}")
            }
            PianoError::Playback { key, reason } => {
                write!(f, "playback of '{key}' was rejected: {reason}")
            }
            PianoError::MissingSound(ticket) => {
                write!(f, "no sound handle for '{}' (#{})", ticket.key, ticket.serial)
            }
            PianoError::Config(reason) => write!(f, "invalid piano config: {reason}"),
        }
    }
}

impl std::error::Error for PianoError {}

impl From<serde_yaml::Error> for PianoError {
    fn from(err: serde_yaml::Error) -> Self {
        PianoError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_source() {
        let err = PianoError::SoundLoad {
            src: "sounds/A.mp3".to_string(),
            reason: "404".to_string(),
        };
        assert_eq!(err.to_string(), "failed to load sound 'sounds/A.mp3': 404");

        let err = PianoError::MissingSound(SoundTicket { key: 'q', serial: 3 });
        assert_eq!(err.to_string(), "no sound handle for 'q' (#3)");
    }
}
