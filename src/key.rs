use crate::config::SoundLayout;

// 건반 종류 (흰 건반 / 검은 건반)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    White,
    Black,
}

impl KeyKind {
    pub fn tag(self) -> &'static str {
        match self {
            KeyKind::White => "white",
            KeyKind::Black => "black",
        }
    }

    // 건반 요소에 붙는 CSS 클래스
    pub fn class(self) -> &'static str {
        match self {
            KeyKind::White => "white-key",
            KeyKind::Black => "black-key",
        }
    }
}

// 건반 하나의 상태
#[derive(Debug, Clone, PartialEq)]
pub struct Key {
    id: char,              // 건반 식별자 (소문자 한 글자)
    kind: KeyKind,         // 건반 종류
    is_up: bool,           // 떼어진 상태인지 여부
    pressed: bool,         // aria-pressed 값
    error: Option<String>, // 재생 실패 메시지
}

impl Key {
    pub fn new(id: char, kind: KeyKind) -> Self {
        Self {
            id,
            kind,
            is_up: true,
            pressed: false,
            error: None,
        }
    }

    pub fn id(&self) -> char {
        self.id
    }

    pub fn kind(&self) -> KeyKind {
        self.kind
    }

    #[cfg(test)]
    pub fn is_up(&self) -> bool {
        self.is_up
    }

    #[cfg(test)]
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    // 화면에 보이는 라벨 (대문자)
    pub fn label(&self) -> String {
        self.id.to_uppercase().collect()
    }

    // 오류가 있으면 오류 메시지를 대신 표시
    pub fn text(&self) -> String {
        match &self.error {
            Some(message) => message.clone(),
            None => self.label(),
        }
    }

    pub fn aria_pressed(&self) -> &'static str {
        if self.pressed {
            "true"
        } else {
            "false"
        }
    }

    /// 이 건반의 음원 경로. 캐시하지 않으며 백엔드가 매번 새 오디오 핸들을 만듦
    pub fn sound(&self, layout: &SoundLayout) -> String {
        layout.source_for(self.id)
    }

    /// 새 소리를 요청해야 하면 `true`. 누르고 있는 건반은 `false`를 반환해서
    /// 키 반복 입력으로 소리가 다시 재생되지 않음
    pub fn play(&mut self) -> bool {
        if !self.is_up {
            return false;
        }
        self.is_up = false;
        true
    }

    // 재생이 실제로 시작됨
    pub fn sounding(&mut self) {
        self.pressed = true;
        self.error = None;
    }

    pub fn pause(&mut self) {
        self.is_up = true;
        self.pressed = false;
    }

    /// 건반에 오류 메시지를 표시하고 그 메시지를 반환함.
    /// 건반은 떼어진 상태로 돌아가서 다시 재생할 수 있음
    pub fn fail(&mut self, reason: &str) -> String {
        let message = format!("Could not play '{}': {}", self.id, reason);
        self.error = Some(message.clone());
        self.pressed = false;
        self.is_up = true;
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_key_is_released() {
        let key = Key::new('a', KeyKind::White);
        assert!(key.is_up());
        assert!(!key.is_pressed());
        assert_eq!(key.aria_pressed(), "false");
        assert_eq!(key.text(), "A");
    }

    #[test]
    fn play_is_synchronous_and_ignores_held_key() {
        let mut key = Key::new('w', KeyKind::Black);
        assert!(key.play());
        assert!(!key.is_up());
        assert!(!key.play());
        assert!(!key.is_up());
    }

    #[test]
    fn pause_is_idempotent() {
        let mut key = Key::new('s', KeyKind::White);
        key.pause();
        assert!(key.is_up());

        key.play();
        key.sounding();
        assert_eq!(key.aria_pressed(), "true");

        key.pause();
        key.pause();
        assert!(key.is_up());
        assert!(!key.is_pressed());
    }

    #[test]
    fn failure_shows_message_and_releases() {
        let mut key = Key::new('d', KeyKind::White);
        key.play();
        let message = key.fail("404");
        assert_eq!(message, "Could not play 'd': 404");
        assert_eq!(key.text(), message);
        assert!(key.is_up());

        // 다시 재생에 성공하면 오류 표시가 사라짐
        assert!(key.play());
        key.sounding();
        assert_eq!(key.text(), "D");
    }

    #[test]
    fn kinds_have_tag_and_class() {
        assert_eq!(KeyKind::White.tag(), "white");
        assert_eq!(KeyKind::Black.class(), "black-key");
        assert_eq!(
            Key::new('e', KeyKind::Black).sound(&SoundLayout::default()),
            "sounds/E.mp3"
        );
    }
}
