use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{EventTarget, HtmlElement, KeyboardEvent};
use yew::Callback;

// 피아노가 받는 입력 이벤트
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(String), // 눌린 키 값
    Click(String),   // 클릭된 요소의 텍스트
    KeyUp(String),   // 떼어진 키 값
}

impl InputEvent {
    pub fn is_press(&self) -> bool {
        !matches!(self, InputEvent::KeyUp(_))
    }

    // 누름 이벤트의 건반 식별자
    pub fn press_identifier(&self) -> Option<char> {
        match self {
            InputEvent::KeyDown(value) | InputEvent::Click(value) => identifier(value),
            InputEvent::KeyUp(_) => None,
        }
    }

    // 뗌 이벤트의 건반 식별자
    pub fn release_identifier(&self) -> Option<char> {
        match self {
            InputEvent::KeyUp(value) => identifier(value),
            _ => None,
        }
    }
}

/// `value`를 소문자로 바꿨을 때 한 글자인 경우에만 건반 식별자가 됨
pub fn identifier(value: &str) -> Option<char> {
    let lowered = value.to_lowercase();
    let mut chars = lowered.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// 문서 전체의 keydown / click / keyup 리스너. 값을 버리면 세 리스너가 모두 해제됨
pub struct InputListeners {
    _keydown: EventListener,
    _click: EventListener,
    _keyup: EventListener,
}

impl InputListeners {
    pub fn attach(target: &EventTarget, notify: Callback<InputEvent>) -> Self {
        let on_keydown = notify.clone();
        let keydown = EventListener::new(target, "keydown", move |e| {
            if let Some(event) = e.dyn_ref::<KeyboardEvent>() {
                on_keydown.emit(InputEvent::KeyDown(event.key()));
            }
        });

        let on_click = notify.clone();
        let click = EventListener::new(target, "click", move |e| {
            // 클릭된 요소의 텍스트로 건반을 찾음
            let text = e
                .target()
                .and_then(|t| t.dyn_into::<HtmlElement>().ok())
                .map(|element| element.inner_text());
            if let Some(text) = text {
                on_click.emit(InputEvent::Click(text));
            }
        });

        let keyup = EventListener::new(target, "keyup", move |e| {
            if let Some(event) = e.dyn_ref::<KeyboardEvent>() {
                notify.emit(InputEvent::KeyUp(event.key()));
            }
        });

        log::debug!("input listeners attached");
        Self {
            _keydown: keydown,
            _click: click,
            _keyup: keyup,
        }
    }

    pub fn detach(self) {
        log::debug!("input listeners detached");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_are_lowercased_single_chars() {
        assert_eq!(identifier("A"), Some('a'));
        assert_eq!(identifier("a"), Some('a'));
        assert_eq!(identifier(";"), Some(';'));
        assert_eq!(identifier("Shift"), None);
        assert_eq!(identifier(""), None);
        assert_eq!(identifier("Could not play 'a': 404"), None);
    }

    #[test]
    fn press_and_release_sides() {
        let down = InputEvent::KeyDown("S".to_string());
        assert!(down.is_press());
        assert_eq!(down.press_identifier(), Some('s'));
        assert_eq!(down.release_identifier(), None);

        let click = InputEvent::Click("W".to_string());
        assert_eq!(click.press_identifier(), Some('w'));

        let up = InputEvent::KeyUp("s".to_string());
        assert!(!up.is_press());
        assert_eq!(up.press_identifier(), None);
        assert_eq!(up.release_identifier(), Some('s'));
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen_test::*;
    use web_sys::KeyboardEventInit;

    wasm_bindgen_test_configure!(run_in_browser);

    fn key_event(kind: &str, key: &str) -> KeyboardEvent {
        let init = KeyboardEventInit::new();
        init.set_key(key);
        KeyboardEvent::new_with_keyboard_event_init_dict(kind, &init).unwrap()
    }

    #[wasm_bindgen_test]
    fn listeners_forward_until_detached() {
        let document = web_sys::window().unwrap().document().unwrap();
        let received = Rc::new(RefCell::new(Vec::new()));
        let sink = received.clone();
        let listeners = InputListeners::attach(
            &document,
            Callback::from(move |event| sink.borrow_mut().push(event)),
        );

        document.dispatch_event(&key_event("keydown", "a")).unwrap();
        document.dispatch_event(&key_event("keyup", "a")).unwrap();
        assert_eq!(
            *received.borrow(),
            vec![
                InputEvent::KeyDown("a".to_string()),
                InputEvent::KeyUp("a".to_string())
            ]
        );

        listeners.detach();
        document.dispatch_event(&key_event("keydown", "s")).unwrap();
        assert_eq!(received.borrow().len(), 2);
    }
}
