use crate::error::PianoError;
use crate::sound::{AssetReport, SoundBackend, SoundEvent, SoundTicket};
use gloo::events::EventListener;
use gloo_net::http::{Method, RequestBuilder};
use std::collections::HashMap;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlAudioElement;
use yew::Callback;

// 재생 요청 하나에 해당하는 오디오 요소와 리스너
struct Voice {
    audio: HtmlAudioElement,
    _listeners: [EventListener; 3],
}

/// `HtmlAudioElement` 기반 [`SoundBackend`]. 티켓마다 오디오 요소를 하나씩 만들고,
/// 요소 이벤트를 [`SoundEvent`]로 바꿔 `notify`에 전달함
pub struct WebSound {
    volume: f64,
    notify: Callback<SoundEvent>,
    voices: HashMap<SoundTicket, Voice>,
}

impl WebSound {
    pub fn new(volume: f64, notify: Callback<SoundEvent>) -> Self {
        Self {
            volume,
            notify,
            voices: HashMap::new(),
        }
    }
}

impl SoundBackend for WebSound {
    fn load(&mut self, ticket: SoundTicket, src: &str) -> Result<(), PianoError> {
        let audio = HtmlAudioElement::new_with_src(src).map_err(|err| PianoError::SoundLoad {
            src: src.to_string(),
            reason: PianoError::js_reason(&err),
        })?;
        audio.set_volume(self.volume);

        // 끊김 없이 재생할 수 있을 때 알림
        let notify = self.notify.clone();
        let ready = EventListener::new(&audio, "canplaythrough", move |_| {
            notify.emit(SoundEvent::Ready(ticket));
        });

        // 끝까지 재생되었거나 멈췄을 때 알림
        let notify = self.notify.clone();
        let paused = EventListener::new(&audio, "pause", move |_| {
            notify.emit(SoundEvent::Paused(ticket));
        });

        let notify = self.notify.clone();
        let error_audio = audio.clone();
        let error_src = src.to_string();
        let failed = EventListener::new(&audio, "error", move |_| {
            let reason = match error_audio.error() {
                Some(media_error) => format!("media error code {}", media_error.code()),
                None => "unknown media error".to_string(),
            };
            notify.emit(SoundEvent::Failed(
                ticket,
                PianoError::SoundLoad {
                    src: error_src.clone(),
                    reason,
                },
            ));
        });

        self.voices.insert(
            ticket,
            Voice {
                audio,
                _listeners: [ready, paused, failed],
            },
        );
        Ok(())
    }

    fn start(&mut self, ticket: SoundTicket) -> Result<(), PianoError> {
        let voice = self
            .voices
            .get(&ticket)
            .ok_or(PianoError::MissingSound(ticket))?;
        let promise: js_sys::Promise = voice.audio.play().map_err(|err| PianoError::Playback {
            key: ticket.key,
            reason: PianoError::js_reason(&err),
        })?;

        let notify = self.notify.clone();
        wasm_bindgen_futures::spawn_local(async move {
            match JsFuture::from(promise).await {
                Ok(_) => notify.emit(SoundEvent::Started(ticket)),
                Err(err) => notify.emit(SoundEvent::Failed(
                    ticket,
                    PianoError::Playback {
                        key: ticket.key,
                        reason: PianoError::js_reason(&err),
                    },
                )),
            }
        });
        Ok(())
    }

    fn release(&mut self, ticket: SoundTicket) {
        // 리스너도 함께 해제됨
        self.voices.remove(&ticket);
    }
}

/// 각 음원을 `HEAD` 요청으로 확인함. 응답이 OK가 아니거나 네트워크 오류면
/// 없는 파일로 처리
pub async fn probe_assets(sources: Vec<String>) -> AssetReport {
    let mut report = AssetReport::default();
    for src in sources {
        let available = match RequestBuilder::new(&src).method(Method::HEAD).send().await {
            Ok(response) => response.ok(),
            Err(err) => {
                log::debug!("probe of {} failed: {}", src, err);
                false
            }
        };
        if !available {
            report.mark_missing(src);
        }
    }
    log::debug!("asset probe finished, {} missing", report.missing_count());
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_unknown_ticket_is_an_error() {
        let mut sound = WebSound::new(1.0, Callback::from(|_: SoundEvent| ()));
        let ticket = SoundTicket { key: 'a', serial: 4 };
        assert_eq!(sound.start(ticket), Err(PianoError::MissingSound(ticket)));

        // 없는 티켓 해제는 아무 일도 하지 않음
        sound.release(ticket);
        assert!(sound.voices.is_empty());
    }
}
