use crate::config::PianoConfig;
use crate::input::{InputEvent, InputListeners};
use crate::key::{Key, KeyKind};
use crate::piano::Piano;
use crate::sound::{AssetReport, SoundEvent};
use crate::web_audio::{probe_assets, WebSound};
use yew::prelude::*;

// 피아노 컴포넌트 메시지
pub enum PianoMsg {
    Input(InputEvent),            // 키보드 / 클릭 입력
    Sound(SoundEvent),            // 오디오 요소에서 온 알림
    AssetsChecked(AssetReport),   // 음원 확인 완료
}

#[derive(Properties, PartialEq)]
pub struct PianoProps {
    pub config: PianoConfig,
}

// 피아노 컴포넌트
pub struct PianoKeyboard {
    piano: Piano<WebSound>,
    listeners: Option<InputListeners>, // 문서 전체 입력 리스너
}

impl PianoKeyboard {
    // first_serial: 이전 피아노의 티켓 번호와 겹치지 않게 이어서 발급
    fn build(ctx: &Context<Self>, first_serial: u64) -> Piano<WebSound> {
        let config = &ctx.props().config;
        let backend = WebSound::new(config.sounds.volume, ctx.link().callback(PianoMsg::Sound));
        let mut piano = Piano::from_config(config, backend);
        piano.resume_serials(first_serial);

        // 음원 존재 여부는 비동기로 확인한 뒤 검증
        let sources = piano.sound_sources();
        let link = ctx.link().clone();
        wasm_bindgen_futures::spawn_local(async move {
            let report = probe_assets(sources).await;
            link.send_message(PianoMsg::AssetsChecked(report));
        });
        piano
    }

    fn attach(&mut self, ctx: &Context<Self>) {
        let Some(document) = web_sys::window().and_then(|window| window.document()) else {
            log::error!("no document to listen on, piano input is disabled");
            return;
        };
        self.listeners = Some(InputListeners::attach(
            &document,
            ctx.link().callback(PianoMsg::Input),
        ));
    }

    fn detach(&mut self) {
        if let Some(listeners) = self.listeners.take() {
            listeners.detach();
        }
    }

    fn render_key(key: &Key) -> Html {
        html! {
            <kbd
                key={key.id().to_string()}
                class={classes!("key", key.kind().class(), key.error().map(|_| "error"))}
                aria-pressed={key.aria_pressed()}
            >
                { key.text() }
            </kbd>
        }
    }
}

impl Component for PianoKeyboard {
    type Message = PianoMsg;
    type Properties = PianoProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            piano: Self::build(ctx, 0),
            listeners: None,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            PianoMsg::Input(event) => {
                if event.is_press() {
                    self.piano.play_event(&event)
                } else {
                    self.piano.stop_event(&event)
                }
            }
            PianoMsg::Sound(event) => {
                self.piano.handle_sound(event);
                true
            }
            PianoMsg::AssetsChecked(report) => {
                let validation = self.piano.validate(&report);
                log::info!(
                    "piano ready: {} white / {} black keys, valid = {}",
                    validation.white,
                    validation.black,
                    validation.passed()
                );
                false
            }
        }
    }

    // 설정이 바뀌면 건반을 다시 생성
    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props() == old_props {
            return false;
        }
        self.piano = Self::build(ctx, self.piano.next_serial());
        true
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render {
            self.attach(ctx);
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.detach();
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        // 흰 건반 개수는 CSS에서 건반 너비 계산에 사용됨
        let style = format!("--num-keys: {}", self.piano.num_keys());

        html! {
            <div class="piano" style={style}>
                <div class="white-keys">
                    { for self.piano.keys_of(KeyKind::White).map(Self::render_key) }
                </div>
                <div class="black-keys">
                    { for self.piano.keys_of(KeyKind::Black).map(Self::render_key) }
                </div>
            </div>
        }
    }
}
