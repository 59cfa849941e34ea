use crate::config::PianoConfig;
use crate::tools::piano::PianoKeyboard;
use yew::prelude::*;

mod config;
mod error;
mod input;
mod key;
mod piano;
mod sound;
mod tools;
mod web_audio;

#[derive(Properties, PartialEq)]
struct AppProps {
    config: PianoConfig,
}

// Yew 앱 진입점
#[function_component(App)]
fn app(props: &AppProps) -> Html {
    html! {
        <PianoKeyboard config={props.config.clone()} />
    }
}

// main 함수 정의 (wasm 앱 진입점)
fn main() {
    let loaded = PianoConfig::from_yaml(config::DEFAULT_CONFIG);

    // 설정의 로그 레벨로 로거 초기화
    let level = loaded
        .as_ref()
        .map(|config| config.log_level())
        .unwrap_or(log::Level::Info);
    wasm_logger::init(wasm_logger::Config::new(level));

    let config = loaded.unwrap_or_else(|err| {
        log::warn!("{}, using the built-in layout", err);
        PianoConfig::default()
    });
    log::info!(
        "loading piano with {} white and {} black keys",
        config.keys.white.len(),
        config.keys.black.len()
    );

    yew::Renderer::<App>::with_props(AppProps { config }).render();
}
