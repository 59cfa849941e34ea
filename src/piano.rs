use crate::config::{PianoConfig, SoundLayout};
use crate::input::{identifier, InputEvent};
use crate::key::{Key, KeyKind};
use crate::sound::{AssetCheck, SoundBackend, SoundEvent, SoundTicket};
use std::collections::{HashMap, HashSet};

// 검은 건반은 흰 건반 7개당 5개까지만 화면에 제대로 배치됨
const BLACK_PER_WHITE: (usize, usize) = (5, 7);

/// [`Piano::validate`] 결과
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    pub white: usize,
    pub black: usize,
    pub ratio_ok: bool,
    pub missing: Vec<char>, // 음원이 없는 건반
}

impl ValidationReport {
    pub fn audio_ok(&self) -> bool {
        self.missing.is_empty()
    }

    pub fn passed(&self) -> bool {
        self.ratio_ok && self.audio_ok()
    }
}

/// 모든 건반과 배치 순서, 오디오 백엔드를 소유하는 피아노
pub struct Piano<B: SoundBackend> {
    keys: HashMap<char, Key>,
    order: Vec<char>, // 화면 배치 순서
    sounds: SoundLayout,
    backend: B,
    issued: HashSet<SoundTicket>, // 아직 해제되지 않은 재생 요청
    next_serial: u64,
}

impl<B: SoundBackend> Piano<B> {
    pub fn new(sounds: SoundLayout, backend: B) -> Self {
        Self {
            keys: HashMap::new(),
            order: Vec::new(),
            sounds,
            backend,
            issued: HashSet::new(),
            next_serial: 0,
        }
    }

    // 설정에 있는 흰 건반, 검은 건반 순서로 생성
    pub fn from_config(config: &PianoConfig, backend: B) -> Self {
        let mut piano = Self::new(config.sounds.clone(), backend);
        piano.create_keys(config.keys.white.iter().copied(), KeyKind::White);
        piano.create_keys(config.keys.black.iter().copied(), KeyKind::Black);
        piano
    }

    /// 다음 재생 요청에 붙을 번호
    pub fn next_serial(&self) -> u64 {
        self.next_serial
    }

    /// 이전 피아노가 쓰던 번호 이후부터 티켓을 발급함.
    /// 이전 백엔드에서 늦게 도착한 알림이 새 티켓과 겹치지 않게 함
    pub fn resume_serials(&mut self, from: u64) {
        self.next_serial = self.next_serial.max(from);
    }

    /// 한 종류의 건반들을 등록함. 같은 식별자가 다시 오면 이전 건반을
    /// 대체하고, 해당 요소는 자기 영역의 맨 뒤로 이동함
    pub fn create_keys<I>(&mut self, ids: I, kind: KeyKind)
    where
        I: IntoIterator<Item = char>,
    {
        let mut added = 0;
        for raw in ids {
            let id = identifier(&raw.to_string()).unwrap_or(raw);
            if self.keys.insert(id, Key::new(id, kind)).is_some() {
                self.order.retain(|existing| *existing != id);
            }
            self.order.push(id);
            added += 1;
        }
        log::debug!(
            "registered {} {} keys ({} total), --num-keys = {}",
            added,
            kind.tag(),
            self.keys.len(),
            self.num_keys()
        );
    }

    #[cfg(test)]
    pub fn key(&self, id: char) -> Option<&Key> {
        self.keys.get(&id)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    #[cfg(test)]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    // 종류별 건반 (배치 순서대로)
    pub fn keys_of(&self, kind: KeyKind) -> impl Iterator<Item = &Key> + '_ {
        self.order
            .iter()
            .filter_map(|id| self.keys.get(id))
            .filter(move |key| key.kind() == kind)
    }

    /// (흰 건반 수, 검은 건반 수)
    pub fn counts(&self) -> (usize, usize) {
        self.keys.values().fold((0, 0), |(white, black), key| match key.kind() {
            KeyKind::White => (white + 1, black),
            KeyKind::Black => (white, black + 1),
        })
    }

    // 레이아웃용 흰 건반 개수 (--num-keys)
    pub fn num_keys(&self) -> usize {
        self.counts().0
    }

    // 모든 건반의 음원 경로
    pub fn sound_sources(&self) -> Vec<String> {
        self.order
            .iter()
            .filter_map(|id| self.keys.get(id))
            .map(|key| key.sound(&self.sounds))
            .collect()
    }

    pub fn validate(&self, assets: &impl AssetCheck) -> ValidationReport {
        let (white, black) = self.counts();
        let (per, of) = BLACK_PER_WHITE;
        let ratio_ok = white * per / of >= black;
        if !ratio_ok {
            log::warn!(
                "There are too many black keys ({} for {} white)! The piano will not display correctly until more white keys are added.",
                black,
                white
            );
        }

        let mut missing: Vec<char> = self
            .order
            .iter()
            .filter_map(|id| self.keys.get(id))
            .filter(|key| !assets.is_available(&key.sound(&self.sounds)))
            .map(|key| key.id())
            .collect();
        missing.sort_unstable();
        if !missing.is_empty() {
            log::warn!("Some keys are missing audio files: {:?}", missing);
        }

        ValidationReport {
            white,
            black,
            ratio_ok,
            missing,
        }
    }

    /// keydown / click 이벤트가 가리키는 건반을 누름.
    /// 등록된 건반이었는지 여부를 반환
    pub fn play_event(&mut self, event: &InputEvent) -> bool {
        match event.press_identifier() {
            Some(id) if self.keys.contains_key(&id) => {
                self.play(id);
                true
            }
            _ => false,
        }
    }

    /// keyup 이벤트가 가리키는 건반을 뗌
    pub fn stop_event(&mut self, event: &InputEvent) -> bool {
        match event.release_identifier() {
            Some(id) => match self.keys.get_mut(&id) {
                Some(key) => {
                    key.pause();
                    true
                }
                None => false,
            },
            None => false,
        }
    }

    pub fn play(&mut self, id: char) {
        let Some(key) = self.keys.get_mut(&id) else {
            return;
        };
        if !key.play() {
            return;
        }

        let ticket = SoundTicket {
            key: id,
            serial: self.next_serial,
        };
        self.next_serial += 1;

        let src = key.sound(&self.sounds);
        log::debug!("loading {} for '{}' (#{})", src, id, ticket.serial);
        self.issued.insert(ticket);
        if let Err(err) = self.backend.load(ticket, &src) {
            self.fail(ticket, &err.to_string());
        }
    }

    /// 백엔드 알림을 티켓의 건반에 반영함. 이 피아노가 발급하지 않았거나
    /// 이미 해제된 티켓은 무시함
    pub fn handle_sound(&mut self, event: SoundEvent) {
        let ticket = event.ticket();
        if !self.issued.contains(&ticket) || !self.keys.contains_key(&ticket.key) {
            self.release(ticket);
            return;
        }

        match event {
            // pause() 이후에 도착한 준비 알림도 그대로 재생함
            SoundEvent::Ready(ticket) => {
                if let Err(err) = self.backend.start(ticket) {
                    self.fail(ticket, &err.to_string());
                }
            }
            SoundEvent::Started(ticket) => {
                if let Some(key) = self.keys.get_mut(&ticket.key) {
                    key.sounding();
                    log::debug!("'{}' sounding (#{})", ticket.key, ticket.serial);
                }
            }
            SoundEvent::Paused(ticket) => {
                if let Some(key) = self.keys.get_mut(&ticket.key) {
                    key.pause();
                }
                self.release(ticket);
            }
            SoundEvent::Failed(ticket, err) => self.fail(ticket, &err.to_string()),
        }
    }

    fn fail(&mut self, ticket: SoundTicket, reason: &str) {
        if let Some(key) = self.keys.get_mut(&ticket.key) {
            let message = key.fail(reason);
            log::error!("{}", message);
        }
        self.release(ticket);
    }

    fn release(&mut self, ticket: SoundTicket) {
        self.issued.remove(&ticket);
        self.backend.release(ticket);
    }
}
