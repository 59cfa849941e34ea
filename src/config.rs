use crate::error::PianoError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// 빌드 시 포함되는 기본 설정
pub const DEFAULT_CONFIG: &str = include_str!("../static/piano.yaml");

// 음원 파일 위치 규칙 (예: sounds/A.mp3)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundLayout {
    pub dir: String,       // 음원 폴더
    pub extension: String, // 확장자
    pub volume: f64,       // 재생 볼륨 (0.0 ~ 1.0)
}

impl Default for SoundLayout {
    fn default() -> Self {
        Self {
            dir: "sounds".to_string(),
            extension: "mp3".to_string(),
            volume: 1.0,
        }
    }
}

impl SoundLayout {
    // 건반 식별자로 음원 경로 생성 (대문자 + 확장자)
    pub fn source_for(&self, id: char) -> String {
        let name: String = id.to_uppercase().collect();
        if self.dir.is_empty() {
            format!("{}.{}", name, self.extension)
        } else {
            format!("{}/{}.{}", self.dir.trim_end_matches('/'), name, self.extension)
        }
    }
}

// 흰 건반 / 검은 건반 목록
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyLayout {
    pub white: Vec<char>,
    pub black: Vec<char>,
}

impl Default for KeyLayout {
    fn default() -> Self {
        Self {
            white: vec!['a', 's', 'd', 'f', 'g', 'h', 'j', 'k', 'l', ';'],
            black: vec!['w', 'e', 't', 'y', 'u', 'i', 'o'],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PianoConfig {
    pub log_level: String,
    pub sounds: SoundLayout,
    pub keys: KeyLayout,
}

impl Default for PianoConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            sounds: SoundLayout::default(),
            keys: KeyLayout::default(),
        }
    }
}

impl PianoConfig {
    pub fn from_yaml(text: &str) -> Result<Self, PianoError> {
        let mut config: PianoConfig = serde_yaml::from_str(text)?;
        if !config.sounds.volume.is_finite() {
            return Err(PianoError::Config(format!(
                "volume must be a number, got {}",
                config.sounds.volume
            )));
        }
        // HtmlMediaElement는 범위 밖 볼륨을 거부함
        config.sounds.volume = config.sounds.volume.clamp(0.0, 1.0);
        Ok(config)
    }

    // 잘못된 레벨 문자열은 info로 처리
    pub fn log_level(&self) -> log::Level {
        log::Level::from_str(&self.log_level).unwrap_or(log::Level::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_config_matches_defaults() {
        let config = PianoConfig::from_yaml(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, PianoConfig::default());
        assert_eq!(config.keys.white.len(), 10);
        assert_eq!(config.keys.black.len(), 7);
    }

    #[test]
    fn source_uses_uppercase_name() {
        let layout = SoundLayout::default();
        assert_eq!(layout.source_for('a'), "sounds/A.mp3");
        assert_eq!(layout.source_for(';'), "sounds/;.mp3");

        let layout = SoundLayout {
            dir: "static/samples/".to_string(),
            extension: "ogg".to_string(),
            volume: 1.0,
        };
        assert_eq!(layout.source_for('w'), "static/samples/W.ogg");
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = PianoConfig::from_yaml("sounds:\n  volume: 3.5\n").unwrap();
        assert_eq!(config.sounds.volume, 1.0);
        assert_eq!(config.sounds.dir, "sounds");
        assert_eq!(config.keys, KeyLayout::default());
    }

    #[test]
    fn bad_yaml_is_a_config_error() {
        let err = PianoConfig::from_yaml("keys:\n  white: [ab]\n").unwrap_err();
        assert!(matches!(err, PianoError::Config(_)));
    }

    #[test]
    fn unknown_log_level_falls_back_to_info() {
        let config = PianoConfig {
            log_level: "loud".to_string(),
            ..PianoConfig::default()
        };
        assert_eq!(config.log_level(), log::Level::Info);

        let config = PianoConfig {
            log_level: "debug".to_string(),
            ..PianoConfig::default()
        };
        assert_eq!(config.log_level(), log::Level::Debug);
    }
}
