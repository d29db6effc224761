use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::solver::SolverLimits;

/// 기본 설정 파일 이름.
pub const DEFAULT_CONFIG_PATH: &str = "psychro.toml";

/// 애플리케이션 설정을 표현한다. 빠진 항목은 기본값으로 채운다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 언어 코드 (auto/ko/en)
    pub language: String,
    /// 언어팩 디렉터리 (선택)
    pub language_pack_dir: Option<String>,
    /// 현장 고도 [m]. 대기압 계산에 사용한다.
    pub altitude_m: f64,
    /// 반복 계산 한계
    pub solver: SolverLimits,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            language_pack_dir: None,
            altitude_m: 0.0,
            solver: SolverLimits::default(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 역직렬화 오류
    #[error("설정 파싱 오류: {0}")]
    Serde(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// 설정 파일을 로드한다. 파일이 없으면 기본 설정을 돌려준다.
pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        Ok(cfg)
    } else {
        Ok(Config::default())
    }
}

impl Config {
    /// 설정을 TOML 파일로 저장한다.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_uses_defaults() {
        let cfg: Config = toml::from_str("altitude_m = 850.0\n[solver]\nmax_iterations = 50\n").unwrap();
        assert_eq!(cfg.altitude_m, 850.0);
        assert_eq!(cfg.language, "auto");
        assert_eq!(cfg.solver.max_iterations, 50);
        assert_eq!(
            cfg.solver.enthalpy_tolerance_kj_per_kg,
            SolverLimits::default().enthalpy_tolerance_kj_per_kg
        );
    }

    #[test]
    fn save_then_load() {
        let dir = std::env::temp_dir().join(format!("psychro-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("psychro.toml");
        let cfg = Config {
            language: "ko".into(),
            altitude_m: 1200.0,
            ..Config::default()
        };
        cfg.save(&path).unwrap();
        assert_eq!(load_or_default(&path).unwrap(), cfg);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_file_gives_defaults() {
        let cfg = load_or_default(Path::new("definitely/not/here.toml")).unwrap();
        assert_eq!(cfg, Config::default());
    }
}
