use std::io::BufRead;
use std::path::Path;

use thiserror::Error;

use crate::air::{PsychroError, StateResolver};
use crate::atmosphere::AtmosphericContext;
use crate::config::{Config, ConfigError};
use crate::i18n::{keys, Translator};
use crate::process::ProcessEngine;
use crate::report::OutputFormat;
use crate::ui_cli::{self, MenuChoice};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 파일 입출력 오류
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    /// 습공기 계산 오류
    #[error("계산 오류: {0}")]
    Calculation(#[from] PsychroError),
    /// 결과 직렬화 오류
    #[error("결과 직렬화 오류: {0}")]
    Report(#[from] toml::ser::Error),
}

/// 설정의 고도와 반복 한계로 계산 엔진을 만든다.
pub fn build_engine(config: &Config) -> Result<ProcessEngine, AppError> {
    let atm = AtmosphericContext::from_altitude(config.altitude_m)?;
    Ok(ProcessEngine::new(StateResolver::new(atm, config.solver)))
}

/// 백분율 입력을 분율로 바꾼다.
pub fn percent_to_fraction(percent: f64) -> f64 {
    percent / 100.0
}

/// g/kg 입력을 kg/kg으로 바꾼다.
pub fn grams_to_kilograms(g_per_kg: f64) -> f64 {
    g_per_kg / 1000.0
}

/// 오류를 현재 언어로 표현한다. 계산 오류는 대상 이름까지 번역한다.
pub fn localized_error(tr: &Translator, err: &AppError) -> String {
    match err {
        AppError::Io(e) => format!("{}: {e}", tr.t(keys::ERROR_IO)),
        AppError::Config(e) => format!("{}: {e}", tr.t(keys::ERROR_CONFIG)),
        AppError::Report(e) => format!("{}: {e}", tr.t(keys::ERROR_REPORT)),
        AppError::Calculation(e) => {
            let detail = match e {
                PsychroError::Domain { what, value } => tr
                    .t(keys::ERROR_DOMAIN)
                    .replace("{what}", tr.subject(what))
                    .replace("{value}", &value.to_string()),
                PsychroError::PhysicalInfeasibility {
                    what,
                    relative_humidity,
                } => tr
                    .t(keys::ERROR_INFEASIBLE)
                    .replace("{what}", tr.subject(what))
                    .replace("{rh}", &format!("{:.1}", relative_humidity * 100.0)),
                PsychroError::Convergence { what, iterations } => tr
                    .t(keys::ERROR_CONVERGENCE)
                    .replace("{what}", tr.subject(what))
                    .replace("{iterations}", &iterations.to_string()),
            };
            format!("{}: {detail}", tr.t(keys::ERROR_CALCULATION))
        }
    }
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
///
/// 계산 오류는 해당 계산만 중단하고 메뉴로 돌아간다. 설정 변경으로 계산 엔진을
/// 만들 수 없으면 이전 설정으로 되돌리고 저장하지 않는다.
pub fn run<R: BufRead>(
    config: &mut Config,
    config_path: &Path,
    tr: &Translator,
    input: &mut R,
    format: OutputFormat,
) -> Result<(), AppError> {
    println!("\n  {}", tr.t(keys::APP_BANNER));
    let mut engine = build_engine(config)?;
    loop {
        let outcome = match ui_cli::main_menu(tr, input)? {
            MenuChoice::StatePoint => ui_cli::handle_state_point(tr, input, &engine, format),
            MenuChoice::Process => ui_cli::handle_process(tr, input, &engine, format),
            MenuChoice::Settings => {
                let previous = config.clone();
                ui_cli::handle_settings(tr, input, config)?;
                match build_engine(config) {
                    Ok(rebuilt) => {
                        engine = rebuilt;
                        config.save(config_path)?;
                        println!("{}", tr.t(keys::SETTINGS_SAVED));
                        Ok(())
                    }
                    Err(err) => {
                        *config = previous;
                        Err(err)
                    }
                }
            }
            MenuChoice::Exit => {
                println!("{}", tr.t(keys::APP_EXIT));
                break;
            }
        };
        match outcome {
            Err(err @ AppError::Calculation(_)) => {
                eprintln!("{}: {}", tr.t(keys::ERROR_PREFIX), localized_error(tr, &err));
            }
            other => other?,
        }
    }
    Ok(())
}
