use std::io::{self, BufRead, Write};

use crate::air::{KnownProperties, MoistAirState};
use crate::app::{grams_to_kilograms, percent_to_fraction, AppError};
use crate::config::Config;
use crate::i18n::{keys, resolve_language, Translator};
use crate::process::{
    AirStream, HeatingCoolingInput, HumidifyToDryBulbInput, HumidifyToHumidityRatioInput,
    HumidifyToRelativeHumidityInput, MixingInput, ProcessEngine, ProcessResult,
};
use crate::report::{self, OutputFormat};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    StatePoint,
    Process,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
/// 입력이 끝나면(EOF) 종료를 선택한 것으로 본다.
pub fn main_menu<R: BufRead>(tr: &Translator, input: &mut R) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    println!("{}", tr.t(keys::MAIN_MENU_STATE_POINT));
    println!("{}", tr.t(keys::MAIN_MENU_PROCESS));
    println!("{}", tr.t(keys::MAIN_MENU_SETTINGS));
    println!("{}", tr.t(keys::MAIN_MENU_EXIT));
    loop {
        let sel = match read_line(input, tr.t(keys::PROMPT_MENU_SELECT)) {
            Err(AppError::Io(err)) if err.kind() == io::ErrorKind::UnexpectedEof => {
                return Ok(MenuChoice::Exit)
            }
            other => other?,
        };
        match sel.trim() {
            "1" => return Ok(MenuChoice::StatePoint),
            "2" => return Ok(MenuChoice::Process),
            "3" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 상태점 메뉴를 처리한다.
pub fn handle_state_point<R: BufRead>(
    tr: &Translator,
    input: &mut R,
    engine: &ProcessEngine,
    format: OutputFormat,
) -> Result<(), AppError> {
    println!("{}", tr.t(keys::STATE_HEADING));
    println!("{}", tr.t(keys::STATE_OPTION_RH));
    println!("{}", tr.t(keys::STATE_OPTION_WET_BULB));
    println!("{}", tr.t(keys::STATE_OPTION_DEW_POINT));
    let choice = read_line(input, tr.t(keys::PROMPT_SELECT))?;
    let known = match choice.trim() {
        "1" => KnownProperties::DryBulbRelativeHumidity {
            dry_bulb_c: read_f64(tr, input, keys::PROMPT_DRY_BULB)?,
            relative_humidity: percent_to_fraction(read_f64(
                tr,
                input,
                keys::PROMPT_RELATIVE_HUMIDITY,
            )?),
        },
        "2" => KnownProperties::DryBulbWetBulb {
            dry_bulb_c: read_f64(tr, input, keys::PROMPT_DRY_BULB)?,
            wet_bulb_c: read_f64(tr, input, keys::PROMPT_WET_BULB)?,
        },
        "3" => KnownProperties::DryBulbDewPoint {
            dry_bulb_c: read_f64(tr, input, keys::PROMPT_DRY_BULB)?,
            dew_point_c: read_f64(tr, input, keys::PROMPT_DEW_POINT)?,
        },
        _ => {
            println!("{}", tr.t(keys::INVALID_SELECTION_RETRY));
            return Ok(());
        }
    };
    let state = engine.resolver().resolve(known)?;
    emit_state(tr, engine, &state, format)
}

/// 프로세스 메뉴를 처리한다.
pub fn handle_process<R: BufRead>(
    tr: &Translator,
    input: &mut R,
    engine: &ProcessEngine,
    format: OutputFormat,
) -> Result<(), AppError> {
    println!("{}", tr.t(keys::PROCESS_HEADING));
    println!("{}", tr.t(keys::PROCESS_OPTION_HEATING));
    println!("{}", tr.t(keys::PROCESS_OPTION_HUMIDIFY_DRY_BULB));
    println!("{}", tr.t(keys::PROCESS_OPTION_HUMIDIFY_RH));
    println!("{}", tr.t(keys::PROCESS_OPTION_HUMIDIFY_RATIO));
    println!("{}", tr.t(keys::PROCESS_OPTION_MIXING));
    let choice = read_line(input, tr.t(keys::PROMPT_SELECT))?;
    let result = match choice.trim() {
        "1" => {
            let (t1, rh1) = read_dry_bulb_and_rh(tr, input)?;
            println!("{}", tr.t(keys::POINT_2_HEADING));
            engine.heat_or_cool(HeatingCoolingInput {
                dry_bulb_c: t1,
                relative_humidity: rh1,
                outlet_dry_bulb_c: read_f64(tr, input, keys::PROMPT_DRY_BULB)?,
            })?
        }
        "2" => {
            let (t1, rh1) = read_dry_bulb_and_rh(tr, input)?;
            println!("{}", tr.t(keys::POINT_2_HEADING));
            engine.humidify_to_dry_bulb(HumidifyToDryBulbInput {
                dry_bulb_c: t1,
                relative_humidity: rh1,
                outlet_dry_bulb_c: read_f64(tr, input, keys::PROMPT_DRY_BULB)?,
            })?
        }
        "3" => {
            let (t1, rh1) = read_dry_bulb_and_rh(tr, input)?;
            println!("{}", tr.t(keys::POINT_2_HEADING));
            engine.humidify_to_relative_humidity(HumidifyToRelativeHumidityInput {
                dry_bulb_c: t1,
                relative_humidity: rh1,
                outlet_relative_humidity: percent_to_fraction(read_f64(
                    tr,
                    input,
                    keys::PROMPT_RELATIVE_HUMIDITY,
                )?),
            })?
        }
        "4" => {
            println!("{}", tr.t(keys::POINT_1_HEADING));
            let t1 = read_f64(tr, input, keys::PROMPT_DRY_BULB)?;
            let w1 = grams_to_kilograms(read_f64(tr, input, keys::PROMPT_HUMIDITY_RATIO)?);
            println!("{}", tr.t(keys::POINT_2_HEADING));
            engine.humidify_to_humidity_ratio(HumidifyToHumidityRatioInput {
                dry_bulb_c: t1,
                humidity_ratio: w1,
                outlet_humidity_ratio: grams_to_kilograms(read_f64(
                    tr,
                    input,
                    keys::PROMPT_HUMIDITY_RATIO,
                )?),
            })?
        }
        "5" => {
            println!("{}", tr.t(keys::POINT_1_HEADING));
            let first = read_stream(tr, input)?;
            println!("{}", tr.t(keys::POINT_2_HEADING));
            let second = read_stream(tr, input)?;
            engine.mix(MixingInput { first, second })?
        }
        _ => {
            println!("{}", tr.t(keys::INVALID_SELECTION_RETRY));
            return Ok(());
        }
    };
    emit_process(tr, engine, &result, format)
}

/// 설정 메뉴를 처리한다. 고도 또는 언어를 바꾼다.
pub fn handle_settings<R: BufRead>(
    tr: &Translator,
    input: &mut R,
    cfg: &mut Config,
) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!("{}: {}", tr.t(keys::SETTINGS_CURRENT_ALTITUDE), cfg.altitude_m);
    println!("{}: {}", tr.t(keys::SETTINGS_CURRENT_LANGUAGE), cfg.language);
    println!("{}", tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(input, tr.t(keys::PROMPT_SELECT))?;
    match sel.trim() {
        "" => {}
        "1" => cfg.altitude_m = read_f64(tr, input, keys::PROMPT_ALTITUDE)?,
        "2" => {
            let code = read_line(input, tr.t(keys::SETTINGS_PROMPT_LANGUAGE))?;
            let code = code.trim();
            if code.eq_ignore_ascii_case("auto") {
                cfg.language = "auto".to_string();
            } else {
                cfg.language = resolve_language(code, None);
            }
        }
        _ => println!("{}", tr.t(keys::SETTINGS_INVALID)),
    }
    Ok(())
}

/// 상태점을 지정 형식으로 출력한다.
pub fn emit_state(
    tr: &Translator,
    engine: &ProcessEngine,
    state: &MoistAirState,
    format: OutputFormat,
) -> Result<(), AppError> {
    let atm = engine.resolver().atmosphere();
    match format {
        OutputFormat::Table => print!("{}", report::render_state(tr, atm, state)),
        OutputFormat::Toml => print!("{}", report::state_to_toml(atm, state)?),
    }
    Ok(())
}

/// 프로세스 결과를 지정 형식으로 출력한다.
pub fn emit_process(
    tr: &Translator,
    engine: &ProcessEngine,
    result: &ProcessResult,
    format: OutputFormat,
) -> Result<(), AppError> {
    let atm = engine.resolver().atmosphere();
    match format {
        OutputFormat::Table => print!("{}", report::render_process(tr, atm, result)),
        OutputFormat::Toml => print!("{}", report::process_to_toml(atm, result)?),
    }
    Ok(())
}

fn read_dry_bulb_and_rh<R: BufRead>(
    tr: &Translator,
    input: &mut R,
) -> Result<(f64, f64), AppError> {
    println!("{}", tr.t(keys::POINT_1_HEADING));
    let t = read_f64(tr, input, keys::PROMPT_DRY_BULB)?;
    let rh = percent_to_fraction(read_f64(tr, input, keys::PROMPT_RELATIVE_HUMIDITY)?);
    Ok((t, rh))
}

fn read_stream<R: BufRead>(tr: &Translator, input: &mut R) -> Result<AirStream, AppError> {
    Ok(AirStream {
        dry_bulb_c: read_f64(tr, input, keys::PROMPT_DRY_BULB)?,
        relative_humidity: percent_to_fraction(read_f64(
            tr,
            input,
            keys::PROMPT_RELATIVE_HUMIDITY,
        )?),
        flow_m3_per_h: read_f64(tr, input, keys::PROMPT_FLOW)?,
    })
}

/// 한 줄을 읽는다. 입력이 끝났으면 `UnexpectedEof` 오류다.
fn read_line<R: BufRead>(input: &mut R, prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        return Err(AppError::Io(io::ErrorKind::UnexpectedEof.into()));
    }
    Ok(buf)
}

fn read_f64<R: BufRead>(
    tr: &Translator,
    input: &mut R,
    prompt_key: &str,
) -> Result<f64, AppError> {
    loop {
        let s = read_line(input, tr.t(prompt_key))?;
        match s.trim().parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn is_eof(err: &AppError) -> bool {
        matches!(err, AppError::Io(e) if e.kind() == io::ErrorKind::UnexpectedEof)
    }

    #[test]
    fn closed_input_exits_main_menu() {
        let tr = Translator::new("en");
        assert_eq!(main_menu(&tr, &mut io::empty()).unwrap(), MenuChoice::Exit);
        // 잘못된 선택 뒤에 입력이 끝나도 멈춘다
        let mut input = Cursor::new("9\n");
        assert_eq!(main_menu(&tr, &mut input).unwrap(), MenuChoice::Exit);
    }

    #[test]
    fn number_prompt_stops_at_end_of_input() {
        let tr = Translator::new("en");
        let mut input = Cursor::new("abc\n");
        let err = read_f64(&tr, &mut input, keys::PROMPT_DRY_BULB).unwrap_err();
        assert!(is_eof(&err), "{err:?}");

        let mut input = Cursor::new("oops\n-4.5\n");
        assert_eq!(read_f64(&tr, &mut input, keys::PROMPT_DRY_BULB).unwrap(), -4.5);
    }

    #[test]
    fn truncated_state_input_is_an_error() {
        let tr = Translator::new("en");
        let engine = ProcessEngine::default();
        let mut input = Cursor::new("1\n25\n");
        let err =
            handle_state_point(&tr, &mut input, &engine, OutputFormat::Table).unwrap_err();
        assert!(is_eof(&err), "{err:?}");
    }
}
