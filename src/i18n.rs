use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";
    pub const APP_BANNER: &str = "general.banner";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_STATE_POINT: &str = "main_menu.state_point";
    pub const MAIN_MENU_PROCESS: &str = "main_menu.process";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";

    pub const STATE_HEADING: &str = "state.heading";
    pub const STATE_OPTION_RH: &str = "state.option_rh";
    pub const STATE_OPTION_WET_BULB: &str = "state.option_wet_bulb";
    pub const STATE_OPTION_DEW_POINT: &str = "state.option_dew_point";

    pub const PROCESS_HEADING: &str = "process.heading";
    pub const PROCESS_OPTION_HEATING: &str = "process.option_heating";
    pub const PROCESS_OPTION_HUMIDIFY_DRY_BULB: &str = "process.option_humidify_dry_bulb";
    pub const PROCESS_OPTION_HUMIDIFY_RH: &str = "process.option_humidify_rh";
    pub const PROCESS_OPTION_HUMIDIFY_RATIO: &str = "process.option_humidify_ratio";
    pub const PROCESS_OPTION_MIXING: &str = "process.option_mixing";
    pub const POINT_1_HEADING: &str = "process.point_1_heading";
    pub const POINT_2_HEADING: &str = "process.point_2_heading";

    pub const PROMPT_SELECT: &str = "prompt.select";
    pub const PROMPT_DRY_BULB: &str = "prompt.dry_bulb";
    pub const PROMPT_WET_BULB: &str = "prompt.wet_bulb";
    pub const PROMPT_DEW_POINT: &str = "prompt.dew_point";
    pub const PROMPT_RELATIVE_HUMIDITY: &str = "prompt.relative_humidity";
    pub const PROMPT_HUMIDITY_RATIO: &str = "prompt.humidity_ratio";
    pub const PROMPT_FLOW: &str = "prompt.flow";
    pub const PROMPT_ALTITUDE: &str = "prompt.altitude";

    pub const TABLE_PROPERTY: &str = "table.property";
    pub const TABLE_POINT_1: &str = "table.point_1";
    pub const TABLE_POINT_2: &str = "table.point_2";
    pub const TABLE_MIXTURE: &str = "table.mixture";
    pub const ROW_DRY_BULB: &str = "row.dry_bulb";
    pub const ROW_WET_BULB: &str = "row.wet_bulb";
    pub const ROW_DEW_POINT: &str = "row.dew_point";
    pub const ROW_RELATIVE_HUMIDITY: &str = "row.relative_humidity";
    pub const ROW_HUMIDITY_RATIO: &str = "row.humidity_ratio";
    pub const ROW_BAROMETRIC_PRESSURE: &str = "row.barometric_pressure";
    pub const ROW_SATURATION_PRESSURE: &str = "row.saturation_pressure";
    pub const ROW_VAPOR_PRESSURE: &str = "row.vapor_pressure";
    pub const ROW_ENTHALPY: &str = "row.enthalpy";
    pub const ROW_SPECIFIC_VOLUME: &str = "row.specific_volume";
    pub const ROW_FLOW: &str = "row.flow";

    pub const WARNING_FOG: &str = "warning.fog";
    pub const RESULT_CONDENSED_WATER: &str = "result.condensed_water";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_ALTITUDE: &str = "settings.current_altitude";
    pub const SETTINGS_CURRENT_LANGUAGE: &str = "settings.current_language";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_PROMPT_LANGUAGE: &str = "settings.prompt_language";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";

    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";
    pub const ERROR_IO: &str = "error.io";
    pub const ERROR_CONFIG: &str = "error.config";
    pub const ERROR_REPORT: &str = "error.report";
    pub const ERROR_CALCULATION: &str = "error.calculation";
    // {what} {value} {rh} {iterations} 자리표시자를 채워 쓴다
    pub const ERROR_DOMAIN: &str = "error.domain";
    pub const ERROR_INFEASIBLE: &str = "error.infeasible";
    pub const ERROR_CONVERGENCE: &str = "error.convergence";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("en") {
            Language::En
        } else {
            Language::Ko
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 ko로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    /// 번역을 가져온다. 언어팩 → 현재 언어 → 한국어 순으로 찾는다.
    pub fn t<'a>(&'a self, key: &str) -> &'a str {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return v;
        }
        match self.lang {
            Language::En => en(key).unwrap_or_else(|| ko(key)),
            Language::Ko => ko(key),
        }
    }

    /// 오류 메시지의 계산 대상 이름을 현재 언어로 돌려준다. 번역이 없으면 원문 그대로다.
    pub fn subject<'a>(&self, subject: &'a str) -> &'a str {
        match self.lang {
            Language::En => en_subject(subject).unwrap_or(subject),
            Language::Ko => subject,
        }
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(lang) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(lang);
    }
    ["LC_ALL", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 또는 [section] 하위 키.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let path = Path::new(dir).join(format!("{lang}.toml"));
    let content = fs::read_to_string(path).ok()?;
    parse_toml_to_map(&content)
}

/// 중첩 테이블을 `section.key` 형태의 평면 맵으로 펼친다.
pub fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn ko(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        APP_BANNER => "습공기 선도 계산기 (Psychrometric Toolbox)",
        MAIN_MENU_TITLE => "\n=== 계산 종류 ===",
        MAIN_MENU_STATE_POINT => "1) 상태점",
        MAIN_MENU_PROCESS => "2) 프로세스",
        MAIN_MENU_SETTINGS => "3) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        STATE_HEADING => "\n-- 상태점: 기지 물성 --",
        STATE_OPTION_RH => "1) 건구 온도 + 상대습도",
        STATE_OPTION_WET_BULB => "2) 건구 온도 + 습구 온도",
        STATE_OPTION_DEW_POINT => "3) 건구 온도 + 이슬점 온도",
        PROCESS_HEADING => "\n-- 프로세스 --",
        PROCESS_OPTION_HEATING => "1) 가열/냉각",
        PROCESS_OPTION_HUMIDIFY_DRY_BULB => "2) 단열 가습: 출구 건구 온도 지정",
        PROCESS_OPTION_HUMIDIFY_RH => "3) 단열 가습: 출구 상대습도 지정",
        PROCESS_OPTION_HUMIDIFY_RATIO => "4) 단열 가습: 출구 습도비 지정",
        PROCESS_OPTION_MIXING => "5) 두 기류 혼합",
        POINT_1_HEADING => "********* 상태점 1 *********",
        POINT_2_HEADING => "********* 상태점 2 *********",
        PROMPT_SELECT => "선택: ",
        PROMPT_DRY_BULB => "건구 온도 (°C): ",
        PROMPT_WET_BULB => "습구 온도 (°C): ",
        PROMPT_DEW_POINT => "이슬점 온도 (°C): ",
        PROMPT_RELATIVE_HUMIDITY => "상대습도 (%): ",
        PROMPT_HUMIDITY_RATIO => "습도비 (g/kg): ",
        PROMPT_FLOW => "풍량 (m3/h): ",
        PROMPT_ALTITUDE => "고도 (m): ",
        TABLE_PROPERTY => "물성",
        TABLE_POINT_1 => "상태점 1",
        TABLE_POINT_2 => "상태점 2",
        TABLE_MIXTURE => "혼합",
        ROW_DRY_BULB => "건구 온도 (°C)",
        ROW_WET_BULB => "습구 온도 (°C)",
        ROW_DEW_POINT => "이슬점 온도 (°C)",
        ROW_RELATIVE_HUMIDITY => "상대습도 (%)",
        ROW_HUMIDITY_RATIO => "습도비 (g/kg)",
        ROW_BAROMETRIC_PRESSURE => "대기압 (kPa)",
        ROW_SATURATION_PRESSURE => "포화 수증기압 (kPa)",
        ROW_VAPOR_PRESSURE => "수증기 분압 (kPa)",
        ROW_ENTHALPY => "비엔탈피 (kJ/kg)",
        ROW_SPECIFIC_VOLUME => "비체적 (m3/kg)",
        ROW_FLOW => "풍량 (m3/h)",
        WARNING_FOG => "주의! 안개 발생: 혼합점이 포화 곡선으로 보정되었습니다.",
        RESULT_CONDENSED_WATER => "응축 수분 (g/kg)",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT_ALTITUDE => "현재 고도 (m)",
        SETTINGS_CURRENT_LANGUAGE => "현재 언어",
        SETTINGS_OPTIONS => "1) 고도  2) 언어",
        SETTINGS_PROMPT_LANGUAGE => "언어 코드 (auto/ko/en): ",
        SETTINGS_INVALID => "잘못된 입력이므로 변경하지 않습니다.",
        SETTINGS_SAVED => "설정이 저장되었습니다.",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        ERROR_IO => "입출력 오류",
        ERROR_CONFIG => "설정 오류",
        ERROR_REPORT => "결과 직렬화 오류",
        ERROR_CALCULATION => "계산 오류",
        ERROR_DOMAIN => "유효 범위를 벗어남: {what} = {value}",
        ERROR_INFEASIBLE => "물리적으로 불가능한 상태: {what} (상대습도 {rh}%)",
        ERROR_CONVERGENCE => "수렴 실패: {what} ({iterations}회 반복)",
        _ => "???",
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    let s = match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting.",
        APP_BANNER => "Psychrometric Toolbox",
        MAIN_MENU_TITLE => "\n=== Calculation ===",
        MAIN_MENU_STATE_POINT => "1) State point",
        MAIN_MENU_PROCESS => "2) Process",
        MAIN_MENU_SETTINGS => "3) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please select again.",
        STATE_HEADING => "\n-- State point: known properties --",
        STATE_OPTION_RH => "1) Dry bulb + relative humidity",
        STATE_OPTION_WET_BULB => "2) Dry bulb + wet bulb",
        STATE_OPTION_DEW_POINT => "3) Dry bulb + dew point",
        PROCESS_HEADING => "\n-- Processes --",
        PROCESS_OPTION_HEATING => "1) Heating/cooling",
        PROCESS_OPTION_HUMIDIFY_DRY_BULB => "2) Adiabatic humidification: final dry bulb",
        PROCESS_OPTION_HUMIDIFY_RH => "3) Adiabatic humidification: final relative humidity",
        PROCESS_OPTION_HUMIDIFY_RATIO => "4) Adiabatic humidification: final humidity ratio",
        PROCESS_OPTION_MIXING => "5) Mixing of two air streams",
        POINT_1_HEADING => "********* State point 1 *********",
        POINT_2_HEADING => "********* State point 2 *********",
        PROMPT_SELECT => "Select: ",
        PROMPT_DRY_BULB => "Dry bulb temperature (°C): ",
        PROMPT_WET_BULB => "Wet bulb temperature (°C): ",
        PROMPT_DEW_POINT => "Dew point temperature (°C): ",
        PROMPT_RELATIVE_HUMIDITY => "Relative humidity (%): ",
        PROMPT_HUMIDITY_RATIO => "Humidity ratio (g/kg): ",
        PROMPT_FLOW => "Air flow (m3/h): ",
        PROMPT_ALTITUDE => "Altitude (m): ",
        TABLE_PROPERTY => "Property",
        TABLE_POINT_1 => "Point 1",
        TABLE_POINT_2 => "Point 2",
        TABLE_MIXTURE => "Mixture",
        ROW_DRY_BULB => "Dry bulb temperature (°C)",
        ROW_WET_BULB => "Wet bulb temperature (°C)",
        ROW_DEW_POINT => "Dew point temperature (°C)",
        ROW_RELATIVE_HUMIDITY => "Relative humidity (%)",
        ROW_HUMIDITY_RATIO => "Humidity ratio (g/kg)",
        ROW_BAROMETRIC_PRESSURE => "Barometric pressure (kPa)",
        ROW_SATURATION_PRESSURE => "Saturation vapor pressure (kPa)",
        ROW_VAPOR_PRESSURE => "Partial vapor pressure (kPa)",
        ROW_ENTHALPY => "Enthalpy (kJ/kg)",
        ROW_SPECIFIC_VOLUME => "Specific volume (m3/kg)",
        ROW_FLOW => "Air flow (m3/h)",
        WARNING_FOG => "Warning! Fog formation: mixture moved onto the saturation curve.",
        RESULT_CONDENSED_WATER => "Condensed water (g/kg)",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT_ALTITUDE => "Current altitude (m)",
        SETTINGS_CURRENT_LANGUAGE => "Current language",
        SETTINGS_OPTIONS => "1) Altitude  2) Language",
        SETTINGS_PROMPT_LANGUAGE => "Language code (auto/ko/en): ",
        SETTINGS_INVALID => "Invalid input, nothing changed.",
        SETTINGS_SAVED => "Settings saved.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        ERROR_IO => "I/O error",
        ERROR_CONFIG => "Configuration error",
        ERROR_REPORT => "Report serialization error",
        ERROR_CALCULATION => "Calculation error",
        ERROR_DOMAIN => "Out of valid range: {what} = {value}",
        ERROR_INFEASIBLE => "Physically impossible state: {what} (relative humidity {rh}%)",
        ERROR_CONVERGENCE => "No convergence: {what} ({iterations} iterations)",
        _ => return None,
    };
    Some(s)
}

/// 계산 대상 이름의 영어 번역.
fn en_subject(subject: &str) -> Option<&'static str> {
    use crate::air::error::subjects::*;
    let s = match subject {
        PRESSURE => "Barometric pressure [kPa]",
        ALTITUDE => "Altitude [m]",
        SATURATION_TEMPERATURE => "Temperature for saturation pressure [°C]",
        VAPOR_PRESSURE_ABOVE_ATMOSPHERE => "Vapor pressure at or above barometric pressure [kPa]",
        DEW_POINT_VAPOR_PRESSURE => "Vapor pressure for dew point [kPa]",
        INPUT_RELATIVE_HUMIDITY => "Input relative humidity",
        WET_BULB_ABOVE_DRY_BULB => "Wet bulb above dry bulb",
        DEW_POINT_ABOVE_DRY_BULB => "Dew point above dry bulb",
        HUMIDITY_RATIO_ABOVE_SATURATION => "Humidity ratio above saturation",
        WET_BULB_INPUT => "Wet bulb input state",
        WET_BULB_BRACKET => "Wet bulb search bracket",
        WET_BULB => "Wet bulb temperature",
        UNREACHABLE_OUTLET_DRY_BULB => "Outlet dry bulb unreachable even with dry air [°C]",
        OUTLET_BELOW_WET_BULB => "Outlet dry bulb below inlet wet bulb",
        RELATIVE_HUMIDITY_DECREASE => "Adiabatic humidification cannot lower relative humidity",
        TARGET_RELATIVE_HUMIDITY => "Humidification to target relative humidity",
        OUTLET_HUMIDITY_RATIO_TOO_HIGH => "Outlet humidity ratio too high",
        FOG_BRACKET => "Fog correction search bracket",
        FOG_CORRECTION => "Fog correction",
        _ => return None,
    };
    Some(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_falls_back_to_korean_for_unknown_keys() {
        let tr = Translator::new("en-us");
        assert_eq!(tr.language(), Language::En);
        assert_eq!(tr.t(keys::ROW_ENTHALPY), "Enthalpy (kJ/kg)");
        assert_eq!(tr.t("no.such.key"), "???");
    }

    #[test]
    fn nested_pack_is_flattened() {
        let map = parse_toml_to_map("[row]\nenthalpy = \"Entalpia (kJ/kg)\"\n").unwrap();
        assert_eq!(map.get(keys::ROW_ENTHALPY).map(String::as_str), Some("Entalpia (kJ/kg)"));
    }

    #[test]
    fn cli_flag_wins_over_config() {
        assert_eq!(resolve_language("ko-KR", Some("en")), "ko");
        assert_eq!(resolve_language("auto", Some("en")), "en");
    }

    #[test]
    fn every_error_subject_has_english_name() {
        use crate::air::error::subjects::*;
        let en = Translator::new("en");
        let ko = Translator::new("ko");
        for subject in [
            PRESSURE,
            ALTITUDE,
            SATURATION_TEMPERATURE,
            VAPOR_PRESSURE_ABOVE_ATMOSPHERE,
            DEW_POINT_VAPOR_PRESSURE,
            INPUT_RELATIVE_HUMIDITY,
            WET_BULB_ABOVE_DRY_BULB,
            DEW_POINT_ABOVE_DRY_BULB,
            HUMIDITY_RATIO_ABOVE_SATURATION,
            WET_BULB_INPUT,
            WET_BULB_BRACKET,
            WET_BULB,
            UNREACHABLE_OUTLET_DRY_BULB,
            OUTLET_BELOW_WET_BULB,
            RELATIVE_HUMIDITY_DECREASE,
            TARGET_RELATIVE_HUMIDITY,
            OUTLET_HUMIDITY_RATIO_TOO_HIGH,
            FOG_BRACKET,
            FOG_CORRECTION,
        ] {
            assert_eq!(ko.subject(subject), subject);
            let name = en.subject(subject);
            assert!(!name.chars().any(|c| ('\u{AC00}'..='\u{D7A3}').contains(&c)), "{name}");
        }
    }
}
