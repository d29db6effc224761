use thiserror::Error;

/// 습공기 계산 결과 타입.
pub type PsychroResult<T> = Result<T, PsychroError>;

/// 습공기 물성/프로세스 계산 중 발생 가능한 오류.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PsychroError {
    /// 상관식의 유효 범위를 벗어난 입력 (절대영도 이하 온도, 0 이하의 수증기 분압 등)
    #[error("유효 범위를 벗어남: {what} = {value}")]
    Domain { what: &'static str, value: f64 },

    /// 상대습도가 100%를 넘는 물리적으로 불가능한 상태
    #[error("물리적으로 불가능한 상태: {what} (상대습도 {:.1}%)", .relative_humidity * 100.0)]
    PhysicalInfeasibility {
        what: &'static str,
        relative_humidity: f64,
    },

    /// 반복 계산이 허용 횟수 안에 수렴하지 않음
    #[error("수렴 실패: {what} ({iterations}회 반복)")]
    Convergence { what: &'static str, iterations: usize },
}

/// 오류 메시지에 쓰이는 계산 대상 이름. 경계에서 번역 키로도 쓰인다.
pub mod subjects {
    pub const PRESSURE: &str = "대기압 [kPa]";
    pub const ALTITUDE: &str = "고도 [m]";
    pub const SATURATION_TEMPERATURE: &str = "포화압 계산 온도 [°C]";
    pub const VAPOR_PRESSURE_ABOVE_ATMOSPHERE: &str = "대기압 이상의 수증기 분압 [kPa]";
    pub const DEW_POINT_VAPOR_PRESSURE: &str = "이슬점 계산 수증기 분압 [kPa]";
    pub const INPUT_RELATIVE_HUMIDITY: &str = "입력 상대습도";
    pub const WET_BULB_ABOVE_DRY_BULB: &str = "습구 온도가 건구 온도보다 높음";
    pub const DEW_POINT_ABOVE_DRY_BULB: &str = "이슬점이 건구 온도보다 높음";
    pub const HUMIDITY_RATIO_ABOVE_SATURATION: &str = "습도비가 포화 습도비보다 큼";
    pub const WET_BULB_INPUT: &str = "습구 온도 계산 입력";
    pub const WET_BULB_BRACKET: &str = "습구 온도 탐색 구간";
    pub const WET_BULB: &str = "습구 온도";
    pub const UNREACHABLE_OUTLET_DRY_BULB: &str = "건공기로도 도달할 수 없는 출구 건구 온도 [°C]";
    pub const OUTLET_BELOW_WET_BULB: &str = "출구 건구 온도가 입구 습구 온도보다 낮음";
    pub const RELATIVE_HUMIDITY_DECREASE: &str = "단열 가습으로는 상대습도를 낮출 수 없음";
    pub const TARGET_RELATIVE_HUMIDITY: &str = "목표 상대습도 가습";
    pub const OUTLET_HUMIDITY_RATIO_TOO_HIGH: &str = "출구 습도비가 너무 큼";
    pub const FOG_BRACKET: &str = "안개 보정 탐색 구간";
    pub const FOG_CORRECTION: &str = "안개 보정";
}
