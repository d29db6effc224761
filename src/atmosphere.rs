//! 계산 전체에서 공유하는 대기압 정보.

use serde::Serialize;

use crate::air::error::subjects;
use crate::air::{PsychroError, PsychroResult};

/// 해수면 표준 대기압 [kPa]
pub const STANDARD_PRESSURE_KPA: f64 = 101.325;

// 고도 보정식 p = 101.324 * (1 - a * z)^b
const ALTITUDE_REFERENCE_KPA: f64 = 101.324;
const ALTITUDE_COEFF_A: f64 = 2.2556e-5;
const ALTITUDE_EXPONENT_B: f64 = 5.2559;

/// 국소 대기압. 실행 시작 시 한 번 정해지며 이후 변경하지 않는다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AtmosphericContext {
    /// 대기압 [kPa]
    pub pressure_kpa: f64,
}

impl AtmosphericContext {
    /// 대기압을 직접 지정한다. 0 이하의 압력은 허용하지 않는다.
    pub fn new(pressure_kpa: f64) -> PsychroResult<Self> {
        if !pressure_kpa.is_finite() || pressure_kpa <= 0.0 {
            return Err(PsychroError::Domain {
                what: subjects::PRESSURE,
                value: pressure_kpa,
            });
        }
        Ok(Self { pressure_kpa })
    }

    /// 해수면 표준 대기압(101.325 kPa).
    pub fn standard() -> Self {
        Self {
            pressure_kpa: STANDARD_PRESSURE_KPA,
        }
    }

    /// 고도[m]로부터 대기압을 추정한다.
    pub fn from_altitude(altitude_m: f64) -> PsychroResult<Self> {
        let base = 1.0 - ALTITUDE_COEFF_A * altitude_m;
        if base <= 0.0 {
            return Err(PsychroError::Domain {
                what: subjects::ALTITUDE,
                value: altitude_m,
            });
        }
        Self::new(ALTITUDE_REFERENCE_KPA * base.powf(ALTITUDE_EXPONENT_B))
    }
}

impl Default for AtmosphericContext {
    fn default() -> Self {
        Self::standard()
    }
}
