//! 포화 수증기압 상관식.
//! 0°C 초과는 물(액체) 위, 0°C 이하는 얼음 위의 포화압을 사용한다.

use super::error::subjects;
use super::{PsychroError, PsychroResult, KELVIN_OFFSET};

// 물 위 포화압: ln(p) = C1/T + C2 + C3*T + C4*T^2 + C5*T^3 + C6*T^4 + C7*ln(T)
const LIQUID_C1: f64 = -7511.52;
const LIQUID_C2: f64 = 89.63121;
const LIQUID_C3: f64 = 0.023998970;
const LIQUID_C4: f64 = -1.1654551e-5;
const LIQUID_C5: f64 = -1.2810336e-8;
const LIQUID_C6: f64 = 2.0998405e-11;
const LIQUID_C7: f64 = -12.150799;

// 얼음 위 포화압: ln(p) = D1 + D2/T + D3*ln(T)
const ICE_D1: f64 = 24.2779;
const ICE_D2: f64 = -6238.64;
const ICE_D3: f64 = -0.344438;

/// 온도[°C]에서의 포화 수증기압[kPa].
///
/// 절대온도가 0 이하가 되는 입력(t ≤ -273.16°C)은 `Domain` 오류로 처리한다.
pub fn saturation_pressure_kpa(t_c: f64) -> PsychroResult<f64> {
    let t_k = t_c + KELVIN_OFFSET;
    if t_k.is_nan() || t_k <= 0.0 {
        return Err(PsychroError::Domain {
            what: subjects::SATURATION_TEMPERATURE,
            value: t_c,
        });
    }
    let ln_p = if t_k > KELVIN_OFFSET {
        LIQUID_C1 / t_k
            + LIQUID_C2
            + LIQUID_C3 * t_k
            + LIQUID_C4 * t_k.powi(2)
            + LIQUID_C5 * t_k.powi(3)
            + LIQUID_C6 * t_k.powi(4)
            + LIQUID_C7 * t_k.ln()
    } else {
        ICE_D1 + ICE_D2 / t_k + ICE_D3 * t_k.ln()
    };
    Ok(ln_p.exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_zero_is_rejected() {
        assert!(matches!(
            saturation_pressure_kpa(-273.16),
            Err(PsychroError::Domain { .. })
        ));
        assert!(saturation_pressure_kpa(-273.0).is_ok());
    }

    #[test]
    fn zero_celsius_uses_ice_branch() {
        let ice = saturation_pressure_kpa(0.0).unwrap();
        let liquid = saturation_pressure_kpa(1e-9).unwrap();
        assert!((ice - 0.610_673).abs() < 1e-5, "ice={ice}");
        assert!((liquid - 0.611_197).abs() < 1e-5, "liquid={liquid}");
    }
}
