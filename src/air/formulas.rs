//! 습공기 기본 관계식. 모두 kPa, °C, kJ/kg, m³/kg 기준이다.

use super::error::subjects;
use super::{PsychroError, PsychroResult, KELVIN_OFFSET};
use crate::atmosphere::AtmosphericContext;

/// 수증기/건공기 분자량비
pub const MOLAR_MASS_RATIO: f64 = 0.62198;
/// 건공기 정압비열 [kJ/kg·K]
pub const DRY_AIR_CP: f64 = 1.006;
/// 0°C 물의 증발잠열 [kJ/kg]
pub const LATENT_HEAT_0C: f64 = 2501.0;
/// 수증기 정압비열 [kJ/kg·K]
pub const VAPOR_CP: f64 = 1.775;
/// 물(액체) 비열 [kJ/kg·K]
pub const WATER_CP: f64 = 4.186;
/// 건공기 기체상수 [kJ/kg·K]
pub const DRY_AIR_GAS_CONSTANT: f64 = 0.28705;
/// 비체적 보정 계수 (1/분자량비)
pub const VAPOR_VOLUME_FACTOR: f64 = 1.6078;

// 이슬점 상관식 계수 (p: hPa)
const DEW_A: f64 = 186.4905;
const DEW_B: f64 = 237.3;
const DEW_C: f64 = 8.2859;

/// 수증기 분압[kPa]으로부터 습도비[kg/kg]를 구한다.
pub fn humidity_ratio_from_vapor_pressure(
    atm: &AtmosphericContext,
    vapor_pressure_kpa: f64,
) -> PsychroResult<f64> {
    let denom = atm.pressure_kpa - vapor_pressure_kpa;
    if denom <= 0.0 {
        return Err(PsychroError::Domain {
            what: subjects::VAPOR_PRESSURE_ABOVE_ATMOSPHERE,
            value: vapor_pressure_kpa,
        });
    }
    Ok(MOLAR_MASS_RATIO * vapor_pressure_kpa / denom)
}

/// 건구/습구 온도와 습구 온도에서의 포화 습도비로부터 습도비를 구한다 (건습구 열수지).
pub fn humidity_ratio_from_psychrometer(
    dry_bulb_c: f64,
    wet_bulb_c: f64,
    saturated_ratio_at_wet_bulb: f64,
) -> f64 {
    let num = (LATENT_HEAT_0C - (WATER_CP - VAPOR_CP) * wet_bulb_c) * saturated_ratio_at_wet_bulb
        - DRY_AIR_CP * (dry_bulb_c - wet_bulb_c);
    let den = LATENT_HEAT_0C + VAPOR_CP * dry_bulb_c - WATER_CP * wet_bulb_c;
    num / den
}

/// 상대습도(분율) = pv / pvs
pub fn relative_humidity(vapor_pressure_kpa: f64, saturation_pressure_kpa: f64) -> f64 {
    vapor_pressure_kpa / saturation_pressure_kpa
}

/// 비엔탈피 [kJ/kg 건공기]
pub fn enthalpy(dry_bulb_c: f64, humidity_ratio: f64) -> f64 {
    DRY_AIR_CP * dry_bulb_c + humidity_ratio * (LATENT_HEAT_0C + VAPOR_CP * dry_bulb_c)
}

/// 습도비로부터 수증기 분압[kPa]을 구한다.
pub fn vapor_pressure_from_humidity_ratio(atm: &AtmosphericContext, humidity_ratio: f64) -> f64 {
    atm.pressure_kpa * humidity_ratio / (MOLAR_MASS_RATIO + humidity_ratio)
}

/// 수증기 분압[kPa]으로부터 이슬점 온도[°C]를 구한다. 분압이 0 이하면 정의되지 않는다.
pub fn dew_point(vapor_pressure_kpa: f64) -> PsychroResult<f64> {
    if vapor_pressure_kpa.is_nan() || vapor_pressure_kpa <= 0.0 {
        return Err(PsychroError::Domain {
            what: subjects::DEW_POINT_VAPOR_PRESSURE,
            value: vapor_pressure_kpa,
        });
    }
    let a = (vapor_pressure_kpa * 10.0).log10();
    Ok((DEW_A - DEW_B * a) / (a - DEW_C))
}

/// 비체적 [m³/kg 건공기]
pub fn specific_volume(atm: &AtmosphericContext, dry_bulb_c: f64, humidity_ratio: f64) -> f64 {
    DRY_AIR_GAS_CONSTANT * (dry_bulb_c + KELVIN_OFFSET) / atm.pressure_kpa
        * (1.0 + VAPOR_VOLUME_FACTOR * humidity_ratio)
}

/// 엔탈피와 습도비로부터 건구 온도를 역산한다.
pub fn dry_bulb_from_enthalpy(enthalpy_kj_per_kg: f64, humidity_ratio: f64) -> f64 {
    (enthalpy_kj_per_kg - LATENT_HEAT_0C * humidity_ratio)
        / (DRY_AIR_CP + VAPOR_CP * humidity_ratio)
}

/// 엔탈피와 건구 온도로부터 습도비를 역산한다.
pub fn humidity_ratio_from_enthalpy(enthalpy_kj_per_kg: f64, dry_bulb_c: f64) -> f64 {
    (enthalpy_kj_per_kg - DRY_AIR_CP * dry_bulb_c) / (LATENT_HEAT_0C + VAPOR_CP * dry_bulb_c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn enthalpy_inverts_both_ways() {
        let e = enthalpy(25.0, 0.0099);
        assert_abs_diff_eq!(dry_bulb_from_enthalpy(e, 0.0099), 25.0, epsilon = 1e-10);
        assert_abs_diff_eq!(humidity_ratio_from_enthalpy(e, 25.0), 0.0099, epsilon = 1e-12);
    }

    #[test]
    fn vapor_pressure_and_ratio_are_inverse() {
        let atm = AtmosphericContext::standard();
        let w = humidity_ratio_from_vapor_pressure(&atm, 1.5844).unwrap();
        assert_abs_diff_eq!(vapor_pressure_from_humidity_ratio(&atm, w), 1.5844, epsilon = 1e-10);
    }

    #[test]
    fn dew_point_needs_positive_pressure() {
        assert!(dew_point(0.0).is_err());
        assert!(dew_point(-1.0).is_err());
        assert_abs_diff_eq!(dew_point(1.584_447).unwrap(), 13.864, epsilon = 1e-3);
    }

    #[test]
    fn vapor_pressure_above_atmosphere_is_rejected() {
        let atm = AtmosphericContext::standard();
        assert!(humidity_ratio_from_vapor_pressure(&atm, 101.325).is_err());
    }
}
