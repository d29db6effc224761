//! 습구 온도 탐색.
//!
//! 건구 온도와 엔탈피가 주어지면, 같은 엔탈피 선 위에서 상대습도가
//! [0.999, 1.0) 에 들어오는 온도를 습구 온도로 본다.

use tracing::debug;

use super::error::subjects;
use super::formulas::{humidity_ratio_from_enthalpy, MOLAR_MASS_RATIO};
use super::saturation::saturation_pressure_kpa;
use super::{PsychroError, PsychroResult};
use crate::atmosphere::AtmosphericContext;
use crate::solver::{bisect, expand_bracket, Probe, SolverLimits};

/// 습구 판정 구간 하한 (포함)
pub const WET_BULB_BAND_LOW: f64 = 0.999;
/// 습구 판정 구간 상한 (미포함)
pub const WET_BULB_BAND_HIGH: f64 = 1.0;

const INITIAL_OFFSET_C: f64 = 0.1;

/// 엔탈피 선 위의 시험 온도에서 계산되는 상대습도.
fn implied_relative_humidity(
    atm: &AtmosphericContext,
    trial_c: f64,
    enthalpy_kj_per_kg: f64,
) -> PsychroResult<f64> {
    let ratio = humidity_ratio_from_enthalpy(enthalpy_kj_per_kg, trial_c);
    let p_sat = saturation_pressure_kpa(trial_c)?;
    Ok(atm.pressure_kpa * ratio / (p_sat * (MOLAR_MASS_RATIO + ratio)))
}

fn classify(rh: f64) -> Probe {
    if rh >= WET_BULB_BAND_HIGH {
        // 과포화: 시험 온도가 너무 낮다
        Probe::Higher
    } else if rh < WET_BULB_BAND_LOW {
        Probe::Lower
    } else {
        Probe::Accept
    }
}

/// 건구 온도[°C]와 엔탈피[kJ/kg]로부터 습구 온도[°C]를 구한다.
///
/// 건구 온도 자체가 이미 판정 구간에 있으면(포화 공기) 건구 온도를 그대로 돌려준다.
/// 건구 온도에서 과포화라면 습구 온도가 존재하지 않으므로 오류다.
pub fn wet_bulb_temperature(
    atm: &AtmosphericContext,
    limits: &SolverLimits,
    dry_bulb_c: f64,
    enthalpy_kj_per_kg: f64,
) -> PsychroResult<f64> {
    let probe = |t: f64| -> PsychroResult<Probe> {
        implied_relative_humidity(atm, t, enthalpy_kj_per_kg).map(classify)
    };

    let rh_at_dry_bulb = implied_relative_humidity(atm, dry_bulb_c, enthalpy_kj_per_kg)?;
    match classify(rh_at_dry_bulb) {
        Probe::Accept => return Ok(dry_bulb_c),
        Probe::Higher => {
            return Err(PsychroError::PhysicalInfeasibility {
                what: subjects::WET_BULB_INPUT,
                relative_humidity: rh_at_dry_bulb,
            })
        }
        Probe::Lower => {}
    }

    let low = expand_bracket(
        subjects::WET_BULB_BRACKET,
        dry_bulb_c - INITIAL_OFFSET_C,
        -INITIAL_OFFSET_C,
        limits.max_iterations,
        |t| Ok(probe(t)? != Probe::Lower),
    )?;
    if probe(low)? == Probe::Accept {
        debug!(dry_bulb_c, wet_bulb_c = low, "wet bulb found while bracketing");
        return Ok(low);
    }
    bisect(
        subjects::WET_BULB,
        low,
        dry_bulb_c,
        limits.max_iterations,
        probe,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::air::formulas::{enthalpy, humidity_ratio_from_vapor_pressure};

    fn enthalpy_at(atm: &AtmosphericContext, t: f64, rh: f64) -> f64 {
        let pv = rh * saturation_pressure_kpa(t).unwrap();
        enthalpy(t, humidity_ratio_from_vapor_pressure(atm, pv).unwrap())
    }

    #[test]
    fn result_lies_in_band() {
        let atm = AtmosphericContext::standard();
        let limits = SolverLimits::default();
        for (t, rh) in [(25.0, 0.5), (45.0, 0.05), (-5.0, 0.5), (10.0, 0.5), (0.5, 0.9)] {
            let e = enthalpy_at(&atm, t, rh);
            let wb = wet_bulb_temperature(&atm, &limits, t, e).unwrap();
            let implied = implied_relative_humidity(&atm, wb, e).unwrap();
            assert!(
                (WET_BULB_BAND_LOW..WET_BULB_BAND_HIGH).contains(&implied),
                "t={t} rh={rh} wb={wb} implied={implied}"
            );
            assert!(wb <= t);
        }
    }

    #[test]
    fn saturated_air_returns_dry_bulb() {
        let atm = AtmosphericContext::standard();
        let e = enthalpy_at(&atm, 25.0, 0.99999);
        let wb = wet_bulb_temperature(&atm, &SolverLimits::default(), 25.0, e).unwrap();
        assert_eq!(wb, 25.0);
    }

    #[test]
    fn oversaturated_input_is_rejected() {
        let atm = AtmosphericContext::standard();
        let e = enthalpy_at(&atm, 25.0, 1.2);
        let err = wet_bulb_temperature(&atm, &SolverLimits::default(), 25.0, e).unwrap_err();
        assert!(matches!(err, PsychroError::PhysicalInfeasibility { .. }));
    }

    #[test]
    fn iteration_cap_is_enforced() {
        let atm = AtmosphericContext::standard();
        let e = enthalpy_at(&atm, 45.0, 0.05);
        let limits = SolverLimits {
            max_iterations: 2,
            ..SolverLimits::default()
        };
        let err = wet_bulb_temperature(&atm, &limits, 45.0, e).unwrap_err();
        assert!(matches!(err, PsychroError::Convergence { .. }));
    }
}
