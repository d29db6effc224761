//! 두 기류의 단열 혼합. 혼합점이 과포화이면 안개 보정을 수행한다.

use tracing::{debug, warn};

use super::{ProcessEngine, ProcessKind, ProcessResult, StreamFlow};
use crate::air::error::subjects;
use crate::air::formulas::{dew_point, enthalpy, relative_humidity};
use crate::air::state::SATURATED_RH_CLAMP;
use crate::air::{saturation_pressure_kpa, MoistAirState, PsychroResult};
use crate::solver::{bisect, expand_bracket, Probe};

/// 안개 보정 탐색의 첫 온도 증분 [°C]
const FOG_SEARCH_STEP_C: f64 = 0.01;

/// 혼합되는 기류 하나.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AirStream {
    /// 건구 온도 [°C]
    pub dry_bulb_c: f64,
    /// 상대습도 [분율]
    pub relative_humidity: f64,
    /// 체적 유량 [m³/h]
    pub flow_m3_per_h: f64,
}

/// 혼합 입력 값.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixingInput {
    pub first: AirStream,
    pub second: AirStream,
}

impl ProcessEngine {
    /// 두 기류 혼합.
    ///
    /// 건공기 질량 유량으로 건구 온도, 습도비, 엔탈피를 가중 평균한다. 혼합점 상대습도가
    /// 100% 이상이면 같은 엔탈피를 갖는 포화 곡선 위의 점을 찾아 혼합점으로 삼고,
    /// 남는 수분은 응축수(안개)로 보고한다.
    pub fn mix(&self, input: MixingInput) -> PsychroResult<ProcessResult> {
        let s1 = self.resolver.from_dry_bulb_and_relative_humidity(
            input.first.dry_bulb_c,
            input.first.relative_humidity,
        )?;
        let s2 = self.resolver.from_dry_bulb_and_relative_humidity(
            input.second.dry_bulb_c,
            input.second.relative_humidity,
        )?;

        let m1 = input.first.flow_m3_per_h / s1.specific_volume_m3_per_kg;
        let m2 = input.second.flow_m3_per_h / s2.specific_volume_m3_per_kg;
        let m3 = m1 + m2;
        let weighted = |a: f64, b: f64| (m1 * a + m2 * b) / m3;

        let t_mix = weighted(s1.dry_bulb_c, s2.dry_bulb_c);
        let w_mix = weighted(s1.humidity_ratio, s2.humidity_ratio);
        let e_mix = weighted(s1.enthalpy_kj_per_kg, s2.enthalpy_kj_per_kg);

        let p_sat_mix = saturation_pressure_kpa(t_mix)?;
        let pv_mix = self.resolver.vapor_pressure(w_mix);
        let rh_mix = relative_humidity(pv_mix, p_sat_mix);

        let (mixed, condensed_water) = if rh_mix >= 1.0 {
            warn!(
                relative_humidity = rh_mix,
                dry_bulb_c = t_mix,
                "fog formation in mixed air"
            );
            let state = self.fog_corrected(t_mix, e_mix)?;
            (state, Some(w_mix - state.humidity_ratio))
        } else {
            let state = MoistAirState {
                dry_bulb_c: t_mix,
                wet_bulb_c: self.resolver.wet_bulb(t_mix, e_mix)?,
                dew_point_c: dew_point(pv_mix)?,
                relative_humidity: rh_mix,
                saturation_pressure_kpa: p_sat_mix,
                vapor_pressure_kpa: pv_mix,
                humidity_ratio: w_mix,
                enthalpy_kj_per_kg: e_mix,
                specific_volume_m3_per_kg: self.resolver.specific_volume(t_mix, w_mix),
            };
            (state, None)
        };

        let flows = vec![
            StreamFlow {
                volume_m3_per_h: input.first.flow_m3_per_h,
                dry_air_kg_per_h: m1,
            },
            StreamFlow {
                volume_m3_per_h: input.second.flow_m3_per_h,
                dry_air_kg_per_h: m2,
            },
            StreamFlow {
                volume_m3_per_h: m3 * mixed.specific_volume_m3_per_kg,
                dry_air_kg_per_h: m3,
            },
        ];

        Ok(ProcessResult {
            kind: ProcessKind::Mixing,
            condensed_water,
            states: vec![s1, s2, mixed],
            flows,
        })
    }

    /// 엔탈피 `e_ref`를 유지하는 (상대습도 0.99999의) 포화 곡선 위의 점을 찾는다.
    /// 과포화 혼합점 온도에서 시작해 온도를 올리며 탐색한다.
    fn fog_corrected(&self, t_mix: f64, e_ref: f64) -> PsychroResult<MoistAirState> {
        let limits = self.resolver.limits();
        let saturated = |t: f64| -> PsychroResult<(f64, f64, f64)> {
            let p_sat = saturation_pressure_kpa(t)?;
            let pv = SATURATED_RH_CLAMP * p_sat;
            let w = self.resolver.humidity_ratio(pv)?;
            Ok((p_sat, pv, w))
        };
        let enthalpy_gap = |t: f64| -> PsychroResult<f64> {
            let (_, _, w) = saturated(t)?;
            Ok(enthalpy(t, w) - e_ref)
        };

        let high = expand_bracket(
            subjects::FOG_BRACKET,
            t_mix + FOG_SEARCH_STEP_C,
            FOG_SEARCH_STEP_C,
            limits.max_iterations,
            |t| Ok(enthalpy_gap(t)? >= -limits.enthalpy_tolerance_kj_per_kg),
        )?;
        let t = if enthalpy_gap(high)?.abs() <= limits.enthalpy_tolerance_kj_per_kg {
            high
        } else {
            bisect(
                subjects::FOG_CORRECTION,
                t_mix,
                high,
                limits.max_iterations,
                |t| {
                    let gap = enthalpy_gap(t)?;
                    Ok(if gap.abs() <= limits.enthalpy_tolerance_kj_per_kg {
                        Probe::Accept
                    } else if gap > 0.0 {
                        Probe::Lower
                    } else {
                        Probe::Higher
                    })
                },
            )?
        };
        debug!(from = t_mix, to = t, "fog corrected mixing temperature");

        let (p_sat, pv, w) = saturated(t)?;
        Ok(MoistAirState {
            dry_bulb_c: t,
            wet_bulb_c: t,
            dew_point_c: t,
            relative_humidity: SATURATED_RH_CLAMP,
            saturation_pressure_kpa: p_sat,
            vapor_pressure_kpa: pv,
            humidity_ratio: w,
            enthalpy_kj_per_kg: enthalpy(t, w),
            specific_volume_m3_per_kg: self.resolver.specific_volume(t, w),
        })
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn unsaturated_mixture_enthalpy_is_mass_weighted(
            t1 in 5.0f64..40.0,
            t2 in 5.0f64..40.0,
            rh1 in 0.05f64..0.4,
            rh2 in 0.05f64..0.4,
            q1 in 100.0f64..5000.0,
            q2 in 100.0f64..5000.0,
        ) {
            let engine = ProcessEngine::default();
            let r = engine
                .mix(MixingInput {
                    first: AirStream { dry_bulb_c: t1, relative_humidity: rh1, flow_m3_per_h: q1 },
                    second: AirStream { dry_bulb_c: t2, relative_humidity: rh2, flow_m3_per_h: q2 },
                })
                .unwrap();
            prop_assert!(!r.fog_formed());
            let (m1, m2) = (r.flows[0].dry_air_kg_per_h, r.flows[1].dry_air_kg_per_h);
            let expected = (m1 * r.states[0].enthalpy_kj_per_kg
                + m2 * r.states[1].enthalpy_kj_per_kg)
                / (m1 + m2);
            prop_assert!((r.outlet().enthalpy_kj_per_kg - expected).abs() < 1e-9);
            prop_assert!(r.outlet().relative_humidity < 1.0);
        }
    }
}
