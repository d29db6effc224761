use super::{ProcessEngine, ProcessKind, ProcessResult};
use crate::air::formulas::{enthalpy, relative_humidity};
use crate::air::{saturation_pressure_kpa, MoistAirState, PsychroResult};

/// 가열/냉각 입력 값.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatingCoolingInput {
    /// 입구 건구 온도 [°C]
    pub dry_bulb_c: f64,
    /// 입구 상대습도 [분율]
    pub relative_humidity: f64,
    /// 출구 건구 온도 [°C]
    pub outlet_dry_bulb_c: f64,
}

impl ProcessEngine {
    /// 가열/냉각 프로세스.
    ///
    /// 출구 온도가 입구 이슬점보다 높으면 습도비가 유지되는 현열 변화이고,
    /// 그렇지 않으면 응축이 일어나 출구는 해당 온도의 포화 공기가 된다.
    pub fn heat_or_cool(&self, input: HeatingCoolingInput) -> PsychroResult<ProcessResult> {
        let inlet = self
            .resolver
            .from_dry_bulb_and_relative_humidity(input.dry_bulb_c, input.relative_humidity)?;

        let t2 = input.outlet_dry_bulb_c;
        let p_sat2 = saturation_pressure_kpa(t2)?;
        let outlet = if t2 > inlet.dew_point_c {
            let w2 = inlet.humidity_ratio;
            let pv2 = inlet.vapor_pressure_kpa;
            let e2 = enthalpy(t2, w2);
            MoistAirState {
                dry_bulb_c: t2,
                wet_bulb_c: self.resolver.wet_bulb(t2, e2)?,
                dew_point_c: inlet.dew_point_c,
                relative_humidity: relative_humidity(pv2, p_sat2),
                saturation_pressure_kpa: p_sat2,
                vapor_pressure_kpa: pv2,
                humidity_ratio: w2,
                enthalpy_kj_per_kg: e2,
                specific_volume_m3_per_kg: self.resolver.specific_volume(t2, w2),
            }
        } else {
            let w2 = self.resolver.humidity_ratio(p_sat2)?;
            MoistAirState {
                dry_bulb_c: t2,
                wet_bulb_c: t2,
                dew_point_c: t2,
                relative_humidity: 1.0,
                saturation_pressure_kpa: p_sat2,
                vapor_pressure_kpa: p_sat2,
                humidity_ratio: w2,
                enthalpy_kj_per_kg: enthalpy(t2, w2),
                specific_volume_m3_per_kg: self.resolver.specific_volume(t2, w2),
            }
        };

        Ok(ProcessResult::two_point(
            ProcessKind::HeatingCooling,
            inlet,
            outlet,
        ))
    }
}
