//! 단열 가습 프로세스. 입구 엔탈피와 습구 온도를 고정한 채 습도비를 바꾼다.

use tracing::{debug, warn};

use super::{ProcessEngine, ProcessKind, ProcessResult};
use crate::air::error::subjects;
use crate::air::formulas::{
    dew_point, dry_bulb_from_enthalpy, humidity_ratio_from_enthalpy, relative_humidity,
};
use crate::air::state::SATURATED_RH_CLAMP;
use crate::air::{saturation_pressure_kpa, MoistAirState, PsychroError, PsychroResult};
use crate::solver::{bisect, Probe};

/// 단열 가습 - 목표 건구 온도 입력.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HumidifyToDryBulbInput {
    /// 입구 건구 온도 [°C]
    pub dry_bulb_c: f64,
    /// 입구 상대습도 [분율]
    pub relative_humidity: f64,
    /// 출구 건구 온도 [°C]
    pub outlet_dry_bulb_c: f64,
}

/// 단열 가습 - 목표 상대습도 입력.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HumidifyToRelativeHumidityInput {
    /// 입구 건구 온도 [°C]
    pub dry_bulb_c: f64,
    /// 입구 상대습도 [분율]
    pub relative_humidity: f64,
    /// 출구 상대습도 [분율]. 1.0 이상이면 입구 습구 온도에서의 포화로 본다.
    pub outlet_relative_humidity: f64,
}

/// 단열 가습 - 목표 습도비 입력.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HumidifyToHumidityRatioInput {
    /// 입구 건구 온도 [°C]
    pub dry_bulb_c: f64,
    /// 입구 습도비 [kg/kg]
    pub humidity_ratio: f64,
    /// 출구 습도비 [kg/kg]
    pub outlet_humidity_ratio: f64,
}

impl ProcessEngine {
    /// 입구와 같은 엔탈피 선 위에서 건구 온도와 습도비로 출구 상태를 만든다.
    fn on_inlet_enthalpy(
        &self,
        inlet: &MoistAirState,
        dry_bulb_c: f64,
        humidity_ratio: f64,
    ) -> PsychroResult<(MoistAirState, f64)> {
        let p_sat = saturation_pressure_kpa(dry_bulb_c)?;
        let pv = self.resolver.vapor_pressure(humidity_ratio);
        let rh = relative_humidity(pv, p_sat);
        let state = MoistAirState {
            dry_bulb_c,
            wet_bulb_c: inlet.wet_bulb_c,
            dew_point_c: inlet.dew_point_c,
            relative_humidity: rh,
            saturation_pressure_kpa: p_sat,
            vapor_pressure_kpa: pv,
            humidity_ratio,
            enthalpy_kj_per_kg: inlet.enthalpy_kj_per_kg,
            specific_volume_m3_per_kg: self.resolver.specific_volume(dry_bulb_c, humidity_ratio),
        };
        Ok((state, rh))
    }

    /// 입구 습구 온도에서 포화된 출구 상태. 상대습도는 습구 판정 구간 [0.999, 1.0) 안에 있다.
    fn saturated_at_inlet_wet_bulb(&self, inlet: &MoistAirState) -> PsychroResult<MoistAirState> {
        let t = inlet.wet_bulb_c;
        let w = humidity_ratio_from_enthalpy(inlet.enthalpy_kj_per_kg, t);
        let (state, _) = self.on_inlet_enthalpy(inlet, t, w)?;
        Ok(MoistAirState {
            dew_point_c: t,
            ..state
        })
    }

    /// 단열 가습 - 목표 건구 온도.
    ///
    /// 입구 엔탈피 선과 목표 건구 온도선의 교점을 출구로 한다. 목표가 입구보다 낮으면
    /// 가습, 높으면 감습 방향이며, 교점이 과포화이면 오류다.
    pub fn humidify_to_dry_bulb(
        &self,
        input: HumidifyToDryBulbInput,
    ) -> PsychroResult<ProcessResult> {
        let inlet = self
            .resolver
            .from_dry_bulb_and_relative_humidity(input.dry_bulb_c, input.relative_humidity)?;

        let t2 = input.outlet_dry_bulb_c;
        let w2 = humidity_ratio_from_enthalpy(inlet.enthalpy_kj_per_kg, t2);
        if w2 < 0.0 {
            return Err(PsychroError::Domain {
                what: subjects::UNREACHABLE_OUTLET_DRY_BULB,
                value: t2,
            });
        }
        let (outlet, rh2) = self.on_inlet_enthalpy(&inlet, t2, w2)?;
        if rh2 > 1.0 {
            return Err(PsychroError::PhysicalInfeasibility {
                what: subjects::OUTLET_BELOW_WET_BULB,
                relative_humidity: rh2,
            });
        }
        debug!(
            humidifying = t2 < inlet.dry_bulb_c,
            added_water = w2 - inlet.humidity_ratio,
            "adiabatic process to target dry bulb"
        );
        let outlet = MoistAirState {
            dew_point_c: dew_point(outlet.vapor_pressure_kpa)?,
            ..outlet
        };
        Ok(ProcessResult::two_point(
            ProcessKind::HumidifyToDryBulb,
            inlet,
            outlet,
        ))
    }

    /// 단열 가습 - 목표 상대습도.
    ///
    /// 습도비를 입구 값에서 증가시키며 상대습도가 목표에 처음 도달하는 점을 찾는다.
    /// 목표가 100% 이상이면 입구 습구 온도의 포화 상태를 출구로 한다.
    pub fn humidify_to_relative_humidity(
        &self,
        input: HumidifyToRelativeHumidityInput,
    ) -> PsychroResult<ProcessResult> {
        let inlet = self
            .resolver
            .from_dry_bulb_and_relative_humidity(input.dry_bulb_c, input.relative_humidity)?;
        let target = input.outlet_relative_humidity;

        if target >= 1.0 {
            let outlet = self.saturated_at_inlet_wet_bulb(&inlet)?;
            return Ok(ProcessResult::two_point(
                ProcessKind::HumidifyToRelativeHumidity,
                inlet,
                outlet,
            ));
        }
        if target < inlet.relative_humidity {
            return Err(PsychroError::PhysicalInfeasibility {
                what: subjects::RELATIVE_HUMIDITY_DECREASE,
                relative_humidity: target,
            });
        }

        let e = inlet.enthalpy_kj_per_kg;
        let rh_at = |w: f64| -> PsychroResult<f64> {
            let t = dry_bulb_from_enthalpy(e, w);
            Ok(relative_humidity(
                self.resolver.vapor_pressure(w),
                saturation_pressure_kpa(t)?,
            ))
        };
        let w_saturated = humidity_ratio_from_enthalpy(e, inlet.wet_bulb_c);
        let band = self.resolver.limits().relative_humidity_tolerance;

        let w2 = if rh_at(w_saturated)? <= target {
            w_saturated
        } else if rh_at(inlet.humidity_ratio)? >= target {
            inlet.humidity_ratio
        } else {
            bisect(
                subjects::TARGET_RELATIVE_HUMIDITY,
                inlet.humidity_ratio,
                w_saturated,
                self.resolver.limits().max_iterations,
                |w| {
                    let rh = rh_at(w)?;
                    Ok(if rh < target {
                        Probe::Higher
                    } else if rh >= target + band {
                        Probe::Lower
                    } else {
                        Probe::Accept
                    })
                },
            )?
        };

        let t2 = dry_bulb_from_enthalpy(e, w2);
        let (outlet, _) = self.on_inlet_enthalpy(&inlet, t2, w2)?;
        let outlet = MoistAirState {
            dew_point_c: dew_point(outlet.vapor_pressure_kpa)?,
            ..outlet
        };
        Ok(ProcessResult::two_point(
            ProcessKind::HumidifyToRelativeHumidity,
            inlet,
            outlet,
        ))
    }

    /// 단열 가습 - 목표 습도비. 반복 없이 엔탈피 선에서 출구 건구 온도를 바로 구한다.
    pub fn humidify_to_humidity_ratio(
        &self,
        input: HumidifyToHumidityRatioInput,
    ) -> PsychroResult<ProcessResult> {
        let inlet = self
            .resolver
            .from_dry_bulb_and_humidity_ratio(input.dry_bulb_c, input.humidity_ratio)?;

        let w2 = input.outlet_humidity_ratio;
        let t2 = dry_bulb_from_enthalpy(inlet.enthalpy_kj_per_kg, w2);
        let (outlet, rh2) = self.on_inlet_enthalpy(&inlet, t2, w2)?;
        if rh2 > 1.0 {
            return Err(PsychroError::PhysicalInfeasibility {
                what: subjects::OUTLET_HUMIDITY_RATIO_TOO_HIGH,
                relative_humidity: rh2,
            });
        }

        let outlet = if rh2 == 1.0 {
            warn!(
                "outlet exactly saturated, using inlet wet bulb with RH {SATURATED_RH_CLAMP}"
            );
            let t = inlet.wet_bulb_c;
            let p_sat = saturation_pressure_kpa(t)?;
            let w = self.resolver.humidity_ratio(p_sat)?;
            MoistAirState {
                dry_bulb_c: t,
                dew_point_c: t,
                relative_humidity: SATURATED_RH_CLAMP,
                saturation_pressure_kpa: p_sat,
                vapor_pressure_kpa: p_sat,
                humidity_ratio: w,
                specific_volume_m3_per_kg: self.resolver.specific_volume(t, w),
                ..outlet
            }
        } else {
            MoistAirState {
                dew_point_c: dew_point(outlet.vapor_pressure_kpa)?,
                ..outlet
            }
        };
        Ok(ProcessResult::two_point(
            ProcessKind::HumidifyToHumidityRatio,
            inlet,
            outlet,
        ))
    }
}
