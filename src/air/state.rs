//! 두 가지 기지 물성으로부터 습공기 상태점 전체를 결정한다.

use serde::Serialize;
use tracing::warn;

use super::error::subjects;
use super::formulas::{
    dew_point, enthalpy, humidity_ratio_from_psychrometer, humidity_ratio_from_vapor_pressure,
    relative_humidity, specific_volume, vapor_pressure_from_humidity_ratio,
};
use super::saturation::saturation_pressure_kpa;
use super::wet_bulb::wet_bulb_temperature;
use super::{PsychroError, PsychroResult};
use crate::atmosphere::AtmosphericContext;
use crate::solver::SolverLimits;

/// 상대습도 100% 입력 시 습도비 분모 특이점을 피하기 위한 대체값.
pub const SATURATED_RH_CLAMP: f64 = 0.99999;
/// 건구 = 이슬점 입력 시의 대체 상대습도.
pub const DEW_POINT_SATURATED_RH_CLAMP: f64 = 0.999999;

/// 습공기 상태점. 한 번 만들어지면 변경하지 않는다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoistAirState {
    /// 건구 온도 [°C]
    pub dry_bulb_c: f64,
    /// 습구 온도 [°C]
    pub wet_bulb_c: f64,
    /// 이슬점 온도 [°C]
    pub dew_point_c: f64,
    /// 상대습도 [분율, 0~1]
    pub relative_humidity: f64,
    /// 포화 수증기압 [kPa]
    pub saturation_pressure_kpa: f64,
    /// 수증기 분압 [kPa]
    pub vapor_pressure_kpa: f64,
    /// 습도비 [kg수증기/kg건공기]
    pub humidity_ratio: f64,
    /// 비엔탈피 [kJ/kg건공기]
    pub enthalpy_kj_per_kg: f64,
    /// 비체적 [m³/kg건공기]
    pub specific_volume_m3_per_kg: f64,
}

/// 상태점 결정에 쓰이는 기지 물성 조합.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KnownProperties {
    /// 건구 온도 + 상대습도(분율)
    DryBulbRelativeHumidity {
        dry_bulb_c: f64,
        relative_humidity: f64,
    },
    /// 건구 온도 + 습구 온도
    DryBulbWetBulb { dry_bulb_c: f64, wet_bulb_c: f64 },
    /// 건구 온도 + 이슬점 온도
    DryBulbDewPoint { dry_bulb_c: f64, dew_point_c: f64 },
    /// 건구 온도 + 습도비(kg/kg)
    DryBulbHumidityRatio {
        dry_bulb_c: f64,
        humidity_ratio: f64,
    },
}

/// 대기압과 반복 한계를 묶어 상태점을 계산한다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateResolver {
    atm: AtmosphericContext,
    limits: SolverLimits,
}

impl StateResolver {
    pub fn new(atm: AtmosphericContext, limits: SolverLimits) -> Self {
        Self { atm, limits }
    }

    pub fn atmosphere(&self) -> &AtmosphericContext {
        &self.atm
    }

    pub fn limits(&self) -> &SolverLimits {
        &self.limits
    }

    /// 조합에 맞는 경로로 상태점을 계산한다.
    pub fn resolve(&self, known: KnownProperties) -> PsychroResult<MoistAirState> {
        match known {
            KnownProperties::DryBulbRelativeHumidity {
                dry_bulb_c,
                relative_humidity,
            } => self.from_dry_bulb_and_relative_humidity(dry_bulb_c, relative_humidity),
            KnownProperties::DryBulbWetBulb {
                dry_bulb_c,
                wet_bulb_c,
            } => self.from_dry_bulb_and_wet_bulb(dry_bulb_c, wet_bulb_c),
            KnownProperties::DryBulbDewPoint {
                dry_bulb_c,
                dew_point_c,
            } => self.from_dry_bulb_and_dew_point(dry_bulb_c, dew_point_c),
            KnownProperties::DryBulbHumidityRatio {
                dry_bulb_c,
                humidity_ratio,
            } => self.from_dry_bulb_and_humidity_ratio(dry_bulb_c, humidity_ratio),
        }
    }

    /// 건구 온도와 엔탈피로부터 습구 온도를 구한다.
    pub fn wet_bulb(&self, dry_bulb_c: f64, enthalpy_kj_per_kg: f64) -> PsychroResult<f64> {
        wet_bulb_temperature(&self.atm, &self.limits, dry_bulb_c, enthalpy_kj_per_kg)
    }

    pub fn humidity_ratio(&self, vapor_pressure_kpa: f64) -> PsychroResult<f64> {
        humidity_ratio_from_vapor_pressure(&self.atm, vapor_pressure_kpa)
    }

    pub fn vapor_pressure(&self, humidity_ratio: f64) -> f64 {
        vapor_pressure_from_humidity_ratio(&self.atm, humidity_ratio)
    }

    pub fn specific_volume(&self, dry_bulb_c: f64, humidity_ratio: f64) -> f64 {
        specific_volume(&self.atm, dry_bulb_c, humidity_ratio)
    }

    /// 건구 온도 + 상대습도 경로.
    ///
    /// 상대습도 1.0은 0.99999로 대체하며, 이 경우 이슬점은 건구 온도로 둔다.
    /// 과거의 "상대습도 0.99이면 이슬점 = 건구 온도" 규칙은 이 대체에만 적용한다.
    /// 0.99를 그대로 입력하면 이슬점은 수증기 분압으로 계산한다.
    pub fn from_dry_bulb_and_relative_humidity(
        &self,
        dry_bulb_c: f64,
        relative_humidity: f64,
    ) -> PsychroResult<MoistAirState> {
        if relative_humidity > 1.0 {
            return Err(PsychroError::PhysicalInfeasibility {
                what: subjects::INPUT_RELATIVE_HUMIDITY,
                relative_humidity,
            });
        }
        let clamped = relative_humidity == 1.0;
        let rh = if clamped {
            warn!(dry_bulb_c, "relative humidity 100% replaced by {SATURATED_RH_CLAMP}");
            SATURATED_RH_CLAMP
        } else {
            relative_humidity
        };

        let p_sat = saturation_pressure_kpa(dry_bulb_c)?;
        let pv = rh * p_sat;
        let w = self.humidity_ratio(pv)?;
        let e = enthalpy(dry_bulb_c, w);
        let dew_point_c = if clamped { dry_bulb_c } else { dew_point(pv)? };
        let wet_bulb_c = self.wet_bulb(dry_bulb_c, e)?;

        Ok(MoistAirState {
            dry_bulb_c,
            wet_bulb_c,
            dew_point_c,
            relative_humidity: rh,
            saturation_pressure_kpa: p_sat,
            vapor_pressure_kpa: pv,
            humidity_ratio: w,
            enthalpy_kj_per_kg: e,
            specific_volume_m3_per_kg: self.specific_volume(dry_bulb_c, w),
        })
    }

    /// 건구 온도 + 습구 온도 경로. 두 온도가 같으면 포화 공기다.
    pub fn from_dry_bulb_and_wet_bulb(
        &self,
        dry_bulb_c: f64,
        wet_bulb_c: f64,
    ) -> PsychroResult<MoistAirState> {
        let p_sat = saturation_pressure_kpa(dry_bulb_c)?;
        let (rh, pv, w, dew_point_c) = if dry_bulb_c == wet_bulb_c {
            (1.0, p_sat, self.humidity_ratio(p_sat)?, dry_bulb_c)
        } else {
            let w_sat_wb = self.humidity_ratio(saturation_pressure_kpa(wet_bulb_c)?)?;
            let w = humidity_ratio_from_psychrometer(dry_bulb_c, wet_bulb_c, w_sat_wb);
            let pv = self.vapor_pressure(w);
            let rh = relative_humidity(pv, p_sat);
            if rh > 1.0 {
                return Err(PsychroError::PhysicalInfeasibility {
                    what: subjects::WET_BULB_ABOVE_DRY_BULB,
                    relative_humidity: rh,
                });
            }
            (rh, pv, w, dew_point(pv)?)
        };

        Ok(MoistAirState {
            dry_bulb_c,
            wet_bulb_c,
            dew_point_c,
            relative_humidity: rh,
            saturation_pressure_kpa: p_sat,
            vapor_pressure_kpa: pv,
            humidity_ratio: w,
            enthalpy_kj_per_kg: enthalpy(dry_bulb_c, w),
            specific_volume_m3_per_kg: self.specific_volume(dry_bulb_c, w),
        })
    }

    /// 건구 온도 + 이슬점 온도 경로. 두 온도가 같으면 거의 포화(0.999999)로 본다.
    pub fn from_dry_bulb_and_dew_point(
        &self,
        dry_bulb_c: f64,
        dew_point_c: f64,
    ) -> PsychroResult<MoistAirState> {
        let p_sat = saturation_pressure_kpa(dry_bulb_c)?;
        let (rh, pv, w, e, wet_bulb_c) = if dry_bulb_c == dew_point_c {
            let w = self.humidity_ratio(p_sat)?;
            let e = enthalpy(dry_bulb_c, w);
            (DEW_POINT_SATURATED_RH_CLAMP, p_sat, w, e, dry_bulb_c)
        } else {
            let pv = saturation_pressure_kpa(dew_point_c)?;
            let rh = relative_humidity(pv, p_sat);
            if rh > 1.0 {
                return Err(PsychroError::PhysicalInfeasibility {
                    what: subjects::DEW_POINT_ABOVE_DRY_BULB,
                    relative_humidity: rh,
                });
            }
            let w = self.humidity_ratio(pv)?;
            let e = enthalpy(dry_bulb_c, w);
            (rh, pv, w, e, self.wet_bulb(dry_bulb_c, e)?)
        };

        Ok(MoistAirState {
            dry_bulb_c,
            wet_bulb_c,
            dew_point_c,
            relative_humidity: rh,
            saturation_pressure_kpa: p_sat,
            vapor_pressure_kpa: pv,
            humidity_ratio: w,
            enthalpy_kj_per_kg: e,
            specific_volume_m3_per_kg: self.specific_volume(dry_bulb_c, w),
        })
    }

    /// 건구 온도 + 습도비 경로. 습도비가 포화 습도비를 넘으면 오류다.
    pub fn from_dry_bulb_and_humidity_ratio(
        &self,
        dry_bulb_c: f64,
        humidity_ratio: f64,
    ) -> PsychroResult<MoistAirState> {
        let p_sat = saturation_pressure_kpa(dry_bulb_c)?;
        let pv = self.vapor_pressure(humidity_ratio);
        let rh = relative_humidity(pv, p_sat);
        if rh > 1.0 {
            return Err(PsychroError::PhysicalInfeasibility {
                what: subjects::HUMIDITY_RATIO_ABOVE_SATURATION,
                relative_humidity: rh,
            });
        }
        let e = enthalpy(dry_bulb_c, humidity_ratio);
        Ok(MoistAirState {
            dry_bulb_c,
            wet_bulb_c: self.wet_bulb(dry_bulb_c, e)?,
            dew_point_c: dew_point(pv)?,
            relative_humidity: rh,
            saturation_pressure_kpa: p_sat,
            vapor_pressure_kpa: pv,
            humidity_ratio,
            enthalpy_kj_per_kg: e,
            specific_volume_m3_per_kg: self.specific_volume(dry_bulb_c, humidity_ratio),
        })
    }
}

impl Default for StateResolver {
    fn default() -> Self {
        Self::new(AtmosphericContext::standard(), SolverLimits::default())
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn relative_humidity_route_round_trips(t in -20.0_f64..50.0, rh in 0.01_f64..0.99) {
            let state = StateResolver::default()
                .from_dry_bulb_and_relative_humidity(t, rh)
                .unwrap();
            let recovered = state.vapor_pressure_kpa / state.saturation_pressure_kpa;
            prop_assert!((recovered - rh).abs() < 1e-4);
            prop_assert!(state.wet_bulb_c <= t);
            prop_assert!(state.dew_point_c <= state.wet_bulb_c + 0.5);
        }
    }
}
