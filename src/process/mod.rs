//! 공기조화 기본 프로세스 계산 모듈 모음.
//! 가열/냉각, 단열 가습(목표 건구 온도/상대습도/습도비), 두 기류 혼합으로 구성한다.

pub mod heating;
pub mod humidification;
pub mod mixing;

use serde::Serialize;

use crate::air::{MoistAirState, StateResolver};

pub use heating::HeatingCoolingInput;
pub use humidification::{
    HumidifyToDryBulbInput, HumidifyToHumidityRatioInput, HumidifyToRelativeHumidityInput,
};
pub use mixing::{AirStream, MixingInput};

/// 프로세스 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessKind {
    HeatingCooling,
    HumidifyToDryBulb,
    HumidifyToRelativeHumidity,
    HumidifyToHumidityRatio,
    Mixing,
}

/// 기류 하나의 유량.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StreamFlow {
    /// 체적 유량 [m³/h]
    pub volume_m3_per_h: f64,
    /// 건공기 질량 유량 [kg/h]
    pub dry_air_kg_per_h: f64,
}

/// 프로세스 계산 결과. 상태점 1, 2 (혼합이면 3까지) 순서로 담는다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessResult {
    pub kind: ProcessKind,
    /// 혼합 시 안개로 응축된 수분 [kg/kg건공기]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condensed_water: Option<f64>,
    pub states: Vec<MoistAirState>,
    /// 혼합 프로세스에서만 채워지며 `states`와 같은 순서다.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub flows: Vec<StreamFlow>,
}

impl ProcessResult {
    fn two_point(kind: ProcessKind, inlet: MoistAirState, outlet: MoistAirState) -> Self {
        Self {
            kind,
            condensed_water: None,
            states: vec![inlet, outlet],
            flows: Vec::new(),
        }
    }

    pub fn inlet(&self) -> &MoistAirState {
        &self.states[0]
    }

    /// 마지막 상태점 (혼합이면 혼합점).
    pub fn outlet(&self) -> &MoistAirState {
        &self.states[self.states.len() - 1]
    }

    pub fn fog_formed(&self) -> bool {
        self.condensed_water.is_some()
    }
}

/// 상태점 계산기를 이용해 다섯 가지 프로세스를 계산한다.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProcessEngine {
    resolver: StateResolver,
}

impl ProcessEngine {
    pub fn new(resolver: StateResolver) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &StateResolver {
        &self.resolver
    }
}
