//! 습공기(psychrometrics) 물성 계산 모듈 모음.
//! 포화압 상관식, 기본 관계식, 습구 온도 탐색, 상태점 결정으로 구성한다.

pub mod error;
pub mod formulas;
pub mod saturation;
pub mod state;
pub mod wet_bulb;

/// 섭씨 → 절대온도 환산값. 상관식이 273.16 기준으로 맞춰져 있다.
pub const KELVIN_OFFSET: f64 = 273.16;

pub use error::{PsychroError, PsychroResult};
pub use saturation::saturation_pressure_kpa;
pub use state::{KnownProperties, MoistAirState, StateResolver};
pub use wet_bulb::wet_bulb_temperature;
