//! 반복 계산 공용 도구. 구간 확장 + 이분법으로 단조 함수의 목표 구간을 찾는다.
//! 모든 반복은 `SolverLimits::max_iterations` 안에서 끝나며, 넘기면 `Convergence` 오류다.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::air::{PsychroError, PsychroResult};

/// 반복 해법의 허용 횟수와 허용 오차.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverLimits {
    /// 탐색 1회당 최대 반복 횟수
    pub max_iterations: usize,
    /// 엔탈피 일치 판정 오차 [kJ/kg] (안개 보정)
    pub enthalpy_tolerance_kj_per_kg: f64,
    /// 목표 상대습도 도달 판정 폭 (분율)
    pub relative_humidity_tolerance: f64,
}

impl Default for SolverLimits {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            enthalpy_tolerance_kj_per_kg: 1e-4,
            relative_humidity_tolerance: 1e-4,
        }
    }
}

/// 시험점에서의 판정 결과.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    /// 허용 구간 안
    Accept,
    /// 해가 시험점보다 아래에 있음
    Lower,
    /// 해가 시험점보다 위에 있음
    Higher,
}

/// `start`에서 `step`만큼 이동하며(매 회 두 배로 증가) `reached`가 참이 되는 첫 점을 찾는다.
pub fn expand_bracket<F>(
    what: &'static str,
    start: f64,
    step: f64,
    max_iterations: usize,
    mut reached: F,
) -> PsychroResult<f64>
where
    F: FnMut(f64) -> PsychroResult<bool>,
{
    let mut x = start;
    let mut step = step;
    for iteration in 0..max_iterations {
        if reached(x)? {
            debug!(what, iteration, x, "bracket found");
            return Ok(x);
        }
        x += step;
        step *= 2.0;
    }
    Err(PsychroError::Convergence {
        what,
        iterations: max_iterations,
    })
}

/// `[lo, hi]` 구간을 이분하며 `probe`가 `Accept`를 반환하는 점을 찾는다.
pub fn bisect<F>(
    what: &'static str,
    mut lo: f64,
    mut hi: f64,
    max_iterations: usize,
    mut probe: F,
) -> PsychroResult<f64>
where
    F: FnMut(f64) -> PsychroResult<Probe>,
{
    for iteration in 0..max_iterations {
        let mid = 0.5 * (lo + hi);
        match probe(mid)? {
            Probe::Accept => {
                debug!(what, iteration, value = mid, "converged");
                return Ok(mid);
            }
            Probe::Lower => hi = mid,
            Probe::Higher => lo = mid,
        }
    }
    Err(PsychroError::Convergence {
        what,
        iterations: max_iterations,
    })
}
