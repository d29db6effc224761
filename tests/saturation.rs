//! 포화 수증기압 상관식 교차 검증. 0~100°C 액체 구간은 IAPWS-IF97 Region 4와 비교한다.
use psychrometric_toolbox::air::saturation_pressure_kpa;
use psychrometric_toolbox::atmosphere::AtmosphericContext;
use seuif97::{tx, OP};

fn assert_close(label: &str, actual: f64, expected: f64, rel_tol: f64) {
    let denom = expected.abs().max(1e-9);
    let diff = (actual - expected).abs();
    assert!(
        diff <= rel_tol * denom,
        "{label} expected {expected:.6} got {actual:.6} (diff {diff:.6}, tol {rel_tol})"
    );
}

#[test]
fn liquid_branch_tracks_if97() {
    for t in [1.0, 10.0, 20.0, 25.0, 35.0, 50.0, 75.0, 100.0] {
        let ours = saturation_pressure_kpa(t).expect("psat");
        // tx(t, x=1, OP) -> 포화압 [MPa]
        let if97_kpa = tx(t, 1.0, OP) * 1000.0;
        assert_close(&format!("psat({t})"), ours, if97_kpa, 3e-3);
    }
}

#[test]
fn reference_values() {
    assert_close("psat(25)", saturation_pressure_kpa(25.0).unwrap(), 3.16889, 1e-4);
    assert_close("psat(20)", saturation_pressure_kpa(20.0).unwrap(), 2.33871, 1e-4);
    assert_close("psat(100)", saturation_pressure_kpa(100.0).unwrap(), 101.361, 1e-4);
    // 얼음 위
    assert_close("psat(-10)", saturation_pressure_kpa(-10.0).unwrap(), 0.259704, 1e-3);
}

#[test]
fn barometric_pressure_from_altitude() {
    let sea = AtmosphericContext::from_altitude(0.0).unwrap();
    assert_close("p(0 m)", sea.pressure_kpa, 101.324, 1e-6);
    let high = AtmosphericContext::from_altitude(1000.0).unwrap();
    assert_close("p(1000 m)", high.pressure_kpa, 89.8745, 1e-4);
    assert!(AtmosphericContext::from_altitude(45_000.0).is_err());
}
