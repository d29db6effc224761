//! 공기조화 프로세스 회귀 테스트. 표준 대기압(101.325 kPa) 기준.
use approx::assert_abs_diff_eq;
use psychrometric_toolbox::air::PsychroError;
use psychrometric_toolbox::process::{
    AirStream, HeatingCoolingInput, HumidifyToDryBulbInput, HumidifyToHumidityRatioInput,
    HumidifyToRelativeHumidityInput, MixingInput, ProcessEngine, ProcessKind,
};

fn engine() -> ProcessEngine {
    ProcessEngine::default()
}

#[test]
fn sensible_heating_keeps_humidity_ratio() {
    let r = engine()
        .heat_or_cool(HeatingCoolingInput {
            dry_bulb_c: 25.0,
            relative_humidity: 0.5,
            outlet_dry_bulb_c: 35.0,
        })
        .expect("heating");
    assert_eq!(r.kind, ProcessKind::HeatingCooling);
    let (inlet, outlet) = (r.inlet(), r.outlet());
    assert_eq!(outlet.humidity_ratio, inlet.humidity_ratio);
    assert_eq!(outlet.dew_point_c, inlet.dew_point_c);
    assert_abs_diff_eq!(outlet.relative_humidity, 0.28161, epsilon = 1e-4);
    assert_abs_diff_eq!(outlet.enthalpy_kj_per_kg, 60.535, epsilon = 1e-3);
    assert_abs_diff_eq!(outlet.wet_bulb_c, 20.92, epsilon = 0.05);
}

#[test]
fn cooling_below_dew_point_saturates() {
    let r = engine()
        .heat_or_cool(HeatingCoolingInput {
            dry_bulb_c: 25.0,
            relative_humidity: 0.5,
            outlet_dry_bulb_c: 10.0,
        })
        .expect("cooling");
    let outlet = r.outlet();
    assert_eq!(outlet.relative_humidity, 1.0);
    assert_eq!(outlet.dew_point_c, 10.0);
    assert_eq!(outlet.wet_bulb_c, 10.0);
    assert_abs_diff_eq!(outlet.humidity_ratio, 0.0076308, epsilon = 1e-6);
    assert_abs_diff_eq!(outlet.enthalpy_kj_per_kg, 29.280, epsilon = 1e-3);
    assert!(outlet.humidity_ratio < r.inlet().humidity_ratio);
}

#[test]
fn humidify_to_dry_bulb_follows_inlet_enthalpy() {
    let r = engine()
        .humidify_to_dry_bulb(HumidifyToDryBulbInput {
            dry_bulb_c: 25.0,
            relative_humidity: 0.3,
            outlet_dry_bulb_c: 20.0,
        })
        .expect("humidify");
    let (inlet, outlet) = (r.inlet(), r.outlet());
    assert_eq!(outlet.enthalpy_kj_per_kg, inlet.enthalpy_kj_per_kg);
    assert_eq!(outlet.wet_bulb_c, inlet.wet_bulb_c);
    assert_abs_diff_eq!(outlet.humidity_ratio, 0.0078946, epsilon = 1e-6);
    assert_abs_diff_eq!(outlet.relative_humidity, 0.54302, epsilon = 1e-4);
    assert_abs_diff_eq!(outlet.dew_point_c, 10.504, epsilon = 1e-3);
}

#[test]
fn target_above_inlet_dry_bulb_stays_on_inlet_enthalpy() {
    let r = engine()
        .humidify_to_dry_bulb(HumidifyToDryBulbInput {
            dry_bulb_c: 25.0,
            relative_humidity: 0.3,
            outlet_dry_bulb_c: 30.0,
        })
        .expect("dehumidify");
    let (inlet, outlet) = (r.inlet(), r.outlet());
    assert_eq!(outlet.enthalpy_kj_per_kg, inlet.enthalpy_kj_per_kg);
    assert_abs_diff_eq!(outlet.humidity_ratio, 0.0039012, epsilon = 1e-6);
    assert_abs_diff_eq!(outlet.relative_humidity, 0.14877, epsilon = 1e-4);
    assert_abs_diff_eq!(outlet.dew_point_c, 0.461, epsilon = 1e-2);
    assert!(outlet.relative_humidity < inlet.relative_humidity);
}

#[test]
fn target_needing_negative_humidity_ratio_is_out_of_range() {
    let err = engine()
        .humidify_to_dry_bulb(HumidifyToDryBulbInput {
            dry_bulb_c: 25.0,
            relative_humidity: 0.3,
            outlet_dry_bulb_c: 45.0,
        })
        .unwrap_err();
    assert!(matches!(err, PsychroError::Domain { value, .. } if value == 45.0));
}

#[test]
fn humidify_below_wet_bulb_is_infeasible() {
    let err = engine()
        .humidify_to_dry_bulb(HumidifyToDryBulbInput {
            dry_bulb_c: 25.0,
            relative_humidity: 0.3,
            outlet_dry_bulb_c: 10.0,
        })
        .unwrap_err();
    assert!(matches!(err, PsychroError::PhysicalInfeasibility { .. }));
}

#[test]
fn humidify_to_relative_humidity_stops_at_target() {
    let r = engine()
        .humidify_to_relative_humidity(HumidifyToRelativeHumidityInput {
            dry_bulb_c: 25.0,
            relative_humidity: 0.3,
            outlet_relative_humidity: 0.6,
        })
        .expect("humidify");
    let (inlet, outlet) = (r.inlet(), r.outlet());
    assert!(outlet.relative_humidity >= 0.6);
    assert!(outlet.relative_humidity < 0.6 + 1e-4);
    assert_abs_diff_eq!(outlet.humidity_ratio, 0.0082554, epsilon = 3e-6);
    assert_abs_diff_eq!(outlet.dry_bulb_c, 19.103, epsilon = 1e-2);
    assert_abs_diff_eq!(outlet.dew_point_c, 11.17, epsilon = 0.01);
    assert_eq!(outlet.enthalpy_kj_per_kg, inlet.enthalpy_kj_per_kg);
}

#[test]
fn humidify_to_full_saturation_lands_on_wet_bulb() {
    let r = engine()
        .humidify_to_relative_humidity(HumidifyToRelativeHumidityInput {
            dry_bulb_c: 25.0,
            relative_humidity: 0.3,
            outlet_relative_humidity: 1.0,
        })
        .expect("humidify");
    let (inlet, outlet) = (r.inlet(), r.outlet());
    assert_eq!(outlet.dry_bulb_c, inlet.wet_bulb_c);
    assert_eq!(outlet.dew_point_c, inlet.wet_bulb_c);
    assert!(outlet.relative_humidity >= 0.999 && outlet.relative_humidity < 1.0);
}

#[test]
fn adiabatic_humidification_cannot_dry_air() {
    let err = engine()
        .humidify_to_relative_humidity(HumidifyToRelativeHumidityInput {
            dry_bulb_c: 25.0,
            relative_humidity: 0.5,
            outlet_relative_humidity: 0.3,
        })
        .unwrap_err();
    assert!(matches!(err, PsychroError::PhysicalInfeasibility { .. }));
}

#[test]
fn humidify_to_humidity_ratio() {
    let input = HumidifyToHumidityRatioInput {
        dry_bulb_c: 25.0,
        humidity_ratio: 0.0058909,
        outlet_humidity_ratio: 0.008,
    };
    let r = engine().humidify_to_humidity_ratio(input).expect("humidify");
    let outlet = r.outlet();
    assert_abs_diff_eq!(outlet.dry_bulb_c, 19.738, epsilon = 1e-3);
    assert_abs_diff_eq!(outlet.relative_humidity, 0.5592, epsilon = 1e-4);
    assert_eq!(outlet.humidity_ratio, 0.008);

    let too_wet = HumidifyToHumidityRatioInput {
        outlet_humidity_ratio: 0.012,
        ..input
    };
    assert!(matches!(
        engine().humidify_to_humidity_ratio(too_wet),
        Err(PsychroError::PhysicalInfeasibility { .. })
    ));
}

#[test]
fn mixing_without_fog_is_mass_weighted() {
    let r = engine()
        .mix(MixingInput {
            first: AirStream {
                dry_bulb_c: 30.0,
                relative_humidity: 0.6,
                flow_m3_per_h: 1000.0,
            },
            second: AirStream {
                dry_bulb_c: 10.0,
                relative_humidity: 0.5,
                flow_m3_per_h: 1000.0,
            },
        })
        .expect("mixing");
    assert_eq!(r.kind, ProcessKind::Mixing);
    assert!(!r.fog_formed());
    assert_eq!(r.states.len(), 3);
    assert_eq!(r.flows.len(), 3);

    let (s1, s2, mix) = (&r.states[0], &r.states[1], &r.states[2]);
    assert_abs_diff_eq!(s1.humidity_ratio, 0.016039, epsilon = 1e-6);
    assert_abs_diff_eq!(s2.enthalpy_kj_per_kg, 19.6114, epsilon = 1e-3);

    let (m1, m2) = (r.flows[0].dry_air_kg_per_h, r.flows[1].dry_air_kg_per_h);
    assert_abs_diff_eq!(m1, 1000.0 / s1.specific_volume_m3_per_kg, epsilon = 1e-9);
    assert_abs_diff_eq!(r.flows[2].dry_air_kg_per_h, m1 + m2, epsilon = 1e-9);
    // 찬 공기가 밀도가 커서 질량 가중 평균은 단순 평균보다 낮다
    assert!(m2 > m1);
    assert_abs_diff_eq!(mix.dry_bulb_c, 19.5621, epsilon = 1e-3);
    assert_abs_diff_eq!(mix.humidity_ratio, 0.0096474, epsilon = 1e-6);
    assert_abs_diff_eq!(mix.enthalpy_kj_per_kg, 44.2512, epsilon = 1e-3);
    assert_abs_diff_eq!(mix.relative_humidity, 0.67997, epsilon = 1e-4);
    assert_abs_diff_eq!(
        mix.enthalpy_kj_per_kg,
        (m1 * s1.enthalpy_kj_per_kg + m2 * s2.enthalpy_kj_per_kg) / (m1 + m2),
        epsilon = 1e-9
    );
}

#[test]
fn mixing_with_fog_moves_along_saturation_curve() {
    let r = engine()
        .mix(MixingInput {
            first: AirStream {
                dry_bulb_c: 35.0,
                relative_humidity: 0.95,
                flow_m3_per_h: 1000.0,
            },
            second: AirStream {
                dry_bulb_c: 2.0,
                relative_humidity: 0.95,
                flow_m3_per_h: 1000.0,
            },
        })
        .expect("mixing");
    assert!(r.fog_formed());
    let mix = r.outlet();
    assert_eq!(mix.relative_humidity, 0.99999);
    assert_abs_diff_eq!(mix.dry_bulb_c, 21.794, epsilon = 5e-3);
    assert_abs_diff_eq!(mix.humidity_ratio, 0.0164547, epsilon = 1e-5);
    assert_abs_diff_eq!(mix.enthalpy_kj_per_kg, 63.7144, epsilon = 2e-4);
    let condensed = r.condensed_water.expect("condensed water");
    assert_abs_diff_eq!(condensed * 1000.0, 1.713, epsilon = 0.01);
}
