//! 계산 결과 출력. 고정 행 레이블/소수 자릿수의 표 또는 TOML로 렌더링한다.

use serde::Serialize;

use crate::air::MoistAirState;
use crate::atmosphere::AtmosphericContext;
use crate::i18n::{keys, Translator};
use crate::process::{ProcessKind, ProcessResult};

/// 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Toml,
}

#[derive(Serialize)]
struct StateReport<'a> {
    atmosphere: &'a AtmosphericContext,
    state: &'a MoistAirState,
}

#[derive(Serialize)]
struct ProcessReport<'a> {
    atmosphere: &'a AtmosphericContext,
    process: &'a ProcessResult,
}

/// 상태점 하나를 TOML 문자열로 만든다.
pub fn state_to_toml(
    atm: &AtmosphericContext,
    state: &MoistAirState,
) -> Result<String, toml::ser::Error> {
    toml::to_string_pretty(&StateReport {
        atmosphere: atm,
        state,
    })
}

/// 프로세스 결과를 TOML 문자열로 만든다.
pub fn process_to_toml(
    atm: &AtmosphericContext,
    result: &ProcessResult,
) -> Result<String, toml::ser::Error> {
    toml::to_string_pretty(&ProcessReport {
        atmosphere: atm,
        process: result,
    })
}

/// 상태점 하나를 표로 렌더링한다.
pub fn render_state(tr: &Translator, atm: &AtmosphericContext, state: &MoistAirState) -> String {
    render_table(tr, atm, &[tr.t(keys::TABLE_POINT_1)], &[*state], &[])
}

/// 프로세스 결과를 표로 렌더링한다. 혼합이면 풍량 행과 안개 경고가 추가된다.
pub fn render_process(tr: &Translator, atm: &AtmosphericContext, result: &ProcessResult) -> String {
    let mut headers = vec![tr.t(keys::TABLE_POINT_1), tr.t(keys::TABLE_POINT_2)];
    if result.kind == ProcessKind::Mixing {
        headers.push(tr.t(keys::TABLE_MIXTURE));
    }
    let flows: Vec<f64> = result.flows.iter().map(|f| f.volume_m3_per_h).collect();
    let mut out = render_table(tr, atm, &headers, &result.states, &flows);
    if let Some(water) = result.condensed_water {
        out.push_str(tr.t(keys::WARNING_FOG));
        out.push('\n');
        out.push_str(&format!(
            "{}: {:.3}\n",
            tr.t(keys::RESULT_CONDENSED_WATER),
            water * 1000.0
        ));
    }
    out
}

const ROWS: [&str; 10] = [
    keys::ROW_DRY_BULB,
    keys::ROW_WET_BULB,
    keys::ROW_DEW_POINT,
    keys::ROW_RELATIVE_HUMIDITY,
    keys::ROW_HUMIDITY_RATIO,
    keys::ROW_BAROMETRIC_PRESSURE,
    keys::ROW_SATURATION_PRESSURE,
    keys::ROW_VAPOR_PRESSURE,
    keys::ROW_ENTHALPY,
    keys::ROW_SPECIFIC_VOLUME,
];

fn cell(row: &str, s: &MoistAirState, atm: &AtmosphericContext) -> String {
    match row {
        keys::ROW_DRY_BULB => format!("{:7.1}", s.dry_bulb_c),
        keys::ROW_WET_BULB => format!("{:7.1}", s.wet_bulb_c),
        keys::ROW_DEW_POINT => format!("{:7.1}", s.dew_point_c),
        keys::ROW_RELATIVE_HUMIDITY => format!("{:7.1}", s.relative_humidity * 100.0),
        keys::ROW_HUMIDITY_RATIO => format!("{:7.3}", s.humidity_ratio * 1000.0),
        keys::ROW_BAROMETRIC_PRESSURE => format!("{:7.1}", atm.pressure_kpa),
        keys::ROW_SATURATION_PRESSURE => format!("{:7.2}", s.saturation_pressure_kpa),
        keys::ROW_VAPOR_PRESSURE => format!("{:7.2}", s.vapor_pressure_kpa),
        keys::ROW_ENTHALPY => format!("{:7.2}", s.enthalpy_kj_per_kg),
        _ => format!("{:7.3}", s.specific_volume_m3_per_kg),
    }
}

fn render_table(
    tr: &Translator,
    atm: &AtmosphericContext,
    headers: &[&str],
    states: &[MoistAirState],
    flows: &[f64],
) -> String {
    let mut head = vec![tr.t(keys::TABLE_PROPERTY).to_string()];
    head.extend(headers.iter().map(|h| h.to_string()));

    let mut body: Vec<Vec<String>> = ROWS
        .iter()
        .map(|row| {
            let mut line = vec![tr.t(row).to_string()];
            line.extend(states.iter().map(|s| cell(row, s, atm).trim().to_string()));
            line
        })
        .collect();
    if !flows.is_empty() {
        let mut line = vec![tr.t(keys::ROW_FLOW).to_string()];
        line.extend(flows.iter().map(|q| format!("{q:.2}")));
        body.push(line);
    }

    let widths: Vec<usize> = (0..head.len())
        .map(|c| {
            std::iter::once(&head)
                .chain(body.iter())
                .filter_map(|line| line.get(c))
                .map(|text| text.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut rule = String::from("+");
    for w in &widths {
        rule.push_str(&"-".repeat(w + 2));
        rule.push('+');
    }
    rule.push('\n');

    let render_line = |cells: &[String]| {
        let mut s = String::from("|");
        for (c, &w) in widths.iter().enumerate() {
            let text = cells.get(c).map(String::as_str).unwrap_or("");
            if c == 0 {
                s.push_str(&format!(" {text:<w$} |"));
            } else {
                s.push_str(&format!(" {text:>w$} |"));
            }
        }
        s.push('\n');
        s
    };

    let mut out = String::new();
    out.push_str(&rule);
    out.push_str(&render_line(&head));
    out.push_str(&rule);
    for row in &body {
        out.push_str(&render_line(row));
    }
    out.push_str(&rule);
    out
}
