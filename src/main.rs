use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;

use psychrometric_toolbox::air::KnownProperties;
use psychrometric_toolbox::app::{self, grams_to_kilograms, percent_to_fraction, AppError};
use psychrometric_toolbox::config::{self, Config, DEFAULT_CONFIG_PATH};
use psychrometric_toolbox::i18n::{keys, resolve_language, Translator};
use psychrometric_toolbox::process::{
    AirStream, HeatingCoolingInput, HumidifyToDryBulbInput, HumidifyToHumidityRatioInput,
    HumidifyToRelativeHumidityInput, MixingInput,
};
use psychrometric_toolbox::report::OutputFormat;
use psychrometric_toolbox::ui_cli;

#[derive(Parser)]
#[command(name = "psychro", version)]
#[command(about = "습공기 상태점 및 공기조화 프로세스 계산기", long_about = None)]
struct Cli {
    /// 표시 언어 (auto, ko, en)
    #[arg(long, global = true)]
    lang: Option<String>,
    /// 해발 고도 [m]. 설정 파일 값보다 우선한다
    #[arg(long, global = true, allow_negative_numbers = true)]
    altitude: Option<f64>,
    /// 설정 파일 경로
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// 출력 형식
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
    /// 로그 상세도 (-v: info, -vv: debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    /// 생략하면 대화형 메뉴를 띄운다
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// 상태점 하나를 계산한다
    #[command(subcommand)]
    State(StateCommands),
    /// 공기조화 프로세스를 계산한다
    #[command(subcommand)]
    Process(ProcessCommands),
}

#[derive(Subcommand)]
enum StateCommands {
    /// 건구 온도와 상대습도
    Rh {
        /// 건구 온도 [°C]
        #[arg(long, allow_negative_numbers = true)]
        dry_bulb: f64,
        /// 상대습도 [%]
        #[arg(long)]
        rh: f64,
    },
    /// 건구 온도와 습구 온도
    WetBulb {
        #[arg(long, allow_negative_numbers = true)]
        dry_bulb: f64,
        #[arg(long, allow_negative_numbers = true)]
        wet_bulb: f64,
    },
    /// 건구 온도와 노점 온도
    DewPoint {
        #[arg(long, allow_negative_numbers = true)]
        dry_bulb: f64,
        #[arg(long, allow_negative_numbers = true)]
        dew_point: f64,
    },
}

#[derive(Subcommand)]
enum ProcessCommands {
    /// 현열 가열/냉각
    Heat {
        #[arg(long, allow_negative_numbers = true)]
        dry_bulb: f64,
        /// 입구 상대습도 [%]
        #[arg(long)]
        rh: f64,
        /// 출구 건구 온도 [°C]
        #[arg(long, allow_negative_numbers = true)]
        outlet_dry_bulb: f64,
    },
    /// 단열 가습, 목표 건구 온도
    HumidifyDryBulb {
        #[arg(long, allow_negative_numbers = true)]
        dry_bulb: f64,
        #[arg(long)]
        rh: f64,
        #[arg(long, allow_negative_numbers = true)]
        outlet_dry_bulb: f64,
    },
    /// 단열 가습, 목표 상대습도
    HumidifyRh {
        #[arg(long, allow_negative_numbers = true)]
        dry_bulb: f64,
        #[arg(long)]
        rh: f64,
        /// 출구 상대습도 [%]
        #[arg(long)]
        outlet_rh: f64,
    },
    /// 단열 가습, 목표 습도비
    HumidifyRatio {
        #[arg(long, allow_negative_numbers = true)]
        dry_bulb: f64,
        /// 입구 습도비 [g/kg]
        #[arg(long)]
        ratio: f64,
        /// 출구 습도비 [g/kg]
        #[arg(long)]
        outlet_ratio: f64,
    },
    /// 두 기류 혼합
    Mix {
        #[arg(long, allow_negative_numbers = true)]
        dry_bulb_1: f64,
        #[arg(long)]
        rh_1: f64,
        /// 기류 1 풍량 [m³/h]
        #[arg(long)]
        flow_1: f64,
        #[arg(long, allow_negative_numbers = true)]
        dry_bulb_2: f64,
        #[arg(long)]
        rh_2: f64,
        /// 기류 2 풍량 [m³/h]
        #[arg(long)]
        flow_2: f64,
    },
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 하위 명령 또는 대화형 메뉴를 실행한다.
fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let loaded = config::load_or_default(&cli.config);
    let (config_lang, pack_dir) = match &loaded {
        Ok(cfg) => (Some(cfg.language.clone()), cfg.language_pack_dir.clone()),
        Err(_) => (None, None),
    };
    let lang = resolve_language(cli.lang.as_deref().unwrap_or("auto"), config_lang.as_deref());
    let tr = Translator::new_with_pack(&lang, pack_dir.as_deref());

    let result = loaded
        .map_err(AppError::from)
        .and_then(|cfg| try_run(cli, cfg, &tr));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}: {}", tr.t(keys::ERROR_PREFIX), app::localized_error(&tr, &err));
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn try_run(cli: Cli, mut cfg: Config, tr: &Translator) -> Result<(), AppError> {
    if let Some(altitude) = cli.altitude {
        cfg.altitude_m = altitude;
    }
    let Some(command) = cli.command else {
        let mut input = std::io::stdin().lock();
        return app::run(&mut cfg, &cli.config, tr, &mut input, cli.format);
    };

    let engine = app::build_engine(&cfg)?;
    match command {
        Commands::State(cmd) => {
            let known = match cmd {
                StateCommands::Rh { dry_bulb, rh } => KnownProperties::DryBulbRelativeHumidity {
                    dry_bulb_c: dry_bulb,
                    relative_humidity: percent_to_fraction(rh),
                },
                StateCommands::WetBulb { dry_bulb, wet_bulb } => KnownProperties::DryBulbWetBulb {
                    dry_bulb_c: dry_bulb,
                    wet_bulb_c: wet_bulb,
                },
                StateCommands::DewPoint {
                    dry_bulb,
                    dew_point,
                } => KnownProperties::DryBulbDewPoint {
                    dry_bulb_c: dry_bulb,
                    dew_point_c: dew_point,
                },
            };
            let state = engine.resolver().resolve(known)?;
            ui_cli::emit_state(tr, &engine, &state, cli.format)
        }
        Commands::Process(cmd) => {
            let result = match cmd {
                ProcessCommands::Heat {
                    dry_bulb,
                    rh,
                    outlet_dry_bulb,
                } => engine.heat_or_cool(HeatingCoolingInput {
                    dry_bulb_c: dry_bulb,
                    relative_humidity: percent_to_fraction(rh),
                    outlet_dry_bulb_c: outlet_dry_bulb,
                })?,
                ProcessCommands::HumidifyDryBulb {
                    dry_bulb,
                    rh,
                    outlet_dry_bulb,
                } => engine.humidify_to_dry_bulb(HumidifyToDryBulbInput {
                    dry_bulb_c: dry_bulb,
                    relative_humidity: percent_to_fraction(rh),
                    outlet_dry_bulb_c: outlet_dry_bulb,
                })?,
                ProcessCommands::HumidifyRh {
                    dry_bulb,
                    rh,
                    outlet_rh,
                } => engine.humidify_to_relative_humidity(HumidifyToRelativeHumidityInput {
                    dry_bulb_c: dry_bulb,
                    relative_humidity: percent_to_fraction(rh),
                    outlet_relative_humidity: percent_to_fraction(outlet_rh),
                })?,
                ProcessCommands::HumidifyRatio {
                    dry_bulb,
                    ratio,
                    outlet_ratio,
                } => engine.humidify_to_humidity_ratio(HumidifyToHumidityRatioInput {
                    dry_bulb_c: dry_bulb,
                    humidity_ratio: grams_to_kilograms(ratio),
                    outlet_humidity_ratio: grams_to_kilograms(outlet_ratio),
                })?,
                ProcessCommands::Mix {
                    dry_bulb_1,
                    rh_1,
                    flow_1,
                    dry_bulb_2,
                    rh_2,
                    flow_2,
                } => engine.mix(MixingInput {
                    first: AirStream {
                        dry_bulb_c: dry_bulb_1,
                        relative_humidity: percent_to_fraction(rh_1),
                        flow_m3_per_h: flow_1,
                    },
                    second: AirStream {
                        dry_bulb_c: dry_bulb_2,
                        relative_humidity: percent_to_fraction(rh_2),
                        flow_m3_per_h: flow_2,
                    },
                })?,
            };
            ui_cli::emit_process(tr, &engine, &result, cli.format)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn negative_temperatures_parse() {
        let cli = Cli::try_parse_from([
            "psychro", "state", "dew-point", "--dry-bulb", "-5", "--dew-point", "-12.5",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::State(StateCommands::DewPoint {
                dry_bulb,
                dew_point,
            })) => {
                assert_eq!(dry_bulb, -5.0);
                assert_eq!(dew_point, -12.5);
            }
            _ => panic!("unexpected command"),
        }
    }

    #[test]
    fn global_flags_follow_subcommands() {
        let cli = Cli::try_parse_from([
            "psychro", "process", "heat", "--dry-bulb", "25", "--rh", "50", "--outlet-dry-bulb",
            "35", "--format", "toml", "-vv",
        ])
        .unwrap();
        assert_eq!(cli.format, OutputFormat::Toml);
        assert_eq!(cli.verbose, 2);
        assert!(cli.command.is_some());
    }
}
