//! 습공기 선도 계산 로직을 라이브러리로 분리하여 CLI 외의 프런트엔드에서도 재사용한다.

pub mod air;
pub mod app;
pub mod atmosphere;
pub mod config;
pub mod i18n;
pub mod process;
pub mod report;
pub mod solver;
pub mod ui_cli;
