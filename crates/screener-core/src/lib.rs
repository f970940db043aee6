//! # Screener Core
//!
//! B3 종목 스크리너의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 스크리닝 시스템 전반에서 사용되는 기본 타입을 제공합니다:
//! - 종목 코드(티커) 정의
//! - 펀더멘털 레코드 및 손익 이력
//! - 일봉/배당 시계열
//! - 기간 가중치 및 스크리닝 결과
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
pub use types::*;
