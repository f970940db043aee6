//! 스크리닝 운영을 위한 도메인 모델.

mod fundamental;
mod market_data;
mod screening;
mod weights;

pub use fundamental::*;
pub use market_data::*;
pub use screening::*;
pub use weights::*;
