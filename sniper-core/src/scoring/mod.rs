//! Signal scoring — confidence factors, pattern detection, and the combined
//! confidence/bias computation.

pub mod context;
pub mod factors;
pub mod patterns;
pub mod scorer;

pub use context::MarketContext;
pub use factors::ConfidenceFactors;
pub use patterns::{detect, entry_label, PatternTag};
pub use scorer::{
    correlation_score, fundamental_score, score, technical_score, volatility_score, Bias,
    ScoreReport, TechnicalRead,
};
