// Core algorithm exports
pub mod matcher;
pub mod prompt;
pub mod scoring;

pub use matcher::{Matcher, ScoreOutcome};
pub use prompt::{build_prompt, parse_reply};
pub use scoring::{heuristic_score, heuristic_scores, rule_score, finalize_score};
