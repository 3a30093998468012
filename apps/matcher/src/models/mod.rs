pub mod match_request;
pub mod match_result;

pub use match_request::MatchRequest;
pub use match_result::MatchResult;
