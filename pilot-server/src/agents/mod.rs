pub mod action;
pub mod planner;
pub mod summarizer;

pub use action::ActionAgent;
pub use planner::PlannerAgent;
pub use summarizer::SummarizerAgent;
