pub mod answers;
pub mod stats;
pub mod storage;
pub mod types;

pub use answers::{AnswerEntry, AnswerSet};
pub use stats::{completed_summaries, compute_stats, AdminStats, CompletedSummary};
pub use storage::{assessments_dir, list_assessments, load_assessment, save_assessment};
pub use types::{Assessment, CompletedResults, Profile, ASSESSMENT_VERSION};
