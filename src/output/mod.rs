pub mod formatter;

pub use formatter::{
    format_age, format_pricing, format_question_list, format_results, format_stats,
    format_summaries_tsv, should_use_colors,
};
