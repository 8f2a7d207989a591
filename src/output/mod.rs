pub mod formatter;

pub use formatter::{
    format_breakdown, format_points, format_rejection, format_tsv, should_use_colors,
    ScoredReceipt,
};
