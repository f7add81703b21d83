pub mod formatter;

pub use formatter::{
    format_check_line, format_json, format_report, format_score, format_tsv, render,
    should_use_colors, OutputFormat,
};
