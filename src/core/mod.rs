// Input handling and output rendering
pub mod display;
pub mod input;

pub use display::{
    format_match, render_agent, render_agent_list, render_probe_report, render_registration,
    render_search_results, render_update, score_bar, truncate,
};
pub use input::{is_valid_email, non_empty, parse_bool, parse_list};
