pub mod prompts;
pub mod render;

pub use prompts::{fuzzy_candidates, prompt_adjustment, prompt_yes_no, resolve_name};
pub use render::{
    display_recommendations, display_shopping_list, display_summary, display_warnings,
};
