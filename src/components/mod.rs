pub mod chat_assistant;
mod markdown_view;
pub mod roadmap_canvas;
pub mod topic_panel;
