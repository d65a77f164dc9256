pub mod aggregator;
pub mod assets;
pub mod config;
pub mod directive;
pub mod error;
pub mod logger;
pub mod paginator;
pub mod post;
pub mod post_list;
pub mod post_render;
pub mod site;
pub mod text_utils;
pub mod view;
mod test_data;
