//! Tense Trainer - practise English tenses from the terminal
//!
//! Pick tenses, a theme and a sentence count; Gemini writes Ukrainian
//! sentences for you to translate and then reviews each translation.

pub mod app;
pub mod config;
pub mod gemini;
pub mod identity;
pub mod practice;
pub mod session;
pub mod tense;
pub mod theme;
pub mod ui;

pub use app::App;
pub use config::Config;
pub use theme::Theme;
