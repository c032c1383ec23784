//! bunpo: browse and search a grammar reference split into top-level sections.
//!
//! The core is small and pure: [`section`] splits the raw markdown into titled sections,
//! [`search`] answers full-text queries with highlighted previews and filters the table of
//! contents by title, and [`debounce`] collapses bursts of keystrokes into one filter pass.
//! [`app_state`] owns all mutable viewer state; [`ui`] and [`html`] turn it into terminal frames
//! or HTML fragments.

pub mod app_state;
pub mod config;
pub mod debounce;
pub mod error;
pub mod formats;
pub mod highlight;
pub mod html;
pub mod nav;
pub mod outline;
pub mod search;
pub mod section;
pub mod source;
pub mod storage;
pub mod styled;
pub mod ui;
