//! # TUI Components
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: top status bar with assistant name, session and status
//! - `TurnView`: one bordered turn with its time and annotation chips
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `InputBox`: auto-sizing text input, emits commits
//! - `TranscriptView`: scrollable transcript with height caching and the
//!   typing indicator
//!
//! Each file holds the component's state types, events, rendering, event
//! handling and tests.
//!
//! ```text
//! components/
//! ├── mod.rs
//! ├── title_bar.rs
//! ├── turn_view.rs
//! ├── transcript_view.rs
//! └── input_box/
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod input_box;
pub use input_box::{InputBox, InputEvent};
pub mod turn_view;
pub mod transcript_view;
pub use transcript_view::{TranscriptView, TranscriptViewState};
