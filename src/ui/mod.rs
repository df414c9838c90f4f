//! UI module - handles all TUI rendering
//!
//! Structure:
//! - `draw.rs` - Main draw functions, one branch per gallery status
//! - `theme.rs` - Color themes, presets and CSS color parsing
//! - `layout.rs` - Grid layout and pagination
//! - `poem_card.rs` - Poem card widget

mod draw;
pub mod layout;
pub mod poem_card;
pub mod theme;

// Re-export main draw function
pub use draw::draw;
