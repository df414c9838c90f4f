//! Card color palette and the color-cycle rule.
//!
//! Cycling looks the current color up in the palette and moves one step
//! forward, wrapping at the end. A color that isn't in the palette is treated
//! as sitting at index -1, so it advances to the first entry. That matches the
//! original web gallery (`indexOf` returning -1) and is kept on purpose;
//! it may not be what product wants long term, see DESIGN.md.

use crate::config::Variant;

const ORIGINAL: &[&str] = &["purple", "#bd92fc", "#5e5e97", "#17ad92"];
const EVOLVED: &[&str] = &["purple", "#bd92fc", "#5e5e97", "#17ad92", "#e07a5f", "#3d405b"];

/// Ordered, non-empty list of CSS color strings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<String>,
}

impl Palette {
    /// Build a palette from configured colors. Returns None when empty.
    pub fn new<I, S>(colors: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let colors: Vec<String> = colors.into_iter().map(Into::into).collect();
        if colors.is_empty() {
            None
        } else {
            Some(Self { colors })
        }
    }

    /// Built-in palette for a gallery variant
    pub fn for_variant(variant: Variant) -> Self {
        let colors = match variant {
            Variant::Original => ORIGINAL,
            Variant::Evolved => EVOLVED,
        };
        Self {
            colors: colors.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    /// Index of `color`, or -1 when absent
    fn index_of(&self, color: &str) -> isize {
        self.colors
            .iter()
            .position(|c| c == color)
            .map_or(-1, |i| i as isize)
    }

    /// Color that follows `current` in the cycle
    pub fn next_after(&self, current: &str) -> &str {
        let len = self.colors.len() as isize;
        let next = (self.index_of(current) + 1).rem_euclid(len);
        &self.colors[next as usize]
    }
}
