//! Gallery state: the poem list plus its load status.
//!
//! # Lifecycle
//!
//! ```text
//!   new() ──► Loading ──begin_fetch()──► (request in flight)
//!                                          │
//!                         apply_fetch(gen, Ok)   ──► Ready
//!                         apply_fetch(gen, Err)  ──► Error(message) + fallback poems
//!
//!   retry: begin_fetch() again from Error or Ready
//! ```
//!
//! Only one request may be in flight. Every request gets a generation number
//! and a completion is applied only if it belongs to the request in flight,
//! so a late response can never overwrite a newer one.

use crate::config::Variant;
use crate::palette::Palette;
use crate::poem::{fallback_poems, PoemRecord};

/// Message used when a failure carries no text of its own
const UNKNOWN_ERROR: &str = "Unknown error";

/// Load status, decides which branch the UI draws
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Loading,
    Error(String),
    Ready,
}

#[derive(Debug, Clone)]
pub struct GalleryState {
    texts: Vec<PoemRecord>,
    status: Status,
    variant: Variant,
    /// Generation of the last request issued
    generation: u64,
    /// Generation of the request currently in flight
    in_flight: Option<u64>,
}

impl GalleryState {
    pub fn new(variant: Variant) -> Self {
        Self {
            texts: Vec::new(),
            status: Status::Loading,
            variant,
            generation: 0,
            in_flight: None,
        }
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, Status::Loading)
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.status {
            Status::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Cards to draw for the current status
    pub fn cards(&self) -> &[PoemRecord] {
        match self.status {
            Status::Loading => &[],
            Status::Error(_) if !self.variant.shows_cards_on_error() => &[],
            _ => &self.texts,
        }
    }

    /// Start a request.
    ///
    /// Returns the request's generation, or None if one is already in flight.
    pub fn begin_fetch(&mut self) -> Option<u64> {
        if let Some(current) = self.in_flight {
            tracing::debug!("Fetch {} still in flight, ignoring retry", current);
            return None;
        }
        self.generation += 1;
        self.in_flight = Some(self.generation);
        self.status = Status::Loading;
        Some(self.generation)
    }

    /// Apply the result of request `generation`.
    ///
    /// Returns false when the result is stale and was dropped.
    pub fn apply_fetch(&mut self, generation: u64, result: Result<Vec<PoemRecord>, String>) -> bool {
        if self.in_flight != Some(generation) {
            tracing::debug!(
                "Dropping stale fetch result {} (in flight: {:?})",
                generation,
                self.in_flight
            );
            return false;
        }
        self.in_flight = None;

        match result {
            Ok(poems) => {
                tracing::info!("Loaded {} poems", poems.len());
                self.texts = poems;
                self.status = Status::Ready;
            }
            Err(message) => {
                let message = if message.trim().is_empty() {
                    UNKNOWN_ERROR.to_string()
                } else {
                    message
                };
                self.texts = fallback_poems(self.variant);
                tracing::info!("Showing {} sample poems", self.texts.len());
                self.status = Status::Error(message);
            }
        }
        true
    }

    /// Advance the color of poem `id` through `palette`.
    ///
    /// Builds a new list with that one record replaced. Returns the new color,
    /// or None if no poem has that id.
    pub fn cycle_color(&mut self, id: i64, palette: &Palette) -> Option<String> {
        let current = self.texts.iter().find(|p| p.id == id)?;
        let next = palette.next_after(&current.color).to_string();

        self.texts = self
            .texts
            .iter()
            .map(|p| {
                if p.id == id {
                    p.with_color(next.as_str())
                } else {
                    p.clone()
                }
            })
            .collect();

        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poem(id: i64, color: &str) -> PoemRecord {
        PoemRecord {
            id,
            title: format!("Poema {}", id),
            content: "verso uno\nverso dos".to_string(),
            author: "RapsodAz".to_string(),
            color: color.to_string(),
        }
    }

    fn ready(poems: Vec<PoemRecord>) -> GalleryState {
        let mut state = GalleryState::new(Variant::Evolved);
        let generation = state.begin_fetch().unwrap();
        assert!(state.apply_fetch(generation, Ok(poems)));
        state
    }

    #[test]
    fn test_starts_loading() {
        let state = GalleryState::new(Variant::Original);
        assert!(state.is_loading());
        assert!(state.texts.is_empty());
        assert!(state.cards().is_empty());
    }

    #[test]
    fn test_success_replaces_texts() {
        let poems = vec![poem(1, "red"), poem(2, "purple")];
        let state = ready(poems.clone());
        assert_eq!(state.status(), &Status::Ready);
        assert_eq!(state.texts, poems);
        assert_eq!(state.cards(), poems.as_slice());
    }

    #[test]
    fn test_failure_loads_fallback() {
        let mut state = GalleryState::new(Variant::Original);
        let generation = state.begin_fetch().unwrap();
        state.apply_fetch(generation, Err("Network Error".to_string()));

        assert_eq!(state.error_message(), Some("Network Error"));
        assert_eq!(state.texts, fallback_poems(Variant::Original));
        // Original gallery shows only the error panel
        assert!(state.cards().is_empty());
    }

    #[test]
    fn test_failure_evolved_keeps_cards_visible() {
        let mut state = GalleryState::new(Variant::Evolved);
        let generation = state.begin_fetch().unwrap();
        state.apply_fetch(generation, Err("timeout".to_string()));
        assert_eq!(state.cards().len(), 3);
    }

    #[test]
    fn test_failure_empty_message_replaced() {
        let mut state = GalleryState::new(Variant::Evolved);
        let generation = state.begin_fetch().unwrap();
        state.apply_fetch(generation, Err("  ".to_string()));
        assert_eq!(state.error_message(), Some(UNKNOWN_ERROR));
    }

    #[test]
    fn test_retry_clears_error() {
        let mut state = GalleryState::new(Variant::Evolved);
        let first = state.begin_fetch().unwrap();
        state.apply_fetch(first, Err("boom".to_string()));

        let second = state.begin_fetch().unwrap();
        assert!(state.is_loading());
        assert_eq!(state.error_message(), None);

        state.apply_fetch(second, Ok(vec![poem(9, "red")]));
        assert_eq!(state.status(), &Status::Ready);
        assert_eq!(state.texts.len(), 1);
    }

    #[test]
    fn test_retry_ignored_while_in_flight() {
        let mut state = GalleryState::new(Variant::Evolved);
        assert_eq!(state.begin_fetch(), Some(1));
        assert_eq!(state.begin_fetch(), None);
    }

    #[test]
    fn test_stale_result_dropped() {
        let mut state = GalleryState::new(Variant::Evolved);
        let first = state.begin_fetch().unwrap();
        assert!(state.apply_fetch(first, Ok(vec![poem(1, "red")])));

        let second = state.begin_fetch().unwrap();
        // A duplicate completion for the first request arrives late
        assert!(!state.apply_fetch(first, Ok(vec![poem(2, "red")])));
        assert!(state.is_loading());

        assert!(state.apply_fetch(second, Ok(vec![poem(3, "red")])));
        assert_eq!(state.texts[0].id, 3);
    }

    #[test]
    fn test_cycle_color_targets_one_poem() {
        let mut state = ready(vec![poem(1, "purple"), poem(2, "purple"), poem(3, "#17ad92")]);
        let before = state.texts.clone();
        let palette = Palette::for_variant(Variant::Original);

        assert_eq!(state.cycle_color(2, &palette), Some("#bd92fc".to_string()));

        let after = &state.texts;
        assert_eq!(after[1].color, "#bd92fc");
        assert_eq!(after[0], before[0]);
        assert_eq!(after[2], before[2]);
        assert_eq!(after[1].title, before[1].title);
        assert_eq!(after[1].content, before[1].content);
        assert_eq!(after[1].author, before[1].author);
    }

    #[test]
    fn test_cycle_color_unknown_color_and_wrap() {
        let mut state = ready(vec![poem(1, "red"), poem(2, "#17ad92")]);
        let palette = Palette::for_variant(Variant::Original);

        state.cycle_color(1, &palette);
        state.cycle_color(2, &palette);
        assert_eq!(state.texts[0].color, "purple");
        assert_eq!(state.texts[1].color, "purple");
    }

    #[test]
    fn test_cycle_color_missing_id() {
        let mut state = ready(vec![poem(1, "red")]);
        let palette = Palette::for_variant(Variant::Evolved);
        assert_eq!(state.cycle_color(42, &palette), None);
        assert_eq!(state.texts[0].color, "red");
    }

    #[test]
    fn test_cycle_color_on_fallback_poems() {
        let mut state = GalleryState::new(Variant::Evolved);
        let generation = state.begin_fetch().unwrap();
        state.apply_fetch(generation, Err("offline".to_string()));
        let palette = Palette::for_variant(Variant::Evolved);

        // Sample poem 1 starts purple
        assert_eq!(state.cycle_color(1, &palette), Some("#bd92fc".to_string()));
        assert!(state.error_message().is_some());
    }
}
