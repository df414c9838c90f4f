use anyhow::Result;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use crate::api::PoemClient;
use crate::config::{Config, Labels};
use crate::gallery::GalleryState;
use crate::palette::Palette;
use crate::poem::PoemRecord;
use crate::ui::layout::GridLayout;
use crate::ui::theme::Theme;

/// Result of one fetch, tagged with the request generation
#[derive(Debug)]
pub struct FetchCompletion {
    pub generation: u64,
    pub result: Result<Vec<PoemRecord>, String>,
}

/// Application state
pub struct App {
    /// Poems and load status
    gallery: GalleryState,
    /// Color-cycle palette
    palette: Palette,
    /// HTTP client for the configured endpoint
    client: PoemClient,
    /// Configuration
    config: Config,
    /// Resolved theme
    theme: Theme,
    /// Card grid for the current terminal width
    grid: GridLayout,
    /// Currently selected card index
    selected: usize,
    /// Completed fetches are sent here by the fetch task
    fetch_tx: UnboundedSender<FetchCompletion>,
    fetch_rx: UnboundedReceiver<FetchCompletion>,
    /// Fetch task, aborted when the app goes away
    fetch_task: Option<JoinHandle<()>>,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let client = PoemClient::new(config.endpoint(), config.timeout())?;
        let (fetch_tx, fetch_rx) = mpsc::unbounded_channel();
        let palette = config.palette();
        tracing::debug!("Palette ({} colors): {:?}", palette.len(), palette.colors());

        Ok(Self {
            gallery: GalleryState::new(config.gallery.variant),
            palette,
            client,
            theme: config.resolve_theme(),
            config,
            grid: GridLayout::default(),
            selected: 0,
            fetch_tx,
            fetch_rx,
            fetch_task: None,
        })
    }

    /// Start a fetch in the background.
    ///
    /// Does nothing while another fetch is in flight. Must be called inside
    /// a tokio runtime.
    pub fn fetch_poems(&mut self) {
        let Some(generation) = self.gallery.begin_fetch() else {
            return;
        };

        let client = self.client.clone();
        let tx = self.fetch_tx.clone();
        tracing::info!("Fetching poems from {} (request {})", client.endpoint(), generation);

        self.fetch_task = Some(tokio::spawn(async move {
            let result = client.fetch_poems().await.map_err(|e| {
                tracing::warn!("Failed to fetch poems from {}: {}", client.endpoint(), e);
                e.display_message()
            });
            // Receiver only goes away with the app
            let _ = tx.send(FetchCompletion { generation, result });
        }));
    }

    /// Retry after a failed fetch
    pub fn retry(&mut self) {
        if self.gallery.error_message().is_some() {
            self.fetch_poems();
        }
    }

    /// Apply any finished fetches. Returns true if state changed.
    pub fn poll_fetch(&mut self) -> bool {
        // Nothing in flight, so anything queued is stale
        if !self.gallery.is_loading() {
            return false;
        }
        let mut changed = false;
        while let Ok(done) = self.fetch_rx.try_recv() {
            changed |= self.apply_completion(done);
        }
        changed
    }

    fn apply_completion(&mut self, done: FetchCompletion) -> bool {
        let applied = self.gallery.apply_fetch(done.generation, done.result);
        if applied {
            self.fetch_task = None;
            self.clamp_selection();
        }
        applied
    }

    /// Cards currently drawn
    pub fn visible_cards(&self) -> &[PoemRecord] {
        self.gallery.cards()
    }

    /// Get the currently selected card
    pub fn selected_card(&self) -> Option<&PoemRecord> {
        self.visible_cards().get(self.selected)
    }

    /// Get selected index
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Cycle the color of the selected card
    pub fn cycle_selected_color(&mut self) {
        let Some(id) = self.selected_card().map(|p| p.id) else {
            return;
        };
        if let Some(color) = self.gallery.cycle_color(id, &self.palette) {
            tracing::debug!("Poem {} color -> {}", id, color);
        }
    }

    /// Recompute the card grid for a new terminal width
    pub fn fit_to_width(&mut self, width: u16) {
        let appearance = &self.config.appearance;
        self.grid = GridLayout::fit(width, appearance.min_card_width, appearance.max_columns);
    }

    pub fn grid_layout(&self) -> GridLayout {
        self.grid
    }

    /// Move selection up one row
    pub fn up(&mut self) {
        self.selected = self.grid.move_up(self.selected);
    }

    /// Move selection down one row
    pub fn down(&mut self) {
        self.selected = self.grid.move_down(self.selected, self.visible_cards().len());
    }

    /// Move selection left within the row
    pub fn left(&mut self) {
        self.selected = self.grid.move_left(self.selected);
    }

    /// Move selection right within the row
    pub fn right(&mut self) {
        self.selected = self.grid.move_right(self.selected, self.visible_cards().len());
    }

    /// Next card, wrapping
    pub fn next(&mut self) {
        self.selected = self.grid.tab_next(self.selected, self.visible_cards().len());
    }

    /// Previous card, wrapping
    pub fn previous(&mut self) {
        self.selected = self.grid.tab_prev(self.selected, self.visible_cards().len());
    }

    pub fn first(&mut self) {
        self.selected = 0;
    }

    pub fn last(&mut self) {
        self.selected = self.grid.move_end(self.visible_cards().len());
    }

    fn clamp_selection(&mut self) {
        let total = self.visible_cards().len();
        if self.selected >= total {
            self.selected = total.saturating_sub(1);
        }
    }

    pub fn gallery(&self) -> &GalleryState {
        &self.gallery
    }

    pub fn endpoint(&self) -> &str {
        self.client.endpoint()
    }

    /// Get config reference
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn labels(&self) -> &'static Labels {
        self.config.labels()
    }

    /// Wait for the next fetch to finish and apply it
    #[cfg(test)]
    pub(crate) async fn settle(&mut self) {
        if let Some(done) = self.fetch_rx.recv().await {
            self.apply_completion(done);
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        if let Some(task) = self.fetch_task.take() {
            task.abort();
        }
    }
}
