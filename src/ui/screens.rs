use crate::models::VideoRecord;

/// All state behind the authenticated browse experience: the query string,
/// the last fetched result list, the loading flag, and the optional detail
/// selection. Dropped wholesale on logout, which is what guarantees the full
/// reset.
pub(crate) struct BrowseScreen {
    /// Current search input. Bound to the inline search bar; survives across
    /// searches so the results heading can quote it.
    pub(crate) query: String,
    /// Last completed result set, in backend order. Fully replaced on every
    /// completed search, never merged or appended.
    pub(crate) results: Vec<VideoRecord>,
    /// True strictly between dispatching a search and receiving its outcome.
    pub(crate) is_loading: bool,
    /// Whether any search has ever been submitted this session.
    pub(crate) has_searched: bool,
    /// Grid cursor into `results`.
    pub(crate) selected: usize,
    /// Id of the record open in the detail view, if any. Referencing by id
    /// instead of by index keeps the selection honest when `results` is
    /// replaced underneath it.
    pub(crate) detail: Option<String>,
}

impl BrowseScreen {
    pub(crate) fn new() -> Self {
        Self {
            query: String::new(),
            results: Vec::new(),
            is_loading: false,
            has_searched: false,
            selected: 0,
            detail: None,
        }
    }

    /// Record currently under the grid cursor.
    pub(crate) fn current_record(&self) -> Option<&VideoRecord> {
        self.results.get(self.selected)
    }

    /// Record shown in the detail view, resolved through the current results.
    pub(crate) fn detail_record(&self) -> Option<&VideoRecord> {
        let id = self.detail.as_deref()?;
        self.results.iter().find(|record| record.id == id)
    }

    /// Open the detail view for the record under the cursor.
    pub(crate) fn open_detail(&mut self) -> bool {
        if let Some(record) = self.current_record() {
            self.detail = Some(record.id.clone());
            true
        } else {
            false
        }
    }

    /// Return from the detail view to the grid. Query, results, and cursor
    /// all stay exactly as they were.
    pub(crate) fn close_detail(&mut self) {
        self.detail = None;
    }

    /// Replace the result list verbatim with a completed search's records.
    pub(crate) fn set_results(&mut self, results: Vec<VideoRecord>) {
        self.results = results;
        self.ensure_in_bounds();
        self.sync_detail();
    }

    /// Discard all results after a failed search.
    pub(crate) fn clear_results(&mut self) {
        self.results.clear();
        self.ensure_in_bounds();
        self.sync_detail();
    }

    /// Close the detail view if its record is no longer in the result list.
    fn sync_detail(&mut self) {
        if self.detail.is_some() && self.detail_record().is_none() {
            self.detail = None;
        }
    }

    fn ensure_in_bounds(&mut self) {
        if self.results.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.results.len() {
            self.selected = self.results.len() - 1;
        }
    }

    /// Move the grid cursor by a signed offset, clamped to the result list.
    pub(crate) fn move_selection(&mut self, offset: isize) {
        if self.results.is_empty() {
            return;
        }
        let len = self.results.len() as isize;
        let mut new = self.selected as isize + offset;
        if new < 0 {
            new = 0;
        }
        if new >= len {
            new = len - 1;
        }
        self.selected = new as usize;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, title: &str) -> VideoRecord {
        VideoRecord {
            id: id.to_string(),
            title: title.to_string(),
            channel: "chan".to_string(),
            video_url: format!("http://localhost:5000/media/{id}.mp4"),
            duration: "1:00".to_string(),
            views: 7,
            upload_date: "2024-01-01".to_string(),
            description: "desc".to_string(),
            tags: vec!["tag".to_string()],
        }
    }

    #[test]
    fn results_are_replaced_verbatim_in_given_order() {
        let mut screen = BrowseScreen::new();
        screen.set_results(vec![record("a", "A"), record("b", "B")]);
        screen.set_results(vec![record("c", "C"), record("d", "D"), record("e", "E")]);
        let ids: Vec<&str> = screen.results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "d", "e"]);
    }

    #[test]
    fn detail_round_trip_preserves_results_and_cursor() {
        let mut screen = BrowseScreen::new();
        screen.query = "mario".to_string();
        screen.set_results(vec![record("a", "A"), record("b", "B")]);
        screen.selected = 1;

        assert!(screen.open_detail());
        assert_eq!(screen.detail_record().map(|r| r.id.as_str()), Some("b"));

        screen.close_detail();
        assert!(screen.detail.is_none());
        assert_eq!(screen.query, "mario");
        assert_eq!(screen.results.len(), 2);
        assert_eq!(screen.selected, 1);
    }

    #[test]
    fn open_detail_requires_a_record_under_the_cursor() {
        let mut screen = BrowseScreen::new();
        assert!(!screen.open_detail());
        assert!(screen.detail.is_none());
    }

    #[test]
    fn detail_closes_when_its_record_leaves_the_result_list() {
        let mut screen = BrowseScreen::new();
        screen.set_results(vec![record("a", "A")]);
        screen.open_detail();

        screen.set_results(vec![record("b", "B")]);
        assert!(screen.detail.is_none());
    }

    #[test]
    fn detail_survives_a_refresh_that_still_contains_it() {
        let mut screen = BrowseScreen::new();
        screen.set_results(vec![record("a", "A")]);
        screen.open_detail();

        screen.set_results(vec![record("b", "B"), record("a", "A2")]);
        assert_eq!(screen.detail_record().map(|r| r.title.as_str()), Some("A2"));
    }

    #[test]
    fn clearing_results_resets_the_cursor() {
        let mut screen = BrowseScreen::new();
        screen.set_results(vec![record("a", "A"), record("b", "B")]);
        screen.selected = 1;
        screen.clear_results();
        assert!(screen.results.is_empty());
        assert_eq!(screen.selected, 0);
    }

    #[test]
    fn selection_is_clamped_to_the_result_list() {
        let mut screen = BrowseScreen::new();
        screen.set_results(vec![record("a", "A"), record("b", "B"), record("c", "C")]);
        screen.move_selection(10);
        assert_eq!(screen.selected, 2);
        screen.move_selection(-10);
        assert_eq!(screen.selected, 0);
    }
}
