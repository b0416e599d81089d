//! Search input: a text bar plus an optional barcode scanner.
//!
//! Both routes end in the same search intent. A decoded barcode is written
//! into the bar (so the user sees what was searched), the scanner is closed,
//! and the value is submitted exactly like typed text.

use std::future::Future;

use storekeep_core::SearchValue;
use tracing::debug;

/// Anything that accepts a search intent.
pub trait SearchSink: Send + Sync {
    /// Run a search for `value`, starting over at page 1.
    fn search(&self, value: SearchValue) -> impl Future<Output = ()> + Send;
}

/// Text field state for a list screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchBar {
    text: String,
    scanning: bool,
}

impl SearchBar {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether a scan session is open.
    #[must_use]
    pub const fn is_scanning(&self) -> bool {
        self.scanning
    }

    /// Submit the current text. An empty bar clears the search.
    pub async fn submit<S: SearchSink>(&self, sink: &S) {
        sink.search(SearchValue::new(self.text.clone())).await;
    }

    /// Open the scanner. The bar reports `is_scanning` until the returned
    /// session is decoded, dismissed or dropped.
    pub fn open_scanner(&mut self) -> ScanSession<'_> {
        self.scanning = true;
        debug!("Scanner opened");
        ScanSession { bar: self }
    }
}

/// An open barcode scanner attached to a [`SearchBar`].
#[derive(Debug)]
pub struct ScanSession<'a> {
    bar: &'a mut SearchBar,
}

impl ScanSession<'_> {
    /// Use a decoded barcode as the search text and submit it.
    ///
    /// The scanner is closed before the search starts.
    pub async fn decoded<S: SearchSink>(mut self, code: impl Into<String>, sink: &S) {
        let code = code.into();
        debug!(%code, "Barcode decoded");
        self.bar.set_text(code.clone());
        drop(self);
        sink.search(SearchValue::new(code)).await;
    }

    /// Close the scanner without searching.
    pub fn dismiss(self) {
        debug!("Scanner dismissed");
    }
}

impl Drop for ScanSession<'_> {
    fn drop(&mut self) {
        self.bar.scanning = false;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        searches: Mutex<Vec<SearchValue>>,
    }

    impl RecordingSink {
        fn searches(&self) -> Vec<String> {
            self.searches
                .lock()
                .unwrap()
                .iter()
                .map(|v| v.as_str().to_string())
                .collect()
        }
    }

    impl SearchSink for RecordingSink {
        async fn search(&self, value: SearchValue) {
            self.searches.lock().unwrap().push(value);
        }
    }

    #[tokio::test]
    async fn test_submit_searches_current_text() {
        let sink = RecordingSink::default();
        let mut bar = SearchBar::new();
        bar.set_text("blue mug");
        bar.submit(&sink).await;

        assert_eq!(sink.searches(), vec!["blue mug"]);
    }

    #[tokio::test]
    async fn test_submit_empty_text_clears_search() {
        let sink = RecordingSink::default();
        SearchBar::new().submit(&sink).await;

        assert_eq!(sink.searches(), vec![""]);
    }

    #[tokio::test]
    async fn test_scan_sets_text_closes_scanner_and_searches() {
        let sink = RecordingSink::default();
        let mut bar = SearchBar::new();
        bar.set_text("typed");

        let session = bar.open_scanner();
        session.decoded("4006381333931", &sink).await;

        assert_eq!(bar.text(), "4006381333931");
        assert!(!bar.is_scanning());
        assert_eq!(sink.searches(), vec!["4006381333931"]);
    }

    #[test]
    fn test_dropping_session_closes_scanner() {
        let mut bar = SearchBar::new();
        let session = bar.open_scanner();
        drop(session);
        assert!(!bar.is_scanning());

        let mut bar = SearchBar::new();
        {
            let _session = bar.open_scanner();
        }
        assert!(!bar.is_scanning());
    }

    #[tokio::test]
    async fn test_dismiss_keeps_text_and_does_not_search() {
        let sink = RecordingSink::default();
        let mut bar = SearchBar::new();
        bar.set_text("kept");
        bar.open_scanner().dismiss();

        assert_eq!(bar.text(), "kept");
        assert!(!bar.is_scanning());
        assert!(sink.searches().is_empty());
    }

    #[tokio::test]
    async fn test_scan_and_typed_text_share_the_sink() {
        let sink = RecordingSink::default();
        let mut bar = SearchBar::new();
        bar.set_text("mug");
        bar.submit(&sink).await;
        bar.open_scanner().decoded("123", &sink).await;

        assert_eq!(sink.searches(), vec!["mug", "123"]);
    }
}
