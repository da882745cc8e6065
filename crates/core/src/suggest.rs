//! Debounced search-suggestion state machine.
//!
//! The session is clock-free: every transition takes the current `Instant`,
//! and the driver (a tokio loop, a test) decides when to call [`SuggestSession::poll`]
//! by sleeping until [`SuggestSession::next_deadline`].
//!
//! ```text
//!            input (< 2 chars) / blur grace elapsed / select
//!     +--------------------------------------------------------+
//!     v                                                        |
//!   Idle --input (>= 2)--> Pending --poll past deadline--> (fetch issued)
//!                           ^  |                               |
//!                           +--+ input re-arms                 | resolve(latest seq)
//!                                                              v
//!                                                           Showing
//! ```
//!
//! Every issued fetch gets a sequence number. Only the most recently issued
//! one may resolve into the visible list; older responses are dropped even if
//! they arrive last.

use std::time::{Duration, Instant};

use crate::filter::{MAX_SUGGESTIONS, is_suggestable};
use crate::types::ArtisanProfile;

/// Quiet period between the last keystroke and the fetch.
pub const DEBOUNCE: Duration = Duration::from_millis(250);

/// Delay between losing focus and hiding the list, so a pointer-down
/// selection can land first.
pub const BLUR_GRACE: Duration = Duration::from_millis(150);

/// Coarse state of a suggestion session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No suggestions shown.
    Idle,
    /// Debounce timer armed, or a fetch issued and not yet resolved.
    Pending,
    /// Latest fetch resolved; suggestions visible.
    Showing,
}

/// A fetch the driver must perform for the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub query: String,
}

/// Something that can be offered as a suggestion.
pub trait Suggestion {
    /// Category the listing is filtered by when this suggestion is chosen.
    fn category(&self) -> &str;
}

impl Suggestion for ArtisanProfile {
    fn category(&self) -> &str {
        &self.craft_type
    }
}

/// A single search box's suggestion state.
#[derive(Debug, Clone)]
pub struct SuggestSession<T> {
    query: String,
    phase: Phase,
    debounce_deadline: Option<Instant>,
    blur_deadline: Option<Instant>,
    issued: u64,
    in_flight: Option<u64>,
    suggestions: Vec<T>,
}

impl<T> Default for SuggestSession<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SuggestSession<T> {
    /// Create an idle session with an empty query.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            query: String::new(),
            phase: Phase::Idle,
            debounce_deadline: None,
            blur_deadline: None,
            issued: 0,
            in_flight: None,
            suggestions: Vec::new(),
        }
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Suggestions currently visible (empty unless showing).
    #[must_use]
    pub fn visible(&self) -> &[T] {
        if self.phase == Phase::Showing {
            &self.suggestions
        } else {
            &[]
        }
    }

    /// Number of fetches issued so far.
    #[must_use]
    pub const fn issued(&self) -> u64 {
        self.issued
    }

    /// Record new input text.
    ///
    /// Short queries return the session to idle. Otherwise the debounce timer
    /// is (re-)armed from `now`.
    pub fn input(&mut self, text: &str, now: Instant) {
        text.clone_into(&mut self.query);
        self.blur_deadline = None;

        if is_suggestable(text) {
            self.phase = Phase::Pending;
            self.debounce_deadline = Some(now + DEBOUNCE);
        } else {
            self.reset();
        }
    }

    /// The search box lost focus.
    pub fn blur(&mut self, now: Instant) {
        self.blur_deadline = Some(now + BLUR_GRACE);
    }

    /// The search box regained focus before the grace delay elapsed.
    pub const fn focus(&mut self) {
        self.blur_deadline = None;
    }

    /// Earliest instant at which [`Self::poll`] has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.debounce_deadline, self.blur_deadline) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Advance timers. Returns a ticket when the debounce window has closed.
    pub fn poll(&mut self, now: Instant) -> Option<FetchTicket> {
        if self.blur_deadline.is_some_and(|deadline| now >= deadline) {
            self.blur_deadline = None;
            self.reset();
            return None;
        }

        match self.debounce_deadline {
            Some(deadline) if now >= deadline => {
                self.debounce_deadline = None;
                self.issued += 1;
                self.in_flight = Some(self.issued);
                Some(FetchTicket {
                    seq: self.issued,
                    query: self.query.clone(),
                })
            }
            _ => None,
        }
    }

    /// Apply a fetch result.
    ///
    /// Returns `false` (and changes nothing) when the ticket is not the most
    /// recently issued one, or the session went idle since it was issued.
    pub fn resolve(&mut self, seq: u64, results: impl IntoIterator<Item = T>) -> bool {
        if self.in_flight != Some(seq) {
            return false;
        }
        self.in_flight = None;
        self.suggestions = results.into_iter().take(MAX_SUGGESTIONS).collect();
        // Typing continued while the fetch was out; stay pending for the next one
        self.phase = if self.debounce_deadline.is_some() {
            Phase::Pending
        } else {
            Phase::Showing
        };
        true
    }

    fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.debounce_deadline = None;
        self.in_flight = None;
        self.suggestions.clear();
    }
}

impl<T: Suggestion> SuggestSession<T> {
    /// Choose a visible suggestion.
    ///
    /// The query text becomes the suggestion's category and the session goes
    /// idle. Returns the chosen suggestion so the caller can navigate to the
    /// listing filtered by its category.
    pub fn select(&mut self, index: usize) -> Option<T> {
        if self.phase != Phase::Showing || index >= self.suggestions.len() {
            return None;
        }
        let chosen = self.suggestions.swap_remove(index);
        self.reset();
        self.blur_deadline = None;
        chosen.category().clone_into(&mut self.query);
        Some(chosen)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Item(&'static str, &'static str);

    impl Suggestion for Item {
        fn category(&self) -> &str {
            self.1
        }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    /// Drive the session the way a timer loop would, collecting tickets.
    fn run_until(session: &mut SuggestSession<Item>, until: Instant) -> Vec<FetchTicket> {
        let mut tickets = Vec::new();
        while let Some(deadline) = session.next_deadline() {
            if deadline > until {
                break;
            }
            tickets.extend(session.poll(deadline));
        }
        tickets
    }

    #[test]
    fn test_burst_of_keystrokes_issues_one_fetch() {
        let t0 = Instant::now();
        let mut session = SuggestSession::<Item>::new();

        session.input("po", t0);
        session.input("pot", t0 + ms(40));
        session.input("pott", t0 + ms(80));

        assert_eq!(session.phase(), Phase::Pending);
        assert!(session.poll(t0 + ms(80) + ms(249)).is_none());

        let ticket = session.poll(t0 + ms(80) + DEBOUNCE).unwrap();
        assert_eq!(ticket.query, "pott");
        assert_eq!(session.next_deadline(), None);
        assert!(run_until(&mut session, t0 + ms(5000)).is_empty());
        assert_eq!(session.issued(), 1);
    }

    #[test]
    fn test_short_query_never_fetches() {
        let t0 = Instant::now();
        let mut session = SuggestSession::<Item>::new();

        session.input("x", t0);
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.next_deadline(), None);
        assert!(session.poll(t0 + ms(1000)).is_none());
        assert_eq!(session.issued(), 0);
    }

    #[test]
    fn test_resolve_shows_capped_results() {
        let t0 = Instant::now();
        let mut session = SuggestSession::new();
        session.input("pot", t0);
        let ticket = session.poll(t0 + DEBOUNCE).unwrap();

        let results = (0..12).map(|_| Item("Ravi", "Pottery"));
        assert!(session.resolve(ticket.seq, results));
        assert_eq!(session.phase(), Phase::Showing);
        assert_eq!(session.visible().len(), MAX_SUGGESTIONS);
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let t0 = Instant::now();
        let mut session = SuggestSession::new();

        session.input("po", t0);
        let first = session.poll(t0 + DEBOUNCE).unwrap();
        session.input("tex", t0 + ms(300));
        let second = session.poll(t0 + ms(300) + DEBOUNCE).unwrap();
        assert!(second.seq > first.seq);

        // Newer response lands first, older one last
        assert!(session.resolve(second.seq, [Item("Priyanka", "Textiles")]));
        assert!(!session.resolve(first.seq, [Item("Ravi", "Pottery")]));
        assert_eq!(session.visible(), [Item("Priyanka", "Textiles")]);
    }

    #[test]
    fn test_response_after_going_idle_is_discarded() {
        let t0 = Instant::now();
        let mut session = SuggestSession::new();
        session.input("pot", t0);
        let ticket = session.poll(t0 + DEBOUNCE).unwrap();

        session.input("p", t0 + ms(260));
        assert!(!session.resolve(ticket.seq, [Item("Ravi", "Pottery")]));
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.visible().is_empty());
    }

    #[test]
    fn test_typing_while_fetch_in_flight_stays_pending() {
        let t0 = Instant::now();
        let mut session = SuggestSession::new();
        session.input("pot", t0);
        let ticket = session.poll(t0 + DEBOUNCE).unwrap();

        session.input("pott", t0 + ms(270));
        assert!(session.resolve(ticket.seq, [Item("Ravi", "Pottery")]));
        assert_eq!(session.phase(), Phase::Pending);

        let next = session.poll(t0 + ms(270) + DEBOUNCE).unwrap();
        assert_eq!(next.query, "pott");
        assert!(session.resolve(next.seq, [Item("Ravi", "Pottery")]));
        assert_eq!(session.phase(), Phase::Showing);
    }

    #[test]
    fn test_blur_hides_after_grace() {
        let t0 = Instant::now();
        let mut session = SuggestSession::new();
        session.input("pot", t0);
        let ticket = session.poll(t0 + DEBOUNCE).unwrap();
        session.resolve(ticket.seq, [Item("Ravi", "Pottery")]);

        let blurred_at = t0 + ms(400);
        session.blur(blurred_at);
        assert!(session.poll(blurred_at + ms(100)).is_none());
        assert_eq!(session.phase(), Phase::Showing);

        assert!(session.poll(blurred_at + BLUR_GRACE).is_none());
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_select_within_grace_wins() {
        let t0 = Instant::now();
        let mut session = SuggestSession::new();
        session.input("ravi", t0);
        let ticket = session.poll(t0 + DEBOUNCE).unwrap();
        session.resolve(
            ticket.seq,
            [Item("Ravi", "Pottery"), Item("Ravina", "Textiles")],
        );

        session.blur(t0 + ms(500));
        let chosen = session.select(1).unwrap();
        assert_eq!(chosen, Item("Ravina", "Textiles"));
        assert_eq!(session.query(), "Textiles");
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.next_deadline(), None);
    }

    #[test]
    fn test_select_requires_visible_list() {
        let t0 = Instant::now();
        let mut session = SuggestSession::<Item>::new();
        assert!(session.select(0).is_none());

        session.input("pot", t0);
        assert!(session.select(0).is_none());
    }

    #[test]
    fn test_focus_cancels_blur() {
        let t0 = Instant::now();
        let mut session = SuggestSession::new();
        session.input("pot", t0);
        let ticket = session.poll(t0 + DEBOUNCE).unwrap();
        session.resolve(ticket.seq, [Item("Ravi", "Pottery")]);

        session.blur(t0 + ms(300));
        session.focus();
        assert!(session.poll(t0 + ms(1000)).is_none());
        assert_eq!(session.phase(), Phase::Showing);
    }
}
