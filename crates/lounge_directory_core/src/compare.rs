//! crates/lounge_directory_core/src/compare.rs
//!
//! The comparison selector: an up-to-two-item working set of lounges the user
//! wants to see side by side, persisted through a `KeyValueStore` and broadcast
//! to subscribers on every transition.

use crate::catalog::Catalog;
use crate::domain::{CompareItem, Lounge};
use crate::ports::{KeyValueStore, PortError, PortResult};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Storage key of the persisted selection.
pub const COMPARE_SELECTION_KEY: &str = "compareSelection";

/// How many lounges can be compared at once.
pub const COMPARE_CAPACITY: usize = 2;

//=========================================================================================
// States and Rejections
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    Empty,
    OneSelected,
    /// Ready to compare.
    TwoSelected,
}

/// Why navigating to the comparison was refused. Shown to the user as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CompareRejection {
    #[error("Select two lounges to compare")]
    NothingSelected,
    #[error("Please select one more lounge to compare")]
    NeedOneMore,
}

/// Handle returned by [`ComparisonSelector::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

type Listener = Box<dyn Fn(&[CompareItem]) + Send + Sync>;

//=========================================================================================
// ComparisonSelector
//=========================================================================================

/// A fixed-capacity ring of selected lounges.
///
/// Each transition is a complete read-modify-persist-notify cycle: the new
/// list is written to the store first, and only once that succeeds does the
/// in-memory state change and every subscriber see the result.
pub struct ComparisonSelector {
    store: Arc<dyn KeyValueStore>,
    selected: Vec<CompareItem>,
    listeners: Vec<(Subscription, Listener)>,
    next_subscription: u64,
}

impl fmt::Debug for ComparisonSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComparisonSelector")
            .field("selected", &self.selected)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl ComparisonSelector {
    /// Rehydrates the selection from `store`.
    ///
    /// Unreadable or malformed state yields an empty selection. A persisted
    /// list longer than the capacity keeps only its newest entries.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let selected = match store.get(COMPARE_SELECTION_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<CompareItem>>(&raw) {
                Ok(mut items) => {
                    if items.len() > COMPARE_CAPACITY {
                        items.drain(..items.len() - COMPARE_CAPACITY);
                    }
                    items
                }
                Err(e) => {
                    warn!("Failed to parse compare selection, starting empty: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Failed to read compare selection, starting empty: {}", e);
                Vec::new()
            }
        };

        Self {
            store,
            selected,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn items(&self) -> &[CompareItem] {
        &self.selected
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.selected.iter().any(|item| item.id == id)
    }

    pub fn state(&self) -> SelectionState {
        match self.selected.len() {
            0 => SelectionState::Empty,
            1 => SelectionState::OneSelected,
            _ => SelectionState::TwoSelected,
        }
    }

    /// How many more lounges are needed before comparing.
    pub fn remaining(&self) -> usize {
        COMPARE_CAPACITY.saturating_sub(self.selected.len())
    }

    //-------------------------------------------------------------------------------------
    // Transitions
    //-------------------------------------------------------------------------------------

    /// Appends `item`, evicting the oldest entry when the selection is full.
    /// Re-adding an already selected lounge leaves the list unchanged.
    pub fn add(&mut self, item: CompareItem) -> PortResult<()> {
        let mut next = self.selected.clone();
        if !next.iter().any(|existing| existing.id == item.id) {
            if next.len() >= COMPARE_CAPACITY {
                next.remove(0);
            }
            next.push(item);
        }
        self.commit(next)
    }

    /// Drops the lounge with `id`. Unknown ids are not an error.
    pub fn remove(&mut self, id: &str) -> PortResult<()> {
        let next = self
            .selected
            .iter()
            .filter(|item| item.id != id)
            .cloned()
            .collect();
        self.commit(next)
    }

    pub fn clear(&mut self) -> PortResult<()> {
        self.store.remove(COMPARE_SELECTION_KEY)?;
        self.selected.clear();
        self.notify();
        Ok(())
    }

    /// Adds the lounge when absent, removes it when present.
    pub fn toggle(&mut self, lounge: &Lounge) -> PortResult<()> {
        if self.contains(&lounge.id) {
            self.remove(&lounge.id)
        } else {
            self.add(CompareItem::from_lounge(lounge))
        }
    }

    fn commit(&mut self, next: Vec<CompareItem>) -> PortResult<()> {
        let json = serde_json::to_string(&next).map_err(|e| PortError::Unexpected(e.to_string()))?;
        self.store.set(COMPARE_SELECTION_KEY, &json)?;
        self.selected = next;
        debug!("Compare selection now holds {} lounge(s)", self.selected.len());
        self.notify();
        Ok(())
    }

    //-------------------------------------------------------------------------------------
    // Observers
    //-------------------------------------------------------------------------------------

    /// Registers `listener`; it runs after every transition with the new list.
    pub fn subscribe<F>(&mut self, listener: F) -> Subscription
    where
        F: Fn(&[CompareItem]) + Send + Sync + 'static,
    {
        let subscription = Subscription(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((subscription, Box::new(listener)));
        subscription
    }

    /// Returns whether the subscription was still registered.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(s, _)| *s != subscription);
        self.listeners.len() != before
    }

    fn notify(&self) {
        for (_, listener) in &self.listeners {
            listener(&self.selected);
        }
    }

    //-------------------------------------------------------------------------------------
    // Navigation
    //-------------------------------------------------------------------------------------

    /// The (left, right) pair, once exactly two lounges are selected.
    pub fn ready_pair(&self) -> Result<(&CompareItem, &CompareItem), CompareRejection> {
        match self.selected.as_slice() {
            [left, right] => Ok((left, right)),
            [_] => Err(CompareRejection::NeedOneMore),
            _ => Err(CompareRejection::NothingSelected),
        }
    }

    /// Query string addressing the comparison page.
    pub fn compare_query(&self) -> Result<String, CompareRejection> {
        let (left, right) = self.ready_pair()?;
        Ok(format!("lounge1={}&lounge2={}", left.id, right.id))
    }
}

//=========================================================================================
// Side-by-side View
//=========================================================================================

/// Which side of a comparison wins on a numeric attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RatingEdge {
    Left,
    Right,
    Equal,
}

/// Compares two ratings where 0 means unrated; a rated lounge beats an unrated one.
pub fn better_rating(left: f64, right: f64) -> RatingEdge {
    match (left > 0.0, right > 0.0) {
        (false, false) => RatingEdge::Equal,
        (false, true) => RatingEdge::Right,
        (true, false) => RatingEdge::Left,
        (true, true) if left > right => RatingEdge::Left,
        (true, true) if right > left => RatingEdge::Right,
        (true, true) => RatingEdge::Equal,
    }
}

/// Two lounges resolved from their ids for side-by-side rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonView<'a> {
    pub left: Option<&'a Lounge>,
    pub right: Option<&'a Lounge>,
}

impl<'a> ComparisonView<'a> {
    /// Looks both ids up in `catalog`; unknown ids resolve to `None`.
    pub fn resolve(catalog: &'a Catalog, left_id: &str, right_id: &str) -> Self {
        Self {
            left: catalog.lounge(left_id),
            right: catalog.lounge(right_id),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.left.is_some() && self.right.is_some()
    }

    pub fn better_rating(&self) -> RatingEdge {
        let rating = |lounge: Option<&Lounge>| lounge.map_or(0.0, |l| l.rating);
        better_rating(rating(self.left), rating(self.right))
    }

    /// Access methods offered by both lounges, in the left lounge's order.
    pub fn shared_access_methods(&self) -> Vec<&'a str> {
        match (self.left, self.right) {
            (Some(left), Some(right)) => left
                .access_methods
                .iter()
                .filter(|m| right.access_methods.contains(m))
                .map(String::as_str)
                .collect(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::test_support::lounge;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    fn item(id: &str) -> CompareItem {
        CompareItem {
            id: id.to_string(),
            name: format!("Lounge {id}"),
            airport_code: "LHR".to_string(),
            image: "/img.jpg".to_string(),
        }
    }

    fn ids(selector: &ComparisonSelector) -> Vec<&str> {
        selector.items().iter().map(|i| i.id.as_str()).collect()
    }

    fn fresh() -> (Arc<MemoryStore>, ComparisonSelector) {
        let store = Arc::new(MemoryStore::new());
        let selector = ComparisonSelector::load(store.clone());
        (store, selector)
    }

    #[test]
    fn walks_through_states() {
        let (_, mut selector) = fresh();
        assert_eq!(selector.state(), SelectionState::Empty);
        assert_eq!(selector.remaining(), 2);

        selector.add(item("a")).unwrap();
        assert_eq!(selector.state(), SelectionState::OneSelected);

        selector.add(item("b")).unwrap();
        assert_eq!(selector.state(), SelectionState::TwoSelected);
        assert_eq!(selector.remaining(), 0);

        selector.clear().unwrap();
        assert_eq!(selector.state(), SelectionState::Empty);
    }

    #[test]
    fn third_add_evicts_oldest() {
        let (_, mut selector) = fresh();
        selector.add(item("a")).unwrap();
        selector.add(item("b")).unwrap();
        selector.add(item("c")).unwrap();

        assert_eq!(ids(&selector), vec!["b", "c"]);
    }

    #[test]
    fn readding_selected_lounge_is_a_no_op() {
        let (_, mut selector) = fresh();
        selector.add(item("a")).unwrap();
        selector.add(item("b")).unwrap();
        selector.add(item("a")).unwrap();

        assert_eq!(ids(&selector), vec!["a", "b"]);
    }

    #[test]
    fn remove_unknown_id_is_not_an_error() {
        let (_, mut selector) = fresh();
        selector.add(item("a")).unwrap();
        selector.remove("zzz").unwrap();
        assert_eq!(ids(&selector), vec!["a"]);

        selector.remove("a").unwrap();
        assert!(selector.is_empty());
    }

    #[test]
    fn selection_survives_reload() {
        let (store, mut selector) = fresh();
        selector.add(item("a")).unwrap();
        selector.add(item("b")).unwrap();
        drop(selector);

        let reloaded = ComparisonSelector::load(store.clone());
        assert_eq!(ids(&reloaded), vec!["a", "b"]);

        let mut reloaded = reloaded;
        reloaded.clear().unwrap();
        assert_eq!(store.get(COMPARE_SELECTION_KEY).unwrap(), None);
    }

    #[test]
    fn malformed_state_loads_empty() {
        let store = Arc::new(MemoryStore::new());
        store.set(COMPARE_SELECTION_KEY, "[{broken").unwrap();

        let selector = ComparisonSelector::load(store);
        assert!(selector.is_empty());
    }

    #[test]
    fn oversized_state_keeps_newest_two() {
        let store = Arc::new(MemoryStore::new());
        let raw = serde_json::to_string(&vec![item("a"), item("b"), item("c")]).unwrap();
        store.set(COMPARE_SELECTION_KEY, &raw).unwrap();

        let selector = ComparisonSelector::load(store);
        assert_eq!(ids(&selector), vec!["b", "c"]);
    }

    #[test]
    fn subscribers_see_post_transition_state() {
        let (_, mut selector) = fresh();
        let seen: Arc<Mutex<Vec<usize>>> = Arc::new(Mutex::new(Vec::new()));

        let sink = seen.clone();
        let subscription = selector.subscribe(move |items| sink.lock().unwrap().push(items.len()));

        selector.add(item("a")).unwrap();
        selector.add(item("b")).unwrap();
        selector.add(item("c")).unwrap();
        selector.remove("b").unwrap();
        selector.clear().unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![1, 2, 2, 1, 0]);

        assert!(selector.unsubscribe(subscription));
        assert!(!selector.unsubscribe(subscription));
        selector.add(item("d")).unwrap();
        assert_eq!(seen.lock().unwrap().len(), 5);
    }

    #[test]
    fn compare_requires_two_selections() {
        let (_, mut selector) = fresh();
        assert_eq!(selector.ready_pair(), Err(CompareRejection::NothingSelected));

        selector.add(item("a")).unwrap();
        let rejection = selector.compare_query().unwrap_err();
        assert_eq!(rejection, CompareRejection::NeedOneMore);
        assert_eq!(rejection.to_string(), "Please select one more lounge to compare");

        selector.add(item("b")).unwrap();
        let (left, right) = selector.ready_pair().unwrap();
        assert_eq!((left.id.as_str(), right.id.as_str()), ("a", "b"));
        assert_eq!(selector.compare_query().unwrap(), "lounge1=a&lounge2=b");
    }

    #[test]
    fn toggle_adds_then_removes() {
        let (_, mut selector) = fresh();
        let l = lounge("ist-1", "Turkish Airlines Lounge", "IST");

        selector.toggle(&l).unwrap();
        assert!(selector.contains("ist-1"));
        selector.toggle(&l).unwrap();
        assert!(!selector.contains("ist-1"));
    }

    #[test]
    fn rating_edge_treats_zero_as_unrated() {
        assert_eq!(better_rating(0.0, 0.0), RatingEdge::Equal);
        assert_eq!(better_rating(0.0, 3.0), RatingEdge::Right);
        assert_eq!(better_rating(4.0, 0.0), RatingEdge::Left);
        assert_eq!(better_rating(4.0, 4.5), RatingEdge::Right);
        assert_eq!(better_rating(4.0, 4.0), RatingEdge::Equal);
    }

    #[test]
    fn view_resolves_lounges_from_catalog() {
        let catalog = Catalog::from_lounges(vec![
            lounge("a", "A", "LHR").access(&["Amex", "Priority Pass"]).rated(4.0, 3),
            lounge("b", "B", "LHR").access(&["Priority Pass"]).rated(4.6, 9),
        ])
        .unwrap();

        let view = ComparisonView::resolve(&catalog, "a", "b");
        assert!(view.is_complete());
        assert_eq!(view.better_rating(), RatingEdge::Right);
        assert_eq!(view.shared_access_methods(), vec!["Priority Pass"]);

        let partial = ComparisonView::resolve(&catalog, "a", "missing");
        assert!(!partial.is_complete());
        assert_eq!(partial.better_rating(), RatingEdge::Left);
    }

    /// A store whose writes always fail.
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> PortResult<Option<String>> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> PortResult<()> {
            Err(PortError::Unexpected("read-only".to_string()))
        }

        fn remove(&self, _key: &str) -> PortResult<()> {
            Err(PortError::Unexpected("read-only".to_string()))
        }
    }

    #[test]
    fn failed_persist_leaves_state_untouched() {
        let mut selector = ComparisonSelector::load(Arc::new(ReadOnlyStore));
        assert!(selector.add(item("a")).is_err());
        assert!(selector.is_empty());
    }
}
