/// A request to move through the deck, produced by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationIntent {
    Next,
    Previous,
    /// Signed so that out-of-range requests in either direction are representable.
    GoTo(i64),
}

/// Result of applying an intent to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Moved { from: usize, to: usize },
    Unchanged,
}

/// Current slide index within a fixed-size deck.
///
/// `current` is always a valid index. Navigation clamps at both ends;
/// there is no wraparound.
#[derive(Debug, Clone)]
pub struct SlideIndexModel {
    current: usize,
    total: usize,
}

impl SlideIndexModel {
    #[cfg(test)]
    pub fn new(total: usize) -> anyhow::Result<Self> {
        Self::starting_at(total, 0)
    }

    /// Start on `start`, clamped into range.
    pub fn starting_at(total: usize, start: usize) -> anyhow::Result<Self> {
        if total == 0 {
            anyhow::bail!("A deck needs at least one slide");
        }
        Ok(Self {
            current: start.min(total - 1),
            total,
        })
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current == self.total - 1
    }

    pub fn transition(&mut self, intent: NavigationIntent) -> Transition {
        let from = self.current;
        let to = match intent {
            NavigationIntent::Next if !self.is_last() => from + 1,
            NavigationIntent::Previous if !self.is_first() => from - 1,
            NavigationIntent::GoTo(i) if i >= 0 && (i as u64) < self.total as u64 => i as usize,
            _ => return Transition::Unchanged,
        };
        if to == from {
            return Transition::Unchanged;
        }
        self.current = to;
        Transition::Moved { from, to }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_starts_at_zero() {
        let model = SlideIndexModel::new(8).unwrap();
        assert_eq!(model.current(), 0);
        assert_eq!(model.total(), 8);
    }

    #[test]
    fn test_empty_deck_rejected() {
        assert!(SlideIndexModel::new(0).is_err());
    }

    #[test]
    fn test_start_is_clamped() {
        let model = SlideIndexModel::starting_at(8, 42).unwrap();
        assert_eq!(model.current(), 7);
    }

    #[test]
    fn test_next_six_then_clamp() {
        let mut model = SlideIndexModel::new(8).unwrap();
        for _ in 0..6 {
            model.transition(NavigationIntent::Next);
        }
        assert_eq!(model.current(), 6);

        assert_eq!(
            model.transition(NavigationIntent::Next),
            Transition::Moved { from: 6, to: 7 }
        );
        assert_eq!(
            model.transition(NavigationIntent::Next),
            Transition::Unchanged
        );
        assert_eq!(model.current(), 7);
    }

    #[test]
    fn test_previous_at_start_is_noop() {
        let mut model = SlideIndexModel::new(8).unwrap();
        assert_eq!(
            model.transition(NavigationIntent::Previous),
            Transition::Unchanged
        );
        assert_eq!(model.current(), 0);
    }

    #[test]
    fn test_goto_current_is_unchanged() {
        let mut model = SlideIndexModel::starting_at(8, 3).unwrap();
        assert_eq!(
            model.transition(NavigationIntent::GoTo(3)),
            Transition::Unchanged
        );
    }

    #[test]
    fn test_single_slide_deck() {
        let mut model = SlideIndexModel::new(1).unwrap();
        assert!(model.is_first() && model.is_last());
        assert_eq!(
            model.transition(NavigationIntent::Next),
            Transition::Unchanged
        );
        assert_eq!(
            model.transition(NavigationIntent::Previous),
            Transition::Unchanged
        );
    }

    proptest! {
        #[test]
        fn goto_valid_index_lands_there(total in 1usize..64, pick in 0usize..64) {
            let i = pick % total;
            let mut model = SlideIndexModel::new(total).unwrap();
            model.transition(NavigationIntent::GoTo(i as i64));
            prop_assert_eq!(model.current(), i);
        }

        #[test]
        fn goto_out_of_range_is_ignored(
            total in 1usize..64,
            start in 0usize..64,
            above in 0i64..1000,
            below in 1i64..1000,
        ) {
            let mut model = SlideIndexModel::starting_at(total, start).unwrap();
            let before = model.current();
            prop_assert_eq!(
                model.transition(NavigationIntent::GoTo(total as i64 + above)),
                Transition::Unchanged
            );
            prop_assert_eq!(
                model.transition(NavigationIntent::GoTo(-below)),
                Transition::Unchanged
            );
            prop_assert_eq!(model.current(), before);
        }

        #[test]
        fn random_walk_stays_in_range(total in 1usize..16, steps in proptest::collection::vec(0u8..3, 0..64)) {
            let mut model = SlideIndexModel::new(total).unwrap();
            for step in steps {
                let intent = match step {
                    0 => NavigationIntent::Next,
                    1 => NavigationIntent::Previous,
                    _ => NavigationIntent::GoTo(total as i64 / 2),
                };
                model.transition(intent);
                prop_assert!(model.current() < model.total());
            }
        }
    }
}
