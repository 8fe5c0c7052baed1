#[cfg(test)]
mod tests {
    use crate::debounce::{Debouncer, DEFAULT_STABLE_THRESHOLD};
    use crate::types::GestureLabel::{self, Closed, Open};

    fn feed(d: &mut Debouncer, frames: &[Option<GestureLabel>]) -> Vec<(usize, GestureLabel)> {
        frames
            .iter()
            .enumerate()
            .filter_map(|(i, f)| d.update(*f).map(|l| (i, l)))
            .collect()
    }

    // =========================================================================
    // Run resets
    // =========================================================================

    #[test]
    fn test_short_run_then_dropout_never_confirms() {
        let mut d = Debouncer::default();
        let mut frames = vec![Some(Closed); (DEFAULT_STABLE_THRESHOLD - 1) as usize];
        frames.push(None);
        assert!(feed(&mut d, &frames).is_empty());
        assert_eq!(d.state().run_length, 0);
        assert_eq!(d.state().last_raw_label, None);
        assert_eq!(d.confirmed(), None);
    }

    #[test]
    fn test_dropout_clears_confirmed_label() {
        let mut d = Debouncer::default();
        feed(&mut d, &[Some(Open), Some(Open), Some(Open)]);
        assert_eq!(d.confirmed(), Some(Open));
        d.update(None);
        assert_eq!(d.confirmed(), None);

        // Same label again must be re-confirmed from a fresh run.
        let changes = feed(&mut d, &[Some(Open), Some(Open), Some(Open)]);
        assert_eq!(changes, vec![(2, Open)]);
    }

    // =========================================================================
    // Confirmation timing
    // =========================================================================

    #[test]
    fn test_confirms_on_threshold_frame_from_empty() {
        let mut d = Debouncer::default();
        let changes = feed(&mut d, &[Some(Closed), Some(Closed), Some(Closed)]);
        assert_eq!(changes, vec![(2, Closed)]);
    }

    #[test]
    fn test_confirms_once_after_prior_open() {
        let mut d = Debouncer::default();
        feed(&mut d, &[Some(Open); 5]);
        assert_eq!(d.confirmed(), Some(Open));

        let changes = feed(&mut d, &[Some(Closed), Some(Closed), Some(Closed), Some(Closed), Some(Closed)]);
        assert_eq!(changes, vec![(2, Closed)]);
        assert_eq!(d.state().run_length, 5);
    }

    #[test]
    fn test_holding_a_label_does_not_repeat_change() {
        let mut d = Debouncer::default();
        let changes = feed(&mut d, &[Some(Open); 20]);
        assert_eq!(changes.len(), 1);
    }

    #[test]
    fn test_alternating_labels_never_confirm() {
        let mut d = Debouncer::default();
        let frames: Vec<_> = (0..101)
            .map(|i| Some(if i % 2 == 0 { Open } else { Closed }))
            .collect();
        assert!(feed(&mut d, &frames).is_empty());
        assert_eq!(d.confirmed(), None);
    }

    #[test]
    fn test_single_frame_glitch_restarts_run() {
        let mut d = Debouncer::default();
        let changes = feed(
            &mut d,
            &[Some(Closed), Some(Closed), Some(Open), Some(Closed), Some(Closed), Some(Closed)],
        );
        assert_eq!(changes, vec![(5, Closed)]);
    }

    #[test]
    fn test_custom_threshold() {
        let mut d = Debouncer::new(1);
        let changes = feed(&mut d, &[Some(Open), Some(Closed), Some(Closed)]);
        assert_eq!(changes, vec![(0, Open), (1, Closed)]);

        let zero = Debouncer::new(0);
        assert_eq!(zero.threshold(), 1);
    }
}
