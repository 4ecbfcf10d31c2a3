#[cfg(test)]
mod tests {
    use reportq::exec::{FailureTracker, QueryOutcome};

    #[test]
    fn test_reaching_the_threshold_disables_the_definition() {
        let tracker = FailureTracker::new(true, 3);

        for _ in 0..2 {
            tracker.record_outcome("TradeLicenseSummary", QueryOutcome::ExecutionFailure);
        }
        assert!(!tracker.is_disabled("TradeLicenseSummary"));

        tracker.record_outcome("TradeLicenseSummary", QueryOutcome::ExecutionFailure);
        assert!(tracker.is_disabled("TradeLicenseSummary"));
        assert_eq!(tracker.failures("TradeLicenseSummary"), 3);
    }

    #[test]
    fn test_success_resets_the_counter() {
        let tracker = FailureTracker::new(true, 3);

        tracker.record_outcome("TradeLicenseSummary", QueryOutcome::ExecutionFailure);
        tracker.record_outcome("TradeLicenseSummary", QueryOutcome::ExecutionFailure);
        tracker.record_outcome("TradeLicenseSummary", QueryOutcome::Success);

        assert_eq!(tracker.failures("TradeLicenseSummary"), 0);
        assert!(!tracker.is_disabled("TradeLicenseSummary"));
    }

    #[test]
    fn test_timeouts_count_as_failures() {
        let tracker = FailureTracker::new(true, 2);

        tracker.record_outcome("PropertyTaxDues", QueryOutcome::Timeout);
        tracker.record_outcome("PropertyTaxDues", QueryOutcome::Timeout);

        assert!(tracker.is_disabled("PropertyTaxDues"));
    }

    #[test]
    fn test_counters_are_per_definition() {
        let tracker = FailureTracker::new(true, 1);

        tracker.record_outcome("TradeLicenseSummary", QueryOutcome::ExecutionFailure);

        assert!(tracker.is_disabled("TradeLicenseSummary"));
        assert!(!tracker.is_disabled("PropertyTaxDues"));
        assert_eq!(tracker.failures("PropertyTaxDues"), 0);
    }

    #[test]
    fn test_disabled_tracker_admits_everything() {
        let tracker = FailureTracker::new(false, 1);

        for _ in 0..10 {
            tracker.record_outcome("TradeLicenseSummary", QueryOutcome::ExecutionFailure);
        }

        assert!(!tracker.is_disabled("TradeLicenseSummary"));
        assert_eq!(tracker.failures("TradeLicenseSummary"), 0);
    }
}
