/// Counts how many trial moves a given [`Mover`](crate::mover::Mover) has had
/// accepted or rejected.
///
/// The total number of attempts is `n_succ + n_failed`.
#[derive(Clone, Debug, Default)]
pub struct AcceptanceStatistics {
    /// number of accepted trials
    pub n_succ: i64,
    /// number of rejected trials
    pub n_failed: i64,
}

impl AcceptanceStatistics {
    /// `n_succ / (n_succ + n_failed)`, or `0` if nothing has been attempted yet.
    pub fn success_rate(&self) -> f64 {
        let sum = self.n_succ + self.n_failed;
        if sum == 0 {
            return 0.0;
        }
        self.n_succ as f64 / sum as f64
    }

    /// Success rate over only the attempts made since `prev_stats` was recorded.
    pub fn recent_success_rate(&self, prev_stats: &AcceptanceStatistics) -> f64 {
        let succ = self.n_succ - prev_stats.n_succ;
        let fail = self.n_failed - prev_stats.n_failed;
        let sum = succ + fail;
        if sum == 0 {
            return 0.0;
        }
        succ as f64 / sum as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_rate_is_zero_before_any_attempt() {
        assert_eq!(AcceptanceStatistics::default().success_rate(), 0.0);
    }

    #[test]
    fn recent_success_rate_ignores_attempts_before_the_checkpoint() {
        let before = AcceptanceStatistics { n_succ: 10, n_failed: 10 };
        let after = AcceptanceStatistics { n_succ: 15, n_failed: 10 };
        assert_eq!(after.recent_success_rate(&before), 1.0);
    }
}
