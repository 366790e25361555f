use crate::model::Snapshot;

/// 100 play turns plus the two bookkeeping points the engine writes.
pub const FINAL_TURN_COUNT: usize = 102;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Score {
    /// Employment percentage. Not clamped: out-of-range engine values pass through.
    pub value: f64,
    pub is_final: bool,
}

impl Score {
    pub fn formatted(&self) -> String {
        format!("{:.1}", self.value)
    }

    /// Banner text. While running, the score is followed by the action log.
    pub fn label(&self, actions: &str) -> String {
        if self.is_final {
            format!("Final score: {}%", self.formatted())
        } else if actions.is_empty() {
            format!("Score: {}%", self.formatted())
        } else {
            format!("Score: {}% ({})", self.formatted(), actions)
        }
    }
}

/// Score shown for a snapshot.
///
/// The engine appends a lookahead point to every time series, so the displayed
/// value is the second-to-last point of `time[0]`. With a single point that
/// point is used. Insolvency (production below the current total cost) forces
/// the value to zero.
pub fn derive_score(snapshot: &Snapshot) -> Score {
    let raw = snapshot
        .time
        .first()
        .and_then(|s| {
            let idx = s.values.len().saturating_sub(2);
            s.values.get(idx)
        })
        .map(|p| p.y)
        .unwrap_or(0.0);
    let value = if is_insolvent(snapshot) { 0.0 } else { raw };
    Score {
        value,
        is_final: snapshot.turn_count() == FINAL_TURN_COUNT,
    }
}

pub fn is_insolvent(snapshot: &Snapshot) -> bool {
    snapshot.production() < snapshot.current_cost()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures;

    #[test]
    fn uses_second_to_last_point() {
        let s = fixtures::snapshot(&[10.0, 42.26, 99.0]);
        let score = derive_score(&s);
        assert_eq!(score.value, 42.26);
        assert!(!score.is_final);
        assert_eq!(score.formatted(), "42.3");
    }

    #[test]
    fn single_point_uses_that_point() {
        let s = fixtures::snapshot(&[55.0]);
        assert_eq!(derive_score(&s).value, 55.0);
    }

    #[test]
    fn solvent_keeps_raw_value() {
        let mut s = fixtures::snapshot(&[70.0, 80.0, 0.0]);
        s.money = fixtures::money(50.0, 10.0, 20.0, 5.0);
        s.money[0].values[1].y = 40.0;
        assert_eq!(derive_score(&s).value, 80.0);
    }

    #[test]
    fn insolvency_zeroes_score() {
        let mut s = fixtures::snapshot(&[70.0, 80.0, 0.0]);
        s.money = fixtures::money(5.0, 10.0, 20.0, 5.0);
        assert!(is_insolvent(&s));
        assert_eq!(derive_score(&s).value, 0.0);
    }

    #[test]
    fn equal_production_and_cost_is_solvent() {
        let mut s = fixtures::snapshot(&[70.0, 80.0, 0.0]);
        s.money = fixtures::money(35.0, 10.0, 20.0, 5.0);
        assert_eq!(derive_score(&s).value, 80.0);
    }

    #[test]
    fn prior_cost_points_are_ignored() {
        let mut s = fixtures::snapshot(&[70.0, 80.0, 0.0]);
        s.money = fixtures::money(35.0, 10.0, 20.0, 5.0);
        s.money[1].values[0].y = 1000.0;
        assert_eq!(derive_score(&s).value, 80.0);
    }

    #[test]
    fn final_only_at_102_points() {
        let ys: Vec<f64> = (0..FINAL_TURN_COUNT).map(|i| i as f64 / 2.0).collect();
        let s = fixtures::snapshot(&ys);
        let score = derive_score(&s);
        assert!(score.is_final);
        assert_eq!(score.value, s.time[0].values[100].y);

        let s = fixtures::snapshot(&ys[..101]);
        assert!(!derive_score(&s).is_final);
        let mut longer = ys.clone();
        longer.push(1.0);
        assert!(!derive_score(&fixtures::snapshot(&longer)).is_final);
    }

    #[test]
    fn out_of_range_passes_through() {
        let s = fixtures::snapshot(&[140.0, 0.0]);
        assert_eq!(derive_score(&s).value, 140.0);
        let s = fixtures::snapshot(&[-3.0, 0.0]);
        assert_eq!(derive_score(&s).value, -3.0);
    }

    #[test]
    fn derivation_is_pure() {
        let s = fixtures::snapshot(&[12.0, 34.0, 56.0]);
        assert_eq!(derive_score(&s), derive_score(&s.clone()));
    }

    #[test]
    fn labels() {
        let running = Score {
            value: 61.04,
            is_final: false,
        };
        assert_eq!(running.label(""), "Score: 61.0%");
        assert_eq!(
            running.label("Mobility(High)"),
            "Score: 61.0% (Mobility(High))"
        );
        let done = Score {
            value: 61.04,
            is_final: true,
        };
        assert_eq!(done.label("Mobility(High)"), "Final score: 61.0%");
    }
}
