//! Session controller: owns the current snapshot and the presenters, and
//! pushes every accepted snapshot through score derivation and rendering.

use std::cell::RefCell;

use log::{debug, error, info, warn};

use crate::client::{Action, ActionClient, Transport};
use crate::error::ClientResult;
use crate::model::Snapshot;
use crate::presenters::{ChartKind, ChartPresenter, GridPresenter};
use crate::score::{Score, derive_score};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// No snapshot received yet.
    Idle,
    Active,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// A newer request was already applied; this response was dropped.
    Stale,
}

pub struct SessionController {
    snapshot: Option<Snapshot>,
    score: Option<Score>,
    next_seq: u64,
    latest_applied: Option<u64>,
    revision: u64,
    time: ChartPresenter,
    race: ChartPresenter,
    race_pie: ChartPresenter,
    money: ChartPresenter,
    grid: GridPresenter,
}

impl SessionController {
    pub fn new(chart_width: f64, chart_height: f64) -> Self {
        let chart = |kind| ChartPresenter::new(kind, chart_width, chart_height);
        Self {
            snapshot: None,
            score: None,
            next_seq: 0,
            latest_applied: None,
            revision: 0,
            time: chart(ChartKind::Time),
            race: chart(ChartKind::Race),
            race_pie: chart(ChartKind::RacePie),
            money: chart(ChartKind::Money),
            grid: GridPresenter::default(),
        }
    }

    pub fn state(&self) -> SessionState {
        if self.snapshot.is_some() {
            SessionState::Active
        } else {
            SessionState::Idle
        }
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    pub fn score(&self) -> Option<Score> {
        self.score
    }

    /// Number of snapshots applied so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn chart(&self, kind: ChartKind) -> &ChartPresenter {
        match kind {
            ChartKind::Time => &self.time,
            ChartKind::Race => &self.race,
            ChartKind::RacePie => &self.race_pie,
            ChartKind::Money => &self.money,
        }
    }

    pub fn chart_mut(&mut self, kind: ChartKind) -> &mut ChartPresenter {
        match kind {
            ChartKind::Time => &mut self.time,
            ChartKind::Race => &mut self.race,
            ChartKind::RacePie => &mut self.race_pie,
            ChartKind::Money => &mut self.money,
        }
    }

    pub fn grid(&self) -> &GridPresenter {
        &self.grid
    }

    /// Tags an outgoing request. Sequence numbers start at 1.
    pub fn begin_request(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    /// Accepts `snapshot` unless a later request has already been applied.
    pub fn apply(&mut self, seq: u64, snapshot: Snapshot) -> Outcome {
        if let Some(latest) = self.latest_applied {
            if seq < latest {
                warn!("dropping response #{} (already showing #{})", seq, latest);
                return Outcome::Stale;
            }
        }
        if let Some(prev) = &self.snapshot {
            if snapshot.turn_count() < prev.turn_count() {
                debug!(
                    "turn count went from {} to {}",
                    prev.turn_count(),
                    snapshot.turn_count()
                );
            }
        }

        let score = derive_score(&snapshot);
        for kind in ChartKind::ALL {
            self.chart_mut(kind).render(kind.slice(&snapshot));
        }
        self.grid.render(&snapshot.grid);

        info!(
            "applied #{}: turn {} score {}{}",
            seq,
            snapshot.turn_count(),
            score.formatted(),
            if score.is_final { " (final)" } else { "" }
        );
        self.score = Some(score);
        self.snapshot = Some(snapshot);
        self.latest_applied = Some(seq);
        self.revision += 1;
        Outcome::Applied
    }

    /// Sends `action` and applies the answer. The controller is only borrowed
    /// before and after the round-trip, so other dispatches may run meanwhile.
    pub async fn dispatch<T: Transport>(
        cell: &RefCell<Self>,
        client: &ActionClient<T>,
        action: &Action,
    ) -> ClientResult<Outcome> {
        let seq = cell.borrow_mut().begin_request();
        debug!("dispatch #{} action={}", seq, action.id);
        let result = match action.seed {
            Some(seed) => client.set_seed(seed).await,
            None => {
                client
                    .dispatch(&action.id, &action.label, action.category.as_deref())
                    .await
            }
        };
        cell.borrow_mut().finish(seq, &action.id, result)
    }

    /// Settles request `seq`. A failure is reported only while no later
    /// request has been applied; otherwise it is as stale as a late snapshot.
    pub fn finish(
        &mut self,
        seq: u64,
        action_id: &str,
        result: ClientResult<Snapshot>,
    ) -> ClientResult<Outcome> {
        match result {
            Ok(snapshot) => Ok(self.apply(seq, snapshot)),
            Err(e) if self.latest_applied.is_some_and(|latest| seq < latest) => {
                warn!("ignoring failure of superseded #{} ({}): {}", seq, action_id, e);
                Ok(Outcome::Stale)
            }
            Err(e) => {
                error!("action {} (#{}) failed: {}", action_id, seq, e);
                Err(e)
            }
        }
    }
}
