use crate::domain::{
    chart::CandleChartOption,
    errors::{AppError, AppResult},
    logging::LogComponent,
    market_data::{Candle, CandleHistory, CandleRepository, MAX_FETCH_CANDLE_COUNT},
};

/// Candles requested by a live refresh; the newest one may still be open.
pub const REFRESH_CANDLE_COUNT: usize = 2;

/// Which kind of request a ticket stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    Initial,
    Older,
    Refresh,
    /// Full newest page after a refresh found no overlap
    Resync,
}

/// A request handed out by [`CandleFeed`]; its answer goes back through `finish`.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchTicket {
    pub kind: FetchKind,
    pub option: CandleChartOption,
    pub count: usize,
    pub cursor: Option<Candle>,
    generation: u64,
}

/// What a finished request did to the history
#[derive(Debug, Clone, PartialEq)]
pub enum FeedUpdate {
    /// Older candles appended at the end
    Appended(usize),
    /// Newer candles prepended at the front
    Prepended(usize),
    Loaded(usize),
    /// A resync page did not overlap either; the history now holds only that page
    Replaced(usize),
    /// The refresh did not overlap the loaded candles; a resync is pending
    Gap,
    /// The older page was not older than the loaded history; paging stops
    /// until [`CandleFeed::retry_older`]
    Rejected,
    /// Answer for a series that is no longer shown
    Stale,
    Failed(AppError),
}

/// Candle history of the displayed series plus its fetch bookkeeping.
///
/// At most one older-history request is outstanding at a time; the guard is
/// released whether the request succeeds or fails. A failed or rejected older
/// page stops paging until [`retry_older`](Self::retry_older). Every
/// [`reset`](Self::reset) starts a new generation so that answers for a
/// previous series are dropped.
#[derive(Debug, Clone, Default)]
pub struct CandleFeed {
    option: CandleChartOption,
    history: CandleHistory,
    fetching: bool,
    older_failed: bool,
    resync: bool,
    generation: u64,
}

impl CandleFeed {
    pub fn new(option: CandleChartOption) -> Self {
        Self { option, ..Self::default() }
    }

    pub fn option(&self) -> &CandleChartOption {
        &self.option
    }

    pub fn history(&self) -> &CandleHistory {
        &self.history
    }

    pub fn is_fetching(&self) -> bool {
        self.fetching
    }

    /// The last older-history request failed or was rejected; no new one
    /// starts until [`retry_older`](Self::retry_older).
    pub fn older_failed(&self) -> bool {
        self.older_failed
    }

    pub fn retry_older(&mut self) {
        self.older_failed = false;
    }

    /// Switch to another series, dropping everything loaded so far.
    pub fn reset(&mut self, option: CandleChartOption) {
        self.option = option;
        self.history = CandleHistory::default();
        self.fetching = false;
        self.older_failed = false;
        self.resync = false;
        self.generation += 1;
    }

    pub fn begin_initial(&mut self) -> FetchTicket {
        self.fetching = true;
        self.ticket(FetchKind::Initial, MAX_FETCH_CANDLE_COUNT, None)
    }

    /// Ticket for the page of candles older than the oldest loaded one.
    ///
    /// `None` while another request is running, before the first page, after
    /// a failure, or once upstream has nothing older.
    pub fn begin_older(&mut self) -> Option<FetchTicket> {
        if self.fetching || self.older_failed || self.history.is_exhausted() {
            return None;
        }
        let cursor = self.history.oldest()?.clone();
        self.fetching = true;
        Some(self.ticket(FetchKind::Older, MAX_FETCH_CANDLE_COUNT, Some(cursor)))
    }

    /// Ticket for the periodic refresh of the newest candles.
    ///
    /// Refreshes are not guarded. With nothing loaded yet the refresh retries
    /// the first page instead, unless that is still running. After a
    /// [`FeedUpdate::Gap`] it asks for a full newest page until one arrives.
    pub fn begin_refresh(&mut self) -> Option<FetchTicket> {
        if self.history.is_empty() {
            return (!self.fetching).then(|| self.begin_initial());
        }
        if self.resync {
            return Some(self.ticket(FetchKind::Resync, MAX_FETCH_CANDLE_COUNT, None));
        }
        Some(self.ticket(FetchKind::Refresh, REFRESH_CANDLE_COUNT, None))
    }

    pub fn needs_resync(&self) -> bool {
        self.resync
    }

    pub fn finish(&mut self, ticket: FetchTicket, result: AppResult<Vec<Candle>>) -> FeedUpdate {
        if ticket.generation != self.generation {
            return FeedUpdate::Stale;
        }
        if matches!(ticket.kind, FetchKind::Initial | FetchKind::Older) {
            self.fetching = false;
        }
        let batch = match result {
            Ok(batch) => batch,
            Err(e) => {
                self.older_failed |= ticket.kind == FetchKind::Older;
                return FeedUpdate::Failed(e);
            }
        };
        match ticket.kind {
            FetchKind::Initial => {
                self.history = CandleHistory::default();
                FeedUpdate::Loaded(self.history.merge_older(batch).unwrap_or_default())
            }
            FetchKind::Older => match self.history.merge_older(batch) {
                Some(added) => FeedUpdate::Appended(added),
                None => {
                    self.older_failed = true;
                    FeedUpdate::Rejected
                }
            },
            FetchKind::Refresh => match self.history.merge_latest(batch) {
                Some(added) => FeedUpdate::Prepended(added),
                None => {
                    self.resync = true;
                    FeedUpdate::Gap
                }
            },
            FetchKind::Resync => {
                self.resync = false;
                if self.history.overlaps_latest(&batch) {
                    return FeedUpdate::Prepended(self.history.merge_latest(batch).unwrap_or_default());
                }
                // older paging restarts from the new page; answers still in flight are dropped
                self.history = CandleHistory::default();
                self.fetching = false;
                self.older_failed = false;
                self.generation += 1;
                FeedUpdate::Replaced(self.history.merge_older(batch).unwrap_or_default())
            }
        }
    }

    fn ticket(&self, kind: FetchKind, count: usize, cursor: Option<Candle>) -> FetchTicket {
        FetchTicket { kind, option: self.option.clone(), count, cursor, generation: self.generation }
    }
}

/// Runs candle requests against a repository.
pub struct CandleHistoryUseCase<R: CandleRepository> {
    repository: R,
}

impl<R: CandleRepository> CandleHistoryUseCase<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, ticket: &FetchTicket) -> AppResult<Vec<Candle>> {
        let result = self
            .repository
            .fetch_candles(ticket.option.period, &ticket.option.market, ticket.count, ticket.cursor.as_ref())
            .await;
        if let Err(e) = &result {
            crate::log_error!(
                LogComponent::Application("CandleHistory"),
                "❌ {:?} fetch for {} failed: {e}",
                ticket.kind,
                ticket.option
            );
        }
        result
    }
}
