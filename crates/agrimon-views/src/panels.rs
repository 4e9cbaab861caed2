//! Dashboard panels: the price fluctuation chart and the production map.
//!
//! A panel never watches its inputs. The caller starts a request with
//! `begin`, performs it, and hands the result to `complete`; only the
//! response to the most recent `begin` changes what the panel shows.

use crate::sequence::{RequestSequencer, Ticket};
use agrimon_charts::{PriceChart, ProductionMap, StatusCard, StatusCounts};
use agrimon_client::{AnalyticsApi, PriceQuery, ProductionQuery};
use agrimon_common::{format_date_id, PriceFluctuation, ProductionGrouping, Result};
use agrimon_config::{ChartSettings, GroupColors, StatusCardColors};
use chrono::{Local, NaiveDate};
use tracing::{debug, warn};

/// A request started by a panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest<Q> {
    /// Ticket to hand back with the response.
    pub ticket: Ticket,
    /// What to ask the API.
    pub query: Q,
}

/// Loading flag, content and error message of one panel.
#[derive(Debug)]
pub struct PanelState<T> {
    sequencer: RequestSequencer,
    loading: bool,
    content: Option<T>,
    error: Option<String>,
    updated_on: Option<NaiveDate>,
}

impl<T> Default for PanelState<T> {
    fn default() -> Self {
        Self {
            sequencer: RequestSequencer::new(),
            loading: false,
            content: None,
            error: None,
            updated_on: None,
        }
    }
}

impl<T> PanelState<T> {
    /// Mark a new request as in flight.
    pub fn begin(&mut self) -> Ticket {
        self.loading = true;
        self.error = None;
        self.sequencer.issue()
    }

    /// Apply a response. Returns false, and changes nothing, for a stale ticket.
    pub fn complete<R>(
        &mut self,
        ticket: Ticket,
        result: Result<R>,
        build: impl FnOnce(R) -> T,
    ) -> bool {
        self.complete_on(ticket, result, build, Local::now().date_naive())
    }

    fn complete_on<R>(
        &mut self,
        ticket: Ticket,
        result: Result<R>,
        build: impl FnOnce(R) -> T,
        today: NaiveDate,
    ) -> bool {
        if !self.sequencer.is_latest(ticket) {
            debug!(ticket = ticket.number(), "Dropping stale response");
            return false;
        }
        self.loading = false;
        match result {
            Ok(value) => {
                self.content = Some(build(value));
                self.error = None;
                self.updated_on = Some(today);
            }
            Err(err) => {
                warn!(ticket = ticket.number(), error = %err, "Panel request failed");
                self.content = None;
                self.error = Some(err.user_message());
            }
        }
        true
    }

    /// True while the latest request is in flight.
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// What the panel shows, if the latest request succeeded.
    pub const fn content(&self) -> Option<&T> {
        self.content.as_ref()
    }

    /// Message for the latest failed request.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Date of the last successful response.
    pub const fn updated_on(&self) -> Option<NaiveDate> {
        self.updated_on
    }

    /// Caption under the panel title, e.g. `Terakhir update: 1 Agustus 2025`.
    pub fn last_update(&self) -> Option<String> {
        self.updated_on
            .map(|date| format!("Terakhir update: {}", format_date_id(date)))
    }
}

/// Monthly price fluctuation chart.
#[derive(Debug)]
pub struct PricePanel {
    settings: ChartSettings,
    query: PriceQuery,
    state: PanelState<PriceChart>,
}

impl PricePanel {
    /// Create an empty panel for `query`.
    pub fn new(settings: ChartSettings, query: PriceQuery) -> Self {
        Self {
            settings,
            query,
            state: PanelState::default(),
        }
    }

    /// Query of the most recent request.
    pub const fn query(&self) -> &PriceQuery {
        &self.query
    }

    /// Start a request for `query`.
    pub fn begin(&mut self, query: PriceQuery) -> PendingRequest<PriceQuery> {
        self.query = query.clone();
        PendingRequest {
            ticket: self.state.begin(),
            query,
        }
    }

    /// Apply the response for `ticket`.
    pub fn complete(&mut self, ticket: Ticket, result: Result<PriceFluctuation>) -> bool {
        let settings = &self.settings;
        self.state
            .complete(ticket, result, |data| PriceChart::new(&data, settings))
    }

    /// Fetch `query` and apply the response.
    pub async fn load(&mut self, api: &dyn AnalyticsApi, query: PriceQuery) -> bool {
        let pending = self.begin(query);
        let result = api.price_fluctuation(&pending.query).await;
        self.complete(pending.ticket, result)
    }

    /// Panel state.
    pub const fn state(&self) -> &PanelState<PriceChart> {
        &self.state
    }

    /// The chart, if the latest request succeeded.
    pub const fn chart(&self) -> Option<&PriceChart> {
        self.state.content()
    }
}

/// A production grouping with its map styling and status counts.
#[derive(Debug, Clone)]
pub struct ProductionDisplay {
    /// Raw grouping result.
    pub grouping: ProductionGrouping,
    /// Region lookup for the map.
    pub map: ProductionMap,
    /// Counts per production group.
    pub counts: StatusCounts,
}

impl ProductionDisplay {
    /// Build the map and counters for `grouping`.
    pub fn new(grouping: ProductionGrouping, colors: &GroupColors) -> Self {
        Self {
            map: ProductionMap::from_grouping(&grouping, colors),
            counts: StatusCounts::from_grouping(&grouping),
            grouping,
        }
    }
}

/// Production distribution map and status counters.
#[derive(Debug)]
pub struct ProductionPanel {
    colors: GroupColors,
    card_colors: StatusCardColors,
    query: ProductionQuery,
    state: PanelState<ProductionDisplay>,
}

impl ProductionPanel {
    /// Create an empty panel for `query`.
    pub fn new(settings: &ChartSettings, query: ProductionQuery) -> Self {
        Self {
            colors: settings.groups.clone(),
            card_colors: settings.status.clone(),
            query,
            state: PanelState::default(),
        }
    }

    /// Query of the most recent request.
    pub const fn query(&self) -> &ProductionQuery {
        &self.query
    }

    /// Start a request for `query`.
    pub fn begin(&mut self, query: ProductionQuery) -> PendingRequest<ProductionQuery> {
        self.query = query.clone();
        PendingRequest {
            ticket: self.state.begin(),
            query,
        }
    }

    /// Apply the response for `ticket`.
    pub fn complete(&mut self, ticket: Ticket, result: Result<ProductionGrouping>) -> bool {
        let colors = &self.colors;
        self.state
            .complete(ticket, result, |grouping| ProductionDisplay::new(grouping, colors))
    }

    /// Fetch `query` and apply the response.
    pub async fn load(&mut self, api: &dyn AnalyticsApi, query: ProductionQuery) -> bool {
        let pending = self.begin(query);
        let result = api.production_grouping(&pending.query).await;
        self.complete(pending.ticket, result)
    }

    /// Panel state.
    pub const fn state(&self) -> &PanelState<ProductionDisplay> {
        &self.state
    }

    /// Map and counters, if the latest request succeeded.
    pub const fn display(&self) -> Option<&ProductionDisplay> {
        self.state.content()
    }

    /// Status cards; all zero until a grouping has loaded.
    pub fn status_cards(&self) -> [StatusCard; 3] {
        self.display()
            .map(|d| d.counts)
            .unwrap_or_default()
            .cards(&self.card_colors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agrimon_common::test_utils::api_fixtures;
    use agrimon_common::{AgriError, MonthRange, Trend};
    use agrimon_config::Config;

    fn data<T: serde::de::DeserializeOwned>(json: &str) -> T {
        agrimon_client::decode_payload(json).unwrap()
    }

    fn price_query(komoditas: &str) -> PriceQuery {
        PriceQuery {
            komoditas: komoditas.to_string(),
            tahun: 2024,
            tipe_harga: "konsumen".to_string(),
        }
    }

    fn production_query() -> ProductionQuery {
        ProductionQuery {
            komoditas: "PADI".to_string(),
            tahun: 2025,
            periode: MonthRange::full_year(),
        }
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut panel = PricePanel::new(Config::default().chart, price_query("Beras Medium"));
        let first = panel.begin(price_query("Beras Medium"));
        let second = panel.begin(price_query("Beras Premium"));

        let mut premium: PriceFluctuation = data(api_fixtures::price_fluctuation_json());
        premium.komoditas = "Beras Premium".to_string();
        assert!(panel.complete(second.ticket, Ok(premium)));

        let medium: PriceFluctuation = data(api_fixtures::price_fluctuation_json());
        assert!(!panel.complete(first.ticket, Ok(medium)));

        let chart = panel.chart().unwrap();
        assert!(chart.title.contains("Beras Premium"));
        assert!(!panel.state().is_loading());
    }

    #[test]
    fn test_loading_until_latest_completes() {
        let mut panel = PricePanel::new(Config::default().chart, price_query("Beras Medium"));
        let first = panel.begin(price_query("Beras Medium"));
        let _second = panel.begin(price_query("Beras Medium"));

        panel.complete(first.ticket, Err(AgriError::network("Connection failed")));
        assert!(panel.state().is_loading());
        assert_eq!(panel.state().error(), None);
    }

    #[test]
    fn test_failure_replaces_content_with_message() {
        let mut panel = PricePanel::new(Config::default().chart, price_query("Beras Medium"));
        let ok = panel.begin(price_query("Beras Medium"));
        panel.complete(ok.ticket, Ok(data(api_fixtures::price_fluctuation_json())));
        assert_eq!(panel.chart().map(|c| c.trend), Some(Trend::Naik));

        let failing = panel.begin(price_query("Beras Medium"));
        panel.complete(
            failing.ticket,
            Err(AgriError::api_with_status("HTTP error! status: 500", 500)),
        );
        assert!(panel.chart().is_none());
        assert_eq!(panel.state().error(), Some("HTTP error! status: 500"));
    }

    #[test]
    fn test_last_update_follows_successful_response() {
        let mut state: PanelState<u32> = PanelState::default();
        assert_eq!(state.last_update(), None);

        let day = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
        let ticket = state.begin();
        assert!(state.complete_on(ticket, Ok(7), |v| v, day));
        assert_eq!(state.updated_on(), Some(day));
        assert_eq!(
            state.last_update().as_deref(),
            Some("Terakhir update: 1 Agustus 2025")
        );

        let later = NaiveDate::from_ymd_opt(2025, 8, 2).unwrap();
        let ticket = state.begin();
        let failed: Result<u32> = Err(AgriError::network("Connection failed"));
        state.complete_on(ticket, failed, |v| v, later);
        assert_eq!(state.updated_on(), Some(day));
    }

    #[test]
    fn test_production_cards() {
        let settings = Config::default().chart;
        let mut panel = ProductionPanel::new(&settings, production_query());
        assert!(panel.status_cards().iter().all(|card| card.count == 0));

        let pending = panel.begin(production_query());
        panel.complete(pending.ticket, Ok(data(api_fixtures::production_grouping_json())));

        let cards = panel.status_cards();
        assert_eq!(cards[0].label, "Status : Banyak");
        assert_eq!(cards.iter().map(|c| c.count).sum::<u32>(), 3);
        assert_eq!(panel.display().unwrap().map.len(), 3);
    }
}
