//! The dashboard: filter selections, option lists and both panels.

use crate::panels::{PricePanel, ProductionPanel};
use agrimon_charts::StatusCard;
use agrimon_client::{AnalyticsApi, MetadataKind, PriceQuery, ProductionQuery};
use agrimon_common::{FilterOption, MonthRange};
use agrimon_config::{Config, FilterDefaults};
use tracing::{info, instrument, warn};

/// Choices offered by the dashboard drop-downs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOptions {
    /// Price commodities.
    pub commodities: Vec<FilterOption>,
    /// Production commodities.
    pub production_commodities: Vec<FilterOption>,
    /// Years.
    pub years: Vec<FilterOption>,
    /// Price types.
    pub price_types: Vec<FilterOption>,
    /// Sub-district choices.
    pub regions: Vec<FilterOption>,
}

impl From<&FilterDefaults> for FilterOptions {
    fn from(defaults: &FilterDefaults) -> Self {
        Self {
            commodities: defaults.commodities.clone(),
            production_commodities: defaults.production_commodities.clone(),
            years: defaults.years.clone(),
            price_types: defaults.price_types.clone(),
            regions: defaults.regions.clone(),
        }
    }
}

impl FilterOptions {
    /// Replace one list with values served by the metadata endpoint.
    ///
    /// Known values keep their configured label.
    pub fn apply_metadata(&mut self, kind: MetadataKind, values: Vec<String>) {
        let target = match kind {
            MetadataKind::PriceCommodities => &mut self.commodities,
            MetadataKind::PriceYears => &mut self.years,
            MetadataKind::PriceTypes => &mut self.price_types,
        };
        let options = values
            .into_iter()
            .map(|value| {
                target
                    .iter()
                    .find(|o| o.value.eq_ignore_ascii_case(&value))
                    .map_or_else(|| FilterOption::plain(value.clone()), |known| {
                        FilterOption::new(value.clone(), known.label.clone())
                    })
            })
            .collect();
        *target = options;
    }
}

/// Current filter selections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardFilters {
    /// Price commodity.
    pub commodity: String,
    /// Price type.
    pub price_type: String,
    /// Year of both analyses.
    pub year: i32,
    /// Production commodity.
    pub production_commodity: String,
    /// Production period.
    pub period: MonthRange,
    /// Selected sub-district.
    pub region: String,
}

impl From<&FilterDefaults> for DashboardFilters {
    fn from(defaults: &FilterDefaults) -> Self {
        Self {
            commodity: defaults.default_commodity.clone(),
            price_type: defaults.default_price_type.clone(),
            year: defaults.default_year,
            production_commodity: defaults.default_production_commodity.clone(),
            period: MonthRange::full_year(),
            region: defaults
                .regions
                .first()
                .map(|r| r.value.clone())
                .unwrap_or_default(),
        }
    }
}

impl DashboardFilters {
    /// Query for the price panel.
    pub fn price_query(&self) -> PriceQuery {
        PriceQuery {
            komoditas: self.commodity.clone(),
            tahun: self.year,
            tipe_harga: self.price_type.clone(),
        }
    }

    /// Query for the production panel.
    pub fn production_query(&self) -> ProductionQuery {
        ProductionQuery {
            komoditas: self.production_commodity.clone(),
            tahun: self.year,
            periode: self.period,
        }
    }
}

/// The dashboard page.
#[derive(Debug)]
pub struct DashboardView {
    filters: DashboardFilters,
    options: FilterOptions,
    price: PricePanel,
    production: ProductionPanel,
    metadata_errors: Vec<String>,
}

impl DashboardView {
    /// Build from configuration; option lists start at the configured defaults.
    pub fn new(config: &Config) -> Self {
        let filters = DashboardFilters::from(&config.filters);
        Self {
            options: FilterOptions::from(&config.filters),
            price: PricePanel::new(config.chart.clone(), filters.price_query()),
            production: ProductionPanel::new(&config.chart, filters.production_query()),
            filters,
            metadata_errors: Vec::new(),
        }
    }

    /// Current selections.
    pub const fn filters(&self) -> &DashboardFilters {
        &self.filters
    }

    /// Drop-down choices.
    pub const fn options(&self) -> &FilterOptions {
        &self.options
    }

    /// Price chart panel.
    pub const fn price_panel(&self) -> &PricePanel {
        &self.price
    }

    /// Production map panel.
    pub const fn production_panel(&self) -> &ProductionPanel {
        &self.production
    }

    /// Messages from metadata lists that failed to load.
    pub fn metadata_errors(&self) -> &[String] {
        &self.metadata_errors
    }

    /// Status counter cards.
    pub fn status_cards(&self) -> [StatusCard; 3] {
        self.production.status_cards()
    }

    /// Refresh the option lists. A list that fails to load keeps its defaults.
    #[instrument(skip_all)]
    pub async fn load_metadata(&mut self, api: &dyn AnalyticsApi) {
        self.metadata_errors.clear();
        for kind in MetadataKind::ALL {
            match api.metadata(kind).await {
                Ok(values) if values.is_empty() => {
                    warn!(%kind, "Metadata list is empty, keeping defaults");
                }
                Ok(values) => {
                    info!(%kind, count = values.len(), "Loaded metadata");
                    self.options.apply_metadata(kind, values);
                }
                Err(err) => {
                    warn!(%kind, error = %err, "Failed to load metadata, keeping defaults");
                    self.metadata_errors.push(err.user_message());
                }
            }
        }
        self.keep_selections_valid();
    }

    /// Fall back to the first option when a selection disappeared from its list.
    fn keep_selections_valid(&mut self) {
        fn pick(current: &mut String, options: &[FilterOption]) {
            if !options.is_empty() && !options.iter().any(|o| o.value == *current) {
                current.clone_from(&options[0].value);
            }
        }
        pick(&mut self.filters.commodity, &self.options.commodities);
        pick(&mut self.filters.price_type, &self.options.price_types);

        let year = self.filters.year.to_string();
        if !self.options.years.iter().any(|o| o.value == year) {
            if let Some(first) = self
                .options
                .years
                .iter()
                .find_map(|o| o.value.trim().parse::<i32>().ok())
            {
                self.filters.year = first;
            }
        }
    }

    /// Change the price filters and reload the chart.
    pub async fn set_price_filters(
        &mut self,
        api: &dyn AnalyticsApi,
        commodity: &str,
        price_type: &str,
        year: i32,
    ) -> bool {
        self.filters.commodity = commodity.to_string();
        self.filters.price_type = price_type.to_string();
        self.filters.year = year;
        self.price.load(api, self.filters.price_query()).await
    }

    /// Change the production filters and reload the map.
    pub async fn set_production_filters(
        &mut self,
        api: &dyn AnalyticsApi,
        commodity: &str,
        period: MonthRange,
    ) -> bool {
        self.filters.production_commodity = commodity.to_string();
        self.filters.period = period;
        self.production
            .load(api, self.filters.production_query())
            .await
    }

    /// Change the selected sub-district. Nothing is fetched.
    pub fn set_region(&mut self, region: &str) {
        self.filters.region = region.to_string();
    }

    /// Load both panels for the current filters, concurrently.
    #[instrument(skip_all)]
    pub async fn refresh(&mut self, api: &dyn AnalyticsApi) {
        let price_query = self.filters.price_query();
        let production_query = self.filters.production_query();
        futures::join!(
            self.price.load(api, price_query),
            self.production.load(api, production_query)
        );
    }
}
