//! Runs one parsed command against the configuration and the analytics API.

use crate::cli::{Command, UploadKind};
use crate::error::{AppError, AppResult};
use agrimon_client::{AnalyticsApi, UploadFile};
use agrimon_common::{format_grouped, format_percent, Month, MonthRange};
use agrimon_config::{Config, ConfigCache};
use agrimon_preview::{extract_merged_preview, extract_preview, MergedLayout, Workbook};
use agrimon_views::{
    DashboardFilters, DashboardView, ImportPriceView, ImportProductionView, PricePanel,
    ProductionPanel,
};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Command runner.
pub struct App<'a> {
    config: ConfigCache,
    api: &'a dyn AnalyticsApi,
}

impl<'a> App<'a> {
    /// Create a runner.
    pub fn new(config: Config, api: &'a dyn AnalyticsApi) -> Self {
        Self {
            config: ConfigCache::new(config),
            api,
        }
    }

    /// Configuration snapshot the next command runs with.
    pub fn config(&self) -> Arc<Config> {
        self.config.get()
    }

    /// Re-read the configuration file; the previous snapshot stays on failure.
    pub fn reload_config(&self, path: &Path) -> AppResult<()> {
        self.config.reload_from(path)?;
        Ok(())
    }

    /// Run `command`, writing human-readable output to `out`.
    #[instrument(skip_all)]
    pub async fn run(&self, command: Command, out: &mut dyn Write) -> AppResult<()> {
        match command {
            Command::Preview { file, merged, rows } => self.preview(&file, merged, rows, out),
            Command::Prices {
                komoditas,
                tahun,
                tipe_harga,
                out: svg_path,
            } => {
                self.prices(komoditas, tahun, tipe_harga, svg_path.as_deref(), out)
                    .await
            }
            Command::Production {
                komoditas,
                tahun,
                bulan_mulai,
                bulan_akhir,
            } => {
                let periode = MonthRange::new(Month::new(bulan_mulai)?, Month::new(bulan_akhir)?)?;
                self.production(komoditas, tahun, periode, out).await
            }
            Command::Metadata => self.metadata(out).await,
            Command::Upload { kind } => self.upload(kind, out).await,
        }
    }

    fn defaults(&self) -> DashboardFilters {
        DashboardFilters::from(&self.config().filters)
    }

    fn preview(
        &self,
        file: &Path,
        merged: bool,
        rows: Option<usize>,
        out: &mut dyn Write,
    ) -> AppResult<()> {
        let config = self.config();
        let max_rows = rows.unwrap_or(config.preview.max_rows);
        if max_rows == 0 {
            return Err(AppError::InvalidArgument("--rows must be at least 1".to_string()));
        }

        let workbook = Workbook::open(file).map_err(agrimon_common::AgriError::from)?;
        let preview = if merged {
            let layout = MergedLayout::from(&config.preview.merged);
            extract_merged_preview(&workbook, &layout, max_rows)
        } else {
            extract_preview(&workbook, max_rows)
        }
        .map_err(agrimon_common::AgriError::from)?;

        write_out(out, &preview.to_table())?;
        write_out(
            out,
            &format!(
                "Menampilkan {} dari {} baris\n",
                preview.rows.len(),
                preview.total_rows
            ),
        )
    }

    async fn prices(
        &self,
        komoditas: Option<String>,
        tahun: Option<i32>,
        tipe_harga: Option<String>,
        svg_path: Option<&Path>,
        out: &mut dyn Write,
    ) -> AppResult<()> {
        let mut filters = self.defaults();
        if let Some(komoditas) = komoditas {
            filters.commodity = komoditas;
        }
        if let Some(tahun) = tahun {
            filters.year = tahun;
        }
        if let Some(tipe_harga) = tipe_harga {
            filters.price_type = tipe_harga;
        }

        let query = filters.price_query();
        let mut panel = PricePanel::new(self.config().chart.clone(), query.clone());
        panel.load(self.api, query).await;

        let Some(chart) = panel.chart() else {
            return Err(panel_error(panel.state().error()));
        };
        if chart.is_empty() {
            warn!("Price analysis returned no monthly statistics");
        }

        write_out(out, &format!("{}\n{}\n", chart.title, chart.summary()))?;
        if let Some(caption) = panel.state().last_update() {
            write_out(out, &format!("{caption}\n"))?;
        }
        if let Some(path) = svg_path {
            std::fs::write(path, chart.to_svg()).map_err(|e| AppError::io(path, e))?;
            info!(path = %path.display(), "Wrote price chart");
            write_out(out, &format!("Grafik disimpan ke {}\n", path.display()))?;
        }
        Ok(())
    }

    async fn production(
        &self,
        komoditas: Option<String>,
        tahun: Option<i32>,
        periode: MonthRange,
        out: &mut dyn Write,
    ) -> AppResult<()> {
        let mut filters = self.defaults();
        if let Some(komoditas) = komoditas {
            filters.production_commodity = komoditas;
        }
        if let Some(tahun) = tahun {
            filters.year = tahun;
        }
        filters.period = periode;

        let query = filters.production_query();
        let mut panel = ProductionPanel::new(&self.config().chart, query.clone());
        panel.load(self.api, query).await;

        let Some(display) = panel.display() else {
            return Err(panel_error(panel.state().error()));
        };

        let mut text = format!(
            "Produksi {} {} ({})\n",
            display.grouping.komoditas, display.grouping.tahun, periode
        );
        if let Some(caption) = panel.state().last_update() {
            text.push_str(&caption);
            text.push('\n');
        }
        for card in panel.status_cards() {
            text.push_str(&format!("{}: {}\n", card.label, card.count));
        }
        for row in &display.grouping.detail_kecamatan {
            let style = display.map.style_for(&row.kecamatan);
            text.push_str(&format!(
                "- {} [{}] {} ton, realisasi {}\n",
                row.kecamatan,
                style.group,
                format_grouped(row.produksi_periode, 0),
                format_percent(row.realisasi_periode)
            ));
        }
        write_out(out, &text)
    }

    async fn metadata(&self, out: &mut dyn Write) -> AppResult<()> {
        let mut view = DashboardView::new(&self.config());
        view.load_metadata(self.api).await;
        for message in view.metadata_errors() {
            warn!(message = %message, "Metadata unavailable, showing defaults");
        }

        let options = view.options();
        let join = |list: &[agrimon_common::FilterOption]| {
            list.iter()
                .map(|o| o.label.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };
        write_out(
            out,
            &format!(
                "Komoditas: {}\nTahun: {}\nTipe harga: {}\n",
                join(&options.commodities),
                join(&options.years),
                join(&options.price_types)
            ),
        )
    }

    async fn upload(&self, kind: UploadKind, out: &mut dyn Write) -> AppResult<()> {
        let message = match kind {
            UploadKind::Harga { file } => {
                let mut view = ImportPriceView::new(&self.config().preview);
                view.select_file(read_upload(&file)?)?;
                view.submit(self.api).await?;
                view.form().success_message().map(str::to_string)
            }
            UploadKind::Produksi {
                file,
                komoditas,
                tahun,
            } => {
                let mut view = ImportProductionView::new(&self.config().preview);
                view.set_commodity(&komoditas);
                view.set_year(Some(tahun));
                view.select_file(read_upload(&file)?)?;
                view.submit(self.api).await?;
                view.form().success_message().map(str::to_string)
            }
        };
        write_out(out, &format!("{}\n", message.unwrap_or_default()))
    }
}

fn read_upload(path: &Path) -> AppResult<UploadFile> {
    let bytes = std::fs::read(path).map_err(|e| AppError::io(path, e))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();
    Ok(UploadFile::new(file_name, bytes))
}

fn panel_error(message: Option<&str>) -> AppError {
    AppError::Panel(message.unwrap_or("Request was not completed").to_string())
}

fn write_out(out: &mut dyn Write, text: &str) -> AppResult<()> {
    out.write_all(text.as_bytes())
        .map_err(|e| AppError::io("<stdout>", e))
}
