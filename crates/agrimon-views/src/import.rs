//! Price and production import pages.
//!
//! Choosing a file validates it against the configured limits and builds a
//! preview; submitting uploads the original bytes. Every outcome ends up as
//! either a success or an error message on the form.

use agrimon_client::{AnalyticsApi, ProductionUpload, UploadFile};
use agrimon_common::AgriError;
use agrimon_config::PreviewSettings;
use agrimon_preview::{preview_bytes, HeaderLayout, Preview, PreviewError};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// Shown after a price sheet was accepted.
pub const PRICE_SUCCESS: &str = "Data harga berhasil diimport!";
/// Shown after a production sheet was accepted.
pub const PRODUCTION_SUCCESS: &str = "Data produksi berhasil diimport!";
/// Shown when the server rejects an upload without saying why.
pub const UPLOAD_FALLBACK: &str = "Terjadi kesalahan saat mengupload file";

/// Why an import cannot go ahead.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Submit pressed without a file.
    #[error("Silakan pilih file terlebih dahulu")]
    NoFile,

    /// The file produced no preview rows.
    #[error("Tidak ada data untuk diimport")]
    NoData,

    /// Production import without a commodity.
    #[error("Silakan pilih komoditas terlebih dahulu")]
    MissingCommodity,

    /// Production import without a year.
    #[error("Silakan pilih periode tahun terlebih dahulu")]
    MissingYear,

    /// The file is larger than allowed.
    #[error("Ukuran file melebihi batas maksimal {max_mb} MB")]
    TooLarge {
        /// Limit in whole megabytes.
        max_mb: u64,
    },

    /// The file extension is not accepted.
    #[error("Format file tidak didukung. Gunakan {accepted}")]
    UnsupportedExtension {
        /// Accepted extensions, comma separated.
        accepted: String,
    },

    /// The spreadsheet could not be previewed.
    #[error("{}", .0.user_message())]
    Preview(#[from] PreviewError),

    /// The server refused the upload.
    #[error("{0}")]
    Upload(String),
}

/// Size and extension limits applied before a file is parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRules {
    max_file_size_bytes: u64,
    accepted_extensions: Vec<String>,
}

impl From<&PreviewSettings> for FileRules {
    fn from(settings: &PreviewSettings) -> Self {
        Self {
            max_file_size_bytes: settings.max_file_size_bytes,
            accepted_extensions: settings
                .accepted_extensions
                .iter()
                .map(|e| e.to_ascii_lowercase())
                .collect(),
        }
    }
}

impl FileRules {
    /// Reject files that are too large or have an unaccepted extension.
    pub fn check(&self, file: &UploadFile) -> Result<(), ImportError> {
        if file.len() as u64 > self.max_file_size_bytes {
            return Err(ImportError::TooLarge {
                max_mb: self.max_file_size_bytes / (1024 * 1024),
            });
        }
        let extension = Path::new(&file.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e.to_ascii_lowercase()))
            .unwrap_or_default();
        if !self.accepted_extensions.contains(&extension) {
            return Err(ImportError::UnsupportedExtension {
                accepted: self.accepted_extensions.join(", "),
            });
        }
        Ok(())
    }
}

/// State shared by both import pages.
#[derive(Debug)]
pub struct ImportForm {
    rules: FileRules,
    max_rows: usize,
    layout: HeaderLayout,
    file: Option<UploadFile>,
    preview: Option<Preview>,
    loading: bool,
    success_message: Option<String>,
    error_message: Option<String>,
}

impl ImportForm {
    fn new(settings: &PreviewSettings, layout: HeaderLayout) -> Self {
        Self {
            rules: FileRules::from(settings),
            max_rows: settings.max_rows,
            layout,
            file: None,
            preview: None,
            loading: false,
            success_message: None,
            error_message: None,
        }
    }

    /// Take a newly chosen file and preview it.
    ///
    /// A file that breaks the size or extension rules is not kept. A file
    /// that fails to parse is kept, so submitting reports that there is no
    /// data to import.
    pub fn select_file(&mut self, file: UploadFile) -> Result<&Preview, ImportError> {
        self.success_message = None;
        self.error_message = None;
        self.preview = None;

        if let Err(err) = self.rules.check(&file) {
            warn!(file_name = %file.file_name, error = %err, "File rejected");
            self.file = None;
            return Err(self.fail(err));
        }

        let result = preview_bytes(&file.file_name, file.bytes.clone(), self.layout, self.max_rows);
        self.file = Some(file);
        match result {
            Ok(preview) => {
                debug!(
                    headers = preview.headers.len(),
                    rows = preview.rows.len(),
                    "Preview ready"
                );
                Ok(self.preview.insert(preview))
            }
            Err(err) => {
                warn!(error = %err, "Failed to preview file");
                Err(self.fail(err.into()))
            }
        }
    }

    /// Forget the file and its preview.
    pub fn clear(&mut self) {
        self.file = None;
        self.preview = None;
    }

    fn fail(&mut self, err: ImportError) -> ImportError {
        self.error_message = Some(err.to_string());
        err
    }

    fn ready_file(&self) -> Result<UploadFile, ImportError> {
        let file = self.file.as_ref().ok_or(ImportError::NoFile)?;
        if self.preview.as_ref().map_or(true, Preview::is_empty) {
            return Err(ImportError::NoData);
        }
        Ok(file.clone())
    }

    fn finish(
        &mut self,
        result: agrimon_common::Result<()>,
        success: &str,
    ) -> Result<(), ImportError> {
        self.loading = false;
        match result {
            Ok(()) => {
                info!("Import accepted");
                self.success_message = Some(success.to_string());
                self.clear();
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "Import failed");
                let message = match err {
                    AgriError::Serialization(_) => UPLOAD_FALLBACK.to_string(),
                    other => other.user_message(),
                };
                let message = if message.is_empty() {
                    UPLOAD_FALLBACK.to_string()
                } else {
                    message
                };
                Err(self.fail(ImportError::Upload(message)))
            }
        }
    }

    /// The chosen file.
    pub const fn file(&self) -> Option<&UploadFile> {
        self.file.as_ref()
    }

    /// Preview of the chosen file.
    pub const fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    /// True while an upload is in flight.
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message after a successful import.
    pub fn success_message(&self) -> Option<&str> {
        self.success_message.as_deref()
    }

    /// Message after a failed step.
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}

/// The "Import Data Harga" page.
#[derive(Debug)]
pub struct ImportPriceView {
    form: ImportForm,
}

impl ImportPriceView {
    /// Create an empty form; price sheets have one header row.
    pub fn new(settings: &PreviewSettings) -> Self {
        Self {
            form: ImportForm::new(settings, HeaderLayout::Simple),
        }
    }

    /// Form state.
    pub const fn form(&self) -> &ImportForm {
        &self.form
    }

    /// Choose a file and build its preview.
    pub fn select_file(&mut self, file: UploadFile) -> Result<&Preview, ImportError> {
        self.form.select_file(file)
    }

    /// Upload the chosen file.
    #[instrument(skip_all)]
    pub async fn submit(&mut self, api: &dyn AnalyticsApi) -> Result<(), ImportError> {
        self.form.success_message = None;
        self.form.error_message = None;
        let file = match self.form.ready_file() {
            Ok(file) => file,
            Err(err) => return Err(self.form.fail(err)),
        };

        self.form.loading = true;
        let result = api.upload_price(file).await.map(drop);
        self.form.finish(result, PRICE_SUCCESS)
    }
}

/// The "Import Data Produksi" page.
#[derive(Debug)]
pub struct ImportProductionView {
    form: ImportForm,
    commodity: Option<String>,
    year: Option<i32>,
}

impl ImportProductionView {
    /// Create an empty form; production sheets use the merged header layout.
    pub fn new(settings: &PreviewSettings) -> Self {
        Self {
            form: ImportForm::new(settings, HeaderLayout::merged_from(settings)),
            commodity: None,
            year: None,
        }
    }

    /// Form state.
    pub const fn form(&self) -> &ImportForm {
        &self.form
    }

    /// Select the commodity; blank clears it.
    pub fn set_commodity(&mut self, commodity: &str) {
        let commodity = commodity.trim();
        self.commodity = (!commodity.is_empty()).then(|| commodity.to_string());
    }

    /// Select the year.
    pub fn set_year(&mut self, year: Option<i32>) {
        self.year = year;
    }

    /// Choose a file and build its preview.
    pub fn select_file(&mut self, file: UploadFile) -> Result<&Preview, ImportError> {
        self.form.select_file(file)
    }

    /// Upload the chosen file with its commodity and year.
    #[instrument(skip_all, fields(commodity = ?self.commodity, year = ?self.year))]
    pub async fn submit(&mut self, api: &dyn AnalyticsApi) -> Result<(), ImportError> {
        self.form.success_message = None;
        self.form.error_message = None;
        let upload = match self.ready_upload() {
            Ok(upload) => upload,
            Err(err) => return Err(self.form.fail(err)),
        };

        self.form.loading = true;
        let result = api.upload_production(upload).await.map(drop);
        let outcome = self.form.finish(result, PRODUCTION_SUCCESS);
        if outcome.is_ok() {
            self.commodity = None;
            self.year = None;
        }
        outcome
    }

    fn ready_upload(&self) -> Result<ProductionUpload, ImportError> {
        let komoditas = self.commodity.clone().ok_or(ImportError::MissingCommodity)?;
        let tahun = self.year.ok_or(ImportError::MissingYear)?;
        Ok(ProductionUpload {
            file: self.form.ready_file()?,
            komoditas,
            tahun,
        })
    }
}
