use crate::config::{Endpoints, OutputFormat};
use crate::domain::model::{Anmeldung, Dozent, Kurs, Raum, Teilnehmer};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Read-only access to the five collections of the data service.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn fetch_dozenten(&self) -> Result<Vec<Dozent>>;
    async fn fetch_teilnehmer(&self) -> Result<Vec<Teilnehmer>>;
    async fn fetch_raeume(&self) -> Result<Vec<Raum>>;
    async fn fetch_kurse(&self) -> Result<Vec<Kurs>>;
    async fn fetch_anmeldungen(&self) -> Result<Vec<Anmeldung>>;
}

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn endpoints(&self) -> &Endpoints;
    fn headers(&self) -> Vec<(String, String)>;
    fn locale(&self) -> &str;
    fn output_format(&self) -> OutputFormat;
    fn today(&self) -> Option<NaiveDate>;
    fn output_path(&self) -> Option<&str>;
}
