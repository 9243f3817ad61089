pub mod engine;
pub mod loader;
pub mod lookup;
pub mod render;
pub mod stats;
pub mod view;

pub use crate::domain::model::{Anmeldung, Collections, Dozent, Kurs, Raum, Teilnehmer};
pub use crate::domain::ports::{ConfigProvider, DataSource, Storage};
pub use crate::utils::error::Result;
