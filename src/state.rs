use std::sync::Arc;

use crate::airtable::AirtableClient;
use crate::config::Config;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: Config,
    pub airtable: AirtableClient,
}
