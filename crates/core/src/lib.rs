pub mod catalog;
pub mod checker;
pub mod config;
pub mod notify;
pub mod store;
pub mod testing;

pub use catalog::{CatalogError, ShowCatalog, ShowDetails, ShowSummary, TmdbClient, TmdbConfig};
pub use checker::{CheckError, FetchFailure, UpdateChecker, UpdateReport};
pub use config::{
    load_config, load_config_from_str, validate_config, CatalogConfig, Config, ConfigError,
    FailurePolicy, SanitizedConfig, DEFAULT_CONFIG_FILE,
};
pub use notify::{notify_updates, ConsoleNotifier, Notification, Notifier};
pub use store::{
    CsvShowStore, LoadOutcome, SeasonDelta, ShowRecord, ShowStore, StoreError, UpsertOutcome,
    SHOW_FIELDS,
};
