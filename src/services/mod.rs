// mail-triage Core Services

pub mod batch_runner;
pub mod classifier_client;
pub mod config_store;
pub mod cost_estimator;
pub mod email_splitter;

pub use batch_runner::{BatchError, BatchRunner, BatchState};
pub use classifier_client::{Classifier, ClassifierClient, ClientError, DEFAULT_TIMEOUT_SECS};
pub use config_store::{AppConfig, ConfigStore};
pub use cost_estimator::estimate_cost;
pub use email_splitter::split_emails;
