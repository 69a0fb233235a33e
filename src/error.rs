use thiserror::Error;

use crate::input::InputError;
use crate::model::kpi::ConfigError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to write reports: {0}")]
    Output(#[from] std::io::Error),
}
