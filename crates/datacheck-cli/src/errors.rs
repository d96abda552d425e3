use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("No configuration file given: pass --config <FILE>, or use the 'rules' subcommand")]
    MissingConfig,
    #[error("No dataset to validate: set [dataset].path in the config or pass --data")]
    MissingDataset,
    #[error("csv file not found: '{path}'")]
    FileNotFound { path: String },
    #[error("Delimiter must be a single ASCII character, found '{value}'")]
    InvalidDelimiter { value: String },
}
