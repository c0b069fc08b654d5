use cardstmt_core::StatementProcessor;

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub processor: StatementProcessor,
    pub max_file_size: usize,
}
