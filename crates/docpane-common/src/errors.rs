#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("webview error: {0}")]
    WebView(String),

    #[error("surface script error: {0}")]
    Script(String),

    #[error("no window available for surface creation")]
    NoWindow,
}

#[derive(Debug, thiserror::Error)]
pub enum CoordinatorError {
    #[error("render request failed: {0}")]
    Render(String),

    #[error("event channel closed")]
    ChannelClosed,
}

#[derive(Debug, thiserror::Error)]
pub enum DocpaneError {
    #[error(transparent)]
    Surface(#[from] SurfaceError),

    #[error(transparent)]
    Coordinator(#[from] CoordinatorError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}
