use thiserror::Error;

#[derive(Error, Debug)]
pub enum LandmarkError {
    #[error("expected {expected} landmarks, found {found}")]
    WrongCount { expected: usize, found: usize },
    #[error("malformed landmark frame: {0}")]
    Json(#[from] serde_json::Error),
    #[error("landmark feed line {line}: {source}")]
    AtLine {
        line: usize,
        #[source]
        source: Box<LandmarkError>,
    },
    #[error("failed to read landmark feed: {0}")]
    Io(#[from] std::io::Error),
}
