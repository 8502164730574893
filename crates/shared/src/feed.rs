use crate::error::FeedError;
use crate::models::PhotoRecord;

/// What the viewer is currently showing. `Empty` is a distinct UI state —
/// the empty-state message, never the error banner.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedPhase {
    Loading,
    Ready(Vec<PhotoRecord>),
    Empty,
    Failed(FeedError),
}

impl FeedPhase {
    /// Classify a load result. A successful response with zero records is
    /// `Empty`, not `Ready`.
    pub fn classify(result: Result<Vec<PhotoRecord>, FeedError>) -> Self {
        match result {
            Ok(records) if records.is_empty() => FeedPhase::Empty,
            Ok(records) => FeedPhase::Ready(records),
            Err(err) => FeedPhase::Failed(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64) -> PhotoRecord {
        PhotoRecord {
            id,
            image_url: None,
            latitude: Some(-23.5),
            longitude: Some(-46.6),
            created_at: None,
        }
    }

    #[test]
    fn test_classify_empty_response() {
        assert_eq!(FeedPhase::classify(Ok(vec![])), FeedPhase::Empty);
    }

    #[test]
    fn test_classify_non_empty_response() {
        let phase = FeedPhase::classify(Ok(vec![record(1), record(2)]));
        match phase {
            FeedPhase::Ready(records) => assert_eq!(records.len(), 2),
            other => panic!("expected Ready, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_failure() {
        let phase = FeedPhase::classify(Err(FeedError::Http { status: 500 }));
        assert_eq!(phase, FeedPhase::Failed(FeedError::Http { status: 500 }));
    }
}
