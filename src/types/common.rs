//! Filter outcomes

/// Outcome of filtering one content occurrence.
///
/// `modified == false` means the artifact is semantically the input. For
/// images an absent artifact on a modified result means the whole image
/// is to be removed.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterResult<T> {
    pub modified: bool,
    pub artifact: Option<T>,
}

impl<T> FilterResult<T> {
    pub fn new(modified: bool, artifact: Option<T>) -> Self {
        Self { modified, artifact }
    }

    pub fn unmodified(artifact: T) -> Self {
        Self::new(false, Some(artifact))
    }

    pub fn modified(artifact: T) -> Self {
        Self::new(true, Some(artifact))
    }

    /// Modified with nothing left to keep
    pub fn removed() -> Self {
        Self::new(true, None)
    }

    pub fn is_removed(&self) -> bool {
        self.modified && self.artifact.is_none()
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FilterResult<U> {
        FilterResult::new(self.modified, self.artifact.map(f))
    }
}
