//! Crate-level error type for store operations.

/// Error returned when a [`CartStore`](crate::CartStore) operation fails.
///
/// Generic over `E`, the domain-specific error type produced by the
/// aggregate's command handler (e.g. "cart is empty").
#[derive(Debug, thiserror::Error)]
pub enum StoreError<E: std::error::Error + 'static> {
    /// Command rejected by aggregate validation.
    ///
    /// Wraps the domain-specific error, forwarding its `Display` and
    /// `Error` impls. These surface as user-visible prompts; no state or
    /// storage change has happened.
    #[error(transparent)]
    Domain(E),

    /// Persistence-port I/O failure.
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),
}

impl<E: std::error::Error + 'static> StoreError<E> {
    /// The domain error, if this is a validation rejection.
    pub fn as_domain(&self) -> Option<&E> {
        match self {
            Self::Domain(e) => Some(e),
            Self::Storage(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartError;

    #[test]
    fn domain_error_displays_inner() {
        let err: StoreError<CartError> = StoreError::Domain(CartError::EmptyCart);
        assert_eq!(err.to_string(), "cart is empty");
    }

    #[test]
    fn storage_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err: StoreError<CartError> = StoreError::from(io_err);
        assert!(err.to_string().contains("access denied"));
        assert!(err.as_domain().is_none());
    }

    #[test]
    fn as_domain_exposes_validation_kind() {
        let err: StoreError<CartError> = StoreError::Domain(CartError::NoLocationSelected);
        assert!(matches!(
            err.as_domain(),
            Some(CartError::NoLocationSelected)
        ));
    }
}
