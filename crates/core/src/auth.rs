use std::fmt::{Debug, Formatter};

/// Static API key sent with every governance API request.
///
/// The key never appears in `Debug` output so configuration structs can be
/// logged as a whole.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wraps a raw key value. Surrounding whitespace is trimmed.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into().trim().to_owned())
    }

    /// Returns the raw key for use in a request header.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    /// Returns whether no key was configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Debug for ApiKey {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            formatter.write_str("ApiKey(<unset>)")
        } else {
            formatter.write_str("ApiKey(<redacted>)")
        }
    }
}
