//! Typed resource helpers
//!
//! Thin per-resource wrappers that map one operation to one REST call
//! through the request core. They add no behavior beyond endpoint
//! construction and body shaping.

mod submissions;
mod submitters;
mod templates;

pub use submissions::{CreateSubmission, SubmissionsClient, SubmitterInput};
pub use submitters::SubmittersClient;
pub use templates::TemplatesClient;

use crate::client::ApiClient;
use crate::ports::{CredentialsProvider, HttpTransport};

impl<T: HttpTransport, C: CredentialsProvider> ApiClient<T, C> {
    /// Submission operations.
    #[must_use]
    pub const fn submissions(&self) -> SubmissionsClient<'_, T, C> {
        SubmissionsClient { client: self }
    }

    /// Template operations.
    #[must_use]
    pub const fn templates(&self) -> TemplatesClient<'_, T, C> {
        TemplatesClient { client: self }
    }

    /// Submitter operations.
    #[must_use]
    pub const fn submitters(&self) -> SubmittersClient<'_, T, C> {
        SubmittersClient { client: self }
    }
}
