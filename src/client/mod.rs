/// Remote recommendation provider abstraction
///
/// The app never talks to the model vendor directly; it goes through a thin
/// proxy server that holds the credentials. This trait is the seam between
/// the view-state controller and that transport, so the controller is
/// testable with a scripted provider.
use crate::error::DenResult;
use crate::models::MovieRecord;

mod proxy;

pub use proxy::DenProxyClient;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommendationProvider: Send + Sync {
    /// Checks that the proxy is up and holds a model API key
    ///
    /// No secret crosses this boundary; the proxy only reports readiness.
    async fn check_ready(&self) -> DenResult<()>;

    /// Turns a free-form mood description into a single movie recommendation
    ///
    /// Fails fast on empty/whitespace moods without issuing a network call.
    async fn request_recommendation(&self, mood: &str) -> DenResult<MovieRecord>;

    /// Asks for a short free-text hype pitch for an already-chosen movie
    async fn request_hype(&self, title: &str, year: &str) -> DenResult<String>;
}
