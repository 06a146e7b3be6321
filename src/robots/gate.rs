//! Crawl policy gate
//!
//! Fetches a host's robots.txt for every URL it is asked about and turns the
//! outcome into an allow/deny decision:
//!
//! | robots.txt outcome | decision |
//! |--------------------|----------|
//! | transport error | deny |
//! | HTTP 401 / 403 | allow |
//! | HTTP 200, parseable body | evaluate rules for the agent |
//! | any other status, unparseable body | deny |

use crate::robots::{ParsedRobots, RobotsError};
use reqwest::{Client, StatusCode};
use url::Url;

/// Decides whether URLs may be crawled according to their host's robots.txt
#[derive(Debug, Clone)]
pub struct PolicyGate {
    client: Client,
    user_agent: String,
}

impl PolicyGate {
    /// Creates a gate that evaluates rules for `user_agent`
    ///
    /// The client is expected to already send the same user agent.
    pub fn new(client: Client, user_agent: impl Into<String>) -> Self {
        Self {
            client,
            user_agent: user_agent.into(),
        }
    }

    /// Returns the user agent rules are evaluated for
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Checks whether `url` may be crawled
    ///
    /// Performs one robots.txt round trip per call. Any failure to obtain
    /// rules denies the URL.
    pub async fn is_allowed(&self, url: &str) -> bool {
        match self.fetch_robots(url).await {
            Ok(robots) => robots.is_allowed(url, &self.user_agent),
            Err(e) => {
                tracing::debug!("Denying {}: {}", url, e);
                false
            }
        }
    }

    /// Fetches and interprets the robots.txt governing `url`
    ///
    /// # Returns
    ///
    /// * `Ok(ParsedRobots)` - Rules to evaluate (allow-all for 401/403)
    /// * `Err(RobotsError)` - The file could not be fetched or parsed, or the
    ///   status code does not describe a policy
    pub async fn fetch_robots(&self, url: &str) -> Result<ParsedRobots, RobotsError> {
        let parsed = Url::parse(url).map_err(|_| RobotsError::InvalidUrl(url.to_string()))?;
        let location = robots_url(&parsed)?;

        let response = self
            .client
            .get(location.clone())
            .send()
            .await
            .map_err(|source| RobotsError::Fetch {
                url: location.to_string(),
                source,
            })?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(ParsedRobots::allow_all()),
            StatusCode::OK => {
                let body = response.bytes().await.map_err(|source| RobotsError::Fetch {
                    url: location.to_string(),
                    source,
                })?;

                let content = std::str::from_utf8(&body).map_err(|e| RobotsError::Parse {
                    url: location.to_string(),
                    message: e.to_string(),
                })?;

                Ok(ParsedRobots::from_content(content))
            }
            status => Err(RobotsError::Status {
                url: location.to_string(),
                status: status.as_u16(),
            }),
        }
    }
}

/// Derives the robots.txt location (`scheme://host[:port]/robots.txt`) for a URL
///
/// # Examples
///
/// ```
/// use sumi_index::robots::robots_url;
/// use url::Url;
///
/// let page = Url::parse("https://example.com:8443/docs/page?x=1").unwrap();
/// assert_eq!(
///     robots_url(&page).unwrap().as_str(),
///     "https://example.com:8443/robots.txt"
/// );
/// ```
pub fn robots_url(url: &Url) -> Result<Url, RobotsError> {
    if url.host_str().is_none() {
        return Err(RobotsError::InvalidUrl(url.to_string()));
    }

    url.join("/robots.txt")
        .map_err(|_| RobotsError::InvalidUrl(url.to_string()))
}
