//! Job Search Scraper.
//!
//! States: Init → BrowserLaunched → PageLoaded → ResultsRendered → Extracted → Closed.
//!
//! Once a session is launched it is always quit exactly once, whichever step
//! fails. Waiting for the results panel is bounded by both an attempt count
//! and an overall timeout.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::jobs::driver::{BrowserLauncher, BrowserSession};
use crate::jobs::url::{build_search_url, LINKEDIN_JOB_SEARCH_URL};
use crate::models::jobs::{JobListing, JobSearchQuery};

/// Present once LinkedIn has rendered the search results panel.
pub const RESULTS_PANEL_SELECTOR: &str = "span.switcher-tabs__placeholder-text.m-auto";
/// One per job card; text is the title, `href` the posting.
pub const LISTING_CARD_SELECTOR: &str = ".base-card__full-link";

#[derive(Debug, Clone)]
pub struct ScraperSettings {
    pub search_url: String,
    pub max_attempts: u32,
    /// Pause after each navigation before looking for the results panel.
    pub settle_delay: Duration,
    /// How long each attempt waits for the results panel to appear.
    pub implicit_wait: Duration,
    /// Cap on the whole navigate-and-wait phase.
    pub navigation_timeout: Duration,
}

impl Default for ScraperSettings {
    fn default() -> Self {
        Self {
            search_url: LINKEDIN_JOB_SEARCH_URL.to_string(),
            max_attempts: 5,
            settle_delay: Duration::from_secs(3),
            implicit_wait: Duration::from_secs(5),
            navigation_timeout: Duration::from_secs(60),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScrapeState {
    Init,
    BrowserLaunched,
    PageLoaded,
    ResultsRendered,
    Extracted,
    Closed,
}

fn enter(state: ScrapeState) {
    debug!("scraper state: {:?}", state);
}

/// Runs one job search and returns at most `query.max_results` listings in page order.
///
/// An empty result is `Ok(vec![])`; callers report it as a warning.
pub async fn search(
    launcher: &dyn BrowserLauncher,
    query: &JobSearchQuery,
    settings: &ScraperSettings,
) -> Result<Vec<JobListing>, AppError> {
    enter(ScrapeState::Init);
    let url = build_search_url(&settings.search_url, &query.keywords, &query.location);
    info!(
        "Searching jobs: {} keyword(s), location '{}', max {}",
        query.keywords.len(),
        query.location,
        query.max_results
    );

    let mut session = launcher.launch().await?;
    enter(ScrapeState::BrowserLaunched);

    let outcome = drive(session.as_mut(), &url, query.max_results, settings).await;

    if let Err(e) = session.quit().await {
        warn!("Failed to close browser session: {e}");
    }
    enter(ScrapeState::Closed);

    let listings = outcome?;
    info!("Scraped {} job listing(s)", listings.len());
    Ok(listings)
}

async fn drive(
    session: &mut dyn BrowserSession,
    url: &str,
    max_results: usize,
    settings: &ScraperSettings,
) -> Result<Vec<JobListing>, AppError> {
    let mut attempts = 0u32;
    let waited = tokio::time::timeout(
        settings.navigation_timeout,
        wait_for_results(session, url, settings, &mut attempts),
    )
    .await;

    match waited {
        Ok(result) => result?,
        Err(_) => {
            warn!(
                "Results panel did not render within {}s",
                settings.navigation_timeout.as_secs()
            );
            return Err(AppError::NavigationTimeout { attempts });
        }
    }
    enter(ScrapeState::ResultsRendered);

    let listings = extract_listings(session, max_results).await?;
    enter(ScrapeState::Extracted);
    Ok(listings)
}

async fn wait_for_results(
    session: &mut dyn BrowserSession,
    url: &str,
    settings: &ScraperSettings,
    attempts: &mut u32,
) -> Result<(), AppError> {
    while *attempts < settings.max_attempts {
        *attempts += 1;

        session.goto(url).await?;
        enter(ScrapeState::PageLoaded);

        tokio::time::sleep(settings.settle_delay).await;

        if session
            .wait_for(RESULTS_PANEL_SELECTOR, settings.implicit_wait)
            .await?
        {
            return Ok(());
        }

        warn!(
            "Results panel not found (attempt {}/{}), reloading",
            attempts, settings.max_attempts
        );
    }

    Err(AppError::NavigationTimeout {
        attempts: *attempts,
    })
}

async fn extract_listings(
    session: &mut dyn BrowserSession,
    max_results: usize,
) -> Result<Vec<JobListing>, AppError> {
    let cards = session.find_all(LISTING_CARD_SELECTOR).await?;
    debug!("Found {} listing card(s)", cards.len());

    let mut listings = Vec::with_capacity(cards.len().min(max_results));
    for card in cards.iter().take(max_results) {
        let title = card.text().await?.trim().to_string();
        let link = card.attr("href").await?.unwrap_or_default();
        listings.push(JobListing { title, link });
    }
    Ok(listings)
}
