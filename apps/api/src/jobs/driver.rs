//! Browser capability interface plus its WebDriver (fantoccini) implementation.
//!
//! The scraper only needs: open a session, navigate, wait for a selector,
//! list elements, read their text/attributes, and quit. Anything that speaks
//! these can stand in for a real browser.

use std::time::Duration;

use async_trait::async_trait;
use fantoccini::{error::CmdError, elements::Element, Client, ClientBuilder, Locator};
use serde_json::json;
use thiserror::Error;
use tracing::info;

/// Chrome flags for an unattended, full-size headless session.
const CHROME_ARGS: &[&str] = &[
    "--headless",
    "--no-sandbox",
    "--disable-dev-shm-usage",
    "--start-maximized",
    "--window-size=1920,1080",
];

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("failed to start browser session: {0}")]
    Launch(String),

    #[error("browser command failed: {0}")]
    Command(String),
}

impl From<CmdError> for DriverError {
    fn from(err: CmdError) -> Self {
        DriverError::Command(err.to_string())
    }
}

/// Starts a fresh browser session per search.
#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    async fn launch(&self) -> Result<Box<dyn BrowserSession>, DriverError>;
}

/// One live browser. The caller owns it and must call `quit` exactly once.
#[async_trait]
pub trait BrowserSession: Send {
    async fn goto(&mut self, url: &str) -> Result<(), DriverError>;

    /// Waits up to `timeout` for `selector`. `Ok(false)` means it never appeared.
    async fn wait_for(&mut self, selector: &str, timeout: Duration) -> Result<bool, DriverError>;

    async fn find_all(&mut self, selector: &str) -> Result<Vec<Box<dyn PageElement>>, DriverError>;

    async fn quit(&mut self) -> Result<(), DriverError>;
}

#[async_trait]
pub trait PageElement: Send + Sync {
    /// Visible text of the element.
    async fn text(&self) -> Result<String, DriverError>;

    async fn attr(&self, name: &str) -> Result<Option<String>, DriverError>;
}

// ────────────────────────────────────────────────────────────────────────────
// fantoccini / WebDriver backend
// ────────────────────────────────────────────────────────────────────────────

/// Opens Chrome sessions through a running WebDriver server (e.g. chromedriver).
pub struct WebDriverLauncher {
    webdriver_url: String,
}

impl WebDriverLauncher {
    pub fn new(webdriver_url: impl Into<String>) -> Self {
        Self {
            webdriver_url: webdriver_url.into(),
        }
    }
}

#[async_trait]
impl BrowserLauncher for WebDriverLauncher {
    async fn launch(&self) -> Result<Box<dyn BrowserSession>, DriverError> {
        let mut capabilities = serde_json::Map::new();
        capabilities.insert("browserName".to_string(), json!("chrome"));
        capabilities.insert(
            "goog:chromeOptions".to_string(),
            json!({ "args": CHROME_ARGS }),
        );

        let client = ClientBuilder::native()
            .capabilities(capabilities)
            .connect(&self.webdriver_url)
            .await
            .map_err(|e| DriverError::Launch(e.to_string()))?;

        info!("Headless browser session started");
        Ok(Box::new(WebDriverSession { client }))
    }
}

struct WebDriverSession {
    client: Client,
}

#[async_trait]
impl BrowserSession for WebDriverSession {
    async fn goto(&mut self, url: &str) -> Result<(), DriverError> {
        self.client.goto(url).await?;
        Ok(())
    }

    async fn wait_for(&mut self, selector: &str, timeout: Duration) -> Result<bool, DriverError> {
        match self
            .client
            .wait()
            .at_most(timeout)
            .for_element(Locator::Css(selector))
            .await
        {
            Ok(_) => Ok(true),
            Err(CmdError::WaitTimeout) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_all(&mut self, selector: &str) -> Result<Vec<Box<dyn PageElement>>, DriverError> {
        let elements = self.client.find_all(Locator::Css(selector)).await?;
        Ok(elements
            .into_iter()
            .map(|e| Box::new(WebDriverElement(e)) as Box<dyn PageElement>)
            .collect())
    }

    async fn quit(&mut self) -> Result<(), DriverError> {
        // `close` consumes the handle; the clone shares the same session.
        self.client.clone().close().await?;
        info!("Headless browser session closed");
        Ok(())
    }
}

struct WebDriverElement(Element);

#[async_trait]
impl PageElement for WebDriverElement {
    async fn text(&self) -> Result<String, DriverError> {
        Ok(self.0.text().await?)
    }

    async fn attr(&self, name: &str) -> Result<Option<String>, DriverError> {
        Ok(self.0.attr(name).await?)
    }
}
