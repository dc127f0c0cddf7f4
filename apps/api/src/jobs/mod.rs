// Job search: drives a headless browser through a LinkedIn search and scrapes result cards.
// The browser is reached only through the driver::BrowserLauncher capability.

pub mod driver;
pub mod handlers;
pub mod scraper;
pub mod url;
