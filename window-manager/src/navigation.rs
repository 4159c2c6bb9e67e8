//! Launcher navigation
//!
//! The sidebar launcher does not talk to the window manager through a
//! global event. It holds a [`Launcher`] that maps each [`Page`] to a panel
//! id, a title and host-built content, and calls `open` directly.

use std::fmt;
use std::str::FromStr;

use crate::desktop::WindowManager;

/// Launcher entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Paradox,
    Config,
    Network,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Paradox, Page::Config, Page::Network];

    /// Panel id used for this page; one panel per page
    pub fn id(self) -> &'static str {
        match self {
            Page::Paradox => "paradox",
            Page::Config => "config",
            Page::Network => "network",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Page::Paradox => "PARADOX CONTROL CENTER",
            Page::Config => "SYSTEM CONFIGURATION",
            Page::Network => "NETWORK STATUS",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
#[error("Unknown page: {0}")]
pub struct UnknownPage(pub String);

impl FromStr for Page {
    type Err = UnknownPage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Page::ALL
            .into_iter()
            .find(|page| page.id() == s)
            .ok_or_else(|| UnknownPage(s.to_string()))
    }
}

/// Mediator between the launcher and the window manager.
pub struct Launcher<F> {
    content_for: F,
}

impl<F> Launcher<F> {
    pub fn new(content_for: F) -> Self {
        Self { content_for }
    }

    pub fn navigate<C>(&self, wm: &mut WindowManager<C>, page: Page)
    where
        F: Fn(Page) -> C,
    {
        tracing::debug!(page = %page, "Navigating");
        wm.open(page.id(), page.title(), (self.content_for)(page));
    }

    /// Navigate by launcher key. Unknown keys are logged and dropped.
    pub fn navigate_key<C>(&self, wm: &mut WindowManager<C>, key: &str)
    where
        F: Fn(Page) -> C,
    {
        match key.parse::<Page>() {
            Ok(page) => self.navigate(wm, page),
            Err(e) => tracing::warn!(error = %e, "Navigation ignored"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::desktop::test_support::manager;

    fn content(page: Page) -> &'static str {
        match page {
            Page::Paradox => "home",
            Page::Config => "settings",
            Page::Network => "status",
        }
    }

    #[test]
    fn test_page_keys_round_trip() {
        for page in Page::ALL {
            assert_eq!(page.id().parse::<Page>(), Ok(page));
        }
        assert_eq!(
            "shutdown".parse::<Page>(),
            Err(UnknownPage("shutdown".to_string()))
        );
    }

    #[test]
    fn test_navigate_opens_page_panel() {
        let (mut wm, _timers) = manager();
        let launcher = Launcher::new(content);

        launcher.navigate(&mut wm, Page::Config);

        let panel = wm.panel("config").unwrap();
        assert_eq!(panel.title(), "SYSTEM CONFIGURATION");
        assert_eq!(*panel.content(), "settings");
        assert_eq!(wm.focused(), Some("config"));
    }

    #[test]
    fn test_navigate_twice_refocuses_same_panel() {
        let (mut wm, _timers) = manager();
        let launcher = Launcher::new(content);

        launcher.navigate(&mut wm, Page::Network);
        launcher.navigate(&mut wm, Page::Paradox);
        launcher.navigate_key(&mut wm, "network");

        assert_eq!(wm.len(), 2);
        assert_eq!(wm.focused(), Some("network"));
    }

    #[test]
    fn test_unknown_key_is_dropped() {
        let (mut wm, _timers) = manager();
        let launcher = Launcher::new(content);

        launcher.navigate_key(&mut wm, "missing");
        assert!(wm.is_empty());
    }
}
