//! Menu action types
//!
//! Every menu is a closed enum so dispatch is checked for exhaustiveness.

use crate::archive::ExportCategory;

/// Actions offered by the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Scrape,
    Crawl,
    Map,
    ManageExports,
    Settings,
    Help,
    Quit,
}

impl MenuAction {
    pub const ALL: [MenuAction; 7] = [
        Self::Scrape,
        Self::Crawl,
        Self::Map,
        Self::ManageExports,
        Self::Settings,
        Self::Help,
        Self::Quit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Scrape => "Scrape URL",
            Self::Crawl => "Crawl Website",
            Self::Map => "Map Website",
            Self::ManageExports => "Manage Exports",
            Self::Settings => "Settings",
            Self::Help => "Help",
            Self::Quit => "Quit",
        }
    }

    /// Archive category results of this action are saved to by default
    pub fn default_category(&self) -> Option<ExportCategory> {
        match self {
            Self::Scrape => Some(ExportCategory::Scrapes),
            Self::Crawl => Some(ExportCategory::Crawls),
            Self::Map => Some(ExportCategory::Maps),
            Self::ManageExports | Self::Settings | Self::Help | Self::Quit => None,
        }
    }

    /// Whether the session waits for Enter before redrawing the menu
    pub fn pauses_after(&self) -> bool {
        !matches!(self, Self::ManageExports | Self::Quit)
    }
}

/// Actions offered inside "Manage Exports"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportsAction {
    Browse,
    Search,
    Back,
}

impl ExportsAction {
    pub const ALL: [ExportsAction; 3] = [Self::Browse, Self::Search, Self::Back];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Browse => "Browse exports",
            Self::Search => "Search exports",
            Self::Back => "Back to main menu",
        }
    }
}

/// Actions offered for a selected export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordAction {
    View,
    Delete,
    Back,
}

impl RecordAction {
    pub const ALL: [RecordAction; 3] = [Self::View, Self::Delete, Self::Back];

    pub fn label(&self) -> &'static str {
        match self {
            Self::View => "View",
            Self::Delete => "Delete",
            Self::Back => "Back",
        }
    }
}

/// Labels for a menu built from `ALL`
pub fn labels<T: Copy>(items: &[T], label: impl Fn(&T) -> &'static str) -> Vec<String> {
    items.iter().map(|i| label(i).to_string()).collect()
}
