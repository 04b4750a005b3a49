use std::fmt;

/// Fixed set of archive categories, one subdirectory each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExportCategory {
    Scrapes,
    Crawls,
    Maps,
    Docs,
    Custom,
}

impl ExportCategory {
    pub const ALL: [ExportCategory; 5] = [
        Self::Scrapes,
        Self::Crawls,
        Self::Maps,
        Self::Docs,
        Self::Custom,
    ];

    /// Name of the subdirectory under the archive root
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::Scrapes => "scrapes",
            Self::Crawls => "crawls",
            Self::Maps => "maps",
            Self::Docs => "docs",
            Self::Custom => "custom",
        }
    }

    pub fn from_dir_name(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.dir_name() == s)
    }
}

impl fmt::Display for ExportCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}
