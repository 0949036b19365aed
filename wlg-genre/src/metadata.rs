//! Release metadata seen by the engine
//!
//! The engine never reads files itself. Whoever scanned the release hands in
//! something implementing [`ReleaseMetadata`] on every reset.

/// Common values shared by all tracks of a release
pub trait ReleaseMetadata {
    /// Album artist common to every track, if any
    fn album_artist(&self) -> Option<&str>;

    /// Album title common to every track, if any
    fn album(&self) -> Option<&str>;
}

/// Plain owned release metadata
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Release {
    pub album_artist: Option<String>,
    pub album: Option<String>,
}

impl Release {
    pub fn new(album_artist: Option<&str>, album: Option<&str>) -> Self {
        Self {
            album_artist: album_artist.map(str::to_string),
            album: album.map(str::to_string),
        }
    }
}

impl ReleaseMetadata for Release {
    fn album_artist(&self) -> Option<&str> {
        self.album_artist.as_deref().filter(|s| !s.is_empty())
    }

    fn album(&self) -> Option<&str> {
        self.album.as_deref().filter(|s| !s.is_empty())
    }
}
