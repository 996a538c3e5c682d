//! Connectors: camera directory providers and geocoders.
//!
//! Directory providers fetch a full camera list for a bounding box from the
//! configured backend (built-in sample, national ITS API, vendor SQLite
//! table, or ITS + vendor). Geocoders turn place names into coordinates
//! (Naver, built-in gazetteer) and coordinates into addresses (VWorld).

pub mod directory;
pub mod gazetteer;
pub mod geocoder;
mod http;
pub mod its;
pub mod naver;
pub mod sample;
pub mod vworld;

pub use directory::{create_directory, CombinedDirectory, DirectoryProvider, SqliteDirectory};
pub use gazetteer::GazetteerGeocoder;
pub use geocoder::{create_geocoder, FallbackGeocoder, Geocoder};
pub use its::ItsDirectory;
pub use naver::NaverGeocoder;
pub use sample::SampleDirectory;
pub use vworld::VWorldGeocoder;
