pub mod error;
pub mod locale;
pub mod sections;
pub mod types;

pub use error::Error;
pub use sections::SectionConfig;
pub use types::{Newsletter, SummaryItem, VerifiedArticle};

pub type Result<T> = std::result::Result<T, Error>;

pub mod prelude {
    pub use super::locale::locale;
    pub use super::sections::{section_config, SectionConfig};
    pub use super::types::{Newsletter, SummaryItem, VerifiedArticle};
    pub use super::{Error, Result};
}
