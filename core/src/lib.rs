//! Market Lens shared types.
//!
//! The proxy produces these shapes and the client consumes them, so both sides
//! agree on the camelCase wire format in one place.

pub mod company_images;
pub mod types;

pub use company_images::company_image;
pub use types::{
    AnalysisSection, AnalyzeReply, AnalyzeRequest, AnalyzeResponse, Competitor, ErrorBody,
    MarketData, NewsArticle, NewsRequest, NewsResponse,
};
