//! Page-level extraction for news sites.
//!
//! Extraction follows a two-phase pattern across two page loads:
//!
//! 1. **Locating**: find the latest article link on the homepage
//!    ([`latest_link`])
//! 2. **Reading**: pull the headline and body from the article page
//!    ([`content`])
//!
//! Both resolvers work on any [`Page`](crate::driver::Page) and only issue
//! read-only queries. Selectors come from the
//! [`SiteProfile`](crate::config::SiteProfile), so supporting another site
//! is a configuration change.

pub mod content;
pub mod latest_link;
