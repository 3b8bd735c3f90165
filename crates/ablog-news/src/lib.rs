//! Read news entries published with ABlog, the Sphinx blogging extension.
//!
//! A site's message of the day is usually taken from its latest news post.
//! This crate finds that post:
//!
//! - [`top_news`] scrapes the first entry of an ABlog HTML newsfeed
//! - [`rst_path_from_html_link`] maps the entry's HTML link back to the RST
//!   source of the post inside the Sphinx project
//! - [`post_info`] reads the title and `:date:` field of an RST post
//! - [`parse_url`] validates the base URL the site is published under
//!
//! # Example
//!
//! ```
//! let html = r#"<h2><a href="../news/2021/test/">Test news item</a></h2>
//! <ul><li><i class="fa fa-calendar"></i> 01/01/2021</li></ul>"#;
//! let entry = ablog_news::top_news(html).unwrap();
//! assert_eq!(entry.title, "Test news item");
//! assert_eq!(entry.date, "01/01/2021");
//! ```

mod error;
mod feed;
mod locate;
mod post;
mod url;

pub use error::{NewsError, NewsResult};
pub use feed::{NewsEntry, read_top_news, top_news};
pub use locate::{rst_path_from_html_link, rst_path_in_dir};
pub use post::{PostInfo, post_info, read_post_info};
pub use url::{SplitUrl, parse_url};
