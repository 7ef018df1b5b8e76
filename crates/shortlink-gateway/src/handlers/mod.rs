mod health;
mod redirect;
mod url;

pub use health::health_handler;
pub use redirect::redirect_handler;
pub use url::{create_url_handler, get_statistics_handler, list_urls_handler};
