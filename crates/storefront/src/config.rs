//! Command-line configuration for the terminal storefront.

use clap::Parser;

use crate::client::DEFAULT_API_URL;

/// Browse the Vibe Commerce catalog, fill a cart, and check out.
#[derive(Debug, Clone, Parser)]
#[command(name = "vibe-shop")]
#[command(author, version, about = "Vibe Commerce terminal storefront")]
pub struct StorefrontArgs {
    /// Base URL of the catalog & order API
    #[arg(long, env = "VIBE_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_api_url() {
        let args = StorefrontArgs::try_parse_from(["vibe-shop"]).unwrap();
        // VIBE_API_URL may be set in the environment running the tests
        if std::env::var_os("VIBE_API_URL").is_none() {
            assert_eq!(args.api_url, "http://localhost:5000/api");
        }
    }

    #[test]
    fn test_api_url_flag() {
        let args =
            StorefrontArgs::try_parse_from(["vibe-shop", "--api-url", "http://shop:8080/api"])
                .unwrap();
        assert_eq!(args.api_url, "http://shop:8080/api");
    }
}
