// Marketplace URL helpers

pub const ALL_SITES_URL: &str = "http://www.craigslist.org/about/sites";

/// Root page of a site, e.g. `sfbay` -> `http://sfbay.craigslist.org`.
pub fn site_url(site: &str) -> String {
    format!("http://{}.craigslist.org", site.trim().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn site_url_uses_subdomain() {
        assert_eq!(site_url("sfbay"), "http://sfbay.craigslist.org");
        assert_eq!(site_url(" NewYork "), "http://newyork.craigslist.org");
    }
}
