use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
pub struct SiteWrapper<T> {
    pub site: T,
}

impl<T> SiteWrapper<T> {
    pub fn wrap_with_site_data(site: T) -> SiteWrapper<T> {
        SiteWrapper { site }
    }
}
