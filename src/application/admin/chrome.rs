use crate::presentation::admin::views::{AdminBrandView, AdminChrome, AdminMetaView};

/// Builds the admin page frame from the configured brand title.
#[derive(Clone)]
pub struct AdminChromeService {
    brand_title: String,
}

impl AdminChromeService {
    pub fn new(brand_title: impl Into<String>) -> Self {
        Self {
            brand_title: brand_title.into(),
        }
    }

    pub fn load(&self, page_title: &str) -> AdminChrome {
        let brand = AdminBrandView {
            title: format!("{} Admin", self.brand_title),
        };

        let meta = AdminMetaView {
            title: format!("{} · {}", brand.title, page_title),
            description: "Post editor".to_string(),
        };

        AdminChrome { brand, meta }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meta_title_combines_brand_and_page() {
        let chrome = AdminChromeService::new("Quire").load("Edit post");
        assert_eq!(chrome.brand.title, "Quire Admin");
        assert_eq!(chrome.meta.title, "Quire Admin · Edit post");
    }
}
