use log::{error, info};
use scraper::{Html, Selector};

use crate::cards::expansion::Expansion;
use crate::gatherer_client::GathererScraper;

impl GathererScraper {
    /// Lists every expansion offered by the search form of the front page.
    ///
    /// An empty list means the page did not look as expected.
    pub async fn list_expansions(&self) -> Vec<Expansion> {
        let url = self.urls.front_page();
        info!("Fetching expansions from: {}", url);
        let page = self.fetch(&url).await;

        let names = expansion_names(&page.document());
        if names.is_empty() {
            error!("No expansion list found on {}", url);
        } else {
            info!("Found {} expansions", names.len());
        }
        names.iter().map(|name| Expansion::new(name)).collect()
    }
}

fn expansion_names(document: &Html) -> Vec<String> {
    let selector = Selector::parse(r#"[name*="setAddText"]"#).unwrap();

    let mut names: Vec<String> = Vec::new();
    for control in document.select(&selector) {
        for text in control.text() {
            let name = text.trim();
            if !name.is_empty() && !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::helpers::gatherer_for;

    #[tokio::test]
    async fn test_list_expansions() {
        let html_content = include_str!("test/front_page.html").to_string();
        let mut server = std::thread::spawn(|| mockito::Server::new())
            .join()
            .unwrap();
        let mock = server
            .mock("GET", "/Pages/Default.aspx")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body(html_content)
            .create();

        let expansions = gatherer_for(&server.url()).list_expansions().await;

        mock.assert();
        let names = expansions
            .iter()
            .map(|e| e.name_gatherer.as_str())
            .collect::<Vec<&str>>();
        assert_eq!(
            names,
            vec![
                "Alara Reborn",
                "Magic 2010",
                "Magic: The Gathering-Conspiracy",
                "Zendikar"
            ]
        );
        assert!(expansions.iter().all(|e| e.code_gatherer.is_empty()));
    }

    #[test]
    fn test_missing_control_yields_nothing() {
        let document = Html::parse_document("<html><body><select name=\"other\"><option>Zendikar</option></select></body></html>");
        assert!(expansion_names(&document).is_empty());
    }
}
