//! Project search and project details.

use serde::{Deserialize, Serialize};

use super::LocalizedText;
use crate::client::SimapClient;
use crate::error::ClientError;
use crate::options::RequestOptions;
use crate::response::CallResult;

/// Query parameters for [`SimapClient::project_search`].
///
/// `None` / empty fields are omitted from the query string; list
/// parameters are comma-joined the way the API expects
/// (`orderAddressCantons=TI,ZH`).
#[derive(Debug, Clone, Default)]
pub struct ProjectSearchQuery {
    /// Full-text search term
    pub search: Option<String>,
    /// Canton IDs filtering on the procurement office address
    pub order_address_cantons: Vec<String>,
    /// CPV classification codes
    pub cpv_codes: Vec<String>,
    /// Pagination cursor: the `lastItem` value of the previous page
    pub last_item: Option<String>,
    /// Page size requested from the server
    pub items_per_page: Option<u32>,
}

impl ProjectSearchQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    #[must_use]
    pub fn cantons<I, S>(mut self, cantons: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.order_address_cantons = cantons.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn cpv_codes<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cpv_codes = codes.into_iter().map(Into::into).collect();
        self
    }

    /// Request the page after the one that ended with `last_item`.
    #[must_use]
    pub fn after(mut self, last_item: impl Into<String>) -> Self {
        self.last_item = Some(last_item.into());
        self
    }

    #[must_use]
    pub fn items_per_page(mut self, count: u32) -> Self {
        self.items_per_page = Some(count);
        self
    }

    fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(search) = &self.search {
            pairs.push(("search".to_owned(), search.clone()));
        }
        if !self.order_address_cantons.is_empty() {
            pairs.push((
                "orderAddressCantons".to_owned(),
                self.order_address_cantons.join(","),
            ));
        }
        if !self.cpv_codes.is_empty() {
            pairs.push(("cpvCodes".to_owned(), self.cpv_codes.join(",")));
        }
        if let Some(last_item) = &self.last_item {
            pairs.push(("lastItem".to_owned(), last_item.clone()));
        }
        if let Some(count) = self.items_per_page {
            pairs.push(("itemsPerPage".to_owned(), count.to_string()));
        }
        pairs
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderAddress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canton_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_number: Option<String>,
    #[serde(default)]
    pub title: LocalizedText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pub_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proc_office_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_address: Option<OrderAddress>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items_per_page: Option<u32>,
    /// Cursor to pass as `lastItem` for the next page; absent on the
    /// final page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_item: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSearchPage {
    #[serde(default)]
    pub projects: Vec<ProjectSummary>,
    #[serde(default)]
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectHeader {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_number: Option<String>,
    #[serde(default)]
    pub title: LocalizedText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pub_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_type: Option<String>,
}

impl SimapClient {
    /// `GET /publications/v2/project/project-search` — search published
    /// projects. Iterate pages by feeding `pagination.last_item` back via
    /// [`ProjectSearchQuery::after`]; the crate provides no automatic
    /// pagination.
    ///
    /// # Errors
    ///
    /// Fails only on transport-level problems; HTTP error statuses
    /// resolve into the envelope.
    pub async fn project_search(
        &self,
        query: &ProjectSearchQuery,
        options: RequestOptions,
    ) -> Result<CallResult<ProjectSearchPage>, ClientError> {
        self.get_json(
            &["publications", "v2", "project", "project-search"],
            &query.to_pairs(),
            options,
        )
        .await
    }

    /// `GET /publications/v2/project/{id}/project-header` — header data
    /// for one project. The id is sent as a single percent-encoded path
    /// segment, whatever bytes it contains.
    ///
    /// # Errors
    ///
    /// Fails only on transport-level problems.
    pub async fn project_header(
        &self,
        project_id: &str,
        options: RequestOptions,
    ) -> Result<CallResult<ProjectHeader>, ClientError> {
        self.get_json(
            &["publications", "v2", "project", project_id, "project-header"],
            &[],
            options,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_produces_no_pairs() {
        assert!(ProjectSearchQuery::new().to_pairs().is_empty());
    }

    #[test]
    fn list_parameters_are_comma_joined() {
        let query = ProjectSearchQuery::new()
            .search("strada")
            .cantons(["TI", "ZH"])
            .cpv_codes(["45000000", "71000000"])
            .after("proj-050")
            .items_per_page(50);
        assert_eq!(
            query.to_pairs(),
            vec![
                ("search".to_owned(), "strada".to_owned()),
                ("orderAddressCantons".to_owned(), "TI,ZH".to_owned()),
                ("cpvCodes".to_owned(), "45000000,71000000".to_owned()),
                ("lastItem".to_owned(), "proj-050".to_owned()),
                ("itemsPerPage".to_owned(), "50".to_owned()),
            ]
        );
    }

    #[test]
    fn search_page_tolerates_missing_fields() {
        let page: ProjectSearchPage = serde_json::from_str(
            r#"{"projects":[{"id":"p1","title":{"it":"Strada cantonale"}}]}"#,
        )
        .unwrap();
        assert_eq!(page.projects.len(), 1);
        assert_eq!(page.projects[0].title.it.as_deref(), Some("Strada cantonale"));
        assert!(page.pagination.last_item.is_none());
    }
}
