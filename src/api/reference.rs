//! Reference-data catalogues: cantons, countries, languages, main
//! activities, and the CPV classification.

use serde::{Deserialize, Serialize};

use super::LocalizedText;
use crate::client::SimapClient;
use crate::error::ClientError;
use crate::options::RequestOptions;
use crate::response::CallResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Canton {
    pub id: String,
    /// NUTS-3 statistical region code, e.g. `CH070` for Ticino
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nuts3: Option<String>,
    #[serde(default)]
    pub label: LocalizedText,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CantonList {
    pub cantons: Vec<Canton>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    /// ISO 3166-1 alpha-2 code, e.g. `CH`
    pub id: String,
    #[serde(default)]
    pub label: LocalizedText,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryList {
    pub countries: Vec<Country>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Language {
    pub id: String,
    #[serde(default)]
    pub label: LocalizedText,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageList {
    pub languages: Vec<Language>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    #[serde(default)]
    pub label: LocalizedText,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityList {
    pub main_activities: Vec<Activity>,
}

/// Common Procurement Vocabulary entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cpv {
    pub id: String,
    #[serde(default)]
    pub label: LocalizedText,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CpvCatalog {
    pub cpvs: Vec<Cpv>,
}

impl SimapClient {
    /// `GET /cantons/v1` — Swiss cantons.
    ///
    /// # Errors
    ///
    /// Fails only on transport-level problems; HTTP error statuses
    /// resolve into the envelope.
    pub async fn list_cantons(
        &self,
        options: RequestOptions,
    ) -> Result<CallResult<CantonList>, ClientError> {
        self.get_json(&["cantons", "v1"], &[], options).await
    }

    /// `GET /countries/v1` — countries.
    ///
    /// # Errors
    ///
    /// Fails only on transport-level problems.
    pub async fn list_countries(
        &self,
        options: RequestOptions,
    ) -> Result<CallResult<CountryList>, ClientError> {
        self.get_json(&["countries", "v1"], &[], options).await
    }

    /// `GET /languages/v1` — publication languages.
    ///
    /// # Errors
    ///
    /// Fails only on transport-level problems.
    pub async fn list_languages(
        &self,
        options: RequestOptions,
    ) -> Result<CallResult<LanguageList>, ClientError> {
        self.get_json(&["languages", "v1"], &[], options).await
    }

    /// `GET /activities/v1` — main procurement activities.
    ///
    /// # Errors
    ///
    /// Fails only on transport-level problems.
    pub async fn list_activities(
        &self,
        options: RequestOptions,
    ) -> Result<CallResult<ActivityList>, ClientError> {
        self.get_json(&["activities", "v1"], &[], options).await
    }

    /// `GET /cpvs/v1` — the CPV classification catalogue.
    ///
    /// # Errors
    ///
    /// Fails only on transport-level problems.
    pub async fn list_cpv_codes(
        &self,
        options: RequestOptions,
    ) -> Result<CallResult<CpvCatalog>, ClientError> {
        self.get_json(&["cpvs", "v1"], &[], options).await
    }
}
