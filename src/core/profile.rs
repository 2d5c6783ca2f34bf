//! Portfolio subject metadata
//!
//! Besides feeding the welcome screen and status bar, the profile is exported
//! as a schema.org `Person` block for search indexing (`devfolio meta`).

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Who the portfolio is about
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Profile {
    pub name: String,
    pub job_title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub locality: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub alma_mater: String,
    #[serde(default)]
    pub knows_about: Vec<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub same_as: Vec<String>,
}

impl Profile {
    /// Window/welcome title, e.g. "Jane Doe Portfolio"
    pub fn title(&self) -> String {
        format!("{} Portfolio", self.name)
    }

    /// Status bar caption, e.g. "Jane Doe - Android Developer Portfolio"
    pub fn caption(&self) -> String {
        format!("{} - {} Portfolio", self.name, self.job_title)
    }

    /// schema.org `Person` object; empty optional fields are omitted
    pub fn to_json_ld(&self) -> Value {
        let mut person = json!({
            "@context": "https://schema.org",
            "@type": "Person",
            "name": self.name,
            "jobTitle": self.job_title,
        });

        // json! always yields an object here
        let Some(fields) = person.as_object_mut() else {
            return person;
        };

        if !self.description.is_empty() {
            fields.insert("description".into(), json!(self.description));
        }

        if !(self.locality.is_empty() && self.region.is_empty() && self.country.is_empty()) {
            let mut address = serde_json::Map::new();
            address.insert("@type".into(), json!("PostalAddress"));
            for (key, value) in [
                ("addressLocality", &self.locality),
                ("addressRegion", &self.region),
                ("addressCountry", &self.country),
            ] {
                if !value.is_empty() {
                    address.insert(key.into(), json!(value));
                }
            }
            fields.insert("address".into(), Value::Object(address));
        }

        if !self.alma_mater.is_empty() {
            fields.insert(
                "alumniOf".into(),
                json!({ "@type": "Organization", "name": self.alma_mater }),
            );
        }
        if !self.knows_about.is_empty() {
            fields.insert("knowsAbout".into(), json!(self.knows_about));
        }
        if !self.url.is_empty() {
            fields.insert("url".into(), json!(self.url));
        }
        if !self.same_as.is_empty() {
            fields.insert("sameAs".into(), json!(self.same_as));
        }

        person
    }
}
