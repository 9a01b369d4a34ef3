use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::errors::SubmitError;

static ITEM_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^Q\d+$").expect("valid item id pattern"));

static ITEM_ID_IN_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/(Q\d+)(?:[#/]|$)").expect("valid item path pattern"));

/// Identifier of a Wikibase item (`Q<digits>`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityId(String);

impl EntityId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for EntityId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        if ITEM_ID.is_match(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(anyhow!("Invalid item id: {}", s))
        }
    }
}

/// Pull an item id out of a location, which may be a full URL or a bare path
pub fn entity_id_from_location(location: &str) -> Option<EntityId> {
    let path = match Url::parse(location) {
        Ok(url) => url.path().to_string(),
        Err(_) => location.split(['?', '#']).next().unwrap_or_default().to_string(),
    };

    ITEM_ID_IN_PATH
        .captures(&path)
        .and_then(|caps| caps.get(1))
        .map(|m| EntityId(m.as_str().to_string()))
}

/// Resolve the item being edited.
///
/// A valid configured id wins; otherwise the id is parsed from the location
/// path. Fails without touching the network when neither yields an id.
pub fn resolve_entity_id(configured: Option<&str>, location: &str) -> Result<EntityId, SubmitError> {
    if let Some(id) = configured.and_then(|raw| raw.parse::<EntityId>().ok()) {
        return Ok(id);
    }

    entity_id_from_location(location).ok_or(SubmitError::EntityIdNotFound)
}
