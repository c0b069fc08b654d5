//! Issuer (bank) detection by keyword aliases.

use lazy_static::lazy_static;
use tracing::{debug, warn};

use crate::models::statement::{Issuer, KnownIssuer, default_issuers};

lazy_static! {
    static ref DEFAULT_CATALOG: IssuerCatalog = IssuerCatalog::default();
}

/// Catalog entry with aliases pre-normalized to upper case.
#[derive(Debug, Clone)]
struct CatalogEntry {
    name: String,
    aliases: Vec<String>,
}

/// Ordered, read-only set of known issuers.
///
/// Detection is plain substring containment on the upper-cased text, so an
/// alias embedded in an unrelated word still matches.
#[derive(Debug, Clone)]
pub struct IssuerCatalog {
    entries: Vec<CatalogEntry>,
}

impl IssuerCatalog {
    /// Build a catalog. Catalog order decides ties between issuers.
    pub fn new(issuers: Vec<KnownIssuer>) -> Self {
        let entries = issuers
            .into_iter()
            .map(|issuer| {
                let aliases = issuer
                    .aliases
                    .iter()
                    .map(|a| a.trim().to_uppercase())
                    .filter(|a| {
                        if a.is_empty() {
                            warn!("Ignoring empty alias for issuer {}", issuer.name);
                        }
                        !a.is_empty()
                    })
                    .collect();
                CatalogEntry {
                    name: issuer.name,
                    aliases,
                }
            })
            .collect();

        Self { entries }
    }

    /// Detect the issuer of a statement.
    pub fn detect(&self, text: &str) -> Issuer {
        match self.detect_with_alias(text) {
            Some((name, alias)) => {
                debug!("Detected issuer {} via alias {:?}", name, alias);
                Issuer::Known(name.to_string())
            }
            None => {
                debug!("No issuer alias found in {} chars of text", text.len());
                Issuer::Unknown
            }
        }
    }

    /// Detect the issuer and report which alias matched.
    pub fn detect_with_alias(&self, text: &str) -> Option<(&str, &str)> {
        let upper = text.to_uppercase();

        self.entries.iter().find_map(|entry| {
            entry
                .aliases
                .iter()
                .find(|alias| upper.contains(alias.as_str()))
                .map(|alias| (entry.name.as_str(), alias.as_str()))
        })
    }

    /// Issuer names in catalog order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    /// Issuers with their normalized aliases, in catalog order.
    pub fn issuers(&self) -> Vec<KnownIssuer> {
        self.entries
            .iter()
            .map(|e| KnownIssuer::new(e.name.clone(), e.aliases.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for IssuerCatalog {
    fn default() -> Self {
        Self::new(default_issuers())
    }
}

/// Detect the issuer using the built-in catalog.
pub fn detect_issuer(text: &str) -> Issuer {
    DEFAULT_CATALOG.detect(text)
}
