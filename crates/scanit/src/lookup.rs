// Author: Dustin Pilgrim
// License: MIT

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use eventline::{debug, info, warn};
use rune_cfg::RuneConfig;
use scanit_core::{HealthLevel, ProductEvaluation};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("barcode \"{0}\" is not a plain digit/letter code")]
    InvalidBarcode(String),

    #[error("failed to read product document {}: {message}", path.display())]
    Read { path: PathBuf, message: String },

    #[error("product {barcode}: bad field {field}: {message}")]
    Field {
        barcode: String,
        field: &'static str,
        message: String,
    },
}

/// A store that may know a product. `Ok(None)` means "not in this store".
pub trait ProductSource {
    fn fetch(&self, barcode: &str) -> Result<Option<ProductEvaluation>, LookupError>;
}

/// Built-in table, used offline and whenever the store has nothing.
#[derive(Debug, Clone)]
pub struct LocalRepository {
    products: HashMap<String, ProductEvaluation>,
}

impl Default for LocalRepository {
    fn default() -> Self {
        let products = [
            ProductEvaluation {
                barcode: "5901234123457".into(),
                product_name: "Bautura racoritoare cu zahar".into(),
                health_score: 25,
                level: HealthLevel::Unhealthy,
                explanation: "Contine mult zahar adaugat si aditivi. Consumata frecvent, poate \
                              afecta negativ sanatatea."
                    .into(),
                compare_hint: Some(
                    "Mai nesanatos decat apa, ceaiul neindulcit sau o apa minerala cu lamaie."
                        .into(),
                ),
            },
            ProductEvaluation {
                barcode: "7130451546260".into(),
                product_name: "Cereale integrale fara zahar adaugat".into(),
                health_score: 80,
                level: HealthLevel::Healthy,
                explanation: "Contin fibre, putin zahar, grasimi reduse. Potrivite pentru consum \
                              zilnic, in cantitati moderate."
                    .into(),
                compare_hint: Some(
                    "Mai sanatoase decat cerealele cu ciocolata si zahar adaugat.".into(),
                ),
            },
        ];

        Self {
            products: products
                .into_iter()
                .map(|p| (p.barcode.clone(), p))
                .collect(),
        }
    }
}

impl LocalRepository {
    pub fn lookup(&self, barcode: &str) -> Option<&ProductEvaluation> {
        self.products.get(barcode)
    }

    /// Known product, or a neutral placeholder for anything else.
    pub fn evaluate(&self, barcode: &str) -> ProductEvaluation {
        match self.lookup(barcode) {
            Some(p) => p.clone(),
            None => ProductEvaluation {
                barcode: barcode.to_string(),
                product_name: "Produs necunoscut".into(),
                health_score: 50,
                level: HealthLevel::Moderate,
                explanation: "Produsul nu exista inca in baza de date a aplicatiei. Fara \
                              informatii despre ingrediente, este considerat neutru."
                    .into(),
                compare_hint: Some(
                    "Pentru o evaluare corecta, este nevoie de o baza de date cu ingrediente \
                     preluata dintr-o sursa online."
                        .into(),
                ),
            },
        }
    }
}

/// Remote result when there is one, local evaluation otherwise.
pub fn resolve_evaluation(
    barcode: &str,
    remote: Option<&dyn ProductSource>,
    local: &LocalRepository,
) -> ProductEvaluation {
    let Some(remote) = remote else {
        debug!("no product store configured, using local table for {barcode}");
        return local.evaluate(barcode);
    };

    match remote.fetch(barcode) {
        Ok(Some(found)) => {
            info!("product {barcode} found in store");
            found
        }
        Ok(None) => {
            info!("product {barcode} not in store, using local table");
            local.evaluate(barcode)
        }
        Err(e) => {
            warn!("product store lookup failed for {barcode}: {e}");
            local.evaluate(barcode)
        }
    }
}

/// One rune document per product: `<dir>/<barcode>.rune`.
///
/// ```text
/// product:
///   product_name "..."
///   health_score 80
///   level "healthy"
///   explanation "..."
///   compare_hint "..."
/// end
/// ```
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn document_path(&self, barcode: &str) -> Result<PathBuf, LookupError> {
        check_barcode(barcode)?;
        Ok(self.dir.join(format!("{barcode}.rune")))
    }
}

impl ProductSource for DirectorySource {
    fn fetch(&self, barcode: &str) -> Result<Option<ProductEvaluation>, LookupError> {
        let path = self.document_path(barcode)?;
        if !path.is_file() {
            return Ok(None);
        }

        let rc = RuneConfig::from_file(&path).map_err(|e| LookupError::Read {
            path: path.clone(),
            message: e.to_string(),
        })?;

        let text = |field: &'static str| -> Result<Option<String>, LookupError> {
            rc.get_optional::<String>(&format!("product.{field}"))
                .map_err(|e| field_err(barcode, field, e.to_string()))
        };

        let score = rc
            .get_optional::<f64>("product.health_score")
            .map_err(|e| field_err(barcode, "health_score", e.to_string()))?;

        let doc = ProductDocument {
            product_name: text("product_name")?,
            health_score: score,
            level: text("level")?,
            explanation: text("explanation")?,
            compare_hint: text("compare_hint")?,
        };

        doc.into_evaluation(barcode).map(Some)
    }
}

/// Raw fields as stored; validated by `into_evaluation`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductDocument {
    pub product_name: Option<String>,
    pub health_score: Option<f64>,
    pub level: Option<String>,
    pub explanation: Option<String>,
    pub compare_hint: Option<String>,
}

impl ProductDocument {
    pub fn into_evaluation(self, barcode: &str) -> Result<ProductEvaluation, LookupError> {
        let product_name = self
            .product_name
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| field_err(barcode, "product_name", "missing"))?;

        let score = self
            .health_score
            .ok_or_else(|| field_err(barcode, "health_score", "missing"))?;
        if !(0.0..=100.0).contains(&score) {
            return Err(field_err(
                barcode,
                "health_score",
                format!("expected 0..=100, got {score}"),
            ));
        }

        let level_str = self
            .level
            .ok_or_else(|| field_err(barcode, "level", "missing"))?;
        let level = HealthLevel::parse(&level_str).ok_or_else(|| {
            field_err(
                barcode,
                "level",
                format!("expected healthy|moderate|unhealthy, got \"{level_str}\""),
            )
        })?;

        Ok(ProductEvaluation {
            barcode: barcode.to_string(),
            product_name,
            health_score: score.round() as u8,
            level,
            explanation: self.explanation.unwrap_or_default(),
            compare_hint: self.compare_hint.filter(|s| !s.trim().is_empty()),
        })
    }
}

fn field_err(barcode: &str, field: &'static str, message: impl Into<String>) -> LookupError {
    LookupError::Field {
        barcode: barcode.to_string(),
        field,
        message: message.into(),
    }
}

fn check_barcode(barcode: &str) -> Result<(), LookupError> {
    if !barcode.is_empty() && barcode.chars().all(|c| c.is_ascii_alphanumeric()) {
        Ok(())
    } else {
        Err(LookupError::InvalidBarcode(barcode.to_string()))
    }
}
