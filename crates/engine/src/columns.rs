//! Header resolution: canonical field -> source column index.
//!
//! Built once per loaded dataset and reused for every row, so the scoring
//! hot path never does a dynamic header lookup.

use std::collections::HashMap;

use crate::error::MatchError;
use crate::normalize::normalize_text;

/// The canonical fields a dataset can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalField {
    Code,
    Description,
    Classification,
    Barcode,
    Quantity,
    Unit,
    Format,
    Brand,
    UnitCount,
    Flavor,
    AveragePrice,
    Equivalence,
    Factor,
    MatchedCode,
}

impl CanonicalField {
    pub const ALL: [CanonicalField; 14] = [
        Self::Code,
        Self::Description,
        Self::Classification,
        Self::Barcode,
        Self::Quantity,
        Self::Unit,
        Self::Format,
        Self::Brand,
        Self::UnitCount,
        Self::Flavor,
        Self::AveragePrice,
        Self::Equivalence,
        Self::Factor,
        Self::MatchedCode,
    ];

    /// Canonical name, used as the last-resort header fallback.
    pub fn canonical_name(&self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Description => "description",
            Self::Classification => "classification-code",
            Self::Barcode => "barcode",
            Self::Quantity => "quantity",
            Self::Unit => "unit",
            Self::Format => "format",
            Self::Brand => "brand",
            Self::UnitCount => "unit-count",
            Self::Flavor => "flavor",
            Self::AveragePrice => "average-price",
            Self::Equivalence => "equivalence",
            Self::Factor => "factor",
            Self::MatchedCode => "matched-code-output",
        }
    }

    /// Known header spellings, accent-folded lowercase. Source files arrive
    /// with both Spanish and English headers.
    fn spellings(&self) -> &'static [&'static str] {
        match self {
            Self::Code => &["codigo", "cod", "cod producto", "sku"],
            Self::Description => &["descripcion", "desc", "producto", "glosa"],
            Self::Classification => &[
                "clasificacion",
                "codigo clasificacion",
                "categoria",
                "classification",
            ],
            Self::Barcode => &["ean", "ean13", "codigo de barras", "codigo barra", "upc"],
            Self::Quantity => &["cantidad", "contenido", "qty"],
            Self::Unit => &["unidad", "unidad de medida", "um", "medida"],
            Self::Format => &["formato", "envase"],
            Self::Brand => &["marca"],
            Self::UnitCount => &["unidades", "unidades por pack", "pack"],
            Self::Flavor => &["sabor", "variedad"],
            Self::AveragePrice => &["precio", "precio promedio", "precio prom"],
            Self::Equivalence => &["equivalencia"],
            Self::Factor => &["factor"],
            Self::MatchedCode => &["codigo match", "cod match", "matched code"],
        }
    }
}

/// Resolved canonical field -> column index for one dataset.
#[derive(Debug, Clone)]
pub struct ColumnMap {
    indices: HashMap<CanonicalField, usize>,
}

impl ColumnMap {
    /// Resolve every canonical field against the header row.
    ///
    /// Resolution order per field: known spellings (case/accent-insensitive),
    /// then position 0/1 for code/description, then the canonical name
    /// itself as a literal header. Code and description are mandatory.
    pub fn build(dataset: &str, headers: &[String]) -> Result<Self, MatchError> {
        let folded: Vec<String> = headers.iter().map(|h| normalize_text(h)).collect();
        let find = |names: &[&str]| -> Option<usize> {
            folded.iter().position(|h| names.contains(&h.as_str()))
        };

        let mut indices = HashMap::new();
        for field in CanonicalField::ALL {
            let resolved = find(field.spellings())
                .or(match field {
                    CanonicalField::Code if !headers.is_empty() => Some(0),
                    CanonicalField::Description if headers.len() > 1 => Some(1),
                    _ => None,
                })
                .or_else(|| find(&[field.canonical_name()]));
            if let Some(index) = resolved {
                indices.insert(field, index);
            }
        }

        for mandatory in [CanonicalField::Code, CanonicalField::Description] {
            if !indices.contains_key(&mandatory) {
                return Err(MatchError::MissingColumn {
                    dataset: dataset.to_string(),
                    column: mandatory.canonical_name().to_string(),
                });
            }
        }

        Ok(Self { indices })
    }

    pub fn get(&self, field: CanonicalField) -> Option<usize> {
        self.indices.get(&field).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn spanish_headers_resolve_case_insensitively() {
        let map = ColumnMap::build(
            "reference",
            &headers(&["CÓDIGO", "Descripción", "Marca", "EAN", "Precio"]),
        )
        .unwrap();
        assert_eq!(map.get(CanonicalField::Code), Some(0));
        assert_eq!(map.get(CanonicalField::Description), Some(1));
        assert_eq!(map.get(CanonicalField::Brand), Some(2));
        assert_eq!(map.get(CanonicalField::Barcode), Some(3));
        assert_eq!(map.get(CanonicalField::AveragePrice), Some(4));
    }

    #[test]
    fn positional_fallback_for_code_and_description() {
        let map = ColumnMap::build("catalog", &headers(&["ID", "Nombre Item", "Marca"])).unwrap();
        assert_eq!(map.get(CanonicalField::Code), Some(0));
        assert_eq!(map.get(CanonicalField::Description), Some(1));
    }

    #[test]
    fn canonical_name_fallback() {
        let map = ColumnMap::build(
            "catalog",
            &headers(&["codigo", "descripcion", "unit-count", "average-price"]),
        )
        .unwrap();
        assert_eq!(map.get(CanonicalField::UnitCount), Some(2));
        assert_eq!(map.get(CanonicalField::AveragePrice), Some(3));
    }

    #[test]
    fn unresolved_optional_fields_are_none() {
        let map = ColumnMap::build("catalog", &headers(&["codigo", "descripcion"])).unwrap();
        assert_eq!(map.get(CanonicalField::Flavor), None);
        assert_eq!(map.get(CanonicalField::Factor), None);
    }

    #[test]
    fn single_column_fails_on_description() {
        let err = ColumnMap::build("reference", &headers(&["codigo"])).unwrap_err();
        match err {
            MatchError::MissingColumn { dataset, column } => {
                assert_eq!(dataset, "reference");
                assert_eq!(column, "description");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_header_row_fails_fast() {
        assert!(ColumnMap::build("reference", &[]).is_err());
    }
}
