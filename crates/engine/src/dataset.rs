//! CSV ingestion: header resolution, then one fixed-shape record per row.

use crate::columns::{CanonicalField, ColumnMap};
use crate::error::MatchError;
use crate::model::ProductRecord;

/// A loaded dataset: immutable records plus the column map that resolved
/// them.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub name: String,
    pub columns: ColumnMap,
    pub records: Vec<ProductRecord>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&ProductRecord, MatchError> {
        self.records.get(index).ok_or(MatchError::RowOutOfRange {
            dataset: self.name.clone(),
            index,
            len: self.records.len(),
        })
    }
}

/// Parse CSV text into a dataset. The ColumnMap is built once from the
/// header row and reused for every record; a cell that later fails numeric
/// parsing is kept as raw text and treated as "no information" at scoring
/// time, so one malformed cell never aborts the load.
pub fn load_csv(name: &str, csv_data: &str) -> Result<Dataset, MatchError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_data.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| MatchError::Io(e.to_string()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let columns = ColumnMap::build(name, &headers)?;

    let mut records = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row = row.map_err(|e| MatchError::Io(e.to_string()))?;
        records.push(resolve_record(index, &row, &columns));
    }

    Ok(Dataset {
        name: name.to_string(),
        columns,
        records,
    })
}

fn resolve_record(index: usize, row: &csv::StringRecord, columns: &ColumnMap) -> ProductRecord {
    let cell = |field: CanonicalField| -> String {
        columns
            .get(field)
            .and_then(|i| row.get(i))
            .unwrap_or("")
            .trim()
            .to_string()
    };

    ProductRecord {
        index,
        code: cell(CanonicalField::Code),
        description: cell(CanonicalField::Description),
        brand: cell(CanonicalField::Brand),
        barcode: cell(CanonicalField::Barcode),
        classification: cell(CanonicalField::Classification),
        quantity: cell(CanonicalField::Quantity),
        unit: cell(CanonicalField::Unit),
        format: cell(CanonicalField::Format),
        flavor: cell(CanonicalField::Flavor),
        unit_count: cell(CanonicalField::UnitCount),
        price: cell(CanonicalField::AveragePrice),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REFERENCE_CSV: &str = "\
Código,Descripción,Marca,EAN,Cantidad,Unidad,Precio
R-1,Leche Entera 1L,SOPROLE,7802900000011,1,Litro,990
R-2,Azúcar Granulada,IANSA,7802900000028,1,Kilogramo,1250
";

    #[test]
    fn load_resolves_spanish_headers() {
        let dataset = load_csv("reference", REFERENCE_CSV).unwrap();
        assert_eq!(dataset.len(), 2);
        let first = &dataset.records[0];
        assert_eq!(first.index, 0);
        assert_eq!(first.code, "R-1");
        assert_eq!(first.description, "Leche Entera 1L");
        assert_eq!(first.brand, "SOPROLE");
        assert_eq!(first.barcode, "7802900000011");
        assert_eq!(first.unit, "Litro");
        assert_eq!(first.price, "990");
    }

    #[test]
    fn missing_optional_columns_resolve_empty() {
        let dataset = load_csv("reference", REFERENCE_CSV).unwrap();
        assert_eq!(dataset.records[0].flavor, "");
        assert_eq!(dataset.records[0].classification, "");
    }

    #[test]
    fn short_rows_are_tolerated() {
        let csv = "\
codigo,descripcion,marca
C-1,Pan Molde
C-2,Queso Gauda,QUILLAYES
";
        let dataset = load_csv("catalog", csv).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.records[0].brand, "");
        assert_eq!(dataset.records[1].brand, "QUILLAYES");
    }

    #[test]
    fn malformed_numeric_cell_keeps_raw_text() {
        let csv = "\
codigo,descripcion,precio
C-1,Pan Molde,s/p
";
        let dataset = load_csv("catalog", csv).unwrap();
        assert_eq!(dataset.records[0].price, "s/p");
    }

    #[test]
    fn get_out_of_range_is_typed_error() {
        let dataset = load_csv("reference", REFERENCE_CSV).unwrap();
        let err = dataset.get(7).unwrap_err();
        assert!(err.to_string().contains("row 7 out of range"));
    }

    #[test]
    fn headerless_single_column_fails() {
        assert!(load_csv("reference", "solo\nuno\n").is_err());
    }
}
