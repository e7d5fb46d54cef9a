use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::csv::{ParsedCsv, ParsedRow};
use crate::normalize::{clean_amount, clean_date, clean_text, non_blank};

/// Destination columns in table order. Also the CSV header names each field is read from.
pub const DESTINATION_COLUMNS: [&str; 10] = [
    "purchase_order_no",
    "date_of_delivery",
    "date_of_preparation_of_iar",
    "prepared_by",
    "iar_no",
    "particulars",
    "iar_amount",
    "timeline_10wd",
    "supplier_name",
    "delivery_status",
];

/// One row of the `iar_2025_monitoring` table, ready to be written.
///
/// Dates stay text; the destination converts them during the insert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub purchase_order_no: Option<String>,
    pub date_of_delivery: Option<String>,
    pub date_of_preparation_of_iar: Option<String>,
    pub prepared_by: Option<String>,
    pub iar_no: Option<String>,
    pub particulars: Option<String>,
    pub iar_amount: Option<Decimal>,
    pub timeline_10wd: Option<String>,
    pub supplier_name: Option<String>,
    pub delivery_status: Option<String>,
}

impl NormalizedRecord {
    /// Build a record from one parsed row, looking each column up by header name.
    /// Missing columns become `None`.
    pub fn from_row(csv: &ParsedCsv, row: &ParsedRow) -> Self {
        let cell = |column: &str| csv.cell(row, column);

        NormalizedRecord {
            purchase_order_no: non_blank(cell("purchase_order_no")),
            date_of_delivery: clean_date(cell("date_of_delivery")),
            date_of_preparation_of_iar: clean_date(cell("date_of_preparation_of_iar")),
            prepared_by: clean_text(cell("prepared_by")),
            iar_no: clean_text(cell("iar_no")),
            particulars: clean_text(cell("particulars")),
            iar_amount: clean_amount(cell("iar_amount")),
            timeline_10wd: clean_text(cell("timeline_10wd")),
            supplier_name: clean_text(cell("supplier_name")),
            delivery_status: clean_text(cell("delivery_status")),
        }
    }

    /// Normalize every data row, keeping source order. No row is dropped.
    pub fn from_csv(csv: &ParsedCsv) -> Vec<Self> {
        csv.rows()
            .iter()
            .map(|row| Self::from_row(csv, row))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv::parse_csv;

    #[test]
    fn test_from_csv_maps_by_header_name() {
        let csv = parse_csv("iar_amount,purchase_order_no\n\"₱1,250.50\",PO-1\n").unwrap();
        let records = NormalizedRecord::from_csv(&csv);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].purchase_order_no.as_deref(), Some("PO-1"));
        assert_eq!(records[0].iar_amount, Some("1250.50".parse().unwrap()));
        assert_eq!(records[0].supplier_name, None);
        assert_eq!(records[0].date_of_delivery, None);
    }

    #[test]
    fn test_blank_amount_keeps_row() {
        let csv = parse_csv("purchase_order_no,iar_amount,supplier_name\nPO-1,,Acme\nPO-2, ,\n").unwrap();
        let records = NormalizedRecord::from_csv(&csv);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].iar_amount, None);
        assert_eq!(records[0].supplier_name.as_deref(), Some("Acme"));
        assert_eq!(records[1].iar_amount, None);
        assert_eq!(records[1].supplier_name.as_deref(), Some(""));
    }

    #[test]
    fn test_full_row() {
        let header = DESTINATION_COLUMNS.join(",");
        let text = format!(
            "{}\n PO-9 ,2025-01-02,01/03/2025,Juan,IAR-7,\"Bond paper, A4\",\"₱ 12,000\",Within,Acme,Delivered\n",
            header
        );
        let csv = parse_csv(&text).unwrap();
        let record = NormalizedRecord::from_row(&csv, &csv.rows()[0]);
        assert_eq!(
            record,
            NormalizedRecord {
                purchase_order_no: Some("PO-9".to_string()),
                date_of_delivery: Some("2025-01-02".to_string()),
                date_of_preparation_of_iar: Some("01/03/2025".to_string()),
                prepared_by: Some("Juan".to_string()),
                iar_no: Some("IAR-7".to_string()),
                particulars: Some("Bond paper, A4".to_string()),
                iar_amount: Some("12000".parse().unwrap()),
                timeline_10wd: Some("Within".to_string()),
                supplier_name: Some("Acme".to_string()),
                delivery_status: Some("Delivered".to_string()),
            }
        );
    }

    #[test]
    fn test_blank_purchase_order_is_none() {
        let csv = parse_csv("purchase_order_no,iar_no\n ,IAR-1\n").unwrap();
        let records = NormalizedRecord::from_csv(&csv);
        assert_eq!(records[0].purchase_order_no, None);
        assert_eq!(records[0].iar_no.as_deref(), Some("IAR-1"));
    }
}
