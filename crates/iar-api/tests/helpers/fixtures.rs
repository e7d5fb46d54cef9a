//! CSV bodies used across the API tests.

pub const FULL_HEADER: &str = "purchase_order_no,date_of_delivery,date_of_preparation_of_iar,\
prepared_by,iar_no,particulars,iar_amount,timeline_10wd,supplier_name,delivery_status";

/// Two complete rows, one with quoted commas and an embedded newline.
pub fn two_row_csv() -> String {
    format!(
        "{}\r\n\
         PO-1,2025-01-10,2025-01-12, Maria Santos ,IAR-001,\"Bond paper, A4\",\"₱1,250.50\",Within,Acme Corp,Delivered\r\n\
         PO-2,2025-02-01,,Jose Cruz,IAR-002,\"Toner\nBlack\",$300,Delayed,Beta Supply,Pending\r\n",
        FULL_HEADER
    )
}
