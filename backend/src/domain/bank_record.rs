//! Bank records.

use serde::{Deserialize, Serialize};

use super::record::{EntityKind, FieldError, Record, RecordBatch, RecordId};

/// A bank as shown on the banks screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankRecord {
    /// Source-assigned identifier.
    pub id: RecordId,
    /// Display name.
    pub bank_name: String,
    /// ABA routing number, kept as entered.
    pub routing_number: String,
    /// SWIFT/BIC code, kept as entered.
    pub swift_bic: String,
}

impl Record for BankRecord {
    const KIND: EntityKind = EntityKind::Banks;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn set_field(&mut self, field: &str, value: &str) -> Result<(), FieldError> {
        let slot = match field {
            "id" => return Err(FieldError::read_only(field)),
            "bank_name" => &mut self.bank_name,
            "routing_number" => &mut self.routing_number,
            "swift_bic" => &mut self.swift_bic,
            other => return Err(FieldError::unknown(other)),
        };
        value.clone_into(slot);
        Ok(())
    }

    fn from_batch(batch: RecordBatch) -> Result<Vec<Self>, RecordBatch> {
        match batch {
            RecordBatch::Banks(records) => Ok(records),
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn bank() -> BankRecord {
        BankRecord {
            id: RecordId::new("B1").expect("valid id"),
            bank_name: "Harbour Bank".to_owned(),
            routing_number: "011000015".to_owned(),
            swift_bic: "HARBUS33".to_owned(),
        }
    }

    #[rstest]
    fn editing_one_field_leaves_the_rest(mut bank: BankRecord) {
        let before = bank.clone();
        bank.set_field("bank_name", "Meadow Bank")
            .expect("editable field");

        assert_eq!(bank.bank_name, "Meadow Bank");
        assert_eq!(bank.id, before.id);
        assert_eq!(bank.routing_number, before.routing_number);
        assert_eq!(bank.swift_bic, before.swift_bic);
    }

    #[rstest]
    #[case("routing_number", "not-a-number")]
    #[case("swift_bic", "")]
    fn values_are_stored_without_validation(
        mut bank: BankRecord,
        #[case] field: &str,
        #[case] value: &str,
    ) {
        bank.set_field(field, value).expect("editable field");
        let serialised = serde_json::to_value(&bank).expect("serialise");
        assert_eq!(
            serialised.get(field).and_then(serde_json::Value::as_str),
            Some(value)
        );
    }

    #[rstest]
    #[case("id", FieldError::read_only("id"))]
    #[case("email", FieldError::unknown("email"))]
    fn rejects_non_editable_fields(
        mut bank: BankRecord,
        #[case] field: &str,
        #[case] expected: FieldError,
    ) {
        assert_eq!(bank.set_field(field, "x"), Err(expected));
    }

    #[test]
    fn users_batch_is_handed_back() {
        let batch = RecordBatch::Users(Vec::new());
        let returned = BankRecord::from_batch(batch.clone()).expect_err("mismatch");
        assert_eq!(returned, batch);
    }
}
