use serde_json::{Map, Value};

use crate::contract::AccountRecord;

const MAILING_ADDRESS_KEY: &str = "PersonMailingAddress";

/// What to emit when Salesforce has no usable value for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbsentPolicy {
    Omit,
    DefaultEmpty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSource {
    Record(&'static str),
    MailingAddress(&'static str),
}

#[derive(Clone, Copy)]
pub enum FieldValue {
    /// Scalar stringified and trimmed.
    Text(fn(&mut AccountRecord, String)),
    /// Only an explicit JSON boolean counts as present.
    Flag(fn(&mut AccountRecord, bool)),
}

#[derive(Clone, Copy)]
pub struct FieldMapping {
    pub source: FieldSource,
    pub output: &'static str,
    pub policy: AbsentPolicy,
    pub value: FieldValue,
}

pub const FIELD_MAPPINGS: &[FieldMapping] = &[
    FieldMapping {
        source: FieldSource::Record("Id"),
        output: "id",
        policy: AbsentPolicy::Omit,
        value: FieldValue::Text(|record, value| record.id = Some(value)),
    },
    FieldMapping {
        source: FieldSource::Record("Salutation"),
        output: "salutation",
        policy: AbsentPolicy::Omit,
        value: FieldValue::Text(|record, value| record.salutation = Some(value)),
    },
    FieldMapping {
        source: FieldSource::Record("FirstName"),
        output: "firstName",
        policy: AbsentPolicy::Omit,
        value: FieldValue::Text(|record, value| record.first_name = Some(value)),
    },
    FieldMapping {
        source: FieldSource::Record("LastName"),
        output: "lastName",
        policy: AbsentPolicy::Omit,
        value: FieldValue::Text(|record, value| record.last_name = Some(value)),
    },
    FieldMapping {
        source: FieldSource::Record("PersonBirthdate"),
        output: "personBirthdate",
        policy: AbsentPolicy::Omit,
        value: FieldValue::Text(|record, value| record.person_birthdate = Some(value)),
    },
    FieldMapping {
        source: FieldSource::Record("Phone"),
        output: "phone",
        policy: AbsentPolicy::Omit,
        value: FieldValue::Text(|record, value| record.phone = Some(value)),
    },
    FieldMapping {
        source: FieldSource::Record("PersonMobilePhone"),
        output: "mobilePhone",
        policy: AbsentPolicy::Omit,
        value: FieldValue::Text(|record, value| record.mobile_phone = Some(value)),
    },
    FieldMapping {
        source: FieldSource::Record("PersonEmail"),
        output: "personEmail",
        policy: AbsentPolicy::Omit,
        value: FieldValue::Text(|record, value| record.person_email = Some(value)),
    },
    FieldMapping {
        source: FieldSource::MailingAddress("street"),
        output: "mailingStreet",
        policy: AbsentPolicy::Omit,
        value: FieldValue::Text(|record, value| record.mailing_address.street = Some(value)),
    },
    FieldMapping {
        source: FieldSource::MailingAddress("postalCode"),
        output: "mailingPostalCode",
        policy: AbsentPolicy::Omit,
        value: FieldValue::Text(|record, value| {
            record.mailing_address.postal_code = Some(value)
        }),
    },
    FieldMapping {
        source: FieldSource::MailingAddress("city"),
        output: "mailingCity",
        policy: AbsentPolicy::Omit,
        value: FieldValue::Text(|record, value| record.mailing_address.city = Some(value)),
    },
    FieldMapping {
        source: FieldSource::MailingAddress("country"),
        output: "mailingCountry",
        policy: AbsentPolicy::Omit,
        value: FieldValue::Text(|record, value| record.mailing_address.country = Some(value)),
    },
    FieldMapping {
        source: FieldSource::Record("Account_Status__c"),
        output: "accountStatus",
        policy: AbsentPolicy::Omit,
        value: FieldValue::Text(|record, value| record.account_status = Some(value)),
    },
    FieldMapping {
        source: FieldSource::Record("Source__c"),
        output: "accountSource",
        policy: AbsentPolicy::DefaultEmpty,
        value: FieldValue::Text(|record, value| record.account_source = value),
    },
    FieldMapping {
        source: FieldSource::Record("Hotlisted__c"),
        output: "hotlisted",
        policy: AbsentPolicy::Omit,
        value: FieldValue::Flag(|record, value| record.hotlisted = Some(value)),
    },
];

/// Result of mapping one page of a Salesforce query response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    NoRecords,
    Accounts(Vec<AccountRecord>),
}

pub fn map_query_response(body: &str) -> Result<QueryOutcome, serde_json::Error> {
    let payload: Value = serde_json::from_str(body)?;
    let records = payload
        .get("records")
        .and_then(Value::as_array)
        .filter(|records| !records.is_empty());

    Ok(match records {
        Some(records) => QueryOutcome::Accounts(records.iter().map(map_account_record).collect()),
        None => QueryOutcome::NoRecords,
    })
}

pub fn map_account_record(source: &Value) -> AccountRecord {
    let fields = source.as_object();
    let mailing_address = fields
        .and_then(|fields| fields.get(MAILING_ADDRESS_KEY))
        .and_then(Value::as_object);

    let mut record = AccountRecord::default();
    for mapping in FIELD_MAPPINGS {
        let raw = match mapping.source {
            FieldSource::Record(key) => lookup(fields, key),
            FieldSource::MailingAddress(key) => lookup(mailing_address, key),
        };
        apply_field(&mut record, mapping, raw);
    }
    record
}

fn lookup<'a>(fields: Option<&'a Map<String, Value>>, key: &str) -> Option<&'a Value> {
    fields.and_then(|fields| fields.get(key))
}

fn apply_field(record: &mut AccountRecord, mapping: &FieldMapping, raw: Option<&Value>) {
    match mapping.value {
        FieldValue::Text(assign) => match (raw.and_then(scalar_text), mapping.policy) {
            (Some(text), _) => assign(record, text),
            (None, AbsentPolicy::DefaultEmpty) => assign(record, String::new()),
            (None, AbsentPolicy::Omit) => {}
        },
        FieldValue::Flag(assign) => {
            if let Some(flag) = raw.and_then(Value::as_bool) {
                assign(record, flag);
            }
        }
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.trim().to_string()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
