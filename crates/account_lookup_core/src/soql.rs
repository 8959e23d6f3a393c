use std::fmt;

pub const QUERY_PATH: &str = "/services/data/v57.0/query";

pub const ACCOUNT_FIELDS: &[&str] = &[
    "Id",
    "Salutation",
    "FirstName",
    "LastName",
    "PersonBirthdate",
    "Phone",
    "PersonMobilePhone",
    "PersonEmail",
    "PersonMailingAddress",
    "Account_Status__c",
    "Source__c",
    "Hotlisted__c",
];

/// A quoted SOQL string literal.
///
/// The only way to build one is [`SoqlLiteral::escape`], so a query built from
/// literals cannot carry an unescaped quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoqlLiteral(String);

impl SoqlLiteral {
    pub fn escape(raw: &str) -> Self {
        Self(raw.replace('\'', "''"))
    }

    /// Escaped contents without the surrounding quotes.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SoqlLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.0)
    }
}

pub fn account_by_email_query(email: &SoqlLiteral) -> String {
    format!(
        "SELECT {} FROM account WHERE PersonEmail = {email}",
        ACCOUNT_FIELDS.join(", ")
    )
}

pub fn query_url(instance_url: &str, soql: &str) -> String {
    format!(
        "{}{QUERY_PATH}?q={}",
        instance_url.trim_end_matches('/'),
        urlencoding::encode(soql)
    )
}
